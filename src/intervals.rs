//! # Half-open integer intervals
//!
//! [`Interval`] is a single `[begin, end)` range of genomic coordinates and [`IntervalSet`]
//! is the ordered collection of them that represents the exons of a transcript. The set
//! keeps distinct members only (adding the same interval twice stores it once) but it does
//! not force members to be disjoint: overlaps are only coalesced when
//! [`IntervalSet::merge_overlaps`] is called explicitly.
use std::{cmp, collections::BTreeSet, fmt};

use crate::error::{FusionError, Result};

/// A half-open range `[begin, end)`. Ordered by `(begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub begin: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(begin: i64, end: i64) -> Self {
        debug_assert!(begin < end, "interval [{begin}, {end}) is empty");
        Self { begin, end }
    }
    pub fn len(&self) -> i64 {
        self.end - self.begin
    }
    /// An interval without any position in it, `begin >= end`.
    pub fn is_null(&self) -> bool {
        self.begin >= self.end
    }
    pub fn contains_point(&self, point: i64) -> bool {
        self.begin <= point && point < self.end
    }
    pub fn overlaps(&self, begin: i64, end: i64) -> bool {
        self.begin < end && begin < self.end
    }
    pub fn shifted(&self, offset: i64) -> Self {
        Self {
            begin: self.begin + offset,
            end: self.end + offset,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

impl From<(i64, i64)> for Interval {
    fn from(pair: (i64, i64)) -> Self {
        Interval::new(pair.0, pair.1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: BTreeSet<Interval>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
    pub fn len(&self) -> usize {
        self.intervals.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    /// Add `interval` to the set. Null intervals are not stored.
    /// Returns `true` if the set did not hold this exact interval yet.
    pub fn add(&mut self, interval: Interval) -> bool {
        if interval.is_null() {
            return false;
        }
        self.intervals.insert(interval)
    }

    /// Smallest `begin` over all members.
    pub fn begin(&self) -> Result<i64> {
        self.intervals
            .first()
            .map(|iv| iv.begin)
            .ok_or(FusionError::EmptyTranscript)
    }

    /// Largest `end` over all members.
    pub fn end(&self) -> Result<i64> {
        self.intervals
            .iter()
            .map(|iv| iv.end)
            .max()
            .ok_or(FusionError::EmptyTranscript)
    }

    /// The interval from [`Self::begin`] to [`Self::end`].
    pub fn span(&self) -> Result<Interval> {
        Ok(Interval::new(self.begin()?, self.end()?))
    }

    /// Members that contain `point`.
    pub fn at(&self, point: i64) -> IntervalSet {
        self.intervals
            .iter()
            .filter(|iv| iv.contains_point(point))
            .copied()
            .collect()
    }

    /// Members intersecting `[begin, end)`, clipped to that window.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcffuse::intervals::{Interval, IntervalSet};
    ///
    /// let exons: IntervalSet = [(0, 300), (400, 500)].into_iter().map(Interval::from).collect();
    /// let window = exons.overlap(250, 450);
    /// let clipped: Vec<Interval> = window.iter().copied().collect();
    /// assert_eq!(vec![Interval::new(250, 300), Interval::new(400, 450)], clipped);
    /// ```
    pub fn overlap(&self, begin: i64, end: i64) -> IntervalSet {
        self.intervals
            .iter()
            .filter(|iv| iv.overlaps(begin, end))
            .map(|iv| Interval::new(cmp::max(iv.begin, begin), cmp::min(iv.end, end)))
            .collect()
    }

    /// Remove everything inside `[begin, end)`. Members fully inside the window are dropped,
    /// members sticking out on either side keep only the part outside of it.
    pub fn chop(&mut self, begin: i64, end: i64) {
        if begin >= end {
            return;
        }
        let mut kept = BTreeSet::new();
        for iv in &self.intervals {
            if !iv.overlaps(begin, end) {
                kept.insert(*iv);
                continue;
            }
            if iv.begin < begin {
                kept.insert(Interval::new(iv.begin, begin));
            }
            if iv.end > end {
                kept.insert(Interval::new(end, iv.end));
            }
        }
        self.intervals = kept;
    }

    /// A copy of the set with every member moved by `offset`.
    pub fn translate(&self, offset: i64) -> IntervalSet {
        self.intervals.iter().map(|iv| iv.shifted(offset)).collect()
    }

    /// Coalesce members that overlap or touch each other.
    pub fn merge_overlaps(&mut self) {
        let mut merged: Vec<Interval> = Vec::with_capacity(self.intervals.len());
        for iv in &self.intervals {
            match merged.last_mut() {
                Some(last) if iv.begin <= last.end => last.end = cmp::max(last.end, iv.end),
                _ => merged.push(*iv),
            }
        }
        self.intervals = merged.into_iter().collect();
    }

    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        self.intervals
            .union(&other.intervals)
            .copied()
            .collect()
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        let mut set = IntervalSet::new();
        for iv in iter {
            set.add(iv);
        }
        set
    }
}

impl Extend<Interval> for IntervalSet {
    fn extend<I: IntoIterator<Item = Interval>>(&mut self, iter: I) {
        for iv in iter {
            self.add(iv);
        }
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::collections::btree_set::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::collections::btree_set::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self.intervals.iter().map(|iv| iv.to_string()).collect();
        write!(f, "{{{}}}", members.join(", "))
    }
}
