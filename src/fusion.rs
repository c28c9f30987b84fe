//! # Fusing two gene models at their breakpoints
//!
//! A [`FusionContext`] pairs the 5' and the 3' gene of a candidate fusion. The breakpoints of
//! the structural variant are assigned to the genes first (see
//! [`FusionContext::assign_breakpoint`] and [`FusionContext::assign_breakpoint_to_genes`]),
//! then exactly one composition algorithm from [`compose`] turns the pair into a
//! [`FusionLayout`]: two 0-based exon sets that can be drawn next to each other.
use std::fmt;

use log::{debug, trace};

use crate::{error::Result, intervals::IntervalSet, transcript::GeneTranscript};

pub mod compose;
pub mod parts;

/// Breakpoints outside both genes are still assigned to a gene on the same chromosome
/// if one of its ends is closer than this.
pub const RESCUE_DISTANCE: i64 = 20_000;

/// Which side of a breakpoint is kept when joining translocation partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// The end of the fused transcript a gene contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimeEnd {
    Five,
    Three,
}

/// The composition algorithm to run for a structural variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionKind {
    Deletion,
    TandemDuplication,
    Inversion,
    Translocation(Direction, Direction),
}

impl fmt::Display for FusionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FusionKind::Deletion => write!(f, "deletion"),
            FusionKind::TandemDuplication => write!(f, "tandem duplication"),
            FusionKind::Inversion => write!(f, "inversion"),
            FusionKind::Translocation(p5, p3) => write!(f, "translocation ({p5:?}, {p3:?})"),
        }
    }
}

/// A genomic position, e.g. the mate of a breakend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locus {
    pub chromosome: String,
    pub position: i64,
}

impl Locus {
    pub fn new(chromosome: &str, position: i64) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chromosome, self.position)
    }
}

/// The result of a fusion composition: the exons contributed by the 5' gene and by the
/// 3' gene, laid out on one linear coordinate axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionLayout {
    pub prime5: IntervalSet,
    pub prime3: IntervalSet,
}

/// `FusionContext` owns the two gene models of one fusion hypothesis together with the
/// chromosome of the SV call that produced it.
#[derive(Debug, Clone)]
pub struct FusionContext {
    pub prime5: GeneTranscript,
    pub prime3: GeneTranscript,
    pub chromosome: String,
}

impl FusionContext {
    /// Pair `prime5` and `prime3`. Breakpoints the transcripts might carry are cleared,
    /// they have to be assigned for this SV call.
    pub fn new(mut prime5: GeneTranscript, mut prime3: GeneTranscript, chromosome: &str) -> Self {
        prime5.breakpoint = None;
        prime3.breakpoint = None;
        Self {
            prime5,
            prime3,
            chromosome: chromosome.into(),
        }
    }

    /// Pair `prime5` and `prime3` and assign the start and end coordinates of the SV call.
    /// Since it is not known which gene contains which end of the variant, both are tried
    /// against both genes. Nothing is assigned unless both coordinates are positive.
    pub fn with_breakpoints(
        prime5: GeneTranscript,
        prime3: GeneTranscript,
        start: Option<i64>,
        end: Option<i64>,
        chromosome: &str,
    ) -> Result<Self> {
        let mut ctx = Self::new(prime5, prime3, chromosome);
        if let (Some(start), Some(end)) = (start, end) {
            if start > 0 && end > 0 {
                ctx.assign_breakpoint(start, chromosome)?;
                ctx.assign_breakpoint(end, chromosome)?;
            }
        }
        Ok(ctx)
    }

    /// Assign `bp` to the first gene (5' before 3') whose span contains it. If no span
    /// contains it, assign it to every gene on `chrom` that has no breakpoint yet and ends
    /// closer than [`RESCUE_DISTANCE`] to `bp`.
    pub fn assign_breakpoint(&mut self, bp: i64, chrom: &str) -> Result<()> {
        for gene in [&mut self.prime5, &mut self.prime3] {
            if gene.span()?.contains_point(bp) {
                debug!("Breakpoint {bp} assigned to {}", gene.gene_name);
                gene.breakpoint = Some(bp);
                return Ok(());
            }
            trace!("Breakpoint {bp} is outside gene {}", gene.gene_name);
        }

        // intergenic breakpoint: fall back to nearby genes
        for gene in [&mut self.prime5, &mut self.prime3] {
            if gene.breakpoint.is_some() || gene.chromosome != chrom {
                continue;
            }
            let span = gene.span()?;
            if (span.begin - bp).abs() < RESCUE_DISTANCE || (span.end - bp).abs() < RESCUE_DISTANCE
            {
                debug!("Breakpoint {bp} assigned to nearby gene {}", gene.gene_name);
                gene.breakpoint = Some(bp);
            }
        }
        Ok(())
    }

    /// Assign a breakend position to every gene on the same chromosome whose span
    /// contains it.
    pub fn assign_breakpoint_to_genes(&mut self, locus: &Locus) -> Result<()> {
        for gene in [&mut self.prime5, &mut self.prime3] {
            if gene.chromosome != locus.chromosome {
                continue;
            }
            if gene.span()?.contains_point(locus.position) {
                debug!("Breakend {locus} assigned to {}", gene.gene_name);
                gene.breakpoint = Some(locus.position);
            }
        }
        Ok(())
    }

    /// Check that both genes carry a breakpoint.
    pub fn breakpoints_assigned(&self) -> Result<()> {
        self.prime5.breakpoint()?;
        self.prime3.breakpoint()?;
        Ok(())
    }

    pub fn log_properties(&self) {
        debug!("5' gene: {}", self.prime5);
        debug!("3' gene: {}", self.prime3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FusionError,
        intervals::Interval,
        transcript::Strand,
    };

    fn gene(name: &str, chrom: &str, pairs: &[(i64, i64)]) -> GeneTranscript {
        GeneTranscript::from_annotation(
            chrom,
            Strand::Forward,
            name,
            pairs.iter().copied().map(Interval::from),
        )
    }

    fn context() -> FusionContext {
        FusionContext::new(
            gene("FIVE", "chr1", &[(0, 100), (200, 300)]),
            gene("THREE", "chr1", &[(800, 900), (1000, 1100)]),
            "chr1",
        )
    }

    #[test]
    fn breakpoint_inside_first_span() {
        let mut ctx = context();
        ctx.assign_breakpoint(250, "chr1").unwrap();
        assert_eq!(Some(250), ctx.prime5.breakpoint);
        assert_eq!(None, ctx.prime3.breakpoint);
    }

    #[test]
    fn breakpoint_in_intron_of_second_span() {
        let mut ctx = context();
        ctx.assign_breakpoint(950, "chr1").unwrap();
        assert_eq!(None, ctx.prime5.breakpoint);
        assert_eq!(Some(950), ctx.prime3.breakpoint);
    }

    #[test]
    fn first_match_wins_for_overlapping_spans() {
        let mut ctx = FusionContext::new(
            gene("FIVE", "chr1", &[(0, 500)]),
            gene("THREE", "chr1", &[(400, 900)]),
            "chr1",
        );
        ctx.assign_breakpoint(450, "chr1").unwrap();
        assert_eq!(Some(450), ctx.prime5.breakpoint);
        assert_eq!(None, ctx.prime3.breakpoint);
    }

    #[test]
    fn intergenic_breakpoint_rescued_by_both_genes() {
        let mut ctx = context();
        ctx.assign_breakpoint(750, "chr1").unwrap();
        assert_eq!(Some(750), ctx.prime5.breakpoint);
        assert_eq!(Some(750), ctx.prime3.breakpoint);
    }

    #[test]
    fn rescue_keeps_existing_breakpoints() {
        let mut ctx = context();
        ctx.assign_breakpoint(50, "chr1").unwrap();
        ctx.assign_breakpoint(750, "chr1").unwrap();
        assert_eq!(Some(50), ctx.prime5.breakpoint);
        assert_eq!(Some(750), ctx.prime3.breakpoint);
    }

    #[test]
    fn rescue_needs_same_chromosome_and_distance() {
        let mut ctx = context();
        ctx.assign_breakpoint(750, "chr2").unwrap();
        assert_eq!(None, ctx.prime5.breakpoint);
        assert_eq!(None, ctx.prime3.breakpoint);

        let mut ctx = context();
        ctx.assign_breakpoint(1100 + RESCUE_DISTANCE, "chr1").unwrap();
        assert_eq!(None, ctx.prime3.breakpoint);
        ctx.assign_breakpoint(1100 + RESCUE_DISTANCE - 1, "chr1").unwrap();
        assert_eq!(Some(1100 + RESCUE_DISTANCE - 1), ctx.prime3.breakpoint);
        assert_eq!(None, ctx.prime5.breakpoint);
    }

    #[test]
    fn start_end_pair_assigned_to_both_genes() {
        let ctx = FusionContext::with_breakpoints(
            gene("FIVE", "chr1", &[(0, 100), (200, 300)]),
            gene("THREE", "chr1", &[(800, 900), (1000, 1100)]),
            Some(250),
            Some(1050),
            "chr1",
        )
        .unwrap();
        assert_eq!(Some(250), ctx.prime5.breakpoint);
        assert_eq!(Some(1050), ctx.prime3.breakpoint);
        assert!(ctx.breakpoints_assigned().is_ok());
    }

    #[test]
    fn non_positive_coordinates_are_ignored() {
        let ctx = FusionContext::with_breakpoints(
            gene("FIVE", "chr1", &[(0, 100)]),
            gene("THREE", "chr1", &[(800, 900)]),
            Some(0),
            Some(850),
            "chr1",
        )
        .unwrap();
        assert_eq!(
            Err(FusionError::BreakpointUnassigned { gene: "FIVE".into() }),
            ctx.breakpoints_assigned()
        );
        assert_eq!(None, ctx.prime3.breakpoint);
    }

    #[test]
    fn new_clears_breakpoints() {
        let mut five = gene("FIVE", "chr1", &[(0, 100)]);
        five.breakpoint = Some(10);
        let ctx = FusionContext::new(five, gene("THREE", "chr1", &[(800, 900)]), "chr1");
        assert_eq!(None, ctx.prime5.breakpoint);
    }

    #[test]
    fn breakend_assignment_checks_chromosome() {
        let mut ctx = FusionContext::new(
            gene("ALK", "chr2", &[(1000, 2000)]),
            gene("EML4", "chr17", &[(1500, 3000)]),
            "chr2",
        );
        ctx.assign_breakpoint_to_genes(&Locus::new("chr17", 1600)).unwrap();
        assert_eq!(None, ctx.prime5.breakpoint);
        assert_eq!(Some(1600), ctx.prime3.breakpoint);

        ctx.assign_breakpoint_to_genes(&Locus::new("chr2", 1700)).unwrap();
        assert_eq!(Some(1700), ctx.prime5.breakpoint);
        assert_eq!(Some(1600), ctx.prime3.breakpoint);

        ctx.assign_breakpoint_to_genes(&Locus::new("chr2", 5000)).unwrap();
        assert_eq!(Some(1700), ctx.prime5.breakpoint);
    }
}
