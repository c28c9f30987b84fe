//! # Structs to represent gene transcripts
//!
//! [`GeneTranscript`] is the gene model the fusion engine works on: the exons of one
//! (canonical) transcript together with the chromosome and strand of its gene, and the
//! breakpoint of the structural variant once it has been assigned to this gene.
use std::fmt;

use crate::{
    error::{FusionError, Result},
    intervals::{Interval, IntervalSet},
};

/// Direction of transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    pub fn sign(&self) -> i64 {
        match self {
            Strand::Forward => 1,
            Strand::Reverse => -1,
            Strand::Unknown => 0,
        }
    }
    pub fn is_forward(&self) -> bool {
        matches!(self, Strand::Forward)
    }
}

impl TryFrom<i64> for Strand {
    type Error = FusionError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Strand::Forward),
            -1 => Ok(Strand::Reverse),
            0 => Ok(Strand::Unknown),
            other => Err(FusionError::InvalidStrand(other)),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unknown => ".",
        };
        write!(f, "{symbol}")
    }
}

/// `GeneTranscript` holds the exons of one transcript of `gene_name` on `chromosome`.
/// `breakpoint` stays `None` until a breakpoint of the structural variant is assigned
/// to this gene, see [`crate::fusion::FusionContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneTranscript {
    pub chromosome: String,
    pub strand: Strand,
    pub breakpoint: Option<i64>,
    pub gene_name: String,
    pub exons: IntervalSet,
}

impl GeneTranscript {
    pub fn new(
        chromosome: &str,
        strand: Strand,
        breakpoint: Option<i64>,
        gene_name: &str,
        exons: IntervalSet,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            strand,
            breakpoint,
            gene_name: gene_name.into(),
            exons,
        }
    }

    /// Build a transcript from exon coordinates as delivered by a gene annotation.
    /// Overlapping exons are merged so the exon set is a minimal cover of the transcript.
    pub fn from_annotation<I>(chromosome: &str, strand: Strand, gene_name: &str, exons: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut exons: IntervalSet = exons.into_iter().collect();
        exons.merge_overlaps();
        Self::new(chromosome, strand, None, gene_name, exons)
    }

    pub fn from_tuple(fields: (String, Strand, Option<i64>, String, IntervalSet)) -> Self {
        let (chromosome, strand, breakpoint, gene_name, exons) = fields;
        Self {
            chromosome,
            strand,
            breakpoint,
            gene_name,
            exons,
        }
    }

    pub fn copy_without_exons(&self) -> Self {
        Self {
            chromosome: self.chromosome.clone(),
            strand: self.strand,
            breakpoint: self.breakpoint,
            gene_name: self.gene_name.clone(),
            exons: IntervalSet::new(),
        }
    }

    /// Placeholder used before any gene model has been loaded.
    pub fn empty() -> Self {
        Self {
            chromosome: String::new(),
            strand: Strand::Unknown,
            breakpoint: None,
            gene_name: String::new(),
            exons: IntervalSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exons.is_empty() && self.chromosome.is_empty() && self.gene_name.is_empty()
    }

    /// Same transcript, exon set replaced by `exons`.
    pub fn with_exons(self, exons: IntervalSet) -> Self {
        Self { exons, ..self }
    }

    pub fn begin(&self) -> Result<i64> {
        self.exons.begin()
    }
    pub fn end(&self) -> Result<i64> {
        self.exons.end()
    }
    pub fn span(&self) -> Result<Interval> {
        self.exons.span()
    }

    /// The assigned breakpoint, or [`FusionError::BreakpointUnassigned`].
    pub fn breakpoint(&self) -> Result<i64> {
        self.breakpoint
            .ok_or_else(|| FusionError::BreakpointUnassigned {
                gene: self.gene_name.clone(),
            })
    }

    /// Locus string of the whole transcript, e.g. `chr1:100-2000`.
    pub fn get_fetch_definition_s(&self) -> String {
        match self.span() {
            Ok(span) => format!("{}:{}-{}", self.chromosome, span.begin, span.end),
            Err(_) => format!("{}:-", self.chromosome),
        }
    }

    /// Exons as BED3 lines, used for debug logging.
    pub fn bed_lines(&self) -> Vec<String> {
        self.exons
            .iter()
            .map(|iv| format!("{}\t{}\t{}", self.chromosome, iv.begin, iv.end))
            .collect()
    }
}

impl fmt::Display for GeneTranscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let breakpoint = match self.breakpoint {
            Some(bp) => bp.to_string(),
            None => "unassigned".into(),
        };
        write!(
            f,
            "{} ({}) strand {} breakpoint {}",
            self.gene_name,
            self.get_fetch_definition_s(),
            self.strand,
            breakpoint
        )
    }
}
