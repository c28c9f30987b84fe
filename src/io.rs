//! # Reading SV calls and gene models, writing pictures and layouts
use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::transcript::GeneTranscript;

pub mod bed;
pub mod json;
pub mod svg;
pub mod vcf;

/// Anything that can look up the exon model of a gene or transcript by its Ensembl ID.
pub trait TranscriptSource {
    fn fetch(&self, id: &str) -> Result<GeneTranscript>;
}

impl TranscriptSource for HashMap<String, GeneTranscript> {
    fn fetch(&self, id: &str) -> Result<GeneTranscript> {
        self.get(id)
            .cloned()
            .with_context(|| format!("No transcript with ID {id}"))
    }
}
