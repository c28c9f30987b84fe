use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use log::debug;
use serde::Deserialize;

use crate::{
    intervals::Interval,
    io::TranscriptSource,
    transcript::{GeneTranscript, Strand},
};

/// Exon as returned by the Ensembl REST `lookup/id` endpoint. Coordinates are 1-based
/// and inclusive, they are used as they are.
#[derive(Debug, Deserialize)]
struct EnsemblExon {
    start: i64,
    end: i64,
}

#[derive(Debug, Deserialize)]
struct EnsemblTranscript {
    #[serde(default)]
    is_canonical: i64,
    #[serde(rename = "Exon", default)]
    exons: Vec<EnsemblExon>,
}

/// A gene looked up with `expand=1` lists its transcripts, a transcript lists its exons.
#[derive(Debug, Deserialize)]
struct EnsemblLookup {
    id: String,
    display_name: Option<String>,
    seq_region_name: String,
    strand: i64,
    #[serde(rename = "Transcript")]
    transcripts: Option<Vec<EnsemblTranscript>>,
    #[serde(rename = "Exon", default)]
    exons: Vec<EnsemblExon>,
}

impl EnsemblLookup {
    /// Exons of the canonical transcript(s) for a gene, or the object's own exons.
    fn exons(&self) -> impl Iterator<Item = Interval> + '_ {
        let exons: Box<dyn Iterator<Item = &EnsemblExon> + '_> = match &self.transcripts {
            Some(transcripts) => Box::new(
                transcripts
                    .iter()
                    .filter(|tr| tr.is_canonical == 1)
                    .flat_map(|tr| tr.exons.iter()),
            ),
            None => Box::new(self.exons.iter()),
        };
        exons
            .filter(|ex| ex.start < ex.end)
            .map(|ex| Interval::new(ex.start, ex.end))
    }

    fn into_transcript(self) -> Result<GeneTranscript> {
        let strand = Strand::try_from(self.strand)
            .with_context(|| format!("Invalid strand for {}", self.id))?;
        let chromosome = format!("chr{}", self.seq_region_name);
        let name = self.display_name.as_deref().unwrap_or(&self.id);

        let transcript = GeneTranscript::from_annotation(&chromosome, strand, name, self.exons());
        if transcript.exons.is_empty() {
            bail!("No exons found for {}", self.id);
        }
        Ok(transcript)
    }
}

/// Read an Ensembl `lookup/id` JSON document from `path`.
pub fn read_lookup<P: AsRef<Path>>(path: P) -> Result<GeneTranscript> {
    let file = File::open(&path)
        .with_context(|| format!("Could not read json {}", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let lookup: EnsemblLookup = serde_json::from_reader(reader)
        .with_context(|| format!("Could not deserialize json {}", path.as_ref().display()))?;

    lookup.into_transcript()
}

/// Directory of cached Ensembl lookups, one `<ID>.json` file per gene or transcript.
pub struct EnsemblJsonCache {
    pub dir: PathBuf,
}

impl EnsemblJsonCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl TranscriptSource for EnsemblJsonCache {
    fn fetch(&self, id: &str) -> Result<GeneTranscript> {
        let path = self.path_for(id);
        debug!("Reading {id} from {}", path.display());
        read_lookup(&path).with_context(|| format!("Could not fetch transcript {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::IntervalSet;

    fn parse(json: &str) -> Result<GeneTranscript> {
        let lookup: EnsemblLookup = serde_json::from_str(json)?;
        lookup.into_transcript()
    }

    #[test]
    fn gene_uses_canonical_transcript() {
        let tr = parse(
            r#"{
                "id": "ENSG00000157554", "display_name": "ERG", "seq_region_name": "21",
                "strand": -1, "object_type": "Gene",
                "Transcript": [
                    {"is_canonical": 0, "Exon": [{"start": 100, "end": 900}]},
                    {"is_canonical": 1, "Exon": [
                        {"start": 500, "end": 600},
                        {"start": 100, "end": 200},
                        {"start": 150, "end": 250}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!("ERG", tr.gene_name);
        assert_eq!("chr21", tr.chromosome);
        assert_eq!(Strand::Reverse, tr.strand);
        assert_eq!(None, tr.breakpoint);
        let expected: IntervalSet =
            [(100, 250), (500, 600)].into_iter().map(Interval::from).collect();
        assert_eq!(expected, tr.exons);
    }

    #[test]
    fn transcript_uses_own_exons() {
        let tr = parse(
            r#"{
                "id": "ENST00000389048", "seq_region_name": "2", "strand": 1,
                "Exon": [{"start": 10, "end": 20}, {"start": 30, "end": 40}]
            }"#,
        )
        .unwrap();

        assert_eq!("ENST00000389048", tr.gene_name);
        assert_eq!(Strand::Forward, tr.strand);
        assert_eq!(2, tr.exons.len());
    }

    #[test]
    fn gene_without_canonical_transcript() {
        let res = parse(
            r#"{
                "id": "ENSG00000000001", "display_name": "NONE", "seq_region_name": "1",
                "strand": 1, "Transcript": [{"is_canonical": 0, "Exon": [{"start": 1, "end": 5}]}]
            }"#,
        );
        let err = res.unwrap_err();
        assert_eq!("No exons found for ENSG00000000001", err.to_string());
    }

    #[test]
    fn transcript_without_exons() {
        let res = parse(
            r#"{"id": "ENST00000000001", "seq_region_name": "X", "strand": -1, "Exon": []}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn invalid_strand() {
        let res = parse(
            r#"{"id": "X", "seq_region_name": "1", "strand": 2, "Exon": [{"start": 1, "end": 5}]}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn missing_cache_file() {
        let cache = EnsemblJsonCache::new("/nonexistent/vcffuse");
        assert!(cache.fetch("ENSG00000000001").is_err());
        assert_eq!(
            PathBuf::from("/nonexistent/vcffuse/ENSG00000000001.json"),
            cache.path_for("ENSG00000000001")
        );
    }
}
