//! # Command line interface for `vcffuse`
use anyhow::{bail, Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "vcffuse",
    author,
    version,
    about = "Draw gene fusions from annotated structural variant calls",
    long_about = None
)]
pub struct Cli {
    /// Structural variants called by Manta and annotated by snpEff. Expected format is VCF/BCF
    #[arg(short, long)]
    pub vcf: String,

    /// Output SVG file name. Every fusion is drawn to `<n>_<5' gene>_<3' gene>-<name>` next to it
    #[arg(short, long)]
    pub svg: String,

    /// Directory with Ensembl `lookup/id` JSON files, one `<ID>.json` per gene or transcript
    #[arg(short, long, default_value = ".")]
    pub annotations: String,

    /// Also write the fused exon layouts to this file.
    /// Format is tab separated: label, begin, end, part, gene
    #[arg(long)]
    pub bed: Option<String>,

    /// Number of threads to use
    #[arg(long, default_value_t = 1, value_parser = threads_in_range)]
    pub threads: usize,
}

fn threads_in_range(s: &str) -> Result<usize> {
    let threads = s
        .parse()
        .context("Could not parse value passed to --threads to integer")?;
    if threads < 1 {
        bail!("--threads must be at least 1");
    }
    Ok(threads)
}
