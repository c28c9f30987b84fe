//! # vcffuse
//!
//! This library serves as the backbone for the `vcffuse` binary, which draws the
//! transcripts produced by gene fusions found in structural variant calls.
//! Manta SV calls annotated by snpEff are read from VCF, the fused genes are looked up in
//! a cache of Ensembl gene models, and each fusion is composed into a linear exon layout
//! of its 5' and 3' parts that is rendered as SVG.
pub mod cli;
pub mod error;
pub mod fusion;
pub mod intervals;
pub mod io;
pub mod orientation;
pub mod plan;
pub mod sv;
pub mod transcript;
pub mod utils;

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, trace, warn};
use rayon::prelude::*;

use crate::{
    io::{svg, vcf, TranscriptSource},
    plan::{ComposedFusion, FusionJob},
    sv::BreakendCache,
};

/// Read the SV calls in `vcf_path`, plan a fusion job for every gene pair they fuse and
/// compose all jobs. Calls and jobs that fail are logged and skipped, the remaining
/// fusions are returned in VCF order.
pub fn run<P: AsRef<Path>, S: TranscriptSource>(
    vcf_path: P,
    source: &S,
) -> Result<Vec<ComposedFusion>> {
    let calls = vcf::read_sv_calls(vcf_path)?;

    let mut cache = BreakendCache::new();
    let jobs = plan::plan_fusions(&calls, source, &mut cache);
    info!("Planned {} fusions from {} SV calls", jobs.len(), calls.len());

    let fusions = compose_all(jobs);
    info!("Composed {} fusions", fusions.len());
    Ok(fusions)
}

/// Compose `jobs` on the global rayon thread pool. The order of `jobs` is kept.
/// If composing a job fails, we log the error and continue with the next one.
pub fn compose_all(jobs: Vec<FusionJob>) -> Vec<ComposedFusion> {
    jobs.into_par_iter()
        .filter_map(|job| {
            let tidx = rayon::current_thread_index().unwrap_or(0);
            trace!("Composing {} on thread {tidx}", job.label);

            let label = job.label.clone();
            match job.compose() {
                Ok(fusion) => Some(fusion),
                Err(e) => {
                    warn!("Could not compose fusion for {label}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Draw every fusion into its own SVG file next to `svg_path` and return the file paths.
pub fn write_pictures<P: AsRef<Path>>(
    fusions: &[ComposedFusion],
    svg_path: P,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(fusions.len());
    for (count, fusion) in fusions.iter().enumerate() {
        let path = utils::fusion_picture_path(
            count,
            &fusion.prime5_name,
            &fusion.prime3_name,
            &svg_path,
        )?;
        svg::write_svg(&path, &fusion.layout)?;
        info!("Fusion picture of {} ({}) is at {}", fusion.label, fusion.kind, path.display());
        written.push(path);
    }
    Ok(written)
}
