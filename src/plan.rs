//! # Turning SV calls into fusion hypotheses
//!
//! Each supported call is turned into one or more [`FusionJob`]s: which gene is 5' and
//! which is 3', where their breakpoints are, and which composition to run. Planning reads
//! gene models and pairs breakend mates, so it runs sequentially in VCF order; the jobs
//! themselves are independent and can be composed in parallel.
use std::collections::HashSet;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::{
    error,
    fusion::{Direction, FusionContext, FusionKind, FusionLayout, Locus},
    io::TranscriptSource,
    sv::{BreakendCache, BreakendJoin, SvCall, SvType},
    transcript::{GeneTranscript, Strand},
    utils::vcf::{parse_mate_locus, transcript_ids_from_hgvs},
};

/// One fusion hypothesis, ready to be composed.
#[derive(Debug, Clone)]
pub struct FusionJob {
    /// ID of the VCF record the hypothesis comes from.
    pub label: String,
    pub kind: FusionKind,
    pub context: FusionContext,
}

impl FusionJob {
    pub fn new(label: &str, kind: FusionKind, context: FusionContext) -> Self {
        Self {
            label: label.into(),
            kind,
            context,
        }
    }
    pub fn prime5_name(&self) -> &str {
        &self.context.prime5.gene_name
    }
    pub fn prime3_name(&self) -> &str {
        &self.context.prime3.gene_name
    }

    pub fn compose(self) -> error::Result<ComposedFusion> {
        self.context.log_properties();
        let prime5_name = self.context.prime5.gene_name.clone();
        let prime3_name = self.context.prime3.gene_name.clone();
        let layout = self.context.fuse(self.kind)?;

        Ok(ComposedFusion {
            label: self.label,
            prime5_name,
            prime3_name,
            kind: self.kind,
            layout,
        })
    }
}

/// A composed fusion, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedFusion {
    pub label: String,
    pub prime5_name: String,
    pub prime3_name: String,
    pub kind: FusionKind,
    pub layout: FusionLayout,
}

/// Plan fusion jobs for all `calls`, in order. Calls that cannot be planned, e.g.
/// because a gene model is missing, are logged and skipped.
pub fn plan_fusions<S: TranscriptSource>(
    calls: &[SvCall],
    source: &S,
    cache: &mut BreakendCache,
) -> Vec<FusionJob> {
    let mut jobs = Vec::new();
    for call in calls {
        match plan_call(call, source, cache) {
            Ok(mut planned) => jobs.append(&mut planned),
            Err(e) => warn!(
                "Skipping {} ({}) at {}: {e:#}",
                call.id,
                call.sv_type.name(),
                call.get_fetch_definition_s()
            ),
        }
    }
    if !cache.is_empty() {
        debug!("{} breakends without a mate", cache.len());
    }
    jobs
}

/// Plan the fusion jobs for a single call. Breakends only produce a job once their mate
/// has been offered to `cache`.
pub fn plan_call<S: TranscriptSource>(
    call: &SvCall,
    source: &S,
    cache: &mut BreakendCache,
) -> Result<Vec<FusionJob>> {
    match call.sv_type {
        SvType::Deletion => plan_gene_pairs(call, source, |a, b| {
            let (prime5, prime3) = order_for_deletion(a, b)?;
            Ok(vec![collinear_job(call, prime5, prime3, FusionKind::Deletion)?])
        }),
        SvType::TandemDuplication => plan_gene_pairs(call, source, |a, b| {
            let (prime5, prime3) = order_for_tandem_duplication(a, b)?;
            Ok(vec![collinear_job(
                call,
                prime5,
                prime3,
                FusionKind::TandemDuplication,
            )?])
        }),
        // which gene is 5' can't be told from an inversion, draw both
        SvType::Inversion => plan_gene_pairs(call, source, |a, b| {
            Ok(vec![
                collinear_job(call, a.clone(), b.clone(), FusionKind::Inversion)?,
                collinear_job(call, b, a, FusionKind::Inversion)?,
            ])
        }),
        SvType::Breakend => match cache.offer(call) {
            Some(mate) => {
                debug!("Breakend {} pairs with {}", call.id, mate.id);
                Ok(vec![plan_breakend(call, source)?])
            }
            None => {
                debug!("Breakend {} is waiting for its mate", call.id);
                Ok(Vec::new())
            }
        },
    }
}

/// Fetch both genes of every distinct gene pair annotated on `call` and hand them to
/// `plan_pair`. `A&B` and `B&A` are the same pair.
fn plan_gene_pairs<S, F>(call: &SvCall, source: &S, mut plan_pair: F) -> Result<Vec<FusionJob>>
where
    S: TranscriptSource,
    F: FnMut(GeneTranscript, GeneTranscript) -> Result<Vec<FusionJob>>,
{
    let mut seen = HashSet::new();
    let mut jobs = Vec::new();
    for (a_id, b_id) in call.fusion_annotations().filter_map(|ann| ann.gene_pair()) {
        let key = if a_id <= b_id { (a_id, b_id) } else { (b_id, a_id) };
        if !seen.insert(key) {
            continue;
        }
        let a = source.fetch(a_id)?;
        let b = source.fetch(b_id)?;
        jobs.append(&mut plan_pair(a, b)?);
    }
    if seen.is_empty() {
        debug!("No gene pair annotated for {}", call.id);
    }
    Ok(jobs)
}

fn collinear_job(
    call: &SvCall,
    prime5: GeneTranscript,
    prime3: GeneTranscript,
    kind: FusionKind,
) -> Result<FusionJob> {
    let context = FusionContext::with_breakpoints(
        prime5,
        prime3,
        Some(call.position),
        call.end,
        &call.chromosome,
    )?;
    Ok(FusionJob::new(&call.id, kind, context))
}

/// A deletion joins the upstream gene to the downstream one: for a forward pair the gene
/// with the lower start is 5', otherwise the one with the higher start.
pub fn order_for_deletion(
    a: GeneTranscript,
    b: GeneTranscript,
) -> error::Result<(GeneTranscript, GeneTranscript)> {
    let a_first = a.begin()? < b.begin()?;
    if both_forward(&a, &b) == a_first {
        Ok((a, b))
    } else {
        Ok((b, a))
    }
}

/// A tandem duplication joins the downstream gene to the upstream one: for a forward pair
/// the gene with the higher start is 5', otherwise the one with the lower start.
pub fn order_for_tandem_duplication(
    a: GeneTranscript,
    b: GeneTranscript,
) -> error::Result<(GeneTranscript, GeneTranscript)> {
    let a_first = a.begin()? < b.begin()?;
    if both_forward(&a, &b) == a_first {
        Ok((b, a))
    } else {
        Ok((a, b))
    }
}

fn both_forward(a: &GeneTranscript, b: &GeneTranscript) -> bool {
    a.strand.is_forward() && b.strand.is_forward()
}

/// Pick 5' and 3' gene and the parts to join for a breakend pair.
/// ```text
/// -->  -->   (Left, Right)
/// <--  <--   (Right, Left)
/// -->  <--   B]mate]: forward gene is 5', (Left, Left)
/// <--  -->   [mate[B: (Right, Right), not supported
/// ```
pub fn breakend_orientation(
    a: GeneTranscript,
    b: GeneTranscript,
    alt: &str,
) -> (GeneTranscript, GeneTranscript, FusionKind) {
    use Direction::{Left, Right};

    match (a.strand, b.strand) {
        (Strand::Forward, Strand::Forward) => (a, b, FusionKind::Translocation(Left, Right)),
        (Strand::Reverse, Strand::Reverse) => (a, b, FusionKind::Translocation(Right, Left)),
        _ => match BreakendJoin::from_alt(alt) {
            Some(BreakendJoin::MateLeft) if a.strand.is_forward() => {
                (a, b, FusionKind::Translocation(Left, Left))
            }
            Some(BreakendJoin::MateLeft) => (b, a, FusionKind::Translocation(Left, Left)),
            _ => (a, b, FusionKind::Translocation(Right, Right)),
        },
    }
}

/// Plan the fusion of a breakend pair from the second record of the pair. The partners
/// are the two transcripts named in the `HGVS.p` field of the annotation, the breakpoints
/// are the record position and the mate position from the ALT allele.
fn plan_breakend<S: TranscriptSource>(call: &SvCall, source: &S) -> Result<FusionJob> {
    let (a_id, b_id) = call
        .fusion_annotations()
        .find_map(|ann| ann.hgvs_p.as_deref().and_then(transcript_ids_from_hgvs))
        .with_context(|| format!("No transcript pair annotated for breakend {}", call.id))?;
    let a = source.fetch(&a_id)?;
    let b = source.fetch(&b_id)?;

    let (prime5, prime3, kind) = breakend_orientation(a, b, &call.alt);
    let mate = parse_mate_locus(&call.alt)?;

    let mut context = FusionContext::new(prime5, prime3, &call.chromosome);
    context.assign_breakpoint_to_genes(&Locus::new(&call.chromosome, call.position))?;
    context.assign_breakpoint_to_genes(&mate)?;

    Ok(FusionJob::new(&call.id, kind, context))
}
