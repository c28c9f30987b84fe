//! # Truncating transcripts at their breakpoint
//!
//! The left part of a transcript is everything upstream (in genomic coordinates) of its
//! breakpoint, the right part everything at or after it. Both functions take the
//! transcript by value and hand back the truncated transcript.
use log::debug;

use crate::{
    error::Result,
    fusion::PrimeEnd,
    intervals::Interval,
    transcript::{GeneTranscript, Strand},
};

/// Keep the exons before the breakpoint.
/// ```text
/// |-->---!->-->-->--|
/// xxxxxxxx
/// ```
/// An intronic breakpoint gets a 1-base exon `[bp - 1, bp)` first, so the left part always
/// ends exactly at the breakpoint.
pub fn get_left_part(mut transcript: GeneTranscript) -> Result<GeneTranscript> {
    let bp = transcript.breakpoint()?;
    if transcript.exons.at(bp).is_empty() {
        debug!(
            "Intron breakpoint at {}:{} in {}",
            transcript.chromosome,
            bp - 1,
            transcript.gene_name
        );
        transcript.exons.add(Interval::new(bp - 1, bp));
    }
    let end = transcript.end()?;
    transcript.exons.chop(bp, end);

    Ok(transcript)
}

/// Keep the exons at and after the breakpoint.
/// ```text
/// |--<---!-<--<--<--|
///        xxxxxxxxxxxx
/// ```
/// A 1-base exon `[bp, bp + 1)` is always added, also when an exon already starts at the
/// breakpoint. Downstream code relies on this boundary marker, so it can sit on top of
/// the first exon of the part.
pub fn get_right_part(transcript: GeneTranscript) -> Result<GeneTranscript> {
    let bp = transcript.breakpoint()?;
    let mut exons = transcript.exons.overlap(bp, transcript.end()?);
    exons.add(Interval::new(bp, bp + 1));

    Ok(transcript.with_exons(exons))
}

/// The part of `transcript` that ends up in the fusion when the gene provides the `end`
/// of the fused transcript: the upstream part of a forward 5' gene or a reverse 3' gene,
/// the downstream part otherwise.
pub fn get_fused_part(transcript: GeneTranscript, end: PrimeEnd) -> Result<GeneTranscript> {
    match (end, transcript.strand) {
        (PrimeEnd::Five, Strand::Forward) => get_left_part(transcript),
        (PrimeEnd::Five, _) => get_right_part(transcript),
        (PrimeEnd::Three, Strand::Reverse) => get_right_part(transcript),
        (PrimeEnd::Three, _) => get_left_part(transcript),
    }
}
