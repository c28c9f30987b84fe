//! # Orientation utilities
//!
//! Reflection, rebasing and rotation of exon sets. These are applied to truncated
//! transcript parts so that a fused transcript can be drawn left to right starting at 0.
use crate::{
    error::Result,
    fusion::FusionLayout,
    intervals::{Interval, IntervalSet},
    transcript::GeneTranscript,
};

/// Mirror the exons of `transcript` within the transcript's own span:
/// ```text
/// |###|----|####|--|#|
/// |#|--|####|----|###|
/// ```
/// Applying it twice gives back the original exons.
pub fn turn_backwards(transcript: GeneTranscript) -> Result<GeneTranscript> {
    let span = transcript.span()?;
    let reflected: IntervalSet = transcript
        .exons
        .iter()
        .map(|iv| {
            Interval::new(
                span.end + span.begin - iv.end,
                span.end - (iv.begin - span.begin),
            )
        })
        .collect();
    Ok(transcript.with_exons(reflected))
}

/// Move `exons` so that its smallest coordinate becomes `new_base`.
pub fn rebase(exons: &IntervalSet, new_base: i64) -> Result<IntervalSet> {
    let shift = exons.begin()? - new_base;
    Ok(exons.translate(-shift))
}

/// The exons of `transcript`, moved so that the smallest coordinate becomes `new_base`.
pub fn shift_left_to(new_base: i64, transcript: &GeneTranscript) -> Result<IntervalSet> {
    rebase(&transcript.exons, new_base)
}

/// Rotate a composed, 0-based fusion by 180 degrees. The layout is expected to have its 3'
/// part on the left, so the picture runs from the start of the 3' part to the end of the 5'
/// part. Both parts keep their identity.
pub fn reverse_fusion(layout: FusionLayout) -> Result<FusionLayout> {
    let start = layout.prime3.begin()?;
    let end = layout.prime5.end()?;
    let rotate = |exons: &IntervalSet| -> IntervalSet {
        exons
            .iter()
            .map(|iv| Interval::new(end - (iv.end - start), end - (iv.begin - start)))
            .collect()
    };

    Ok(FusionLayout {
        prime5: rotate(&layout.prime5),
        prime3: rotate(&layout.prime3),
    })
}
