//! # Errors raised by the fusion layout engine
//!
//! Everything in [`crate::intervals`], [`crate::transcript`], [`crate::orientation`] and
//! [`crate::fusion`] reports failures through [`FusionError`]. The I/O side of the crate wraps
//! these in `anyhow` errors with file and record context.
use crate::fusion::Direction;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FusionError {
    #[error("empty transcript: an exon set without intervals has no begin or end")]
    EmptyTranscript,

    #[error("breakpoint assignment failed: no breakpoint set for gene '{gene}'")]
    BreakpointUnassigned { gene: String },

    #[error("unsupported orientation: no fusion composition for 5' {prime5:?} / 3' {prime3:?}")]
    UnsupportedOrientation {
        prime5: Direction,
        prime3: Direction,
    },

    #[error("malformed mate locus '{0}'")]
    MalformedMateLocus(String),

    #[error("invalid strand {0}, expected -1, 0 or 1")]
    InvalidStrand(i64),
}

pub type Result<T> = std::result::Result<T, FusionError>;
