//! # Root for utility functions in `vcffuse`
//!
//! This top-level module contains miscellaneous utility functions,
//! the sub-modules contain functions related to specific functionality.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod vcf;

/// Path of the picture for the `count`-th fusion. Pictures are written next to `svg`,
/// their file name is prefixed with the count and both gene names.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
///
/// let path = vcffuse::utils::fusion_picture_path(0, "TMPRSS2", "ERG", "out/sample.svg").unwrap();
/// assert_eq!(PathBuf::from("out/0_TMPRSS2_ERG-sample.svg"), path);
/// ```
pub fn fusion_picture_path<P: AsRef<Path>>(
    count: usize,
    prime5_name: &str,
    prime3_name: &str,
    svg: P,
) -> Result<PathBuf> {
    let svg = svg.as_ref();
    let file_name = svg
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Could not get a file name from {}", svg.display()))?;
    let picture = format!("{count}_{prime5_name}_{prime3_name}-{file_name}");

    Ok(svg.with_file_name(picture))
}
