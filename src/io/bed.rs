use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use log::info;
use serde::Serialize;

use crate::plan::ComposedFusion;

/// One exon of a fused transcript, in fusion coordinates.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct LayoutRecord<'a> {
    pub label: &'a str,
    pub begin: i64,
    pub end: i64,
    pub part: &'a str,
    pub gene: &'a str,
}

impl<'a> LayoutRecord<'a> {
    /// All exons of `fusion`, 5' part first.
    pub fn from_fusion(fusion: &'a ComposedFusion) -> Vec<Self> {
        let prime5 = fusion.layout.prime5.iter().map(|iv| LayoutRecord {
            label: &fusion.label,
            begin: iv.begin,
            end: iv.end,
            part: "5p",
            gene: &fusion.prime5_name,
        });
        let prime3 = fusion.layout.prime3.iter().map(|iv| LayoutRecord {
            label: &fusion.label,
            begin: iv.begin,
            end: iv.end,
            part: "3p",
            gene: &fusion.prime3_name,
        });
        prime5.chain(prime3).collect()
    }
}

/// Write the layouts of `fusions` to the tab separated file at `path`.
pub fn write_layouts<P: AsRef<Path>>(path: P, fusions: &[ComposedFusion]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("Could not create bed file {}", path.display()))?;

    let mut n = 0;
    for fusion in fusions {
        for record in LayoutRecord::from_fusion(fusion) {
            writer
                .serialize(&record)
                .with_context(|| format!("Failed to write bed record to {}", path.display()))?;
            n += 1;
        }
    }
    writer.flush()?;

    info!("Wrote {n} exons of {} fusions to {}", fusions.len(), path.display());
    Ok(())
}
