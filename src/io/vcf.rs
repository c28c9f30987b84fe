use std::{path::Path, str};

use anyhow::{Context, Result};
use log::{debug, info};
use rust_htslib::bcf::{Read, Reader, Record};

use crate::{
    sv::{Annotation, SvCall, SvType},
    utils,
};

pub struct VariantCallFile<P: AsRef<Path>> {
    pub file_path: P,
}

impl<P: AsRef<Path>> VariantCallFile<P> {
    pub fn new(file_path: P) -> Self {
        Self { file_path }
    }

    /// Read the structural variants in the VCF file at `self.file_path` that pass all
    /// filters and carry at least one snpEff `gene_fusion` annotation.
    pub fn load_sv_calls(&self) -> Result<Vec<SvCall>> {
        let path = self.file_path.as_ref();
        let mut bcf = Reader::from_path(path)
            .with_context(|| format!("Failed to open VCF file at {}", path.display()))?;
        let header = bcf.header().to_owned();

        let mut calls = Vec::new();
        let mut n_records = 0;
        for record in bcf.records() {
            let record = record
                .with_context(|| format!("Error reading VCF record in file {}", path.display()))?;
            n_records += 1;
            if !record.has_filter("PASS".as_bytes()) {
                continue;
            }

            let annotations: Vec<Annotation> = utils::vcf::get_info_strings(&record, "ANN")?
                .iter()
                .map(|entry| Annotation::parse(entry))
                .filter(|ann| ann.is_gene_fusion())
                .collect();
            if annotations.is_empty() {
                continue;
            }

            let rid = record.rid().context("VCF record without a contig")?;
            let chromosome = str::from_utf8(header.rid2name(rid)?)
                .context("Could not parse contig name")?
                .to_string();
            if let Some(call) = sv_call_from_record(&record, chromosome, annotations)? {
                calls.push(call);
            }
        }

        info!(
            "Read {} fusion candidates from {n_records} records in {}",
            calls.len(),
            path.display()
        );
        Ok(calls)
    }
}

fn sv_call_from_record(
    record: &Record,
    chromosome: String,
    annotations: Vec<Annotation>,
) -> Result<Option<SvCall>> {
    let id = String::from_utf8(record.id()).context("Could not parse VCF record ID")?;
    let alt = match record.alleles().get(1) {
        Some(allele) => str::from_utf8(allele)
            .context("Could not parse ALT allele")?
            .to_string(),
        None => String::new(),
    };
    let svtype = utils::vcf::get_info_str(record, "SVTYPE")?;

    let Some(sv_type) = SvType::classify(svtype.as_deref(), &alt, &id) else {
        debug!("Skipping {id}: SV type {svtype:?} is not supported");
        return Ok(None);
    };

    Ok(Some(SvCall {
        id,
        chromosome,
        position: record.pos() + 1,
        end: utils::vcf::get_info_int(record, "END")?,
        alt,
        mate_id: utils::vcf::get_info_str(record, "MATEID")?,
        sv_type,
        annotations,
    }))
}

/// Read all fusion candidates from the VCF file at `path`.
pub fn read_sv_calls<P: AsRef<Path>>(path: P) -> Result<Vec<SvCall>> {
    VariantCallFile::new(path).load_sv_calls()
}
