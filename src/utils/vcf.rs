use std::str;

use anyhow::{Context, Result};
use rust_htslib::bcf::Record;

use crate::{error::FusionError, fusion::Locus};

/// Value of integer INFO field `tag`. `None` if the field is absent or not defined in the
/// header.
pub fn get_info_int(record: &Record, tag: &str) -> Result<Option<i64>> {
    let res = record.info(tag.as_bytes()).integer();
    if let Ok(Some(res)) = res {
        Ok(res.first().map(|v| *v as i64))
    } else {
        Ok(None)
    }
}

/// First value of string INFO field `tag`.
pub fn get_info_str(record: &Record, tag: &str) -> Result<Option<String>> {
    Ok(get_info_strings(record, tag)?.into_iter().next())
}

/// All comma separated values of string INFO field `tag`, e.g. the entries of `ANN`.
pub fn get_info_strings(record: &Record, tag: &str) -> Result<Vec<String>> {
    let res = record.info(tag.as_bytes()).string();
    if let Ok(Some(res)) = res {
        res.iter()
            .map(|v| {
                str::from_utf8(v)
                    .map(String::from)
                    .with_context(|| format!("Error parsing VCF string field '{tag}'"))
            })
            .collect()
    } else {
        Ok(Vec::new())
    }
}

/// Parse the mate position out of a breakend ALT allele such as `G]chr17:198982]` or
/// `]13:123456]T`. A `CHR` prefix in any case is written as `chr`, the rest of the contig
/// name is kept as it is. ALT alleles starting with `[` are not supported.
///
/// # Examples
///
/// ```
/// use vcffuse::utils::vcf::parse_mate_locus;
///
/// let mate = parse_mate_locus("G]CHR17:198982]").unwrap();
/// assert_eq!("chr17", mate.chromosome);
/// assert_eq!(198982, mate.position);
/// assert_eq!("chrX", parse_mate_locus("G]CHRX:30250]").unwrap().chromosome);
///
/// assert!(parse_mate_locus("[chr17:198982[A").is_err());
/// ```
pub fn parse_mate_locus(alt: &str) -> std::result::Result<Locus, FusionError> {
    let malformed = || FusionError::MalformedMateLocus(alt.to_string());
    if alt.starts_with('[') {
        return Err(malformed());
    }

    let open = alt.find(|c| c == '[' || c == ']').ok_or_else(malformed)?;
    let bracket = &alt[open..open + 1];
    let rest = &alt[open + 1..];
    let close = rest.find(bracket).ok_or_else(malformed)?;

    let (chrom, pos) = rest[..close].rsplit_once(':').ok_or_else(malformed)?;
    if chrom.is_empty() {
        return Err(malformed());
    }
    let position = pos.parse::<i64>().map_err(|_| malformed())?;

    Ok(Locus::new(&normalize_contig(chrom), position))
}

/// Manta writes mate contigs as `CHR17`, `CHRX`. Gene models use `chr17`, `chrX`.
fn normalize_contig(chrom: &str) -> String {
    match chrom.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => format!("chr{}", &chrom[3..]),
        _ => chrom.to_string(),
    }
}

/// Pull the two transcript IDs out of the snpEff `HGVS.p` notation of a translocation,
/// e.g. `t(2%3B17)(ENST00000389048:Ala1058_Ter1621%3BENST00000318522:Met1_Glu749)`.
///
/// # Examples
///
/// ```
/// use vcffuse::utils::vcf::transcript_ids_from_hgvs;
///
/// let hgvs = "t(11%3B6)(ENST00000406246:Glu3_Ter552%3BENST00000343882:Met1)";
/// let ids = transcript_ids_from_hgvs(hgvs);
/// assert_eq!(Some(("ENST00000406246".to_string(), "ENST00000343882".to_string())), ids);
/// ```
pub fn transcript_ids_from_hgvs(hgvs: &str) -> Option<(String, String)> {
    let mut ids = hgvs
        .split(|c| c == '(' || c == ')' || c == ':' || c == ';')
        .flat_map(|token| token.split("%3B"))
        .filter(|token| token.starts_with("ENS"));

    let first = ids.next()?;
    let second = ids.next()?;
    Some((first.to_string(), second.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mate_locus_after_base() {
        let mate = parse_mate_locus("A[chr6:108561001[").unwrap();
        assert_eq!(Locus::new("chr6", 108561001), mate);
    }

    #[test]
    fn mate_locus_before_base() {
        let mate = parse_mate_locus("]CHR2:29256656]T").unwrap();
        assert_eq!(Locus::new("chr2", 29256656), mate);
    }

    #[test]
    fn mate_locus_on_sex_and_mitochondrial_chromosomes() {
        assert_eq!(Locus::new("chrX", 30250), parse_mate_locus("G]CHRX:30250]").unwrap());
        assert_eq!(Locus::new("chrY", 100), parse_mate_locus("]ChrY:100]T").unwrap());
        assert_eq!(Locus::new("chrM", 5), parse_mate_locus("A[chrM:5[").unwrap());
        assert_eq!(Locus::new("X", 7), parse_mate_locus("A[X:7[").unwrap());
    }

    #[test]
    fn mate_locus_errors() {
        for alt in ["[chr1:100[A", "<DEL>", "A]chr1100]", "A]chr1:abc]", "A]:100]", "A]chr1:100"] {
            assert_eq!(
                Err(FusionError::MalformedMateLocus(alt.to_string())),
                parse_mate_locus(alt),
                "{alt}"
            );
        }
    }

    #[test]
    fn hgvs_with_plain_semicolons() {
        let hgvs = "t(2;17)(ENST00000389048:Ala1058_Ter1621;ENST00000318522:Met1_Glu749)";
        let ids = transcript_ids_from_hgvs(hgvs);
        assert_eq!(
            Some(("ENST00000389048".to_string(), "ENST00000318522".to_string())),
            ids
        );
    }

    #[test]
    fn hgvs_without_two_transcripts() {
        assert_eq!(None, transcript_ids_from_hgvs("p.Met1?"));
        assert_eq!(None, transcript_ids_from_hgvs("t(2%3B17)(ENST00000389048:Ala1058_Ter1621)"));
    }
}
