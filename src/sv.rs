//! # Structural variant calls
//!
//! [`SvCall`] is the part of a VCF record that is needed to draw gene fusions: where the
//! variant sits, what kind of rearrangement it is, and the snpEff annotations naming the
//! genes it fuses. Breakend records come in pairs; [`BreakendCache`] holds the first record
//! of a pair until its mate shows up.
use std::collections::HashMap;

/// Rearrangement types that can produce a gene fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvType {
    Deletion,
    TandemDuplication,
    Inversion,
    Breakend,
}

impl SvType {
    /// Classify a record from its `SVTYPE` INFO value, ALT allele and ID, the way Manta
    /// writes them. Returns `None` for variant types that are not drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcffuse::sv::SvType;
    ///
    /// let dup = SvType::classify(Some("DUP"), "<DUP:TANDEM>", "MantaDUP:TANDEM:1:0:1:0:0:0");
    /// assert_eq!(Some(SvType::TandemDuplication), dup);
    /// let bnd = SvType::classify(Some("BND"), "G]CHR6:108561001]", "MantaBND:1:0:1:0:0:0:0");
    /// assert_eq!(Some(SvType::Breakend), bnd);
    /// assert_eq!(None, SvType::classify(Some("INS"), "<INS>", "MantaINS:1:0:1:0:0:0"));
    /// ```
    pub fn classify(svtype: Option<&str>, alt: &str, id: &str) -> Option<SvType> {
        let svtype = svtype.unwrap_or_default();
        if alt.contains("DUP:TANDEM") {
            Some(SvType::TandemDuplication)
        } else if svtype == "BND" || id.contains("MantaBND") {
            Some(SvType::Breakend)
        } else if svtype.contains("INV") || alt.contains("INV") {
            Some(SvType::Inversion)
        } else if svtype == "DEL" || id.contains("MantaDEL") {
            Some(SvType::Deletion)
        } else {
            None
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SvType::Deletion => "DEL",
            SvType::TandemDuplication => "DUP:TANDEM",
            SvType::Inversion => "INV",
            SvType::Breakend => "BND",
        }
    }
}

/// One entry of a snpEff `ANN` INFO field. Only the fields used to find fusion partners
/// are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub allele: String,
    pub effect: String,
    pub gene_ids: Vec<String>,
    pub hgvs_p: Option<String>,
}

impl Annotation {
    /// Parse a single `|`-separated annotation entry. Missing trailing fields are empty.
    pub fn parse(entry: &str) -> Self {
        let fields: Vec<&str> = entry.split('|').collect();
        let field = |idx: usize| fields.get(idx).map(|f| f.trim()).unwrap_or_default();

        let gene_ids = field(4)
            .split('&')
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();
        let hgvs_p = match field(10) {
            "" => None,
            p => Some(p.to_string()),
        };

        Self {
            allele: field(0).to_string(),
            effect: field(1).to_string(),
            gene_ids,
            hgvs_p,
        }
    }

    pub fn is_gene_fusion(&self) -> bool {
        self.effect.split('&').any(|e| e.contains("gene_fusion"))
    }

    /// The two fused gene identifiers, if the annotation names exactly two.
    pub fn gene_pair(&self) -> Option<(&str, &str)> {
        match self.gene_ids.as_slice() {
            [a, b] => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }
}

/// A structural variant call. `position` is the 1-based VCF `POS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvCall {
    pub id: String,
    pub chromosome: String,
    pub position: i64,
    pub end: Option<i64>,
    pub alt: String,
    pub mate_id: Option<String>,
    pub sv_type: SvType,
    pub annotations: Vec<Annotation>,
}

impl SvCall {
    pub fn fusion_annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(|ann| ann.is_gene_fusion())
    }
    pub fn get_fetch_definition_s(&self) -> String {
        match self.end {
            Some(end) => format!("{}:{}-{}", self.chromosome, self.position, end),
            None => format!("{}:{}", self.chromosome, self.position),
        }
    }
}

/// How a breakend ALT allele joins the mate: `]` means the joined piece extends to the
/// left of the mate position, `[` to the right of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakendJoin {
    MateLeft,
    MateRight,
}

impl BreakendJoin {
    pub fn from_alt(alt: &str) -> Option<Self> {
        if alt.contains(']') {
            Some(BreakendJoin::MateLeft)
        } else if alt.contains('[') {
            Some(BreakendJoin::MateRight)
        } else {
            None
        }
    }
}

/// Breakend records waiting for their mate, keyed by record ID.
/// One cache is used per VCF file.
#[derive(Debug, Default)]
pub struct BreakendCache {
    pending: HashMap<String, SvCall>,
}

impl BreakendCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// If the mate of `call` was seen before, take it out of the cache and return it.
    /// Otherwise keep `call` until its mate arrives.
    pub fn offer(&mut self, call: &SvCall) -> Option<SvCall> {
        if let Some(mate_id) = &call.mate_id {
            if let Some(mate) = self.pending.remove(mate_id) {
                return Some(mate);
            }
        }
        self.pending.insert(call.id.clone(), call.clone());
        None
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }
    pub fn len(&self) -> usize {
        self.pending.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
