//! Chromosome identity and name resolution
//!
//! Index files, VCF headers, and user input rarely agree on chromosome
//! spelling: UCSC style (`chr1`, `chrM`), Ensembl style (`1`, `MT`), and
//! arbitrary casing all occur in the wild. A `Chromosome` carries both
//! spellings plus the numeric identifier that aligns it with an index
//! slot; lookups accept any variant.

use std::collections::HashMap;

/// Numeric identifier marking a chromosome absent from the reference set.
pub const UNKNOWN_INDEX: u16 = u16::MAX;

/// A reference chromosome with both common spellings and its slot number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    /// UCSC-style name (`chr1`, `chrX`, `chrM`)
    pub ucsc_name: String,
    /// Ensembl-style name (`1`, `X`, `MT`)
    pub ensembl_name: String,
    /// Slot in the index's reference-sequence table
    pub index: u16,
}

impl Chromosome {
    pub fn new(ucsc_name: impl Into<String>, ensembl_name: impl Into<String>, index: u16) -> Self {
        Chromosome {
            ucsc_name: ucsc_name.into(),
            ensembl_name: ensembl_name.into(),
            index,
        }
    }

    /// Placeholder for a name missing from the reference set. Lookups
    /// against an index degrade to "scan from start" for these.
    pub fn unknown(name: impl Into<String>) -> Self {
        let name = name.into();
        Chromosome {
            ucsc_name: name.clone(),
            ensembl_name: name,
            index: UNKNOWN_INDEX,
        }
    }

    /// Whether this chromosome belongs to the reference set.
    pub fn is_known(&self) -> bool {
        self.index != UNKNOWN_INDEX
    }
}

/// Normalized key for name-variant matching: lowercase, `chr` prefix
/// stripped, mitochondrial spellings folded together.
fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = lower.strip_prefix("chr").unwrap_or(&lower);
    match stripped {
        "m" | "mt" => "mt".to_string(),
        other => other.to_string(),
    }
}

/// Build a name → chromosome table accepting UCSC, Ensembl, and
/// case/prefix variants of every entry.
///
/// # Examples
/// ```
/// use varseek::genome::{chromosome_lookup, Chromosome};
/// let table = chromosome_lookup(&[Chromosome::new("chr1", "1", 0)]);
/// assert!(table.contains_key("chr1"));
/// assert!(table.contains_key("1"));
/// ```
pub fn chromosome_lookup(chromosomes: &[Chromosome]) -> HashMap<String, Chromosome> {
    let mut table = HashMap::with_capacity(chromosomes.len() * 3);
    for chromosome in chromosomes {
        table.insert(chromosome.ucsc_name.clone(), chromosome.clone());
        table.insert(chromosome.ensembl_name.clone(), chromosome.clone());
        table.insert(normalize_name(&chromosome.ucsc_name), chromosome.clone());
    }
    table
}

/// Derive full chromosome entries from indexed names, filling in the
/// missing spelling: `chr`-prefixed names get an Ensembl variant and bare
/// names get a UCSC one. Slot numbers become the numeric identifiers.
pub fn chromosomes_from_names<'a>(
    names: impl IntoIterator<Item = (u16, &'a str)>,
) -> Vec<Chromosome> {
    names
        .into_iter()
        .map(|(index, name)| match name.strip_prefix("chr") {
            Some(stripped) => Chromosome::new(name, stripped, index),
            None => Chromosome::new(format!("chr{name}"), name, index),
        })
        .collect()
}

/// Resolve a name to a chromosome, trying the exact spelling first and the
/// normalized variant second. Unmatched names come back as
/// [`Chromosome::unknown`] rather than an error, mirroring how offset
/// lookups degrade instead of failing.
///
/// # Examples
/// ```
/// use varseek::genome::{chromosome_lookup, find_chromosome, Chromosome, UNKNOWN_INDEX};
/// let table = chromosome_lookup(&[Chromosome::new("chr2", "2", 1)]);
/// assert_eq!(find_chromosome(&table, "CHR2").index, 1);
/// assert_eq!(find_chromosome(&table, "chr99").index, UNKNOWN_INDEX);
/// ```
pub fn find_chromosome(table: &HashMap<String, Chromosome>, name: &str) -> Chromosome {
    if let Some(chromosome) = table.get(name) {
        return chromosome.clone();
    }
    if let Some(chromosome) = table.get(&normalize_name(name)) {
        return chromosome.clone();
    }
    Chromosome::unknown(name)
}
