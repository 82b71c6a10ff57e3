use std::cmp::Ordering;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::errors::DiplotypeParseError;

pub const ALLELE_SEPARATOR: char = '/';
pub const LOOKUP_KEY_SEPARATOR: char = ':';

///
/// A pair of haplotype calls for a single gene, e.g. `*1/*2` for CYP2C19.
///
/// The two alleles are always stored in canonical order so that `*2/*1`
/// and `*1/*2` describe (and look up as) the same diplotype.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct Diplotype {
    pub gene: String,
    pub allele1: String,
    pub allele2: String,
}

impl Diplotype {
    pub fn new(gene: &str, allele1: &str, allele2: &str) -> Self {
        let (allele1, allele2) = match compare_alleles(allele1, allele2) {
            Ordering::Greater => (allele2, allele1),
            _ => (allele1, allele2),
        };

        Diplotype {
            gene: gene.to_string(),
            allele1: allele1.to_string(),
            allele2: allele2.to_string(),
        }
    }

    ///
    /// Parse a diplotype from its `allele1/allele2` text form.
    ///
    pub fn parse(gene: &str, text: &str) -> Result<Self, DiplotypeParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DiplotypeParseError::Empty(gene.to_string()));
        }

        let (a1, a2) =
            text.split_once(ALLELE_SEPARATOR)
                .ok_or_else(|| DiplotypeParseError::MissingSeparator {
                    gene: gene.to_string(),
                    text: text.to_string(),
                })?;

        let (a1, a2) = (a1.trim(), a2.trim());
        if a1.is_empty() || a2.is_empty() {
            return Err(DiplotypeParseError::EmptyAllele {
                gene: gene.to_string(),
                text: text.to_string(),
            });
        }

        Ok(Diplotype::new(gene, a1, a2))
    }

    /// The diplotype without its gene, e.g. `*1/*2`.
    pub fn name(&self) -> String {
        format!("{}{}{}", self.allele1, ALLELE_SEPARATOR, self.allele2)
    }

    ///
    /// The key used to translate this diplotype into a phenotype, e.g. `CYP2C19:*1/*2`.
    ///
    pub fn lookup_key(&self) -> String {
        format!("{}{}{}", self.gene, LOOKUP_KEY_SEPARATOR, self.name())
    }

    pub fn is_homozygous(&self) -> bool {
        self.allele1 == self.allele2
    }
}

impl Display for Diplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lookup_key())
    }
}

impl Ord for Diplotype {
    fn cmp(&self, other: &Self) -> Ordering {
        self.gene
            .cmp(&other.gene)
            .then_with(|| compare_alleles(&self.allele1, &other.allele1))
            .then_with(|| compare_alleles(&self.allele2, &other.allele2))
    }
}

impl PartialOrd for Diplotype {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

///
/// Order alleles the way they are conventionally listed: star alleles by their
/// numeric part (`*2` before `*10`), suballeles (`*4.001`) after their parent,
/// and everything else (rsIDs, named alleles) textually.
///
pub fn compare_alleles(a: &str, b: &str) -> Ordering {
    match (star_number(a), star_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn star_number(allele: &str) -> Option<u32> {
    let digits: String = allele
        .strip_prefix('*')?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
