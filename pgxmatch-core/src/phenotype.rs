//! Phenotype translation tables.
//!
//! A phenotype table maps a diplotype lookup key (`GENE:allele1/allele2`) to a
//! functional phenotype such as `Poor Metabolizer`. Tables are read-only once
//! built and are passed explicitly to whatever needs to translate diplotypes.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::errors::DiplotypeParseError;
use crate::models::Diplotype;

///
/// Anything that can translate a diplotype lookup key into a phenotype.
///
pub trait PhenotypeLookup: Send + Sync {
    fn phenotype(&self, lookup_key: &str) -> Option<&str>;
}

/// On-disk form: gene symbol -> diplotype -> phenotype.
pub type GenePhenotypeTable = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "GenePhenotypeTable")]
pub struct PhenotypeMap {
    phenotypes: HashMap<String, String>,
}

impl PhenotypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Add a translation. The diplotype is canonicalized first, so `*2/*1`
    /// and `*1/*2` share an entry. Returns the previous phenotype, if any.
    ///
    pub fn insert(
        &mut self,
        gene: &str,
        diplotype: &str,
        phenotype: &str,
    ) -> Result<Option<String>, DiplotypeParseError> {
        let key = Diplotype::parse(gene, diplotype)?.lookup_key();
        Ok(self.phenotypes.insert(key, phenotype.to_string()))
    }

    pub fn len(&self) -> usize {
        self.phenotypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phenotypes.is_empty()
    }
}

impl PhenotypeLookup for PhenotypeMap {
    fn phenotype(&self, lookup_key: &str) -> Option<&str> {
        self.phenotypes.get(lookup_key).map(String::as_str)
    }
}

impl TryFrom<GenePhenotypeTable> for PhenotypeMap {
    type Error = DiplotypeParseError;

    fn try_from(table: GenePhenotypeTable) -> Result<Self, Self::Error> {
        let mut map = PhenotypeMap::new();
        for (gene, diplotypes) in &table {
            for (diplotype, phenotype) in diplotypes {
                map.insert(gene, diplotype, phenotype)?;
            }
        }
        Ok(map)
    }
}

impl<'a> FromIterator<(&'a str, &'a str, &'a str)> for PhenotypeMap {
    /// Entries that fail to parse are skipped with a warning.
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str, &'a str)>>(iter: T) -> Self {
        let mut map = PhenotypeMap::new();
        for (gene, diplotype, phenotype) in iter {
            if let Err(e) = map.insert(gene, diplotype, phenotype) {
                log::warn!("Skipping phenotype entry: {}", e);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn phenotype_map() -> PhenotypeMap {
        PhenotypeMap::from_iter([
            ("CYP2C19", "*1/*1", "Normal Metabolizer"),
            ("CYP2C19", "*2/*1", "Intermediate Metabolizer"),
            ("CYP2C19", "*2/*2", "Poor Metabolizer"),
        ])
    }

    #[rstest]
    fn test_lookup_uses_canonical_key(phenotype_map: PhenotypeMap) {
        assert_eq!(phenotype_map.len(), 3);
        assert_eq!(
            phenotype_map.phenotype("CYP2C19:*1/*2"),
            Some("Intermediate Metabolizer")
        );
        assert_eq!(phenotype_map.phenotype("CYP2C19:*2/*1"), None);
        assert_eq!(phenotype_map.phenotype("CYP2D6:*1/*1"), None);
    }

    #[rstest]
    fn test_insert_replaces(mut phenotype_map: PhenotypeMap) {
        let prev = phenotype_map
            .insert("CYP2C19", "*1/*1", "Normal")
            .unwrap();
        assert_eq!(prev, Some("Normal Metabolizer".to_string()));
        assert_eq!(phenotype_map.phenotype("CYP2C19:*1/*1"), Some("Normal"));
    }

    #[rstest]
    fn test_bad_entries_are_skipped() {
        let map = PhenotypeMap::from_iter([("TPMT", "*1", "Normal"), ("TPMT", "*1/*1", "Normal")]);
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_deserialize_from_gene_table() {
        let json = r#"{"CYP2C9": {"*1/*1": "Normal", "*3/*1": "Intermediate"}}"#;
        let map: PhenotypeMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.phenotype("CYP2C9:*1/*3"), Some("Intermediate"));

        let bad = r#"{"CYP2C9": {"*1": "Normal"}}"#;
        assert!(serde_json::from_str::<PhenotypeMap>(bad).is_err());
    }
}
