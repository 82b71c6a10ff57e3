use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RelatedGene {
    pub symbol: String,
}

///
/// An annotation group: one dosing recommendation path of a guideline,
/// selected when the sample's combined genotype is one of `gene_phenotypes`.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gene_phenotypes: Vec<String>,
}

///
/// A dosing guideline as supplied by the guideline source.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GuidelinePackage {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub drugs: Vec<String>,
    #[serde(default)]
    pub related_genes: Vec<RelatedGene>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl GuidelinePackage {
    /// Gene symbols in metadata order, duplicates included.
    pub fn gene_symbols(&self) -> impl Iterator<Item = &str> {
        self.related_genes.iter().map(|g| g.symbol.as_str())
    }
}
