use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::errors::DiplotypeParseError;
use crate::models::diplotype::Diplotype;

///
/// The diplotypes called for one gene by a genotyping pipeline. More than one
/// diplotype means the caller could not disambiguate between them.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneCall {
    pub gene: String,
    #[serde(default)]
    pub diplotypes: Vec<String>,
}

impl GeneCall {
    pub fn new(gene: &str, diplotypes: &[&str]) -> Self {
        GeneCall {
            gene: gene.to_string(),
            diplotypes: diplotypes.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn parse_diplotypes(&self) -> Result<Vec<Diplotype>, DiplotypeParseError> {
        self.diplotypes
            .iter()
            .map(|d| Diplotype::parse(&self.gene, d))
            .collect()
    }
}

/// Which pipeline produced a call.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CallSource {
    Primary,
    Alternate,
}

impl Display for CallSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallSource::Primary => write!(f, "primary"),
            CallSource::Alternate => write!(f, "alternate"),
        }
    }
}
