use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_ALTERNATE_SOURCE_TAG;

///
/// How per-gene phenotypes are folded into combined genotypes.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CombinationMode {
    /// Each new phenotype is joined with the previous combined string taken
    /// as one opaque token. An uncalled gene empties the running set and the
    /// next called gene starts it over.
    #[default]
    Pairwise,
    /// Every constituent token is re-sorted on each join. Uncalled genes are
    /// skipped.
    Cartesian,
}

impl FromStr for CombinationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pairwise" => Ok(CombinationMode::Pairwise),
            "cartesian" => Ok(CombinationMode::Cartesian),
            _ => Err(format!("Invalid combination mode: {}", s)),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ReporterConfig {
    pub combination_mode: CombinationMode,
    /// Appended to diplotypes from the alternate calling source when listing
    /// a gene's calls.
    pub alternate_source_tag: String,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        ReporterConfig {
            combination_mode: CombinationMode::default(),
            alternate_source_tag: DEFAULT_ALTERNATE_SOURCE_TAG.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ReporterConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ReporterConfigResult<T> = std::result::Result<T, ReporterConfigError>;

impl TryFrom<&Path> for ReporterConfig {
    type Error = ReporterConfigError;

    fn try_from(path: &Path) -> ReporterConfigResult<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
