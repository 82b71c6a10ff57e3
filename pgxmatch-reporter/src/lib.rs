//! # pgxmatch-reporter
//!
//! Matches a sample's called diplotypes against pharmacogenomic dosing guidelines.
//!
//! For every guideline the reporter decides whether enough of its genes were
//! called to say anything (reportable), which genes are missing, and which
//! annotation groups the sample's combined genotype falls into.
//!
//! ## Main Components
//!
//! - **`GeneReport`**: per-gene calls, keyed by symbol in a `GeneReportSet`
//! - **`GuidelineReport`**: per-guideline match state
//! - **`combiner`**: builds the combined genotypes of a guideline
//! - **`matcher`**: evaluates guidelines and collects `MatchDiagnostics`
//! - **`ReportContext`**: builds all of the above from calls and guideline definitions
//!
//! ## Example
//!
//! ```rust
//! use pgxmatch_core::PhenotypeMap;
//! use pgxmatch_core::models::{GeneCall, Group, GuidelinePackage, RelatedGene};
//! use pgxmatch_reporter::{ReportContext, ReporterConfig};
//!
//! let phenotypes = PhenotypeMap::from_iter([
//!     ("CYP2C19", "*2/*2", "Poor Metabolizer"),
//! ]);
//! let guideline = GuidelinePackage {
//!     id: "clopidogrel".to_string(),
//!     name: "Clopidogrel and CYP2C19".to_string(),
//!     drugs: vec!["clopidogrel".to_string()],
//!     related_genes: vec![RelatedGene { symbol: "CYP2C19".to_string() }],
//!     groups: vec![Group {
//!         id: "pm".to_string(),
//!         name: "Poor Metabolizer".to_string(),
//!         gene_phenotypes: vec!["Poor Metabolizer".to_string()],
//!     }],
//! };
//! let calls = vec![GeneCall::new("CYP2C19", &["*2/*2"])];
//!
//! let context = ReportContext::new(&calls, &[], &[guideline], &phenotypes, ReporterConfig::default()).unwrap();
//! assert!(context.guideline_reports()[0].matched_groups().contains("pm"));
//! ```
//!
pub mod combiner;
pub mod config;
pub mod context;
pub mod error;
pub mod gene_report;
pub mod guideline_report;
pub mod matcher;

// re-export things
pub use config::*;
pub use context::*;
pub use error::*;
pub use gene_report::*;
pub use guideline_report::*;
pub use matcher::{MatchDiagnostics, evaluate_guideline, find_matches};

pub mod consts {
    pub const GENOTYPE_DELIMITER: &str = ";";
    pub const DEFAULT_ALTERNATE_SOURCE_TAG: &str = "(alternate)";
}
