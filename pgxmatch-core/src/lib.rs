//! # pgxmatch-core
//!
//! Shared models for pharmacogenomic guideline matching:
//!
//! - **`Diplotype`**: a canonicalized pair of haplotype calls for a gene
//! - **`GeneCall`**: the diplotypes a genotyping pipeline called for one gene
//! - **`GuidelinePackage`**: a dosing guideline with its related genes and annotation groups
//! - **`PhenotypeMap`**: a read-only diplotype to phenotype translation table
//! - **`GeneException`**: display-only caveats attached to gene reports
//!
//! Loading helpers for the JSON forms of these models live in [`utils`].
pub mod errors;
pub mod models;
pub mod phenotype;
pub mod utils;

pub use errors::*;
pub use phenotype::{PhenotypeLookup, PhenotypeMap};
