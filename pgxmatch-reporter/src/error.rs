use thiserror::Error;

use pgxmatch_core::DiplotypeParseError;
use pgxmatch_core::models::CallSource;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Didn't expect more than one gene report for {0}")]
    DuplicateGeneReport(String),

    #[error("Gene {gene} already has {call_source} call data")]
    DuplicateCallData { gene: String, call_source: CallSource },

    #[error("No gene report found for {0}")]
    MissingGeneReport(String),

    #[error("Call for gene {found} applied to the gene report for {expected}")]
    GeneMismatch { expected: String, found: String },

    #[error(transparent)]
    InvalidDiplotype(#[from] DiplotypeParseError),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
