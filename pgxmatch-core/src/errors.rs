use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DiplotypeParseError {
    #[error("Empty diplotype for gene {0}")]
    Empty(String),

    #[error("Diplotype for gene {gene} is not of the form allele1/allele2: {text}")]
    MissingSeparator { gene: String, text: String },

    #[error("Diplotype for gene {gene} has an empty allele: {text}")]
    EmptyAllele { gene: String, text: String },
}
