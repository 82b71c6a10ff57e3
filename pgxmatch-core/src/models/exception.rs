use serde::{Deserialize, Serialize};

///
/// A known caveat about calling a gene, attached to gene reports for display.
/// When `diplotype` is set the exception only applies to samples called with it.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GeneException {
    pub gene: String,
    #[serde(default)]
    pub diplotype: Option<String>,
    pub message: String,
}
