pub mod call;
pub mod diplotype;
pub mod exception;
pub mod guideline;

// re-export for cleaner imports
pub use self::call::{CallSource, GeneCall};
pub use self::diplotype::Diplotype;
pub use self::exception::GeneException;
pub use self::guideline::{Group, GuidelinePackage, RelatedGene};
