#[cfg(feature = "core")]
#[doc(inline)]
pub use pgxmatch_core as core;

#[cfg(feature = "reporter")]
#[doc(inline)]
pub use pgxmatch_reporter as reporter;
