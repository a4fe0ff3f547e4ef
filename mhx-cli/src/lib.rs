//! Library target for the `mhx` package.
//!
//! The deliverable of this package is the `mhx` CLI binary (`src/main.rs`).
//! This target re-exports the extractor so doc tests can run against it.

#[doc(hidden)]
pub use mediahuis_parser;
