//! Common utilities for the weft HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates and the CLI:
//! - **Warning System** - de-duplicated diagnostics routed through the `log` facade
//! - **Document Sources** - loading markup from files or inline strings

pub mod error;
pub mod source;
pub mod warning;

pub use error::WeftError;
pub use source::{DocumentSource, load_source};
pub use warning::{clear_warnings, warn_once};
