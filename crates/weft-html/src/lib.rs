//! HTML tokenizer and tree constructor.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - All 80 states, including script data, CDATA and character references
//!   - Named references against the full entity table
//!
//! - **Tree construction** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes
//!   - Active formatting elements, the adoption agency algorithm and foster
//!     parenting
//!   - Foreign content (SVG and MathML) and quirks mode classification
//!
//! The two halves run in lockstep: every token goes straight from the
//! tokenizer into the tree builder, which may answer by switching the
//! tokenizer's state (for `<title>`, `<script>` and friends) or stopping it.
//!
//! # Not Implemented
//!
//! - Script execution and `document.write`
//! - Encoding sniffing (input is already text)
//! - Fragment parsing

/// Parser configuration.
pub mod config;
/// Whole-document parsing and tree printing.
pub mod driver;
/// Parse issue reporting.
pub mod error;
/// Character input.
pub mod input;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;
/// Tree construction.
pub mod tree_builder;

pub use config::ParserOptions;
pub use driver::{ParseOutput, parse, parse_document, parse_with_options, print_tree, tree_to_string};
pub use error::{ParseErrorKind, ParseIssue, ParseStage};
pub use input::{InputSource, StrInput};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState, tokenize};
pub use tree_builder::{HTMLTreeBuilder, InsertionMode};
