//! Tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! [`HTMLTreeBuilder`] is the tokenizer's [`TokenSink`](crate::tokenizer::TokenSink).
//! Each insertion mode is a `handle_*_mode` method; they are split across
//! files by area:
//!
//! - `core`: state, the dispatcher, the stack of open elements and insertion
//! - `formatting`: active formatting elements and the adoption agency
//! - `modes`: document-level modes (initial through in head, text, template,
//!   and the after-body and frameset family)
//! - `in_body`: the "in body" mode
//! - `in_table`: table and select modes
//! - `foreign_content`: SVG and MathML

mod core;
mod formatting;
pub mod foreign_content;
mod in_body;
mod in_table;
mod modes;
pub mod quirks;

pub use self::core::{ActiveFormattingElement, HTMLTreeBuilder, InsertionMode};
pub use quirks::quirks_mode_for_doctype;
