//! HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)

mod character_reference;
/// The tokenizer state machine and its run loop.
pub mod core;
mod declarations;
mod helpers;
pub mod named_character_references;
pub mod sink;
pub mod states;
/// Tokens handed to the tree builder.
pub mod token;

pub use self::core::HTMLTokenizer;
pub use sink::{SinkResult, TokenSink, TokenizerResult};
pub use states::TokenizerState;
pub use token::{Attribute, Token};

use crate::input::StrInput;

/// Tokenize `input` on its own, without tree construction.
///
/// The tokenizer stays in the data state family throughout, since nothing
/// switches it into RCDATA or raw text for elements like `<title>`.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(StrInput::new(input), Vec::new());
    let _ = tokenizer.run();
    tokenizer.into_sink()
}
