//! The synchronous hand-off between the tokenizer and its consumer.

use super::states::TokenizerState;
use super::token::Token;

/// What the consumer asks the tokenizer to do after a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkResult {
    /// Keep tokenizing in the current state.
    Continue,
    /// Switch to the given lexical state before consuming more input.
    /// Used by the generic RCDATA and raw text element parsing algorithms.
    SwitchLexicalState(TokenizerState),
    /// Stop parsing. No further tokens are emitted.
    Stop,
}

/// How a tokenizer run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerResult {
    /// The end-of-file token was emitted and the sink did not ask to stop.
    Done,
    /// The sink returned [`SinkResult::Stop`].
    Stopped,
}

/// Receives tokens one at a time, as they are emitted.
pub trait TokenSink {
    /// Handle one token. The tokenizer does not consume further input until
    /// this returns.
    fn process_token(&mut self, token: Token) -> SinkResult;

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If there is an adjusted current node and it is not an element in the
    /// HTML namespace", `<![CDATA[` starts a CDATA section.
    fn adjusted_current_node_is_foreign(&self) -> bool {
        false
    }
}

/// Collects tokens; used for standalone tokenization.
impl TokenSink for Vec<Token> {
    fn process_token(&mut self, token: Token) -> SinkResult {
        self.push(token);
        SinkResult::Continue
    }
}
