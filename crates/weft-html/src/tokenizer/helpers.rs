use log::trace;
use weft_common::warn_once;

use super::core::HTMLTokenizer;
use super::sink::{SinkResult, TokenSink};
use super::states::TokenizerState;
use super::token::Token;
use crate::error::{ParseErrorKind, ParseIssue, ParseStage};
use crate::input::InputSource;

// =============================================================================
// State transitions
// =============================================================================

impl<I: InputSource, S: TokenSink> HTMLTokenizer<I, S> {
    /// "Switch to the X state": the next step consumes a fresh character.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state": push the current input character back and
    /// switch. End of input needs no pushback, it is reported again anyway.
    pub(super) fn reconsume_in(&mut self, new_state: TokenizerState) {
        if let Some(c) = self.current_input_character {
            self.input.reconsume(c);
        }
        self.state = new_state;
    }

    /// True if the upcoming characters are exactly `target`.
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        let upcoming = self.input.peek(target.chars().count());
        upcoming.iter().copied().eq(target.chars())
    }

    /// True if the upcoming characters match `target`, ignoring ASCII case.
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        let upcoming = self.input.peek(target.chars().count());
        upcoming.len() == target.chars().count()
            && upcoming
                .iter()
                .zip(target.chars())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b))
    }

    /// Consume `count` characters that a lookahead has already matched.
    pub(super) fn consume_matched(&mut self, count: usize) {
        for _ in 0..count {
            let _ = self.input.consume();
        }
    }
}

// =============================================================================
// Token construction
// =============================================================================

impl<I: InputSource, S: TokenSink> HTMLTokenizer<I, S> {
    /// Apply `f` to the token under construction, if there is one.
    pub(super) fn with_current_token(&mut self, f: impl FnOnce(&mut Token)) {
        if let Some(token) = self.current_token.as_mut() {
            f(token);
        }
    }

    /// Start a new attribute, first dropping the previous one if it turned out
    /// to be a duplicate.
    pub(super) fn start_new_attribute(&mut self) {
        self.drop_discarded_attribute();
        self.with_current_token(Token::start_new_attribute);
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before emitting
    /// the tag token, if appropriate), the complete attribute's name must be
    /// compared to the other attributes on the same token."
    pub(super) fn leave_attribute_name_state(&mut self) {
        let duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);
        if duplicate {
            self.parse_error(ParseErrorKind::DuplicateAttribute);
            self.discard_current_attribute = true;
        }
    }

    fn drop_discarded_attribute(&mut self) {
        if self.discard_current_attribute {
            self.discard_current_attribute = false;
            self.with_current_token(Token::remove_current_attribute);
        }
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.current_token, &self.last_start_tag_name) {
            (Some(Token::EndTag { name, .. }), Some(last)) => name == last,
            _ => false,
        }
    }

    /// Record a parse error at the current input position.
    pub(super) fn parse_error(&mut self, kind: ParseErrorKind) {
        let position = self.input.position();
        let _ = warn_once("HTML Tokenizer", &format!("{kind} at offset {position}"));
        self.issues.push(ParseIssue {
            stage: ParseStage::Tokenizer,
            message: kind.to_string(),
            position,
            is_error: true,
        });
    }
}

// =============================================================================
// Emission
// =============================================================================

impl<I: InputSource, S: TokenSink> HTMLTokenizer<I, S> {
    /// Hand a token to the sink and act on its reply before returning.
    pub(super) fn emit_token(&mut self, token: Token) {
        if self.stopped {
            return;
        }
        match &token {
            Token::StartTag { name, .. } => self.last_start_tag_name = Some(name.clone()),
            Token::EndTag {
                self_closing,
                attributes,
                ..
            } => {
                if !attributes.is_empty() {
                    self.parse_error(ParseErrorKind::EndTagWithAttributes);
                }
                if *self_closing {
                    self.parse_error(ParseErrorKind::EndTagWithTrailingSolidus);
                }
            }
            Token::EndOfFile => self.eof_emitted = true,
            Token::Doctype { .. } | Token::Comment { .. } | Token::Character { .. } => {}
        }
        trace!("emit {token}");

        match self.sink.process_token(token) {
            SinkResult::Continue => {}
            SinkResult::SwitchLexicalState(state) => self.set_lexical_state(state),
            SinkResult::Stop => self.stopped = true,
        }
    }

    /// "Emit the current tag/comment/DOCTYPE token."
    pub(super) fn emit_current_token(&mut self) {
        self.drop_discarded_attribute();
        if let Some(token) = self.current_token.take() {
            self.emit_token(token);
        }
    }

    pub(super) fn emit_character(&mut self, c: char) {
        self.emit_token(Token::Character { data: c });
    }

    pub(super) fn emit_str(&mut self, s: &str) {
        for c in s.chars() {
            self.emit_character(c);
        }
    }

    /// "This is an unexpected-null-character parse error. Emit a U+FFFD
    /// REPLACEMENT CHARACTER character token."
    pub(super) fn emit_replacement_character(&mut self) {
        self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
        self.emit_character('\u{FFFD}');
    }

    /// "Emit an end-of-file token." Any half-built tag is discarded.
    pub(super) fn emit_eof(&mut self) {
        self.current_token = None;
        self.emit_token(Token::EndOfFile);
    }

    /// Emit the current comment or DOCTYPE token, then end-of-file.
    pub(super) fn emit_current_token_and_eof(&mut self) {
        self.emit_current_token();
        self.emit_eof();
    }
}
