//! Comment, DOCTYPE and CDATA states.

use super::core::{DoctypeIdentifier, HTMLTokenizer, is_whitespace};
use super::sink::TokenSink;
use super::states::TokenizerState;
use super::token::Token;
use crate::error::ParseErrorKind;
use crate::input::InputSource;

impl<I: InputSource, S: TokenSink> HTMLTokenizer<I, S> {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.emit_current_token_and_eof(),
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| token.append_to_comment('\u{FFFD}'));
            }
            Some(c) => self.with_current_token(|token| token.append_to_comment(c)),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Entered without consuming; decides by looking ahead.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "Two U+002D HYPHEN-MINUS characters (-)"
        if self.next_few_characters_are("--") {
            self.consume_matched(2);
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::CommentStart);
        }
        // "ASCII case-insensitive match for the word "DOCTYPE""
        else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.consume_matched(7);
            self.switch_to(TokenizerState::Doctype);
        }
        // "The string "[CDATA[" (the five uppercase letters "CDATA" with a U+005B
        // LEFT SQUARE BRACKET character before and after)"
        else if self.next_few_characters_are("[CDATA[") {
            self.consume_matched(7);
            if self.sink.adjusted_current_node_is_foreign() {
                self.switch_to(TokenizerState::CdataSection);
            } else {
                self.parse_error(ParseErrorKind::CdataInHtmlContent);
                let mut comment = Token::new_comment();
                comment.append_str_to_comment("[CDATA[");
                self.current_token = Some(comment);
                self.switch_to(TokenizerState::BogusComment);
            }
        }
        // "This is an incorrectly-opened-comment parse error. Create a comment
        // token whose data is the empty string. Switch to the bogus comment state
        // (don't consume anything in the current state)."
        else {
            self.parse_error(ParseErrorKind::IncorrectlyOpenedComment);
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            Some('>') => self.abrupt_closing_of_empty_comment(),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => self.abrupt_closing_of_empty_comment(),
            None => self.eof_in_comment(),
            Some(_) => {
                self.with_current_token(|token| token.append_to_comment('-'));
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.with_current_token(|token| token.append_to_comment('<'));
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| token.append_to_comment('\u{FFFD}'));
            }
            None => self.eof_in_comment(),
            Some(c) => self.with_current_token(|token| token.append_to_comment(c)),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('!') => {
                self.with_current_token(|token| token.append_to_comment('!'));
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            Some('<') => self.with_current_token(|token| token.append_to_comment('<')),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDash);
        } else {
            self.reconsume_in(TokenizerState::Comment);
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDashDash);
        } else {
            self.reconsume_in(TokenizerState::CommentEndDash);
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    ///
    /// `<!--` seen inside a comment.
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('>') | None => self.reconsume_in(TokenizerState::CommentEnd),
            Some(_) => {
                self.parse_error(ParseErrorKind::NestedComment);
                self.reconsume_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.with_current_token(|token| token.append_to_comment('-'));
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            Some('-') => self.with_current_token(|token| token.append_to_comment('-')),
            None => self.eof_in_comment(),
            Some(_) => {
                self.with_current_token(|token| token.append_str_to_comment("--"));
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.with_current_token(|token| token.append_str_to_comment("--!"));
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.parse_error(ParseErrorKind::IncorrectlyClosedComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.with_current_token(|token| token.append_str_to_comment("--!"));
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn abrupt_closing_of_empty_comment(&mut self) {
        self.parse_error(ParseErrorKind::AbruptClosingOfEmptyComment);
        self.switch_to(TokenizerState::Data);
        self.emit_current_token();
    }

    fn eof_in_comment(&mut self) {
        self.parse_error(ParseErrorKind::EofInComment);
        self.emit_current_token_and_eof();
    }

    // ===== DOCTYPE states =====

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => self.switch_to(TokenizerState::BeforeDoctypeName),
            Some('>') => self.reconsume_in(TokenizerState::BeforeDoctypeName),
            // "This is an eof-in-doctype parse error. Create a new DOCTYPE token.
            // Set its force-quirks flag to on. Emit the current token. Emit an
            // end-of-file token."
            None => {
                self.current_token = Some(Token::new_doctype());
                self.eof_in_doctype();
            }
            Some(_) => {
                self.parse_error(ParseErrorKind::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.start_doctype_with_name('\u{FFFD}');
            }
            Some('>') => {
                self.parse_error(ParseErrorKind::MissingDoctypeName);
                let mut doctype = Token::new_doctype();
                doctype.set_force_quirks();
                self.current_token = Some(doctype);
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => {
                self.current_token = Some(Token::new_doctype());
                self.eof_in_doctype();
            }
            Some(c) => self.start_doctype_with_name(c.to_ascii_lowercase()),
        }
    }

    fn start_doctype_with_name(&mut self, first: char) {
        let mut doctype = Token::new_doctype();
        doctype.append_to_doctype_name(first);
        self.current_token = Some(doctype);
        self.switch_to(TokenizerState::DoctypeName);
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => self.switch_to(TokenizerState::AfterDoctypeName),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "This is an unexpected-null-character parse error. Append a U+FFFD
            // REPLACEMENT CHARACTER character to the current DOCTYPE token's name."
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| token.append_to_doctype_name('\u{FFFD}'));
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                self.with_current_token(|token| token.append_to_doctype_name(c.to_ascii_lowercase()));
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_doctype(),
            // "If the six characters starting from the current input character are
            // an ASCII case-insensitive match for the word "PUBLIC", then consume
            // those characters and switch to the after DOCTYPE public keyword state."
            Some(c) => {
                if self.keyword_starts_here(c, "PUBLIC") {
                    self.consume_matched(5);
                    self.switch_to(TokenizerState::AfterDoctypePublicKeyword);
                } else if self.keyword_starts_here(c, "SYSTEM") {
                    self.consume_matched(5);
                    self.switch_to(TokenizerState::AfterDoctypeSystemKeyword);
                } else {
                    self.parse_error(ParseErrorKind::InvalidCharacterSequenceAfterDoctypeName);
                    self.with_current_token(Token::set_force_quirks);
                    self.reconsume_in(TokenizerState::BogusDoctype);
                }
            }
        }
    }

    /// Whether `current` plus the following characters spell `keyword`.
    fn keyword_starts_here(&self, current: char, keyword: &str) -> bool {
        let mut chars = keyword.chars();
        chars
            .next()
            .is_some_and(|first| current.eq_ignore_ascii_case(&first))
            && self.next_few_characters_are_case_insensitive(chars.as_str())
    }

    /// [§ 13.2.5.57](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// and [§ 13.2.5.63](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    /// after DOCTYPE keyword states.
    pub(super) fn handle_after_doctype_keyword_state(&mut self, which: DoctypeIdentifier) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => self.switch_to(match which {
                DoctypeIdentifier::Public => TokenizerState::BeforeDoctypePublicIdentifier,
                DoctypeIdentifier::System => TokenizerState::BeforeDoctypeSystemIdentifier,
            }),
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(match which {
                    DoctypeIdentifier::Public => ParseErrorKind::MissingWhitespaceAfterDoctypePublicKeyword,
                    DoctypeIdentifier::System => ParseErrorKind::MissingWhitespaceAfterDoctypeSystemKeyword,
                });
                self.begin_doctype_identifier(which, quote);
            }
            Some('>') => self.missing_doctype_identifier(which),
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_doctype_identifier(which),
        }
    }

    /// [§ 13.2.5.58](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// and [§ 13.2.5.64](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    /// before DOCTYPE identifier states.
    pub(super) fn handle_before_doctype_identifier_state(&mut self, which: DoctypeIdentifier) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(which, quote),
            Some('>') => self.missing_doctype_identifier(which),
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_doctype_identifier(which),
        }
    }

    /// DOCTYPE identifier (double- and single-quoted) states, § 13.2.5.59,
    /// § 13.2.5.60, § 13.2.5.65 and § 13.2.5.66.
    pub(super) fn handle_doctype_identifier_quoted_state(
        &mut self,
        which: DoctypeIdentifier,
        quote: char,
    ) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(match which {
                DoctypeIdentifier::Public => TokenizerState::AfterDoctypePublicIdentifier,
                DoctypeIdentifier::System => TokenizerState::AfterDoctypeSystemIdentifier,
            }),
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.append_to_doctype_identifier(which, '\u{FFFD}');
            }
            Some('>') => {
                self.parse_error(match which {
                    DoctypeIdentifier::Public => ParseErrorKind::AbruptDoctypePublicIdentifier,
                    DoctypeIdentifier::System => ParseErrorKind::AbruptDoctypeSystemIdentifier,
                });
                self.with_current_token(Token::set_force_quirks);
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_doctype(),
            Some(c) => self.append_to_doctype_identifier(which, c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {
                self.switch_to(TokenizerState::BetweenDoctypePublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(
                    ParseErrorKind::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.begin_doctype_identifier(DoctypeIdentifier::System, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_doctype_identifier(DoctypeIdentifier::System),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some(quote @ ('"' | '\'')) => {
                self.begin_doctype_identifier(DoctypeIdentifier::System, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_doctype_identifier(DoctypeIdentifier::System),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_doctype(),
            // "This does not set the current DOCTYPE token's force-quirks flag to on."
            Some(_) => {
                self.parse_error(ParseErrorKind::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('\0') => self.parse_error(ParseErrorKind::UnexpectedNullCharacter),
            None => self.emit_current_token_and_eof(),
            Some(_) => {}
        }
    }

    /// Set the identifier to the empty string and switch to its quoted state.
    fn begin_doctype_identifier(&mut self, which: DoctypeIdentifier, quote: char) {
        let double = quote == '"';
        match which {
            DoctypeIdentifier::Public => {
                self.with_current_token(Token::set_public_identifier_empty);
                self.switch_to(if double {
                    TokenizerState::DoctypePublicIdentifierDoubleQuoted
                } else {
                    TokenizerState::DoctypePublicIdentifierSingleQuoted
                });
            }
            DoctypeIdentifier::System => {
                self.with_current_token(Token::set_system_identifier_empty);
                self.switch_to(if double {
                    TokenizerState::DoctypeSystemIdentifierDoubleQuoted
                } else {
                    TokenizerState::DoctypeSystemIdentifierSingleQuoted
                });
            }
        }
    }

    fn append_to_doctype_identifier(&mut self, which: DoctypeIdentifier, c: char) {
        match which {
            DoctypeIdentifier::Public => {
                self.with_current_token(|token| token.append_to_public_identifier(c));
            }
            DoctypeIdentifier::System => {
                self.with_current_token(|token| token.append_to_system_identifier(c));
            }
        }
    }

    fn missing_doctype_identifier(&mut self, which: DoctypeIdentifier) {
        self.parse_error(match which {
            DoctypeIdentifier::Public => ParseErrorKind::MissingDoctypePublicIdentifier,
            DoctypeIdentifier::System => ParseErrorKind::MissingDoctypeSystemIdentifier,
        });
        self.with_current_token(Token::set_force_quirks);
        self.switch_to(TokenizerState::Data);
        self.emit_current_token();
    }

    fn missing_quote_before_doctype_identifier(&mut self, which: DoctypeIdentifier) {
        self.parse_error(match which {
            DoctypeIdentifier::Public => ParseErrorKind::MissingQuoteBeforeDoctypePublicIdentifier,
            DoctypeIdentifier::System => ParseErrorKind::MissingQuoteBeforeDoctypeSystemIdentifier,
        });
        self.with_current_token(Token::set_force_quirks);
        self.reconsume_in(TokenizerState::BogusDoctype);
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error(ParseErrorKind::EofInDoctype);
        self.with_current_token(Token::set_force_quirks);
        self.emit_current_token_and_eof();
    }

    // ===== CDATA states =====

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    pub(super) fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.switch_to(TokenizerState::CdataSectionBracket),
            None => {
                self.parse_error(ParseErrorKind::EofInCdata);
                self.emit_eof();
            }
            // NUL is emitted unchanged here; tree construction deals with it.
            Some(c) => self.emit_character(c),
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(super) fn handle_cdata_section_bracket_state(&mut self) {
        if self.current_input_character == Some(']') {
            self.switch_to(TokenizerState::CdataSectionEnd);
        } else {
            self.emit_character(']');
            self.reconsume_in(TokenizerState::CdataSection);
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(super) fn handle_cdata_section_end_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.emit_character(']'),
            Some('>') => self.switch_to(TokenizerState::Data),
            _ => {
                self.emit_str("]]");
                self.reconsume_in(TokenizerState::CdataSection);
            }
        }
    }
}
