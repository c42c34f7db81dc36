//! Character reference states (§ 13.2.5.72 – § 13.2.5.80).

use super::core::HTMLTokenizer;
use super::named_character_references::{LONGEST_ENTITY_NAME, longest_match};
use super::sink::TokenSink;
use super::states::TokenizerState;
use crate::error::ParseErrorKind;
use crate::input::InputSource;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Code points in the C1 range that windows-1252 maps to printable characters.
const C1_REPLACEMENTS: &[(u32, char)] = &[
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// Anything above this is out of range; the code is clamped here so long
/// digit runs cannot overflow.
const CODE_POINT_CEILING: u32 = 0x11_0000;

impl<I: InputSource, S: TokenSink> HTMLTokenizer<I, S> {
    /// "consumed as part of an attribute": the return state is one of the
    /// attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// "Flush code points consumed as a character reference": append the
    /// temporary buffer to the attribute value, or emit it as characters.
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            self.with_current_token(|token| {
                for c in buffer.chars() {
                    token.append_to_current_attribute_value(c);
                }
            });
        } else {
            self.emit_str(&buffer);
        }
    }

    /// Flush the buffer and reconsume in the return state.
    fn abandon_character_reference(&mut self) {
        self.flush_code_points_consumed_as_character_reference();
        self.reconsume_in(self.return_state);
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            _ => self.abandon_character_reference(),
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table."
    ///
    /// The match is found on lookahead, so only the matched characters are
    /// ever consumed.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let lookahead = self.input.peek(*LONGEST_ENTITY_NAME);
        let Some((length, replacement)) = longest_match(&lookahead) else {
            // "Flush code points consumed as a character reference. Switch to
            // the ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(TokenizerState::AmbiguousAmpersand);
            return;
        };

        self.temporary_buffer.extend(&lookahead[..length]);
        self.consume_matched(length);
        let ends_with_semicolon = lookahead[length - 1] == ';';

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;), and
        // the next input character is either a U+003D EQUALS SIGN character (=)
        // or an ASCII alphanumeric, then, for historical reasons, flush code
        // points consumed as a character reference and switch to the return
        // state."
        if self.is_consumed_as_part_of_attribute() && !ends_with_semicolon {
            let next = lookahead.get(length).copied();
            if next.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric()) {
                self.flush_code_points_consumed_as_character_reference();
                self.switch_to(self.return_state);
                return;
            }
        }

        if !ends_with_semicolon {
            self.parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
        }
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(replacement);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.with_current_token(|token| token.append_to_current_attribute_value(c));
                } else {
                    self.emit_character(c);
                }
            }
            Some(';') => {
                self.parse_error(ParseErrorKind::UnknownNamedCharacterReference);
                self.reconsume_in(self.return_state);
            }
            _ => self.reconsume_in(self.return_state),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        self.character_reference_code = 0;
        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        if self
            .current_input_character
            .is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
        } else {
            self.parse_error(ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference);
            self.abandon_character_reference();
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        if self
            .current_input_character
            .is_some_and(|c| c.is_ascii_digit())
        {
            self.reconsume_in(TokenizerState::DecimalCharacterReference);
        } else {
            self.parse_error(ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference);
            self.abandon_character_reference();
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        self.accumulate_digit(16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        self.accumulate_digit(10);
    }

    fn accumulate_digit(&mut self, radix: u32) {
        match self.current_input_character {
            Some(';') => self.switch_to(TokenizerState::NumericCharacterReferenceEnd),
            Some(c) => {
                if let Some(digit) = c.to_digit(radix) {
                    self.character_reference_code = self
                        .character_reference_code
                        .saturating_mul(radix)
                        .saturating_add(digit)
                        .min(CODE_POINT_CEILING);
                } else {
                    self.parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
                    self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
                }
            }
            None => {
                self.parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Does not consume; validates the accumulated code and flushes it.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let code = self.character_reference_code;
        let resolved = if code == 0 {
            self.parse_error(ParseErrorKind::NullCharacterReference);
            '\u{FFFD}'
        } else if code > 0x10_FFFF {
            self.parse_error(ParseErrorKind::CharacterReferenceOutsideUnicodeRange);
            '\u{FFFD}'
        } else if (0xD800..=0xDFFF).contains(&code) {
            self.parse_error(ParseErrorKind::SurrogateCharacterReference);
            '\u{FFFD}'
        } else {
            if is_noncharacter(code) {
                self.parse_error(ParseErrorKind::NoncharacterCharacterReference);
            }
            if code == 0x0D || (is_control(code) && !is_ascii_whitespace(code)) {
                self.parse_error(ParseErrorKind::ControlCharacterReference);
            }
            C1_REPLACEMENTS
                .iter()
                .find(|(from, _)| *from == code)
                .map(|&(_, to)| to)
                .or_else(|| char::from_u32(code))
                .unwrap_or('\u{FFFD}')
        };

        self.temporary_buffer.clear();
        self.temporary_buffer.push(resolved);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }
}

/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ... U+10FFFE, or U+10FFFF."
const fn is_noncharacter(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || (code & 0xFFFE) == 0xFFFE
}

/// "A control is a C0 control or a code point in the range U+007F DELETE to
/// U+009F APPLICATION PROGRAM COMMAND, inclusive."
const fn is_control(code: u32) -> bool {
    code <= 0x1F || matches!(code, 0x7F..=0x9F)
}

const fn is_ascii_whitespace(code: u32) -> bool {
    matches!(code, 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
}
