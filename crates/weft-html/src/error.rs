//! Parse error reporting.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! Parse errors never stop the parser. Every one has a defined recovery, and
//! the issues are only collected so callers can inspect them.

use std::fmt;

use strum_macros::Display;

/// Which half of the parser raised an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParseStage {
    /// Raised by the tokenizer; the position is a character offset.
    Tokenizer,
    /// Raised by tree construction; the position is a token index.
    TreeConstruction,
}

/// A parse error or warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Where the issue came from.
    pub stage: ParseStage,
    /// Description (the error code for tokenizer issues).
    pub message: String,
    /// Character offset or token index, depending on `stage`.
    pub position: usize,
    /// True for parse errors, false for warnings.
    pub is_error: bool,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        let unit = match self.stage {
            ParseStage::Tokenizer => "offset",
            ParseStage::TreeConstruction => "token",
        };
        write!(
            f,
            "{level} [{}] {unit} {}: {}",
            self.stage, self.position, self.message
        )
    }
}

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// Tokenizer parse errors. `Display` gives the standard error code, e.g.
/// `unexpected-null-character`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseErrorKind {
    /// `<!-->` or `<!--->`.
    AbruptClosingOfEmptyComment,
    /// `>` inside a DOCTYPE public identifier.
    AbruptDoctypePublicIdentifier,
    /// `>` inside a DOCTYPE system identifier.
    AbruptDoctypeSystemIdentifier,
    /// `&#` or `&#x` with no digits.
    AbsenceOfDigitsInNumericCharacterReference,
    /// `<![CDATA[` outside foreign content.
    CdataInHtmlContent,
    /// Numeric reference above U+10FFFF.
    CharacterReferenceOutsideUnicodeRange,
    /// Numeric reference to a control character.
    ControlCharacterReference,
    /// An attribute name repeated on one tag.
    DuplicateAttribute,
    /// An end tag carrying attributes.
    EndTagWithAttributes,
    /// An end tag with the self-closing flag.
    EndTagWithTrailingSolidus,
    /// End of input right after `<` or `</`.
    EofBeforeTagName,
    /// End of input inside a CDATA section.
    EofInCdata,
    /// End of input inside a comment.
    EofInComment,
    /// End of input inside a DOCTYPE.
    EofInDoctype,
    /// End of input inside `<!--` in script data.
    EofInScriptHtmlCommentLikeText,
    /// End of input inside a tag.
    EofInTag,
    /// Comment closed by `--!>`.
    IncorrectlyClosedComment,
    /// `<!` not followed by `--`, `DOCTYPE` or `[CDATA[`.
    IncorrectlyOpenedComment,
    /// Something other than PUBLIC or SYSTEM after the DOCTYPE name.
    InvalidCharacterSequenceAfterDoctypeName,
    /// A tag name starting with a non-letter.
    InvalidFirstCharacterOfTagName,
    /// `=` followed directly by `>`.
    MissingAttributeValue,
    /// `<!DOCTYPE>`.
    MissingDoctypeName,
    /// PUBLIC keyword with no identifier.
    MissingDoctypePublicIdentifier,
    /// SYSTEM keyword with no identifier.
    MissingDoctypeSystemIdentifier,
    /// `</>`.
    MissingEndTagName,
    /// Unquoted DOCTYPE public identifier.
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// Unquoted DOCTYPE system identifier.
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// Named or numeric reference without `;`.
    MissingSemicolonAfterCharacterReference,
    /// PUBLIC immediately followed by a quote.
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// SYSTEM immediately followed by a quote.
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `<!DOCTYPEhtml>`.
    MissingWhitespaceBeforeDoctypeName,
    /// Attributes with no whitespace between them.
    MissingWhitespaceBetweenAttributes,
    /// Identifiers with no whitespace between them.
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// `<!--` inside a comment.
    NestedComment,
    /// Numeric reference to a noncharacter.
    NoncharacterCharacterReference,
    /// `&#0;`.
    NullCharacterReference,
    /// Numeric reference to a surrogate.
    SurrogateCharacterReference,
    /// Garbage after the DOCTYPE system identifier.
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// `"`, `'` or `<` in an attribute name.
    UnexpectedCharacterInAttributeName,
    /// `"`, `'`, `<`, `=` or `` ` `` in an unquoted value.
    UnexpectedCharacterInUnquotedAttributeValue,
    /// An attribute name starting with `=`.
    UnexpectedEqualsSignBeforeAttributeName,
    /// U+0000 in the input.
    UnexpectedNullCharacter,
    /// `<?`.
    UnexpectedQuestionMarkInsteadOfTagName,
    /// A `/` inside a tag not followed by `>`.
    UnexpectedSolidusInTag,
    /// `&name;` that is not in the entity table.
    UnknownNamedCharacterReference,
}
