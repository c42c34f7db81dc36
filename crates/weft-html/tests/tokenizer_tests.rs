//! Integration tests for the HTML tokenizer.

use test_case::test_case;
use weft_html::tokenizer::{SinkResult, TokenSink};
use weft_html::{HTMLTokenizer, ParseIssue, StrInput, Token, TokenizerState};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    weft_html::tokenize(input)
}

/// Helper to tokenize and also return the tokenizer's parse errors
fn tokenize_with_issues(input: &str) -> (Vec<Token>, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::new(StrInput::new(input), Vec::new());
    let _ = tokenizer.run();
    tokenizer.into_parts()
}

fn has_issue(issues: &[ParseIssue], code: &str) -> bool {
    issues.iter().any(|issue| issue.message == code)
}

/// Concatenate the character tokens.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

/// A sink that switches the tokenizer's state after one start tag, the way
/// the tree builder does for `<title>`, `<style>` and `<script>`.
struct SwitchingSink {
    tokens: Vec<Token>,
    tag: &'static str,
    state: TokenizerState,
}

impl TokenSink for SwitchingSink {
    fn process_token(&mut self, token: Token) -> SinkResult {
        let switch = token.is_start_tag(self.tag);
        self.tokens.push(token);
        if switch {
            SinkResult::SwitchLexicalState(self.state)
        } else {
            SinkResult::Continue
        }
    }
}

fn tokenize_switching(input: &str, tag: &'static str, state: TokenizerState) -> Vec<Token> {
    let sink = SwitchingSink {
        tokens: Vec::new(),
        tag,
        state,
    };
    let mut tokenizer = HTMLTokenizer::new(StrInput::new(input), sink);
    let _ = tokenizer.run();
    tokenizer.into_sink().tokens
}

/// A sink that claims to be inside SVG, so CDATA sections are honoured.
#[derive(Default)]
struct ForeignSink {
    tokens: Vec<Token>,
}

impl TokenSink for ForeignSink {
    fn process_token(&mut self, token: Token) -> SinkResult {
        self.tokens.push(token);
        SinkResult::Continue
    }

    fn adjusted_current_node_is_foreign(&self) -> bool {
        true
    }
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_empty_input_is_just_eof() {
    let tokens = tokenize("");
    assert_eq!(tokens, vec![Token::EndOfFile]);
}

#[test]
fn test_newlines_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(text_of(&tokens), "a\nb\nc");
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(public_identifier.is_none());
            assert!(system_identifier.is_none());
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
    );
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_missing_name_forces_quirks() {
    let (tokens, issues) = tokenize_with_issues("<!DOCTYPE>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            name: None,
            force_quirks: true,
            ..
        }
    ));
    assert!(has_issue(&issues, "missing-doctype-name"));
}

#[test]
fn test_doctype_eof_forces_quirks() {
    let (tokens, issues) = tokenize_with_issues("<!DOCTYPE html PUBLIC \"abc");
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            force_quirks: true,
            ..
        }
    ));
    assert!(matches!(tokens[1], Token::EndOfFile));
    assert!(has_issue(&issues, "eof-in-doctype"));
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_and_attribute_names_lowercased() {
    let tokens = tokenize("<DIV Class=Main>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "Main");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::EndTag { name, .. } if name == "div"));
}

#[test]
fn test_end_tag_with_attributes_is_reported() {
    let (tokens, issues) = tokenize_with_issues("</div class=x>");
    assert!(tokens[0].is_end_tag("div"));
    assert!(has_issue(&issues, "end-tag-with-attributes"));
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::Comment { data } if data == " hello "));
}

#[test]
fn test_abrupt_empty_comment() {
    let (tokens, issues) = tokenize_with_issues("<!-->");
    assert!(matches!(&tokens[0], Token::Comment { data } if data.is_empty()));
    assert!(has_issue(&issues, "abrupt-closing-of-empty-comment"));
}

#[test]
fn test_processing_instruction_becomes_bogus_comment() {
    let (tokens, issues) = tokenize_with_issues("<?xml version?>");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "?xml version?"));
    assert!(has_issue(&issues, "unexpected-question-mark-instead-of-tag-name"));
}

#[test]
fn test_cdata_outside_foreign_content_is_a_comment() {
    let (tokens, issues) = tokenize_with_issues("<![CDATA[a<b]]>");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "[CDATA[a<b]]"));
    assert!(has_issue(&issues, "cdata-in-html-content"));
}

#[test]
fn test_cdata_in_foreign_content() {
    let mut tokenizer =
        HTMLTokenizer::new(StrInput::new("<![CDATA[a<b]]>c"), ForeignSink::default());
    let _ = tokenizer.run();
    let tokens = tokenizer.into_sink().tokens;
    assert_eq!(text_of(&tokens), "a<bc");
    assert!(tokenizer_issues_empty("<![CDATA[x]]>"));
}

fn tokenizer_issues_empty(input: &str) -> bool {
    let mut tokenizer = HTMLTokenizer::new(StrInput::new(input), ForeignSink::default());
    let _ = tokenizer.run();
    tokenizer.issues().is_empty()
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="foo">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "foo");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    assert_eq!(tokens[0].attribute("class"), Some("bar"));
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=baz>");
    assert_eq!(tokens[0].attribute("class"), Some("baz"));
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    assert_eq!(tokens[0].attribute("disabled"), Some(""));
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<a href="/x" id=top title='t'>"#);
    let names: Vec<&str> = tokens[0]
        .attributes()
        .iter()
        .map(|attr| attr.name.as_str())
        .collect();
    assert_eq!(names, vec!["href", "id", "title"]);
}

#[test]
fn test_duplicate_attribute_first_wins() {
    let (tokens, issues) = tokenize_with_issues("<div id=a class=x id=b>");
    let attributes = tokens[0].attributes();
    assert_eq!(attributes.len(), 2);
    assert_eq!(tokens[0].attribute("id"), Some("a"));
    assert!(has_issue(&issues, "duplicate-attribute"));
}

#[test]
fn test_null_in_data_is_passed_through() {
    let (tokens, issues) = tokenize_with_issues("a\0b");
    assert!(matches!(tokens[1], Token::Character { data: '\0' }));
    assert!(has_issue(&issues, "unexpected-null-character"));
}

#[test]
fn test_lone_less_than_is_text() {
    let (tokens, issues) = tokenize_with_issues("a < b");
    assert_eq!(text_of(&tokens), "a < b");
    assert!(has_issue(&issues, "invalid-first-character-of-tag-name"));
}

#[test]
fn test_less_than_before_digit_reconsumed() {
    let tokens = tokenize("<1");
    assert!(matches!(tokens[0], Token::Character { data: '<' }));
    assert!(matches!(tokens[1], Token::Character { data: '1' }));
    assert!(tokens[2].is_eof());
}

#[test]
fn test_null_in_doctype_name_replaced() {
    let (tokens, issues) = tokenize_with_issues("<!DOCTYPE h\0tml>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype { name: Some(name), .. } if name == "h\u{FFFD}tml"
    ));
    assert!(has_issue(&issues, "unexpected-null-character"));
}

#[test]
fn test_missing_end_tag_name_is_dropped() {
    let (tokens, issues) = tokenize_with_issues("a</>b");
    assert_eq!(tokens.len(), 3);
    assert_eq!(text_of(&tokens), "ab");
    assert!(has_issue(&issues, "missing-end-tag-name"));
}

#[test]
fn test_eof_in_tag_drops_tag() {
    let (tokens, issues) = tokenize_with_issues("<div class=");
    assert_eq!(tokens, vec![Token::EndOfFile]);
    assert!(has_issue(&issues, "eof-in-tag"));
}

#[test]
fn test_title_element_rcdata() {
    let tokens = tokenize_switching(
        "<title>a<b>&amp;</title>",
        "title",
        TokenizerState::Rcdata,
    );
    assert!(tokens[0].is_start_tag("title"));
    assert_eq!(text_of(&tokens), "a<b>&");
    assert!(tokens.iter().any(|token| token.is_end_tag("title")));
}

#[test]
fn test_rcdata_wrong_end_tag_is_text() {
    let tokens = tokenize_switching(
        "<textarea></div></textarea>",
        "textarea",
        TokenizerState::Rcdata,
    );
    assert_eq!(text_of(&tokens), "</div>");
}

#[test]
fn test_style_element_rawtext() {
    let tokens = tokenize_switching(
        "<style>p > a { content: '&amp;' }</style>",
        "style",
        TokenizerState::Rawtext,
    );
    assert_eq!(text_of(&tokens), "p > a { content: '&amp;' }");
    assert!(tokens.iter().any(|token| token.is_end_tag("style")));
}

#[test]
fn test_script_data_keeps_fake_tags() {
    let tokens = tokenize_switching(
        "<script>if (a<b) { x = '</b>'; }</script>",
        "script",
        TokenizerState::ScriptData,
    );
    assert_eq!(text_of(&tokens), "if (a<b) { x = '</b>'; }");
}

#[test]
fn test_script_double_escaped() {
    let tokens = tokenize_switching(
        "<script><!--<script></script>--></script>",
        "script",
        TokenizerState::ScriptData,
    );
    assert_eq!(text_of(&tokens), "<!--<script></script>-->");
    let end_tags = tokens.iter().filter(|token| token.is_end_tag("script")).count();
    assert_eq!(end_tags, 1);
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_switching(
        "<plaintext></plaintext><b>",
        "plaintext",
        TokenizerState::Plaintext,
    );
    assert_eq!(text_of(&tokens), "</plaintext><b>");
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test_case("&amp;", "&" ; "named with semicolon")]
#[test_case("&lt;&gt;", "<>" ; "adjacent references")]
#[test_case("&amp", "&" ; "legacy without semicolon")]
#[test_case("&notit;", "\u{AC}it;" ; "longest legacy prefix")]
#[test_case("&notin;", "\u{2209}" ; "longest full match")]
#[test_case("&#65;", "A" ; "decimal")]
#[test_case("&#x41;", "A" ; "hexadecimal")]
#[test_case("&#X6a;", "j" ; "uppercase x")]
#[test_case("&#0;", "\u{FFFD}" ; "null reference")]
#[test_case("&#x80;", "\u{20AC}" ; "windows 1252 remap")]
#[test_case("&#xD800;", "\u{FFFD}" ; "surrogate")]
#[test_case("&#x110000;", "\u{FFFD}" ; "out of range")]
#[test_case("& x", "& x" ; "bare ampersand")]
#[test_case("&#;", "&#;" ; "no digits")]
#[test_case("&foo;", "&foo;" ; "unknown name")]
fn test_character_references_in_text(input: &str, expected: &str) {
    assert_eq!(text_of(&tokenize(input)), expected);
}

#[test_case("&#0;", "null-character-reference")]
#[test_case("&#x80;", "control-character-reference")]
#[test_case("&#xD800;", "surrogate-character-reference")]
#[test_case("&#x110000;", "character-reference-outside-unicode-range")]
#[test_case("&#;", "absence-of-digits-in-numeric-character-reference")]
#[test_case("&amp", "missing-semicolon-after-character-reference")]
#[test_case("&foo;", "unknown-named-character-reference")]
fn test_character_reference_errors(input: &str, code: &str) {
    let (_, issues) = tokenize_with_issues(input);
    assert!(has_issue(&issues, code), "expected {code} in {issues:?}");
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a title="&copy; &lt;">"#);
    assert_eq!(tokens[0].attribute("title"), Some("\u{A9} <"));
}

#[test]
fn test_legacy_reference_in_attribute_not_decoded_before_equals() {
    let tokens = tokenize(r#"<a href="?a=1&copy=2&amp=3">"#);
    assert_eq!(tokens[0].attribute("href"), Some("?a=1&copy=2&amp=3"));
}

#[test]
fn test_set_lexical_state_directly() {
    let mut tokenizer = HTMLTokenizer::new(StrInput::new("<b>x"), Vec::new());
    tokenizer.set_lexical_state(TokenizerState::Rawtext);
    assert_eq!(tokenizer.state(), TokenizerState::Rawtext);
    let _ = tokenizer.run();
    assert_eq!(text_of(&tokenizer.into_sink()), "<b>x");
}

/// A sink that stops after the first start tag.
struct StopAfterFirstTag(Vec<Token>);

impl TokenSink for StopAfterFirstTag {
    fn process_token(&mut self, token: Token) -> SinkResult {
        let stop = matches!(token, Token::StartTag { .. });
        self.0.push(token);
        if stop {
            SinkResult::Stop
        } else {
            SinkResult::Continue
        }
    }
}

#[test]
fn test_sink_can_stop_the_run() {
    let mut tokenizer = HTMLTokenizer::new(StrInput::new("a<p>b<p>c"), StopAfterFirstTag(Vec::new()));
    let result = tokenizer.run();
    assert_eq!(result, weft_html::tokenizer::TokenizerResult::Stopped);
    let tokens = tokenizer.into_sink().0;
    assert_eq!(tokens.len(), 2);
}
