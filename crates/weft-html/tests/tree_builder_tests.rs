//! Tests that drive the tree builder with tokens directly.

use test_case::test_case;
use weft_dom::{DomTree, NodeId};
use weft_html::tokenizer::{SinkResult, TokenSink};
use weft_html::{
    Attribute, HTMLTreeBuilder, InsertionMode, ParserOptions, Token, TokenizerState,
};

fn builder() -> HTMLTreeBuilder<DomTree> {
    HTMLTreeBuilder::new(DomTree::new(), ParserOptions::default())
}

fn feed(builder: &mut HTMLTreeBuilder<DomTree>, tokens: Vec<Token>) -> Vec<SinkResult> {
    tokens
        .into_iter()
        .map(|token| builder.process_token(token))
        .collect()
}

fn chars(text: &str) -> Vec<Token> {
    text.chars().map(|data| Token::Character { data }).collect()
}

fn doctype(name: &str) -> Token {
    Token::Doctype {
        name: Some(name.to_string()),
        public_identifier: None,
        system_identifier: None,
        force_quirks: false,
    }
}

#[test]
fn test_modes_through_document_skeleton() {
    let mut builder = builder();
    assert_eq!(builder.insertion_mode(), InsertionMode::Initial);

    let _ = builder.process_token(doctype("html"));
    assert_eq!(builder.insertion_mode(), InsertionMode::BeforeHtml);

    let _ = builder.process_token(Token::start_tag("html"));
    assert_eq!(builder.insertion_mode(), InsertionMode::BeforeHead);

    let _ = builder.process_token(Token::start_tag("head"));
    assert_eq!(builder.insertion_mode(), InsertionMode::InHead);

    let _ = builder.process_token(Token::end_tag("head"));
    assert_eq!(builder.insertion_mode(), InsertionMode::AfterHead);

    let _ = builder.process_token(Token::start_tag("body"));
    assert_eq!(builder.insertion_mode(), InsertionMode::InBody);

    let _ = builder.process_token(Token::end_tag("body"));
    assert_eq!(builder.insertion_mode(), InsertionMode::AfterBody);

    let _ = builder.process_token(Token::end_tag("html"));
    assert_eq!(builder.insertion_mode(), InsertionMode::AfterAfterBody);

    assert!(builder.issues().is_empty(), "{:?}", builder.issues());
}

#[test]
fn test_table_modes() {
    let mut builder = builder();
    let _ = feed(
        &mut builder,
        vec![doctype("html"), Token::start_tag("table")],
    );
    assert_eq!(builder.insertion_mode(), InsertionMode::InTable);

    let _ = builder.process_token(Token::start_tag("tr"));
    assert_eq!(builder.insertion_mode(), InsertionMode::InRow);

    let _ = builder.process_token(Token::start_tag("td"));
    assert_eq!(builder.insertion_mode(), InsertionMode::InCell);

    let _ = builder.process_token(Token::end_tag("td"));
    assert_eq!(builder.insertion_mode(), InsertionMode::InRow);

    let _ = builder.process_token(Token::end_tag("table"));
    assert_eq!(builder.insertion_mode(), InsertionMode::InBody);
}

#[test]
fn test_table_text_mode_returns_to_table() {
    let mut builder = builder();
    let _ = feed(&mut builder, vec![doctype("html"), Token::start_tag("table")]);

    let _ = builder.process_token(Token::Character { data: ' ' });
    assert_eq!(builder.insertion_mode(), InsertionMode::InTableText);

    let _ = builder.process_token(Token::start_tag("caption"));
    assert_eq!(builder.insertion_mode(), InsertionMode::InCaption);
}

#[test_case("title", TokenizerState::Rcdata ; "title")]
#[test_case("textarea", TokenizerState::Rcdata ; "textarea")]
#[test_case("style", TokenizerState::Rawtext ; "style")]
#[test_case("xmp", TokenizerState::Rawtext ; "xmp")]
#[test_case("iframe", TokenizerState::Rawtext ; "iframe")]
#[test_case("noembed", TokenizerState::Rawtext ; "noembed")]
#[test_case("noframes", TokenizerState::Rawtext ; "noframes")]
#[test_case("script", TokenizerState::ScriptData ; "script")]
#[test_case("plaintext", TokenizerState::Plaintext ; "plaintext")]
fn test_text_elements_switch_lexical_state(tag: &str, expected: TokenizerState) {
    let mut builder = builder();
    let result = builder.process_token(Token::start_tag(tag));
    assert_eq!(result, SinkResult::SwitchLexicalState(expected));
}

#[test]
fn test_text_mode_returns_to_original_mode() {
    let mut builder = builder();
    let _ = builder.process_token(Token::start_tag("title"));
    assert_eq!(builder.insertion_mode(), InsertionMode::Text);

    let _ = feed(&mut builder, chars("Hi"));
    let _ = builder.process_token(Token::end_tag("title"));
    assert_eq!(builder.insertion_mode(), InsertionMode::InHead);
}

#[test]
fn test_noscript_depends_on_scripting() {
    let mut without = builder();
    let result = without.process_token(Token::start_tag("noscript"));
    assert_eq!(result, SinkResult::Continue);
    assert_eq!(without.insertion_mode(), InsertionMode::InHeadNoscript);

    let options = ParserOptions {
        scripting: true,
        ..ParserOptions::default()
    };
    let mut with = HTMLTreeBuilder::new(DomTree::new(), options);
    let result = with.process_token(Token::start_tag("noscript"));
    assert_eq!(
        result,
        SinkResult::SwitchLexicalState(TokenizerState::Rawtext)
    );
}

#[test]
fn test_ordinary_tags_continue() {
    let mut builder = builder();
    let results = feed(
        &mut builder,
        vec![Token::start_tag("div"), Token::Character { data: 'x' }, Token::end_tag("div")],
    );
    assert!(results.iter().all(|result| *result == SinkResult::Continue));
}

#[test]
fn test_eof_stops_parsing() {
    let mut builder = builder();
    let _ = builder.process_token(Token::start_tag("p"));
    assert!(!builder.is_stopped());

    let result = builder.process_token(Token::EndOfFile);
    assert_eq!(result, SinkResult::Continue);
    assert!(builder.is_stopped());

    // Anything after the end is refused.
    let result = builder.process_token(Token::start_tag("p"));
    assert_eq!(result, SinkResult::Stop);
}

#[test]
fn test_foreign_content_is_reported() {
    let mut builder = builder();
    let _ = builder.process_token(Token::start_tag("p"));
    assert!(!builder.adjusted_current_node_is_foreign());

    let _ = builder.process_token(Token::start_tag("svg"));
    assert!(builder.adjusted_current_node_is_foreign());

    let _ = builder.process_token(Token::end_tag("svg"));
    assert!(!builder.adjusted_current_node_is_foreign());
}

#[test]
fn test_tokens_build_same_tree_as_markup() {
    let mut builder = builder();
    let mut tokens = vec![
        doctype("html"),
        Token::StartTag {
            name: "a".to_string(),
            self_closing: false,
            attributes: vec![Attribute::new("href".to_string(), "/x".to_string())],
        },
    ];
    tokens.extend(chars("link"));
    tokens.push(Token::end_tag("a"));
    tokens.push(Token::EndOfFile);
    let _ = feed(&mut builder, tokens);

    let (tree, issues) = builder.into_parts();
    assert!(issues.is_empty(), "{issues:?}");
    assert_eq!(
        weft_html::tree_to_string(&tree, NodeId::ROOT),
        weft_html::tree_to_string(
            &weft_html::parse_document("<!DOCTYPE html><a href=/x>link</a>"),
            NodeId::ROOT
        )
    );
}

#[test]
fn test_self_closing_non_void_is_an_error() {
    let mut builder = builder();
    let _ = feed(&mut builder, vec![doctype("html")]);
    let _ = builder.process_token(Token::StartTag {
        name: "div".to_string(),
        self_closing: true,
        attributes: Vec::new(),
    });
    assert!(
        builder
            .issues()
            .iter()
            .any(|issue| issue.message == "non-void-html-element-start-tag-with-trailing-solidus")
    );

    let mut builder = self::builder();
    let _ = feed(&mut builder, vec![doctype("html")]);
    let _ = builder.process_token(Token::StartTag {
        name: "br".to_string(),
        self_closing: true,
        attributes: Vec::new(),
    });
    assert!(builder.issues().is_empty(), "{:?}", builder.issues());
}

#[test]
fn test_skeleton_tokens_match_markup() {
    let mut builder = builder();
    let _ = feed(
        &mut builder,
        vec![
            Token::start_tag("html"),
            Token::start_tag("head"),
            Token::end_tag("head"),
            Token::start_tag("body"),
            Token::EndOfFile,
        ],
    );
    assert!(builder.is_stopped());

    let (tree, _) = builder.into_parts();
    let expected = weft_html::parse_document("<html><head></head><body>");
    assert_eq!(
        weft_html::tree_to_string(&tree, NodeId::ROOT),
        weft_html::tree_to_string(&expected, NodeId::ROOT)
    );
}

#[test]
fn test_doctype_only_document() {
    let tree = weft_html::parse_document("<!DOCTYPE html>");
    let children = tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.doctype(), Some(children[0]));
    assert_eq!(tree.document_element(), Some(children[1]));
}

#[test]
fn test_state_and_error_names_are_kebab_case() {
    assert_eq!(TokenizerState::ScriptData.to_string(), "script-data");
    assert_eq!(InsertionMode::InTableText.to_string(), "in-table-text");
    assert_eq!(
        weft_html::ParseErrorKind::AbruptClosingOfEmptyComment.to_string(),
        "abrupt-closing-of-empty-comment"
    );
}
