//! Integration tests for named character reference lookup.

use test_case::test_case;
use weft_html::tokenizer::named_character_references::{
    any_entity_has_prefix, longest_match, lookup_entity,
};

#[test_case("amp;", "&")]
#[test_case("lt;", "<")]
#[test_case("gt;", ">")]
#[test_case("quot;", "\"")]
#[test_case("nbsp;", "\u{00A0}")]
#[test_case("Aacute;", "\u{00C1}")]
fn test_lookup_common_entities(name: &str, expected: &str) {
    assert_eq!(lookup_entity(name), Some(expected));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("copy"), Some("\u{00A9}"));
    // Only the legacy set is allowed to drop the semicolon
    assert_eq!(lookup_entity("hellip"), None);
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_prefix_matching() {
    assert!(any_entity_has_prefix("a")); // amp, apos, alpha, etc.
    assert!(any_entity_has_prefix("am")); // amp
    assert!(any_entity_has_prefix("amp")); // amp, amp;
    assert!(any_entity_has_prefix("amp;")); // amp;
    assert!(!any_entity_has_prefix("ampx")); // nothing
    assert!(!any_entity_has_prefix("xyz")); // nothing
}

#[test_case("amp;rest", Some(4) ; "full name with semicolon")]
#[test_case("ampx", Some(3) ; "legacy name followed by text")]
#[test_case("qqq", None ; "no match")]
fn test_longest_match_length(input: &str, expected: Option<usize>) {
    let chars: Vec<char> = input.chars().collect();
    assert_eq!(longest_match(&chars).map(|(length, _)| length), expected);
}
