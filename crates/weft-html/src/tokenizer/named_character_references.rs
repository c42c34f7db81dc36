//! Named character reference lookup.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! Backed by the full 2,231-entry HTML entity table from the `entities` crate,
//! including the legacy names that match without a trailing semicolon.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use entities::ENTITIES;

/// Entity names (without the leading '&') to their replacement strings.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    ENTITIES
        .iter()
        .filter_map(|entity| {
            entity
                .entity
                .strip_prefix('&')
                .map(|name| (name, entity.characters))
        })
        .collect()
});

/// Every prefix of every entity name, so the longest-match scan can stop as
/// soon as no entity can match.
static ENTITY_PREFIXES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    NAMED_ENTITIES
        .keys()
        .flat_map(|name| name.char_indices().map(|(i, c)| &name[..i + c.len_utf8()]))
        .collect()
});

/// Length of the longest entity name, in characters.
pub static LONGEST_ENTITY_NAME: LazyLock<usize> =
    LazyLock::new(|| NAMED_ENTITIES.keys().map(|name| name.chars().count()).max().unwrap_or(0));

/// Look up a named character reference.
///
/// The `name` should NOT include the leading '&'.
///
/// # Example
/// ```
/// use weft_html::tokenizer::named_character_references::lookup_entity;
///
/// assert_eq!(lookup_entity("amp;"), Some("&"));
/// assert_eq!(lookup_entity("amp"), Some("&"));
/// assert_eq!(lookup_entity("xyz;"), None);
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Check if any entity name starts with the given prefix.
#[must_use]
pub fn any_entity_has_prefix(prefix: &str) -> bool {
    ENTITY_PREFIXES.contains(prefix)
}

/// Find the longest entity name at the start of `candidates`.
///
/// Returns the number of characters matched and the replacement text.
#[must_use]
pub fn longest_match(candidates: &[char]) -> Option<(usize, &'static str)> {
    let mut name = String::new();
    let mut best = None;
    for (index, &c) in candidates.iter().enumerate() {
        name.push(c);
        if !any_entity_has_prefix(&name) {
            break;
        }
        if let Some(replacement) = lookup_entity(&name) {
            best = Some((index + 1, replacement));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn multi_codepoint_entity() {
        assert_eq!(lookup_entity("fjlig;"), Some("fj"));
        assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{338}"));
    }

    #[test]
    fn prefixes_include_partial_names() {
        assert!(any_entity_has_prefix("no"));
        assert!(any_entity_has_prefix("notin"));
        assert!(!any_entity_has_prefix("zzz"));
    }

    #[test]
    fn longest_match_prefers_longer_name() {
        // "&notin;" must win over the legacy "&not".
        assert_eq!(longest_match(&chars("notin;x")), Some((6, "\u{2209}")));
        // "&notit;" is not an entity, so the legacy "&not" is the match.
        assert_eq!(longest_match(&chars("notit;")), Some((3, "\u{AC}")));
        assert_eq!(longest_match(&chars("zz;")), None);
    }

    #[test]
    fn longest_name_fits_lookahead() {
        assert_eq!(*LONGEST_ENTITY_NAME, "CounterClockwiseContourIntegral;".len());
    }
}
