//! Foreign content: SVG and MathML subtrees.
//!
//! [§ 13.2.6.3 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)

pub mod mathml;
pub mod svg;

pub use mathml::adjust_mathml_attributes;
pub use svg::{adjust_svg_attributes, adjusted_svg_tag_name};

use weft_dom::{Attribute, Namespace, TreeSink};

use super::core::{HTMLTreeBuilder, is_whitespace};
use crate::tokenizer::Token;

/// [§ 13.2.6.3 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// "if any of the attributes on the token match the strings given in the
/// first column of the following table, let the attribute be a namespaced
/// attribute, with the prefix being the string given in the corresponding
/// cell in the second column, the local name being the string given in the
/// corresponding cell in the third column, and the namespace being the
/// namespace given in the corresponding cell in the fourth column."
///
/// Names stay in their qualified form; only the namespace is attached.
const FOREIGN_ATTRIBUTES: &[(&str, Namespace)] = &[
    ("xlink:actuate", Namespace::XLink),
    ("xlink:arcrole", Namespace::XLink),
    ("xlink:href", Namespace::XLink),
    ("xlink:role", Namespace::XLink),
    ("xlink:show", Namespace::XLink),
    ("xlink:title", Namespace::XLink),
    ("xlink:type", Namespace::XLink),
    ("xml:lang", Namespace::Xml),
    ("xml:space", Namespace::Xml),
    ("xmlns", Namespace::XmlNs),
    ("xmlns:xlink", Namespace::XmlNs),
];

/// Attach namespaces to the xlink, xml and xmlns attributes of a foreign
/// element's start tag.
pub fn adjust_foreign_attributes(attributes: &mut [Attribute]) {
    for attr in attributes {
        if let Some((_, namespace)) = FOREIGN_ATTRIBUTES
            .iter()
            .find(|(name, _)| *name == attr.name)
        {
            attr.namespace = Some(*namespace);
        }
    }
}

/// HTML start tags that break out of foreign content.
const BREAKOUT_START_TAGS: &[&str] = &[
    "b", "big", "blockquote", "body", "br", "center", "code", "dd", "div", "dl", "dt", "em",
    "embed", "h1", "h2", "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing",
    "menu", "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span", "strong",
    "strike", "sub", "sup", "table", "tt", "u", "ul", "var",
];

/// "A start tag whose tag name is "font", if the token has any attributes
/// named "color", "face", or "size"", one of the breakout tags, or "An end
/// tag whose tag name is "br", "p"".
fn is_breakout(token: &Token) -> bool {
    match token {
        Token::StartTag { name, .. } if name == "font" => token
            .attributes()
            .iter()
            .any(|attr| matches!(attr.name.as_str(), "color" | "face" | "size")),
        Token::StartTag { name, .. } => BREAKOUT_START_TAGS.contains(&name.as_str()),
        Token::EndTag { name, .. } => matches!(name.as_str(), "br" | "p"),
        _ => false,
    }
}

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(super) fn process_in_foreign_content(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Insert a U+FFFD REPLACEMENT CHARACTER character."
            Token::Character { data: '\0' } => {
                self.unexpected(token);
                self.insert_character('\u{FFFD}');
            }

            Token::Character { data } if is_whitespace(*data) => self.insert_character(*data),

            // "Any other character token"
            // "Insert the token's character. Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.insert_character(*data);
                self.frameset_ok = false;
            }

            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),

            // "Parse error. While the current node is not a MathML text
            // integration point, an HTML integration point, or an element in the
            // HTML namespace, pop elements from the stack of open elements.
            // Reprocess the token according to the rules given in the section
            // corresponding to the current insertion mode in HTML content."
            _ if is_breakout(token) => {
                self.unexpected(token);
                while let Some(node) = self.current_node() {
                    if self.namespace_of(node) == Namespace::Html
                        || self.is_mathml_text_integration_point(node)
                        || self.is_html_integration_point(node)
                    {
                        break;
                    }
                    self.pop_current_node();
                }
                self.reprocess(token);
            }

            Token::StartTag { .. } => self.foreign_start_tag(token),

            // "An end tag whose tag name is "script", if the current node is an
            // SVG script element"
            // "Pop the current node off the stack of open elements."
            Token::EndTag { name, .. }
                if name == "script"
                    && self.current_node().is_some_and(|node| {
                        self.namespace_of(node) == Namespace::Svg
                            && self.name_of(node) == "script"
                    }) =>
            {
                self.pop_current_node();
            }

            Token::EndTag { name, .. } => self.foreign_end_tag(name, token),

            // The dispatcher sends end-of-file through the HTML rules.
            Token::EndOfFile => self.reprocess(token),
        }
    }

    /// "Any other start tag"
    fn foreign_start_tag(&mut self, token: &Token) {
        let Some(node) = self.adjusted_current_node() else {
            return;
        };
        let namespace = self.namespace_of(node);

        let mut adjusted = token.clone();
        if let Token::StartTag {
            name, attributes, ..
        } = &mut adjusted
        {
            // "If the adjusted current node is an element in the MathML
            // namespace, adjust MathML attributes for the token."
            // "If the adjusted current node is an element in the SVG namespace,
            // and the token's tag name is one of the ones in the first column
            // of the following table, change the tag name... adjust SVG
            // attributes for the token."
            match namespace {
                Namespace::MathMl => adjust_mathml_attributes(attributes),
                Namespace::Svg => {
                    if let Some(fixed) = adjusted_svg_tag_name(name) {
                        fixed.clone_into(name);
                    }
                    adjust_svg_attributes(attributes);
                }
                _ => {}
            }
            // "Adjust foreign attributes for the token."
            adjust_foreign_attributes(attributes);
        }

        // "Insert a foreign element for the token, with adjusted current node's
        // namespace and false."
        // "If the token has its self-closing flag set, then run the appropriate
        // steps from the following list: If the token's tag name is "script",
        // and the new current node is in the SVG namespace, acknowledge the
        // token's self-closing flag, and then act as described in the steps for
        // a "script" end tag below. Otherwise, pop the current node off the
        // stack of open elements and acknowledge the token's self-closing flag."
        self.insert_foreign_start_tag(&adjusted, namespace);
    }

    /// "Any other end tag"
    fn foreign_end_tag(&mut self, name: &str, token: &Token) {
        let Some(mut index) = self.stack_of_open_elements.len().checked_sub(1) else {
            return;
        };

        // "If node's tag name, converted to ASCII lowercase, is not the same as
        // the tag name of the token, then this is a parse error."
        let first = self.stack_of_open_elements[index];
        if !self.name_of(first).eq_ignore_ascii_case(name) {
            self.unexpected(token);
        }

        loop {
            // "Loop: If node is the topmost element in the stack of open
            // elements, then return. (fragment case)"
            if index == 0 {
                return;
            }
            let node = self.stack_of_open_elements[index];
            // "If node's tag name, converted to ASCII lowercase, is the same as
            // the tag name of the token, pop elements from the stack of open
            // elements until node has been popped from the stack, and then
            // return."
            if self.name_of(node).eq_ignore_ascii_case(name) {
                self.pop_until_node(node);
                return;
            }
            // "Set node to the previous entry in the stack of open elements."
            index -= 1;
            // "If node is not an element in the HTML namespace, return to the
            // step labeled loop."
            // "Otherwise, process the token according to the rules given in the
            // section corresponding to the current insertion mode in HTML
            // content."
            if self.namespace_of(self.stack_of_open_elements[index]) == Namespace::Html {
                self.reprocess(token);
                return;
            }
        }
    }
}
