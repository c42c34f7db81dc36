//! Running a whole parse.
//!
//! [§ 13.2 Parsing HTML documents](https://html.spec.whatwg.org/multipage/parsing.html#parsing)

use std::fmt::Write as _;

use log::debug;
use weft_dom::{DomTree, Namespace, Node, NodeId, NodeType, TreeSink};

use crate::config::ParserOptions;
use crate::error::ParseIssue;
use crate::input::{InputSource, StrInput};
use crate::tokenizer::{HTMLTokenizer, TokenizerResult};
use crate::tree_builder::HTMLTreeBuilder;

/// The document a parse built, plus what went wrong along the way.
#[derive(Debug)]
pub struct ParseOutput<S> {
    /// The sink, now holding the document.
    pub document: S,
    /// Tokenizer issues first, then tree construction issues. Empty when
    /// [`ParserOptions::collect_issues`] is off.
    pub issues: Vec<ParseIssue>,
}

/// Parse `input` into `document` with the default options.
///
/// The tokenizer runs until the tree builder stops it (or input runs out),
/// then the document is handed back.
pub fn parse<S: TreeSink, I: InputSource>(document: S, input: I) -> S {
    parse_with_options(document, input, &ParserOptions::default()).document
}

/// Parse `input` into `document`, collecting parse issues.
pub fn parse_with_options<S: TreeSink, I: InputSource>(
    document: S,
    input: I,
    options: &ParserOptions,
) -> ParseOutput<S> {
    let builder = HTMLTreeBuilder::new(document, *options);
    let mut tokenizer = HTMLTokenizer::new(input, builder);
    let result = tokenizer.run();

    let (builder, mut issues) = tokenizer.into_parts();
    let (document, tree_issues) = builder.into_parts();
    debug!(
        "parse finished ({}): {} tokenizer and {} tree construction issues",
        match result {
            TokenizerResult::Done => "end of input",
            TokenizerResult::Stopped => "stopped",
        },
        issues.len(),
        tree_issues.len()
    );

    if options.collect_issues {
        issues.extend(tree_issues);
    } else {
        issues.clear();
    }
    ParseOutput { document, issues }
}

/// Parse a string into a fresh [`DomTree`].
#[must_use]
pub fn parse_document(html: &str) -> DomTree {
    parse(DomTree::new(), StrInput::new(html))
}

/// Render the subtree at `id` as an indented outline, one node per line.
///
/// Text is quoted with newlines escaped; elements outside the HTML namespace
/// carry their namespace as a prefix (`svg path`).
#[must_use]
pub fn tree_to_string(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

/// Print the subtree at `id` to standard output, starting at `depth`.
pub fn print_tree(tree: &DomTree, id: NodeId, depth: usize) {
    let mut out = String::new();
    write_node(tree, id, depth, &mut out);
    print!("{out}");
}

fn write_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let mut pending = vec![(id, depth)];
    while let Some((id, depth)) = pending.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        write_line(node, depth, out);
        // Reversed so the first child is written first.
        pending.extend(tree.children(id).iter().rev().map(|&child| (child, depth + 1)));
    }
}

fn write_line(node: &Node, depth: usize, out: &mut String) {
    let prefix = "  ".repeat(depth);
    // Writing into a String cannot fail.
    let _ = match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}#document"),
        NodeType::Doctype(doctype) => {
            if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
                writeln!(out, "{prefix}<!DOCTYPE {}>", doctype.name)
            } else {
                writeln!(
                    out,
                    "{prefix}<!DOCTYPE {} \"{}\" \"{}\">",
                    doctype.name, doctype.public_id, doctype.system_id
                )
            }
        }
        NodeType::Element(element) => {
            let namespace = match element.namespace {
                Namespace::Html => String::new(),
                other => format!("{other} "),
            };
            let mut line = format!("{prefix}<{namespace}{}", element.tag_name);
            for attr in &element.attrs {
                let _ = write!(line, " {}=\"{}\"", attr.name, attr.value);
            }
            writeln!(out, "{line}>")
        }
        NodeType::Text(text) => writeln!(out, "{prefix}\"{}\"", text.replace('\n', "\\n")),
        NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->"),
    };
}
