//! Tests for DOM tree mutation and the tree-construction sink.

use weft_dom::{Attribute, DomTree, Namespace, NodeId, NodeType, QuirksMode, TreeSink};

/// Helper to create a detached HTML element through the sink.
fn element(tree: &mut DomTree, tag: &str) -> NodeId {
    TreeSink::create_element(tree, Namespace::Html, tag, Vec::new())
}

fn names(tree: &DomTree, parent: NodeId) -> Vec<String> {
    tree.children(parent)
        .iter()
        .map(|&id| match tree.as_element(id) {
            Some(data) => data.tag_name.clone(),
            None => tree.as_text(id).unwrap_or("?").to_string(),
        })
        .collect()
}

// ========== remove ==========

#[test]
fn test_remove_middle_child_relinks_siblings() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let a = element(&mut tree, "a");
    let b = element(&mut tree, "b");
    let c = element(&mut tree, "c");
    for child in [a, b, c] {
        tree.append_child(parent, child);
    }

    tree.remove_child(parent, b);

    assert_eq!(names(&tree, parent), ["a", "c"]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_from_parent_on_detached_node_is_noop() {
    let mut tree = DomTree::new();
    let lonely = element(&mut tree, "p");
    tree.remove_from_parent(lonely);
    assert_eq!(tree.parent(lonely), None);
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "table");
    let tr = element(&mut tree, "tr");
    tree.append_child(parent, tr);

    let fostered = element(&mut tree, "p");
    TreeSink::insert_before(&mut tree, parent, fostered, tr);

    assert_eq!(names(&tree, parent), ["p", "tr"]);
    assert_eq!(tree.prev_sibling(tr), Some(fostered));
    assert_eq!(tree.parent(fostered), Some(parent));
}

#[test]
fn test_append_moves_node_between_parents() {
    let mut tree = DomTree::new();
    let first = element(&mut tree, "div");
    let second = element(&mut tree, "section");
    let child = element(&mut tree, "span");
    tree.append_child(first, child);
    tree.append_child(second, child);

    assert!(tree.children(first).is_empty());
    assert_eq!(tree.children(second), [child]);
}

// ========== reparent ==========

#[test]
fn test_reparent_children_appends_in_order() {
    let mut tree = DomTree::new();
    let from = element(&mut tree, "b");
    let to = element(&mut tree, "i");
    let existing = element(&mut tree, "em");
    tree.append_child(to, existing);
    let x = element(&mut tree, "x");
    let y = element(&mut tree, "y");
    tree.append_child(from, x);
    tree.append_child(from, y);

    tree.reparent_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(names(&tree, to), ["em", "x", "y"]);
    assert_eq!(tree.parent(y), Some(to));
    assert_eq!(tree.prev_sibling(x), Some(existing));
}

// ========== text ==========

#[test]
fn test_insert_text_merges_with_previous_text() {
    let mut tree = DomTree::new();
    let p = element(&mut tree, "p");
    TreeSink::insert_text(&mut tree, p, None, "Hel");
    TreeSink::insert_text(&mut tree, p, None, "lo");

    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.text_content(p), "Hello");
}

#[test]
fn test_insert_text_before_reference_merges_with_preceding_text() {
    let mut tree = DomTree::new();
    let body = element(&mut tree, "body");
    TreeSink::insert_text(&mut tree, body, None, "a");
    let table = element(&mut tree, "table");
    tree.append_child(body, table);

    TreeSink::insert_text(&mut tree, body, Some(table), "b");

    assert_eq!(names(&tree, body), ["ab", "table"]);
}

// ========== sink accessors ==========

#[test]
fn test_document_element_and_doctype() {
    let mut tree = DomTree::new();
    assert_eq!(TreeSink::document_element(&tree), None);

    let doctype = tree.create_doctype("html", "", "");
    tree.append_child(NodeId::ROOT, doctype);
    let html = element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);

    assert_eq!(TreeSink::doctype(&tree), Some(doctype));
    assert_eq!(TreeSink::document_element(&tree), Some(html));
    assert!(matches!(
        tree.get(doctype).map(|n| &n.node_type),
        Some(NodeType::Doctype(data)) if data.name == "html"
    ));
}

#[test]
fn test_add_attributes_keeps_existing_values() {
    let mut tree = DomTree::new();
    let body = TreeSink::create_element(
        &mut tree,
        Namespace::Html,
        "body",
        vec![Attribute::new("class".into(), "a".into())],
    );
    tree.add_attributes_if_missing(
        body,
        vec![
            Attribute::new("class".into(), "b".into()),
            Attribute::new("id".into(), "main".into()),
        ],
    );

    assert_eq!(tree.attribute(body, "class"), Some("a"));
    assert_eq!(tree.attribute(body, "id"), Some("main"));
}

#[test]
fn test_quirks_mode_and_namespace() {
    let mut tree = DomTree::new();
    TreeSink::set_quirks_mode(&mut tree, QuirksMode::Quirks);
    assert_eq!(tree.quirks_mode(), QuirksMode::Quirks);

    let svg = TreeSink::create_element(&mut tree, Namespace::Svg, "svg", Vec::new());
    assert_eq!(tree.element_namespace(svg), Some(Namespace::Svg));
    assert_eq!(Namespace::Svg.url(), "http://www.w3.org/2000/svg");
    assert_eq!(Namespace::MathMl.to_string(), "mathml");
}

// ========== traversal ==========

#[test]
fn test_ancestors_walk_to_document() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let body = element(&mut tree, "body");
    tree.append_child(html, body);
    let p = element(&mut tree, "p");
    tree.append_child(body, p);

    let chain: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(chain, [body, html, NodeId::ROOT]);
    assert_eq!(tree.first_child(html), Some(body));
    assert_eq!(tree.last_child(body), Some(p));
}

#[test]
fn test_element_lookup_helpers() {
    let mut tree = DomTree::new();
    assert!(!tree.is_empty());
    let before = tree.len();

    let div = TreeSink::create_element(
        &mut tree,
        Namespace::Html,
        "div",
        vec![Attribute::new("id".to_string(), "main".to_string())],
    );
    assert_eq!(tree.len(), before + 1);

    let data = tree.as_element(div).expect("element");
    assert_eq!(data.id(), Some("main"));
    assert!(data.is_html("div"));

    if let Some(node) = tree.get_mut(div)
        && let NodeType::Element(data) = &mut node.node_type
    {
        data.tag_name = "section".to_string();
    }
    assert_eq!(names(&tree, div), Vec::<String>::new());
    assert!(tree.as_element(div).is_some_and(|data| data.is_html("section")));
}

#[test]
fn test_doctype_identifiers() {
    let mut tree = DomTree::new();
    let doctype = tree.create_doctype("html", "-//W3C//DTD HTML 4.01//EN", "");
    let data = tree.as_doctype(doctype).expect("doctype");
    assert_eq!(data.public_id, "-//W3C//DTD HTML 4.01//EN");
    assert!(data.system_id.is_empty());
    assert!(tree.as_doctype(NodeId::ROOT).is_none());
}

#[test]
fn test_text_content_of_deep_chain() {
    let mut tree = DomTree::new();
    let mut parent = NodeId::ROOT;
    for _ in 0..100_000 {
        let child = element(&mut tree, "span");
        tree.append_child(parent, child);
        parent = child;
    }
    tree.insert_text(parent, None, "deep");
    assert_eq!(tree.text_content(NodeId::ROOT), "deep");
}
