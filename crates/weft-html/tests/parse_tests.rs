//! Integration tests for whole-document parsing.

use test_case::test_case;
use weft_dom::{DomTree, Namespace, NodeId, NodeType, QuirksMode};
use weft_html::tree_builder::quirks_mode_for_doctype;
use weft_html::{
    ParseStage, ParserOptions, StrInput, parse_document, parse_with_options, tree_to_string,
};

fn parse(html: &str) -> DomTree {
    parse_document(html)
}

/// First element named `tag`, depth-first.
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

fn find_all_elements(tree: &DomTree, from: NodeId, tag: &str) -> Vec<NodeId> {
    let mut found = Vec::new();
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        found.push(from);
    }
    for &child_id in tree.children(from) {
        found.extend(find_all_elements(tree, child_id, tag));
    }
    found
}

/// Tag names of the element children of `id`, in order.
fn element_children(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .filter_map(|&child| tree.as_element(child).map(|data| data.tag_name.clone()))
        .collect()
}

fn text_content(tree: &DomTree, id: NodeId) -> String {
    tree.text_content(id)
}

fn body(tree: &DomTree) -> NodeId {
    tree.body().expect("document has a body")
}

// =============================================================================
// Document structure
// =============================================================================

#[test]
fn test_empty_input_builds_skeleton() {
    let tree = parse("");
    let html = tree.document_element().expect("html element");
    assert_eq!(element_children(&tree, html), ["head", "body"]);
    assert!(tree.children(body(&tree)).is_empty());
}

#[test]
fn test_full_document_outline() {
    let tree = parse("<!DOCTYPE html><title>T</title><p class=x>Hi");
    assert_eq!(
        tree_to_string(&tree, NodeId::ROOT),
        "#document\n\
         \x20 <!DOCTYPE html>\n\
         \x20 <html>\n\
         \x20   <head>\n\
         \x20     <title>\n\
         \x20       \"T\"\n\
         \x20   <body>\n\
         \x20     <p class=\"x\">\n\
         \x20       \"Hi\"\n"
    );
}

#[test]
fn test_comment_before_html_goes_on_document() {
    let tree = parse("<!-- first --><!DOCTYPE html><p>x");
    let first = tree.children(NodeId::ROOT)[0];
    assert!(matches!(
        &tree.get(first).expect("node").node_type,
        NodeType::Comment(data) if data == " first "
    ));
}

#[test]
fn test_comment_after_html_goes_on_document() {
    let tree = parse("<p>x</p></body></html><!-- tail -->");
    let last = *tree.children(NodeId::ROOT).last().expect("children");
    assert!(matches!(
        &tree.get(last).expect("node").node_type,
        NodeType::Comment(data) if data == " tail "
    ));
}

#[test]
fn test_head_content_after_head_end() {
    let tree = parse("<!DOCTYPE html><head></head><meta charset=utf-8><body>x");
    let head = find_element(&tree, NodeId::ROOT, "head").expect("head");
    assert_eq!(element_children(&tree, head), ["meta"]);
}

#[test]
fn test_html_start_tag_merges_attributes() {
    let tree = parse("<html lang=en><body><html lang=fr class=x>");
    let html = tree.document_element().expect("html element");
    let data = tree.as_element(html).expect("element");
    assert_eq!(data.attribute("lang"), Some("en"));
    assert_eq!(data.attribute("class"), Some("x"));
}

#[test]
fn test_adjacent_text_is_merged() {
    let tree = parse("<p>a&amp;b</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").expect("p");
    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(text_content(&tree, p), "a&b");
}

// =============================================================================
// Quirks
// =============================================================================

#[test_case("<!DOCTYPE html>", QuirksMode::NoQuirks ; "html5 doctype")]
#[test_case("", QuirksMode::Quirks ; "missing doctype")]
#[test_case("<!DOCTYPE svg>", QuirksMode::Quirks ; "wrong name")]
#[test_case(
    r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#,
    QuirksMode::Quirks ;
    "transitional without system id"
)]
#[test_case(
    r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#,
    QuirksMode::LimitedQuirks ;
    "transitional with system id"
)]
#[test_case(
    r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "x">"#,
    QuirksMode::LimitedQuirks ;
    "xhtml transitional"
)]
#[test_case(
    r#"<!DOCTYPE html SYSTEM "about:legacy-compat">"#,
    QuirksMode::NoQuirks ;
    "legacy compat"
)]
fn test_document_quirks_mode(doctype: &str, expected: QuirksMode) {
    let tree = parse(&format!("{doctype}<p>x"));
    assert_eq!(tree.quirks_mode(), expected);
}

#[test]
fn test_quirks_mode_for_doctype_directly() {
    assert_eq!(
        quirks_mode_for_doctype(Some("html"), None, None, false),
        QuirksMode::NoQuirks
    );
    assert_eq!(
        quirks_mode_for_doctype(Some("html"), None, None, true),
        QuirksMode::Quirks
    );
    assert_eq!(
        quirks_mode_for_doctype(
            Some("html"),
            None,
            Some("http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd"),
            false
        ),
        QuirksMode::Quirks
    );
}

#[test]
fn test_table_closes_p_only_without_quirks() {
    let tree = parse("<!DOCTYPE html><p><table></table>");
    assert_eq!(element_children(&tree, body(&tree)), ["p", "table"]);

    let tree = parse("<p><table></table>");
    let p = find_element(&tree, NodeId::ROOT, "p").expect("p");
    assert_eq!(element_children(&tree, p), ["table"]);
}

// =============================================================================
// Text elements
// =============================================================================

#[test]
fn test_title_and_script_are_text_only() {
    let tree = parse("<title>a<b></title><script>if (a<b) {}</script>");
    let title = find_element(&tree, NodeId::ROOT, "title").expect("title");
    let script = find_element(&tree, NodeId::ROOT, "script").expect("script");
    assert_eq!(text_content(&tree, title), "a<b>");
    assert_eq!(text_content(&tree, script), "if (a<b) {}");
    assert!(find_element(&tree, NodeId::ROOT, "b").is_none());

    let head = find_element(&tree, NodeId::ROOT, "head").expect("head");
    assert_eq!(element_children(&tree, head), ["title", "script"]);
}

#[test]
fn test_style_is_raw_text() {
    let tree = parse("<style>p > a { color: red }</style>");
    let style = find_element(&tree, NodeId::ROOT, "style").expect("style");
    assert_eq!(text_content(&tree, style), "p > a { color: red }");
}

#[test]
fn test_textarea_drops_leading_newline() {
    let tree = parse("<textarea>\nabc&amp;</textarea>");
    let textarea = find_element(&tree, NodeId::ROOT, "textarea").expect("textarea");
    assert_eq!(text_content(&tree, textarea), "abc&");
}

#[test]
fn test_pre_drops_only_first_newline() {
    let tree = parse("<pre>\n\nx</pre>");
    let pre = find_element(&tree, NodeId::ROOT, "pre").expect("pre");
    assert_eq!(text_content(&tree, pre), "\nx");
}

#[test]
fn test_plaintext_swallows_rest_of_input() {
    let tree = parse("<plaintext><b>x</b></plaintext>");
    let plaintext = find_element(&tree, NodeId::ROOT, "plaintext").expect("plaintext");
    assert_eq!(text_content(&tree, plaintext), "<b>x</b></plaintext>");
}

#[test]
fn test_noscript_in_head_without_scripting() {
    let tree = parse("<head><noscript><link rel=x></noscript></head>");
    let noscript = find_element(&tree, NodeId::ROOT, "noscript").expect("noscript");
    assert_eq!(element_children(&tree, noscript), ["link"]);
}

#[test]
fn test_noscript_with_scripting_is_raw_text() {
    let options = ParserOptions {
        scripting: true,
        ..ParserOptions::default()
    };
    let output = parse_with_options(
        DomTree::new(),
        StrInput::new("<body><noscript><b>x</b></noscript>"),
        &options,
    );
    let tree = output.document;
    let noscript = find_element(&tree, NodeId::ROOT, "noscript").expect("noscript");
    assert_eq!(text_content(&tree, noscript), "<b>x</b>");
    assert!(find_element(&tree, NodeId::ROOT, "b").is_none());
}

// =============================================================================
// Implied end tags and lists
// =============================================================================

#[test]
fn test_li_closes_previous_li() {
    let tree = parse("<ul><li>a<li>b</ul>");
    let ul = find_element(&tree, NodeId::ROOT, "ul").expect("ul");
    assert_eq!(element_children(&tree, ul), ["li", "li"]);
}

#[test]
fn test_dd_dt_close_each_other() {
    let tree = parse("<dl><dt>a<dd>b<dt>c</dl>");
    let dl = find_element(&tree, NodeId::ROOT, "dl").expect("dl");
    assert_eq!(element_children(&tree, dl), ["dt", "dd", "dt"]);
}

#[test]
fn test_p_closed_by_block() {
    let tree = parse("<p>a<div>b</div>");
    assert_eq!(element_children(&tree, body(&tree)), ["p", "div"]);
}

#[test]
fn test_heading_closes_heading() {
    let tree = parse("<h1>a<h2>b");
    assert_eq!(element_children(&tree, body(&tree)), ["h1", "h2"]);
}

#[test]
fn test_stray_p_end_tag_creates_empty_p() {
    let tree = parse("<div></p></div>");
    let div = find_element(&tree, NodeId::ROOT, "div").expect("div");
    assert_eq!(element_children(&tree, div), ["p"]);
}

#[test]
fn test_br_end_tag_becomes_br() {
    let tree = parse("a</br>b");
    assert_eq!(element_children(&tree, body(&tree)), ["br"]);
}

#[test]
fn test_image_becomes_img() {
    let tree = parse("<image src=x>");
    assert!(find_element(&tree, NodeId::ROOT, "img").is_some());
    assert!(find_element(&tree, NodeId::ROOT, "image").is_none());
}

#[test]
fn test_nested_form_ignored() {
    let tree = parse("<form><form></form>");
    assert_eq!(find_all_elements(&tree, NodeId::ROOT, "form").len(), 1);
}

// =============================================================================
// Formatting elements
// =============================================================================

#[test]
fn test_adoption_agency_moves_block() {
    let tree = parse("<b>1<p>2</b>3</p>");
    assert_eq!(
        tree_to_string(&tree, body(&tree)),
        "<body>\n  <b>\n    \"1\"\n  <p>\n    <b>\n      \"2\"\n    \"3\"\n"
    );
}

#[test]
fn test_adoption_agency_without_furthest_block() {
    let tree = parse("<b>1<i>2</b>3</i>4");
    assert_eq!(
        tree_to_string(&tree, body(&tree)),
        "<body>\n  <b>\n    \"1\"\n    <i>\n      \"2\"\n  <i>\n    \"3\"\n  \"4\"\n"
    );
}

#[test]
fn test_anchor_end_inside_paragraph() {
    let tree = parse("<a><p></a></p>");
    assert_eq!(
        tree_to_string(&tree, body(&tree)),
        "<body>\n  <a>\n  <p>\n    <a>\n"
    );
}

#[test]
fn test_nested_anchor_closes_outer() {
    let tree = parse("<a href=1>x<a href=2>y");
    let anchors = find_all_elements(&tree, NodeId::ROOT, "a");
    assert_eq!(anchors.len(), 2);
    assert_eq!(element_children(&tree, body(&tree)), ["a", "a"]);
    assert_eq!(text_content(&tree, anchors[1]), "y");
}

#[test]
fn test_formatting_reconstructed_in_new_paragraph() {
    let tree = parse("<p><b>1<p>2");
    let paragraphs = find_all_elements(&tree, NodeId::ROOT, "p");
    assert_eq!(paragraphs.len(), 2);
    for p in paragraphs {
        assert_eq!(element_children(&tree, p), ["b"]);
    }
}

#[test]
fn test_noahs_ark_limits_identical_entries() {
    let tree = parse("<p><b><b><b><b>x<p>y");
    let p = find_all_elements(&tree, NodeId::ROOT, "p")[1];
    let mut depth = 0;
    let mut node = p;
    while let Some(&child) = tree.children(node).first()
        && tree.as_element(child).is_some()
    {
        depth += 1;
        node = child;
    }
    assert_eq!(depth, 3);
}

// =============================================================================
// Tables
// =============================================================================

#[test]
fn test_table_implies_tbody_and_row() {
    let tree = parse("<table><td>1");
    let table = find_element(&tree, NodeId::ROOT, "table").expect("table");
    assert_eq!(element_children(&tree, table), ["tbody"]);
    let tbody = find_element(&tree, table, "tbody").expect("tbody");
    assert_eq!(element_children(&tree, tbody), ["tr"]);
    let td = find_element(&tree, tbody, "td").expect("td");
    assert_eq!(text_content(&tree, td), "1");
}

#[test]
fn test_text_in_table_is_foster_parented() {
    let tree = parse("<table>x<tr><td>y</td></tr></table>");
    let body = body(&tree);
    let first = tree.children(body)[0];
    assert_eq!(tree.as_text(first), Some("x"));
    assert_eq!(element_children(&tree, body), ["table"]);
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    let tree = parse("<table> <tr></tr></table>");
    let table = find_element(&tree, NodeId::ROOT, "table").expect("table");
    let first = tree.children(table)[0];
    assert_eq!(tree.as_text(first), Some(" "));
}

#[test]
fn test_element_in_table_is_foster_parented() {
    let tree = parse("<table><div>a</div><tr><td>b</table>");
    assert_eq!(element_children(&tree, body(&tree)), ["div", "table"]);
}

#[test]
fn test_formatting_in_table_is_foster_parented() {
    let tree = parse("<table><b>x</b></table>");
    let body = body(&tree);
    assert_eq!(element_children(&tree, body), ["b", "table"]);
    let b = find_element(&tree, body, "b").expect("b");
    assert_eq!(text_content(&tree, b), "x");
}

#[test]
fn test_col_implies_colgroup() {
    let tree = parse("<table><col><caption>c</caption></table>");
    let table = find_element(&tree, NodeId::ROOT, "table").expect("table");
    assert_eq!(element_children(&tree, table), ["colgroup", "caption"]);
    let colgroup = find_element(&tree, table, "colgroup").expect("colgroup");
    assert_eq!(element_children(&tree, colgroup), ["col"]);
}

#[test]
fn test_cell_end_closes_nested_content() {
    let tree = parse("<table><tr><td><b>x</td><td>y</td></tr></table>");
    let tr = find_element(&tree, NodeId::ROOT, "tr").expect("tr");
    assert_eq!(element_children(&tree, tr), ["td", "td"]);
}

#[test]
fn test_table_inside_cell() {
    let tree = parse("<table><tr><td><table><tr><td>inner</table>outer</table>");
    let tables = find_all_elements(&tree, NodeId::ROOT, "table");
    assert_eq!(tables.len(), 2);
    let outer_td = find_element(&tree, tables[0], "td").expect("td");
    assert_eq!(text_content(&tree, outer_td), "innerouter");
}

// =============================================================================
// Select
// =============================================================================

#[test]
fn test_option_closes_option() {
    let tree = parse("<select><option>a<option>b</select>");
    let select = find_element(&tree, NodeId::ROOT, "select").expect("select");
    assert_eq!(element_children(&tree, select), ["option", "option"]);
}

#[test]
fn test_input_closes_select() {
    let tree = parse("<select><option>a<input>");
    assert_eq!(element_children(&tree, body(&tree)), ["select", "input"]);
}

#[test]
fn test_cell_start_closes_select_in_table() {
    let tree = parse("<table><tr><td><select><option>a<td>b</table>");
    let tr = find_element(&tree, NodeId::ROOT, "tr").expect("tr");
    assert_eq!(element_children(&tree, tr), ["td", "td"]);
}

// =============================================================================
// Template and frameset
// =============================================================================

#[test]
fn test_template_holds_table_rows() {
    let tree = parse("<template><tr><td>x</td></tr></template>");
    let head = find_element(&tree, NodeId::ROOT, "head").expect("head");
    let template = find_element(&tree, head, "template").expect("template");
    assert_eq!(element_children(&tree, template), ["tr"]);
    let td = find_element(&tree, template, "td").expect("td");
    assert_eq!(text_content(&tree, td), "x");
}

#[test]
fn test_frameset_replaces_body() {
    let tree = parse("<!DOCTYPE html><frameset><frame></frameset>");
    let html = tree.document_element().expect("html element");
    assert_eq!(element_children(&tree, html), ["head", "frameset"]);
    let frameset = find_element(&tree, html, "frameset").expect("frameset");
    assert_eq!(element_children(&tree, frameset), ["frame"]);
    assert!(find_element(&tree, html, "body").is_none());
    assert_eq!(tree.body(), Some(frameset));
}

#[test]
fn test_frameset_ignored_after_content() {
    let tree = parse("<body>x<frameset>");
    assert!(find_element(&tree, NodeId::ROOT, "frameset").is_none());
}

// =============================================================================
// Foreign content
// =============================================================================

#[test]
fn test_svg_names_are_adjusted() {
    let tree = parse(r##"<svg viewbox="0 0 1 1" xlink:href="#a"><foreignobject></foreignobject></svg>"##);
    let svg = find_element(&tree, NodeId::ROOT, "svg").expect("svg");
    let data = tree.as_element(svg).expect("element");
    assert_eq!(data.namespace, Namespace::Svg);
    assert_eq!(data.attribute("viewBox"), Some("0 0 1 1"));

    let href = data
        .attrs
        .iter()
        .find(|attr| attr.name == "xlink:href")
        .expect("xlink:href");
    assert_eq!(href.namespace, Some(Namespace::XLink));

    assert!(find_element(&tree, svg, "foreignObject").is_some());
}

#[test]
fn test_html_inside_foreign_object() {
    let tree = parse("<svg><foreignObject><p>hi</p></foreignObject><path/></svg>");
    let object = find_element(&tree, NodeId::ROOT, "foreignObject").expect("foreignObject");
    let p = find_element(&tree, object, "p").expect("p");
    assert_eq!(tree.as_element(p).expect("element").namespace, Namespace::Html);

    let path = find_element(&tree, NodeId::ROOT, "path").expect("path");
    assert_eq!(tree.as_element(path).expect("element").namespace, Namespace::Svg);
    assert!(tree.children(path).is_empty());
}

#[test]
fn test_cdata_in_svg_is_text() {
    let tree = parse("<svg><![CDATA[a<b]]></svg>");
    let svg = find_element(&tree, NodeId::ROOT, "svg").expect("svg");
    assert_eq!(text_content(&tree, svg), "a<b");
}

#[test]
fn test_html_element_breaks_out_of_svg() {
    let tree = parse("<svg><p>x</p></svg>");
    let body = body(&tree);
    assert_eq!(element_children(&tree, body), ["svg", "p"]);
    let p = find_element(&tree, body, "p").expect("p");
    assert_eq!(tree.as_element(p).expect("element").namespace, Namespace::Html);
}

#[test]
fn test_mathml_text_and_html_integration_points() {
    let tree = parse(
        r#"<math definitionurl="u"><mi>x</mi><annotation-xml encoding="text/html"><div>y</div></annotation-xml></math>"#,
    );
    let math = find_element(&tree, NodeId::ROOT, "math").expect("math");
    let data = tree.as_element(math).expect("element");
    assert_eq!(data.namespace, Namespace::MathMl);
    assert_eq!(data.attribute("definitionURL"), Some("u"));

    let mi = find_element(&tree, math, "mi").expect("mi");
    assert_eq!(tree.as_element(mi).expect("element").namespace, Namespace::MathMl);
    assert_eq!(text_content(&tree, mi), "x");

    let div = find_element(&tree, math, "div").expect("div");
    assert_eq!(tree.as_element(div).expect("element").namespace, Namespace::Html);
}

#[test]
fn test_foreign_outline_has_namespace_prefix() {
    let tree = parse("<svg><circle r=1></circle></svg>");
    let svg = find_element(&tree, NodeId::ROOT, "svg").expect("svg");
    assert_eq!(
        tree_to_string(&tree, svg),
        "<svg svg>\n  <svg circle r=\"1\">\n"
    );
}

// =============================================================================
// Issues
// =============================================================================

#[test]
fn test_issues_from_both_stages() {
    let output = parse_with_options(
        DomTree::new(),
        StrInput::new("<p>\0</div>"),
        &ParserOptions::default(),
    );
    assert!(
        output
            .issues
            .iter()
            .any(|issue| issue.stage == ParseStage::Tokenizer
                && issue.message == "unexpected-null-character")
    );
    assert!(
        output
            .issues
            .iter()
            .any(|issue| issue.stage == ParseStage::TreeConstruction
                && issue.message == "missing-doctype")
    );

    // Tokenizer issues come first.
    let first_tree = output
        .issues
        .iter()
        .position(|issue| issue.stage == ParseStage::TreeConstruction)
        .expect("tree issue");
    assert!(
        output.issues[first_tree..]
            .iter()
            .all(|issue| issue.stage == ParseStage::TreeConstruction)
    );
}

#[test]
fn test_issues_not_collected_when_disabled() {
    let options = ParserOptions {
        collect_issues: false,
        ..ParserOptions::default()
    };
    let output = parse_with_options(DomTree::new(), StrInput::new("<p>\0</div>"), &options);
    assert!(output.issues.is_empty());
    assert!(find_element(&output.document, NodeId::ROOT, "p").is_some());
}

#[test]
fn test_clean_document_has_no_tree_issues() {
    let output = parse_with_options(
        DomTree::new(),
        StrInput::new("<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></body></html>"),
        &ParserOptions::default(),
    );
    assert!(output.issues.is_empty(), "{:?}", output.issues);
}

// =============================================================================
// Deep nesting
// =============================================================================

#[test]
fn test_deeply_nested_document_text_content() {
    let html = format!("{}x", "<span>".repeat(100_000));
    let tree = parse(&html);
    assert_eq!(text_content(&tree, NodeId::ROOT), "x");
}

#[test]
fn test_deeply_nested_document_outline() {
    let html = format!("{}x", "<span>".repeat(10_000));
    let tree = parse(&html);
    let outline = tree_to_string(&tree, NodeId::ROOT);
    // #document, html, head, body, the spans and the text.
    assert_eq!(outline.lines().count(), 10_005);
    let last = outline.lines().last().expect("lines");
    assert_eq!(last.trim_start(), "\"x\"");
    assert_eq!(last.len() - last.trim_start().len(), 2 * 10_003);
}

// =============================================================================
// List item and definition end tags
// =============================================================================

#[test]
fn test_li_end_tag_closes_item() {
    let tree = parse("<ul><li>a</li><li>b</li></ul>");
    let ul = find_element(&tree, NodeId::ROOT, "ul").expect("ul");
    assert_eq!(element_children(&tree, ul), ["li", "li"]);
}

#[test]
fn test_stray_li_end_tag_is_ignored() {
    let output = parse_with_options(
        DomTree::new(),
        StrInput::new("<!DOCTYPE html><p>a</li>b</p>"),
        &ParserOptions::default(),
    );
    let tree = output.document;
    let p = find_element(&tree, NodeId::ROOT, "p").expect("p");
    assert_eq!(text_content(&tree, p), "ab");
    assert_eq!(output.issues.len(), 1, "{:?}", output.issues);
}

#[test]
fn test_dd_end_tag_closes_inline_content() {
    let tree = parse("<dl><dd><b>a</dd>b</dl>");
    let dl = find_element(&tree, NodeId::ROOT, "dl").expect("dl");
    assert_eq!(element_children(&tree, dl), ["dd", "b"]);
}

#[test]
fn test_block_and_form_end_tags() {
    let tree = parse("<template><form><div>x</div></form></template>y");
    let template = find_element(&tree, NodeId::ROOT, "template").expect("template");
    let form = find_element(&tree, template, "form").expect("form");
    assert_eq!(element_children(&tree, form), ["div"]);
    assert_eq!(text_content(&tree, body(&tree)), "y");
}
