//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use weft_dom::{Namespace, QuirksMode, TreeSink};

use super::core::{ActiveFormattingElement, HTMLTreeBuilder, InsertionMode, Scope, is_whitespace};
use super::foreign_content::{
    adjust_foreign_attributes, adjust_mathml_attributes, adjust_svg_attributes,
};
use crate::tokenizer::{Token, TokenizerState};

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Elements that may stay open at the end of the body without a parse error.
const ALLOWED_OPEN_AT_END: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td",
    "tfoot", "th", "thead", "tr", "body", "html",
];

impl<S: TreeSink> HTMLTreeBuilder<S> {
    pub(super) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => self.unexpected(token),

            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A
            // LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or
            // U+0020 SPACE"
            // "Reconstruct the active formatting elements, if any."
            // "Insert the token's character."
            Token::Character { data } if is_whitespace(*data) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*data);
            }

            // "Any other character token"
            // "Reconstruct the active formatting elements, if any."
            // "Insert the token's character."
            // "Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*data);
                self.frameset_ok = false;
            }

            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } => self.handle_in_body_start_tag(name, token),
            Token::EndTag { name, .. } => self.handle_in_body_end_tag(name, token),

            // "An end-of-file token"
            // "If the stack of template insertion modes is not empty, then process
            // the token using the rules for the "in template" insertion mode."
            // "Otherwise, follow these steps: If there is a node in the stack of
            // open elements that is not either a dd element, a dt element, an li
            // element, an optgroup element, an option element, a p element, an rb
            // element, an rp element, an rt element, an rtc element, a tbody
            // element, a td element, a tfoot element, a th element, a thead
            // element, a tr element, the body element, or the html element, then
            // this is a parse error."
            // "Stop parsing."
            Token::EndOfFile => {
                if !self.template_insertion_modes.is_empty() {
                    self.process_using_rules_for(InsertionMode::InTemplate, token);
                    return;
                }
                self.report_elements_left_open();
                self.stop_parsing();
            }
        }
    }

    fn report_elements_left_open(&mut self) {
        let left_open = self
            .stack_of_open_elements
            .iter()
            .any(|&node| !self.is_html_element_in(node, ALLOWED_OPEN_AT_END));
        if left_open {
            self.parse_error("eof-with-open-elements");
        }
    }

    fn handle_in_body_start_tag(&mut self, name: &str, token: &Token) {
        match name {
            // "A start tag whose tag name is "html""
            // "Parse error."
            // "If there is a template element on the stack of open elements, then
            // ignore the token."
            // "Otherwise, for each attribute on the token, check to see if the
            // attribute is already present on the top element of the stack of open
            // elements. If it is not, add the attribute and its corresponding value
            // to that element."
            "html" => {
                self.unexpected(token);
                if self.stack_contains("template") {
                    return;
                }
                if let Some(html) = self.stack_element(0) {
                    self.sink
                        .add_attributes_if_missing(html, token.attributes().to_vec());
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style", "template",
            // "title""
            // "Process the token using the rules for the "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
            | "style" | "template" | "title" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "A start tag whose tag name is "body""
            // "Parse error."
            // "If the stack of open elements has only one node on it, if the second
            // element on the stack of open elements is not a body element, or if
            // there is a template element on the stack of open elements, then
            // ignore the token. (fragment case or there is a template element on
            // the stack)"
            // "Otherwise, set the frameset-ok flag to "not ok"; then, for each
            // attribute on the token, check to see if the attribute is already
            // present on the body element (the second element) on the stack of
            // open elements, and if it is not, add the attribute and its
            // corresponding value to that element."
            "body" => {
                self.unexpected(token);
                let Some(body) = self
                    .stack_element(1)
                    .filter(|&body| self.is_html_element(body, "body"))
                else {
                    return;
                };
                if self.stack_contains("template") {
                    return;
                }
                self.frameset_ok = false;
                self.sink
                    .add_attributes_if_missing(body, token.attributes().to_vec());
            }

            // "A start tag whose tag name is "frameset""
            // "Parse error."
            // "If the stack of open elements has only one node on it, or if the
            // second element on the stack of open elements is not a body element,
            // then ignore the token. (fragment case or there is a template element
            // on the stack)"
            // "If the frameset-ok flag is set to "not ok", ignore the token."
            // "Otherwise, run the following steps: Remove the second element on the
            // stack of open elements from its parent node, if it has one. Pop all
            // the nodes from the bottom of the stack of open elements, from the
            // current node up to, but not including, the root html element.
            // Insert an HTML element for the token. Switch the insertion mode to
            // "in frameset"."
            "frameset" => {
                self.unexpected(token);
                let Some(body) = self
                    .stack_element(1)
                    .filter(|&body| self.is_html_element(body, "body"))
                else {
                    return;
                };
                if !self.frameset_ok {
                    return;
                }
                self.sink.remove_from_parent(body);
                self.stack_of_open_elements.truncate(1);
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InFrameset);
            }

            // "A start tag whose tag name is one of: "address", "article", "aside",
            // "blockquote", "center", "details", "dialog", "dir", "div", "dl",
            // "fieldset", "figcaption", "figure", "footer", "header", "hgroup",
            // "main", "menu", "nav", "ol", "p", "search", "section", "summary",
            // "ul""
            // "If the stack of open elements has a p element in button scope, then
            // close a p element."
            // "Insert an HTML element for the token."
            "address" | "article" | "aside" | "blockquote" | "center" | "details" | "dialog"
            | "dir" | "div" | "dl" | "fieldset" | "figcaption" | "figure" | "footer"
            | "header" | "hgroup" | "main" | "menu" | "nav" | "ol" | "p" | "search"
            | "section" | "summary" | "ul" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5",
            // "h6""
            // "If the stack of open elements has a p element in button scope, then
            // close a p element."
            // "If the current node is an HTML element whose tag name is one of "h1",
            // "h2", "h3", "h4", "h5", or "h6", then this is a parse error; pop the
            // current node off the stack of open elements."
            // "Insert an HTML element for the token."
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.close_p_element_in_button_scope();
                if self.current_node_is_one_of(HEADINGS) {
                    self.unexpected(token);
                    self.pop_current_node();
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            // "If the stack of open elements has a p element in button scope, then
            // close a p element."
            // "Insert an HTML element for the token."
            // "If the next token is a U+000A LINE FEED (LF) character token, then
            // ignore that token and move on to the next one. (Newlines at the start
            // of pre blocks are ignored as an authoring convenience.)"
            // "Set the frameset-ok flag to "not ok"."
            "pre" | "listing" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                self.ignore_next_line_feed = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            // "If the form element pointer is not null, and there is no template
            // element on the stack of open elements, then this is a parse error;
            // ignore the token."
            // "Otherwise: If the stack of open elements has a p element in button
            // scope, then close a p element. Insert an HTML element for the token,
            // and, if there is no template element on the stack of open elements,
            // set the form element pointer to point to the element created."
            "form" => {
                let in_template = self.stack_contains("template");
                if self.form_element_pointer.is_some() && !in_template {
                    self.unexpected(token);
                    return;
                }
                self.close_p_element_in_button_scope();
                let form = self.insert_html_element(token);
                if !in_template {
                    self.form_element_pointer = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            "li" => {
                self.frameset_ok = false;
                self.close_list_item(token, &["li"]);
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                self.frameset_ok = false;
                self.close_list_item(token, &["dd", "dt"]);
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "plaintext""
            // "If the stack of open elements has a p element in button scope, then
            // close a p element."
            // "Insert an HTML element for the token."
            // "Switch the tokenizer to the PLAINTEXT state."
            "plaintext" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                self.set_lexical_state(TokenizerState::Plaintext);
            }

            // "A start tag whose tag name is "button""
            // "If the stack of open elements has a button element in scope, then
            // run these substeps: Parse error. Generate implied end tags. Pop
            // elements from the stack of open elements until a button element has
            // been popped from the stack."
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            // "Set the frameset-ok flag to "not ok"."
            "button" => {
                if self.has_element_in_scope("button", Scope::Default) {
                    self.unexpected(token);
                    self.generate_implied_end_tags(None);
                    self.pop_until("button");
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            // "If the list of active formatting elements contains an a element
            // between the end of the list and the last marker on the list (or the
            // start of the list if there is no marker on the list), then this is a
            // parse error; run the adoption agency algorithm for the token, then
            // remove that element from the list of active formatting elements and
            // the stack of open elements if the adoption agency algorithm didn't
            // already remove it (it might not have if the element is not in table
            // scope)."
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token. Push onto the list of active
            // formatting elements that element."
            "a" => {
                if let Some(index) = self.last_formatting_element_named("a") {
                    let existing = match &self.active_formatting_elements[index] {
                        ActiveFormattingElement::Element { node_id, .. } => Some(*node_id),
                        ActiveFormattingElement::Marker => None,
                    };
                    self.unexpected(token);
                    self.run_adoption_agency(&Token::end_tag("a"));
                    if let Some(existing) = existing {
                        self.remove_from_active_formatting_elements(existing);
                        self.remove_from_stack(existing);
                    }
                }
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            // "font", "i", "s", "small", "strike", "strong", "tt", "u""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token. Push onto the list of active
            // formatting elements that element."
            "b" | "big" | "code" | "em" | "font" | "i" | "s" | "small" | "strike" | "strong"
            | "tt" | "u" => {
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is "nobr""
            // "Reconstruct the active formatting elements, if any."
            // "If the stack of open elements has a nobr element in scope, then this
            // is a parse error; run the adoption agency algorithm for the token,
            // then once again reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token. Push onto the list of active
            // formatting elements that element."
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                if self.has_element_in_scope("nobr", Scope::Default) {
                    self.unexpected(token);
                    self.run_adoption_agency(&Token::end_tag("nobr"));
                }
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is one of: "applet", "marquee", "object""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            // "Insert a marker at the end of the list of active formatting
            // elements."
            // "Set the frameset-ok flag to "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.insert_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            // "If the Document is not set to quirks mode, and the stack of open
            // elements has a p element in button scope, then close a p element."
            // "Insert an HTML element for the token."
            // "Set the frameset-ok flag to "not ok"."
            // "Switch the insertion mode to "in table"."
            "table" => {
                if self.quirks_mode != QuirksMode::Quirks {
                    self.close_p_element_in_button_scope();
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "area", "br", "embed", "img",
            // "keygen", "wbr""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            // "Set the frameset-ok flag to "not ok"."
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            // "If the token does not have an attribute with the name "type", or if
            // it does, but that attribute's value is not an ASCII case-insensitive
            // match for the string "hidden", then: set the frameset-ok flag to "not
            // ok"."
            "input" => {
                self.insert_void_element(token);
                let hidden = token
                    .attribute("type")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"));
                if !hidden {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            "param" | "source" | "track" => {
                let _ = self.insert_html_element(token);
                self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            // "A start tag whose tag name is "hr""
            // "If the stack of open elements has a p element in button scope, then
            // close a p element."
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            // "Set the frameset-ok flag to "not ok"."
            "hr" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                self.pop_current_node();
                self.acknowledge_self_closing_flag();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess it.
            // (Don't ask.)"
            "image" => {
                self.unexpected(token);
                let mut img = token.clone();
                if let Token::StartTag { name, .. } = &mut img {
                    "img".clone_into(name);
                }
                self.reprocess(&img);
            }

            // "A start tag whose tag name is "textarea""
            // "Insert an HTML element for the token."
            // "If the next token is a U+000A LINE FEED (LF) character token, then
            // ignore that token and move on to the next one."
            // "Switch the tokenizer to the RCDATA state."
            // "Let the original insertion mode be the current insertion mode."
            // "Set the frameset-ok flag to "not ok"."
            // "Switch the insertion mode to "text"."
            "textarea" => {
                self.ignore_next_line_feed = true;
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::Rcdata);
            }

            // "A start tag whose tag name is "xmp""
            // "If the stack of open elements has a p element in button scope, then
            // close a p element."
            // "Reconstruct the active formatting elements, if any."
            // "Set the frameset-ok flag to "not ok"."
            // "Follow the generic raw text element parsing algorithm."
            "xmp" => {
                self.close_p_element_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::Rawtext);
            }

            // "A start tag whose tag name is "iframe""
            // "Set the frameset-ok flag to "not ok"."
            // "Follow the generic raw text element parsing algorithm."
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::Rawtext);
            }

            // "A start tag whose tag name is "noembed"" / "A start tag whose tag
            // name is "noscript", if the scripting flag is enabled"
            // "Follow the generic raw text element parsing algorithm."
            "noembed" => self.parse_text_element(token, TokenizerState::Rawtext),
            "noscript" if self.options.scripting => {
                self.parse_text_element(token, TokenizerState::Rawtext);
            }

            // "A start tag whose tag name is "select""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            // "Set the frameset-ok flag to "not ok"."
            // "If the insertion mode is one of "in table", "in caption", "in table
            // body", "in row", or "in cell", then switch the insertion mode to "in
            // select in table". Otherwise, switch the insertion mode to "in
            // select"."
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                let mode = if matches!(
                    self.insertion_mode,
                    InsertionMode::InTable
                        | InsertionMode::InCaption
                        | InsertionMode::InTableBody
                        | InsertionMode::InRow
                        | InsertionMode::InCell
                ) {
                    InsertionMode::InSelectInTable
                } else {
                    InsertionMode::InSelect
                };
                self.switch_mode(mode);
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            // "If the current node is an option element, then pop the current node
            // off the stack of open elements."
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    self.pop_current_node();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            // "If the stack of open elements has a ruby element in scope, then
            // generate implied end tags. If the current node is not now a ruby
            // element, this is a parse error."
            // "Insert an HTML element for the token."
            "rb" | "rtc" => {
                if self.has_element_in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(None);
                    if !self.current_node_is("ruby") {
                        self.unexpected(token);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            // "If the stack of open elements has a ruby element in scope, then
            // generate implied end tags, except for rtc elements. If the current
            // node is not now a rtc element or a ruby element, this is a parse
            // error."
            // "Insert an HTML element for the token."
            "rp" | "rt" => {
                if self.has_element_in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(Some("rtc"));
                    if !self.current_node_is_one_of(&["rtc", "ruby"]) {
                        self.unexpected(token);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "math""
            // "Reconstruct the active formatting elements, if any."
            // "Adjust MathML attributes for the token. (This fixes the case of
            // MathML attributes that are not all lowercase.)"
            // "Adjust foreign attributes for the token. (This fixes the use of
            // namespaced attributes, in particular XLink.)"
            // "Insert a foreign element for the token, with MathML namespace and
            // false."
            // "If the token has its self-closing flag set, pop the current node off
            // the stack of open elements and acknowledge the token's self-closing
            // flag."
            "math" => {
                self.reconstruct_active_formatting_elements();
                let mut adjusted = token.clone();
                if let Token::StartTag { attributes, .. } = &mut adjusted {
                    adjust_mathml_attributes(attributes);
                    adjust_foreign_attributes(attributes);
                }
                self.insert_foreign_start_tag(&adjusted, Namespace::MathMl);
            }

            // "A start tag whose tag name is "svg""
            // Same as "math", with SVG attribute adjustment and the SVG namespace.
            "svg" => {
                self.reconstruct_active_formatting_elements();
                let mut adjusted = token.clone();
                if let Token::StartTag { attributes, .. } = &mut adjusted {
                    adjust_svg_attributes(attributes);
                    adjust_foreign_attributes(attributes);
                }
                self.insert_foreign_start_tag(&adjusted, Namespace::Svg);
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "frame", "head", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot"
            | "th" | "thead" | "tr" => self.unexpected(token),

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }
        }
    }

    fn handle_in_body_end_tag(&mut self, name: &str, token: &Token) {
        match name {
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            "template" => self.process_using_rules_for(InsertionMode::InHead, token),

            // "An end tag whose tag name is "body""
            // "If the stack of open elements does not have a body element in scope,
            // this is a parse error; ignore the token."
            // "Otherwise, if there is a node in the stack of open elements that is
            // not either a dd element, ... or the html element, then this is a
            // parse error."
            // "Switch the insertion mode to "after body"."
            "body" => {
                if !self.has_element_in_scope("body", Scope::Default) {
                    self.unexpected(token);
                    return;
                }
                self.report_elements_left_open();
                self.switch_mode(InsertionMode::AfterBody);
            }

            // "An end tag whose tag name is "html""
            // Same as "body", then "Reprocess the token."
            "html" => {
                if !self.has_element_in_scope("body", Scope::Default) {
                    self.unexpected(token);
                    return;
                }
                self.report_elements_left_open();
                self.switch_mode(InsertionMode::AfterBody);
                self.reprocess(token);
            }

            // "An end tag whose tag name is one of: "address", "article", "aside",
            // "blockquote", "button", "center", "details", "dialog", "dir", "div",
            // "dl", "fieldset", "figcaption", "figure", "footer", "header",
            // "hgroup", "listing", "main", "menu", "nav", "ol", "pre", "search",
            // "section", "summary", "ul""
            // "If the stack of open elements does not have an element in scope that
            // is an HTML element with the same tag name as that of the token, then
            // this is a parse error; ignore the token."
            // "Otherwise: Generate implied end tags. If the current node is not an
            // HTML element with the same tag name as that of the token, then this
            // is a parse error. Pop elements from the stack of open elements until
            // an HTML element with the same tag name as the token has been popped
            // from the stack."
            "address" | "article" | "aside" | "blockquote" | "button" | "center" | "details"
            | "dialog" | "dir" | "div" | "dl" | "fieldset" | "figcaption" | "figure"
            | "footer" | "header" | "hgroup" | "listing" | "main" | "menu" | "nav" | "ol"
            | "pre" | "search" | "section" | "summary" | "ul" => {
                let _ = self.close_element_in_scope(name, token, Scope::Default, None);
            }

            // "An end tag whose tag name is "form""
            "form" => {
                if self.stack_contains("template") {
                    // "If the stack of open elements does not have a form element in
                    // scope, then this is a parse error; return and ignore the
                    // token."
                    let _ = self.close_element_in_scope("form", token, Scope::Default, None);
                    return;
                }
                // "Let node be the element that the form element pointer is set
                // to, or null if it is not set to an element."
                // "Set the form element pointer to null."
                // "If node is null or if the stack of open elements does not have
                // node in scope, then this is a parse error; return and ignore the
                // token."
                let node = self.form_element_pointer.take();
                let Some(node) = node.filter(|&node| self.has_node_in_scope(node, Scope::Default))
                else {
                    self.unexpected(token);
                    return;
                };
                // "Generate implied end tags."
                // "If the current node is not node, then this is a parse error."
                // "Remove node from the stack of open elements."
                self.generate_implied_end_tags(None);
                if self.current_node() != Some(node) {
                    self.unexpected(token);
                }
                self.remove_from_stack(node);
            }

            // "An end tag whose tag name is "p""
            // "If the stack of open elements does not have a p element in button
            // scope, then this is a parse error; insert an HTML element for a "p"
            // start tag token with no attributes."
            // "Close a p element."
            "p" => {
                if !self.has_element_in_scope("p", Scope::Button) {
                    self.unexpected(token);
                    let _ = self.insert_synthesized_element("p");
                }
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            // "If the stack of open elements does not have an li element in list
            // item scope, then this is a parse error; ignore the token."
            // "Otherwise: Generate implied end tags, except for li elements. If the
            // current node is not an li element, then this is a parse error. Pop
            // elements from the stack of open elements until an li element has
            // been popped from the stack."
            "li" => {
                let _ = self.close_element_in_scope("li", token, Scope::ListItem, Some("li"));
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                let _ = self.close_element_in_scope(name, token, Scope::Default, Some(name));
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5",
            // "h6""
            // "If the stack of open elements does not have an element in scope that
            // is an HTML element and whose tag name is one of "h1", "h2", "h3",
            // "h4", "h5", or "h6", then this is a parse error; ignore the token."
            // "Otherwise: Generate implied end tags. If the current node is not an
            // HTML element with the same tag name as that of the token, then this
            // is a parse error. Pop elements from the stack of open elements until
            // an HTML element whose tag name is one of "h1", "h2", "h3", "h4", "h5",
            // or "h6" has been popped from the stack."
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if !self.has_any_element_in_scope(HEADINGS, Scope::Default) {
                    self.unexpected(token);
                    return;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(name) {
                    self.unexpected(token);
                }
                self.pop_until_one_of(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code", "em",
            // "font", "i", "nobr", "s", "small", "strike", "strong", "tt", "u""
            // "Run the adoption agency algorithm for the token."
            "a" | "b" | "big" | "code" | "em" | "font" | "i" | "nobr" | "s" | "small"
            | "strike" | "strong" | "tt" | "u" => self.run_adoption_agency(token),

            // "An end tag token whose tag name is one of: "applet", "marquee",
            // "object""
            // "If the stack of open elements does not have an element in scope that
            // is an HTML element with the same tag name as that of the token, then
            // this is a parse error; ignore the token."
            // "Otherwise: Generate implied end tags. If the current node is not an
            // HTML element with the same tag name as that of the token, then this
            // is a parse error. Pop elements from the stack of open elements until
            // an HTML element with the same tag name as the token has been popped
            // from the stack. Clear the list of active formatting elements up to
            // the last marker."
            "applet" | "marquee" | "object" => {
                if self.close_element_in_scope(name, token, Scope::Default, None) {
                    self.clear_active_formatting_elements_to_last_marker();
                }
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br" start tag
            // token with no attributes, rather than the end tag token that it
            // actually is."
            "br" => {
                self.unexpected(token);
                self.handle_in_body_start_tag("br", &Token::start_tag("br"));
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(token),
        }
    }

    /// The shared steps of the "li", "dd" and "dt" start tags: walk down the
    /// stack closing the nearest open list item of the same kind, stopping at
    /// special elements other than address, div and p.
    fn close_list_item(&mut self, token: &Token, names: &[&str]) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            // "If node is an li element, then run these substeps: Generate implied
            // end tags, except for li elements. If the current node is not an li
            // element, then this is a parse error. Pop elements from the stack of
            // open elements until an li element has been popped from the stack.
            // Jump to the step below labeled done."
            if self.is_html_element_in(node, names) {
                let name = self.name_of(node).to_string();
                self.generate_implied_end_tags(Some(&name));
                if !self.current_node_is(&name) {
                    self.unexpected(token);
                }
                self.pop_until(&name);
                return;
            }
            // "If node is in the special category, but is not an address, div, or
            // p element, then jump to the step below labeled done."
            if self.is_special(node) && !self.is_html_element_in(node, &["address", "div", "p"]) {
                return;
            }
        }
    }

    /// "If the stack of open elements does not have an element in scope that is
    /// an HTML element with the same tag name as that of the token, then this is
    /// a parse error; ignore the token. Otherwise, generate implied end tags,
    /// report a parse error if the current node is not that element, and pop
    /// until it has been popped."
    ///
    /// Returns false if the token was ignored.
    pub(super) fn close_element_in_scope(
        &mut self,
        name: &str,
        token: &Token,
        scope: Scope,
        except: Option<&str>,
    ) -> bool {
        if !self.has_element_in_scope(name, scope) {
            self.unexpected(token);
            return false;
        }
        self.generate_implied_end_tags(except);
        if !self.current_node_is(name) {
            self.unexpected(token);
        }
        self.pop_until(name);
        true
    }

    /// Reconstruct, insert, and push onto the list of active formatting
    /// elements.
    fn insert_formatting_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let element = self.insert_html_element(token);
        self.push_active_formatting_element(element, token);
    }

    fn insert_void_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let _ = self.insert_html_element(token);
        self.pop_current_node();
        self.acknowledge_self_closing_flag();
    }

    /// Insert a foreign element; a self-closing one is popped straight away.
    pub(super) fn insert_foreign_start_tag(&mut self, token: &Token, namespace: Namespace) {
        let _ = self.insert_foreign_element(token, namespace);
        if token.is_self_closing() {
            self.pop_current_node();
            self.acknowledge_self_closing_flag();
        }
    }
}
