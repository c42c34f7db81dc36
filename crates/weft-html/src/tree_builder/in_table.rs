//! Table and select insertion modes.
//!
//! [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
//! through
//! [§ 13.2.6.4.17](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)

use weft_dom::TreeSink;

use super::core::{HTMLTreeBuilder, InsertionMode, Scope, is_whitespace};
use crate::tokenizer::Token;

/// "clear the stack back to a table context"
const TABLE_CONTEXT: &[&str] = &["table", "template", "html"];
/// "clear the stack back to a table body context"
const TABLE_BODY_CONTEXT: &[&str] = &["tbody", "tfoot", "thead", "template", "html"];
/// "clear the stack back to a table row context"
const TABLE_ROW_CONTEXT: &[&str] = &["tr", "template", "html"];

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];
const CELLS: &[&str] = &["td", "th"];

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(super) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody, template,
            // tfoot, thead, or tr element"
            // "Let the pending table character tokens be an empty list of
            // tokens. Let the original insertion mode be the current insertion
            // mode. Switch the insertion mode to "in table text" and reprocess
            // the token."
            Token::Character { .. }
                if self.current_node_is_one_of(&[
                    "table", "tbody", "template", "tfoot", "thead", "tr",
                ]) =>
            {
                self.pending_table_character_tokens.clear();
                self.original_insertion_mode = self.insertion_mode;
                self.switch_mode(InsertionMode::InTableText);
                self.reprocess(token);
            }

            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } => match name.as_str() {
                // "Clear the stack back to a table context. Insert a marker at the
                // end of the list of active formatting elements. Insert an HTML
                // element for the token, then switch the insertion mode to "in
                // caption"."
                "caption" => {
                    self.clear_stack_back_to(TABLE_CONTEXT);
                    self.insert_marker();
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InCaption);
                }
                "colgroup" => {
                    self.clear_stack_back_to(TABLE_CONTEXT);
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InColumnGroup);
                }
                // "Insert an HTML element for a "colgroup" start tag token with no
                // attributes, then switch the insertion mode to "in column
                // group". Reprocess the current token."
                "col" => {
                    self.clear_stack_back_to(TABLE_CONTEXT);
                    let _ = self.insert_synthesized_element("colgroup");
                    self.switch_mode(InsertionMode::InColumnGroup);
                    self.reprocess(token);
                }
                "tbody" | "tfoot" | "thead" => {
                    self.clear_stack_back_to(TABLE_CONTEXT);
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InTableBody);
                }
                "td" | "th" | "tr" => {
                    self.clear_stack_back_to(TABLE_CONTEXT);
                    let _ = self.insert_synthesized_element("tbody");
                    self.switch_mode(InsertionMode::InTableBody);
                    self.reprocess(token);
                }
                // "Parse error. If the stack of open elements does not have a
                // table element in table scope, ignore the token. Otherwise: Pop
                // elements from this stack until a table element has been popped
                // from the stack. Reset the insertion mode appropriately.
                // Reprocess the token."
                "table" => {
                    self.unexpected(token);
                    if self.has_element_in_scope("table", Scope::Table) {
                        self.pop_until("table");
                        self.reset_insertion_mode_appropriately();
                        self.reprocess(token);
                    }
                }
                "style" | "script" | "template" => {
                    self.process_using_rules_for(InsertionMode::InHead, token);
                }
                // "If the token does not have an attribute with the name "type",
                // or if it does, but that attribute's value is not an ASCII
                // case-insensitive match for the string "hidden", then: act as
                // described in the "anything else" entry below."
                // "Otherwise: Parse error. Insert an HTML element for the token.
                // Pop that input element off the stack of open elements.
                // Acknowledge the token's self-closing flag, if it is set."
                "input"
                    if token
                        .attribute("type")
                        .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden")) =>
                {
                    self.unexpected(token);
                    let _ = self.insert_html_element(token);
                    self.pop_current_node();
                    self.acknowledge_self_closing_flag();
                }
                // "Parse error. If there is a template element on the stack of
                // open elements, or if the form element pointer is not null,
                // ignore the token. Otherwise: Insert an HTML element for the
                // token, and set the form element pointer to point to the element
                // created. Pop that form element off the stack of open elements."
                "form" => {
                    self.unexpected(token);
                    if self.stack_contains("template") || self.form_element_pointer.is_some() {
                        return;
                    }
                    let form = self.insert_html_element(token);
                    self.form_element_pointer = Some(form);
                    self.pop_current_node();
                }
                _ => self.in_table_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                "table" => {
                    if self.has_element_in_scope("table", Scope::Table) {
                        self.pop_until("table");
                        self.reset_insertion_mode_appropriately();
                    } else {
                        self.unexpected(token);
                    }
                }
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => self.unexpected(token),
                "template" => self.process_using_rules_for(InsertionMode::InHead, token),
                _ => self.in_table_anything_else(token),
            },

            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),

            Token::Character { .. } => self.in_table_anything_else(token),
        }
    }

    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn in_table_anything_else(&mut self, token: &Token) {
        self.unexpected(token);
        self.process_with_foster_parenting(token);
    }

    fn process_with_foster_parenting(&mut self, token: &Token) {
        self.foster_parenting = true;
        self.process_using_rules_for(InsertionMode::InBody, token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(super) fn handle_in_table_text_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data: '\0' } => self.unexpected(token),
            // "Append the character token to the pending table character tokens
            // list."
            Token::Character { data } => self.pending_table_character_tokens.push(*data),
            // "If any of the tokens in the pending table character tokens list
            // are character tokens that are not ASCII whitespace, then this is a
            // parse error: reprocess the character tokens in the pending table
            // character tokens list using the rules given in the "anything else"
            // entry in the "in table" insertion mode."
            // "Otherwise, insert the characters given by the pending table
            // character tokens list."
            // "Switch the insertion mode to the original insertion mode and
            // reprocess the token."
            _ => {
                let pending = std::mem::take(&mut self.pending_table_character_tokens);
                if pending.iter().all(|&c| is_whitespace(c)) {
                    for c in pending {
                        self.insert_character(c);
                    }
                } else {
                    self.parse_error("non-whitespace-text-in-table");
                    for data in pending {
                        self.process_with_foster_parenting(&Token::Character { data });
                    }
                }
                self.switch_mode(self.original_insertion_mode);
                self.reprocess(token);
            }
        }
    }

    /// Closes the caption, returning false if there was none in table scope.
    fn close_caption(&mut self, token: &Token) -> bool {
        if !self.has_element_in_scope("caption", Scope::Table) {
            self.unexpected(token);
            return false;
        }
        self.generate_implied_end_tags(None);
        if !self.current_node_is("caption") {
            self.unexpected(token);
        }
        self.pop_until("caption");
        self.clear_active_formatting_elements_to_last_marker();
        self.switch_mode(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            Token::EndTag { name, .. } if name == "caption" => {
                let _ = self.close_caption(token);
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead"
                        | "tr"
                ) =>
            {
                if self.close_caption(token) {
                    self.reprocess(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_caption(token) {
                    self.reprocess(token);
                }
            }
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th"
                        | "thead" | "tr"
                ) =>
            {
                self.unexpected(token);
            }
            _ => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(super) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::StartTag { name, .. } if name == "col" => {
                let _ = self.insert_html_element(token);
                self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node from
            // the stack of open elements. Switch the insertion mode to "in
            // table"."
            Token::EndTag { name, .. } if name == "colgroup" => {
                if self.current_node_is("colgroup") {
                    self.pop_current_node();
                    self.switch_mode(InsertionMode::InTable);
                } else {
                    self.unexpected(token);
                }
            }
            Token::EndTag { name, .. } if name == "col" => self.unexpected(token),
            Token::StartTag { name, .. } | Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),
            _ => {
                if self.current_node_is("colgroup") {
                    self.pop_current_node();
                    self.switch_mode(InsertionMode::InTable);
                    self.reprocess(token);
                } else {
                    self.unexpected(token);
                }
            }
        }
    }

    /// Pops the open table section, returning false if none is in table scope.
    fn close_table_section(&mut self, token: &Token) -> bool {
        if !self.has_any_element_in_scope(TABLE_SECTIONS, Scope::Table) {
            self.unexpected(token);
            return false;
        }
        self.clear_stack_back_to(TABLE_BODY_CONTEXT);
        self.pop_current_node();
        self.switch_mode(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(super) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            Token::StartTag { name, .. } if name == "tr" => {
                self.clear_stack_back_to(TABLE_BODY_CONTEXT);
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InRow);
            }
            Token::StartTag { name, .. } if CELLS.contains(&name.as_str()) => {
                self.unexpected(token);
                self.clear_stack_back_to(TABLE_BODY_CONTEXT);
                let _ = self.insert_synthesized_element("tr");
                self.switch_mode(InsertionMode::InRow);
                self.reprocess(token);
            }
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                self.clear_stack_back_to(TABLE_BODY_CONTEXT);
                self.pop_current_node();
                self.switch_mode(InsertionMode::InTable);
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                if self.close_table_section(token) {
                    self.reprocess(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_table_section(token) {
                    self.reprocess(token);
                }
            }
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.unexpected(token);
            }
            _ => self.process_using_rules_for(InsertionMode::InTable, token),
        }
    }

    /// Pops the open row, returning false if there is no tr in table scope.
    fn close_row(&mut self, token: &Token) -> bool {
        if !self.has_element_in_scope("tr", Scope::Table) {
            self.unexpected(token);
            return false;
        }
        self.clear_stack_back_to(TABLE_ROW_CONTEXT);
        self.pop_current_node();
        self.switch_mode(InsertionMode::InTableBody);
        true
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(super) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            // "Clear the stack back to a table row context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // cell". Insert a marker at the end of the list of active formatting
            // elements."
            Token::StartTag { name, .. } if CELLS.contains(&name.as_str()) => {
                self.clear_stack_back_to(TABLE_ROW_CONTEXT);
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InCell);
                self.insert_marker();
            }
            Token::EndTag { name, .. } if name == "tr" => {
                let _ = self.close_row(token);
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if self.close_row(token) {
                    self.reprocess(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_row(token) {
                    self.reprocess(token);
                }
            }
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as the token,
            // this is a parse error; ignore the token. If the stack of open
            // elements does not have a tr element in table scope, ignore the
            // token."
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                if !self.has_element_in_scope("tr", Scope::Table) {
                    return;
                }
                self.clear_stack_back_to(TABLE_ROW_CONTEXT);
                self.pop_current_node();
                self.switch_mode(InsertionMode::InTableBody);
                self.reprocess(token);
            }
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.unexpected(token);
            }
            _ => self.process_using_rules_for(InsertionMode::InTable, token),
        }
    }

    /// [§ 13.2.6.4.15 Close the cell](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    fn close_the_cell(&mut self) {
        self.generate_implied_end_tags(None);
        if !self.current_node_is_one_of(CELLS) {
            self.parse_error("cell-closed-with-open-elements");
        }
        self.pop_until_one_of(CELLS);
        self.clear_active_formatting_elements_to_last_marker();
        self.switch_mode(InsertionMode::InRow);
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(super) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            Token::EndTag { name, .. } if CELLS.contains(&name.as_str()) => {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(name) {
                    self.unexpected(token);
                }
                self.pop_until(name);
                self.clear_active_formatting_elements_to_last_marker();
                self.switch_mode(InsertionMode::InRow);
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead"
                        | "tr"
                ) =>
            {
                if !self.has_any_element_in_scope(CELLS, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                self.close_the_cell();
                self.reprocess(token);
            }
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.unexpected(token);
            }
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                self.close_the_cell();
                self.reprocess(token);
            }
            _ => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }

    /// Pops up to and including the select, returning false if there is none
    /// in select scope.
    fn close_select(&mut self) -> bool {
        if !self.has_element_in_scope("select", Scope::Select) {
            return false;
        }
        self.pop_until("select");
        self.reset_insertion_mode_appropriately();
        true
    }

    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(super) fn handle_in_select_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data: '\0' } => self.unexpected(token),
            Token::Character { data } => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => self.process_using_rules_for(InsertionMode::InBody, token),
                "option" => {
                    if self.current_node_is("option") {
                        self.pop_current_node();
                    }
                    let _ = self.insert_html_element(token);
                }
                "optgroup" => {
                    if self.current_node_is("option") {
                        self.pop_current_node();
                    }
                    if self.current_node_is("optgroup") {
                        self.pop_current_node();
                    }
                    let _ = self.insert_html_element(token);
                }
                "hr" => {
                    if self.current_node_is("option") {
                        self.pop_current_node();
                    }
                    if self.current_node_is("optgroup") {
                        self.pop_current_node();
                    }
                    let _ = self.insert_html_element(token);
                    self.pop_current_node();
                    self.acknowledge_self_closing_flag();
                }
                // "Parse error. If the stack of open elements does not have a
                // select element in select scope, ignore the token. (fragment
                // case) Otherwise: Pop elements from the stack of open elements
                // until a select element has been popped from the stack. Reset
                // the insertion mode appropriately."
                "select" => {
                    self.unexpected(token);
                    let _ = self.close_select();
                }
                "input" | "keygen" | "textarea" => {
                    self.unexpected(token);
                    if self.close_select() {
                        self.reprocess(token);
                    }
                }
                "script" | "template" => {
                    self.process_using_rules_for(InsertionMode::InHead, token);
                }
                _ => self.unexpected(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "First, if the current node is an option element, and the node
                // immediately before it in the stack of open elements is an
                // optgroup element, then pop the current node from the stack of
                // open elements."
                // "If the current node is an optgroup element, then pop that node
                // from the stack of open elements. Otherwise, this is a parse
                // error; ignore the token."
                "optgroup" => {
                    let len = self.stack_of_open_elements.len();
                    let parent_is_optgroup = len >= 2
                        && self
                            .stack_element(len - 2)
                            .is_some_and(|node| self.is_html_element(node, "optgroup"));
                    if self.current_node_is("option") && parent_is_optgroup {
                        self.pop_current_node();
                    }
                    if self.current_node_is("optgroup") {
                        self.pop_current_node();
                    } else {
                        self.unexpected(token);
                    }
                }
                "option" => {
                    if self.current_node_is("option") {
                        self.pop_current_node();
                    } else {
                        self.unexpected(token);
                    }
                }
                "select" => {
                    if !self.close_select() {
                        self.unexpected(token);
                    }
                }
                "template" => self.process_using_rules_for(InsertionMode::InHead, token),
                _ => self.unexpected(token),
            },

            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(super) fn handle_in_select_in_table_mode(&mut self, token: &Token) {
        const TABLE_TAGS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

        match token {
            // "Parse error. Pop elements from the stack of open elements until a
            // select element has been popped from the stack. Reset the insertion
            // mode appropriately. Reprocess the token."
            Token::StartTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
                self.pop_until("select");
                self.reset_insertion_mode_appropriately();
                self.reprocess(token);
            }
            // "Parse error. If the stack of open elements does not have an
            // element in table scope that is an HTML element with the same tag
            // name as that of the token, then ignore the token."
            Token::EndTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
                if !self.has_element_in_scope(name, Scope::Table) {
                    return;
                }
                self.pop_until("select");
                self.reset_insertion_mode_appropriately();
                self.reprocess(token);
            }
            _ => self.process_using_rules_for(InsertionMode::InSelect, token),
        }
    }
}
