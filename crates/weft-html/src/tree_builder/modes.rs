//! The document-level insertion modes: everything outside the body, the
//! text and template modes, and the frameset modes.

use weft_dom::{Namespace, QuirksMode, TreeSink};

use super::core::{HTMLTreeBuilder, InsertionMode, is_whitespace};
use super::quirks::{is_doctype_parse_error, quirks_mode_for_doctype};
use crate::tokenizer::{Token, TokenizerState};

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(super) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            // or U+0020 SPACE"
            // "Ignore the token."
            Token::Character { data } if is_whitespace(*data) => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                let document = self.sink.document();
                self.insert_comment_in(data, document);
            }

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                let name = name.as_deref();
                let public = public_identifier.as_deref();
                let system = system_identifier.as_deref();
                if is_doctype_parse_error(name, public, system) {
                    self.unexpected(token);
                }

                // "Append a DocumentType node to the Document node, with its
                // name set to the name given in the DOCTYPE token, or the empty
                // string if the name was missing; its public ID set to the public
                // identifier given in the DOCTYPE token, or the empty string if
                // the public identifier was missing; and its system ID set to the
                // system identifier given in the DOCTYPE token, or the empty
                // string if the system identifier was missing."
                let doctype = self.sink.create_doctype(
                    name.unwrap_or_default(),
                    public.unwrap_or_default(),
                    system.unwrap_or_default(),
                );
                let document = self.sink.document();
                self.sink.append_child(document, doctype);

                let mode = quirks_mode_for_doctype(name, public, system, *force_quirks);
                self.quirks_mode = mode;
                self.sink.set_quirks_mode(mode);
                self.switch_mode(InsertionMode::BeforeHtml);
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is a
            // parse error; if the parser cannot change the mode flag is false,
            // set the Document to quirks mode."
            // "In any case, switch the insertion mode to "before html", then
            // reprocess the token."
            _ => {
                self.parse_error("missing-doctype");
                self.quirks_mode = QuirksMode::Quirks;
                self.sink.set_quirks_mode(QuirksMode::Quirks);
                self.switch_mode(InsertionMode::BeforeHtml);
                self.reprocess(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(super) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            Token::Doctype { .. } => self.unexpected(token),

            Token::Comment { data } => {
                let document = self.sink.document();
                self.insert_comment_in(data, document);
            }

            Token::Character { data } if is_whitespace(*data) => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document object.
            // Put this element in the stack of open elements."
            Token::StartTag { name, .. } if name == "html" => {
                let html = self.create_element_for_token(token, Namespace::Html);
                let document = self.sink.document();
                self.sink.append_child(document, html);
                self.stack_of_open_elements.push(html);
                self.switch_mode(InsertionMode::BeforeHead);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.unexpected(token);
            }

            // "Anything else"
            // "Create an html element whose node document is the Document object.
            // Append it to the Document object. Put this element in the stack of
            // open elements."
            // "Switch the insertion mode to "before head", then reprocess the
            // token."
            _ => {
                let html = self
                    .sink
                    .create_element(Namespace::Html, "html", Vec::new());
                let document = self.sink.document();
                self.sink.append_child(document, html);
                self.stack_of_open_elements.push(html);
                self.switch_mode(InsertionMode::BeforeHead);
                self.reprocess(token);
            }
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => {}
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(token);
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
            }

            Token::EndTag { name, .. }
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.unexpected(token);
            }

            // "Anything else"
            // "Insert an HTML element for a "head" start tag token with no
            // attributes."
            _ => {
                let head = self.insert_synthesized_element("head");
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
                self.reprocess(token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            //
            // "meta" is the same apart from encoding changes, which do not apply
            // to already-decoded input.
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base" | "basefont" | "bgsound" | "link" | "meta"
                ) =>
            {
                let _ = self.insert_html_element(token);
                self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            // "A start tag whose tag name is "title""
            // "Follow the generic RCDATA element parsing algorithm."
            Token::StartTag { name, .. } if name == "title" => {
                self.parse_text_element(token, TokenizerState::Rcdata);
            }

            // "A start tag whose tag name is "noscript", if the scripting flag is
            // enabled" / "A start tag whose tag name is one of: "noframes",
            // "style""
            // "Follow the generic raw text element parsing algorithm."
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "noframes" | "style")
                    || (name == "noscript" && self.options.scripting) =>
            {
                self.parse_text_element(token, TokenizerState::Rawtext);
            }

            // "A start tag whose tag name is "noscript", if the scripting flag is
            // disabled"
            Token::StartTag { name, .. } if name == "noscript" => {
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InHeadNoscript);
            }

            // "A start tag whose tag name is "script""
            // "Let the adjusted insertion location be the appropriate place for
            // inserting a node. Create an element for the token in the HTML
            // namespace, with the intended parent being the element in which the
            // adjusted insertion location finds itself. Insert the newly created
            // element at the adjusted insertion location. Push the element onto
            // the stack of open elements so that it is the new current node.
            // Switch the tokenizer to the script data state. Let the original
            // insertion mode be the current insertion mode. Switch the insertion
            // mode to "text"."
            Token::StartTag { name, .. } if name == "script" => {
                let point = self.appropriate_place_for_inserting(None);
                let script = self.create_element_for_token(token, Namespace::Html);
                self.insert_node_at(point, script);
                self.stack_of_open_elements.push(script);
                self.set_lexical_state(TokenizerState::ScriptData);
                self.original_insertion_mode = self.insertion_mode;
                self.switch_mode(InsertionMode::Text);
            }

            // "An end tag whose tag name is "head""
            // "Pop the current node (which will be the head element) off the
            // stack of open elements."
            // "Switch the insertion mode to "after head"."
            Token::EndTag { name, .. } if name == "head" => {
                self.pop_current_node();
                self.switch_mode(InsertionMode::AfterHead);
            }

            // "A start tag whose tag name is "template""
            Token::StartTag { name, .. } if name == "template" => {
                let _ = self.insert_html_element(token);
                self.insert_marker();
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InTemplate);
                self.template_insertion_modes.push(InsertionMode::InTemplate);
            }

            // "An end tag whose tag name is "template""
            Token::EndTag { name, .. } if name == "template" => {
                if !self.stack_contains("template") {
                    self.unexpected(token);
                    return;
                }
                self.generate_all_implied_end_tags_thoroughly();
                if !self.current_node_is("template") {
                    self.unexpected(token);
                }
                self.pop_until("template");
                self.clear_active_formatting_elements_to_last_marker();
                let _ = self.template_insertion_modes.pop();
                self.reset_insertion_mode_appropriately();
            }

            // "A start tag whose tag name is "head"" / "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" => self.unexpected(token),
            Token::EndTag { name, .. } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.unexpected(token);
            }

            // "Anything else"
            // "Pop the current node (which will be the head element) off the
            // stack of open elements."
            // "Switch the insertion mode to "after head"."
            // "Reprocess the token."
            _ => {
                self.pop_current_node();
                self.switch_mode(InsertionMode::AfterHead);
                self.reprocess(token);
            }
        }
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head
            // element."
            Token::EndTag { name, .. } if name == "noscript" => {
                self.pop_current_node();
                self.switch_mode(InsertionMode::InHead);
            }

            Token::Character { data } if is_whitespace(*data) => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::Comment { .. } => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            Token::StartTag { name, .. } if matches!(name.as_str(), "head" | "noscript") => {
                self.unexpected(token);
            }
            Token::EndTag { name, .. } if name != "br" => self.unexpected(token),

            // "Anything else"
            // "Parse error."
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head
            // element."
            // "Switch the insertion mode to "in head"."
            // "Reprocess the token."
            _ => {
                self.unexpected(token);
                self.pop_current_node();
                self.switch_mode(InsertionMode::InHead);
                self.reprocess(token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "body""
            // "Insert an HTML element for the token."
            // "Set the frameset-ok flag to "not ok"."
            // "Switch the insertion mode to "in body"."
            Token::StartTag { name, .. } if name == "body" => {
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InBody);
            }

            Token::StartTag { name, .. } if name == "frameset" => {
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InFrameset);
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "Parse error."
            // "Push the node pointed to by the head element pointer onto the
            // stack of open elements."
            // "Process the token using the rules for the "in head" insertion
            // mode."
            // "Remove the node pointed to by the head element pointer from the
            // stack of open elements. (It might not be the current node at this
            // point.)"
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base"
                        | "basefont"
                        | "bgsound"
                        | "link"
                        | "meta"
                        | "noframes"
                        | "script"
                        | "style"
                        | "template"
                        | "title"
                ) =>
            {
                self.unexpected(token);
                let Some(head) = self.head_element_pointer else {
                    self.process_using_rules_for(InsertionMode::InHead, token);
                    return;
                };
                self.stack_of_open_elements.push(head);
                self.process_using_rules_for(InsertionMode::InHead, token);
                self.remove_from_stack(head);
            }

            Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            Token::StartTag { name, .. } if name == "head" => self.unexpected(token),
            Token::EndTag { name, .. } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.unexpected(token);
            }

            // "Anything else"
            // "Insert an HTML element for a "body" start tag token with no
            // attributes."
            // "Switch the insertion mode to "in body"."
            // "Reprocess the current token."
            _ => {
                let _ = self.insert_synthesized_element("body");
                self.switch_mode(InsertionMode::InBody);
                self.reprocess(token);
            }
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(super) fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Character { data } => self.insert_character(*data),

            // "An end-of-file token"
            // "Parse error."
            // "If the current node is a script element, then set its already
            // started to true."
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode and
            // reprocess the token."
            Token::EndOfFile => {
                self.parse_error("eof-in-element-that-can-contain-only-text");
                self.pop_current_node();
                self.switch_mode(self.original_insertion_mode);
                self.reprocess(token);
            }

            // "An end tag whose tag name is "script"" / "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            //
            // Scripts are never executed, so both cases are the same.
            Token::EndTag { .. } => {
                self.pop_current_node();
                self.switch_mode(self.original_insertion_mode);
            }

            Token::Doctype { .. } | Token::StartTag { .. } | Token::Comment { .. } => {
                self.unexpected(token);
            }
        }
    }

    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(super) fn handle_in_template_mode(&mut self, token: &Token) {
        match token {
            Token::Character { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base"
                        | "basefont"
                        | "bgsound"
                        | "link"
                        | "meta"
                        | "noframes"
                        | "script"
                        | "style"
                        | "template"
                        | "title"
                ) =>
            {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "Pop the current template insertion mode off the stack of template
            // insertion modes. Push "in table" onto the stack of template
            // insertion modes so that it is the new current template insertion
            // mode. Switch the insertion mode to "in table", and reprocess the
            // token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.retarget_template(InsertionMode::InTable, token);
            }
            Token::StartTag { name, .. } if name == "col" => {
                self.retarget_template(InsertionMode::InColumnGroup, token);
            }
            Token::StartTag { name, .. } if name == "tr" => {
                self.retarget_template(InsertionMode::InTableBody, token);
            }
            Token::StartTag { name, .. } if matches!(name.as_str(), "td" | "th") => {
                self.retarget_template(InsertionMode::InRow, token);
            }
            Token::StartTag { .. } => self.retarget_template(InsertionMode::InBody, token),

            Token::EndTag { .. } => self.unexpected(token),

            // "An end-of-file token"
            // "If there is no template element on the stack of open elements,
            // then stop parsing."
            // "Otherwise, this is a parse error."
            // "Pop elements from the stack of open elements until a template
            // element has been popped from the stack."
            // "Clear the list of active formatting elements up to the last
            // marker."
            // "Pop the current template insertion mode off the stack of template
            // insertion modes."
            // "Reset the insertion mode appropriately."
            // "Reprocess the token."
            Token::EndOfFile => {
                if !self.stack_contains("template") {
                    self.stop_parsing();
                    return;
                }
                self.parse_error("eof-in-template");
                self.pop_until("template");
                self.clear_active_formatting_elements_to_last_marker();
                let _ = self.template_insertion_modes.pop();
                self.reset_insertion_mode_appropriately();
                self.reprocess(token);
            }
        }
    }

    fn retarget_template(&mut self, mode: InsertionMode, token: &Token) {
        let _ = self.template_insertion_modes.pop();
        self.template_insertion_modes.push(mode);
        self.switch_mode(mode);
        self.reprocess(token);
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { data } => {
                let target = self
                    .stack_element(0)
                    .unwrap_or_else(|| self.sink.document());
                self.insert_comment_in(data, target);
            }

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            Token::EndTag { name, .. } if name == "html" => {
                self.switch_mode(InsertionMode::AfterAfterBody);
            }

            Token::EndOfFile => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            _ => {
                self.unexpected(token);
                self.switch_mode(InsertionMode::InBody);
                self.reprocess(token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            Token::StartTag { name, .. } if name == "frameset" => {
                let _ = self.insert_html_element(token);
            }

            // "An end tag whose tag name is "frameset""
            // "If the current node is the root html element, then this is a parse
            // error; ignore the token. (fragment case)"
            // "Otherwise, pop the current node from the stack of open elements."
            // "If the parser was not created as part of the HTML fragment parsing
            // algorithm (fragment case), and the current node is no longer a
            // frameset element, then switch the insertion mode to "after
            // frameset"."
            Token::EndTag { name, .. } if name == "frameset" => {
                if self.current_node_is("html") {
                    self.unexpected(token);
                    return;
                }
                self.pop_current_node();
                if !self.current_node_is("frameset") {
                    self.switch_mode(InsertionMode::AfterFrameset);
                }
            }

            Token::StartTag { name, .. } if name == "frame" => {
                let _ = self.insert_html_element(token);
                self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is a
            // parse error."
            // "Stop parsing."
            Token::EndOfFile => {
                if !self.current_node_is("html") {
                    self.parse_error("eof-in-frameset");
                }
                self.stop_parsing();
            }

            _ => self.unexpected(token),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected(token),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::EndTag { name, .. } if name == "html" => {
                self.switch_mode(InsertionMode::AfterAfterFrameset);
            }
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::EndOfFile => self.stop_parsing(),
            _ => self.unexpected(token),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(super) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            Token::Comment { data } => {
                let document = self.sink.document();
                self.insert_comment_in(data, document);
            }
            Token::Doctype { .. } => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::Character { data } if is_whitespace(*data) => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::EndOfFile => self.stop_parsing(),
            _ => {
                self.unexpected(token);
                self.switch_mode(InsertionMode::InBody);
                self.reprocess(token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(super) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Comment { data } => {
                let document = self.sink.document();
                self.insert_comment_in(data, document);
            }
            Token::Doctype { .. } => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::Character { data } if is_whitespace(*data) => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::EndOfFile => self.stop_parsing(),
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            _ => self.unexpected(token),
        }
    }
}
