//! The list of active formatting elements and the adoption agency algorithm.

use weft_dom::{Namespace, NodeId, TreeSink};

use super::core::{ActiveFormattingElement, HTMLTreeBuilder, Scope};
use crate::tokenizer::Token;

/// Where the adoption agency algorithm puts the formatting element's clone in
/// the list of active formatting elements.
#[derive(Debug, Clone, Copy)]
enum Bookmark {
    /// In place of the formatting element.
    Replace,
    /// Immediately after this element.
    InsertAfter(NodeId),
}

impl<S: TreeSink> HTMLTreeBuilder<S> {
    pub(super) fn formatting_index_of(&self, node: NodeId) -> Option<usize> {
        self.active_formatting_elements.iter().position(|entry| {
            matches!(entry, ActiveFormattingElement::Element { node_id, .. } if *node_id == node)
        })
    }

    pub(super) fn remove_from_active_formatting_elements(&mut self, node: NodeId) {
        if let Some(index) = self.formatting_index_of(node) {
            let _ = self.active_formatting_elements.remove(index);
        }
    }

    /// Index of the last entry named `name` after the last marker.
    pub(super) fn last_formatting_element_named(&self, name: &str) -> Option<usize> {
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => return None,
                ActiveFormattingElement::Element { token, .. } if token.tag_name() == Some(name) => {
                    return Some(index);
                }
                ActiveFormattingElement::Element { .. } => {}
            }
        }
        None
    }

    pub(super) fn insert_marker(&mut self) {
        self.active_formatting_elements
            .push(ActiveFormattingElement::Marker);
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// "If there are already three elements in the list of active formatting
    /// elements after the last marker, if any, or anywhere in the list if there
    /// are no markers, that have the same tag name, namespace, and attributes
    /// as element, then remove the earliest such element from the list of
    /// active formatting elements." (the Noah's Ark clause)
    pub(super) fn push_active_formatting_element(&mut self, node_id: NodeId, token: &Token) {
        let mut matching = Vec::new();
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => break,
                ActiveFormattingElement::Element { token: existing, .. } => {
                    if existing.tag_name() == token.tag_name()
                        && same_attributes(existing, token)
                    {
                        matching.push(index);
                    }
                }
            }
        }
        if matching.len() >= 3
            && let Some(&earliest) = matching.last()
        {
            let _ = self.active_formatting_elements.remove(earliest);
        }

        self.active_formatting_elements
            .push(ActiveFormattingElement::Element {
                node_id,
                token: token.clone(),
            });
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if matches!(entry, ActiveFormattingElement::Marker) {
                break;
            }
        }
    }

    fn is_marker_or_open(&self, index: usize) -> bool {
        match &self.active_formatting_elements[index] {
            ActiveFormattingElement::Marker => true,
            ActiveFormattingElement::Element { node_id, .. } => {
                self.stack_of_open_elements.contains(node_id)
            }
        }
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// Rewinds to the earliest entry after the last marker-or-open entry, then
    /// recreates every entry from there to the end of the list.
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        let len = self.active_formatting_elements.len();
        let mut start = len;
        while start > 0 && !self.is_marker_or_open(start - 1) {
            start -= 1;
        }

        for index in start..len {
            let ActiveFormattingElement::Element { token, .. } =
                self.active_formatting_elements[index].clone()
            else {
                continue;
            };
            let node_id = self.insert_html_element(&token);
            self.active_formatting_elements[index] =
                ActiveFormattingElement::Element { node_id, token };
        }
    }

    /// [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    pub(super) fn run_adoption_agency(&mut self, token: &Token) {
        // STEP 1: "Let subject be token's tag name."
        let subject = token.tag_name().unwrap_or_default().to_string();

        // STEP 2: "If the current node is an HTML element whose tag name is
        // subject, and the current node is not in the list of active formatting
        // elements, then pop the current node off the stack of open elements
        // and return."
        if let Some(current) = self.current_node()
            && self.is_html_element(current, &subject)
            && self.formatting_index_of(current).is_none()
        {
            self.pop_current_node();
            return;
        }

        // STEP 3-4: outer loop, at most 8 times.
        for _ in 0..8 {
            // "Let formatting element be the last element in the list of active
            // formatting elements that is between the end of the list and the
            // last marker in the list, if any, or the start of the list
            // otherwise, and has the tag name subject."
            let Some(formatting_index) = self.last_formatting_element_named(&subject) else {
                // "If there is no such element, then return and instead act as
                // described in the "any other end tag" entry above."
                self.any_other_end_tag(token);
                return;
            };
            let ActiveFormattingElement::Element {
                node_id: formatting_element,
                token: formatting_token,
            } = self.active_formatting_elements[formatting_index].clone()
            else {
                return;
            };

            // "If formatting element is not in the stack of open elements, then
            // this is a parse error; remove the element from the list, and
            // return."
            let Some(formatting_stack_index) = self
                .stack_of_open_elements
                .iter()
                .position(|&node| node == formatting_element)
            else {
                self.parse_error("adoption-agency-formatting-element-not-open");
                let _ = self.active_formatting_elements.remove(formatting_index);
                return;
            };

            // "If formatting element is in the stack of open elements, but the
            // element is not in scope, then this is a parse error; return."
            if !self.has_node_in_scope(formatting_element, Scope::Default) {
                self.parse_error("adoption-agency-formatting-element-not-in-scope");
                return;
            }

            // "If formatting element is not the current node, this is a parse
            // error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.parse_error("adoption-agency-formatting-element-not-current");
            }

            // "Let furthest block be the topmost node in the stack of open
            // elements that is lower in the stack than formatting element, and
            // is an element in the special category."
            let furthest_block_index = (formatting_stack_index + 1
                ..self.stack_of_open_elements.len())
                .find(|&index| self.is_special(self.stack_of_open_elements[index]));

            // "If there is no furthest block, then the UA must first pop all the
            // nodes from the bottom of the stack of open elements, from the
            // current node up to and including formatting element, then remove
            // formatting element from the list of active formatting elements,
            // and finally return."
            let Some(furthest_block_index) = furthest_block_index else {
                self.pop_until_node(formatting_element);
                self.remove_from_active_formatting_elements(formatting_element);
                return;
            };
            let furthest_block = self.stack_of_open_elements[furthest_block_index];

            // "Let common ancestor be the element immediately above formatting
            // element in the stack of open elements."
            let Some(common_ancestor) = formatting_stack_index
                .checked_sub(1)
                .and_then(|index| self.stack_element(index))
            else {
                return;
            };

            let mut bookmark = Bookmark::Replace;
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block;

            // Inner loop.
            let mut inner_loop_counter = 0;
            loop {
                inner_loop_counter += 1;

                // "Let node be the element immediately above node in the stack of
                // open elements, or if node is no longer in the stack of open
                // elements, the element that was immediately above node in the
                // stack of open elements before node was removed."
                node_index -= 1;
                let node = self.stack_of_open_elements[node_index];

                // "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // "If inner loop counter is greater than 3 and node is in the list
                // of active formatting elements, then remove node from the list
                // of active formatting elements."
                let mut node_formatting_index = self.formatting_index_of(node);
                if inner_loop_counter > 3
                    && let Some(index) = node_formatting_index.take()
                {
                    let _ = self.active_formatting_elements.remove(index);
                }

                // "If node is not in the list of active formatting elements, then
                // remove node from the stack of open elements and continue."
                let Some(node_formatting_index) = node_formatting_index else {
                    let _ = self.stack_of_open_elements.remove(node_index);
                    continue;
                };

                // "Create an element for the token for which the element node was
                // created, in the HTML namespace, with common ancestor as the
                // intended parent; replace the entry for node in the list of
                // active formatting elements with an entry for the new element,
                // replace the entry for node in the stack of open elements with
                // an entry for the new element, and let node be the new element."
                let ActiveFormattingElement::Element {
                    token: node_token, ..
                } = self.active_formatting_elements[node_formatting_index].clone()
                else {
                    continue;
                };
                let replacement = self.create_element_for_token(&node_token, Namespace::Html);
                self.active_formatting_elements[node_formatting_index] =
                    ActiveFormattingElement::Element {
                        node_id: replacement,
                        token: node_token,
                    };
                self.stack_of_open_elements[node_index] = replacement;

                // "If last node is furthest block, then move the aforementioned
                // bookmark to be immediately after the new node in the list of
                // active formatting elements."
                if last_node == furthest_block {
                    bookmark = Bookmark::InsertAfter(replacement);
                }

                // "Append last node to node."
                self.sink.append_child(replacement, last_node);
                last_node = replacement;
            }

            // "Insert whatever last node ended up being in the appropriate place
            // for inserting a node, but using common ancestor as the override
            // target."
            let point = self.appropriate_place_for_inserting(Some(common_ancestor));
            self.sink.remove_from_parent(last_node);
            self.insert_node_at(point, last_node);

            // "Create an element for the token for which formatting element was
            // created, in the HTML namespace, with furthest block as the intended
            // parent."
            let new_element = self.create_element_for_token(&formatting_token, Namespace::Html);

            // "Take all of the child nodes of furthest block and append them to
            // the element created in the last step."
            self.sink.reparent_children(furthest_block, new_element);

            // "Append that new element to furthest block."
            self.sink.append_child(furthest_block, new_element);

            // "Remove formatting element from the list of active formatting
            // elements, and insert the new element into the list of active
            // formatting elements at the position of the aforementioned
            // bookmark."
            let entry = ActiveFormattingElement::Element {
                node_id: new_element,
                token: formatting_token,
            };
            match bookmark {
                Bookmark::Replace => {
                    if let Some(index) = self.formatting_index_of(formatting_element) {
                        self.active_formatting_elements[index] = entry;
                    }
                }
                Bookmark::InsertAfter(after) => {
                    self.remove_from_active_formatting_elements(formatting_element);
                    let index = self
                        .formatting_index_of(after)
                        .map_or(self.active_formatting_elements.len(), |index| index + 1);
                    self.active_formatting_elements.insert(index, entry);
                }
            }

            // "Remove formatting element from the stack of open elements, and
            // insert the new element into the stack of open elements immediately
            // below the position of furthest block in that stack."
            self.remove_from_stack(formatting_element);
            let index = self
                .stack_of_open_elements
                .iter()
                .position(|&node| node == furthest_block)
                .map_or(self.stack_of_open_elements.len(), |index| index + 1);
            self.stack_of_open_elements.insert(index, new_element);
        }
    }

    /// [§ 13.2.6.4.7 "Any other end tag"](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(super) fn any_other_end_tag(&mut self, token: &Token) {
        let name = token.tag_name().unwrap_or_default();
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            // "If node is an HTML element with the same tag name as the token,
            // then: generate implied end tags, except for HTML elements with the
            // same tag name as the token. If node is not the current node, then
            // this is a parse error. Pop all the nodes from the current node up
            // to node, including node, then stop these steps."
            if self.is_html_element(node, name) {
                self.generate_implied_end_tags(Some(name));
                if self.current_node() != Some(node) {
                    self.unexpected(token);
                }
                self.pop_until_node(node);
                return;
            }
            // "Otherwise, if node is in the special category, then this is a
            // parse error; ignore the token, and return."
            if self.is_special(node) {
                self.unexpected(token);
                return;
            }
        }
    }
}

/// Attribute lists compare as sets: same names with the same values.
fn same_attributes(a: &Token, b: &Token) -> bool {
    let (a, b) = (a.attributes(), b.attributes());
    a.len() == b.len()
        && a.iter().all(|attr| {
            b.iter()
                .any(|other| other.name == attr.name && other.value == attr.value)
        })
}
