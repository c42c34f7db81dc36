use log::{debug, trace};
use strum_macros::Display;

use weft_common::warning::warn_once;
use weft_dom::{Namespace, NodeId, QuirksMode, TreeSink};

use crate::config::ParserOptions;
use crate::error::{ParseIssue, ParseStage};
use crate::tokenizer::{SinkResult, Token, TokenSink, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
///
/// "The list of active formatting elements... is used to handle mis-nested
/// formatting element tags."
#[derive(Debug, Clone)]
pub enum ActiveFormattingElement {
    /// A formatting element entry.
    Element {
        /// The element in the document.
        node_id: NodeId,
        /// The token the element was created for, kept so the element can be
        /// recreated by reconstruction or the adoption agency algorithm.
        token: Token,
    },
    /// "A marker is an entry in the list of active formatting elements that is
    /// distinct from any element."
    ///
    /// Pushed when entering applet, object, marquee, template, td, th and
    /// caption.
    Marker,
}

/// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
///
/// The element types that bound each "has an element in ... scope" check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scope {
    Default,
    ListItem,
    Button,
    Table,
    Select,
}

/// Where a new node goes: appended to `parent`, or inserted before `before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct InsertionPoint {
    pub(super) parent: NodeId,
    pub(super) before: Option<NodeId>,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Builds a document in a [`TreeSink`] from the tokens the tokenizer hands it.
pub struct HTMLTreeBuilder<S: TreeSink> {
    pub(super) sink: S,
    pub(super) options: ParserOptions,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,
    /// [§ 13.2.4.1 The original insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    pub(super) original_insertion_mode: InsertionMode,
    /// [§ 13.2.4.1 The stack of template insertion modes](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Handles into the sink; the stack never owns a node.
    pub(super) stack_of_open_elements: Vec<NodeId>,
    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: Vec<ActiveFormattingElement>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element_pointer: Option<NodeId>,
    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    pub(super) frameset_ok: bool,
    /// The document's mode, as classified from its DOCTYPE.
    pub(super) quirks_mode: QuirksMode,
    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,
    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    /// "The pending table character tokens list"
    pub(super) pending_table_character_tokens: Vec<char>,

    /// Set by `<pre>`, `<listing>` and `<textarea>`: "If the next token is a
    /// U+000A LINE FEED (LF) character token, then ignore that token."
    pub(super) ignore_next_line_feed: bool,
    /// A start tag with the self-closing flag that nothing has acknowledged yet.
    pub(super) self_closing_unacknowledged: bool,
    /// Lexical state to hand back to the tokenizer once this token is done.
    pub(super) pending_lexical_state: Option<TokenizerState>,

    pub(super) issues: Vec<ParseIssue>,
    pub(super) token_index: usize,
    pub(super) stopped: bool,
}

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// Create a tree builder that writes into `sink`.
    #[must_use]
    pub fn new(sink: S, options: ParserOptions) -> Self {
        Self {
            sink,
            options,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: InsertionMode::Initial,
            template_insertion_modes: Vec::new(),
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            frameset_ok: true,
            quirks_mode: QuirksMode::NoQuirks,
            foster_parenting: false,
            pending_table_character_tokens: Vec::new(),
            ignore_next_line_feed: false,
            self_closing_unacknowledged: false,
            pending_lexical_state: None,
            issues: Vec::new(),
            token_index: 0,
            stopped: false,
        }
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// True once "stop parsing" has run.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Parse issues recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The sink being built.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Hand back the sink and the recorded issues.
    #[must_use]
    pub fn into_parts(self) -> (S, Vec<ParseIssue>) {
        (self.sink, self.issues)
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// "As each token is emitted from the tokenizer, the user agent must follow
    /// the appropriate steps from the following list, known as the tree
    /// construction dispatcher."
    fn dispatch(&mut self, token: &Token) {
        if self.uses_html_content_rules(token) {
            self.process_using_rules_for(self.insertion_mode, token);
        } else {
            self.process_in_foreign_content(token);
        }
    }

    fn uses_html_content_rules(&self, token: &Token) -> bool {
        let Some(node) = self.adjusted_current_node() else {
            return true;
        };
        let is_start_tag = matches!(token, Token::StartTag { .. });
        let is_character = matches!(token, Token::Character { .. });
        let namespace = self.namespace_of(node);

        // "If the adjusted current node is an element in the HTML namespace"
        namespace == Namespace::Html
            // "If the adjusted current node is a MathML text integration point and
            // the token is a start tag whose tag name is neither "mglyph" nor
            // "malignmark"" or "...and the token is a character token"
            || (self.is_mathml_text_integration_point(node)
                && ((is_start_tag
                    && !matches!(token.tag_name(), Some("mglyph" | "malignmark")))
                    || is_character))
            // "If the adjusted current node is a MathML annotation-xml element and
            // the token is a start tag whose tag name is "svg""
            || (namespace == Namespace::MathMl
                && self.name_of(node) == "annotation-xml"
                && token.is_start_tag("svg"))
            // "If the adjusted current node is an HTML integration point and the
            // token is a start tag" or "...a character token"
            || (self.is_html_integration_point(node) && (is_start_tag || is_character))
            // "If the token is an end-of-file token"
            || token.is_eof()
    }

    /// Route a token to the handler for `mode`.
    pub(super) fn process_using_rules_for(&mut self, mode: InsertionMode, token: &Token) {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// "Reprocess the token": run it again under the current insertion mode.
    pub(super) fn reprocess(&mut self, token: &Token) {
        self.process_using_rules_for(self.insertion_mode, token);
    }

    pub(super) fn switch_mode(&mut self, mode: InsertionMode) {
        trace!("insertion mode {} -> {mode}", self.insertion_mode);
        self.insertion_mode = mode;
    }

    /// Ask the tokenizer to switch lexical state after the current token.
    pub(super) fn set_lexical_state(&mut self, state: TokenizerState) {
        self.pending_lexical_state = Some(state);
    }

    /// [§ 13.2.7 Stopping parsing](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements."
    pub(super) fn stop_parsing(&mut self) {
        debug!("stop parsing after {} tokens", self.token_index);
        self.stack_of_open_elements.clear();
        self.stopped = true;
    }

    /// [§ 13.2.6 Acknowledge the self-closing flag](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    pub(super) const fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_unacknowledged = false;
    }

    /// Record a tree-construction parse error.
    pub(super) fn parse_error(&mut self, message: &str) {
        if self.options.strict {
            let _ = warn_once("HTML Tree Builder", message);
        } else {
            debug!("parse error at token {}: {message}", self.token_index);
        }
        if self.options.collect_issues {
            self.issues.push(ParseIssue {
                stage: ParseStage::TreeConstruction,
                message: message.to_string(),
                position: self.token_index,
                is_error: true,
            });
        }
    }

    /// Parse error naming the token and the mode it arrived in.
    pub(super) fn unexpected(&mut self, token: &Token) {
        let message = format!("unexpected {token} in {} mode", self.insertion_mode);
        self.parse_error(&message);
    }
}

impl<S: TreeSink> TokenSink for HTMLTreeBuilder<S> {
    fn process_token(&mut self, token: Token) -> SinkResult {
        self.token_index += 1;
        if self.stopped {
            return SinkResult::Stop;
        }
        if std::mem::take(&mut self.ignore_next_line_feed)
            && matches!(token, Token::Character { data: '\n' })
        {
            return SinkResult::Continue;
        }

        self.self_closing_unacknowledged =
            matches!(token, Token::StartTag { self_closing: true, .. });
        self.dispatch(&token);
        if std::mem::take(&mut self.self_closing_unacknowledged) {
            self.parse_error("non-void-html-element-start-tag-with-trailing-solidus");
        }

        if self.stopped && !token.is_eof() {
            SinkResult::Stop
        } else if let Some(state) = self.pending_lexical_state.take() {
            SinkResult::SwitchLexicalState(state)
        } else {
            SinkResult::Continue
        }
    }

    fn adjusted_current_node_is_foreign(&self) -> bool {
        self.adjusted_current_node()
            .is_some_and(|node| self.namespace_of(node) != Namespace::Html)
    }
}

// =============================================================================
// Element queries
// =============================================================================

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// "The current node is the bottommost node in this stack of open
    /// elements."
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it; otherwise, the adjusted
    /// current node is the current node." Fragment parsing is not supported.
    pub(super) fn adjusted_current_node(&self) -> Option<NodeId> {
        self.current_node()
    }

    pub(super) fn name_of(&self, node: NodeId) -> &str {
        self.sink.element_name(node).unwrap_or_default()
    }

    pub(super) fn namespace_of(&self, node: NodeId) -> Namespace {
        self.sink.element_namespace(node).unwrap_or(Namespace::Html)
    }

    /// True if `node` is an HTML element named `name`.
    pub(super) fn is_html_element(&self, node: NodeId, name: &str) -> bool {
        self.namespace_of(node) == Namespace::Html && self.name_of(node) == name
    }

    /// True if `node` is an HTML element with one of `names`.
    pub(super) fn is_html_element_in(&self, node: NodeId, names: &[&str]) -> bool {
        self.namespace_of(node) == Namespace::Html && names.contains(&self.name_of(node))
    }

    pub(super) fn current_node_is(&self, name: &str) -> bool {
        self.current_node()
            .is_some_and(|node| self.is_html_element(node, name))
    }

    pub(super) fn current_node_is_one_of(&self, names: &[&str]) -> bool {
        self.current_node()
            .is_some_and(|node| self.is_html_element_in(node, names))
    }

    /// True if an HTML element named `name` is anywhere on the stack.
    pub(super) fn stack_contains(&self, name: &str) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&node| self.is_html_element(node, name))
    }

    /// The element at `index` on the stack, counting from the html element.
    pub(super) fn stack_element(&self, index: usize) -> Option<NodeId> {
        self.stack_of_open_elements.get(index).copied()
    }

    /// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
    pub(super) fn is_special(&self, node: NodeId) -> bool {
        let name = self.name_of(node);
        match self.namespace_of(node) {
            Namespace::Html => is_special_html_element(name),
            Namespace::MathMl => {
                matches!(name, "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml")
            }
            Namespace::Svg => matches!(name, "foreignObject" | "desc" | "title"),
            Namespace::XLink | Namespace::Xml | Namespace::XmlNs => false,
        }
    }

    /// [§ 13.2.6.2 MathML text integration point](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
    pub(super) fn is_mathml_text_integration_point(&self, node: NodeId) -> bool {
        self.namespace_of(node) == Namespace::MathMl
            && matches!(self.name_of(node), "mi" | "mo" | "mn" | "ms" | "mtext")
    }

    /// [§ 13.2.6.2 HTML integration point](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
    ///
    /// A MathML annotation-xml element whose start tag had an "encoding"
    /// attribute of "text/html" or "application/xhtml+xml", or an SVG
    /// foreignObject, desc or title element.
    pub(super) fn is_html_integration_point(&self, node: NodeId) -> bool {
        match self.namespace_of(node) {
            Namespace::MathMl => {
                self.name_of(node) == "annotation-xml"
                    && self.sink.attribute(node, "encoding").is_some_and(|encoding| {
                        encoding.eq_ignore_ascii_case("text/html")
                            || encoding.eq_ignore_ascii_case("application/xhtml+xml")
                    })
            }
            Namespace::Svg => matches!(self.name_of(node), "foreignObject" | "desc" | "title"),
            _ => false,
        }
    }
}

// =============================================================================
// Scope
// =============================================================================

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.4.2 Has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    fn is_scope_boundary(&self, node: NodeId, scope: Scope) -> bool {
        let name = self.name_of(node);
        let extends_default = matches!(scope, Scope::Default | Scope::ListItem | Scope::Button);
        match self.namespace_of(node) {
            Namespace::Html => match scope {
                Scope::Default => is_default_scope_boundary(name),
                Scope::ListItem => is_default_scope_boundary(name) || matches!(name, "ol" | "ul"),
                Scope::Button => is_default_scope_boundary(name) || name == "button",
                Scope::Table => matches!(name, "html" | "table" | "template"),
                Scope::Select => !matches!(name, "optgroup" | "option"),
            },
            Namespace::MathMl => {
                scope == Scope::Select
                    || (extends_default
                        && matches!(name, "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"))
            }
            Namespace::Svg => {
                scope == Scope::Select
                    || (extends_default && matches!(name, "foreignObject" | "desc" | "title"))
            }
            Namespace::XLink | Namespace::Xml | Namespace::XmlNs => scope == Scope::Select,
        }
    }

    /// Walk the stack from the current node upward until `target` matches or
    /// a boundary of `scope` is reached.
    fn has_in_scope(&self, scope: Scope, target: impl Fn(NodeId) -> bool) -> bool {
        for &node in self.stack_of_open_elements.iter().rev() {
            if target(node) {
                return true;
            }
            if self.is_scope_boundary(node, scope) {
                return false;
            }
        }
        false
    }

    /// "has an element in scope" for an HTML element named `name`.
    pub(super) fn has_element_in_scope(&self, name: &str, scope: Scope) -> bool {
        self.has_in_scope(scope, |node| self.is_html_element(node, name))
    }

    /// "has an element in scope" for any HTML element with one of `names`.
    pub(super) fn has_any_element_in_scope(&self, names: &[&str], scope: Scope) -> bool {
        self.has_in_scope(scope, |node| self.is_html_element_in(node, names))
    }

    /// "has an element in scope" for a specific node.
    pub(super) fn has_node_in_scope(&self, target: NodeId, scope: Scope) -> bool {
        self.has_in_scope(scope, |node| node == target)
    }
}

// =============================================================================
// Stack of open elements
// =============================================================================

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// The thorough variant also closes table structure.
const THOROUGHLY_IMPLIED_END_TAGS: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt",
    "rtc", "tbody", "td", "tfoot", "th", "thead", "tr",
];

impl<S: TreeSink> HTMLTreeBuilder<S> {
    pub(super) fn pop_current_node(&mut self) {
        let _ = self.stack_of_open_elements.pop();
    }

    /// Pop elements until an HTML element named `name` has been popped.
    pub(super) fn pop_until(&mut self, name: &str) {
        while let Some(node) = self.stack_of_open_elements.pop() {
            if self.is_html_element(node, name) {
                break;
            }
        }
    }

    /// Pop elements until an HTML element with one of `names` has been popped.
    pub(super) fn pop_until_one_of(&mut self, names: &[&str]) {
        while let Some(node) = self.stack_of_open_elements.pop() {
            if self.is_html_element_in(node, names) {
                break;
            }
        }
    }

    /// Pop elements until `target` has been popped.
    pub(super) fn pop_until_node(&mut self, target: NodeId) {
        while let Some(node) = self.stack_of_open_elements.pop() {
            if node == target {
                break;
            }
        }
    }

    pub(super) fn remove_from_stack(&mut self, target: NodeId) {
        self.stack_of_open_elements.retain(|&node| node != target);
    }

    /// Pop until the current node is an HTML element with one of `names`.
    /// Used by "clear the stack back to a table / table body / table row
    /// context".
    pub(super) fn clear_stack_back_to(&mut self, names: &[&str]) {
        while let Some(node) = self.current_node() {
            if self.is_html_element_in(node, names) {
                break;
            }
            self.pop_current_node();
        }
    }

    /// "Generate implied end tags", optionally "except for" one tag name.
    pub(super) fn generate_implied_end_tags(&mut self, except: Option<&str>) {
        while let Some(node) = self.current_node() {
            if !self.is_html_element_in(node, IMPLIED_END_TAGS)
                || except.is_some_and(|name| self.is_html_element(node, name))
            {
                break;
            }
            self.pop_current_node();
        }
    }

    /// "Generate all implied end tags thoroughly".
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while self.current_node_is_one_of(THOROUGHLY_IMPLIED_END_TAGS) {
            self.pop_current_node();
        }
    }

    /// [§ 13.2.6.4.7 Close a p element](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    pub(super) fn close_p_element(&mut self) {
        self.generate_implied_end_tags(Some("p"));
        if !self.current_node_is("p") {
            self.parse_error("unexpected-open-element-while-closing-p");
        }
        self.pop_until("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_element_in_button_scope(&mut self) {
        if self.has_element_in_scope("p", Scope::Button) {
            self.close_p_element();
        }
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        let mode = self.appropriate_insertion_mode();
        self.switch_mode(mode);
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        for (index, &node) in self.stack_of_open_elements.iter().enumerate().rev() {
            // "If node is the first node in the stack of open elements, then set
            // last to true."
            let last = index == 0;
            if self.namespace_of(node) != Namespace::Html {
                if last {
                    return InsertionMode::InBody;
                }
                continue;
            }
            match self.name_of(node) {
                "select" => {
                    if !last {
                        for &ancestor in self.stack_of_open_elements[..index].iter().rev() {
                            if self.is_html_element(ancestor, "template") {
                                break;
                            }
                            if self.is_html_element(ancestor, "table") {
                                return InsertionMode::InSelectInTable;
                            }
                        }
                    }
                    return InsertionMode::InSelect;
                }
                "td" | "th" if !last => return InsertionMode::InCell,
                "tr" => return InsertionMode::InRow,
                "tbody" | "thead" | "tfoot" => return InsertionMode::InTableBody,
                "caption" => return InsertionMode::InCaption,
                "colgroup" => return InsertionMode::InColumnGroup,
                "table" => return InsertionMode::InTable,
                "template" => {
                    return self
                        .template_insertion_modes
                        .last()
                        .copied()
                        .unwrap_or(InsertionMode::InTemplate);
                }
                "head" if !last => return InsertionMode::InHead,
                "body" => return InsertionMode::InBody,
                "frameset" => return InsertionMode::InFrameset,
                "html" => {
                    return if self.head_element_pointer.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                }
                _ if last => return InsertionMode::InBody,
                _ => {}
            }
        }
        InsertionMode::InBody
    }
}

// =============================================================================
// Creating and inserting nodes
// =============================================================================

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.1 Appropriate place for inserting a node](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    pub(super) fn appropriate_place_for_inserting(
        &self,
        override_target: Option<NodeId>,
    ) -> InsertionPoint {
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or_else(|| self.sink.document());

        let foster = self.foster_parenting
            && self.is_html_element_in(target, &["table", "tbody", "tfoot", "thead", "tr"]);
        if !foster {
            return InsertionPoint {
                parent: target,
                before: None,
            };
        }

        let stack = &self.stack_of_open_elements;
        let last_template = stack
            .iter()
            .rposition(|&node| self.is_html_element(node, "template"));
        let last_table = stack
            .iter()
            .rposition(|&node| self.is_html_element(node, "table"));

        match (last_template, last_table) {
            // "If there is a last template and either there is no last table, or
            // there is one, but last template is lower (more recently added)
            // than last table in the stack of open elements, then: let adjusted
            // insertion location be inside last template's template contents."
            (Some(template), table) if table.is_none_or(|table| template > table) => {
                InsertionPoint {
                    parent: stack[template],
                    before: None,
                }
            }
            // "If there is no last table, then let adjusted insertion location be
            // inside the first element in the stack of open elements (the html
            // element)."
            (_, None) => InsertionPoint {
                parent: stack.first().copied().unwrap_or(target),
                before: None,
            },
            (_, Some(table_index)) => {
                let table = stack[table_index];
                // "If last table has a parent node, then let adjusted insertion
                // location be inside last table's parent node, immediately before
                // last table."
                if let Some(parent) = self.sink.parent(table) {
                    InsertionPoint {
                        parent,
                        before: Some(table),
                    }
                } else {
                    // "Let previous element be the element immediately above last
                    // table in the stack of open elements."
                    let previous = table_index
                        .checked_sub(1)
                        .and_then(|index| stack.get(index).copied())
                        .unwrap_or(target);
                    InsertionPoint {
                        parent: previous,
                        before: None,
                    }
                }
            }
        }
    }

    pub(super) fn insert_node_at(&mut self, point: InsertionPoint, node: NodeId) {
        match point.before {
            Some(reference) => self.sink.insert_before(point.parent, node, reference),
            None => self.sink.append_child(point.parent, node),
        }
    }

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    pub(super) fn create_element_for_token(&mut self, token: &Token, namespace: Namespace) -> NodeId {
        let name = token.tag_name().unwrap_or_default();
        self.sink
            .create_element(namespace, name, token.attributes().to_vec())
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    pub(super) fn insert_foreign_element(&mut self, token: &Token, namespace: Namespace) -> NodeId {
        let point = self.appropriate_place_for_inserting(None);
        let element = self.create_element_for_token(token, namespace);
        self.insert_node_at(point, element);
        self.stack_of_open_elements.push(element);
        element
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    pub(super) fn insert_html_element(&mut self, token: &Token) -> NodeId {
        self.insert_foreign_element(token, Namespace::Html)
    }

    /// Insert an HTML element for a start tag named `name` with no attributes.
    pub(super) fn insert_synthesized_element(&mut self, name: &str) -> NodeId {
        self.insert_html_element(&Token::start_tag(name))
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_character(&mut self, c: char) {
        let point = self.appropriate_place_for_inserting(None);
        // "If the adjusted insertion location is in a Document node, then
        // return."
        if point.parent == self.sink.document() {
            return;
        }
        let mut buffer = [0; 4];
        self.sink
            .insert_text(point.parent, point.before, c.encode_utf8(&mut buffer));
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        let point = self.appropriate_place_for_inserting(None);
        let comment = self.sink.create_comment(data);
        self.insert_node_at(point, comment);
    }

    /// Insert a comment as the last child of `parent`.
    pub(super) fn insert_comment_in(&mut self, data: &str, parent: NodeId) {
        let comment = self.sink.create_comment(data);
        self.sink.append_child(parent, comment);
    }

    /// [§ 13.2.6.4.7 Generic raw text / RCDATA element parsing](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// "Insert an HTML element for the token. If the algorithm that was invoked
    /// is the generic raw text element parsing algorithm, switch the tokenizer
    /// to the RAWTEXT state; otherwise the algorithm invoked was the generic
    /// RCDATA element parsing algorithm, switch the tokenizer to the RCDATA
    /// state. Let the original insertion mode be the current insertion mode.
    /// Then, switch the insertion mode to "text"."
    pub(super) fn parse_text_element(&mut self, token: &Token, state: TokenizerState) {
        let _ = self.insert_html_element(token);
        self.set_lexical_state(state);
        self.original_insertion_mode = self.insertion_mode;
        self.switch_mode(InsertionMode::Text);
    }
}

/// "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF),
/// U+000D CARRIAGE RETURN (CR), or U+0020 SPACE"
pub(super) const fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// HTML elements that bound the default scope.
fn is_default_scope_boundary(name: &str) -> bool {
    matches!(
        name,
        "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object" | "template"
    )
}

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules."
fn is_special_html_element(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "applet"
            | "area"
            | "article"
            | "aside"
            | "base"
            | "basefont"
            | "bgsound"
            | "blockquote"
            | "body"
            | "br"
            | "button"
            | "caption"
            | "center"
            | "col"
            | "colgroup"
            | "dd"
            | "details"
            | "dir"
            | "div"
            | "dl"
            | "dt"
            | "embed"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "frame"
            | "frameset"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "head"
            | "header"
            | "hgroup"
            | "hr"
            | "html"
            | "iframe"
            | "img"
            | "input"
            | "keygen"
            | "li"
            | "link"
            | "listing"
            | "main"
            | "marquee"
            | "menu"
            | "meta"
            | "nav"
            | "noembed"
            | "noframes"
            | "noscript"
            | "object"
            | "ol"
            | "p"
            | "param"
            | "plaintext"
            | "pre"
            | "script"
            | "search"
            | "section"
            | "select"
            | "source"
            | "style"
            | "summary"
            | "table"
            | "tbody"
            | "td"
            | "template"
            | "textarea"
            | "tfoot"
            | "th"
            | "thead"
            | "title"
            | "tr"
            | "track"
            | "ul"
            | "wbr"
            | "xmp"
    )
}
