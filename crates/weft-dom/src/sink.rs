//! The interface the tree constructor uses to build a document.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The parser never owns nodes. It creates them through a [`TreeSink`], keeps
//! the returned [`NodeId`] handles, and asks the sink to link them together.

use crate::{Attribute, DoctypeData, DomTree, ElementData, Namespace, NodeId, NodeType, QuirksMode};

/// Node creation and mutation operations required by tree construction.
pub trait TreeSink {
    /// The Document node that top-level nodes are appended to.
    fn document(&self) -> NodeId;

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Create a detached element.
    fn create_element(
        &mut self,
        namespace: Namespace,
        tag_name: &str,
        attributes: Vec<Attribute>,
    ) -> NodeId;

    /// Create a detached comment node.
    fn create_comment(&mut self, data: &str) -> NodeId;

    /// Create a detached document type node.
    fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Insert `child` into `parent` immediately before `reference`.
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId);

    /// Detach `node` from its parent, if any.
    fn remove_from_parent(&mut self, node: NodeId);

    /// Move all children of `from` to the end of `to`.
    fn reparent_children(&mut self, from: NodeId, to: NodeId);

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data. Otherwise, create
    /// a new Text node whose data is data and insert it."
    fn insert_text(&mut self, parent: NodeId, before: Option<NodeId>, text: &str);

    /// Add each attribute the element does not already have (used when a
    /// second `<html>` or `<body>` start tag is seen).
    fn add_attributes_if_missing(&mut self, element: NodeId, attributes: Vec<Attribute>);

    /// Record the document's quirks mode.
    fn set_quirks_mode(&mut self, mode: QuirksMode);

    /// The parent of `node`, if it is attached.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Local name of an element; `None` for other node types.
    fn element_name(&self, element: NodeId) -> Option<&str>;

    /// Namespace of an element; `None` for other node types.
    fn element_namespace(&self, element: NodeId) -> Option<Namespace>;

    /// Value of an attribute on an element.
    fn attribute(&self, element: NodeId, name: &str) -> Option<&str>;

    /// The document element, once one has been appended.
    fn document_element(&self) -> Option<NodeId>;

    /// The document type node, if the document has one.
    fn doctype(&self) -> Option<NodeId>;
}

impl TreeSink for DomTree {
    fn document(&self) -> NodeId {
        self.root()
    }

    fn create_element(
        &mut self,
        namespace: Namespace,
        tag_name: &str,
        attributes: Vec<Attribute>,
    ) -> NodeId {
        self.alloc(NodeType::Element(ElementData {
            namespace,
            tag_name: tag_name.to_string(),
            attrs: attributes,
        }))
    }

    fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.alloc(NodeType::Doctype(DoctypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        Self::append_child(self, parent, child);
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        Self::insert_before(self, parent, child, reference);
    }

    fn remove_from_parent(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        self.move_children(from, to);
    }

    fn insert_text(&mut self, parent: NodeId, before: Option<NodeId>, text: &str) {
        Self::insert_text(self, parent, before, text);
    }

    fn add_attributes_if_missing(&mut self, element: NodeId, attributes: Vec<Attribute>) {
        if let Some(data) = self.as_element_mut(element) {
            for attr in attributes {
                if !data.attrs.iter().any(|existing| existing.name == attr.name) {
                    data.attrs.push(attr);
                }
            }
        }
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        Self::set_quirks_mode(self, mode);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn element_name(&self, element: NodeId) -> Option<&str> {
        self.as_element(element).map(|e| e.tag_name.as_str())
    }

    fn element_namespace(&self, element: NodeId) -> Option<Namespace> {
        self.as_element(element).map(|e| e.namespace)
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.as_element(element).and_then(|e| e.attribute(name))
    }

    fn document_element(&self) -> Option<NodeId> {
        Self::document_element(self)
    }

    fn doctype(&self) -> Option<NodeId> {
        Self::doctype(self)
    }
}
