// SPDX-License-Identifier: MPL-2.0
//! Retained element tree backing the dock controls.
//!
//! The player's view layer keeps one mounted node per control and rewrites
//! that node's inner content on every render pass. Node handles are cheap to
//! clone and compare by identity, so "the mounted element is unchanged" is an
//! observable property rather than a convention.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// A shared handle to one node in the element tree.
///
/// Cloning the handle clones the reference, not the node. Identity is
/// pointer identity (see [`Element::same_node`]).
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<Node>>,
}

struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    // BTreeMaps keep markup output deterministic.
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
    parent: Weak<RefCell<Node>>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Node {
                tag: tag.to_string(),
                id: None,
                classes: Vec::new(),
                attributes: BTreeMap::new(),
                styles: BTreeMap::new(),
                text: None,
                children: Vec::new(),
                parent: Weak::new(),
            })),
        }
    }

    /// True when both handles refer to the same node.
    pub fn same_node(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    pub fn set_id(&self, id: &str) {
        self.inner.borrow_mut().id = Some(id.to_string());
    }

    pub fn id(&self) -> Option<String> {
        self.inner.borrow().id.clone()
    }

    /// Adds a class if not already present. Class order is preserved in the
    /// rendered markup.
    pub fn add_class(&self, class: &str) {
        let mut node = self.inner.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.borrow().classes.iter().any(|c| c == class)
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    /// Merges a property map into the node's inline styles.
    pub fn set_style(&self, properties: &[(&str, &str)]) {
        let mut node = self.inner.borrow_mut();
        for (property, value) in properties {
            node.styles
                .insert((*property).to_string(), (*value).to_string());
        }
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.inner.borrow().styles.get(property).cloned()
    }

    pub fn set_text(&self, text: &str) {
        self.inner.borrow_mut().text = Some(text.to_string());
    }

    pub fn text(&self) -> Option<String> {
        self.inner.borrow().text.clone()
    }

    /// Appends a child node and re-parents it to this node.
    /// Appending a node to itself is ignored.
    pub fn append_child(&self, child: &Element) {
        if self.same_node(child) {
            return;
        }
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child.clone());
    }

    pub fn parent(&self) -> Option<Element> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Element { inner })
    }

    pub fn children(&self) -> Vec<Element> {
        self.inner.borrow().children.clone()
    }

    /// Depth-first lookup of the first descendant carrying `class`.
    pub fn query_class(&self, class: &str) -> Option<Element> {
        for child in self.children() {
            if child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.query_class(class) {
                return Some(found);
            }
        }
        None
    }

    /// True when `ancestor` appears somewhere on this node's parent chain.
    pub fn is_descendant_of(&self, ancestor: &Element) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.same_node(ancestor) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Replaces this node's inner content (text and children) with the inner
    /// content of `source`, preserving this node's identity. The children are
    /// moved out of `source` and re-parented here; the outer node, its
    /// attributes, styles, and any attached listeners are untouched.
    pub fn replace_inner(&self, source: &Element) {
        let (text, children) = {
            let mut src = source.inner.borrow_mut();
            (src.text.take(), std::mem::take(&mut src.children))
        };
        {
            let mut node = self.inner.borrow_mut();
            node.text = text;
            node.children = children;
        }
        let parent = Rc::downgrade(&self.inner);
        for child in self.children() {
            child.inner.borrow_mut().parent = parent.clone();
        }
    }

    /// Markup of this node's content: its text followed by each child's
    /// outer markup. A pure function of node content.
    pub fn inner_html(&self) -> String {
        let node = self.inner.borrow();
        let mut out = String::new();
        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        for child in &node.children {
            out.push_str(&child.outer_html());
        }
        out
    }

    /// Markup of this node including the node itself. Attribute and style
    /// ordering is deterministic: identical content renders byte-identical
    /// markup.
    pub fn outer_html(&self) -> String {
        let node = self.inner.borrow();
        let mut out = String::new();
        out.push('<');
        out.push_str(&node.tag);
        if let Some(id) = &node.id {
            out.push_str(&format!(" id=\"{}\"", escape(id)));
        }
        if !node.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&node.classes.join(" "))));
        }
        for (name, value) in &node.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        if !node.styles.is_empty() {
            let style = node
                .styles
                .iter()
                .map(|(property, value)| format!("{}: {}", property, value))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(&format!(" style=\"{}\"", escape(&style)));
        }
        out.push('>');
        drop(node);
        out.push_str(&self.inner_html());
        let node = self.inner.borrow();
        out.push_str(&format!("</{}>", node.tag));
        out
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.inner.borrow();
        f.debug_struct("Element")
            .field("tag", &node.tag)
            .field("id", &node.id)
            .field("classes", &node.classes)
            .field("children", &node.children.len())
            .finish()
    }
}

/// Minimal markup escaping for text and attribute values.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
