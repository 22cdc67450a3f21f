//! In-memory host document.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use editable_grid_core::logging::targets;
use quick_xml::escape::escape;
use slotmap::SlotMap;

use super::{ElementId, HostDocument, HostError, HostResult};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A headless, in-memory [`HostDocument`].
///
/// The document starts with a single `body` element. Notices raised through
/// [`HostDocument::notify`] are recorded instead of shown, and can be
/// inspected with [`notices`](Self::notices).
///
/// ```
/// use editable_grid::host::{HostDocument, MemoryDocument};
///
/// let mut doc = MemoryDocument::new();
/// let container = doc.add_container("grid");
/// assert_eq!(doc.element_by_id("grid"), Some(container));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: SlotMap<ElementId, Node>,
    body: ElementId,
    focused: Option<ElementId>,
    selected: Option<ElementId>,
    notices: Vec<String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates an empty document containing only `body`.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node::new("body"));
        Self {
            nodes,
            body,
            focused: None,
            selected: None,
            notices: Vec::new(),
        }
    }

    /// The document body.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Creates a `div` with the given `id` attribute and appends it to the body.
    pub fn add_container(&mut self, id: &str) -> ElementId {
        let div = self.create_element("div");
        if let Some(node) = self.nodes.get_mut(div) {
            node.attributes.insert("id".into(), id.into());
        }
        // Both handles were just created, so the append cannot fail.
        let _ = self.append_child(self.body, div);
        div
    }

    /// Notices raised so far, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Drains and returns the recorded notices.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// The element holding keyboard focus, if any.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// The element whose content is selected, if any.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Returns true if the handle refers to a live element.
    pub fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(element)
    }

    /// All descendants of `root` with the given tag, in document order.
    pub fn elements_by_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        self.collect_by_tag(root, tag, &mut found);
        found
    }

    fn collect_by_tag(&self, element: ElementId, tag: &str, found: &mut Vec<ElementId>) {
        let Some(node) = self.nodes.get(element) else {
            return;
        };
        for &child in &node.children {
            if self.nodes.get(child).is_some_and(|c| c.tag == tag) {
                found.push(child);
            }
            self.collect_by_tag(child, tag, found);
        }
    }

    /// Serializes the subtree rooted at `element` as HTML.
    pub fn to_html(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.write_html(element, &mut out);
        out
    }

    fn write_html(&self, element: ElementId, out: &mut String) {
        let Some(node) = self.nodes.get(element) else {
            return;
        };
        let _ = write!(out, "<{}", node.tag);
        for (name, value) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value.as_str()));
        }
        if node.tag == "input" {
            let _ = write!(out, " value=\"{}\"/>", escape(node.value.as_str()));
            return;
        }
        out.push('>');
        out.push_str(&escape(node.text.as_str()));
        for &child in &node.children {
            self.write_html(child, out);
        }
        let _ = write!(out, "</{}>", node.tag);
    }

    fn node(&self, element: ElementId) -> HostResult<&Node> {
        self.nodes
            .get(element)
            .ok_or(HostError::UnknownElement(element))
    }

    fn node_mut(&mut self, element: ElementId) -> HostResult<&mut Node> {
        self.nodes
            .get_mut(element)
            .ok_or(HostError::UnknownElement(element))
    }

    fn is_ancestor(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn is_attached(&self, element: ElementId) -> bool {
        self.is_ancestor(self.body, element)
    }

    fn detach(&mut self, element: ElementId) {
        let parent = self.nodes.get_mut(element).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&c| c != element);
        }
    }

    fn destroy_subtree(&mut self, element: ElementId) {
        if let Some(node) = self.nodes.remove(element) {
            if self.focused == Some(element) {
                self.focused = None;
            }
            if self.selected == Some(element) {
                self.selected = None;
            }
            for child in node.children {
                self.destroy_subtree(child);
            }
        }
    }

    fn text_into(&self, element: ElementId, out: &mut String) {
        if let Some(node) = self.nodes.get(element) {
            out.push_str(&node.text);
            for &child in &node.children {
                self.text_into(child, out);
            }
        }
    }
}

impl HostDocument for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|(key, node)| {
                node.attributes.get("id").is_some_and(|v| v == id) && self.is_attached(*key)
            })
            .map(|(key, _)| key)
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.insert(Node::new(tag))
    }

    fn tag_name(&self, element: ElementId) -> HostResult<&str> {
        Ok(self.node(element)?.tag.as_str())
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> HostResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_ancestor(child, parent) {
            return Err(HostError::InvalidHierarchy { parent, child });
        }
        self.detach(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn remove_children(&mut self, element: ElementId) -> HostResult<()> {
        let node = self.node_mut(element)?;
        node.text.clear();
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.destroy_subtree(child);
        }
        Ok(())
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element).and_then(|n| n.parent)
    }

    fn child_index(&self, element: ElementId) -> Option<usize> {
        let parent = self.parent(element)?;
        self.nodes
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == element)
    }

    fn children(&self, element: ElementId) -> HostResult<Vec<ElementId>> {
        Ok(self.node(element)?.children.clone())
    }

    fn set_text(&mut self, element: ElementId, text: &str) -> HostResult<()> {
        self.remove_children(element)?;
        self.node_mut(element)?.text = text.to_string();
        Ok(())
    }

    fn text(&self, element: ElementId) -> HostResult<String> {
        self.node(element)?;
        let mut out = String::new();
        self.text_into(element, &mut out);
        Ok(out)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> HostResult<()> {
        self.node_mut(element)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn attribute(&self, element: ElementId, name: &str) -> HostResult<Option<String>> {
        Ok(self.node(element)?.attributes.get(name).cloned())
    }

    fn set_input_value(&mut self, element: ElementId, value: &str) -> HostResult<()> {
        self.node_mut(element)?.value = value.to_string();
        Ok(())
    }

    fn input_value(&self, element: ElementId) -> HostResult<String> {
        Ok(self.node(element)?.value.clone())
    }

    fn focus(&mut self, element: ElementId) -> HostResult<()> {
        self.node(element)?;
        self.focused = Some(element);
        Ok(())
    }

    fn select_contents(&mut self, element: ElementId) -> HostResult<()> {
        self.node(element)?;
        self.selected = Some(element);
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        tracing::info!(target: targets::HOST, %message, "notice");
        self.notices.push(message.to_string());
    }
}
