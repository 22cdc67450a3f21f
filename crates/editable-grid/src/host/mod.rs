//! The host document abstraction.
//!
//! The grid never talks to a concrete UI toolkit. Everything it needs from
//! its environment (looking up the container, building table elements,
//! swapping a cell's content for an input, focusing it, and raising
//! user-visible notices) goes through the [`HostDocument`] trait.
//!
//! [`MemoryDocument`] is a complete in-memory implementation. It serves as a
//! headless host and as the test double for the rest of the crate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  create / append / set_text  ┌──────────────┐
//! │ EditableGrid │─────────────────────────────>│ HostDocument │
//! │              │<─────────────────────────────│              │
//! └──────────────┘  PointerEvent / Key          └──────────────┘
//! ```
//!
//! Events flow the other way: the host calls
//! [`EditableGrid::mouse_clicked`](crate::EditableGrid::mouse_clicked) and
//! [`EditableGrid::key_pressed`](crate::EditableGrid::key_pressed).

mod events;
mod memory;

use slotmap::new_key_type;

pub use events::{Key, PointerEvent, PointerKind};
pub use memory::MemoryDocument;

new_key_type! {
    /// Handle to an element in a host document.
    pub struct ElementId;
}

/// Errors raised by a host document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The element handle does not refer to a live element.
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// Appending would make an element its own ancestor.
    #[error("cannot append {child:?} under {parent:?}")]
    InvalidHierarchy { parent: ElementId, child: ElementId },
}

/// Result type alias for host document operations.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// The DOM-like environment a grid renders into.
///
/// Element tags follow HTML naming (`table`, `tr`, `th`, `td`, `input`).
/// Implementations must report positions consistently: `child_index` is the
/// zero-based position of an element among its parent's element children.
pub trait HostDocument {
    /// Looks up an attached element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Creates a detached element with the given tag.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Returns the element's tag name.
    fn tag_name(&self, element: ElementId) -> HostResult<&str>;

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> HostResult<()>;

    /// Removes all content (text and child elements) of `element`.
    fn remove_children(&mut self, element: ElementId) -> HostResult<()>;

    /// Returns the element's parent, if attached.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Returns the element's position among its parent's children.
    fn child_index(&self, element: ElementId) -> Option<usize>;

    /// Returns the element's children in order.
    fn children(&self, element: ElementId) -> HostResult<Vec<ElementId>>;

    /// Replaces the element's content with plain text.
    fn set_text(&mut self, element: ElementId, text: &str) -> HostResult<()>;

    /// Returns the element's text content, including descendants.
    fn text(&self, element: ElementId) -> HostResult<String>;

    /// Sets an attribute on the element.
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> HostResult<()>;

    /// Returns an attribute of the element.
    fn attribute(&self, element: ElementId, name: &str) -> HostResult<Option<String>>;

    /// Sets the current value of an input element.
    fn set_input_value(&mut self, element: ElementId, value: &str) -> HostResult<()>;

    /// Returns the current value of an input element.
    fn input_value(&self, element: ElementId) -> HostResult<String>;

    /// Gives keyboard focus to the element.
    fn focus(&mut self, element: ElementId) -> HostResult<()>;

    /// Selects the element's editable content.
    fn select_contents(&mut self, element: ElementId) -> HostResult<()>;

    /// Raises a user-visible notice.
    fn notify(&mut self, message: &str);
}

impl<H: HostDocument + ?Sized> HostDocument for &mut H {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        (**self).element_by_id(id)
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        (**self).create_element(tag)
    }

    fn tag_name(&self, element: ElementId) -> HostResult<&str> {
        (**self).tag_name(element)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> HostResult<()> {
        (**self).append_child(parent, child)
    }

    fn remove_children(&mut self, element: ElementId) -> HostResult<()> {
        (**self).remove_children(element)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        (**self).parent(element)
    }

    fn child_index(&self, element: ElementId) -> Option<usize> {
        (**self).child_index(element)
    }

    fn children(&self, element: ElementId) -> HostResult<Vec<ElementId>> {
        (**self).children(element)
    }

    fn set_text(&mut self, element: ElementId, text: &str) -> HostResult<()> {
        (**self).set_text(element, text)
    }

    fn text(&self, element: ElementId) -> HostResult<String> {
        (**self).text(element)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> HostResult<()> {
        (**self).set_attribute(element, name, value)
    }

    fn attribute(&self, element: ElementId, name: &str) -> HostResult<Option<String>> {
        (**self).attribute(element, name)
    }

    fn set_input_value(&mut self, element: ElementId, value: &str) -> HostResult<()> {
        (**self).set_input_value(element, value)
    }

    fn input_value(&self, element: ElementId) -> HostResult<String> {
        (**self).input_value(element)
    }

    fn focus(&mut self, element: ElementId) -> HostResult<()> {
        (**self).focus(element)
    }

    fn select_contents(&mut self, element: ElementId) -> HostResult<()> {
        (**self).select_contents(element)
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}
