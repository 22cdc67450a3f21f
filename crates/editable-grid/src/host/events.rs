//! Input events delivered by the host.

use serde::{Deserialize, Serialize};

use super::ElementId;

/// The kind of pointer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// A single click.
    #[default]
    Click,
    /// A double click.
    DoubleClick,
}

/// A pointer activation on an element of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Single or double click.
    pub kind: PointerKind,
    /// The innermost element under the pointer.
    pub target: ElementId,
}

impl PointerEvent {
    /// A single click on `target`.
    pub fn click(target: ElementId) -> Self {
        Self {
            kind: PointerKind::Click,
            target,
        }
    }

    /// A double click on `target`.
    pub fn double_click(target: ElementId) -> Self {
        Self {
            kind: PointerKind::DoubleClick,
            target,
        }
    }
}

/// A key press delivered to the active edit surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Return / Enter.
    Enter,
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// A printable character.
    Char(char),
    /// Any other key.
    Other,
}

impl Key {
    /// Maps a legacy browser key code to a key.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            13 => Self::Enter,
            9 => Self::Tab,
            27 => Self::Escape,
            _ => char::from_u32(code)
                .filter(|c| !c.is_control())
                .map(Self::Char)
                .unwrap_or(Self::Other),
        }
    }
}
