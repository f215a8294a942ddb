//! Pointer events and listener bindings.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }

    /// Whether this is the primary (left) button.
    pub fn is_primary(self) -> bool {
        self == Self::Left
    }
}

/// Pointer event delivered to a widget listener.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Enter,
    Leave,
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    /// The platform took the pointer away (touch scroll, gesture, focus loss).
    Cancel,
}

impl PointerEvent {
    /// The listener kind that receives this event.
    pub fn kind(&self) -> ListenerKind {
        match self {
            PointerEvent::Enter => ListenerKind::PointerEnter,
            PointerEvent::Leave => ListenerKind::PointerLeave,
            PointerEvent::Down { .. } => ListenerKind::PointerDown,
            PointerEvent::Move { .. } => ListenerKind::PointerMove,
            PointerEvent::Up { .. } => ListenerKind::PointerUp,
            PointerEvent::Cancel => ListenerKind::PointerCancel,
        }
    }

    /// Pointer position, for events that carry one.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => Some(*position),
            PointerEvent::Enter | PointerEvent::Leave | PointerEvent::Cancel => None,
        }
    }
}

/// Kind of pointer listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    PointerEnter,
    PointerLeave,
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
}

impl ListenerKind {
    /// DOM event type name.
    pub fn event_type(self) -> &'static str {
        match self {
            ListenerKind::PointerEnter => "pointerenter",
            ListenerKind::PointerLeave => "pointerleave",
            ListenerKind::PointerDown => "pointerdown",
            ListenerKind::PointerMove => "pointermove",
            ListenerKind::PointerUp => "pointerup",
            ListenerKind::PointerCancel => "pointercancel",
        }
    }
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_type())
    }
}

/// Which part of the page a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenTarget {
    /// The element the user perceives as the widget.
    Surface,
    /// The widget's outer container.
    Container,
    /// The whole document. Used only for drag-session listeners.
    Document,
}

/// A listener slot: where it is attached and what it listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Binding {
    pub target: ListenTarget,
    pub kind: ListenerKind,
}

impl Binding {
    pub const SURFACE_ENTER: Self = Self::new(ListenTarget::Surface, ListenerKind::PointerEnter);
    pub const SURFACE_LEAVE: Self = Self::new(ListenTarget::Surface, ListenerKind::PointerLeave);
    pub const CONTAINER_DOWN: Self = Self::new(ListenTarget::Container, ListenerKind::PointerDown);
    pub const CONTAINER_UP: Self = Self::new(ListenTarget::Container, ListenerKind::PointerUp);
    pub const DOCUMENT_MOVE: Self = Self::new(ListenTarget::Document, ListenerKind::PointerMove);
    pub const DOCUMENT_UP: Self = Self::new(ListenTarget::Document, ListenerKind::PointerUp);
    pub const DOCUMENT_CANCEL: Self =
        Self::new(ListenTarget::Document, ListenerKind::PointerCancel);

    pub const fn new(target: ListenTarget, kind: ListenerKind) -> Self {
        Self { target, kind }
    }

    /// Whether the binding only lives for the duration of a drag session.
    pub fn is_session_scoped(&self) -> bool {
        self.target == ListenTarget::Document
    }
}
