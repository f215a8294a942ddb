//! Host abstraction: everything the interaction core needs from the page.
//!
//! The core never touches rendered content. It reads the viewport size and
//! element measurements on demand, writes transforms, z-index and a handful of
//! interaction markers, cancels in-flight animations at drag start, and binds
//! and unbinds pointer listeners.

mod memory;

pub use memory::{MemoryElement, MemoryHost, MemoryListener};

use crate::error::HostError;
use crate::input::{Binding, ListenTarget};
use crate::transform::Transform;
use crate::widget::WidgetId;
use kurbo::{Point, Rect, Size};

/// Interaction markers toggled on a widget's surface (CSS classes on the web).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Hovered,
    Pressed,
    Dragging,
    Shadow,
}

impl Marker {
    /// CSS class name for the marker.
    pub fn class_name(self) -> &'static str {
        match self {
            Marker::Hovered => "is-hovered",
            Marker::Pressed => "is-pressed",
            Marker::Dragging => "is-dragging",
            Marker::Shadow => "has-shadow",
        }
    }
}

/// Current on-screen geometry of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Untransformed top-left offset, i.e. the translation the element is
    /// currently rendered at.
    pub offset: Point,
    /// Rendered bounds, rotation and scale included.
    pub bounds: Rect,
}

impl Measurement {
    /// Rendered size, scale included.
    pub fn size(&self) -> Size {
        self.bounds.size()
    }
}

/// Where a listener is attached, resolved to a concrete element.
#[derive(Debug)]
pub enum ListenOn<'a, E> {
    Element(&'a E),
    Document,
}

/// The page a desktop runs in.
///
/// Implementations are single-threaded; every call is made synchronously from
/// within one pointer event.
pub trait Host {
    /// Handle to a page element.
    type Element: Clone;
    /// Handle to a bound listener, released through [`Host::unbind`].
    type Listener;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Measure an element. `None` when it is not attached or has no layout.
    fn measure(&self, element: &Self::Element) -> Option<Measurement>;

    /// Write a composed transform to an element.
    fn write_transform(&mut self, element: &Self::Element, transform: &Transform);

    /// Write an element's stacking order.
    fn write_z_index(&mut self, element: &Self::Element, z_index: i32);

    /// Toggle an interaction marker.
    fn set_marker(&mut self, element: &Self::Element, marker: Marker, on: bool);

    /// Cancel any in-flight animation so it cannot overwrite later transform
    /// writes.
    fn cancel_animation(&mut self, element: &Self::Element);

    /// Bind a listener that reports `binding` events for `widget`.
    fn bind(
        &mut self,
        widget: WidgetId,
        on: ListenOn<'_, Self::Element>,
        binding: Binding,
    ) -> Result<Self::Listener, HostError>;

    /// Remove a listener previously returned by [`Host::bind`].
    fn unbind(&mut self, listener: Self::Listener);
}

/// Resolve a listen target against a widget's elements.
pub(crate) fn resolve<'a, E>(
    target: ListenTarget,
    surface: &'a E,
    container: &'a E,
) -> ListenOn<'a, E> {
    match target {
        ListenTarget::Surface => ListenOn::Element(surface),
        ListenTarget::Container => ListenOn::Element(container),
        ListenTarget::Document => ListenOn::Document,
    }
}
