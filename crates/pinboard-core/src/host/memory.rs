//! In-memory host for tests, replay and other headless use.

use super::{Host, ListenOn, Marker, Measurement};
use crate::bounds::is_measured;
use crate::desktop::{Desktop, DesktopEvent};
use crate::error::HostError;
use crate::input::{Binding, PointerEvent};
use crate::transform::Transform;
use crate::widget::WidgetId;
use kurbo::Size;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Element handle in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryElement(u32);

/// Listener handle in a [`MemoryHost`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MemoryListener(u64);

#[derive(Debug, Clone)]
struct ElementState {
    layout: Size,
    transform: Transform,
    z_index: Option<i32>,
    markers: HashSet<Marker>,
    attached: bool,
    pending_animation: Option<Transform>,
    transform_writes: usize,
}

#[derive(Debug, Clone, Copy)]
struct ListenerRecord {
    widget: WidgetId,
    element: Option<MemoryElement>,
    binding: Binding,
}

/// A recording host that keeps element state in memory.
///
/// Elements are laid out by their transform only: an element's offset is its
/// current translation and its bounds follow from its layout size.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    viewport: Size,
    elements: HashMap<MemoryElement, ElementState>,
    listeners: BTreeMap<u64, ListenerRecord>,
    next_element: u32,
    next_listener: u64,
    cancelled_animations: usize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(Size::new(1280.0, 800.0))
    }
}

impl MemoryHost {
    /// Create a host with the given viewport size.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            elements: HashMap::new(),
            listeners: BTreeMap::new(),
            next_element: 0,
            next_listener: 0,
            cancelled_animations: 0,
        }
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Add an attached element with the given unscaled layout size.
    pub fn create_element(&mut self, layout: Size) -> MemoryElement {
        let element = MemoryElement(self.next_element);
        self.next_element += 1;
        self.elements.insert(
            element,
            ElementState {
                layout,
                transform: Transform::default(),
                z_index: None,
                markers: HashSet::new(),
                attached: true,
                pending_animation: None,
                transform_writes: 0,
            },
        );
        element
    }

    /// Detach an element from the page. It stops measuring, but writes are
    /// still recorded.
    pub fn detach(&mut self, element: MemoryElement) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.attached = false;
        }
    }

    /// Start an animation that will write `to` when it finishes.
    pub fn start_animation(&mut self, element: MemoryElement, to: Transform) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.pending_animation = Some(to);
        }
    }

    /// Let every in-flight animation finish and write its final transform.
    pub fn finish_animations(&mut self) {
        for state in self.elements.values_mut() {
            if let Some(to) = state.pending_animation.take() {
                state.transform = to;
            }
        }
    }

    /// Last transform written to an element.
    pub fn transform(&self, element: MemoryElement) -> Option<Transform> {
        self.elements.get(&element).map(|s| s.transform)
    }

    /// Last z-index written to an element.
    pub fn z_index(&self, element: MemoryElement) -> Option<i32> {
        self.elements.get(&element).and_then(|s| s.z_index)
    }

    /// Number of transform writes an element has received.
    pub fn transform_writes(&self, element: MemoryElement) -> usize {
        self.elements.get(&element).map_or(0, |s| s.transform_writes)
    }

    /// Whether a marker is currently on.
    pub fn has_marker(&self, element: MemoryElement, marker: Marker) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|s| s.markers.contains(&marker))
    }

    /// Number of animations cancelled so far.
    pub fn cancelled_animations(&self) -> usize {
        self.cancelled_animations
    }

    /// Total number of bound listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Bound listeners reporting for a widget.
    pub fn bindings_for(&self, widget: WidgetId) -> Vec<Binding> {
        self.listeners
            .values()
            .filter(|r| r.widget == widget)
            .map(|r| r.binding)
            .collect()
    }

    /// Listeners that would receive `event` on `element` (`None` for the
    /// document), in binding order.
    fn receivers(
        &self,
        element: Option<MemoryElement>,
        event: &PointerEvent,
    ) -> Vec<(WidgetId, Binding)> {
        let kind = event.kind();
        self.listeners
            .values()
            .filter(|r| r.element == element && r.binding.kind == kind)
            .map(|r| (r.widget, r.binding))
            .collect()
    }
}

impl Host for MemoryHost {
    type Element = MemoryElement;
    type Listener = MemoryListener;

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn measure(&self, element: &MemoryElement) -> Option<Measurement> {
        let state = self.elements.get(element)?;
        if !state.attached || !is_measured(state.layout) {
            return None;
        }
        Some(Measurement {
            offset: state.transform.translate,
            bounds: state.transform.bounds(state.layout),
        })
    }

    fn write_transform(&mut self, element: &MemoryElement, transform: &Transform) {
        if let Some(state) = self.elements.get_mut(element) {
            state.transform = *transform;
            state.transform_writes += 1;
        }
    }

    fn write_z_index(&mut self, element: &MemoryElement, z_index: i32) {
        if let Some(state) = self.elements.get_mut(element) {
            state.z_index = Some(z_index);
        }
    }

    fn set_marker(&mut self, element: &MemoryElement, marker: Marker, on: bool) {
        if let Some(state) = self.elements.get_mut(element) {
            if on {
                state.markers.insert(marker);
            } else {
                state.markers.remove(&marker);
            }
        }
    }

    fn cancel_animation(&mut self, element: &MemoryElement) {
        if let Some(state) = self.elements.get_mut(element) {
            if state.pending_animation.take().is_some() {
                self.cancelled_animations += 1;
            }
        }
    }

    fn bind(
        &mut self,
        widget: WidgetId,
        on: ListenOn<'_, MemoryElement>,
        binding: Binding,
    ) -> Result<MemoryListener, HostError> {
        let element = match on {
            ListenOn::Element(element) => {
                if !self.elements.contains_key(element) {
                    return Err(HostError::Bind {
                        kind: binding.kind.event_type(),
                        reason: format!("unknown element {:?}", element),
                    });
                }
                Some(*element)
            }
            ListenOn::Document => None,
        };
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.insert(id, ListenerRecord { widget, element, binding });
        Ok(MemoryListener(id))
    }

    fn unbind(&mut self, listener: MemoryListener) {
        self.listeners.remove(&listener.0);
    }
}

impl Desktop<MemoryHost> {
    /// Deliver an event the way a page would: to every listener bound for its
    /// kind on `element`, or on the document when `element` is `None`.
    /// Returns what the desktop reported, in listener order.
    pub fn fire(
        &mut self,
        element: Option<MemoryElement>,
        event: PointerEvent,
    ) -> Vec<DesktopEvent> {
        self.host()
            .receivers(element, &event)
            .into_iter()
            .filter_map(|(widget, binding)| self.dispatch(widget, binding, event))
            .collect()
    }

    /// Deliver an event to document-level listeners.
    pub fn fire_document(&mut self, event: PointerEvent) -> Vec<DesktopEvent> {
        self.fire(None, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::compose;
    use kurbo::{Point, Rect};

    #[test]
    fn test_measure_follows_transform() {
        let mut host = MemoryHost::default();
        let el = host.create_element(Size::new(100.0, 100.0));
        host.write_transform(&el, &compose(Point::new(10.0, 20.0), 0.0, 1.0));

        let m = host.measure(&el).unwrap();
        assert_eq!(m.offset, Point::new(10.0, 20.0));
        assert_eq!(m.bounds, Rect::new(10.0, 20.0, 110.0, 120.0));
    }

    #[test]
    fn test_detached_element_does_not_measure() {
        let mut host = MemoryHost::default();
        let el = host.create_element(Size::new(100.0, 100.0));
        host.detach(el);
        assert!(host.measure(&el).is_none());
    }

    #[test]
    fn test_cancelled_animation_never_writes() {
        let mut host = MemoryHost::default();
        let el = host.create_element(Size::new(10.0, 10.0));
        host.start_animation(el, compose(Point::new(500.0, 500.0), 0.0, 1.0));
        host.cancel_animation(&el);
        host.finish_animations();
        assert_eq!(host.transform(el), Some(Transform::default()));
        assert_eq!(host.cancelled_animations(), 1);
    }

    #[test]
    fn test_bind_unknown_element_fails() {
        let mut host = MemoryHost::default();
        let err = host
            .bind(WidgetId::new_v4(), ListenOn::Element(&MemoryElement(42)), Binding::SURFACE_ENTER)
            .unwrap_err();
        assert!(matches!(err, HostError::Bind { .. }));
        assert_eq!(host.listener_count(), 0);
    }
}
