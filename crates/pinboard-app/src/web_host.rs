//! DOM implementation of the desktop host.

use kurbo::{Point, Rect, Size};
use pinboard_core::{
    Binding, Desktop, DesktopEvent, Host, HostError, ListenOn, ListenerKind, Marker, Measurement,
    MouseButton, PointerEvent, Transform, WidgetId,
};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

type DomPointerEvent = web_sys::PointerEvent;
type SharedDesktop = Weak<RefCell<Desktop<WebHost>>>;

/// A bound DOM listener.
pub struct WebListener {
    target: EventTarget,
    event_type: &'static str,
    closure: Closure<dyn FnMut(DomPointerEvent)>,
}

/// Host backed by the browser page.
pub struct WebHost {
    window: Window,
    document: Document,
    desktop: SharedDesktop,
    /// Removed listeners whose closures may still be on the stack.
    retired: Vec<WebListener>,
}

impl WebHost {
    pub fn new(window: Window, document: Document, desktop: SharedDesktop) -> Self {
        Self {
            window,
            document,
            desktop,
            retired: Vec::new(),
        }
    }

    fn collect_retired(&mut self) {
        self.retired.clear();
    }

    /// Viewport position of an element's untransformed border box.
    ///
    /// Offsets ignore the element's own transform. Transformed ancestors are
    /// not accounted for.
    fn layout_origin(&self, element: &HtmlElement) -> Point {
        let local = Point::new(element.offset_left() as f64, element.offset_top() as f64);
        match element.offset_parent() {
            // Offsets against the body are document coordinates.
            Some(parent) if is_body(&parent) => {
                let scroll_x = self.window.scroll_x().unwrap_or(0.0);
                let scroll_y = self.window.scroll_y().unwrap_or(0.0);
                Point::new(local.x - scroll_x, local.y - scroll_y)
            }
            Some(parent) => {
                let rect = parent.get_bounding_client_rect();
                Point::new(
                    rect.left() + parent.client_left() as f64 + local.x,
                    rect.top() + parent.client_top() as f64 + local.y,
                )
            }
            // Fixed positioning: offsets are already viewport-relative.
            None => local,
        }
    }
}

fn is_body(element: &Element) -> bool {
    element.tag_name().eq_ignore_ascii_case("body")
}

impl Host for WebHost {
    type Element = HtmlElement;
    type Listener = WebListener;

    fn viewport(&self) -> Size {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Size::new(width, height)
    }

    fn measure(&self, element: &HtmlElement) -> Option<Measurement> {
        if !element.is_connected() {
            return None;
        }
        let layout = Size::new(element.offset_width() as f64, element.offset_height() as f64);
        if layout.width <= 0.0 || layout.height <= 0.0 {
            return None;
        }
        let rect = element.get_bounding_client_rect();
        let bounds = Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom());
        // Rotation and scale pivot on the centre, so the centre only moves
        // with the translation.
        let untranslated = self.layout_origin(element) + layout.to_vec2() / 2.0;
        let offset = (bounds.center() - untranslated).to_point();
        Some(Measurement { offset, bounds })
    }

    fn write_transform(&mut self, element: &HtmlElement, transform: &Transform) {
        if let Err(err) = element.style().set_property("transform", &transform.to_string()) {
            log::warn!("Failed to write transform: {:?}", err);
        }
    }

    fn write_z_index(&mut self, element: &HtmlElement, z_index: i32) {
        if let Err(err) = element.style().set_property("z-index", &z_index.to_string()) {
            log::warn!("Failed to write z-index: {:?}", err);
        }
    }

    fn set_marker(&mut self, element: &HtmlElement, marker: Marker, on: bool) {
        if let Err(err) = element.class_list().toggle_with_force(marker.class_name(), on) {
            log::warn!("Failed to toggle {}: {:?}", marker.class_name(), err);
        }
    }

    fn cancel_animation(&mut self, element: &HtmlElement) {
        let animations: js_sys::Array = element.get_animations();
        for animation in animations.iter() {
            if let Ok(animation) = animation.dyn_into::<web_sys::Animation>() {
                animation.cancel();
            }
        }
    }

    fn bind(
        &mut self,
        widget: WidgetId,
        on: ListenOn<'_, HtmlElement>,
        binding: Binding,
    ) -> Result<WebListener, HostError> {
        let target: EventTarget = match on {
            ListenOn::Element(element) => element.clone().into(),
            ListenOn::Document => self.document.clone().into(),
        };
        let event_type = binding.kind.event_type();
        let desktop = self.desktop.clone();
        let closure = Closure::<dyn FnMut(DomPointerEvent)>::new(move |event: DomPointerEvent| {
            deliver(&desktop, widget, binding, &event);
        });
        target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .map_err(|err| HostError::Bind {
                kind: event_type,
                reason: format!("{:?}", err),
            })?;
        Ok(WebListener {
            target,
            event_type,
            closure,
        })
    }

    fn unbind(&mut self, listener: WebListener) {
        let callback: &js_sys::Function = listener.closure.as_ref().unchecked_ref();
        if let Err(err) = listener
            .target
            .remove_event_listener_with_callback(listener.event_type, callback)
        {
            log::warn!("Failed to remove {} listener: {:?}", listener.event_type, err);
        }
        // The closure may be the one currently running.
        self.retired.push(listener);
    }
}

fn deliver(desktop: &SharedDesktop, widget: WidgetId, binding: Binding, event: &DomPointerEvent) {
    let Some(desktop) = desktop.upgrade() else {
        return;
    };
    let Ok(mut desktop) = desktop.try_borrow_mut() else {
        log::warn!("Desktop busy, dropping {} for {}", binding.kind, widget);
        return;
    };
    desktop.host_mut().collect_retired();

    let Some(pointer) = to_pointer_event(binding.kind, event) else {
        return;
    };
    match desktop.dispatch(widget, binding, pointer) {
        Some(DesktopEvent::DragStarted(id)) => {
            // Keep the browser from starting a text selection or native drag.
            event.prevent_default();
            log::trace!("Drag started on {}", id);
        }
        Some(DesktopEvent::Activated(id)) => log::info!("Widget {} activated", id),
        Some(DesktopEvent::DragEnded { widget, position }) => {
            log::debug!("Widget {} dropped at {:?}", widget, position)
        }
        Some(DesktopEvent::DragMoved { .. }) | None => {}
    }
}

fn to_pointer_event(kind: ListenerKind, event: &DomPointerEvent) -> Option<PointerEvent> {
    let position = Point::new(event.client_x() as f64, event.client_y() as f64);
    Some(match kind {
        ListenerKind::PointerEnter => PointerEvent::Enter,
        ListenerKind::PointerLeave => PointerEvent::Leave,
        ListenerKind::PointerDown => PointerEvent::Down {
            position,
            button: MouseButton::from_dom(event.button())?,
        },
        ListenerKind::PointerMove => PointerEvent::Move { position },
        ListenerKind::PointerUp => PointerEvent::Up {
            position,
            button: MouseButton::from_dom(event.button())?,
        },
        ListenerKind::PointerCancel => PointerEvent::Cancel,
    })
}
