//! Desktop: widget lifecycle and pointer event routing.

use crate::bounds::clamp_offset;
use crate::config::DesktopConfig;
use crate::drag::{DragController, DragSession};
use crate::error::{WidgetError, WidgetResult};
use crate::host::{Host, ListenOn, resolve};
use crate::hover::HoverController;
use crate::input::{Binding, MouseButton, PointerEvent};
use crate::widget::{Interaction, Widget, WidgetId, WidgetRegistry, WidgetSpec};
use kurbo::Point;
use uuid::Uuid;

/// Something the hosting application may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DesktopEvent {
    /// A clickable widget was pressed and released without dragging.
    Activated(WidgetId),
    DragStarted(WidgetId),
    DragMoved { widget: WidgetId, position: Point },
    DragEnded { widget: WidgetId, position: Point },
}

/// A set of interactive widgets on one page.
pub struct Desktop<H: Host> {
    host: H,
    config: DesktopConfig,
    registry: WidgetRegistry<H::Element, H::Listener>,
    hover: HoverController,
    drag: DragController<H::Listener>,
}

impl<H: Host> Desktop<H> {
    pub fn new(host: H, config: DesktopConfig) -> Self {
        let hover = HoverController::new(config.hover);
        Self {
            host,
            config,
            registry: WidgetRegistry::new(),
            hover,
            drag: DragController::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget<H::Element>> {
        self.registry.get(id)
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget<H::Element>> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The widget currently being dragged, if any.
    pub fn dragged(&self) -> Option<WidgetId> {
        self.drag.owner()
    }

    /// Create a widget, write its resting transform and bind its listeners.
    ///
    /// On error the widget is not registered and nothing stays bound.
    pub fn add_widget(&mut self, spec: WidgetSpec<H::Element>) -> WidgetResult<WidgetId> {
        let id = Uuid::new_v4();
        let Some(widget) = spec.build(id) else {
            log::error!("Widget setup failed: {}", WidgetError::MissingSurface);
            return Err(WidgetError::MissingSurface);
        };

        self.host.write_z_index(widget.container(), widget.z_index());
        self.hover.apply(&mut self.host, &widget);
        self.registry.insert(widget);

        if let Err(err) = self.init_interactions(id) {
            self.registry.remove(id);
            return Err(err);
        }
        log::debug!("Added widget {}", id);
        Ok(id)
    }

    /// Bind a widget's pointer listeners. Calling this again for a widget that
    /// is already bound does nothing.
    pub fn init_interactions(&mut self, id: WidgetId) -> WidgetResult<()> {
        let Some(widget) = self.registry.get(id) else {
            log::error!("Widget setup failed: {}", WidgetError::UnknownWidget(id));
            return Err(WidgetError::UnknownWidget(id));
        };
        if self.registry.listeners.is_registered(id) {
            log::debug!("Widget {} already initialized", id);
            return Ok(());
        }

        let mut bindings = vec![
            Binding::SURFACE_ENTER,
            Binding::SURFACE_LEAVE,
            Binding::CONTAINER_DOWN,
        ];
        if widget.options().clickable {
            bindings.push(Binding::CONTAINER_UP);
        }

        let mut handles = Vec::with_capacity(bindings.len());
        for binding in bindings {
            let on = resolve(binding.target, widget.surface(), widget.container());
            match self.host.bind(id, on, binding) {
                Ok(handle) => handles.push((binding, handle)),
                Err(err) => {
                    for (_, handle) in handles {
                        self.host.unbind(handle);
                    }
                    let err = WidgetError::from(err);
                    log::error!("Widget setup failed for {}: {}", id, err);
                    return Err(err);
                }
            }
        }
        self.registry.listeners.insert(id, handles);
        Ok(())
    }

    /// Destroy a widget. A drag it owns is ended first, then exactly its own
    /// listeners are removed.
    pub fn remove_widget(&mut self, id: WidgetId) -> bool {
        if self.drag.owner() == Some(id) {
            self.cancel_drag();
        }
        for (_, handle) in self.registry.listeners.take(id) {
            self.host.unbind(handle);
        }
        let removed = self.registry.remove(id).is_some();
        if removed {
            log::debug!("Removed widget {}", id);
        }
        removed
    }

    /// Route an event delivered to the listener `binding` of `widget`.
    ///
    /// Events for bindings that are not (or no longer) bound are dropped, as
    /// are out-of-order deliveries such as a move with no drag in progress.
    pub fn dispatch(
        &mut self,
        widget: WidgetId,
        binding: Binding,
        event: PointerEvent,
    ) -> Option<DesktopEvent> {
        if event.kind() != binding.kind {
            log::trace!("Dropping {:?} delivered to {} listener", event, binding.kind);
            return None;
        }

        let bound = if binding.is_session_scoped() {
            self.drag
                .session()
                .is_some_and(|s| s.widget() == widget && s.owns(binding))
        } else {
            self.registry.listeners.is_bound(widget, binding)
        };
        if !bound {
            log::trace!("Dropping {:?} for unbound {:?} of {}", event, binding, widget);
            return None;
        }

        match event {
            PointerEvent::Enter => {
                let w = self.registry.get_mut(widget)?;
                self.hover.enter(&mut self.host, w);
                None
            }
            PointerEvent::Leave => {
                let w = self.registry.get_mut(widget)?;
                self.hover.leave(&mut self.host, w);
                None
            }
            PointerEvent::Down { position, button } => self.pointer_down(widget, position, button),
            PointerEvent::Move { position } => self.drag_move(position),
            PointerEvent::Up { position, .. } if binding.is_session_scoped() => {
                self.end_drag(Some(position))
            }
            PointerEvent::Up { .. } => self.release_press(widget),
            PointerEvent::Cancel => self.end_drag(None),
        }
    }

    /// Re-clamp every resting widget against the current viewport, e.g. after
    /// a resize. Returns the number of widgets moved.
    pub fn reflow(&mut self) -> usize {
        let viewport = self.host.viewport();
        let inset = self.config.inset;
        let ids = self.registry.ids().to_vec();
        let mut moved = 0;
        for id in ids {
            if self.drag.owner() == Some(id) {
                continue;
            }
            let Some(widget) = self.registry.get_mut(id) else {
                continue;
            };
            let Some(measured) = self.host.measure(widget.surface()) else {
                continue;
            };
            let slack = measured.bounds.origin() - measured.offset;
            let clamped = clamp_offset(widget.position, slack, measured.size(), viewport, inset);
            if clamped != widget.position {
                widget.position = clamped;
                self.hover.apply(&mut self.host, widget);
                moved += 1;
            }
        }
        if moved > 0 {
            log::debug!("Reflow moved {} widget(s)", moved);
        }
        moved
    }

    fn pointer_down(
        &mut self,
        id: WidgetId,
        position: Point,
        button: MouseButton,
    ) -> Option<DesktopEvent> {
        if !button.is_primary() {
            return None;
        }
        let options = self.registry.get(id)?.options();
        if options.draggable {
            self.begin_drag(id, position)
        } else {
            if options.clickable {
                let widget = self.registry.get_mut(id)?;
                widget.interaction = widget.interaction.press();
                self.hover.write_markers(&mut self.host, widget);
            }
            None
        }
    }

    fn release_press(&mut self, id: WidgetId) -> Option<DesktopEvent> {
        let widget = self.registry.get_mut(id)?;
        let Interaction::Pressed { hovered } = widget.interaction else {
            return None;
        };
        widget.interaction = Interaction::release(hovered);
        self.hover.apply(&mut self.host, widget);
        log::debug!("Widget {} activated", id);
        Some(DesktopEvent::Activated(id))
    }

    fn begin_drag(&mut self, id: WidgetId, pointer: Point) -> Option<DesktopEvent> {
        if let Some(owner) = self.drag.owner() {
            log::debug!("Ignoring pointer-down on {}: {} is being dragged", id, owner);
            return None;
        }
        let widget = self.registry.get_mut(id)?;

        // An animation finishing mid-drag would overwrite the drag's transform.
        self.host.cancel_animation(widget.surface());
        let offset = match self.host.measure(widget.surface()) {
            Some(measured) => measured.offset,
            None => widget.position,
        };

        let mut listeners = Vec::with_capacity(3);
        for binding in [Binding::DOCUMENT_MOVE, Binding::DOCUMENT_UP, Binding::DOCUMENT_CANCEL] {
            match self.host.bind(id, ListenOn::Document, binding) {
                Ok(handle) => listeners.push((binding, handle)),
                Err(err) => {
                    log::warn!("Could not start drag of {}: {}", id, err);
                    for (_, handle) in listeners {
                        self.host.unbind(handle);
                    }
                    return None;
                }
            }
        }

        widget.position = offset;
        widget.interaction = Interaction::Dragging;
        self.host.write_z_index(widget.container(), self.config.drag_z_index);
        self.hover.apply(&mut self.host, widget);
        let rendered = self.host.measure(widget.surface());

        let session = DragSession::new(id, pointer, offset, rendered, listeners);
        if let Err(session) = self.drag.begin(session) {
            for (_, handle) in session.into_listeners() {
                self.host.unbind(handle);
            }
            return None;
        }
        log::debug!("Drag started on {} at {:?}", id, offset);
        Some(DesktopEvent::DragStarted(id))
    }

    fn drag_move(&mut self, pointer: Point) -> Option<DesktopEvent> {
        let viewport = self.host.viewport();
        let session = self.drag.session_mut()?;
        let position = session.update(pointer, viewport, self.config.inset);
        let id = session.widget();
        let widget = self.registry.get(id)?;
        let transform = widget.display_transform_at(position, self.hover.delta());
        self.host.write_transform(widget.surface(), &transform);
        Some(DesktopEvent::DragMoved { widget: id, position })
    }

    /// End the active drag at its last live position. `pointer` is `None`
    /// when the platform cancelled the pointer.
    fn end_drag(&mut self, pointer: Option<Point>) -> Option<DesktopEvent> {
        let session = self.drag.finish()?;
        let id = session.widget();
        let position = session.live();
        let moved = session.moved();
        for (_, handle) in session.into_listeners() {
            self.host.unbind(handle);
        }

        let widget = self.registry.get_mut(id)?;
        widget.position = position;
        self.host.write_z_index(widget.container(), widget.z_index());

        // The widget may have been clamped away from the pointer, so the
        // pre-drag hover state is stale.
        let over = pointer.is_some_and(|pointer| {
            self.host
                .measure(widget.surface())
                .is_some_and(|m| m.bounds.contains(pointer))
        });
        widget.interaction = Interaction::release(over);
        self.hover.apply(&mut self.host, widget);
        log::debug!("Drag ended on {} at {:?} (hovered: {})", id, position, over);

        if !moved && pointer.is_some() && widget.options().clickable {
            Some(DesktopEvent::Activated(id))
        } else {
            Some(DesktopEvent::DragEnded { widget: id, position })
        }
    }

    /// End the active drag without touching the widget. Used when the dragged
    /// widget is going away.
    fn cancel_drag(&mut self) {
        if let Some(session) = self.drag.finish() {
            log::debug!("Cancelling drag of {}", session.widget());
            for (_, handle) in session.into_listeners() {
                self.host.unbind(handle);
            }
        }
    }
}

impl<H: Host> std::fmt::Debug for Desktop<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("config", &self.config)
            .field("widgets", &self.registry.len())
            .field("dragged", &self.drag.owner())
            .finish_non_exhaustive()
    }
}

impl<H: Host> Drop for Desktop<H> {
    fn drop(&mut self) {
        self.cancel_drag();
        for id in self.registry.ids().to_vec() {
            for (_, handle) in self.registry.listeners.take(id) {
                self.host.unbind(handle);
            }
        }
    }
}
