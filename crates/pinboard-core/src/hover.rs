//! Hover controller: pointer enter/leave on a widget's surface.

use crate::config::HoverDelta;
use crate::host::{Host, Marker};
use crate::widget::Widget;

/// Applies the hovered visual variant on top of a widget's base values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverController {
    delta: HoverDelta,
}

impl HoverController {
    pub fn new(delta: HoverDelta) -> Self {
        Self { delta }
    }

    pub fn delta(&self) -> HoverDelta {
        self.delta
    }

    /// Pointer entered the widget's surface.
    pub fn enter<H: Host>(&self, host: &mut H, widget: &mut Widget<H::Element>) {
        if widget.interaction.is_dragging() {
            return;
        }
        widget.interaction = widget.interaction.enter();
        self.apply(host, widget);
    }

    /// Pointer left the widget's surface. Ignored while the widget is dragged,
    /// since fast moves can briefly outrun the surface.
    pub fn leave<H: Host>(&self, host: &mut H, widget: &mut Widget<H::Element>) {
        if widget.interaction.is_dragging() {
            log::trace!("Ignoring pointer-leave on dragged widget {}", widget.id());
            return;
        }
        widget.interaction = widget.interaction.leave();
        self.apply(host, widget);
    }

    /// Write markers and the transform for the widget's current state at its
    /// resting position.
    pub fn apply<H: Host>(&self, host: &mut H, widget: &Widget<H::Element>) {
        self.write_markers(host, widget);
        host.write_transform(widget.surface(), &widget.display_transform(self.delta));
    }

    pub(crate) fn write_markers<H: Host>(&self, host: &mut H, widget: &Widget<H::Element>) {
        let state = widget.interaction();
        let surface = widget.surface();
        host.set_marker(surface, Marker::Hovered, state.is_hovered());
        host.set_marker(surface, Marker::Pressed, state.is_pressed());
        host.set_marker(surface, Marker::Dragging, state.is_dragging());
        if widget.options().shadows {
            host.set_marker(surface, Marker::Shadow, state.is_hovered());
        }
    }
}

impl Default for HoverController {
    fn default() -> Self {
        Self::new(HoverDelta::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::widget::{Interaction, WidgetId, WidgetOptions, WidgetSpec};
    use kurbo::{Point, Size};

    fn widget(host: &mut MemoryHost, options: WidgetOptions) -> Widget<crate::host::MemoryElement> {
        let surface = host.create_element(Size::new(140.0, 140.0));
        WidgetSpec::new(surface)
            .at(Point::new(100.0, 100.0))
            .with_rotation(-1.0)
            .with_options(options)
            .build(WidgetId::new_v4())
            .unwrap()
    }

    #[test]
    fn test_enter_twice_same_transform() {
        let mut host = MemoryHost::default();
        let mut w = widget(&mut host, WidgetOptions::default());
        let hover = HoverController::default();

        hover.enter(&mut host, &mut w);
        let once = host.transform(*w.surface()).unwrap();
        hover.enter(&mut host, &mut w);
        let twice = host.transform(*w.surface()).unwrap();

        assert_eq!(once, twice);
        assert!((once.rotate - 2.0).abs() < f64::EPSILON);
        assert!((w.rotation() + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leave_restores_base() {
        let mut host = MemoryHost::default();
        let mut w = widget(&mut host, WidgetOptions::default());
        let hover = HoverController::default();

        hover.enter(&mut host, &mut w);
        assert!(host.has_marker(*w.surface(), Marker::Hovered));
        assert!(host.has_marker(*w.surface(), Marker::Shadow));

        hover.leave(&mut host, &mut w);
        assert_eq!(host.transform(*w.surface()), Some(w.base_transform()));
        assert!(!host.has_marker(*w.surface(), Marker::Hovered));
        assert!(!host.has_marker(*w.surface(), Marker::Shadow));
    }

    #[test]
    fn test_leave_ignored_while_dragging() {
        let mut host = MemoryHost::default();
        let mut w = widget(&mut host, WidgetOptions::default());
        w.interaction = Interaction::Dragging;
        let hover = HoverController::default();

        hover.leave(&mut host, &mut w);
        assert_eq!(w.interaction(), Interaction::Dragging);
        assert_eq!(host.transform_writes(*w.surface()), 0);
    }

    #[test]
    fn test_no_shadow_marker_when_disabled() {
        let mut host = MemoryHost::default();
        let options = WidgetOptions {
            shadows: false,
            ..WidgetOptions::default()
        };
        let mut w = widget(&mut host, options);
        HoverController::default().enter(&mut host, &mut w);
        assert!(!host.has_marker(*w.surface(), Marker::Shadow));
        assert!(host.has_marker(*w.surface(), Marker::Hovered));
    }
}
