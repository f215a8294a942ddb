//! Drag controller: the single, process-wide drag slot.

use crate::bounds::clamp_offset;
use crate::host::Measurement;
use crate::input::Binding;
use crate::widget::WidgetId;
use kurbo::{Point, Size, Vec2};

/// An in-progress drag of one widget.
#[derive(Debug)]
pub struct DragSession<L> {
    widget: WidgetId,
    /// Pointer position minus widget offset at drag start. Fixed for the
    /// lifetime of the session.
    anchor: Vec2,
    origin: Point,
    live: Point,
    /// Rendered geometry measured at drag start, hover scale included.
    rendered: Option<Measurement>,
    moved: bool,
    listeners: Vec<(Binding, L)>,
}

impl<L> DragSession<L> {
    /// Start a session for a pointer at `pointer` over a widget rendered at
    /// `offset`. Without a `rendered` measurement moves are not clamped.
    pub fn new(
        widget: WidgetId,
        pointer: Point,
        offset: Point,
        rendered: Option<Measurement>,
        listeners: Vec<(Binding, L)>,
    ) -> Self {
        Self {
            widget,
            anchor: pointer - offset,
            origin: offset,
            live: offset,
            rendered,
            moved: false,
            listeners,
        }
    }

    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Position the widget is currently displayed at.
    pub fn live(&self) -> Point {
        self.live
    }

    /// Whether any move changed the position.
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Whether a session-scoped binding belongs to this session.
    pub fn owns(&self, binding: Binding) -> bool {
        self.listeners.iter().any(|(b, _)| *b == binding)
    }

    /// Track the pointer and return the new clamped position.
    pub fn update(&mut self, pointer: Point, viewport: Size, inset: f64) -> Point {
        let candidate = pointer - self.anchor;
        let position = match self.rendered {
            Some(rendered) => clamp_offset(
                candidate,
                rendered.bounds.origin() - rendered.offset,
                rendered.size(),
                viewport,
                inset,
            ),
            None => candidate.round(),
        };
        if position != self.origin {
            self.moved = true;
        }
        self.live = position;
        position
    }

    /// Consume the session, handing back its listener handles.
    pub fn into_listeners(self) -> Vec<(Binding, L)> {
        self.listeners
    }
}

/// Holds at most one [`DragSession`].
#[derive(Debug)]
pub struct DragController<L> {
    session: Option<DragSession<L>>,
}

impl<L> Default for DragController<L> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<L> DragController<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The widget currently being dragged.
    pub fn owner(&self) -> Option<WidgetId> {
        self.session.as_ref().map(|s| s.widget)
    }

    pub fn session(&self) -> Option<&DragSession<L>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession<L>> {
        self.session.as_mut()
    }

    /// Claim the slot. The only place a session is installed; hands the
    /// session back if another drag is active.
    pub fn begin(&mut self, session: DragSession<L>) -> Result<(), DragSession<L>> {
        if self.session.is_some() {
            return Err(session);
        }
        self.session = Some(session);
        Ok(())
    }

    /// Release the slot.
    pub fn finish(&mut self) -> Option<DragSession<L>> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn test_anchor_offset() {
        let session: DragSession<()> = DragSession::new(
            WidgetId::new_v4(),
            Point::new(150.0, 150.0),
            Point::new(100.0, 100.0),
            None,
            vec![],
        );
        assert_eq!(session.anchor(), Vec2::new(50.0, 50.0));
        assert!(!session.moved());
    }

    #[test]
    fn test_update_keeps_anchor() {
        let mut session: DragSession<()> = DragSession::new(
            WidgetId::new_v4(),
            Point::new(150.0, 150.0),
            Point::new(100.0, 100.0),
            None,
            vec![],
        );
        let viewport = Size::new(1000.0, 800.0);
        let live = session.update(Point::new(300.0, 300.0), viewport, -60.0);
        assert_eq!(live, Point::new(250.0, 250.0));
        let live = session.update(Point::new(310.4, 299.6), viewport, -60.0);
        assert_eq!(live, Point::new(260.0, 250.0));
        assert_eq!(session.anchor(), Vec2::new(50.0, 50.0));
        assert!(session.moved());
    }

    fn measured(offset: Point, bounds: Rect) -> Option<Measurement> {
        Some(Measurement { offset, bounds })
    }

    #[test]
    fn test_update_clamps_with_measured_size() {
        let mut session: DragSession<()> = DragSession::new(
            WidgetId::new_v4(),
            Point::new(10.0, 10.0),
            Point::ZERO,
            measured(Point::ZERO, Rect::new(0.0, 0.0, 140.0, 140.0)),
            vec![],
        );
        let live = session.update(Point::new(5000.0, 5000.0), Size::new(1000.0, 800.0), -60.0);
        assert_eq!(live, Point::new(800.0, 600.0));
    }

    #[test]
    fn test_update_clamps_scaled_bounds_not_origin() {
        // 140x140 at scale 2 around its centre: bounds start 70px early.
        let mut session: DragSession<()> = DragSession::new(
            WidgetId::new_v4(),
            Point::new(110.0, 110.0),
            Point::new(100.0, 100.0),
            measured(Point::new(100.0, 100.0), Rect::new(30.0, 30.0, 310.0, 310.0)),
            vec![],
        );
        let viewport = Size::new(1000.0, 800.0);

        let low = session.update(Point::new(-5000.0, -5000.0), viewport, -60.0);
        assert_eq!(low, Point::new(10.0, 10.0));
        let high = session.update(Point::new(5000.0, 5000.0), viewport, -60.0);
        assert_eq!(high, Point::new(730.0, 530.0));
    }

    #[test]
    fn test_clamped_position_is_whole_pixels() {
        let mut session: DragSession<()> = DragSession::new(
            WidgetId::new_v4(),
            Point::ZERO,
            Point::ZERO,
            measured(Point::ZERO, Rect::new(-1.2, -1.2, 141.2, 141.2)),
            vec![],
        );
        let live = session.update(Point::new(5000.0, 5000.0), Size::new(1000.0, 800.0), -60.0);
        assert_eq!(live, Point::new(798.0, 598.0));
        assert!(live.x + 141.2 <= 940.0);
    }

    #[test]
    fn test_single_slot() {
        let mut drag = DragController::new();
        let a = WidgetId::new_v4();
        let b = WidgetId::new_v4();
        let first = DragSession::<()>::new(a, Point::ZERO, Point::ZERO, None, vec![]);
        assert!(drag.begin(first).is_ok());
        let rejected = drag.begin(DragSession::new(b, Point::ZERO, Point::ZERO, None, vec![]));
        assert_eq!(rejected.unwrap_err().widget(), b);
        assert_eq!(drag.owner(), Some(a));

        assert_eq!(drag.finish().map(|s| s.widget()), Some(a));
        assert!(!drag.is_active());
        assert!(drag.finish().is_none());
    }
}
