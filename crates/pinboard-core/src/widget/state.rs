//! Widget interaction state.

/// The interaction state of a widget.
///
/// Hovered, pressed and dragging overlap in the UI, but not every combination
/// is legal: a widget is never pressed and dragging at once, and a dragged
/// widget always counts as hovered. The variants encode exactly the legal
/// combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    /// No pointer interaction.
    #[default]
    Idle,
    /// Pointer is over the widget.
    Hovered,
    /// Primary button pressed on a clickable widget that does not drag.
    Pressed { hovered: bool },
    /// Widget is being dragged.
    Dragging,
}

impl Interaction {
    /// Whether the hovered variant should be shown.
    pub fn is_hovered(&self) -> bool {
        matches!(self, Self::Hovered | Self::Pressed { hovered: true } | Self::Dragging)
    }

    /// Whether the widget is pressed.
    pub fn is_pressed(&self) -> bool {
        matches!(self, Self::Pressed { .. })
    }

    /// Whether the widget is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging)
    }

    /// Pointer entered the surface.
    pub fn enter(self) -> Self {
        match self {
            Self::Idle | Self::Hovered => Self::Hovered,
            Self::Pressed { .. } => Self::Pressed { hovered: true },
            Self::Dragging => Self::Dragging,
        }
    }

    /// Pointer left the surface. A drag keeps its hover; a press is cancelled.
    pub fn leave(self) -> Self {
        match self {
            Self::Dragging => Self::Dragging,
            Self::Idle | Self::Hovered | Self::Pressed { .. } => Self::Idle,
        }
    }

    /// Primary button pressed without starting a drag.
    pub fn press(self) -> Self {
        match self {
            Self::Dragging => Self::Dragging,
            other => Self::Pressed {
                hovered: other.is_hovered(),
            },
        }
    }

    /// Resting state after a press or drag, given whether the pointer is still
    /// over the widget.
    pub fn release(hovered: bool) -> Self {
        if hovered { Self::Hovered } else { Self::Idle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Interaction; 5] = [
        Interaction::Idle,
        Interaction::Hovered,
        Interaction::Pressed { hovered: false },
        Interaction::Pressed { hovered: true },
        Interaction::Dragging,
    ];

    #[test]
    fn test_pressed_and_dragging_exclusive() {
        for state in ALL {
            assert!(!(state.is_pressed() && state.is_dragging()));
            if state.is_dragging() {
                assert!(state.is_hovered());
            }
        }
    }

    #[test]
    fn test_enter_is_idempotent() {
        for state in ALL {
            assert_eq!(state.enter(), state.enter().enter());
        }
    }

    #[test]
    fn test_leave_keeps_drag() {
        assert_eq!(Interaction::Dragging.leave(), Interaction::Dragging);
        assert_eq!(Interaction::Hovered.leave(), Interaction::Idle);
        assert_eq!(Interaction::Pressed { hovered: true }.leave(), Interaction::Idle);
    }

    #[test]
    fn test_press_remembers_hover() {
        assert_eq!(Interaction::Hovered.press(), Interaction::Pressed { hovered: true });
        assert_eq!(Interaction::Idle.press(), Interaction::Pressed { hovered: false });
        assert_eq!(Interaction::Dragging.press(), Interaction::Dragging);
    }
}
