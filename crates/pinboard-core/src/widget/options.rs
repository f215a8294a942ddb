//! Per-widget interaction options.

use serde::{Deserialize, Serialize};

/// Which interactions a widget takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Pointer-down on the container starts a drag.
    pub draggable: bool,
    /// Widget reports activations (press + release, or a drag that never moved).
    pub clickable: bool,
    /// Hover shows the rotation/scale delta.
    pub hover_effects: bool,
    /// Hover and drag toggle the shadow marker.
    pub shadows: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            draggable: true,
            clickable: true,
            hover_effects: true,
            shadows: true,
        }
    }
}

impl WidgetOptions {
    /// Options for a widget that only reacts to hover.
    pub fn fixed() -> Self {
        Self {
            draggable: false,
            clickable: false,
            ..Self::default()
        }
    }
}
