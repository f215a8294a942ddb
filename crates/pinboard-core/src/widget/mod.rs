//! Widgets and their per-widget bookkeeping.
//!
//! A widget is a positioned surface on the desktop with a fixed base
//! rotation/scale and an interaction state. Content is rendered elsewhere;
//! this module only tracks what the interaction core needs.

mod listeners;
mod options;
mod registry;
mod state;

pub use listeners::ListenerTable;
pub use options::WidgetOptions;
pub use registry::WidgetRegistry;
pub use state::Interaction;

use crate::config::HoverDelta;
use crate::transform::{Transform, compose, compose_hovered};
use kurbo::Point;
use uuid::Uuid;

/// Unique identifier for a widget.
pub type WidgetId = Uuid;

/// A widget registered on a desktop.
#[derive(Debug, Clone)]
pub struct Widget<E> {
    id: WidgetId,
    surface: E,
    container: E,
    inner: Option<E>,
    /// Resting top-left position in viewport pixels.
    pub(crate) position: Point,
    rotation: f64,
    scale: f64,
    z_index: i32,
    options: WidgetOptions,
    pub(crate) interaction: Interaction,
}

impl<E> Widget<E> {
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The element the user perceives as the widget. Transforms and markers
    /// are written here.
    pub fn surface(&self) -> &E {
        &self.surface
    }

    /// The element pointer-down is listened on.
    pub fn container(&self) -> &E {
        &self.container
    }

    /// Content surface rendered independently of the drag transform.
    pub fn inner(&self) -> Option<&E> {
        self.inner.as_ref()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Base rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Base scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn options(&self) -> WidgetOptions {
        self.options
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Transform at rest: base rotation and scale.
    pub fn base_transform(&self) -> Transform {
        compose(self.position, self.rotation, self.scale)
    }

    /// Transform to display at `position` for the current interaction state.
    pub fn display_transform_at(&self, position: Point, delta: HoverDelta) -> Transform {
        if self.options.hover_effects && self.interaction.is_hovered() {
            compose_hovered(position, self.rotation, self.scale, delta)
        } else {
            compose(position, self.rotation, self.scale)
        }
    }

    /// Transform to display at the resting position.
    pub fn display_transform(&self, delta: HoverDelta) -> Transform {
        self.display_transform_at(self.position, delta)
    }
}

/// Everything the content renderer supplies to create a widget.
#[derive(Debug, Clone)]
pub struct WidgetSpec<E> {
    pub surface: Option<E>,
    /// Defaults to the surface.
    pub container: Option<E>,
    pub inner: Option<E>,
    pub position: Point,
    pub rotation: f64,
    pub scale: f64,
    pub z_index: i32,
    pub options: WidgetOptions,
}

impl<E> Default for WidgetSpec<E> {
    fn default() -> Self {
        Self {
            surface: None,
            container: None,
            inner: None,
            position: Point::ZERO,
            rotation: 0.0,
            scale: 1.0,
            z_index: 0,
            options: WidgetOptions::default(),
        }
    }
}

impl<E> WidgetSpec<E> {
    /// Spec for a widget rendered on `surface`.
    pub fn new(surface: E) -> Self {
        Self {
            surface: Some(surface),
            ..Self::default()
        }
    }

    pub fn with_container(mut self, container: E) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_inner(mut self, inner: E) -> Self {
        self.inner = Some(inner);
        self
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_options(mut self, options: WidgetOptions) -> Self {
        self.options = options;
        self
    }
}

impl<E: Clone> WidgetSpec<E> {
    /// Build the widget. `None` when the spec has no surface.
    pub(crate) fn build(self, id: WidgetId) -> Option<Widget<E>> {
        let surface = self.surface?;
        let container = self.container.unwrap_or_else(|| surface.clone());
        Some(Widget {
            id,
            surface,
            container,
            inner: self.inner,
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            z_index: self.z_index,
            options: self.options,
            interaction: Interaction::Idle,
        })
    }
}
