//! Pinboard Core Library
//!
//! Platform-agnostic interaction and positioning core for Pinboard desktop
//! widgets: hover, press and drag state, transform composition and viewport
//! clamping. The page itself is reached through the [`Host`] trait.

pub mod bounds;
pub mod config;
pub mod desktop;
pub mod drag;
pub mod error;
pub mod host;
pub mod hover;
pub mod input;
pub mod transform;
pub mod widget;

pub use bounds::{clamp, clamp_offset};
pub use config::{DesktopConfig, HoverDelta};
pub use desktop::{Desktop, DesktopEvent};
pub use drag::{DragController, DragSession};
pub use error::{ConfigError, HostError, WidgetError, WidgetResult};
pub use host::{Host, ListenOn, Marker, Measurement, MemoryElement, MemoryHost};
pub use hover::HoverController;
pub use input::{Binding, ListenTarget, ListenerKind, MouseButton, PointerEvent};
pub use transform::{Transform, compose, compose_hovered};
pub use widget::{Interaction, Widget, WidgetId, WidgetOptions, WidgetRegistry, WidgetSpec};
