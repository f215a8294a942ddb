//! Error types for widget setup and configuration.

use crate::widget::WidgetId;
use thiserror::Error;

/// Failures reported by a [`Host`](crate::host::Host) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Failed to bind {kind} listener: {reason}")]
    Bind { kind: &'static str, reason: String },
}

/// Widget setup errors.
///
/// These indicate a defect in how the hosting page wires up a widget, not a
/// runtime condition. The widget is left unregistered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("Widget has no surface element")]
    MissingSurface,
    #[error("Unknown widget: {0}")]
    UnknownWidget(WidgetId),
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Result type for widget setup.
pub type WidgetResult<T> = Result<T, WidgetError>;
