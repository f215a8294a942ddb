//! Desktop-wide interaction configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default boundary inset in pixels. Negative values let widgets hang past the
/// top/left viewport edge.
pub const DEFAULT_INSET: f64 = -60.0;

/// Default z-index applied to a widget while it is being dragged.
pub const DEFAULT_DRAG_Z_INDEX: i32 = 1000;

/// Visual offset applied on top of a widget's base rotation/scale while it is
/// hovered or dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverDelta {
    /// Degrees added to the base rotation.
    pub rotate: f64,
    /// Factor multiplied into the base scale.
    pub scale: f64,
}

impl Default for HoverDelta {
    fn default() -> Self {
        Self {
            rotate: 3.0,
            scale: 1.02,
        }
    }
}

impl HoverDelta {
    /// A delta that leaves base values untouched.
    pub const NONE: Self = Self {
        rotate: 0.0,
        scale: 1.0,
    };

    /// Rotation shown for the given base rotation.
    pub fn rotation(&self, base: f64) -> f64 {
        base + self.rotate
    }

    /// Scale shown for the given base scale.
    pub fn scale(&self, base: f64) -> f64 {
        base * self.scale
    }
}

/// Configuration shared by every widget on a desktop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Signed margin applied to all four viewport edges when clamping.
    pub inset: f64,
    /// Hover/drag visual delta.
    pub hover: HoverDelta,
    /// z-index used while a widget is being dragged.
    pub drag_z_index: i32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            inset: DEFAULT_INSET,
            hover: HoverDelta::default(),
            drag_z_index: DEFAULT_DRAG_Z_INDEX,
        }
    }
}

impl DesktopConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.inset.is_finite() {
            return Err(ConfigError::Invalid(format!("inset must be finite, got {}", self.inset)));
        }
        if !self.hover.rotate.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "hover.rotate must be finite, got {}",
                self.hover.rotate
            )));
        }
        if !(self.hover.scale.is_finite() && self.hover.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hover.scale must be positive, got {}",
                self.hover.scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DesktopConfig::default();
        assert!((config.inset - DEFAULT_INSET).abs() < f64::EPSILON);
        assert!((config.hover.rotate - 3.0).abs() < f64::EPSILON);
        assert!((config.hover.scale - 1.02).abs() < f64::EPSILON);
        assert_eq!(config.drag_z_index, DEFAULT_DRAG_Z_INDEX);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "inset": 20, "hover": { "rotate": 5 } }"#;
        let config = DesktopConfig::from_json(json).unwrap();
        assert!((config.inset - 20.0).abs() < f64::EPSILON);
        assert!((config.hover.rotate - 5.0).abs() < f64::EPSILON);
        assert!((config.hover.scale - 1.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let err = DesktopConfig::from_json(r#"{ "hover": { "scale": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = DesktopConfig::from_json("{ inset: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_hover_delta_from_base() {
        let delta = HoverDelta::default();
        assert!((delta.rotation(-1.0) - 2.0).abs() < f64::EPSILON);
        assert!((delta.scale(1.0) - 1.02).abs() < f64::EPSILON);
        assert!((HoverDelta::NONE.rotation(-1.0) + 1.0).abs() < f64::EPSILON);
    }
}
