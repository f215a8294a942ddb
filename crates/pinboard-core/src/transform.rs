//! Transform compositor: combines position, rotation and scale into the single
//! transform written to a widget's surface.

use crate::config::HoverDelta;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A composed widget transform.
///
/// Applied in a fixed order: translate, then rotate, then scale. Rotation and
/// scale pivot around the element centre, matching the CSS default
/// `transform-origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation in whole pixels.
    pub translate: Point,
    /// Rotation in degrees.
    pub rotate: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Point::ZERO,
            rotate: 0.0,
            scale: 1.0,
        }
    }
}

/// Compose a transform from a position and a rotation/scale.
///
/// The position is rounded to whole pixels to avoid sub-pixel blur. Rotation
/// and scale pass through unchanged.
pub fn compose(position: Point, rotate: f64, scale: f64) -> Transform {
    Transform {
        translate: position.round(),
        rotate,
        scale,
    }
}

/// Compose the hovered variant of a widget's transform.
///
/// The delta is always applied to the base values, so composing twice for the
/// same widget yields the same transform.
pub fn compose_hovered(
    position: Point,
    base_rotate: f64,
    base_scale: f64,
    delta: HoverDelta,
) -> Transform {
    compose(position, delta.rotation(base_rotate), delta.scale(base_scale))
}

impl Transform {
    /// The affine map from element-local coordinates to viewport coordinates,
    /// for an element with the given unscaled layout size.
    pub fn affine(&self, layout: Size) -> Affine {
        let centre = Vec2::new(layout.width / 2.0, layout.height / 2.0);
        Affine::translate(self.translate.to_vec2() + centre)
            * Affine::rotate(self.rotate.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-centre)
    }

    /// Axis-aligned bounds of an element with this transform, as the browser
    /// would report them from `getBoundingClientRect`.
    pub fn bounds(&self, layout: Size) -> Rect {
        self.affine(layout).transform_rect_bbox(layout.to_rect())
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) rotate({}deg) scale({})",
            self.translate.x, self.translate.y, self.rotate, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_rounds_position_only() {
        let t = compose(Point::new(10.4, 20.6), -1.25, 1.015);
        assert_eq!(t.translate, Point::new(10.0, 21.0));
        assert!((t.rotate + 1.25).abs() < f64::EPSILON);
        assert!((t.scale - 1.015).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose(Point::new(3.3, 4.4), 2.0, 1.5);
        let b = compose(Point::new(3.3, 4.4), 2.0, 1.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_order() {
        let t = compose(Point::new(100.0, 50.0), -1.0, 1.0);
        assert_eq!(t.to_string(), "translate(100px, 50px) rotate(-1deg) scale(1)");
    }

    #[test]
    fn test_hovered_uses_base_values() {
        let delta = HoverDelta::default();
        let once = compose_hovered(Point::new(0.0, 0.0), -1.0, 1.0, delta);
        let twice = compose_hovered(once.translate, -1.0, 1.0, delta);
        assert_eq!(once, twice);
        assert!((once.rotate - 2.0).abs() < f64::EPSILON);
        assert!((once.scale - 1.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_scale_about_centre() {
        let t = compose(Point::new(100.0, 100.0), 0.0, 2.0);
        let bounds = t.bounds(Size::new(100.0, 50.0));
        assert!((bounds.x0 - 50.0).abs() < 1e-9);
        assert!((bounds.y0 - 75.0).abs() < 1e-9);
        assert!((bounds.width() - 200.0).abs() < 1e-9);
        assert!((bounds.height() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_rotation_keeps_centre() {
        let t = compose(Point::new(0.0, 0.0), 45.0, 1.0);
        let bounds = t.bounds(Size::new(100.0, 100.0));
        let centre = bounds.center();
        assert!((centre.x - 50.0).abs() < 1e-9);
        assert!((centre.y - 50.0).abs() < 1e-9);
        assert!(bounds.width() > 100.0);
    }
}
