//! Boundary clamping for widget positions.

use kurbo::{Point, Size, Vec2};

/// Clamp a candidate top-left position so a widget of `size` stays within the
/// viewport region described by `inset`.
///
/// Per axis the allowed range is `inset ..= viewport - size + inset`. When the
/// range is empty (the viewport is smaller than the widget plus margins) the
/// axis resolves to `inset`.
///
/// `size` must be the rendered size, scale included. If it is not a usable
/// measurement the candidate is returned unchanged.
pub fn clamp(candidate: Point, size: Size, viewport: Size, inset: f64) -> Point {
    if !is_measured(size) || !is_measured(viewport) {
        return candidate;
    }

    Point::new(
        clamp_axis(candidate.x, size.width, viewport.width, inset),
        clamp_axis(candidate.y, size.height, viewport.height, inset),
    )
}

fn clamp_axis(value: f64, extent: f64, viewport: f64, inset: f64) -> f64 {
    let min = inset;
    let max = viewport - extent + inset;
    if max < min {
        return min;
    }
    value.max(min).min(max)
}

/// Clamp a translate origin whose rendered bounds start `slack` away from it
/// (rotation and scale pivot on the centre, so a scaled widget's bounds begin
/// above and to the left of its translate origin).
///
/// The rendered bounds of `size` are kept inside the inset viewport and the
/// result is rounded to whole pixels without leaving the allowed range.
pub fn clamp_offset(
    candidate: Point,
    slack: Vec2,
    size: Size,
    viewport: Size,
    inset: f64,
) -> Point {
    if !is_measured(size) || !is_measured(viewport) {
        return candidate;
    }

    Point::new(
        offset_axis(candidate.x, slack.x, size.width, viewport.width, inset),
        offset_axis(candidate.y, slack.y, size.height, viewport.height, inset),
    )
}

fn offset_axis(value: f64, slack: f64, extent: f64, viewport: f64, inset: f64) -> f64 {
    let min = (inset - slack).ceil();
    let max = (viewport - extent + inset - slack).floor();
    if max < min {
        return min;
    }
    value.round().max(min).min(max)
}

/// Whether a size is usable for clamping (finite and non-empty).
pub fn is_measured(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);
    const WIDGET: Size = Size::new(140.0, 140.0);

    #[test]
    fn test_clamp_negative_inset_extremes() {
        let low = clamp(Point::new(-500.0, -500.0), WIDGET, VIEWPORT, -60.0);
        assert_eq!(low, Point::new(-60.0, -60.0));

        let high = clamp(Point::new(5000.0, 5000.0), WIDGET, VIEWPORT, -60.0);
        assert_eq!(high, Point::new(800.0, 600.0));
    }

    #[test]
    fn test_clamp_inside_is_untouched() {
        let p = Point::new(250.0, 300.0);
        assert_eq!(clamp(p, WIDGET, VIEWPORT, -60.0), p);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let insets = [-60.0, 0.0, 25.0];
        let candidates = [
            Point::new(-1e6, 3.0),
            Point::new(999.0, 799.0),
            Point::new(420.5, -7.25),
            Point::new(1e9, 1e9),
        ];
        for inset in insets {
            for candidate in candidates {
                let once = clamp(candidate, WIDGET, VIEWPORT, inset);
                let twice = clamp(once, WIDGET, VIEWPORT, inset);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_clamp_reversed_range_resolves_to_min() {
        let tiny = Size::new(100.0, 100.0);
        let clamped = clamp(Point::new(50.0, 50.0), WIDGET, tiny, 10.0);
        assert_eq!(clamped, Point::new(10.0, 10.0));
        assert!(!clamped.x.is_nan());
    }

    #[test]
    fn test_clamp_unmeasured_size_passes_through() {
        let candidate = Point::new(-5000.0, 5000.0);
        assert_eq!(clamp(candidate, Size::ZERO, VIEWPORT, -60.0), candidate);
        assert_eq!(clamp(candidate, Size::new(f64::NAN, 10.0), VIEWPORT, -60.0), candidate);
    }

    #[test]
    fn test_clamp_scaled_size_shrinks_range() {
        let scaled = Size::new(280.0, 280.0);
        let clamped = clamp(Point::new(5000.0, 5000.0), scaled, VIEWPORT, 0.0);
        assert_eq!(clamped, Point::new(720.0, 520.0));
    }

    #[test]
    fn test_clamp_offset_keeps_scaled_bounds_inside() {
        // 140x140 at scale 2: rendered bounds start 70px before the origin.
        let slack = Vec2::new(-70.0, -70.0);
        let size = Size::new(280.0, 280.0);

        let low = clamp_offset(Point::new(-5000.0, -5000.0), slack, size, VIEWPORT, -60.0);
        assert_eq!(low, Point::new(10.0, 10.0));
        assert!((low.x + slack.x + 60.0).abs() < f64::EPSILON);

        let high = clamp_offset(Point::new(5000.0, 5000.0), slack, size, VIEWPORT, -60.0);
        assert_eq!(high, Point::new(730.0, 530.0));
        assert!((high.x + slack.x + size.width - 940.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_offset_rounds_inward() {
        let slack = Vec2::new(-1.2, -1.2);
        let size = Size::new(142.4, 142.4);
        let high = clamp_offset(Point::new(5000.0, 5000.0), slack, size, VIEWPORT, -60.0);
        // Range ends at 798.8; rounding must not step past it.
        assert_eq!(high, Point::new(798.0, 598.0));
        let low = clamp_offset(Point::new(-5000.0, -5000.0), slack, size, VIEWPORT, -60.0);
        assert_eq!(low, Point::new(-58.0, -58.0));
    }

    #[test]
    fn test_clamp_offset_without_slack_matches_clamp() {
        let candidate = Point::new(5000.0, -5000.0);
        assert_eq!(
            clamp_offset(candidate, Vec2::ZERO, WIDGET, VIEWPORT, -60.0),
            clamp(candidate, WIDGET, VIEWPORT, -60.0)
        );
    }
}
