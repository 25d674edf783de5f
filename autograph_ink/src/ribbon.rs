// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variable-width curve rendering.
//!
//! The width of the ink is derived from drawing speed alone: the faster the
//! pointer moves between samples, the thinner the line. Successive samples
//! are joined by quadratic ribbons running from the previous midpoint to the
//! current midpoint with the raw sample as the control point, which yields a
//! smooth piecewise-quadratic centerline through the sample midpoints.
//!
//! ## Usage
//!
//! 1) Call [`StrokeBuilder::begin`] on touch-down.
//! 2) Feed every movement sample to [`StrokeBuilder::advance`]; a
//!    [`Step::Ribbon`] carries a closed outline ready to be filled.
//! 3) Call [`StrokeBuilder::end`] when the gesture finishes or is cancelled.
//!
//! ```
//! use autograph_ink::ribbon::{Step, StrokeBuilder};
//! use autograph_ink::StrokeStyle;
//! use kurbo::Point;
//!
//! let style = StrokeStyle::default();
//! let mut stroke = StrokeBuilder::new();
//! stroke.begin(Point::new(0.0, 0.0));
//!
//! // The first accepted sample only seeds the curve.
//! assert!(matches!(stroke.advance(Point::new(10.0, 0.0), &style), Step::Degenerate));
//! // Later samples produce ribbons.
//! assert!(matches!(stroke.advance(Point::new(20.0, 0.0), &style), Step::Ribbon(_)));
//! assert!(stroke.end());
//! ```

use kurbo::{BezPath, Circle, Point, Shape};
use log::trace;

use crate::StrokeStyle;
use crate::geometry::{distance, midpoint, offset_points};

/// Samples closer than this to the previous sample are ignored.
pub const MIN_SAMPLE_DISTANCE: f64 = 1.0;

/// Scale from inverse sample distance to width.
///
/// Tuned by feel together with [`WIDTH_SMOOTHING`]; changing either changes
/// the look of every signature.
pub const SPEED_TO_WIDTH: f64 = 50.0;

/// Blend factor between the speed-derived width and the previous width.
pub const WIDTH_SMOOTHING: f64 = 0.5;

/// Radius of the dot drawn for a tap.
pub const DOT_RADIUS: f64 = 2.0;

/// Flattening tolerance used when converting dots to paths.
const DOT_TOLERANCE: f64 = 0.1;

/// Build the closed outline of a quadratic ribbon.
///
/// The centerline runs from `start` to `end` with `control` as its quadratic
/// control point; the width varies from `start_width` to `end_width`, passing
/// through their average at the control point.
///
/// Returns `None` for a degenerate ribbon: when `start == control`, or when
/// any of the offset directions is undefined.
pub fn ribbon(
    start: Point,
    control: Point,
    end: Point,
    start_width: f64,
    end_width: f64,
) -> Option<BezPath> {
    if start == control {
        return None;
    }
    let control_width = (start_width + end_width) / 2.0;

    let (start_left, start_right) = offset_points(start, control, start_width)?;
    let (control_left, control_right) = offset_points(control, start, control_width)?;
    let (end_left, end_right) = offset_points(end, control, end_width)?;

    let mut outline = BezPath::new();
    outline.move_to(start_left);
    outline.quad_to(control_right, end_right);
    outline.line_to(end_left);
    outline.quad_to(control_left, start_right);
    outline.close_path();
    Some(outline)
}

/// Closed circular outline drawn for a tap at `center`.
pub fn dot(center: Point) -> BezPath {
    Circle::new(center, DOT_RADIUS).to_path(DOT_TOLERANCE)
}

/// Width for a sample `len` units away from the previous one.
///
/// Exponentially smoothed inverse speed, clamped to the style's limits.
pub fn sample_width(len: f64, previous_width: f64, style: &StrokeStyle) -> f64 {
    let raw =
        (1.0 / len) * SPEED_TO_WIDTH * WIDTH_SMOOTHING + previous_width * (1.0 - WIDTH_SMOOTHING);
    style.clamp_width(raw)
}

/// Outcome of feeding one movement sample to a [`StrokeBuilder`].
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// No gesture is active; the sample was ignored.
    Idle,
    /// The sample was too close to the previous one and was dropped.
    Skipped,
    /// The sample was accepted but its ribbon has zero length.
    Degenerate,
    /// The sample was accepted and produced this closed outline.
    Ribbon(BezPath),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cursor {
    previous_point: Point,
    previous_end_point: Point,
    previous_width: f64,
}

/// Per-gesture state of the curve renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrokeBuilder {
    cursor: Option<Cursor>,
}

impl StrokeBuilder {
    /// Create an idle builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new gesture at `point`.
    pub fn begin(&mut self, point: Point) {
        self.cursor = Some(Cursor {
            previous_point: point,
            previous_end_point: point,
            previous_width: 0.0,
        });
    }

    /// Feed a movement sample.
    pub fn advance(&mut self, point: Point, style: &StrokeStyle) -> Step {
        let Some(cursor) = self.cursor.as_mut() else {
            return Step::Idle;
        };

        let len = distance(cursor.previous_point, point);
        if len < MIN_SAMPLE_DISTANCE {
            trace!("dropping sample {point:?}, {len} from previous");
            return Step::Skipped;
        }

        let width = sample_width(len, cursor.previous_width, style);
        let mid = midpoint(point, cursor.previous_point);
        let outline = ribbon(
            cursor.previous_end_point,
            cursor.previous_point,
            mid,
            cursor.previous_width,
            width,
        );

        cursor.previous_point = point;
        cursor.previous_end_point = mid;
        cursor.previous_width = width;

        match outline {
            Some(outline) => Step::Ribbon(outline),
            None => {
                trace!("degenerate ribbon ending at {mid:?}");
                Step::Degenerate
            }
        }
    }

    /// Finish the gesture. Returns `true` if a gesture was active.
    pub fn end(&mut self) -> bool {
        self.cursor.take().is_some()
    }

    /// Returns `true` between [`Self::begin`] and [`Self::end`].
    pub fn is_active(&self) -> bool {
        self.cursor.is_some()
    }

    /// The last sample that was accepted, if a gesture is active.
    pub fn previous_point(&self) -> Option<Point> {
        self.cursor.map(|c| c.previous_point)
    }

    /// The midpoint the last ribbon ended at, if a gesture is active.
    pub fn previous_end_point(&self) -> Option<Point> {
        self.cursor.map(|c| c.previous_end_point)
    }

    /// The width the last accepted sample was assigned, if a gesture is active.
    pub fn previous_width(&self) -> Option<f64> {
        self.cursor.map(|c| c.previous_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Rect};

    fn style_1_to_4() -> StrokeStyle {
        let mut style = StrokeStyle::default();
        assert!(style.set_max_width(4.0));
        style
    }

    #[test]
    fn ribbon_with_start_at_control_is_skipped() {
        let p = Point::new(3.0, 3.0);
        assert_eq!(ribbon(p, p, Point::new(8.0, 3.0), 1.0, 2.0), None);
    }

    #[test]
    fn ribbon_outline_shape() {
        let outline = ribbon(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            2.0,
            4.0,
        )
        .expect("non-degenerate ribbon");
        let els = outline.elements();
        assert_eq!(els.len(), 5);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 1.0)));
        // The end offset points away from the control, so its right side is
        // on the same side as the start's left side.
        match els[1] {
            PathEl::QuadTo(c, p) => {
                assert!((c - Point::new(10.0, 1.5)).hypot() < 1e-9, "control was {c:?}");
                assert!((p - Point::new(20.0, 2.0)).hypot() < 1e-9, "end was {p:?}");
            }
            ref other => panic!("expected a quad, got {other:?}"),
        }
        match els[2] {
            PathEl::LineTo(p) => assert!((p - Point::new(20.0, -2.0)).hypot() < 1e-9),
            ref other => panic!("expected a line, got {other:?}"),
        }
        match els[3] {
            PathEl::QuadTo(c, p) => {
                assert!((c - Point::new(10.0, -1.5)).hypot() < 1e-9, "control was {c:?}");
                assert!((p - Point::new(0.0, -1.0)).hypot() < 1e-9, "end was {p:?}");
            }
            ref other => panic!("expected a quad, got {other:?}"),
        }
        assert_eq!(els[4], PathEl::ClosePath);
    }

    #[test]
    fn dot_is_centered() {
        let bounds = dot(Point::new(5.0, 5.0)).bounding_box();
        let expected = Rect::new(3.0, 3.0, 7.0, 7.0);
        assert!((bounds.x0 - expected.x0).abs() < 1e-6, "{bounds:?}");
        assert!((bounds.y1 - expected.y1).abs() < 1e-6, "{bounds:?}");
    }

    #[test]
    fn width_follows_inverse_speed_and_clamps() {
        let style = style_1_to_4();
        // Slow: 5 units apart -> 1/5 * 25 = 5, clamped to 4.
        assert_eq!(sample_width(5.0, 0.0, &style), 4.0);
        // Fast: 50 units apart -> 0.5 + 0.5 * 2 = 1.5.
        assert_eq!(sample_width(50.0, 2.0, &style), 1.5);
        // Very fast from zero -> clamped up to the minimum.
        assert_eq!(sample_width(1000.0, 0.0, &style), 1.0);
    }

    #[test]
    fn advance_without_begin_is_idle() {
        let mut stroke = StrokeBuilder::new();
        assert_eq!(stroke.advance(Point::new(1.0, 1.0), &StrokeStyle::default()), Step::Idle);
        assert!(!stroke.end());
    }

    #[test]
    fn begin_resets_state() {
        let style = style_1_to_4();
        let mut stroke = StrokeBuilder::new();
        stroke.begin(Point::new(0.0, 0.0));
        stroke.advance(Point::new(10.0, 0.0), &style);
        assert_ne!(stroke.previous_width(), Some(0.0));

        stroke.begin(Point::new(50.0, 50.0));
        assert_eq!(stroke.previous_point(), Some(Point::new(50.0, 50.0)));
        assert_eq!(stroke.previous_end_point(), Some(Point::new(50.0, 50.0)));
        assert_eq!(stroke.previous_width(), Some(0.0));
    }

    #[test]
    fn sub_pixel_sample_is_skipped() {
        let style = style_1_to_4();
        let mut stroke = StrokeBuilder::new();
        stroke.begin(Point::new(0.0, 0.0));

        assert_eq!(stroke.advance(Point::new(0.0, 0.5), &style), Step::Skipped);
        // Nothing moved: no width was computed for the dropped sample.
        assert_eq!(stroke.previous_point(), Some(Point::new(0.0, 0.0)));
        assert_eq!(stroke.previous_width(), Some(0.0));

        // The (10, 0) sample is processed. It is the first accepted sample,
        // so its ribbon starts at its own control point and has no area.
        assert_eq!(stroke.advance(Point::new(10.0, 0.0), &style), Step::Degenerate);
        assert_eq!(stroke.previous_point(), Some(Point::new(10.0, 0.0)));
        assert_eq!(stroke.previous_end_point(), Some(Point::new(5.0, 0.0)));
        assert_eq!(stroke.previous_width(), Some(2.5));

        // The next one draws from (5, 0) through (10, 0) to (15, 0).
        let Step::Ribbon(outline) = stroke.advance(Point::new(20.0, 0.0), &style) else {
            panic!("expected a ribbon");
        };
        let bounds = outline.bounding_box();
        assert!((bounds.x0 - 5.0).abs() < 1e-9, "{bounds:?}");
        assert!((bounds.x1 - 15.0).abs() < 1e-9, "{bounds:?}");
    }

    #[test]
    fn exactly_one_unit_is_accepted() {
        let style = style_1_to_4();
        let mut stroke = StrokeBuilder::new();
        stroke.begin(Point::new(0.0, 0.0));
        assert_eq!(stroke.advance(Point::new(1.0, 0.0), &style), Step::Degenerate);
    }
}
