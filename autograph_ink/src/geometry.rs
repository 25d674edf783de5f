// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point helpers used to turn a centerline into a ribbon outline.

use kurbo::{Point, Vec2};

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// The point halfway between `a` and `b`.
#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Offset `p0` perpendicular to the directed segment `p0 -> p1`.
///
/// The unit vector from `p0` towards `p1` is rotated by +90 degrees and
/// scaled by `width / 2`; the returned pair is `(p0 + offset, p0 - offset)`,
/// referred to as the *left* and *right* offset points.
///
/// Returns `None` when `p0 == p1`: the direction is undefined and callers
/// treat the segment as zero-length.
pub fn offset_points(p0: Point, p1: Point, width: f64) -> Option<(Point, Point)> {
    let v = p1 - p0;
    let len = v.length();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    let unit = v / len;
    let offset = Vec2::new(-unit.y, unit.x) * (width / 2.0);
    Some((p0 + offset, p0 - offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Point::new(2.0, 2.0), Point::new(2.0, 2.0)), 0.0);
    }

    #[test]
    fn midpoint_halves_the_segment() {
        let mid = midpoint(Point::new(0.0, 10.0), Point::new(4.0, -2.0));
        assert_eq!(mid, Point::new(2.0, 4.0));
    }

    #[test]
    fn offset_points_are_perpendicular() {
        let (left, right) = offset_points(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 4.0)
            .expect("non-degenerate segment");
        assert!(approx(left, Point::new(0.0, 2.0)), "left was {left:?}");
        assert!(approx(right, Point::new(0.0, -2.0)), "right was {right:?}");
    }

    #[test]
    fn offset_points_flip_with_direction() {
        let (left, right) = offset_points(Point::new(5.0, 5.0), Point::new(5.0, 0.0), 2.0)
            .expect("non-degenerate segment");
        assert!(approx(left, Point::new(6.0, 5.0)), "left was {left:?}");
        assert!(approx(right, Point::new(4.0, 5.0)), "right was {right:?}");
    }

    #[test]
    fn offset_points_zero_width_collapses_to_origin() {
        let p = Point::new(1.0, 1.0);
        let (left, right) = offset_points(p, Point::new(2.0, 3.0), 0.0).expect("direction exists");
        assert!(approx(left, p) && approx(right, p), "zero width keeps both points at p0");
    }

    #[test]
    fn offset_points_coincident_is_guarded() {
        let p = Point::new(7.0, -3.0);
        assert_eq!(offset_points(p, p, 3.0), None);
    }
}
