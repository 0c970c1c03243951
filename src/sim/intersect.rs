//! Intersection tests
//!
//! Stateless, side-effect-free predicates over the geometry primitives.
//! These decide both whether two shapes touch and, for the circle/rect
//! case, which axis separates them, which in turn picks the velocity
//! component a bounce reflects.

use serde::{Deserialize, Serialize};

use super::geom::{Circle, Rect};
use super::trajectory::Line;
use glam::Vec2;

/// Axis of a circle/rect collision, named for the velocity component
/// that gets reflected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// True iff `point` lies inside or on the circle
#[inline]
pub fn point_in_circle(point: Vec2, circle: &Circle) -> bool {
    (point - circle.centre).length_squared() <= circle.radius() * circle.radius()
}

/// True iff the two circles touch or overlap.
///
/// With d the distance between centres, intersection means
/// `|r1 - r2| <= d <= r1 + r2`: tangency at either extreme counts, a circle
/// strictly contained in the other without touching does not.
pub fn circles_intersect(c1: &Circle, c2: &Circle) -> bool {
    let d = (c2.centre - c1.centre).length();
    let (r1, r2) = (c1.radius(), c2.radius());
    (r1 - r2).abs() <= d && d <= r1 + r2
}

/// Circle vs axis-aligned rectangle.
///
/// Clamps the centre to the rectangle's extents per axis to find the closest
/// point; no hit when that point is farther than the radius. On a hit the
/// larger of the per-axis overlaps identifies the separating axis, with ties
/// resolving to `Axis::X`. The tie-break is policy, not accident: it decides
/// which velocity component a corner hit reflects.
pub fn circle_rect(circle: &Circle, rect: &Rect) -> Option<Axis> {
    let closest = rect.closest_point(circle.centre);
    let delta = circle.centre - closest;

    if delta.length_squared() > circle.radius() * circle.radius() {
        return None;
    }

    let overlap_x = delta.x.abs();
    let overlap_y = delta.y.abs();
    if overlap_x >= overlap_y {
        Some(Axis::X)
    } else {
        Some(Axis::Y)
    }
}

/// True iff the line `y = gradient*x + y_intercept` meets the circle.
///
/// Substituting the line into the circle equation gives a quadratic in x;
/// a non-negative discriminant means one (tangent) or two crossing points.
pub fn circle_line(circle: &Circle, line: &Line) -> bool {
    let (cx, cy) = (circle.centre.x, circle.centre.y);
    let m = line.gradient;
    let k = line.y_intercept;

    let a = 1.0 + m * m;
    let b = 2.0 * m * (k - cy) - 2.0 * cx;
    let c = cx * cx + (k - cy) * (k - cy) - circle.radius() * circle.radius();

    b * b - 4.0 * a * c >= 0.0
}
