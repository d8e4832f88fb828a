//! Absolute thresholds used by the geometric predicates.
//!
//! These are absolute, not relative: predicates lose precision far from unit
//! scale.  Each constant is used by one family of call sites; they are not
//! interchangeable even where the values coincide.

/// A line whose endpoints differ by less than this in x is treated as vertical
/// when intersecting it with a circle.
pub const VERTICAL_LINE_EPSILON: f64 = 1e-2;

/// How far off its supporting line a point may be and still count as lying on
/// a segment or line.
pub const POINT_ON_LINE_EPSILON: f64 = 1e-3;

/// Determinant magnitude below which two lines are considered parallel.
pub const PARALLEL_EPSILON: f64 = 1e-3;

/// Slack added to bounding boxes when checking that a computed intersection
/// lies within a bounded primitive.
pub const BOUNDS_SLACK: f64 = 1e-4;

/// Maximum squared distance from a polygon edge for a boundary normal to be
/// reported.
pub const POLYGON_NORMAL_EPSILON_SQUARED: f64 = 1e-2;

/// Maximum distance from a capsule's surface for a boundary normal to be
/// reported.
pub const CAPSULE_NORMAL_EPSILON: f64 = 1e-1;

/// Relative tolerance for [approximately].
pub const RELATIVE_EPSILON: f64 = 1e-6;

/// Points within this distance of a polygon edge are on its boundary, and so
/// contained.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Below this sine of the angle between a containment ray and an edge, or
/// this close to an edge endpoint, the ray is resampled.
pub const RAY_DEGENERATE_EPSILON: f64 = 1e-12;

/// How many ray directions a polygon containment test samples before
/// falling back to a winding number.
pub const MAX_RAY_ATTEMPTS: usize = 16;

/// Shapes and capsule cores shorter than this are degenerate.
pub const DEGENERATE_LENGTH: f64 = 1e-5;

/// Step used to push a point across the tile boundary before folding it.
/// Walks reenter exactly on the opposite side instead, and only fall back
/// to this nudge when a crossing is not on a side.
pub const COMPLEMENTARY_STEP: f64 = 1e-3;

/// Relative distance from a tile side within which a walk's edge crossing
/// counts as on that side, scaled by the half tile size.
pub const SEAM_EPSILON: f64 = 1e-9;

/// A toric walk stops looking for tile crossings once less than this distance
/// remains.
pub const MIN_REMAINING_DISTANCE: f64 = 1e-3;

/// Squared length below which a circle cast bisection interval has converged.
pub const BISECTION_EPSILON_SQUARED: f64 = 1e-5;

/// Squared distance below which two points are the same for direction queries.
pub const SAME_POINT_EPSILON_SQUARED: f64 = 1e-5;

/// Upper bound on tile crossings followed by a single toric walk.
pub const MAX_TILE_CROSSINGS: usize = 10_000;

/// Compare two floats with a tolerance relative to their magnitude.
pub fn approximately(a: f64, b: f64) -> bool {
    (b - a).abs() < (RELATIVE_EPSILON * a.abs().max(b.abs())).max(f64::EPSILON * 8.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximate_comparison_scales() {
        assert!(approximately(1.0, 1.0 + 1e-9));
        assert!(!approximately(1.0, 1.001));
        assert!(approximately(1e9, 1e9 + 1.0));
        assert!(!approximately(0.0, 1e-9));
    }
}
