//! Circles against convex polygons.
use crate::collision_tests::{circle_segment_points, Points};
use crate::*;

/// Crossings of the circle with every edge of the polygon.
pub(crate) fn circle_polygon_points(circle: &Circle, polygon: &ConvexPolygon) -> Points {
    let mut out = Points::new();
    for edge in polygon.edges() {
        out.extend(circle_segment_points(circle, &edge));
    }
    out
}
