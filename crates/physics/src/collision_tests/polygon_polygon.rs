//! Convex polygons against each other.
use crate::collision_tests::{push_unique, segment_segment_point, touches, Points};
use crate::*;

/// Vertices of `p` lying exactly on an edge of `q`.
fn touching_vertices(p: &ConvexPolygon, q: &ConvexPolygon, out: &mut Points) {
    for &v in p.get_vertices() {
        if q.edges().any(|e| touches(v, e.a, e.b)) {
            push_unique(out, v);
        }
    }
}

/// Crossings between every pair of edges.
pub(crate) fn polygon_polygon_points(p: &ConvexPolygon, q: &ConvexPolygon) -> Points {
    let mut out = Points::new();
    for e in p.edges() {
        for f in q.edges() {
            if let Some(point) = segment_segment_point(e.a, e.b, f.a, f.b) {
                out.push(point);
            }
        }
    }
    touching_vertices(p, q, &mut out);
    touching_vertices(q, p, &mut out);
    out
}
