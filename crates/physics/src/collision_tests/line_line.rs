//! Intersections between line-family primitives.
//!
//! Segments are tested with orientation signs before anything is solved: the
//! 2x2 system is only used to locate a crossing already known to exist.
use crate::tolerances::*;
use crate::*;

/// Do `o` and `p` lie strictly on opposite sides of the line through `a` and `b`?
pub(crate) fn straddles(o: V2, p: V2, a: V2, b: V2) -> bool {
    let ab = b - a;
    ab.cross(&(p - a)) * ab.cross(&(o - a)) < 0.0
}

/// Does `point` lie exactly on the segment `[a, b]`?  Catches the crossings
/// through an endpoint that [straddles] rejects.
pub(crate) fn touches(point: V2, a: V2, b: V2) -> bool {
    (b - a).cross(&(point - a)) == 0.0
        && point.x >= a.x.min(b.x)
        && point.x <= a.x.max(b.x)
        && point.y >= a.y.min(b.y)
        && point.y <= a.y.max(b.y)
}

/// Intersection of the infinite lines through `a, b` and `o, p`.
///
/// Lines whose determinant is at most [PARALLEL_EPSILON] have no intersection.
pub(crate) fn line_line_point(a: V2, b: V2, o: V2, p: V2) -> Option<V2> {
    let d1 = b - a;
    let d2 = o - p;
    let det = d1.cross(&d2);
    if det.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let t = (o - a).cross(&d2) / det;
    Some(a + d1 * t)
}

pub(crate) fn segment_segment_point(a: V2, b: V2, o: V2, p: V2) -> Option<V2> {
    if !straddles(o, p, a, b) || !straddles(a, b, o, p) {
        return None;
    }
    line_line_point(a, b, o, p)
}

/// Crossing of the segment `[a, b]` with the infinite line through `o` and `p`.
pub(crate) fn segment_line_point(a: V2, b: V2, o: V2, p: V2) -> Option<V2> {
    if !straddles(a, b, o, p) {
        return None;
    }
    line_line_point(a, b, o, p)
}

/// Crossing of a ray with the segment `[a, b]`, as `(t, point)`.
pub(crate) fn ray_segment_point(ray: &Ray, a: V2, b: V2) -> Option<(f64, V2)> {
    if ray.is_degenerate() {
        return None;
    }

    let origin = ray.get_origin();
    let ahead = origin + ray.get_direction();
    if !straddles(a, b, origin, ahead) {
        return None;
    }

    let point = line_line_point(origin, ahead, a, b)?;
    let t = ray.project(point);
    ray.contains_parameter(t).then(|| (t, point))
}
