//! Circles against segments and infinite lines.
use crate::collision_tests::{LineContact, Points};
use crate::raycasting::ray_circle_parameters;
use crate::tolerances::*;
use crate::*;

/// Where the circle meets the infinite line through `a` and `b`.
///
/// Substitutes `y = m x + k` into the circle equation and solves the
/// quadratic.  Lines too close to vertical for a stable slope are treated as
/// the vertical line through the mean of the two x coordinates.  A tangent
/// line returns the same point twice.
pub(crate) fn circle_line_intersections(circle: &Circle, a: V2, b: V2) -> Option<(V2, V2)> {
    let c = *circle.get_center();
    let r = circle.get_radius();

    if (a.x - b.x).abs() < VERTICAL_LINE_EPSILON {
        let x = (a.x + b.x) * 0.5;
        let dy2 = r * r - (x - c.x).powi(2);
        if dy2 < 0.0 {
            return None;
        }
        let dy = dy2.sqrt();
        return Some((V2::new(x, c.y - dy), V2::new(x, c.y + dy)));
    }

    let m = (b.y - a.y) / (b.x - a.x);
    let k = a.y - m * a.x;
    let qa = 1.0 + m * m;
    let qb = 2.0 * (m * (k - c.y) - c.x);
    let qc = c.x * c.x + (k - c.y).powi(2) - r * r;
    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return None;
    }

    let root = disc.sqrt();
    let x1 = (-qb - root) / (2.0 * qa);
    let x2 = (-qb + root) / (2.0 * qa);
    Some((V2::new(x1, m * x1 + k), V2::new(x2, m * x2 + k)))
}

/// Crossings of the circle with the segment, kept only where they fall within
/// the segment's extent.
pub(crate) fn circle_segment_points(circle: &Circle, segment: &Segment) -> Points {
    let mut out = Points::new();
    if segment.is_degenerate() {
        return out;
    }
    if let Some((p1, p2)) = circle_line_intersections(circle, segment.a, segment.b) {
        if segment.box_contains(p1, BOUNDS_SLACK) {
            out.push(p1);
        }
        if p2 != p1 && segment.box_contains(p2, BOUNDS_SLACK) {
            out.push(p2);
        }
    }
    out
}

pub(crate) fn circle_line_points(circle: &Circle, line: &Line) -> Points {
    let mut out = Points::new();
    if let Some((p1, p2)) = circle_line_intersections(circle, line.a, line.b) {
        out.push(p1);
        if p2 != p1 {
            out.push(p2);
        }
    }
    out
}

/// Crossings of the circle with a ray, in order along the ray.
pub(crate) fn circle_ray_points(circle: &Circle, ray: &Ray) -> Points {
    let mut out = Points::new();
    if let Some((t1, t2)) = ray_circle_parameters(ray, circle) {
        if ray.contains_parameter(t1) {
            out.push(ray.evaluate(t1));
        }
        if t2 != t1 && ray.contains_parameter(t2) {
            out.push(ray.evaluate(t2));
        }
    }
    out
}

pub(crate) fn circle_ray_test(circle: &Circle, ray: &Ray) -> bool {
    !ray.is_degenerate() && ray.distance_squared(*circle.get_center()) <= circle.get_radius().powi(2)
}

pub(crate) fn circle_segment_test(circle: &Circle, segment: &Segment) -> bool {
    segment.distance_squared(*circle.get_center()) <= circle.get_radius().powi(2)
}

pub(crate) fn circle_line_test(circle: &Circle, line: &Line) -> bool {
    line.distance_squared(*circle.get_center()) <= circle.get_radius().powi(2)
}

/// The circle's surface point in the direction of `toward`.
fn surface_toward(circle: &Circle, toward: V2, fallback: V2) -> LineContact {
    let normal = (toward - *circle.get_center()).normalize_or(fallback);
    LineContact {
        point: *circle.get_center() + normal * circle.get_radius(),
        normal,
    }
}

pub(crate) fn circle_segment_contact(circle: &Circle, segment: &Segment) -> Option<LineContact> {
    if !circle_segment_test(circle, segment) {
        return None;
    }

    let inside_a = circle.contains(segment.a);
    let inside_b = circle.contains(segment.b);
    if inside_a == inside_b {
        // Both ends on the same side: the boundary point nearest the segment
        // (or, when the whole segment is inside, nearest its supporting line).
        let toward = if inside_a {
            Line::new(segment.a, segment.b).closest_point(*circle.get_center())
        } else {
            segment.closest_point(*circle.get_center())
        };
        return Some(surface_toward(circle, toward, segment.normal()));
    }

    // One end inside: the crossing nearest the outside end.
    let outside = if inside_a { segment.b } else { segment.a };
    let point = circle_segment_points(circle, segment)
        .into_iter()
        .min_by(|p, q| {
            p.distance_squared(&outside)
                .partial_cmp(&q.distance_squared(&outside))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|| circle.closest_point(outside));
    Some(LineContact {
        point,
        normal: circle.surface_normal(point),
    })
}

pub(crate) fn circle_line_contact(circle: &Circle, line: &Line) -> Option<LineContact> {
    if !circle_line_test(circle, line) {
        return None;
    }
    let foot = line.closest_point(*circle.get_center());
    Some(surface_toward(circle, foot, line.normal()))
}
