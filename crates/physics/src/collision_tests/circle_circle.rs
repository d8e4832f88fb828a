//! Test collision between two circles.
use crate::collision_tests::{Contact, Points};
use crate::*;

/// Touching circles collide.
pub(crate) fn circle_circle_test(c1: &Circle, c2: &Circle) -> bool {
    let dist_squared = c1.get_center().distance_squared(c2.get_center());
    // Avoid square root, which is generally very slow.
    let touching_dist_squared = (c1.get_radius() + c2.get_radius()).powi(2);
    dist_squared <= touching_dist_squared
}

/// The contact sits on the line between the centers, half the overlap depth
/// inside the first circle's surface.
pub(crate) fn circle_circle_contact(c1: &Circle, c2: &Circle) -> Option<Contact> {
    if !circle_circle_test(c1, c2) {
        return None;
    }

    let (cent1, cent2) = (*c1.get_center(), *c2.get_center());
    let dist = cent1.distance(&cent2);
    let point = if dist <= f64::EPSILON {
        cent1
    } else {
        let half_depth = (c1.get_radius() + c2.get_radius() - dist) * 0.5;
        cent1 + (cent2 - cent1) * ((c1.get_radius() - half_depth) / dist)
    };

    let between = (cent2 - cent1).normalize_or(V2::new(1.0, 0.0));
    let normal_a = (point - cent1).normalize_or(between);
    let normal_b = (point - cent2).normalize_or(-normal_a);
    Some(Contact {
        point,
        normal_a,
        normal_b,
    })
}

/// Where the two circles' boundaries cross: none, one (tangent) or two points.
pub(crate) fn circle_circle_points(c1: &Circle, c2: &Circle) -> Points {
    let mut out = Points::new();
    let (cent1, cent2) = (*c1.get_center(), *c2.get_center());
    let (r1, r2) = (c1.get_radius(), c2.get_radius());
    let d = cent1.distance(&cent2);
    if d <= f64::EPSILON || d > r1 + r2 || d < (r1 - r2).abs() {
        return out;
    }

    // Distance from the first center to the chord, along the center line.
    let a = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let axis = (cent2 - cent1) / d;
    let mid = cent1 + axis * a;
    let offset = axis.perpendicular() * h;

    out.push(mid + offset);
    if h > 0.0 {
        out.push(mid - offset);
    }
    out
}
