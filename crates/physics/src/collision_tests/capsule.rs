//! Capsules against everything else.
//!
//! A capsule's boundary is its two rails plus the outer half of each cap, so
//! crossings with a cap circle only count where [Capsule::cap_owns] them.
use crate::collision_tests::{
    circle_circle_points, circle_line_points, circle_ray_points, circle_segment_points,
    ray_segment_point, segment_line_point, segment_segment_point, Points,
};
use crate::*;

/// Crossings of a shape with the capsule's rails, then with its caps.
fn decomposed(
    capsule: &Capsule,
    mut against_rail: impl FnMut(&Segment) -> Points,
    mut against_cap: impl FnMut(&Circle) -> Points,
) -> Points {
    let mut out = Points::new();
    if let Some(rails) = capsule.rails() {
        for rail in rails.iter() {
            out.extend(against_rail(rail));
        }
    }
    for (cap, circle) in capsule.caps() {
        out.extend(
            against_cap(circle)
                .into_iter()
                .filter(|p| capsule.cap_owns(cap, *p)),
        );
    }
    out
}

pub(crate) fn circle_capsule_points(circle: &Circle, capsule: &Capsule) -> Points {
    decomposed(
        capsule,
        |rail| circle_segment_points(circle, rail),
        |cap| circle_circle_points(circle, cap),
    )
}

pub(crate) fn capsule_segment_points(capsule: &Capsule, segment: &Segment) -> Points {
    if segment.is_degenerate() {
        return Points::new();
    }
    decomposed(
        capsule,
        |rail| segment_segment_point(rail.a, rail.b, segment.a, segment.b).into_iter().collect(),
        |cap| circle_segment_points(cap, segment),
    )
}

pub(crate) fn capsule_line_points(capsule: &Capsule, line: &Line) -> Points {
    if line.a == line.b {
        return Points::new();
    }
    decomposed(
        capsule,
        |rail| segment_line_point(rail.a, rail.b, line.a, line.b).into_iter().collect(),
        |cap| circle_line_points(cap, line),
    )
}

pub(crate) fn capsule_ray_points(capsule: &Capsule, ray: &Ray) -> Points {
    if ray.is_degenerate() {
        return Points::new();
    }
    decomposed(
        capsule,
        |rail| ray_segment_point(ray, rail.a, rail.b).map(|(_, p)| p).into_iter().collect(),
        |cap| circle_ray_points(cap, ray),
    )
}

pub(crate) fn polygon_capsule_points(polygon: &ConvexPolygon, capsule: &Capsule) -> Points {
    let mut out = Points::new();
    for edge in polygon.edges() {
        out.extend(capsule_segment_points(capsule, &edge));
    }
    out
}

pub(crate) fn capsule_capsule_points(first: &Capsule, second: &Capsule) -> Points {
    let mut out = Points::new();
    if let Some(rails) = first.rails() {
        for rail in rails.iter() {
            out.extend(capsule_segment_points(second, rail));
        }
    }
    for (cap, circle) in first.caps() {
        out.extend(
            circle_capsule_points(circle, second)
                .into_iter()
                .filter(|p| first.cap_owns(cap, *p)),
        );
    }
    out
}
