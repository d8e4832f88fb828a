//! Casting rays against single shapes.
use crate::*;

pub(crate) mod ray_capsule;
pub(crate) mod ray_circle;
pub(crate) mod ray_polygon;

pub(crate) use ray_capsule::*;
pub(crate) use ray_circle::*;
pub(crate) use ray_polygon::*;

/// The result of performing a raycasting test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaycastingResult {
    /// Where did the ray hit the other shape?
    pub point: V2,
    /// If the ray didn't start inside the other shape, what is the normal?
    pub normal: Option<V2>,
    /// Did the ray start inside the shape?
    pub inside: bool,
    /// How far along the ray is `point`?
    pub distance: f64,
}

impl RaycastingResult {
    pub(crate) fn starting_inside(ray: &Ray) -> RaycastingResult {
        RaycastingResult {
            point: ray.get_origin(),
            normal: None,
            inside: true,
            distance: 0.0,
        }
    }

    pub(crate) fn entering(point: V2, normal: V2, distance: f64) -> RaycastingResult {
        RaycastingResult {
            point,
            normal: Some(normal),
            inside: false,
            distance,
        }
    }
}

/// The hit nearest to the ray's origin.
pub(crate) fn nearest_hit(
    hits: impl IntoIterator<Item = RaycastingResult>,
) -> Option<RaycastingResult> {
    hits.into_iter().fold(None, |best: Option<RaycastingResult>, hit| match best {
        Some(b) if b.distance <= hit.distance => Some(b),
        _ => Some(hit),
    })
}
