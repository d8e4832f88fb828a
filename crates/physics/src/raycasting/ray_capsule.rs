//! Test a ray against a capsule.
use crate::raycasting::*;
use crate::*;

/// The capsule is the union of its circles and body, so a ray starting outside
/// all of them first hits whichever part it reaches first.
pub(crate) fn ray_capsule_test(ray: &Ray, capsule: &Capsule) -> Option<RaycastingResult> {
    if ray.is_degenerate() {
        return None;
    }
    if capsule.contains(ray.get_origin()) {
        return Some(RaycastingResult::starting_inside(ray));
    }

    let circles = [capsule.get_circle1(), capsule.get_circle2()]
        .into_iter()
        .filter_map(|c| ray_circle_test(ray, c));
    let body = capsule
        .get_body()
        .and_then(|b| ray_polygon_test(ray, b.as_polygon()));
    let nearest = nearest_hit(circles.chain(body))?;
    Some(RaycastingResult::entering(
        nearest.point,
        capsule.surface_normal(nearest.point),
        nearest.distance,
    ))
}
