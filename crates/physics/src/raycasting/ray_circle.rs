//! Test a ray against a circle.
use crate::raycasting::*;
use crate::*;

/// The `t` values at which the ray's supporting line enters and leaves the
/// circle, smallest first.
pub(crate) fn ray_circle_parameters(ray: &Ray, circle: &Circle) -> Option<(f64, f64)> {
    // Projecting the vector from the ray's origin to the circle's center onto
    // the ray gives the t at which the ray passes closest to the center.
    // Projecting it onto the perpendicular gives how far away it passes.  The
    // chord through the circle is then `2 * sqrt(r^2 - dist^2)` long and
    // centered on that t.
    if ray.is_degenerate() {
        return None;
    }

    // Translated center of the circle, so that the ray is at the origin.
    let translated_center = *circle.get_center() - ray.origin;
    // Which way the perpendicular goes doesn't matter if we use abs.
    let dist_proj = V2::new(ray.direction.y, -ray.direction.x)
        .dot(&translated_center)
        .abs();
    if dist_proj > circle.get_radius() {
        return None;
    }

    let t_centered = ray.direction.dot(&translated_center);
    let rad = (circle.get_radius().powi(2) - dist_proj.powi(2)).sqrt();
    Some((t_centered - rad, t_centered + rad))
}

pub(crate) fn ray_circle_test(ray: &Ray, circle: &Circle) -> Option<RaycastingResult> {
    let (t1, t2) = ray_circle_parameters(ray, circle)?;

    // t2 >= t1.  If `t2 < 0` the circle is entirely behind the ray, and if
    // `t1 > length` it is beyond the ray's end.
    if t2 < 0.0 || t1 > ray.length {
        return None;
    }

    // The ray starts inside.
    if t1 <= 0.0 {
        return Some(RaycastingResult::starting_inside(ray));
    }

    let point = ray.evaluate(t1);
    let normal = (point - *circle.get_center()).normalize_or(-ray.direction);
    Some(RaycastingResult::entering(point, normal, t1))
}
