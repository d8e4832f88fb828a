//! Test a ray against a convex polygon.
use crate::collision_tests::ray_segment_point;
use crate::raycasting::*;
use crate::*;

pub(crate) fn ray_polygon_test(ray: &Ray, polygon: &ConvexPolygon) -> Option<RaycastingResult> {
    if ray.is_degenerate() {
        return None;
    }
    let bounds = polygon.bounding_circle();
    if ray.distance_squared(*bounds.get_center()) > bounds.get_radius().powi(2) {
        return None;
    }
    if polygon.contains(ray.get_origin()) {
        return Some(RaycastingResult::starting_inside(ray));
    }

    let through_edges = (0..polygon.edge_count()).filter_map(|i| {
        let (t, point) = ray_segment_point(ray, polygon.edge(i).a, polygon.edge(i).b)?;
        Some(RaycastingResult::entering(
            point,
            polygon.outward_edge_normal(i, point),
            t.max(0.0),
        ))
    });
    // A ray through a vertex exactly straddles neither adjacent edge.
    let through_vertices = polygon.get_vertices().iter().filter_map(|&v| {
        let t = ray.project(v);
        let on_ray = ray.get_direction().cross(&(v - ray.get_origin())) == 0.0;
        (on_ray && ray.contains_parameter(t))
            .then(|| RaycastingResult::entering(v, polygon.surface_normal(v), t.max(0.0)))
    });
    nearest_hit(through_edges.chain(through_vertices))
}
