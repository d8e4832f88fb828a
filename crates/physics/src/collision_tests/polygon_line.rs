//! Convex polygons against segments and infinite lines.
use crate::collision_tests::{
    push_unique, ray_segment_point, segment_line_point, segment_segment_point, touches, Points,
};
use crate::*;

pub(crate) fn polygon_segment_points(polygon: &ConvexPolygon, segment: &Segment) -> Points {
    let mut out = Points::new();
    if segment.is_degenerate() {
        return out;
    }
    for edge in polygon.edges() {
        if let Some(p) = segment_segment_point(edge.a, edge.b, segment.a, segment.b) {
            out.push(p);
        }
        for end in [segment.a, segment.b] {
            if touches(end, edge.a, edge.b) {
                push_unique(&mut out, end);
            }
        }
    }
    for &v in polygon.get_vertices() {
        if touches(v, segment.a, segment.b) {
            push_unique(&mut out, v);
        }
    }
    out
}

pub(crate) fn polygon_line_points(polygon: &ConvexPolygon, line: &Line) -> Points {
    let mut out = Points::new();
    if line.a == line.b {
        return out;
    }
    for edge in polygon.edges() {
        if let Some(p) = segment_line_point(edge.a, edge.b, line.a, line.b) {
            out.push(p);
        }
    }
    for &v in polygon.get_vertices() {
        if line.direction().cross(&(v - line.a)) == 0.0 {
            push_unique(&mut out, v);
        }
    }
    out
}

pub(crate) fn polygon_ray_points(polygon: &ConvexPolygon, ray: &Ray) -> Points {
    let mut out = Points::new();
    if ray.is_degenerate() {
        return out;
    }
    for edge in polygon.edges() {
        if let Some((_, p)) = ray_segment_point(ray, edge.a, edge.b) {
            out.push(p);
        }
    }
    for &v in polygon.get_vertices() {
        let on_ray = ray.get_direction().cross(&(v - ray.get_origin())) == 0.0;
        if on_ray && ray.contains_parameter(ray.project(v)) {
            push_unique(&mut out, v);
        }
    }
    out
}
