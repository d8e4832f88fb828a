use crate::collision_tests::{line_line_point, ray_segment_point};
use crate::tolerances::*;
use crate::*;

/// A directed ray.  The length may be infinite.
///
/// A ray whose direction has no length is degenerate and never intersects
/// anything.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Ray {
    pub(crate) origin: V2,
    pub(crate) direction: V2,
    pub(crate) length: f64,
}

impl Ray {
    pub fn from_angle(origin: V2, length: f64, theta: f64) -> Ray {
        Ray::new(
            origin,
            V2 {
                x: theta.cos(),
                y: theta.sin(),
            },
            length,
        )
    }

    /// Build a ray.  The direction is normalized here.
    pub fn new(origin: V2, direction: V2, length: f64) -> Ray {
        Ray {
            origin,
            direction: direction.try_normalize().unwrap_or(V2::ZERO),
            length: length.max(0.0),
        }
    }

    /// An unbounded ray starting at `start` and passing through `through`.
    pub fn through(start: V2, through: V2) -> Ray {
        Ray::new(start, through - start, f64::INFINITY)
    }

    /// Build a ray from a source point which stops at a destination point.
    pub fn from_points(source: V2, target: V2) -> Ray {
        let length = source.distance(&target);
        Ray::new(source, target - source, length)
    }

    pub fn get_origin(&self) -> V2 {
        self.origin
    }

    pub fn get_direction(&self) -> V2 {
        self.direction
    }

    pub fn get_length(&self) -> f64 {
        self.length
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == V2::ZERO
    }

    /// Evaluate the ray at a given `t`.
    pub fn evaluate(&self, t: f64) -> V2 {
        V2::new(
            self.origin.x + self.direction.x * t,
            self.origin.y + self.direction.y * t,
        )
    }

    /// The `t` of the projection of `point` onto the ray's supporting line.
    pub fn project(&self, point: V2) -> f64 {
        (point - self.origin).dot(&self.direction)
    }

    pub(crate) fn contains_parameter(&self, t: f64) -> bool {
        t >= -BOUNDS_SLACK && t <= self.length + BOUNDS_SLACK
    }

    pub fn closest_point(&self, point: V2) -> V2 {
        let t = self.project(point).clamp(0.0, self.length);
        self.evaluate(t)
    }

    pub fn distance_squared(&self, point: V2) -> f64 {
        self.closest_point(point).distance_squared(&point)
    }

    pub fn intersection_with_segment(&self, segment: &Segment) -> Option<V2> {
        ray_segment_point(self, segment.a, segment.b).map(|(_, p)| p)
    }

    pub fn intersection_with_line(&self, line: &Line) -> Option<V2> {
        if self.is_degenerate() {
            return None;
        }
        let point = line_line_point(self.origin, self.origin + self.direction, line.a, line.b)?;
        self.contains_parameter(self.project(point)).then(|| point)
    }

    pub fn intersection_with_ray(&self, other: &Ray) -> Option<V2> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }
        let point = line_line_point(
            self.origin,
            self.origin + self.direction,
            other.origin,
            other.origin + other.direction,
        )?;
        (self.contains_parameter(self.project(point))
            && other.contains_parameter(other.project(point)))
        .then(|| point)
    }
}
