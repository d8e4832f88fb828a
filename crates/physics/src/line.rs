//! An infinite line through two points.
use crate::collision_tests::line_line_point;
use crate::tolerances::*;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub a: V2,
    pub b: V2,
}

impl Line {
    pub const fn new(a: V2, b: V2) -> Line {
        Line { a, b }
    }

    /// A line through `point` heading along `direction`.
    pub fn from_direction(point: V2, direction: V2) -> Line {
        Line::new(point, point + direction)
    }

    pub fn direction(&self) -> V2 {
        self.b - self.a
    }

    /// Orthogonal projection of `point` onto the line.
    ///
    /// A line whose two points coincide projects everything onto that point.
    pub fn closest_point(&self, point: V2) -> V2 {
        let ab = self.direction();
        let len2 = ab.length_squared();
        if len2 <= DEGENERATE_LENGTH * DEGENERATE_LENGTH {
            return self.a;
        }
        self.a + ab * ((point - self.a).dot(&ab) / len2)
    }

    pub fn distance_squared(&self, point: V2) -> f64 {
        self.closest_point(point).distance_squared(&point)
    }

    pub fn distance(&self, point: V2) -> f64 {
        self.distance_squared(point).sqrt()
    }

    pub fn contains(&self, point: V2) -> bool {
        self.distance_squared(point) <= POINT_ON_LINE_EPSILON * POINT_ON_LINE_EPSILON
    }

    /// Unit normal of the line; `(1, 0)` for a degenerate line.
    pub fn normal(&self) -> V2 {
        self.direction()
            .perpendicular()
            .normalize_or(V2::new(1.0, 0.0))
    }

    /// Mirror image of `point` across the line.
    pub fn reflect_point(&self, point: V2) -> V2 {
        let foot = self.closest_point(point);
        foot * 2.0 - point
    }

    /// Reflect a direction off the line, as a ray bouncing off a wall.
    pub fn reflect_direction(&self, direction: V2) -> V2 {
        let n = self.normal();
        direction - n * (2.0 * direction.dot(&n))
    }

    pub fn intersection(&self, other: &Line) -> Option<V2> {
        line_line_point(self.a, self.b, other.a, other.b)
    }

    pub fn intersection_with_segment(&self, segment: &Segment) -> Option<V2> {
        segment.intersection_with_line(self)
    }
}
