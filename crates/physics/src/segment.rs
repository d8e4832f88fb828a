//! A bounded line segment.
use crate::collision_tests::{segment_line_point, segment_segment_point};
use crate::tolerances::*;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub a: V2,
    pub b: V2,
}

impl Segment {
    pub const fn new(a: V2, b: V2) -> Segment {
        Segment { a, b }
    }

    /// Vector from `a` to `b`.
    pub fn direction(&self) -> V2 {
        self.b - self.a
    }

    pub fn length(&self) -> f64 {
        self.a.distance(&self.b)
    }

    pub fn midpoint(&self) -> V2 {
        self.a.midpoint(self.b)
    }

    pub fn is_degenerate(&self) -> bool {
        self.length() <= DEGENERATE_LENGTH
    }

    /// The point of the segment nearest to `point`.
    pub fn closest_point(&self, point: V2) -> V2 {
        let ab = self.direction();
        let len2 = ab.length_squared();
        if len2 <= DEGENERATE_LENGTH * DEGENERATE_LENGTH {
            return self.a;
        }

        let t = ((point - self.a).dot(&ab) / len2).clamp(0.0, 1.0);
        self.a + ab * t
    }

    pub fn distance_squared(&self, point: V2) -> f64 {
        self.closest_point(point).distance_squared(&point)
    }

    pub fn distance(&self, point: V2) -> f64 {
        self.distance_squared(point).sqrt()
    }

    /// Does `point` lie on the segment, within [POINT_ON_LINE_EPSILON]?
    pub fn contains(&self, point: V2) -> bool {
        self.distance_squared(point) <= POINT_ON_LINE_EPSILON * POINT_ON_LINE_EPSILON
    }

    /// A unit normal of the segment.  Which side it points to depends on the
    /// winding; degenerate segments report `(1, 0)`.
    pub fn normal(&self) -> V2 {
        self.direction()
            .perpendicular()
            .normalize_or(V2::new(1.0, 0.0))
    }

    /// Is `point` inside the segment's bounding box grown by `slack`?
    pub(crate) fn box_contains(&self, point: V2, slack: f64) -> bool {
        point.x >= self.a.x.min(self.b.x) - slack
            && point.x <= self.a.x.max(self.b.x) + slack
            && point.y >= self.a.y.min(self.b.y) - slack
            && point.y <= self.a.y.max(self.b.y) + slack
    }

    /// Where this segment crosses `other`, if it does.
    pub fn intersection(&self, other: &Segment) -> Option<V2> {
        segment_segment_point(self.a, self.b, other.a, other.b)
    }

    /// Where this segment crosses an infinite line, if it does.
    pub fn intersection_with_line(&self, line: &Line) -> Option<V2> {
        segment_line_point(self.a, self.b, line.a, line.b)
    }

    /// Where a ray first meets this segment, if it does.
    pub fn intersection_with_ray(&self, ray: &Ray) -> Option<V2> {
        ray.intersection_with_segment(self)
    }

    #[must_use = "This doesn't mutate the Segment in place"]
    pub fn translate(&self, offset: V2) -> Segment {
        Segment::new(self.a + offset, self.b + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::*;

    #[test]
    fn closest_point_clamps() {
        let s = Segment::new(V2::new(0.0, 0.0), V2::new(2.0, 0.0));
        assert_eq!(s.closest_point(V2::new(-3.0, 1.0)), V2::new(0.0, 0.0));
        assert_eq!(s.closest_point(V2::new(5.0, -1.0)), V2::new(2.0, 0.0));
        let mid = s.closest_point(V2::new(1.0, 4.0));
        assert_relative_eq!(mid.x, 1.0);
        assert_relative_eq!(mid.y, 0.0);
        assert_relative_eq!(s.distance(V2::new(1.0, 4.0)), 4.0);
    }

    #[test]
    fn degenerate_segment() {
        let s = Segment::new(V2::new(1.0, 1.0), V2::new(1.0, 1.0));
        assert!(s.is_degenerate());
        assert_eq!(s.closest_point(V2::new(4.0, 5.0)), V2::new(1.0, 1.0));
        assert_eq!(s.normal(), V2::new(1.0, 0.0));
    }

    #[test]
    fn containment_tolerance() {
        let s = Segment::new(V2::new(0.0, 0.0), V2::new(0.0, 3.0));
        assert!(s.contains(V2::new(0.0005, 1.0)));
        assert!(!s.contains(V2::new(0.01, 1.0)));
        assert!(!s.contains(V2::new(0.0, 3.1)));
    }
}
