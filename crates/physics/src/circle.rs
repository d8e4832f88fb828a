//! A simple circle.
use crate::errors::*;
use crate::tolerances::approximately;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    center: V2,
    radius: f64,
}

impl Circle {
    pub fn new(center: V2, radius: f64) -> Result<Circle, ShapeError> {
        if !center.is_finite() || !radius.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        if radius < 0.0 {
            return Err(ShapeError::NegativeRadius(radius));
        }
        Ok(Circle { center, radius })
    }

    /// Build without validation, for radii derived from already valid shapes.
    pub(crate) fn from_raw(center: V2, radius: f64) -> Circle {
        Circle { center, radius }
    }

    pub fn get_center(&self) -> &V2 {
        &self.center
    }

    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    /// A circle is its own bounding circle.
    pub fn bounding_circle(&self) -> Circle {
        *self
    }

    /// Inclusive: points on the boundary are contained.
    pub fn contains(&self, point: V2) -> bool {
        self.center.distance_squared(&point) <= self.radius * self.radius
    }

    /// Do the two circles overlap or touch?
    pub fn collides(&self, other: &Circle) -> bool {
        crate::collision_tests::circle_circle_test(self, other)
    }

    /// The boundary point nearest to `point`.  The center maps to the
    /// rightmost point.
    pub fn closest_point(&self, point: V2) -> V2 {
        let dir = (point - self.center).normalize_or(V2::new(1.0, 0.0));
        self.center + dir * self.radius
    }

    pub fn distance(&self, point: V2) -> f64 {
        self.signed_distance(point).max(0.0)
    }

    pub fn signed_distance(&self, point: V2) -> f64 {
        self.center.distance(&point) - self.radius
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// The outward normal at `point`, if `point` is on the boundary.
    pub fn normal(&self, point: V2) -> Option<V2> {
        let d2 = self.center.distance_squared(&point);
        if !approximately(d2, self.radius * self.radius) {
            return None;
        }
        (point - self.center).try_normalize()
    }

    /// Outward direction at the boundary point nearest `point`, without any
    /// tolerance check.
    pub(crate) fn surface_normal(&self, point: V2) -> V2 {
        (point - self.center).normalize_or(V2::new(1.0, 0.0))
    }

    #[must_use = "This doesn't mutate the Circle in-place"]
    pub fn move_circle(&self, new_center: &V2) -> Circle {
        Circle {
            center: *new_center,
            radius: self.radius,
        }
    }

    pub fn move_to(&mut self, position: V2) {
        self.center = position;
    }

    pub fn translate(&mut self, offset: V2) {
        self.center += offset;
    }

    /// Scale the radius by the larger of the two factors.
    pub fn scale(&mut self, factors: V2) {
        self.radius *= factors.x.abs().max(factors.y.abs());
    }
}
