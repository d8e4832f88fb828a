//! A capsule (stadium): two circles of equal radius joined by a rectangle.
//!
//! Point queries work on the core segment between the two circle centers,
//! which describes the capsule exactly.  The circle and rectangle parts exist
//! for the pairwise collision tests, which decompose the capsule.
use crate::errors::*;
use crate::tolerances::*;
use crate::*;

/// Which axis of the requested size the capsule runs along before rotation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CapsuleDirection {
    Horizontal,
    Vertical,
}

/// One of the two rounded ends of a capsule.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cap {
    First,
    Second,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Capsule {
    circle1: Circle,
    circle2: Circle,
    /// `None` when the circles coincide.
    body: Option<AxisRect>,
}

impl Capsule {
    /// A capsule filling `size`, running along its larger axis.
    pub fn new(center: V2, size: V2) -> Result<Capsule, ShapeError> {
        Capsule::with_angle(center, size, 0.0)
    }

    /// Like [Capsule::new], then rotated counterclockwise by `angle`.
    pub fn with_angle(center: V2, size: V2, angle: f64) -> Result<Capsule, ShapeError> {
        let direction = if size.x >= size.y {
            CapsuleDirection::Horizontal
        } else {
            CapsuleDirection::Vertical
        };
        Capsule::with_direction(center, size, direction, angle)
    }

    pub fn with_direction(
        center: V2,
        size: V2,
        direction: CapsuleDirection,
        angle: f64,
    ) -> Result<Capsule, ShapeError> {
        if !center.is_finite() || !size.is_finite() || !angle.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(ShapeError::InvalidDims);
        }

        let (half_axis, radius) = match direction {
            CapsuleDirection::Horizontal => {
                (V2::new((size.x - size.y).max(0.0) * 0.5, 0.0), size.y * 0.5)
            }
            CapsuleDirection::Vertical => {
                (V2::new(0.0, (size.y - size.x).max(0.0) * 0.5), size.x * 0.5)
            }
        };
        let half_axis = half_axis.rotate(angle);
        Ok(Capsule::from_parts(
            center - half_axis,
            center + half_axis,
            radius,
        ))
    }

    /// A capsule around the segment from `start` to `end`.
    pub fn between(start: V2, end: V2, radius: f64) -> Result<Capsule, ShapeError> {
        if !start.is_finite() || !end.is_finite() || !radius.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        if radius <= 0.0 {
            return Err(ShapeError::InvalidDims);
        }
        Ok(Capsule::from_parts(start, end, radius))
    }

    fn from_parts(start: V2, end: V2, radius: f64) -> Capsule {
        let center = start.midpoint(end);
        let axis = end - start;
        let length = axis.length();

        if length <= DEGENERATE_LENGTH || radius <= 0.0 {
            let circle = Circle::from_raw(center, radius);
            return Capsule {
                circle1: circle,
                circle2: circle,
                body: None,
            };
        }

        Capsule {
            circle1: Circle::from_raw(start, radius),
            circle2: Circle::from_raw(end, radius),
            body: Some(AxisRect::from_parts(
                center,
                V2::new(length, radius * 2.0),
                axis.angle(),
            )),
        }
    }

    pub fn get_circle1(&self) -> &Circle {
        &self.circle1
    }

    pub fn get_circle2(&self) -> &Circle {
        &self.circle2
    }

    /// The rectangle joining the circles, absent for a degenerate capsule.
    pub fn get_body(&self) -> Option<&AxisRect> {
        self.body.as_ref()
    }

    pub fn get_radius(&self) -> f64 {
        self.circle1.get_radius()
    }

    pub fn get_center(&self) -> V2 {
        self.circle1.get_center().midpoint(*self.circle2.get_center())
    }

    /// Distance between the two circle centers.
    pub fn length(&self) -> f64 {
        self.circle1.get_center().distance(self.circle2.get_center())
    }

    /// The segment between the two circle centers.
    pub fn core(&self) -> Segment {
        Segment::new(*self.circle1.get_center(), *self.circle2.get_center())
    }

    pub fn bounding_circle(&self) -> Circle {
        Circle::from_raw(self.get_center(), self.length() * 0.5 + self.get_radius())
    }

    pub fn contains(&self, point: V2) -> bool {
        if !self.bounding_circle().contains(point) {
            return false;
        }
        let r = self.get_radius();
        self.core().distance_squared(point) <= r * r
    }

    pub fn closest_point(&self, point: V2) -> V2 {
        let core = self.core();
        let q = core.closest_point(point);
        q + (point - q).normalize_or(core.normal()) * self.get_radius()
    }

    pub fn signed_distance(&self, point: V2) -> f64 {
        self.core().distance(point) - self.get_radius()
    }

    pub fn distance(&self, point: V2) -> f64 {
        self.signed_distance(point).max(0.0)
    }

    pub fn area(&self) -> f64 {
        let r = self.get_radius();
        std::f64::consts::PI * r * r + self.length() * 2.0 * r
    }

    pub fn normal(&self, point: V2) -> Option<V2> {
        if self.signed_distance(point).abs() > CAPSULE_NORMAL_EPSILON {
            return None;
        }
        Some(self.surface_normal(point))
    }

    pub(crate) fn surface_normal(&self, point: V2) -> V2 {
        let core = self.core();
        let q = core.closest_point(point);
        (point - q).normalize_or(core.normal())
    }

    /// Unit vector from the second circle's center toward the first's.
    fn axis_direction(&self) -> Option<V2> {
        self.body.as_ref()?;
        (*self.circle1.get_center() - *self.circle2.get_center()).try_normalize()
    }

    /// The two long edges of the body.
    pub(crate) fn rails(&self) -> Option<[Segment; 2]> {
        let dir = self.axis_direction()?;
        let side = dir.perpendicular() * self.get_radius();
        let (c1, c2) = (*self.circle1.get_center(), *self.circle2.get_center());
        Some([
            Segment::new(c1 + side, c2 + side),
            Segment::new(c1 - side, c2 - side),
        ])
    }

    /// The circles whose boundaries are part of the capsule's boundary.
    pub(crate) fn caps(&self) -> impl Iterator<Item = (Cap, &Circle)> {
        let second = self.body.is_some().then(|| (Cap::Second, &self.circle2));
        std::iter::once((Cap::First, &self.circle1)).chain(second)
    }

    /// Does `point`, on the boundary of `cap`'s circle, lie on the outer half
    /// of that circle rather than inside the body?
    pub(crate) fn cap_owns(&self, cap: Cap, point: V2) -> bool {
        let dir = match self.axis_direction() {
            Some(d) => d,
            None => return true,
        };
        match cap {
            Cap::First => dir.dot(&(point - *self.circle1.get_center())) >= 0.0,
            Cap::Second => dir.dot(&(point - *self.circle2.get_center())) <= 0.0,
        }
    }

    pub fn translate(&mut self, offset: V2) {
        self.circle1.translate(offset);
        self.circle2.translate(offset);
        if let Some(body) = self.body.as_mut() {
            body.translate(offset);
        }
    }

    pub fn move_to(&mut self, position: V2) {
        self.translate(position - self.get_center());
    }

    pub fn rotate(&mut self, angle: f64) {
        let center = self.get_center();
        self.circle1
            .move_to(self.circle1.get_center().rotate_around(center, angle));
        self.circle2
            .move_to(self.circle2.get_center().rotate_around(center, angle));
        if let Some(body) = self.body.as_mut() {
            body.rotate(angle);
        }
    }

    /// Scale the core per axis about the center; the radius scales by the
    /// larger factor.
    pub fn scale(&mut self, factors: V2) {
        let center = self.get_center();
        let start = center + (*self.circle1.get_center() - center).component_mul(factors);
        let end = center + (*self.circle2.get_center() - center).component_mul(factors);
        let radius = self.get_radius() * factors.x.abs().max(factors.y.abs());
        *self = Capsule::from_parts(start, end, radius);
    }
}
