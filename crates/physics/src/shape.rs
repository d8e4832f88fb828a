//! A shape is one of the concrete shape types behind an enum for collision
//! detection.
use crate::collision_tests::{self, Contact, LineContact};
use crate::raycasting::{self, RaycastingResult};
use crate::*;

#[derive(Clone, Debug, PartialEq, derive_more::From)]
pub enum Shape {
    Circle(Circle),
    Polygon(ConvexPolygon),
    Rect(AxisRect),
    Capsule(Capsule),
}

macro_rules! forward {
    ($self:ident, $s:ident => $e:expr) => {
        match $self {
            Shape::Circle($s) => $e,
            Shape::Polygon($s) => $e,
            Shape::Rect($s) => $e,
            Shape::Capsule($s) => $e,
        }
    };
}

impl Shape {
    pub fn get_center(&self) -> V2 {
        match self {
            Shape::Circle(c) => *c.get_center(),
            Shape::Polygon(p) => *p.get_center(),
            Shape::Rect(r) => *r.get_center(),
            Shape::Capsule(k) => k.get_center(),
        }
    }

    pub fn bounding_circle(&self) -> Circle {
        forward!(self, s => s.bounding_circle())
    }

    pub fn contains(&self, point: V2) -> bool {
        forward!(self, s => s.contains(point))
    }

    pub fn closest_point(&self, point: V2) -> V2 {
        forward!(self, s => s.closest_point(point))
    }

    pub fn distance(&self, point: V2) -> f64 {
        forward!(self, s => s.distance(point))
    }

    /// Negative inside the shape.
    pub fn signed_distance(&self, point: V2) -> f64 {
        forward!(self, s => s.signed_distance(point))
    }

    pub fn area(&self) -> f64 {
        forward!(self, s => s.area())
    }

    /// The outward normal at `point`, if it lies on the boundary within the
    /// shape's tolerance.
    pub fn normal(&self, point: V2) -> Option<V2> {
        forward!(self, s => s.normal(point))
    }

    /// Outward normal of the boundary nearest to `point`, without checking
    /// that `point` is on it.
    pub(crate) fn surface_normal(&self, point: V2) -> V2 {
        match self {
            Shape::Circle(c) => c.surface_normal(point),
            Shape::Polygon(p) => p.surface_normal(point),
            Shape::Rect(r) => r.as_polygon().surface_normal(point),
            Shape::Capsule(k) => k.surface_normal(point),
        }
    }

    pub fn translate(&mut self, offset: V2) {
        forward!(self, s => s.translate(offset))
    }

    /// A copy moved by `offset`.
    #[must_use = "This doesn't mutate the Shape in place"]
    pub fn translated(&self, offset: V2) -> Shape {
        let mut out = self.clone();
        out.translate(offset);
        out
    }

    pub fn move_to(&mut self, position: V2) {
        forward!(self, s => s.move_to(position))
    }

    /// Rotate counterclockwise around the center.  Circles are unaffected.
    pub fn rotate(&mut self, angle: f64) {
        match self {
            Shape::Circle(_) => {}
            Shape::Polygon(p) => p.rotate(angle),
            Shape::Rect(r) => r.rotate(angle),
            Shape::Capsule(k) => k.rotate(angle),
        }
    }

    pub fn scale(&mut self, factors: V2) {
        forward!(self, s => s.scale(factors))
    }

    /// Test if this shape collides with another.
    pub fn collides_with(&self, other: &Shape) -> bool {
        collision_tests::shapes_collide(self, other)
    }

    /// Where this shape touches another, if it does.
    pub fn contact_point_with(&self, other: &Shape) -> Option<V2> {
        collision_tests::shapes_contact_point(self, other)
    }

    /// Where this shape touches another, with the outward normal of each.
    /// `normal_a` belongs to `self`.
    pub fn contact_with(&self, other: &Shape) -> Option<Contact> {
        collision_tests::shapes_contact(self, other)
    }

    pub fn collides_with_segment(&self, segment: &Segment) -> bool {
        collision_tests::segment_collides(self, segment)
    }

    pub fn segment_contact_point(&self, segment: &Segment) -> Option<V2> {
        self.segment_contact(segment).map(|c| c.point)
    }

    pub fn segment_contact(&self, segment: &Segment) -> Option<LineContact> {
        collision_tests::segment_contact(self, segment)
    }

    pub fn collides_with_line(&self, line: &Line) -> bool {
        collision_tests::line_collides(self, line)
    }

    pub fn line_contact_point(&self, line: &Line) -> Option<V2> {
        self.line_contact(line).map(|c| c.point)
    }

    pub fn line_contact(&self, line: &Line) -> Option<LineContact> {
        collision_tests::line_contact(self, line)
    }

    pub fn collides_with_ray(&self, ray: &Ray) -> bool {
        collision_tests::ray_collides(self, ray)
    }

    pub fn ray_contact_point(&self, ray: &Ray) -> Option<V2> {
        self.ray_contact(ray).map(|c| c.point)
    }

    pub fn ray_contact(&self, ray: &Ray) -> Option<LineContact> {
        collision_tests::ray_contact(self, ray)
    }

    /// Where the ray first enters this shape.
    pub fn raycast(&self, ray: &Ray) -> Option<RaycastingResult> {
        match self {
            Shape::Circle(c) => raycasting::ray_circle_test(ray, c),
            Shape::Polygon(p) => raycasting::ray_polygon_test(ray, p),
            Shape::Rect(r) => raycasting::ray_polygon_test(ray, r.as_polygon()),
            Shape::Capsule(k) => raycasting::ray_capsule_test(ray, k),
        }
    }
}
