//! A rectangle which may be rotated, stored as a 4-vertex polygon plus its size.
use smallvec::smallvec;

use crate::errors::*;
use crate::*;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisRect {
    polygon: ConvexPolygon,
    /// Width and height in the rectangle's own frame.
    size: V2,
}

impl AxisRect {
    pub fn new(center: V2, size: V2) -> Result<AxisRect, ShapeError> {
        AxisRect::with_angle(center, size, 0.0)
    }

    /// Build a rectangle rotated counterclockwise by `angle` around its center.
    pub fn with_angle(center: V2, size: V2, angle: f64) -> Result<AxisRect, ShapeError> {
        if !center.is_finite() || !size.is_finite() || !angle.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(ShapeError::InvalidDims);
        }
        Ok(AxisRect::from_parts(center, size, angle))
    }

    /// Build an unrotated rectangle from its lower left and upper right corners.
    pub fn from_points(p1: V2, p2: V2) -> Result<AxisRect, ShapeError> {
        AxisRect::new(p1.midpoint(p2), p2 - p1)
    }

    pub(crate) fn from_parts(center: V2, size: V2, angle: f64) -> AxisRect {
        let hw = size.x * 0.5;
        let hh = size.y * 0.5;
        let vertices = smallvec![
            V2::new(center.x - hw, center.y - hh),
            V2::new(center.x + hw, center.y - hh),
            V2::new(center.x + hw, center.y + hh),
            V2::new(center.x - hw, center.y + hh),
        ];
        let mut polygon = ConvexPolygon::from_parts(vertices, center);
        if angle != 0.0 {
            polygon.rotate(angle);
        }
        AxisRect { polygon, size }
    }

    pub fn get_size(&self) -> V2 {
        self.size
    }

    pub fn get_center(&self) -> &V2 {
        self.polygon.get_center()
    }

    pub fn as_polygon(&self) -> &ConvexPolygon {
        &self.polygon
    }

    /// Angle from the center to the middle of the side that starts out facing +x.
    pub fn angle(&self) -> f64 {
        let v = self.polygon.get_vertices();
        (v[1].midpoint(v[2]) - *self.get_center()).angle()
    }

    pub fn bounding_circle(&self) -> Circle {
        self.polygon.bounding_circle()
    }

    pub fn contains(&self, point: V2) -> bool {
        self.polygon.contains(point)
    }

    pub fn closest_point(&self, point: V2) -> V2 {
        self.polygon.closest_point(point)
    }

    pub fn distance(&self, point: V2) -> f64 {
        self.polygon.distance(point)
    }

    pub fn signed_distance(&self, point: V2) -> f64 {
        self.polygon.signed_distance(point)
    }

    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    pub fn normal(&self, point: V2) -> Option<V2> {
        self.polygon.normal(point)
    }

    pub fn translate(&mut self, offset: V2) {
        self.polygon.translate(offset);
    }

    pub fn move_to(&mut self, position: V2) {
        self.polygon.move_to(position);
    }

    pub fn rotate(&mut self, angle: f64) {
        self.polygon.rotate(angle);
    }

    /// Scale width and height in the rectangle's own frame, keeping the angle.
    pub fn scale(&mut self, factors: V2) {
        let size = V2::new(self.size.x * factors.x.abs(), self.size.y * factors.y.abs());
        *self = AxisRect::from_parts(*self.get_center(), size, self.angle());
    }
}
