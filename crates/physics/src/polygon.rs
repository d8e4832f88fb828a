//! Convex polygons.
//!
//! Vertices are kept in construction order and edge `i` runs from vertex `i`
//! to vertex `i + 1`, wrapping.  Nothing here depends on the winding
//! direction: outward normals are resolved by probing rather than by sign.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::collision_tests::segment_segment_point;
use crate::errors::*;
use crate::tolerances::*;
use crate::*;

pub(crate) type Vertices = SmallVec<[V2; 8]>;

/// Seed for the ray directions of [ConvexPolygon::contains], so that
/// containment is reproducible.
const RAY_SEED: u64 = 0x7031_7e57;

#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vertices,
    center: V2,
    /// Centered on `center`, containing every vertex.
    bounds: Circle,
}

/// Drop vertices equal to their predecessor, including the last one if it
/// repeats the first.
fn dedup_vertices(vertices: impl IntoIterator<Item = V2>) -> Vertices {
    let mut out: Vertices = SmallVec::new();
    for v in vertices {
        if out.last() != Some(&v) {
            out.push(v);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

fn bounds_for(vertices: &[V2], center: V2) -> Circle {
    let radius = vertices
        .iter()
        .map(|v| v.distance(&center))
        .fold(0.0, f64::max);
    Circle::from_raw(center, radius)
}

impl ConvexPolygon {
    /// Build a polygon whose center is the average of its vertices.
    pub fn new(vertices: impl IntoIterator<Item = V2>) -> Result<ConvexPolygon, ShapeError> {
        let vertices = dedup_vertices(vertices);
        let center = V2::mean(&vertices).ok_or(ShapeError::NotEnoughVertices(0))?;
        ConvexPolygon::checked(vertices, center)
    }

    /// Build a polygon with an explicit center.
    pub fn with_center(
        vertices: impl IntoIterator<Item = V2>,
        center: V2,
    ) -> Result<ConvexPolygon, ShapeError> {
        ConvexPolygon::checked(dedup_vertices(vertices), center)
    }

    fn checked(vertices: Vertices, center: V2) -> Result<ConvexPolygon, ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::NotEnoughVertices(vertices.len()));
        }
        if !center.is_finite() || vertices.iter().any(|v| !v.is_finite()) {
            return Err(ShapeError::NonFinite);
        }
        Ok(ConvexPolygon::from_parts(vertices, center))
    }

    /// Build without validation.  Callers guarantee at least 3 finite vertices.
    pub(crate) fn from_parts(vertices: Vertices, center: V2) -> ConvexPolygon {
        let bounds = bounds_for(&vertices, center);
        ConvexPolygon {
            vertices,
            center,
            bounds,
        }
    }

    pub fn get_vertices(&self) -> &[V2] {
        &self.vertices
    }

    pub fn get_center(&self) -> &V2 {
        &self.center
    }

    pub fn bounding_circle(&self) -> Circle {
        self.bounds
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge(&self, index: usize) -> Segment {
        let n = self.vertices.len();
        Segment::new(self.vertices[index % n], self.vertices[(index + 1) % n])
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// Index, closest point, and squared distance of the edge nearest to `point`.
    pub(crate) fn nearest_edge(&self, point: V2) -> (usize, V2, f64) {
        self.edges()
            .enumerate()
            .map(|(i, e)| {
                let closest = e.closest_point(point);
                (i, closest, closest.distance_squared(&point))
            })
            .fold((0, self.vertices[0], f64::INFINITY), |best, cur| {
                if cur.2 < best.2 {
                    cur
                } else {
                    best
                }
            })
    }

    /// Crossing-number test along a ray from outside the polygon to `point`.
    ///
    /// Returns `None` if the ray grazes an edge or passes too close to a
    /// vertex to be counted reliably.
    fn ray_parity(&self, start: V2, point: V2) -> Option<bool> {
        let f = point - start;
        let mut inside = false;

        for edge in self.edges() {
            let e = edge.direction();
            let denom = f.cross(&e);
            if denom.abs() <= RAY_DEGENERATE_EPSILON * f.length() * e.length() {
                return None;
            }

            let w = edge.a - start;
            let u = w.cross(&e) / denom;
            let t = w.cross(&f) / denom;
            if !(0.0..=1.0).contains(&u) {
                continue;
            }
            if t.abs() <= RAY_DEGENERATE_EPSILON || (t - 1.0).abs() <= RAY_DEGENERATE_EPSILON {
                return None;
            }
            if (0.0..1.0).contains(&t) {
                inside = !inside;
            }
        }

        Some(inside)
    }

    fn winding_number(&self, point: V2) -> i32 {
        let mut winding = 0;
        for edge in self.edges() {
            let side = edge.direction().cross(&(point - edge.a));
            if edge.a.y <= point.y {
                if edge.b.y > point.y && side > 0.0 {
                    winding += 1;
                }
            } else if edge.b.y <= point.y && side < 0.0 {
                winding -= 1;
            }
        }
        winding
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: V2) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }

        let (_, _, dist2) = self.nearest_edge(point);
        if dist2 <= BOUNDARY_EPSILON * BOUNDARY_EPSILON {
            return true;
        }

        let mut rng = SmallRng::seed_from_u64(RAY_SEED);
        let reach = 2.0 * self.bounds.get_radius();
        for _ in 0..MAX_RAY_ATTEMPTS {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let start = self.center + V2::new(angle.cos(), angle.sin()) * reach;
            if let Some(inside) = self.ray_parity(start, point) {
                return inside;
            }
        }

        log::warn!(
            "Containment rays for {:?} all degenerate; using winding number",
            point
        );
        self.winding_number(point) != 0
    }

    /// The nearest point on the boundary.  Interior points map to the boundary too.
    pub fn closest_point(&self, point: V2) -> V2 {
        self.nearest_edge(point).1
    }

    pub fn distance(&self, point: V2) -> f64 {
        if self.contains(point) {
            return 0.0;
        }
        self.nearest_edge(point).2.sqrt()
    }

    /// Distance to the boundary, negative inside.
    pub fn signed_distance(&self, point: V2) -> f64 {
        let d = self.nearest_edge(point).2.sqrt();
        if self.contains(point) {
            -d
        } else {
            d
        }
    }

    pub fn area(&self) -> f64 {
        let twice: f64 = self.edges().map(|e| e.a.cross(&e.b)).sum();
        twice.abs() * 0.5
    }

    /// Does `normal`, placed at `point` on edge `edge_index`, point out of the
    /// polygon?
    ///
    /// A ray from the point along the normal crosses the other edges an even
    /// number of times exactly when it starts out heading outward.
    pub(crate) fn is_normal_outward(&self, point: V2, normal: V2, edge_index: usize) -> bool {
        let ray_end = point + normal * (2.0 * self.bounds.get_radius() + 1.0);
        let crossings = self
            .edges()
            .enumerate()
            .filter(|(i, _)| *i != edge_index)
            .filter(|(_, e)| segment_segment_point(point, ray_end, e.a, e.b).is_some())
            .count();
        crossings % 2 == 0
    }

    /// Outward unit normal of edge `edge_index`, evaluated at `point` on it.
    pub(crate) fn outward_edge_normal(&self, edge_index: usize, point: V2) -> V2 {
        let candidate = self.edge(edge_index).normal();
        if self.is_normal_outward(point, candidate, edge_index) {
            candidate
        } else {
            -candidate
        }
    }

    /// Outward normal of the edge nearest `point`, with no tolerance check.
    pub(crate) fn surface_normal(&self, point: V2) -> V2 {
        let (index, closest, _) = self.nearest_edge(point);
        self.outward_edge_normal(index, closest)
    }

    /// The outward normal at `point` if it is close enough to an edge.
    pub fn normal(&self, point: V2) -> Option<V2> {
        let (index, closest, dist2) = self.nearest_edge(point);
        if dist2 > POLYGON_NORMAL_EPSILON_SQUARED {
            return None;
        }
        Some(self.outward_edge_normal(index, closest))
    }

    pub fn translate(&mut self, offset: V2) {
        for v in self.vertices.iter_mut() {
            *v += offset;
        }
        self.center += offset;
        self.bounds.translate(offset);
    }

    /// Move so that the center lands on `position`.
    pub fn move_to(&mut self, position: V2) {
        self.translate(position - self.center);
    }

    /// Rotate counterclockwise around the center.
    pub fn rotate(&mut self, angle: f64) {
        let center = self.center;
        for v in self.vertices.iter_mut() {
            *v = v.rotate_around(center, angle);
        }
    }

    /// Scale each axis about the center.
    pub fn scale(&mut self, factors: V2) {
        let center = self.center;
        for v in self.vertices.iter_mut() {
            *v = center + (*v - center).component_mul(factors);
        }
        self.bounds = bounds_for(&self.vertices, center);
    }
}
