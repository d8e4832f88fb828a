//! A rectangular tile whose opposite edges are identified.
//!
//! The tile is centered on the origin and spans `[-w/2, w/2] x [-h/2, h/2]`.
//! Points are folded into it per axis.
use arrayvec::ArrayVec;
use log::*;

use crate::collision_tests::{segment_segment_point, touches};
use crate::errors::*;
use crate::tolerances::*;
use crate::*;

/// Index of each side in [ToricSpace::sides] and [ToricSpace::offsets].
pub const TOP: usize = 0;
pub const BOTTOM: usize = 1;
pub const LEFT: usize = 2;
pub const RIGHT: usize = 3;

/// A shape plus its copies across every tile side it pokes through.
pub type WrappedCopies = ArrayVec<Shape, 9>;

#[derive(Clone, Debug, PartialEq)]
pub struct ToricSpace {
    size: V2,
    half: V2,
    sides: [Segment; 4],
    offsets: [V2; 4],
}

fn validate(size: V2) -> Result<(), SpaceError> {
    if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
        return Err(SpaceError::InvalidTileSize {
            width: size.x,
            height: size.y,
        });
    }
    Ok(())
}

impl ToricSpace {
    pub fn new(size: V2) -> Result<ToricSpace, SpaceError> {
        validate(size)?;
        let mut space = ToricSpace {
            size,
            half: V2::ZERO,
            sides: [Segment::new(V2::ZERO, V2::ZERO); 4],
            offsets: [V2::ZERO; 4],
        };
        space.rebuild();
        Ok(space)
    }

    /// Change the tile size.  Shapes already placed are not refolded.
    pub fn set_size(&mut self, size: V2) -> Result<(), SpaceError> {
        validate(size)?;
        self.size = size;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        let (hx, hy) = (self.size.x * 0.5, self.size.y * 0.5);
        self.half = V2::new(hx, hy);
        self.sides = [
            Segment::new(V2::new(-hx, hy), V2::new(hx, hy)),
            Segment::new(V2::new(-hx, -hy), V2::new(hx, -hy)),
            Segment::new(V2::new(-hx, hy), V2::new(-hx, -hy)),
            Segment::new(V2::new(hx, hy), V2::new(hx, -hy)),
        ];
        self.offsets = [
            V2::new(0.0, self.size.y),
            V2::new(0.0, -self.size.y),
            V2::new(-self.size.x, 0.0),
            V2::new(self.size.x, 0.0),
        ];
        debug!("Tile configured as {}x{}", self.size.x, self.size.y);
    }

    pub fn get_size(&self) -> V2 {
        self.size
    }

    /// The tile edges, indexed by [TOP], [BOTTOM], [LEFT] and [RIGHT].
    pub fn sides(&self) -> &[Segment; 4] {
        &self.sides
    }

    /// The shift from the tile to its neighbor across each side.
    pub fn offsets(&self) -> &[V2; 4] {
        &self.offsets
    }

    /// Closed: points on the edges are inside.
    pub fn is_inside(&self, point: V2) -> bool {
        point.x.abs() <= self.half.x && point.y.abs() <= self.half.y
    }

    /// The point's position within the tile.
    pub fn fold(&self, point: V2) -> V2 {
        V2::new(
            fold_axis(point.x, self.half.x, self.size.x),
            fold_axis(point.y, self.half.y, self.size.y),
        )
    }

    /// Where a point on, or just past, a tile edge reappears.
    ///
    /// The point is nudged outward along each axis it sits on until it is
    /// outside the tile, then folded.  A point on a corner moves along both
    /// axes.
    pub fn complementary_point(&self, point: V2) -> V2 {
        let step_for = |v: f64, half: f64| {
            if (v - half).abs() <= COMPLEMENTARY_STEP {
                COMPLEMENTARY_STEP
            } else if (v + half).abs() <= COMPLEMENTARY_STEP {
                -COMPLEMENTARY_STEP
            } else {
                0.0
            }
        };
        let step = V2::new(step_for(point.x, self.half.x), step_for(point.y, self.half.y));

        let mut p = point;
        if step != V2::ZERO {
            // Each step covers the whole margin, so this runs at most twice.
            for _ in 0..4 {
                if !self.is_inside(p) {
                    break;
                }
                p += step;
            }
        }
        self.fold(p)
    }

    /// Both points folded, then every pairing of each with its copies one
    /// tile away along either axis.
    fn nearest_images(&self, from: V2, to: V2) -> (V2, V2) {
        let (from, to) = (self.fold(from), self.fold(to));
        let shifts = [
            V2::ZERO,
            self.offsets[TOP],
            self.offsets[BOTTOM],
            self.offsets[LEFT],
            self.offsets[RIGHT],
        ];

        let mut best = (from, to, from.distance_squared(&to));
        for a in shifts.iter() {
            for b in shifts.iter() {
                let (p, q) = (from + *a, to + *b);
                let d = p.distance_squared(&q);
                if d < best.2 {
                    best = (p, q, d);
                }
            }
        }
        (best.0, best.1)
    }

    pub fn shortest_distance(&self, from: V2, to: V2) -> f64 {
        let (p, q) = self.nearest_images(from, to);
        p.distance(&q)
    }

    /// Unit direction of the shortest path, or zero if the points coincide.
    pub fn shortest_direction(&self, from: V2, to: V2) -> V2 {
        self.shortest_direction_and_distance(from, to).0
    }

    pub fn shortest_direction_and_distance(&self, from: V2, to: V2) -> (V2, f64) {
        let (p, q) = self.nearest_images(from, to);
        let d2 = p.distance_squared(&q);
        if d2 <= SAME_POINT_EPSILON_SQUARED {
            return (V2::ZERO, d2.sqrt());
        }
        ((q - p).normalize(), d2.sqrt())
    }

    /// Where the segment from `from` to `to` leaves the tile, nearest to
    /// `from`.  Crossings exactly through a corner count.
    pub fn boundary_intersection(&self, from: V2, to: V2) -> Option<V2> {
        let through_sides = self
            .sides
            .iter()
            .filter_map(|s| segment_segment_point(from, to, s.a, s.b));
        let through_corners = self
            .sides
            .iter()
            .flat_map(|s| [s.a, s.b])
            .filter(|c| *c != from && touches(*c, from, to));

        through_sides
            .chain(through_corners)
            .filter(|p| p.distance_squared(&from) > 0.0)
            .min_by(|p, q| {
                p.distance_squared(&from)
                    .partial_cmp(&q.distance_squared(&from))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Every tile crossing of a walk from `origin` along `direction`.
    pub fn boundary_crossings(&self, origin: V2, direction: V2, distance: f64) -> Vec<V2> {
        let mut crossings = vec![];
        self.walk(origin, direction, distance, |_, _, _, crossing| {
            crossings.extend(crossing);
            None::<()>
        });
        crossings
    }

    /// Indices of the sides the shape's bounds reach, within `margin`.
    fn touched_sides(&self, shape: &Shape, margin: f64) -> ArrayVec<usize, 4> {
        let bounds = shape.bounding_circle();
        let (c, r) = (*bounds.get_center(), bounds.get_radius() + margin);
        let mut out = ArrayVec::new();
        if c.y + r >= self.half.y {
            out.push(TOP);
        }
        if c.y - r <= -self.half.y {
            out.push(BOTTOM);
        }
        if c.x - r <= -self.half.x {
            out.push(LEFT);
        }
        if c.x + r >= self.half.x {
            out.push(RIGHT);
        }
        out
    }

    /// The shape, then owned copies shifted across each tile side it reaches
    /// within `margin`, then the diagonal copies for pairs of adjacent sides.
    pub fn wrapped_copies(&self, shape: &Shape, margin: f64) -> WrappedCopies {
        let touched = self.touched_sides(shape, margin);
        let mut out = WrappedCopies::new();
        out.push(shape.clone());
        for &side in touched.iter() {
            out.push(shape.translated(-self.offsets[side]));
        }
        for &vertical in touched.iter().filter(|s| **s == TOP || **s == BOTTOM) {
            for &horizontal in touched.iter().filter(|s| **s == LEFT || **s == RIGHT) {
                out.push(shape.translated(-(self.offsets[vertical] + self.offsets[horizontal])));
            }
        }
        out
    }

    /// Do the shapes collide anywhere in the tile, counting the seams?
    pub fn collides_wrapped(&self, a: &Shape, b: &Shape) -> bool {
        self.wrapped_copies(a, 0.0)
            .iter()
            .any(|copy| copy.collides_with(b))
            || self
                .wrapped_copies(b, 0.0)
                .iter()
                .skip(1)
                .any(|copy| copy.collides_with(a))
    }

    /// Where a walk leaving the tile at `point` along `direction` comes back
    /// in: exactly on the opposite side, so no distance is lost at the seam.
    /// `None` unless `point` is on a side the direction heads out through.
    fn seam_reentry(&self, point: V2, direction: V2) -> Option<V2> {
        match (
            reentry_axis(point.x, direction.x, self.half.x),
            reentry_axis(point.y, direction.y, self.half.y),
        ) {
            (None, None) => None,
            (x, y) => Some(V2::new(x.unwrap_or(point.x), y.unwrap_or(point.y))),
        }
    }

    /// Walk from `origin` along `direction` for `distance`, one tile at a time.
    ///
    /// `visit` sees each in-tile leg as `(from, to, reach, crossing)`, where
    /// `reach` is the distance already walked and `crossing` is the tile edge
    /// point ending the leg, if the leg ends at one.  The next leg starts on
    /// the opposite side, so `reach` is exact.  The walk stops at the first
    /// leg for which `visit` returns something.
    pub(crate) fn walk<T>(
        &self,
        origin: V2,
        direction: V2,
        distance: f64,
        mut visit: impl FnMut(V2, V2, f64, Option<V2>) -> Option<T>,
    ) -> Option<T> {
        let direction = direction.try_normalize()?;
        if !distance.is_finite() || !origin.is_finite() {
            return None;
        }

        let mut from = self.fold(origin);
        // Folding puts edge points on the left and bottom sides.  Heading out
        // through one of those, the walk crosses it before moving at all.
        if let Some(reentry) = self.seam_reentry(from, direction) {
            if let Some(found) = visit(from, from, 0.0, Some(from)) {
                return Some(found);
            }
            from = reentry;
        }
        let mut remaining = distance.max(0.0);
        let mut reach = 0.0;
        for _ in 0..MAX_TILE_CROSSINGS {
            let to = from + direction * remaining;
            let crossing = if remaining < MIN_REMAINING_DISTANCE {
                None
            } else {
                self.boundary_intersection(from, to)
            };

            let crossing = match crossing {
                Some(c) => c,
                None => return visit(from, to, reach, None),
            };
            if let Some(found) = visit(from, crossing, reach, Some(crossing)) {
                return Some(found);
            }

            let travelled = from.distance(&crossing);
            reach += travelled;
            remaining -= travelled;
            from = self
                .seam_reentry(crossing, direction)
                .unwrap_or_else(|| self.complementary_point(crossing));
            trace!(
                "Crossed the tile edge at {:?}, continuing from {:?} with {} left",
                crossing,
                from,
                remaining
            );
        }

        warn!(
            "Walk from {:?} gave up after {} tile crossings",
            origin, MAX_TILE_CROSSINGS
        );
        None
    }
}

/// The coordinate on the opposite side, if `v` sits on a side that `d` heads
/// out through.
fn reentry_axis(v: f64, d: f64, half: f64) -> Option<f64> {
    let tolerance = SEAM_EPSILON * half.max(1.0);
    if d > 0.0 && (v - half).abs() <= tolerance {
        Some(-half)
    } else if d < 0.0 && (v + half).abs() <= tolerance {
        Some(half)
    } else {
        None
    }
}

/// `start + (v - start) mod m`, mapping the far edge back onto the near one.
fn fold_axis(v: f64, half: f64, m: f64) -> f64 {
    if (-half..half).contains(&v) {
        return v;
    }
    let folded = (v + half).rem_euclid(m);
    // rem_euclid can round up to exactly `m` for tiny negative inputs.
    if folded >= m {
        -half
    } else {
        folded - half
    }
}
