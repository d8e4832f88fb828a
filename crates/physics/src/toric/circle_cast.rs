//! Sweeping a circle through the world, wrapping at the tile edges.
//!
//! There is no closed form for the first touch of a moving circle against
//! polygons and capsules, so each leg bisects on "does the circle at this
//! center overlap the collider", which only changes once along the sweep.
use crate::toric::hit::{nearest, LegHits};
use crate::tolerances::*;
use crate::*;

/// Iterations of the search for the sweep position nearest to a collider.
const NEAREST_APPROACH_ITERATIONS: usize = 64;

/// Upper bound on bisection steps, in case the interval stops shrinking.
const MAX_BISECTION_STEPS: usize = 128;

/// The first center along `from -> to` at which `circle`, moved there,
/// overlaps `target`.
fn first_touch(target: &Shape, circle: &Circle, from: V2, to: V2) -> Option<V2> {
    let bounds = target.bounding_circle();
    let reach = bounds.get_radius() + circle.get_radius();
    if Segment::new(from, to).distance_squared(*bounds.get_center()) > reach * reach {
        return None;
    }

    let overlaps = |center: V2| target.collides_with(&Shape::Circle(circle.move_circle(&center)));
    if overlaps(from) {
        return Some(from);
    }

    let at = |t: f64| from + (to - from) * t;

    // Distance to a convex shape is convex along a line, so a ternary search
    // finds the sweep position where the circle comes closest.
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..NEAREST_APPROACH_ITERATIONS {
        let m1 = lo + (hi - lo) / 3.0;
        let m2 = hi - (hi - lo) / 3.0;
        if target.distance(at(m1)) <= target.distance(at(m2)) {
            hi = m2;
        } else {
            lo = m1;
        }
    }
    let closest = at((lo + hi) * 0.5);
    if !overlaps(closest) {
        return None;
    }

    // `before` never overlaps and `after` always does.
    let (mut before, mut after) = (from, closest);
    for _ in 0..MAX_BISECTION_STEPS {
        if before.distance_squared(&after) < BISECTION_EPSILON_SQUARED {
            break;
        }
        let mid = before.midpoint(after);
        if overlaps(mid) {
            after = mid;
        } else {
            before = mid;
        }
    }
    Some(after)
}

impl ToricSpace {
    /// The first touch on each collider along one in-tile leg.
    ///
    /// On legs that end at a tile edge, touches whose contact point falls
    /// outside the tile are left for the next leg.
    fn circle_cast_leg(
        &self,
        registry: &ColliderRegistry,
        circle: &Circle,
        from: V2,
        to: V2,
        reach: f64,
        crossing: Option<V2>,
    ) -> Vec<ToricHit> {
        let mut hits = vec![];
        for (collider, shape) in registry.iter() {
            let copies = self.wrapped_copies(shape, circle.get_radius());
            let touches = copies.iter().filter_map(|copy| {
                let centroid = first_touch(copy, circle, from, to)?;
                let point = copy.closest_point(centroid);
                if crossing.is_some() && !self.is_inside(point) {
                    return None;
                }
                Some(ToricHit {
                    point,
                    centroid,
                    collider,
                    normal: Some(copy.surface_normal(point)),
                    distance: from.distance(&centroid) + reach,
                })
            });
            hits.extend(nearest(touches.collect()));
        }
        hits
    }

    /// The first collider touched by a circle of `radius` swept from `origin`
    /// along `direction` for `distance`, wrapping at the tile edges.
    pub fn circle_cast(
        &self,
        registry: &ColliderRegistry,
        origin: V2,
        radius: f64,
        direction: V2,
        distance: f64,
    ) -> Option<ToricHit> {
        let circle = Circle::new(origin, radius).ok()?;
        self.walk(origin, direction, distance, |from, to, reach, crossing| {
            nearest(self.circle_cast_leg(registry, &circle, from, to, reach, crossing))
        })
    }

    /// Every touch along the whole sweep, nearest first.
    pub fn circle_cast_all(
        &self,
        registry: &ColliderRegistry,
        origin: V2,
        radius: f64,
        direction: V2,
        distance: f64,
    ) -> Vec<ToricHit> {
        let circle = match Circle::new(origin, radius) {
            Ok(c) => c,
            Err(_) => return vec![],
        };
        let mut hits = LegHits::default();
        self.walk(origin, direction, distance, |from, to, reach, crossing| {
            let leg = self.circle_cast_leg(registry, &circle, from, to, reach, crossing);
            hits.add_leg(leg, reach);
            None::<()>
        });
        hits.into_sorted()
    }
}
