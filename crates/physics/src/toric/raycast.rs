//! Raycasts that wrap around the tile edges.
use crate::raycasting::nearest_hit;
use crate::toric::hit::{nearest, LegHits};
use crate::*;

impl ToricSpace {
    /// The nearest hit on each collider along one in-tile leg.
    fn raycast_leg(
        &self,
        registry: &ColliderRegistry,
        from: V2,
        to: V2,
        reach: f64,
    ) -> Vec<ToricHit> {
        let ray = Ray::from_points(from, to);
        let mut hits = vec![];
        for (collider, shape) in registry.iter() {
            let copies = self.wrapped_copies(shape, 0.0);
            if let Some(hit) = nearest_hit(copies.iter().filter_map(|c| c.raycast(&ray))) {
                hits.push(ToricHit {
                    point: hit.point,
                    centroid: hit.point,
                    collider,
                    normal: hit.normal,
                    distance: hit.distance + reach,
                });
            }
        }
        hits
    }

    /// The first collider hit by a ray from `origin` travelling `distance`
    /// along `direction`, wrapping at the tile edges.
    pub fn raycast(
        &self,
        registry: &ColliderRegistry,
        origin: V2,
        direction: V2,
        distance: f64,
    ) -> Option<ToricHit> {
        self.walk(origin, direction, distance, |from, to, reach, _| {
            nearest(self.raycast_leg(registry, from, to, reach))
        })
    }

    /// Like [ToricSpace::raycast], also returning the tile edge points
    /// crossed before the hit or the end of the ray.
    pub fn raycast_with_crossings(
        &self,
        registry: &ColliderRegistry,
        origin: V2,
        direction: V2,
        distance: f64,
    ) -> (Option<ToricHit>, Vec<V2>) {
        let mut crossings = vec![];
        let hit = self.walk(origin, direction, distance, |from, to, reach, crossing| {
            let hit = nearest(self.raycast_leg(registry, from, to, reach));
            if hit.is_none() {
                crossings.extend(crossing);
            }
            hit
        });
        (hit, crossings)
    }

    /// Every hit along the whole walk, nearest first.  A collider passed more
    /// than once, by wrapping around the world, is reported each time.
    pub fn raycast_all(
        &self,
        registry: &ColliderRegistry,
        origin: V2,
        direction: V2,
        distance: f64,
    ) -> Vec<ToricHit> {
        let mut hits = LegHits::default();
        self.walk(origin, direction, distance, |from, to, reach, _| {
            hits.add_leg(self.raycast_leg(registry, from, to, reach), reach);
            None::<()>
        });
        hits.into_sorted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::test_support::*;

    fn space() -> ToricSpace {
        ToricSpace::new(V2::new(10.0, 10.0)).expect("Valid size")
    }

    fn circle(x: f64, y: f64, r: f64) -> Shape {
        Circle::new(V2::new(x, y), r).expect("Valid circle").into()
    }

    #[test]
    fn hit_within_the_tile() {
        let mut reg = ColliderRegistry::new();
        let c = reg.register(circle(3.0, 0.0, 1.0));
        let hit = space()
            .raycast(&reg, V2::new(0.0, 0.0), V2::new(1.0, 0.0), 4.0)
            .expect("Straight at it");
        assert_eq!(hit.collider, c);
        assert_relative_eq!(hit.point.x, 2.0);
        assert_relative_eq!(hit.distance, 2.0);
        assert_eq!(hit.normal, Some(V2::new(-1.0, 0.0)));

        assert!(space().raycast(&reg, V2::new(0.0, 0.0), V2::new(1.0, 0.0), 1.5).is_none());
        assert!(space().raycast(&reg, V2::new(0.0, 0.0), V2::new(-1.0, 0.0), 4.0).is_none());
    }

    #[test]
    fn hit_across_the_seam() {
        let mut reg = ColliderRegistry::new();
        let c = reg.register(circle(-3.0, 0.0, 1.0));
        let (hit, crossings) = space().raycast_with_crossings(
            &reg,
            V2::new(3.0, 0.0),
            V2::new(1.0, 0.0),
            20.0,
        );
        let hit = hit.expect("Wraps around to the circle");
        assert_eq!(hit.collider, c);
        // 2 to the edge, then 1 more from -5 to the circle's near side.
        assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-9);
        assert_relative_eq!(hit.point.x, -4.0, epsilon = 1e-9);
        assert_eq!(crossings.len(), 1);
        assert_relative_eq!(crossings[0].x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn hit_on_an_origin_folded_from_far_away() {
        let mut reg = ColliderRegistry::new();
        reg.register(circle(0.0, 3.0, 1.0));
        let hit = space()
            .raycast(&reg, V2::new(20.0, -30.0), V2::new(0.0, 1.0), 5.0)
            .expect("Origin folds to the center");
        assert_relative_eq!(hit.distance, 2.0);
    }

    #[test]
    fn starting_inside_a_collider() {
        let mut reg = ColliderRegistry::new();
        reg.register(circle(0.0, 0.0, 1.0));
        let hit = space()
            .raycast(&reg, V2::new(0.5, 0.0), V2::new(0.0, 1.0), 3.0)
            .expect("Inside");
        assert_eq!(hit.distance, 0.0);
        assert!(hit.normal.is_none());
    }

    #[test]
    fn all_hits_are_sorted() {
        let mut reg = ColliderRegistry::new();
        let far = reg.register(circle(4.0, 0.0, 0.5));
        let near = reg.register(circle(1.0, 0.0, 0.5));
        reg.register(circle(0.0, 3.0, 0.5));
        let hits = space().raycast_all(&reg, V2::new(-1.0, 0.0), V2::new(1.0, 0.0), 5.5);
        assert_eq!(hits.iter().map(|h| h.collider).collect::<Vec<_>>(), vec![near, far]);
        assert_relative_eq!(hits[0].distance, 1.5);
        assert_relative_eq!(hits[1].distance, 4.5);

        assert!(space()
            .raycast_all(&reg, V2::new(-1.0, 2.0), V2::new(1.0, 0.0), 3.0)
            .is_empty());
    }

    #[test]
    fn casts_starting_on_an_edge() {
        let diagonal = (2.0f64.sqrt() - 0.5, V2::new(4.0, 4.0));
        let cases = [
            (V2::new(5.0, 0.0), V2::new(-1.0, 0.0), 0.5, V2::new(4.0, 0.0)),
            (V2::new(-5.0, 0.0), V2::new(-1.0, 0.0), 0.5, V2::new(4.0, 0.0)),
            (V2::new(5.0, 0.0), V2::new(1.0, 0.0), 0.5, V2::new(-4.0, 0.0)),
            (V2::new(0.0, 5.0), V2::new(0.0, 1.0), 0.5, V2::new(0.0, -4.0)),
            (V2::new(0.0, -5.0), V2::new(0.0, -1.0), 0.5, V2::new(0.0, 4.0)),
            (V2::new(-5.0, -5.0), V2::new(-1.0, -1.0), diagonal.0, diagonal.1),
            (V2::new(5.0, 5.0), V2::new(1.0, 1.0), diagonal.0, -diagonal.1),
        ];
        for (origin, direction, expected, center) in cases {
            let mut reg = ColliderRegistry::new();
            let c = reg.register(circle(center.x, center.y, 0.5));
            let hit = space()
                .raycast(&reg, origin, direction, 2.0)
                .unwrap_or_else(|| panic!("{:?} along {:?} should hit", origin, direction));
            assert_eq!(hit.collider, c);
            assert_relative_eq!(hit.distance, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn leaving_through_the_origin_edge_counts_as_a_crossing() {
        let reg = ColliderRegistry::new();
        let (hit, crossings) =
            space().raycast_with_crossings(&reg, V2::new(-5.0, 1.0), V2::new(-1.0, 0.0), 3.0);
        assert!(hit.is_none());
        assert_eq!(crossings, vec![V2::new(-5.0, 1.0)]);
    }

    #[test]
    fn all_hits_on_both_sides_of_the_seam() {
        let mut reg = ColliderRegistry::new();
        let a = reg.register(circle(2.0, 0.0, 0.5));
        let b = reg.register(circle(-3.0, 0.0, 0.5));
        let s = space();

        let hits = s.raycast_all(&reg, V2::new(0.0, 0.0), V2::new(1.0, 0.0), 8.0);
        assert_eq!(hits.iter().map(|h| h.collider).collect::<Vec<_>>(), vec![a, b]);
        assert_relative_eq!(hits[0].distance, 1.5, epsilon = 1e-9);
        assert_relative_eq!(hits[1].distance, 6.5, epsilon = 1e-9);

        // Twice around the world passes each circle twice.
        let hits = s.raycast_all(&reg, V2::new(0.0, 0.0), V2::new(1.0, 0.0), 20.0);
        assert_eq!(hits.iter().map(|h| h.collider).collect::<Vec<_>>(), vec![a, b, a, b]);
        for (hit, expected) in hits.iter().zip([1.5, 6.5, 11.5, 16.5]) {
            assert_relative_eq!(hit.distance, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn seam_straddlers_are_reported_once() {
        let mut reg = ColliderRegistry::new();
        let c = reg.register(circle(4.8, 0.0, 0.5));
        let hits = space().raycast_all(&reg, V2::new(0.0, 0.0), V2::new(1.0, 0.0), 8.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].collider, c);
        assert_relative_eq!(hits[0].distance, 4.3, epsilon = 1e-9);
    }

    #[test]
    fn empty_registry_and_degenerate_direction() {
        let reg = ColliderRegistry::new();
        assert!(space().raycast(&reg, V2::new(0.0, 0.0), V2::new(1.0, 1.0), 100.0).is_none());
        let mut reg = ColliderRegistry::new();
        reg.register(circle(1.0, 0.0, 0.5));
        assert!(space().raycast(&reg, V2::new(0.0, 0.0), V2::ZERO, 5.0).is_none());
    }

    /// Anywhere in the tile, with extra weight on its edges and corners.
    fn arb_origin() -> impl Strategy<Value = V2> {
        prop_oneof![
            arb_point(5.0),
            (-5.0..5.0f64, 0usize..4).prop_map(|(t, side)| match side {
                0 => V2::new(5.0, t),
                1 => V2::new(-5.0, t),
                2 => V2::new(t, 5.0),
                _ => V2::new(t, -5.0),
            }),
            Just(V2::new(5.0, 5.0)),
            Just(V2::new(-5.0, -5.0)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        // Casting half as far never finds a farther hit.
        #[test]
        fn shorter_casts_find_nearer_hits(
            origin in arb_origin(),
            angle in 0.0..std::f64::consts::TAU,
            distance in 1.0..60.0f64,
            cx in -4.0..4.0f64,
            cy in -4.0..4.0f64,
            r in 0.3..1.5f64,
        ) {
            let mut reg = ColliderRegistry::new();
            reg.register(circle(cx, cy, r));
            let s = space();
            let direction = V2::new(angle.cos(), angle.sin());
            let full = s.raycast(&reg, origin, direction, distance);
            let half = s.raycast(&reg, origin, direction, distance * 0.5);
            if let Some(h) = half {
                prop_assert!(h.distance <= distance * 0.5 + 1e-6);
                let f = full.expect("The longer cast passes the same hit");
                prop_assert!((f.distance - h.distance).abs() < 1e-6);
            }
            // Every hit of the shorter cast is also a hit of the longer one.
            let short_all = s.raycast_all(&reg, origin, direction, distance * 0.5);
            let long_all = s.raycast_all(&reg, origin, direction, distance);
            prop_assert!(short_all.len() <= long_all.len());
        }
    }
}
