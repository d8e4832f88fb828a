//! End to end checks of pairwise collisions and toric queries.
use anyhow::Result;
use approx::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use toric_physics::*;

#[test]
fn overlapping_circles() -> Result<()> {
    toric_logging::log_for_tests();

    let a: Shape = Circle::new(V2::new(0.0, 0.0), 1.0)?.into();
    let b: Shape = Circle::new(V2::new(1.5, 0.0), 1.0)?.into();
    assert!(a.collides_with(&b));
    assert!(b.collides_with(&a));

    let point = a.contact_point_with(&b).expect("Circles overlap");
    assert_relative_eq!(point.x, 0.75);
    assert_abs_diff_eq!(point.y, 0.0);

    let forward = a.contact_with(&b).expect("Circles overlap");
    let backward = b.contact_with(&a).expect("Circles overlap");
    assert_eq!(forward.normal_a, backward.normal_b);
    assert_eq!(forward.normal_b, backward.normal_a);
    Ok(())
}

#[test]
fn ray_through_a_circle() -> Result<()> {
    toric_logging::log_for_tests();

    let circle: Shape = Circle::new(V2::new(0.0, 0.0), 1.0)?.into();
    let ray = Ray::from_points(V2::new(-5.0, 0.0), V2::new(5.0, 0.0));
    assert!(circle.collides_with_ray(&ray));

    let point = circle.ray_contact_point(&ray).expect("Passes through");
    assert_relative_eq!(point.x, -1.0);
    assert_abs_diff_eq!(point.y, 0.0);

    let hit = circle.raycast(&ray).expect("Passes through");
    assert_relative_eq!(hit.distance, 4.0);
    assert_eq!(hit.normal, Some(V2::new(-1.0, 0.0)));
    Ok(())
}

#[test]
fn segment_across_a_square() -> Result<()> {
    toric_logging::log_for_tests();

    let square: Shape = ConvexPolygon::new([
        V2::new(-1.0, -1.0),
        V2::new(1.0, -1.0),
        V2::new(1.0, 1.0),
        V2::new(-1.0, 1.0),
    ])?
    .into();
    let segment = Segment::new(V2::new(-2.0, 0.0), V2::new(2.0, 0.0));
    assert!(square.collides_with_segment(&segment));

    let point = square.segment_contact_point(&segment).expect("Crosses two sides");
    assert_abs_diff_eq!(point.x, 0.0);
    assert_abs_diff_eq!(point.y, 0.0);
    Ok(())
}

#[test]
fn walking_off_the_tile_edge() -> Result<()> {
    toric_logging::log_for_tests();

    let space = ToricSpace::new(V2::new(10.0, 10.0))?;
    let crossings = space.boundary_crossings(V2::new(4.9, 0.0), V2::new(1.0, 0.0), 1.0);
    assert_eq!(crossings.len(), 1);
    assert_relative_eq!(crossings[0].x, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(crossings[0].y, 0.0);

    let next = space.complementary_point(crossings[0]);
    assert_relative_eq!(next.x, -5.0, epsilon = 1e-2);
    assert!(space.is_inside(next));
    Ok(())
}

#[test]
fn sweeping_a_circle_into_a_circle() -> Result<()> {
    toric_logging::log_for_tests();

    let space = ToricSpace::new(V2::new(100.0, 100.0))?;
    let mut registry = ColliderRegistry::new();
    let target = registry.register(Circle::new(V2::new(5.0, 0.0), 1.0)?);

    let hit = space
        .circle_cast(&registry, V2::new(0.0, 0.0), 0.5, V2::new(1.0, 0.0), 10.0)
        .expect("Sweeps into the circle");
    assert_eq!(hit.collider, target);
    assert_relative_eq!(hit.centroid.x, 3.5, epsilon = 1e-2);
    assert_relative_eq!(hit.distance, 3.5, epsilon = 1e-2);
    Ok(())
}

#[test]
fn registry_changes_show_up_in_queries() -> Result<()> {
    toric_logging::log_for_tests();

    let space = ToricSpace::new(V2::new(20.0, 20.0))?;
    let mut registry = ColliderRegistry::new();
    let wall = registry.register(AxisRect::new(V2::new(5.0, 0.0), V2::new(1.0, 8.0))?);
    let origin = V2::new(0.0, 0.0);
    let east = V2::new(1.0, 0.0);

    let hit = space.raycast(&registry, origin, east, 30.0).expect("Hits the wall");
    assert_eq!(hit.collider, wall);
    assert_relative_eq!(hit.distance, 4.5, epsilon = 1e-9);

    // Moved out of the way, the ray wraps around the world without a hit.
    registry
        .get_mut(wall)
        .expect("Still registered")
        .move_to(V2::new(5.0, 9.0));
    assert!(space.raycast(&registry, origin, east, 30.0).is_none());

    registry.unregister(wall);
    assert!(registry.get(wall).is_none());
    assert!(space.overlap_point(&registry, V2::new(5.0, 9.0)).is_none());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn shorter_raycasts_never_see_farther(
        cx in -4.0..4.0f64,
        cy in -4.0..4.0f64,
        r in 0.2..1.5f64,
        angle in 0.0..std::f64::consts::TAU,
        distance in 1.0..40.0f64,
    ) {
        let space = ToricSpace::new(V2::new(10.0, 10.0)).expect("Valid size");
        let mut registry = ColliderRegistry::new();
        registry.register(Circle::new(V2::new(cx, cy), r).expect("Valid circle"));
        prop_assume!(V2::new(cx, cy).length() > r + 1e-3);

        let origin = V2::new(0.0, 0.0);
        let direction = V2::new(angle.cos(), angle.sin());
        let short = space.raycast(&registry, origin, direction, distance * 0.5);
        let long = space.raycast(&registry, origin, direction, distance);
        if let Some(s) = short {
            prop_assert!(s.distance <= distance * 0.5 + 1e-6);
            let l = long.expect("A longer ray sees everything a shorter one does");
            prop_assert!((l.distance - s.distance).abs() < 1e-6);
        }
    }

    #[test]
    fn folding_is_idempotent_and_periodic(
        x in -1e4..1e4f64,
        y in -1e4..1e4f64,
        k in -50i32..50,
    ) {
        let space = ToricSpace::new(V2::new(7.0, 3.0)).expect("Valid size");
        let p = V2::new(x, y);
        let folded = space.fold(p);
        prop_assert_eq!(space.fold(folded), folded);
        prop_assert!(space.is_inside(folded));

        let shifted = space.fold(p + V2::new(7.0 * k as f64, 0.0));
        prop_assert!((shifted.x - folded.x).abs() < 1e-6 || (shifted.x - folded.x).abs() > 7.0 - 1e-6);
        prop_assert!((shifted.y - folded.y).abs() < 1e-9);
    }
}
