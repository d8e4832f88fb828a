//! Proptest strategies shared by the unit tests.
use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::*;

#[derive(Copy, Clone, Debug, Arbitrary)]
pub(crate) enum ShapeKind {
    Circle,
    Polygon,
    Rect,
    Capsule,
}

pub(crate) fn arb_point(extent: f64) -> impl Strategy<Value = V2> {
    (-extent..extent, -extent..extent).prop_map(|(x, y)| V2::new(x, y))
}

pub(crate) fn arb_circle() -> impl Strategy<Value = Circle> {
    (arb_point(10.0), 0.5..8.0f64)
        .prop_map(|(c, r)| Circle::new(c, r).expect("Radius is positive"))
}

/// Convex polygons, built by stretching a polygon inscribed in a circle.
pub(crate) fn arb_polygon() -> impl Strategy<Value = ConvexPolygon> {
    (
        arb_point(10.0),
        1.0..8.0f64,
        prop::collection::vec(0.2..1.0f64, 3..8),
        0.0..std::f64::consts::TAU,
        (0.5..1.5f64, 0.5..1.5f64),
    )
        .prop_map(|(center, radius, gaps, phase, (sx, sy))| {
            let total: f64 = gaps.iter().sum();
            let mut angle = phase;
            let vertices = gaps.iter().map(|g| {
                angle += g / total * std::f64::consts::TAU;
                center + V2::new(angle.cos() * radius * sx, angle.sin() * radius * sy)
            });
            ConvexPolygon::new(vertices.collect::<Vec<_>>()).expect("Vertices are distinct")
        })
}

pub(crate) fn arb_rect() -> impl Strategy<Value = AxisRect> {
    (
        arb_point(10.0),
        (0.5..8.0f64, 0.5..8.0f64),
        0.0..std::f64::consts::TAU,
    )
        .prop_map(|(center, (w, h), angle)| {
            AxisRect::with_angle(center, V2::new(w, h), angle).expect("Size is positive")
        })
}

pub(crate) fn arb_capsule() -> impl Strategy<Value = Capsule> {
    (
        arb_point(10.0),
        (0.5..10.0f64, 0.5..10.0f64),
        0.0..std::f64::consts::TAU,
    )
        .prop_map(|(center, (w, h), angle)| {
            Capsule::with_angle(center, V2::new(w, h), angle).expect("Size is positive")
        })
}

pub(crate) fn arb_shape_of(kind: ShapeKind) -> BoxedStrategy<Shape> {
    match kind {
        ShapeKind::Circle => arb_circle().prop_map(Shape::from).boxed(),
        ShapeKind::Polygon => arb_polygon().prop_map(Shape::from).boxed(),
        ShapeKind::Rect => arb_rect().prop_map(Shape::from).boxed(),
        ShapeKind::Capsule => arb_capsule().prop_map(Shape::from).boxed(),
    }
}

pub(crate) fn arb_shape() -> impl Strategy<Value = Shape> {
    any::<ShapeKind>().prop_flat_map(arb_shape_of)
}
