//! Pairwise collision tests.
//!
//! Every pair of shapes supports three strengths of query: whether they
//! collide, where, and the outward normal of each shape at that point.  Apart
//! from circle/circle, all of them work from the set of points where the two
//! boundaries cross:
//!
//! - The contact point is the mean of those points.
//! - Each shape's normal is the sum of its surface normals at those points.
//! - With no crossings at all, the shapes collide only if one contains the
//!   other.  Then the contact is the midpoint of the centers and the normals
//!   run along the line between them.
use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::*;

pub(crate) mod capsule;
pub(crate) mod circle_circle;
pub(crate) mod circle_line;
pub(crate) mod circle_polygon;
pub(crate) mod line_line;
pub(crate) mod polygon_line;
pub(crate) mod polygon_polygon;

pub(crate) use capsule::*;
pub(crate) use circle_circle::*;
pub(crate) use circle_line::*;
pub(crate) use circle_polygon::*;
pub(crate) use line_line::*;
pub(crate) use polygon_line::*;
pub(crate) use polygon_polygon::*;

/// Boundary crossing points found by a test.
pub(crate) type Points = SmallVec<[V2; 8]>;

/// Where two shapes touch, and the outward normal of each there.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    pub point: V2,
    /// Outward normal of the first shape of the query.
    pub normal_a: V2,
    /// Outward normal of the second shape of the query.
    pub normal_b: V2,
}

impl Contact {
    /// The same contact seen from the other shape.
    #[must_use = "This doesn't mutate the Contact in place"]
    pub fn swapped(self) -> Contact {
        Contact {
            point: self.point,
            normal_a: self.normal_b,
            normal_b: self.normal_a,
        }
    }
}

/// Where a shape meets a segment or line, and the shape's outward normal there.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineContact {
    pub point: V2,
    pub normal: V2,
}

/// Add `point` unless an identical one was already found.
pub(crate) fn push_unique(points: &mut Points, point: V2) {
    if !points.contains(&point) {
        points.push(point);
    }
}

/// Mean of the points, independent of the order they were found in.
pub(crate) fn mean_point(points: &mut Points) -> Option<V2> {
    points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    V2::mean(points.iter())
}

/// Sum unit normals and orient the result away from `center`.
///
/// Falls back to the direction from `center` to `point`, then to `fallback`,
/// when the normals cancel out.
pub(crate) fn combine_normals(
    normals: impl IntoIterator<Item = V2>,
    point: V2,
    center: V2,
    fallback: V2,
) -> V2 {
    let sum = normals.into_iter().fold(V2::ZERO, |acc, n| acc + n);
    let outward = point - center;
    match sum.try_normalize() {
        Some(n) if n.dot(&outward) < 0.0 => -n,
        Some(n) => n,
        None => outward.normalize_or(fallback),
    }
}

fn kind_rank(shape: &Shape) -> u8 {
    match shape {
        Shape::Circle(_) => 0,
        Shape::Polygon(_) => 1,
        Shape::Rect(_) => 2,
        Shape::Capsule(_) => 3,
    }
}

/// Should `(a, b)` be evaluated as `(b, a)`?  Gives every unordered pair one
/// evaluation order so that swapping the arguments only swaps the normals.
fn evaluate_swapped(a: &Shape, b: &Shape) -> bool {
    let key = |s: &Shape| {
        let c = s.get_center();
        (kind_rank(s), c.x, c.y, s.bounding_circle().get_radius())
    };
    key(a).partial_cmp(&key(b)) == Some(Ordering::Greater)
}

fn bounds_overlap(a: &Shape, b: &Shape) -> bool {
    a.bounding_circle().collides(&b.bounding_circle())
}

/// Points where the boundaries of the two shapes cross.
pub(crate) fn boundary_points(a: &Shape, b: &Shape) -> Points {
    use Shape::*;

    match (a, b) {
        (Circle(ref x), Circle(ref y)) => circle_circle_points(x, y),
        (Circle(ref c), Polygon(ref p)) | (Polygon(ref p), Circle(ref c)) => {
            circle_polygon_points(c, p)
        }
        (Circle(ref c), Rect(ref r)) | (Rect(ref r), Circle(ref c)) => {
            circle_polygon_points(c, r.as_polygon())
        }
        (Circle(ref c), Capsule(ref k)) | (Capsule(ref k), Circle(ref c)) => {
            circle_capsule_points(c, k)
        }
        (Polygon(ref p), Polygon(ref q)) => polygon_polygon_points(p, q),
        (Polygon(ref p), Rect(ref r)) | (Rect(ref r), Polygon(ref p)) => {
            polygon_polygon_points(p, r.as_polygon())
        }
        (Rect(ref r), Rect(ref s)) => polygon_polygon_points(r.as_polygon(), s.as_polygon()),
        (Polygon(ref p), Capsule(ref k)) | (Capsule(ref k), Polygon(ref p)) => {
            polygon_capsule_points(p, k)
        }
        (Rect(ref r), Capsule(ref k)) | (Capsule(ref k), Rect(ref r)) => {
            polygon_capsule_points(r.as_polygon(), k)
        }
        (Capsule(ref k), Capsule(ref l)) => capsule_capsule_points(k, l),
    }
}

/// Does one shape contain the other's center?  The shape with the larger
/// bounding circle is asked first.
pub(crate) fn containment_fallback(a: &Shape, b: &Shape) -> bool {
    let (outer, inner) =
        if a.bounding_circle().get_radius() >= b.bounding_circle().get_radius() {
            (a, b)
        } else {
            (b, a)
        };
    outer.contains(inner.get_center()) || inner.contains(outer.get_center())
}

fn fallback_contact(a: &Shape, b: &Shape) -> Contact {
    let (ca, cb) = (a.get_center(), b.get_center());
    let normal = (cb - ca).normalize_or(V2::new(1.0, 0.0));
    Contact {
        point: ca.midpoint(cb),
        normal_a: normal,
        normal_b: -normal,
    }
}

pub(crate) fn shapes_collide(a: &Shape, b: &Shape) -> bool {
    if evaluate_swapped(a, b) {
        return shapes_collide(b, a);
    }
    if let (Shape::Circle(ref x), Shape::Circle(ref y)) = (a, b) {
        return circle_circle_test(x, y);
    }
    if !bounds_overlap(a, b) {
        return false;
    }
    !boundary_points(a, b).is_empty() || containment_fallback(a, b)
}

pub(crate) fn shapes_contact_point(a: &Shape, b: &Shape) -> Option<V2> {
    if evaluate_swapped(a, b) {
        return shapes_contact_point(b, a);
    }
    if let (Shape::Circle(ref x), Shape::Circle(ref y)) = (a, b) {
        return circle_circle_contact(x, y).map(|c| c.point);
    }
    if !bounds_overlap(a, b) {
        return None;
    }

    let mut points = boundary_points(a, b);
    match mean_point(&mut points) {
        Some(p) => Some(p),
        None => containment_fallback(a, b).then(|| a.get_center().midpoint(b.get_center())),
    }
}

pub(crate) fn shapes_contact(a: &Shape, b: &Shape) -> Option<Contact> {
    if evaluate_swapped(a, b) {
        return shapes_contact(b, a).map(Contact::swapped);
    }
    if let (Shape::Circle(ref x), Shape::Circle(ref y)) = (a, b) {
        return circle_circle_contact(x, y);
    }
    if !bounds_overlap(a, b) {
        return None;
    }

    let mut points = boundary_points(a, b);
    let point = match mean_point(&mut points) {
        Some(p) => p,
        None => return containment_fallback(a, b).then(|| fallback_contact(a, b)),
    };

    let (ca, cb) = (a.get_center(), b.get_center());
    let between = (cb - ca).normalize_or(V2::new(1.0, 0.0));
    Some(Contact {
        point,
        normal_a: combine_normals(points.iter().map(|p| a.surface_normal(*p)), point, ca, between),
        normal_b: combine_normals(points.iter().map(|p| b.surface_normal(*p)), point, cb, -between),
    })
}

fn segment_bounds_reject(shape: &Shape, segment: &Segment) -> bool {
    let bounds = shape.bounding_circle();
    let r = bounds.get_radius();
    segment.distance_squared(*bounds.get_center()) > r * r
}

fn line_bounds_reject(shape: &Shape, line: &Line) -> bool {
    let bounds = shape.bounding_circle();
    let r = bounds.get_radius();
    line.distance_squared(*bounds.get_center()) > r * r
}

fn segment_points(shape: &Shape, segment: &Segment) -> Points {
    match shape {
        Shape::Circle(ref c) => circle_segment_points(c, segment),
        Shape::Polygon(ref p) => polygon_segment_points(p, segment),
        Shape::Rect(ref r) => polygon_segment_points(r.as_polygon(), segment),
        Shape::Capsule(ref k) => capsule_segment_points(k, segment),
    }
}

fn line_points(shape: &Shape, line: &Line) -> Points {
    match shape {
        Shape::Circle(ref c) => circle_line_points(c, line),
        Shape::Polygon(ref p) => polygon_line_points(p, line),
        Shape::Rect(ref r) => polygon_line_points(r.as_polygon(), line),
        Shape::Capsule(ref k) => capsule_line_points(k, line),
    }
}

fn ray_points(shape: &Shape, ray: &Ray) -> Points {
    match shape {
        Shape::Circle(ref c) => circle_ray_points(c, ray),
        Shape::Polygon(ref p) => polygon_ray_points(p, ray),
        Shape::Rect(ref r) => polygon_ray_points(r.as_polygon(), ray),
        Shape::Capsule(ref k) => capsule_ray_points(k, ray),
    }
}

/// Contact from crossing points, oriented away from the shape's center.
fn line_contact_from_points(shape: &Shape, points: &mut Points) -> Option<LineContact> {
    let point = mean_point(points)?;
    let center = shape.get_center();
    let normal = combine_normals(
        points.iter().map(|p| shape.surface_normal(*p)),
        point,
        center,
        shape.surface_normal(point),
    );
    Some(LineContact { point, normal })
}

/// Contact for a segment lying entirely inside a shape: the boundary point
/// nearest to the part of the segment closest to the center.
fn enclosed_segment_contact(shape: &Shape, segment: &Segment) -> LineContact {
    let inner = segment.closest_point(shape.get_center());
    let point = shape.closest_point(inner);
    LineContact {
        point,
        normal: shape.surface_normal(point),
    }
}

pub(crate) fn segment_collides(shape: &Shape, segment: &Segment) -> bool {
    if let Shape::Circle(ref c) = shape {
        return circle_segment_test(c, segment);
    }
    if segment_bounds_reject(shape, segment) {
        return false;
    }
    !segment_points(shape, segment).is_empty() || shape.contains(segment.a)
}

pub(crate) fn segment_contact(shape: &Shape, segment: &Segment) -> Option<LineContact> {
    if let Shape::Circle(ref c) = shape {
        return circle_segment_contact(c, segment);
    }
    if segment_bounds_reject(shape, segment) {
        return None;
    }

    let mut points = segment_points(shape, segment);
    match line_contact_from_points(shape, &mut points) {
        Some(contact) => Some(contact),
        None => shape
            .contains(segment.a)
            .then(|| enclosed_segment_contact(shape, segment)),
    }
}

pub(crate) fn line_collides(shape: &Shape, line: &Line) -> bool {
    if let Shape::Circle(ref c) = shape {
        return circle_line_test(c, line);
    }
    if line_bounds_reject(shape, line) {
        return false;
    }
    !line_points(shape, line).is_empty()
}

pub(crate) fn line_contact(shape: &Shape, line: &Line) -> Option<LineContact> {
    if let Shape::Circle(ref c) = shape {
        return circle_line_contact(c, line);
    }
    if line_bounds_reject(shape, line) {
        return None;
    }
    line_contact_from_points(shape, &mut line_points(shape, line))
}

pub(crate) fn ray_collides(shape: &Shape, ray: &Ray) -> bool {
    if ray.is_degenerate() {
        return false;
    }
    if let Shape::Circle(ref c) = shape {
        return circle_ray_test(c, ray);
    }
    let bounds = shape.bounding_circle();
    if ray.distance_squared(*bounds.get_center()) > bounds.get_radius().powi(2) {
        return false;
    }
    !ray_points(shape, ray).is_empty() || shape.contains(ray.get_origin())
}

/// The first boundary crossing along the ray.  A ray starting inside the
/// shape contacts it where it leaves.
pub(crate) fn ray_contact(shape: &Shape, ray: &Ray) -> Option<LineContact> {
    if !ray_collides(shape, ray) {
        return None;
    }

    let first = ray_points(shape, ray).into_iter().min_by(|p, q| {
        ray.project(*p)
            .partial_cmp(&ray.project(*q))
            .unwrap_or(Ordering::Equal)
    });
    let point = match first {
        Some(p) => p,
        None if shape.contains(ray.get_origin()) => {
            let end = ray.evaluate(ray.get_length());
            return Some(enclosed_segment_contact(shape, &Segment::new(ray.get_origin(), end)));
        }
        // Grazing a circle closer than its crossings can resolve.
        None => shape.closest_point(ray.closest_point(shape.get_center())),
    };
    Some(LineContact {
        point,
        normal: shape.surface_normal(point),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::test_support::*;

    fn square() -> Shape {
        ConvexPolygon::new([
            V2::new(-1.0, -1.0),
            V2::new(1.0, -1.0),
            V2::new(1.0, 1.0),
            V2::new(-1.0, 1.0),
        ])
        .expect("Valid square")
        .into()
    }

    #[test]
    fn square_against_segment_averages_crossings() {
        let seg = Segment::new(V2::new(-2.0, 0.0), V2::new(2.0, 0.0));
        let s = square();
        let mut points = segment_points(&s, &seg);
        assert_eq!(points.len(), 2);
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_relative_eq!(points[0].x, -1.0);
        assert_relative_eq!(points[1].x, 1.0);

        let p = s.segment_contact_point(&seg).expect("Crosses");
        assert_abs_diff_eq!(p.x, 0.0);
        assert_abs_diff_eq!(p.y, 0.0);
    }

    #[test]
    fn segment_inside_a_polygon() {
        let seg = Segment::new(V2::new(-0.5, 0.8), V2::new(0.5, 0.8));
        let s = square();
        assert!(s.collides_with_segment(&seg));
        let c = s.segment_contact(&seg).expect("Enclosed");
        assert_relative_eq!(c.point.y, 1.0);
        assert_relative_eq!(c.normal.y, 1.0);
    }

    #[test]
    fn line_through_a_polygon() {
        let s = square();
        let c = s
            .line_contact(&Line::new(V2::new(0.5, -10.0), V2::new(0.5, -9.0)))
            .expect("Line crosses the square");
        assert_relative_eq!(c.point.x, 0.5);
        assert_abs_diff_eq!(c.point.y, 0.0, epsilon = 1e-12);
        assert!(!s.collides_with_line(&Line::new(V2::new(3.0, 0.0), V2::new(3.0, 1.0))));
    }

    #[test]
    fn rays_contact_where_they_first_cross() -> anyhow::Result<()> {
        let circle: Shape = Circle::new(V2::new(0.0, 0.0), 1.0)?.into();
        let ray = Ray::through(V2::new(-5.0, 0.0), V2::new(5.0, 0.0));
        assert!(circle.collides_with_ray(&ray));
        assert_eq!(circle.ray_contact_point(&ray), Some(V2::new(-1.0, 0.0)));

        let s = square();
        let outward = Ray::through(V2::new(0.0, 0.0), V2::new(0.0, 1.0));
        let c = s.ray_contact(&outward).expect("Leaves through the top");
        assert_relative_eq!(c.point.y, 1.0);
        assert_relative_eq!(c.normal.y, 1.0);

        let short = Ray::from_points(V2::new(0.0, 0.0), V2::new(0.5, 0.0));
        assert!(s.collides_with_ray(&short));
        let c = s.ray_contact(&short).expect("Enclosed");
        assert_relative_eq!(s.signed_distance(c.point), 0.0);

        let away = Ray::through(V2::new(5.0, 0.0), V2::new(6.0, 0.0));
        assert!(!s.collides_with_ray(&away));
        assert!(s.ray_contact(&away).is_none());
        Ok(())
    }

    #[test]
    fn nested_shapes_use_the_fallback() -> anyhow::Result<()> {
        let big: Shape = Circle::new(V2::new(0.0, 0.0), 10.0)?.into();
        let small = square();
        assert!(big.collides_with(&small));
        let c = big.contact_with(&small).expect("Nested");
        assert_eq!(c.point, V2::new(0.0, 0.0));
        Ok(())
    }

    #[test]
    fn rect_against_capsule() -> anyhow::Result<()> {
        let rect: Shape = AxisRect::new(V2::new(0.0, 0.0), V2::new(2.0, 2.0))?.into();
        let touching: Shape = Capsule::between(V2::new(1.5, -3.0), V2::new(1.5, 3.0), 0.75)?.into();
        let apart: Shape = Capsule::between(V2::new(2.5, -3.0), V2::new(2.5, 3.0), 0.75)?.into();
        assert!(rect.collides_with(&touching));
        assert!(!rect.collides_with(&apart));

        let c = rect.contact_with(&touching).expect("Touching");
        assert_relative_eq!(c.point.x, 0.75, epsilon = 1e-9);
        assert_abs_diff_eq!(c.point.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(c.normal_a.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(c.normal_b.x, -1.0, epsilon = 1e-9);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(5000))]

        #[test]
        fn collision_is_symmetric(a in arb_shape(), b in arb_shape()) {
            prop_assert_eq!(a.collides_with(&b), b.collides_with(&a), "{:?} {:?}", a, b);
            prop_assert_eq!(a.contact_point_with(&b), b.contact_point_with(&a));
            let ab = a.contact_with(&b);
            let ba = b.contact_with(&a);
            prop_assert_eq!(ab, ba.map(Contact::swapped), "{:?} {:?}", a, b);
        }

        #[test]
        fn strengths_agree(a in arb_shape(), b in arb_shape()) {
            let hit = a.collides_with(&b);
            prop_assert_eq!(hit, a.contact_point_with(&b).is_some());
            prop_assert_eq!(hit, a.contact_with(&b).is_some());
        }

        #[test]
        fn bounding_circles_enclose_shapes(shape in arb_shape(), angle in 0.0..std::f64::consts::TAU) {
            let bounds = shape.bounding_circle();
            let far = shape.get_center() + V2::new(angle.cos(), angle.sin()) * 1e4;
            let extreme = shape.closest_point(far);
            prop_assert!(
                bounds.signed_distance(extreme) <= 1e-9,
                "{:?} escapes {:?} at {:?}", shape, bounds, extreme
            );
        }

        #[test]
        fn ray_strengths_agree(shape in arb_shape(), origin in arb_point(20.0), target in arb_point(20.0)) {
            let ray = Ray::through(origin, target);
            let hit = shape.collides_with_ray(&ray);
            prop_assert_eq!(hit, shape.ray_contact_point(&ray).is_some());
            prop_assert_eq!(hit, shape.ray_contact(&ray).is_some());
            prop_assert_eq!(hit, shape.raycast(&ray).is_some(), "{:?} {:?}", shape, ray);
        }

        #[test]
        fn normals_are_unit_length(a in arb_shape(), b in arb_shape()) {
            if let Some(c) = a.contact_with(&b) {
                prop_assert!((c.normal_a.length() - 1.0).abs() < 1e-9);
                prop_assert!((c.normal_b.length() - 1.0).abs() < 1e-9);
            }
        }
    }
}
