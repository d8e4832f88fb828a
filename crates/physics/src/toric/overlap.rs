//! Overlap queries: which colliders a point or shape touches, seams included.
use crate::*;

impl ToricSpace {
    /// The first registered collider containing `point`.
    pub fn overlap_point(&self, registry: &ColliderRegistry, point: V2) -> Option<ColliderHandle> {
        self.overlap_point_all(registry, point).into_iter().next()
    }

    /// Every registered collider containing `point`, once each.
    pub fn overlap_point_all(&self, registry: &ColliderRegistry, point: V2) -> Vec<ColliderHandle> {
        if !point.is_finite() {
            return vec![];
        }
        let point = self.fold(point);
        registry
            .iter()
            .filter(|(_, shape)| {
                self.wrapped_copies(shape, 0.0)
                    .iter()
                    .any(|copy| copy.contains(point))
            })
            .map(|(handle, _)| handle)
            .collect()
    }

    /// The first registered collider touching `shape`, after folding the
    /// shape's center into the tile.
    pub fn overlap_shape(&self, registry: &ColliderRegistry, shape: &Shape) -> Option<ColliderHandle> {
        let query = self.folded_query(shape)?;
        registry
            .iter()
            .find(|(_, collider)| self.collides_wrapped(&query, collider))
            .map(|(handle, _)| handle)
    }

    pub fn overlap_shape_all(&self, registry: &ColliderRegistry, shape: &Shape) -> Vec<ColliderHandle> {
        let query = match self.folded_query(shape) {
            Some(q) => q,
            None => return vec![],
        };
        registry
            .iter()
            .filter(|(_, collider)| self.collides_wrapped(&query, collider))
            .map(|(handle, _)| handle)
            .collect()
    }

    pub fn overlap_circle(
        &self,
        registry: &ColliderRegistry,
        center: V2,
        radius: f64,
    ) -> Option<ColliderHandle> {
        let circle = Circle::new(center, radius).ok()?;
        self.overlap_shape(registry, &circle.into())
    }

    pub fn overlap_circle_all(
        &self,
        registry: &ColliderRegistry,
        center: V2,
        radius: f64,
    ) -> Vec<ColliderHandle> {
        match Circle::new(center, radius) {
            Ok(circle) => self.overlap_shape_all(registry, &circle.into()),
            Err(_) => vec![],
        }
    }

    /// `angle` rotates the rectangle about its center, in radians.
    pub fn overlap_rect(
        &self,
        registry: &ColliderRegistry,
        center: V2,
        size: V2,
        angle: f64,
    ) -> Option<ColliderHandle> {
        let rect = AxisRect::with_angle(center, size, angle).ok()?;
        self.overlap_shape(registry, &rect.into())
    }

    pub fn overlap_rect_all(
        &self,
        registry: &ColliderRegistry,
        center: V2,
        size: V2,
        angle: f64,
    ) -> Vec<ColliderHandle> {
        match AxisRect::with_angle(center, size, angle) {
            Ok(rect) => self.overlap_shape_all(registry, &rect.into()),
            Err(_) => vec![],
        }
    }

    /// The capsule's axis runs along the larger of the two size components
    /// before rotating by `angle`.
    pub fn overlap_capsule(
        &self,
        registry: &ColliderRegistry,
        center: V2,
        size: V2,
        angle: f64,
    ) -> Option<ColliderHandle> {
        let capsule = Capsule::with_angle(center, size, angle).ok()?;
        self.overlap_shape(registry, &capsule.into())
    }

    pub fn overlap_capsule_all(
        &self,
        registry: &ColliderRegistry,
        center: V2,
        size: V2,
        angle: f64,
    ) -> Vec<ColliderHandle> {
        match Capsule::with_angle(center, size, angle) {
            Ok(capsule) => self.overlap_shape_all(registry, &capsule.into()),
            Err(_) => vec![],
        }
    }

    fn folded_query(&self, shape: &Shape) -> Option<Shape> {
        let center = shape.get_center();
        if !center.is_finite() {
            return None;
        }
        let mut query = shape.clone();
        query.move_to(self.fold(center));
        Some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn world() -> anyhow::Result<(ToricSpace, ColliderRegistry, ColliderHandle, ColliderHandle)> {
        let space = ToricSpace::new(V2::new(10.0, 10.0))?;
        let mut reg = ColliderRegistry::new();
        let seam = reg.register(Circle::new(V2::new(4.5, 0.0), 1.0)?);
        let middle = reg.register(AxisRect::new(V2::new(0.0, 0.0), V2::new(2.0, 2.0))?);
        Ok((space, reg, seam, middle))
    }

    #[test]
    fn points() -> anyhow::Result<()> {
        let (space, reg, seam, middle) = world()?;
        assert_eq!(space.overlap_point(&reg, V2::new(0.5, 0.5)), Some(middle));
        // The circle pokes through the right edge and shows up on the left.
        assert_eq!(space.overlap_point(&reg, V2::new(-4.8, 0.0)), Some(seam));
        // Same point, a few tiles away.
        assert_eq!(space.overlap_point(&reg, V2::new(25.2, 20.0)), Some(seam));
        assert_eq!(space.overlap_point(&reg, V2::new(2.0, 3.0)), None);
        assert_eq!(space.overlap_point_all(&reg, V2::new(f64::NAN, 0.0)), vec![]);
        Ok(())
    }

    #[test]
    fn circles_across_the_seam() -> anyhow::Result<()> {
        let (space, reg, seam, middle) = world()?;
        assert_eq!(space.overlap_circle(&reg, V2::new(-4.5, 0.0), 0.2), Some(seam));
        assert_eq!(
            space.overlap_circle_all(&reg, V2::new(2.5, 0.0), 1.6),
            vec![seam, middle]
        );
        assert_eq!(space.overlap_circle(&reg, V2::new(0.0, 4.0), -1.0), None);
        Ok(())
    }

    #[test]
    fn rects_and_capsules() -> anyhow::Result<()> {
        let (space, reg, seam, middle) = world()?;
        assert_eq!(
            space.overlap_rect_all(&reg, V2::new(0.0, 2.5), V2::new(1.0, 4.0), 0.0),
            vec![middle]
        );
        // Rotated a quarter turn it no longer reaches down to the rect.
        assert_eq!(
            space.overlap_rect(&reg, V2::new(0.0, 2.5), V2::new(1.0, 4.0), std::f64::consts::FRAC_PI_2),
            None
        );
        // A long horizontal capsule wrapping around the whole tile.
        assert_eq!(
            space.overlap_capsule_all(&reg, V2::new(-2.5, 0.0), V2::new(8.0, 1.0), 0.0),
            vec![seam, middle]
        );
        assert_eq!(
            space.overlap_capsule(&reg, V2::new(0.0, 4.0), V2::new(0.0, 0.0), 0.0),
            None
        );
        Ok(())
    }

    #[test]
    fn query_shapes_are_folded() -> anyhow::Result<()> {
        let (space, reg, _, middle) = world()?;
        let far: Shape = Circle::new(V2::new(30.0, -40.5), 1.0)?.into();
        assert_eq!(space.overlap_shape_all(&reg, &far), vec![middle]);
        Ok(())
    }
}
