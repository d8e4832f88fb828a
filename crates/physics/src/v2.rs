//! A 2-dimensional vector/point.
use num::Num;

/// A 2D vector, also used for points.
///
/// The geometry in this crate works on `V2<f64>`, which is what a bare `V2` names.
#[derive(Debug, Copy, Clone, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct V2<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T: Num> V2<T> {
    pub const fn new(x: T, y: T) -> Self {
        V2 { x, y }
    }
}

impl<T> V2<T>
where
    T: Num + Copy,
    f64: From<T>,
{
    pub fn length_squared(&self) -> f64 {
        let x: f64 = self.x.into();
        let y: f64 = self.y.into();
        x * x + y * y
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Normalize the vector.  Produces NaNs for the zero vector; use
    /// [V2::try_normalize] when the input can be degenerate.
    #[must_use = "This function doesn't modify the vector in place"]
    pub fn normalize(self) -> V2<f64> {
        let l = self.length();
        V2 {
            x: f64::from(self.x) / l,
            y: f64::from(self.y) / l,
        }
    }

    pub fn dot(&self, other: &V2<T>) -> f64 {
        let sx: f64 = self.x.into();
        let sy: f64 = self.y.into();
        let ox: f64 = other.x.into();
        let oy: f64 = other.y.into();

        sx * ox + sy * oy
    }

    /// The z component of the 3D cross product of the two vectors.
    pub fn cross(&self, other: &V2<T>) -> f64 {
        let sx: f64 = self.x.into();
        let sy: f64 = self.y.into();
        let ox: f64 = other.x.into();
        let oy: f64 = other.y.into();

        sx * oy - sy * ox
    }

    pub fn distance_squared(&self, other: &V2<T>) -> f64 {
        let x1: f64 = self.x.into();
        let y1: f64 = self.y.into();
        let x2: f64 = other.x.into();
        let y2: f64 = other.y.into();
        (x2 - x1).powi(2) + (y2 - y1).powi(2)
    }

    pub fn distance(&self, other: &V2<T>) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl V2<f64> {
    pub const ZERO: V2 = V2 { x: 0.0, y: 0.0 };

    /// Normalize, or `None` if the vector is too short to have a direction.
    pub fn try_normalize(self) -> Option<V2> {
        let l = self.length();
        if l <= f64::EPSILON || !l.is_finite() {
            return None;
        }
        Some(self / l)
    }

    /// Normalize, falling back to `fallback` for degenerate vectors.
    #[must_use = "This function doesn't modify the vector in place"]
    pub fn normalize_or(self, fallback: V2) -> V2 {
        self.try_normalize().unwrap_or(fallback)
    }

    /// The vector rotated a quarter turn counterclockwise.  Not normalized.
    #[must_use = "This function doesn't modify the vector in place"]
    pub fn perpendicular(self) -> V2 {
        V2::new(-self.y, self.x)
    }

    /// Rotate counterclockwise by `angle` radians around the origin.
    #[must_use = "This function doesn't modify the vector in place"]
    pub fn rotate(self, angle: f64) -> V2 {
        let (sin, cos) = angle.sin_cos();
        V2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotate counterclockwise by `angle` radians around `pivot`.
    #[must_use = "This function doesn't modify the vector in place"]
    pub fn rotate_around(self, pivot: V2, angle: f64) -> V2 {
        pivot + (self - pivot).rotate(angle)
    }

    /// Angle of the vector relative to the positive x axis, in `(-pi, pi]`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn midpoint(self, other: V2) -> V2 {
        V2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Multiply component-wise.
    #[must_use = "This function doesn't modify the vector in place"]
    pub fn component_mul(self, other: V2) -> V2 {
        V2::new(self.x * other.x, self.y * other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Arithmetic mean of a set of points, or `None` if there are none.
    pub fn mean<'a>(points: impl IntoIterator<Item = &'a V2>) -> Option<V2> {
        let (sum, count) = points
            .into_iter()
            .fold((V2::ZERO, 0usize), |(sum, count), p| (sum + *p, count + 1));
        if count == 0 {
            return None;
        }
        Some(sum / count as f64)
    }
}

impl<T: Num> std::ops::Add for V2<T> {
    type Output = V2<T>;

    fn add(self, rhs: V2<T>) -> V2<T> {
        V2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T: Num + Copy> std::ops::AddAssign for V2<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x = self.x + rhs.x;
        self.y = self.y + rhs.y;
    }
}

impl<T: Copy> std::ops::Mul<f64> for V2<T>
where
    f64: From<T>,
{
    type Output = V2<f64>;

    fn mul(self, rhs: f64) -> Self::Output {
        V2 {
            x: f64::from(self.x) * rhs,
            y: f64::from(self.y) * rhs,
        }
    }
}

impl std::ops::MulAssign<f64> for V2<f64> {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl<T: Copy> std::ops::Div<f64> for V2<T>
where
    f64: From<T>,
{
    type Output = V2<f64>;

    fn div(self, rhs: f64) -> Self::Output {
        V2 {
            x: f64::from(self.x) / rhs,
            y: f64::from(self.y) / rhs,
        }
    }
}

impl<T: std::ops::Neg> std::ops::Neg for V2<T> {
    type Output = V2<<T as std::ops::Neg>::Output>;

    fn neg(self) -> Self::Output {
        V2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<T: Num> std::ops::Sub for V2<T> {
    type Output = V2<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        V2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<T: Num + Copy> std::ops::SubAssign for V2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x = self.x - rhs.x;
        self.y = self.y - rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::*;

    #[test]
    fn integer_vectors_measure_in_f64() {
        let v = V2::new(3i32, 4i32);
        assert_relative_eq!(v.length(), 5.0);
        assert_relative_eq!(v.dot(&V2::new(1, 0)), 3.0);
        assert_relative_eq!(v.cross(&V2::new(1, 0)), -4.0);
    }

    #[test]
    fn rotation() {
        let v = V2::new(1.0, 0.0).rotate(std::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);

        let p = V2::new(2.0, 1.0).rotate_around(V2::new(1.0, 1.0), std::f64::consts::PI);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_normalization() {
        assert!(V2::ZERO.try_normalize().is_none());
        assert_eq!(V2::ZERO.normalize_or(V2::new(0.0, 1.0)), V2::new(0.0, 1.0));
        let n = V2::new(0.0, -3.0).normalize_or(V2::ZERO);
        assert_relative_eq!(n.y, -1.0);
    }

    #[test]
    fn mean_of_points() {
        let points = [V2::new(-1.0, 0.0), V2::new(1.0, 0.0), V2::new(0.0, 3.0)];
        let m = V2::mean(&points).expect("Non-empty");
        assert_relative_eq!(m.x, 0.0);
        assert_relative_eq!(m.y, 1.0);
        assert!(V2::mean(&[]).is_none());
    }
}
