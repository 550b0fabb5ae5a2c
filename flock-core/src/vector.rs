/// A 2D vector used for position, velocity and steering forces
///
/// Every operation is total: division by zero and normalization of the zero
/// vector both yield the zero vector instead of infinities or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            Self::zero()
        } else {
            *self / mag
        }
    }

    /// Clamps the magnitude to `max`. Vectors already within the limit are
    /// returned untouched, bit for bit.
    pub fn limit(&self, max: f32) -> Self {
        if self.magnitude() > max {
            self.normalize() * max
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    pub fn distance_squared(&self, other: &Vector2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        if scalar == 0.0 {
            return Self::zero();
        }
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2d_new() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
    }

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_vector2d_normalize() {
        let normalized = Vector2D::new(3.0, 4.0).normalize();
        assert!((normalized.x - 0.6).abs() < 1e-6);
        assert!((normalized.y - 0.8).abs() < 1e-6);
        assert!((normalized.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vector2d_normalize_zero() {
        assert_eq!(Vector2D::zero().normalize(), Vector2D::zero());
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        assert_eq!(v1 + v2, Vector2D::new(4.0, 6.0));
        assert_eq!(v2 - v1, Vector2D::new(2.0, 2.0));
        assert_eq!(v1 * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(Vector2D::new(6.0, 8.0) / 2.0, Vector2D::new(3.0, 4.0));

        let mut acc = v1;
        acc += v2;
        assert_eq!(acc, Vector2D::new(4.0, 6.0));
    }

    #[test]
    fn test_vector2d_div_by_zero() {
        assert_eq!(Vector2D::new(6.0, 8.0) / 0.0, Vector2D::zero());
        assert_eq!(Vector2D::new(6.0, 8.0) / -0.0, Vector2D::zero());
    }

    #[test]
    fn test_vector2d_limit_shrinks_long_vectors() {
        let limited = Vector2D::new(30.0, 40.0).limit(5.0);
        assert!((limited.x - 3.0).abs() < 1e-5);
        assert!((limited.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_vector2d_limit_is_exact_noop_within_bound() {
        let v = Vector2D::new(0.1, 0.2);
        let limited = v.limit(1.0);
        assert_eq!(limited.x.to_bits(), v.x.to_bits());
        assert_eq!(limited.y.to_bits(), v.y.to_bits());

        // Magnitude exactly at the bound is not clamped either
        let edge = Vector2D::new(3.0, 4.0);
        assert_eq!(edge.limit(5.0), edge);
        assert_eq!(edge.limit(5.0).limit(5.0), edge);
    }

    #[test]
    fn test_vector2d_distance() {
        let a = Vector2D::new(1.0, 1.0);
        let b = Vector2D::new(4.0, 5.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.distance_squared(&b), 25.0);
        assert_eq!(b.distance_squared(&a), 25.0);
        assert_eq!(a.distance_squared(&a), 0.0);
    }
}
