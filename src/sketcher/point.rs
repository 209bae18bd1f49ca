use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

/// A 2D vector, used both for atom positions and for intermediate directions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointF(pub f32, pub f32);
impl PointF {
    /// Unit vector pointing at `angle` radians from the x axis.
    pub fn from_angle(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self(c, s)
    }
    pub fn sq_length(self) -> f32 {
        self.0 * self.0 + self.1 * self.1
    }
    /// Euclidean length, zero for vectors too short to measure.
    pub fn length(self) -> f32 {
        let slen = self.sq_length();
        if slen > f32::EPSILON {
            slen.sqrt()
        } else {
            0.0
        }
    }
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }
    /// Scale to unit length. Zero vectors are left alone.
    pub fn normalize(&mut self) {
        let len = self.length();
        if len > f32::EPSILON {
            self.0 /= len;
            self.1 /= len;
        }
    }
    /// Normalized copy scaled to `len`. Zero vectors stay zero.
    pub fn with_length(mut self, len: f32) -> Self {
        self.normalize();
        self * len
    }
    /// Rotate counterclockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let Self(x, y) = *self;
        self.0 = x * cos - y * sin;
        self.1 = x * sin + y * cos;
    }
    pub fn rotated(mut self, angle: f32) -> Self {
        self.rotate(angle);
        self
    }
    /// Full-circle angle from the x axis, in `[0, 2π)`.
    pub fn angle(self) -> f32 {
        self.1.atan2(self.0).rem_euclid(std::f32::consts::TAU)
    }
    /// Unsigned angle between two vectors, in `[0, π]`.
    pub fn angle_to(self, other: Self) -> f32 {
        let l = (self.sq_length() * other.sq_length()).sqrt();
        if l < f32::EPSILON {
            return 0.0;
        }
        (self.dot(other) / l).clamp(-1.0, 1.0).acos()
    }
    pub fn is_finite(self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }

    pub fn dot(self, other: Self) -> f32 {
        self.0 * other.0 + self.1 * other.1
    }
    /// z component of the 3D cross product.
    pub fn cross(self, other: Self) -> f32 {
        self.0 * other.1 - self.1 * other.0
    }
}
impl Add for PointF {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }
}
impl Sub for PointF {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0, self.1 - rhs.1)
    }
}
impl Mul<f32> for PointF {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs, self.1 * rhs)
    }
}
impl Div<f32> for PointF {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self(self.0 / rhs, self.1 / rhs)
    }
}
impl Sum for PointF {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, p| acc + p)
    }
}
