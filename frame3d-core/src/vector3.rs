/// Three-component vector used for points, directions and basis axes
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::error::MathError;

/// Per-component tolerance used by `==` on vectors and everything built
/// from them.
pub const EQUALITY_TOLERANCE: f32 = 1e-5;

/// A 3D vector of `f32` components.
///
/// Equality is approximate: two vectors compare equal when every component
/// differs by at most [`EQUALITY_TOLERANCE`]. Exact float comparison is never
/// used for vectors, so `==` is not transitive.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components set to `xyz`.
    pub const fn splat(xyz: f32) -> Self {
        Self::new(xyz, xyz, xyz)
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    pub fn set_all(&mut self, xyz: f32) {
        self.set(xyz, xyz, xyz);
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn negate(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Euclidean norm.
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Scale to unit length in place.
    ///
    /// A zero-length vector is not guarded against and becomes NaN. Use
    /// [`Vector3::try_normalize`] when the input may be degenerate.
    pub fn normalize(&mut self) {
        let length = self.length();
        *self /= length;
    }

    /// Checked [`Vector3::normalize`]: leaves a zero-length vector untouched
    /// and reports it.
    pub fn try_normalize(&mut self) -> Result<(), MathError> {
        let length = self.length();
        if length == 0.0 {
            return Err(MathError::ZeroLength);
        }
        *self /= length;
        Ok(())
    }

    /// Unit-length copy of this vector, same caveats as `normalize`.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Angle to `other` in radians. NaN if either vector has zero length.
    pub fn angle_between(&self, other: &Self) -> f32 {
        let denominator = self.length() * other.length();
        (self.dot(other) / denominator).acos()
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= EQUALITY_TOLERANCE
            && (self.y - other.y).abs() <= EQUALITY_TOLERANCE
            && (self.z - other.z).abs() <= EQUALITY_TOLERANCE
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, scalar: f32) {
        self.x /= scalar;
        self.y /= scalar;
        self.z /= scalar;
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(mut self, scalar: f32) -> Self {
        self *= scalar;
        self
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    fn div(mut self, scalar: f32) -> Self {
        self /= scalar;
        self
    }
}

/// Fixed notation, two decimals, each component right-aligned in ten columns.
impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:10.2}{:10.2}{:10.2}", self.x, self.y, self.z)
    }
}
