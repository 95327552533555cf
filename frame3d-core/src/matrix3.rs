/// 3x3 orientation / scale / shear matrix stored as three basis columns
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::vector3::Vector3;

/// A 3x3 matrix whose columns are the local `right`, `up` and `back` axes.
///
/// `M * v` is `right * v.x + up * v.y + back * v.z`, so products compose
/// like ordinary column-vector matrices: `(a * b) * v == a * (b * v)`.
///
/// A matrix is only a pure rotation when the three columns are orthonormal;
/// anything else (scale, shear, or a mix) is still a valid `Matrix3`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix3 {
    right: Vector3,
    up: Vector3,
    back: Vector3,
}

impl Matrix3 {
    pub const IDENTITY: Self = Self::from_basis(Vector3::UNIT_X, Vector3::UNIT_Y, Vector3::UNIT_Z);
    pub const ZERO: Self = Self::from_basis(Vector3::ZERO, Vector3::ZERO, Vector3::ZERO);

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Nine scalars taken as right, up, back in that order.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        rx: f32,
        ry: f32,
        rz: f32,
        ux: f32,
        uy: f32,
        uz: f32,
        bx: f32,
        by: f32,
        bz: f32,
    ) -> Self {
        Self::from_basis(
            Vector3::new(rx, ry, rz),
            Vector3::new(ux, uy, uz),
            Vector3::new(bx, by, bz),
        )
    }

    pub const fn from_basis(right: Vector3, up: Vector3, back: Vector3) -> Self {
        Self { right, up, back }
    }

    /// Build a frame from `up` and `back`, deriving `right = up x back`.
    ///
    /// With `make_orthonormal`, `up` is re-derived as `right x back` and all
    /// three axes are normalized. `back` keeps its direction but `up` comes
    /// out flipped, so `right x up == -back`.
    pub fn from_up_back(up: Vector3, back: Vector3, make_orthonormal: bool) -> Self {
        let mut m = Self::from_basis(up.cross(&back), up, back);
        if make_orthonormal {
            m.up = m.right.cross(&m.back);
            m.right.normalize();
            m.up.normalize();
            m.back.normalize();
        }
        m
    }

    pub fn from_uniform_scale(scale: f32) -> Self {
        Self::from_scale(scale, scale, scale)
    }

    pub fn from_scale(scale_x: f32, scale_y: f32, scale_z: f32) -> Self {
        Self::new(scale_x, 0.0, 0.0, 0.0, scale_y, 0.0, 0.0, 0.0, scale_z)
    }

    /// Shear that adds `shear_y * y + shear_z * z` to x.
    pub fn from_shear_x_by_yz(shear_y: f32, shear_z: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, shear_y, 1.0, 0.0, shear_z, 0.0, 1.0)
    }

    /// Shear that adds `shear_x * x + shear_z * z` to y.
    pub fn from_shear_y_by_xz(shear_x: f32, shear_z: f32) -> Self {
        Self::new(1.0, shear_x, 0.0, 0.0, 1.0, 0.0, 0.0, shear_z, 1.0)
    }

    /// Shear that adds `shear_x * x + shear_y * y` to z.
    pub fn from_shear_z_by_xy(shear_x: f32, shear_y: f32) -> Self {
        Self::new(1.0, 0.0, shear_x, 0.0, 1.0, shear_y, 0.0, 0.0, 1.0)
    }

    /// Counterclockwise rotation about +X.
    pub fn from_rotation_x(angle_degrees: f32) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        Self::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
    }

    /// Counterclockwise rotation about +Y.
    pub fn from_rotation_y(angle_degrees: f32) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        Self::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
    }

    /// Counterclockwise rotation about +Z.
    pub fn from_rotation_z(angle_degrees: f32) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        Self::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
    }

    /// Rodrigues rotation about an arbitrary axis. The axis does not need to
    /// be unit length, but must not be zero.
    pub fn from_angle_axis(angle_degrees: f32, axis: Vector3) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        let t = 1.0 - c;
        let Vector3 { x, y, z } = axis.normalized();

        Self::new(
            x * x * t + c,
            x * y * t + z * s,
            x * z * t - y * s,
            x * y * t - z * s,
            y * y * t + c,
            y * z * t + x * s,
            x * z * t + y * s,
            y * z * t - x * s,
            z * z * t + c,
        )
    }

    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn set_to_zero(&mut self) {
        *self = Self::ZERO;
    }

    pub fn set_to_scale(&mut self, scale: f32) {
        *self = Self::from_uniform_scale(scale);
    }

    pub fn set_to_scale_xyz(&mut self, scale_x: f32, scale_y: f32, scale_z: f32) {
        *self = Self::from_scale(scale_x, scale_y, scale_z);
    }

    pub fn set_to_shear_x_by_yz(&mut self, shear_y: f32, shear_z: f32) {
        *self = Self::from_shear_x_by_yz(shear_y, shear_z);
    }

    pub fn set_to_shear_y_by_xz(&mut self, shear_x: f32, shear_z: f32) {
        *self = Self::from_shear_y_by_xz(shear_x, shear_z);
    }

    pub fn set_to_shear_z_by_xy(&mut self, shear_x: f32, shear_y: f32) {
        *self = Self::from_shear_z_by_xy(shear_x, shear_y);
    }

    pub fn set_to_rotation_x(&mut self, angle_degrees: f32) {
        *self = Self::from_rotation_x(angle_degrees);
    }

    pub fn set_to_rotation_y(&mut self, angle_degrees: f32) {
        *self = Self::from_rotation_y(angle_degrees);
    }

    pub fn set_to_rotation_z(&mut self, angle_degrees: f32) {
        *self = Self::from_rotation_z(angle_degrees);
    }

    pub fn set_from_angle_axis(&mut self, angle_degrees: f32, axis: Vector3) {
        *self = Self::from_angle_axis(angle_degrees, axis);
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn set_right(&mut self, right: Vector3) {
        self.right = right;
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn set_up(&mut self, up: Vector3) {
        self.up = up;
    }

    pub fn back(&self) -> Vector3 {
        self.back
    }

    pub fn set_back(&mut self, back: Vector3) {
        self.back = back;
    }

    /// The viewing direction, `-back`.
    pub fn forward(&self) -> Vector3 {
        -self.back
    }

    pub fn set_forward(&mut self, forward: Vector3) {
        self.back = -forward;
    }

    /// Column-major copy: right, up, back.
    pub fn to_cols_array(&self) -> [f32; 9] {
        let (r, u, b) = (self.right, self.up, self.back);
        [r.x, r.y, r.z, u.x, u.y, u.z, b.x, b.y, b.z]
    }

    /// Invert a pure rotation by transposing it. Wrong for any matrix that
    /// carries scale or shear.
    pub fn invert_rotation(&mut self) {
        self.transpose();
    }

    /// General inverse via the adjugate.
    ///
    /// A matrix with a determinant of exactly zero is left as it is.
    pub fn invert(&mut self) {
        if let Err(err) = self.try_invert() {
            log::trace!("invert skipped: {err}");
        }
    }

    /// Checked [`Matrix3::invert`] that reports a singular matrix instead of
    /// silently keeping it.
    pub fn try_invert(&mut self) -> Result<(), MathError> {
        let determinant = self.determinant();
        if determinant == 0.0 {
            return Err(MathError::Singular { determinant });
        }

        let (r, u, b) = (self.right, self.up, self.back);
        self.right.set(
            u.y * b.z - b.y * u.z,
            b.y * r.z - r.y * b.z,
            r.y * u.z - u.y * r.z,
        );
        self.up.set(
            b.x * u.z - u.x * b.z,
            r.x * b.z - b.x * r.z,
            u.x * r.z - r.x * u.z,
        );
        self.back.set(
            u.x * b.y - b.x * u.y,
            b.x * r.y - r.x * b.y,
            r.x * u.y - u.x * r.y,
        );
        *self *= 1.0 / determinant;
        Ok(())
    }

    /// Cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let (r, u, b) = (self.right, self.up, self.back);
        let det_i = r.x * (u.y * b.z - u.z * b.y);
        let det_j = u.x * (r.y * b.z - r.z * b.y);
        let det_k = b.x * (r.y * u.z - r.z * u.y);
        det_i - det_j + det_k
    }

    pub fn transpose(&mut self) {
        let (r, u, b) = (self.right, self.up, self.back);
        self.right.set(r.x, u.x, b.x);
        self.up.set(r.y, u.y, b.y);
        self.back.set(r.z, u.z, b.z);
    }

    pub fn transposed(mut self) -> Self {
        self.transpose();
        self
    }

    /// Rebuild an orthonormal frame around the current `back` axis.
    ///
    /// `up` is reset to world +Y before `right` and `up` are re-derived, so
    /// any roll is discarded and the result degenerates (NaN) when `back` is
    /// parallel to world Y. This is a camera/object re-squaring step, not a
    /// general Gram-Schmidt.
    pub fn orthonormalize(&mut self) {
        self.up = Vector3::UNIT_Y;
        self.right = self.up.cross(&self.back);
        self.up = self.back.cross(&self.right);

        self.back.normalize();
        self.right.normalize();
        self.up.normalize();
    }

    pub fn negate(&mut self) {
        self.right.negate();
        self.up.negate();
        self.back.negate();
    }

    pub fn transform(&self, v: Vector3) -> Vector3 {
        *self * v
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix3 {
    fn eq(&self, other: &Self) -> bool {
        self.right == other.right && self.up == other.up && self.back == other.back
    }
}

impl AbsDiffEq for Matrix3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.right.abs_diff_eq(&other.right, epsilon)
            && self.up.abs_diff_eq(&other.up, epsilon)
            && self.back.abs_diff_eq(&other.back, epsilon)
    }
}

impl RelativeEq for Matrix3 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.right.relative_eq(&other.right, epsilon, max_relative)
            && self.up.relative_eq(&other.up, epsilon, max_relative)
            && self.back.relative_eq(&other.back, epsilon, max_relative)
    }
}

impl AddAssign for Matrix3 {
    fn add_assign(&mut self, rhs: Self) {
        self.right += rhs.right;
        self.up += rhs.up;
        self.back += rhs.back;
    }
}

impl SubAssign for Matrix3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.right -= rhs.right;
        self.up -= rhs.up;
        self.back -= rhs.back;
    }
}

impl MulAssign<f32> for Matrix3 {
    fn mul_assign(&mut self, scalar: f32) {
        self.right *= scalar;
        self.up *= scalar;
        self.back *= scalar;
    }
}

/// `self = self * rhs`: `rhs` is applied first.
impl MulAssign for Matrix3 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = Self::from_basis(*self * rhs.right, *self * rhs.up, *self * rhs.back);
    }
}

impl Add for Matrix3 {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sub for Matrix3 {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl Neg for Matrix3 {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

impl Mul<f32> for Matrix3 {
    type Output = Self;

    fn mul(mut self, scalar: f32) -> Self {
        self *= scalar;
        self
    }
}

impl Mul<Matrix3> for f32 {
    type Output = Matrix3;

    fn mul(self, m: Matrix3) -> Matrix3 {
        m * self
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(mut self, rhs: Self) -> Self {
        self *= rhs;
        self
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.right * v.x + self.up * v.y + self.back * v.z
    }
}

/// Prints the conventional row layout (the transpose of the stored columns).
impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.transposed();
        writeln!(f, "{}", rows.right)?;
        writeln!(f, "{}", rows.up)?;
        writeln!(f, "{}", rows.back)
    }
}
