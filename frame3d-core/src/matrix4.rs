/// Homogeneous 4x4 matrix for the rendering boundary: projections and
/// GPU-ready transforms
use std::fmt;
use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::vector4::Vector4;

/// A 4x4 column-major matrix with columns `right`, `up`, `back` and
/// `translation`.
///
/// Projection builders follow the OpenGL conventions: right-handed eye
/// space looking down -Z, depth mapped to [-1, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix4 {
    right: Vector4,
    up: Vector4,
    back: Vector4,
    translation: Vector4,
}

impl Matrix4 {
    pub const IDENTITY: Self = Self::from_columns(
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    );
    pub const ZERO: Self =
        Self::from_columns(Vector4::ZERO, Vector4::ZERO, Vector4::ZERO, Vector4::ZERO);

    pub const fn from_columns(
        right: Vector4,
        up: Vector4,
        back: Vector4,
        translation: Vector4,
    ) -> Self {
        Self {
            right,
            up,
            back,
            translation,
        }
    }

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Symmetric perspective projection from a vertical field of view.
    pub fn perspective(fov_y_degrees: f64, aspect_ratio: f64, near_z: f64, far_z: f64) -> Self {
        let mut m = Self::ZERO;
        m.set_to_perspective_projection(fov_y_degrees, aspect_ratio, near_z, far_z);
        m
    }

    /// Off-axis perspective projection from the six frustum planes.
    pub fn asymmetric_perspective(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near_z: f64,
        far_z: f64,
    ) -> Self {
        let mut m = Self::ZERO;
        m.set_to_asymmetric_perspective_projection(left, right, bottom, top, near_z, far_z);
        m
    }

    pub fn orthographic(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near_z: f64,
        far_z: f64,
    ) -> Self {
        let mut m = Self::ZERO;
        m.set_to_orthographic_projection(left, right, bottom, top, near_z, far_z);
        m
    }

    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn set_to_zero(&mut self) {
        *self = Self::ZERO;
    }

    pub fn right(&self) -> Vector4 {
        self.right
    }

    pub fn up(&self) -> Vector4 {
        self.up
    }

    pub fn back(&self) -> Vector4 {
        self.back
    }

    pub fn translation(&self) -> Vector4 {
        self.translation
    }

    /// The sixteen floats in upload order, column by column.
    pub fn to_cols_array(&self) -> [f32; 16] {
        let [r, u, b, t] = [self.right, self.up, self.back, self.translation];
        [
            r.x, r.y, r.z, r.w, u.x, u.y, u.z, u.w, b.x, b.y, b.z, b.w, t.x, t.y, t.z, t.w,
        ]
    }

    // Coefficients are computed in f64 and narrowed once.
    pub fn set_to_perspective_projection(
        &mut self,
        fov_y_degrees: f64,
        aspect_ratio: f64,
        near_z: f64,
        far_z: f64,
    ) {
        self.set_to_zero();
        let t = (fov_y_degrees / 2.0).to_radians().tan();

        self.right.x = (1.0 / (aspect_ratio * t)) as f32;
        self.up.y = (1.0 / t) as f32;
        self.back.z = ((near_z + far_z) / (near_z - far_z)) as f32;
        self.back.w = -1.0;
        self.translation.z = (2.0 * near_z * far_z / (near_z - far_z)) as f32;
    }

    pub fn set_to_asymmetric_perspective_projection(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near_z: f64,
        far_z: f64,
    ) {
        self.set_to_zero();

        self.right.x = (2.0 * near_z / (right - left)) as f32;
        self.up.y = (2.0 * near_z / (top - bottom)) as f32;
        self.back.x = ((right + left) / (right - left)) as f32;
        self.back.y = ((top + bottom) / (top - bottom)) as f32;
        self.back.z = ((near_z + far_z) / (near_z - far_z)) as f32;
        self.back.w = -1.0;
        self.translation.z = (2.0 * far_z * near_z / (near_z - far_z)) as f32;
    }

    pub fn set_to_orthographic_projection(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near_z: f64,
        far_z: f64,
    ) {
        self.set_to_zero();

        self.right.x = (2.0 / (right - left)) as f32;
        self.up.y = (2.0 / (top - bottom)) as f32;
        self.back.z = (2.0 / (near_z - far_z)) as f32;
        self.translation.x = (-(right + left) / (right - left)) as f32;
        self.translation.y = (-(top + bottom) / (top - bottom)) as f32;
        self.translation.z = ((near_z + far_z) / (near_z - far_z)) as f32;
        self.translation.w = 1.0;
    }

    /// Row `i` of the matrix.
    fn row(&self, i: usize) -> Vector4 {
        let pick = |c: Vector4| c.to_array()[i];
        Vector4::new(
            pick(self.right),
            pick(self.up),
            pick(self.back),
            pick(self.translation),
        )
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, v: Vector4) -> Vector4 {
        Vector4::new(
            self.row(0).dot(&v),
            self.row(1).dot(&v),
            self.row(2).dot(&v),
            self.row(3).dot(&v),
        )
    }
}

impl PartialEq for Matrix4 {
    fn eq(&self, other: &Self) -> bool {
        self.right == other.right
            && self.up == other.up
            && self.back == other.back
            && self.translation == other.translation
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.right.abs_diff_eq(&other.right, epsilon)
            && self.up.abs_diff_eq(&other.up, epsilon)
            && self.back.abs_diff_eq(&other.back, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.right.relative_eq(&other.right, epsilon, max_relative)
            && self.up.relative_eq(&other.up, epsilon, max_relative)
            && self.back.relative_eq(&other.back, epsilon, max_relative)
            && self
                .translation
                .relative_eq(&other.translation, epsilon, max_relative)
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..4 {
            writeln!(f, "{}", self.row(i))?;
        }
        Ok(())
    }
}
