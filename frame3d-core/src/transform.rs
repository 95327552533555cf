/// Affine coordinate frames: orientation/scale plus position
use std::fmt;
use std::ops::{Mul, MulAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::vector3::Vector3;
use crate::vector4::Vector4;

/// An affine frame mapping local points to world space as
/// `rot_scale * p + position`.
///
/// "Local" operations right-multiply the orientation (they act in the
/// frame's own axes); "world" operations left-multiply it and also carry
/// the position along, so they act about the world origin.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Transform {
    rot_scale: Matrix3,
    position: Vector3,
}

impl Transform {
    pub const IDENTITY: Self = Self::new(Matrix3::IDENTITY, Vector3::ZERO);

    pub const fn new(orientation: Matrix3, position: Vector3) -> Self {
        Self {
            rot_scale: orientation,
            position,
        }
    }

    pub fn from_position(position: Vector3) -> Self {
        Self::new(Matrix3::IDENTITY, position)
    }

    /// Identity orientation, origin position.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// See [`Matrix3::orthonormalize`]; `back` is kept, roll is lost.
    pub fn orthonormalize(&mut self) {
        self.rot_scale.orthonormalize();
    }

    /// Homogeneous 4x4 form with columns (right, 0), (up, 0), (back, 0),
    /// (position, 1).
    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_columns(
            Vector4::extend(self.rot_scale.right(), 0.0),
            Vector4::extend(self.rot_scale.up(), 0.0),
            Vector4::extend(self.rot_scale.back(), 0.0),
            Vector4::extend(self.position, 1.0),
        )
    }

    /// Column-major 16-float layout handed to the renderer as a uniform.
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.to_matrix4().to_cols_array()
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.position.set(x, y, z);
    }

    pub fn right(&self) -> Vector3 {
        self.rot_scale.right()
    }

    pub fn up(&self) -> Vector3 {
        self.rot_scale.up()
    }

    pub fn back(&self) -> Vector3 {
        self.rot_scale.back()
    }

    pub fn orientation(&self) -> Matrix3 {
        self.rot_scale
    }

    pub fn set_orientation(&mut self, orientation: Matrix3) {
        self.rot_scale = orientation;
    }

    pub fn set_orientation_basis(&mut self, right: Vector3, up: Vector3, back: Vector3) {
        self.rot_scale = Matrix3::from_basis(right, up, back);
    }

    pub fn move_right(&mut self, distance: f32) {
        self.position += distance * self.rot_scale.right();
    }

    pub fn move_up(&mut self, distance: f32) {
        self.position += distance * self.rot_scale.up();
    }

    pub fn move_back(&mut self, distance: f32) {
        self.position += distance * self.rot_scale.back();
    }

    /// Move along a direction given in this frame's axes.
    pub fn move_local(&mut self, distance: f32, local_direction: Vector3) {
        self.position += self.rot_scale * (local_direction * distance);
    }

    /// Move along a world-space direction, ignoring orientation.
    pub fn move_world(&mut self, distance: f32, world_direction: Vector3) {
        self.position += world_direction * distance;
    }

    /// Rotate about the local right axis.
    pub fn pitch(&mut self, angle_degrees: f32) {
        self.rot_scale *= Matrix3::from_rotation_x(angle_degrees);
    }

    /// Rotate about the local up axis.
    pub fn yaw(&mut self, angle_degrees: f32) {
        self.rot_scale *= Matrix3::from_rotation_y(angle_degrees);
    }

    /// Rotate about the local back axis.
    pub fn roll(&mut self, angle_degrees: f32) {
        self.rot_scale *= Matrix3::from_rotation_z(angle_degrees);
    }

    pub fn rotate_local(&mut self, angle_degrees: f32, axis: Vector3) {
        self.rot_scale *= Matrix3::from_angle_axis(angle_degrees, axis);
    }

    /// Rotate the whole frame, position included, about a world axis
    /// through the origin.
    pub fn rotate_world(&mut self, angle_degrees: f32, axis: Vector3) {
        let rotation = Matrix3::from_angle_axis(angle_degrees, axis);
        self.rot_scale = rotation * self.rot_scale;
        self.position = rotation * self.position;
    }

    /// Replace the orientation (and any scale) with the world axes.
    pub fn align_with_world_y(&mut self) {
        self.rot_scale = Matrix3::IDENTITY;
    }

    pub fn scale_local(&mut self, scale: f32) {
        self.rot_scale *= Matrix3::from_uniform_scale(scale);
    }

    pub fn scale_local_xyz(&mut self, scale_x: f32, scale_y: f32, scale_z: f32) {
        self.rot_scale *= Matrix3::from_scale(scale_x, scale_y, scale_z);
    }

    /// Scale about the world origin; the position scales too.
    pub fn scale_world(&mut self, scale: f32) {
        self.apply_world(Matrix3::from_uniform_scale(scale));
    }

    pub fn scale_world_xyz(&mut self, scale_x: f32, scale_y: f32, scale_z: f32) {
        self.apply_world(Matrix3::from_scale(scale_x, scale_y, scale_z));
    }

    pub fn shear_local_x_by_yz(&mut self, shear_y: f32, shear_z: f32) {
        self.rot_scale *= Matrix3::from_shear_x_by_yz(shear_y, shear_z);
    }

    pub fn shear_local_y_by_xz(&mut self, shear_x: f32, shear_z: f32) {
        self.rot_scale *= Matrix3::from_shear_y_by_xz(shear_x, shear_z);
    }

    pub fn shear_local_z_by_xy(&mut self, shear_x: f32, shear_y: f32) {
        self.rot_scale *= Matrix3::from_shear_z_by_xy(shear_x, shear_y);
    }

    /// Invert a rigid (rotation + translation) frame in place.
    ///
    /// Any scale or shear in the orientation makes the result wrong.
    pub fn invert_rt(&mut self) {
        self.rot_scale.invert_rotation();
        self.position = self.rot_scale * -self.position;
    }

    /// `self = self * other`: `other` is applied first.
    pub fn combine(&mut self, other: &Transform) {
        self.position += self.rot_scale * other.position;
        self.rot_scale *= other.rot_scale;
    }

    /// Map a local point to world space.
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.rot_scale * point + self.position
    }

    /// Map a local direction to world space; position is ignored.
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        self.rot_scale * direction
    }

    fn apply_world(&mut self, m: Matrix3) {
        self.rot_scale = m * self.rot_scale;
        self.position = m * self.position;
    }
}

impl MulAssign<&Transform> for Transform {
    fn mul_assign(&mut self, rhs: &Transform) {
        self.combine(rhs);
    }
}

impl MulAssign for Transform {
    fn mul_assign(&mut self, rhs: Transform) {
        self.combine(&rhs);
    }
}

impl Mul for Transform {
    type Output = Self;

    fn mul(mut self, rhs: Self) -> Self {
        self.combine(&rhs);
        self
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.rot_scale == other.rot_scale && self.position == other.position
    }
}

impl AbsDiffEq for Transform {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.rot_scale.abs_diff_eq(&other.rot_scale, epsilon)
            && self.position.abs_diff_eq(&other.position, epsilon)
    }
}

impl RelativeEq for Transform {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.rot_scale.relative_eq(&other.rot_scale, epsilon, max_relative)
            && self.position.relative_eq(&other.position, epsilon, max_relative)
    }
}

/// Row-major 4x4 printout: each orientation row followed by its position
/// component, then the constant bottom row.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rot_scale.transposed();
        writeln!(f, "{}      {:.2}", rows.right(), self.position.x)?;
        writeln!(f, "{}      {:.2}", rows.up(), self.position.y)?;
        writeln!(f, "{}      {:.2}", rows.back(), self.position.z)?;
        writeln!(f, "      0.00      0.00      0.00      1.00")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame_a() -> Transform {
        let mut t = Transform::from_position(Vector3::new(1.0, 2.0, 3.0));
        t.yaw(40.0);
        t.pitch(-15.0);
        t
    }

    fn frame_b() -> Transform {
        let mut t = Transform::from_position(Vector3::new(-4.0, 0.5, 2.0));
        t.roll(70.0);
        t.rotate_local(25.0, Vector3::new(1.0, 1.0, 0.0));
        t
    }

    #[test]
    fn test_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.orientation(), Matrix3::IDENTITY);
        assert_eq!(t.position(), Vector3::ZERO);
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_reset() {
        let mut t = frame_a();
        t.scale_local(3.0);
        t.reset();
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_cols_array_layout() {
        let t = Transform::new(
            Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0),
            Vector3::new(10.0, 11.0, 12.0),
        );
        assert_eq!(
            t.to_cols_array(),
            [1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0, 9.0, 0.0, 10.0, 11.0, 12.0, 1.0]
        );
        assert_eq!(t.to_matrix4().translation(), Vector4::new(10.0, 11.0, 12.0, 1.0));
    }

    #[test]
    fn test_position_setters() {
        let mut t = Transform::default();
        t.set_position_xyz(1.0, -1.0, 2.0);
        assert_eq!(t.position(), Vector3::new(1.0, -1.0, 2.0));
        t.set_position(Vector3::splat(7.0));
        assert_eq!(t.position(), Vector3::splat(7.0));
    }

    #[test]
    fn test_moves_follow_local_axes() {
        let mut t = Transform::default();
        t.yaw(90.0);
        assert_eq!(t.right(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(t.back(), Vector3::new(1.0, 0.0, 0.0));

        t.move_back(2.0);
        assert_eq!(t.position(), Vector3::new(2.0, 0.0, 0.0));
        t.move_right(1.0);
        assert_eq!(t.position(), Vector3::new(2.0, 0.0, -1.0));
        t.move_up(-0.5);
        assert_eq!(t.position(), Vector3::new(2.0, -0.5, -1.0));
    }

    #[test]
    fn test_move_local_versus_world() {
        let mut local = Transform::default();
        local.roll(90.0);
        local.move_local(2.0, Vector3::UNIT_X);
        assert_eq!(local.position(), Vector3::new(0.0, 2.0, 0.0));

        let mut world = Transform::default();
        world.roll(90.0);
        world.move_world(2.0, Vector3::UNIT_X);
        assert_eq!(world.position(), Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_local_rotations_right_multiply() {
        let mut t = frame_b();
        let before = t.orientation();
        t.pitch(30.0);
        assert_eq!(t.orientation(), before * Matrix3::from_rotation_x(30.0));

        let mut u = frame_b();
        u.rotate_local(30.0, Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(u.orientation(), t.orientation());
        assert_eq!(u.position(), frame_b().position());
    }

    #[test]
    fn test_rotate_world_moves_position() {
        let mut t = Transform::from_position(Vector3::new(1.0, 0.0, 0.0));
        t.rotate_world(90.0, Vector3::UNIT_Y);
        assert_eq!(t.position(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(t.orientation(), Matrix3::from_rotation_y(90.0));
    }

    #[test]
    fn test_align_with_world_y() {
        let mut t = frame_a();
        let position = t.position();
        t.align_with_world_y();
        assert_eq!(t.orientation(), Matrix3::IDENTITY);
        assert_eq!(t.position(), position);
    }

    #[test]
    fn test_scale_local_and_world() {
        let mut local = Transform::from_position(Vector3::new(1.0, 2.0, 3.0));
        local.scale_local_xyz(2.0, 3.0, 4.0);
        assert_eq!(local.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            local.transform_point(Vector3::splat(1.0)),
            Vector3::new(3.0, 5.0, 7.0)
        );

        let mut world = Transform::from_position(Vector3::new(1.0, 2.0, 3.0));
        world.scale_world(2.0);
        assert_eq!(world.position(), Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(world.orientation(), Matrix3::from_uniform_scale(2.0));

        world.scale_world_xyz(1.0, 0.5, 1.0);
        assert_eq!(world.position(), Vector3::new(2.0, 2.0, 6.0));
    }

    #[test]
    fn test_shear_local() {
        let mut t = Transform::default();
        t.shear_local_x_by_yz(5.0, 2.25);
        assert_eq!(t.transform_direction(Vector3::new(1.0, 2.0, 3.0)), Vector3::new(17.75, 2.0, 3.0));

        let mut t = Transform::default();
        t.shear_local_y_by_xz(1.0, 0.0);
        t.shear_local_z_by_xy(0.0, 1.0);
        assert_eq!(t.transform_direction(Vector3::new(1.0, 1.0, 1.0)), Vector3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_invert_rt() {
        let t = frame_a();
        let mut inverse = t;
        inverse.invert_rt();

        assert_relative_eq!(t * inverse, Transform::IDENTITY, epsilon = 1e-5);
        assert_relative_eq!(inverse * t, Transform::IDENTITY, epsilon = 1e-5);

        let p = Vector3::new(0.3, -7.0, 2.5);
        assert_relative_eq!(inverse.transform_point(t.transform_point(p)), p, epsilon = 1e-5);
    }

    #[test]
    fn test_combine_applies_right_operand_first() {
        let (a, b) = (frame_a(), frame_b());
        let p = Vector3::new(2.0, -1.0, 0.5);

        let ab = a * b;
        assert_relative_eq!(ab.transform_point(p), a.transform_point(b.transform_point(p)), epsilon = 1e-5);

        let mut combined = a;
        combined.combine(&b);
        assert_eq!(combined, ab);

        let mut assigned = a;
        assigned *= &b;
        assert_eq!(assigned, ab);
    }

    #[test]
    fn test_combine_is_not_commutative() {
        let (a, b) = (frame_a(), frame_b());
        assert_ne!((a * b).to_cols_array(), (b * a).to_cols_array());
        assert_ne!(a * b, b * a);
    }

    #[test]
    fn test_matrix4_matches_nalgebra_isometry() {
        let t = frame_a();
        let axis = nalgebra::Vector3::y_axis();
        let expected = nalgebra::Matrix4::new_translation(&nalgebra::Vector3::new(1.0, 2.0, 3.0))
            * nalgebra::Matrix4::from_axis_angle(&axis, 40.0_f32.to_radians())
            * nalgebra::Matrix4::from_axis_angle(&nalgebra::Vector3::x_axis(), (-15.0_f32).to_radians());
        assert_relative_eq!(t.to_matrix4(), Matrix4::from(expected), epsilon = 1e-5);
    }

    #[test]
    fn test_display() {
        let t = Transform::new(
            Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0),
            Vector3::new(10.0, 11.0, 12.5),
        );
        let expected = "      1.00      4.00      7.00      10.00\n\
                        \x20     2.00      5.00      8.00      11.00\n\
                        \x20     3.00      6.00      9.00      12.50\n\
                        \x20     0.00      0.00      0.00      1.00\n";
        assert_eq!(t.to_string(), expected);
    }
}
