/// Conversions to and from nalgebra types
use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::vector3::Vector3;
use crate::vector4::Vector4;

impl From<nalgebra::Vector3<f32>> for Vector3 {
    fn from(v: nalgebra::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Point3<f32>> for Vector3 {
    fn from(p: nalgebra::Point3<f32>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<nalgebra::Vector4<f32>> for Vector4 {
    fn from(v: nalgebra::Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for nalgebra::Vector4<f32> {
    fn from(v: Vector4) -> Self {
        nalgebra::Vector4::new(v.x, v.y, v.z, v.w)
    }
}

/// nalgebra matrices are column-major too, so columns map onto right, up and
/// back directly.
impl From<nalgebra::Matrix3<f32>> for Matrix3 {
    fn from(m: nalgebra::Matrix3<f32>) -> Self {
        Self::from_basis(
            Vector3::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]),
            Vector3::new(m[(0, 1)], m[(1, 1)], m[(2, 1)]),
            Vector3::new(m[(0, 2)], m[(1, 2)], m[(2, 2)]),
        )
    }
}

impl From<Matrix3> for nalgebra::Matrix3<f32> {
    fn from(m: Matrix3) -> Self {
        nalgebra::Matrix3::from_column_slice(&m.to_cols_array())
    }
}

impl From<nalgebra::Matrix4<f32>> for Matrix4 {
    fn from(m: nalgebra::Matrix4<f32>) -> Self {
        let column = |j: usize| Vector4::new(m[(0, j)], m[(1, j)], m[(2, j)], m[(3, j)]);
        Self::from_columns(column(0), column(1), column(2), column(3))
    }
}

impl From<Matrix4> for nalgebra::Matrix4<f32> {
    fn from(m: Matrix4) -> Self {
        nalgebra::Matrix4::from_column_slice(&m.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_round_trip() {
        let v = Vector3::new(1.5, -2.0, 0.25);
        let n: nalgebra::Vector3<f32> = v.into();
        assert_eq!((n.x, n.y, n.z), (1.5, -2.0, 0.25));
        assert_eq!(Vector3::from(n), v);
    }

    #[test]
    fn test_matrix_columns_line_up() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let n = nalgebra::Matrix3::from(m);
        assert_eq!(n[(1, 0)], 2.0);
        assert_eq!(n[(0, 1)], 4.0);

        let v = Vector3::new(0.5, -1.0, 2.0);
        let expected = Vector3::from(n * nalgebra::Vector3::from(v));
        assert_relative_eq!(m * v, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_matrix4_translation_column() {
        let n = nalgebra::Matrix4::new_translation(&nalgebra::Vector3::new(3.0, -4.0, 5.0));
        let m = Matrix4::from(n);
        assert_eq!(m.translation(), Vector4::new(3.0, -4.0, 5.0, 1.0));
        assert_eq!(nalgebra::Matrix4::from(m), n);
    }
}
