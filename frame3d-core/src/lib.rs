/// frame3d core library - vectors, matrices, rigid frames and a camera
///
/// Everything here is plain value math with no rendering backend. Matrices
/// are column-major and act on column vectors; a frame's columns are its
/// right, up and back axes.

pub mod camera;
pub mod error;
pub mod interop;
pub mod matrix3;
pub mod matrix4;
pub mod parse;
pub mod transform;
pub mod vector3;
pub mod vector4;

// Re-export commonly used types
pub use camera::{Camera, CameraSettings, ProjectionMode};
pub use error::{MathError, ParseVectorError};
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use parse::parse_vector3;
pub use transform::Transform;
pub use vector3::{Vector3, EQUALITY_TOLERANCE};
pub use vector4::Vector4;
