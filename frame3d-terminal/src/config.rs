/// Viewer configuration loaded from TOML
use std::path::Path;

use frame3d_core::CameraSettings;
use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// The six planes handed to the asymmetric or orthographic builders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl Frustum {
    pub const fn new(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }
}

/// Everything the viewer reads at start-up. Missing keys fall back to
/// [`ViewerConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraSettings,
    /// Distance moved per key press, for the camera and the model.
    pub movement_delta: f32,
    /// Degrees turned per key press, for the camera and the model.
    pub rotation_delta_degrees: f32,
    /// Exclusive lower bound for zooming.
    pub fov_min_degrees: f64,
    /// Exclusive upper bound for zooming.
    pub fov_max_degrees: f64,
    pub fov_step_degrees: f64,
    pub asymmetric_frustum: Frustum,
    pub orthographic_frustum: Frustum,
    pub frame_rate: u32,
    /// Idle yaw applied to the model every frame.
    pub spin_degrees_per_frame: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            movement_delta: 0.5,
            rotation_delta_degrees: 2.0,
            fov_min_degrees: 1.0,
            fov_max_degrees: 120.0,
            fov_step_degrees: 1.0,
            asymmetric_frustum: Frustum::new(-1.0, 4.0, -7.0, 4.0, 5.0, 50.0),
            orthographic_frustum: Frustum::new(-20.0, 20.0, -15.0, 15.0, 0.01, 100.0),
            frame_rate: 30,
            spin_degrees_per_frame: 0.0,
        }
    }
}

impl Config for ViewerConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use frame3d_core::Vector3;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ViewerConfig::from_toml_str(
            r#"
            movement_delta = 1.5
            frame_rate = 60

            [camera]
            eye = { x = 0.0, y = 2.0, z = 20.0 }
            fov_degrees = 45.0

            [orthographic_frustum]
            left = -5.0
            right = 5.0
            bottom = -5.0
            top = 5.0
            near = 0.1
            far = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.movement_delta, 1.5);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.camera.eye, Vector3::new(0.0, 2.0, 20.0));
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.camera.far, 90.0);
        assert_eq!(config.orthographic_frustum, Frustum::new(-5.0, 5.0, -5.0, 5.0, 0.1, 10.0));
        assert_eq!(config.rotation_delta_degrees, 2.0);
    }

    #[test]
    fn test_parse_error() {
        let err = ViewerConfig::from_toml_str("movement_delta = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unsupported_format() {
        let err = ViewerConfig::load_from_file("viewer.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("frame3d-terminal-missing-config.toml");
        let err = ViewerConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("frame3d-terminal-load-test.toml");
        std::fs::write(&path, "fov_step_degrees = 5.0\n").unwrap();

        let config = ViewerConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.fov_step_degrees, 5.0);
    }
}
