/// Scene state driven by viewer commands
use frame3d_core::{Camera, ProjectionMode, Transform};

use crate::config::ViewerConfig;
use crate::input::{Axis, ViewerCommand};
use crate::wireframe::Wireframe;

/// A camera looking at one model.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub camera: Camera,
    pub model: Transform,
    pub wireframe: Wireframe,
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(config: ViewerConfig, wireframe: Wireframe) -> Self {
        Self {
            camera: Camera::from_settings(&config.camera),
            model: Transform::IDENTITY,
            wireframe,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Apply one command. Returns `false` once the viewer should stop.
    pub fn apply(&mut self, command: ViewerCommand) -> bool {
        let step = self.config.movement_delta;
        let turn = self.config.rotation_delta_degrees;

        match command {
            ViewerCommand::MoveCamera { axis, sign } => match axis {
                Axis::Right => self.camera.move_right(sign * step),
                Axis::Up => self.camera.move_up(sign * step),
                Axis::Back => self.camera.move_back(sign * step),
            },
            ViewerCommand::TurnCamera { axis, sign } => match axis {
                Axis::Right => self.camera.pitch(sign * turn),
                Axis::Up => self.camera.yaw(sign * turn),
                Axis::Back => self.camera.roll(sign * turn),
            },
            ViewerCommand::ResetCamera => self.camera.reset_pose(),
            ViewerCommand::Projection(mode) => self.set_projection(mode),
            ViewerCommand::Zoom { sign } => {
                let changed = self.camera.zoom(
                    sign * self.config.fov_step_degrees,
                    self.config.fov_min_degrees,
                    self.config.fov_max_degrees,
                );
                if !changed {
                    log::debug!("zoom clamped at fov {}", self.camera.fov());
                }
            }
            ViewerCommand::MoveModel { axis, sign } => match axis {
                Axis::Right => self.model.move_right(sign * step),
                Axis::Up => self.model.move_up(sign * step),
                Axis::Back => self.model.move_back(sign * step),
            },
            ViewerCommand::TurnModel { axis, sign } => match axis {
                Axis::Right => self.model.pitch(sign * turn),
                Axis::Up => self.model.yaw(sign * turn),
                Axis::Back => self.model.roll(sign * turn),
            },
            ViewerCommand::ScaleModel(factor) => self.model.scale_world(factor),
            ViewerCommand::Quit => return false,
        }
        true
    }

    /// Advance idle animation by one frame.
    pub fn update(&mut self) {
        let spin = self.config.spin_degrees_per_frame;
        if spin != 0.0 {
            self.model.yaw(spin);
        }
    }

    fn set_projection(&mut self, mode: ProjectionMode) {
        match mode {
            ProjectionMode::SymmetricPerspective => self.camera.apply_fov(),
            ProjectionMode::AsymmetricPerspective => {
                let f = self.config.asymmetric_frustum;
                self.camera
                    .set_projection_asymmetric_perspective(f.left, f.right, f.bottom, f.top, f.near, f.far);
            }
            ProjectionMode::Orthographic => {
                let f = self.config.orthographic_frustum;
                self.camera
                    .set_projection_orthographic(f.left, f.right, f.bottom, f.top, f.near, f.far);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame3d_core::{Matrix4, Vector3};

    fn viewer() -> Viewer {
        Viewer::new(ViewerConfig::default(), Wireframe::cube(2.0))
    }

    #[test]
    fn test_move_camera() {
        let mut viewer = viewer();
        assert!(viewer.apply(ViewerCommand::MoveCamera { axis: Axis::Back, sign: -1.0 }));
        assert_eq!(viewer.camera.position(), Vector3::new(0.0, 0.0, 11.5));
        assert!(viewer.camera.is_view_stale());
    }

    #[test]
    fn test_reset_camera() {
        let mut viewer = viewer();
        viewer.apply(ViewerCommand::TurnCamera { axis: Axis::Up, sign: 1.0 });
        viewer.apply(ViewerCommand::MoveCamera { axis: Axis::Right, sign: 1.0 });
        viewer.apply(ViewerCommand::ResetCamera);
        assert_eq!(viewer.camera.world(), Camera::default().world());
    }

    #[test]
    fn test_projection_presets() {
        let mut viewer = viewer();
        viewer.apply(ViewerCommand::Projection(ProjectionMode::Orthographic));
        assert_eq!(viewer.camera.projection_mode(), ProjectionMode::Orthographic);
        assert_eq!(
            viewer.camera.projection_matrix(),
            Matrix4::orthographic(-20.0, 20.0, -15.0, 15.0, 0.01, 100.0)
        );

        viewer.apply(ViewerCommand::Projection(ProjectionMode::SymmetricPerspective));
        assert_eq!(
            viewer.camera.projection_matrix(),
            Matrix4::perspective(60.0, 16.0 / 9.0, 0.01, 90.0)
        );
    }

    #[test]
    fn test_zoom_stops_at_bounds() {
        let mut config = ViewerConfig::default();
        config.fov_step_degrees = 30.0;
        let mut viewer = Viewer::new(config, Wireframe::new());

        viewer.apply(ViewerCommand::Zoom { sign: 1.0 });
        assert_eq!(viewer.camera.fov(), 90.0);
        viewer.apply(ViewerCommand::Zoom { sign: 1.0 });
        assert_eq!(viewer.camera.fov(), 90.0);
        viewer.apply(ViewerCommand::Zoom { sign: -1.0 });
        assert_eq!(viewer.camera.fov(), 60.0);
    }

    #[test]
    fn test_model_commands() {
        let mut viewer = viewer();
        viewer.apply(ViewerCommand::MoveModel { axis: Axis::Up, sign: 1.0 });
        viewer.apply(ViewerCommand::ScaleModel(2.0));
        assert_eq!(viewer.model.position(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(viewer.model.transform_point(Vector3::UNIT_X), Vector3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_quit() {
        assert!(!viewer().apply(ViewerCommand::Quit));
    }
}
