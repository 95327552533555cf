/// frame3d terminal viewer
///
/// Shows a wireframe cube and the world axes through a movable camera.
/// Controls:
///   - A/D, F/C, W/S: Move the camera right, up, back
///   - Arrow keys, Q/E: Yaw, pitch, roll the camera
///   - R: Reset the camera
///   - P / [ / O: Symmetric, asymmetric, orthographic projection
///   - +/-: Zoom
///   - J/L, I/K, N/M, 1-6, 7/8: Turn, move and scale the cube
///   - ESC: Quit
use std::path::PathBuf;

use clap::Parser;
use frame3d_core::Vector3;
use frame3d_terminal::{Config, TerminalApp, Viewer, ViewerConfig, ViewerError, Wireframe};

#[derive(Parser)]
#[command(version, about = "Interactive terminal wireframe viewer")]
struct Cli {
    /// TOML file with viewer settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Starting eye position, e.g. "0 2 12"
    #[arg(long, allow_hyphen_values = true)]
    eye: Option<Vector3>,
    /// Starting back direction (the camera looks the opposite way)
    #[arg(long, allow_hyphen_values = true)]
    back: Option<Vector3>,
    /// Vertical field of view in degrees
    #[arg(long)]
    fov: Option<f64>,
}

impl Cli {
    fn viewer_config(&self) -> Result<ViewerConfig, ViewerError> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load_from_file(path)?,
            None => ViewerConfig::default(),
        };

        if let Some(eye) = self.eye {
            config.camera.eye = eye;
        }
        if let Some(back) = self.back {
            config.camera.back = back;
        }
        if let Some(fov) = self.fov {
            config.camera.fov_degrees = fov;
        }
        Ok(config)
    }
}

fn main() -> Result<(), ViewerError> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.viewer_config()?;
    log::debug!("{config:?}");

    let mut scene = Wireframe::cube(4.0);
    scene.merge(&Wireframe::axes(6.0));

    let mut app = TerminalApp::new(Viewer::new(config, scene))?;
    app.run()
}
