/// Terminal wireframe viewer built on frame3d-core
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod input;
pub mod renderer;
pub mod viewer;
pub mod wireframe;

pub use config::{Config, ConfigError, Frustum, ViewerConfig};
pub use input::{key_to_command, Axis, ViewerCommand};
pub use renderer::AsciiRenderer;
pub use viewer::Viewer;
pub use wireframe::Wireframe;

/// Errors that stop the viewer.
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    viewer: Viewer,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(viewer: Viewer) -> Result<Self, ViewerError> {
        let (width, height) = terminal::size()?;
        let renderer = AsciiRenderer::new(width as usize, height as usize);

        let mut viewer = viewer;
        viewer.camera.set_aspect_ratio(renderer.aspect_ratio());

        Ok(Self {
            viewer,
            renderer,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<(), ViewerError> {
        terminal::enable_raw_mode()?;
        let result = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .map_err(ViewerError::from)
            .and_then(|()| self.main_loop());

        let cleanup = restore_terminal(&mut stdout(), terminal::disable_raw_mode);
        result.and(cleanup.map_err(ViewerError::from))
    }

    fn main_loop(&mut self) -> Result<(), ViewerError> {
        let frame_rate = self.viewer.config().frame_rate.max(1);
        let target_frame_time = Duration::from_secs(1) / frame_rate;
        log::info!("viewer running at up to {frame_rate} fps");

        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event so held keys do not queue up.
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.viewer.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(command) = key_to_command(key) {
                    log::trace!("{command:?}");
                    self.running = self.viewer.apply(command);
                }
            }
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                self.viewer.camera.set_aspect_ratio(self.renderer.aspect_ratio());
                log::debug!("resized to {width}x{height}");
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_wireframe(
            &self.viewer.wireframe,
            &self.viewer.model,
            &mut self.viewer.camera,
        );

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let camera = &self.viewer.camera;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "frame3d | FPS: {:.1} | {:?} fov {:.0} | WASDFC=Move Arrows/QE=Turn R=Reset P/[/O=Projection +/-=Zoom Esc=Quit",
                self.fps,
                camera.projection_mode(),
                camera.fov()
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}

/// Leave raw mode and the alternate screen. Both steps run even if the first
/// fails; the first error is returned.
fn restore_terminal<W: Write>(
    out: &mut W,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(out, terminal::LeaveAlternateScreen, cursor::Show);
    raw.and(screen)
}
