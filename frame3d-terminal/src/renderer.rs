/// ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use frame3d_core::{Camera, Transform, Vector3};
use std::io::Write;

use crate::wireframe::Wireframe;

/// Characters for depth cueing (nearest to farthest)
const DEPTH_RAMP: &[char] = &['@', '%', '#', '*', '+', '=', '-', ':', '.'];

/// ASCII renderer that converts wireframes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width over height of the drawing area in world units, assuming a
    /// terminal cell is twice as tall as it is wide.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f64 / (2.0 * self.height as f64)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.char_buffer[y * self.width + x])
    }

    pub fn render_wireframe(&mut self, wireframe: &Wireframe, model: &Transform, camera: &mut Camera) {
        for (start, end) in wireframe.segments() {
            self.render_edge(start, end, model, camera);
        }
    }

    fn render_edge(&mut self, start: Vector3, end: Vector3, model: &Transform, camera: &mut Camera) {
        // Edges crossing the eye plane are dropped whole.
        let (Some(a), Some(b)) = (
            camera.project_to_ndc(start, model),
            camera.project_to_ndc(end, model),
        ) else {
            return;
        };

        // Vertices just in front of the eye project far off screen.
        let Some((a, b)) = clip_segment(
            self.ndc_to_screen(a),
            self.ndc_to_screen(b),
            self.width as f32,
            self.height as f32,
        ) else {
            return;
        };
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(a + (b - a) * t);
        }
    }

    /// `x` and `y` in cells, `z` still in NDC.
    fn ndc_to_screen(&self, ndc: Vector3) -> Vector3 {
        Vector3::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
            ndc.z,
        )
    }

    fn plot(&mut self, point: Vector3) {
        if !(-1.0..=1.0).contains(&point.z) || point.x < 0.0 || point.y < 0.0 {
            return;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = y * self.width + x;
        if point.z < self.depth_buffer[idx] {
            self.depth_buffer[idx] = point.z;
            self.char_buffer[idx] = depth_char(point.z);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    '@' | '%' | '#' => Color::Cyan,
                    '*' | '+' => Color::White,
                    '=' | '-' => Color::Grey,
                    _ => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Clip a screen-space segment to `[0, width] x [0, height]`
/// (Liang-Barsky). `z` is carried along the same parameter.
fn clip_segment(a: Vector3, b: Vector3, width: f32, height: f32) -> Option<(Vector3, Vector3)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);

    for (p, q) in [(-d.x, a.x), (d.x, width - a.x), (-d.y, a.y), (d.y, height - a.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((a + d * t0, a + d * t1))
}

/// Map NDC depth in [-1, 1] onto the ramp.
fn depth_char(z: f32) -> char {
    let t = ((z + 1.0) * 0.5).clamp(0.0, 1.0);
    // NDC depth bunches up near 1 under perspective; spread it out.
    let t = t.powi(8);
    let index = (t * (DEPTH_RAMP.len() - 1) as f32).round() as usize;
    DEPTH_RAMP[index.min(DEPTH_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn drawn_cells(renderer: &AsciiRenderer) -> usize {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.char_at(x, y) != Some(' '))
            .count()
    }

    #[test]
    fn test_renders_cube_in_view() {
        let mut renderer = AsciiRenderer::new(80, 24);
        let mut camera = Camera::default();
        renderer.render_wireframe(&Wireframe::cube(4.0), &Transform::IDENTITY, &mut camera);

        assert!(drawn_cells(&renderer) > 0);
        // Screen centre is inside the cube's outline, not on it.
        assert_eq!(renderer.char_at(40, 12), Some(' '));
    }

    #[test]
    fn test_horizontal_edge_position() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut camera = Camera::default();
        camera.set_projection_orthographic(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0);

        let mut line = Wireframe::new();
        let a = line.add_vertex(Vector3::new(-4.75, 4.75, 0.0));
        let b = line.add_vertex(Vector3::new(5.25, 4.75, 0.0));
        line.add_edge(a, b);
        renderer.render_wireframe(&line, &Transform::IDENTITY, &mut camera);

        // Endpoints land on cell centres: row 5, columns 10 through 30.
        for x in 10..=30 {
            assert_ne!(renderer.char_at(x, 5), Some(' '), "column {x}");
        }
        assert_eq!(renderer.char_at(5, 5), Some(' '));
        assert_eq!(drawn_cells(&renderer), 21);
    }

    #[test]
    fn test_behind_camera_is_not_drawn() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut camera = Camera::default();
        let mut model = Transform::IDENTITY;
        model.move_back(30.0);

        renderer.render_wireframe(&Wireframe::cube(2.0), &model, &mut camera);
        assert_eq!(drawn_cells(&renderer), 0);
    }

    #[test]
    fn test_clear_and_draw() {
        let mut renderer = AsciiRenderer::new(8, 4);
        let mut camera = Camera::default();
        renderer.render_wireframe(&Wireframe::axes(5.0), &Transform::IDENTITY, &mut camera);
        renderer.clear();
        assert_eq!(drawn_cells(&renderer), 0);

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn test_clip_segment_bounds_far_endpoints() {
        let (a, b) = clip_segment(
            Vector3::new(20.0, 10.0, 0.0),
            Vector3::new(4.0e6, 10.0, 1.0),
            40.0,
            20.0,
        )
        .unwrap();
        assert_eq!(a, Vector3::new(20.0, 10.0, 0.0));
        assert_relative_eq!(b.x, 40.0, epsilon = 1e-3);
        assert_relative_eq!(b.y, 10.0, epsilon = 1e-3);
        assert!(b.z > 0.0 && b.z < 1e-4);

        assert!(clip_segment(
            Vector3::new(-5.0, -5.0, 0.0),
            Vector3::new(-1.0, 30.0, 0.0),
            40.0,
            20.0
        )
        .is_none());
    }

    #[test]
    fn test_edge_ending_at_eye_plane() {
        let mut renderer = AsciiRenderer::new(80, 24);
        let mut camera = Camera::default();

        // The second vertex sits 1e-5 in front of the eye and projects to
        // an x of roughly 5e5 in NDC.
        let mut edge = Wireframe::new();
        let a = edge.add_vertex(Vector3::ZERO);
        let b = edge.add_vertex(Vector3::new(5.0, 0.0, 12.0 - 1e-5));
        edge.add_edge(a, b);
        let ndc = camera.project_to_ndc(Vector3::new(5.0, 0.0, 12.0 - 1e-5), &Transform::IDENTITY);
        assert!(ndc.map_or(false, |p| p.x > 1.0e4));

        renderer.render_wireframe(&edge, &Transform::IDENTITY, &mut camera);
        assert!(drawn_cells(&renderer) > 0);
        assert!(drawn_cells(&renderer) <= 80);
    }

    #[test]
    fn test_depth_char_ordering() {
        assert_eq!(depth_char(-1.0), '@');
        assert_eq!(depth_char(1.0), '.');
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(AsciiRenderer::new(80, 20).aspect_ratio(), 2.0);
    }
}
