/// Camera pose, lazily cached view matrix and projection
use serde::{Deserialize, Serialize};

use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::transform::Transform;
use crate::vector3::Vector3;
use crate::vector4::Vector4;

/// Clip-space `w` at or below this is treated as behind the eye.
const MIN_CLIP_W: f32 = 1e-6;

/// Which builder produced the current projection matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    SymmetricPerspective,
    AsymmetricPerspective,
    Orthographic,
}

/// Everything needed to construct a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Eye position in world coordinates.
    pub eye: Vector3,
    /// Direction pointing backwards out of the camera, in world coordinates.
    pub back: Vector3,
    pub near: f64,
    pub far: f64,
    /// Viewport width divided by height.
    pub aspect: f64,
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: Vector3::new(0.0, 0.0, 12.0),
            back: Vector3::UNIT_Z,
            near: 0.01,
            far: 90.0,
            aspect: 16.0 / 9.0,
            fov_degrees: 60.0,
        }
    }
}

/// An eye viewing the scene.
///
/// The camera's own frame lives in `world` (right, up, back, where back
/// points away from the viewing direction). The view matrix is the rigid
/// inverse of that frame and is rebuilt lazily: pose mutators only mark it
/// stale, and [`Camera::view_matrix`] recomputes it on the next read.
#[derive(Debug, Clone)]
pub struct Camera {
    world: Transform,
    view: Transform,
    view_stale: bool,
    projection: Matrix4,
    projection_mode: ProjectionMode,
    start_eye: Vector3,
    start_back: Vector3,
    near: f64,
    far: f64,
    aspect: f64,
    fov: f64,
}

impl Camera {
    /// Build a camera at `eye` looking along `-local_back`.
    ///
    /// `local_back` does not need to be unit length. Right and up are derived
    /// by orthonormalizing around it, so it must not be parallel to world Y.
    pub fn new(
        eye: Vector3,
        local_back: Vector3,
        near: f64,
        far: f64,
        aspect: f64,
        fov_degrees: f64,
    ) -> Self {
        let mut camera = Self {
            world: Transform::from_position(eye),
            view: Transform::IDENTITY,
            view_stale: true,
            projection: Matrix4::IDENTITY,
            projection_mode: ProjectionMode::SymmetricPerspective,
            start_eye: eye,
            start_back: local_back,
            near,
            far,
            aspect,
            fov: fov_degrees,
        };
        camera.set_projection_symmetric_perspective(fov_degrees, aspect, near, far);
        camera.set_orientation_from_back(local_back);
        camera
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new(
            settings.eye,
            settings.back,
            settings.near,
            settings.far,
            settings.aspect,
            settings.fov_degrees,
        )
    }

    /// Starting pose plus the current symmetric-perspective lens.
    pub fn settings(&self) -> CameraSettings {
        CameraSettings {
            eye: self.start_eye,
            back: self.start_back,
            near: self.near,
            far: self.far,
            aspect: self.aspect,
            fov_degrees: self.fov,
        }
    }

    /// The camera's frame in world space.
    pub fn world(&self) -> Transform {
        self.world
    }

    pub fn position(&self) -> Vector3 {
        self.world.position()
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.world.set_position(position);
        self.mark_moved();
    }

    pub fn move_right(&mut self, distance: f32) {
        self.world.move_right(distance);
        self.mark_moved();
    }

    pub fn move_up(&mut self, distance: f32) {
        self.world.move_up(distance);
        self.mark_moved();
    }

    pub fn move_back(&mut self, distance: f32) {
        self.world.move_back(distance);
        self.mark_moved();
    }

    /// Counterclockwise about the camera's up axis.
    pub fn yaw(&mut self, degrees: f32) {
        self.world.yaw(degrees);
        self.mark_moved();
    }

    /// Counterclockwise about the camera's right axis.
    pub fn pitch(&mut self, degrees: f32) {
        self.world.pitch(degrees);
        self.mark_moved();
    }

    /// Counterclockwise about the camera's back axis.
    pub fn roll(&mut self, degrees: f32) {
        self.world.roll(degrees);
        self.mark_moved();
    }

    /// Return to the eye position and back direction given at construction.
    pub fn reset_pose(&mut self) {
        self.world.set_position(self.start_eye);
        self.set_orientation_from_back(self.start_back);
        self.mark_moved();
    }

    /// True when the next [`Camera::view_matrix`] call will recompute.
    pub fn is_view_stale(&self) -> bool {
        self.view_stale
    }

    /// The world-to-camera transform, rebuilt only if the pose changed since
    /// the last call.
    pub fn view_matrix(&mut self) -> Transform {
        if self.view_stale {
            let up = self.world.up();
            let back = self.world.back();
            let right = up.cross(&back);

            let mut view = Transform::from_position(self.world.position());
            view.set_orientation_basis(right, up, back / back.length());
            view.invert_rt();

            self.view = view;
            self.view_stale = false;
            log::trace!("view matrix rebuilt for eye {:?}", self.world.position());
        }
        self.view
    }

    pub fn projection_matrix(&self) -> Matrix4 {
        self.projection
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    /// Replace the projection with a symmetric perspective; also records the
    /// field of view and lens used by [`Camera::apply_fov`].
    pub fn set_projection_symmetric_perspective(
        &mut self,
        fov_degrees: f64,
        aspect: f64,
        near: f64,
        far: f64,
    ) {
        self.fov = fov_degrees;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
        self.projection
            .set_to_perspective_projection(fov_degrees, aspect, near, far);
        self.projection_mode = ProjectionMode::SymmetricPerspective;
        log::debug!(
            "symmetric perspective: fov {fov_degrees} aspect {aspect} near {near} far {far}"
        );
    }

    pub fn set_projection_asymmetric_perspective(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) {
        self.projection
            .set_to_asymmetric_perspective_projection(left, right, bottom, top, near, far);
        self.projection_mode = ProjectionMode::AsymmetricPerspective;
        log::debug!("asymmetric perspective: l {left} r {right} b {bottom} t {top} n {near} f {far}");
    }

    pub fn set_projection_orthographic(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) {
        self.projection
            .set_to_orthographic_projection(left, right, bottom, top, near, far);
        self.projection_mode = ProjectionMode::Orthographic;
        log::debug!("orthographic: l {left} r {right} b {bottom} t {top} n {near} f {far}");
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// Store a new field of view. The projection is left alone until
    /// [`Camera::apply_fov`] is called.
    pub fn set_fov(&mut self, fov_degrees: f64) {
        self.fov = fov_degrees;
    }

    /// Rebuild the symmetric perspective from the stored field of view and
    /// the last symmetric aspect ratio and clip planes.
    pub fn apply_fov(&mut self) {
        self.set_projection_symmetric_perspective(self.fov, self.aspect, self.near, self.far);
    }

    /// Change the aspect ratio, rebuilding the projection if it is the
    /// symmetric perspective.
    pub fn set_aspect_ratio(&mut self, aspect: f64) {
        self.aspect = aspect;
        if self.projection_mode == ProjectionMode::SymmetricPerspective {
            self.apply_fov();
        }
    }

    /// Widen or narrow the field of view by `delta` degrees, as long as the
    /// result stays strictly between `min` and `max`. Returns whether the
    /// projection changed.
    pub fn zoom(&mut self, delta: f64, min: f64, max: f64) -> bool {
        let fov = self.fov + delta;
        if min < fov && fov < max {
            self.set_fov(fov);
            self.apply_fov();
            true
        } else {
            false
        }
    }

    /// Take a local point of a model through model, view and projection,
    /// returning normalized device coordinates.
    ///
    /// Points at or behind the eye plane return `None`; points outside the
    /// view volume are still returned so callers can clip.
    pub fn project_to_ndc(&mut self, point: Vector3, model: &Transform) -> Option<Vector3> {
        let eye = self.view_matrix().transform_point(model.transform_point(point));
        let clip = self.projection * Vector4::extend(eye, 1.0);

        if clip.w <= MIN_CLIP_W {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Project a local point to pixel coordinates with depth, or `None` if
    /// it falls outside the view volume.
    ///
    /// Pixel coordinates lie in `[0, width) x [0, height)`, so the right and
    /// bottom edges of NDC (`x == 1`, `y == -1`) are rejected.
    pub fn project_to_screen(
        &mut self,
        point: Vector3,
        model: &Transform,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let ndc = self.project_to_ndc(point, model)?;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;
        let on_screen = |c: f32, size: u32| c >= 0.0 && c < size as f32;
        if !(on_screen(screen_x, width) && on_screen(screen_y, height)) {
            return None;
        }
        Some((screen_x, screen_y, ndc.z))
    }

    fn set_orientation_from_back(&mut self, back: Vector3) {
        self.world
            .set_orientation(Matrix3::from_up_back(Vector3::ZERO, back, false));
        self.world.orthonormalize();
    }

    fn mark_moved(&mut self) {
        self.view_stale = true;
        log::trace!("camera pose changed: eye {:?}", self.world.position());
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}
