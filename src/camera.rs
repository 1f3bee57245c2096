//! Perspective camera with lazily cached matrices.
//!
//! # Coordinate System
//!
//! Right-handed, Y up, camera looking down **negative Z**. Orientation is
//! stored as Euler angles in radians:
//!
//! - **Pitch**: rotation around X (look up/down)
//! - **Yaw**: rotation around Y (look left/right)
//! - **Roll**: rotation around Z (tilt)
//!
//! # Caching
//!
//! The view, projection, and combined view-projection matrices are cached
//! behind two dirty bits. Mutators that move or rotate the camera mark the
//! view dirty; mutators that change the projection parameters mark the
//! projection dirty. The cached fields are only reachable through accessors
//! that reconcile them first, so observed state always equals a fresh
//! recompute.

use crate::math::{Mat4, Vec3, Vec4};

/// A 3D camera with position, Euler orientation, and perspective projection.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    pitch: f64,
    yaw: f64,
    roll: f64,

    fov: f64,
    aspect: f64,
    near: f64,
    far: f64,

    view: Mat4,
    proj: Mat4,
    view_proj: Mat4,
    view_dirty: bool,
    proj_dirty: bool,
}

/// Pitch limit keeping the view axis off the world up axis.
const MAX_PITCH: f64 = std::f64::consts::FRAC_PI_2 - 0.01;

impl Camera {
    /// Creates a camera with default settings: positioned at (0, 10, 0)
    /// looking down negative Z, 60 degree vertical FOV, 16:9 aspect.
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 0.0),
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            fov: std::f64::consts::FRAC_PI_3,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            view: Mat4::identity(),
            proj: Mat4::identity(),
            view_proj: Mat4::identity(),
            view_dirty: true,
            proj_dirty: true,
        }
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.view_dirty = true;
    }

    /// Sets the orientation (pitch, yaw, roll in radians).
    pub fn set_rotation(&mut self, pitch: f64, yaw: f64, roll: f64) {
        self.pitch = pitch;
        self.yaw = yaw;
        self.roll = roll;
        self.view_dirty = true;
    }

    /// Sets the vertical field of view in radians.
    pub fn set_fov(&mut self, fov: f64) {
        self.fov = fov;
        self.proj_dirty = true;
    }

    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
        self.proj_dirty = true;
    }

    pub fn set_clip_planes(&mut self, near: f64, far: f64) {
        self.near = near;
        self.far = far;
        self.proj_dirty = true;
    }

    /// Moves the camera along its forward direction.
    pub fn move_forward(&mut self, distance: f64) {
        self.position = self.position + self.forward() * distance;
        self.view_dirty = true;
    }

    /// Moves the camera along its right direction (strafe).
    pub fn move_right(&mut self, distance: f64) {
        self.position = self.position + self.right() * distance;
        self.view_dirty = true;
    }

    /// Moves the camera along the world up axis.
    pub fn move_up(&mut self, distance: f64) {
        self.position = self.position + Vec3::UP * distance;
        self.view_dirty = true;
    }

    /// Rotates the camera by the given angle deltas (radians). Pitch is
    /// clamped just short of straight up/down to avoid gimbal-lock numerics.
    pub fn rotate(&mut self, delta_pitch: f64, delta_yaw: f64, delta_roll: f64) {
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
        self.yaw += delta_yaw;
        self.roll += delta_roll;
        self.view_dirty = true;
    }

    /// Points the camera at a world position, zeroing roll.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize();
        self.pitch = dir.y.asin();
        self.yaw = (-dir.x).atan2(-dir.z);
        self.roll = 0.0;
        self.view_dirty = true;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    /// The forward direction (negative Z rotated by yaw and pitch).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// The right direction (horizontal, unaffected by pitch).
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// The up direction, completing the basis.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    // =========================================================================
    // Matrices
    // =========================================================================

    /// Returns the view matrix, recomputing it if stale.
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.view_dirty {
            // View = inverse orientation, then inverse translation.
            self.view = Mat4::rotation_z(-self.roll)
                * Mat4::rotation_x(-self.pitch)
                * Mat4::rotation_y(-self.yaw)
                * Mat4::translation(-self.position);
            self.view_dirty = false;
        }
        self.view
    }

    /// Returns the projection matrix, recomputing it if stale.
    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.proj_dirty {
            self.proj = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
            self.proj_dirty = false;
        }
        self.proj
    }

    /// Returns the combined view-projection matrix, recomputing it when
    /// either constituent is stale.
    pub fn view_projection_matrix(&mut self) -> Mat4 {
        if self.view_dirty || self.proj_dirty {
            let view = self.view_matrix();
            let proj = self.projection_matrix();
            self.view_proj = proj * view;
        }
        self.view_proj
    }

    /// Projects a world point to screen coordinates.
    ///
    /// Returns `(screen_x, screen_y, depth, visible)`. The point is reported
    /// invisible when it is behind the camera (clip w <= 0) or any NDC
    /// component leaves [-1, 1]. Screen Y grows downward (origin top-left).
    pub fn world_to_screen(
        &mut self,
        world_pos: Vec3,
        screen_width: usize,
        screen_height: usize,
    ) -> (f64, f64, f64, bool) {
        let clip = self.view_projection_matrix() * Vec4::from_vec3(world_pos, 1.0);

        if clip.w <= 0.0 {
            return (0.0, 0.0, 0.0, false);
        }

        let ndc = clip.perspective_divide();
        if ndc.x < -1.0
            || ndc.x > 1.0
            || ndc.y < -1.0
            || ndc.y > 1.0
            || ndc.z < -1.0
            || ndc.z > 1.0
        {
            return (0.0, 0.0, 0.0, false);
        }

        let x = (ndc.x + 1.0) * 0.5 * screen_width as f64;
        let y = (1.0 - ndc.y) * 0.5 * screen_height as f64;
        (x, y, ndc.z, true)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3, epsilon: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = epsilon);
        assert_relative_eq!(a.y, b.y, epsilon = epsilon);
        assert_relative_eq!(a.z, b.z, epsilon = epsilon);
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::new();
        assert_vec_eq(cam.forward(), Vec3::new(0.0, 0.0, -1.0), 1e-12);
        assert_vec_eq(cam.right(), Vec3::new(1.0, 0.0, 0.0), 1e-12);
        assert_vec_eq(cam.up(), Vec3::UP, 1e-12);
        assert_eq!(cam.position(), Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn yaw_turns_the_forward_vector() {
        let mut cam = Camera::new();
        cam.set_rotation(0.0, std::f64::consts::FRAC_PI_2, 0.0);
        assert_vec_eq(cam.forward(), Vec3::new(-1.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn rotate_clamps_pitch() {
        let mut cam = Camera::new();
        cam.rotate(std::f64::consts::PI, 0.0, 0.0);
        assert!(cam.pitch() < std::f64::consts::FRAC_PI_2);
        cam.rotate(-2.0 * std::f64::consts::PI, 0.0, 0.0);
        assert!(cam.pitch() > -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn look_at_derives_pitch_and_yaw() {
        let mut cam = Camera::new();
        cam.set_position(Vec3::ZERO);
        cam.look_at(Vec3::new(0.0, 0.0, -5.0));
        assert_relative_eq!(cam.pitch(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(cam.yaw(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(cam.roll(), 0.0, epsilon = 1e-12);

        cam.look_at(Vec3::new(0.0, 1.0, -1.0));
        assert!(cam.pitch() > 0.0);
    }

    #[test]
    fn view_matrix_moves_world_opposite_to_camera() {
        let mut cam = Camera::new();
        cam.set_position(Vec3::new(0.0, 0.0, 5.0));
        let view = cam.view_matrix();
        let p = view.transform_point(Vec3::ZERO);
        assert_vec_eq(p, Vec3::new(0.0, 0.0, -5.0), 1e-12);
    }

    #[test]
    fn cached_matrices_track_mutations() {
        let mut cam = Camera::new();
        let before = cam.view_projection_matrix();

        cam.set_position(Vec3::new(1.0, 2.0, 3.0));
        let after_move = cam.view_projection_matrix();
        assert_ne!(before, after_move);

        cam.set_fov(1.0);
        let after_fov = cam.view_projection_matrix();
        assert_ne!(after_move, after_fov);

        // No mutation: identical on repeated access.
        assert_eq!(after_fov, cam.view_projection_matrix());
    }

    #[test]
    fn move_forward_follows_orientation() {
        let mut cam = Camera::new();
        cam.set_position(Vec3::ZERO);
        cam.set_rotation(0.0, std::f64::consts::FRAC_PI_2, 0.0);
        cam.move_forward(2.0);
        assert_vec_eq(cam.position(), Vec3::new(-2.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn world_to_screen_centers_the_look_target() {
        let mut cam = Camera::new();
        cam.set_position(Vec3::new(0.0, 0.0, 5.0));
        cam.look_at(Vec3::ZERO);
        cam.set_aspect(1.0);

        let (x, y, depth, visible) = cam.world_to_screen(Vec3::ZERO, 100, 100);
        assert!(visible);
        assert_relative_eq!(x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(y, 50.0, epsilon = 1e-9);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn world_to_screen_rejects_points_behind_the_camera() {
        let mut cam = Camera::new();
        cam.set_position(Vec3::new(0.0, 0.0, 5.0));
        cam.look_at(Vec3::ZERO);

        let (.., visible) = cam.world_to_screen(Vec3::new(0.0, 0.0, 10.0), 100, 100);
        assert!(!visible);
    }

    #[test]
    fn world_to_screen_flips_y() {
        let mut cam = Camera::new();
        cam.set_position(Vec3::new(0.0, 0.0, 5.0));
        cam.look_at(Vec3::ZERO);
        cam.set_aspect(1.0);

        // A point above the view axis lands in the upper half of the screen.
        let (_, y, _, visible) = cam.world_to_screen(Vec3::new(0.0, 1.0, 0.0), 100, 100);
        assert!(visible);
        assert!(y < 50.0);
    }
}
