use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::config::{CameraConfig, ControlsConfig};

/// Keeps the polar angle away from the poles where `look_at` degenerates.
const POLAR_EPSILON: f32 = 1e-6;

/// Perspective camera looking at a target point with +y up.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.fov_y_degrees, aspect, config.near, config.far);
        camera.position = config.position;
        camera.target = config.target;
        camera
    }

    /// Recomputes the projection matrix. Must be called after changing the
    /// field of view, aspect ratio or clip planes.
    pub fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// Orbit-style camera controller with clamped angles.
///
/// Azimuth is measured around +y from +z towards +x, polar from +y downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3, config: &ControlsConfig) -> Self {
        Self {
            target,
            min_azimuth: config.min_azimuth_degrees.to_radians(),
            max_azimuth: config.max_azimuth_degrees.to_radians(),
            min_polar: config.min_polar_degrees.to_radians(),
            max_polar: config.max_polar_degrees.to_radians(),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
        }
    }

    /// Queues a rotation that is applied on the next [`OrbitControls::update`].
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.pending_azimuth += delta_azimuth;
        self.pending_polar += delta_polar;
    }

    /// Applies pending rotation and angle limits to the camera. Returns `true`
    /// when the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            self.pending_azimuth = 0.0;
            self.pending_polar = 0.0;
            return false;
        }

        let azimuth = offset.x.atan2(offset.z) + self.pending_azimuth;
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos() + self.pending_polar;
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;

        let azimuth = azimuth.clamp(self.min_azimuth, self.max_azimuth);
        let polar = polar
            .clamp(self.min_polar, self.max_polar)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let sin_polar = polar.sin();
        let position = self.target
            + Vec3::new(
                radius * sin_polar * azimuth.sin(),
                radius * polar.cos(),
                radius * sin_polar * azimuth.cos(),
            );

        let moved = position.distance_squared(camera.position) > 1e-12 || camera.target != self.target;
        camera.position = position;
        camera.target = self.target;
        moved
    }
}
