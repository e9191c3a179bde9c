use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Vec3, Vec4};

use crate::core::{Button, Controller};
use crate::math::Ray;
use crate::types::CameraUniform;

pub const DEFAULT_FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const ZOOM_STEP: f32 = 0.95;
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 100.0;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 1e-3;

/// Camera circling a target point. Left drag orbits, right drag pans and
/// the wheel zooms when enabled.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
            fov_y: DEFAULT_FOV_Y,
            near: 0.1,
            far: 1000.0,
            aspect,
            enable_zoom: false,
            enable_pan: true,
            rotate_speed: 1.0,
        }
    }

    /// Unit vector from the target towards the eye
    pub fn offset_dir(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.offset_dir() * self.distance
    }

    pub fn forward(&self) -> Vec3 {
        -self.offset_dir()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit by a pointer drag measured in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.yaw -= TAU * dx / viewport_height * self.rotate_speed;
        self.pitch = (self.pitch + TAU * dy / viewport_height * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Slide the target in the view plane so the scene follows the pointer
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let scale = 2.0 * self.distance * (self.fov_y / 2.0).tan() / viewport_height;
        self.target += (-self.right() * dx + self.up() * dy) * scale;
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * ZOOM_STEP.powf(scroll)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Apply the drag and scroll accumulated since the last frame
    pub fn update(&mut self, input: &dyn Controller, viewport_height: f32) {
        let (dx, dy) = input.mouse_delta();

        if input.is_down(Button::MouseLeft) {
            self.orbit(dx, dy, viewport_height);
        } else if self.enable_pan && input.is_down(Button::MouseRight) {
            self.pan(dx, dy, viewport_height);
        }

        let scroll = input.scroll_delta();
        if self.enable_zoom && scroll != 0.0 {
            self.zoom(scroll);
        }
    }

    /// World-space ray through a pixel, origin at the eye
    pub fn screen_ray(&self, px: f32, py: f32, width: f32, height: f32) -> Ray {
        let ndc_x = 2.0 * px / width.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * py / height.max(1.0);

        let inverse = self.view_proj().inverse();
        let far = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far = far.truncate() / far.w;

        let eye = self.eye();
        let direction = (far - eye).try_normalize().unwrap_or(self.forward());
        Ray::new(eye, direction)
    }

    pub fn to_uniform(&self, time: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
            position: self.eye().to_array(),
            time,
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(800.0 / 600.0)
    }
}
