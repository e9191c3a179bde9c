use glam::Vec3;

use crate::math::Rgb;
use crate::tunables::Tunables;
use crate::types::LightUniform;

/// Parallel light shining from `position` towards `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: Rgb,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector from the surface towards the light
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).try_normalize().unwrap_or(Vec3::Y)
    }

    /// Gizmo segments: a square of `size` facing the target plus a line to it
    pub fn helper_lines(&self, size: f32) -> Vec<[Vec3; 2]> {
        let forward = -self.direction();
        let helper_up = if forward.cross(Vec3::Y).length_squared() < 1e-6 { Vec3::Z } else { Vec3::Y };
        let right = forward.cross(helper_up).normalize() * size;
        let up = right.cross(forward).normalize() * size;

        let corners = [
            self.position - right - up,
            self.position + right - up,
            self.position + right + up,
            self.position - right + up,
        ];

        let mut lines: Vec<[Vec3; 2]> = (0..4).map(|i| [corners[i], corners[(i + 1) % 4]]).collect();
        lines.push([self.position, self.target]);
        lines
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 2.0),
            target: Vec3::ZERO,
            color: Rgb::WHITE,
            intensity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            intensity: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Lighting {
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
}

impl Lighting {
    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            direction: self.directional.direction().to_array(),
            intensity: self.directional.intensity,
            color: self.directional.color.to_linear(),
            ambient_intensity: self.ambient.intensity,
            ambient_color: self.ambient.color.to_linear(),
            _pad: 0.0,
        }
    }
}

/// Binds the directional light to two tunables
#[derive(Debug, Clone)]
pub struct LightTuning {
    pub color_key: String,
    pub intensity_key: String,
}

impl LightTuning {
    pub fn apply(&self, light: &mut DirectionalLight, tunables: &Tunables) {
        if let Ok(color) = tunables.color(&self.color_key) {
            light.color = color;
        }
        if let Ok(intensity) = tunables.number(&self.intensity_key) {
            light.intensity = intensity;
        }
    }
}
