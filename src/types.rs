use glam::Mat4;

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub time: f32, // Elapsed seconds, drives the wobble material
}

/// Directional + ambient light data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub direction: [f32; 3], // Surface-to-light, normalized
    pub intensity: f32,
    pub color: [f32; 3], // Linear
    pub ambient_intensity: f32,
    pub ambient_color: [f32; 3], // Linear
    pub _pad: f32,
}

/// Per-object draw data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],  // Linear RGB, alpha unused
    pub wobble: [f32; 4], // factor, speed, enabled (0/1), unused
}

impl ObjectUniform {
    pub fn new(model: Mat4, color: [f32; 3], wobble: Option<(f32, f32)>) -> Self {
        let (factor, speed, enabled) = match wobble {
            Some((factor, speed)) => (factor, speed, 1.0),
            None => (0.0, 0.0, 0.0),
        };

        let normal_matrix = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };

        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
            wobble: [factor, speed, enabled, 0.0],
        }
    }
}
