//! CPU-side mesh data for the primitive shapes.
//!
//! Meshes are generated once per shape change and shared read-only between
//! the scene (for pointer picking) and the renderer (for upload).

mod primitives;

use std::collections::HashSet;

use glam::Vec3;

use crate::math::{intersect_aabb, intersect_triangle, Ray, AABB};

pub use primitives::{box_mesh, sphere_mesh, torus_knot_mesh, torus_mesh, wobble_position};

/// Vertex layout shared by every mesh (24 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space bounds, degenerate at the origin for an empty mesh
    pub fn bounds(&self) -> AABB {
        AABB::from_points(self.vertices.iter().map(|v| Vec3::from_array(v.position)))
            .unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO))
    }

    /// Triangle corners in index order
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(self.vertices[i as usize].position))
        })
    }

    /// Line list with each shared triangle edge emitted once
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut lines = Vec::with_capacity(self.indices.len());

        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    lines.extend_from_slice(&[a, b]);
                }
            }
        }
        lines
    }

    /// Nearest hit distance along a ray given in the mesh's local space
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        let bounds = self.bounds();
        if intersect_aabb(ray.origin, ray.direction, bounds.min, bounds.max) < 0.0 {
            return None;
        }

        self.triangles()
            .filter_map(|[v0, v1, v2]| intersect_triangle(ray, v0, v1, v2))
            .min_by(|a, b| a.total_cmp(b))
    }
}
