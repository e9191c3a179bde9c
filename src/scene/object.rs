use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::geometry::{box_mesh, sphere_mesh, torus_knot_mesh, torus_mesh, MeshData};
use crate::math::{Ray, Rgb};

/// Stable handle to an object, never reused, not even by another scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

/// Geometry descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
}

impl Shape {
    pub fn cube(size: [f32; 3]) -> Self {
        Shape::Box {
            width: size[0],
            height: size[1],
            depth: size[2],
        }
    }

    /// `[radius, tube, tubular_segments, radial_segments]` with the classic (2, 3) knot
    pub fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32) -> Self {
        Shape::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p: 2,
            q: 3,
        }
    }

    pub fn build_mesh(&self) -> MeshData {
        match *self {
            Shape::Box { width, height, depth } => box_mesh(width, height, depth),
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere_mesh(radius, width_segments, height_segments),
            Shape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus_mesh(radius, tube, radial_segments, tubular_segments),
            Shape::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => torus_knot_mesh(radius, tube, tubular_segments, radial_segments, p, q),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Box { .. } => "box",
            Shape::Sphere { .. } => "sphere",
            Shape::Torus { .. } => "torus",
            Shape::TorusKnot { .. } => "torus knot",
        }
    }
}

/// Local transform, Euler angles in XYZ order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Vertex twist animated on the GPU
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wobble {
    pub factor: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub wireframe: bool,
    pub wobble: Option<Wobble>,
}

impl Material {
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            wireframe: false,
            wobble: None,
        }
    }
}

/// Pointer state owned by an interactive object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub hovered: bool,
    pub clicked: bool,
    /// Enter events stop here instead of reaching objects behind
    pub stop_propagation: bool,
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub(crate) id: ObjectId,
    pub name: String,
    pub transform: Transform,
    /// Translation of the enclosing group
    pub anchor: Vec3,
    pub material: Material,
    pub interaction: Option<Interaction>,
    shape: Shape,
    mesh: Arc<MeshData>,
    mesh_revision: u64,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, shape: Shape, material: Material) -> Self {
        Self {
            id: ObjectId(0),
            name: name.into(),
            transform: Transform::default(),
            anchor: Vec3::ZERO,
            material,
            interaction: None,
            mesh: Arc::new(shape.build_mesh()),
            shape,
            mesh_revision: 0,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn in_group(mut self, anchor: Vec3) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn interactive(mut self, stop_propagation: bool) -> Self {
        self.interaction = Some(Interaction {
            stop_propagation,
            ..Default::default()
        });
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn mesh(&self) -> &Arc<MeshData> {
        &self.mesh
    }

    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    /// Swap the geometry. The mesh is rebuilt only when the shape changed.
    pub fn set_shape(&mut self, shape: Shape) {
        if shape == self.shape {
            return;
        }
        self.shape = shape;
        self.mesh = Arc::new(shape.build_mesh());
        self.mesh_revision += 1;
    }

    pub fn is_hovered(&self) -> bool {
        self.interaction.is_some_and(|i| i.hovered)
    }

    pub fn is_clicked(&self) -> bool {
        self.interaction.is_some_and(|i| i.clicked)
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.anchor) * self.transform.matrix()
    }

    /// Distance along a world-space ray to the nearest triangle
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        let world = self.world_matrix();
        if world.determinant().abs() < f32::EPSILON {
            return None;
        }
        self.mesh.raycast(&ray.transformed(&world.inverse()))
    }
}
