use crate::math::{Vector2, Vector3};

/// A single vertex as stored in RMDL: position, texture coordinate, normal.
/// Field order matches the packed layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vector3,
    pub tex_coords: Vector2,
    pub normal: Vector3,
}

impl Vertex {
    pub fn new(position: Vector3, tex_coords: Vector2, normal: Vector3) -> Self {
        Vertex {
            position,
            tex_coords,
            normal,
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            tex_coords: Vector2::zero(),
            normal: Vector3::zero(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
}

/// The in-memory model handed to the packer. This converter never produces
/// materials, but the container format reserves a section for them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
}
