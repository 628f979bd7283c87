mod builder;
mod types;

pub use builder::{build_model, mesh_from_arrays};
pub use types::{Material, Mesh, Model, Vertex};
