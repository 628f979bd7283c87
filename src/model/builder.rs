use std::path::Path;

use crate::loaders::{self, MeshData};
use crate::math::{Vector2, Vector3};

use super::types::{Mesh, Model, Vertex};

pub fn build_model(input_path: &Path) -> Result<Model, String> {
    let mesh_data = loaders::load(input_path)?;
    let mesh = mesh_from_arrays(&mesh_data)?;

    Ok(Model {
        meshes: vec![mesh],
        materials: Vec::new(),
    })
}

/// Zips the flat attribute arrays produced by a loader into vertex structs.
/// Index values are taken as-is; they are not checked against the vertex count.
pub fn mesh_from_arrays(data: &MeshData) -> Result<Mesh, String> {
    if data.positions.len() % 3 != 0 {
        return Err("Malformed mesh: positions array length is not a multiple of 3".to_string());
    }

    let num_vertices = data.positions.len() / 3;
    if data.normals.len() != data.positions.len() {
        return Err(format!(
            "Malformed mesh: expected {} normal components, found {}",
            data.positions.len(),
            data.normals.len()
        ));
    }
    if data.texcoords.len() != num_vertices * 2 {
        return Err(format!(
            "Malformed mesh: expected {} texcoord components, found {}",
            num_vertices * 2,
            data.texcoords.len()
        ));
    }

    let (p, n, t) = (&data.positions, &data.normals, &data.texcoords);
    let mut vertices: Vec<Vertex> = Vec::with_capacity(num_vertices);

    for i in 0..num_vertices {
        vertices.push(Vertex::new(
            Vector3::new(p[i * 3], p[i * 3 + 1], p[i * 3 + 2]),
            Vector2::new(t[i * 2], t[i * 2 + 1]),
            Vector3::new(n[i * 3], n[i * 3 + 1], n[i * 3 + 2]),
        ));
    }

    Ok(Mesh {
        vertices,
        indices: data.indices.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zips_flat_arrays_into_vertices() {
        let data = MeshData {
            positions: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0],
            texcoords: vec![0.25, 0.5, 0.75, 1.0],
            indices: vec![0, 1, 0],
        };

        let mesh = mesh_from_arrays(&data).expect("valid arrays");
        assert_eq!(mesh.vertices.len(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 0]);

        let second = &mesh.vertices[1];
        assert_eq!(second.position, Vector3::new(3.0, 4.0, 5.0));
        assert_eq!(second.tex_coords, Vector2::new(0.75, 1.0));
        assert_eq!(second.normal, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn rejects_positions_not_multiple_of_three() {
        let data = MeshData {
            positions: vec![0.0, 1.0],
            ..Default::default()
        };

        let error = mesh_from_arrays(&data).unwrap_err();
        assert!(error.contains("multiple of 3"));
    }

    #[test]
    fn rejects_mismatched_normals() {
        let data = MeshData {
            positions: vec![0.0, 1.0, 2.0],
            normals: vec![0.0, 0.0],
            texcoords: vec![0.0, 0.0],
            indices: vec![0],
        };

        let error = mesh_from_arrays(&data).unwrap_err();
        assert!(error.contains("normal"));
    }

    #[test]
    fn rejects_mismatched_texcoords() {
        let data = MeshData {
            positions: vec![0.0, 1.0, 2.0],
            normals: vec![0.0, 0.0, 1.0],
            texcoords: vec![0.0],
            indices: vec![0],
        };

        let error = mesh_from_arrays(&data).unwrap_err();
        assert!(error.contains("texcoord"));
    }
}
