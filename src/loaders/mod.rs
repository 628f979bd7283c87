pub mod gltf;
pub mod obj;

use std::path::Path;

/// Flat per-vertex attribute arrays shared by every input format.
/// `positions`/`normals` hold 3 components per vertex, `texcoords` 2.
#[derive(Default, Clone, Debug)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub indices: Vec<u16>,
}

pub fn load(path: &Path) -> Result<MeshData, String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| format!("Input file has no extension: {}", path.display()))?;

    match extension.as_str() {
        "gltf" | "glb" => gltf::load(path),
        "obj" => obj::load(path),
        other => Err(format!(
            "Unsupported input format '.{}': expected .gltf, .glb or .obj",
            other
        )),
    }
}
