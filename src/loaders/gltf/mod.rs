mod accessor;

use std::path::Path;

use gltf::buffer::Data;
use gltf::{Document, Gltf, Semantic};

use super::MeshData;

pub fn load(path: &Path) -> Result<MeshData, String> {
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| format!("Failed to load glTF file '{}': {}", path.display(), e))?;
    from_document(&document, &buffers)
}

/// Reads a glTF asset already in memory (a .glb container or JSON with
/// embedded buffers). External buffer files are not resolved on this path.
pub fn from_slice(data: &[u8]) -> Result<MeshData, String> {
    let gltf = Gltf::from_slice(data).map_err(|e| format!("Failed to parse glTF data: {}", e))?;

    let blob = gltf.blob.as_deref();
    let mut buffers = Vec::new();
    for buffer in gltf.document.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let bytes = blob
                    .ok_or_else(|| "glTF binary container has no binary chunk".to_string())?;
                buffers.push(Data(bytes.to_vec()));
            }
            gltf::buffer::Source::Uri(uri) => {
                return Err(format!(
                    "Buffer URI '{}' cannot be resolved when loading from memory",
                    uri
                ));
            }
        }
    }

    from_document(&gltf.document, &buffers)
}

/// Extracts the first primitive of the first mesh. POSITION, NORMAL and
/// TEXCOORD_0 are all required, as is an index accessor.
fn from_document(document: &Document, buffers: &[Data]) -> Result<MeshData, String> {
    let mesh = document
        .meshes()
        .next()
        .ok_or_else(|| "glTF document contains no meshes".to_string())?;
    let primitive = mesh
        .primitives()
        .next()
        .ok_or_else(|| "First glTF mesh has no primitives".to_string())?;

    let index_accessor = primitive
        .indices()
        .ok_or_else(|| "First glTF primitive has no index accessor".to_string())?;
    let indices = accessor::read_indices(&index_accessor, buffers)?;

    let positions = accessor::read_vec3(
        &required_attribute(&primitive, Semantic::Positions, "POSITION")?,
        buffers,
        "POSITION",
    )?;
    let normals = accessor::read_vec3(
        &required_attribute(&primitive, Semantic::Normals, "NORMAL")?,
        buffers,
        "NORMAL",
    )?;
    let texcoords = accessor::read_vec2(
        &required_attribute(&primitive, Semantic::TexCoords(0), "TEXCOORD_0")?,
        buffers,
        "TEXCOORD_0",
    )?;

    Ok(MeshData {
        positions,
        normals,
        texcoords,
        indices,
    })
}

fn required_attribute<'a>(
    primitive: &gltf::Primitive<'a>,
    semantic: Semantic,
    label: &str,
) -> Result<gltf::Accessor<'a>, String> {
    primitive
        .get(&semantic)
        .ok_or_else(|| format!("First glTF primitive is missing the {} attribute", label))
}
