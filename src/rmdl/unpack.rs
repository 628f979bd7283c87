use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::math::{Vector2, Vector3};
use crate::model::{Material, Mesh, Model, Vertex};

use super::{Endianness, MAGIC, VERSION};

/// Parses an RMDL blob back into a model. The caller states the byte order
/// the blob was packed with.
pub fn unpack(data: &[u8], endianness: Endianness) -> Result<Model, String> {
    match endianness {
        Endianness::Little => unpack_with::<LittleEndian>(data),
        Endianness::Big => unpack_with::<BigEndian>(data),
    }
}

fn unpack_with<E: ByteOrder>(data: &[u8]) -> Result<Model, String> {
    let mut reader = Reader { data, offset: 0 };

    let magic = reader.take(4, "magic")?;
    if magic != MAGIC {
        return Err(format!("Not an RMDL file: bad magic {:02x?}", magic));
    }

    let version = reader.u32::<E>("version")?;
    if version != VERSION {
        return Err(format!(
            "Unsupported RMDL version {} (expected {})",
            version, VERSION
        ));
    }

    let mesh_count = reader.u32::<E>("mesh count")? as usize;
    let material_count = reader.u32::<E>("material count")? as usize;

    let mut meshes = Vec::new();
    for _ in 0..mesh_count {
        meshes.push(take_mesh::<E>(&mut reader)?);
    }

    let mut materials = Vec::new();
    for _ in 0..material_count {
        let name_len = reader.u32::<E>("material name length")? as usize;
        let name_bytes = reader.take(name_len, "material name")?;
        let name = std::str::from_utf8(name_bytes)
            .map_err(|e| format!("Material name is not valid UTF-8: {}", e))?
            .to_string();
        materials.push(Material { name });
    }

    if reader.remaining() != 0 {
        return Err(format!(
            "RMDL data has {} trailing bytes past the end of the model",
            reader.remaining()
        ));
    }

    Ok(Model { meshes, materials })
}

fn take_mesh<E: ByteOrder>(reader: &mut Reader) -> Result<Mesh, String> {
    let vertex_count = reader.u32::<E>("vertex count")? as usize;
    let index_count = reader.u32::<E>("index count")? as usize;

    // One bounds check up front instead of one per field.
    let needed = vertex_count * 32 + index_count * 2;
    if reader.remaining() < needed {
        return Err(format!(
            "RMDL mesh data truncated: {} bytes needed, {} available",
            needed,
            reader.remaining()
        ));
    }

    let mut vertices = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        vertices.push(take_vertex::<E>(reader)?);
    }

    let mut indices = Vec::with_capacity(index_count);
    for _ in 0..index_count {
        indices.push(reader.u16::<E>("index")?);
    }

    Ok(Mesh { vertices, indices })
}

fn take_vertex<E: ByteOrder>(reader: &mut Reader) -> Result<Vertex, String> {
    let mut components = [0.0f32; 8];
    for component in &mut components {
        *component = reader.f32::<E>("vertex component")?;
    }

    let [px, py, pz, tu, tv, nx, ny, nz] = components;
    Ok(Vertex::new(
        Vector3::new(px, py, pz),
        Vector2::new(tu, tv),
        Vector3::new(nx, ny, nz),
    ))
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize, label: &str) -> Result<&'a [u8], String> {
        let end = self.offset.checked_add(len).ok_or_else(|| {
            format!("RMDL {} length overflows the input size", label)
        })?;
        let bytes = self.data.get(self.offset..end).ok_or_else(|| {
            format!(
                "RMDL data truncated reading {} at byte {} ({} bytes wanted, {} left)",
                label,
                self.offset,
                len,
                self.remaining()
            )
        })?;
        self.offset = end;
        Ok(bytes)
    }

    fn u16<E: ByteOrder>(&mut self, label: &str) -> Result<u16, String> {
        Ok(E::read_u16(self.take(2, label)?))
    }

    fn u32<E: ByteOrder>(&mut self, label: &str) -> Result<u32, String> {
        Ok(E::read_u32(self.take(4, label)?))
    }

    fn f32<E: ByteOrder>(&mut self, label: &str) -> Result<f32, String> {
        Ok(E::read_f32(self.take(4, label)?))
    }
}

#[cfg(test)]
mod tests {
    use super::super::pack;
    use super::*;

    fn triangle_model() -> Model {
        let vertices = vec![
            Vertex::new(
                Vector3::new(0.0, 0.0, 0.0),
                Vector2::new(0.0, 0.0),
                Vector3::new(0.0, 0.0, 1.0),
            ),
            Vertex::new(
                Vector3::new(1.0, 0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector3::new(0.0, 0.0, 1.0),
            ),
            Vertex::new(
                Vector3::new(0.5, 1.0, 0.0),
                Vector2::new(0.5, 1.0),
                Vector3::new(0.0, 0.0, 1.0),
            ),
        ];
        Model {
            meshes: vec![Mesh {
                vertices,
                indices: vec![0, 1, 2],
            }],
            materials: Vec::new(),
        }
    }

    #[test]
    fn round_trips_little_endian() {
        let model = triangle_model();
        let data = pack(&model, Endianness::Little);
        let restored = unpack(&data, Endianness::Little).expect("valid blob");
        assert_eq!(restored, model);
    }

    #[test]
    fn round_trips_big_endian() {
        let model = triangle_model();
        let data = pack(&model, Endianness::Big);
        let restored = unpack(&data, Endianness::Big).expect("valid blob");
        assert_eq!(restored, model);
    }

    #[test]
    fn round_trips_materials() {
        let mut model = triangle_model();
        model.materials.push(Material {
            name: "checker".to_string(),
        });

        let data = pack(&model, Endianness::Little);
        let restored = unpack(&data, Endianness::Little).expect("valid blob");
        assert_eq!(restored.materials, model.materials);
    }

    #[test]
    fn packs_requested_byte_order_exactly() {
        let model = Model {
            meshes: vec![Mesh {
                vertices: vec![Vertex::new(
                    Vector3::new(1.0, 2.0, 3.0),
                    Vector2::new(0.5, 0.25),
                    Vector3::new(0.0, 0.0, 1.0),
                )],
                indices: vec![7],
            }],
            materials: Vec::new(),
        };

        let mut expected_le = Vec::new();
        expected_le.extend_from_slice(b"RMDL");
        for value in [1u32, 1, 0, 1, 1] {
            expected_le.extend_from_slice(&value.to_le_bytes());
        }
        for value in [1.0f32, 2.0, 3.0, 0.5, 0.25, 0.0, 0.0, 1.0] {
            expected_le.extend_from_slice(&value.to_le_bytes());
        }
        expected_le.extend_from_slice(&7u16.to_le_bytes());
        assert_eq!(pack(&model, Endianness::Little), expected_le);

        let mut expected_be = Vec::new();
        expected_be.extend_from_slice(b"RMDL");
        for value in [1u32, 1, 0, 1, 1] {
            expected_be.extend_from_slice(&value.to_be_bytes());
        }
        for value in [1.0f32, 2.0, 3.0, 0.5, 0.25, 0.0, 0.0, 1.0] {
            expected_be.extend_from_slice(&value.to_be_bytes());
        }
        expected_be.extend_from_slice(&7u16.to_be_bytes());
        assert_eq!(pack(&model, Endianness::Big), expected_be);
    }

    #[test]
    fn packs_empty_model_as_header_only() {
        let data = pack(&Model::default(), Endianness::Little);
        assert_eq!(data.len(), 16);
        assert_eq!(&data[0..4], b"RMDL");
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = pack(&triangle_model(), Endianness::Little);
        data[0] = b'X';

        let error = unpack(&data, Endianness::Little).unwrap_err();
        assert!(error.contains("magic"));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut data = pack(&triangle_model(), Endianness::Little);
        data[4] = 9;

        let error = unpack(&data, Endianness::Little).unwrap_err();
        assert!(error.contains("version"));
    }

    #[test]
    fn rejects_truncated_mesh_data() {
        let mut data = pack(&triangle_model(), Endianness::Little);
        data.truncate(data.len() - 4);

        let error = unpack(&data, Endianness::Little).unwrap_err();
        assert!(error.contains("truncated"));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut data = pack(&triangle_model(), Endianness::Little);
        data.push(0);

        let error = unpack(&data, Endianness::Little).unwrap_err();
        assert!(error.contains("trailing"));
    }
}
