use byteorder::{ByteOrder, LittleEndian};
use gltf::accessor::{Accessor, DataType, Dimensions};
use gltf::buffer::Data;

pub fn read_vec3(accessor: &Accessor, buffers: &[Data], label: &str) -> Result<Vec<f32>, String> {
    read_f32_components(accessor, buffers, Dimensions::Vec3, label)
}

pub fn read_vec2(accessor: &Accessor, buffers: &[Data], label: &str) -> Result<Vec<f32>, String> {
    read_f32_components(accessor, buffers, Dimensions::Vec2, label)
}

pub fn read_indices(accessor: &Accessor, buffers: &[Data]) -> Result<Vec<u16>, String> {
    if accessor.dimensions() != Dimensions::Scalar {
        return Err(format!(
            "Index accessor must hold scalars, found {:?}",
            accessor.dimensions()
        ));
    }

    match accessor.data_type() {
        DataType::U16 => {
            let bytes = element_bytes(accessor, buffers, "index")?;
            let mut values = vec![0u16; accessor.count()];
            LittleEndian::read_u16_into(&bytes, &mut values);
            Ok(values)
        }
        DataType::U8 => {
            let bytes = element_bytes(accessor, buffers, "index")?;
            Ok(bytes.into_iter().map(u16::from).collect())
        }
        other => Err(format!(
            "Index accessor uses {:?} components; RMDL indices are 16-bit unsigned",
            other
        )),
    }
}

fn read_f32_components(
    accessor: &Accessor,
    buffers: &[Data],
    dimensions: Dimensions,
    label: &str,
) -> Result<Vec<f32>, String> {
    if accessor.data_type() != DataType::F32 || accessor.dimensions() != dimensions {
        return Err(format!(
            "{} accessor holds {:?} {:?} data, expected {:?} {:?}",
            label,
            accessor.dimensions(),
            accessor.data_type(),
            dimensions,
            DataType::F32
        ));
    }

    let bytes = element_bytes(accessor, buffers, label)?;
    let mut values = vec![0.0f32; bytes.len() / 4];
    LittleEndian::read_f32_into(&bytes, &mut values);
    Ok(values)
}

/// Collects the accessor's elements into one contiguous byte vector, reading
/// at offsets computed from the accessor and its buffer view. The view stride
/// is honored when present; otherwise elements are assumed tightly packed.
/// glTF buffer bytes are always little-endian.
fn element_bytes(accessor: &Accessor, buffers: &[Data], label: &str) -> Result<Vec<u8>, String> {
    let view = accessor
        .view()
        .ok_or_else(|| format!("{} accessor is sparse, which is not supported", label))?;
    let data = buffers
        .get(view.buffer().index())
        .ok_or_else(|| format!("{} accessor references a missing buffer", label))?;

    let start = view.offset() + accessor.offset();
    let stride = view.stride().unwrap_or_else(|| accessor.size());
    let size = accessor.size();

    let mut bytes = Vec::with_capacity(accessor.count() * size);
    for element in 0..accessor.count() {
        let offset = start + element * stride;
        let chunk = data.get(offset..offset + size).ok_or_else(|| {
            format!(
                "{} accessor reads past the end of its buffer (offset {}, buffer length {})",
                label,
                offset,
                data.len()
            )
        })?;
        bytes.extend_from_slice(chunk);
    }

    Ok(bytes)
}
