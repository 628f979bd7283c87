use std::collections::HashMap;
use std::io::BufRead;

use crate::loaders::MeshData;

/// Raw `position/texcoord/normal` index triple from a face token,
/// already resolved to zero-based offsets.
type FaceVertex = (usize, Option<usize>, Option<usize>);

pub fn parse<R: BufRead>(reader: R) -> Result<MeshData, String> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();
    let mut triangles: Vec<[FaceVertex; 3]> = Vec::new();

    for (line_number, line_result) in reader.lines().enumerate() {
        let line_number = line_number + 1;
        let line =
            line_result.map_err(|e| format!("Failed to read OBJ line {}: {}", line_number, e))?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    return Err(format!(
                        "OBJ line {}: vertex position requires 3 components",
                        line_number
                    ));
                }
                let x = parse_f32_component(parts[1], line_number, "vertex x")?;
                let y = parse_f32_component(parts[2], line_number, "vertex y")?;
                let z = parse_f32_component(parts[3], line_number, "vertex z")?;
                positions.push([x, y, z]);
            }
            "vn" => {
                if parts.len() < 4 {
                    return Err(format!(
                        "OBJ line {}: vertex normal requires 3 components",
                        line_number
                    ));
                }
                let x = parse_f32_component(parts[1], line_number, "normal x")?;
                let y = parse_f32_component(parts[2], line_number, "normal y")?;
                let z = parse_f32_component(parts[3], line_number, "normal z")?;
                normals.push([x, y, z]);
            }
            "vt" => {
                if parts.len() < 3 {
                    return Err(format!(
                        "OBJ line {}: texture coordinate requires at least 2 components",
                        line_number
                    ));
                }
                let u = parse_f32_component(parts[1], line_number, "texcoord u")?;
                let v = parse_f32_component(parts[2], line_number, "texcoord v")?;
                texcoords.push([u, v]);
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(format!(
                        "OBJ line {}: face requires at least 3 vertices",
                        line_number
                    ));
                }

                let mut face = Vec::with_capacity(parts.len() - 1);
                for token in parts.iter().skip(1) {
                    face.push(parse_face_vertex(
                        token,
                        line_number,
                        positions.len(),
                        texcoords.len(),
                        normals.len(),
                    )?);
                }

                // Fan triangulation around the first face vertex.
                for i in 1..face.len() - 1 {
                    triangles.push([face[0], face[i], face[i + 1]]);
                }
            }
            // Grouping and material directives carry no geometry.
            _ => {}
        }
    }

    assemble(&positions, &texcoords, &normals, &triangles)
}

/// Deduplicates face-vertex triples into single-index vertices and emits
/// the flat attribute arrays. Missing texcoords/normals become zeros.
fn assemble(
    positions: &[[f32; 3]],
    texcoords: &[[f32; 2]],
    normals: &[[f32; 3]],
    triangles: &[[FaceVertex; 3]],
) -> Result<MeshData, String> {
    let mut data = MeshData::default();
    let mut vertex_map: HashMap<FaceVertex, u16> = HashMap::new();

    for triangle in triangles {
        for &vertex_key in triangle {
            let index = if let Some(&index) = vertex_map.get(&vertex_key) {
                index
            } else {
                let index = u16::try_from(vertex_map.len()).map_err(|_| {
                    "OBJ mesh has more than 65536 distinct vertices, \
                     which exceeds the 16-bit index range"
                        .to_string()
                })?;

                let (pos_idx, tex_idx, norm_idx) = vertex_key;
                data.positions.extend_from_slice(&positions[pos_idx]);
                data.texcoords
                    .extend_from_slice(&tex_idx.map(|i| texcoords[i]).unwrap_or([0.0, 0.0]));
                data.normals
                    .extend_from_slice(&norm_idx.map(|i| normals[i]).unwrap_or([0.0, 0.0, 0.0]));

                vertex_map.insert(vertex_key, index);
                index
            };

            data.indices.push(index);
        }
    }

    Ok(data)
}

fn parse_f32_component(raw: &str, line_number: usize, label: &str) -> Result<f32, String> {
    raw.parse::<f32>().map_err(|error| {
        format!(
            "OBJ line {}: invalid {} '{}': {}",
            line_number, label, raw, error
        )
    })
}

fn parse_face_vertex(
    token: &str,
    line_number: usize,
    positions_len: usize,
    texcoords_len: usize,
    normals_len: usize,
) -> Result<FaceVertex, String> {
    let fields: Vec<&str> = token.split('/').collect();
    if fields.is_empty() || fields.len() > 3 {
        return Err(format!(
            "OBJ line {}: invalid face vertex token '{}'",
            line_number, token
        ));
    }

    if fields[0].is_empty() {
        return Err(format!(
            "OBJ line {}: missing vertex position index in face token '{}'",
            line_number, token
        ));
    }

    let position_index = resolve_index(fields[0], positions_len, line_number, "position")?;

    let texcoord_index = if fields.len() > 1 && !fields[1].is_empty() {
        Some(resolve_index(
            fields[1],
            texcoords_len,
            line_number,
            "texcoord",
        )?)
    } else {
        None
    };

    let normal_index = if fields.len() > 2 && !fields[2].is_empty() {
        Some(resolve_index(
            fields[2],
            normals_len,
            line_number,
            "normal",
        )?)
    } else {
        None
    };

    Ok((position_index, texcoord_index, normal_index))
}

/// OBJ indices are one-based; negative values count back from the end of
/// the attribute list parsed so far.
fn resolve_index(
    raw: &str,
    count: usize,
    line_number: usize,
    label: &str,
) -> Result<usize, String> {
    let parsed = raw.parse::<isize>().map_err(|error| {
        format!(
            "OBJ line {}: invalid {} index '{}': {}",
            line_number, label, raw, error
        )
    })?;

    if parsed == 0 {
        return Err(format!(
            "OBJ line {}: {} index 0 is invalid in OBJ format",
            line_number, label
        ));
    }

    let resolved = if parsed > 0 {
        parsed - 1
    } else {
        count as isize + parsed
    };

    if resolved < 0 || resolved as usize >= count {
        return Err(format!(
            "OBJ line {}: {} index '{}' is out of bounds (count={})",
            line_number, label, raw, count
        ));
    }

    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn triangulates_quad_as_fan() {
        let source = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

        let data = parse(source.as_bytes()).expect("valid obj");
        assert_eq!(data.positions.len(), 4 * 3);
        assert_eq!(data.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(&data.positions[6..9], &[1.0, 1.0, 0.0]);
        assert_eq!(&data.texcoords[6..8], &[1.0, 1.0]);
        assert_eq!(&data.normals[0..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn reuses_identical_face_vertices() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
f 1 2 3
f 2 4 3
";

        let data = parse(source.as_bytes()).expect("valid obj");
        assert_eq!(data.positions.len(), 4 * 3);
        assert_eq!(data.indices, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn fills_missing_attributes_with_zeros() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

        let data = parse(source.as_bytes()).expect("valid obj");
        assert_eq!(data.texcoords, vec![0.0; 6]);
        assert_eq!(data.normals, vec![0.0; 9]);
    }

    #[test]
    fn resolves_negative_indices() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f -3 -2 -1
";

        let data = parse(source.as_bytes()).expect("valid obj");
        assert_eq!(data.indices, vec![0, 1, 2]);
        assert_eq!(&data.positions[3..6], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn reports_line_number_for_bad_component() {
        let source = "\
v 0 0 0
v 1 zero 0
";

        let error = parse(source.as_bytes()).unwrap_err();
        assert!(error.contains("line 2"));
        assert!(error.contains("zero"));
    }

    #[test]
    fn rejects_out_of_bounds_face_index() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 7
";

        let error = parse(source.as_bytes()).unwrap_err();
        assert!(error.contains("out of bounds"));
    }

    #[test]
    fn rejects_face_with_too_few_vertices() {
        let error = parse("v 0 0 0\nv 1 0 0\nf 1 2\n".as_bytes()).unwrap_err();
        assert!(error.contains("at least 3"));
    }

    #[test]
    fn ignores_comments_and_grouping_directives() {
        let source = "\
# a comment
o quad
g side
s off
usemtl ignored
mtllib ignored.mtl
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

        let data = parse(source.as_bytes()).expect("valid obj");
        assert_eq!(data.indices, vec![0, 1, 2]);
    }
}
