use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::model::{Mesh, Model, Vertex};

use super::{Endianness, MAGIC, VERSION};

/// Serializes a model into an RMDL byte blob in the requested byte order.
pub fn pack(model: &Model, endianness: Endianness) -> Vec<u8> {
    match endianness {
        Endianness::Little => pack_with::<LittleEndian>(model),
        Endianness::Big => pack_with::<BigEndian>(model),
    }
}

fn pack_with<E: ByteOrder>(model: &Model) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed_size(model));

    out.extend_from_slice(&MAGIC);
    put_u32::<E>(&mut out, VERSION);
    put_u32::<E>(&mut out, model.meshes.len() as u32);
    put_u32::<E>(&mut out, model.materials.len() as u32);

    for mesh in &model.meshes {
        put_mesh::<E>(&mut out, mesh);
    }

    for material in &model.materials {
        put_u32::<E>(&mut out, material.name.len() as u32);
        out.extend_from_slice(material.name.as_bytes());
    }

    out
}

fn put_mesh<E: ByteOrder>(out: &mut Vec<u8>, mesh: &Mesh) {
    put_u32::<E>(out, mesh.vertices.len() as u32);
    put_u32::<E>(out, mesh.indices.len() as u32);

    for vertex in &mesh.vertices {
        put_vertex::<E>(out, vertex);
    }

    for &index in &mesh.indices {
        put_u16::<E>(out, index);
    }
}

fn put_vertex<E: ByteOrder>(out: &mut Vec<u8>, vertex: &Vertex) {
    put_f32::<E>(out, vertex.position.x);
    put_f32::<E>(out, vertex.position.y);
    put_f32::<E>(out, vertex.position.z);
    put_f32::<E>(out, vertex.tex_coords.x);
    put_f32::<E>(out, vertex.tex_coords.y);
    put_f32::<E>(out, vertex.normal.x);
    put_f32::<E>(out, vertex.normal.y);
    put_f32::<E>(out, vertex.normal.z);
}

fn packed_size(model: &Model) -> usize {
    let meshes: usize = model
        .meshes
        .iter()
        .map(|mesh| 8 + mesh.vertices.len() * 32 + mesh.indices.len() * 2)
        .sum();
    let materials: usize = model
        .materials
        .iter()
        .map(|material| 4 + material.name.len())
        .sum();
    16 + meshes + materials
}

fn put_u16<E: ByteOrder>(out: &mut Vec<u8>, value: u16) {
    let mut bytes = [0u8; 2];
    E::write_u16(&mut bytes, value);
    out.extend_from_slice(&bytes);
}

fn put_u32<E: ByteOrder>(out: &mut Vec<u8>, value: u32) {
    let mut bytes = [0u8; 4];
    E::write_u32(&mut bytes, value);
    out.extend_from_slice(&bytes);
}

fn put_f32<E: ByteOrder>(out: &mut Vec<u8>, value: f32) {
    let mut bytes = [0u8; 4];
    E::write_f32(&mut bytes, value);
    out.extend_from_slice(&bytes);
}
