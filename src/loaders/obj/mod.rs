mod parse;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::MeshData;

pub fn load(path: &Path) -> Result<MeshData, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open OBJ file '{}': {}", path.display(), e))?;
    from_reader(BufReader::new(file))
}

pub fn from_reader<R: BufRead>(reader: R) -> Result<MeshData, String> {
    parse::parse(reader)
}
