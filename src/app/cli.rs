use std::fs::File;
use std::path::Path;

use crate::rmdl::Endianness;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: String,
    pub output_path: String,
    pub endianness: Endianness,
}

pub fn parse_from_env() -> Result<AppConfig, String> {
    let args = std::env::args().collect::<Vec<String>>();
    let program = args.first().map(|s| s.as_str()).unwrap_or("convert");
    let usage = format!(
        "Usage: {} <input.gltf|glb|obj> <output.rmdl> [--big-endian]\nExample: cargo run -- resources/models/teapot.glb teapot.rmdl",
        program
    );

    let mut endianness = Endianness::Little;
    let mut paths: Vec<&String> = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--big-endian" => endianness = Endianness::Big,
            "--little-endian" => endianness = Endianness::Little,
            other if other.starts_with("--") => {
                return Err(format!("Unknown option '{}'\n{}", other, usage));
            }
            _ => paths.push(arg),
        }
    }

    if paths.len() != 2 {
        return Err(usage);
    }

    let config = AppConfig {
        input_path: paths[0].clone(),
        output_path: paths[1].clone(),
        endianness,
    };

    validate_cli_inputs(&config.input_path, &config.output_path)?;
    Ok(config)
}

fn validate_cli_inputs(input_path: &str, output_path: &str) -> Result<(), String> {
    validate_input_path(input_path)?;
    validate_output_path(output_path)?;
    Ok(())
}

fn validate_input_path(path: &str) -> Result<(), String> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(format!("Input file does not exist: {}", path));
    }
    if !file_path.is_file() {
        return Err(format!("Input path is not a file: {}", path));
    }

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("Input file has no extension: {}", path))?;
    let known = ["gltf", "glb", "obj"]
        .iter()
        .any(|supported| extension.eq_ignore_ascii_case(supported));
    if !known {
        return Err(format!(
            "Input file must have a .gltf, .glb or .obj extension: {}",
            path
        ));
    }

    File::open(file_path)
        .map(|_| ())
        .map_err(|error| format!("Failed to open input file '{}': {}", path, error))
}

fn validate_output_path(path: &str) -> Result<(), String> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("Output file has no extension: {}", path))?;
    if !extension.eq_ignore_ascii_case("rmdl") {
        return Err(format!("Output file must have a .rmdl extension: {}", path));
    }
    Ok(())
}
