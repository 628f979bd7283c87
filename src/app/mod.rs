pub mod cli;
pub mod error;

use std::fs;
use std::path::Path;

use log::info;

use crate::model;
use crate::rmdl;

use cli::AppConfig;
use error::AppError;

pub fn run_from_env() -> Result<(), AppError> {
    let config = cli::parse_from_env().map_err(AppError::Cli)?;
    run(config)
}

pub fn run(config: AppConfig) -> Result<(), AppError> {
    let model = model::build_model(Path::new(&config.input_path)).map_err(AppError::Load)?;

    for mesh in &model.meshes {
        info!(
            "Loaded '{}': {} vertices, {} indices",
            config.input_path,
            mesh.vertices.len(),
            mesh.indices.len()
        );
    }

    let data = rmdl::pack(&model, config.endianness);
    fs::write(&config.output_path, &data).map_err(|error| {
        AppError::Write(format!(
            "Failed to write output file '{}': {}",
            config.output_path, error
        ))
    })?;

    info!(
        "Wrote '{}' ({} bytes, {})",
        config.output_path,
        data.len(),
        config.endianness.as_ref()
    );

    Ok(())
}
