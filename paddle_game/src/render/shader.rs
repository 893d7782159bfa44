use crate::error::AssetError;
use amethyst::renderer::rendy::shader::{
    PathBufShaderInfo, ShaderKind, SourceLanguage, SpirvShader,
};
use log::info;
use std::fs;
use std::path::Path;

/// Vertex and fragment stages of the sprite program, compiled to SPIR-V.
///
/// Interface: `set = 0` holds the camera's projection and view matrices,
/// `set = 1` the sprite texture, and a vertex-stage push constant block
/// carries the model matrix.
#[derive(Clone, Debug)]
pub struct ShaderProgram {
    pub vertex: SpirvShader,
    pub fragment: SpirvShader,
}

impl ShaderProgram {
    pub fn load(vertex_path: &Path, fragment_path: &Path) -> Result<Self, AssetError> {
        Ok(Self {
            vertex: compile(vertex_path, ShaderKind::Vertex)?,
            fragment: compile(fragment_path, ShaderKind::Fragment)?,
        })
    }
}

fn compile(path: &Path, kind: ShaderKind) -> Result<SpirvShader, AssetError> {
    fs::metadata(path).map_err(|error| AssetError::Read {
        path: path.display().to_string(),
        error,
    })?;
    let shader = PathBufShaderInfo::new(path.to_path_buf(), kind, SourceLanguage::GLSL, "main")
        .precompile()
        .map_err(|error| AssetError::Shader {
            path: path.display().to_string(),
            reason: error.to_string(),
        })?;
    info!("compiled shader {}", path.display());
    Ok(shader)
}
