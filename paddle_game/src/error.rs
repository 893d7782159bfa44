use failure::Fail;
use std::io;

/// Startup failures while reading the sprite textures and shader sources.
#[derive(Debug, Fail)]
pub enum AssetError {
    #[fail(display = "failed to read {}: {}", path, error)]
    Read {
        path: String,
        #[fail(cause)]
        error: io::Error,
    },
    #[fail(display = "failed to decode image {}: {}", path, error)]
    Decode {
        path: String,
        #[fail(cause)]
        error: image::ImageError,
    },
    #[fail(display = "failed to compile shader {}: {}", path, reason)]
    Shader { path: String, reason: String },
}
