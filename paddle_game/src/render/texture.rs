use crate::error::AssetError;
use amethyst::renderer::{
    rendy::{
        hal::image::{Filter, Kind, SamplerInfo, ViewKind, WrapMode},
        texture::TextureBuilder,
    },
    types::TextureData,
    Format,
};
use image::RgbaImage;
use log::info;
use std::fs;
use std::path::Path;

pub fn decode_rgba(bytes: &[u8]) -> image::ImageResult<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Reads and decodes an image file into texture data ready for upload.
/// Sampling is nearest-neighbour in both directions.
pub fn load_texture(path: &Path) -> Result<TextureData, AssetError> {
    let bytes = fs::read(path).map_err(|error| AssetError::Read {
        path: path.display().to_string(),
        error,
    })?;
    let image = decode_rgba(&bytes).map_err(|error| AssetError::Decode {
        path: path.display().to_string(),
        error,
    })?;
    let (width, height) = image.dimensions();
    info!("loaded texture {} ({}x{})", path.display(), width, height);
    Ok(TextureData(nearest_rgba_texture(
        width,
        height,
        image.into_raw(),
    )))
}

fn nearest_rgba_texture(width: u32, height: u32, pixels: Vec<u8>) -> TextureBuilder<'static> {
    TextureBuilder::new()
        .with_kind(Kind::D2(width, height, 1, 1))
        .with_view_kind(ViewKind::D2)
        .with_data_width(width)
        .with_data_height(height)
        .with_sampler_info(SamplerInfo::new(Filter::Nearest, WrapMode::Clamp))
        .with_raw_data(pixels, Format::Rgba8Srgb)
}
