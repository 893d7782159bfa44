use crate::error::AssetError;
use crate::render::{load_texture, ShaderProgram};
use amethyst::renderer::types::TextureData;
use std::path::Path;

pub const PADDLE_TEXTURE: &str = "texture/paddle.png";
pub const BALL_TEXTURE: &str = "texture/ball.png";
pub const VERTEX_SHADER: &str = "shader/sprite.vert";
pub const FRAGMENT_SHADER: &str = "shader/sprite.frag";

/// Decoded pixels waiting to be uploaded once the world exists.
pub struct SpriteTextures {
    pub paddle: TextureData,
    pub ball: TextureData,
}

pub struct GameAssets {
    pub textures: SpriteTextures,
    pub shaders: ShaderProgram,
}

impl GameAssets {
    pub fn load(assets_dir: &Path) -> Result<Self, AssetError> {
        let shaders = ShaderProgram::load(
            &assets_dir.join(VERTEX_SHADER),
            &assets_dir.join(FRAGMENT_SHADER),
        )?;
        let textures = SpriteTextures {
            paddle: load_texture(&assets_dir.join(PADDLE_TEXTURE))?,
            ball: load_texture(&assets_dir.join(BALL_TEXTURE))?,
        };
        Ok(Self { textures, shaders })
    }
}
