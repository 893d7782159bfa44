mod shader;
mod sprite_pass;
mod texture;

pub use shader::ShaderProgram;
pub use sprite_pass::{RenderSprites, Sprite, SpriteSlot};
pub use texture::load_texture;

use amethyst::renderer::palette::Srgba;

/// The window surface is sRGB, so clear values are given in linear space.
pub fn linear_clear_color(srgba: [f32; 4]) -> [f32; 4] {
    let linear = Srgba::new(srgba[0], srgba[1], srgba[2], srgba[3]).into_linear();
    [linear.red, linear.green, linear.blue, linear.alpha]
}
