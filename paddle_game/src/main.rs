mod assets;
mod constants;
mod error;
mod render;
mod states;
mod systems;

use crate::assets::GameAssets;
use crate::constants::CLEAR_COLOR;
use crate::render::{linear_clear_color, RenderSprites};
use crate::systems::PaddleGameBundle;
use amethyst::{
    core::TransformBundle,
    input::{InputBundle, StringBindings},
    prelude::*,
    renderer::{plugins::RenderToWindow, types::DefaultBackend, RenderingBundle},
    utils::application_root_dir,
};
use log::error;
use std::process;

fn main() -> amethyst::Result<()> {
    amethyst::start_logger(Default::default());

    let app_root = application_root_dir()?;
    let assets_dir = app_root.join("assets");
    let GameAssets { textures, shaders } = match GameAssets::load(&assets_dir) {
        Ok(assets) => assets,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    let display_config_path = app_root.join("config").join("display.ron");
    let binding_path = app_root.join("config").join("bindings.ron");
    let input_bundle =
        InputBundle::<StringBindings>::new().with_bindings_from_file(binding_path)?;

    let game_data = GameDataBuilder::default()
        .with_bundle(
            RenderingBundle::<DefaultBackend>::new()
                .with_plugin(
                    RenderToWindow::from_config_path(display_config_path)?
                        .with_clear(linear_clear_color(CLEAR_COLOR)),
                )
                .with_plugin(RenderSprites::new(shaders)),
        )?
        .with_bundle(TransformBundle::new())?
        .with_bundle(input_bundle)?
        .with_bundle(PaddleGameBundle)?;

    let mut game = Application::new(assets_dir, states::InGame::new(textures), game_data)?;
    game.run();

    Ok(())
}
