use crate::assets::SpriteTextures;
use crate::constants::{ARENA_HALF_HEIGHT, ARENA_HALF_WIDTH, BALL_SCALE};
use crate::render::{Sprite, SpriteSlot};
use crate::states::GameStatus;
use crate::systems::{Ball, Paddle, PaddleControl, Side};
use amethyst::{
    assets::{AssetStorage, Handle, Loader},
    core::{math::Vector3, transform::Transform},
    input::{is_close_requested, StringBindings},
    prelude::*,
    renderer::{types::TextureData, Camera, Texture},
    StateEvent,
};
use log::info;

pub struct InGame {
    textures: Option<SpriteTextures>,
}

impl InGame {
    pub fn new(textures: SpriteTextures) -> Self {
        Self {
            textures: Some(textures),
        }
    }
}

impl SimpleState for InGame {
    fn on_start(&mut self, data: StateData<'_, GameData<'_, '_>>) {
        let world = data.world;
        world.insert(GameStatus::Active);
        world.insert(PaddleControl::default());

        setup_camera(world);
        if let Some(textures) = self.textures.take() {
            let paddle_texture = upload_texture(world, textures.paddle);
            let ball_texture = upload_texture(world, textures.ball);
            setup_paddles(world, paddle_texture);
            setup_ball(world, ball_texture);
        }
        info!("game started");
    }

    fn handle_event(
        &mut self,
        data: StateData<'_, GameData<'_, '_>>,
        event: StateEvent<StringBindings>,
    ) -> SimpleTrans {
        if let StateEvent::Window(event) = &event {
            if is_close_requested(event) {
                info!("close requested, finishing the current frame");
                *data.world.write_resource::<GameStatus>() = GameStatus::Finished;
            }
        }
        Trans::None
    }

    fn update(&mut self, data: &mut StateData<'_, GameData<'_, '_>>) -> SimpleTrans {
        if data.world.read_resource::<GameStatus>().is_active() {
            Trans::None
        } else {
            Trans::Quit
        }
    }
}

fn upload_texture(world: &World, data: TextureData) -> Handle<Texture> {
    let loader = world.read_resource::<Loader>();
    let texture_storage = world.read_resource::<AssetStorage<Texture>>();
    loader.load_from_data(data, (), &texture_storage)
}

fn setup_camera(world: &mut World) {
    let mut transform = Transform::default();
    transform.set_translation_xyz(0.0, 0.0, 1.0);

    world
        .create_entity()
        .with(Camera::standard_2d(
            ARENA_HALF_WIDTH * 2.0,
            ARENA_HALF_HEIGHT * 2.0,
        ))
        .with(transform)
        .build();
}

fn setup_paddles(world: &mut World, texture: Handle<Texture>) {
    for (side, slot) in [
        (Side::Left, SpriteSlot::LeftPaddle),
        (Side::Right, SpriteSlot::RightPaddle),
    ]
    .iter()
    {
        let paddle = Paddle::new(*side);
        let mut transform = Transform::default();
        transform.set_translation_xyz(side.x(), paddle.offset, 0.0);

        world
            .create_entity()
            .with(paddle)
            .with(transform)
            .with(Sprite {
                slot: *slot,
                texture: texture.clone(),
            })
            .build();
    }
}

fn setup_ball(world: &mut World, texture: Handle<Texture>) {
    let mut transform = Transform::default();
    transform.set_scale(Vector3::new(BALL_SCALE, BALL_SCALE, 1.0));

    world
        .create_entity()
        .with(Ball::default())
        .with(transform)
        .with(Sprite {
            slot: SpriteSlot::Ball,
            texture,
        })
        .build();
}
