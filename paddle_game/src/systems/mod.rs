mod ball;
mod collision;
mod paddle;

pub use ball::Ball;
pub use paddle::{Paddle, PaddleControl, Side};

pub struct PaddleGameBundle;

use crate::systems::ball::{BounceSystem, MoveBallSystem};
use crate::systems::paddle::{AutoPaddleSystem, PaddleInputSystem, PlacePaddlesSystem};
use amethyst::core::SystemBundle;
use amethyst::ecs::DispatcherBuilder;
use amethyst::prelude::World;
use amethyst::Error;

impl<'a, 'b> SystemBundle<'a, 'b> for PaddleGameBundle {
    fn build(
        self,
        _world: &mut World,
        dispatcher: &mut DispatcherBuilder<'a, 'b>,
    ) -> Result<(), Error> {
        dispatcher.add(
            PaddleInputSystem,
            "paddle_input_system",
            &["input_system"],
        );
        dispatcher.add(
            PlacePaddlesSystem,
            "place_paddles_system",
            &["paddle_input_system"],
        );
        dispatcher.add(
            MoveBallSystem,
            "move_ball_system",
            &["place_paddles_system"],
        );
        dispatcher.add(BounceSystem, "bounce_system", &["move_ball_system"]);
        dispatcher.add(
            AutoPaddleSystem,
            "auto_paddle_system",
            &["bounce_system"],
        );
        Ok(())
    }
}
