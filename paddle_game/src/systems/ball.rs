use crate::constants::{ARENA_HALF_HEIGHT, BALL_RADIUS, BALL_VELOCITY_X, BALL_VELOCITY_Y};
use crate::states::GameStatus;
use crate::systems::collision::ball_hits_paddle;
use crate::systems::{Paddle, Side};
use amethyst::{
    core::{timing::Time, transform::Transform},
    derive::SystemDesc,
    ecs::{Component, DenseVecStorage, Join, Read, ReadStorage, System, SystemData, WriteStorage},
};
use log::debug;

pub struct Ball {
    pub velocity: [f32; 2],
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            velocity: [BALL_VELOCITY_X, BALL_VELOCITY_Y],
            radius: BALL_RADIUS,
        }
    }
}

impl Component for Ball {
    type Storage = DenseVecStorage<Self>;
}

/// A paddle's collision box as seen by the ball this frame.
#[derive(Clone, Copy, Debug)]
pub struct PaddleBox {
    pub side: Side,
    pub center: [f32; 2],
    pub width: f32,
    pub height: f32,
}

impl Ball {
    /// Wall reflection first, then paddles in the given order; a later
    /// paddle overrides an earlier one when both overlap.
    pub fn bounce(&mut self, position: [f32; 2], paddles: &[PaddleBox]) {
        self.velocity[1] = reflect_off_walls(position[1], self.radius, self.velocity[1]);
        for paddle in paddles {
            if ball_hits_paddle(position, paddle.center, paddle.width, paddle.height, self.radius) {
                self.velocity[0] = paddle.side.deflect(self.velocity[0]);
                debug!("ball hit {:?} paddle, speed x now {}", paddle.side, self.velocity[0]);
            }
        }
    }
}

/// No sub-step correction: a ball that stays past a wall flips again next frame.
pub fn reflect_off_walls(y: f32, radius: f32, velocity_y: f32) -> f32 {
    if y + radius >= ARENA_HALF_HEIGHT || y - radius <= -ARENA_HALF_HEIGHT {
        -velocity_y
    } else {
        velocity_y
    }
}

#[derive(SystemDesc)]
pub struct MoveBallSystem;

impl<'s> System<'s> for MoveBallSystem {
    type SystemData = (
        Read<'s, GameStatus>,
        Read<'s, Time>,
        ReadStorage<'s, Ball>,
        WriteStorage<'s, Transform>,
    );

    fn run(&mut self, (status, time, balls, mut transforms): Self::SystemData) {
        if !status.is_active() {
            return;
        }
        for (ball, transform) in (&balls, &mut transforms).join() {
            transform.prepend_translation_x(ball.velocity[0] * time.delta_seconds());
            transform.prepend_translation_y(ball.velocity[1] * time.delta_seconds());
        }
    }
}

#[derive(SystemDesc)]
pub struct BounceSystem;

impl<'s> System<'s> for BounceSystem {
    type SystemData = (
        Read<'s, GameStatus>,
        WriteStorage<'s, Ball>,
        ReadStorage<'s, Paddle>,
        ReadStorage<'s, Transform>,
    );

    fn run(&mut self, (status, mut balls, paddles, transforms): Self::SystemData) {
        if !status.is_active() {
            return;
        }
        let mut boxes = (&paddles, &transforms)
            .join()
            .map(|(paddle, transform)| PaddleBox {
                side: paddle.side,
                center: [transform.translation().x, transform.translation().y],
                width: paddle.width,
                height: paddle.height,
            })
            .collect::<Vec<_>>();
        // left is tested before right
        boxes.sort_by_key(|paddle_box| paddle_box.side);

        for (ball, transform) in (&mut balls, &transforms).join() {
            let position = [transform.translation().x, transform.translation().y];
            ball.bounce(position, &boxes);
        }
    }
}
