use crate::constants::{
    AUTO_PADDLE_AMPLITUDE, BALL_SPEED_UP, PADDLE_HEIGHT, PADDLE_OFFSET_LIMIT, PADDLE_STEP,
    PADDLE_WIDTH, PADDLE_X,
};
use crate::states::GameStatus;
use amethyst::{
    core::{timing::Time, transform::Transform},
    derive::SystemDesc,
    ecs::{
        Component, DenseVecStorage, Join, Read, ReadStorage, System, SystemData, Write,
        WriteStorage,
    },
    input::{InputHandler, StringBindings},
};
use log::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn x(self) -> f32 {
        match self {
            Side::Left => -PADDLE_X,
            Side::Right => PADDLE_X,
        }
    }

    /// Horizontal ball speed after a hit: always away from this side, 20% faster.
    pub fn deflect(self, velocity_x: f32) -> f32 {
        match self {
            Side::Left => velocity_x.abs() * BALL_SPEED_UP,
            Side::Right => -velocity_x.abs() * BALL_SPEED_UP,
        }
    }

    fn actions(self) -> (&'static str, &'static str) {
        match self {
            Side::Left => ("left_paddle_up", "left_paddle_down"),
            Side::Right => ("right_paddle_up", "right_paddle_down"),
        }
    }
}

pub struct Paddle {
    pub side: Side,
    pub offset: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            offset: 0.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    /// Applies one sampled frame of key state. The right paddle ignores keys
    /// while it is under auto-control but is still clamped.
    pub fn steer(&mut self, keys: PaddleKeys, right_auto: bool) {
        if self.side == Side::Left || !right_auto {
            if keys.up {
                self.offset += PADDLE_STEP;
            }
            if keys.down {
                self.offset -= PADDLE_STEP;
            }
        }
        self.offset = clamp_offset(self.offset);
    }
}

impl Component for Paddle {
    type Storage = DenseVecStorage<Self>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PaddleKeys {
    pub up: bool,
    pub down: bool,
}

#[derive(Debug, Default)]
pub struct PaddleControl {
    pub right_auto: bool,
}

impl PaddleControl {
    pub fn toggle(&mut self) {
        self.right_auto = !self.right_auto;
        debug!("right paddle auto-control: {}", self.right_auto);
    }
}

pub fn clamp_offset(offset: f32) -> f32 {
    offset.min(PADDLE_OFFSET_LIMIT).max(-PADDLE_OFFSET_LIMIT)
}

pub fn auto_nudge(offset: f32, absolute_seconds: f32) -> f32 {
    clamp_offset(offset + AUTO_PADDLE_AMPLITUDE * absolute_seconds.sin())
}

#[derive(SystemDesc)]
pub struct PaddleInputSystem;

impl<'s> System<'s> for PaddleInputSystem {
    type SystemData = (
        Read<'s, InputHandler<StringBindings>>,
        Write<'s, PaddleControl>,
        WriteStorage<'s, Paddle>,
    );

    fn run(&mut self, (input, mut control, mut paddles): Self::SystemData) {
        let pressed = |action: &str| input.action_is_down(action).unwrap_or(false);
        for paddle in (&mut paddles).join() {
            let (up, down) = paddle.side.actions();
            let keys = PaddleKeys {
                up: pressed(up),
                down: pressed(down),
            };
            paddle.steer(keys, control.right_auto);
        }
        // sampled every frame, so holding the key keeps flipping
        if pressed("toggle_auto") {
            control.toggle();
        }
    }
}

#[derive(SystemDesc)]
pub struct PlacePaddlesSystem;

impl<'s> System<'s> for PlacePaddlesSystem {
    type SystemData = (
        Read<'s, GameStatus>,
        ReadStorage<'s, Paddle>,
        WriteStorage<'s, Transform>,
    );

    fn run(&mut self, (status, paddles, mut transforms): Self::SystemData) {
        if !status.is_active() {
            return;
        }
        for (paddle, transform) in (&paddles, &mut transforms).join() {
            transform.set_translation_xyz(paddle.side.x(), paddle.offset, 0.0);
        }
    }
}

#[derive(SystemDesc)]
pub struct AutoPaddleSystem;

impl<'s> System<'s> for AutoPaddleSystem {
    type SystemData = (
        Read<'s, Time>,
        Read<'s, GameStatus>,
        Read<'s, PaddleControl>,
        WriteStorage<'s, Paddle>,
    );

    fn run(&mut self, (time, status, control, mut paddles): Self::SystemData) {
        if !status.is_active() || !control.right_auto {
            return;
        }
        let seconds = time.absolute_time_seconds() as f32;
        for paddle in (&mut paddles).join() {
            if paddle.side == Side::Right {
                paddle.offset = auto_nudge(paddle.offset, seconds);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use amethyst::core::shrev::EventChannel;
    use amethyst::ecs::{Builder, Entity, RunNow, World, WorldExt};
    use amethyst::input::{Button, InputEvent};
    use amethyst::winit::{
        DeviceId, ElementState, Event, KeyboardInput, ModifiersState, VirtualKeyCode,
        WindowEvent, WindowId,
    };
    use float_cmp::*;

    const UP: PaddleKeys = PaddleKeys {
        up: true,
        down: false,
    };
    const DOWN: PaddleKeys = PaddleKeys {
        up: false,
        down: true,
    };

    #[test]
    fn test_offset_stays_clamped() {
        let mut paddle = Paddle::new(Side::Left);
        for _ in 0..40 {
            paddle.steer(UP, false);
            assert!(paddle.offset <= PADDLE_OFFSET_LIMIT);
        }
        assert!(approx_eq!(f32, paddle.offset, PADDLE_OFFSET_LIMIT));
        for step in 0..100 {
            let keys = if step % 3 == 2 { UP } else { DOWN };
            paddle.steer(keys, false);
            assert!(paddle.offset >= -PADDLE_OFFSET_LIMIT && paddle.offset <= PADDLE_OFFSET_LIMIT);
        }
        assert!(approx_eq!(f32, paddle.offset, -PADDLE_OFFSET_LIMIT));
    }

    #[test]
    fn test_both_keys_cancel() {
        let mut paddle = Paddle::new(Side::Right);
        paddle.steer(
            PaddleKeys {
                up: true,
                down: true,
            },
            false,
        );
        assert!(approx_eq!(f32, paddle.offset, 0.0, epsilon = 0.000001));
    }

    #[test]
    fn test_auto_control_ignores_right_keys_only() {
        let mut left = Paddle::new(Side::Left);
        let mut right = Paddle::new(Side::Right);
        left.steer(UP, true);
        right.steer(UP, true);
        assert!(approx_eq!(f32, left.offset, PADDLE_STEP));
        assert!(approx_eq!(f32, right.offset, 0.0));

        right.offset = 3.0;
        right.steer(DOWN, true);
        assert!(approx_eq!(f32, right.offset, PADDLE_OFFSET_LIMIT));
    }

    #[test]
    fn test_toggle_parity() {
        for times in 0..6 {
            let mut control = PaddleControl::default();
            for _ in 0..times {
                control.toggle();
            }
            let mut right = Paddle::new(Side::Right);
            right.steer(UP, control.right_auto);
            if times % 2 == 0 {
                assert!(!control.right_auto);
                assert!(approx_eq!(f32, right.offset, PADDLE_STEP));
            } else {
                assert!(control.right_auto);
                assert!(approx_eq!(f32, right.offset, 0.0));
            }
        }
    }

    #[test]
    fn test_auto_nudge() {
        let half_pi = std::f32::consts::FRAC_PI_2;
        assert!(approx_eq!(
            f32,
            auto_nudge(0.0, half_pi),
            AUTO_PADDLE_AMPLITUDE,
            epsilon = 0.000001
        ));
        assert!(approx_eq!(
            f32,
            auto_nudge(0.0, -half_pi),
            -AUTO_PADDLE_AMPLITUDE,
            epsilon = 0.000001
        ));
        assert!(approx_eq!(f32, auto_nudge(0.74, half_pi), PADDLE_OFFSET_LIMIT));
    }

    #[test]
    fn test_deflect_direction() {
        assert!(approx_eq!(f32, Side::Left.deflect(-2.0), 2.4, epsilon = 0.000001));
        assert!(approx_eq!(f32, Side::Left.deflect(2.0), 2.4, epsilon = 0.000001));
        assert!(approx_eq!(f32, Side::Right.deflect(2.0), -2.4, epsilon = 0.000001));
        assert!(approx_eq!(f32, Side::Right.deflect(-2.0), -2.4, epsilon = 0.000001));
    }

    #[test]
    fn test_place_paddles() {
        let mut world = World::new();
        world.register::<Paddle>();
        world.register::<Transform>();
        world.insert(GameStatus::Active);
        let mut paddle = Paddle::new(Side::Right);
        paddle.offset = -0.5;
        let entity = world
            .create_entity()
            .with(paddle)
            .with(Transform::default())
            .build();

        PlacePaddlesSystem.run_now(&world);

        let transforms = world.read_storage::<Transform>();
        let translation = transforms.get(entity).unwrap().translation();
        assert!(approx_eq!(f32, translation.x, PADDLE_X));
        assert!(approx_eq!(f32, translation.y, -0.5));
    }

    #[test]
    fn test_auto_paddle_idle_without_toggle() {
        let mut world = World::new();
        world.register::<Paddle>();
        world.insert(GameStatus::Active);
        world.insert(PaddleControl::default());
        world.insert(Time::default());
        let mut paddle = Paddle::new(Side::Right);
        paddle.offset = 0.25;
        let entity = world.create_entity().with(paddle).build();

        AutoPaddleSystem.run_now(&world);

        let paddles = world.read_storage::<Paddle>();
        assert!(approx_eq!(f32, paddles.get(entity).unwrap().offset, 0.25));
    }

    fn key_press(scancode: u32, key: VirtualKeyCode) -> Event {
        Event::WindowEvent {
            window_id: unsafe { WindowId::dummy() },
            event: WindowEvent::KeyboardInput {
                device_id: unsafe { DeviceId::dummy() },
                input: KeyboardInput {
                    scancode,
                    state: ElementState::Pressed,
                    virtual_keycode: Some(key),
                    modifiers: ModifiersState::default(),
                },
            },
        }
    }

    fn input_holding(keys: &[(u32, VirtualKeyCode)]) -> InputHandler<StringBindings> {
        let mut input = InputHandler::<StringBindings>::new();
        let actions = [
            ("right_paddle_up", VirtualKeyCode::Up),
            ("right_paddle_down", VirtualKeyCode::Down),
            ("toggle_auto", VirtualKeyCode::T),
        ];
        for (action, key) in actions.iter() {
            input
                .bindings
                .insert_action_binding(action.to_string(), [Button::Key(*key)].iter().cloned())
                .unwrap();
        }
        let mut events = EventChannel::<InputEvent<StringBindings>>::new();
        for (scancode, key) in keys {
            input.send_event(&key_press(*scancode, *key), &mut events, 1.0);
        }
        input
    }

    #[test]
    fn test_input_steers_before_toggling_even_when_finished() {
        let mut world = World::new();
        world.register::<Paddle>();
        world.insert(GameStatus::Finished);
        world.insert(PaddleControl::default());
        world.insert(input_holding(&[
            (20, VirtualKeyCode::T),
            (103, VirtualKeyCode::Up),
        ]));
        let right = world.create_entity().with(Paddle::new(Side::Right)).build();

        PaddleInputSystem.run_now(&world);

        let paddles = world.read_storage::<Paddle>();
        assert!(approx_eq!(f32, paddles.get(right).unwrap().offset, PADDLE_STEP));
        assert!(world.read_resource::<PaddleControl>().right_auto);
    }

    fn auto_world(status: GameStatus, offsets: (f32, f32)) -> (World, Entity, Entity) {
        let mut world = World::new();
        world.register::<Paddle>();
        world.insert(status);
        world.insert(PaddleControl { right_auto: true });
        let mut time = Time::default();
        time.set_delta_seconds(1.0);
        world.insert(time);

        let mut left = Paddle::new(Side::Left);
        left.offset = offsets.0;
        let mut right = Paddle::new(Side::Right);
        right.offset = offsets.1;
        let left = world.create_entity().with(left).build();
        let right = world.create_entity().with(right).build();
        (world, left, right)
    }

    #[test]
    fn test_auto_paddle_nudges_right_only() {
        let (world, left, right) = auto_world(GameStatus::Active, (0.1, 0.2));
        let seconds = world.read_resource::<Time>().absolute_time_seconds() as f32;
        assert!(seconds > 0.0);

        AutoPaddleSystem.run_now(&world);

        let paddles = world.read_storage::<Paddle>();
        let right_offset = paddles.get(right).unwrap().offset;
        assert!(approx_eq!(f32, right_offset, auto_nudge(0.2, seconds)));
        assert!(!approx_eq!(f32, right_offset, 0.2));
        assert!(approx_eq!(f32, paddles.get(left).unwrap().offset, 0.1));
    }

    #[test]
    fn test_auto_paddle_reclamps() {
        let (world, _, right) = auto_world(GameStatus::Active, (0.0, PADDLE_OFFSET_LIMIT));
        // sin(1.0) > 0, so the nudge pushes past the limit
        AutoPaddleSystem.run_now(&world);

        let paddles = world.read_storage::<Paddle>();
        assert!(approx_eq!(f32, paddles.get(right).unwrap().offset, PADDLE_OFFSET_LIMIT));
    }

    #[test]
    fn test_auto_paddle_frozen_when_finished() {
        let (world, left, right) = auto_world(GameStatus::Finished, (0.1, 0.2));

        AutoPaddleSystem.run_now(&world);

        let paddles = world.read_storage::<Paddle>();
        assert!(approx_eq!(f32, paddles.get(right).unwrap().offset, 0.2));
        assert!(approx_eq!(f32, paddles.get(left).unwrap().offset, 0.1));
    }
}
