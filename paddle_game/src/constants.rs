pub const ARENA_HALF_WIDTH: f32 = 1.777;
pub const ARENA_HALF_HEIGHT: f32 = 1.0;

pub const CLEAR_COLOR: [f32; 4] = [0.976_562_5, 0.972_656_25, 0.960_937_5, 1.0];

pub const PADDLE_WIDTH: f32 = 0.2;
pub const PADDLE_HEIGHT: f32 = 1.0;
pub const PADDLE_X: f32 = 1.6;
pub const PADDLE_OFFSET_LIMIT: f32 = 0.75;
pub const PADDLE_STEP: f32 = 0.05;

pub const AUTO_PADDLE_AMPLITUDE: f32 = 0.03;

pub const BALL_VELOCITY_X: f32 = 2.3;
pub const BALL_VELOCITY_Y: f32 = 1.9;
pub const BALL_RADIUS: f32 = 0.1;
pub const BALL_SCALE: f32 = 0.2;
pub const BALL_SPEED_UP: f32 = 1.2;
