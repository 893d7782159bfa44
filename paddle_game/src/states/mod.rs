mod in_game;

pub use in_game::InGame;

/// Whether the game loop is still running.
///
/// This is also the only gate on paddle placement, ball movement, bounces and
/// the auto-control nudge; there is no separate game-over flag. Those systems
/// stop as soon as the status is `Finished`, so the frame in which the window
/// asks to close renders without advancing the simulation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameStatus {
    Active,
    Finished,
}

impl GameStatus {
    pub fn is_active(&self) -> bool {
        *self == GameStatus::Active
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Active
    }
}
