/// All game entity types. Pure data, no logic.
///
/// World coordinates are in "units": the board is 5 × 6 tiles of 101 × 83
/// units each.  Entity `y` values are sprite offsets, so a lane's `y` is
/// `row * 83 - 41` rather than the row's top edge.

use crate::settings::SpawnRule;
use crate::sprites::SpriteId;

// ── Board geometry ────────────────────────────────────────────────────────────

pub const TILE_WIDTH: i32 = 101;
pub const TILE_HEIGHT: i32 = 83;
pub const GRID_COLS: i32 = 5;
pub const GRID_ROWS: i32 = 6;

/// Vertical sprite offset shared by every entity on the board.
pub const SPRITE_Y_OFFSET: i32 = 41;

/// Centre column of the bottom grass row.
pub const START_X: i32 = 202;
pub const START_Y: i32 = 374;

/// Enemies are created at this x and removed once they pass `RIGHT_BOUNDARY`.
pub const SPAWN_X: i32 = 0;
pub const RIGHT_BOUNDARY: i32 = 500;

/// Hard ceiling on live enemies; settings may only lower it.
pub const MAX_ENEMIES: usize = 10;

/// Fastest enemy speed, in units per second: one board width per 60 Hz frame.
pub const MAX_ENEMY_SPEED: f64 = (GRID_COLS * TILE_WIDTH * 60) as f64;

/// The three stone lanes enemies travel along.
pub const LANES: [i32; 3] = [42, 125, 208];

pub const INITIAL_INFO_TEXT: &str = "Game started!";
pub const WIN_TEXT: &str = "WIN!";
pub const COLLISION_TEXT: &str = "LOST - because of collision! Game restarted";

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    /// Still crossing; nothing to resolve.
    #[default]
    None,
    /// Reached the water row.
    Win,
    /// Left the board.
    Lost,
    /// Touched an enemy in the same lane.
    Collision,
}

impl PlayerStatus {
    pub fn is_terminal(self) -> bool {
        self != PlayerStatus::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub sprite: SpriteId,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(sprite: SpriteId) -> Self {
        Self {
            x: START_X,
            y: START_Y,
            sprite,
            status: PlayerStatus::None,
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub sprite: SpriteId,
    /// Horizontal speed in units per second.
    pub speed: f64,
}

impl Enemy {
    pub fn new(x: i32, y: i32, speed: f64) -> Self {
        Self {
            x,
            y,
            sprite: SpriteId::EnemyBug,
            speed,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation owns for the lifetime of one game process.
/// Cloneable so the pure update functions can return a new copy.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Live enemies in spawn order.
    pub enemies: Vec<Enemy>,
    pub wins: u32,
    pub losses: u32,
    /// Status line shown under the board.
    pub info_text: String,
    pub frame: u64,

    // Spawn tuning, copied from `Settings` at start-up.
    pub enemy_speed: f64,
    pub spawn_threshold: f64,
    pub max_enemies: usize,
    pub spawn_rule: SpawnRule,
}
