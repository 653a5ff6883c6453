//! Bug Crossing: a lane-crossing arcade game for the terminal.
//!
//! - `entities`: plain data (player, enemies, the whole game state)
//! - `compute`: the per-tick simulation and input handling
//! - `display`: terminal rendering
//! - `input`: key code / key event to direction mapping
//! - `sprites`: glyph art and the sprite cache
//! - `settings`: tunables loaded from JSON

pub mod compute;
pub mod display;
pub mod entities;
pub mod input;
pub mod settings;
pub mod sprites;

pub use settings::{Settings, SpawnRule};
