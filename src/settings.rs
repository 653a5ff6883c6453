//! Game settings
//!
//! Read once at start-up from a JSON file.  Every field has a default, so a
//! partial file (or no file at all) is fine.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::entities::{MAX_ENEMIES, MAX_ENEMY_SPEED};
use crate::sprites::SpriteId;

pub const CONFIG_ENV: &str = "BUG_CROSSING_CONFIG";

/// How the spawn check picks which enemies must have cleared the spawn area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnRule {
    /// Only the most recently iterated enemy (last in the collection).
    #[default]
    LastEnemy,
    /// Every live enemy.
    AllEnemies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerCharacter {
    #[default]
    CatGirl,
    Boy,
}

impl PlayerCharacter {
    pub fn sprite(self) -> SpriteId {
        match self {
            PlayerCharacter::CatGirl => SpriteId::CharCatGirl,
            PlayerCharacter::Boy => SpriteId::CharBoy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enemy speed in units per second
    pub enemy_speed: f64,
    /// A uniform draw in [0, 1) must exceed this for a spawn (0.98 ≈ 2 %)
    pub spawn_threshold: f64,
    /// Ceiling on live enemies, at most `MAX_ENEMIES`
    pub max_enemies: usize,
    pub spawn_rule: SpawnRule,
    /// Frame budget in milliseconds
    pub frame_ms: u64,
    /// Capacity of the key event queue between the reader thread and the loop
    pub input_queue: usize,
    pub player_sprite: PlayerCharacter,
    /// Where log output goes; the terminal itself is owned by the game
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enemy_speed: 70.0,
            spawn_threshold: 0.98,
            max_enemies: 10,
            spawn_rule: SpawnRule::LastEnemy,
            frame_ms: 16,
            input_queue: 32,
            player_sprite: PlayerCharacter::CatGirl,
            log_file: None,
        }
    }
}

impl Settings {
    /// Read and parse a settings file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(settings.sanitized())
    }

    /// Like `load`, but never fails: a missing or broken file means defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Clamp values into ranges the game can run with.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.enemy_speed.is_finite() || self.enemy_speed < 0.0 {
            self.enemy_speed = defaults.enemy_speed;
        }
        self.enemy_speed = self.enemy_speed.min(MAX_ENEMY_SPEED);
        self.max_enemies = self.max_enemies.min(MAX_ENEMIES);
        if !self.spawn_threshold.is_finite() {
            self.spawn_threshold = defaults.spawn_threshold;
        }
        self.spawn_threshold = self.spawn_threshold.clamp(0.0, 1.0);
        self.frame_ms = self.frame_ms.clamp(1, 1000);
        self.input_queue = self.input_queue.max(1);
        self
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("bug_crossing.log"))
    }
}

/// `$BUG_CROSSING_CONFIG`, else `~/.bug_crossing.json`.
pub fn settings_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".bug_crossing.json")
}
