//! Runtime configuration loaded from an optional TOML file.
//!
//! [`GameConfig`] is what the file holds; every key is optional and falls back
//! to the compiled default. [`GameConfig::rules`] turns it into the [`Rules`]
//! the simulation reads each tick, deriving entity sizes and speeds from the
//! world dimensions.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GameError, GameResult};

pub const CONFIG_FILE: &str = "arcade_shooter.toml";
pub const CONFIG_ENV: &str = "ARCADE_SHOOTER_CONFIG";

/// Bullets are always 4×10 world units.
pub const BULLET_WIDTH: i32 = 4;
pub const BULLET_HEIGHT: i32 = 10;

/// Largest accepted world side. World coordinates are multiplied by the
/// terminal size (at most `u16::MAX`) when mapped to cells, in `i32`.
pub const MAX_WORLD_SIZE: i32 = 16_384;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub world_width: i32,
    pub world_height: i32,
    pub tick_rate: u32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub max_lives: u32,
    pub fire_cooldown_ms: u64,
    pub invulnerability_ms: u64,

    // ── Power-ups ────────────────────────────────────────────────────────────
    pub powerup_duration_ms: u64,
    pub powerup_ttl_ticks: u32,

    // ── Spawning (1 in N per tick, 0 disables) ───────────────────────────────
    pub enemy_spawn_chance: u32,
    pub obstacle_spawn_chance: u32,
    pub powerup_spawn_chance: u32,

    // ── Sweep ────────────────────────────────────────────────────────────────
    pub sweep_margin: i32,
    pub manual_sweep_margin: i32,

    // ── Files & output ───────────────────────────────────────────────────────
    pub high_score_file: Option<PathBuf>,
    pub bell: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 1280,
            world_height: 720,
            tick_rate: 60,
            max_lives: 3,
            fire_cooldown_ms: 300,
            invulnerability_ms: 1500,
            powerup_duration_ms: 8000,
            powerup_ttl_ticks: 1200,
            enemy_spawn_chance: 40,
            obstacle_spawn_chance: 60,
            powerup_spawn_chance: 60,
            sweep_margin: 2,
            manual_sweep_margin: 20,
            high_score_file: None,
            bell: true,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> GameResult<Self> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|e| GameError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` if it exists. A missing file yields the defaults; an
    /// unreadable, malformed or invalid one is logged and also yields the
    /// defaults, so a bad config never stops the game from starting.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents, path) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("{}; using defaults", e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no {} found; using compiled defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("cannot read {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Config path: `$ARCADE_SHOOTER_CONFIG` if set, else `arcade_shooter.toml`
    /// in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    pub fn validate(&self) -> GameResult<()> {
        // Narrower than the smallest ship and movement clamping breaks.
        if self.world_width < 40 {
            return Err(invalid("world_width", self.world_width as i64, ">= 40"));
        }
        if self.world_width > MAX_WORLD_SIZE {
            return Err(invalid("world_width", self.world_width as i64, "<= 16384"));
        }
        if self.world_height > MAX_WORLD_SIZE {
            return Err(invalid("world_height", self.world_height as i64, "<= 16384"));
        }
        // The ship sits 20 units above the bottom and has to fit below row 0.
        let rules = self.rules();
        if self.world_height < rules.player_height + 20 {
            return Err(invalid(
                "world_height",
                self.world_height as i64,
                ">= ship height + 20",
            ));
        }
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", 0, "> 0"));
        }
        if self.max_lives == 0 {
            return Err(invalid("max_lives", 0, "> 0"));
        }
        if self.sweep_margin < 0 {
            return Err(invalid("sweep_margin", self.sweep_margin as i64, ">= 0"));
        }
        if self.manual_sweep_margin < 0 {
            return Err(invalid(
                "manual_sweep_margin",
                self.manual_sweep_margin as i64,
                ">= 0",
            ));
        }
        Ok(())
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file.clone().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".arcade_shooter_score")
        })
    }

    pub fn rules(&self) -> Rules {
        let w = self.world_width;
        let h = self.world_height;

        let player_width = (w / 20).max(40);
        let player_height = player_width * 4 / 5;
        let obstacle_speed = (h / 300).max(2);

        Rules {
            world_width: w,
            world_height: h,
            max_lives: self.max_lives,
            player_width,
            player_height,
            player_speed: (w / 300).max(4),
            bullet_speed: (h / 80).max(6),
            enemy_width: player_width * 9 / 10,
            enemy_height: player_height * 3 / 4,
            enemy_speed: (h / 600).max(1),
            obstacle_size: (w / 60).max(24),
            obstacle_speed,
            powerup_speed: (obstacle_speed / 2).max(1),
            powerup_ttl: self.powerup_ttl_ticks,
            fire_cooldown_ms: self.fire_cooldown_ms,
            invulnerability_ms: self.invulnerability_ms,
            powerup_duration_ms: self.powerup_duration_ms,
            enemy_spawn_chance: self.enemy_spawn_chance,
            obstacle_spawn_chance: self.obstacle_spawn_chance,
            powerup_spawn_chance: self.powerup_spawn_chance,
            sweep_margin: self.sweep_margin,
            manual_sweep_margin: self.manual_sweep_margin,
            popup_ttl: 60,
            pickup_message_ttl: 80,
        }
    }
}

fn invalid(name: &'static str, value: i64, expected: &'static str) -> GameError {
    GameError::InvalidConfig {
        name,
        value,
        expected,
    }
}

/// Everything the simulation needs to know about sizes, speeds and odds.
/// Cheap to copy so it rides along inside every `GameState`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rules {
    pub world_width: i32,
    pub world_height: i32,
    pub max_lives: u32,

    pub player_width: i32,
    pub player_height: i32,
    pub player_speed: i32,
    /// Units per tick, upward.
    pub bullet_speed: i32,
    pub enemy_width: i32,
    pub enemy_height: i32,
    pub enemy_speed: i32,
    pub obstacle_size: i32,
    pub obstacle_speed: i32,
    pub powerup_speed: i32,
    pub powerup_ttl: u32,

    pub fire_cooldown_ms: u64,
    pub invulnerability_ms: u64,
    pub powerup_duration_ms: u64,

    pub enemy_spawn_chance: u32,
    pub obstacle_spawn_chance: u32,
    pub powerup_spawn_chance: u32,

    pub sweep_margin: i32,
    pub manual_sweep_margin: i32,

    pub popup_ttl: u32,
    pub pickup_message_ttl: u32,
}

impl Default for Rules {
    fn default() -> Self {
        GameConfig::default().rules()
    }
}
