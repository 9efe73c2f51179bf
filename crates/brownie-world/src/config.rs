use serde::{Deserialize, Serialize};

use crate::character::Hitbox;
use crate::error::ConfigError;

/// Grid width in tiles.
pub const WORLD_WIDTH: u32 = 80;
/// Grid height in tiles.
pub const WORLD_HEIGHT: u32 = 60;
/// Tile edge length in world units.
pub const TILE_SIZE: u32 = 8;
/// Number of ground rows at the bottom of the grid.
pub const GROUND_ROWS: u32 = 4;
/// Horizontal speed while a direction is held.
pub const MOVE_SPEED: i32 = 5;
/// Upward speed at jump start.
pub const JUMP_SPEED: i32 = 5;
/// Frames of guaranteed ascent after a jump starts.
pub const JUMP_FRAMES: u32 = 10;
/// Terminal fall speed, also the cap on the approach speed.
pub const FALL_SPEED: i32 = 5;
/// Steps per second targeted by the frame loop.
pub const TICK_RATE_HZ: f32 = 60.0;

/// How a character's x position is mapped to the tile column probed below its feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    /// `floor(x) * tile_size / grid_width`, the same column for the whole footprint.
    #[default]
    Legacy,
    /// `floor(column / tile_size)` for each scanned column.
    PerColumn,
}

/// World grid dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub ground_rows: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            tile_size: TILE_SIZE,
            ground_rows: GROUND_ROWS,
        }
    }
}

/// Spawn point and body of the controlled character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub height: i32,
    pub hitbox: Hitbox,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            spawn_x: 1.0,
            spawn_y: 300.0,
            height: 64,
            hitbox: Hitbox::default(),
        }
    }
}

/// Per-frame motion tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub move_speed: i32,
    pub jump_speed: i32,
    pub jump_frames: u32,
    pub fall_speed: i32,
    pub column_mapping: ColumnMapping,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            jump_speed: JUMP_SPEED,
            jump_frames: JUMP_FRAMES,
            fall_speed: FALL_SPEED,
            column_mapping: ColumnMapping::default(),
        }
    }
}

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrownieConfig {
    pub world: WorldConfig,
    pub character: CharacterConfig,
    pub physics: PhysicsConfig,
    pub tick_rate_hz: f32,
}

impl Default for BrownieConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            character: CharacterConfig::default(),
            physics: PhysicsConfig::default(),
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl BrownieConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("BROWNIE_CONFIG").unwrap_or_else(|_| "config/brownie.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::debug!(%path, "Loaded config");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    BrownieConfig::default()
                },
            },
            Err(_) => BrownieConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if w.width == 0 || w.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "world must be at least 1x1 tiles, got {}x{}",
                w.width, w.height
            )));
        }
        if w.tile_size == 0 {
            return Err(ConfigError::Invalid("world.tile_size must be > 0".into()));
        }
        if w.ground_rows > w.height {
            return Err(ConfigError::Invalid(format!(
                "world.ground_rows ({}) exceeds world.height ({})",
                w.ground_rows, w.height
            )));
        }
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick_rate_hz must be > 0, got {}",
                self.tick_rate_hz
            )));
        }

        let p = &self.physics;
        if p.move_speed <= 0 || p.jump_speed <= 0 || p.fall_speed <= 0 {
            return Err(ConfigError::Invalid(
                "physics speeds must all be > 0".into(),
            ));
        }
        if p.jump_frames == 0 {
            return Err(ConfigError::Invalid("physics.jump_frames must be > 0".into()));
        }

        let c = &self.character;
        if c.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "character.height must be > 0, got {}",
                c.height
            )));
        }
        if c.hitbox.left > c.hitbox.right {
            return Err(ConfigError::Invalid(format!(
                "character.hitbox.left ({}) is right of hitbox.right ({})",
                c.hitbox.left, c.hitbox.right
            )));
        }
        if !(c.spawn_x.is_finite() && c.spawn_y.is_finite()) {
            return Err(ConfigError::Invalid("character spawn must be finite".into()));
        }
        Ok(())
    }
}
