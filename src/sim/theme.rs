//! Level themes: simulation parameters, palette and the built-in catalog
//!
//! The engine only reads `ThemeConfig`. Everything else on `Theme` is for the
//! shop, the reward calculator and the geometry preparation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a theme cannot start a run
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("arena needs at least 3 sides, got {0}")]
    TooFewSides(u32),
    #[error("{field} must not be negative, got {value}")]
    NegativeSpeed { field: &'static str, value: f32 },
    #[error("wall speed must be positive, got {0}")]
    StationaryWalls(f32),
    #[error("spawn rate must be at least one frame")]
    ZeroSpawnRate,
    #[error("{0} is not a finite number")]
    NonFiniteValue(&'static str),
    #[error("invalid theme json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-level simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Radians per frame the arena spins
    pub rotation_speed: f32,
    /// Distance per frame walls close in (before the speed multiplier)
    pub wall_speed: f32,
    /// Frames between spawn batches (before score tightening)
    pub spawn_rate: u32,
    /// Number of equal angular sectors
    pub sides: u32,
}

impl ThemeConfig {
    /// Reject configs that would produce undefined geometry
    pub fn validate(&self) -> Result<(), ThemeError> {
        if self.sides < 3 {
            return Err(ThemeError::TooFewSides(self.sides));
        }
        if !self.rotation_speed.is_finite() {
            return Err(ThemeError::NonFiniteValue("rotation speed"));
        }
        if !self.wall_speed.is_finite() {
            return Err(ThemeError::NonFiniteValue("wall speed"));
        }
        if self.rotation_speed < 0.0 {
            return Err(ThemeError::NegativeSpeed {
                field: "rotation speed",
                value: self.rotation_speed,
            });
        }
        // Walls that never move are never pruned
        if self.wall_speed <= 0.0 {
            return Err(ThemeError::StationaryWalls(self.wall_speed));
        }
        if self.spawn_rate == 0 {
            return Err(ThemeError::ZeroSpawnRate);
        }
        Ok(())
    }
}

/// Colours as `#rrggbb` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: String,
    pub background_pulse: String,
    pub player: String,
    pub wall: String,
    /// Default center colour, overridden by an equipped skin
    pub center: String,
}

/// A playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    /// Coins needed to unlock in the shop
    pub unlock_cost: u64,
    /// Multiplier applied to seconds survived when paying out coins
    pub coin_multiplier: f32,
    pub colors: Palette,
    pub config: ThemeConfig,
}

impl Theme {
    /// Decode and validate a theme supplied by a host
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        let theme: Theme = serde_json::from_str(json)?;
        theme.config.validate()?;
        if !theme.coin_multiplier.is_finite() {
            return Err(ThemeError::NonFiniteValue("coin multiplier"));
        }
        Ok(theme)
    }
}

#[allow(clippy::too_many_arguments)]
fn level(
    id: &str,
    name: &str,
    unlock_cost: u64,
    coin_multiplier: f32,
    background: &str,
    wall: &str,
    rotation_speed: f32,
    wall_speed: f32,
    spawn_rate: u32,
) -> Theme {
    Theme {
        id: id.to_string(),
        name: name.to_string(),
        unlock_cost,
        coin_multiplier,
        colors: Palette {
            background: background.to_string(),
            background_pulse: background.to_string(),
            player: "#ffffff".to_string(),
            wall: wall.to_string(),
            center: "#ffffff".to_string(),
        },
        config: ThemeConfig {
            rotation_speed,
            wall_speed,
            spawn_rate,
            sides: 6,
        },
    }
}

/// The 10 built-in levels, easiest first
///
/// Early levels spawn slower for wider gaps; harder levels pay more.
pub fn levels() -> Vec<Theme> {
    vec![
        level("lvl_1", "Tutorial", 0, 0.2, "#111111", "#444444", 0.01, 2.0, 90),
        level("lvl_2", "Beginner", 0, 0.5, "#0a0a2a", "#00ffff", 0.015, 3.0, 75),
        level("lvl_3", "Advance", 150, 1.0, "#1a0a0a", "#ff5500", 0.02, 3.5, 65),
        level("lvl_4", "Fast", 500, 1.2, "#001a00", "#00ff00", 0.025, 4.0, 55),
        level("lvl_5", "Faster", 2000, 1.5, "#1a001a", "#ff00ff", 0.03, 4.5, 45),
        level("lvl_6", "Hardcore", 4000, 2.0, "#2a2a00", "#ffff00", 0.035, 5.0, 35),
        level("lvl_7", "Super", 6000, 2.5, "#002a2a", "#00ffff", 0.04, 5.5, 30),
        level("lvl_8", "Hyper", 10000, 3.0, "#2a0000", "#ff0000", 0.05, 6.0, 25),
        level("lvl_9", "Ultra", 20000, 4.0, "#333333", "#ffffff", 0.06, 7.0, 22),
        level("lvl_10", "Impossible", 30000, 5.0, "#000000", "#ffffff", 0.08, 8.0, 18),
    ]
}

/// Look up a built-in level by id
pub fn level_by_id(id: &str) -> Option<Theme> {
    levels().into_iter().find(|t| t.id == id)
}
