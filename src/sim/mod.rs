//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One tick per rendered frame, speeds in per-frame units
//! - Collision uses unscaled radii; rotation and pulse are cosmetic
//! - Spawn randomness comes from an injectable RNG
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod state;
pub mod theme;
pub mod tick;
pub mod wall;

pub use collision::{Collision, first_collision, player_hits_wall};
pub use engine::{Engine, FrameResult};
pub use state::{Arena, RunPhase, RunState};
pub use theme::{Palette, Theme, ThemeConfig, ThemeError, level_by_id, levels};
pub use tick::{TickInput, spawn_batch, spawn_interval, speed_multiplier, tick};
pub use wall::{Wall, sector_of, sector_size};
