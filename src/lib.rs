//! Hex Orbit - A rotating polygon arena reflex game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (walls, rotation, collisions, run state)
//! - `input`: Rotate left/right intent sampling
//! - `renderer`: World-space geometry preparation for a presentation layer
//! - `session`: Screens, wallet, shop and level unlocks
//! - `reward`: Coins earned from a finished run
//! - `settings`: Player preferences

pub mod input;
pub mod renderer;
pub mod reward;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{InputSampler, InputSnapshot};
pub use session::{Screen, Session, SessionError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Speeds and cadences are expressed per simulated frame (nominal 60 Hz).
pub mod consts {
    /// Nominal frames per second; score / FRAMES_PER_SECOND = seconds survived
    pub const FRAMES_PER_SECOND: u64 = 60;

    /// Player triangle orbit radius (fixed, never scaled by pulse)
    pub const PLAYER_RADIUS: f32 = 85.0;
    /// Half extent of the player triangle, radially and tangentially
    pub const PLAYER_SIZE: f32 = 10.0;
    /// Base angular step per frame while a rotate control is held
    pub const BASE_MOVE_SPEED: f32 = 0.17;

    /// Score at which the speed multiplier reaches 2.0
    pub const SPEED_RAMP_FRAMES: f32 = 1000.0;

    /// Wall thickness is uniform in [BASE, BASE + SPREAD)
    pub const WALL_THICKNESS_BASE: f32 = 40.0;
    pub const WALL_THICKNESS_SPREAD: f32 = 20.0;
    /// Spawn cadence never tightens below this many frames
    pub const MIN_SPAWN_INTERVAL: u64 = 15;

    /// Arena rotation direction cycle
    pub const ROTATION_CYCLE_FRAMES: u64 = 1000;
    pub const ROTATION_HALF_CYCLE_FRAMES: u64 = 500;

    /// Pulse oscillator
    pub const PULSE_FLIP_FRAMES: u64 = 30;
    pub const PULSE_STEP: f32 = 0.005;
    pub const PULSE_MIN: f32 = 0.9;
    pub const PULSE_MAX: f32 = 1.1;

    /// Center polygon (drawn only)
    pub const CENTER_POLYGON_SIZE: f32 = 45.0;
    pub const CENTER_WOBBLE: f32 = 5.0;
    /// Angular inset on each edge of a drawn wall (radians)
    pub const WALL_PADDING: f32 = 0.02;

    /// Runs at or under this many frames earn nothing
    pub const MIN_FRAMES_FOR_REWARD: u64 = 120;
}

/// Normalize an angle into [0, 2π)
///
/// Angles accumulate unbounded in either direction, so this wraps negatives
/// forward and guards the rounding case where `rem_euclid` lands on 2π.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
