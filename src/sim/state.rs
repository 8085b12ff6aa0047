//! Run state and core simulation types
//!
//! Everything one run mutates lives on `RunState`; a fresh value is built at
//! every run start and dropped when the run is discarded.

use serde::{Deserialize, Serialize};

use super::theme::ThemeConfig;
use super::wall::{Wall, frames_until_pruned};
use crate::consts::{WALL_THICKNESS_BASE, WALL_THICKNESS_SPREAD};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Before a start signal or after a stop: no walls, zero score
    #[default]
    Idle,
    /// Frames are being simulated
    Active,
    /// The player hit a wall; the frame is frozen until the next reset
    Terminated,
}

/// Viewport the arena is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half the viewport diagonal: walls spawn here, just out of sight in
    /// every corner
    pub fn max_radius(&self) -> f32 {
        (self.width / 2.0).hypot(self.height / 2.0)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    /// Player angle (radians, unbounded; only normalized when tested)
    pub player_angle: f32,
    /// Arena rotation (radians, unbounded, cosmetic)
    pub arena_rotation: f32,
    /// Frames simulated this run
    pub frame_count: u64,
    /// Frames survived
    pub score: u64,
    /// Scene scale factor in [0.9, 1.1] (cosmetic)
    pub pulse: f32,
    /// Pulse direction, +1 or -1
    pub pulse_dir: f32,
    /// Live walls in spawn order
    pub walls: Vec<Wall>,
    /// Parameters for this run; fixed until the next reset
    pub config: ThemeConfig,
    /// Spawn distance for new walls
    pub max_radius: f32,
    /// Next wall ID
    next_id: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self::idle()
    }
}

impl RunState {
    /// An idle state with no run in progress
    pub fn idle() -> Self {
        Self {
            phase: RunPhase::Idle,
            player_angle: 0.0,
            arena_rotation: 0.0,
            frame_count: 0,
            score: 0,
            pulse: 1.0,
            pulse_dir: 1.0,
            walls: Vec::new(),
            config: ThemeConfig {
                rotation_speed: 0.0,
                wall_speed: 0.0,
                spawn_rate: 1,
                sides: 6,
            },
            max_radius: 0.0,
            next_id: 1,
        }
    }

    /// A fresh active run (config must already be validated)
    pub fn start(config: ThemeConfig, max_radius: f32) -> Self {
        Self {
            phase: RunPhase::Active,
            config,
            max_radius,
            ..Self::idle()
        }
    }

    /// Allocate a new wall ID
    pub fn next_wall_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Add a wall on `side` and return its ID
    pub fn push_wall(&mut self, side: u32, distance: f32, thickness: f32) -> u32 {
        let id = self.next_wall_id();
        self.walls.push(Wall::new(id, side, distance, thickness));
        id
    }

    /// Upper bound on the frames a freshly spawned wall stays live
    ///
    /// Uses the unramped wall speed, so later walls clear sooner. `None` for a
    /// config whose walls never move.
    pub fn max_wall_lifetime(&self) -> Option<u64> {
        frames_until_pruned(
            self.max_radius,
            WALL_THICKNESS_BASE + WALL_THICKNESS_SPREAD,
            self.config.wall_speed,
        )
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == RunPhase::Active
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::Terminated
    }
}
