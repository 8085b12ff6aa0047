//! Per-frame simulation tick
//!
//! One call advances a run by exactly one frame. Speeds and cadences are in
//! per-frame units, so difficulty follows the host's tick rate (nominally
//! 60 Hz).

use rand::Rng;

use super::collision::first_collision;
use super::state::{RunPhase, RunState};
use crate::consts::*;
use crate::input::InputSnapshot;

/// Inputs for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Player speed multiplier from settings
    pub sensitivity: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            rotate_left: false,
            rotate_right: false,
            sensitivity: 1.0,
        }
    }
}

impl TickInput {
    pub fn new(snapshot: InputSnapshot, sensitivity: f32) -> Self {
        Self {
            rotate_left: snapshot.rotate_left,
            rotate_right: snapshot.rotate_right,
            sensitivity,
        }
    }
}

/// Difficulty ramp applied to player and wall speeds
#[inline]
pub fn speed_multiplier(score: u64) -> f32 {
    1.0 + score as f32 / SPEED_RAMP_FRAMES
}

/// Frames between spawn batches; tightens by one frame per second survived
pub fn spawn_interval(spawn_rate: u32, score: u64) -> u64 {
    let interval = (spawn_rate as f32 - score as f32 / FRAMES_PER_SECOND as f32).floor();
    if interval < MIN_SPAWN_INTERVAL as f32 {
        MIN_SPAWN_INTERVAL
    } else {
        interval as u64
    }
}

/// Arena spin direction: negative through frame 500 of every 1000, then positive
#[inline]
pub fn rotation_direction(frame_count: u64) -> f32 {
    if frame_count % ROTATION_CYCLE_FRAMES > ROTATION_HALF_CYCLE_FRAMES {
        1.0
    } else {
        -1.0
    }
}

/// Spawn one batch: a wall on every side except a random gap side
///
/// Returns the gap side.
pub fn spawn_batch<R: Rng>(state: &mut RunState, rng: &mut R) -> u32 {
    let sides = state.config.sides;
    let gap_side = rng.random_range(0..sides);
    let thickness = WALL_THICKNESS_BASE + rng.random_range(0.0..WALL_THICKNESS_SPREAD);
    let distance = state.max_radius;

    for side in (0..sides).filter(|&s| s != gap_side) {
        state.push_wall(side, distance, thickness);
    }

    log::debug!(
        "Frame {}: spawned {} walls, gap side {}, thickness {:.1}",
        state.frame_count,
        sides - 1,
        gap_side,
        thickness
    );
    gap_side
}

fn update_pulse(state: &mut RunState) {
    if state.frame_count % PULSE_FLIP_FRAMES == 0 {
        state.pulse_dir = -state.pulse_dir;
    }
    state.pulse = (state.pulse + PULSE_STEP * state.pulse_dir).clamp(PULSE_MIN, PULSE_MAX);
}

/// Advance the run by one frame
///
/// Returns `Some(score)` on the frame the player collides; that is the only
/// frame that ever returns `Some` for a run. Idle and terminated runs are
/// left untouched.
pub fn tick<R: Rng>(state: &mut RunState, input: &TickInput, rng: &mut R) -> Option<u64> {
    if state.phase != RunPhase::Active {
        return None;
    }

    let speed = speed_multiplier(state.score);

    // Player rotation; both held cancel out
    let move_speed = BASE_MOVE_SPEED * speed * input.sensitivity;
    if input.rotate_left {
        state.player_angle -= move_speed;
    }
    if input.rotate_right {
        state.player_angle += move_speed;
    }

    // Cosmetic: arena spin and pulse
    state.arena_rotation += state.config.rotation_speed * rotation_direction(state.frame_count);
    update_pulse(state);

    state.frame_count += 1;

    if state.frame_count % spawn_interval(state.config.spawn_rate, state.score) == 0 {
        spawn_batch(state, rng);
    }

    let wall_step = state.config.wall_speed * speed;
    for wall in &mut state.walls {
        wall.advance(wall_step);
    }

    // Collide against advanced distances before anything is pruned
    let collision = first_collision(state.player_angle, &state.walls, state.config.sides);
    state.walls.retain(|w| !w.has_passed_center());

    match collision {
        Some(hit) => {
            state.phase = RunPhase::Terminated;
            log::info!(
                "Run over at frame {}: hit wall {} on side {}, score {}",
                state.frame_count,
                hit.wall_id,
                hit.side,
                state.score
            );
            Some(state.score)
        }
        None => {
            state.score += 1;
            None
        }
    }
}
