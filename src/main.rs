//! Hex Orbit entry point
//!
//! Native builds run a headless autopilot session: pick a level, let a simple
//! bot steer toward the gap of the nearest incoming batch, and log the result.
//!
//! Usage: `hex-orbit [level 1-10] [seed]`

use hex_orbit::consts::{FRAMES_PER_SECOND, PLAYER_RADIUS};
use hex_orbit::sim::{Arena, FrameResult, sector_of, sector_size};
use hex_orbit::{InputSnapshot, Screen, Session};

/// Give up after ten minutes of simulated play
const MAX_FRAMES: u64 = 10 * 60 * FRAMES_PER_SECOND;

/// Steer toward the open sector of the closest batch still ahead of the player
fn autopilot(frame: &FrameResult) -> InputSnapshot {
    let sides = frame.sides;
    let incoming = frame
        .walls
        .iter()
        .filter(|w| w.outer_radius() > PLAYER_RADIUS)
        .map(|w| w.distance)
        .fold(f32::INFINITY, f32::min);
    if !incoming.is_finite() {
        return InputSnapshot::default();
    }

    let blocked: Vec<u32> = frame
        .walls
        .iter()
        .filter(|w| (w.distance - incoming).abs() < 1.0)
        .map(|w| w.side)
        .collect();
    let Some(gap) = (0..sides).find(|s| !blocked.contains(s)) else {
        return InputSnapshot::default();
    };

    let current = sector_of(frame.player_angle, sides);
    if current == gap {
        return InputSnapshot::default();
    }

    let target = (gap as f32 + 0.5) * sector_size(sides);
    let here = hex_orbit::normalize_angle(frame.player_angle);
    let mut delta = target - here;
    if delta > std::f32::consts::PI {
        delta -= std::f32::consts::TAU;
    } else if delta < -std::f32::consts::PI {
        delta += std::f32::consts::TAU;
    }
    InputSnapshot {
        rotate_left: delta < 0.0,
        rotate_right: delta > 0.0,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let level = args
        .next()
        .and_then(|a| a.parse::<u32>().ok())
        .unwrap_or(2)
        .clamp(1, 10);
    let seed = args.next().and_then(|a| a.parse::<u64>().ok());

    let arena = Arena::new(1280.0, 720.0);
    let mut session = match seed {
        Some(seed) => Session::with_seed(arena, seed),
        None => Session::new(arena),
    };
    log::info!("Hex Orbit (native) starting, level {}", level);

    // A fresh session owns no coins, so locked levels fall back to Beginner
    let mut level_id = format!("lvl_{}", level);
    if !session.is_level_unlocked(&level_id) {
        log::warn!("{} is locked in a new session, playing lvl_2", level_id);
        level_id = "lvl_2".to_string();
    }
    if let Err(e) = session.start_game(&level_id) {
        log::error!("Could not start a run: {}", e);
        std::process::exit(1);
    }

    let mut frame = session.frame(InputSnapshot::default());
    let mut triangles = 0usize;
    while session.screen() == Screen::Playing && frame.frame_count < MAX_FRAMES {
        let input = autopilot(&frame);
        frame = session.frame(input);
        triangles += session.scene(&frame).vertices().len() / 3;
    }

    println!(
        "{}: survived {:.2}s ({} frames), earned {} coins, drew {} triangles",
        session.theme().name,
        frame.seconds(),
        frame.score,
        session.last_reward(),
        triangles
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Session` directly; there is no headless demo
}
