//! Run engine: the interface the session controller and presentation layer
//! drive once per frame
//!
//! Owns the run state, the spawn RNG and the terminal callback. `reset`
//! starts a run, `step` advances it and reports the frame to draw, and the
//! callback hears about the collision exactly once per run.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::state::{Arena, RunPhase, RunState};
use super::theme::{ThemeConfig, ThemeError};
use super::tick::{TickInput, tick};
use super::wall::Wall;
use crate::input::InputSnapshot;

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameResult {
    pub player_angle: f32,
    pub arena_rotation: f32,
    pub pulse: f32,
    pub frame_count: u64,
    pub sides: u32,
    pub walls: Vec<Wall>,
    pub score: u64,
    pub terminated: bool,
}

impl FrameResult {
    /// Seconds survived, for display
    pub fn seconds(&self) -> f32 {
        self.score as f32 / crate::consts::FRAMES_PER_SECOND as f32
    }
}

type TerminalCallback = Box<dyn FnMut(u64)>;

/// Frame-stepped simulation engine
pub struct Engine {
    state: RunState,
    arena: Arena,
    rng: Pcg32,
    on_terminal: Option<TerminalCallback>,
}

impl Engine {
    /// Engine with an entropy-seeded spawn RNG
    pub fn new(arena: Arena) -> Self {
        Self::with_seed(arena, rand::random())
    }

    /// Engine with a fixed spawn RNG seed (reproducible wall patterns)
    pub fn with_seed(arena: Arena, seed: u64) -> Self {
        Self {
            state: RunState::idle(),
            arena,
            rng: Pcg32::seed_from_u64(seed),
            on_terminal: None,
        }
    }

    /// Register the callback fired when a run ends in a collision
    pub fn on_terminal<F>(&mut self, callback: F)
    where
        F: FnMut(u64) + 'static,
    {
        self.on_terminal = Some(Box::new(callback));
    }

    /// Discard any run in progress and start a new one
    ///
    /// A malformed config is refused and leaves the engine idle.
    pub fn reset(&mut self, config: ThemeConfig) -> Result<(), ThemeError> {
        if let Err(e) = config.validate() {
            log::warn!("Refusing to start run: {}", e);
            self.stop();
            return Err(e);
        }
        self.state = RunState::start(config, self.arena.max_radius());
        log::info!(
            "Run started: {} sides, wall speed {}, spawn rate {}, spawn radius {:.1}, walls live at most {:?} frames",
            config.sides,
            config.wall_speed,
            config.spawn_rate,
            self.state.max_radius,
            self.state.max_wall_lifetime()
        );
        Ok(())
    }

    /// Return to idle, dropping the current run (safe to call repeatedly)
    pub fn stop(&mut self) {
        if self.state.phase != RunPhase::Idle {
            log::info!("Run discarded at frame {}", self.state.frame_count);
        }
        self.state = RunState::idle();
    }

    /// Advance one frame and describe it
    pub fn step(&mut self, input: InputSnapshot, sensitivity: f32) -> FrameResult {
        let input = TickInput::new(input, sensitivity);
        if let Some(score) = tick(&mut self.state, &input, &mut self.rng) {
            if let Some(callback) = self.on_terminal.as_mut() {
                callback(score);
            }
        }
        self.frame()
    }

    /// The current frame without advancing
    pub fn frame(&self) -> FrameResult {
        FrameResult {
            player_angle: self.state.player_angle,
            arena_rotation: self.state.arena_rotation,
            pulse: self.state.pulse,
            frame_count: self.state.frame_count,
            sides: self.state.config.sides,
            walls: self.state.walls.clone(),
            score: self.state.score,
            terminated: self.state.is_game_over(),
        }
    }

    /// Viewport changed; new walls spawn at the new max radius
    pub fn set_arena(&mut self, arena: Arena) {
        self.arena = arena;
        self.state.max_radius = arena.max_radius();
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config() -> ThemeConfig {
        ThemeConfig {
            rotation_speed: 0.02,
            wall_speed: 3.0,
            spawn_rate: 75,
            sides: 6,
        }
    }

    fn engine() -> Engine {
        Engine::with_seed(Arena::new(800.0, 600.0), 1234)
    }

    #[test]
    fn test_idle_until_reset() {
        let mut engine = engine();
        assert_eq!(engine.phase(), RunPhase::Idle);
        let frame = engine.step(InputSnapshot::default(), 1.0);
        assert_eq!(frame.frame_count, 0);
        assert_eq!(frame.score, 0);
        assert!(frame.walls.is_empty());
        assert!(!frame.terminated);
    }

    #[test]
    fn test_reset_rejects_bad_config() {
        let mut engine = engine();
        let bad = ThemeConfig { sides: 2, ..config() };
        assert!(engine.reset(bad).is_err());
        assert_eq!(engine.phase(), RunPhase::Idle);
    }

    #[test]
    fn test_reset_rejects_stationary_walls() {
        let mut engine = engine();
        engine.reset(config()).unwrap();
        let still = ThemeConfig {
            wall_speed: 0.0,
            ..config()
        };
        assert!(matches!(
            engine.reset(still),
            Err(ThemeError::StationaryWalls(_))
        ));
        assert_eq!(engine.phase(), RunPhase::Idle);
        for _ in 0..200 {
            engine.step(InputSnapshot::default(), 1.0);
        }
        assert!(engine.frame().walls.is_empty());
    }

    #[test]
    fn test_frame_count_strictly_increases_then_resets() {
        let mut engine = engine();
        engine.reset(config()).unwrap();
        let mut last = 0;
        for _ in 0..120 {
            let frame = engine.step(InputSnapshot::default(), 1.0);
            if frame.terminated {
                break;
            }
            assert!(frame.frame_count > last);
            last = frame.frame_count;
        }
        engine.reset(config()).unwrap();
        assert_eq!(engine.frame().frame_count, 0);
        assert_eq!(engine.frame().score, 0);
        assert!(engine.frame().walls.is_empty());
    }

    #[test]
    fn test_first_spawn_at_max_radius() {
        let mut engine = engine();
        engine.reset(config()).unwrap();
        for _ in 0..75 {
            engine.step(InputSnapshot::default(), 1.0);
        }
        let frame = engine.frame();
        assert_eq!(frame.walls.len(), 5);
        assert!(frame.walls.iter().all(|w| w.distance > 490.0 && w.distance < 500.0));
    }

    #[test]
    fn test_terminal_fires_exactly_once() {
        let mut engine = engine();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();
        engine.on_terminal(move |score| sink.borrow_mut().push(score));
        engine.reset(config()).unwrap();

        // Stand still: the first batch to reach the player ends the run
        // unless its gap happens to be sector 0, so run long enough for
        // several batches and check the callback count
        let mut terminal_frame = None;
        for _ in 0..3000 {
            let frame = engine.step(InputSnapshot::default(), 1.0);
            if frame.terminated && terminal_frame.is_none() {
                terminal_frame = Some(frame);
            }
        }
        let frame = terminal_frame.expect("standing still must eventually collide");
        assert_eq!(*fired.borrow(), vec![frame.score]);
        assert_eq!(engine.frame(), frame);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut engine = engine();
        engine.reset(config()).unwrap();
        engine.step(InputSnapshot::default(), 1.0);
        engine.stop();
        engine.stop();
        assert_eq!(engine.phase(), RunPhase::Idle);
        assert_eq!(engine.frame().frame_count, 0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = engine();
        let mut b = engine();
        a.reset(config()).unwrap();
        b.reset(config()).unwrap();
        let inputs = [
            InputSnapshot {
                rotate_left: true,
                rotate_right: false,
            },
            InputSnapshot::default(),
            InputSnapshot {
                rotate_left: false,
                rotate_right: true,
            },
        ];
        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            assert_eq!(a.step(input, 1.3), b.step(input, 1.3));
        }
    }

    #[test]
    fn test_set_arena_moves_spawn_radius() {
        let mut engine = engine();
        engine.reset(config()).unwrap();
        engine.set_arena(Arena::new(1600.0, 1200.0));
        assert!((engine.state().max_radius - 1000.0).abs() < 1e-3);
    }
}
