//! Rotate intent sampling from keyboard and touch
//!
//! Device callbacks flip two boolean flags; the frame loop reads one snapshot
//! per tick. The flags are atomics so callbacks may run on another thread.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Rotate intent for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub rotate_left: bool,
    pub rotate_right: bool,
}

/// Which way a key steers, if at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

impl Steer {
    /// Map a DOM-style key code (`KeyboardEvent.code`)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Steer::Left),
            "ArrowRight" | "KeyD" => Some(Steer::Right),
            _ => None,
        }
    }
}

/// Latest rotate intent
#[derive(Debug, Default)]
pub struct InputSampler {
    left: AtomicBool,
    right: AtomicBool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, steer: Steer) -> &AtomicBool {
        match steer {
            Steer::Left => &self.left,
            Steer::Right => &self.right,
        }
    }

    /// Key pressed; returns false for keys that don't steer
    pub fn key_down(&self, code: &str) -> bool {
        match Steer::from_key_code(code) {
            Some(steer) => {
                self.flag(steer).store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Key released; returns false for keys that don't steer
    ///
    /// Releasing either key of a direction clears it, even if the other is
    /// still held.
    pub fn key_up(&self, code: &str) -> bool {
        match Steer::from_key_code(code) {
            Some(steer) => {
                self.flag(steer).store(false, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Touch began at `x` on a surface `width` wide: left half steers left
    pub fn touch_start(&self, x: f32, width: f32) {
        let steer = if x < width / 2.0 {
            Steer::Left
        } else {
            Steer::Right
        };
        self.flag(steer).store(true, Ordering::Relaxed);
    }

    /// Any touch ended: release both directions
    pub fn touch_end(&self) {
        self.clear();
    }

    /// Release everything (focus lost, run restarted)
    pub fn clear(&self) {
        self.left.store(false, Ordering::Relaxed);
        self.right.store(false, Ordering::Relaxed);
    }

    /// Current intent
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            rotate_left: self.left.load(Ordering::Relaxed),
            rotate_right: self.right.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_no_input_is_idle() {
        let sampler = InputSampler::new();
        assert_eq!(sampler.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_keys_set_and_clear() {
        let sampler = InputSampler::new();
        assert!(sampler.key_down("ArrowLeft"));
        assert!(sampler.snapshot().rotate_left);
        assert!(!sampler.snapshot().rotate_right);

        assert!(sampler.key_down("KeyD"));
        assert_eq!(
            sampler.snapshot(),
            InputSnapshot {
                rotate_left: true,
                rotate_right: true
            }
        );

        assert!(sampler.key_up("ArrowLeft"));
        assert!(!sampler.snapshot().rotate_left);
        assert!(!sampler.key_down("Space"));
    }

    #[test]
    fn test_two_keys_same_direction_do_not_stack() {
        let sampler = InputSampler::new();
        sampler.key_down("ArrowLeft");
        sampler.key_down("KeyA");
        assert!(sampler.snapshot().rotate_left);
        // A flag, not a counter: one release clears it
        sampler.key_up("KeyA");
        assert!(!sampler.snapshot().rotate_left);
    }

    #[test]
    fn test_touch_halves() {
        let sampler = InputSampler::new();
        sampler.touch_start(100.0, 800.0);
        assert!(sampler.snapshot().rotate_left);
        sampler.touch_start(700.0, 800.0);
        assert!(sampler.snapshot().rotate_right);
        sampler.touch_end();
        assert_eq!(sampler.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_shared_across_threads() {
        let sampler = Arc::new(InputSampler::new());
        let producer = sampler.clone();
        std::thread::spawn(move || {
            producer.key_down("ArrowRight");
        })
        .join()
        .unwrap();
        assert!(sampler.snapshot().rotate_right);
    }
}
