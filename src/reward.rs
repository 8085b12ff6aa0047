//! Coin payout for a finished run

use crate::consts::{FRAMES_PER_SECOND, MIN_FRAMES_FOR_REWARD};

/// Coins earned for surviving `score` frames on a level paying
/// `coin_multiplier` per second
///
/// Runs of two seconds or less pay nothing.
pub fn coins_earned(score: u64, coin_multiplier: f32) -> u64 {
    if score <= MIN_FRAMES_FOR_REWARD {
        return 0;
    }
    let seconds = score as f64 / FRAMES_PER_SECOND as f64;
    let coins = (seconds * coin_multiplier as f64).floor();
    if coins > 0.0 { coins as u64 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_at_two_seconds() {
        assert_eq!(coins_earned(119, 1.0), 0);
        assert_eq!(coins_earned(120, 1.0), 0);
        assert_eq!(coins_earned(121, 1.0), 2);
    }

    #[test]
    fn test_three_seconds_at_unit_multiplier() {
        assert_eq!(coins_earned(180, 1.0), 3);
    }

    #[test]
    fn test_multiplier_floors() {
        // 10 seconds on the tutorial (x0.2)
        assert_eq!(coins_earned(600, 0.2), 2);
        // 5.5 seconds at x1.5 = 8.25
        assert_eq!(coins_earned(330, 1.5), 8);
        assert_eq!(coins_earned(3600, 5.0), 300);
    }
}
