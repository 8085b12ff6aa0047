//! Player vs wall collision
//!
//! The only physics in the game: the player sits at a fixed radius and is hit
//! when a wall's radial band overlaps the player's ring while the player angle
//! sits in that wall's sector. Arena rotation and pulse are cosmetic and never
//! enter this test.

use super::wall::Wall;
use crate::consts::{PLAYER_RADIUS, PLAYER_SIZE};

/// A wall the player ran into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub wall_id: u32,
    pub side: u32,
}

/// Check a single wall against the player
pub fn player_hits_wall(player_angle: f32, wall: &Wall, sides: u32) -> bool {
    wall.overlaps_band(PLAYER_RADIUS, PLAYER_SIZE) && wall.contains_angle(player_angle, sides)
}

/// First wall (in insertion order) the player overlaps, if any
pub fn first_collision(player_angle: f32, walls: &[Wall], sides: u32) -> Option<Collision> {
    walls
        .iter()
        .find(|wall| player_hits_wall(player_angle, wall, sides))
        .map(|wall| Collision {
            wall_id: wall.id,
            side: wall.side,
        })
}
