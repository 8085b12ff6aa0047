//! Wall segment geometry
//!
//! A wall occupies one angular sector of the arena across a radial band:
//! - distance: inner edge, measured from the arena center
//! - thickness: radial extent (outer = distance + thickness)
//! - side: sector index, covering [side, side + 1) × 2π / sides

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::normalize_angle;

/// Angular width of one sector
#[inline]
pub fn sector_size(sides: u32) -> f32 {
    TAU / sides as f32
}

/// Sector index containing `angle`
///
/// Every angle maps to exactly one side in [0, sides); unbounded and negative
/// angles are wrapped first. A zero-sided arena has no sectors and always
/// reports side 0.
pub fn sector_of(angle: f32, sides: u32) -> u32 {
    if sides == 0 {
        return 0;
    }
    let theta = normalize_angle(angle);
    let index = (theta / sector_size(sides)).floor() as u32;
    index.min(sides - 1)
}

/// One wall segment closing in on the center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: u32,
    pub side: u32,
    /// Inner edge radius; goes negative as the wall passes the center
    pub distance: f32,
    pub thickness: f32,
}

impl Wall {
    pub fn new(id: u32, side: u32, distance: f32, thickness: f32) -> Self {
        Self {
            id,
            side,
            distance,
            thickness,
        }
    }

    /// Inner radius of the wall band
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.distance
    }

    /// Outer radius of the wall band
    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.distance + self.thickness
    }

    /// Start angle of the wall's sector
    pub fn start_angle(&self, sides: u32) -> f32 {
        self.side as f32 * sector_size(sides)
    }

    /// End angle (exclusive) of the wall's sector
    pub fn end_angle(&self, sides: u32) -> f32 {
        (self.side + 1) as f32 * sector_size(sides)
    }

    /// Check if an angle falls in this wall's sector
    pub fn contains_angle(&self, angle: f32, sides: u32) -> bool {
        sector_of(angle, sides) == self.side
    }

    /// Check if the wall band overlaps a ring of `half_size` around `radius`
    ///
    /// Both comparisons are strict: touching edges do not overlap.
    pub fn overlaps_band(&self, radius: f32, half_size: f32) -> bool {
        self.inner_radius() < radius + half_size && self.outer_radius() > radius - half_size
    }

    /// Move the wall inward
    #[inline]
    pub fn advance(&mut self, step: f32) {
        self.distance -= step;
    }

    /// Trailing edge has crossed the center; the wall can never hit again
    #[inline]
    pub fn has_passed_center(&self) -> bool {
        self.outer_radius() < 0.0
    }
}

/// Frames a wall spawned at `start_distance` survives before it is pruned,
/// assuming a constant inward `step` per frame
///
/// `None` when the wall never moves inward (zero, negative or non-finite step).
pub fn frames_until_pruned(start_distance: f32, thickness: f32, step: f32) -> Option<u64> {
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let extent = start_distance + thickness;
    if extent < 0.0 {
        return Some(0);
    }
    // Pruned once the outer edge is strictly below zero
    Some((extent / step).floor() as u64 + 1)
}
