//! Per-frame scene geometry
//!
//! Turns an engine frame into the colour and vertex lists a presentation
//! layer draws, back to front: background, center polygon, walls, player.
//! Nothing here feeds back into the simulation.

use glam::{Affine2, Vec2};

use super::shapes::{player_arrow, regular_polygon, sector_band};
use super::vertex::{Vertex, color_or_white};
use crate::consts::*;
use crate::sim::{FrameResult, Theme};

/// Background alternates colours on this many frames
const FLICKER_FRAMES: u64 = 20;
/// Center polygon wobble rate (radians per frame)
const WOBBLE_RATE: f32 = 0.2;

/// Drawing options that don't come from the frame or theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub width: f32,
    pub height: f32,
    /// Center polygon colour from the equipped skin
    pub skin_color: [f32; 4],
    /// Disable pulse scaling and background flicker
    pub reduced_motion: bool,
}

/// Everything to draw for one frame, in viewport pixels
#[derive(Debug, Clone, Default)]
pub struct SceneGeometry {
    pub clear_color: [f32; 4],
    pub center: Vec<Vertex>,
    pub walls: Vec<Vertex>,
    pub player: Vec<Vertex>,
}

impl SceneGeometry {
    /// All triangles in draw order
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut all = Vec::with_capacity(self.center.len() + self.walls.len() + self.player.len());
        all.extend_from_slice(&self.center);
        all.extend_from_slice(&self.walls);
        all.extend_from_slice(&self.player);
        all
    }
}

/// Build the scene for `frame`
pub fn build_scene(frame: &FrameResult, theme: &Theme, options: &SceneOptions) -> SceneGeometry {
    let palette = &theme.colors;

    let flicker = !options.reduced_motion && frame.frame_count % FLICKER_FRAMES >= FLICKER_FRAMES / 2;
    let clear_color = if flicker {
        color_or_white(&palette.background_pulse)
    } else {
        color_or_white(&palette.background)
    };

    let scale = if options.reduced_motion { 1.0 } else { frame.pulse };
    let center = Vec2::new(options.width / 2.0, options.height / 2.0);
    let arena_xf = Affine2::from_scale_angle_translation(Vec2::splat(scale), frame.arena_rotation, center);

    let sides = frame.sides.max(3);
    let step = std::f32::consts::TAU / sides as f32;

    let wobble = (frame.frame_count as f32 * WOBBLE_RATE).sin() * CENTER_WOBBLE;
    let center_poly = regular_polygon(&arena_xf, sides, CENTER_POLYGON_SIZE + wobble, options.skin_color);

    let wall_color = color_or_white(&palette.wall);
    let mut walls = Vec::with_capacity(frame.walls.len() * 6);
    for wall in &frame.walls {
        let start = wall.side as f32 * step + WALL_PADDING;
        let end = (wall.side + 1) as f32 * step - WALL_PADDING;
        walls.extend(sector_band(
            &arena_xf,
            wall.inner_radius(),
            wall.outer_radius(),
            start,
            end,
            wall_color,
        ));
    }

    // Uniform scale commutes with rotation, so the player just adds its angle
    let player_xf = Affine2::from_scale_angle_translation(
        Vec2::splat(scale),
        frame.arena_rotation + frame.player_angle,
        center,
    );
    let player = player_arrow(&player_xf, PLAYER_RADIUS, PLAYER_SIZE, color_or_white(&palette.player));

    SceneGeometry {
        clear_color,
        center: center_poly,
        walls,
        player,
    }
}
