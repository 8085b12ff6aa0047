//! Shape generation for 2D primitives
//!
//! Shapes are built in arena space (origin at the arena center) and pushed
//! through an affine transform into viewport space.

use glam::{Affine2, Vec2};
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::polar_to_cartesian;

fn push_triangle(out: &mut Vec<Vertex>, xf: &Affine2, points: [Vec2; 3], color: [f32; 4]) {
    for p in points {
        let p = xf.transform_point2(p);
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Regular polygon with `sides` corners at `radius`, one corner at angle 0,
/// filled as a triangle fan from the center
pub fn regular_polygon(xf: &Affine2, sides: u32, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(sides as usize * 3);
    let step = TAU / sides as f32;

    for i in 0..sides {
        let a = polar_to_cartesian(radius, i as f32 * step);
        let b = polar_to_cartesian(radius, (i + 1) as f32 * step);
        push_triangle(&mut vertices, xf, [Vec2::ZERO, a, b], color);
    }

    vertices
}

/// Flat-edged band between two radii spanning [theta_start, theta_end]
///
/// Drawn as a trapezoid (two triangles), not a curved arc.
pub fn sector_band(
    xf: &Affine2,
    inner_radius: f32,
    outer_radius: f32,
    theta_start: f32,
    theta_end: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let outer_start = polar_to_cartesian(outer_radius, theta_start);
    let outer_end = polar_to_cartesian(outer_radius, theta_end);
    let inner_end = polar_to_cartesian(inner_radius, theta_end);
    let inner_start = polar_to_cartesian(inner_radius, theta_start);

    let mut vertices = Vec::with_capacity(6);
    push_triangle(&mut vertices, xf, [outer_start, outer_end, inner_end], color);
    push_triangle(&mut vertices, xf, [outer_start, inner_end, inner_start], color);
    vertices
}

/// Arrowhead pointing outward along +x at `radius`, `size` half extent
pub fn player_arrow(xf: &Affine2, radius: f32, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(3);
    push_triangle(
        &mut vertices,
        xf,
        [
            Vec2::new(radius + size, 0.0),
            Vec2::new(radius - size, size),
            Vec2::new(radius - size, -size),
        ],
        color,
    );
    vertices
}
