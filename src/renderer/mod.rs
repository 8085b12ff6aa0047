//! Render geometry preparation
//!
//! Computes the world-space triangles for a frame; submitting them to a GPU
//! or canvas is up to the host.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{SceneGeometry, SceneOptions, build_scene};
pub use vertex::{Vertex, as_bytes, parse_hex_color};
