//! Rendering Adapter: procedural geometry and renderer-agnostic frames.
//!
//! # Invariants
//! - Builders and composers are pure; they describe primitives and never draw.
//! - A frame is re-derived every time from the scene, the camera and the
//!   rotation angle. Nothing here holds state between frames.
//! - Renderers read frames, never application state.

pub mod compose;
pub mod frame;
pub mod geometry;
mod mesh;
mod renderer;

pub use compose::{compose_barn, compose_building, compose_house, compose_silo};
pub use frame::{DrawGroup, Frame, compose_frame, ground_primitive, render_scene};
pub use geometry::{Primitive, Shape, build_box, build_gabled_roof, build_silo};
pub use mesh::{Mesh, MeshVertex};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "farmstead-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
