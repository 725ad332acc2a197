//! wgpu render backend for the farmstead scene.
//!
//! Tessellates the primitives of a [`farmstead_render::Frame`] on the CPU and
//! draws them in one lit, depth-tested pass. Projection, lighting and the
//! clear color live here; the frame only carries the view.
//!
//! # Invariants
//! - Renderer never mutates application state.
//! - Tessellation buffers live for one frame; GPU resources are dropped with
//!   their owner.

mod camera;
mod context;
mod gpu;
mod shaders;

pub use camera::Projection;
pub use context::{GpuContext, RenderError};
pub use gpu::{AMBIENT, CLEAR_COLOR, LIGHTS, PointLight, WgpuRenderer};
