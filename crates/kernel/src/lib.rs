//! Scene Kernel: the placed buildings, the orbit camera and the frame animator.
//!
//! # Invariants
//! - The scene is generated once and never mutated afterwards.
//! - Camera height stays strictly above its step size.
//! - The rotation angle stays in `[0, 360)`.
//! - No globals: everything lives in an explicit [`AppState`].

pub mod animator;
pub mod camera;
pub mod scene;
pub mod state;

pub use animator::{AnimatorError, FrameAnimator};
pub use camera::{CameraError, Direction, ORBIT_RADIUS, OrbitCamera};
pub use scene::{
    Building, BuildingType, GROUND_COLOR, GroundPlane, GroundPos, Scene, SceneConfig, SceneError,
    clock_seed,
};
pub use state::AppState;
