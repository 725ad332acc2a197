use crate::animator::FrameAnimator;
use crate::camera::{Direction, OrbitCamera};
use crate::scene::Scene;

/// Everything a frame is derived from.
///
/// Held by the event loop and passed explicitly to update and render code.
/// The scene is fixed at construction; only the camera and the animator move.
#[derive(Debug, Clone)]
pub struct AppState {
    scene: Scene,
    camera: OrbitCamera,
    animator: FrameAnimator,
}

impl AppState {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            camera: OrbitCamera::default(),
            animator: FrameAnimator::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn rotation_angle(&self) -> f32 {
        self.animator.angle()
    }

    /// Timer ticks since startup.
    pub fn ticks(&self) -> u64 {
        self.animator.ticks()
    }

    /// Timer handler: advance the accent spin.
    pub fn tick(&mut self) {
        self.animator.tick();
    }

    /// Directional input handler.
    pub fn steer(&mut self, direction: Direction) {
        self.camera.apply(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneConfig;

    fn state() -> AppState {
        AppState::new(Scene::from_seed(&SceneConfig::default(), 42).unwrap())
    }

    #[test]
    fn new_state_uses_defaults() {
        let s = state();
        assert_eq!(s.rotation_angle(), 0.0);
        assert_eq!(*s.camera(), OrbitCamera::default());
        assert_eq!(s.scene().buildings().len(), 6);
    }

    #[test]
    fn tick_and_steer_leave_scene_untouched() {
        let mut s = state();
        let before = s.scene().clone();
        for _ in 0..10 {
            s.tick();
            s.steer(Direction::Right);
            s.steer(Direction::Down);
        }
        assert_eq!(s.scene(), &before);
        assert_eq!(s.rotation_angle(), 10.0);
        assert!((s.camera().azimuth() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn steering_keeps_camera_above_floor() {
        let mut s = state();
        for _ in 0..100 {
            s.steer(Direction::Down);
        }
        assert!(s.camera().height() > s.camera().height_step());
    }

    #[test]
    fn ticks_are_counted_across_wraps() {
        let mut s = state();
        for _ in 0..400 {
            s.tick();
        }
        assert_eq!(s.ticks(), 400);
        assert_eq!(s.rotation_angle(), 40.0);
    }
}
