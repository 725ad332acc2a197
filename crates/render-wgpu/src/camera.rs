use farmstead_render::RenderView;
use glam::Mat4;

/// Perspective projection owned by the backend; resize only touches `aspect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: 45.0_f32.to_radians(),
            aspect: 1000.0 / 700.0,
            near: 1.0,
            far: 200.0,
        }
    }
}

impl Projection {
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, view: &RenderView) -> Mat4 {
        self.matrix() * view.view_matrix()
    }
}
