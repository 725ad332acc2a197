use crate::frame::Frame;
use farmstead_kernel::OrbitCamera;
use glam::{Mat4, Vec3};
use std::fmt::Write;

/// Camera/view configuration for rendering. Projection belongs to the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_camera(&OrbitCamera::default())
    }
}

impl RenderView {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            eye: camera.eye(),
            target: camera.target(),
            up: camera.up(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes a composed [`Frame`] and produces output. It never
/// sees or mutates the application state the frame was derived from.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Human-readable dump of a frame, for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// List every primitive, not just one line per group.
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let mut out = String::new();
        let seed = frame
            .seed
            .map_or_else(|| "unknown".to_string(), |s| s.to_string());
        let _ = writeln!(
            out,
            "=== Frame (seed={seed}, rotation={:.1}) ===",
            frame.rotation_angle
        );
        let v = &frame.view;
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.1}, {:.1}, {:.1})",
            v.eye.x, v.eye.y, v.eye.z, v.target.x, v.target.y, v.target.z
        );
        let _ = writeln!(
            out,
            "Groups: {}  Primitives: {}",
            frame.groups.len(),
            frame.primitive_count()
        );

        for group in &frame.groups {
            let colors: Vec<String> = group
                .primitives
                .iter()
                .map(|p| p.color.to_string())
                .fold(Vec::new(), |mut acc, c| {
                    if !acc.contains(&c) {
                        acc.push(c);
                    }
                    acc
                });
            let _ = writeln!(
                out,
                "  {:<6} at ({:.1}, {:.1}) parts={} colors=[{}]",
                group.label,
                group.origin.x,
                group.origin.z,
                group.primitives.len(),
                colors.join(", ")
            );
            if self.verbose {
                for p in &group.primitives {
                    let t = p.translation();
                    let _ = writeln!(
                        out,
                        "    {:<11} {} @ ({:.2}, {:.2}, {:.2})",
                        p.shape.label(),
                        p.color,
                        t.x,
                        t.y,
                        t.z
                    );
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::render_scene;
    use farmstead_kernel::{AppState, Scene, SceneConfig};

    fn frame() -> Frame {
        render_scene(&AppState::new(
            Scene::from_seed(&SceneConfig::default(), 42).unwrap(),
        ))
    }

    #[test]
    fn debug_renderer_header() {
        let output = DebugTextRenderer::new().render(&frame());
        assert!(output.contains("seed=42"));
        assert!(output.contains("rotation=0.0"));
        assert!(output.contains("eye=(15.00, 5.00, 0.00)"));
        assert!(output.contains("Groups: 7"));
        assert!(output.contains("ground"));
    }

    #[test]
    fn debug_renderer_verbose_lists_primitives() {
        let f = frame();
        let terse = DebugTextRenderer::new().render(&f);
        let verbose = DebugTextRenderer::verbose().render(&f);
        assert_eq!(terse.lines().count(), 3 + f.groups.len());
        assert_eq!(
            verbose.lines().count(),
            3 + f.groups.len() + f.primitive_count()
        );
        assert!(verbose.contains("tiled-plane"));
    }

    #[test]
    fn debug_renderer_unknown_seed() {
        let mut f = frame();
        f.seed = None;
        assert!(DebugTextRenderer::new().render(&f).contains("seed=unknown"));
    }

    #[test]
    fn render_view_default_matches_camera() {
        let view = RenderView::default();
        assert!(view.eye.abs_diff_eq(Vec3::new(15.0, 5.0, 0.0), 1e-5));
        assert_eq!(view.target, Vec3::ZERO);
        assert_eq!(view.view_matrix(), OrbitCamera::default().view_matrix());
    }
}
