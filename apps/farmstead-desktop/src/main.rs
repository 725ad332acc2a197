use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use farmstead_input::{Action, Key};
use farmstead_kernel::{AppState, Scene, SceneConfig, clock_seed};
use farmstead_render::render_scene;
use farmstead_render_wgpu::{GpuContext, Projection, WgpuRenderer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Stable Colorful 3D Asset Generator";
const WINDOW_SIZE: (u32, u32) = (1000, 700);
const FIRST_TICK: Duration = Duration::from_millis(100);
const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

#[derive(Parser)]
#[command(name = "farmstead-desktop", about = "Procedural farmstead scene viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene seed; defaults to the wall clock
    #[arg(long)]
    seed: Option<u64>,
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::F1 => Key::F1,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

fn draw_overlay(ctx: &EguiContext, state: &AppState) {
    let camera = state.camera();
    let eye = camera.eye();

    egui::Window::new("Farmstead")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            let seed = state
                .scene()
                .seed()
                .map_or_else(|| "unknown".to_string(), |s| s.to_string());
            ui.label(format!("Seed: {seed}"));
            ui.label(format!(
                "Camera: azimuth {:.2} rad, height {:.1}",
                camera.azimuth(),
                camera.height()
            ));
            ui.label(format!("Eye: ({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z));
            ui.label(format!(
                "Silo spin: {:.0}° after {} ticks",
                state.rotation_angle(),
                state.ticks()
            ));
            ui.separator();

            ui.heading("Buildings");
            for building in state.scene().buildings() {
                ui.label(format!(
                    "{} at ({:.0}, {:.0})  walls {}  roof {}",
                    building.kind.label(),
                    building.position.x,
                    building.position.z,
                    building.wall_color,
                    building.roof_color
                ));
            }

            ui.separator();
            ui.small("Arrows: orbit | F1: overlay | Esc: quit");
        });
}

/// Window-bound resources, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    context: GpuContext,
    renderer: WgpuRenderer,
    projection: Projection,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let context = GpuContext::new(window.clone(), size.width, size.height)?;
        let (width, height) = context.size();

        let renderer = WgpuRenderer::new(&context.device, context.format(), width, height);
        let mut projection = Projection::default();
        projection.resize(width, height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&context.device, context.format(), None, 1, false);

        Ok(Self {
            window,
            context,
            renderer,
            projection,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        let (width, height) = self.context.size();
        self.renderer.resize(&self.context.device, width, height);
        self.projection.resize(width, height);
    }

    fn draw(&mut self, egui_ctx: &EguiContext, state: &AppState, show_overlay: bool) {
        let output = match self.context.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let device = &self.context.device;
        let queue = &self.context.queue;

        let frame = render_scene(state);
        self.renderer
            .render(device, queue, &view, &frame, &self.projection);

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            if show_overlay {
                draw_overlay(ctx, state);
            }
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.context.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("overlay_encoder"),
        });
        self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct FarmApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    show_overlay: bool,
    next_tick: Instant,
    startup_error: Option<anyhow::Error>,
}

impl FarmApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
            show_overlay: true,
            next_tick: Instant::now() + FIRST_TICK,
            startup_error: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        let action = Action::from_key(map_key(code));
        match action {
            Action::Quit => {
                tracing::info!("quit requested");
                event_loop.exit();
            }
            Action::ToggleOverlay => {
                self.show_overlay = !self.show_overlay;
                self.request_redraw();
            }
            _ => {
                if action.apply(&mut self.state) {
                    self.request_redraw();
                }
            }
        }
    }
}

impl ApplicationHandler for FarmApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.next_tick = Instant::now() + FIRST_TICK;
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
            }
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        if gpu.egui_winit.on_window_event(&gpu.window, &event).consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size.width, new_size.height);
                gpu.window.request_redraw();
            }
            // Only presses produce actions; releases are ignored.
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, code);
            }
            WindowEvent::RedrawRequested => {
                gpu.draw(&self.egui_ctx, &self.state, self.show_overlay);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_none() {
            return;
        }
        let now = Instant::now();
        if now >= self.next_tick {
            self.state.tick();
            tracing::trace!(angle = self.state.rotation_angle(), "tick");
            self.request_redraw();
            self.next_tick = now + TICK_INTERVAL;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let seed = cli.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, "farmstead-desktop starting");
    let scene = Scene::from_seed(&SceneConfig::default(), seed)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = FarmApp::new(AppState::new(scene));
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_input_keys() {
        assert_eq!(map_key(KeyCode::ArrowLeft), Key::ArrowLeft);
        assert_eq!(map_key(KeyCode::ArrowDown), Key::ArrowDown);
        assert_eq!(map_key(KeyCode::F1), Key::F1);
        assert_eq!(map_key(KeyCode::Escape), Key::Escape);
        assert_eq!(map_key(KeyCode::KeyW), Key::Other);
    }

    #[test]
    fn tick_interval_is_sixty_hertz() {
        let per_second = Duration::from_secs(1).as_nanos() / TICK_INTERVAL.as_nanos();
        assert_eq!(per_second, 60);
    }
}
