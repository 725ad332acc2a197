use crate::camera::Projection;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use farmstead_common::Color;
use farmstead_render::{Frame, Mesh};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

/// A fixed point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
}

/// The scene's three point lights.
pub const LIGHTS: [PointLight; 3] = [
    PointLight {
        position: Vec3::new(6.0, 8.0, 5.0),
        color: Color::rgb(1.0, 1.0, 1.0),
    },
    PointLight {
        position: Vec3::new(-8.0, 4.0, -3.0),
        color: Color::rgb(0.8, 0.8, 1.0),
    },
    PointLight {
        position: Vec3::new(0.0, 10.0, 0.0),
        color: Color::rgb(1.0, 0.8, 0.8),
    },
];

pub const AMBIENT: Color = Color::rgb(0.2, 0.2, 0.2);

/// Sky blue.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.4,
    g: 0.7,
    b: 1.0,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightUniform {
    position: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    lights: [LightUniform; 3],
}

impl Uniforms {
    fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            ambient: AMBIENT.to_rgba(),
            lights: LIGHTS.map(|l| LightUniform {
                position: l.position.extend(1.0).to_array(),
                color: l.color.to_rgba(),
            }),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    color: [f32; 4],
}

/// World-space vertex and index data for one frame.
#[derive(Debug, Default)]
struct PackedFrame {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    /// Primitives left out because the buffers were full.
    dropped: usize,
}

/// Tessellate every primitive of `frame` into one indexed triangle list.
///
/// Primitives are all-or-nothing: once one would overflow the limits it and
/// everything after it is dropped.
fn pack_frame(frame: &Frame, max_vertices: usize, max_indices: usize) -> PackedFrame {
    let mut packed = PackedFrame::default();
    for (i, primitive) in frame.primitives().enumerate() {
        let mesh = Mesh::from_primitive(primitive);
        if packed.vertices.len() + mesh.vertices.len() > max_vertices
            || packed.indices.len() + mesh.indices.len() > max_indices
        {
            packed.dropped = frame.primitive_count() - i;
            break;
        }
        let base = packed.vertices.len() as u32;
        let color = primitive.color.to_rgba();
        packed.vertices.extend(mesh.vertices.iter().map(|v| Vertex {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            color,
        }));
        packed.indices.extend(mesh.indices.iter().map(|i| base + i));
    }
    packed
}

/// Roofs are open underneath, so both faces are drawn.
fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        cull_mode: None,
        ..Default::default()
    }
}

/// wgpu-based frame renderer.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    max_vertices: u32,
    max_indices: u32,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: primitive_state(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Pre-allocated; the ground alone is 6400 vertices.
        let max_vertices = 131_072u32;
        let max_indices = 3 * max_vertices;
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vertex_buffer"),
            size: (max_vertices as u64) * std::mem::size_of::<Vertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("index_buffer"),
            size: (max_indices as u64) * std::mem::size_of::<u32>() as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            index_buffer,
            max_vertices,
            max_indices,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame into `view`. The caller presents.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &Frame,
        projection: &Projection,
    ) {
        let vp = projection.view_projection(&frame.view);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&Uniforms::new(vp)));

        let packed = pack_frame(frame, self.max_vertices as usize, self.max_indices as usize);
        if packed.dropped > 0 {
            tracing::warn!(dropped = packed.dropped, "vertex budget exceeded, frame truncated");
        }
        if !packed.indices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&packed.vertices));
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&packed.indices));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if !packed.indices.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..packed.indices.len() as u32, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmstead_kernel::{AppState, Scene, SceneConfig};
    use farmstead_render::render_scene;

    fn frame() -> Frame {
        render_scene(&AppState::new(
            Scene::from_seed(&SceneConfig::default(), 42).unwrap(),
        ))
    }

    #[test]
    fn uniform_layout_matches_shader() {
        // mat4 + ambient vec4 + 3 lights of two vec4s
        assert_eq!(std::mem::size_of::<Uniforms>(), 64 + 16 + 3 * 32);
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
    }

    #[test]
    fn pipeline_draws_both_faces() {
        let state = primitive_state();
        assert_eq!(state.cull_mode, None);
        assert_eq!(state.topology, wgpu::PrimitiveTopology::TriangleList);
    }

    #[test]
    fn roof_underside_is_not_closed() {
        // The roof primitives only face up and out; from below the overhang
        // is visible solely through back faces.
        let f = frame();
        let roof_faces_down = f
            .primitives()
            .filter(|p| matches!(p.shape, farmstead_render::Shape::Quad { .. }))
            .flat_map(|p| Mesh::from_primitive(p).vertices)
            .any(|v| v.normal.y < -0.5);
        assert!(!roof_faces_down);
    }

    #[test]
    fn uniforms_carry_lights() {
        let u = Uniforms::new(Mat4::IDENTITY);
        assert_eq!(u.lights[0].position, [6.0, 8.0, 5.0, 1.0]);
        assert_eq!(u.lights[1].color, [0.8, 0.8, 1.0, 1.0]);
        assert_eq!(u.ambient, [0.2, 0.2, 0.2, 1.0]);
    }

    #[test]
    fn pack_whole_frame() {
        let f = frame();
        let packed = pack_frame(&f, usize::MAX, usize::MAX);
        assert_eq!(packed.dropped, 0);
        let expected: usize = f.primitives().map(|p| Mesh::from_primitive(p).indices.len()).sum();
        assert_eq!(packed.indices.len(), expected);
        let max_index = packed.indices.iter().copied().max().unwrap();
        assert_eq!(max_index as usize, packed.vertices.len() - 1);
    }

    #[test]
    fn ground_vertices_come_first_with_ground_color() {
        let f = frame();
        let packed = pack_frame(&f, usize::MAX, usize::MAX);
        let ground = f.groups[0].primitives[0].color.to_rgba();
        assert!(packed.vertices[..6400].iter().all(|v| v.color == ground));
    }

    #[test]
    fn pack_drops_whole_primitives_past_budget() {
        let f = frame();
        let packed = pack_frame(&f, 6400, usize::MAX);
        assert_eq!(packed.vertices.len(), 6400);
        assert_eq!(packed.dropped, f.primitive_count() - 1);

        let nothing = pack_frame(&f, 10, usize::MAX);
        assert!(nothing.vertices.is_empty());
        assert_eq!(nothing.dropped, f.primitive_count());
    }
}
