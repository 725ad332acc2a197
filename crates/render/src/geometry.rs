//! Parametric shape builders.
//!
//! Builders only describe geometry. Turning a [`Shape`] into triangles is
//! [`crate::Mesh`]'s job, and drawing them is the backend's.

use farmstead_common::Color;
use glam::{Mat4, Quat, Vec3};

/// Segments around the silo axis.
pub const SILO_SLICES: u32 = 20;
/// Segments along the silo height.
pub const SILO_STACKS: u32 = 20;
/// Latitude bands of the dome, equator to pole.
pub const DOME_RINGS: u32 = 10;

/// Local-space geometry of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Unit cube centred on the origin.
    Cube,
    /// Flat triangle, counter-clockwise seen from the side `normal` points to.
    Triangle { vertices: [Vec3; 3], normal: Vec3 },
    /// Flat quad, counter-clockwise seen from the side `normal` points to.
    Quad { vertices: [Vec3; 4], normal: Vec3 },
    /// Open tube around +y from `y = 0` to `y = height`.
    Cylinder {
        radius: f32,
        height: f32,
        slices: u32,
        stacks: u32,
    },
    /// Upper hemisphere with its flat side on `y = 0`.
    Dome { radius: f32, slices: u32, rings: u32 },
    /// Unit tiles covering `[-half_extent, half_extent]` on x and z at `y = 0`.
    TiledPlane { half_extent: i32 },
}

impl Shape {
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Cube => "cube",
            Shape::Triangle { .. } => "triangle",
            Shape::Quad { .. } => "quad",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Dome { .. } => "dome",
            Shape::TiledPlane { .. } => "tiled-plane",
        }
    }
}

/// One draw command: a shape, its material color and its model transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub color: Color,
    pub transform: Mat4,
}

impl Primitive {
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            transform: Mat4::IDENTITY,
        }
    }

    /// Apply `outer` after this primitive's own transform.
    pub fn transformed(mut self, outer: Mat4) -> Self {
        self.transform = outer * self.transform;
        self
    }

    pub fn translation(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

/// A `width` × `height` × `depth` box standing on `y = 0`.
pub fn build_box(width: f32, height: f32, depth: f32, color: Color) -> Vec<Primitive> {
    let transform = Mat4::from_scale_rotation_translation(
        Vec3::new(width, height, depth),
        Quat::IDENTITY,
        Vec3::new(0.0, height / 2.0, 0.0),
    );
    vec![Primitive {
        shape: Shape::Cube,
        color,
        transform,
    }]
}

/// Ridge roof over a `width` × `depth` base, apex `height` above `y = 0`.
///
/// Gables close the ends at `z = ±depth/2`; the two slopes face -x and +x.
/// The gables keep an upward tilt on their normals so they catch overhead light.
pub fn build_gabled_roof(width: f32, height: f32, depth: f32, color: Color) -> Vec<Primitive> {
    let (hw, hd) = (width / 2.0, depth / 2.0);
    let front_apex = Vec3::new(0.0, height, hd);
    let back_apex = Vec3::new(0.0, height, -hd);

    let front = Shape::Triangle {
        vertices: [Vec3::new(-hw, 0.0, hd), Vec3::new(hw, 0.0, hd), front_apex],
        normal: Vec3::new(0.0, 1.0, 1.0).normalize(),
    };
    let back = Shape::Triangle {
        vertices: [Vec3::new(hw, 0.0, -hd), Vec3::new(-hw, 0.0, -hd), back_apex],
        normal: Vec3::new(0.0, 1.0, -1.0).normalize(),
    };
    let left = Shape::Quad {
        vertices: [
            Vec3::new(-hw, 0.0, -hd),
            Vec3::new(-hw, 0.0, hd),
            front_apex,
            back_apex,
        ],
        normal: Vec3::NEG_X,
    };
    let right = Shape::Quad {
        vertices: [
            Vec3::new(hw, 0.0, hd),
            Vec3::new(hw, 0.0, -hd),
            back_apex,
            front_apex,
        ],
        normal: Vec3::X,
    };

    [front, back, left, right]
        .into_iter()
        .map(|shape| Primitive::new(shape, color))
        .collect()
}

/// Upright cylinder capped by a dome of the same radius.
pub fn build_silo(radius: f32, height: f32, color: Color) -> Vec<Primitive> {
    let tube = Primitive::new(
        Shape::Cylinder {
            radius,
            height,
            slices: SILO_SLICES,
            stacks: SILO_STACKS,
        },
        color,
    );
    let dome = Primitive::new(
        Shape::Dome {
            radius,
            slices: SILO_SLICES,
            rings: DOME_RINGS,
        },
        color,
    )
    .transformed(Mat4::from_translation(Vec3::new(0.0, height, 0.0)));
    vec![tube, dome]
}
