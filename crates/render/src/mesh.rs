use crate::geometry::{Primitive, Shape};
use glam::{Mat3, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Indexed triangle list, counter-clockwise front faces.
///
/// Built fresh for each primitive; all scratch space is owned by the mesh
/// and dropped with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Tessellate a shape in its local space.
    pub fn from_shape(shape: &Shape) -> Self {
        let mut mesh = Mesh::default();
        match *shape {
            Shape::Cube => mesh.push_cube(),
            Shape::Triangle { vertices, normal } => mesh.push_polygon(&vertices, normal),
            Shape::Quad { vertices, normal } => mesh.push_polygon(&vertices, normal),
            Shape::Cylinder {
                radius,
                height,
                slices,
                stacks,
            } => mesh.push_cylinder(radius, height, slices, stacks),
            Shape::Dome {
                radius,
                slices,
                rings,
            } => mesh.push_dome(radius, slices, rings),
            Shape::TiledPlane { half_extent } => mesh.push_tiled_plane(half_extent),
        }
        mesh
    }

    /// Tessellate a primitive and move it into world space.
    pub fn from_primitive(primitive: &Primitive) -> Self {
        let mut mesh = Self::from_shape(&primitive.shape);
        let normal_matrix = Mat3::from_mat4(primitive.transform).inverse().transpose();
        for v in &mut mesh.vertices {
            v.position = primitive.transform.transform_point3(v.position);
            v.normal = (normal_matrix * v.normal).normalize_or_zero();
        }
        mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds `(min, max)`, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (lo.min(v.position), hi.max(v.position))
        }))
    }

    /// Vertices in draw order, one triple per triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [MeshVertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }

    fn base(&self) -> u32 {
        self.vertices.len() as u32
    }

    fn push_polygon(&mut self, corners: &[Vec3], normal: Vec3) {
        let base = self.base();
        self.vertices.extend(corners.iter().map(|&position| MeshVertex { position, normal }));
        for i in 1..corners.len() as u32 - 1 {
            self.indices.extend([base, base + i, base + i + 1]);
        }
    }

    fn push_cube(&mut self) {
        let p = 0.5_f32;
        #[rustfmt::skip]
        let faces = [
            (Vec3::Z,     [[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]]),
            (Vec3::NEG_Z, [[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]]),
            (Vec3::X,     [[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]]),
            (Vec3::NEG_X, [[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]]),
            (Vec3::Y,     [[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]]),
            (Vec3::NEG_Y, [[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]]),
        ];
        for (normal, corners) in faces {
            self.push_polygon(&corners.map(Vec3::from_array), normal);
        }
    }

    /// Grid of `(slices + 1) x (rows + 1)` vertices from `point(u, v)`,
    /// with `u` going around the axis and `v` going up.
    fn push_swept(
        &mut self,
        slices: u32,
        rows: u32,
        point: impl Fn(f32, f32) -> MeshVertex,
    ) {
        let slices = slices.max(3);
        let rows = rows.max(1);
        let base = self.base();
        for row in 0..=rows {
            for slice in 0..=slices {
                self.vertices
                    .push(point(slice as f32 / slices as f32, row as f32 / rows as f32));
            }
        }
        let stride = slices + 1;
        for row in 0..rows {
            for slice in 0..slices {
                let a = base + row * stride + slice;
                let b = a + 1;
                let c = b + stride;
                let d = a + stride;
                self.indices.extend([a, c, b, a, d, c]);
            }
        }
    }

    fn push_cylinder(&mut self, radius: f32, height: f32, slices: u32, stacks: u32) {
        self.push_swept(slices, stacks, |u, v| {
            let (sin, cos) = (u * TAU).sin_cos();
            MeshVertex {
                position: Vec3::new(radius * cos, height * v, radius * sin),
                normal: Vec3::new(cos, 0.0, sin),
            }
        });
    }

    fn push_dome(&mut self, radius: f32, slices: u32, rings: u32) {
        self.push_swept(slices, rings, |u, v| {
            let (sin_t, cos_t) = (u * TAU).sin_cos();
            let (sin_p, cos_p) = (v * FRAC_PI_2).sin_cos();
            let normal = Vec3::new(cos_p * cos_t, sin_p, cos_p * sin_t);
            MeshVertex {
                position: normal * radius,
                normal,
            }
        });
    }

    fn push_tiled_plane(&mut self, half_extent: i32) {
        for x in -half_extent..half_extent {
            for z in -half_extent..half_extent {
                let (x, z) = (x as f32, z as f32);
                self.push_polygon(
                    &[
                        Vec3::new(x, 0.0, z),
                        Vec3::new(x, 0.0, z + 1.0),
                        Vec3::new(x + 1.0, 0.0, z + 1.0),
                        Vec3::new(x + 1.0, 0.0, z),
                    ],
                    Vec3::Y,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_box, build_gabled_roof, build_silo};
    use farmstead_common::PALETTE;
    use glam::Mat4;

    /// Every non-degenerate triangle must wind counter-clockwise around its
    /// vertex normals, or back-face culling would drop it.
    fn assert_front_faces_out(mesh: &Mesh) {
        for [a, b, c] in mesh.triangles() {
            let geometric = (b.position - a.position).cross(c.position - a.position);
            if geometric.length_squared() < 1e-10 {
                continue;
            }
            let shading = a.normal + b.normal + c.normal;
            assert!(
                geometric.dot(shading) > 0.0,
                "inward triangle {:?} {:?} {:?}",
                a.position,
                b.position,
                c.position
            );
        }
    }

    #[test]
    fn cube_has_twelve_outward_triangles() {
        let mesh = Mesh::from_shape(&Shape::Cube);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_front_faces_out(&mesh);
        assert_eq!(
            mesh.bounds(),
            Some((Vec3::splat(-0.5), Vec3::splat(0.5)))
        );
    }

    #[test]
    fn cylinder_tessellation() {
        let mesh = Mesh::from_shape(&Shape::Cylinder {
            radius: 0.6,
            height: 3.5,
            slices: 20,
            stacks: 20,
        });
        assert_eq!(mesh.vertices.len(), 21 * 21);
        assert_eq!(mesh.triangle_count(), 20 * 20 * 2);
        assert_front_faces_out(&mesh);
        for v in &mesh.vertices {
            let r = (v.position.x * v.position.x + v.position.z * v.position.z).sqrt();
            assert!((r - 0.6).abs() < 1e-5);
            assert!((0.0..=3.5 + 1e-5).contains(&v.position.y));
        }
    }

    #[test]
    fn dome_is_upper_hemisphere() {
        let mesh = Mesh::from_shape(&Shape::Dome {
            radius: 0.6,
            slices: 20,
            rings: 10,
        });
        assert_front_faces_out(&mesh);
        for v in &mesh.vertices {
            assert!((v.position.length() - 0.6).abs() < 1e-5);
            assert!(v.position.y >= -1e-6);
        }
        let (_, max) = mesh.bounds().unwrap();
        assert!((max.y - 0.6).abs() < 1e-5);
    }

    #[test]
    fn degenerate_sweeps_are_clamped() {
        let mesh = Mesh::from_shape(&Shape::Cylinder {
            radius: 1.0,
            height: 1.0,
            slices: 0,
            stacks: 0,
        });
        assert_eq!(mesh.triangle_count(), 3 * 2);
    }

    #[test]
    fn tiled_plane_faces_up() {
        let mesh = Mesh::from_shape(&Shape::TiledPlane { half_extent: 20 });
        assert_eq!(mesh.triangle_count(), 1600 * 2);
        assert_front_faces_out(&mesh);
        assert_eq!(
            mesh.bounds(),
            Some((Vec3::new(-20.0, 0.0, -20.0), Vec3::new(20.0, 0.0, 20.0)))
        );
        assert!(mesh.vertices.iter().all(|v| v.normal == Vec3::Y));
    }

    #[test]
    fn roof_mesh_faces_out() {
        for p in build_gabled_roof(3.5, 1.5, 2.5, PALETTE[0]) {
            assert_front_faces_out(&Mesh::from_primitive(&p));
        }
    }

    #[test]
    fn primitive_transform_reaches_vertices_and_normals() {
        let boxed = build_box(2.0, 4.0, 1.0, PALETTE[0])[0]
            .transformed(Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)));
        let mesh = Mesh::from_primitive(&boxed);
        assert_front_faces_out(&mesh);
        let (min, max) = mesh.bounds().unwrap();
        assert!(min.abs_diff_eq(Vec3::new(2.0, 0.0, -0.5), 1e-5));
        assert!(max.abs_diff_eq(Vec3::new(4.0, 4.0, 0.5), 1e-5));
        assert!(mesh.vertices.iter().all(|v| v.normal.is_normalized()));
    }

    #[test]
    fn silo_mesh_reaches_dome_top() {
        let parts = build_silo(0.6, 3.5, PALETTE[2]);
        let top = parts
            .iter()
            .filter_map(|p| Mesh::from_primitive(p).bounds())
            .map(|(_, max)| max.y)
            .fold(f32::MIN, f32::max);
        assert!((top - 4.1).abs() < 1e-5);
    }
}
