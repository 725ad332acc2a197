use crate::compose::compose_building;
use crate::geometry::{Primitive, Shape};
use crate::renderer::RenderView;
use farmstead_kernel::{AppState, BuildingType, GroundPlane, OrbitCamera, Scene};
use glam::{Mat4, Vec3};

/// Primitives belonging to one scene element, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawGroup {
    pub label: &'static str,
    pub origin: Vec3,
    pub primitives: Vec<Primitive>,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view: RenderView,
    pub rotation_angle: f32,
    pub seed: Option<u64>,
    pub groups: Vec<DrawGroup>,
}

impl Frame {
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.groups.iter().flat_map(|g| g.primitives.iter())
    }

    pub fn primitive_count(&self) -> usize {
        self.groups.iter().map(|g| g.primitives.len()).sum()
    }
}

pub fn ground_primitive(ground: &GroundPlane) -> Primitive {
    Primitive::new(
        Shape::TiledPlane {
            half_extent: ground.half_extent,
        },
        ground.color,
    )
}

/// Spin about the world y axis, applied before the silo is placed.
fn accent_spin(angle_degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(angle_degrees.to_radians())
}

/// Build the draw list for one frame: ground first, then buildings in
/// scene order. Only silos receive the accent spin.
pub fn compose_frame(scene: &Scene, camera: &OrbitCamera, rotation_angle: f32) -> Frame {
    let mut groups = Vec::with_capacity(scene.buildings().len() + 1);
    groups.push(DrawGroup {
        label: "ground",
        origin: Vec3::ZERO,
        primitives: vec![ground_primitive(scene.ground())],
    });

    let spin = accent_spin(rotation_angle);
    for building in scene.buildings() {
        let parts = compose_building(building);
        let primitives = match building.kind {
            BuildingType::Silo => parts.into_iter().map(|p| p.transformed(spin)).collect(),
            BuildingType::House | BuildingType::Barn => parts,
        };
        groups.push(DrawGroup {
            label: building.kind.label(),
            origin: building.position.to_vec3(),
            primitives,
        });
    }

    let frame = Frame {
        view: RenderView::from_camera(camera),
        rotation_angle,
        seed: scene.seed(),
        groups,
    };
    tracing::trace!(
        groups = frame.groups.len(),
        primitives = frame.primitive_count(),
        rotation_angle,
        "frame composed"
    );
    frame
}

pub fn render_scene(state: &AppState) -> Frame {
    compose_frame(state.scene(), state.camera(), state.rotation_angle())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{compose_barn, compose_house, compose_silo};
    use farmstead_kernel::{Direction, SceneConfig};

    fn state(seed: u64) -> AppState {
        AppState::new(Scene::from_seed(&SceneConfig::default(), seed).unwrap())
    }

    #[test]
    fn ground_then_one_group_per_building() {
        let s = state(42);
        let frame = render_scene(&s);
        assert_eq!(frame.groups.len(), 7);
        assert_eq!(frame.groups[0].label, "ground");
        assert_eq!(
            frame.groups[0].primitives,
            vec![ground_primitive(s.scene().ground())]
        );
        for (group, building) in frame.groups[1..].iter().zip(s.scene().buildings()) {
            assert_eq!(group.label, building.kind.label());
            assert_eq!(group.origin, building.position.to_vec3());
        }
        assert_eq!(frame.seed, Some(42));
    }

    #[test]
    fn view_follows_camera() {
        let mut s = state(1);
        s.steer(Direction::Up);
        let frame = render_scene(&s);
        assert_eq!(frame.view.eye, s.camera().eye());
        assert_eq!(frame.view.target, Vec3::ZERO);
        assert_eq!(frame.view.up, Vec3::Y);
    }

    #[test]
    fn only_silos_spin() {
        let config = SceneConfig {
            building_count: 30,
            ..SceneConfig::default()
        };
        let scene = Scene::from_seed(&config, 9).unwrap();
        let camera = OrbitCamera::default();
        let frame = compose_frame(&scene, &camera, 90.0);

        for (group, b) in frame.groups[1..].iter().zip(scene.buildings()) {
            let expected = match b.kind {
                BuildingType::House => compose_house(b.position, b.wall_color, b.roof_color),
                BuildingType::Barn => compose_barn(b.position, b.wall_color, b.roof_color),
                BuildingType::Silo => {
                    let spun: Vec<Primitive> = compose_silo(b.position, b.wall_color)
                        .into_iter()
                        .map(|p| p.transformed(Mat4::from_rotation_y(90f32.to_radians())))
                        .collect();
                    spun
                }
            };
            assert_eq!(group.primitives, expected);
        }
    }

    #[test]
    fn silo_spin_sweeps_about_origin() {
        let scene = Scene::from_seed(&SceneConfig::default(), 3).unwrap();
        let camera = OrbitCamera::default();
        let frame = compose_frame(&scene, &camera, 180.0);
        for (group, b) in frame.groups[1..].iter().zip(scene.buildings()) {
            if b.kind != BuildingType::Silo {
                continue;
            }
            let t = group.primitives[0].translation();
            assert!(t.abs_diff_eq(Vec3::new(-b.position.x, 0.0, -b.position.z), 1e-4));
        }
    }

    #[test]
    fn zero_angle_leaves_silos_in_place() {
        let scene = Scene::from_seed(&SceneConfig::default(), 4).unwrap();
        let frame = compose_frame(&scene, &OrbitCamera::default(), 0.0);
        for (group, b) in frame.groups[1..].iter().zip(scene.buildings()) {
            if b.kind == BuildingType::Silo {
                assert_eq!(group.primitives, compose_silo(b.position, b.wall_color));
            }
        }
    }

    #[test]
    fn frames_are_deterministic_for_a_seed() {
        let mut a = state(77);
        let mut b = state(77);
        for _ in 0..45 {
            a.tick();
            b.tick();
        }
        a.steer(Direction::Left);
        b.steer(Direction::Left);
        assert_eq!(render_scene(&a), render_scene(&b));
    }

    #[test]
    fn primitive_count_matches_iteration() {
        let frame = render_scene(&state(5));
        assert_eq!(frame.primitives().count(), frame.primitive_count());
    }
}
