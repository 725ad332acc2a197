use crate::geometry::{Primitive, build_box, build_gabled_roof, build_silo};
use farmstead_common::Color;
use farmstead_kernel::{Building, BuildingType, GroundPos};
use glam::{Mat4, Vec3};

/// Body and roof dimensions (width, height, depth) of a house.
pub const HOUSE_BODY: Vec3 = Vec3::new(2.0, 1.2, 2.0);
pub const HOUSE_ROOF: Vec3 = Vec3::new(2.2, 1.0, 2.2);
/// Body and roof dimensions (width, height, depth) of a barn.
pub const BARN_BODY: Vec3 = Vec3::new(3.0, 2.0, 2.5);
pub const BARN_ROOF: Vec3 = Vec3::new(3.5, 1.5, 2.5);
pub const SILO_RADIUS: f32 = 0.6;
pub const SILO_HEIGHT: f32 = 3.5;

/// Box body with a roof resting on its top face.
fn gabled_building(pos: GroundPos, body: Vec3, roof: Vec3, wall: Color, roof_color: Color) -> Vec<Primitive> {
    let on_top = Mat4::from_translation(Vec3::new(0.0, body.y, 0.0));
    let place = Mat4::from_translation(pos.to_vec3());

    build_box(body.x, body.y, body.z, wall)
        .into_iter()
        .chain(
            build_gabled_roof(roof.x, roof.y, roof.z, roof_color)
                .into_iter()
                .map(|p| p.transformed(on_top)),
        )
        .map(|p| p.transformed(place))
        .collect()
}

pub fn compose_house(pos: GroundPos, wall: Color, roof: Color) -> Vec<Primitive> {
    gabled_building(pos, HOUSE_BODY, HOUSE_ROOF, wall, roof)
}

pub fn compose_barn(pos: GroundPos, wall: Color, roof: Color) -> Vec<Primitive> {
    gabled_building(pos, BARN_BODY, BARN_ROOF, wall, roof)
}

/// Silo at `pos`. The accent spin is a render-time concern and is not applied here.
pub fn compose_silo(pos: GroundPos, color: Color) -> Vec<Primitive> {
    let place = Mat4::from_translation(pos.to_vec3());
    build_silo(SILO_RADIUS, SILO_HEIGHT, color)
        .into_iter()
        .map(|p| p.transformed(place))
        .collect()
}

pub fn compose_building(building: &Building) -> Vec<Primitive> {
    match building.kind {
        BuildingType::House => {
            compose_house(building.position, building.wall_color, building.roof_color)
        }
        BuildingType::Barn => {
            compose_barn(building.position, building.wall_color, building.roof_color)
        }
        BuildingType::Silo => compose_silo(building.position, building.wall_color),
    }
}
