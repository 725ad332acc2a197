use farmstead_common::{Color, random_color};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Material of the ground tiles.
pub const GROUND_COLOR: Color = Color::rgb(0.3, 0.8, 0.3);

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("placement half extent must be positive, got {0}")]
    EmptyPlacementArea(i32),
    #[error("ground half extent must be positive, got {0}")]
    EmptyGround(i32),
}

/// The kinds of structure a scene can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    House,
    Barn,
    Silo,
}

impl BuildingType {
    pub const ALL: [BuildingType; 3] = [BuildingType::House, BuildingType::Barn, BuildingType::Silo];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildingType::House => "house",
            BuildingType::Barn => "barn",
            BuildingType::Silo => "silo",
        }
    }
}

/// A point on the ground plane (y = 0).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundPos {
    pub x: f32,
    pub z: f32,
}

impl GroundPos {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }
}

/// One placed building. Silos ignore `roof_color`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub position: GroundPos,
    pub kind: BuildingType,
    pub wall_color: Color,
    pub roof_color: Color,
}

/// Square ground tiling from `-half_extent` to `+half_extent` on x and z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    pub half_extent: i32,
    pub color: Color,
}

impl GroundPlane {
    /// Number of unit tiles covering the plane.
    pub fn tile_count(&self) -> usize {
        let side = (2 * self.half_extent) as usize;
        side * side
    }
}

/// Knobs for scene generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub building_count: usize,
    /// Buildings are placed on the integer grid in `[-n, n)` on both axes.
    pub placement_half_extent: i32,
    pub ground_half_extent: i32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            building_count: 6,
            placement_half_extent: 8,
            ground_half_extent: 20,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.placement_half_extent <= 0 {
            return Err(SceneError::EmptyPlacementArea(self.placement_half_extent));
        }
        if self.ground_half_extent <= 0 {
            return Err(SceneError::EmptyGround(self.ground_half_extent));
        }
        Ok(())
    }
}

/// The placed buildings plus the ground they stand on.
///
/// Built once at startup and read-only afterwards: there are no mutators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    buildings: Vec<Building>,
    ground: GroundPlane,
    seed: Option<u64>,
}

impl Scene {
    /// Sample a scene from `rng`.
    ///
    /// Per slot the draw order is x, z, type, wall color, roof color, so a
    /// given seed always yields the same scene.
    pub fn generate<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Self, SceneError> {
        config.validate()?;
        let extent = config.placement_half_extent;
        let buildings = (0..config.building_count)
            .map(|slot| {
                let x = rng.gen_range(-extent..extent) as f32;
                let z = rng.gen_range(-extent..extent) as f32;
                let kind = BuildingType::random(rng);
                let wall_color = random_color(rng);
                let roof_color = random_color(rng);
                tracing::debug!(
                    slot,
                    kind = kind.label(),
                    x,
                    z,
                    wall = %wall_color,
                    roof = %roof_color,
                    "placed building"
                );
                Building {
                    position: GroundPos::new(x, z),
                    kind,
                    wall_color,
                    roof_color,
                }
            })
            .collect();

        Ok(Self {
            buildings,
            ground: GroundPlane {
                half_extent: config.ground_half_extent,
                color: GROUND_COLOR,
            },
            seed: None,
        })
    }

    /// Generate from a `ChaCha8Rng` seeded with `seed`, remembering the seed.
    pub fn from_seed(config: &SceneConfig, seed: u64) -> Result<Self, SceneError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut scene = Self::generate(config, &mut rng)?;
        scene.seed = Some(seed);
        tracing::info!(seed, buildings = scene.buildings.len(), "scene generated");
        Ok(scene)
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn ground(&self) -> &GroundPlane {
        &self.ground
    }

    /// Seed the scene was generated from, when known.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn count_of(&self, kind: BuildingType) -> usize {
        self.buildings.iter().filter(|b| b.kind == kind).count()
    }
}

/// Seed derived from the wall clock, for runs without an explicit seed.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
