use glam::{Mat4, Vec3};
use thiserror::Error;

/// Horizontal distance from the camera to the scene origin.
pub const ORBIT_RADIUS: f32 = 15.0;

#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    #[error("camera height {height} must be above the height step {step}")]
    HeightTooLow { height: f32, step: f32 },
    #[error("camera height {0} is not finite")]
    NonFiniteHeight(f32),
    #[error("camera {axis} step {step} must be finite and positive")]
    InvalidStep { axis: &'static str, step: f32 },
}

fn check_step(axis: &'static str, step: f32) -> Result<(), CameraError> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidStep { axis, step })
    }
}

/// One of the four directional inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Camera orbiting the origin at a fixed radius.
///
/// Azimuth is unbounded; trigonometric periodicity does the wrapping. Height
/// only has a floor: moving down never takes it to or below `height_step`,
/// which keeps the camera above the ground. There is no ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    azimuth: f32,
    height: f32,
    azimuth_step: f32,
    height_step: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            height: 5.0,
            azimuth_step: 0.05,
            height_step: 0.3,
        }
    }
}

impl OrbitCamera {
    /// Camera at the given azimuth (radians) and height, with default steps.
    pub fn new(azimuth: f32, height: f32) -> Result<Self, CameraError> {
        Self::with_steps(azimuth, height, 0.05, 0.3)
    }

    pub fn with_steps(
        azimuth: f32,
        height: f32,
        azimuth_step: f32,
        height_step: f32,
    ) -> Result<Self, CameraError> {
        if !height.is_finite() {
            return Err(CameraError::NonFiniteHeight(height));
        }
        check_step("azimuth", azimuth_step)?;
        check_step("height", height_step)?;
        if height <= height_step {
            return Err(CameraError::HeightTooLow {
                height,
                step: height_step,
            });
        }
        Ok(Self {
            azimuth,
            height,
            azimuth_step,
            height_step,
        })
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn height_step(&self) -> f32 {
        self.height_step
    }

    pub fn move_left(&mut self) {
        self.azimuth -= self.azimuth_step;
    }

    pub fn move_right(&mut self) {
        self.azimuth += self.azimuth_step;
    }

    pub fn move_up(&mut self) {
        self.height += self.height_step;
    }

    /// Lower the camera one step unless that would reach the floor.
    pub fn move_down(&mut self) {
        let lowered = self.height - self.height_step;
        if lowered > self.height_step {
            self.height = lowered;
        } else {
            tracing::trace!(height = self.height, "camera at floor");
        }
    }

    pub fn apply(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
        tracing::trace!(?direction, azimuth = self.azimuth, height = self.height, "camera moved");
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            ORBIT_RADIUS * self.azimuth.cos(),
            self.height,
            ORBIT_RADIUS * self.azimuth.sin(),
        )
    }

    /// The camera always looks at the origin.
    pub fn target(&self) -> Vec3 {
        Vec3::ZERO
    }

    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target(), self.up())
    }
}
