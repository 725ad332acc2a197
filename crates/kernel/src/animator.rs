use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnimatorError {
    #[error("animator step {0} must be finite and positive")]
    InvalidStep(f32),
}

/// Drives the silo accent spin: an angle in degrees advanced once per tick.
///
/// Cadence-agnostic; whoever calls [`FrameAnimator::tick`] decides the rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAnimator {
    angle: f32,
    step: f32,
    ticks: u64,
}

impl Default for FrameAnimator {
    fn default() -> Self {
        Self {
            angle: 0.0,
            step: 1.0,
            ticks: 0,
        }
    }
}

impl FrameAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animator starting at 0 that advances `step` degrees per tick.
    pub fn with_step(step: f32) -> Result<Self, AnimatorError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(AnimatorError::InvalidStep(step));
        }
        Ok(Self {
            step,
            ..Self::default()
        })
    }

    /// Current angle in degrees, always in `[0, 360)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Number of ticks since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one step, snapping back to 0 on reaching 360.
    pub fn tick(&mut self) {
        self.angle += self.step;
        if self.angle >= 360.0 {
            self.angle = 0.0;
        }
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let a = FrameAnimator::new();
        assert_eq!(a.angle(), 0.0);
        assert_eq!(a.ticks(), 0);
    }

    #[test]
    fn full_turn_returns_to_zero() {
        let mut a = FrameAnimator::new();
        for _ in 0..359 {
            a.tick();
        }
        assert_eq!(a.angle(), 359.0);
        a.tick();
        assert_eq!(a.angle(), 0.0);
        assert_eq!(a.ticks(), 360);
    }

    #[test]
    fn angle_stays_in_range_and_advances_modulo_wrap() {
        let mut a = FrameAnimator::with_step(7.3).unwrap();
        let mut prev = a.angle();
        for _ in 0..5000 {
            a.tick();
            let now = a.angle();
            assert!((0.0..360.0).contains(&now));
            assert!(now > prev || now == 0.0, "{prev} -> {now}");
            prev = now;
        }
    }

    #[test]
    fn step_larger_than_a_turn_still_wraps() {
        let mut a = FrameAnimator::with_step(720.0).unwrap();
        a.tick();
        assert_eq!(a.angle(), 0.0);
    }

    #[test]
    fn rejects_steps_that_cannot_advance() {
        for step in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(FrameAnimator::with_step(step).is_err(), "step {step}");
        }
        assert_eq!(
            FrameAnimator::with_step(-1.0),
            Err(AnimatorError::InvalidStep(-1.0))
        );
    }

    #[test]
    fn tiny_step_stays_in_range() {
        let mut a = FrameAnimator::with_step(0.001).unwrap();
        for _ in 0..1000 {
            a.tick();
            assert!((0.0..360.0).contains(&a.angle()));
        }
    }
}
