use std::f64::consts::TAU;

use crate::rotation::RotationState;

/// Default auto-rotation rate of the globe (radians per second).
pub const DEFAULT_SPIN_RATE_RAD_PER_S: f64 = 0.1;

/// Continuous auto-rotation of the globe about its vertical axis.
///
/// Owned by the animation loop. The click path only ever sees a
/// [`RotationState`] snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AutoRotation {
    angle_rad: f64,
    rate_rad_per_s: f64,
}

impl AutoRotation {
    pub fn new(rate_rad_per_s: f64) -> Self {
        Self {
            angle_rad: 0.0,
            rate_rad_per_s,
        }
    }

    pub fn rate_rad_per_s(&self) -> f64 {
        self.rate_rad_per_s
    }

    /// Advance by one frame. The angle stays in `[0, 2π)`.
    pub fn advance(&mut self, dt_s: f64) {
        self.advance_frames(1, dt_s);
    }

    /// Advance by `frames` equal frames of `dt_s` in one step.
    ///
    /// A non-finite step (bad `dt_s` or rate, or an overflowing product)
    /// leaves the angle unchanged.
    pub fn advance_frames(&mut self, frames: u64, dt_s: f64) {
        let step = self.rate_rad_per_s * dt_s * frames as f64;
        if !step.is_finite() {
            return;
        }
        let next = (self.angle_rad + step).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs.
        self.angle_rad = if next >= TAU { 0.0 } else { next };
    }

    pub fn snapshot(&self) -> RotationState {
        RotationState::new(self.angle_rad)
    }
}

impl Default for AutoRotation {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_RATE_RAD_PER_S)
    }
}
