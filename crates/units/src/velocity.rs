use crate::length::AU_TO_M;
use crate::time::SECONDS_PER_DAY;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Convert between AU/day and m/s.
pub const AU_DAY_TO_M_S: f64 = AU_TO_M / SECONDS_PER_DAY;

/// A velocity quantity, base unit AU/day — the frame all simulation
/// velocities live in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: AU/day

impl Velocity {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_au_per_day(value: f64) -> Self {
        Self(value)
    }

    pub fn from_meters_per_sec(value: f64) -> Self {
        Self(value / AU_DAY_TO_M_S)
    }

    pub fn to_au_per_day(&self) -> f64 {
        self.0
    }

    pub fn to_meters_per_sec(&self) -> f64 {
        self.0 * AU_DAY_TO_M_S
    }
}

impl Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 + rhs.0)
    }
}

impl Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 - rhs.0)
    }
}

impl Mul<f64> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: f64) -> Velocity {
        Velocity(self.0 * rhs)
    }
}

impl Div<f64> for Velocity {
    type Output = Velocity;

    fn div(self, rhs: f64) -> Velocity {
        Velocity(self.0 / rhs)
    }
}
