use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub(crate) const DAYS_PER_YEAR: f64 = 365.25;

/// A physical time quantity using f64 precision.
///
/// Base unit: days. The integrator's timestep and the orbital epochs in the
/// Keplerian datasets are both expressed in days (Julian dates), which makes
/// days the natural simulation unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: days

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in days.
    pub fn from_days(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_seconds(value: f64) -> Self {
        Self(value / SECONDS_PER_DAY)
    }

    /// Creates a new `Time` from a value in Julian years.
    pub fn from_years(value: f64) -> Self {
        Self(value * DAYS_PER_YEAR)
    }

    /// Returns the time in days.
    pub fn to_days(&self) -> f64 {
        self.0
    }

    /// Converts the time to seconds.
    pub fn to_seconds(&self) -> f64 {
        self.0 * SECONDS_PER_DAY
    }

    /// Converts the time to Julian years.
    pub fn to_years(&self) -> f64 {
        self.0 / DAYS_PER_YEAR
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}
