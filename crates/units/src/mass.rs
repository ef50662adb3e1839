use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Mass of the Sun in kilograms (1.98847 × 10³⁰ kg).
///
/// This is also the mass of the implicit central body seeded into Keplerian
/// datasets, so it must match the dataset convention exactly.
pub const SOLAR_MASS_KG: f64 = 1.98847e30;

/// A physical mass quantity using f64 precision.
///
/// The `Mass` struct represents mass values with kilograms as the base unit.
/// The integrator works directly in kilograms (the gravitational constant is
/// rescaled to AU³·day⁻²·kg⁻¹ instead), so unlike position and time there is
/// no astronomical rescaling of mass anywhere in the pipeline.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let sun = Mass::from_solar_masses(1.0);
/// let ceres = Mass::from_kg(9.38e20);
///
/// let sun_in_kg = sun.to_kg();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: kilograms

impl Mass {
    /// Creates a zero mass value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Mass` from a value in kilograms.
    pub fn from_kg(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from a value in solar masses.
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value * SOLAR_MASS_KG)
    }

    /// Returns the mass in kilograms.
    pub fn to_kg(&self) -> f64 {
        self.0
    }

    /// Converts the mass to solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0 / SOLAR_MASS_KG
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Mul<Mass> for f64 {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Mass {
        rhs * self
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}
