use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// 1 g/cm³ in kg/km³ (10⁵ cm per km cubed, over 10³ g per kg).
pub const G_CM3_TO_KG_KM3: f64 = 1.0e12;

/// A physical volume density (mass per volume) quantity using f64 precision.
///
/// Base unit: g/cm³, the CGS convention used in small-body literature.
/// Asteroid taxonomy densities used by the mass approximation model:
/// - C-type (dark, albedo < 0.1): ~1.38 g/cm³
/// - S-type (moderate, albedo < 0.2): ~1.25 g/cm³
/// - M-type (bright/metallic): ~5.32 g/cm³
///
/// # Examples
///
/// ```rust
/// use units::VolumeDensity;
///
/// let c_type = VolumeDensity::from_grams_per_cm3(1.38);
///
/// // Mass of a sphere: volume in km³ times density in kg/km³
/// let mass_kg = 4.0 / 3.0 * std::f64::consts::PI * 500.0_f64.powi(3)
///     * c_type.to_kg_per_km3();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VolumeDensity(f64); // Base unit: g/cm³

impl VolumeDensity {
    /// Creates a new `VolumeDensity` from a value in grams per cubic centimeter.
    pub fn from_grams_per_cm3(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `VolumeDensity` from a value in kilograms per cubic meter.
    pub fn from_kg_per_m3(value: f64) -> Self {
        // 1 kg/m³ = 0.001 g/cm³
        Self(value * 0.001)
    }

    /// Returns the volume density in grams per cubic centimeter.
    pub fn to_grams_per_cm3(&self) -> f64 {
        self.0
    }

    /// Converts the volume density to kilograms per cubic meter.
    pub fn to_kg_per_m3(&self) -> f64 {
        self.0 * 1000.0
    }

    /// Converts the volume density to kilograms per cubic kilometer.
    ///
    /// This is the unit the mass-from-diameter model works in, since body
    /// diameters arrive in kilometers.
    pub fn to_kg_per_km3(&self) -> f64 {
        self.0 * G_CM3_TO_KG_KM3
    }
}

impl Add for VolumeDensity {
    type Output = VolumeDensity;

    fn add(self, rhs: VolumeDensity) -> VolumeDensity {
        VolumeDensity(self.0 + rhs.0)
    }
}

impl Sub for VolumeDensity {
    type Output = VolumeDensity;

    fn sub(self, rhs: VolumeDensity) -> VolumeDensity {
        VolumeDensity(self.0 - rhs.0)
    }
}

impl Mul<f64> for VolumeDensity {
    type Output = VolumeDensity;

    fn mul(self, rhs: f64) -> VolumeDensity {
        VolumeDensity(self.0 * rhs)
    }
}

impl Div<f64> for VolumeDensity {
    type Output = VolumeDensity;

    fn div(self, rhs: f64) -> VolumeDensity {
        VolumeDensity(self.0 / rhs)
    }
}
