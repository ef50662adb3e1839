//! Physical approximation models for bodies with incomplete catalog data.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use units::{Mass, VolumeDensity};

/// Bulk density tier selected by geometric albedo.
///
/// Dark surfaces (albedo < 0.1) read as primitive low-density bodies,
/// moderate albedo as stony, bright as dense/metallic.
pub fn density_for_albedo(albedo: f64) -> VolumeDensity {
    if albedo < 0.1 {
        VolumeDensity::from_grams_per_cm3(1.38)
    } else if albedo < 0.2 {
        VolumeDensity::from_grams_per_cm3(1.25)
    } else {
        VolumeDensity::from_grams_per_cm3(5.32)
    }
}

/// Estimates a body's mass from its diameter (km) and albedo via the fixed
/// density model: sphere volume times the albedo-selected tier.
///
/// A missing albedo compares like zero and lands in the darkest tier — an
/// inherited dataset convention, preserved deliberately (see DESIGN.md).
/// A missing diameter yields zero mass the same way.
pub fn approximate_mass(diameter_km: f64, albedo: Option<f64>) -> Mass {
    let rho = density_for_albedo(albedo.unwrap_or(0.0));
    let radius_km = diameter_km / 2.0;
    let volume_km3 = 4.0 / 3.0 * std::f64::consts::PI * radius_km.powi(3);
    Mass::from_kg(volume_km3 * rho.to_kg_per_km3())
}

/// Samples an albedo uniformly from the known range for an orbit class.
///
/// Returns `None` for classes without a tabulated range.
pub fn approximate_albedo(class_tag: &str, rng: &mut ChaCha8Rng) -> Option<f64> {
    let (min, max) = albedo_range(class_tag)?;
    Some(rng.random_range(min..max))
}

/// Measured geometric-albedo ranges per small-body orbit class.
fn albedo_range(class_tag: &str) -> Option<(f64, f64)> {
    let range = match class_tag {
        "AMO" => (0.450, 0.550),
        "OMB" => (0.197, 0.500),
        "APO" => (0.450, 0.550),
        "CEN" => (0.450, 0.750),
        "ATE" => (0.450, 0.550),
        "TJN" => (0.124, 0.188),
        "IEO" => (0.450, 0.550),
        "TNO" => (0.022, 0.130),
        "MCA" => (0.450, 0.550),
        "AST" => (0.450, 0.550),
        "IMB" => (0.030, 0.103),
        "PAA" => (0.450, 0.550),
        "MBA" => (0.097, 0.203),
        "HYA" => (0.450, 0.550),
        _ => return None,
    };
    Some(range)
}
