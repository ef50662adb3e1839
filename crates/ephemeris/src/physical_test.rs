use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::physical::{approximate_albedo, approximate_mass, density_for_albedo};

#[test]
fn test_density_tiers() {
    assert_relative_eq!(density_for_albedo(0.05).to_grams_per_cm3(), 1.38);
    assert_relative_eq!(density_for_albedo(0.15).to_grams_per_cm3(), 1.25);
    assert_relative_eq!(density_for_albedo(0.30).to_grams_per_cm3(), 5.32);

    // Thresholds are exclusive on the low side
    assert_relative_eq!(density_for_albedo(0.1).to_grams_per_cm3(), 1.25);
    assert_relative_eq!(density_for_albedo(0.2).to_grams_per_cm3(), 5.32);
}

#[test]
fn test_mass_from_diameter_is_sphere_volume_times_density() {
    // 1000 km dark body: 4/3·π·500³ km³ at 1.38 g/cm³ (= 1.38e12 kg/km³)
    let expected = 4.0 / 3.0 * std::f64::consts::PI * 500.0_f64.powi(3) * 1.38e12;
    let mass = approximate_mass(1000.0, Some(0.05));
    assert_relative_eq!(mass.to_kg(), expected, max_relative = 1e-12);
}

#[test]
fn test_missing_albedo_behaves_like_zero() {
    // The unknown-class fallback yields no albedo; the density model then
    // selects the darkest tier, same as an explicit zero.
    let with_none = approximate_mass(250.0, None);
    let with_zero = approximate_mass(250.0, Some(0.0));
    assert_relative_eq!(with_none.to_kg(), with_zero.to_kg());
}

#[test]
fn test_missing_diameter_yields_zero_mass() {
    assert_relative_eq!(approximate_mass(0.0, Some(0.5)).to_kg(), 0.0);
}

#[test]
fn test_albedo_sampled_within_class_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..100 {
        let albedo = approximate_albedo("TNO", &mut rng).unwrap();
        assert!((0.022..0.130).contains(&albedo));
    }
}

#[test]
fn test_albedo_sampling_is_seed_deterministic() {
    let mut rng_a = ChaCha8Rng::seed_from_u64(7);
    let mut rng_b = ChaCha8Rng::seed_from_u64(7);

    let a = approximate_albedo("MBA", &mut rng_a);
    let b = approximate_albedo("MBA", &mut rng_b);
    assert_eq!(a, b);
}

#[test]
fn test_unknown_class_has_no_albedo_fallback() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    assert_eq!(approximate_albedo("PLA", &mut rng), None);
    assert_eq!(approximate_albedo("", &mut rng), None);
}
