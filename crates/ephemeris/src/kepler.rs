//! Keplerian orbital elements → Cartesian state vectors.
//!
//! Elements are propagated to a fixed reference epoch (J2000), Kepler's
//! equation is solved for the eccentric anomaly, and the perifocal state is
//! rotated into the inertial frame and composed with the central body's
//! state. The composition is Galilean and anchored to the central body's
//! state *at resolution time* — dependents are not re-anchored as the
//! central body moves later. That is a deliberate modeling simplification
//! of the resolution pass, matched to its one-way dependency order.

use std::f64::consts::TAU;

use nalgebra::{Point3, Rotation3, Vector3};
use units::{Length, Mass, AU_TO_M, SECONDS_PER_DAY};

/// Reference epoch all mean anomalies are propagated to, as a Julian date
/// (2000 Jan 1.0 TT).
pub const EPOCH_J2000_JD: f64 = 2_451_544.5;

/// Gravitational constant in AU³·day⁻²·kg⁻¹.
///
/// This is the fixed unit system of the resolution pass only; the runtime
/// simulation carries its own rescaled constant that the UI may change.
pub const G_AU_DAY_KG: f64 =
    6.6743e-11 * (SECONDS_PER_DAY * SECONDS_PER_DAY) / (AU_TO_M * AU_TO_M * AU_TO_M);

/// Newton–Raphson iteration count for Kepler's equation.
pub const KEPLER_ITERATIONS: usize = 30;

/// Keplerian orbital elements as they arrive from the dataset: angles in
/// degrees, semi-major axis in AU, epoch as a Julian date in days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub eccentricity: f64,
    pub semi_major_axis: Length,
    /// Inclination, degrees.
    pub inclination: f64,
    /// Longitude of the ascending node Ω, degrees.
    pub ascending_node: f64,
    /// Argument of periapsis ω, degrees.
    pub periapsis_argument: f64,
    /// Mean anomaly at `epoch`, degrees.
    pub mean_anomaly: f64,
    /// Epoch of the mean anomaly, Julian date.
    pub epoch: f64,
}

/// Solves Kepler's equation `E − e·sin(E) = M` for the eccentric anomaly.
///
/// Fixed 30 Newton–Raphson iterations, no convergence check: near-parabolic
/// eccentricities (e ≳ 0.9) may not fully converge in 30 steps. That is a
/// documented precision bound of the resolver, not a failure mode.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ecc_anomaly = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        ecc_anomaly -= (ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly)
            / (1.0 - eccentricity * ecc_anomaly.cos());
    }
    ecc_anomaly
}

/// Converts orbital elements plus the central body's current state into an
/// inertial-frame position (AU) and velocity (AU/day).
pub fn elements_to_state(
    elements: &OrbitalElements,
    central_mass: Mass,
    central_position: Point3<f64>,
    central_velocity: Vector3<f64>,
) -> (Point3<f64>, Vector3<f64>) {
    let mu = G_AU_DAY_KG * central_mass.to_kg();
    let a = elements.semi_major_axis.to_au();
    let e = elements.eccentricity;
    let node = elements.ascending_node.to_radians();
    let incl = elements.inclination.to_radians();
    let peri = elements.periapsis_argument.to_radians();
    let ma = elements.mean_anomaly.to_radians();

    // Propagate the mean anomaly to the reference epoch, wrapped to [0, 2π)
    let mean_motion = (mu / (a * a * a)).sqrt();
    let mean_anomaly = (ma + (EPOCH_J2000_JD - elements.epoch) * mean_motion).rem_euclid(TAU);

    let ecc_anomaly = solve_eccentric_anomaly(mean_anomaly, e);

    // True anomaly via the half-angle form, radius from the eccentric anomaly
    let true_anomaly = 2.0
        * ((1.0 + e).sqrt() * (ecc_anomaly / 2.0).sin())
            .atan2((1.0 - e).sqrt() * (ecc_anomaly / 2.0).cos());
    let radius = a * (1.0 - e * ecc_anomaly.cos());

    // Perifocal frame: periapsis on +x, orbit counterclockwise in the plane
    let position_pf = Vector3::new(
        radius * true_anomaly.cos(),
        radius * true_anomaly.sin(),
        0.0,
    );
    let semi_latus = a * (1.0 - e * e);
    let v_scale = (mu / semi_latus).sqrt();
    let velocity_pf = Vector3::new(
        -v_scale * true_anomaly.sin(),
        v_scale * (e + true_anomaly.cos()),
        0.0,
    );

    // 3-1-3 Euler rotation (Ω about z, i about x, ω about z) into the
    // inertial frame
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), node)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), incl)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), peri);

    let position = central_position + rotation * position_pf;
    let velocity = central_velocity + rotation * velocity_pf;

    (position, velocity)
}
