use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::body::{total_momentum, Body, BodyClass};
use crate::buffers::StateBufferPair;
use crate::constants::SimulationConstants;
use crate::kernel::{
    acceleration_on, integrate_step, integrate_step_par, ComputeBackend, SerialBackend,
};

fn small_body(position: Point3<f64>, velocity: Vector3<f64>, mass: f64) -> Body {
    Body::new(position, velocity, mass, BodyClass::SmallBody)
}

#[test]
fn test_acceleration_points_toward_attractor() {
    let constants = SimulationConstants::new(2);
    let bodies = vec![
        small_body(Point3::origin(), Vector3::zeros(), 1.0e24),
        small_body(Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), 1.0e24),
    ];

    let accel = acceleration_on(0, &bodies, &constants);
    assert!(accel.x > 0.0);
    assert_relative_eq!(accel.y, 0.0);
    assert_relative_eq!(accel.z, 0.0);
}

#[test]
fn test_acceleration_magnitude_two_body() {
    let constants = SimulationConstants::new(2);
    let mass = 1.98847e30;
    let bodies = vec![
        small_body(Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), 1.0),
        small_body(Point3::origin(), Vector3::zeros(), mass),
    ];

    let accel = acceleration_on(0, &bodies, &constants);

    // Softening is negligible at 1 AU separation: |a| = G m / r²
    let expected = constants.g * mass;
    assert_relative_eq!(accel.magnitude(), expected, max_relative = 1e-9);
}

#[test]
fn test_softening_keeps_acceleration_bounded_near_zero_separation() {
    let constants = SimulationConstants::new(2);
    let mass = 1.0e24;

    // G·m/ε² bounds the softened kernel for every separation; the true
    // maximum is lower (at d = ε/√2) but this is the scale that matters.
    let bound = constants.g * mass / constants.epsilon_sq;

    let accel_at = |separation: f64| {
        let bodies = vec![
            small_body(Point3::origin(), Vector3::zeros(), mass),
            small_body(Point3::new(separation, 0.0, 0.0), Vector3::zeros(), mass),
        ];
        acceleration_on(0, &bodies, &constants).magnitude()
    };

    for separation in [1.0e-4, 1.0e-6, 1.0e-8, 1.0e-10] {
        let accel = accel_at(separation);
        assert!(accel.is_finite());
        assert!(accel <= bound, "|a| = {accel} exceeds G·m/ε² = {bound}");
    }

    // Below the softening length the kernel rolls off toward zero instead of
    // diverging: a(d) ≈ G·m·d/ε³ for d ≪ ε.
    assert!(accel_at(1.0e-10) < bound * 1.0e-3);
}

#[test]
fn test_newtons_third_law_antisymmetry() {
    let constants = SimulationConstants::new(2);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..32 {
        let offset = Vector3::new(
            rng.random_range(-10.0..10.0),
            rng.random_range(-10.0..10.0),
            rng.random_range(-10.0..10.0),
        );
        let mass = rng.random_range(1.0e20..1.0e30);

        let bodies = vec![
            small_body(Point3::origin() + offset, Vector3::zeros(), mass),
            small_body(Point3::origin() - offset, Vector3::zeros(), mass),
        ];

        let a0 = acceleration_on(0, &bodies, &constants);
        let a1 = acceleration_on(1, &bodies, &constants);

        let scale = a0.magnitude().max(a1.magnitude());
        assert!((a0 + a1).magnitude() <= scale * 1.0e-14);
    }
}

#[test]
fn test_semi_implicit_update_uses_new_velocity() {
    let mut constants = SimulationConstants::new(2);
    constants.set_timestep_days(0.04);

    let mass = 1.98847e30;
    let read = vec![
        small_body(Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.01, 0.0), 1.0),
        small_body(Point3::origin(), Vector3::zeros(), mass),
    ];
    let mut write = read.clone();

    integrate_step(&read, &mut write, &constants);

    let accel = acceleration_on(0, &read, &constants);
    let expected_vel = read[0].velocity + accel * constants.dt;
    let expected_pos = read[0].position + expected_vel * constants.dt;

    assert_relative_eq!(write[0].velocity.y, expected_vel.y);
    // Position advances with the *updated* velocity, not the old one
    assert_relative_eq!(write[0].position.x, expected_pos.x);
    assert_relative_eq!(write[0].position.y, expected_pos.y);
}

#[test]
fn test_mass_and_class_pass_through() {
    let constants = SimulationConstants::new(2);
    let read = vec![
        Body::new(
            Point3::origin(),
            Vector3::zeros(),
            1.98847e30,
            BodyClass::Star,
        ),
        Body::new(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0172, 0.0),
            5.97e24,
            BodyClass::Planet,
        ),
    ];
    let mut write = read.clone();

    integrate_step(&read, &mut write, &constants);

    assert_eq!(write[0].class, BodyClass::Star);
    assert_eq!(write[1].class, BodyClass::Planet);
    assert_relative_eq!(write[0].mass, 1.98847e30);
    assert_relative_eq!(write[1].mass, 5.97e24);
}

#[test]
fn test_parallel_step_matches_serial_step() {
    let constants = SimulationConstants::new(8);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let read: Vec<Body> = (0..8)
        .map(|_| {
            small_body(
                Point3::new(
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0),
                ),
                Vector3::zeros(),
                rng.random_range(1.0e22..1.0e26),
            )
        })
        .collect();

    let mut serial = read.clone();
    let mut parallel = read.clone();

    integrate_step(&read, &mut serial, &constants);
    integrate_step_par(&read, &mut parallel, &constants);

    assert_eq!(serial, parallel);
}

#[test]
#[should_panic(expected = "equal length")]
fn test_mismatched_bank_length_is_a_contract_violation() {
    let constants = SimulationConstants::new(2);
    let read = vec![small_body(Point3::origin(), Vector3::zeros(), 1.0e24); 2];
    let mut write = vec![small_body(Point3::origin(), Vector3::zeros(), 1.0e24); 3];

    integrate_step(&read, &mut write, &constants);
}

#[test]
fn test_momentum_drift_bounded_over_ten_thousand_substeps() {
    let mut constants = SimulationConstants::new(2);
    constants.set_timestep_days(0.04);

    // Unequal-mass binary on a circular mutual orbit, barycenter at rest.
    // Equal masses would conserve momentum exactly by symmetry; unequal
    // masses exercise genuine floating-point drift.
    let m1 = 1.5e30;
    let m2 = 0.5e30;
    let d = 1.0;
    let omega = (constants.g * (m1 + m2) / (d * d * d)).sqrt();
    let r1 = d * m2 / (m1 + m2);
    let r2 = d * m1 / (m1 + m2);

    let bodies = vec![
        small_body(
            Point3::new(-r1, 0.0, 0.0),
            Vector3::new(0.0, -omega * r1, 0.0),
            m1,
        ),
        small_body(
            Point3::new(r2, 0.0, 0.0),
            Vector3::new(0.0, omega * r2, 0.0),
            m2,
        ),
    ];

    let p_initial = total_momentum(&bodies);
    let momentum_scale = m1 * omega * r1 + m2 * omega * r2;

    let mut pair = StateBufferPair::new(bodies);
    SerialBackend.submit_steps(&mut pair, &constants, 10_000);

    let p_final = total_momentum(pair.front());
    let drift = (p_final - p_initial).magnitude();

    assert!(
        drift <= momentum_scale * 1.0e-9,
        "momentum drift {drift} exceeds tolerance"
    );
}
