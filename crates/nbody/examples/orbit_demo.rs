//! Single-planet orbit demo.
//!
//! Drives the double-buffered kernel through one full Earth orbit and prints
//! the radius drift, as a quick sanity check of the integrator.
//!
//! Run with: cargo run --package nbody --example orbit_demo

use nalgebra::{Point3, Vector3};
use nbody::constants::{DEFAULT_G_SI, SI_G_TO_AU_DAY};
use nbody::{BackendKind, Body, BodyClass, Simulation};
use units::{Time, Velocity, SOLAR_MASS_KG};

fn main() {
    println!("Semi-implicit Euler: Single Planet Orbit\n");
    println!("{}", "=".repeat(60));

    // Circular velocity at 1 AU: v = sqrt(μ/r) with μ in AU³/day²
    let mu = DEFAULT_G_SI * SI_G_TO_AU_DAY * SOLAR_MASS_KG;
    let r = 1.0;
    let v_circular = (mu / r).sqrt();

    let bodies = vec![
        Body::new(
            Point3::origin(),
            Vector3::zeros(),
            SOLAR_MASS_KG,
            BodyClass::Star,
        ),
        Body::new(
            Point3::new(r, 0.0, 0.0),
            Vector3::new(0.0, v_circular, 0.0),
            5.972e24,
            BodyClass::Planet,
        ),
    ];

    let mut sim = Simulation::with_backend(bodies, BackendKind::Serial)
        .expect("serial backend is always available");

    println!("Initial conditions:");
    println!("  μ = {:.6e} AU³/day²", mu);
    println!("  Orbital radius: {:.3} AU", r);
    println!(
        "  Circular velocity: {:.6} AU/day ({:.2} km/s)",
        v_circular,
        Velocity::from_au_per_day(v_circular).to_meters_per_sec() / 1000.0
    );

    // One orbital period: T = 2π sqrt(a³/μ) ≈ 365.25 days
    let period = Time::from_days(std::f64::consts::TAU * (r * r * r / mu).sqrt());
    let dt = sim.constants().dt;
    let steps_per_orbit = (period.to_days() / dt).round() as u32;

    println!("\nIntegration parameters:");
    println!("  Timestep: {} days", dt);
    println!(
        "  Period: {:.2} days = {:.3} years ({} steps)",
        period.to_days(),
        period.to_years(),
        steps_per_orbit
    );

    sim.set_running(true);
    sim.set_substeps_per_tick(steps_per_orbit);
    let bank = sim.tick();

    let final_r = bank[1].position.coords.magnitude();
    println!("\nAfter one orbit:");
    println!("  Radius: {:.6} AU", final_r);
    println!("  Radius drift: {:.3e} AU", (final_r - r).abs());
    println!("  Authoritative bank: {}", sim.front_index());
}
