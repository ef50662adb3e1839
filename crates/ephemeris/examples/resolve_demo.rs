//! Resolves the bundled Keplerian solar-system catalog and prints the
//! resulting state vectors.
//!
//! The Moon row references Earth, so the fixed-point pass has one forward
//! dependency chain to order; Ceres and Vesta arrive without masses and go
//! through the diameter/albedo approximation.
//!
//! Run with: cargo run --package ephemeris --example resolve_demo

use ephemeris::parse_dataset;

const CATALOG: &str = include_str!("../../../datasets/solar_system_kepler.csv");

fn main() {
    let bodies = match parse_dataset(CATALOG, 0) {
        Ok(bodies) => bodies,
        Err(err) => {
            eprintln!("failed to resolve catalog: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "{:<10} {:>4} {:>12} {:>12} {:>12}",
        "name", "cls", "|r| (AU)", "|v| (AU/d)", "mass (kg)"
    );
    for body in &bodies {
        println!(
            "{:<10} {:>4} {:>12.5} {:>12.6} {:>12.4e}",
            body.name,
            body.class.render_id(),
            body.position.coords.magnitude(),
            body.velocity.magnitude(),
            body.mass.to_kg(),
        );
    }
}
