pub mod dataset;
pub mod kepler;
pub mod physical;

#[cfg(test)]
mod physical_test;

pub use dataset::{parse_dataset, BodyInit, ResolveError, KEPLER_HEADER, STATE_VECTOR_HEADER};
pub use kepler::{
    elements_to_state, solve_eccentric_anomaly, OrbitalElements, EPOCH_J2000_JD, G_AU_DAY_KG,
};
pub use physical::{approximate_albedo, approximate_mass, density_for_albedo};
