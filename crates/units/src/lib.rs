pub mod length;
pub mod mass;
pub mod time;
pub mod velocity;
pub mod volume_density;

#[cfg(test)]
mod length_test;

pub use length::{Length, AU_TO_KM, AU_TO_M};
pub use mass::{Mass, SOLAR_MASS_KG};
pub use time::{Time, SECONDS_PER_DAY};
pub use velocity::Velocity;
pub use volume_density::VolumeDensity;
