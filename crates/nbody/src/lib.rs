#[cfg(not(target_arch = "wasm32"))]
pub mod benchmark;
pub mod body;
pub mod buffers;
pub mod constants;
pub mod controller;
pub mod kernel;

#[cfg(test)]
mod kernel_test;

pub use body::{Body, BodyClass};
pub use buffers::StateBufferPair;
pub use constants::SimulationConstants;
pub use controller::{Simulation, SimulationError};
pub use kernel::{BackendKind, ComputeBackend, ParallelBackend, SerialBackend};
