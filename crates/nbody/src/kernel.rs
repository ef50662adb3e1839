//! Force evaluation and integration kernel.
//!
//! One kernel invocation advances every body by one semi-implicit Euler
//! step: velocity first from the softened pairwise gravity sum, then position
//! from the *new* velocity. Each output body depends only on the read bank,
//! so the update is embarrassingly parallel across bodies — expressed here
//! either as a plain loop or as a rayon parallel-for, behind a small
//! capability trait the controller drives.

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::body::Body;
use crate::buffers::StateBufferPair;
use crate::constants::SimulationConstants;
use crate::controller::SimulationError;

/// Softened gravitational acceleration on `bodies[index]` from every other
/// body, in AU/day².
///
/// The softening length enters squared, added to the squared separation
/// before the 3/2 power — not added to the distance — so the acceleration
/// stays bounded as the separation approaches zero.
pub fn acceleration_on(
    index: usize,
    bodies: &[Body],
    constants: &SimulationConstants,
) -> Vector3<f64> {
    let body = &bodies[index];
    let mut accel = Vector3::zeros();

    for (j, other) in bodies.iter().enumerate() {
        if j == index {
            continue;
        }
        let dr = other.position - body.position;
        let d2 = dr.magnitude_squared() + constants.epsilon_sq;
        let inv_r3 = 1.0 / (d2 * d2.sqrt());
        accel += dr * (constants.g * other.mass * inv_r3);
    }

    accel
}

/// One body's semi-implicit Euler update against the read bank.
///
/// Mass and class pass through unchanged.
pub fn advance_body(index: usize, read: &[Body], constants: &SimulationConstants) -> Body {
    let mut body = read[index];
    let accel = acceleration_on(index, read, constants);
    body.velocity += accel * constants.dt;
    body.position += body.velocity * constants.dt;
    body
}

/// Advances every body one sub-step, serial loop.
///
/// A mismatched bank length is a contract violation, not a runtime error —
/// the banks are created together and never resized.
pub fn integrate_step(read: &[Body], write: &mut [Body], constants: &SimulationConstants) {
    assert_eq!(read.len(), write.len(), "state banks must be equal length");
    for (i, out) in write.iter_mut().enumerate() {
        *out = advance_body(i, read, constants);
    }
}

/// Advances every body one sub-step, data-parallel over the write bank.
pub fn integrate_step_par(read: &[Body], write: &mut [Body], constants: &SimulationConstants) {
    assert_eq!(read.len(), write.len(), "state banks must be equal length");
    write.par_iter_mut().enumerate().for_each(|(i, out)| {
        *out = advance_body(i, read, constants);
    });
}

/// Capability interface each compute implementation adapts to.
///
/// `submit_steps` runs `n` kernel invocations against the pair, alternating
/// source/destination banks each sub-step and leaving the pair's ping-pong
/// bit consistent with the number of steps taken. Only the controller issues
/// these calls, so no two invocations are ever in flight against the same
/// pair.
pub trait ComputeBackend: Send + Sync {
    fn label(&self) -> &'static str;

    fn submit_steps(&self, pair: &mut StateBufferPair, constants: &SimulationConstants, n: u32);
}

/// Single-threaded reference implementation.
pub struct SerialBackend;

impl ComputeBackend for SerialBackend {
    fn label(&self) -> &'static str {
        "serial"
    }

    fn submit_steps(&self, pair: &mut StateBufferPair, constants: &SimulationConstants, n: u32) {
        for _ in 0..n {
            let (read, write) = pair.split();
            integrate_step(read, write, constants);
            pair.swap();
        }
    }
}

/// Data-parallel implementation on a dedicated rayon pool.
pub struct ParallelBackend {
    pool: rayon::ThreadPool,
}

impl ParallelBackend {
    /// Builds the thread pool; failure to obtain one maps to
    /// [`SimulationError::DeviceUnavailable`].
    pub fn new() -> Result<Self, SimulationError> {
        rayon::ThreadPoolBuilder::new()
            .build()
            .map(|pool| Self { pool })
            .map_err(|e| SimulationError::DeviceUnavailable(e.to_string()))
    }
}

impl ComputeBackend for ParallelBackend {
    fn label(&self) -> &'static str {
        "parallel"
    }

    fn submit_steps(&self, pair: &mut StateBufferPair, constants: &SimulationConstants, n: u32) {
        self.pool.install(|| {
            for _ in 0..n {
                let (read, write) = pair.split();
                integrate_step_par(read, write, constants);
                pair.swap();
            }
        });
    }
}

/// Backend selector used by configuration surfaces (benchmark sweep, wasm
/// adapter config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Serial,
    Parallel,
}

impl BackendKind {
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::Serial => "serial",
            BackendKind::Parallel => "parallel",
        }
    }

    pub fn create(&self) -> Result<Box<dyn ComputeBackend>, SimulationError> {
        match self {
            BackendKind::Serial => Ok(Box::new(SerialBackend)),
            BackendKind::Parallel => Ok(Box::new(ParallelBackend::new()?)),
        }
    }
}
