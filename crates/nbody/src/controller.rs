//! Simulation controller.
//!
//! Owns the constants, the state buffer pair, and the backend, and is the
//! only component that issues kernel invocations. Run/pause and a zero
//! substep count compose multiplicatively: the kernel runs
//! `substeps_per_tick` times per tick only while `running` is true.

use std::error::Error;
use std::fmt;

use nalgebra::{Point3, Vector3};

use crate::body::Body;
use crate::buffers::StateBufferPair;
use crate::constants::SimulationConstants;
use crate::kernel::{BackendKind, ComputeBackend};

/// Runtime failures surfaced by the engine.
#[derive(Debug)]
pub enum SimulationError {
    /// No compute backend could be obtained on this host.
    DeviceUnavailable(String),
    /// An override addressed a body index outside the loaded dataset.
    BodyIndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::DeviceUnavailable(reason) => {
                write!(f, "no compute backend available: {reason}")
            }
            SimulationError::BodyIndexOutOfRange { index, len } => {
                write!(f, "body index {index} out of range for {len} bodies")
            }
        }
    }
}

impl Error for SimulationError {}

/// One running simulation instance.
///
/// Multiple independent simulations are supported by construction — all
/// state lives in the value, none in module globals.
pub struct Simulation {
    constants: SimulationConstants,
    pair: StateBufferPair,
    backend: Box<dyn ComputeBackend>,
    running: bool,
    substeps_per_tick: u32,
}

impl Simulation {
    /// Builds a simulation over the given initial bodies. Both banks are
    /// seeded identically; the simulation starts paused with one sub-step
    /// per tick.
    pub fn new(bodies: Vec<Body>, backend: Box<dyn ComputeBackend>) -> Self {
        let constants = SimulationConstants::new(bodies.len() as u32);
        Self {
            constants,
            pair: StateBufferPair::new(bodies),
            backend,
            running: false,
            substeps_per_tick: 1,
        }
    }

    /// Convenience constructor from a backend selector.
    pub fn with_backend(bodies: Vec<Body>, kind: BackendKind) -> Result<Self, SimulationError> {
        Ok(Self::new(bodies, kind.create()?))
    }

    pub fn constants(&self) -> &SimulationConstants {
        &self.constants
    }

    pub fn set_gravitational_constant_si(&mut self, value: f64) {
        self.constants.set_gravitational_constant_si(value);
    }

    pub fn set_timestep_days(&mut self, value: f64) {
        self.constants.set_timestep_days(value);
    }

    pub fn set_softening_length(&mut self, value: f64) {
        self.constants.set_softening_length(value);
    }

    /// Zero is valid: the tick becomes a no-op while `running` stays true.
    pub fn set_substeps_per_tick(&mut self, n: u32) {
        self.substeps_per_tick = n;
    }

    pub fn substeps_per_tick(&self) -> u32 {
        self.substeps_per_tick
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn body_count(&self) -> usize {
        self.pair.len()
    }

    pub fn backend_label(&self) -> &'static str {
        self.backend.label()
    }

    /// The authoritative bank, for rendering and reporting.
    pub fn bodies(&self) -> &[Body] {
        self.pair.front()
    }

    /// Index of the authoritative bank; alternates with every sub-step.
    pub fn front_index(&self) -> usize {
        self.pair.front_index()
    }

    /// Writes position and velocity for one body into *both* banks, leaving
    /// mass and class untouched. Used to reposition a reference body without
    /// perturbing integration consistency.
    pub fn override_body_state(
        &mut self,
        index: usize,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Result<(), SimulationError> {
        let len = self.pair.len();
        if index >= len {
            return Err(SimulationError::BodyIndexOutOfRange { index, len });
        }
        let mut body = self.pair.front()[index];
        body.position = position;
        body.velocity = velocity;
        self.pair.write_both(index, body);
        Ok(())
    }

    /// Advances one tick: `substeps_per_tick` kernel invocations while
    /// running, otherwise a no-op. Returns the authoritative bank.
    pub fn tick(&mut self) -> &[Body] {
        if self.running && self.substeps_per_tick > 0 {
            self.backend
                .submit_steps(&mut self.pair, &self.constants, self.substeps_per_tick);
        }
        self.pair.front()
    }

    /// Runs `n` sub-steps unconditionally, ignoring the run/pause flag.
    /// Benchmarking and tests drive the kernel through this.
    pub fn run_substeps(&mut self, n: u32) {
        self.backend.submit_steps(&mut self.pair, &self.constants, n);
    }
}
