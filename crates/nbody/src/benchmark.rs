//! Comparative throughput sweep.
//!
//! Runs each backend against each dataset for a fixed number of kernel
//! sub-steps back-to-back with no rendering, and reports the mean wall-clock
//! time per sub-step. A fresh simulation is built per pair, and a failing
//! pair (backend unavailable, for instance) is recorded in its row without
//! aborting the rest of the sweep.

use std::time::Instant;

use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyClass};
use crate::controller::Simulation;
use crate::kernel::BackendKind;

/// Sub-steps measured per (implementation, dataset) pair.
pub const DEFAULT_BENCH_STEPS: u32 = 1000;

/// A labeled initial state for the sweep.
#[derive(Debug, Clone)]
pub struct BenchDataset {
    pub label: String,
    pub bodies: Vec<Body>,
}

/// One row of the results table.
#[derive(Debug, Clone)]
pub struct BenchRecord {
    pub implementation: String,
    pub dataset: String,
    /// Mean wall-clock per sub-step; `None` when the pair failed.
    pub mean_step_ms: Option<f64>,
    pub error: Option<String>,
}

/// Deterministic synthetic dataset of `n` small bodies on a trigonometric
/// lattice — reproducible without an RNG, spread over tens of AU.
pub fn synthetic_dataset(n: usize) -> BenchDataset {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            Body::new(
                Point3::new(
                    (i_f * 0.37).sin() * 30.0,
                    (i_f * 0.13).cos() * 30.0,
                    (i_f * 0.07).sin() * 30.0,
                ),
                Vector3::zeros(),
                1.0e24,
                BodyClass::SmallBody,
            )
        })
        .collect();

    BenchDataset {
        label: format!("synthetic-{n}"),
        bodies,
    }
}

/// Runs the full implementations × datasets sweep.
pub fn run_sweep(
    backends: &[BackendKind],
    datasets: &[BenchDataset],
    steps: u32,
) -> Vec<BenchRecord> {
    let mut records = Vec::with_capacity(backends.len() * datasets.len());
    for kind in backends {
        for dataset in datasets {
            records.push(measure_pair(*kind, dataset, steps));
        }
    }
    records
}

fn measure_pair(kind: BackendKind, dataset: &BenchDataset, steps: u32) -> BenchRecord {
    let backend = match kind.create() {
        Ok(backend) => backend,
        Err(err) => {
            return BenchRecord {
                implementation: kind.label().to_string(),
                dataset: dataset.label.clone(),
                mean_step_ms: None,
                error: Some(err.to_string()),
            };
        }
    };

    let mut sim = Simulation::new(dataset.bodies.clone(), backend);

    let start = Instant::now();
    sim.run_substeps(steps);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    BenchRecord {
        implementation: kind.label().to_string(),
        dataset: dataset.label.clone(),
        mean_step_ms: Some(elapsed_ms / steps as f64),
        error: None,
    }
}
