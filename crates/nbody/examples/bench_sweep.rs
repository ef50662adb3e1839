//! Comparative throughput sweep over backends and body counts.
//!
//! Prints a CSV-style table of mean wall-clock per kernel sub-step; paste
//! straight into a spreadsheet to graph.
//!
//! Run with: cargo run --release --package nbody --example bench_sweep

use nbody::benchmark::{run_sweep, synthetic_dataset, DEFAULT_BENCH_STEPS};
use nbody::BackendKind;

fn main() {
    let backends = [BackendKind::Serial, BackendKind::Parallel];
    let datasets: Vec<_> = [256, 512, 1024, 2048]
        .into_iter()
        .map(synthetic_dataset)
        .collect();

    println!("implementation,dataset,mean_step_ms");
    for record in run_sweep(&backends, &datasets, DEFAULT_BENCH_STEPS) {
        match (record.mean_step_ms, record.error) {
            (Some(mean), _) => {
                println!("{},{},{:.6}", record.implementation, record.dataset, mean)
            }
            (None, Some(err)) => {
                println!("{},{},failed: {}", record.implementation, record.dataset, err)
            }
            (None, None) => unreachable!("record without measurement or error"),
        }
    }
}
