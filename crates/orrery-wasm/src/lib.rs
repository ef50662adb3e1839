//! WASM bindings for the orrery simulation core.
//!
//! This crate provides JavaScript/TypeScript bindings for the `nbody` and
//! `ephemeris` crates, enabling browser-based visualization of gravitational
//! N-body dynamics.
//!
//! # Architecture
//!
//! The simulation state is stored in thread-local storage (WASM is
//! single-threaded). Functions return opaque IDs for referencing mutable
//! state, and serializable snapshots for reading state. The render loop on
//! the JavaScript side calls [`simulation_tick`] once per animation frame
//! and draws the returned snapshot; all scheduling, camera, and canvas work
//! stays on that side of the boundary.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! // Create a simulation from dataset text
//! const simId = simulation_create(csvText, { backend: "serial", seed: 1n });
//!
//! // Configure and start it
//! simulation_set_substeps(simId, 4);
//! simulation_set_running(simId, true);
//!
//! // Per animation frame: advance and draw
//! const bodies = simulation_tick(simId);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use ephemeris::parse_dataset;
use nalgebra::{Point3, Vector3};
use nbody::{BackendKind, Simulation};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

/// One registered simulation: the engine controller plus the body names the
/// engine itself does not carry.
struct SimEntry {
    sim: Simulation,
    names: Vec<String>,
}

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, SimEntry>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn with_entry<R>(
    sim_id: u32,
    f: impl FnOnce(&mut SimEntry) -> Result<R, JsError>,
) -> Result<R, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let entry = sims
            .get_mut(&sim_id)
            .ok_or_else(|| JsError::new(&format!("Simulation {} not found", sim_id)))?;
        f(entry)
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Configuration for creating a simulation
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// "serial" or "parallel"
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Seed for the albedo-fallback sampling during dataset resolution
    #[serde(default)]
    pub seed: u64,
}

fn default_backend() -> String {
    "serial".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            seed: 0,
        }
    }
}

/// Body state snapshot for rendering
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    /// Body name from the dataset ("Sun" for the implicit central body)
    pub name: String,
    /// Render class id: 0 star, 1 planet, 2 dwarf planet, 3 small body
    pub class_id: u32,
    /// Mass in kg; the renderer reuses this as an instance-scale hint
    pub mass: f64,
    /// Position [x, y, z] in AU
    pub position: [f64; 3],
    /// Velocity [x, y, z] in AU/day
    pub velocity: [f64; 3],
}

fn snapshot(entry: &SimEntry) -> Vec<BodySnapshot> {
    entry
        .sim
        .bodies()
        .iter()
        .zip(entry.names.iter())
        .map(|(body, name)| BodySnapshot {
            name: name.clone(),
            class_id: body.class.render_id(),
            mass: body.mass,
            position: [body.position.x, body.position.y, body.position.z],
            velocity: [body.velocity.x, body.velocity.y, body.velocity.z],
        })
        .collect()
}

// =============================================================================
// Simulation lifecycle
// =============================================================================

/// Create a new simulation from dataset text.
///
/// The dataset is resolved (including Keplerian fixed-point resolution), the
/// state banks are seeded, and the simulation starts paused.
///
/// # Arguments
/// * `csv` - Dataset text in either supported schema
/// * `config` - Optional `{ backend, seed }` object
///
/// # Returns
/// A simulation ID for use with the other functions
#[wasm_bindgen]
pub fn simulation_create(csv: &str, config: JsValue) -> Result<u32, JsError> {
    let config: SimulationConfig = if config.is_undefined() || config.is_null() {
        SimulationConfig::default()
    } else {
        from_js(config)?
    };

    let inits = parse_dataset(csv, config.seed).map_err(|e| JsError::new(&e.to_string()))?;
    let names: Vec<String> = inits.iter().map(|init| init.name.clone()).collect();
    let bodies = inits.iter().map(|init| init.to_body()).collect();

    // The parallel backend needs worker threads and is typically unavailable
    // in the browser; the error carries the DeviceUnavailable reason.
    let kind = match config.backend.as_str() {
        "parallel" => BackendKind::Parallel,
        _ => BackendKind::Serial,
    };
    let sim = Simulation::with_backend(bodies, kind).map_err(|e| JsError::new(&e.to_string()))?;

    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, SimEntry { sim, names });
    });

    Ok(id)
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().remove(&sim_id);
    });
}

/// Number of bodies in the loaded dataset.
#[wasm_bindgen]
pub fn simulation_body_count(sim_id: u32) -> Result<u32, JsError> {
    with_entry(sim_id, |entry| Ok(entry.sim.body_count() as u32))
}

// =============================================================================
// Simulation stepping
// =============================================================================

/// Advance one tick and return the authoritative bank for rendering.
///
/// While paused (or with zero substeps) this returns the current state
/// without advancing — the render loop can call it unconditionally.
#[wasm_bindgen]
pub fn simulation_tick(sim_id: u32) -> Result<JsValue, JsError> {
    with_entry(sim_id, |entry| {
        entry.sim.tick();
        to_js(&snapshot(entry))
    })
}

/// Current state without advancing, for drawing while paused.
#[wasm_bindgen]
pub fn simulation_get_bodies(sim_id: u32) -> Result<JsValue, JsError> {
    with_entry(sim_id, |entry| to_js(&snapshot(entry)))
}

/// Run `n` kernel sub-steps back-to-back, ignoring the run/pause flag.
///
/// The benchmark harness times this call from the JavaScript side
/// (`performance.now()` around the invocation) and divides by `n`.
#[wasm_bindgen]
pub fn simulation_run_steps(sim_id: u32, n: u32) -> Result<(), JsError> {
    with_entry(sim_id, |entry| {
        entry.sim.run_substeps(n);
        Ok(())
    })
}

// =============================================================================
// Configuration
// =============================================================================

/// Start or stop the simulation. Takes effect before the next tick's
/// sub-step loop.
#[wasm_bindgen]
pub fn simulation_set_running(sim_id: u32, running: bool) -> Result<(), JsError> {
    with_entry(sim_id, |entry| {
        entry.sim.set_running(running);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn simulation_is_running(sim_id: u32) -> Result<bool, JsError> {
    with_entry(sim_id, |entry| Ok(entry.sim.is_running()))
}

/// Set the gravitational constant from an SI value. Non-finite values are
/// ignored.
#[wasm_bindgen]
pub fn simulation_set_gravity_si(sim_id: u32, value: f64) -> Result<(), JsError> {
    with_entry(sim_id, |entry| {
        entry.sim.set_gravitational_constant_si(value);
        Ok(())
    })
}

/// Set the timestep in days per sub-step. Non-finite values are ignored.
#[wasm_bindgen]
pub fn simulation_set_timestep_days(sim_id: u32, value: f64) -> Result<(), JsError> {
    with_entry(sim_id, |entry| {
        entry.sim.set_timestep_days(value);
        Ok(())
    })
}

/// Set the softening length in AU. Non-finite values are ignored.
#[wasm_bindgen]
pub fn simulation_set_softening(sim_id: u32, value: f64) -> Result<(), JsError> {
    with_entry(sim_id, |entry| {
        entry.sim.set_softening_length(value);
        Ok(())
    })
}

/// Set how many kernel sub-steps run per tick. Zero is valid and pauses via
/// zero work.
#[wasm_bindgen]
pub fn simulation_set_substeps(sim_id: u32, n: u32) -> Result<(), JsError> {
    with_entry(sim_id, |entry| {
        entry.sim.set_substeps_per_tick(n);
        Ok(())
    })
}

/// Reposition the central body (index 0) in both state banks, keeping its
/// velocity.
#[wasm_bindgen]
pub fn simulation_set_sun_position(sim_id: u32, x: f64, y: f64, z: f64) -> Result<(), JsError> {
    with_entry(sim_id, |entry| {
        let velocity: Vector3<f64> = entry
            .sim
            .bodies()
            .first()
            .map(|body| body.velocity)
            .ok_or_else(|| JsError::new("simulation has no bodies"))?;

        entry
            .sim
            .override_body_state(0, Point3::new(x, y, z), velocity)
            .map_err(|e| JsError::new(&e.to_string()))
    })
}
