//! Dataset ingestion: raw tabular text → initial body states.
//!
//! Two schemas are recognized by exact header-row match — direct state
//! vectors, and Keplerian elements with named central-body references. The
//! Keplerian variant resolves forward references by fixed-point iteration:
//! moons depend on planets depend on the Sun, in whatever row order the
//! catalog happens to use.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use nalgebra::{Point3, Vector3};
use nbody::{Body, BodyClass};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use units::{Length, Mass, SOLAR_MASS_KG};

use crate::kepler::{elements_to_state, OrbitalElements};
use crate::physical::{approximate_albedo, approximate_mass};

/// Header of the direct state-vector schema.
pub const STATE_VECTOR_HEADER: &str = "id,name,class,mass,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z";
/// Header of the Keplerian-element schema.
pub const KEPLER_HEADER: &str = "e,a,i,om,w,ma,epoch,H,albedo,diameter,mass,class,name,central_body";

/// Load-time failures. All of them abort the load entirely — a simulation is
/// only ever started from a fully resolved dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The header row matches neither known schema.
    UnrecognizedFormat,
    /// A required numeric field failed to parse; `row` is the 0-based data
    /// row index (header excluded).
    MalformedRow { row: usize },
    /// Fixed-point resolution stalled with these rows still pending —
    /// cyclic or dangling `central_body` references.
    UnresolvedDependency { rows: Vec<usize> },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnrecognizedFormat => {
                write!(f, "header row matches no known dataset schema")
            }
            ResolveError::MalformedRow { row } => {
                write!(f, "row {row}: required numeric field failed to parse")
            }
            ResolveError::UnresolvedDependency { rows } => {
                write!(f, "central-body references never resolve for rows {rows:?}")
            }
        }
    }
}

impl Error for ResolveError {}

/// Fully resolved initial state for one body, in the simulation frame
/// (AU, AU/day, kg).
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInit {
    pub name: String,
    pub class: BodyClass,
    pub mass: Mass,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
}

impl BodyInit {
    /// The engine-facing body record; the name stays behind with the caller.
    pub fn to_body(&self) -> Body {
        Body::new(self.position, self.velocity, self.mass.to_kg(), self.class)
    }
}

/// Parses a dataset in either schema into resolved body states.
///
/// `seed` drives the albedo fallback sampling so a given catalog always
/// resolves to the same masses. Blank lines are ignored; fields are
/// comma-separated with no quoting.
pub fn parse_dataset(text: &str, seed: u64) -> Result<Vec<BodyInit>, ResolveError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines.next().ok_or(ResolveError::UnrecognizedFormat)?;
    match header {
        STATE_VECTOR_HEADER => parse_state_vectors(lines),
        KEPLER_HEADER => resolve_keplerian(lines, seed),
        _ => Err(ResolveError::UnrecognizedFormat),
    }
}

fn parse_required(field: &str, row: usize) -> Result<f64, ResolveError> {
    field
        .parse::<f64>()
        .map_err(|_| ResolveError::MalformedRow { row })
}

fn parse_optional(field: &str, row: usize) -> Result<Option<f64>, ResolveError> {
    if field.is_empty() {
        Ok(None)
    } else {
        parse_required(field, row).map(Some)
    }
}

fn parse_state_vectors<'a>(
    rows: impl Iterator<Item = &'a str>,
) -> Result<Vec<BodyInit>, ResolveError> {
    let mut bodies = Vec::new();

    for (row, line) in rows.enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 10 {
            return Err(ResolveError::MalformedRow { row });
        }

        // The leading id column is dropped; rendering and overrides address
        // bodies by array index.
        let name = fields[1].to_string();
        let class = BodyClass::from_tag(fields[2]);
        let mass = parse_required(fields[3], row)?;
        let position = Point3::new(
            parse_required(fields[4], row)?,
            parse_required(fields[5], row)?,
            parse_required(fields[6], row)?,
        );
        let velocity = Vector3::new(
            parse_required(fields[7], row)?,
            parse_required(fields[8], row)?,
            parse_required(fields[9], row)?,
        );

        bodies.push(BodyInit {
            name,
            class,
            mass: Mass::from_kg(mass),
            position,
            velocity,
        });
    }

    Ok(bodies)
}

struct KeplerRow {
    elements: OrbitalElements,
    albedo: Option<f64>,
    diameter_km: Option<f64>,
    mass_kg: Option<f64>,
    class_tag: String,
    name: String,
    central_body: String,
}

fn parse_kepler_row(line: &str, row: usize) -> Result<KeplerRow, ResolveError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 14 {
        return Err(ResolveError::MalformedRow { row });
    }

    let elements = OrbitalElements {
        eccentricity: parse_required(fields[0], row)?,
        semi_major_axis: Length::from_au(parse_required(fields[1], row)?),
        inclination: parse_required(fields[2], row)?,
        ascending_node: parse_required(fields[3], row)?,
        periapsis_argument: parse_required(fields[4], row)?,
        mean_anomaly: parse_required(fields[5], row)?,
        epoch: parse_required(fields[6], row)?,
    };

    // Absolute magnitude H is carried by the catalog but unused; it is still
    // validated so a shifted column shows up as a malformed row.
    let _h = parse_optional(fields[7], row)?;

    Ok(KeplerRow {
        elements,
        albedo: parse_optional(fields[8], row)?,
        diameter_km: parse_optional(fields[9], row)?,
        mass_kg: parse_optional(fields[10], row)?,
        class_tag: fields[11].to_string(),
        name: fields[12].to_string(),
        central_body: fields[13].to_string(),
    })
}

fn resolve_keplerian<'a>(
    rows: impl Iterator<Item = &'a str>,
    seed: u64,
) -> Result<Vec<BodyInit>, ResolveError> {
    let parsed: Vec<KeplerRow> = rows
        .enumerate()
        .map(|(row, line)| parse_kepler_row(line, row))
        .collect::<Result<_, _>>()?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // The implicit Sun anchors every chain; the empty name also maps to it,
    // tolerating rows with a missing reference.
    let mut resolved = vec![BodyInit {
        name: "Sun".to_string(),
        class: BodyClass::Star,
        mass: Mass::from_kg(SOLAR_MASS_KG),
        position: Point3::origin(),
        velocity: Vector3::zeros(),
    }];
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    index_by_name.insert("Sun".to_string(), 0);
    index_by_name.insert(String::new(), 0);

    let mut pending: Vec<usize> = (0..parsed.len()).collect();

    while !pending.is_empty() {
        let before = pending.len();

        pending.retain(|&row| {
            let entry = &parsed[row];
            let Some(&central_index) = index_by_name.get(&entry.central_body) else {
                return true;
            };

            let albedo = entry
                .albedo
                .or_else(|| approximate_albedo(&entry.class_tag, &mut rng));
            let mass = match entry.mass_kg {
                Some(kg) => Mass::from_kg(kg),
                None => approximate_mass(entry.diameter_km.unwrap_or(0.0), albedo),
            };

            // Anchor to the central body's state as resolved right now; it
            // is not revisited when the central body later moves.
            let central = &resolved[central_index];
            let (position, velocity) = elements_to_state(
                &entry.elements,
                central.mass,
                central.position,
                central.velocity,
            );

            resolved.push(BodyInit {
                name: entry.name.clone(),
                class: BodyClass::from_tag(&entry.class_tag),
                mass,
                position,
                velocity,
            });
            index_by_name.insert(entry.name.clone(), resolved.len() - 1);
            false
        });

        if pending.len() == before {
            return Err(ResolveError::UnresolvedDependency { rows: pending });
        }
    }

    Ok(resolved)
}
