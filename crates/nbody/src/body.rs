use nalgebra::{Point3, Vector3};

/// Classification tag carried through the simulation for rendering.
///
/// The kernel treats every class identically — mass is the only quantity
/// that enters the force law. The tag exists so the renderer can pick a
/// palette/scale per category without a side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyClass {
    Star,
    Planet,
    DwarfPlanet,
    SmallBody,
}

impl BodyClass {
    /// Maps a dataset class tag to a body class.
    ///
    /// `STA`/`PLA`/`DWA`/`SAT` are the four canonical tags; every other
    /// catalog class (MBA, TNO, comet families, ...) renders as a small body.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "STA" => BodyClass::Star,
            "PLA" => BodyClass::Planet,
            "DWA" => BodyClass::DwarfPlanet,
            "SAT" => BodyClass::SmallBody,
            _ => BodyClass::SmallBody,
        }
    }

    /// Stable integer id used by instanced rendering.
    pub fn render_id(&self) -> u32 {
        match self {
            BodyClass::Star => 0,
            BodyClass::Planet => 1,
            BodyClass::DwarfPlanet => 2,
            BodyClass::SmallBody => 3,
        }
    }
}

/// A point mass in the simulation frame.
///
/// Positions are heliocentric Cartesian in AU, velocities in AU/day, mass in
/// kilograms. The struct is `Copy` so the kernel can write whole bodies into
/// the destination bank without touching the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Point3<f64>,  // AU
    pub velocity: Vector3<f64>, // AU/day
    pub mass: f64,              // kg
    pub class: BodyClass,
}

impl Body {
    pub fn new(position: Point3<f64>, velocity: Vector3<f64>, mass: f64, class: BodyClass) -> Self {
        Self {
            position,
            velocity,
            mass,
            class,
        }
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }
}

/// Total momentum of a bank of bodies (kg·AU/day).
///
/// Symplectic Euler conserves this exactly in exact arithmetic, so it is the
/// cheapest drift diagnostic available.
pub fn total_momentum(bodies: &[Body]) -> Vector3<f64> {
    bodies
        .iter()
        .map(|b| b.momentum())
        .fold(Vector3::zeros(), |acc, p| acc + p)
}
