//! Airspace simulation core.
//!
//! Fixed-tick kinematic simulator for UAVs: advances positions, predicts
//! pairwise collision risk, steers apart, flags geofence violations and
//! reflects off the world box. No I/O, no threads.

pub mod avoidance;
pub mod conflict;
pub mod error;
pub mod geofence;
pub mod models;
pub mod settings;
pub mod sim;
pub mod tick;
pub mod vector;

pub use conflict::{is_at_risk, predict};
pub use error::{SimError, SimResult};
pub use geofence::is_inside;
pub use models::{
    Alert, AlertKind, CollisionRisk, CreateZoneRequest, RestrictedZone, Uav, Violation, World,
    WorldDocument,
};
pub use settings::{Setting, SimulationSettings};
pub use sim::{Simulation, SimulationSnapshot, ALERT_LOG_CAPACITY, MAX_TICK_SECS};
pub use tick::{step, step_at, StepOutcome};
pub use vector::Vector3;
