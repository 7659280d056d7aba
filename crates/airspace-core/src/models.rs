//! Core data models for the airspace simulation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geofence;
use crate::vector::Vector3;

/// Battery drain in percent per simulated second.
pub const BATTERY_DRAIN_PER_SEC: f64 = 0.5;

/// Full battery level.
pub const BATTERY_FULL: f64 = 100.0;

/// A simulated UAV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uav {
    pub id: String,
    /// Metres, world frame centred at the origin
    pub position: Vector3,
    /// Metres per second
    pub velocity: Vector3,
    pub max_speed: f64,
    /// Collision radius in metres
    pub radius: f64,
    /// Percent, 0..=100
    pub battery: f64,
    /// Unit facing vector (informational)
    pub direction: Vector3,
    /// Display colour for renderers, ignored by physics
    #[serde(default)]
    pub color: String,
}

impl Uav {
    /// Create a stationary UAV with a full battery.
    pub fn new(id: impl Into<String>, position: Vector3, max_speed: f64, radius: f64) -> Self {
        Self {
            id: id.into(),
            position,
            velocity: Vector3::ZERO,
            max_speed,
            radius,
            battery: BATTERY_FULL,
            direction: Vector3::ZERO,
            color: String::new(),
        }
    }

    /// Set velocity and point the UAV along it.
    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = velocity;
        self.direction = velocity.normalize();
        self
    }

    pub fn with_battery(mut self, battery: f64) -> Self {
        self.battery = battery;
        self
    }

    /// Current ground speed in m/s.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Position extrapolated `t` seconds ahead at constant velocity.
    pub fn position_at(&self, t: f64) -> Vector3 {
        self.position + self.velocity * t
    }

    pub fn is_grounded(&self) -> bool {
        self.battery <= 0.0
    }
}

// ========== WORLD ==========

/// A polygonal no-entry region projected onto the ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictedZone {
    pub id: String,
    pub name: String,
    /// Closed boundary, z ignored
    pub polygon: Vec<Vector3>,
}

impl RestrictedZone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, polygon: Vec<Vector3>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            polygon,
        }
    }

    /// Check if a point lies inside this zone's footprint.
    pub fn contains(&self, point: Vector3) -> bool {
        geofence::is_inside(point, &self.polygon)
    }

    /// Validate zone geometry.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.polygon.len() < 3 {
            errors.push(format!(
                "Polygon must have at least 3 vertices (got {})",
                self.polygon.len()
            ));
        }

        if self
            .polygon
            .iter()
            .any(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            errors.push("Polygon vertices must be finite".to_string());
        }

        errors
    }
}

/// Request to add a zone; the simulation assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateZoneRequest {
    pub name: String,
    pub polygon: Vec<Vector3>,
}

/// Square operating volume centred at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    /// Side length; x and y span `-size/2..=size/2`
    pub size_meters: f64,
    /// Ceiling; z spans `0..=height`
    pub height_meters: f64,
    #[serde(default)]
    pub restricted_zones: Vec<RestrictedZone>,
    /// Cosmetic grid spacing for renderers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_step_meters: Option<f64>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            size_meters: 2000.0,
            height_meters: 300.0,
            restricted_zones: vec![
                RestrictedZone::new(
                    "Z1",
                    "No-Fly Central",
                    vec![
                        Vector3::new(-200.0, -200.0, 0.0),
                        Vector3::new(200.0, -200.0, 0.0),
                        Vector3::new(200.0, 200.0, 0.0),
                        Vector3::new(-200.0, 200.0, 0.0),
                    ],
                ),
                RestrictedZone::new(
                    "Z2",
                    "Runway",
                    vec![
                        Vector3::new(-600.0, 300.0, 0.0),
                        Vector3::new(600.0, 300.0, 0.0),
                        Vector3::new(600.0, 450.0, 0.0),
                        Vector3::new(-600.0, 450.0, 0.0),
                    ],
                ),
            ],
            grid_step_meters: None,
        }
    }
}

impl World {
    /// Empty world of the given dimensions.
    pub fn new(size_meters: f64, height_meters: f64) -> Self {
        Self {
            size_meters,
            height_meters,
            restricted_zones: Vec::new(),
            grid_step_meters: None,
        }
    }

    pub fn with_zone(mut self, zone: RestrictedZone) -> Self {
        self.restricted_zones.push(zone);
        self
    }

    pub fn half_extent(&self) -> f64 {
        self.size_meters / 2.0
    }

    pub fn zone(&self, zone_id: &str) -> Option<&RestrictedZone> {
        self.restricted_zones.iter().find(|z| z.id == zone_id)
    }

    /// Validate world dimensions and every zone.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.size_meters.is_finite() && self.size_meters > 0.0) {
            errors.push(format!(
                "World size must be positive (got {})",
                self.size_meters
            ));
        }
        if !(self.height_meters.is_finite() && self.height_meters > 0.0) {
            errors.push(format!(
                "World height must be positive (got {})",
                self.height_meters
            ));
        }
        for zone in &self.restricted_zones {
            for err in zone.validate() {
                errors.push(format!("zone {}: {}", zone.id, err));
            }
        }

        errors
    }
}

/// A saved world layout as exchanged with an external storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldDocument {
    /// Owner identity the storage layer keys documents by
    pub owner_id: String,
    pub name: String,
    pub world: World,
}

// ========== ALERTS ==========

/// Predicted closest approach between two UAVs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionRisk {
    pub a: String,
    pub b: String,
    /// Seconds until closest approach, never negative
    pub time_to_closest: f64,
    /// Metres
    pub closest_distance: f64,
}

/// A UAV found inside a restricted zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub uav_id: String,
    pub zone_id: String,
    pub point: Vector3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertKind {
    Violation { violation: Violation },
    CollisionRisk { risk: CollisionRisk },
    #[serde(rename_all = "camelCase")]
    Reroute { uav_id: String },
}

/// Advisory event emitted by a tick. Never fed back into physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn collision_risk(risk: CollisionRisk, at: DateTime<Utc>) -> Self {
        let message = format!(
            "Collision risk between {} and {} in {:.1}s",
            risk.a, risk.b, risk.time_to_closest
        );
        Self {
            at,
            kind: AlertKind::CollisionRisk { risk },
            message,
        }
    }

    pub fn violation(violation: Violation, at: DateTime<Utc>) -> Self {
        let message = format!(
            "UAV {} entered restricted zone {}",
            violation.uav_id, violation.zone_id
        );
        Self {
            at,
            kind: AlertKind::Violation { violation },
            message,
        }
    }

    pub fn reroute(uav_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        let uav_id = uav_id.into();
        let message = format!("Emergency reroute issued to {}", uav_id);
        Self {
            at,
            kind: AlertKind::Reroute { uav_id },
            message,
        }
    }
}
