//! Pairwise collision prediction.
//!
//! Both UAVs are assumed to hold their current velocity. The closest approach
//! is found analytically by minimising the squared separation over time.

use crate::models::{CollisionRisk, Uav};
use crate::settings::SimulationSettings;

/// Predict the closest approach between two UAVs.
///
/// With relative position `r = a - b` and relative velocity `v`, the
/// separation is smallest at `t* = -(r·v) / |v|²`. `t*` is clamped to be
/// non-negative; with no relative motion the current separation is reported
/// at `t = 0`.
pub fn predict(a: &Uav, b: &Uav) -> CollisionRisk {
    let rel_pos = a.position - b.position;
    let rel_vel = a.velocity - b.velocity;
    let rel_vel_len2 = rel_vel.length_squared();

    let t_star = if rel_vel_len2 == 0.0 {
        0.0
    } else {
        -rel_pos.dot(rel_vel) / rel_vel_len2
    };
    let t = t_star.max(0.0);
    let closest = rel_pos + rel_vel * t;

    CollisionRisk {
        a: a.id.clone(),
        b: b.id.clone(),
        time_to_closest: t,
        closest_distance: closest.length(),
    }
}

/// Whether a predicted approach is close and soon enough to act on.
pub fn is_at_risk(risk: &CollisionRisk, a: &Uav, b: &Uav, settings: &SimulationSettings) -> bool {
    let combined_radius = a.radius + b.radius + settings.collision_threshold_meters;
    risk.time_to_closest <= settings.lookahead_seconds && risk.closest_distance < combined_radius
}
