//! Fixed-delta tick integrator.
//!
//! One call advances every UAV by `dt` seconds:
//! 1. pairwise risk scan and avoidance bias
//! 2. battery drain and motion integration
//! 3. geofence check
//! 4. emergency reroute (y-velocity flip) for violators
//! 5. reflection off the world box
//!
//! Alerts come out in that detection order: collision risks, then
//! violations, then reroutes.

use chrono::{DateTime, Utc};

use crate::avoidance;
use crate::models::{Alert, Uav, Violation, World, BATTERY_DRAIN_PER_SEC};
use crate::settings::SimulationSettings;
use crate::vector::Vector3;

/// Output of a single step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    pub uavs: Vec<Uav>,
    pub alerts: Vec<Alert>,
}

/// Advance all UAVs by `dt` seconds, stamping alerts with the current time.
pub fn step(uavs: &[Uav], dt: f64, settings: &SimulationSettings, world: &World) -> StepOutcome {
    step_at(uavs, dt, settings, world, Utc::now())
}

/// Same as [`step`] with an explicit alert timestamp. Deterministic in all inputs.
pub fn step_at(
    uavs: &[Uav],
    dt: f64,
    settings: &SimulationSettings,
    world: &World,
    at: DateTime<Utc>,
) -> StepOutcome {
    let scan = avoidance::scan(uavs, settings);
    let mut alerts: Vec<Alert> = scan
        .risks
        .into_iter()
        .map(|risk| Alert::collision_risk(risk, at))
        .collect();

    let mut next: Vec<Uav> = uavs
        .iter()
        .zip(&scan.biases)
        .map(|(uav, bias)| integrate(uav, *bias, dt))
        .collect();

    let violations = detect_violations(&next, world);
    let mut reroutes = Vec::with_capacity(violations.len());
    for violation in &violations {
        if let Some(uav) = next.iter_mut().find(|u| u.id == violation.uav_id) {
            uav.velocity.y = -uav.velocity.y;
            reroutes.push(Alert::reroute(uav.id.clone(), at));
        }
    }
    alerts.extend(violations.into_iter().map(|v| Alert::violation(v, at)));
    alerts.extend(reroutes);

    for uav in &mut next {
        reflect_off_bounds(uav, world);
    }

    StepOutcome { uavs: next, alerts }
}

/// Drain the battery and move one UAV under its steering bias.
fn integrate(uav: &Uav, bias: Vector3, dt: f64) -> Uav {
    let battery = (uav.battery - dt * BATTERY_DRAIN_PER_SEC).max(0.0);

    let (velocity, direction) = if battery <= 0.0 {
        // Grounded: keep the last facing.
        (Vector3::ZERO, uav.direction)
    } else {
        let velocity = (uav.velocity + bias).clamp_length(uav.max_speed);
        (velocity, velocity.normalize())
    };

    Uav {
        position: uav.position + velocity * dt,
        velocity,
        battery,
        direction,
        ..uav.clone()
    }
}

/// Every (uav, zone) pair whose footprint contains the UAV, in UAV then zone order.
pub fn detect_violations(uavs: &[Uav], world: &World) -> Vec<Violation> {
    let mut out = Vec::new();
    for uav in uavs {
        for zone in &world.restricted_zones {
            if zone.contains(uav.position) {
                out.push(Violation {
                    uav_id: uav.id.clone(),
                    zone_id: zone.id.clone(),
                    point: uav.position,
                });
            }
        }
    }
    out
}

/// Clamp a UAV into the world box, negating velocity on every clamped axis.
fn reflect_off_bounds(uav: &mut Uav, world: &World) {
    let half = world.half_extent();
    reflect_axis(&mut uav.position.x, &mut uav.velocity.x, -half, half);
    reflect_axis(&mut uav.position.y, &mut uav.velocity.y, -half, half);
    reflect_axis(&mut uav.position.z, &mut uav.velocity.z, 0.0, world.height_meters);
}

fn reflect_axis(pos: &mut f64, vel: &mut f64, min: f64, max: f64) {
    if *pos < min || *pos > max {
        *vel = -*vel;
        *pos = pos.max(min).min(max);
    }
}
