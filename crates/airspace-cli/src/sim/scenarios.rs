//! Pre-defined UAV scenarios in local metres around the origin.

use airspace_core::{Uav, Vector3};

const CRUISE_ALTITUDE_M: f64 = 50.0;
const UAV_RADIUS_M: f64 = 5.0;
const SCENARIO_MAX_SPEED: f64 = 20.0;

const NORTH: Vector3 = Vector3::new(0.0, 1.0, 0.0);
const EAST: Vector3 = Vector3::new(1.0, 0.0, 0.0);
const SOUTH: Vector3 = Vector3::new(0.0, -1.0, 0.0);
const WEST: Vector3 = Vector3::new(-1.0, 0.0, 0.0);

/// A named set of UAVs ready to load into a simulation.
pub struct Scenario {
    pub name: String,
    pub uavs: Vec<Uav>,
}

/// UAV flying from `start` towards `end` at `speed` m/s.
fn linear_uav(id: String, start: Vector3, end: Vector3, speed: f64) -> Uav {
    let heading = (end - start).normalize();
    Uav::new(id, start, SCENARIO_MAX_SPEED, UAV_RADIUS_M).with_velocity(heading * speed)
}

/// Point `distance_m` from `center` along a horizontal unit heading.
fn offset(center: Vector3, distance_m: f64, heading: Vector3) -> Vector3 {
    center + heading * distance_m
}

/// Create two UAVs on collision course (crossing at center).
///
/// - UAV 1: Flying West to East through center
/// - UAV 2: Flying South to North through center
pub fn create_crossing_scenario(center: Vector3) -> Scenario {
    let offset_m = 300.0;
    let center = Vector3::new(center.x, center.y, CRUISE_ALTITUDE_M);

    Scenario {
        name: "crossing".to_string(),
        uavs: vec![
            linear_uav(
                "UAV-1".to_string(),
                offset(center, offset_m, WEST),
                offset(center, offset_m, EAST),
                10.0,
            ),
            linear_uav(
                "UAV-2".to_string(),
                offset(center, offset_m, SOUTH),
                offset(center, offset_m, NORTH),
                10.0,
            ),
        ],
    }
}

/// Create two UAVs flying parallel paths (no conflict).
pub fn create_parallel_scenario(center: Vector3) -> Scenario {
    let offset_m = 300.0;
    let separation_m = 100.0;
    let center = Vector3::new(center.x, center.y, CRUISE_ALTITUDE_M);
    let shifted = offset(center, separation_m, NORTH);

    Scenario {
        name: "parallel".to_string(),
        uavs: vec![
            linear_uav(
                "UAV-1".to_string(),
                offset(center, offset_m, WEST),
                offset(center, offset_m, EAST),
                10.0,
            ),
            linear_uav(
                "UAV-2".to_string(),
                offset(shifted, offset_m, WEST),
                offset(shifted, offset_m, EAST),
                10.0,
            ),
        ],
    }
}

/// Create four UAVs converging on a central point from the cardinal directions.
pub fn create_converging_scenario(center: Vector3) -> Scenario {
    let offset_m = 300.0;
    let center = Vector3::new(center.x, center.y, CRUISE_ALTITUDE_M);
    let headings = [NORTH, EAST, SOUTH, WEST];

    let uavs = headings
        .iter()
        .enumerate()
        .map(|(i, &heading)| {
            let start = offset(center, offset_m, heading);
            linear_uav(format!("UAV-{}", i + 1), start, center, 8.0)
        })
        .collect();

    Scenario {
        name: "converging".to_string(),
        uavs,
    }
}

/// Create two UAVs 100 m apart closing head-on at 10 m/s each.
pub fn create_head_on_scenario(center: Vector3) -> Scenario {
    let center = Vector3::new(center.x, center.y, CRUISE_ALTITUDE_M);
    let west = offset(center, 50.0, WEST);
    let east = offset(center, 50.0, EAST);

    Scenario {
        name: "head-on".to_string(),
        uavs: vec![
            linear_uav("UAV-1".to_string(), west, east, 10.0),
            linear_uav("UAV-2".to_string(), east, west, 10.0),
        ],
    }
}
