//! Property tests for the tick integrator and collision predictor.

use airspace_core::{predict, step_at, SimulationSettings, Uav, Vector3, World};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn vector(span: f64) -> impl Strategy<Value = Vector3> {
    (-span..span, -span..span, -span..span).prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

fn uav_at(index: usize) -> impl Strategy<Value = Uav> {
    (
        (-1000.0..1000.0, -1000.0..1000.0, 0.0..300.0),
        vector(80.0),
        1.0..60.0,
        0.5..10.0,
        0.0..=100.0,
    )
        .prop_map(move |((x, y, z), velocity, max_speed, radius, battery)| {
            Uav::new(format!("UAV-{}", index + 1), Vector3::new(x, y, z), max_speed, radius)
                .with_velocity(velocity)
                .with_battery(battery)
        })
}

fn population() -> impl Strategy<Value = Vec<Uav>> {
    (0usize..10).prop_flat_map(|n| (0..n).map(uav_at).collect::<Vec<_>>())
}

fn settings() -> impl Strategy<Value = SimulationSettings> {
    (1.0..20.0, 0.0..30.0, 0.0..=1.0).prop_map(|(lookahead, threshold, strength)| {
        SimulationSettings {
            lookahead_seconds: lookahead,
            collision_threshold_meters: threshold,
            avoidance_strength: strength,
            ..SimulationSettings::default()
        }
    })
}

proptest! {
    #[test]
    fn step_is_deterministic(uavs in population(), settings in settings(), dt in 0.0..=0.1) {
        let world = World::default();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let first = step_at(&uavs, dt, &settings, &world, at);
        let second = step_at(&uavs, dt, &settings, &world, at);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn speed_never_exceeds_cap(uavs in population(), settings in settings(), dt in 0.0..=0.1) {
        let out = step_at(&uavs, dt, &settings, &World::default(), Utc::now());
        for uav in &out.uavs {
            prop_assert!(uav.speed() <= uav.max_speed + TOLERANCE);
        }
    }

    #[test]
    fn positions_stay_in_world_box(uavs in population(), settings in settings(), dt in 0.0..=0.1) {
        let world = World::default();
        let half = world.half_extent();
        let out = step_at(&uavs, dt, &settings, &world, Utc::now());
        for uav in &out.uavs {
            prop_assert!((-half..=half).contains(&uav.position.x));
            prop_assert!((-half..=half).contains(&uav.position.y));
            prop_assert!((0.0..=world.height_meters).contains(&uav.position.z));
        }
    }

    #[test]
    fn battery_is_monotone_and_grounds_at_zero(
        uavs in population(),
        settings in settings(),
        dt in 0.0..=0.1,
    ) {
        let out = step_at(&uavs, dt, &settings, &World::default(), Utc::now());
        for (before, after) in uavs.iter().zip(&out.uavs) {
            prop_assert!(after.battery <= before.battery);
            prop_assert!(after.battery >= 0.0);
            if after.battery == 0.0 {
                prop_assert_eq!(after.velocity.length(), 0.0);
            }
        }
    }

    #[test]
    fn prediction_is_symmetric(a in uav_at(0), b in uav_at(1)) {
        let ab = predict(&a, &b);
        let ba = predict(&b, &a);
        prop_assert!((ab.closest_distance - ba.closest_distance).abs() < TOLERANCE);
        prop_assert!((ab.time_to_closest - ba.time_to_closest).abs() < TOLERANCE);
        prop_assert!(ab.time_to_closest >= 0.0);
        prop_assert!(ab.closest_distance.is_finite());
    }
}
