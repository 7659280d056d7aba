//! Simulation tuning parameters.

use serde::{Deserialize, Serialize};

/// Tunables read by every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationSettings {
    /// Population size
    pub num_uavs: usize,
    /// Fixed step used when no wall-clock anchor exists
    pub time_step_ms: u64,
    /// Collision prediction window (seconds)
    pub lookahead_seconds: f64,
    /// Extra margin on top of the combined radii (meters)
    pub collision_threshold_meters: f64,
    /// Steering factor, 0..1
    pub avoidance_strength: f64,
    pub max_uav_speed: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            num_uavs: 18,
            time_step_ms: 50,
            lookahead_seconds: 8.0,
            collision_threshold_meters: 15.0,
            avoidance_strength: 0.45,
            max_uav_speed: 55.0,
        }
    }
}

impl SimulationSettings {
    /// Fixed step in seconds.
    pub fn tick_duration(&self) -> f64 {
        self.time_step_ms as f64 / 1000.0
    }

    /// Swap in a new value. Live side effects are the simulation's job.
    pub fn apply(&mut self, setting: &Setting) {
        match *setting {
            Setting::NumUavs(n) => self.num_uavs = n,
            Setting::TimeStepMs(ms) => self.time_step_ms = ms,
            Setting::LookaheadSeconds(s) => self.lookahead_seconds = s,
            Setting::CollisionThresholdMeters(m) => self.collision_threshold_meters = m,
            Setting::AvoidanceStrength(k) => self.avoidance_strength = k,
            Setting::MaxUavSpeed(v) => self.max_uav_speed = v,
        }
    }
}

/// A single settings change, keyed by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum Setting {
    /// Grows or truncates the population in place
    NumUavs(usize),
    TimeStepMs(u64),
    LookaheadSeconds(f64),
    CollisionThresholdMeters(f64),
    AvoidanceStrength(f64),
    /// Clamps every existing velocity componentwise
    MaxUavSpeed(f64),
}
