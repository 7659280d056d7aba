//! Avoidance steering.
//!
//! Scans every unordered pair, and for each pair at risk pushes both UAVs
//! apart along their predicted separation at closest approach.

use crate::conflict::{is_at_risk, predict};
use crate::models::{CollisionRisk, Uav};
use crate::settings::SimulationSettings;
use crate::vector::Vector3;

/// Result of one pairwise risk scan.
#[derive(Debug, Clone, Default)]
pub struct RiskScan {
    /// At-risk pairs in scan order (i < j, row-major)
    pub risks: Vec<CollisionRisk>,
    /// Accumulated steering bias, indexed like the input slice
    pub biases: Vec<Vector3>,
}

/// Run the collision predictor over all pairs and accumulate steering biases.
pub fn scan(uavs: &[Uav], settings: &SimulationSettings) -> RiskScan {
    let mut risks = Vec::new();
    let mut biases = vec![Vector3::ZERO; uavs.len()];

    for i in 0..uavs.len() {
        for j in (i + 1)..uavs.len() {
            let (a, b) = (&uavs[i], &uavs[j]);
            let risk = predict(a, b);
            if !is_at_risk(&risk, a, b, settings) {
                continue;
            }

            let push = steering_bias(a, b, risk.time_to_closest, settings.avoidance_strength);
            biases[i] = biases[i] + push;
            biases[j] = biases[j] - push;
            risks.push(risk);
        }
    }

    RiskScan { risks, biases }
}

/// Bias for `a`, pointing away from `b` at time `t`. `b` gets the negation.
pub fn steering_bias(a: &Uav, b: &Uav, t: f64, strength: f64) -> Vector3 {
    let separation = a.position_at(t) - b.position_at(t);
    separation.normalize() * strength
}
