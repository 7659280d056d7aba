//! Pre-built UAV populations for the runner.

mod scenarios;

pub use scenarios::{
    create_converging_scenario, create_crossing_scenario, create_head_on_scenario,
    create_parallel_scenario, Scenario,
};
