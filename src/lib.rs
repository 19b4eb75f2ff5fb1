pub mod config;
pub mod physics;
pub mod dynamics;
pub mod vehicle;
mod gnc_mod;
pub mod sim;
pub mod io;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

// Flat re-exports of the types most callers need
pub mod types {
    pub use crate::config::{Environment, GuidanceConfig, LandingTolerance, Scenario, SimConfig};
    pub use crate::dynamics::state::{InitialConditions, LanderState};
    pub use crate::gnc::ControlCommand;
    pub use crate::sim::{Outcome, TelemetryFrame};
    pub use crate::vehicle::Lander;
}
