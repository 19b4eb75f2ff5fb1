pub mod integrator;
pub mod runner;
pub mod event;
pub mod telemetry;

pub use runner::{simulate, simulate_with, ControllerKind, Outcome, Run};
pub use integrator::Integrator;
pub use telemetry::{Channel, TelemetryFrame, TelemetryLog, TelemetryObserver};
