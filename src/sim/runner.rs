use serde::Serialize;

use crate::config::{ConfigError, Scenario};
use crate::dynamics::state::{InitialConditions, LanderState};
use crate::gnc::{BangBangLander, Controller, PidLander, ScriptedController};
use crate::physics::Propulsion;
use super::event::{default_detectors, EventDetector, FlightEvent};
use super::integrator::Integrator;
use super::telemetry::{TelemetryFrame, TelemetryLog, TelemetryObserver};

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    InFlight,
    Landed,
    Crashed,
}

impl Outcome {
    pub fn of(state: &LanderState) -> Self {
        if state.exploded {
            Outcome::Crashed
        } else if state.stop_simulating {
            Outcome::Landed
        } else {
            Outcome::InFlight
        }
    }
}

/// Built-in controller choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    BangBang,
    Pid,
    Idle,
}

impl ControllerKind {
    pub fn build(self, scenario: &Scenario) -> Box<dyn Controller> {
        let gravity = scenario.environment.gravity;
        match self {
            ControllerKind::BangBang => {
                Box::new(BangBangLander::new(&scenario.vehicle, gravity, scenario.guidance))
            }
            ControllerKind::Pid => Box::new(PidLander::new(
                &scenario.vehicle,
                gravity,
                scenario.guidance,
                scenario.sim.dt_ms / 1000.0,
            )),
            ControllerKind::Idle => Box::new(ScriptedController::idle()),
        }
    }
}

// ---------------------------------------------------------------------------
// Run: one descent from initial conditions to a terminal state
// ---------------------------------------------------------------------------

/// Owns the live state, its telemetry log and the controller for one run.
pub struct Run {
    scenario: Scenario,
    integrator: Integrator,
    controller: Box<dyn Controller>,
    state: LanderState,
    telemetry: TelemetryLog,
    events: Vec<FlightEvent>,
    detectors: Vec<Box<dyn EventDetector>>,
    observers: Vec<Box<dyn TelemetryObserver>>,
}

impl Run {
    /// Start a run of `scenario` from `initial` with the given controller.
    /// Configuration is validated and copied; it cannot change mid-run.
    pub fn start(
        scenario: &Scenario,
        initial: InitialConditions,
        controller: Box<dyn Controller>,
    ) -> Result<Self, ConfigError> {
        let scenario = Scenario { initial, ..scenario.clone() };
        scenario.validate()?;

        let noise = scenario.sim.thrust_noise()?;
        let propulsion = Propulsion::new(scenario.vehicle.clone(), scenario.sim.rcs_mode, noise);
        let integrator = Integrator::new(propulsion, scenario.environment)
            .with_engine_cutoff(scenario.guidance.climb_cutoff, scenario.guidance.ground_cutoff);
        let capacity = (scenario.sim.max_time_s * 1000.0 / scenario.sim.dt_ms) as usize + 1;

        log::info!(
            "starting '{}' with {} controller: y={:.1}m vy={:.1}m/s th={:.3}rad",
            scenario.name,
            controller.name(),
            initial.y,
            initial.vy,
            initial.th,
        );

        Ok(Self {
            state: LanderState::new(&initial),
            telemetry: TelemetryLog::with_capacity(capacity),
            events: Vec::new(),
            detectors: default_detectors(scenario.environment.landing.max_altitude),
            observers: Vec::new(),
            integrator,
            controller,
            scenario,
        })
    }

    /// Start from the scenario's own initial conditions.
    pub fn from_scenario(scenario: &Scenario, controller: Box<dyn Controller>) -> Result<Self, ConfigError> {
        Self::start(scenario, scenario.initial, controller)
    }

    /// Throw away state, telemetry and events and start over from the same
    /// initial conditions. Observers stay subscribed.
    pub fn reset(&mut self) {
        self.state = LanderState::new(&self.scenario.initial);
        self.telemetry.clear();
        self.events.clear();
        self.controller.reset();
        self.integrator.reset();
        for detector in &mut self.detectors {
            detector.reset();
        }
        log::debug!("run '{}' reset", self.scenario.name);
    }

    pub fn is_terminal(&self) -> bool {
        self.state.stop_simulating
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::of(&self.state)
    }

    pub fn state(&self) -> &LanderState {
        &self.state
    }

    pub fn telemetry(&self) -> &TelemetryLog {
        &self.telemetry
    }

    pub fn events(&self) -> &[FlightEvent] {
        &self.events
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn controller_name(&self) -> &str {
        self.controller.name()
    }

    pub fn add_detector(&mut self, detector: Box<dyn EventDetector>) {
        self.detectors.push(detector);
    }

    /// Receive every frame as it is appended.
    pub fn subscribe(&mut self, observer: Box<dyn TelemetryObserver>) {
        self.observers.push(observer);
    }

    /// Advance one tick of `elapsed_ms`. Returns the logged frame, or `None`
    /// once the run is terminal.
    pub fn tick(&mut self, elapsed_ms: f64) -> Option<&TelemetryFrame> {
        let prev = self.state;
        let command = self
            .integrator
            .advance(&mut self.state, self.controller.as_mut(), elapsed_ms)?;

        let tick = self.telemetry.len();
        for detector in &mut self.detectors {
            if let Some(kind) = detector.check(&prev, &self.state) {
                log::debug!("tick {tick}: {kind:?} at t={:.3}s", self.state.time);
                self.events.push(FlightEvent { tick, time: self.state.time, kind, state: self.state });
            }
        }

        let frame = self.telemetry.push(self.state, command);
        for observer in &mut self.observers {
            observer.on_frame(frame);
        }
        Some(frame)
    }

    /// Drive fixed ticks of `sim.dt_ms` until terminal or `sim.max_time_s`.
    pub fn run_to_completion(&mut self) -> Outcome {
        let dt_ms = self.scenario.sim.dt_ms;
        let max_ticks = (self.scenario.sim.max_time_s * 1000.0 / dt_ms).ceil() as usize;

        while !self.is_terminal() && self.telemetry.len() < max_ticks {
            self.tick(dt_ms);
        }

        if !self.is_terminal() {
            log::warn!(
                "'{}' still in flight after {:.1}s (y={:.2}m vy={:.2}m/s)",
                self.scenario.name,
                self.state.time,
                self.state.pos.y,
                self.state.vel.y,
            );
        }
        self.outcome()
    }
}

// ---------------------------------------------------------------------------
// Headless drivers
// ---------------------------------------------------------------------------

/// Run a scenario to completion with a custom controller.
pub fn simulate_with(scenario: &Scenario, controller: Box<dyn Controller>) -> Result<Run, ConfigError> {
    let mut run = Run::from_scenario(scenario, controller)?;
    run.run_to_completion();
    Ok(run)
}

/// Run a scenario with the bang-bang lander (convenience wrapper).
pub fn simulate(scenario: &Scenario) -> Result<Run, ConfigError> {
    simulate_with(scenario, ControllerKind::BangBang.build(scenario))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
