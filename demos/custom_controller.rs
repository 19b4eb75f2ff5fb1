use lander_sim::config::Scenario;
use lander_sim::dynamics::LanderState;
use lander_sim::gnc::{Controller, RotationDecision, ThrottleDecision};
use lander_sim::sim::{self, Outcome};

/// Lights the engine at a fixed altitude and burns flat out until the
/// vehicle stops descending, then holds a hover throttle. No attitude control.
struct FixedAltitudeBurn {
    ignition_altitude: f64,
    hover_throttle: f64,
}

impl Controller for FixedAltitudeBurn {
    fn decide_throttle(&mut self, state: &LanderState) -> ThrottleDecision {
        let request = if state.pos.y > self.ignition_altitude {
            0.0
        } else if state.vel.y < -2.0 {
            1.0
        } else {
            self.hover_throttle
        };
        ThrottleDecision { request, firing: Some(request > 0.0), accel_to_stop: None }
    }

    fn decide_rotation(&mut self, _state: &LanderState) -> RotationDecision {
        RotationDecision::default()
    }

    fn name(&self) -> &str {
        "FixedAltitudeBurn"
    }
}

fn main() {
    let mut scenario = Scenario::default();
    scenario.name = "Fixed-altitude burn demo".into();
    scenario.initial.th = 0.0;

    let g = scenario.environment.gravity;
    let controller = FixedAltitudeBurn {
        ignition_altitude: 450.0,
        hover_throttle: g / scenario.vehicle.max_accel(),
    };

    println!("Simulating with {} controller...", controller.name());
    let run = match sim::simulate_with(&scenario, Box::new(controller)) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("scenario rejected: {e}");
            return;
        }
    };

    let state = run.state();
    let verdict = match run.outcome() {
        Outcome::Landed => "landed",
        Outcome::Crashed => "crashed",
        Outcome::InFlight => "still flying",
    };
    println!("Outcome: {verdict}");
    println!("Final altitude: {:.2} m", state.pos.y);
    println!("Final vertical speed: {:.2} m/s", state.vel.y);
    println!("Flight time: {:.1} s", state.time);
    println!("Telemetry frames: {}", run.telemetry().len());
}
