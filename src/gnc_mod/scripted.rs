use serde::Deserialize;

use crate::dynamics::state::LanderState;
use super::controller::{Controller, RotationDecision, ThrottleDecision};

/// One segment of a command schedule, active until `until_s`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScriptStep {
    pub until_s: f64,
    #[serde(default)]
    pub throttle: f64,
    #[serde(default)]
    pub rcs: f64,
}

/// Open-loop controller replaying a fixed schedule by run time.
/// Past the last step, or with no steps at all, it commands nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    steps: Vec<ScriptStep>,
}

impl ScriptedController {
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by(|a, b| a.until_s.total_cmp(&b.until_s));
        Self { steps }
    }

    /// Engine off, RCS off, forever.
    pub fn idle() -> Self {
        Self::default()
    }

    fn active(&self, time: f64) -> Option<&ScriptStep> {
        self.steps.iter().find(|s| time < s.until_s)
    }
}

impl Controller for ScriptedController {
    fn decide_throttle(&mut self, state: &LanderState) -> ThrottleDecision {
        let request = self.active(state.time).map_or(0.0, |s| s.throttle);
        ThrottleDecision { request, firing: Some(request > 0.0), accel_to_stop: None }
    }

    fn decide_rotation(&mut self, state: &LanderState) -> RotationDecision {
        let request = self.active(state.time).map_or(0.0, |s| s.rcs);
        RotationDecision { request, accel_to_stop: None }
    }

    fn name(&self) -> &str {
        if self.steps.is_empty() { "Idle" } else { "Scripted" }
    }
}
