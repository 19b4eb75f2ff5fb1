use crate::dynamics::state::LanderState;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of flight events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Ignition,
    Cutoff,
    Touchdown,
    Landed,
    Crashed,
    Custom(String),
}

/// A discrete event that occurred during a run.
#[derive(Debug, Clone)]
pub struct FlightEvent {
    pub tick: usize,
    pub time: f64,
    pub kind: EventKind,
    pub state: LanderState,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind>;

    /// Forget anything remembered from a previous run.
    fn reset(&mut self) {}
}

/// Reports engine latch transitions.
pub struct EngineDetector;

impl EventDetector for EngineDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind> {
        match (prev.firing, current.firing) {
            (false, true) => Some(EventKind::Ignition),
            (true, false) => Some(EventKind::Cutoff),
            _ => None,
        }
    }
}

/// Named callout the first time the vehicle descends through `altitude`.
pub struct AltitudeCallout {
    pub altitude: f64,
    passed: bool,
}

impl AltitudeCallout {
    pub fn new(altitude: f64) -> Self {
        Self { altitude, passed: false }
    }
}

impl EventDetector for AltitudeCallout {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind> {
        if self.passed || current.exploded || current.pos.y > self.altitude || prev.pos.y <= self.altitude {
            return None;
        }
        self.passed = true;
        Some(EventKind::Custom(format!("{:.0} m", self.altitude)))
    }

    fn reset(&mut self) {
        self.passed = false;
    }
}

/// First contact with the ground plane.
pub struct TouchdownDetector {
    pub contact_altitude: f64,
    fired: bool,
}

impl TouchdownDetector {
    pub fn new(contact_altitude: f64) -> Self {
        Self { contact_altitude, fired: false }
    }
}

impl EventDetector for TouchdownDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind> {
        if self.fired || current.exploded {
            return None;
        }
        if prev.pos.y >= self.contact_altitude && current.pos.y < self.contact_altitude {
            self.fired = true;
            Some(EventKind::Touchdown)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.fired = false;
    }
}

/// Reports the run's terminal outcome.
pub struct TerminalDetector;

impl EventDetector for TerminalDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind> {
        if prev.stop_simulating || !current.stop_simulating {
            return None;
        }
        Some(if current.exploded { EventKind::Crashed } else { EventKind::Landed })
    }
}

/// Detectors every run starts with.
pub fn default_detectors(contact_altitude: f64) -> Vec<Box<dyn EventDetector>> {
    vec![
        Box::new(EngineDetector),
        Box::new(TouchdownDetector::new(contact_altitude)),
        Box::new(TerminalDetector),
    ]
}
