use crate::dynamics::state::LanderState;
use crate::gnc::ControlCommand;

// ---------------------------------------------------------------------------
// Telemetry: append-only log of per-tick snapshots
// ---------------------------------------------------------------------------

/// Immutable record of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryFrame {
    pub tick: usize,
    /// Simulated time at the end of the tick, s.
    pub elapsed_s: f64,
    pub state: LanderState,
    pub command: ControlCommand,
}

/// Per-tick subscriber. Called once for every frame appended to a run's log.
pub trait TelemetryObserver {
    fn on_frame(&mut self, frame: &TelemetryFrame);
}

impl<F: FnMut(&TelemetryFrame)> TelemetryObserver for F {
    fn on_frame(&mut self, frame: &TelemetryFrame) {
        self(frame)
    }
}

/// Upper bound on frames reserved up front; longer runs grow the log on demand.
pub const MAX_PREALLOCATED_FRAMES: usize = 200_000;

/// Frames indexed by tick number. Frames are only ever appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryLog {
    frames: Vec<TelemetryFrame>,
}

impl TelemetryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `capacity` frames, capped at [`MAX_PREALLOCATED_FRAMES`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self { frames: Vec::with_capacity(capacity.min(MAX_PREALLOCATED_FRAMES)) }
    }

    pub(crate) fn push(&mut self, state: LanderState, command: ControlCommand) -> &TelemetryFrame {
        let tick = self.frames.len();
        self.frames.push(TelemetryFrame { tick, elapsed_s: state.time, state, command });
        &self.frames[tick]
    }

    pub(crate) fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, tick: usize) -> Option<&TelemetryFrame> {
        self.frames.get(tick)
    }

    pub fn last(&self) -> Option<&TelemetryFrame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[TelemetryFrame] {
        &self.frames
    }

    /// Frames from `tick` onward, for consumers polling incrementally.
    pub fn since(&self, tick: usize) -> &[TelemetryFrame] {
        &self.frames[tick.min(self.frames.len())..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TelemetryFrame> {
        self.frames.iter()
    }

    pub fn states(&self) -> impl Iterator<Item = &LanderState> {
        self.frames.iter().map(|f| &f.state)
    }
}

impl<'a> IntoIterator for &'a TelemetryLog {
    type Item = &'a TelemetryFrame;
    type IntoIter = std::slice::Iter<'a, TelemetryFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

// ---------------------------------------------------------------------------
// Chart channels
// ---------------------------------------------------------------------------

/// Scalar series a chart or exporter can pull out of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Rotation,
    RotationalVelocity,
    RotationalAcceleration,
    RotationalAccelToStop,
    RequestedRcsThrottle,
    RcsThrottle,
    Height,
    Velocity,
    Acceleration,
    RequestedThrottle,
    Throttle,
    Downrange,
}

impl Channel {
    pub const ALL: [Channel; 12] = [
        Channel::Rotation,
        Channel::RotationalVelocity,
        Channel::RotationalAcceleration,
        Channel::RotationalAccelToStop,
        Channel::RequestedRcsThrottle,
        Channel::RcsThrottle,
        Channel::Height,
        Channel::Velocity,
        Channel::Acceleration,
        Channel::RequestedThrottle,
        Channel::Throttle,
        Channel::Downrange,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Channel::Rotation => "Rotation (rad)",
            Channel::RotationalVelocity => "Rotational Velocity (rad/s)",
            Channel::RotationalAcceleration => "Rotational Acceleration (rad/s^2)",
            Channel::RotationalAccelToStop => "Rotational Acceleration to stop (rad/s^2)",
            Channel::RequestedRcsThrottle => "Requested RCS Throttle",
            Channel::RcsThrottle => "RCS Throttle",
            Channel::Height => "Height (m)",
            Channel::Velocity => "Velocity (m/s)",
            Channel::Acceleration => "Acceleration (m/s^2)",
            Channel::RequestedThrottle => "Requested Throttle Position",
            Channel::Throttle => "Throttle Position",
            Channel::Downrange => "Downrange (m)",
        }
    }

    /// Value for this frame, `None` where the series has a gap.
    /// Acceleration is blanked once the vehicle has exploded.
    pub fn value(self, frame: &TelemetryFrame) -> Option<f64> {
        let s = &frame.state;
        match self {
            Channel::Rotation => Some(s.th),
            Channel::RotationalVelocity => Some(s.vth),
            Channel::RotationalAcceleration => Some(s.ath),
            Channel::RotationalAccelToStop => frame.command.rot_accel_to_stop,
            Channel::RequestedRcsThrottle => Some(s.requested_rcs_throttle),
            Channel::RcsThrottle => Some(s.rcs_command),
            Channel::Height => Some(s.pos.y),
            Channel::Velocity => Some(s.vel.y),
            Channel::Acceleration if s.exploded => None,
            Channel::Acceleration => Some(s.accel.y),
            Channel::RequestedThrottle => Some(s.requested_throttle),
            Channel::Throttle => Some(s.throttle),
            Channel::Downrange => Some(s.pos.x),
        }
    }

    /// `(time, value)` points for the whole log, skipping gaps.
    pub fn series(self, log: &TelemetryLog) -> Vec<[f64; 2]> {
        log.iter()
            .filter_map(|f| self.value(f).map(|v| [f.elapsed_s, v]))
            .collect()
    }
}
