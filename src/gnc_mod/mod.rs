pub mod controller;
pub mod guidance;
pub mod pid;
pub mod bang_bang;
pub mod pid_lander;
pub mod scripted;

pub use controller::{ControlCommand, Controller, RotationDecision, ThrottleDecision};
pub use guidance::{braking_accel, rotational_braking_accel, saturate, MAX_DEMAND};
pub use pid::Pid;
pub use bang_bang::BangBangLander;
pub use pid_lander::PidLander;
pub use scripted::{ScriptStep, ScriptedController};
