pub mod ground;
pub mod propulsion;

pub use ground::GroundModel;
pub use propulsion::{Propulsion, RcsMode, ThrustNoise};
