//! Grab / move / release manipulation driven by per-frame pinch readings.
//!
//! [`transition`] is the pure state machine; [`PinchController`] owns its
//! state, runs detection and projection, and applies the emitted
//! [`ManipulationCommand`]s to a [`Scene`].

/// Commands emitted by the state machine.
pub mod command;
/// Detection + transition + scene application, one frame at a time.
pub mod controller;
/// The externally-owned scene the commands act on.
pub mod scene;
/// Pure state machine.
pub mod state;

pub use command::ManipulationCommand;
pub use controller::{FrameOutcome, PinchController};
pub use scene::{InteractionMode, Scene};
pub use state::{transition, Condition, ManipulationState, PinchSignal, Transition};
