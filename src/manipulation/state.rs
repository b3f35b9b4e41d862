use glam::Vec2;

use super::command::ManipulationCommand;
use crate::gesture::NoPinchReason;

/// What the manipulation layer is doing with the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManipulationState<H> {
    /// Nothing held.
    #[default]
    Idle,
    /// `H` is held and follows the pinch point.
    Grabbing(H),
}

impl<H: Copy> ManipulationState<H> {
    /// The held object, if any.
    #[must_use]
    pub fn grabbed(&self) -> Option<H> {
        match *self {
            Self::Idle => None,
            Self::Grabbing(handle) => Some(handle),
        }
    }
}

/// Per-frame input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchSignal {
    /// Fingers are pinched at `point` (view coordinates).
    Pinched {
        /// Pinch screen point.
        point: Vec2,
    },
    /// Fingers are not pinched.
    NoPinch(NoPinchReason),
}

/// A frame-level condition that was absorbed rather than raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// One or both fingertips were absent; treated as no pinch.
    MissingLandmark,
    /// A pinch started with nothing under it; ignored.
    NoTargetUnderPinch,
    /// The held object went away; it was force-released.
    InvalidHandle,
}

/// Output of one [`transition`] step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<H> {
    /// State after this frame.
    pub state: ManipulationState<H>,
    /// Command to apply this frame, if any.
    pub command: Option<ManipulationCommand<H>>,
    /// Condition absorbed this frame, if any.
    pub condition: Option<Condition>,
}

/// Advance the manipulation state machine by one frame.
///
/// `hit_test` is only called when a pinch arrives while idle; the first
/// object it returns is grabbed. `height` is the vertical coordinate a held
/// object is pinned to on every move.
pub fn transition<H, F>(
    state: ManipulationState<H>,
    signal: PinchSignal,
    height: f32,
    hit_test: F,
) -> Transition<H>
where
    H: Copy,
    F: FnOnce(Vec2) -> Option<H>,
{
    let missing = matches!(signal, PinchSignal::NoPinch(NoPinchReason::MissingLandmark))
        .then_some(Condition::MissingLandmark);

    match (state, signal) {
        (ManipulationState::Idle, PinchSignal::Pinched { point }) => {
            match hit_test(point) {
                Some(handle) => Transition {
                    state: ManipulationState::Grabbing(handle),
                    command: Some(ManipulationCommand::BeginGrab { handle }),
                    condition: None,
                },
                None => Transition {
                    state: ManipulationState::Idle,
                    command: None,
                    condition: Some(Condition::NoTargetUnderPinch),
                },
            }
        }
        (ManipulationState::Idle, PinchSignal::NoPinch(_)) => Transition {
            state: ManipulationState::Idle,
            command: None,
            condition: missing,
        },
        (ManipulationState::Grabbing(handle), PinchSignal::Pinched { point }) => {
            Transition {
                state: ManipulationState::Grabbing(handle),
                command: Some(ManipulationCommand::MoveTo {
                    handle,
                    target: point,
                    height,
                }),
                condition: None,
            }
        }
        (ManipulationState::Grabbing(handle), PinchSignal::NoPinch(_)) => {
            Transition {
                state: ManipulationState::Idle,
                command: Some(ManipulationCommand::EndGrab { handle }),
                condition: missing,
            }
        }
    }
}
