use glam::Vec2;

/// An object manipulation requested by the state machine.
///
/// The state machine never cares how a command is carried out; the
/// [`PinchController`](super::PinchController) applies it to a
/// [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManipulationCommand<H> {
    /// Take hold of `handle`: make it fixed so physics leaves it alone.
    BeginGrab {
        /// Object being grabbed.
        handle: H,
    },
    /// Drag the held object toward `target`, then pin its height.
    MoveTo {
        /// Object being moved.
        handle: H,
        /// Pinch point in view coordinates.
        target: Vec2,
        /// Vertical world coordinate applied after the move.
        height: f32,
    },
    /// Let go of `handle` and restore its pre-grab interaction mode.
    EndGrab {
        /// Object being released.
        handle: H,
    },
}

impl<H: Copy> ManipulationCommand<H> {
    /// The object this command targets.
    #[must_use]
    pub fn handle(&self) -> H {
        match *self {
            Self::BeginGrab { handle }
            | Self::MoveTo { handle, .. }
            | Self::EndGrab { handle } => handle,
        }
    }
}
