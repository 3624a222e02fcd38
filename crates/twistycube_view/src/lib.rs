//! Simulation of an animated cube: one layer rotation at a time, with undo
//! and shuffling driven frame by frame.

mod animation;
mod simulation;

pub use animation::RotationAnimation;
pub use simulation::CubeSimulation;
use twistycube_core::Move;

/// Notification emitted by [`CubeSimulation`] when something finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CubeEvent {
    /// The cube was rebuilt with the given size.
    Generated {
        /// Edge length of the new cube, after clamping.
        size: u32,
    },
    /// Every cubie was destroyed.
    Cleared,
    /// A rotation finished and was added to the move log.
    MoveApplied(Move),
    /// A rotation finished and removed this move from the move log.
    MoveUndone(Move),
    /// An undo or undo-all sequence finished.
    UndoFinished,
    /// A shuffle finished.
    ShuffleFinished,
    /// The simulation was reset.
    Reset,
}

/// What the simulation is currently doing.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum EngineState {
    /// Waiting for a command.
    #[default]
    Idle,
    /// Animating a move that will be logged.
    Rotating(RotationAnimation),
    /// Undoing the last move (or every move, if `all` is `true`).
    Undoing {
        /// Whether to keep undoing until the log is empty.
        all: bool,
        /// Rotation in flight, if any. `None` between steps.
        rotation: Option<RotationAnimation>,
    },
    /// Applying random moves, one per frame.
    Shuffling {
        /// Number of random moves not yet applied.
        remaining: u32,
    },
}

impl EngineState {
    /// Returns whether the state is [`EngineState::Idle`].
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the rotation in flight, if any.
    pub fn rotation(&self) -> Option<&RotationAnimation> {
        match self {
            Self::Rotating(anim) => Some(anim),
            Self::Undoing { rotation, .. } => rotation.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn into_rotation(self) -> Option<RotationAnimation> {
        match self {
            Self::Rotating(anim) => Some(anim),
            Self::Undoing { rotation, .. } => rotation,
            _ => None,
        }
    }

    /// Returns whether the state is part of a sequence with no rotation in
    /// flight.
    pub(crate) fn is_waiting_for_next_step(&self) -> bool {
        matches!(
            self,
            Self::Undoing { rotation: None, .. } | Self::Shuffling { .. },
        )
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Rotating(_) => "rotating",
            Self::Undoing { all: false, .. } => "undoing",
            Self::Undoing { all: true, .. } => "undoing all",
            Self::Shuffling { .. } => "shuffling",
        }
    }
}
