//! Layer moves, their notation, and the move log.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::Axis;

/// Quarter-turn of one layer of the cube.
///
/// The layer is counted from the negative end of the axis, regardless of the
/// axis sign, so `+x0` and `-x0` turn the same layer in opposite directions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    axis: Axis,
    layer: u32,
}

impl Move {
    /// Constructs a move that turns `layer` counterclockwise around `axis`.
    pub fn new(axis: Axis, layer: u32) -> Self {
        Self { axis, layer }
    }

    /// Returns the signed axis of the move.
    pub fn axis(self) -> Axis {
        self.axis
    }
    /// Returns the layer index of the move.
    pub fn layer(self) -> u32 {
        self.layer
    }

    /// Reverses the direction of the move in place.
    pub fn flip_direction(&mut self) {
        self.axis = self.axis.opposite();
    }
    /// Returns the move that undoes this one.
    #[must_use]
    pub fn rev(mut self) -> Self {
        self.flip_direction();
        self
    }

    /// Returns whether the move turns an existing layer of a cube with edge
    /// length `size`.
    pub fn fits_size(self, size: u32) -> bool {
        self.layer < size
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis, self.layer)
    }
}

/// Error while parsing move notation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MoveParseError {
    #[error("empty move")]
    Empty,
    #[error("expected '+' or '-' at start of {0:?}")]
    MissingSign(String),
    #[error("expected axis 'x', 'y', or 'z' in {0:?}")]
    BadAxis(String),
    #[error("expected layer index in {0:?}")]
    BadLayer(String),
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let positive = match chars.next() {
            None => return Err(MoveParseError::Empty),
            Some('+') => true,
            Some('-') => false,
            Some(_) => return Err(MoveParseError::MissingSign(s.to_owned())),
        };
        let component = match chars.next().map(|c| c.to_ascii_lowercase()) {
            Some('x') => 0,
            Some('y') => 1,
            Some('z') => 2,
            _ => return Err(MoveParseError::BadAxis(s.to_owned())),
        };
        let axis = Axis::from_component(component, positive)
            .ok_or_else(|| MoveParseError::BadAxis(s.to_owned()))?;
        let layer = chars
            .as_str()
            .parse()
            .map_err(|_| MoveParseError::BadLayer(s.to_owned()))?;
        Ok(Move::new(axis, layer))
    }
}

/// Parses a whitespace-separated sequence of moves, such as `+x0 -y2`.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, MoveParseError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Formats a sequence of moves as whitespace-separated notation.
pub fn format_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> String {
    moves.into_iter().join(" ")
}

/// Ordered history of completed moves.
///
/// Replaying the log in order from the generated cube reproduces the current
/// arrangement.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveLog {
    moves: Vec<Move>,
}

impl MoveLog {
    /// Constructs an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of moves in the log.
    pub fn len(&self) -> usize {
        self.moves.len()
    }
    /// Returns whether the log has no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
    /// Returns the most recent move.
    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }
    /// Returns all moves, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Appends a completed move.
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }
    /// Removes the entry undone by `undo_move`, which must be the reverse of
    /// the last move. Returns the removed move, or `None` if the last move does
    /// not match.
    pub fn pop_undone(&mut self, undo_move: Move) -> Option<Move> {
        if self.last() == Some(undo_move.rev()) {
            self.moves.pop()
        } else {
            None
        }
    }
    /// Removes every move.
    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_moves(&self.moves))
    }
}
