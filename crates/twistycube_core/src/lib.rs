//! Cube state for twistycube: the shell of cubies, layer grouping, and the
//! move log.
//!
//! # Example
//!
//! ```rust
//! use twistycube_core::*;
//!
//! let mut cube = Cube::new();
//! cube.generate(3, "Cubie");
//! assert_eq!(26, cube.cubie_count());
//!
//! let mut pivot = Pivot::group(&mut cube, Move::new(Axis::PosX, 0));
//! assert_eq!(9, pivot.len());
//! pivot.set_rotation(&mut cube, Axis::PosX.vector() * QUARTER_TURN_DEGREES);
//! pivot.ungroup(&mut cube);
//! assert!(!cube.is_solved(1e-4));
//! ```

#[macro_use]
pub mod ti;

mod axis;
mod cube;
mod moves;
mod pivot;
#[cfg(test)]
mod tests;

pub use axis::Axis;
pub use cube::{Cube, Cubie, CubieId};
pub use moves::{Move, MoveLog, MoveParseError, format_moves, parse_moves};
pub use pivot::Pivot;

/// Smallest supported edge length, in cubies.
pub const MIN_SIZE: u32 = 2;

/// Angle of one move, in degrees.
pub const QUARTER_TURN_DEGREES: f32 = 90.0;

/// Default tolerance for comparing cubie transforms after rotations.
pub const EPSILON: f32 = 1e-3;
