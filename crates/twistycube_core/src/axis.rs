use std::fmt;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter};

/// Signed unit axis of the cube.
///
/// Exactly one component of [`Axis::vector()`] is nonzero and it is always
/// `1` or `-1`.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, EnumCount,
)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// `+X`
    PosX,
    /// `-X`
    NegX,
    /// `+Y`
    PosY,
    /// `-Y`
    NegY,
    /// `+Z`
    PosZ,
    /// `-Z`
    NegZ,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { '+' } else { '-' };
        let name = ['x', 'y', 'z'][self.component()];
        write!(f, "{sign}{name}")
    }
}

impl Axis {
    /// Returns the axis pointing the opposite way.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Axis::PosX => Axis::NegX,
            Axis::NegX => Axis::PosX,
            Axis::PosY => Axis::NegY,
            Axis::NegY => Axis::PosY,
            Axis::PosZ => Axis::NegZ,
            Axis::NegZ => Axis::PosZ,
        }
    }

    /// Returns the axis along component `component` (0 = X, 1 = Y, 2 = Z) with
    /// the given sign, or `None` if `component` is out of range.
    pub fn from_component(component: usize, positive: bool) -> Option<Self> {
        let pos = [Axis::PosX, Axis::PosY, Axis::PosZ].get(component).copied()?;
        Some(if positive { pos } else { pos.opposite() })
    }

    /// Returns the index of the nonzero component: 0 for X, 1 for Y, 2 for Z.
    pub fn component(self) -> usize {
        match self {
            Axis::PosX | Axis::NegX => 0,
            Axis::PosY | Axis::NegY => 1,
            Axis::PosZ | Axis::NegZ => 2,
        }
    }

    /// Returns whether the axis points in the positive direction.
    pub fn is_positive(self) -> bool {
        matches!(self, Axis::PosX | Axis::PosY | Axis::PosZ)
    }

    /// Returns the signed unit vector.
    pub fn vector(self) -> Vector3<f32> {
        let sign = if self.is_positive() { 1.0 } else { -1.0 };
        let mut v = Vector3::new(0.0, 0.0, 0.0);
        v[self.component()] = sign;
        v
    }

    /// Returns the unit vector with every component made non-negative.
    pub fn abs_vector(self) -> Vector3<f32> {
        let mut v = Vector3::new(0.0, 0.0, 0.0);
        v[self.component()] = 1.0;
        v
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_axis_vectors() {
        for axis in Axis::iter() {
            assert_eq!(axis.vector().magnitude2(), 1.0);
            assert_eq!(axis.vector(), -axis.opposite().vector());
            assert_eq!(axis.abs_vector(), axis.opposite().abs_vector());
            assert_eq!(
                Axis::from_component(axis.component(), axis.is_positive()),
                Some(axis),
            );
        }
        assert_eq!(Axis::from_component(3, true), None);
        assert_eq!(Axis::NegY.to_string(), "-y");
    }
}
