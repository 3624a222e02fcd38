use cgmath::{Deg, Euler, Quaternion, Rotation, Vector3};

use crate::{Cube, CubieId, Move};

/// Member of a [`Pivot`], along with its transform at the time it was grouped.
#[derive(Debug, Clone, PartialEq)]
struct PivotMember {
    id: CubieId,
    position: Vector3<f32>,
    orientation: Quaternion<f32>,
}

/// Transient group of cubies that rotate together as one layer.
///
/// The pivot does not own the cubies; it marks them as grouped in the
/// [`Cube`] and remembers their transforms so that the whole layer can be
/// rotated about the pivot point. At most one pivot should exist per cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    mv: Move,
    offset: Vector3<f32>,
    /// Accumulated rotation, in degrees around each axis.
    euler: Vector3<f32>,
    members: Vec<PivotMember>,
}

impl Pivot {
    /// Groups every cubie in the layer turned by `mv`.
    ///
    /// The pivot sits on the center plane of the layer. A cubie is in the layer
    /// if its coordinate along the move axis is within half a cubie of the
    /// pivot, which tolerates drift accumulated from earlier rotations.
    pub fn group(cube: &mut Cube, mv: Move) -> Self {
        let scale = cube.spacing();
        let offset = mv.axis().abs_vector() * (scale * mv.layer() as f32 - 0.5 + scale / 2.0);
        let threshold = scale * 0.5;

        let axis_vector = mv.axis().vector();
        let components = (0..3).filter(|&i| axis_vector[i] != 0.0);

        let mut members = vec![];
        for i in components {
            let ids = cube
                .cubies()
                .filter(|(_, cubie)| !cubie.is_grouped())
                .filter(|(_, cubie)| (cubie.position[i] - offset[i]).abs() < threshold)
                .map(|(id, _)| id)
                .collect::<Vec<_>>();
            for id in ids {
                if let Ok(cubie) = cube.cubie_mut(id) {
                    cubie.set_grouped(true);
                    members.push(PivotMember {
                        id,
                        position: cubie.position,
                        orientation: cubie.orientation,
                    });
                }
            }
        }

        log::trace!("grouped {} cubies for {mv}", members.len());

        Self {
            mv,
            offset,
            euler: Vector3::new(0.0, 0.0, 0.0),
            members,
        }
    }

    /// Returns the move that this pivot was grouped for.
    pub fn mv(&self) -> Move {
        self.mv
    }
    /// Returns the pivot point in the cube's local space.
    pub fn offset(&self) -> Vector3<f32> {
        self.offset
    }
    /// Returns the accumulated rotation, in degrees around each axis.
    pub fn rotation(&self) -> Vector3<f32> {
        self.euler
    }
    /// Returns the IDs of the grouped cubies.
    pub fn members(&self) -> impl '_ + Iterator<Item = CubieId> {
        self.members.iter().map(|m| m.id)
    }
    /// Returns the number of grouped cubies.
    pub fn len(&self) -> usize {
        self.members.len()
    }
    /// Returns whether the pivot grouped no cubies.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Adds `delta` (in degrees around each axis) to the pivot rotation and
    /// updates the grouped cubies.
    pub fn add_rotation(&mut self, cube: &mut Cube, delta: Vector3<f32>) {
        self.set_rotation(cube, self.euler + delta);
    }
    /// Sets the pivot rotation (in degrees around each axis) and updates the
    /// grouped cubies.
    pub fn set_rotation(&mut self, cube: &mut Cube, euler: Vector3<f32>) {
        self.euler = euler;
        let rot = Quaternion::from(Euler::new(Deg(euler.x), Deg(euler.y), Deg(euler.z)));
        for m in &self.members {
            let Ok(cubie) = cube.cubie_mut(m.id) else {
                continue; // cube was cleared
            };
            cubie.position = self.offset + rot.rotate_vector(m.position - self.offset);
            cubie.orientation = rot * m.orientation;
        }
    }

    /// Restores the grouped cubies to their transforms at the time they were
    /// grouped, then releases them.
    pub fn revert(mut self, cube: &mut Cube) {
        self.set_rotation(cube, Vector3::new(0.0, 0.0, 0.0));
        self.ungroup(cube);
    }

    /// Releases the grouped cubies, leaving them in their current transforms.
    pub fn ungroup(self, cube: &mut Cube) {
        for m in self.members {
            if let Ok(cubie) = cube.cubie_mut(m.id) {
                cubie.set_grouped(false);
            }
        }
    }
}
