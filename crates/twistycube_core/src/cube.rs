use cgmath::{InnerSpace, Quaternion, Vector3};
use itertools::iproduct;

use crate::ti::{IndexOutOfRange, TiVec};
use crate::{MIN_SIZE, MoveLog};

typed_index_struct! {
    /// ID of a cubie in a [`Cube`]. IDs are invalidated when the cube is
    /// regenerated or cleared.
    pub struct CubieId(pub u32);
}

/// One small cube on the shell of the puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    /// Name of the visual template the cubie was created from.
    pub template: String,
    /// Position in the cube's local space, where the whole cube spans
    /// `-0.5..=0.5` on each axis.
    pub position: Vector3<f32>,
    /// Orientation relative to the generated cube.
    pub orientation: Quaternion<f32>,
    /// Uniform scale, equal to `1/size`.
    pub scale: f32,

    home: Vector3<f32>,
    grouped: bool,
}

impl Cubie {
    /// Returns the position the cubie was generated at.
    pub fn home(&self) -> Vector3<f32> {
        self.home
    }
    /// Returns whether the cubie is currently part of a rotating layer.
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }
    pub(crate) fn set_grouped(&mut self, grouped: bool) {
        self.grouped = grouped;
    }

    /// Returns whether the cubie is at its home position in its home
    /// orientation, within `tolerance`.
    pub fn is_home(&self, tolerance: f32) -> bool {
        // `q` and `-q` are the same orientation.
        (self.position - self.home).magnitude() <= tolerance
            && self.orientation.s.abs() >= 1.0 - tolerance
    }
}

/// N×N×N cube made of cubies, along with the log of moves applied to it.
#[derive(Debug, Default, Clone)]
pub struct Cube {
    cubies: TiVec<CubieId, Cubie>,
    generated_size: u32,
    log: MoveLog,
}

impl Cube {
    /// Constructs an empty cube that has not been generated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the shell of an N×N×N cube, replacing any existing cubies, and
    /// empties the move log. `size` is raised to [`MIN_SIZE`] if it is
    /// smaller.
    ///
    /// Every cubie has scale `1/size` and the shell exactly fills a unit cube
    /// centered on the origin.
    pub fn generate(&mut self, size: u32, template: &str) {
        let size = size.max(MIN_SIZE);
        self.clear();

        let scale = 1.0 / size as f32;
        let offset = Vector3::new(1.0, 1.0, 1.0) * (scale * 0.5 - 0.5);
        let last = size - 1;
        for (z, y, x) in iproduct!(0..size, 0..size, 0..size) {
            let is_interior = [x, y, z].iter().all(|&c| 0 < c && c < last);
            if is_interior {
                continue;
            }

            let position = Vector3::new(x as f32, y as f32, z as f32) * scale + offset;
            let cubie = Cubie {
                template: template.to_owned(),
                position,
                orientation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
                scale,
                home: position,
                grouped: false,
            };
            if let Err(e) = self.cubies.push(cubie) {
                log::error!("error generating {size}x{size}x{size} cube: {e}");
                self.clear();
                return;
            }
        }

        self.generated_size = size;
        self.log.clear();
        log::debug!(
            "generated {size}x{size}x{size} cube with {} cubies",
            self.cubies.len(),
        );
    }

    /// Destroys every cubie immediately. The generated size and the move log
    /// are left as-is.
    pub fn clear(&mut self) {
        self.cubies.clear();
    }

    /// Returns the edge length from the last call to [`Cube::generate()`], or
    /// `0` if the cube has never been generated.
    pub fn generated_size(&self) -> u32 {
        self.generated_size
    }
    /// Returns the distance between the centers of adjacent cubies.
    pub fn spacing(&self) -> f32 {
        match self.generated_size {
            0 => 0.0,
            n => 1.0 / n as f32,
        }
    }

    /// Returns the number of cubies.
    pub fn cubie_count(&self) -> usize {
        self.cubies.len()
    }
    /// Returns the cubie with the given ID.
    pub fn cubie(&self, id: CubieId) -> Result<&Cubie, IndexOutOfRange> {
        self.cubies.get(id)
    }
    pub(crate) fn cubie_mut(&mut self, id: CubieId) -> Result<&mut Cubie, IndexOutOfRange> {
        self.cubies.get_mut(id)
    }
    /// Returns an iterator over all cubies and their IDs.
    pub fn cubies(&self) -> impl DoubleEndedIterator<Item = (CubieId, &Cubie)> {
        self.cubies.iter()
    }
    /// Returns the IDs of cubies currently part of a rotating layer.
    pub fn grouped_cubies(&self) -> impl '_ + DoubleEndedIterator<Item = CubieId> {
        self.cubies.iter_filter(|_, cubie| cubie.is_grouped())
    }

    /// Returns the log of completed moves.
    pub fn log(&self) -> &MoveLog {
        &self.log
    }
    /// Returns the log of completed moves.
    pub fn log_mut(&mut self) -> &mut MoveLog {
        &mut self.log
    }

    /// Returns whether every cubie is back where it was generated, within
    /// `tolerance`. A cube with no cubies counts as solved.
    pub fn is_solved(&self, tolerance: f32) -> bool {
        self.cubies.iter_values().all(|c| c.is_home(tolerance))
    }

    /// Returns the expected number of cubies on the shell of a cube with edge
    /// length `size`.
    pub fn shell_count(size: u32) -> usize {
        let n = size as usize;
        let inner = n.saturating_sub(2);
        n.pow(3) - inner.pow(3)
    }
}
