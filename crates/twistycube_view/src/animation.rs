use twistycube_core::{Cube, Move, Pivot, QUARTER_TURN_DEGREES};
use web_time::Duration;

use crate::CubeEvent;

/// Quarter turn of one layer in progress.
///
/// Each frame adds `axis * 90° / duration * delta` to the pivot rotation.
/// Once the elapsed time reaches the duration, the rotation snaps to exactly
/// 90 degrees so that drift does not build up over many moves.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationAnimation {
    pivot: Pivot,
    /// Whether completing the rotation removes a move from the log instead of
    /// adding one.
    is_undo: bool,
    /// Duration of the whole rotation, in seconds.
    duration: f32,
    /// Time elapsed so far, in seconds.
    elapsed: f32,
}

impl RotationAnimation {
    /// Groups the layer turned by `mv` and begins rotating it.
    ///
    /// If `duration` is not positive and finite, the rotation is done as soon
    /// as it starts; see [`RotationAnimation::is_done()`].
    pub fn start(cube: &mut Cube, mv: Move, duration: f32, is_undo: bool) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            pivot: Pivot::group(cube, mv),
            is_undo,
            duration,
            elapsed: 0.0,
        }
    }

    /// Returns the move being animated.
    pub fn mv(&self) -> Move {
        self.pivot.mv()
    }
    /// Returns whether this rotation undoes the last move in the log.
    pub fn is_undo(&self) -> bool {
        self.is_undo
    }
    /// Returns the pivot holding the rotating layer.
    pub fn pivot(&self) -> &Pivot {
        &self.pivot
    }
    /// Returns the progress of the rotation, from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
    /// Returns whether the rotation has reached its full duration.
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Steps the animation forward. Returns whether the rotation is done and
    /// should be [completed](Self::complete).
    pub fn proceed(&mut self, cube: &mut Cube, delta: Duration) -> bool {
        if !self.is_done() {
            let dt = delta.as_secs_f32();
            let speed = self.mv().axis().vector() * (QUARTER_TURN_DEGREES / self.duration);
            self.pivot.add_rotation(cube, speed * dt);
            self.elapsed += dt;
        }
        self.is_done()
    }

    /// Snaps the layer to its final orientation, releases it, and updates the
    /// move log.
    pub fn complete(mut self, cube: &mut Cube) -> CubeEvent {
        let mv = self.mv();
        self.pivot
            .set_rotation(cube, mv.axis().vector() * QUARTER_TURN_DEGREES);
        self.pivot.ungroup(cube);

        if self.is_undo {
            match cube.log_mut().pop_undone(mv) {
                Some(undone) => {
                    log::trace!("undid {undone}");
                    CubeEvent::MoveUndone(undone)
                }
                None => {
                    // Keep the log consistent with the cubies.
                    log::warn!("undo move {mv} does not match the end of the move log");
                    cube.log_mut().push(mv);
                    CubeEvent::MoveApplied(mv)
                }
            }
        } else {
            log::trace!("applied {mv}");
            cube.log_mut().push(mv);
            CubeEvent::MoveApplied(mv)
        }
    }

    /// Returns the layer to where it was before the rotation started and
    /// releases it, without touching the move log.
    pub fn cancel(self, cube: &mut Cube) {
        log::debug!("canceled {} at {:.0}%", self.mv(), self.progress() * 100.0);
        self.pivot.revert(cube);
    }
}
