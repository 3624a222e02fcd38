use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use strum::{EnumCount, IntoEnumIterator};
use twistycube_core::{Axis, Cube, Move};
use twistycube_prefs::CubePreferences;
use web_time::{Duration, Instant};

use crate::{CubeEvent, EngineState, RotationAnimation};

const ASSUMED_FPS: f32 = 120.0;

/// Cube simulation, which manages the cube, the rotation animation, undo, and
/// shuffling.
///
/// Everything advances through [`CubeSimulation::step()`], which should be
/// called once per frame. Only one rotation runs at a time. Commands issued
/// while the simulation is busy are dropped, except [`CubeSimulation::reset()`]
/// and [`CubeSimulation::clear()`], which cancel whatever is running.
#[derive(Debug)]
pub struct CubeSimulation {
    cube: Cube,
    prefs: CubePreferences,
    state: EngineState,

    /// Whether turns are animated. When `false`, every turn is instant.
    interactive: bool,
    /// Source of random moves for shuffling.
    rng: ChaCha12Rng,

    /// Events not yet taken by [`CubeSimulation::take_events()`].
    events: Vec<CubeEvent>,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
}

impl CubeSimulation {
    /// Constructs a new simulation with an empty, ungenerated cube.
    pub fn new(prefs: CubePreferences) -> Self {
        Self::with_seed(prefs, rand::rng().random())
    }
    /// Constructs a new simulation with an empty, ungenerated cube, whose
    /// shuffles are determined by `seed`.
    pub fn with_seed(mut prefs: CubePreferences, seed: u64) -> Self {
        prefs.validate();
        Self {
            cube: Cube::new(),
            prefs,
            state: EngineState::Idle,

            interactive: true,
            rng: ChaCha12Rng::seed_from_u64(seed),

            events: vec![],

            last_frame_time: None,
        }
    }

    /// Returns the cube.
    pub fn cube(&self) -> &Cube {
        &self.cube
    }
    /// Returns the current engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }
    /// Returns whether nothing is running.
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    /// Returns the preferences.
    pub fn prefs(&self) -> &CubePreferences {
        &self.prefs
    }
    /// Replaces the preferences, clamping them into range. The new size takes
    /// effect the next time the cube is generated.
    pub fn set_prefs(&mut self, mut prefs: CubePreferences) {
        prefs.validate();
        self.prefs = prefs;
    }

    /// Returns whether turns are animated.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
    /// Sets whether turns are animated. When `false`, turns complete
    /// instantly regardless of the configured duration.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }
    /// Returns the duration of a turn, accounting for interactivity.
    fn turn_duration(&self) -> f32 {
        if self.interactive {
            self.prefs.turn_duration
        } else {
            0.0
        }
    }

    /// Removes and returns all events since the last call.
    pub fn take_events(&mut self) -> Vec<CubeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuilds the cube from the preferences and empties the move log.
    ///
    /// Does nothing if the simulation is busy or no cubie template is
    /// configured.
    pub fn generate(&mut self) {
        if !self.is_busy("generate") {
            self.regenerate();
        }
    }
    /// Returns whether the cube was regenerated.
    fn regenerate(&mut self) -> bool {
        let Some(template) = self.prefs.template_name() else {
            log::warn!("no cubie template; not generating cube");
            return false;
        };
        self.cube.generate(self.prefs.size, template);
        self.events.push(CubeEvent::Generated {
            size: self.cube.generated_size(),
        });
        true
    }

    /// Cancels anything running and destroys every cubie. The move log is
    /// left as-is.
    pub fn clear(&mut self) {
        self.cancel();
        self.cube.clear();
        self.events.push(CubeEvent::Cleared);
    }

    /// Cancels anything running and regenerates the cube.
    pub fn reset(&mut self) {
        log::debug!("resetting cube");
        self.cancel();
        self.regenerate();
        self.events.push(CubeEvent::Reset);
    }

    fn cancel(&mut self) {
        if let Some(anim) = std::mem::take(&mut self.state).into_rotation() {
            anim.cancel(&mut self.cube);
        }
        self.last_frame_time = None;
    }

    /// Rotates `layer` a quarter turn around `axis`, or the opposite direction
    /// if `reversed` is `true`.
    pub fn rotate(&mut self, axis: Axis, layer: u32, reversed: bool) {
        let mv = Move::new(axis, layer);
        self.apply_move(if reversed { mv.rev() } else { mv });
    }

    /// Starts animating a move. When it completes, it is added to the move
    /// log.
    ///
    /// Does nothing if the simulation is busy or the move does not fit the
    /// cube.
    pub fn apply_move(&mut self, mv: Move) {
        if self.is_busy("move") {
            return;
        }
        if !mv.fits_size(self.cube.generated_size()) {
            log::debug!(
                "ignoring move {mv} on cube of size {}",
                self.cube.generated_size(),
            );
            return;
        }
        self.state = match self.begin_rotation(mv, false, self.turn_duration()) {
            Some(anim) => EngineState::Rotating(anim),
            None => EngineState::Idle,
        };
    }

    /// Starts undoing the last move in the log.
    ///
    /// Does nothing if the simulation is busy or the log is empty.
    pub fn undo_last(&mut self) {
        let Some(last) = self.cube.log().last() else {
            return;
        };
        if self.is_busy("undo") {
            return;
        }
        self.state = match self.begin_rotation(last.rev(), true, self.turn_duration()) {
            Some(anim) => EngineState::Undoing {
                all: false,
                rotation: Some(anim),
            },
            None => {
                self.events.push(CubeEvent::UndoFinished);
                EngineState::Idle
            }
        };
    }

    /// Starts undoing every move in the log, most recent first, one at a time.
    ///
    /// Does nothing if the simulation is busy or the log is empty.
    pub fn undo_all(&mut self) {
        if self.cube.log().is_empty() || self.is_busy("undo all") {
            return;
        }
        self.state = EngineState::Undoing {
            all: true,
            rotation: None,
        };
        self.advance_sequence();
    }

    /// Regenerates the cube and then applies `steps` random instant moves,
    /// one per frame. The moves are logged like any other, so they can be
    /// undone.
    ///
    /// Does nothing if the simulation is busy or no cubie template is
    /// configured.
    pub fn shuffle(&mut self, steps: u32) {
        if self.is_busy("shuffle") || !self.regenerate() {
            return;
        }
        log::debug!("shuffling with {steps} moves");
        self.state = EngineState::Shuffling { remaining: steps };
        self.advance_sequence();
    }

    /// Returns whether the simulation is busy, logging that `command` was
    /// dropped if so.
    fn is_busy(&self, command: &str) -> bool {
        let busy = !self.state.is_idle();
        if busy {
            log::debug!("ignoring {command} while {}", self.state.name());
        }
        busy
    }

    /// Groups the layer for `mv` and begins rotating it. If the rotation is
    /// instant, it is completed immediately and `None` is returned.
    fn begin_rotation(
        &mut self,
        mv: Move,
        is_undo: bool,
        duration: f32,
    ) -> Option<RotationAnimation> {
        let anim = RotationAnimation::start(&mut self.cube, mv, duration, is_undo);
        if anim.is_done() {
            self.complete_rotation(anim);
            None
        } else {
            Some(anim)
        }
    }
    fn complete_rotation(&mut self, anim: RotationAnimation) {
        let event = anim.complete(&mut self.cube);
        self.events.push(event);
    }

    /// Begins the next step of an undo or shuffle sequence, if no rotation is
    /// in flight. Returns to idle once the sequence is over.
    fn advance_sequence(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            EngineState::Undoing {
                all: true,
                rotation: None,
            } => match self.cube.log().last() {
                Some(last) => {
                    let rotation = self.begin_rotation(last.rev(), true, self.turn_duration());
                    if rotation.is_none() && self.cube.log().is_empty() {
                        self.events.push(CubeEvent::UndoFinished);
                        EngineState::Idle
                    } else {
                        EngineState::Undoing {
                            all: true,
                            rotation,
                        }
                    }
                }
                None => {
                    self.events.push(CubeEvent::UndoFinished);
                    EngineState::Idle
                }
            },
            EngineState::Undoing {
                all: false,
                rotation: None,
            } => {
                self.events.push(CubeEvent::UndoFinished);
                EngineState::Idle
            }

            EngineState::Shuffling { remaining } => {
                let remaining = match self.random_move() {
                    Some(mv) if remaining > 0 => {
                        // Shuffle moves are always instant.
                        self.begin_rotation(mv, false, 0.0);
                        remaining - 1
                    }
                    _ => 0,
                };
                if remaining == 0 {
                    self.events.push(CubeEvent::ShuffleFinished);
                    EngineState::Idle
                } else {
                    EngineState::Shuffling { remaining }
                }
            }

            other => other,
        };
    }

    /// Returns a uniformly random move for the current cube, or `None` if the
    /// cube has not been generated.
    fn random_move(&mut self) -> Option<Move> {
        let size = self.cube.generated_size();
        if size == 0 {
            return None;
        }
        let axis = Axis::iter().nth(self.rng.random_range(0..Axis::COUNT))?;
        let layer = self.rng.random_range(0..size);
        Some(Move::new(axis, layer))
    }

    /// Advances the simulation by one frame, using the given time delta
    /// between this frame and the last. Returns whether the cube must be
    /// redrawn.
    pub fn step(&mut self, delta: Duration) -> bool {
        let needs_redraw = !self.state.is_idle();

        self.state = match std::mem::take(&mut self.state) {
            EngineState::Rotating(mut anim) => {
                if anim.proceed(&mut self.cube, delta) {
                    self.complete_rotation(anim);
                    EngineState::Idle
                } else {
                    EngineState::Rotating(anim)
                }
            }
            EngineState::Undoing {
                all,
                rotation: Some(mut anim),
            } => {
                let done = anim.proceed(&mut self.cube, delta);
                let rotation = if done {
                    self.complete_rotation(anim);
                    None
                } else {
                    Some(anim)
                };
                EngineState::Undoing { all, rotation }
            }
            other => other,
        };

        if self.state.is_waiting_for_next_step() {
            self.advance_sequence();
        }

        needs_redraw
    }

    /// Advances the simulation using the wall-clock time since the last call.
    /// Returns whether the cube must be redrawn.
    pub fn step_realtime(&mut self) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.step(delta);

        if needs_redraw {
            self.last_frame_time = Some(now);
        } else {
            self.last_frame_time = None;
        }

        needs_redraw
    }

    /// Steps the simulation with a fixed frame time until it is idle. Returns
    /// the number of frames stepped.
    ///
    /// If `frame` is zero, an assumed frame rate is used instead.
    pub fn finish(&mut self, frame: Duration) -> usize {
        let frame = if frame.is_zero() {
            Duration::from_secs_f32(1.0 / ASSUMED_FPS)
        } else {
            frame
        };
        let mut frames = 0;
        while !self.is_idle() {
            self.step(frame);
            frames += 1;
        }
        frames
    }
}
