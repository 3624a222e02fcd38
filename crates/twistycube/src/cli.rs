use std::path::PathBuf;

use eyre::{Context, Result, bail, eyre};
use serde::Serialize;
use twistycube_core::parse_moves;
use twistycube_prefs::CubePreferences;
use twistycube_view::{CubeEvent, CubeSimulation};
use web_time::Duration;

use crate::summary::CubeSummary;

/// Twisty cube command-line interface
///
/// Each subcommand builds a fresh cube from the preferences, runs the
/// simulation, and prints the resulting state as JSON.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,

    /// YAML preferences file merged over the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,
    /// Edge length of the cube, in cubies. Overrides the preferences.
    #[arg(long, global = true)]
    pub size: Option<u32>,
    /// Include every cubie's transform in the output.
    #[arg(long, global = true)]
    pub cubies: bool,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Generate the cube and print its state.
    Generate,
    /// Shuffle the cube and print its state.
    Shuffle {
        /// Number of random moves. Defaults to `shuffle_steps` from the
        /// preferences.
        #[arg(short = 'n', long)]
        steps: Option<u32>,
        /// Seed for the random moves.
        #[arg(long)]
        seed: Option<u64>,
        /// Undo the whole shuffle afterward.
        #[arg(long)]
        undo_all: bool,
    },
    /// Animate moves given in notation (such as `+x0 -z2`) and print the
    /// cube's state.
    Play {
        /// Moves to apply, in order. Options must come before the moves.
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,
        /// Number of moves to undo afterward, one at a time.
        #[arg(long, default_value_t = 0)]
        undo: usize,
        /// Undo every move afterward.
        #[arg(long)]
        undo_all: bool,
        /// Duration of each turn, in seconds. Defaults to `turn_duration` from
        /// the preferences.
        #[arg(long)]
        duration: Option<f32>,
        /// Frames per second used to step the animation.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// Also save the preferences to this file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let mut prefs = CubePreferences::try_load(args.prefs.as_deref())?;
    if let Some(size) = args.size {
        prefs.size = size;
    }
    prefs.validate();

    match args.subcommand {
        Subcommand::Generate => {
            let mut sim = CubeSimulation::new(prefs);
            sim.generate();
            log_events(&mut sim);
            write_json_output(&CubeSummary::new(sim.cube(), args.cubies))
        }

        Subcommand::Shuffle {
            steps,
            seed,
            undo_all,
        } => {
            let steps = steps.unwrap_or(prefs.shuffle_steps);
            let mut sim = match seed {
                Some(seed) => CubeSimulation::with_seed(prefs, seed),
                None => CubeSimulation::new(prefs),
            };
            sim.set_interactive(false);

            sim.shuffle(steps);
            sim.finish(Duration::ZERO);
            if undo_all {
                sim.undo_all();
                sim.finish(Duration::ZERO);
            }
            log_events(&mut sim);
            write_json_output(&CubeSummary::new(sim.cube(), args.cubies))
        }

        Subcommand::Play {
            moves,
            undo,
            undo_all,
            duration,
            fps,
        } => {
            let frame = frame_duration(fps)?;
            let moves = parse_moves(&moves.join(" ")).wrap_err("error parsing moves")?;

            if let Some(duration) = duration {
                prefs.turn_duration = duration;
            }
            let mut sim = CubeSimulation::new(prefs);
            sim.generate();
            let size = sim.cube().generated_size();
            if let Some(mv) = moves.iter().find(|mv| !mv.fits_size(size)) {
                return Err(eyre!("move {mv} does not fit a cube of size {size}"));
            }

            let mut frames = 0;
            for mv in moves {
                sim.apply_move(mv);
                frames += sim.finish(frame);
            }
            for _ in 0..undo {
                sim.undo_last();
                frames += sim.finish(frame);
            }
            if undo_all {
                sim.undo_all();
                frames += sim.finish(frame);
            }
            log::info!("played for {frames} frames at {fps} fps");

            log_events(&mut sim);
            write_json_output(&CubeSummary::new(sim.cube(), args.cubies))
        }

        Subcommand::Prefs { save } => {
            print!("{}", prefs.to_yaml()?);
            if let Some(path) = save {
                prefs.save(&path)?;
                log::info!("saved preferences to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Returns the time between frames at `fps` frames per second.
fn frame_duration(fps: f32) -> Result<Duration> {
    if !(fps > 0.0 && fps.is_finite()) {
        bail!("frame rate must be positive, got {fps}");
    }
    Duration::try_from_secs_f32(1.0 / fps)
        .map_err(|e| eyre!("frame rate {fps} is out of range: {e}"))
}

fn log_events(sim: &mut CubeSimulation) {
    for event in sim.take_events() {
        match event {
            CubeEvent::MoveApplied(mv) => log::debug!("applied {mv}"),
            CubeEvent::MoveUndone(mv) => log::debug!("undid {mv}"),
            other => log::debug!("{other:?}"),
        }
    }
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_play_accepts_negative_moves() {
        let args =
            Args::try_parse_from(["twistycube", "play", "--undo", "1", "-z2", "+x0"]).unwrap();
        let Subcommand::Play { moves, undo, .. } = args.subcommand else {
            panic!("expected play subcommand");
        };
        assert_eq!(vec!["-z2", "+x0"], moves);
        assert_eq!(1, undo);
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(Duration::from_millis(250), frame_duration(4.0).unwrap());
        for fps in [0.0, -30.0, f32::NAN, f32::INFINITY, 1e-39] {
            assert!(frame_duration(fps).is_err(), "fps = {fps}");
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["twistycube", "generate", "--size", "5", "--cubies"]).unwrap();
        assert_eq!(Some(5), args.size);
        assert!(args.cubies);
    }
}
