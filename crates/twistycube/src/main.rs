//! Animated N×N×N twisty cube simulator.

mod cli;
mod summary;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    color_eyre::install().expect("error initializing panic handler");

    // Initialize logging.
    env_logger::builder().init();

    cli::exec(args)
}
