use std::fs;
use std::io;
use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use rand::{Rng, SeedableRng, thread_rng};
use rand_pcg::Pcg64;
use coup_engine::{playout, Setup};

/// Plays a random game and prints its journal as csv.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of seats, ignored when a setup file is given
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Seed for dealing roles and picking moves
    #[arg(short, long)]
    seed: Option<u64>,

    /// Json setup file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 1000)]
    max_steps: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut setup = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Setup::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Setup::seats(args.players),
    };

    let seed = args.seed.or(setup.seed).unwrap_or_else(|| thread_rng().gen());
    setup.seed = Some(seed);

    let mut game = setup.build()?;
    let mut rng = Pcg64::seed_from_u64(seed);
    let winner = playout(&mut game, &mut rng, args.max_steps)?;

    let mut writer = csv::Writer::from_writer(io::stdout());
    for entry in game.history() {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    match winner {
        Some(winner) => log::info!("seed {seed}: {} wins after {} turns", game.players()[winner].name(), game.turns()),
        None => log::info!("seed {seed}: no winner after {} steps", args.max_steps),
    }

    Ok(())
}
