//! Self-play driver.
//!
//! Plays the engine against itself from the variant start and prints the
//! game. Black can be handed to a random mover to sanity-check the search.

use ability_core::Color;
use ability_engine::{Game, GameStatus};
use ability_search::{random_move, spawn_search, SearchConfig};
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ability chess self-play.
#[derive(Parser)]
#[command(name = "ability-selfplay")]
#[command(about = "Plays ability chess against itself")]
struct Args {
    /// Path to the search configuration
    #[arg(long, default_value = "search.toml")]
    config: PathBuf,

    /// Maximum number of moves to play
    #[arg(long, default_value = "80")]
    plies: u32,

    /// Search depth, overriding the configuration
    #[arg(long)]
    depth: Option<u8>,

    /// Seed for move shuffling, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Let Black play uniformly random moves
    #[arg(long)]
    random_black: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut config = SearchConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    tracing::info!(?config, plies = args.plies, "starting self-play");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new();

    for _ in 0..args.plies {
        if game.status().is_over() {
            break;
        }

        if args.random_black && game.state().side_to_move() == Color::Black {
            let Some(m) = random_move(&game.legal_moves(), &mut rng) else {
                break;
            };
            game.play_move(m)?;
            continue;
        }

        let Some(result) = spawn_search(&game, &config).join() else {
            break;
        };
        tracing::info!(
            mv = %result.outcome.best,
            score = result.outcome.score,
            nodes = result.outcome.nodes,
            "engine move"
        );
        result.commit(&mut game)?;
    }

    for (i, pair) in game.history().chunks(2).enumerate() {
        let white = &pair[0].notation;
        match pair.get(1) {
            Some(black) => println!("{}. {} {}", i + 1, white, black.notation),
            None => println!("{}. {}", i + 1, white),
        }
    }
    println!("{}", game.state().to_fen());
    match game.status() {
        GameStatus::Ongoing => println!("Result: unfinished"),
        GameStatus::Checkmate { winner } => println!("Result: {} wins by checkmate", winner),
        GameStatus::Stalemate => println!("Result: stalemate"),
    }

    Ok(())
}
