//! Space Cannon entry point
//!
//! Headless driver: plays sessions with the autopilot, logs what happens and
//! keeps the leaderboard and settings in a data directory.
//!
//! Usage:
//!   RUST_LOG=info cargo run -- --games 3 --seed 42 --data-dir ./save

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use space_cannon::consts::SIM_DT;
use space_cannon::persistence::{FileStorage, MemoryStorage, Storage};
use space_cannon::runner::{GameLoop, SessionResult};
use space_cannon::tuning::Tuning;
use space_cannon::ui::Hud;

#[derive(Parser, Debug)]
#[command(about = "Play Space Cannon sessions with the autopilot", version)]
struct Args {
    /// Run seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of sessions to play
    #[arg(long, default_value_t = 1)]
    games: u32,
    /// Give up on a session after this many simulated seconds
    #[arg(long, default_value_t = 600.0)]
    max_seconds: f32,
    /// Where high scores and settings live (in-memory when omitted)
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// JSON file overriding gameplay constants
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    sessions: &'a [SessionResult],
    top_score: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Space Cannon (headless) starting...");

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    let storage: Box<dyn Storage> = match &args.data_dir {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    };

    let mut game = GameLoop::new(seed, tuning, storage);
    game.set_idle_mode(true);
    let max_ticks = (args.max_seconds / SIM_DT).ceil() as u64;

    for n in 1..=args.games {
        game.play();
        game.update(SIM_DT);
        let start = game.scene.time_ticks;

        while !game.scene.game_over {
            game.update(SIM_DT);
            if game.scene.time_ticks - start >= max_ticks {
                log::warn!("Session {} hit the {}s limit, ending it", n, args.max_seconds);
                game.scene.game_over();
                game.update(SIM_DT);
            }
        }

        if !args.json {
            let hud = Hud::from_scene(&game.scene);
            if let Some([score, top]) = hud.menu_lines {
                println!("Game {n}: {score}  {top}");
            }
        }
    }

    let summary = Summary {
        seed,
        sessions: game.results(),
        top_score: game.high_scores.top_score(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Seed {}: {} games, top score {}",
            summary.seed,
            summary.sessions.len(),
            summary.top_score
        );
    }
    Ok(())
}
