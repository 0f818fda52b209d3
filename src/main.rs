//! Horizontal Pong entry point
//!
//! Headless shell around the simulation: paces ticks, supplies the human
//! paddle's input and answers the continue prompt between matches.

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;

use horizontal_pong::sim::ai;
use horizontal_pong::{Match, MatchConfig, MatchEvent, MoveIntent, Side, StateSnapshot};

#[derive(Debug, Parser)]
#[command(name = "horizontal-pong", version, about = "Player vs computer Pong, run headless")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON match config; unspecified fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the computer tracker drive the human paddle too
    #[arg(long)]
    autopilot: bool,

    /// Number of matches to play back to back
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// Give up on a match after this many ticks
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,

    /// Pace ticks at the configured tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,
}

struct MatchResult {
    winner: Side,
    player_score: u32,
    ai_score: u32,
    ticks: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Horizontal Pong (headless) starting...");

    let config = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if args.matches == 0 {
        bail!("--matches must be at least 1");
    }

    let seed = args.seed.unwrap_or_else(seed_from_clock);
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Match::new(config, seed);
    let mut results = Vec::with_capacity(args.matches as usize);

    for index in 1..=args.matches {
        if index > 1 {
            game.continue_after_match();
        }
        match play_match(&mut game, &args) {
            Some(result) => {
                println!(
                    "Match {index}: {} wins {} - {} after {} ticks",
                    result.winner.as_str(),
                    result.player_score,
                    result.ai_score,
                    result.ticks
                );
                results.push(result);
            }
            None => {
                println!(
                    "Match {index}: no winner after {} ticks ({} - {})",
                    args.max_ticks,
                    game.player_score(),
                    game.ai_score()
                );
                break;
            }
        }
    }

    let player_wins = results.iter().filter(|r| r.winner == Side::Player).count();
    println!(
        "Player {} - {} Computer (seed {seed})",
        player_wins,
        results.len() - player_wins
    );
    Ok(())
}

/// Run ticks until someone wins or the tick cap is hit
fn play_match(game: &mut Match, args: &Args) -> Option<MatchResult> {
    let tick_duration = game.config().tick_duration();
    let mut next_frame = Instant::now();

    for ticks in 1..=args.max_ticks {
        let intent = if args.autopilot {
            ai::decide(&game.ball, &game.bottom, game.config().field_width)
        } else {
            MoveIntent::Idle
        };

        let snapshot = game.advance_tick(intent);
        log_events(&snapshot);

        if let Some(winner) = snapshot.winner() {
            return Some(MatchResult {
                winner,
                player_score: snapshot.player_score,
                ai_score: snapshot.ai_score,
                ticks,
            });
        }

        if args.realtime {
            next_frame += tick_duration;
            let now = Instant::now();
            if next_frame > now {
                std::thread::sleep(next_frame - now);
            } else {
                // Fell behind; don't try to catch up
                next_frame = now;
            }
        }
    }
    None
}

fn log_events(snapshot: &StateSnapshot) {
    for event in &snapshot.events {
        match event {
            MatchEvent::PointScored { scorer } => log::info!(
                "{} scores ({} - {})",
                scorer.as_str(),
                snapshot.player_score,
                snapshot.ai_score
            ),
            MatchEvent::PaddleReturn { side } => log::debug!(
                "{} return, vertical speed {:.2}",
                side.as_str(),
                snapshot.ball_vel.y.abs()
            ),
            MatchEvent::MatchRestarted => log::info!("Continue pressed, new match"),
            MatchEvent::WallBounce | MatchEvent::MatchWon { .. } => {}
        }
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
