#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line driver that plays a scripted Quiz Rush session.
//!
//! The driver wires the authoritative session to the flee, hazard, and
//! pickup systems in a fixed-rate loop, stands in for the quiz and
//! power-up collaborators with deterministic scripts, and prints the
//! final summary as TOML.

mod script;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use quizrush_core::{
    Command as SessionCommand, Event, InterruptKind, SessionConfig, SessionPhase, SessionSummary,
};
use quizrush_session::{apply, query, Session};
use quizrush_system_flee::Flee;
use quizrush_system_hazards::HazardScheduler;
use quizrush_system_pickups::PickupScheduler;

use script::{plan_step, ScriptedChooser, ScriptedQuiz};

/// Stream labels xor-ed into the master seed so each scheduler draws from
/// its own deterministic RNG stream.
const HAZARD_STREAM: u64 = 0x4841_5a41_5244_0001;
const PICKUP_STREAM: u64 = 0x5049_434b_5550_0002;

#[derive(Debug, Parser)]
#[command(name = "quizrush", about = "Plays one scripted arena session headlessly")]
struct Args {
    /// Path to a TOML session configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the master RNG seed from the configuration.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated milliseconds advanced per tick.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
    /// Tick budget before the run is abandoned as stuck.
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,
    /// Print every broadcast event instead of only the summary.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }

    let summary = run(config, Duration::from_millis(args.tick_ms), args.max_ticks, args.verbose)?;
    let rendered = toml::to_string(&summary).context("rendering session summary")?;
    print!("{rendered}");
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading configuration from {}", path.display()))?;
    let config: SessionConfig = toml::from_str(&text)
        .with_context(|| format!("parsing configuration from {}", path.display()))?;
    Ok(config)
}

fn run(config: SessionConfig, tick: Duration, max_ticks: u64, verbose: bool) -> Result<SessionSummary> {
    let mut session = Session::new(config.clone()).context("starting session")?;
    let mut flee = Flee::new(config.flee_interval());
    let mut hazards = HazardScheduler::new(
        config.hazard_interval(),
        config.hazard_lead(),
        config.rng_seed ^ HAZARD_STREAM,
    );
    let mut pickups = PickupScheduler::new(config.pickup_interval(), config.rng_seed ^ PICKUP_STREAM);
    let mut quiz = ScriptedQuiz::default();
    let mut chooser = ScriptedChooser::default();

    let mut events: Vec<Event> = Vec::new();
    let mut commands = Vec::new();

    for _ in 0..max_ticks {
        events.clear();
        apply(&mut session, SessionCommand::Tick { dt: tick }, &mut events);

        let player = query::player_position(&session);
        let enemies = query::enemy_view(&session);
        let grid = *query::grid(&session);
        commands.clear();
        flee.handle(&events, player, &enemies, &grid, &mut commands);
        hazards.handle(
            &events,
            query::intensity_tier(&session),
            &grid,
            |tile| query::is_tile_clear(&session, tile),
            &mut commands,
        );
        pickups.handle(
            &events,
            &grid,
            |tile| query::is_tile_clear(&session, tile),
            &mut commands,
        );
        for command in commands.drain(..) {
            apply(&mut session, command, &mut events);
        }

        match query::pending_interrupt(&session) {
            Some(InterruptKind::Quiz) => {
                let resolution = quiz.answer(
                    query::intensity_tier(&session),
                    &query::excluded_questions(&session),
                );
                apply(
                    &mut session,
                    SessionCommand::ResolveQuiz { resolution },
                    &mut events,
                );
            }
            Some(InterruptKind::PowerUpChoice) => {
                let choice = chooser.choose(&query::offerable_effects(&session));
                apply(
                    &mut session,
                    SessionCommand::ResolvePowerUp { choice },
                    &mut events,
                );
            }
            None => {
                if query::phase(&session) == SessionPhase::Running {
                    if let Some(direction) = plan_step(&session) {
                        apply(
                            &mut session,
                            SessionCommand::RequestMove { direction },
                            &mut events,
                        );
                    }
                }
            }
        }

        if verbose {
            for event in &events {
                println!("{event:?}");
            }
        }

        if query::phase(&session) == SessionPhase::Ended {
            return Ok(query::summary(&session));
        }
    }

    bail!("session did not end within {max_ticks} ticks")
}
