//! headless-runner: drive a RAMPART game without a renderer.
//!
//! Usage:
//!   headless-runner --ticks 3600 --autoplay --seed 7
//!   headless-runner --config rampart.toml --realtime --json

mod autoplay;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rampart_app::control;
use rampart_app::state::AppState;
use rampart_core::config::GameConfig;
use rampart_core::constants::TICK_RATE;
use rampart_core::enums::GamePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::{SimConfig, SimulationEngine};

use autoplay::{AutoPlayer, DECISION_INTERVAL};

#[derive(Parser, Debug)]
#[command(name = "headless-runner")]
#[command(about = "Run a RAMPART simulation without a renderer")]
struct Args {
    /// TOML game config (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of frames to run
    #[arg(long, default_value = "3600")]
    ticks: u64,

    /// Frames per second; each frame advances the simulation by 1/fps seconds
    #[arg(long, default_value_t = TICK_RATE)]
    fps: u32,

    /// Seed for the auto-player
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Let the seeded auto-player place towers and start waves
    #[arg(long)]
    autoplay: bool,

    /// Run on the frame-driver thread in wall-clock time instead of stepping
    #[arg(long)]
    realtime: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// Event counts over a run.
#[derive(Debug, Default, Serialize)]
struct Tally {
    waves_started: u32,
    spawned: u32,
    killed: u32,
    leaked: u32,
    towers_placed: u32,
    towers_upgraded: u32,
    shots: u32,
    rejected: u32,
}

impl Tally {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::WaveStarted { .. } => self.waves_started += 1,
                GameEvent::EnemySpawned { .. } => self.spawned += 1,
                GameEvent::EnemyKilled { .. } => self.killed += 1,
                GameEvent::EnemyLeaked { .. } => self.leaked += 1,
                GameEvent::TowerPlaced { .. } => self.towers_placed += 1,
                GameEvent::TowerUpgraded { .. } => self.towers_upgraded += 1,
                GameEvent::ProjectileFired { .. } => self.shots += 1,
                GameEvent::CommandRejected { .. } => self.rejected += 1,
                GameEvent::GameOver { .. } | GameEvent::Victory { .. } | GameEvent::GameReset => {}
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    mode: &'static str,
    ticks: u64,
    elapsed_secs: f64,
    phase: GamePhase,
    wave: u32,
    money: u32,
    lives: u32,
    towers: usize,
    enemies: usize,
    tally: Tally,
}

impl RunSummary {
    fn new(mode: &'static str, snapshot: &GameStateSnapshot, tally: Tally) -> Self {
        Self {
            mode,
            ticks: snapshot.time.tick,
            elapsed_secs: snapshot.time.elapsed_secs,
            phase: snapshot.phase,
            wave: snapshot.economy.wave,
            money: snapshot.economy.money,
            lives: snapshot.economy.lives,
            towers: snapshot.towers.len(),
            enemies: snapshot.enemies.len(),
            tally,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let game = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let config = SimConfig {
        game,
        ..Default::default()
    };

    let summary = if args.realtime {
        run_realtime(&args, config)?
    } else {
        run_stepped(&args, config)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        tracing::info!(
            mode = summary.mode,
            ticks = summary.ticks,
            elapsed_secs = summary.elapsed_secs,
            phase = ?summary.phase,
            wave = summary.wave,
            money = summary.money,
            lives = summary.lives,
            towers = summary.towers,
            "run finished"
        );
        tracing::info!(tally = ?summary.tally, "event totals");
    }

    Ok(())
}

/// Step the engine directly with a fixed Δ. Deterministic for a given seed.
fn run_stepped(args: &Args, config: SimConfig) -> Result<RunSummary> {
    let mut player = args
        .autoplay
        .then(|| AutoPlayer::new(args.seed, &config.game));
    let mut engine = SimulationEngine::new(config).context("invalid game config")?;
    let dt = 1.0 / f64::from(args.fps.max(1));
    let mut tally = Tally::default();

    let mut snapshot = engine.tick(0.0);
    for frame in 0..args.ticks {
        if let Some(player) = player.as_mut() {
            if frame % DECISION_INTERVAL == 0 {
                engine.queue_commands(player.decide(&snapshot));
            }
        }

        snapshot = engine.tick(dt);
        tally.record(&snapshot.events);
        if snapshot.phase.is_terminal() {
            break;
        }
    }

    Ok(RunSummary::new("stepped", &snapshot, tally))
}

/// Run the frame driver in wall-clock time, polling its snapshots.
///
/// Events are tallied from the polled snapshots only, so counts are a sample.
fn run_realtime(args: &Args, config: SimConfig) -> Result<RunSummary> {
    let mut player = args
        .autoplay
        .then(|| AutoPlayer::new(args.seed, &config.game));
    let fps = args.fps.max(1);
    let frame = Duration::from_secs(1) / fps;
    let state = AppState::new();
    control::start_simulation(&state, config, fps).context("failed to start game loop")?;

    let mut tally = Tally::default();
    let mut last_tick = None;
    let mut last_snapshot = None;
    for frame_index in 0..args.ticks {
        std::thread::sleep(frame);
        let Some(snapshot) = control::get_snapshot(&state)? else {
            continue;
        };
        if last_tick != Some(snapshot.time.tick) {
            last_tick = Some(snapshot.time.tick);
            tally.record(&snapshot.events);
        }

        if let Some(player) = player.as_mut() {
            if frame_index % DECISION_INTERVAL == 0 {
                for command in player.decide(&snapshot) {
                    control::send_command(&state, command)?;
                }
            }
        }

        let done = snapshot.phase.is_terminal();
        last_snapshot = Some(snapshot);
        if done {
            break;
        }
    }

    control::stop_simulation(&state)?;
    let snapshot = match last_snapshot {
        Some(snapshot) => snapshot,
        None => control::get_snapshot(&state)?.unwrap_or_default(),
    };
    Ok(RunSummary::new("realtime", &snapshot, tally))
}
