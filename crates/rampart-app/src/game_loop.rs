//! Game loop thread: drives the simulation engine at a fixed frame cadence.
//!
//! The engine is built on the caller's thread so configuration errors reach
//! the caller, then moved into the loop thread.
//! Commands arrive via `mpsc` channel. Each frame ticks the engine with the
//! measured wall-clock time since the previous frame and stores the snapshot
//! in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rampart_core::constants::{MAX_FRAME_DT, TICK_RATE};
use rampart_core::state::GameStateSnapshot;
use rampart_sim::engine::{SimConfig, SimulationEngine};

use crate::error::AppError;
use crate::state::{GameLoopCommand, GameLoopHandle};

/// Nominal frame duration at the default rate.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Frame pacing: measures Δ between frames and schedules the next deadline.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    last_frame: Instant,
    next_deadline: Instant,
}

impl FrameClock {
    pub fn new(frame: Duration, now: Instant) -> Self {
        Self {
            frame,
            last_frame: now,
            next_deadline: now,
        }
    }

    /// Frame duration for `fps` frames per second (at least 1).
    pub fn for_rate(fps: u32, now: Instant) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1), now)
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Seconds since the previous frame, clamped to `MAX_FRAME_DT`.
    pub fn frame_delta(&mut self, now: Instant) -> f64 {
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        dt.min(MAX_FRAME_DT)
    }

    /// Advance the deadline by one frame and return how long to sleep.
    /// A deadline more than two frames in the past is reset to `now`.
    pub fn schedule_next(&mut self, now: Instant) -> Option<Duration> {
        self.next_deadline += self.frame;
        if self.next_deadline > now {
            return Some(self.next_deadline - now);
        }
        if now - self.next_deadline > self.frame * 2 {
            // Too far behind, reset to avoid catch-up spiral
            self.next_deadline = now;
        }
        None
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the handle holding the command sender and the join handle.
pub fn spawn_game_loop(
    config: SimConfig,
    fps: u32,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<GameLoopHandle, AppError> {
    let engine = SimulationEngine::new(config)?;
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("rampart-game-loop".into())
        .spawn(move || {
            let clock = FrameClock::for_rate(fps, Instant::now());
            run_game_loop(engine, command_rx, &latest_snapshot, clock);
        })
        .map_err(AppError::Spawn)?;

    Ok(GameLoopHandle { command_tx, thread })
}

/// Drain every queued message into the engine.
/// Returns false once the loop should stop.
fn drain_commands(
    engine: &mut SimulationEngine,
    command_rx: &mpsc::Receiver<GameLoopCommand>,
) -> bool {
    loop {
        match command_rx.try_recv() {
            Ok(GameLoopCommand::Player(command)) => engine.queue_command(command),
            Ok(GameLoopCommand::PointerDown { x, y }) => engine.on_pointer_down(x, y),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    mut clock: FrameClock,
) {
    tracing::info!(frame_ms = clock.frame().as_secs_f64() * 1000.0, "game loop started");

    while drain_commands(&mut engine, &command_rx) {
        let dt = clock.frame_delta(Instant::now());
        let snapshot = engine.tick(dt);

        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if let Some(wait) = clock.schedule_next(Instant::now()) {
            std::thread::sleep(wait);
        }
    }

    tracing::info!(tick = engine.time().tick, "game loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::commands::PlayerCommand;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartWave))
            .unwrap();
        tx.send(GameLoopCommand::PointerDown { x: 100.0, y: 220.0 })
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(
            commands,
            vec![
                GameLoopCommand::Player(PlayerCommand::StartWave),
                GameLoopCommand::PointerDown { x: 100.0, y: 220.0 },
                GameLoopCommand::Shutdown,
            ]
        );
    }

    #[test]
    fn test_drain_forwards_until_shutdown() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PointerDown { x: 100.0, y: 220.0 })
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::StartWave))
            .unwrap();

        assert!(drain_commands(&mut engine, &rx));
        let snap = engine.tick(0.01);
        assert_eq!(snap.towers.len(), 1);
        assert_eq!(snap.economy.wave, 1);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));

        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_frame_delta_is_measured_and_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::new(FRAME_DURATION, start);

        let dt = clock.frame_delta(start + Duration::from_millis(20));
        assert!((dt - 0.02).abs() < 1e-9);

        // A long stall (debugger, window drag) becomes one bounded step.
        let dt = clock.frame_delta(start + Duration::from_secs(5));
        assert_eq!(dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_schedule_sleeps_until_deadline() {
        let start = Instant::now();
        let frame = Duration::from_millis(10);
        let mut clock = FrameClock::new(frame, start);

        let wait = clock.schedule_next(start + Duration::from_millis(4));
        assert_eq!(wait, Some(Duration::from_millis(6)));
    }

    #[test]
    fn test_schedule_resets_when_far_behind() {
        let start = Instant::now();
        let frame = Duration::from_millis(10);
        let mut clock = FrameClock::new(frame, start);

        // Slightly late: no sleep, deadline kept so the loop catches up.
        assert_eq!(clock.schedule_next(start + Duration::from_millis(15)), None);
        assert_eq!(
            clock.schedule_next(start + Duration::from_millis(16)),
            Some(Duration::from_millis(4))
        );

        // Far behind: deadline jumps to now.
        let late = start + Duration::from_millis(200);
        assert_eq!(clock.schedule_next(late), None);
        assert_eq!(clock.schedule_next(late), Some(frame));
    }

    #[test]
    fn test_frame_rate_conversion() {
        let clock = FrameClock::for_rate(60, Instant::now());
        assert_eq!(clock.frame(), Duration::from_secs(1) / 60);
        assert_eq!(FRAME_DURATION.as_nanos(), 1_000_000_000u128 / 60);

        let clock = FrameClock::for_rate(0, Instant::now());
        assert_eq!(clock.frame(), Duration::from_secs(1));
    }
}
