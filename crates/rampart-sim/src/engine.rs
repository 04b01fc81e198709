//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the economy and the wave
//! director, processes player commands at tick boundaries, runs all systems,
//! and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};

use rampart_core::commands::PlayerCommand;
use rampart_core::components::{Enemy, Tower};
use rampart_core::config::GameConfig;
use rampart_core::constants::{MAX_TIME_SCALE, MIN_TIME_SCALE};
use rampart_core::enums::GamePhase;
use rampart_core::errors::{ConfigError, Rejection};
use rampart_core::events::GameEvent;
use rampart_core::path::PathModel;
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::{Position, SimTime};

use crate::economy::Economy;
use crate::placement;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::wave_spawner::WaveDirector;
use crate::world_setup::{self, EntityIds};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub game: GameConfig,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            time_scale: 1.0,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: GameConfig,
    path: PathModel,
    world: World,
    ids: EntityIds,
    economy: Economy,
    director: WaveDirector,
    time: SimTime,
    phase: GamePhase,
    paused: bool,
    time_scale: f64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        let path = config.game.path_model()?;

        Ok(Self {
            economy: Economy::new(&config.game.economy),
            config: config.game,
            path,
            world: World::new(),
            ids: EntityIds::default(),
            director: WaveDirector::default(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            paused: false,
            time_scale: if config.time_scale.is_finite() {
                config.time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
            } else {
                1.0
            },
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Pointer click at screen coordinates: request a tower in that cell.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.queue_command(PlayerCommand::PlaceTower { x, y });
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        let dt = dt.max(0.0) * self.time_scale;
        // Systems run only when time passes.
        if self.is_running() && dt > 0.0 {
            self.time.advance(dt);
            self.run_systems(dt);
        }

        self.snapshot()
    }

    /// Whether systems run on the next tick.
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Active && !self.paused
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.economy.is_game_over()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn path(&self) -> &PathModel {
        &self.path
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of live enemies.
    pub fn enemy_count(&self) -> usize {
        self.world
            .query::<&Enemy>()
            .iter()
            .filter(|(_, enemy)| enemy.alive)
            .count()
    }

    pub fn tower_count(&self) -> usize {
        self.world.query::<&Tower>().iter().count()
    }

    /// Whether a tower could be built exactly at `point` right now.
    pub fn is_placement_valid(&self, point: &Position) -> bool {
        placement::is_placement_valid(
            point,
            &self.path,
            &placement::tower_positions(&self.world),
            self.economy.money(),
            &self.config,
        )
    }

    /// Build a snapshot of the current state, draining pending events.
    fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        let context = SnapshotContext {
            time: self.time,
            phase: self.phase,
            paused: self.paused,
            time_scale: self.time_scale,
            economy: self.economy.view(self.config.waves.max_waves),
            pending_spawns: self.director.pending().len() as u32,
        };
        systems::snapshot::build_snapshot(&self.world, context, events)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(reason) = self.handle_command(command) {
                tracing::debug!(%reason, "command rejected");
                self.events.push(GameEvent::CommandRejected { reason });
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), Rejection> {
        if self.phase.is_terminal() && command != PlayerCommand::Reset {
            return Err(Rejection::GameOver);
        }

        match command {
            PlayerCommand::PlaceTower { x, y } => self.place_tower(Position::new(x, y)),
            PlayerCommand::UpgradeTower { tower_id } => self.upgrade_tower(tower_id),
            PlayerCommand::StartWave => self.start_wave(),
            PlayerCommand::Reset => {
                self.reset();
                Ok(())
            }
            PlayerCommand::SetTimeScale { scale } if !scale.is_finite() => {
                Err(Rejection::InvalidTimeScale)
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
                Ok(())
            }
            PlayerCommand::Pause => {
                self.paused = true;
                Ok(())
            }
            PlayerCommand::Resume => {
                self.paused = false;
                Ok(())
            }
        }
    }

    fn place_tower(&mut self, requested: Position) -> Result<(), Rejection> {
        if !self.config.field.contains(&requested) {
            return Err(Rejection::OutOfBounds);
        }
        let cell = self.config.field.snap_to_cell(&requested);
        placement::check_placement(
            &cell,
            &self.path,
            &placement::tower_positions(&self.world),
            self.economy.money(),
            &self.config,
        )?;

        let cost = self.config.economy.tower_cost;
        if !self.economy.charge_cost(cost) {
            return Err(Rejection::InsufficientFunds {
                cost,
                available: self.economy.money(),
            });
        }

        let (_, tower_id) =
            world_setup::spawn_tower(&mut self.world, &mut self.ids, cell, &self.config.tower);
        tracing::debug!(tower_id, x = cell.x, y = cell.y, "tower placed");
        self.events.push(GameEvent::TowerPlaced {
            tower_id,
            x: cell.x,
            y: cell.y,
            cost,
        });
        Ok(())
    }

    fn upgrade_tower(&mut self, tower_id: u32) -> Result<(), Rejection> {
        let entity = self
            .world
            .query::<&Tower>()
            .iter()
            .find(|(_, tower)| tower.id == tower_id)
            .map(|(entity, _)| entity)
            .ok_or(Rejection::UnknownTower { tower_id })?;

        let next_level = self
            .world
            .get::<&Tower>(entity)
            .ok()
            .and_then(|tower| tower.level.next())
            .ok_or(Rejection::MaxLevel { tower_id })?;

        let cost = self.config.economy.upgrade_cost;
        if !self.economy.charge_cost(cost) {
            return Err(Rejection::InsufficientFunds {
                cost,
                available: self.economy.money(),
            });
        }

        if let Ok(mut tower) = self.world.get::<&mut Tower>(entity) {
            tower.level = next_level;
            tower.damage = self.config.tower.upgraded_damage;
            tower.fire_rate = self.config.tower.upgraded_fire_rate;
            tower.cooldown = tower.cooldown.min(tower.fire_rate);
        }

        tracing::debug!(tower_id, level = next_level.number(), "tower upgraded");
        self.events.push(GameEvent::TowerUpgraded {
            tower_id,
            level: next_level,
            cost,
        });
        Ok(())
    }

    fn start_wave(&mut self) -> Result<(), Rejection> {
        let max_waves = self.config.waves.max_waves;
        if max_waves != 0 && self.economy.wave() >= max_waves {
            return Err(Rejection::NoWavesRemaining);
        }

        let wave = self.economy.advance_wave();
        let spawn_count = self
            .director
            .start_wave(wave, self.time.elapsed_secs, &self.config.waves);

        tracing::info!(wave, spawn_count, "wave started");
        self.events.push(GameEvent::WaveStarted { wave, spawn_count });
        Ok(())
    }

    /// Reinitialize registries, counters, clock and pending spawns.
    fn reset(&mut self) {
        self.world.clear();
        self.ids = EntityIds::default();
        self.economy.reset();
        self.director.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        self.paused = false;

        tracing::info!("game reset");
        self.events.push(GameEvent::GameReset);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Enemy movement and arrivals
        let arrivals = systems::movement::run(&mut self.world, &self.path, dt);
        for arrival in arrivals {
            if self.economy.is_game_over() {
                break;
            }
            let ended = self.economy.enemy_reached_end();
            self.events.push(GameEvent::EnemyLeaked {
                enemy_id: arrival.enemy_id,
                lives_remaining: self.economy.lives(),
            });
            if ended {
                self.enter_game_over();
            }
        }
        if self.phase == GamePhase::GameOver {
            systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
            return;
        }

        // 2. Wave spawning
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.director,
            &mut self.ids,
            &self.path,
            self.time.elapsed_secs,
            &mut self.events,
        );
        // 3. Tower targeting
        systems::targeting::run(
            &mut self.world,
            &mut self.ids,
            &self.config.tower,
            dt,
            &mut self.events,
        );
        // 4. Projectile resolution
        for kill in systems::combat::run(&mut self.world, &self.config.tower, dt) {
            self.economy.credit_kill(kill.reward);
            tracing::debug!(
                enemy_id = kill.enemy_id,
                kind = kill.kind.tag(),
                reward = kill.reward,
                "enemy killed"
            );
            self.events.push(GameEvent::EnemyKilled {
                enemy_id: kill.enemy_id,
                kind: kill.kind,
                reward: kill.reward,
            });
        }
        // 5. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 6. Victory
        self.check_victory();
    }

    fn enter_game_over(&mut self) {
        let wave = self.economy.wave();
        self.phase = GamePhase::GameOver;
        self.director.clear();
        tracing::info!(wave, "game over");
        self.events.push(GameEvent::GameOver { wave });
    }

    fn check_victory(&mut self) {
        let max_waves = self.config.waves.max_waves;
        if max_waves == 0
            || self.economy.wave() < max_waves
            || !self.director.is_idle()
            || self.enemy_count() > 0
        {
            return;
        }
        let wave = self.economy.wave();
        self.phase = GamePhase::Victory;
        tracing::info!(wave, money = self.economy.money(), "victory");
        self.events.push(GameEvent::Victory { wave });
    }

    /// Spawn an enemy directly, bypassing the wave director (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(&mut self, kind: rampart_core::enums::EnemyKind) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &mut self.ids, &self.path, kind, 0).0
    }

    /// Spawn a projectile directly (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_projectile(
        &mut self,
        origin: Position,
        aim_at: Position,
        damage: i32,
    ) -> Entity {
        world_setup::spawn_projectile(
            &mut self.world,
            &mut self.ids,
            origin,
            aim_at,
            u32::MAX,
            damage,
            &self.config.tower,
        )
        .0
    }

    /// Mutable world access for tests that stage exact positions.
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
