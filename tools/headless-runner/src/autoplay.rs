//! Seeded auto-player: clicks random cells, starts waves when the field is
//! quiet, and upgrades towers when money allows.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::PlayerCommand;
use rampart_core::config::GameConfig;
use rampart_core::enums::TowerLevel;
use rampart_core::state::GameStateSnapshot;

/// Ticks between auto-player decisions.
pub const DECISION_INTERVAL: u64 = 30;

pub struct AutoPlayer {
    rng: ChaCha8Rng,
    tower_cost: u32,
    upgrade_cost: u32,
    width: f64,
    height: f64,
}

impl AutoPlayer {
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            tower_cost: config.economy.tower_cost,
            upgrade_cost: config.economy.upgrade_cost,
            width: config.field.width,
            height: config.field.height,
        }
    }

    /// Commands to issue after seeing `snapshot`.
    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        if snapshot.phase.is_terminal() {
            return commands;
        }

        let economy = &snapshot.economy;
        let waves_left = economy.max_waves == 0 || economy.wave < economy.max_waves;
        if waves_left && snapshot.pending_spawns == 0 && snapshot.enemies.is_empty() {
            commands.push(PlayerCommand::StartWave);
        }

        let mut money = economy.money;
        if money >= self.tower_cost {
            // Invalid cells are rejected by the engine; the next decision retries.
            commands.push(PlayerCommand::PlaceTower {
                x: self.rng.gen_range(0.0..self.width),
                y: self.rng.gen_range(0.0..self.height),
            });
            money -= self.tower_cost;
        }

        if money >= self.upgrade_cost {
            let upgradable: Vec<u32> = snapshot
                .towers
                .iter()
                .filter(|t| t.level == TowerLevel::One)
                .map(|t| t.tower_id)
                .collect();
            if let Some(&tower_id) = upgradable.choose(&mut self.rng) {
                commands.push(PlayerCommand::UpgradeTower { tower_id });
            }
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_sim::{SimConfig, SimulationEngine};

    fn first_snapshot(config: &GameConfig) -> GameStateSnapshot {
        SimulationEngine::new(SimConfig {
            game: config.clone(),
            ..Default::default()
        })
        .unwrap()
        .tick(0.01)
    }

    #[test]
    fn starts_a_wave_and_clicks_when_idle() {
        let config = GameConfig::default();
        let snap = first_snapshot(&config);
        let commands = AutoPlayer::new(1, &config).decide(&snap);

        assert_eq!(commands[0], PlayerCommand::StartWave);
        match commands[1] {
            PlayerCommand::PlaceTower { x, y } => {
                assert!((0.0..800.0).contains(&x));
                assert!((0.0..600.0).contains(&y));
            }
            ref other => panic!("expected a placement, got {other:?}"),
        }
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn same_seed_same_choices() {
        let config = GameConfig::default();
        let snap = first_snapshot(&config);
        let mut a = AutoPlayer::new(42, &config);
        let mut b = AutoPlayer::new(42, &config);
        for _ in 0..20 {
            assert_eq!(a.decide(&snap), b.decide(&snap));
        }
    }

    #[test]
    fn does_nothing_after_the_game_ends() {
        let mut config = GameConfig::default();
        config.economy.starting_lives = 1;
        let mut engine = SimulationEngine::new(SimConfig {
            game: config.clone(),
            ..Default::default()
        })
        .unwrap();
        engine.queue_command(PlayerCommand::StartWave);
        engine.tick(0.01);
        let snap = engine.tick(30.0);
        assert!(snap.game_over());

        assert!(AutoPlayer::new(3, &config).decide(&snap).is_empty());
    }

    #[test]
    fn upgrades_when_rich() {
        let mut config = GameConfig::default();
        config.economy.starting_money = 500;
        let mut engine = SimulationEngine::new(SimConfig {
            game: config.clone(),
            ..Default::default()
        })
        .unwrap();
        engine.on_pointer_down(100.0, 220.0);
        let snap = engine.tick(0.01);

        let commands = AutoPlayer::new(9, &config).decide(&snap);
        assert!(commands.contains(&PlayerCommand::UpgradeTower { tower_id: 0 }));
    }
}
