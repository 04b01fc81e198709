//! Economy and lives controller.
//!
//! Sole owner of money, lives, the wave counter and the game-over flag.
//! Other parts of the engine read it for affordability checks and request
//! mutations through its methods.

use rampart_core::config::EconomyConfig;
use rampart_core::state::EconomyView;

#[derive(Debug, Clone)]
pub struct Economy {
    money: u32,
    lives: u32,
    wave: u32,
    game_over: bool,
    starting: EconomyConfig,
}

impl Economy {
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            money: config.starting_money,
            lives: config.starting_lives,
            wave: 0,
            game_over: false,
            starting: config.clone(),
        }
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.money >= amount
    }

    /// Deduct `amount`. Returns false and changes nothing if funds are short
    /// or the game is over.
    pub fn charge_cost(&mut self, amount: u32) -> bool {
        if self.game_over || !self.can_afford(amount) {
            return false;
        }
        self.money -= amount;
        true
    }

    /// Credit the reward for a kill.
    pub fn credit_kill(&mut self, reward: u32) {
        if self.game_over {
            return;
        }
        self.money = self.money.saturating_add(reward);
    }

    /// An enemy reached the base. Returns true if this call ended the game.
    pub fn enemy_reached_end(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over = true;
            return true;
        }
        false
    }

    /// Bump the wave counter and return the new wave number.
    pub fn advance_wave(&mut self) -> u32 {
        self.wave += 1;
        self.wave
    }

    /// Restore starting money and lives, zero the wave counter, clear game over.
    pub fn reset(&mut self) {
        self.money = self.starting.starting_money;
        self.lives = self.starting.starting_lives;
        self.wave = 0;
        self.game_over = false;
    }

    pub fn view(&self, max_waves: u32) -> EconomyView {
        EconomyView {
            money: self.money,
            lives: self.lives,
            wave: self.wave,
            max_waves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn economy(money: u32, lives: u32) -> Economy {
        Economy::new(&EconomyConfig {
            starting_money: money,
            starting_lives: lives,
            ..Default::default()
        })
    }

    #[test]
    fn charge_cost_rejects_insufficient_funds() {
        let mut eco = economy(40, 10);
        assert!(!eco.charge_cost(50));
        assert_eq!(eco.money(), 40);
        assert!(eco.charge_cost(40));
        assert_eq!(eco.money(), 0);
        assert!(!eco.charge_cost(1));
        assert_eq!(eco.money(), 0);
    }

    #[test]
    fn charge_cost_never_goes_negative() {
        let mut eco = economy(100, 10);
        for amount in [30, 30, 30, 30, 5, 5, 100, 0, 1] {
            eco.charge_cost(amount);
            assert!(eco.money() <= 100);
        }
        // 30 + 30 + 30 + 5 + 5 = 100; everything after is rejected.
        assert_eq!(eco.money(), 0);
    }

    #[test]
    fn credit_kill_adds_reward() {
        let mut eco = economy(0, 10);
        eco.credit_kill(10);
        eco.credit_kill(75);
        assert_eq!(eco.money(), 85);
    }

    #[test]
    fn lives_reaching_zero_ends_game_once() {
        let mut eco = economy(100, 2);
        assert!(!eco.enemy_reached_end());
        assert_eq!(eco.lives(), 1);
        assert!(eco.enemy_reached_end());
        assert!(eco.is_game_over());
        assert_eq!(eco.lives(), 0);

        // Monotonic: further leaks change nothing.
        assert!(!eco.enemy_reached_end());
        assert_eq!(eco.lives(), 0);
        assert!(eco.is_game_over());
    }

    #[test]
    fn game_over_freezes_money() {
        let mut eco = economy(100, 1);
        eco.enemy_reached_end();
        eco.credit_kill(10);
        assert!(!eco.charge_cost(10));
        assert_eq!(eco.money(), 100);
    }

    #[test]
    fn reset_restores_starting_values() {
        let mut eco = economy(100, 1);
        eco.charge_cost(60);
        eco.advance_wave();
        eco.advance_wave();
        eco.enemy_reached_end();

        eco.reset();
        assert_eq!(eco.money(), 100);
        assert_eq!(eco.lives(), 1);
        assert_eq!(eco.wave(), 0);
        assert!(!eco.is_game_over());
    }
}
