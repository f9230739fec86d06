//! Discrete player actions: attack, heal, gacha
//!
//! Every check runs before any mutation. A rejection only sets the center
//! message.

use rand::Rng;

use super::damage::{DamageOptions, HitReport, damage_in_radius};
use super::error::ActionRejected;
use super::events::{GameEvent, ScheduledAction};
use super::particles::Burst;
use super::state::{FruitKind, Parts, SimulationState, palette};
use crate::consts::{
    ATTACK_DAMAGE, ATTACK_RANGE, GACHA_COST, HEAL_AMOUNT, HEAL_COOLDOWN_MS,
};

/// Default center message duration
const MESSAGE_MS: f64 = 1000.0;

impl SimulationState {
    /// Show the rejection and hand it back
    pub(crate) fn rejected<T>(&mut self, reason: ActionRejected) -> Result<T, ActionRejected> {
        log::debug!("Action rejected: {:?}", reason);
        self.show_message(reason.to_string(), MESSAGE_MS);
        Err(reason)
    }

    /// Melee swing around the player. Hitting nothing is still a success,
    /// reported with a "No Hit" message.
    pub fn basic_attack(&mut self) -> Result<HitReport, ActionRejected> {
        if self.player.down {
            return self.rejected(ActionRejected::PlayerDown);
        }
        let now_ms = self.clock_ms;
        let center = self.player.pos;
        let Parts {
            mut targets,
            mut fx,
            ..
        } = self.parts();
        let report = damage_in_radius(
            &mut targets,
            &mut fx,
            center,
            ATTACK_RANGE,
            ATTACK_DAMAGE,
            &DamageOptions::colored(palette::HIT_FLASH),
            now_ms,
        );
        if report.hits == 0 {
            self.show_message("No Hit", 600.0);
        }
        Ok(report)
    }

    /// Restore hp, then lock healing for `HEAL_COOLDOWN_MS`. Returns the hp
    /// actually restored.
    pub fn heal(&mut self) -> Result<i32, ActionRejected> {
        if self.player.down {
            return self.rejected(ActionRejected::PlayerDown);
        }
        if !self.player.heal_ready {
            return self.rejected(ActionRejected::HealCoolingDown);
        }
        if self.player.hp >= self.player.max_hp {
            return self.rejected(ActionRejected::HealthFull);
        }

        self.player.heal_ready = false;
        let restored = self.player.restore(HEAL_AMOUNT);
        self.particles
            .burst(self.player.pos, Burst::new(palette::HEAL, 36, 2.2, 1.8));
        self.scheduler
            .schedule(self.clock_ms + HEAL_COOLDOWN_MS, ScheduledAction::HealReady);
        Ok(restored)
    }

    /// Scheduled end of the heal lockout
    pub(crate) fn heal_ready(&mut self) {
        self.player.heal_ready = true;
        self.show_message("Heal siap", MESSAGE_MS);
    }

    /// Spend coins on a random fruit, replacing any fruit already held
    pub fn open_gacha(&mut self) -> Result<FruitKind, ActionRejected> {
        if self.player.down {
            return self.rejected(ActionRejected::PlayerDown);
        }
        if self.coin_count < GACHA_COST {
            return self.rejected(ActionRejected::NotEnoughCoins {
                have: self.coin_count,
                need: GACHA_COST,
            });
        }

        self.coin_count -= GACHA_COST;
        let fruit = FruitKind::from_roll(self.rng.random::<f32>());
        self.player.fruit = Some(fruit);
        self.events.push(GameEvent::FruitAcquired { fruit });
        self.show_message(format!("Dapat: {}", fruit.name()), 1200.0);
        log::info!("Rolled fruit {}", fruit.name());
        Ok(fruit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind};
    use glam::Vec2;

    fn quiet_state() -> SimulationState {
        let mut state = SimulationState::with_seed(41);
        state.enemies.clear();
        state
    }

    #[test]
    fn test_gacha_needs_five_coins() {
        let mut state = quiet_state();
        state.coin_count = 4;
        let err = state.open_gacha();
        assert_eq!(err, Err(ActionRejected::NotEnoughCoins { have: 4, need: 5 }));
        assert_eq!(state.coin_count, 4);
        assert_eq!(state.player.fruit, None);
        assert_eq!(state.message.as_ref().map(|m| m.text.as_str()), Some("Coin kurang"));
    }

    #[test]
    fn test_gacha_spends_and_grants() {
        let mut state = quiet_state();
        state.coin_count = 7;
        let fruit = state.open_gacha();
        assert!(fruit.is_ok());
        assert_eq!(state.coin_count, 2);
        assert_eq!(state.player.fruit, fruit.ok());
    }

    #[test]
    fn test_basic_attack_hits_in_range() {
        let mut state = quiet_state();
        let pos = state.player.pos;
        state
            .enemies
            .push(Enemy::new(100, EnemyKind::Common, pos + Vec2::new(40.0, 0.0), 70));
        state
            .enemies
            .push(Enemy::new(101, EnemyKind::Common, pos + Vec2::new(60.0, 0.0), 70));

        let report = state.basic_attack();
        assert_eq!(report.map(|r| r.hits), Ok(1));
        assert_eq!(state.enemies[0].hp, 34);
        assert_eq!(state.enemies[1].hp, 70);
    }

    #[test]
    fn test_basic_attack_miss_reports_no_hit() {
        let mut state = quiet_state();
        assert_eq!(state.basic_attack(), Ok(HitReport::default()));
        assert_eq!(state.message.as_ref().map(|m| m.text.as_str()), Some("No Hit"));
    }

    #[test]
    fn test_heal_flow() {
        let mut state = quiet_state();
        assert_eq!(state.heal(), Err(ActionRejected::HealthFull));

        state.player.hp = 100;
        assert_eq!(state.heal(), Ok(100));
        assert_eq!(state.player.hp, 200);
        assert_eq!(state.heal(), Err(ActionRejected::HealCoolingDown));
        assert_eq!(state.player.hp, 200);

        let due = state.scheduler.take_due(HEAL_COOLDOWN_MS);
        assert_eq!(due, vec![ScheduledAction::HealReady]);
        state.heal_ready();
        assert!(state.player.heal_ready);
        assert_eq!(state.heal(), Ok(60));
    }

    #[test]
    fn test_down_player_cannot_act() {
        let mut state = quiet_state();
        state.hurt_player(10_000);
        state.coin_count = 10;
        assert_eq!(state.open_gacha(), Err(ActionRejected::PlayerDown));
        assert_eq!(state.basic_attack(), Err(ActionRejected::PlayerDown));
        assert_eq!(state.coin_count, 10);
    }
}
