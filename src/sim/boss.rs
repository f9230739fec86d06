//! Boss attack cycle
//!
//! The boss always chases. Its cycle timer counts down in seconds:
//! Approach -> Telegraph (laser line shown, target locked) -> Recovery
//! (strike resolved on entry) -> Approach with a random rest.

use glam::Vec2;
use rand::Rng;

use super::damage::{Combatant, DamageOptions, Status, damage_in_radius, strike};
use super::events::GameEvent;
use super::geometry::{direction_to, point_segment_distance};
use super::particles::Burst;
use super::state::{
    BossCycle, BossPhase, Parts, Projectile, SessionPhase, SimulationState, palette,
};
use crate::consts::BOSS_SPEED;

/// Telegraph phase length (s)
pub const TELEGRAPH_SECS: f32 = 1.6;
/// Pause after the strike (s)
pub const RECOVERY_SECS: f32 = 0.25;
/// Laser warning life, `ceil(1.2 * 60)` ticks
pub const LASER_WARNING_TICKS: u32 = 72;

/// Half-width of the laser line against the player and enemies
const PLAYER_LINE_REACH: f32 = 18.0;
const ENEMY_LINE_REACH: f32 = 20.0;
const LASER_ENEMY_DAMAGE: i32 = 90;
const STRIKE_RADIUS: f32 = 80.0;
const STRIKE_DAMAGE: i32 = 60;

/// Random rest between strikes, 3-5 s
fn rest_secs(rng: &mut impl Rng) -> f32 {
    3.0 + rng.random::<f32>() * 2.0
}

/// Move the boss and advance its cycle
pub fn update_boss(state: &mut SimulationState, dt: f32) {
    let player_pos = state.player.pos;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    if boss.dead {
        return;
    }

    boss.pos += direction_to(boss.pos, player_pos) * BOSS_SPEED * dt;
    boss.cycle.timer -= dt;
    if boss.cycle.timer > 0.0 {
        return;
    }

    match boss.cycle.phase {
        BossPhase::Approach => {
            boss.cycle = BossCycle {
                phase: BossPhase::Telegraph,
                timer: TELEGRAPH_SECS,
            };
            boss.strike_target = Some(player_pos);
            let origin = boss.pos;
            state.projectiles.push(Projectile::LaserWarning {
                origin,
                target: player_pos,
                life: LASER_WARNING_TICKS,
                color: palette::BOSS_LASER,
            });
        }
        BossPhase::Telegraph => {
            boss.cycle = BossCycle {
                phase: BossPhase::Recovery,
                timer: RECOVERY_SECS,
            };
            let origin = boss.pos;
            let target = boss.strike_target.take().unwrap_or(player_pos);
            let damage = (boss.damage as f32 * 0.9).floor() as i32;
            resolve_strike(state, origin, target, damage);
        }
        BossPhase::Recovery => {
            let rest = rest_secs(&mut state.rng);
            if let Some(boss) = state.boss.as_mut() {
                boss.cycle = BossCycle {
                    phase: BossPhase::Approach,
                    timer: rest,
                };
            }
        }
    }
}

/// Laser down the locked line, then the burst at its end
fn resolve_strike(state: &mut SimulationState, origin: Vec2, target: Vec2, player_damage: i32) {
    let now_ms = state.clock_ms;
    if point_segment_distance(state.player.pos, origin, target) < PLAYER_LINE_REACH {
        state.hurt_player(player_damage);
    }

    let Parts {
        mut targets,
        mut fx,
        ..
    } = state.parts();
    let scorch = Burst::new(palette::LASER_SCORCH, 16, 2.0, 1.4);
    for e in targets.enemies.iter_mut().filter(|e| !e.dead) {
        if point_segment_distance(e.pos, origin, target) < ENEMY_LINE_REACH {
            strike(
                e as &mut dyn Combatant,
                &mut fx,
                LASER_ENEMY_DAMAGE,
                scorch,
                &Status::default(),
                now_ms,
            );
        }
    }

    let opts = DamageOptions {
        spare_boss: true,
        ..DamageOptions::colored(palette::STRIKE_BURST)
    };
    damage_in_radius(
        &mut targets,
        &mut fx,
        target,
        STRIKE_RADIUS,
        STRIKE_DAMAGE,
        &opts,
        now_ms,
    );
}

/// Remove a dead boss and close out the session
pub fn settle_boss(state: &mut SimulationState) {
    if !state.boss.as_ref().is_some_and(|b| b.dead) {
        return;
    }
    state.boss = None;
    state.phase = SessionPhase::Cleared;
    state.projectiles.retain(|p| {
        !matches!(p, Projectile::LaserWarning { color, .. } if *color == palette::BOSS_LASER)
    });
    state.events.push(GameEvent::BossDefeated);
    state.show_message("Boss Kalah!", 1400.0);
    log::info!("Boss defeated at {:.1}s", state.clock_ms / 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Boss, Enemy, EnemyKind};

    fn boss_state() -> SimulationState {
        let mut state = SimulationState::with_seed(21);
        state.enemies.clear();
        let id = state.next_entity_id();
        state.boss = Some(Boss::new(id, state.world.center()));
        state.phase = SessionPhase::Boss;
        state
    }

    fn phase(state: &SimulationState) -> BossPhase {
        state.boss.as_ref().map(|b| b.cycle.phase).unwrap_or(BossPhase::Approach)
    }

    #[test]
    fn test_boss_chases_player() {
        let mut state = boss_state();
        state.player.pos = state.world.center() + Vec2::new(300.0, 0.0);
        let start = state.world.center();
        update_boss(&mut state, 1.0);
        let pos = state.boss.as_ref().map(|b| b.pos).unwrap_or_default();
        assert!((pos.x - start.x - BOSS_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_telegraph_spawns_laser_warning() {
        let mut state = boss_state();
        state.player.pos = state.world.center() + Vec2::new(400.0, 0.0);
        if let Some(b) = state.boss.as_mut() {
            b.cycle.timer = SIM_DT / 2.0;
        }
        update_boss(&mut state, SIM_DT);

        assert_eq!(phase(&state), BossPhase::Telegraph);
        assert!(matches!(
            state.projectiles[..],
            [Projectile::LaserWarning {
                life: LASER_WARNING_TICKS,
                ..
            }]
        ));
    }

    #[test]
    fn test_cycle_order_is_strict() {
        let mut state = boss_state();
        state.player.pos = Vec2::new(50.0, 50.0);
        let mut seen = vec![phase(&state)];
        for _ in 0..(60 * 20) {
            // Pin the boss so it never reaches the player
            if let Some(b) = state.boss.as_mut() {
                b.pos = state.world.center();
            }
            update_boss(&mut state, SIM_DT);
            let p = phase(&state);
            if seen.last() != Some(&p) {
                seen.push(p);
            }
        }
        assert!(seen.len() >= 7);
        for pair in seen.windows(2) {
            let next = (pair[0].index() + 1) % 3;
            assert_eq!(pair[1].index(), next);
        }
    }

    #[test]
    fn test_strike_hits_player_on_line() {
        let mut state = boss_state();
        let center = state.world.center();
        state.player.pos = center + Vec2::new(200.0, 0.0);
        if let Some(b) = state.boss.as_mut() {
            b.cycle = BossCycle {
                phase: BossPhase::Telegraph,
                timer: SIM_DT / 2.0,
            };
            b.strike_target = Some(center + Vec2::new(300.0, 0.0));
        }
        update_boss(&mut state, SIM_DT);

        // floor(16 * 0.9) = 14
        assert_eq!(state.player.hp, state.player.max_hp - 14);
        assert_eq!(phase(&state), BossPhase::Recovery);
    }

    #[test]
    fn test_strike_burns_enemies_and_spares_boss() {
        let mut state = boss_state();
        let center = state.world.center();
        state.player.pos = Vec2::new(20.0, 20.0);
        let target = center + Vec2::new(300.0, 0.0);
        let on_line = Enemy::new(50, EnemyKind::Tank, center + Vec2::new(150.0, 5.0), 500);
        let at_target = Enemy::new(51, EnemyKind::Common, target + Vec2::new(0.0, 60.0), 500);
        state.enemies = vec![on_line, at_target];
        if let Some(b) = state.boss.as_mut() {
            b.cycle = BossCycle {
                phase: BossPhase::Telegraph,
                timer: SIM_DT / 2.0,
            };
            b.strike_target = Some(target);
        }
        update_boss(&mut state, SIM_DT);

        assert_eq!(state.enemies[0].hp, 410);
        assert_eq!(state.enemies[1].hp, 440);
        assert_eq!(state.boss.as_ref().map(|b| b.hp), Some(900));
        assert_eq!(state.player.hp, state.player.max_hp);
    }

    #[test]
    fn test_dead_boss_is_removed_once() {
        let mut state = boss_state();
        if let Some(b) = state.boss.as_mut() {
            b.take_damage(10_000);
        }
        settle_boss(&mut state);
        settle_boss(&mut state);

        assert!(state.boss.is_none());
        assert_eq!(state.phase, SessionPhase::Cleared);
        let defeats = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BossDefeated))
            .count();
        assert_eq!(defeats, 1);
        assert_eq!(state.message.as_ref().map(|m| m.text.as_str()), Some("Boss Kalah!"));
    }
}
