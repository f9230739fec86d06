//! Autopilot that plays a session from the outside, through `TickInput`
//! only. Drives the headless runner and long-running tests.

use glam::Vec2;

use super::skills::NOVA_RADIUS;
use super::state::{SimulationState, SkillSlot};
use super::tick::{Movement, TickInput};
use crate::consts::{ATTACK_RANGE, GACHA_COST};

/// Axis distance below which the autopilot stops steering on that axis
const DEADZONE: f32 = 6.0;
/// Range at which bolts are worth firing
const BOLT_RANGE: f32 = 320.0;

/// Nearest living enemy, else the boss
fn nearest_target(state: &SimulationState) -> Option<Vec2> {
    let player = state.player.pos;
    state
        .enemies
        .iter()
        .filter(|e| !e.dead)
        .map(|e| e.pos)
        .chain(state.boss.iter().filter(|b| !b.dead).map(|b| b.pos))
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
}

/// Pick this tick's input
pub fn drive(state: &SimulationState) -> TickInput {
    let mut input = TickInput::default();
    let player = &state.player;
    if player.down {
        return input;
    }

    input.gacha = player.fruit.is_none() && state.coin_count >= GACHA_COST;
    input.heal = player.heal_ready && player.hp * 2 < player.max_hp;

    // Idle: drift back to the middle and sweep up coins on the way
    let goal = nearest_target(state)
        .or_else(|| state.coins.first().map(|c| c.pos))
        .unwrap_or_else(|| state.world.center());
    let offset = goal - player.pos;
    let distance = offset.length();

    if distance > ATTACK_RANGE * 0.6 {
        input.movement = Movement {
            up: offset.y < -DEADZONE,
            down: offset.y > DEADZONE,
            left: offset.x < -DEADZONE,
            right: offset.x > DEADZONE,
        };
    }

    if nearest_target(state).is_none() {
        return input;
    }
    input.attack = distance <= ATTACK_RANGE;

    if player.fruit.is_some() {
        let ready = |slot: SkillSlot| state.cooldowns.remaining(slot) == 0;
        input.skill = if distance <= NOVA_RADIUS * 0.8 && ready(SkillSlot::Two) {
            Some(SkillSlot::Two)
        } else if distance <= BOLT_RANGE && ready(SkillSlot::One) {
            Some(SkillSlot::One)
        } else {
            None
        };
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Enemy, EnemyKind, FruitKind};
    use crate::sim::tick;

    #[test]
    fn test_walks_toward_enemy_and_attacks() {
        let mut state = SimulationState::with_seed(1);
        state.enemies.clear();
        let pos = state.player.pos + Vec2::new(200.0, 0.0);
        state.enemies.push(Enemy::new(500, EnemyKind::Tank, pos, 1000));

        let input = drive(&state);
        assert!(input.movement.right && !input.movement.left);
        assert!(!input.attack);

        state.enemies[0].pos = state.player.pos + Vec2::new(30.0, 0.0);
        assert!(drive(&state).attack);
    }

    #[test]
    fn test_buys_fruit_and_uses_skills() {
        let mut state = SimulationState::with_seed(2);
        state.enemies.clear();
        state.coin_count = 5;
        assert!(drive(&state).gacha);

        state.player.fruit = Some(FruitKind::Ice);
        let pos = state.player.pos + Vec2::new(60.0, 0.0);
        state.enemies.push(Enemy::new(501, EnemyKind::Common, pos, 100));
        assert_eq!(drive(&state).skill, Some(SkillSlot::Two));
    }

    #[test]
    fn test_idle_when_down() {
        let mut state = SimulationState::with_seed(3);
        state.hurt_player(10_000);
        let input = drive(&state);
        assert!(!input.attack && !input.movement.any());
    }

    #[test]
    fn test_autopilot_clears_first_wave() {
        let mut state = SimulationState::with_seed(4);
        for _ in 0..(60 * 90) {
            let input = drive(&state);
            tick(&mut state, &input, SIM_DT);
            if state.wave > 1 {
                break;
            }
        }
        assert!(state.wave > 1);
    }
}
