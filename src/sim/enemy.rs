//! Enemy chase AI and contact damage

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geometry::direction_to;
use super::state::{Enemy, SimulationState};
use crate::consts::{CONTACT_COOLDOWN_MS, CONTACT_RANGE};

/// Move every living, mobile enemy toward `player_pos` and collect the
/// contact damage rolls that land this tick, in enemy order.
///
/// Each enemy keeps its own hit timestamp, so one enemy standing on the
/// player hurts at most once per `CONTACT_COOLDOWN_MS`.
pub fn chase_and_contact(
    enemies: &mut [Enemy],
    player_pos: Vec2,
    rng: &mut Pcg32,
    dt: f32,
    now_ms: f64,
) -> Vec<i32> {
    let mut contacts = Vec::new();
    for e in enemies.iter_mut() {
        if e.dead || e.is_immobilized(now_ms) {
            continue;
        }
        let d = e.pos.distance(player_pos);
        e.pos += direction_to(e.pos, player_pos) * e.current_speed(now_ms) * dt;

        let ready = e
            .last_hit_ms
            .is_none_or(|t| now_ms - t >= CONTACT_COOLDOWN_MS);
        if d < CONTACT_RANGE && ready {
            contacts.push(e.kind.contact_damage() + rng.random_range(0..=5));
            e.last_hit_ms = Some(now_ms);
        }
    }
    contacts
}

/// Enemy step for the tick: chase, then apply contact hits to the player
pub fn update_enemies(state: &mut SimulationState, dt: f32) {
    let contacts = chase_and_contact(
        &mut state.enemies,
        state.player.pos,
        &mut state.rng,
        dt,
        state.clock_ms,
    );
    for amount in contacts {
        state.hurt_player(amount);
    }
}
