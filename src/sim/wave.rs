//! Wave and session progression: enemy batches, the boss wave, respawn

use glam::Vec2;
use rand::Rng;

use super::events::{GameEvent, ScheduledAction};
use super::state::{Boss, Enemy, EnemyKind, SessionPhase, SimulationState};
use crate::consts::WAVE_ADVANCE_DELAY_MS;

/// Enemies in a wave
pub fn wave_size(wave: u32) -> usize {
    3 + 2 * wave as usize
}

/// Random spawn point hugging one of the four world edges
fn edge_position(state: &mut SimulationState) -> Vec2 {
    let size = state.world.size;
    let rng = &mut state.rng;
    let side = rng.random_range(0..4u8);
    let mut p = Vec2::new(
        rng.random_range(40.0..(size.x - 40.0).max(41.0)),
        rng.random_range(40.0..(size.y - 40.0).max(41.0)),
    );
    match side {
        0 => p.x = rng.random_range(0.0..80.0),
        1 => p.x = rng.random_range(size.x - 80.0..size.x),
        2 => p.y = rng.random_range(0.0..80.0),
        _ => p.y = rng.random_range(size.y - 80.0..size.y),
    }
    p
}

/// Replace the enemy list with a fresh batch for `wave`
pub fn spawn_wave(state: &mut SimulationState, wave: u32) {
    let count = wave_size(wave);
    let mut enemies = Vec::with_capacity(count);
    for _ in 0..count {
        let kind = EnemyKind::from_roll(state.rng.random::<f32>());
        let pos = edge_position(state);
        let id = state.next_entity_id();
        let mut enemy = Enemy::new(id, kind, pos, kind.hp_for_wave(wave));
        enemy.anim = state.rng.random_range(0.0..1000.0);
        enemies.push(enemy);
    }

    state.enemies = enemies;
    state.wave = wave;
    state.phase = SessionPhase::Waves;
    state.events.push(GameEvent::WaveStarted {
        wave,
        enemies: count,
    });
    state.show_message(format!("Wave {wave}"), 900.0);
    log::info!("Wave {} started with {} enemies", wave, count);
}

/// Bring in the boss at the world center
pub fn spawn_boss(state: &mut SimulationState) {
    if state.boss.is_some() {
        return;
    }
    let id = state.next_entity_id();
    state.boss = Some(Boss::new(id, state.world.center()));
    state.phase = SessionPhase::Boss;
    state.events.push(GameEvent::BossSpawned);
    state.show_message("BOSS!", 1300.0);
    log::info!("Boss spawned after wave {}", state.wave);
}

/// Schedule the next wave once the current one is cleared
pub fn update_wave(state: &mut SimulationState) {
    if state.phase != SessionPhase::Waves || state.boss.is_some() {
        return;
    }
    if state.living_enemies() > 0 {
        return;
    }
    if state
        .scheduler
        .any(|a| matches!(a, ScheduledAction::AdvanceWave))
    {
        return;
    }
    state.scheduler.schedule(
        state.clock_ms + WAVE_ADVANCE_DELAY_MS,
        ScheduledAction::AdvanceWave,
    );
}

/// Next wave, or the boss once the last normal wave is done
pub fn advance_wave(state: &mut SimulationState) {
    if state.phase != SessionPhase::Waves {
        return;
    }
    if state.wave >= state.max_waves {
        spawn_boss(state);
    } else {
        spawn_wave(state, state.wave + 1);
    }
}

/// Soft respawn after a knock-out
pub fn respawn_player(state: &mut SimulationState) {
    let center = state.world.center();
    state.player.respawn(center);
    state.events.push(GameEvent::PlayerRespawned);
    log::info!("Player respawned");
}
