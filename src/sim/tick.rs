//! Fixed timestep simulation tick
//!
//! One call advances the whole session by `dt`. Order matters: enemy and
//! boss movement run before projectiles so every hit test sees this tick's
//! positions, and the camera is recomputed last.

use glam::Vec2;

use super::boss::{settle_boss, update_boss};
use super::enemy::update_enemies;
use super::events::ScheduledAction;
use super::geometry::{clamp_to_bounds, heading};
use super::particles::update_coins;
use super::projectiles::update_projectiles;
use super::state::{SimulationState, SkillSlot};
use super::wave::{advance_wave, respawn_player, update_wave};

/// Walk animation advance per moving tick, and decay per idle tick
const STEP_ADVANCE: f32 = 0.16;
const STEP_DECAY: f32 = 0.2;

/// Held direction keys, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Movement {
    /// Unit intent vector (zero when idle or when opposite keys cancel)
    pub fn intent(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)).normalize_or_zero()
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: Movement,
    /// Basic attack button
    pub attack: bool,
    pub heal: bool,
    pub gacha: bool,
    pub skill: Option<SkillSlot>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    state.clock_ms += dt as f64 * 1000.0;

    move_player(state, &input.movement, dt);
    run_actions(state, input);
    run_scheduled(state);

    update_enemies(state, dt);
    update_boss(state, dt);
    update_projectiles(state, dt);
    settle_boss(state);

    let collected = update_coins(
        &mut state.coins,
        state.player.pos,
        &mut state.particles,
        &mut state.events,
    );
    state.coin_count += collected;
    state.particles.update();

    state.cooldowns.tick();
    state.player.invul = state.player.invul.saturating_sub(1);
    age_message(state, dt);

    update_wave(state);
    state.camera = state.world.camera_for(state.player.pos);
}

fn move_player(state: &mut SimulationState, movement: &Movement, dt: f32) {
    let intent = movement.intent();
    let player = &mut state.player;
    state.moving = movement.any() && !player.down;

    if state.moving && intent != Vec2::ZERO {
        let next = player.pos + intent * player.speed * dt;
        player.pos = clamp_to_bounds(next, state.world.size);
        player.facing = heading(intent);
    }
    if state.moving {
        player.step_phase += STEP_ADVANCE;
    } else {
        player.step_phase = (player.step_phase - STEP_DECAY).max(0.0);
    }
}

/// Rejections already set the center message and log at debug
fn run_actions(state: &mut SimulationState, input: &TickInput) {
    if input.attack {
        state.basic_attack().ok();
    }
    if input.heal {
        state.heal().ok();
    }
    if input.gacha {
        state.open_gacha().ok();
    }
    if let Some(slot) = input.skill {
        state.use_skill(slot).ok();
    }
}

fn run_scheduled(state: &mut SimulationState) {
    for action in state.scheduler.take_due(state.clock_ms) {
        match action {
            ScheduledAction::FireSkill(pending) => state.resolve_pending(pending),
            ScheduledAction::Respawn => respawn_player(state),
            ScheduledAction::HealReady => state.heal_ready(),
            ScheduledAction::AdvanceWave => advance_wave(state),
        }
    }
}

fn age_message(state: &mut SimulationState, dt: f32) {
    if let Some(msg) = state.message.as_mut() {
        msg.remaining_ms -= dt as f64 * 1000.0;
        if msg.remaining_ms <= 0.0 {
            state.message = None;
        }
    }
}
