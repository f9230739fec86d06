//! Read-only views handed to the HUD and drawing layers

use glam::Vec2;
use serde::Serialize;

use super::events::CenterMessage;
use super::particles::Particle;
use super::state::{Boss, Coin, Enemy, FruitKind, Projectile, SessionPhase, SimulationState};

/// Counters and bars for the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub hp: i32,
    pub max_hp: i32,
    pub coins: u32,
    pub wave: u32,
    pub phase: SessionPhase,
    pub camera: Vec2,
    /// Center-screen text and how long it stays up
    pub message: Option<CenterMessage>,
    /// Boss bar fill; `None` hides the bar
    pub boss_health: Option<f32>,
    /// Remaining ticks per skill slot
    pub cooldowns: [u32; 3],
    pub fruit: Option<FruitKind>,
    pub heal_ready: bool,
}

/// What the drawing layer needs to paint the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPose {
    pub pos: Vec2,
    pub facing: f32,
    pub step_phase: f32,
    pub moving: bool,
    /// Blink while invulnerable
    pub invulnerable: bool,
    pub down: bool,
    pub fruit: Option<FruitKind>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub hud: HudSnapshot,
    pub world_size: Vec2,
    pub player: PlayerPose,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub coins: Vec<Coin>,
}

impl SimulationState {
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            coins: self.coin_count,
            wave: self.wave,
            phase: self.phase,
            camera: self.camera,
            message: self.message.clone(),
            boss_health: self
                .boss
                .as_ref()
                .filter(|b| !b.dead)
                .map(|b| b.health_ratio()),
            cooldowns: self.cooldowns.slots,
            fruit: self.player.fruit,
            heal_ready: self.player.heal_ready,
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            hud: self.hud(),
            world_size: self.world.size,
            player: PlayerPose {
                pos: self.player.pos,
                facing: self.player.facing,
                step_phase: self.player.step_phase,
                moving: self.moving,
                invulnerable: self.player.invul > 0,
                down: self.player.down,
                fruit: self.player.fruit,
            },
            enemies: self.enemies.iter().filter(|e| !e.dead).cloned().collect(),
            boss: self.boss.clone(),
            projectiles: self.projectiles.clone(),
            particles: self.particles.iter().cloned().collect(),
            coins: self.coins.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_hides_boss_bar_without_boss() {
        let state = SimulationState::with_seed(1);
        let hud = state.hud();
        assert_eq!(hud.boss_health, None);
        assert_eq!(hud.wave, 1);
        assert_eq!(hud.hp, 260);
        let message = hud.message.as_ref().map(|m| m.text.as_str());
        assert_eq!(message, Some("Wave 1"));
    }

    #[test]
    fn test_hud_message_carries_remaining_time() {
        let mut state = SimulationState::with_seed(4);
        state.show_message("Coin kurang", 900.0);
        let shown = state.hud().message;
        assert_eq!(shown.as_ref().map(|m| m.remaining_ms), Some(900.0));

        crate::sim::tick(&mut state, &crate::sim::TickInput::default(), 0.1);
        let left = state.hud().message.map(|m| m.remaining_ms);
        assert!(left.is_some_and(|ms| (ms - 800.0).abs() < 1e-3));
    }

    #[test]
    fn test_hud_boss_ratio() {
        let mut state = SimulationState::with_seed(2);
        let id = state.next_entity_id();
        let mut boss = Boss::new(id, Vec2::ZERO);
        boss.hp = 450;
        state.boss = Some(boss);
        assert_eq!(state.hud().boss_health, Some(0.5));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = SimulationState::with_seed(3);
        let snap = state.snapshot();
        assert_eq!(snap.enemies.len(), 5);
        let json = serde_json::to_string(&snap);
        assert!(json.is_ok_and(|j| j.contains("\"hud\"")));
    }
}
