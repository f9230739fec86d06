//! Skills, auto-targeting and lock-on
//!
//! A skill with a target on screen draws a lock-on line and resolves
//! `LOCK_ON_DELAY_MS` later through the scheduler; with no target it fires
//! at once along the player's facing. The cooldown is armed either way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::damage::{DamageOptions, damage_in_radius};
use super::error::ActionRejected;
use super::events::{GameEvent, ScheduledAction};
use super::geometry::{clamp_to_bounds, heading, unit};
use super::particles::Burst;
use super::state::{
    Bolt, BoltMods, FruitKind, Parts, Projectile, SimulationState, SkillSlot, palette,
};
use crate::consts::{LOCK_ON_DELAY_MS, ON_SCREEN_PAD};

/// Lock-on line life, `ceil(360 / 16)` ticks
pub const LOCK_ON_TICKS: u32 = 23;

/// Skill 1 bolt
const BOLT_SPAWN_AHEAD: f32 = 8.0;
const BOLT_SPEED: f32 = 480.0;
const BOLT_RADIUS: f32 = 8.0;
const BOLT_LIFE: u32 = 90;
const BOLT_DAMAGE: i32 = 36;

/// Skill 2 burst around the player
pub const NOVA_RADIUS: f32 = 140.0;
pub const NOVA_DAMAGE: i32 = 80;

/// Skill 3 dash distance
pub const DASH_DISTANCE: f32 = 180.0;

/// What a lock-on is pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRef {
    Enemy(u32),
    Boss(u32),
}

/// A skill waiting out its lock-on telegraph
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSkill {
    pub slot: SkillSlot,
    pub fruit: FruitKind,
    pub target: TargetRef,
    /// Target position when the lock was taken
    pub locked_at: Vec2,
}

/// Result of a successful `use_skill`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillCast {
    /// Resolved immediately along the facing angle
    Fired,
    /// Locked on; resolves after the telegraph
    Locked(TargetRef),
}

/// Per-fruit modifiers for the skill 1 bolt
pub fn bolt_mods(fruit: FruitKind) -> BoltMods {
    match fruit {
        FruitKind::Gale => BoltMods {
            slow: Some((0.5, 2.0)),
            ..BoltMods::default()
        },
        FruitKind::Flame => BoltMods {
            splash: Some(48.0),
            ..BoltMods::default()
        },
        FruitKind::Ice => BoltMods {
            freeze_secs: Some(1.2),
            ..BoltMods::default()
        },
        FruitKind::Dark => BoltMods {
            collapse: true,
            ..BoltMods::default()
        },
        FruitKind::Light => BoltMods {
            pierce: true,
            ..BoltMods::default()
        },
        FruitKind::Buddha => BoltMods {
            life_drain: Some(0.3),
            ..BoltMods::default()
        },
    }
}

/// Nearest living on-screen enemy, else the boss if it is on screen
pub fn acquire_target(state: &SimulationState) -> Option<(TargetRef, Vec2)> {
    let visible = |pos: Vec2| state.world.on_screen(state.camera, pos, ON_SCREEN_PAD);
    let player = state.player.pos;

    let nearest = state
        .enemies
        .iter()
        .filter(|e| !e.dead && visible(e.pos))
        .min_by(|a, b| a.pos.distance(player).total_cmp(&b.pos.distance(player)));
    if let Some(e) = nearest {
        return Some((TargetRef::Enemy(e.id), e.pos));
    }

    state
        .boss
        .as_ref()
        .filter(|b| !b.dead && visible(b.pos))
        .map(|b| (TargetRef::Boss(b.id), b.pos))
}

impl SimulationState {
    /// Current position of a lock-on target, if it is still alive
    fn locate(&self, target: TargetRef) -> Option<Vec2> {
        match target {
            TargetRef::Enemy(id) => self
                .enemies
                .iter()
                .find(|e| e.id == id && !e.dead)
                .map(|e| e.pos),
            TargetRef::Boss(id) => self
                .boss
                .as_ref()
                .filter(|b| b.id == id && !b.dead)
                .map(|b| b.pos),
        }
    }

    /// Trigger skill `slot`
    pub fn use_skill(&mut self, slot: SkillSlot) -> Result<SkillCast, ActionRejected> {
        if self.player.down {
            return self.rejected(ActionRejected::PlayerDown);
        }
        let Some(fruit) = self.player.fruit else {
            return self.rejected(ActionRejected::NoFruit);
        };
        let remaining = self.cooldowns.remaining(slot);
        if remaining > 0 {
            return self.rejected(ActionRejected::SkillCoolingDown { slot, remaining });
        }

        self.cooldowns.arm(slot);
        match acquire_target(self) {
            Some((target, locked_at)) => {
                self.projectiles.push(Projectile::LaserWarning {
                    origin: self.player.pos,
                    target: locked_at,
                    life: LOCK_ON_TICKS,
                    color: palette::LOCK_ON,
                });
                self.scheduler.schedule(
                    self.clock_ms + LOCK_ON_DELAY_MS,
                    ScheduledAction::FireSkill(PendingSkill {
                        slot,
                        fruit,
                        target,
                        locked_at,
                    }),
                );
                log::debug!("Skill {} locked on {:?}", slot.number(), target);
                Ok(SkillCast::Locked(target))
            }
            None => {
                let aim = self.player.facing;
                self.fire_skill(slot, fruit, aim);
                Ok(SkillCast::Fired)
            }
        }
    }

    /// Resolve a skill whose lock-on telegraph has run out. A target that
    /// died in the meantime is aimed at where it was locked.
    pub(crate) fn resolve_pending(&mut self, pending: PendingSkill) {
        if self.player.down {
            return;
        }
        let aim_point = self.locate(pending.target).unwrap_or(pending.locked_at);
        let to_target = aim_point - self.player.pos;
        let aim = if to_target.length_squared() > f32::EPSILON {
            heading(to_target)
        } else {
            self.player.facing
        };
        self.fire_skill(pending.slot, pending.fruit, aim);
    }

    fn fire_skill(&mut self, slot: SkillSlot, fruit: FruitKind, aim: f32) {
        let dir = unit(aim);
        match slot {
            SkillSlot::One => {
                self.projectiles.push(Projectile::Bolt(Bolt {
                    pos: self.player.pos + dir * BOLT_SPAWN_AHEAD,
                    vel: dir * BOLT_SPEED,
                    radius: BOLT_RADIUS,
                    life: BOLT_LIFE,
                    damage: BOLT_DAMAGE,
                    color: palette::BOLT,
                    mods: bolt_mods(fruit),
                    struck: Vec::new(),
                }));
            }
            SkillSlot::Two => {
                let now_ms = self.clock_ms;
                let center = self.player.pos;
                let Parts {
                    mut targets,
                    mut fx,
                    ..
                } = self.parts();
                damage_in_radius(
                    &mut targets,
                    &mut fx,
                    center,
                    NOVA_RADIUS,
                    NOVA_DAMAGE,
                    &DamageOptions::colored(palette::NOVA),
                    now_ms,
                );
            }
            SkillSlot::Three => {
                let dest = self.player.pos + dir * DASH_DISTANCE;
                self.player.pos = clamp_to_bounds(dest, self.world.size);
                self.player.facing = aim;
                self.particles
                    .burst(self.player.pos, Burst::new(palette::WHITE, 24, 2.5, 1.8));
            }
        }
        self.events.push(GameEvent::SkillFired { slot });
        log::debug!("Skill {} fired ({})", slot.number(), fruit.name());
    }
}
