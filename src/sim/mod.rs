//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Own millisecond clock, never wall time
//! - No rendering or platform dependencies

pub mod actions;
pub mod autopilot;
pub mod boss;
pub mod damage;
pub mod enemy;
pub mod error;
pub mod events;
pub mod geometry;
pub mod particles;
pub mod projectiles;
pub mod skills;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use damage::{Combatant, DamageOptions, HitReport, Status, damage_in_radius};
pub use error::ActionRejected;
pub use events::{CenterMessage, GameEvent, ScheduledAction, Scheduler};
pub use geometry::point_segment_distance;
pub use particles::{Particle, ParticlePool};
pub use skills::{PendingSkill, SkillCast, TargetRef};
pub use snapshot::{FrameSnapshot, HudSnapshot, PlayerPose};
pub use state::{
    Boss, BossPhase, Coin, Enemy, EnemyKind, FruitKind, Player, PlayerHit, Projectile,
    SessionPhase, SimulationState, SkillSlot, World,
};
pub use tick::{Movement, TickInput, tick};
