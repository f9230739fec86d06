//! Fruit Brawl - A top-down wave brawler simulation core
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, combat, boss, skills, waves)
//! - `settings`: Data-driven session configuration
//! - `platform`: Native/browser host glue

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};
pub use sim::{ActionRejected, SimulationState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the frame budget every counter assumes)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 220.0;
    pub const PLAYER_MAX_HP: i32 = 260;
    /// Invulnerability granted by each hit, in ticks
    pub const PLAYER_INVUL_TICKS: u32 = 60;
    pub const RESPAWN_DELAY_MS: f64 = 1600.0;

    /// Enemy contact
    pub const CONTACT_RANGE: f32 = 22.0;
    pub const CONTACT_COOLDOWN_MS: f64 = 900.0;

    /// Coins
    pub const MAGNET_RADIUS: f32 = 140.0;
    pub const PICKUP_RADIUS: f32 = 18.0;
    pub const GACHA_COST: u32 = 5;

    /// Basic attack and heal
    pub const ATTACK_RANGE: f32 = 48.0;
    pub const ATTACK_DAMAGE: i32 = 36;
    pub const HEAL_AMOUNT: i32 = 100;
    pub const HEAL_COOLDOWN_MS: f64 = 10_000.0;

    /// Skill cooldowns in ticks, one per slot
    pub const SKILL_COOLDOWNS: [u32; 3] = [45, 120, 300];
    /// Lock-on telegraph duration before a targeted skill resolves
    pub const LOCK_ON_DELAY_MS: f64 = 360.0;
    /// Padding around the viewport for "on screen" target checks
    pub const ON_SCREEN_PAD: f32 = 80.0;

    /// Boss defaults
    pub const BOSS_MAX_HP: i32 = 900;
    pub const BOSS_DAMAGE: i32 = 16;
    pub const BOSS_SPEED: f32 = 30.0;

    /// Delay between a cleared wave and the next spawn
    pub const WAVE_ADVANCE_DELAY_MS: f64 = 1200.0;
}
