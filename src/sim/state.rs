//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one owned `SimulationState`. Systems
//! receive it by `&mut` and split it into disjoint field borrows when they
//! need several collections at once.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::damage::{Fx, Targets};
use super::events::{CenterMessage, GameEvent, ScheduledAction, Scheduler};
use super::particles::ParticlePool;
use crate::consts::*;
use crate::settings::Settings;

/// Packed 0xRRGGBB colours handed to the drawing layer
pub mod palette {
    pub const WHITE: u32 = 0xffffff;
    pub const GOLD: u32 = 0xffd700;
    pub const HIT_FLASH: u32 = 0xfff2aa;
    pub const DEATH_BURST: u32 = 0xffaaaa;
    pub const HEAL: u32 = 0xa8ffb0;
    pub const LOCK_ON: u32 = 0xff4444;
    pub const BOSS_LASER: u32 = 0xff3c3c;
    pub const LASER_SCORCH: u32 = 0xff8888;
    pub const STRIKE_BURST: u32 = 0xff6633;
    pub const BOLT: u32 = 0xff8c4a;
    pub const NOVA: u32 = 0xff6b1a;
    pub const VOID: u32 = 0x8a2be2;
}

/// Which skill button was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillSlot {
    One,
    Two,
    Three,
}

impl SkillSlot {
    pub const ALL: [SkillSlot; 3] = [SkillSlot::One, SkillSlot::Two, SkillSlot::Three];

    /// Map a 1-based button number to a slot
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(SkillSlot::One),
            2 => Some(SkillSlot::Two),
            3 => Some(SkillSlot::Three),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            SkillSlot::One => 0,
            SkillSlot::Two => 1,
            SkillSlot::Three => 2,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Fruits rolled from the gacha; holding one unlocks the skill buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Gale,
    Flame,
    Ice,
    Dark,
    Light,
    Buddha,
}

impl FruitKind {
    /// Cumulative roll thresholds, rarest last
    const TABLE: [(f32, FruitKind); 6] = [
        (0.45, FruitKind::Gale),
        (0.75, FruitKind::Flame),
        (0.90, FruitKind::Ice),
        (0.97, FruitKind::Dark),
        (0.995, FruitKind::Light),
        (1.0, FruitKind::Buddha),
    ];

    /// Pick a fruit from a uniform roll in [0, 1)
    pub fn from_roll(roll: f32) -> Self {
        Self::TABLE
            .iter()
            .find(|(threshold, _)| roll < *threshold)
            .map(|(_, kind)| *kind)
            .unwrap_or(FruitKind::Buddha)
    }

    pub fn name(self) -> &'static str {
        match self {
            FruitKind::Gale => "Gale",
            FruitKind::Flame => "Flame",
            FruitKind::Ice => "Ice",
            FruitKind::Dark => "Dark",
            FruitKind::Light => "Light",
            FruitKind::Buddha => "Buddha",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            FruitKind::Gale => 0x9be7ff,
            FruitKind::Flame => 0xff8c4a,
            FruitKind::Ice => 0xbfe9ff,
            FruitKind::Dark => 0x8a2be2,
            FruitKind::Light => 0xfff7a8,
            FruitKind::Buddha => 0xffd36b,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    /// Ticks of invulnerability left; any value > 0 blocks damage
    pub invul: u32,
    /// Walk animation phase
    pub step_phase: f32,
    /// Last movement heading (radians); skills without a lock fire along it
    pub facing: f32,
    pub fruit: Option<FruitKind>,
    pub heal_ready: bool,
    /// Knocked out and waiting for the scheduled respawn
    pub down: bool,
}

/// Outcome of a hit on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerHit {
    /// Blocked by invulnerability or because the player is already down
    Ignored,
    Hurt(i32),
    /// This hit took the last hp
    Downed(i32),
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: PLAYER_SPEED,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            invul: 0,
            step_phase: 0.0,
            facing: 0.0,
            fruit: None,
            heal_ready: true,
            down: false,
        }
    }

    /// Apply incoming damage, honoring invulnerability
    pub fn damage(&mut self, amount: i32) -> PlayerHit {
        if self.invul > 0 || self.down {
            return PlayerHit::Ignored;
        }
        self.hp = (self.hp - amount).clamp(0, self.max_hp);
        self.invul = PLAYER_INVUL_TICKS;
        if self.hp == 0 {
            self.down = true;
            PlayerHit::Downed(amount)
        } else {
            PlayerHit::Hurt(amount)
        }
    }

    /// Restore hp, clamped to max. Returns the amount actually restored.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).clamp(0, self.max_hp);
        self.hp - before
    }

    pub fn respawn(&mut self, at: Vec2) {
        self.hp = self.max_hp;
        self.pos = at;
        self.down = false;
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Common,
    Fast,
    Tank,
}

impl EnemyKind {
    /// Roll a kind: 66% common, 20% fast, 14% tank
    pub fn from_roll(roll: f32) -> Self {
        if roll > 0.86 {
            EnemyKind::Tank
        } else if roll > 0.66 {
            EnemyKind::Fast
        } else {
            EnemyKind::Common
        }
    }

    /// Chase speed (units/s)
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Common => 40.0,
            EnemyKind::Fast => 80.0,
            EnemyKind::Tank => 24.0,
        }
    }

    pub fn hp_multiplier(self) -> f32 {
        match self {
            EnemyKind::Common => 1.0,
            EnemyKind::Fast => 0.7,
            EnemyKind::Tank => 1.9,
        }
    }

    /// Contact damage before the 0-5 random bonus
    pub fn contact_damage(self) -> i32 {
        match self {
            EnemyKind::Tank => 10,
            _ => 6,
        }
    }

    /// Hit points for a given wave
    pub fn hp_for_wave(self, wave: u32) -> i32 {
        let base = 60 + wave as i32 * 10;
        (base as f32 * self.hp_multiplier()).floor() as i32
    }
}

/// Timed slow debuff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slow {
    pub factor: f32,
    pub until_ms: f64,
}

/// A wave enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub dead: bool,
    /// Clock time of the last contact hit on the player
    pub last_hit_ms: Option<f64>,
    pub freeze_until_ms: Option<f64>,
    pub stun_until_ms: Option<f64>,
    pub slow: Option<Slow>,
    /// Animation offset for the drawing layer
    pub anim: f32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, hp: i32) -> Self {
        Self {
            id,
            kind,
            pos,
            hp,
            max_hp: hp,
            dead: false,
            last_hit_ms: None,
            freeze_until_ms: None,
            stun_until_ms: None,
            slow: None,
            anim: 0.0,
        }
    }

    /// Frozen or stunned enemies neither move nor deal contact damage
    pub fn is_immobilized(&self, now_ms: f64) -> bool {
        let active = |until: Option<f64>| until.is_some_and(|t| now_ms < t);
        active(self.freeze_until_ms) || active(self.stun_until_ms)
    }

    /// Chase speed after any live slow
    pub fn current_speed(&self, now_ms: f64) -> f32 {
        match self.slow {
            Some(slow) if now_ms < slow.until_ms => self.kind.speed() * slow.factor,
            _ => self.kind.speed(),
        }
    }
}

/// Boss attack cycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Chasing and resting between strikes
    Approach,
    /// Laser line shown, strike pending
    Telegraph,
    /// Short pause after the strike
    Recovery,
}

impl BossPhase {
    pub fn index(self) -> u8 {
        match self {
            BossPhase::Approach => 0,
            BossPhase::Telegraph => 1,
            BossPhase::Recovery => 2,
        }
    }
}

/// Boss cycle state; `timer` is in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossCycle {
    pub phase: BossPhase,
    pub timer: f32,
}

/// The singleton boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub dead: bool,
    pub cycle: BossCycle,
    /// Player position recorded when the telegraph started
    pub strike_target: Option<Vec2>,
}

/// Initial delay before the first telegraph (120 frames in the source)
pub const BOSS_FIRST_STRIKE_SECS: f32 = 2.0;

impl Boss {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            hp: BOSS_MAX_HP,
            max_hp: BOSS_MAX_HP,
            damage: BOSS_DAMAGE,
            dead: false,
            cycle: BossCycle {
                phase: BossPhase::Approach,
                timer: BOSS_FIRST_STRIKE_SECS,
            },
            strike_target: None,
        }
    }

    /// Health bar fill ratio
    pub fn health_ratio(&self) -> f32 {
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

/// Optional on-hit effects carried by a bolt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoltMods {
    /// Pass through targets instead of being consumed on first hit
    pub pierce: bool,
    /// Splash radius applied around the impact (80% damage)
    pub splash: Option<f32>,
    pub freeze_secs: Option<f32>,
    /// Speed multiplier and its duration
    pub slow: Option<(f32, f32)>,
    /// Fraction of damage returned to the player as hp
    pub life_drain: Option<f32>,
    /// Leave a black hole where the bolt ends
    pub collapse: bool,
}

/// A moving damaging projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bolt {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks left
    pub life: u32,
    pub damage: i32,
    pub color: u32,
    pub mods: BoltMods,
    /// Ids already struck, so a piercing bolt hits each target once
    #[serde(default)]
    pub struck: Vec<u32>,
}

/// Everything in the projectile list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Projectile {
    /// Telegraph line; purely a warning, the hazard is resolved elsewhere
    LaserWarning {
        origin: Vec2,
        target: Vec2,
        life: u32,
        color: u32,
    },
    /// Stationary pull that detonates when its life runs out
    Blackhole {
        pos: Vec2,
        radius: f32,
        life: u32,
        damage: i32,
        color: u32,
    },
    Bolt(Bolt),
}

/// A dropped coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub vel: Vec2,
    pub frame: u32,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            frame: 0,
        }
    }
}

/// Independent per-slot skill cooldowns, in ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldowns {
    pub slots: [u32; 3],
}

impl Cooldowns {
    pub fn remaining(&self, slot: SkillSlot) -> u32 {
        self.slots[slot.index()]
    }

    pub fn arm(&mut self, slot: SkillSlot) {
        self.slots[slot.index()] = SKILL_COOLDOWNS[slot.index()];
    }

    /// Count every slot down by one tick, floor zero
    pub fn tick(&mut self) {
        for slot in &mut self.slots {
            *slot = slot.saturating_sub(1);
        }
    }
}

/// World and viewport extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub size: Vec2,
    pub viewport: Vec2,
}

impl World {
    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Camera offset that centers `focus` without leaving the world
    pub fn camera_for(&self, focus: Vec2) -> Vec2 {
        let max = (self.size - self.viewport).max(Vec2::ZERO);
        (focus - self.viewport * 0.5).clamp(Vec2::ZERO, max)
    }

    /// Whether `pos` is inside the viewport (padded) seen from `camera`
    pub fn on_screen(&self, camera: Vec2, pos: Vec2, pad: f32) -> bool {
        let s = pos - camera;
        s.x >= -pad && s.x <= self.viewport.x + pad && s.y >= -pad && s.y <= self.viewport.y + pad
    }
}

/// Where the session is in its progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Normal enemy waves
    Waves,
    /// Boss fight in progress
    Boss,
    /// Boss defeated; the world keeps running with nothing left to spawn
    Cleared,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Session seed
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock in milliseconds; all timestamps use it
    pub clock_ms: f64,
    pub world: World,
    /// Camera offset, recomputed at the end of every tick
    pub camera: Vec2,
    pub player: Player,
    /// Whether movement input was held on the last tick
    pub moving: bool,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    /// Cosmetic particles (not gameplay-affecting)
    pub particles: ParticlePool,
    pub coins: Vec<Coin>,
    pub coin_count: u32,
    /// Current wave (1-based)
    pub wave: u32,
    pub max_waves: u32,
    pub phase: SessionPhase,
    pub cooldowns: Cooldowns,
    pub message: Option<CenterMessage>,
    pub scheduler: Scheduler,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    /// Gameplay RNG (coin drops, spawns, damage rolls)
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

/// Mutable views of disjoint state fields, for systems that touch several
/// collections at once
pub(crate) struct Parts<'a> {
    pub targets: Targets<'a>,
    pub fx: Fx<'a>,
    pub player: &'a mut Player,
    pub projectiles: &'a mut Vec<Projectile>,
}

impl SimulationState {
    /// Create a session from settings and spawn the first wave
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or(0x5eed_f00d);
        let viewport = settings.viewport();
        let world = World {
            size: viewport * settings.world_scale(),
            viewport,
        };
        let mut state = Self {
            seed,
            time_ticks: 0,
            clock_ms: 0.0,
            world,
            camera: Vec2::ZERO,
            player: Player::new(world.center()),
            moving: false,
            enemies: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            particles: ParticlePool::new(settings.max_particles(), seed ^ 0x9e37_79b9),
            coins: Vec::new(),
            coin_count: 0,
            wave: 1,
            max_waves: settings.max_waves,
            phase: SessionPhase::Waves,
            cooldowns: Cooldowns::default(),
            message: None,
            scheduler: Scheduler::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        super::wave::spawn_wave(&mut state, 1);
        state.camera = state.world.camera_for(state.player.pos);
        state
    }

    /// Default settings with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Show a transient center-screen message, replacing any current one
    pub fn show_message(&mut self, text: impl Into<String>, duration_ms: f64) {
        self.message = Some(CenterMessage {
            text: text.into(),
            remaining_ms: duration_ms,
        });
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Damage the player and run the knock-out policy when it drops to 0
    pub fn hurt_player(&mut self, amount: i32) -> PlayerHit {
        let hit = self.player.damage(amount);
        self.settle_player_hit(hit);
        hit
    }

    /// Follow-up for a hit applied directly on `player`
    pub(crate) fn settle_player_hit(&mut self, hit: PlayerHit) {
        match hit {
            PlayerHit::Ignored => {}
            PlayerHit::Hurt(amount) => self.events.push(GameEvent::PlayerHurt { amount }),
            PlayerHit::Downed(amount) => {
                log::info!("Player down at wave {}", self.wave);
                self.events.push(GameEvent::PlayerHurt { amount });
                self.events.push(GameEvent::PlayerDowned);
                self.show_message("Kamu Kalah!", 1800.0);
                self.scheduler
                    .schedule(self.clock_ms + RESPAWN_DELAY_MS, ScheduledAction::Respawn);
            }
        }
    }

    pub(crate) fn parts(&mut self) -> Parts<'_> {
        Parts {
            targets: Targets {
                enemies: &mut self.enemies,
                boss: self.boss.as_mut(),
            },
            fx: Fx {
                particles: &mut self.particles,
                coins: &mut self.coins,
                rng: &mut self.rng,
                events: &mut self.events,
            },
            player: &mut self.player,
            projectiles: &mut self.projectiles,
        }
    }

    /// Number of enemies still standing
    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| !e.dead).count()
    }
}
