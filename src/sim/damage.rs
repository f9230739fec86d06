//! Damage resolution shared by attacks, skills, projectiles and the boss
//!
//! Every hit on an enemy or the boss goes through `strike`, so the death
//! transition (burst, coin drop, kill event) happens exactly once per target
//! no matter which system landed the blow.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::geometry::within_radius;
use super::particles::{Burst, ParticlePool};
use super::state::{Boss, Coin, Enemy, Slow, palette};

/// Something that can be hit and killed
pub trait Combatant {
    fn id(&self) -> u32;
    fn pos(&self) -> Vec2;
    fn is_alive(&self) -> bool;

    /// Subtract hp, clamped to zero. Returns true only on the killing blow.
    fn take_damage(&mut self, amount: i32) -> bool;

    /// Timed status effects; the boss shrugs them off
    fn apply_status(&mut self, _status: &Status, _now_ms: f64) {}
}

impl Combatant for Enemy {
    fn id(&self) -> u32 {
        self.id
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn is_alive(&self) -> bool {
        !self.dead
    }

    fn take_damage(&mut self, amount: i32) -> bool {
        if self.dead {
            return false;
        }
        self.hp = (self.hp - amount).clamp(0, self.max_hp);
        if self.hp == 0 {
            self.dead = true;
            return true;
        }
        false
    }

    fn apply_status(&mut self, status: &Status, now_ms: f64) {
        if let Some(secs) = status.stun_secs {
            self.stun_until_ms = Some(now_ms + secs as f64 * 1000.0);
        }
        if let Some(secs) = status.freeze_secs {
            self.freeze_until_ms = Some(now_ms + secs as f64 * 1000.0);
        }
        if let Some((factor, secs)) = status.slow {
            self.slow = Some(Slow {
                factor,
                until_ms: now_ms + secs as f64 * 1000.0,
            });
        }
    }
}

impl Combatant for Boss {
    fn id(&self) -> u32 {
        self.id
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn is_alive(&self) -> bool {
        !self.dead
    }

    fn take_damage(&mut self, amount: i32) -> bool {
        if self.dead {
            return false;
        }
        self.hp = (self.hp - amount).clamp(0, self.max_hp);
        if self.hp == 0 {
            self.dead = true;
            return true;
        }
        false
    }
}

/// Status effects carried by a hit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Status {
    pub stun_secs: Option<f32>,
    pub freeze_secs: Option<f32>,
    /// (speed factor, seconds)
    pub slow: Option<(f32, f32)>,
}

/// Options for `damage_in_radius`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOptions {
    pub color: u32,
    pub status: Status,
    /// Leave the boss out (its own strike must not hurt it)
    pub spare_boss: bool,
}

impl Default for DamageOptions {
    fn default() -> Self {
        Self {
            color: palette::WHITE,
            status: Status::default(),
            spare_boss: false,
        }
    }
}

impl DamageOptions {
    pub fn colored(color: u32) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

/// Totals from one damage application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    pub hits: u32,
    pub kills: u32,
}

/// Everything a hit can land on
pub struct Targets<'a> {
    pub enemies: &'a mut [Enemy],
    pub boss: Option<&'a mut Boss>,
}

/// Side-effect sinks for hits: feedback particles, coin drops, events
pub struct Fx<'a> {
    pub particles: &'a mut ParticlePool,
    pub coins: &'a mut Vec<Coin>,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
}

/// Land one hit: feedback burst, status, and the death transition if this
/// blow kills. Dead targets are left untouched. Returns true on a kill.
pub fn strike(
    target: &mut dyn Combatant,
    fx: &mut Fx,
    damage: i32,
    burst: Burst,
    status: &Status,
    now_ms: f64,
) -> bool {
    if !target.is_alive() {
        return false;
    }
    let killed = target.take_damage(damage);
    fx.particles.burst(target.pos(), burst);
    target.apply_status(status, now_ms);
    if killed {
        on_kill(target.id(), target.pos(), fx);
    }
    killed
}

/// Death burst and a 1-2 coin drop around the body
fn on_kill(id: u32, pos: Vec2, fx: &mut Fx) {
    fx.particles.burst(pos, Burst::DEATH);
    let drops = fx.rng.random_range(1..=2u32);
    for _ in 0..drops {
        let jitter = Vec2::new(
            fx.rng.random_range(-8.0..8.0),
            fx.rng.random_range(-8.0..8.0),
        );
        fx.coins.push(Coin::new(pos + jitter));
    }
    fx.events.push(GameEvent::EnemyKilled { id, coins: drops });
}

/// Damage every living enemy (and the boss) within `radius` of `center`,
/// boundary inclusive
pub fn damage_in_radius(
    targets: &mut Targets,
    fx: &mut Fx,
    center: Vec2,
    radius: f32,
    damage: i32,
    opts: &DamageOptions,
    now_ms: f64,
) -> HitReport {
    let mut report = HitReport::default();
    let burst = Burst::hit(opts.color);
    let mut apply = |t: &mut dyn Combatant| {
        if within_radius(t.pos(), center, radius) {
            report.hits += 1;
            if strike(t, fx, damage, burst, &opts.status, now_ms) {
                report.kills += 1;
            }
        }
    };

    for e in targets.enemies.iter_mut().filter(|e| !e.dead) {
        apply(e as &mut dyn Combatant);
    }
    let boss = targets.boss.as_deref_mut().filter(|_| !opts.spare_boss);
    if let Some(boss) = boss {
        apply(boss as &mut dyn Combatant);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyKind;
    use rand::SeedableRng;

    struct Rig {
        enemies: Vec<Enemy>,
        boss: Option<Boss>,
        particles: ParticlePool,
        coins: Vec<Coin>,
        rng: Pcg32,
        events: Vec<GameEvent>,
    }

    impl Rig {
        fn new(enemies: Vec<Enemy>, boss: Option<Boss>) -> Self {
            Self {
                enemies,
                boss,
                particles: ParticlePool::new(900, 1),
                coins: Vec::new(),
                rng: Pcg32::seed_from_u64(42),
                events: Vec::new(),
            }
        }

        fn blast(
            &mut self,
            center: Vec2,
            radius: f32,
            damage: i32,
            opts: &DamageOptions,
        ) -> HitReport {
            let mut targets = Targets {
                enemies: &mut self.enemies,
                boss: self.boss.as_mut(),
            };
            let mut fx = Fx {
                particles: &mut self.particles,
                coins: &mut self.coins,
                rng: &mut self.rng,
                events: &mut self.events,
            };
            damage_in_radius(&mut targets, &mut fx, center, radius, damage, opts, 0.0)
        }
    }

    #[test]
    fn test_kill_drops_one_or_two_coins() {
        let enemy = Enemy::new(1, EnemyKind::Common, Vec2::new(100.0, 100.0), 60);
        let mut rig = Rig::new(vec![enemy], None);

        let center = Vec2::new(100.0, 100.0);
        let report = rig.blast(center, 10.0, 70, &DamageOptions::default());
        assert_eq!(report, HitReport { hits: 1, kills: 1 });
        assert!(rig.enemies[0].dead);
        assert_eq!(rig.enemies[0].hp, 0);
        assert!((1..=2).contains(&rig.coins.len()));
    }

    #[test]
    fn test_dead_targets_are_not_hit_again() {
        let enemy = Enemy::new(1, EnemyKind::Common, Vec2::ZERO, 60);
        let mut rig = Rig::new(vec![enemy], None);
        rig.blast(Vec2::ZERO, 10.0, 70, &DamageOptions::default());
        let coins = rig.coins.len();

        let report = rig.blast(Vec2::ZERO, 10.0, 70, &DamageOptions::default());
        assert_eq!(report, HitReport::default());
        assert_eq!(rig.coins.len(), coins);
        let kills = rig
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let near = Enemy::new(1, EnemyKind::Common, Vec2::new(50.0, 0.0), 100);
        let far = Enemy::new(2, EnemyKind::Common, Vec2::new(50.5, 0.0), 100);
        let mut rig = Rig::new(vec![near, far], None);

        let report = rig.blast(Vec2::ZERO, 50.0, 10, &DamageOptions::default());
        assert_eq!(report.hits, 1);
        assert_eq!(rig.enemies[0].hp, 90);
        assert_eq!(rig.enemies[1].hp, 100);
    }

    #[test]
    fn test_boss_hit_unless_spared() {
        let boss = Boss::new(9, Vec2::ZERO);
        let mut rig = Rig::new(Vec::new(), Some(boss));

        rig.blast(Vec2::ZERO, 80.0, 60, &DamageOptions::default());
        assert_eq!(rig.boss.as_ref().map(|b| b.hp), Some(840));

        let spared = DamageOptions {
            spare_boss: true,
            ..DamageOptions::default()
        };
        rig.blast(Vec2::ZERO, 80.0, 60, &spared);
        assert_eq!(rig.boss.as_ref().map(|b| b.hp), Some(840));
    }

    #[test]
    fn test_status_applies_to_enemies() {
        let enemy = Enemy::new(1, EnemyKind::Tank, Vec2::ZERO, 500);
        let mut rig = Rig::new(vec![enemy], None);
        let opts = DamageOptions {
            status: Status {
                stun_secs: Some(0.5),
                freeze_secs: Some(1.0),
                slow: None,
            },
            ..DamageOptions::default()
        };
        rig.blast(Vec2::ZERO, 10.0, 1, &opts);
        assert_eq!(rig.enemies[0].stun_until_ms, Some(500.0));
        assert_eq!(rig.enemies[0].freeze_until_ms, Some(1000.0));
    }

    #[test]
    fn test_hp_never_negative() {
        let enemy = Enemy::new(1, EnemyKind::Common, Vec2::ZERO, 10);
        let mut rig = Rig::new(vec![enemy], None);
        rig.blast(Vec2::ZERO, 1.0, 9999, &DamageOptions::default());
        assert_eq!(rig.enemies[0].hp, 0);
    }
}
