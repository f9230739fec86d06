//! Projectile update: telegraph lines, black holes and bolts
//!
//! Runs after enemy and boss movement, so every hit test sees this tick's
//! positions.

use glam::Vec2;

use super::damage::{Combatant, DamageOptions, Fx, Status, Targets, damage_in_radius, strike};
use super::particles::Burst;
use super::state::{Bolt, Parts, Player, Projectile, SimulationState, palette};

/// Extra reach added to a bolt's radius for its hit test
const BOLT_HIT_PADDING: f32 = 12.0;

/// Black hole left behind by a collapsing bolt
pub const BLACKHOLE_RADIUS: f32 = 70.0;
pub const BLACKHOLE_LIFE: u32 = 90;
pub const BLACKHOLE_DAMAGE: i32 = 50;
/// Pull applied to enemies inside 1.2x the radius, units per tick
const BLACKHOLE_PULL: f32 = 0.6;

pub fn blackhole_at(pos: Vec2) -> Projectile {
    Projectile::Blackhole {
        pos,
        radius: BLACKHOLE_RADIUS,
        life: BLACKHOLE_LIFE,
        damage: BLACKHOLE_DAMAGE,
        color: palette::VOID,
    }
}

/// Advance every projectile one tick and resolve its hits
pub fn update_projectiles(state: &mut SimulationState, dt: f32) {
    let now_ms = state.clock_ms;
    let Parts {
        mut targets,
        mut fx,
        player,
        projectiles,
    } = state.parts();
    let mut spawned = Vec::new();

    projectiles.retain_mut(|p| match p {
        Projectile::LaserWarning { life, .. } => {
            *life = life.saturating_sub(1);
            *life > 0
        }
        Projectile::Blackhole {
            pos,
            radius,
            life,
            damage,
            color,
        } => {
            *life = life.saturating_sub(1);
            for e in targets.enemies.iter_mut().filter(|e| !e.dead) {
                let to_center = *pos - e.pos;
                let d = to_center.length().max(1.0);
                if d < *radius * 1.2 {
                    e.pos += to_center / d * BLACKHOLE_PULL;
                }
            }
            if *life > 0 {
                return true;
            }
            damage_in_radius(
                &mut targets,
                &mut fx,
                *pos,
                *radius * 0.9,
                *damage,
                &DamageOptions::colored(*color),
                now_ms,
            );
            fx.particles.burst(*pos, Burst::new(*color, 60, 3.2, 2.2));
            false
        }
        Projectile::Bolt(bolt) => {
            let alive = step_bolt(bolt, &mut targets, &mut fx, &mut *player, dt, now_ms);
            if !alive && bolt.mods.collapse {
                spawned.push(blackhole_at(bolt.pos));
            }
            alive
        }
    });

    projectiles.extend(spawned);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitTarget {
    Enemy(usize),
    Boss,
}

/// Targets the bolt overlaps this tick, enemies first. A non-piercing bolt
/// only ever takes the first.
fn overlapping(bolt: &Bolt, targets: &Targets) -> Vec<HitTarget> {
    let reach = bolt.radius + BOLT_HIT_PADDING;
    let fresh = |id: u32, pos: Vec2| !bolt.struck.contains(&id) && pos.distance(bolt.pos) < reach;

    let mut hits: Vec<HitTarget> = targets
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.dead && fresh(e.id, e.pos))
        .map(|(i, _)| HitTarget::Enemy(i))
        .collect();
    let boss_hit = targets
        .boss
        .as_deref()
        .is_some_and(|boss| !boss.dead && fresh(boss.id, boss.pos));
    if boss_hit {
        hits.push(HitTarget::Boss);
    }
    if !bolt.mods.pierce {
        hits.truncate(1);
    }
    hits
}

/// Move a bolt and apply its hits. Returns false once it is spent.
fn step_bolt(
    bolt: &mut Bolt,
    targets: &mut Targets,
    fx: &mut Fx,
    player: &mut Player,
    dt: f32,
    now_ms: f64,
) -> bool {
    bolt.pos += bolt.vel * dt;
    bolt.life = bolt.life.saturating_sub(1);

    let status = Status {
        stun_secs: None,
        freeze_secs: bolt.mods.freeze_secs,
        slow: bolt.mods.slow,
    };
    let mut consumed = false;

    for hit in overlapping(bolt, targets) {
        let target: &mut dyn Combatant = match hit {
            HitTarget::Enemy(i) => &mut targets.enemies[i],
            HitTarget::Boss => match targets.boss.as_deref_mut() {
                Some(boss) => boss,
                None => continue,
            },
        };
        bolt.struck.push(target.id());
        strike(
            target,
            fx,
            bolt.damage,
            Burst::new(bolt.color, 10, 1.8, 1.2),
            &status,
            now_ms,
        );

        if let Some(radius) = bolt.mods.splash {
            let splash = (bolt.damage as f32 * 0.8).floor() as i32;
            damage_in_radius(
                targets,
                fx,
                bolt.pos,
                radius,
                splash,
                &DamageOptions::colored(bolt.color),
                now_ms,
            );
        }
        if let Some(drain) = bolt.mods.life_drain.filter(|_| !player.down) {
            player.restore((bolt.damage as f32 * drain).floor() as i32);
        }
        if !bolt.mods.pierce {
            consumed = true;
            break;
        }
    }

    !consumed && bolt.life > 0
}
