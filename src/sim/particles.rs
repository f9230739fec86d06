//! Particles and coins
//!
//! Particles are cosmetic and live in a bounded pool that evicts the oldest
//! entry when full. Coins drift, get pulled in by the player's magnet radius
//! and turn into the coin counter on pickup. Both step in per-tick units.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::{Coin, palette};
use crate::consts::{MAGNET_RADIUS, PICKUP_RADIUS};

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    /// Ticks left
    pub life: f32,
    pub color: u32,
}

/// Shape of a particle burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub color: u32,
    pub count: usize,
    pub spread: f32,
    pub power: f32,
}

impl Burst {
    pub const fn new(color: u32, count: usize, spread: f32, power: f32) -> Self {
        Self {
            color,
            count,
            spread,
            power,
        }
    }

    /// Feedback on a target taking damage
    pub const fn hit(color: u32) -> Self {
        Self::new(color, 12, 2.2, 1.6)
    }

    /// Burst on a target dying
    pub const DEATH: Burst = Burst::new(palette::DEATH_BURST, 28, 2.8, 2.0);
}

/// Bounded particle store with its own cosmetic RNG stream
#[derive(Debug, Clone)]
pub struct ParticlePool {
    items: VecDeque<Particle>,
    cap: usize,
    rng: Pcg32,
}

impl ParticlePool {
    pub fn new(cap: usize, seed: u64) -> Self {
        Self {
            items: VecDeque::with_capacity(cap.min(1024)),
            cap,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    /// Change the cap, dropping the oldest particles over it
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        while self.items.len() > cap {
            self.items.pop_front();
        }
    }

    /// Push one particle, evicting the oldest when the pool is full
    pub fn push(&mut self, particle: Particle) {
        if self.cap == 0 {
            return;
        }
        while self.items.len() >= self.cap {
            self.items.pop_front();
        }
        self.items.push_back(particle);
    }

    /// Spray particles in random directions from `pos`
    pub fn burst(&mut self, pos: Vec2, burst: Burst) {
        for _ in 0..burst.count {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = self.rng.random::<f32>() * burst.power * burst.spread;
            let life = 30.0 + self.rng.random::<f32>() * 40.0;
            self.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
                color: burst.color,
            });
        }
    }

    /// Random offset in `[-extent, extent]` on both axes, from the cosmetic stream
    pub fn jitter(&mut self, extent: f32) -> Vec2 {
        Vec2::new(
            self.rng.random_range(-extent..=extent),
            self.rng.random_range(-extent..=extent),
        )
    }

    /// Advance every particle one tick and drop expired ones
    pub fn update(&mut self) {
        for p in self.items.iter_mut() {
            p.pos += p.vel;
            p.life -= 1.0;
        }
        self.items.retain(|p| p.life > 0.0);
    }
}

/// Move coins, apply the magnet and collect the ones within pickup range.
/// Returns how many were collected.
pub fn update_coins(
    coins: &mut Vec<Coin>,
    player_pos: Vec2,
    particles: &mut ParticlePool,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut collected = 0;
    coins.retain_mut(|c| {
        let to_player = player_pos - c.pos;
        let d = to_player.length().max(1.0);
        if d < MAGNET_RADIUS {
            let pull = 6.0 * (1.0 - d / MAGNET_RADIUS);
            c.vel += to_player / d * pull * 0.12;
        } else {
            // Idle bob
            c.vel.y += (c.frame as f32 / 8.0).sin() * 0.02;
        }
        c.pos += c.vel;
        c.vel *= 0.92;
        c.frame += 1;

        if c.pos.distance(player_pos) < PICKUP_RADIUS {
            collected += 1;
            let at = player_pos + particles.jitter(6.0);
            particles.burst(at, Burst::new(palette::GOLD, 8, 1.2, 1.0));
            events.push(GameEvent::CoinCollected);
            false
        } else {
            true
        }
    });
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_evicts_oldest() {
        let mut pool = ParticlePool::new(3, 1);
        for i in 0..5 {
            pool.push(Particle {
                pos: Vec2::new(i as f32, 0.0),
                vel: Vec2::ZERO,
                life: 10.0,
                color: 0,
            });
        }
        assert_eq!(pool.len(), 3);
        let xs: Vec<f32> = pool.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_lowering_cap_drops_oldest() {
        let mut pool = ParticlePool::new(900, 1);
        pool.burst(Vec2::ZERO, Burst::new(0, 40, 2.0, 1.0));
        let newest = pool.iter().last().map(|p| p.vel);

        pool.set_cap(10);
        assert_eq!(pool.cap(), 10);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.iter().last().map(|p| p.vel), newest);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut pool = ParticlePool::new(50, 1);
        for _ in 0..10 {
            pool.burst(Vec2::ZERO, Burst::new(0, 28, 2.8, 2.0));
        }
        assert_eq!(pool.len(), 50);
    }

    #[test]
    fn test_particles_expire() {
        let mut pool = ParticlePool::new(100, 1);
        pool.burst(Vec2::ZERO, Burst::hit(0));
        assert_eq!(pool.len(), 12);
        // Max life is 70 ticks
        for _ in 0..71 {
            pool.update();
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn test_coin_pickup_counts_once() {
        let mut coins = vec![
            Coin::new(Vec2::new(105.0, 100.0)),
            Coin::new(Vec2::new(900.0, 900.0)),
        ];
        let mut pool = ParticlePool::new(100, 1);
        let mut events = Vec::new();

        let collected = update_coins(&mut coins, Vec2::new(100.0, 100.0), &mut pool, &mut events);
        assert_eq!(collected, 1);
        assert_eq!(coins.len(), 1);
        assert_eq!(events, vec![GameEvent::CoinCollected]);
    }

    #[test]
    fn test_coin_magnet_pulls_toward_player() {
        let player = Vec2::new(0.0, 0.0);
        let mut coins = vec![Coin::new(Vec2::new(100.0, 0.0))];
        let mut pool = ParticlePool::new(100, 1);
        let mut events = Vec::new();

        let mut collected = 0;
        for _ in 0..200 {
            collected += update_coins(&mut coins, player, &mut pool, &mut events);
        }
        assert_eq!(collected, 1);
        assert!(coins.is_empty());
    }

    #[test]
    fn test_coin_outside_magnet_stays_put() {
        let mut coins = vec![Coin::new(Vec2::new(500.0, 0.0))];
        let mut pool = ParticlePool::new(100, 1);
        let mut events = Vec::new();
        for _ in 0..30 {
            update_coins(&mut coins, Vec2::ZERO, &mut pool, &mut events);
        }
        assert_eq!(coins.len(), 1);
        assert!((coins[0].pos.x - 500.0).abs() < 1e-3);
    }
}
