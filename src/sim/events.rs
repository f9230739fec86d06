//! Deferred actions, transient messages and host-facing events
//!
//! Anything that resolves "later" is a `Scheduled` entry with a deadline on
//! the simulation clock. The tick runs due entries inside its own update
//! pass; nothing mutates state from outside it.

use serde::{Deserialize, Serialize};

use super::skills::PendingSkill;
use super::state::{FruitKind, SkillSlot};

/// Center-screen message with its remaining display time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterMessage {
    pub text: String,
    pub remaining_ms: f64,
}

/// Notable things that happened during a tick, for audio/HUD hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { wave: u32, enemies: usize },
    BossSpawned,
    BossDefeated,
    EnemyKilled { id: u32, coins: u32 },
    CoinCollected,
    PlayerHurt { amount: i32 },
    PlayerDowned,
    PlayerRespawned,
    FruitAcquired { fruit: FruitKind },
    SkillFired { slot: SkillSlot },
}

/// What a scheduled entry does when it comes due
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledAction {
    /// Resolve a skill after its lock-on telegraph
    FireSkill(PendingSkill),
    Respawn,
    HealReady,
    AdvanceWave,
}

#[derive(Debug, Clone, PartialEq)]
struct Scheduled {
    due_ms: f64,
    seq: u64,
    action: ScheduledAction,
}

/// Deadline queue; entries are never cancelled
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn schedule(&mut self, due_ms: f64, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due_ms,
            seq,
            action,
        });
    }

    /// Remove and return every action due at `now_ms`, earliest first.
    /// Equal deadlines keep insertion order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<ScheduledAction> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|s| s.due_ms <= now_ms);
        self.queue = rest;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.action).collect()
    }

    /// Whether any pending entry matches
    pub fn any(&self, pred: impl Fn(&ScheduledAction) -> bool) -> bool {
        self.queue.iter().any(|s| pred(&s.action))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_orders_by_deadline_then_insertion() {
        let mut s = Scheduler::default();
        s.schedule(300.0, ScheduledAction::AdvanceWave);
        s.schedule(100.0, ScheduledAction::Respawn);
        s.schedule(100.0, ScheduledAction::HealReady);
        s.schedule(900.0, ScheduledAction::AdvanceWave);

        assert!(s.take_due(50.0).is_empty());
        let due = s.take_due(300.0);
        assert_eq!(
            due,
            vec![
                ScheduledAction::Respawn,
                ScheduledAction::HealReady,
                ScheduledAction::AdvanceWave
            ]
        );
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_any_matches_pending() {
        let mut s = Scheduler::default();
        assert!(!s.any(|a| matches!(a, ScheduledAction::Respawn)));
        s.schedule(10.0, ScheduledAction::Respawn);
        assert!(s.any(|a| matches!(a, ScheduledAction::Respawn)));
        s.take_due(10.0);
        assert!(s.is_empty());
    }
}
