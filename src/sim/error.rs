//! Rejected player actions

use thiserror::Error;

use super::state::SkillSlot;

/// Why a player action did nothing. The display text is what the center
/// message shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("Coin kurang")]
    NotEnoughCoins { have: u32, need: u32 },

    #[error("Heal cooldown")]
    HealCoolingDown,

    #[error("HP penuh")]
    HealthFull,

    #[error("Belum punya buah!")]
    NoFruit,

    #[error("Cooldown")]
    SkillCoolingDown { slot: SkillSlot, remaining: u32 },

    #[error("Kamu Kalah!")]
    PlayerDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ActionRejected::NotEnoughCoins { have: 4, need: 5 };
        assert_eq!(err.to_string(), "Coin kurang");
        let err = ActionRejected::SkillCoolingDown {
            slot: SkillSlot::Two,
            remaining: 30,
        };
        assert_eq!(err.to_string(), "Cooldown");
    }
}
