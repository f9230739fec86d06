//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame pacing (fixed-step accumulator)
//! - Session seeding
//! - The browser bridge (`web`, wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::settings::Settings;
use crate::sim::{SimulationState, TickInput, tick};

/// Converts variable frame times into fixed simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Run as many ticks as `frame_dt` covers, capped at `MAX_SUBSTEPS`.
    /// One-shot buttons in `input` are consumed by the first tick.
    pub fn advance(
        &mut self,
        state: &mut SimulationState,
        input: &mut TickInput,
        frame_dt: f32,
    ) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            input.attack = false;
            input.heal = false;
            input.gacha = false;
            input.skill = None;
        }
        substeps
    }
}

/// Seed for a new session: the configured one, else the current time
pub fn session_seed(settings: &Settings) -> u64 {
    if let Some(seed) = settings.seed {
        return seed;
    }
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SkillSlot;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut state = SimulationState::with_seed(1);
        let mut step = FixedStep::default();
        let mut input = TickInput::default();

        assert_eq!(step.advance(&mut state, &mut input, SIM_DT * 0.5), 0);
        assert_eq!(step.advance(&mut state, &mut input, SIM_DT * 0.6), 1);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_clamps_long_frames_and_consumes_buttons() {
        let mut state = SimulationState::with_seed(2);
        let mut step = FixedStep::default();
        let mut input = TickInput {
            attack: true,
            skill: Some(SkillSlot::One),
            ..Default::default()
        };

        // A 1s hitch is clamped to 100ms of simulation
        let ran = step.advance(&mut state, &mut input, 1.0);
        assert!((5..=6).contains(&ran));
        assert!(!input.attack);
        assert_eq!(input.skill, None);
    }

    #[test]
    fn test_configured_seed_wins() {
        let settings = Settings {
            seed: Some(77),
            ..Settings::default()
        };
        assert_eq!(session_seed(&settings), 77);
    }
}
