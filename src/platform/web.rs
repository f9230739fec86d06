//! Browser bridge
//!
//! The page owns input decoding and drawing. It feeds button presses and
//! frame times into a `WebSession` and pulls JSON snapshots back out.

use wasm_bindgen::prelude::*;

use super::{FixedStep, session_seed};
use crate::settings::{QualityPreset, Settings};
use crate::sim::{Movement, SimulationState, SkillSlot, TickInput};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}

/// One running session
#[wasm_bindgen]
pub struct WebSession {
    settings: Settings,
    state: SimulationState,
    step: FixedStep,
    input: TickInput,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        let settings = Settings::load();
        let seed = session_seed(&settings);
        log::info!("Session started with seed: {}", seed);
        let state = SimulationState::new(&Settings {
            seed: Some(seed),
            ..settings.clone()
        });
        WebSession {
            settings,
            state,
            step: FixedStep::default(),
            input: TickInput::default(),
        }
    }

    /// Held direction keys / D-pad state
    pub fn set_direction(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.input.movement = Movement {
            up,
            down,
            left,
            right,
        };
    }

    pub fn attack(&mut self) {
        self.input.attack = true;
    }

    pub fn heal(&mut self) {
        self.input.heal = true;
    }

    pub fn gacha(&mut self) {
        self.input.gacha = true;
    }

    /// Skill button 1-3; other numbers are ignored
    pub fn skill(&mut self, slot: u8) {
        if let Some(slot) = SkillSlot::from_number(slot) {
            self.input.skill = Some(slot);
        }
    }

    /// Switch the particle preset ("low", "medium", "high") and persist it.
    /// Returns false for an unknown name.
    pub fn set_quality(&mut self, name: &str) -> bool {
        match name.parse::<QualityPreset>() {
            Ok(quality) => {
                self.settings.quality = quality;
                self.state.particles.set_cap(quality.max_particles());
                self.settings.save();
                true
            }
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Advance by a frame's elapsed seconds. Returns ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.step.advance(&mut self.state, &mut self.input, dt)
    }

    /// Drained event list as JSON
    pub fn events_json(&mut self) -> String {
        let events = self.state.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".into())
    }

    pub fn hud_json(&self) -> String {
        serde_json::to_string(&self.state.hud()).unwrap_or_else(|_| "{}".into())
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|_| "{}".into())
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
