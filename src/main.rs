//! Fruit Brawl headless runner
//!
//! Plays a session on autopilot and prints the final HUD as JSON.
//!
//! Usage: `fruit-brawl [settings.json|-] [ticks] [low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fruit_brawl::consts::SIM_DT;
    use fruit_brawl::platform::session_seed;
    use fruit_brawl::{QualityPreset, Settings};
    use fruit_brawl::sim::{GameEvent, SimulationState, autopilot, tick};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) if path != "-" => match Settings::load_from(&path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        _ => Settings::load(),
    };
    let ticks: u64 = args.next().and_then(|t| t.parse().ok()).unwrap_or(60 * 120);
    if let Some(name) = args.next() {
        match name.parse::<QualityPreset>() {
            Ok(quality) => settings.quality = quality,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    let seed = session_seed(&settings);
    settings.seed = Some(seed);
    log::info!(
        "Fruit Brawl (native) starting with seed {} ({:?} quality)",
        seed,
        settings.quality
    );

    let mut state = SimulationState::new(&settings);
    let mut kills = 0;
    for _ in 0..ticks {
        let input = autopilot::drive(&state);
        tick(&mut state, &input, SIM_DT);
        kills += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count();
    }

    log::info!(
        "Ran {} ticks ({:.1}s): {} kills, phase {:?}",
        ticks,
        state.clock_ms / 1000.0,
        kills,
        state.phase
    );
    match serde_json::to_string_pretty(&state.hud()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode HUD: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
