//! Ghost Shooter entry point
//!
//! Runs the simulation headless under the autopilot and prints the final
//! frame as JSON. Usage: `ghost-shooter [frames] [seed] [settings.json]`

use ghost_shooter::Settings;
use ghost_shooter::consts::*;
use ghost_shooter::sim::{FrameInput, GameEvent, GameState, tick};

const DEFAULT_FRAMES: u64 = 60 * 60;
const DEFAULT_SEED: u64 = 0x6057;

fn main() {
    env_logger::init();
    log::info!("{} (headless) starting...", WINDOW_TITLE);

    let mut args = std::env::args().skip(1);
    let frames = parse_arg(args.next(), "frames", DEFAULT_FRAMES);
    let seed = parse_arg(args.next(), "seed", DEFAULT_SEED);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut state = GameState::with_settings(settings, seed);
    let input = FrameInput {
        dt: FRAME_DT,
        autopilot: true,
        ..Default::default()
    };

    let mut sessions = 0u32;
    for _ in 0..frames {
        tick(&mut state, &input);
        for event in state.drain_events() {
            if let GameEvent::PlayerCaught { .. } = event {
                sessions += 1;
                log::info!("Session {} over, final score {}", sessions, state.score);
            }
        }
    }

    log::info!(
        "Ran {} frames, {} sessions ended, best score {}",
        frames,
        sessions,
        state.best_score
    );

    match serde_json::to_string(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize snapshot: {err}"),
    }
}

fn parse_arg(arg: Option<String>, name: &str, default: u64) -> u64 {
    match arg.map(|a| a.parse::<u64>()) {
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            log::warn!("Invalid {name} argument ({err}), using {default}");
            default
        }
        None => default,
    }
}
