//! Altimate Curling headless driver
//!
//! Plays a scripted match through the same path a front end would use: a
//! 30 Hz "display" feeds frame time into a fixed-step clock, input is
//! gathered per tick, and the final result is printed as JSON.
//!
//! Usage: `altimate-curling [config.json]`

#[cfg(not(target_arch = "wasm32"))]
use altimate_curling::{
    FixedStepClock, MatchConfig,
    sim::{AimField, MatchEvent, MatchPhase, MatchSnapshot, TickInput, TurnController},
};

/// Presentation frame rate of the headless driver
#[cfg(not(target_arch = "wasm32"))]
const DISPLAY_HZ: f32 = 30.0;

/// Gives up if a match somehow never finishes (10 minutes of frames)
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u32 = 30 * 600;

/// Per-turn plan for the scripted players
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
struct Plan {
    vertical_offset: f32,
    strength: f32,
    /// Launch once the gauge reaches this value
    release_at: f32,
}

#[cfg(not(target_arch = "wasm32"))]
fn plan_for(turn_index: u32) -> Plan {
    const OFFSETS: [f32; 4] = [15.0, 13.0, 17.0, 15.0];
    const STRENGTHS: [f32; 3] = [7.4, 8.0, 7.0];
    Plan {
        vertical_offset: OFFSETS[turn_index as usize % OFFSETS.len()],
        strength: STRENGTHS[turn_index as usize % STRENGTHS.len()],
        release_at: if turn_index % 2 == 0 { 0.9 } else { 0.8 },
    }
}

/// Input a scripted player would press this tick
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(snapshot: &MatchSnapshot) -> TickInput {
    let mut input = TickInput::default();
    if snapshot.phase != MatchPhase::Aiming {
        return input;
    }

    let plan = plan_for(snapshot.turn_index);
    let shot = snapshot.pending_shot;
    let mut aligned = true;
    for (field, current, target) in [
        (AimField::VerticalOffset, shot.vertical_offset, plan.vertical_offset),
        (AimField::Strength, shot.strength, plan.strength),
    ] {
        let step = field.step();
        if (target - current).abs() > step / 2.0 {
            input.aim.push((field, (target - current).signum() * step));
            aligned = false;
        }
    }

    input.launch = aligned && shot.power_gauge >= plan.release_at;
    input
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> altimate_curling::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };

    let mut clock = FixedStepClock::from_rate(config.tick_rate_hz);
    let mut controller = TurnController::new(config)?;

    for _ in 0..MAX_FRAMES {
        let ticks = clock.advance(1.0 / DISPLAY_HZ);
        for _ in 0..ticks {
            let input = scripted_input(&controller.snapshot());
            controller.advance(&input);
        }

        for event in controller.drain_events() {
            match event {
                MatchEvent::StoneLaunched { owner, kind, shot, .. } => log::info!(
                    "{owner:?} launched {} at strength {:.2}, angle {:.3}",
                    kind.display_name(),
                    shot.strength,
                    shot.angle
                ),
                MatchEvent::StoneCollision { first, second } => {
                    log::debug!("Stones {first} and {second} collided")
                }
                other => log::trace!("{other:?}"),
            }
        }

        if controller.phase() == MatchPhase::Finished {
            break;
        }
    }

    match controller.result() {
        Some(result) => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{json}");
        }
        None => log::warn!("Match did not finish"),
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Altimate Curling (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive the library directly
}
