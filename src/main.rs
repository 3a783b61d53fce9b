//! Smashout entry point
//!
//! Runs the simulation headlessly: the paddle steers itself, lifecycle
//! events go to the log, and a win or loss prompts for a restart on stdin.
//! Rendering and real input belong to an embedding engine, not this
//! binary.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use smashout::GameConfig;
use smashout::consts::SIM_DT;
use smashout::sim::{GamePhase, GameState, Outcome, TickInput, tick};

/// Hard cap on a single headless session (an hour of simulated play)
const MAX_SESSION_TICKS: u64 = 120 * 60 * 60;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = GameConfig::from_args(std::env::args().skip(1))?;
    log::info!(
        "smashout starting: {}x{} brick grid",
        config.cols,
        config.rows
    );

    let mut seed = time_seed();
    loop {
        let Some(outcome) = run_session(config, seed) else {
            log::warn!("session hit the tick cap without ending; giving up");
            break;
        };
        if !prompt_play_again(outcome)? {
            break;
        }
        seed = seed.wrapping_add(1);
    }
    Ok(())
}

/// Run one session to its terminal phase
fn run_session(config: GameConfig, seed: u64) -> Option<Outcome> {
    let mut state = GameState::new(config, seed);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    loop {
        tick(&mut state, &input, SIM_DT);
        if let GamePhase::GameOver(outcome) = state.phase {
            log::info!(
                "session ended after {} ticks with {} lives and {} bricks left",
                state.time_ticks,
                state.session.lives,
                state.session.bricks_left
            );
            return Some(outcome);
        }
        if state.time_ticks >= MAX_SESSION_TICKS {
            return None;
        }
    }
}

/// Terminal prompt: restart rebuilds the whole session, anything else quits
fn prompt_play_again(outcome: Outcome) -> anyhow::Result<bool> {
    let banner = match outcome {
        Outcome::Won => "You win!",
        Outcome::Lost => "You lose!",
    };
    print!("{banner} Play again? [y/n] ");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    // EOF (piped stdin) quits rather than looping forever
    Ok(read > 0 && matches!(line.trim(), "y" | "Y" | "yes"))
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
