//! Lario headless runner
//!
//! Loads the configuration and level files, plays one session with a simple
//! autopilot at a simulated 60 Hz and prints the outcome as JSON.
//!
//! Usage: `lario [seed]`

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use lario::consts::SIM_DT;
#[cfg(not(target_arch = "wasm32"))]
use lario::sim::{Action, GameState, InputEvent, LevelLibrary, Outcome, Snapshot, TickInput, tick};
#[cfg(not(target_arch = "wasm32"))]
use lario::{GameConfig, LevelError};

/// Frames without horizontal progress before the autopilot jumps
#[cfg(not(target_arch = "wasm32"))]
const STALL_FRAMES: u32 = 3;
/// Jump every so often even when not blocked, to clear spikes and gaps
#[cfg(not(target_arch = "wasm32"))]
const JUMP_INTERVAL: u64 = 90;

/// Plays by holding right and jumping when stuck
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct Autopilot {
    frame: u64,
    last_x: f32,
    last_room: usize,
    stalled: u32,
    jumping: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Autopilot {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut events = Vec::new();
        if self.frame == 0 {
            events.push(InputEvent::Press(Action::MoveRight));
        }
        self.frame += 1;

        let player = &state.player;
        let progressed =
            state.active_index != self.last_room || (player.pos.x - self.last_x).abs() > 0.5;
        self.stalled = if progressed { 0 } else { self.stalled + 1 };
        self.last_room = state.active_index;
        self.last_x = player.pos.x;

        if self.jumping {
            events.push(InputEvent::Release(Action::Jump));
            self.jumping = false;
        } else if player.on_ground
            && (self.stalled >= STALL_FRAMES || self.frame % JUMP_INTERVAL == 0)
        {
            events.push(InputEvent::Press(Action::Jump));
            self.jumping = true;
        }

        TickInput::new(events)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(seed_arg: Option<u64>) -> Result<Outcome, LevelError> {
    let config = GameConfig::load();
    let library = LevelLibrary::load_dir(&config);
    let seed = seed_arg
        .or(config.seed)
        .unwrap_or_else(rand::random::<u64>);

    let mut state = GameState::new(config, library, seed)?;
    let mut autopilot = Autopilot::default();
    let mut second = 0.0;

    loop {
        let input = autopilot.next_input(&state);
        tick(&mut state, &input, SIM_DT);

        // One-second countdown driven by simulated time
        second += SIM_DT;
        if second >= 1.0 {
            second -= 1.0;
            state.decrement_timer();
            let snap = Snapshot::capture(&state);
            log::debug!(
                "t={} room={}/{} coins={} health={}",
                snap.hud.time_remaining,
                snap.hud.room_index,
                snap.hud.room_count,
                snap.hud.coin_count,
                snap.player.health
            );
        }

        if let Some(outcome) = state.outcome() {
            return Ok(outcome);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Lario (headless) starting...");

    let seed = std::env::args().nth(1).and_then(|arg| match arg.parse() {
        Ok(seed) => Some(seed),
        Err(err) => {
            log::warn!("Ignoring seed argument {arg:?}: {err}");
            None
        }
    });

    match run(seed) {
        Ok(outcome) => {
            match serde_json::to_string_pretty(&outcome) {
                Ok(json) => println!("{json}"),
                Err(err) => log::error!("Failed to serialize outcome: {err}"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Cannot start session: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; the library is the entry point there
}
