//! Game state and session lifecycle
//!
//! Everything a session needs lives here: the room sequence, the player,
//! counters, the countdown and the phase machine. Per-frame advancement is in
//! `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::levels::{LevelLibrary, generate_level};
use super::player::{Action, InputEvent, Player};
use super::room::Room;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::LevelError;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// Reached the exit holding the key
    Won,
    /// Health ran out
    LostHealth,
    /// Countdown ran out
    LostTime,
}

impl Ending {
    pub fn reason(&self) -> &'static str {
        match self {
            Ending::Won => "escaped",
            Ending::LostHealth => "health depleted",
            Ending::LostTime => "time expired",
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running
    Active,
    /// Frozen; ticks and the countdown do nothing
    Paused,
    /// Run over
    Completed(Ending),
}

/// Terminal result handed to presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub won: bool,
    pub score: u64,
    pub reason: String,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    library: LevelLibrary,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Room sequence, always `config.room_count` long
    pub rooms: Vec<Room>,
    /// Index of the room the player is in
    pub active_index: usize,
    pub player: Player,
    pub coin_count: u32,
    pub key_collected: bool,
    /// Countdown in whole seconds
    pub time_remaining: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Start a session. Fails if the levels cannot form a valid sequence.
    pub fn new(config: GameConfig, library: LevelLibrary, seed: u64) -> Result<Self, LevelError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let rooms = generate_level(
            &library,
            config.room_count,
            config.key_required_coins,
            &mut rng,
        )?;
        let player = spawn_player(&rooms[0])?;
        let time_remaining = config.initial_time_secs;

        log::info!("New session (seed {seed})");
        Ok(Self {
            config,
            library,
            seed,
            rng,
            rooms,
            active_index: 0,
            player,
            coin_count: 0,
            key_collected: false,
            time_remaining,
            phase: GamePhase::Active,
        })
    }

    /// Start over with a freshly generated room sequence. On error the
    /// current session is left untouched.
    pub fn reset(&mut self) -> Result<(), LevelError> {
        let rooms = generate_level(
            &self.library,
            self.config.room_count,
            self.config.key_required_coins,
            &mut self.rng,
        )?;
        self.player = spawn_player(&rooms[0])?;
        self.rooms = rooms;
        self.active_index = 0;
        self.coin_count = 0;
        self.key_collected = false;
        self.time_remaining = self.config.initial_time_secs;
        self.phase = GamePhase::Active;
        log::info!("Session reset");
        Ok(())
    }

    pub fn active_room(&self) -> &Room {
        debug_assert!(self.active_index < self.rooms.len());
        &self.rooms[self.active_index]
    }

    pub fn active_room_mut(&mut self) -> &mut Room {
        debug_assert!(self.active_index < self.rooms.len());
        &mut self.rooms[self.active_index]
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Completed(_))
    }

    /// Pause or resume. Pausing drops held input so movement does not carry
    /// over the pause. Has no effect once the run is over.
    pub fn set_paused(&mut self, paused: bool) {
        match (self.phase, paused) {
            (GamePhase::Active, true) => {
                self.phase = GamePhase::Paused;
                self.player.reset_input_state();
                log::info!("Paused");
            }
            (GamePhase::Paused, false) => {
                self.phase = GamePhase::Active;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.is_paused();
        self.set_paused(!paused);
    }

    /// Apply one key event. Presses are ignored unless the run is active;
    /// releases always apply.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(Action::Pause) => self.toggle_pause(),
            InputEvent::Press(action) => {
                if self.phase == GamePhase::Active {
                    self.player.input.set(action, true);
                }
            }
            InputEvent::Release(action) => self.player.input.set(action, false),
        }
    }

    /// One-second countdown step. Returns whether time remains.
    /// While paused the timer holds and this reports `true`.
    pub fn decrement_timer(&mut self) -> bool {
        match self.phase {
            GamePhase::Paused => true,
            GamePhase::Completed(_) => false,
            GamePhase::Active => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    self.finish(Ending::LostTime);
                    return false;
                }
                true
            }
        }
    }

    /// Score at this moment: zero if the player is dead or out of time
    pub fn calculate_score(&self) -> u64 {
        if !self.player.alive || self.time_remaining == 0 {
            return 0;
        }
        self.time_remaining as u64 * SCORE_PER_SECOND
            + self.coin_count as u64 * SCORE_PER_COIN
            + self.player.health as u64 * SCORE_PER_HEALTH
    }

    /// Terminal result, once the run is over
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Completed(ending) => Some(Outcome {
                won: ending == Ending::Won,
                score: self.calculate_score(),
                reason: ending.reason().to_string(),
            }),
            _ => None,
        }
    }

    pub(crate) fn finish(&mut self, ending: Ending) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::Completed(ending);
        log::info!(
            "Run over: {} (score {})",
            ending.reason(),
            self.calculate_score()
        );
    }
}

fn spawn_player(room: &Room) -> Result<Player, LevelError> {
    let spawn = room.spawn.ok_or_else(|| LevelError::MissingSpawn {
        name: room.name.clone(),
    })?;
    Ok(Player::new(spawn.pos, spawn.radius))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::levels::tests::library;

    pub(crate) fn new_state() -> GameState {
        GameState::new(GameConfig::default(), library(3), 12345).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.rooms.len(), 6);
        assert_eq!(state.active_index, 0);
        assert_eq!(state.time_remaining, 120);
        assert_eq!(state.player.pos, state.rooms[0].spawn.unwrap().pos);
        assert!(state.outcome().is_none());
    }

    #[test]
    fn test_score_formula() {
        let mut state = new_state();
        state.time_remaining = 50;
        state.coin_count = 4;
        state.player.health = 80;
        assert_eq!(state.calculate_score(), 1100);

        state.player.alive = false;
        assert_eq!(state.calculate_score(), 0);

        state.player.alive = true;
        state.time_remaining = 0;
        assert_eq!(state.calculate_score(), 0);
    }

    #[test]
    fn test_pause_resets_input_and_freezes_timer() {
        let mut state = new_state();
        state.handle_event(InputEvent::Press(Action::MoveRight));
        assert!(state.player.input.right);

        state.handle_event(InputEvent::Press(Action::Pause));
        assert!(state.is_paused());
        assert!(!state.player.input.right);

        // Presses while paused do not stick
        state.handle_event(InputEvent::Press(Action::MoveLeft));
        assert!(!state.player.input.left);

        assert!(state.decrement_timer());
        assert_eq!(state.time_remaining, 120);

        state.handle_event(InputEvent::Press(Action::Pause));
        assert_eq!(state.phase, GamePhase::Active);
        assert!(state.decrement_timer());
        assert_eq!(state.time_remaining, 119);
    }

    #[test]
    fn test_timer_runs_out() {
        let mut state = new_state();
        state.time_remaining = 2;
        assert!(state.decrement_timer());
        assert!(!state.decrement_timer());
        assert_eq!(state.phase, GamePhase::Completed(Ending::LostTime));
        let outcome = state.outcome().unwrap();
        assert!(!outcome.won);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.reason, "time expired");

        // Completed is terminal
        state.set_paused(true);
        assert_eq!(state.phase, GamePhase::Completed(Ending::LostTime));
        assert!(!state.decrement_timer());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = new_state();
        state.coin_count = 9;
        state.key_collected = true;
        state.active_index = 3;
        state.time_remaining = 1;
        state.player.apply_damage(40);
        state.finish(Ending::LostHealth);

        state.reset().unwrap();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.coin_count, 0);
        assert!(!state.key_collected);
        assert_eq!(state.active_index, 0);
        assert_eq!(state.time_remaining, 120);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.rooms[0].name, "start");
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = GameConfig {
            room_count: 1,
            ..Default::default()
        };
        assert!(GameState::new(config, library(3), 1).is_err());

        let config = GameConfig {
            room_count: 10,
            ..Default::default()
        };
        assert_eq!(
            GameState::new(config, library(3), 1).unwrap_err(),
            LevelError::PoolExhausted {
                needed: 7,
                available: 3
            }
        );
    }

    #[test]
    fn test_spawn_requires_marker() {
        let room = Room::parse("bare", "....\nXXXX", 5);
        assert_eq!(
            spawn_player(&room).unwrap_err(),
            LevelError::MissingSpawn {
                name: "bare".into()
            }
        );

        let room = Room::parse("start", "....\n.P..\nXXXX", 5);
        let player = spawn_player(&room).unwrap();
        assert_eq!(player.pos, glam::Vec2::new(45.0, 45.0));
        assert_eq!(player.radius, TILE_SIZE / 2.0);
    }
}
