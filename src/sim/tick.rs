//! Frame tick
//!
//! Advances one frame of play: input, player motion, terrain, room
//! transitions, pickups, hazards and finally the end-of-run checks.

use super::collision::resolve_terrain;
use super::player::InputEvent;
use super::state::{Ending, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick, applied before anything moves
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses and releases since the previous tick, in order
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for event in &input.events {
        state.handle_event(*event);
    }

    // Paused and finished runs are frozen
    if state.phase != GamePhase::Active {
        return;
    }

    state.player.update(dt);

    let idx = state.active_index;
    resolve_terrain(&mut state.player, &state.rooms[idx].terrain);

    apply_room_bounds(state);
    collect_coins(state);
    collect_key(state);

    let idx = state.active_index;
    let dealt = state.rooms[idx].update_hazards(&mut state.player, dt);
    if dealt > 0 {
        log::debug!("Player took {dealt} damage ({} left)", state.player.health);
    }

    check_end_conditions(state);
}

/// Keep the player inside the room vertically and move between rooms
/// horizontally. The first room's left edge and the last room's right edge
/// are walls.
pub(crate) fn apply_room_bounds(state: &mut GameState) {
    let last = state.rooms.len() - 1;
    let room = &state.rooms[state.active_index];
    let (width, height) = (room.width_px(), room.height_px());
    let player = &mut state.player;
    let r = player.radius;

    // Recover from glitching out of the top or bottom
    if player.pos.y < 0.0 {
        player.pos.y = TILE_SIZE + r;
    } else if player.pos.y > height {
        player.pos.y = height - TILE_SIZE - r;
    }

    if player.pos.x < 0.0 && state.active_index == 0 {
        player.pos.x = TILE_SIZE + r;
    } else if player.pos.x > width && state.active_index == last {
        player.pos.x = width - TILE_SIZE - r;
    } else if player.pos.x < 0.0 {
        state.active_index -= 1;
        player.pos.x += state.rooms[state.active_index].width_px();
        log::debug!("Entered room {} from the right", state.active_index);
    } else if player.pos.x > width {
        player.pos.x -= width;
        state.active_index += 1;
        log::debug!("Entered room {} from the left", state.active_index);
    }
}

fn collect_coins(state: &mut GameState) {
    let idx = state.active_index;
    for coin in &mut state.rooms[idx].coins {
        if coin.check_collection(&state.player) {
            coin.collect();
            state.coin_count += 1;
        }
    }
}

/// Take the key if in reach and affordable; its cost is deducted
fn collect_key(state: &mut GameState) {
    let idx = state.active_index;
    let Some(key) = state.rooms[idx].key.as_mut() else {
        return;
    };
    if key.check_collection(&state.player) && state.coin_count >= key.required_coins {
        key.collect();
        state.coin_count -= key.required_coins;
        state.key_collected = true;
        log::info!("Key collected ({} coins left)", state.coin_count);
    }
}

fn check_end_conditions(state: &mut GameState) {
    if !state.player.alive {
        state.finish(Ending::LostHealth);
    } else if state.time_remaining == 0 {
        state.finish(Ending::LostTime);
    } else if state
        .active_room()
        .exit
        .as_ref()
        .is_some_and(|exit| exit.check_interaction(&state.player, state.key_collected))
    {
        state.finish(Ending::Won);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::Action;
    use crate::sim::room::Room;
    use crate::sim::state::tests::new_state;
    use glam::Vec2;

    fn room_named(state: &GameState, prefix: &str) -> usize {
        state
            .rooms
            .iter()
            .position(|r| r.name.starts_with(prefix))
            .unwrap()
    }

    #[test]
    fn test_tick_pause() {
        let mut state = new_state();
        let right = TickInput::new([InputEvent::Press(Action::MoveRight)]);
        tick(&mut state, &right, SIM_DT);
        let x = state.player.pos.x;
        assert!(x > 45.0);

        let pause = TickInput::new([InputEvent::Press(Action::Pause)]);
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.pos.x, x);

        // Held keys were dropped by the pause
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Active);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn test_walking_stays_grounded() {
        let mut state = new_state();
        tick(
            &mut state,
            &TickInput::new([InputEvent::Press(Action::MoveRight)]),
            SIM_DT,
        );
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert!(state.player.on_ground);
            assert_eq!(state.player.pos.y, 45.0);
        }
        assert!((state.player.pos.x - (45.0 + 31.0 * MOVE_SPEED)).abs() < 1e-3);
    }

    #[test]
    fn test_room_transition_right_and_left() {
        let mut state = new_state();
        let start_width = state.rooms[0].width_px();
        let next_width = state.rooms[1].width_px();
        assert_ne!(start_width, next_width);

        // Overflow past the old room's right edge carries into the new room
        state.player.pos.x = start_width + 2.0;
        apply_room_bounds(&mut state);
        assert_eq!(state.active_index, 1);
        assert!((state.player.pos.x - 2.0).abs() < 1e-4);

        // Overflow past the left edge lands measured from the new room's width
        state.player.pos.x = -3.0;
        apply_room_bounds(&mut state);
        assert_eq!(state.active_index, 0);
        assert!((state.player.pos.x - (start_width - 3.0)).abs() < 1e-4);

        // And back out of the wide room to the right once more
        state.player.pos.x = start_width + 5.0;
        apply_room_bounds(&mut state);
        assert_eq!(state.active_index, 1);
        assert!((state.player.pos.x - 5.0).abs() < 1e-4);

        state.active_index = 2;
        state.player.pos.x = -1.0;
        apply_room_bounds(&mut state);
        assert_eq!(state.active_index, 1);
        assert!((state.player.pos.x - (next_width - 1.0)).abs() < 1e-4);
    }

    #[test]
    fn test_world_edges_are_walls() {
        let mut state = new_state();
        state.player.pos.x = -5.0;
        apply_room_bounds(&mut state);
        assert_eq!(state.active_index, 0);
        assert_eq!(state.player.pos.x, TILE_SIZE + 15.0);

        let last = state.rooms.len() - 1;
        state.active_index = last;
        let width = state.rooms[last].width_px();
        state.player.pos.x = width + 5.0;
        apply_room_bounds(&mut state);
        assert_eq!(state.active_index, last);
        assert_eq!(state.player.pos.x, width - TILE_SIZE - 15.0);
    }

    #[test]
    fn test_vertical_recovery() {
        let mut state = new_state();
        let height = state.active_room().height_px();

        state.player.pos.y = -10.0;
        apply_room_bounds(&mut state);
        assert_eq!(state.player.pos.y, TILE_SIZE + 15.0);

        state.player.pos.y = height + 10.0;
        apply_room_bounds(&mut state);
        assert_eq!(state.player.pos.y, height - TILE_SIZE - 15.0);
    }

    #[test]
    fn test_coin_counted_once() {
        let mut state = new_state();
        state.active_index = room_named(&state, "pool");
        state.player.pos = Vec2::new(75.0, 45.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.coin_count, 1);
        assert!(state.active_room().coins[0].collected);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.coin_count, 1);
    }

    #[test]
    fn test_key_needs_coins() {
        let mut state = new_state();
        state.active_index = room_named(&state, "key");
        state.player.pos = Vec2::new(135.0, 45.0);

        state.coin_count = 4;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.key_collected);
        assert_eq!(state.coin_count, 4);

        state.coin_count = 7;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.key_collected);
        assert_eq!(state.coin_count, 2);
        assert!(state.active_room().key.as_ref().unwrap().collected);
    }

    #[test]
    fn test_exit_needs_key() {
        let mut state = new_state();
        state.active_index = state.rooms.len() - 1;
        state.player.pos = Vec2::new(195.0, 45.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Active);

        state.key_collected = true;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Completed(Ending::Won));
        let outcome = state.outcome().unwrap();
        assert!(outcome.won);
        assert_eq!(outcome.score, 120 * 10 + 100 * 5);
    }

    #[test]
    fn test_trap_damage_and_death() {
        let mut state = new_state();
        state.rooms[0] = Room::parse("spikes", ".....\n..S..\nXXXXX", 5);
        state.player.pos = Vec2::new(75.0, 45.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.health, 100 - SPIKE_DAMAGE);

        // Still recharging
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.health, 100 - SPIKE_DAMAGE);

        state.player.health = 10;
        for _ in 0..70 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::Completed(Ending::LostHealth));
        assert_eq!(state.outcome().unwrap().score, 0);
    }

    #[test]
    fn test_time_out_ends_run() {
        let mut state = new_state();
        state.time_remaining = 0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Completed(Ending::LostTime));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state();
        let mut state2 = new_state();

        let inputs = [
            TickInput::new([InputEvent::Press(Action::MoveRight)]),
            TickInput::new([InputEvent::Press(Action::Jump)]),
            TickInput::default(),
            TickInput::new([InputEvent::Release(Action::Jump)]),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.active_index, state2.active_index);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.coin_count, state2.coin_count);
    }
}
