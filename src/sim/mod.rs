//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module stays free of I/O apart from
//! reading level files in `levels`:
//! - Every update takes `dt` in seconds
//! - Seeded RNG only
//! - Rooms and entities are updated in definition order
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod enemy;
pub mod items;
pub mod levels;
pub mod player;
pub mod room;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod tile;
pub mod trap;

pub use bounds::Bounds;
pub use collision::{Side, TerrainContact, circle_hits_spike, resolve_terrain, resolve_tile};
pub use enemy::Enemy;
pub use items::{Coin, Exit, Key};
pub use levels::{LevelDef, LevelLibrary, generate_level};
pub use player::{Action, InputEvent, InputState, Player};
pub use room::{PlayerSpawn, Room, TileGrid};
pub use snapshot::Snapshot;
pub use state::{Ending, GamePhase, GameState, Outcome};
pub use tick::{TickInput, tick};
pub use tile::{Spawn, Tile, TileKind};
pub use trap::{Patrol, Trap, TrapKind};
