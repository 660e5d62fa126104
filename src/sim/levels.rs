//! Room sequence generation
//!
//! A run is a fixed-length row of rooms: the start room first, the end room
//! last, the key room somewhere in between, and the rest drawn from a pool of
//! interchangeable rooms without replacement.

use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::room::Room;
use crate::config::GameConfig;
use crate::error::LevelError;

/// A named level definition (text grid)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDef {
    pub name: String,
    pub source: String,
}

impl LevelDef {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Placeholder for a definition that could not be read
    pub fn missing(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }

    fn build(&self, key_required_coins: u32) -> Room {
        Room::parse(&self.name, &self.source, key_required_coins)
    }
}

/// All level definitions available to a session
#[derive(Debug, Clone)]
pub struct LevelLibrary {
    pub start: LevelDef,
    pub key: LevelDef,
    pub end: LevelDef,
    /// Interchangeable filler rooms
    pub pool: Vec<LevelDef>,
}

impl LevelLibrary {
    /// Scan `config.levels_dir`. The three reserved names become the fixed
    /// rooms; every other `*.txt` file joins the pool (sorted by name so a
    /// seed always yields the same sequence). Read failures are logged and
    /// produce empty definitions, which `generate_level` later rejects.
    pub fn load_dir(config: &GameConfig) -> Self {
        let dir = config.levels_dir.as_path();
        let read = |name: &str| read_level(&dir.join(name), name);

        let mut pool = Vec::new();
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .filter_map(Result::ok)
                    .filter(|e| e.path().is_file())
                    .filter_map(|e| e.file_name().into_string().ok())
                    .filter(|name| name.to_lowercase().ends_with(".txt"))
                    .filter(|name| !config.is_reserved(name))
                    .collect();
                names.sort();
                pool = names.iter().map(|name| read(name)).collect();
            }
            Err(err) => log::error!("Levels directory {} not readable: {err}", dir.display()),
        }

        log::info!("Found {} pool levels in {}", pool.len(), dir.display());

        Self {
            start: read(&config.start_room),
            key: read(&config.key_room),
            end: read(&config.end_room),
            pool,
        }
    }
}

fn read_level(path: &Path, name: &str) -> LevelDef {
    match std::fs::read_to_string(path) {
        Ok(source) => LevelDef::new(name, source),
        Err(err) => {
            log::error!("Level file {} not readable: {err}", path.display());
            LevelDef::missing(name)
        }
    }
}

/// Build the room sequence for one run.
///
/// Index 0 is the start room, `room_count - 1` the end room, and the key room
/// lands uniformly in `1..room_count - 1`. Every room is built up front and
/// checked before the run can begin.
pub fn generate_level(
    library: &LevelLibrary,
    room_count: usize,
    key_required_coins: u32,
    rng: &mut Pcg32,
) -> Result<Vec<Room>, LevelError> {
    if room_count < 3 {
        return Err(LevelError::InvalidRoomCount { count: room_count });
    }

    let needed = room_count - 3;
    if library.pool.len() < needed {
        return Err(LevelError::PoolExhausted {
            needed,
            available: library.pool.len(),
        });
    }

    let key_index = rng.random_range(1..room_count - 1);

    let mut pool: Vec<&LevelDef> = library.pool.iter().collect();
    pool.shuffle(rng);
    let mut fillers = pool.into_iter();

    let mut rooms = Vec::with_capacity(room_count);
    for i in 0..room_count {
        let def = if i == 0 {
            &library.start
        } else if i == room_count - 1 {
            &library.end
        } else if i == key_index {
            &library.key
        } else {
            fillers.next().ok_or(LevelError::PoolExhausted {
                needed,
                available: library.pool.len(),
            })?
        };
        rooms.push(def.build(key_required_coins));
    }

    validate(&rooms, key_index)?;

    log::info!(
        "Generated {} rooms (key room at {}): {}",
        rooms.len(),
        key_index,
        rooms
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(rooms)
}

fn validate(rooms: &[Room], key_index: usize) -> Result<(), LevelError> {
    if let Some(room) = rooms.iter().find(|r| r.is_degenerate()) {
        return Err(LevelError::DegenerateRoom {
            name: room.name.clone(),
        });
    }

    let start = &rooms[0];
    if start.spawn.is_none() {
        return Err(LevelError::MissingSpawn {
            name: start.name.clone(),
        });
    }

    let key_room = &rooms[key_index];
    if key_room.key.is_none() {
        return Err(LevelError::MissingKey {
            name: key_room.name.clone(),
        });
    }

    let end = &rooms[rooms.len() - 1];
    if end.exit.is_none() {
        return Err(LevelError::MissingExit {
            name: end.name.clone(),
        });
    }

    Ok(())
}
