use std::time::Duration;

/// Number of enemy slots in the pool.
pub const NUM_ENEMIES: usize = 400;
/// The ride is over once this many obstacles have been hit.
pub const MAX_HITS: u32 = 5;

pub const PATH_WIDTH: i32 = 30;
pub const PATH_LENGTH: i32 = 25;

pub const BIKE_CHAR: char = '8';
pub const PATH_CHAR: char = '|';
pub const ENEMY_CHARS: [char; 3] = ['o', '#', '*'];

/// Each free slot is taken with a chance of one in `SPAWN_ODDS` per scan.
pub const SPAWN_ODDS: u32 = 103;

/// Minimum duration of one playing tick.
pub const TICK: Duration = Duration::from_millis(50);

// Enemies fall one row every `speed + 1` ticks.
pub const START_SPEED: u32 = 5;
pub const MIN_SPEED: u32 = 0;
pub const RAMP_PERIOD: Duration = Duration::from_secs(10);
