//! Replay model and .osr binary format parser.

mod buffer;
mod frames;
mod parser;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::beatmap::GameMode;
use crate::error::Result;

pub use frames::{classify, FrameAction, Keys, ReplayFrame};

/// Enabled-mod bitset recorded in the replay header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mods(pub i32);

impl Mods {
    pub const NONE: Mods = Mods(0);
    pub const NO_FAIL: Mods = Mods(1);
    pub const EASY: Mods = Mods(2);
    pub const HIDDEN: Mods = Mods(8);
    pub const HARD_ROCK: Mods = Mods(16);
    pub const SUDDEN_DEATH: Mods = Mods(32);
    pub const DOUBLE_TIME: Mods = Mods(64);
    pub const RELAX: Mods = Mods(128);
    pub const HALF_TIME: Mods = Mods(256);
    pub const NIGHTCORE: Mods = Mods(512);
    pub const FLASHLIGHT: Mods = Mods(1024);
    pub const AUTOPLAY: Mods = Mods(2048);
    pub const SPUN_OUT: Mods = Mods(4096);
    pub const AUTOPILOT: Mods = Mods(8192);
    pub const PERFECT: Mods = Mods(16384);

    pub fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Mods {
    type Output = Mods;

    fn bitor(self, rhs: Mods) -> Mods {
        Mods(self.0 | rhs.0)
    }
}

/// One sample of the recorded life-bar graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifePoint {
    pub time: i32,
    pub life: f32,
}

/// Ticks between 0001-01-01 and the UNIX epoch; replay timestamps are
/// recorded as 100ns ticks since the former.
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Parsed recorded input session.
///
/// The judgement counts here are what the original session reported;
/// they are informational and not authoritative for re-simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    pub mode: GameMode,
    pub version: u32,
    pub beatmap_hash: Option<String>,
    pub player_name: Option<String>,
    pub replay_hash: Option<String>,

    pub count_300: u16,
    pub count_100: u16,
    pub count_50: u16,
    pub count_geki: u16,
    pub count_katu: u16,
    pub count_miss: u16,
    pub score: u32,
    pub highest_combo: u16,
    pub perfect_combo: bool,
    pub mods: Mods,

    pub life_points: Vec<LifePoint>,
    /// Raw .NET-tick timestamp; see [`Replay::timestamp`].
    pub timestamp_ticks: i64,

    /// All decoded input frames, non-decreasing in time.
    pub frames: Vec<ReplayFrame>,
    /// Subsequence of frames where the key bitmask changed.
    pub actions: Vec<ReplayFrame>,
}

impl Replay {
    /// Parse a replay from a .osr file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        parser::parse_path(path.as_ref())
    }

    /// Parse a replay from raw file bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        parser::parse_bytes(bytes)
    }

    /// Recording time, if the tick value maps into the chrono range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let micros = self.timestamp_ticks.checked_sub(UNIX_EPOCH_TICKS)? / 10;
        DateTime::from_timestamp_micros(micros)
    }
}
