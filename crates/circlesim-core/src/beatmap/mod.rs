//! Beatmap model and .osu text format parser.

mod object;
mod parser;
mod timing;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use object::{CurveKind, CurvePoint, CurvePointKind, HitKind, HitObject, HitResult};
pub use timing::{Difficulty, TimingPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum GameMode {
    #[default]
    Standard = 0,
    Taiko = 1,
    CatchTheBeat = 2,
    Mania = 3,
}

impl GameMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Standard),
            1 => Some(Self::Taiko),
            2 => Some(Self::CatchTheBeat),
            3 => Some(Self::Mania),
            _ => None,
        }
    }
}

/// Parsed chart: metadata, difficulty, timing points and hit objects.
///
/// Built in a single pass over the file and immutable afterwards.
/// Hit objects and timing points keep their source order, which is
/// non-decreasing by time in well-formed files; the parser does not
/// re-sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beatmap {
    pub format_version: i32,
    /// MD5 of the raw file bytes, the identity replays record.
    pub hash: String,
    pub mode: GameMode,
    pub stack_leniency: f32,

    pub title: String,
    pub artist: String,
    pub creator: String,
    /// Difficulty name (the "Version" metadata field).
    pub version: String,
    pub beatmap_id: Option<String>,
    pub set_id: Option<String>,

    pub difficulty: Difficulty,
    pub timing_points: Vec<TimingPoint>,
    pub hit_objects: Vec<HitObject>,
}

impl Beatmap {
    /// Parse a beatmap from a .osu file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        parser::parse_path(path.as_ref())
    }

    /// Parse a beatmap from raw file bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        parser::parse_bytes(bytes)
    }

    /// Latest timing point strictly before the given offset.
    pub fn timing_point_at(&self, offset: f64) -> Option<&TimingPoint> {
        self.timing_points.iter().rev().find(|tp| tp.offset < offset)
    }

    /// Re-stamp a difficulty onto the beatmap and every hit object.
    ///
    /// Objects are already stamped at construction; this exists to
    /// re-evaluate a chart under modified settings.
    pub fn apply_difficulty_settings(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        for object in &mut self.hit_objects {
            object.difficulty = difficulty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_from_u8() {
        assert_eq!(GameMode::from_u8(0), Some(GameMode::Standard));
        assert_eq!(GameMode::from_u8(3), Some(GameMode::Mania));
        assert_eq!(GameMode::from_u8(4), None);
    }
}
