use serde::{Deserialize, Serialize};

/// A tempo/velocity directive active from its offset until the next point.
///
/// Inherited points carry no tempo of their own: their beat duration is
/// copied from the last non-inherited point, and the raw (negative)
/// ms-per-beat field encodes a slider velocity multiplier instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    /// Offset in milliseconds. Documented as an integer, but real files
    /// contain fractional offsets.
    pub offset: f64,
    pub ms_per_beat: f64,
    pub beats_per_measure: i32,
    pub inherited: bool,
    /// Resolved slider velocity multiplier; 1.0 on non-inherited points.
    pub slider_velocity: f64,
}

impl TimingPoint {
    pub fn bpm(&self) -> f64 {
        60000.0 / self.ms_per_beat
    }
}

/// Difficulty settings resolved from the [Difficulty] section.
///
/// Timing windows and hit geometry are pure functions of these values,
/// so every hit object carries a copy stamped at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Difficulty {
    pub hp: f32,
    pub cs: f32,
    pub od: f32,
    pub ar: f32,
    pub slider_multiplier: f64,
    pub slider_tick_rate: f64,
}
