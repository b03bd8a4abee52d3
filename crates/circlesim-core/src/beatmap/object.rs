use serde::{Deserialize, Serialize};

use super::timing::Difficulty;

/// Judgement tier assigned to a hit-object interaction.
///
/// `None` means the interaction is outside even the miss window and the
/// object stays unjudged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitResult {
    Hit300,
    Hit100,
    Hit50,
    Miss,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveKind {
    Linear,
    Perfect,
    Bezier,
    Catmull,
}

/// Red points mark segment boundaries, grey points are interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurvePointKind {
    Grey,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: i32,
    pub y: i32,
    pub kind: CurvePointKind,
}

/// Variant payload for the closed set of hit object shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HitKind {
    Circle,
    Slider {
        curve: CurveKind,
        curve_points: Vec<CurvePoint>,
        repeat: i32,
        pixel_length: f64,
        end_time: i32,
    },
    Spinner {
        end_time: i32,
    },
}

/// A chart element requiring input at a specific time and position.
///
/// The difficulty is stamped at construction so that every query that
/// depends on AR/CS/OD is valid from the moment the object exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    pub x: i32,
    pub y: i32,
    pub time: i32,
    pub new_combo: bool,
    pub difficulty: Difficulty,
    pub kind: HitKind,
}

impl HitObject {
    pub fn is_circle(&self) -> bool {
        matches!(self.kind, HitKind::Circle)
    }

    pub fn is_slider(&self) -> bool {
        matches!(self.kind, HitKind::Slider { .. })
    }

    pub fn is_spinner(&self) -> bool {
        matches!(self.kind, HitKind::Spinner { .. })
    }

    /// Milliseconds the object is visible before its start time.
    pub fn approach_time(&self) -> f64 {
        let ar = self.difficulty.ar as f64;
        if ar <= 5.0 {
            1800.0 - ar * 120.0
        } else {
            1950.0 - ar * 150.0
        }
    }

    /// Hit radius in playfield units.
    pub fn radius(&self) -> f64 {
        let cs = self.difficulty.cs as f64;
        64.0 * (1.0 - 0.7 * (cs - 5.0) / 5.0) / 2.0
    }

    /// Whether a cursor position falls strictly inside the hit radius.
    pub fn point_in_circle(&self, x: f32, y: f32) -> bool {
        let dx = self.x as f64 - x as f64;
        let dy = self.y as f64 - y as f64;
        (dx * dx + dy * dy).sqrt() < self.radius()
    }

    /// Half-width of the timing window for a judgement tier, in ms.
    pub fn hit_window_for(&self, result: HitResult) -> f64 {
        let od = self.difficulty.od as f64;
        match result {
            HitResult::Hit300 => 79.5 - 6.0 * od,
            HitResult::Hit100 => 139.5 - 8.0 * od,
            HitResult::Hit50 => 199.5 - 10.0 * od,
            // Constant 400ms miss window regardless of OD
            _ => 400.0,
        }
    }

    /// Classify an input at the given absolute time into the tightest
    /// containing window, or `None` beyond the miss window.
    pub fn result_for_time(&self, time: f32) -> HitResult {
        let hit_error = (time as f64 - self.time as f64).abs();
        if hit_error < self.hit_window_for(HitResult::Hit300) {
            HitResult::Hit300
        } else if hit_error < self.hit_window_for(HitResult::Hit100) {
            HitResult::Hit100
        } else if hit_error < self.hit_window_for(HitResult::Hit50) {
            HitResult::Hit50
        } else if hit_error < self.hit_window_for(HitResult::Miss) {
            HitResult::Miss
        } else {
            HitResult::None
        }
    }
}
