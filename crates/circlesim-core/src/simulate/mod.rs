//! Replay re-simulation against a parsed beatmap.
//!
//! Walks the recorded input frames over the chart's clickable objects
//! and produces independent judgement counts, rather than trusting the
//! counts stored in the replay header.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beatmap::{Beatmap, HitKind, HitObject, HitResult};
use crate::error::{Error, Result};
use crate::replay::{FrameAction, Replay};

/// Fixed shift between chart object times and replay frame times.
///
/// Determined empirically; replays start their clock ahead of the
/// chart's audio by this many milliseconds.
// TODO: derive this from the chart's audio lead-in instead of a fixed
// constant.
const CHART_TIME_OFFSET: i32 = 1515;

/// Judgement counters accumulated by a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Judgement {
    pub count_300: u32,
    pub count_100: u32,
    pub count_50: u32,
    pub count_miss: u32,
}

impl Judgement {
    fn record(&mut self, result: HitResult) {
        match result {
            HitResult::Hit300 => self.count_300 += 1,
            HitResult::Hit100 => self.count_100 += 1,
            HitResult::Hit50 => self.count_50 += 1,
            HitResult::Miss => self.count_miss += 1,
            HitResult::None => {}
        }
    }

    /// Total number of judged objects.
    pub fn total(&self) -> u32 {
        self.count_300 + self.count_100 + self.count_50 + self.count_miss
    }
}

/// Re-simulates one replay against one beatmap.
pub struct Simulator<'a> {
    beatmap: &'a Beatmap,
    replay: &'a Replay,
    judgement: Judgement,
}

impl<'a> Simulator<'a> {
    pub fn new(beatmap: &'a Beatmap, replay: &'a Replay) -> Self {
        Self {
            beatmap,
            replay,
            judgement: Judgement::default(),
        }
    }

    /// Counters from the last [`Simulator::run`], zero before any run.
    pub fn judgement(&self) -> Judgement {
        self.judgement
    }

    /// Clear accumulated counters so the simulator can run again.
    pub fn reset(&mut self) {
        self.judgement = Judgement::default();
    }

    /// Run the simulation and return the judgement counters.
    ///
    /// Fails with [`Error::HashMismatch`] when the replay was not
    /// recorded against this beatmap, leaving the counters at zero.
    pub fn run(&mut self) -> Result<Judgement> {
        self.reset();

        if self.replay.beatmap_hash.as_deref() != Some(self.beatmap.hash.as_str()) {
            return Err(Error::HashMismatch {
                replay: self
                    .replay
                    .beatmap_hash
                    .clone()
                    .unwrap_or_else(|| "<none>".to_string()),
                beatmap: self.beatmap.hash.clone(),
            });
        }

        let mut pending = load_clickable_objects(self.beatmap);
        let mut active: Vec<HitObject> = Vec::new();
        debug!("simulating {} clickable objects", pending.len());

        for frame in &self.replay.frames {
            // Everything judged; remaining frames cannot change counts.
            if pending.is_empty() && active.is_empty() {
                break;
            }

            let time = f64::from(frame.time);

            // Promote objects whose approach window has opened. Pending
            // is in chart order, so stop at the first one not reached.
            while let Some(next) = pending.front() {
                if time <= f64::from(next.time) - next.approach_time() {
                    break;
                }
                if let Some(object) = pending.pop_front() {
                    active.push(object);
                }
            }

            // A single click judges at most one object per frame.
            let mut click_used = false;
            let mut index = 0;
            while index < active.len() {
                let object = &active[index];

                let result = if time > f64::from(object.time) + object.hit_window_for(HitResult::Hit50)
                {
                    // Too late to ever hit it
                    HitResult::Miss
                } else if frame.action == FrameAction::Click
                    && !click_used
                    && object.point_in_circle(frame.x, frame.y)
                {
                    object.result_for_time(frame.time)
                } else {
                    HitResult::None
                };

                if result != HitResult::None {
                    self.judgement.record(result);
                    click_used = true;
                    active.remove(index);
                } else {
                    index += 1;
                }
            }
        }

        Ok(self.judgement)
    }
}

/// Clickable objects in chart order, shifted into replay time.
///
/// Sliders are judged at their head like circles; spinners take no
/// aimed click and are excluded.
fn load_clickable_objects(beatmap: &Beatmap) -> VecDeque<HitObject> {
    beatmap
        .hit_objects
        .iter()
        .filter(|object| object.is_circle() || object.is_slider())
        .map(|object| HitObject {
            x: object.x,
            y: object.y,
            time: object.time + CHART_TIME_OFFSET,
            new_combo: object.new_combo,
            difficulty: object.difficulty,
            kind: HitKind::Circle,
        })
        .collect()
}
