pub mod beatmap;
pub mod error;
pub mod replay;
pub mod simulate;

pub use beatmap::{
    Beatmap, CurveKind, CurvePoint, CurvePointKind, Difficulty, GameMode, HitKind, HitObject,
    HitResult, TimingPoint,
};
pub use error::{Error, Result};
pub use replay::{FrameAction, Keys, LifePoint, Mods, Replay, ReplayFrame};
pub use simulate::{Judgement, Simulator};
