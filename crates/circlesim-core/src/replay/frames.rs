//! Raw input key-states and the frame classifier that derives
//! press/hold/release semantics from consecutive frames.

use serde::{Deserialize, Serialize};

/// Key bitmask recorded in a replay frame.
///
/// Two mouse buttons and two keyboard keys; the client always sets a
/// keyboard key's paired mouse bit along with it, so the keyboard
/// groups are tested with the combined mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Keys(pub u16);

impl Keys {
    pub const NONE: Keys = Keys(0);
    pub const M1: Keys = Keys(1);
    pub const M2: Keys = Keys(2);
    pub const K1: Keys = Keys(4 | 1);
    pub const K2: Keys = Keys(8 | 2);

    /// The four key groups in classification order.
    const GROUPS: [Keys; 4] = [Keys::K1, Keys::K2, Keys::M1, Keys::M2];

    pub fn contains(self, other: Keys) -> bool {
        self.0 & other.0 == other.0
    }

    fn masked(self, group: Keys) -> u16 {
        self.0 & group.0
    }
}

/// Derived input semantics for one frame relative to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameAction {
    #[default]
    None,
    Click,
    Hold,
    Release,
}

/// One decoded input sample: absolute time, cursor position, raw keys
/// and the action derived from the previous frame's keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub time: f32,
    pub x: f32,
    pub y: f32,
    pub keys: Keys,
    pub action: FrameAction,
}

/// Classify a frame's keys against the previous frame's.
///
/// Each check overwrites the previous one, so when several groups
/// change in one frame the final tag is Release over Hold over Click.
/// That order matches the recording client's observed behavior and is
/// pinned by tests; it is not documented game semantics.
pub fn classify(last: Keys, current: Keys) -> FrameAction {
    let mut action = FrameAction::None;

    // Any group newly pressed this frame
    if Keys::GROUPS
        .iter()
        .any(|&g| last.masked(g) < current.masked(g))
    {
        action = FrameAction::Click;
    }

    // Any group held since last frame
    if Keys::GROUPS
        .iter()
        .any(|&g| last.masked(g) == current.masked(g) && current.masked(g) > 0)
    {
        action = FrameAction::Hold;
    }

    // Any group released this frame
    if Keys::GROUPS
        .iter()
        .any(|&g| last.masked(g) > current.masked(g))
    {
        action = FrameAction::Release;
    }

    action
}
