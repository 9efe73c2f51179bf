use serde::{Deserialize, Serialize};

/// Horizontal movement requested for a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveIntent {
    Left,
    Right,
    #[default]
    None,
}

impl MoveIntent {
    /// Map held direction keys to an intent. Right wins when both are held.
    pub fn from_keys(left_down: bool, right_down: bool) -> Self {
        if right_down {
            MoveIntent::Right
        } else if left_down {
            MoveIntent::Left
        } else {
            MoveIntent::None
        }
    }

    /// -1 for left, +1 for right, 0 for none.
    pub fn horizontal_sign(self) -> i32 {
        match self {
            MoveIntent::Left => -1,
            MoveIntent::Right => 1,
            MoveIntent::None => 0,
        }
    }
}

/// Input consumed by one simulation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    pub move_intent: MoveIntent,
    /// True only on the frame the jump key goes down.
    pub jump_triggered: bool,
}

/// Turns a held jump-key level into a one-frame trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpEdge {
    was_down: bool,
}

impl JumpEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current key level; returns true on a released -> pressed transition.
    pub fn update(&mut self, down: bool) -> bool {
        let triggered = down && !self.was_down;
        self.was_down = down;
        triggered
    }

    /// Build a full frame input from held key levels.
    pub fn frame_input(&mut self, left_down: bool, right_down: bool, jump_down: bool) -> FrameInput {
        FrameInput {
            move_intent: MoveIntent::from_keys(left_down, right_down),
            jump_triggered: self.update(jump_down),
        }
    }
}
