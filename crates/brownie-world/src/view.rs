use serde::{Deserialize, Serialize};

use crate::character::{CharacterState, VerticalPhase};
use crate::grid::TileGrid;

/// Which way the character sprite faces, from the sign of horizontal speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Standing sprite.
    Idle,
    Right,
    /// Running sprite, mirrored.
    Left,
}

impl Facing {
    pub fn from_speed(horizontal_speed: i32) -> Self {
        match horizontal_speed.signum() {
            1 => Facing::Right,
            -1 => Facing::Left,
            _ => Facing::Idle,
        }
    }
}

/// Read-only per-frame state for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub frame: u64,
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub horizontal_speed: i32,
    pub vertical_speed: i32,
    pub jump_budget: u32,
    pub phase: VerticalPhase,
}

impl FrameView {
    pub fn new(frame: u64, character: &CharacterState) -> Self {
        Self {
            frame,
            x: character.x,
            y: character.y,
            facing: Facing::from_speed(character.horizontal_speed),
            horizontal_speed: character.horizontal_speed,
            vertical_speed: character.vertical_speed,
            jump_budget: character.jump_budget,
            phase: character.phase(),
        }
    }
}

/// On-screen debug text: where the feet sit in the tile grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugReadout {
    pub x: f32,
    pub y: f32,
    pub feet_row: i32,
    pub feet_offset: i32,
    pub jump_budget: u32,
}

impl DebugReadout {
    pub fn new(character: &CharacterState, grid: &TileGrid) -> Self {
        let tile_size = grid.tile_size() as i32;
        let feet = character.feet_y();
        Self {
            x: character.x,
            y: character.y,
            feet_row: feet.div_euclid(tile_size),
            feet_offset: feet.rem_euclid(tile_size),
            jump_budget: character.jump_budget,
        }
    }

    pub fn position_line(&self) -> String {
        format!("x: {:.1}, y: {:.1}", self.x, self.y)
    }
}

impl std::fmt::Display for DebugReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "y/ts: {}, ymod: {}, jump: {}",
            self.feet_row, self.feet_offset, self.jump_budget
        )
    }
}

/// Sprite-sheet frame counter driven by simulation ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteCycle {
    ticks_per_frame: u32,
    frame_count: u32,
    counter: u32,
    current: u32,
}

impl Default for SpriteCycle {
    /// Six-frame run cycle at 10 frames per second on a 60 Hz loop.
    fn default() -> Self {
        Self::new(60, 10, 6)
    }
}

impl SpriteCycle {
    pub fn new(tick_rate: u32, frames_per_second: u32, frame_count: u32) -> Self {
        Self {
            ticks_per_frame: (tick_rate / frames_per_second.max(1)).max(1),
            frame_count: frame_count.max(1),
            counter: 0,
            current: 0,
        }
    }

    /// Advance one tick; returns the sprite frame to draw.
    pub fn tick(&mut self) -> u32 {
        self.counter += 1;
        if self.counter >= self.ticks_per_frame {
            self.counter = 0;
            self.current = (self.current + 1) % self.frame_count;
        }
        self.current
    }

    pub fn current(&self) -> u32 {
        self.current
    }
}
