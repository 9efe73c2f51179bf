use serde::{Deserialize, Serialize};

use crate::config::CharacterConfig;

/// Collision footprint as offsets from the character's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hitbox {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self {
            left: 16,
            right: 50,
            top: 0,
            bottom: 60,
        }
    }
}

/// Vertical motion state, derived from speed and jump budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalPhase {
    /// Not moving vertically.
    Grounded,
    /// Rising with this many guaranteed ascent frames left.
    Ascending(u32),
    /// Still rising, budget spent; speed climbs toward zero.
    Decelerating,
    Falling,
}

/// Mutable record of the controlled body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub x: f32,
    pub y: f32,
    pub hitbox: Hitbox,
    /// Distance from `y` down to the feet.
    pub height: i32,
    /// Negative = left, zero = idle, positive = right.
    pub horizontal_speed: i32,
    /// Negative = ascending, zero = at rest, positive = falling.
    pub vertical_speed: i32,
    /// Frames of guaranteed ascent remaining; zero when no jump is active.
    pub jump_budget: u32,
}

impl CharacterState {
    pub fn new(x: f32, y: f32, height: i32, hitbox: Hitbox) -> Self {
        Self {
            x,
            y,
            hitbox,
            height,
            horizontal_speed: 0,
            vertical_speed: 0,
            jump_budget: 0,
        }
    }

    pub fn from_config(config: &CharacterConfig) -> Self {
        Self::new(config.spawn_x, config.spawn_y, config.height, config.hitbox)
    }

    /// World y of the feet, on the integer pixel grid. Saturates far outside the world.
    pub fn feet_y(&self) -> i32 {
        (self.y.floor() as i32).saturating_add(self.height)
    }

    /// Integer world-x columns covered by the footprint, left inclusive, right exclusive.
    pub fn footprint_columns(&self) -> std::ops::Range<i32> {
        let start = (self.x + self.hitbox.left as f32).floor() as i32;
        let end = (self.x + self.hitbox.right as f32).ceil() as i32;
        start..end.max(start)
    }

    pub fn phase(&self) -> VerticalPhase {
        if self.jump_budget > 0 {
            VerticalPhase::Ascending(self.jump_budget)
        } else if self.vertical_speed < 0 {
            VerticalPhase::Decelerating
        } else if self.vertical_speed > 0 {
            VerticalPhase::Falling
        } else {
            VerticalPhase::Grounded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn() -> CharacterState {
        CharacterState::from_config(&CharacterConfig::default())
    }

    #[test]
    fn spawns_at_rest() {
        let c = spawn();
        assert_eq!((c.x, c.y), (1.0, 300.0));
        assert_eq!(c.height, 64);
        assert_eq!(c.vertical_speed, 0);
        assert_eq!(c.jump_budget, 0);
        assert_eq!(c.phase(), VerticalPhase::Grounded);
    }

    #[test]
    fn feet_are_position_plus_height() {
        let mut c = spawn();
        assert_eq!(c.feet_y(), 364);
        c.y = 440.0;
        assert_eq!(c.feet_y(), 504);
        c.y = 300.7;
        assert_eq!(c.feet_y(), 364, "fractional y is floored");
    }

    #[test]
    fn feet_saturate_near_integer_limits() {
        let mut c = spawn();
        c.y = i32::MAX as f32;
        assert_eq!(c.feet_y(), i32::MAX);
        c.y = f32::MAX;
        assert_eq!(c.feet_y(), i32::MAX);
    }

    #[test]
    fn footprint_spans_hitbox() {
        let c = spawn();
        assert_eq!(c.footprint_columns(), 17..51);

        let mut fractional = spawn();
        fractional.x = 1.5;
        // 17.5..51.5: integer columns 17..=51 satisfy `col < 51.5`
        assert_eq!(fractional.footprint_columns(), 17..52);
    }

    #[test]
    fn zero_width_footprint_is_empty() {
        let mut c = spawn();
        c.hitbox.left = 20;
        c.hitbox.right = 20;
        assert!(c.footprint_columns().is_empty());
    }

    #[test]
    fn phase_follows_speed_and_budget() {
        let mut c = spawn();
        c.vertical_speed = -5;
        c.jump_budget = 3;
        assert_eq!(c.phase(), VerticalPhase::Ascending(3));
        c.jump_budget = 0;
        assert_eq!(c.phase(), VerticalPhase::Decelerating);
        c.vertical_speed = 2;
        assert_eq!(c.phase(), VerticalPhase::Falling);
        c.vertical_speed = 0;
        assert_eq!(c.phase(), VerticalPhase::Grounded);
    }
}
