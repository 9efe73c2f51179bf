use serde::{Deserialize, Serialize};

use brownie_core::input::{FrameInput, MoveIntent};

use crate::character::{CharacterState, VerticalPhase};
use crate::config::PhysicsConfig;
use crate::grid::TileGrid;
use crate::probe::GroundProbe;

/// Something notable that happened while stepping the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionEvent {
    JumpStarted,
    /// Jump was triggered while airborne and dropped.
    JumpRejected,
    /// Vertical motion came to rest.
    Landed,
    /// Vertical motion started from rest.
    LeftGround,
}

/// Per-frame jump/fall state machine and position integration.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionResolver {
    physics: PhysicsConfig,
    probe: GroundProbe,
}

impl Default for MotionResolver {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl MotionResolver {
    pub fn new(physics: PhysicsConfig) -> Self {
        let probe = GroundProbe::from_physics(&physics);
        Self { physics, probe }
    }

    pub fn probe(&self) -> &GroundProbe {
        &self.probe
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Advance `character` by one frame.
    pub fn step(
        &self,
        character: &mut CharacterState,
        input: &FrameInput,
        grid: &TileGrid,
    ) -> Vec<MotionEvent> {
        let mut events = Vec::new();
        let phase_before = character.phase();

        self.apply_move_intent(character, input.move_intent);
        if input.jump_triggered {
            events.push(self.try_start_jump(character, grid));
        }
        self.resolve_gravity(character, grid);
        self.integrate_vertical(character);
        self.integrate_horizontal(character);

        debug_assert!(
            character.jump_budget == 0 || character.vertical_speed < 0,
            "active jump must be ascending: budget={} vertical_speed={}",
            character.jump_budget,
            character.vertical_speed
        );

        let phase_after = character.phase();
        match (phase_before, phase_after) {
            (VerticalPhase::Grounded, VerticalPhase::Grounded) => {},
            (_, VerticalPhase::Grounded) => {
                tracing::debug!(x = character.x, y = character.y, "Landed");
                events.push(MotionEvent::Landed);
            },
            (VerticalPhase::Grounded, _) => events.push(MotionEvent::LeftGround),
            _ => {},
        }

        tracing::trace!(
            x = character.x,
            y = character.y,
            vx = character.horizontal_speed,
            vy = character.vertical_speed,
            jump_budget = character.jump_budget,
            "Stepped character"
        );
        events
    }

    pub(crate) fn apply_move_intent(&self, character: &mut CharacterState, intent: MoveIntent) {
        character.horizontal_speed = intent.horizontal_sign() * self.physics.move_speed;
    }

    /// Start a jump if standing on ground; airborne triggers are dropped.
    pub(crate) fn try_start_jump(
        &self,
        character: &mut CharacterState,
        grid: &TileGrid,
    ) -> MotionEvent {
        if self.probe.is_on_ground(character, grid) {
            character.jump_budget = self.physics.jump_frames;
            character.vertical_speed = -self.physics.jump_speed;
            tracing::debug!(x = character.x, y = character.y, "Jump started");
            MotionEvent::JumpStarted
        } else {
            tracing::debug!(
                vy = character.vertical_speed,
                "Jump rejected while airborne"
            );
            MotionEvent::JumpRejected
        }
    }

    /// Ground/fall resolution; skipped entirely while a jump budget remains.
    pub(crate) fn resolve_gravity(&self, character: &mut CharacterState, grid: &TileGrid) {
        if character.jump_budget == 0 {
            character.vertical_speed = self.probe.resolve_vertical_speed(character, grid);
        }
    }

    pub(crate) fn integrate_vertical(&self, character: &mut CharacterState) {
        let vy = character.vertical_speed;
        if vy > 0 {
            character.y += vy as f32;
        } else if vy < 0 {
            character.y += vy as f32;
            if character.jump_budget > 0 {
                character.jump_budget -= 1;
            } else {
                character.vertical_speed += 1;
            }
        }
    }

    /// No air-control penalty: applies while airborne too.
    pub(crate) fn integrate_horizontal(&self, character: &mut CharacterState) {
        character.x += character.horizontal_speed as f32;
    }
}
