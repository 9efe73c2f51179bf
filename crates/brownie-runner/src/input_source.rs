use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use brownie_core::input::{FrameInput, JumpEdge, MoveIntent};

use crate::args::RunnerArgs;
use crate::error::RunnerError;

/// Supplies one frame of input per simulation step, standing in for device polling.
pub trait InputSource {
    fn next_input(&mut self, frame: u64) -> FrameInput;
}

/// Never moves, never jumps.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn next_input(&mut self, _frame: u64) -> FrameInput {
        FrameInput::default()
    }
}

/// Keys held for a number of frames.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptSegment {
    pub frames: u64,
    #[serde(default)]
    pub move_intent: MoveIntent,
    /// Jump key held down. Adjacent held segments count as one press.
    #[serde(default)]
    pub jump: bool,
}

#[derive(Debug, Deserialize)]
struct InputScript {
    #[serde(default, rename = "segment")]
    segments: Vec<ScriptSegment>,
}

/// Replays a TOML list of `[[segment]]` tables, then goes idle.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    segments: Vec<ScriptSegment>,
    index: usize,
    used: u64,
    edge: JumpEdge,
}

impl ScriptedInput {
    pub fn new(segments: Vec<ScriptSegment>) -> Self {
        Self {
            segments,
            index: 0,
            used: 0,
            edge: JumpEdge::new(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RunnerError> {
        let script: InputScript =
            toml::from_str(content).map_err(|e| RunnerError::Script(e.to_string()))?;
        Ok(Self::new(script.segments))
    }

    pub fn load(path: &Path) -> Result<Self, RunnerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RunnerError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Total frames covered by the script.
    pub fn len_frames(&self) -> u64 {
        self.segments.iter().map(|s| s.frames).sum()
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self, _frame: u64) -> FrameInput {
        while let Some(segment) = self.segments.get(self.index) {
            if self.used < segment.frames {
                self.used += 1;
                return FrameInput {
                    move_intent: segment.move_intent,
                    jump_triggered: self.edge.update(segment.jump),
                };
            }
            self.index += 1;
            self.used = 0;
        }
        self.edge.update(false);
        FrameInput::default()
    }
}

/// Random walk: holds a direction and jump key for a random stretch, then rerolls.
pub struct RandomInput {
    rng: StdRng,
    edge: JumpEdge,
    move_intent: MoveIntent,
    jump_down: bool,
    hold_remaining: u32,
}

impl RandomInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            edge: JumpEdge::new(),
            move_intent: MoveIntent::None,
            jump_down: false,
            hold_remaining: 0,
        }
    }

    fn reroll(&mut self) {
        self.move_intent = match self.rng.random_range(0u8..3) {
            0 => MoveIntent::Left,
            1 => MoveIntent::Right,
            _ => MoveIntent::None,
        };
        self.jump_down = self.rng.random_bool(0.3);
        self.hold_remaining = self.rng.random_range(5..40);
    }
}

impl InputSource for RandomInput {
    fn next_input(&mut self, _frame: u64) -> FrameInput {
        if self.hold_remaining == 0 {
            self.reroll();
        }
        self.hold_remaining -= 1;
        FrameInput {
            move_intent: self.move_intent,
            jump_triggered: self.edge.update(self.jump_down),
        }
    }
}

/// Pick the input source the arguments ask for: script, then seed, then idle.
pub fn from_args(args: &RunnerArgs) -> Result<Box<dyn InputSource>, RunnerError> {
    if let Some(path) = &args.script {
        let script = ScriptedInput::load(path)?;
        tracing::info!(
            path = %path.display(),
            frames = script.len_frames(),
            "Loaded input script"
        );
        return Ok(Box::new(script));
    }
    if let Some(seed) = args.seed {
        tracing::info!(seed, "Using random input");
        return Ok(Box::new(RandomInput::new(seed)));
    }
    Ok(Box::new(IdleInput))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
        [[segment]]
        frames = 2
        move_intent = "right"

        [[segment]]
        frames = 3
        jump = true

        [[segment]]
        frames = 1
        move_intent = "left"
        jump = true
    "#;

    fn drain(source: &mut dyn InputSource, n: u64) -> Vec<FrameInput> {
        (0..n).map(|f| source.next_input(f)).collect()
    }

    #[test]
    fn script_replays_segments_in_order() {
        let mut script = ScriptedInput::from_toml_str(SCRIPT).expect("valid script");
        assert_eq!(script.len_frames(), 6);
        let inputs = drain(&mut script, 8);
        let moves: Vec<MoveIntent> = inputs.iter().map(|i| i.move_intent).collect();
        assert_eq!(
            moves,
            vec![
                MoveIntent::Right,
                MoveIntent::Right,
                MoveIntent::None,
                MoveIntent::None,
                MoveIntent::None,
                MoveIntent::Left,
                MoveIntent::None,
                MoveIntent::None,
            ]
        );
    }

    #[test]
    fn held_jump_triggers_once() {
        let mut script = ScriptedInput::from_toml_str(SCRIPT).expect("valid script");
        let triggers: Vec<bool> = drain(&mut script, 8)
            .iter()
            .map(|i| i.jump_triggered)
            .collect();
        assert_eq!(
            triggers,
            vec![false, false, true, false, false, false, false, false]
        );
    }

    #[test]
    fn released_between_segments_triggers_again() {
        let mut script = ScriptedInput::new(vec![
            ScriptSegment {
                frames: 1,
                move_intent: MoveIntent::None,
                jump: true,
            },
            ScriptSegment {
                frames: 1,
                move_intent: MoveIntent::None,
                jump: false,
            },
            ScriptSegment {
                frames: 1,
                move_intent: MoveIntent::None,
                jump: true,
            },
        ]);
        let triggers: Vec<bool> = drain(&mut script, 3)
            .iter()
            .map(|i| i.jump_triggered)
            .collect();
        assert_eq!(triggers, vec![true, false, true]);
    }

    #[test]
    fn empty_script_is_idle() {
        let mut script = ScriptedInput::from_toml_str("").expect("empty script");
        assert_eq!(script.next_input(0), FrameInput::default());
    }

    #[test]
    fn bad_script_is_reported() {
        let err = ScriptedInput::from_toml_str("[[segment]]\nmove_intent = \"up\"").unwrap_err();
        assert!(matches!(err, RunnerError::Script(_)));
    }

    #[test]
    fn missing_script_file_is_io_error() {
        let err = ScriptedInput::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, RunnerError::Io(_)));
    }

    #[test]
    fn random_input_is_deterministic_per_seed() {
        let a = drain(&mut RandomInput::new(42), 500);
        let b = drain(&mut RandomInput::new(42), 500);
        assert_eq!(a, b);
    }

    #[test]
    fn random_input_never_triggers_on_consecutive_frames() {
        let inputs = drain(&mut RandomInput::new(9), 2000);
        assert!(
            inputs
                .windows(2)
                .all(|w| !(w[0].jump_triggered && w[1].jump_triggered))
        );
        assert!(inputs.iter().any(|i| i.move_intent != MoveIntent::None));
    }

    #[test]
    fn args_select_source() {
        let mut idle = from_args(&RunnerArgs::default()).expect("idle source");
        assert_eq!(idle.next_input(0), FrameInput::default());

        let seeded = RunnerArgs {
            seed: Some(3),
            ..RunnerArgs::default()
        };
        let mut random = from_args(&seeded).expect("random source");
        let mut reference = RandomInput::new(3);
        for f in 0..50 {
            assert_eq!(random.next_input(f), reference.next_input(f));
        }
    }
}
