pub mod input;
pub mod sim;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::input::{FrameInput, MoveIntent};
    use crate::sim::Simulation;

    /// Idle input: no movement, no jump.
    pub fn idle() -> FrameInput {
        FrameInput::default()
    }

    /// Input that triggers a jump this frame with the given movement.
    pub fn jump(move_intent: MoveIntent) -> FrameInput {
        FrameInput {
            move_intent,
            jump_triggered: true,
        }
    }

    /// Input that only moves in the given direction.
    pub fn walk(move_intent: MoveIntent) -> FrameInput {
        FrameInput {
            move_intent,
            jump_triggered: false,
        }
    }

    /// Step `sim` `n` times with the same input, returning all accumulated events.
    pub fn run_frames<S: Simulation>(sim: &mut S, n: usize, input: &FrameInput) -> Vec<S::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.step(input));
        }
        all_events
    }

    /// Step `sim` once per input in `inputs`, returning all accumulated events.
    pub fn run_inputs<S: Simulation>(sim: &mut S, inputs: &[FrameInput]) -> Vec<S::Event> {
        inputs.iter().flat_map(|input| sim.step(input)).collect()
    }

    // ================================================================
    // Simulation Trait Contract Tests
    // ================================================================
    // Every Simulation implementation is expected to pass these. Crates
    // call them from their own #[cfg(test)] modules.

    /// A paused simulation must not advance its frame counter or emit events.
    pub fn contract_pause_freezes_simulation<S: Simulation>(sim: &mut S) {
        sim.pause();
        assert!(sim.is_paused(), "pause() must set the paused flag");
        let frame = sim.frame();
        let events = sim.step(&jump(MoveIntent::Right));
        assert!(events.is_empty(), "paused step() must not emit events");
        assert_eq!(sim.frame(), frame, "paused step() must not advance frames");
        sim.resume();
        assert!(!sim.is_paused(), "resume() must clear the paused flag");
    }

    /// Each unpaused step must advance the frame counter by exactly one.
    pub fn contract_step_advances_frame<S: Simulation>(sim: &mut S) {
        let before = sim.frame();
        sim.step(&idle());
        assert_eq!(sim.frame(), before + 1, "step() must advance frame by one");
    }

    /// Tick rate must be positive and finite.
    pub fn contract_tick_rate_valid<S: Simulation>(sim: &S) {
        let rate = sim.tick_rate();
        assert!(
            rate.is_finite() && rate > 0.0,
            "tick_rate() must be positive, got {rate}"
        );
    }
}
