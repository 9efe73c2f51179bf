use crate::input::FrameInput;

/// Frame-stepped simulation driven by an external fixed-rate loop.
///
/// The loop owns timing and input polling; the simulation only advances
/// its own state one frame at a time and exposes a read-only view for
/// rendering.
pub trait Simulation {
    /// Notable things that happened during a step.
    type Event;
    /// Read-only per-frame state handed to renderers.
    type View;

    /// Target steps per second.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Advance one frame. A paused simulation returns no events and does not change.
    fn step(&mut self, input: &FrameInput) -> Vec<Self::Event>;

    /// Snapshot of the state a renderer needs this frame.
    fn view(&self) -> Self::View;

    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    /// Number of frames stepped so far.
    fn frame(&self) -> u64;
}
