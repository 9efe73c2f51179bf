use std::io::Write;
use std::time::Duration;

use brownie_core::sim::Simulation;
use brownie_world::BrownieWorld;
use brownie_world::motion::MotionEvent;
use brownie_world::view::SpriteCycle;

use crate::error::RunnerError;
use crate::input_source::InputSource;

/// Options for the fixed-rate loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Stop after this many frames; run until Ctrl-C when unset.
    pub max_frames: Option<u64>,
    /// Write each frame view as a JSON line.
    pub json: bool,
}

/// Totals reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub jumps: u64,
    pub rejected_jumps: u64,
    pub landings: u64,
}

impl LoopSummary {
    fn record(&mut self, events: &[MotionEvent]) {
        self.frames += 1;
        for event in events {
            match event {
                MotionEvent::JumpStarted => self.jumps += 1,
                MotionEvent::JumpRejected => self.rejected_jumps += 1,
                MotionEvent::Landed => self.landings += 1,
                MotionEvent::LeftGround => {},
            }
        }
    }
}

/// Step the world once: poll input, resolve motion, hand the view to the renderer.
pub fn drive_frame(
    world: &mut BrownieWorld,
    input: &mut dyn InputSource,
    sprite: &mut SpriteCycle,
    options: &LoopOptions,
    out: &mut dyn Write,
) -> Result<Vec<MotionEvent>, RunnerError> {
    let frame_input = input.next_input(world.frame());
    let events = world.step(&frame_input);
    let sprite_frame = sprite.tick();

    let readout = world.debug_readout();
    tracing::debug!(
        frame = world.frame(),
        position = %readout.position_line(),
        %readout,
        sprite_frame,
        "Frame"
    );
    for event in &events {
        tracing::debug!(frame = world.frame(), ?event, "Motion event");
    }

    if options.json {
        serde_json::to_writer(&mut *out, &world.view())
            .map_err(|e| RunnerError::Io(e.to_string()))?;
        writeln!(out)?;
    }
    Ok(events)
}

/// Run the world at its tick rate until the frame limit or Ctrl-C.
pub async fn run_frame_loop(
    world: &mut BrownieWorld,
    input: &mut dyn InputSource,
    options: LoopOptions,
    out: &mut dyn Write,
) -> Result<LoopSummary, RunnerError> {
    let tick_interval = Duration::from_secs_f32(1.0 / world.tick_rate());
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut sprite = SpriteCycle::new(world.tick_rate().round() as u32, 10, 6);
    let mut summary = LoopSummary::default();

    loop {
        if let Some(max) = options.max_frames
            && summary.frames >= max
        {
            break;
        }
        tokio::select! {
            _ = interval.tick() => {
                let events = drive_frame(world, input, &mut sprite, &options, out)?;
                summary.record(&events);
            }
            _ = &mut shutdown => {
                tracing::info!(frame = world.frame(), "Shutdown signal received");
                break;
            }
        }
    }
    out.flush()?;
    Ok(summary)
}
