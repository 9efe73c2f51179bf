pub mod character;
pub mod config;
pub mod error;
pub mod grid;
pub mod motion;
pub mod probe;
pub mod view;

use brownie_core::input::FrameInput;
use brownie_core::sim::Simulation;

use character::CharacterState;
use config::BrownieConfig;
use grid::TileGrid;
use motion::{MotionEvent, MotionResolver};
use view::{DebugReadout, FrameView};

/// A single character moving through a static tile world.
pub struct BrownieWorld {
    grid: TileGrid,
    character: CharacterState,
    resolver: MotionResolver,
    tick_rate: f32,
    frame: u64,
    paused: bool,
}

impl BrownieWorld {
    pub fn new(config: &BrownieConfig) -> Self {
        let grid = TileGrid::from_config(&config.world);
        tracing::debug!(
            width = grid.width(),
            height = grid.height(),
            tile_size = grid.tile_size(),
            "Generated tile grid"
        );
        Self {
            grid,
            character: CharacterState::from_config(&config.character),
            resolver: MotionResolver::new(config.physics.clone()),
            tick_rate: config.tick_rate_hz,
            frame: 0,
            paused: false,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    pub fn resolver(&self) -> &MotionResolver {
        &self.resolver
    }

    pub fn is_on_ground(&self) -> bool {
        self.resolver.probe().is_on_ground(&self.character, &self.grid)
    }

    pub fn debug_readout(&self) -> DebugReadout {
        DebugReadout::new(&self.character, &self.grid)
    }
}

impl Default for BrownieWorld {
    fn default() -> Self {
        Self::new(&BrownieConfig::default())
    }
}

impl Simulation for BrownieWorld {
    type Event = MotionEvent;
    type View = FrameView;

    fn tick_rate(&self) -> f32 {
        self.tick_rate
    }

    fn step(&mut self, input: &FrameInput) -> Vec<MotionEvent> {
        if self.paused {
            return Vec::new();
        }
        self.frame += 1;
        self.resolver.step(&mut self.character, input, &self.grid)
    }

    fn view(&self) -> FrameView {
        FrameView::new(self.frame, &self.character)
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn frame(&self) -> u64 {
        self.frame
    }
}
