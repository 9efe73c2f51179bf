use serde::{Deserialize, Serialize};

use crate::character::CharacterState;
use crate::config::{ColumnMapping, FALL_SPEED, PhysicsConfig};
use crate::grid::TileGrid;

/// Ground contact of one footprint column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// The tile directly below the feet is Ground.
    Grounded,
    /// Ground is one row further down; carries the feet's offset into their tile row.
    ApproachingGround(i32),
    Airborne,
}

/// Ground-contact queries against a tile grid.
///
/// `is_on_ground` and `resolve_vertical_speed` are both derived from
/// [`GroundProbe::scan`], so they always agree on what counts as contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundProbe {
    pub column_mapping: ColumnMapping,
    /// Terminal fall speed; also caps the approach speed.
    pub fall_speed: i32,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            column_mapping: ColumnMapping::default(),
            fall_speed: FALL_SPEED,
        }
    }
}

impl GroundProbe {
    pub fn from_physics(physics: &PhysicsConfig) -> Self {
        Self {
            column_mapping: physics.column_mapping,
            fall_speed: physics.fall_speed,
        }
    }

    /// Tile column probed for footprint column `column`.
    pub fn tile_column(&self, character: &CharacterState, column: i32, grid: &TileGrid) -> i32 {
        let tile_size = grid.tile_size() as i32;
        match self.column_mapping {
            ColumnMapping::Legacy => {
                let width = i64::from(grid.width().max(1));
                let tx = (character.x.floor() as i64)
                    .saturating_mul(i64::from(tile_size))
                    .div_euclid(width);
                i32::try_from(tx).unwrap_or(if tx < 0 { i32::MIN } else { i32::MAX })
            },
            ColumnMapping::PerColumn => column.div_euclid(tile_size),
        }
    }

    /// Classify a single footprint column.
    pub fn classify_column(
        &self,
        character: &CharacterState,
        column: i32,
        grid: &TileGrid,
    ) -> Contact {
        let tile_size = grid.tile_size() as i32;
        let feet = character.feet_y();
        let feet_row = feet.div_euclid(tile_size);
        let tx = self.tile_column(character, column, grid);

        if grid.kind_or_sky(tx, feet_row).is_blocking() {
            Contact::Grounded
        } else if grid.kind_or_sky(tx, feet_row.saturating_add(1)).is_blocking() {
            Contact::ApproachingGround(feet.rem_euclid(tile_size))
        } else {
            Contact::Airborne
        }
    }

    /// Scan the footprint left to right. The first Grounded column wins;
    /// otherwise the last column scanned decides. `None` for an empty footprint.
    pub fn scan(&self, character: &CharacterState, grid: &TileGrid) -> Option<Contact> {
        let mut last = None;
        for column in character.footprint_columns() {
            let contact = self.classify_column(character, column, grid);
            if contact == Contact::Grounded {
                return Some(contact);
            }
            last = Some(contact);
        }
        last
    }

    pub fn is_on_ground(&self, character: &CharacterState, grid: &TileGrid) -> bool {
        self.scan(character, grid) == Some(Contact::Grounded)
    }

    /// Vertical speed that gravity resolution should apply this frame.
    ///
    /// An empty footprint leaves the current speed untouched.
    pub fn resolve_vertical_speed(&self, character: &CharacterState, grid: &TileGrid) -> i32 {
        match self.scan(character, grid) {
            Some(Contact::Grounded) => 0,
            Some(Contact::ApproachingGround(distance)) => distance.min(self.fall_speed),
            Some(Contact::Airborne) => self.fall_speed,
            None => character.vertical_speed,
        }
    }
}
