use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::error::TileError;

/// Classification of a world tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Ground,
    Sky,
}

impl TileKind {
    /// Whether the tile stops a falling body.
    pub fn is_blocking(self) -> bool {
        matches!(self, TileKind::Ground)
    }
}

/// One cell of the grid, addressed by tile indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
}

/// Static world: a fixed-size grid of Ground/Sky tiles.
///
/// Row 0 is the top of the world; y grows downward, matching screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: u32,
    /// Tile kinds stored row-major (y * width + x).
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Build a grid whose last `ground_rows` rows are Ground and the rest Sky.
    ///
    /// `tile_size` is clamped to `1..=i32::MAX`.
    pub fn generate(width: u32, height: u32, tile_size: u32, ground_rows: u32) -> Self {
        let tile_size = tile_size.clamp(1, i32::MAX as u32);
        let first_ground_row = height.saturating_sub(ground_rows);
        let tiles = (0..height)
            .flat_map(|y| {
                let kind = if y >= first_ground_row {
                    TileKind::Ground
                } else {
                    TileKind::Sky
                };
                std::iter::repeat_n(kind, width as usize)
            })
            .collect();
        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::generate(
            config.width,
            config.height,
            config.tile_size,
            config.ground_rows,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// The tile at grid indices `(x, y)`.
    pub fn tile_at(&self, x: i32, y: i32) -> Result<Tile, TileError> {
        if !self.contains(x, y) {
            return Err(TileError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let kind = self.tiles[y as usize * self.width as usize + x as usize];
        Ok(Tile { x, y, kind })
    }

    /// Tile kind at `(x, y)`, reading anything outside the grid as Sky.
    pub fn kind_or_sky(&self, x: i32, y: i32) -> TileKind {
        self.tile_at(x, y).map_or(TileKind::Sky, |t| t.kind)
    }

    /// Convert world coordinates to tile indices (floored).
    pub fn world_to_tile(&self, world_x: f32, world_y: f32) -> (i32, i32) {
        let ts = self.tile_size as f32;
        ((world_x / ts).floor() as i32, (world_y / ts).floor() as i32)
    }

    /// Every tile, row by row, for map rendering.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().map(move |(i, &kind)| Tile {
            x: (i % width) as i32,
            y: (i / width) as i32,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_grid() -> TileGrid {
        TileGrid::from_config(&WorldConfig::default())
    }

    #[test]
    fn bottom_four_rows_are_ground() {
        let grid = default_grid();
        for y in 0..60 {
            for x in 0..80 {
                let expected = if y >= 56 {
                    TileKind::Ground
                } else {
                    TileKind::Sky
                };
                assert_eq!(
                    grid.tile_at(x, y).expect("in bounds").kind,
                    expected,
                    "tile ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn tile_at_reports_its_indices() {
        let grid = default_grid();
        let tile = grid.tile_at(7, 58).expect("in bounds");
        assert_eq!((tile.x, tile.y), (7, 58));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(default_grid(), default_grid());
    }

    #[test]
    fn tile_at_out_of_bounds_fails() {
        let grid = default_grid();
        for (x, y) in [(-1, 0), (0, -1), (80, 0), (0, 60), (3, 63)] {
            assert_eq!(
                grid.tile_at(x, y),
                Err(TileError::OutOfBounds {
                    x,
                    y,
                    width: 80,
                    height: 60
                })
            );
        }
    }

    #[test]
    fn out_of_bounds_reads_as_sky() {
        let grid = default_grid();
        assert_eq!(grid.kind_or_sky(0, 63), TileKind::Sky);
        assert_eq!(grid.kind_or_sky(-5, 58), TileKind::Sky);
        assert_eq!(grid.kind_or_sky(0, 58), TileKind::Ground);
    }

    #[test]
    fn world_to_tile_floors() {
        let grid = default_grid();
        assert_eq!(grid.world_to_tile(0.0, 0.0), (0, 0));
        assert_eq!(grid.world_to_tile(7.9, 8.0), (0, 1));
        assert_eq!(grid.world_to_tile(350.0, 364.0), (43, 45));
        assert_eq!(grid.world_to_tile(-0.5, -8.0), (-1, -1));
    }

    #[test]
    fn tile_size_is_clamped_to_positive() {
        assert_eq!(TileGrid::generate(3, 2, 0, 1).tile_size(), 1);
        assert_eq!(TileGrid::generate(3, 2, u32::MAX, 1).tile_size(), i32::MAX as u32);
    }

    #[test]
    fn more_ground_rows_than_height_is_all_ground() {
        let grid = TileGrid::generate(3, 2, 8, 5);
        assert!(grid.tiles().all(|t| t.kind == TileKind::Ground));
    }

    #[test]
    fn tiles_iterates_every_cell_row_major() {
        let grid = TileGrid::generate(3, 2, 8, 1);
        let tiles: Vec<Tile> = grid.tiles().collect();
        assert_eq!(tiles.len(), 6);
        assert_eq!((tiles[0].x, tiles[0].y), (0, 0));
        assert_eq!((tiles[4].x, tiles[4].y), (1, 1));
        assert_eq!(tiles[2].kind, TileKind::Sky);
        assert_eq!(tiles[3].kind, TileKind::Ground);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ground_rows_invariant(
                width in 1u32..40,
                height in 1u32..40,
                ground_rows in 0u32..10,
            ) {
                let grid = TileGrid::generate(width, height, 8, ground_rows);
                let first_ground = height.saturating_sub(ground_rows) as i32;
                for tile in grid.tiles() {
                    prop_assert_eq!(tile.kind.is_blocking(), tile.y >= first_ground);
                }
                prop_assert_eq!(grid.tiles().count(), (width * height) as usize);
            }
        }
    }
}
