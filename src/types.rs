//! Core data types for the terrain optimizer.
//!
//! Grids are addressed with a flat row-major index:
//! `index = row * cols + col`, so a 3×4 grid reads
//!
//! ```text
//!  0 |  1 |  2 |  3
//!  4 |  5 |  6 |  7
//!  8 |  9 | 10 | 11
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Dimensions of a grid plus the index ↔ (row, col) mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    #[inline(always)]
    pub fn row(&self, index: usize) -> usize {
        index / self.cols
    }

    #[inline(always)]
    pub fn col(&self, index: usize) -> usize {
        index % self.cols
    }

    /// Linear index of (row, col), or `None` outside the grid.
    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn contains(&self, index: usize) -> bool {
        index < self.capacity()
    }

    /// True for cells in the first/last row or the first/last column.
    pub fn is_border(&self, index: usize) -> bool {
        if !self.contains(index) {
            return false;
        }
        let row = self.row(index);
        let col = self.col(index);
        row == 0 || col == 0 || row == self.rows - 1 || col == self.cols - 1
    }

    /// Manhattan distance of exactly 1 along a single axis.
    pub fn are_orthogonal(&self, a: usize, b: usize) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let dr = self.row(a).abs_diff(self.row(b));
        let dc = self.col(a).abs_diff(self.col(b));
        dr + dc == 1
    }
}

/// What occupies a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Empty = 0,
    River = 1,
    Landscape = 2,
}

impl TileKind {
    /// Compact code used for transposition keys and the wasm tile arrays.
    #[inline(always)]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One cell: its kind plus the maintained neighbor counters.
///
/// The counters cover the grid's [`Neighborhood`] and are kept up to date by
/// the placement/removal operations, never recomputed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub kind: TileKind,
    pub adjacent_rivers: u8,
    pub adjacent_landscapes: u8,
}

/// Which neighbors count as adjacent for the landscape counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// Up, down, left, right.
    Orthogonal,
    /// Orthogonal plus the four diagonals.
    Moore,
}

/// The landscape card chosen for a run. Fixes the per-tile value, the
/// scoring formula and the neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandscapeKind {
    /// Blooming meadow.
    #[default]
    Meadow,
    Thicket,
    Mountain,
    Suburb,
}

impl LandscapeKind {
    pub const ALL: [LandscapeKind; 4] = [
        LandscapeKind::Meadow,
        LandscapeKind::Thicket,
        LandscapeKind::Mountain,
        LandscapeKind::Suburb,
    ];

    /// Base value of one landscape tile.
    pub fn per_tile_value(self) -> u32 {
        match self {
            LandscapeKind::Meadow => 3,
            LandscapeKind::Thicket => 2,
            LandscapeKind::Mountain => 6,
            LandscapeKind::Suburb => 1,
        }
    }

    /// Per-tile ceiling used by [`crate::score::PruneRule::Tile`].
    pub fn max_value_per_tile(self) -> u32 {
        match self {
            LandscapeKind::Mountain => 4 * self.per_tile_value(),
            _ => 3 * self.per_tile_value(),
        }
    }

    pub fn neighborhood(self) -> Neighborhood {
        match self {
            LandscapeKind::Mountain => Neighborhood::Moore,
            _ => Neighborhood::Orthogonal,
        }
    }

    /// Letter shown in rendered grids. Mountains share `M` with meadows.
    pub fn label(self) -> char {
        match self {
            LandscapeKind::Meadow | LandscapeKind::Mountain => 'M',
            LandscapeKind::Thicket => 'T',
            LandscapeKind::Suburb => 'S',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LandscapeKind::Meadow => "meadow",
            LandscapeKind::Thicket => "thicket",
            LandscapeKind::Mountain => "mountain",
            LandscapeKind::Suburb => "suburb",
        }
    }
}

impl fmt::Display for LandscapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown landscape `{0}` (expected meadow, thicket, mountain, suburb or 0-3)")]
pub struct ParseLandscapeError(pub String);

impl FromStr for LandscapeKind {
    type Err = ParseLandscapeError;

    /// Accepts the names (any case) and the numeric codes 0-3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "meadow" => Ok(LandscapeKind::Meadow),
            "1" | "thicket" => Ok(LandscapeKind::Thicket),
            "2" | "mountain" => Ok(LandscapeKind::Mountain),
            "3" | "suburb" => Ok(LandscapeKind::Suburb),
            _ => Err(ParseLandscapeError(s.to_string())),
        }
    }
}

/// Pre-computed neighbor lists for every cell of one shape.
///
/// Indexed by the flat cell index; each entry is a slice of neighbor indices
/// clipped to the grid bounds.
#[derive(Debug)]
pub struct NeighborCache {
    pub shape: GridShape,
    pub neighborhood: Neighborhood,
    /// Flat storage of all neighbor indices.
    data: Vec<usize>,
    /// offsets[i]..offsets[i+1] is the range of cell i in `data`.
    offsets: Vec<usize>,
}

impl NeighborCache {
    pub fn new(shape: GridShape, neighborhood: Neighborhood) -> Self {
        let total = shape.capacity();
        let per_cell = match neighborhood {
            Neighborhood::Orthogonal => 4,
            Neighborhood::Moore => 8,
        };
        let mut data = Vec::with_capacity(total * per_cell);
        let mut offsets = Vec::with_capacity(total + 1);

        for index in 0..total {
            offsets.push(data.len());
            let row = shape.row(index) as isize;
            let col = shape.col(index) as isize;
            for dr in -1isize..=1 {
                for dc in -1isize..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    if neighborhood == Neighborhood::Orthogonal && dr != 0 && dc != 0 {
                        continue;
                    }
                    let (nr, nc) = (row + dr, col + dc);
                    if nr < 0 || nc < 0 {
                        continue;
                    }
                    if let Some(n) = shape.index(nr as usize, nc as usize) {
                        data.push(n);
                    }
                }
            }
        }
        offsets.push(data.len()); // sentinel

        Self {
            shape,
            neighborhood,
            data,
            offsets,
        }
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> &[usize] {
        let start = self.offsets[index];
        let end = self.offsets[index + 1];
        &self.data[start..end]
    }

    /// Number of neighbors of `index` that exist inside the grid.
    #[inline(always)]
    pub fn degree(&self, index: usize) -> usize {
        self.offsets[index + 1] - self.offsets[index]
    }
}
