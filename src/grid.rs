//! Grid of tiles with incremental adjacency bookkeeping.
//!
//! The three mutations (`place_river`, `place_landscape`, `remove_terrain`)
//! are the only way to change a grid. Each keeps the per-tile neighbor
//! counters, the fill count and the river cursor consistent, so scoring can
//! read counters instead of scanning neighbors at every search node.

use crate::config::MAX_CELLS;
use crate::river::RiverPath;
use crate::types::{GridShape, LandscapeKind, NeighborCache, Tile, TileKind};
use std::sync::Arc;

/// The two things the search can put on an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    River,
    Landscape,
}

impl Placement {
    /// Order in which the search tries placements at each cell.
    pub const ORDER: [Placement; 2] = [Placement::River, Placement::Landscape];
}

/// Compact identity of a partial grid for the search's transposition set:
/// 2 bits per cell plus the river head. Two grids with the same key have
/// exactly the same set of completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    cells: u128,
    head: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct Grid {
    shape: GridShape,
    landscape: LandscapeKind,
    neighbors: Arc<NeighborCache>,
    tiles: Vec<Tile>,
    river: RiverPath,
    filled: usize,
}

impl Grid {
    /// Empty grid. The landscape kind decides which neighborhood the
    /// adjacency counters follow.
    pub fn new(shape: GridShape, landscape: LandscapeKind) -> Self {
        let neighbors = Arc::new(NeighborCache::new(shape, landscape.neighborhood()));
        Self {
            shape,
            landscape,
            neighbors,
            tiles: vec![Tile::default(); shape.capacity()],
            river: RiverPath::new(),
            filled: 0,
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn landscape(&self) -> LandscapeKind {
        self.landscape
    }

    pub fn neighbors(&self) -> &NeighborCache {
        &self.neighbors
    }

    pub fn river(&self) -> &RiverPath {
        &self.river
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    #[inline(always)]
    pub fn empty_count(&self) -> usize {
        self.capacity() - self.filled
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.filled == self.capacity()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline(always)]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn kind(&self, index: usize) -> Option<TileKind> {
        self.tile(index).map(|t| t.kind)
    }

    /// Kind of every cell in row-major order.
    pub fn kinds(&self) -> Vec<TileKind> {
        self.tiles.iter().map(|t| t.kind).collect()
    }

    /// In range and empty.
    #[inline(always)]
    pub fn is_placeable(&self, index: usize) -> bool {
        matches!(self.kind(index), Some(TileKind::Empty))
    }

    pub fn place(&mut self, index: usize, placement: Placement) -> bool {
        match placement {
            Placement::River => self.place_river(index),
            Placement::Landscape => self.place_landscape(index),
        }
    }

    pub fn place_landscape(&mut self, index: usize) -> bool {
        if !self.is_placeable(index) {
            return false;
        }
        self.fill(index, TileKind::Landscape);
        true
    }

    /// Adds a river tile if the cell is empty and the river rules allow it:
    /// a new river starts on the border, an existing one grows from its head.
    pub fn place_river(&mut self, index: usize) -> bool {
        if !self.is_placeable(index) || !self.river.accepts(&self.shape, index) {
            return false;
        }
        self.river.push(index);
        self.fill(index, TileKind::River);
        true
    }

    /// Clears a cell and returns what was there.
    ///
    /// Returns `None` without touching the grid when the index is out of
    /// range, the cell is already empty, or the cell is a river tile other
    /// than the head (removing it would split the river).
    pub fn remove_terrain(&mut self, index: usize) -> Option<TileKind> {
        let kind = self.kind(index)?;
        match kind {
            TileKind::Empty => return None,
            TileKind::River => {
                if !self.river.retract(index) {
                    return None;
                }
            }
            TileKind::Landscape => {}
        }

        self.tiles[index].kind = TileKind::Empty;
        self.filled -= 1;
        for &n in self.neighbors.get(index) {
            let tile = &mut self.tiles[n];
            match kind {
                TileKind::River => tile.adjacent_rivers -= 1,
                TileKind::Landscape => tile.adjacent_landscapes -= 1,
                TileKind::Empty => {}
            }
        }
        Some(kind)
    }

    fn fill(&mut self, index: usize, kind: TileKind) {
        self.tiles[index].kind = kind;
        self.filled += 1;
        for &n in self.neighbors.get(index) {
            let tile = &mut self.tiles[n];
            match kind {
                TileKind::River => tile.adjacent_rivers += 1,
                TileKind::Landscape => tile.adjacent_landscapes += 1,
                TileKind::Empty => {}
            }
        }
    }

    /// `None` for grids larger than [`MAX_CELLS`], which do not fit the key.
    pub(crate) fn state_key(&self) -> Option<StateKey> {
        if self.capacity() > MAX_CELLS {
            return None;
        }
        let cells = self
            .tiles
            .iter()
            .enumerate()
            .fold(0u128, |acc, (i, t)| acc | (u128::from(t.kind.code()) << (2 * i)));
        Some(StateKey {
            cells,
            head: self.river.head().map(|h| h as u8),
        })
    }
}
