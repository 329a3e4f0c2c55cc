//! Landscape value functions and pruning ceilings.
//!
//! Only landscape tiles score. Every formula reads the maintained
//! `adjacent_rivers` / `adjacent_landscapes` counters, which for mountains
//! include the diagonals.

use crate::grid::Grid;
use crate::types::{LandscapeKind, TileKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Value of one landscape tile with the given neighbor counts.
#[inline(always)]
pub fn tile_value(kind: LandscapeKind, rivers: u32, lands: u32) -> u32 {
    let v = kind.per_tile_value();
    match kind {
        LandscapeKind::Meadow | LandscapeKind::Thicket => meadow_tile(v, rivers),
        LandscapeKind::Suburb => suburb_tile(v, rivers, lands),
        LandscapeKind::Mountain => mountain_tile(v, rivers, lands),
    }
}

#[inline(always)]
fn meadow_tile(v: u32, rivers: u32) -> u32 {
    if rivers == 0 {
        v
    } else {
        v * 2 * rivers
    }
}

/// Fully enclosed suburbs double; otherwise rivers count like meadows.
#[inline(always)]
fn suburb_tile(v: u32, rivers: u32, lands: u32) -> u32 {
    if lands == 4 {
        2 * v
    } else {
        meadow_tile(v, rivers)
    }
}

#[inline(always)]
fn mountain_tile(v: u32, rivers: u32, lands: u32) -> u32 {
    lands * v + lands * rivers * v
}

/// Score of a grid under its own landscape kind.
pub fn score(grid: &Grid) -> u32 {
    match grid.landscape() {
        LandscapeKind::Meadow | LandscapeKind::Thicket => score_meadow_or_thicket(grid),
        LandscapeKind::Suburb => score_suburb(grid),
        LandscapeKind::Mountain => score_mountain(grid),
    }
}

pub fn score_meadow_or_thicket(grid: &Grid) -> u32 {
    let v = grid.landscape().per_tile_value();
    landscape_tiles(grid)
        .map(|(rivers, _)| meadow_tile(v, rivers))
        .sum()
}

pub fn score_suburb(grid: &Grid) -> u32 {
    let v = grid.landscape().per_tile_value();
    landscape_tiles(grid)
        .map(|(rivers, lands)| suburb_tile(v, rivers, lands))
        .sum()
}

pub fn score_mountain(grid: &Grid) -> u32 {
    let v = grid.landscape().per_tile_value();
    landscape_tiles(grid)
        .map(|(rivers, lands)| mountain_tile(v, rivers, lands))
        .sum()
}

/// (adjacent rivers, adjacent landscapes) of every landscape tile.
fn landscape_tiles(grid: &Grid) -> impl Iterator<Item = (u32, u32)> + '_ {
    grid.tiles()
        .iter()
        .filter(|t| t.kind == TileKind::Landscape)
        .map(|t| (u32::from(t.adjacent_rivers), u32::from(t.adjacent_landscapes)))
}

/// How the search bounds the best completion of a partial grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PruneRule {
    /// `score + max_value_per_tile * empty_cells`. Cheap, but a tile beside
    /// several rivers can beat the per-tile constant, so it may cut the
    /// optimum on some grids.
    #[serde(alias = "tile-ceiling")]
    Tile,
    /// Sum over cells of the best value each one could still reach given
    /// its fixed neighbors. Never below any completion's score.
    #[default]
    #[serde(alias = "neighborhood-ceiling")]
    Neighborhood,
}

impl PruneRule {
    /// Upper bound on the score of any full grid reachable from `grid`.
    /// `current` must be `score(grid)`.
    pub fn ceiling(self, grid: &Grid, current: u32) -> u32 {
        match self {
            PruneRule::Tile => {
                current + grid.landscape().max_value_per_tile() * grid.empty_count() as u32
            }
            PruneRule::Neighborhood => neighborhood_ceiling(grid),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown prune rule `{0}` (expected tile or neighborhood)")]
pub struct ParsePruneRuleError(pub String);

impl FromStr for PruneRule {
    type Err = ParsePruneRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tile" | "tile-ceiling" => Ok(PruneRule::Tile),
            "neighborhood" | "neighborhood-ceiling" => Ok(PruneRule::Neighborhood),
            _ => Err(ParsePruneRuleError(s.to_string())),
        }
    }
}

/// Per-cell maximum over every river/landscape split of the empty neighbors.
/// River cells are worth nothing; an empty cell is worth at most what it
/// would be as landscape.
pub fn neighborhood_ceiling(grid: &Grid) -> u32 {
    let kind = grid.landscape();
    let nc = grid.neighbors();
    grid.tiles()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind != TileKind::River)
        .map(|(i, t)| {
            let rivers = u32::from(t.adjacent_rivers);
            let lands = u32::from(t.adjacent_landscapes);
            let open = nc.degree(i) as u32 - rivers - lands;
            (0..=open)
                .map(|k| tile_value(kind, rivers + k, lands + open - k))
                .max()
                .unwrap_or(0)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridShape;

    fn grid(rows: usize, cols: usize, kind: LandscapeKind) -> Grid {
        Grid::new(GridShape::new(rows, cols), kind)
    }

    #[test]
    fn test_meadow_values() {
        // R M
        // M M
        let mut g = grid(2, 2, LandscapeKind::Meadow);
        g.place_river(0);
        g.place_landscape(1);
        g.place_landscape(2);
        g.place_landscape(3);
        // 1 and 2 touch the river (6 each), 3 does not (3).
        assert_eq!(score(&g), 15);
    }

    #[test]
    fn test_meadow_multiple_rivers() {
        // R R
        // M R   the landscape touches two river tiles
        let mut g = grid(2, 2, LandscapeKind::Meadow);
        g.place_river(0);
        g.place_river(1);
        g.place_river(3);
        g.place_landscape(2);
        assert_eq!(score(&g), 12);
    }

    #[test]
    fn test_thicket_uses_its_own_value() {
        let mut g = grid(1, 2, LandscapeKind::Thicket);
        g.place_river(0);
        g.place_landscape(1);
        assert_eq!(score(&g), 4);
    }

    #[test]
    fn test_suburb_enclosed_bonus() {
        let mut g = grid(3, 3, LandscapeKind::Suburb);
        for i in 0..9 {
            g.place_landscape(i);
        }
        // Center is enclosed (2), the other eight are plain (1 each).
        assert_eq!(score(&g), 10);
    }

    #[test]
    fn test_suburb_enclosure_beats_rivers() {
        assert_eq!(tile_value(LandscapeKind::Suburb, 0, 4), 2);
        assert_eq!(tile_value(LandscapeKind::Suburb, 3, 1), 6);
        assert_eq!(tile_value(LandscapeKind::Suburb, 0, 2), 1);
    }

    #[test]
    fn test_mountain_formula() {
        // R M
        // M M   with diagonals every mountain sees the other two, and all
        //       three see the river.
        let mut g = grid(2, 2, LandscapeKind::Mountain);
        g.place_river(0);
        g.place_landscape(1);
        g.place_landscape(2);
        g.place_landscape(3);
        // each: lands=2, rivers=1 → 2*6 + 2*1*6 = 24
        assert_eq!(score(&g), 72);
    }

    #[test]
    fn test_lone_tiles() {
        for kind in LandscapeKind::ALL {
            let mut g = grid(1, 1, kind);
            g.place_landscape(0);
            let expected = if kind == LandscapeKind::Mountain {
                0
            } else {
                kind.per_tile_value()
            };
            assert_eq!(score(&g), expected, "{}", kind);
        }
    }

    #[test]
    fn test_dispatch_matches_tile_value() {
        let mut g = grid(3, 3, LandscapeKind::Suburb);
        g.place_river(1);
        g.place_river(4);
        g.place_landscape(0);
        g.place_landscape(3);
        g.place_landscape(5);
        let expected: u32 = g
            .tiles()
            .iter()
            .filter(|t| t.kind == TileKind::Landscape)
            .map(|t| {
                tile_value(
                    LandscapeKind::Suburb,
                    t.adjacent_rivers.into(),
                    t.adjacent_landscapes.into(),
                )
            })
            .sum();
        assert_eq!(score(&g), expected);
    }

    #[test]
    fn test_tile_ceiling() {
        let mut g = grid(2, 2, LandscapeKind::Meadow);
        g.place_landscape(0);
        assert_eq!(PruneRule::Tile.ceiling(&g, score(&g)), 3 + 9 * 3);
    }

    #[test]
    fn test_neighborhood_ceiling_on_full_grid_is_score() {
        let mut g = grid(2, 3, LandscapeKind::Meadow);
        g.place_river(0);
        g.place_river(1);
        for i in 2..6 {
            g.place_landscape(i);
        }
        assert_eq!(neighborhood_ceiling(&g), score(&g));
    }

    #[test]
    fn test_neighborhood_ceiling_covers_river_bonus() {
        // A meadow tile can reach 24 with four river neighbors, well above
        // the per-tile constant of 9.
        let g = grid(3, 3, LandscapeKind::Meadow);
        // corners reach 12, edges 18, the center 24
        assert_eq!(neighborhood_ceiling(&g), 4 * 12 + 4 * 18 + 24);
        assert!(neighborhood_ceiling(&g) > PruneRule::Tile.ceiling(&g, 0));
    }
}
