//! Branch-and-bound search for the highest-scoring layout.
//!
//! Depth-first over every (cell, placement) pair in row-major order, river
//! before landscape. A single working grid is mutated in place and undone
//! with `remove_terrain`; it is cloned only when a new best layout is
//! recorded. Subtrees whose ceiling cannot beat the best value found so far
//! are cut.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::grid::{Grid, Placement, StateKey};
use crate::score::{score, PruneRule};
use crate::seed::heuristic_seed;
use crate::types::{LandscapeKind, TileKind};

/// Counters collected during one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Bound the search started from (the seed score, if any).
    pub initial_bound: Option<u32>,
    /// Nodes entered, including full grids and skipped states.
    pub nodes: u64,
    /// Subtrees cut because their ceiling could not beat the best value.
    pub pruned: u64,
    /// Partial grids skipped because the same state was already expanded.
    pub transpositions: u64,
    /// Every new best score, in the order found. Strictly increasing.
    pub improvements: Vec<u32>,
}

/// Best layout found by a search.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub rows: usize,
    pub cols: usize,
    pub landscape: LandscapeKind,
    pub score: u32,
    /// Row-major tile kinds.
    pub tiles: Vec<TileKind>,
    /// River tiles, source first.
    pub river: Vec<usize>,
    pub stats: SearchStats,
    #[serde(skip)]
    pub grid: Grid,
}

impl Solution {
    pub fn new(grid: Grid, stats: SearchStats) -> Self {
        let shape = grid.shape();
        Self {
            rows: shape.rows,
            cols: shape.cols,
            landscape: grid.landscape(),
            score: score(&grid),
            tiles: grid.kinds(),
            river: grid.river().tiles().to_vec(),
            stats,
            grid,
        }
    }
}

// ─── Search state ───────────────────────────────────────────────────────────

/// One search run: the shared best value, the layout that reached it and
/// the set of partial states already expanded.
///
/// The best value only ever increases. A state that is met again through a
/// different placement order is skipped: its first expansion already
/// explored the same completions under a bound no higher than today's, so
/// it cannot produce a strictly better layout.
pub struct Search {
    rule: PruneRule,
    best_value: Option<u32>,
    incumbent: Option<Grid>,
    seen: HashSet<StateKey>,
    stats: SearchStats,
}

impl Search {
    /// No bound: the first full grid reached becomes the incumbent.
    pub fn new(rule: PruneRule) -> Self {
        Self {
            rule,
            best_value: None,
            incumbent: None,
            seen: HashSet::new(),
            stats: SearchStats::default(),
        }
    }

    /// Only layouts scoring strictly above `bound` are recorded.
    pub fn with_bound(rule: PruneRule, bound: u32) -> Self {
        let mut search = Self::new(rule);
        search.best_value = Some(bound);
        search.stats.initial_bound = Some(bound);
        search
    }

    /// Starts from a known full layout; its score becomes the bound.
    pub fn with_incumbent(rule: PruneRule, grid: Grid) -> Self {
        let mut search = Self::with_bound(rule, score(&grid));
        search.incumbent = Some(grid);
        search
    }

    pub fn best_value(&self) -> Option<u32> {
        self.best_value
    }

    pub fn incumbent(&self) -> Option<&Grid> {
        self.incumbent.as_ref()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Explores every completion of `grid`. The grid is back in its
    /// original state when this returns.
    pub fn run(&mut self, grid: &mut Grid) {
        let filled = grid.filled_count();
        self.explore(grid);
        debug_assert_eq!(grid.filled_count(), filled);
    }

    /// Best layout found, or `start` unchanged if nothing beat the bound.
    pub fn finish(self, start: Grid) -> Solution {
        let grid = self.incumbent.unwrap_or(start);
        Solution::new(grid, self.stats)
    }

    fn explore(&mut self, grid: &mut Grid) {
        self.stats.nodes += 1;

        if grid.is_full() {
            self.consider(grid);
            return;
        }

        if let Some(key) = grid.state_key() {
            if !self.seen.insert(key) {
                self.stats.transpositions += 1;
                return;
            }
        }

        if let Some(best) = self.best_value {
            let ceiling = self.rule.ceiling(grid, score(grid));
            if ceiling <= best {
                self.stats.pruned += 1;
                return;
            }
        }

        for index in 0..grid.capacity() {
            for placement in Placement::ORDER {
                if grid.place(index, placement) {
                    self.explore(grid);
                    let undone = grid.remove_terrain(index);
                    debug_assert!(undone.is_some());
                }
            }
        }
    }

    /// Records `grid` if it strictly beats the best value.
    fn consider(&mut self, grid: &Grid) {
        let value = score(grid);
        if self.best_value.map_or(true, |best| value > best) {
            trace!(value, previous = ?self.best_value, "new best layout");
            self.best_value = Some(value);
            self.incumbent = Some(grid.clone());
            self.stats.improvements.push(value);
        }
    }
}

// ─── Top-level: optimize ────────────────────────────────────────────────────

/// Finds the highest-scoring full layout for `config`.
///
/// Seeds the bound with the zig-zag layout, then searches from an empty
/// grid. Ties keep the layout found first.
pub fn optimize(config: &EngineConfig) -> Result<Solution, ConfigError> {
    let shape = config.validate()?;
    debug!(
        rows = shape.rows,
        cols = shape.cols,
        landscape = %config.landscape,
        prune = ?config.prune,
        "starting search"
    );

    let seed = heuristic_seed(shape, config.landscape);
    debug!(seed_score = score(&seed), "heuristic seed ready");

    let mut search = Search::with_incumbent(config.prune, seed);
    let mut grid = Grid::new(shape, config.landscape);
    search.run(&mut grid);

    let solution = search.finish(grid);
    info!(
        score = solution.score,
        nodes = solution.stats.nodes,
        pruned = solution.stats.pruned,
        transpositions = solution.stats.transpositions,
        improvements = solution.stats.improvements.len(),
        "search finished"
    );
    Ok(solution)
}
