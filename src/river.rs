//! River connectivity state machine.
//!
//! A river is one simple path of orthogonally connected tiles that starts on
//! the grid border and only ever grows from its head. The path is kept as a
//! stack so that removing the head always restores the exact previous
//! cursor, however deep the search has nested placements.

use crate::types::GridShape;

/// Where the river is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiverState {
    /// No river tile placed yet; the next tile must sit on the border.
    NotStarted,
    /// At least one tile placed; the next tile must touch `head`.
    InProgress { head: usize, previous: Option<usize> },
}

/// Ordered river tiles, source first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiverPath {
    tiles: Vec<usize>,
}

impl RiverPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RiverState {
        match self.head() {
            None => RiverState::NotStarted,
            Some(head) => RiverState::InProgress {
                head,
                previous: self.previous_head(),
            },
        }
    }

    #[inline(always)]
    pub fn is_started(&self) -> bool {
        !self.tiles.is_empty()
    }

    /// Most recently placed river tile.
    #[inline(always)]
    pub fn head(&self) -> Option<usize> {
        self.tiles.last().copied()
    }

    /// The river tile placed immediately before the head.
    pub fn previous_head(&self) -> Option<usize> {
        self.tiles.len().checked_sub(2).map(|i| self.tiles[i])
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    /// Connectivity half of the placement rule. The caller still has to
    /// check that the target cell is empty.
    pub fn accepts(&self, shape: &GridShape, index: usize) -> bool {
        match self.state() {
            RiverState::NotStarted => shape.is_border(index),
            RiverState::InProgress { head, .. } => shape.are_orthogonal(head, index),
        }
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.tiles.push(index);
    }

    /// Drops the head if it is `index`. Returns false for any other tile.
    pub(crate) fn retract(&mut self, index: usize) -> bool {
        if self.head() == Some(index) {
            self.tiles.pop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_river_must_start_on_border() {
        let shape = GridShape::new(3, 3);
        let river = RiverPath::new();
        assert_eq!(river.state(), RiverState::NotStarted);
        assert!(river.accepts(&shape, 0));
        assert!(river.accepts(&shape, 5));
        assert!(!river.accepts(&shape, 4));
    }

    #[test]
    fn test_extension_must_touch_head() {
        let shape = GridShape::new(3, 3);
        let mut river = RiverPath::new();
        river.push(1);
        assert!(river.accepts(&shape, 4));
        assert!(river.accepts(&shape, 0));
        assert!(!river.accepts(&shape, 3)); // diagonal
        assert!(!river.accepts(&shape, 7));
    }

    #[test]
    fn test_cursor_tracks_previous_head() {
        let mut river = RiverPath::new();
        river.push(0);
        river.push(1);
        river.push(2);
        assert_eq!(
            river.state(),
            RiverState::InProgress {
                head: 2,
                previous: Some(1)
            }
        );
        assert!(!river.retract(1));
        assert!(river.retract(2));
        assert_eq!(river.head(), Some(1));
        assert_eq!(river.previous_head(), Some(0));
        assert!(river.retract(1));
        assert!(river.retract(0));
        assert!(!river.is_started());
    }
}
