//! Text rendering of a grid as a bordered ASCII table.
//!
//! ```text
//!   -------------
//!   | R | M | M |
//!   -------------
//!   | R |   | M |
//!   -------------
//! ```

use std::fmt;

use crate::grid::Grid;
use crate::types::TileKind;

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self.shape();
        let rule = format!("  {}-", "----".repeat(shape.cols));
        let land = self.landscape().label();

        writeln!(f, "{}", rule)?;
        for row in 0..shape.rows {
            f.write_str("  ")?;
            for col in 0..shape.cols {
                let kind = shape
                    .index(row, col)
                    .and_then(|i| self.kind(i))
                    .unwrap_or_default();
                let label = match kind {
                    TileKind::Empty => ' ',
                    TileKind::River => 'R',
                    TileKind::Landscape => land,
                };
                write!(f, "| {} ", label)?;
            }
            writeln!(f, "|")?;
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;
    use crate::types::{GridShape, LandscapeKind};

    #[test]
    fn test_render_mixed_grid() {
        let mut g = Grid::new(GridShape::new(2, 3), LandscapeKind::Suburb);
        g.place_river(0);
        g.place_river(3);
        g.place_landscape(1);
        g.place_landscape(2);
        g.place_landscape(5);
        let expected = concat!(
            "  -------------\n",
            "  | R | S | S |\n",
            "  -------------\n",
            "  | R |   | S |\n",
            "  -------------\n",
        );
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn test_render_labels() {
        let mut g = Grid::new(GridShape::new(1, 1), LandscapeKind::Thicket);
        g.place_landscape(0);
        assert!(g.to_string().contains("| T |"));
        let mut g = Grid::new(GridShape::new(1, 1), LandscapeKind::Mountain);
        g.place_landscape(0);
        assert!(g.to_string().contains("| M |"));
    }
}
