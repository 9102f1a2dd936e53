//! IntGrid parsing and collision solid placement
//!
//! The LDtk export writes one comma-separated row per grid line, with a
//! trailing newline after the final row. Every non-zero cell becomes one
//! immovable collision solid of `cell_size` x `cell_size` pixels.

use serde::{Deserialize, Serialize};

use super::LevelError;
use crate::sim::collision::Aabb;

/// A rectangular grid of small integers, row-major, 0 = empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<i32>,
}

impl IntGrid {
    /// Parse a CSV grid document.
    ///
    /// Splits on `\r?\n`, then on commas. The document is trimmed first so
    /// the export's trailing newline does not produce a spurious empty row.
    /// Ragged rows and non-numeric tokens are fatal.
    pub fn parse(raw: &str) -> Result<Self, LevelError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(LevelError::EmptyGrid);
        }

        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (row, line) in raw.split('\n').enumerate() {
            let line = line.trim_end_matches('\r');
            let mut row_len = 0;
            for (col, token) in line.split(',').enumerate() {
                let value: i32 =
                    token
                        .trim()
                        .parse()
                        .map_err(|_| LevelError::BadCell {
                            row,
                            col,
                            token: token.to_string(),
                        })?;
                cells.push(value);
                row_len += 1;
            }
            if row == 0 {
                width = row_len;
            } else if row_len != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found: row_len,
                });
            }
            height += 1;
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Re-serialize to CSV (rows joined by commas and `\n`).
    ///
    /// Round-trips exactly with [`IntGrid::parse`].
    pub fn to_csv(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Cell value at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.cells[row * self.width + col]
    }

    /// Iterate non-zero cells as (row, col, value).
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, &v)| {
            (v != 0).then(|| (i / self.width, i % self.width, v))
        })
    }

    /// One static collision solid per non-zero cell, centered at
    /// `(col*cell + cell/2, row*cell + cell/2)`.
    pub fn solids(&self, cell_size: f32) -> Vec<Aabb> {
        self.solid_cells()
            .map(|(row, col, _)| Aabb::from_cell(row, col, cell_size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_basic() {
        let grid = IntGrid::parse("0,1,0\n1,0,1\n").unwrap();
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.get(0, 1), 1);
        assert_eq!(grid.get(1, 0), 1);
        assert_eq!(grid.solid_cells().count(), 3);
    }

    #[test]
    fn test_parse_crlf_and_trailing_newline() {
        let grid = IntGrid::parse("0,1\r\n2,0\r\n").unwrap();
        assert_eq!(grid.height, 2);
        assert_eq!(grid.get(1, 0), 2);
    }

    #[test]
    fn test_parse_empty_is_fatal() {
        assert!(matches!(IntGrid::parse("  \n "), Err(LevelError::EmptyGrid)));
    }

    #[test]
    fn test_parse_ragged_row_is_fatal() {
        let err = IntGrid::parse("0,1,0\n1,0\n").unwrap_err();
        assert!(matches!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_parse_bad_token_is_fatal() {
        let err = IntGrid::parse("0,x,0\n").unwrap_err();
        assert!(matches!(err, LevelError::BadCell { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_single_solid_cell_center() {
        // One non-zero cell at (r=2, c=5) with cell size 32
        let mut rows = vec!["0,0,0,0,0,0".to_string(); 4];
        rows[2] = "0,0,0,0,0,1".to_string();
        let grid = IntGrid::parse(&rows.join("\n")).unwrap();

        let solids = grid.solids(32.0);
        assert_eq!(solids.len(), 1);
        assert_eq!(solids[0].center.x, 5.0 * 32.0 + 16.0);
        assert_eq!(solids[0].center.y, 2.0 * 32.0 + 16.0);
        assert_eq!(solids[0].half.x, 16.0);
        assert_eq!(solids[0].half.y, 16.0);
    }

    proptest! {
        #[test]
        fn test_csv_roundtrip(
            rows in prop::collection::vec(
                prop::collection::vec(0i32..8, 1..24),
                1..24,
            )
        ) {
            // Force the grid rectangular: every row gets the first row's length
            let width = rows[0].len();
            let csv = rows
                .iter()
                .map(|r| {
                    r.iter()
                        .cycle()
                        .take(width)
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect::<Vec<_>>()
                .join("\n");

            let grid = IntGrid::parse(&csv).unwrap();
            prop_assert_eq!(grid.to_csv(), csv);
        }
    }
}
