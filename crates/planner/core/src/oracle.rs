//! Validity oracles: which workspace points may hold an action point.
//!
//! The oracle is shared by every search worker, so implementations must be
//! pure and callable concurrently without mutation.

use crate::env::EnvironmentError;
use crate::geometry::Point;

/// Reports whether a point is a legal location.
pub trait ValidityOracle: Send + Sync {
    fn is_valid(&self, point: Point) -> bool;
}

impl<F> ValidityOracle for F
where
    F: Fn(Point) -> bool + Send + Sync,
{
    fn is_valid(&self, point: Point) -> bool {
        self(point)
    }
}

/// Oracle that accepts every finite point.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysValid;

impl ValidityOracle for AlwaysValid {
    fn is_valid(&self, point: Point) -> bool {
        point.is_finite()
    }
}

/// Precomputed boolean grid over a rectangular workspace.
///
/// Cell `(cx, cy)` covers `[origin + c * cell_size, origin + (c + 1) * cell_size)`
/// on both axes. Points outside the grid are always invalid.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidityGrid {
    width: usize,
    height: usize,
    cell_size: f64,
    origin: Point,
    cells: Vec<bool>,
}

impl ValidityGrid {
    /// Character marking a passable cell in [`ValidityGrid::from_rows`].
    pub const PASSABLE: char = '.';

    /// Builds a grid from row-major cells (`cells[y * width + x]`).
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, EnvironmentError> {
        if width == 0 || height == 0 {
            return Err(EnvironmentError::EmptyGrid);
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(EnvironmentError::GridSizeMismatch {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cell_size: 1.0,
            origin: Point::ORIGIN,
            cells,
        })
    }

    /// Parses text rows; row 0 is `y = 0`. `.` is passable, anything else blocks.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, EnvironmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (row_index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let row_width = row.chars().count();
            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(EnvironmentError::RaggedGrid {
                        row: row_index,
                        expected,
                        actual: row_width,
                    });
                }
                Some(_) => {}
            }
            cells.extend(row.chars().map(|c| c == Self::PASSABLE));
            height += 1;
        }

        Self::new(width.unwrap_or(0), height, cells)
    }

    /// Sets the side length of one cell in workspace units.
    pub fn with_cell_size(mut self, cell_size: f64) -> Result<Self, EnvironmentError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(EnvironmentError::InvalidCellSize(cell_size));
        }
        self.cell_size = cell_size;
        Ok(self)
    }

    /// Moves the grid's lower corner.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Workspace extent covered by the grid.
    pub fn extent(&self) -> (f64, f64) {
        (
            self.width as f64 * self.cell_size,
            self.height as f64 * self.cell_size,
        )
    }

    fn cell_index(&self, point: Point) -> Option<usize> {
        if !point.is_finite() {
            return None;
        }
        let local = (point - self.origin) / self.cell_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (cx, cy) = (local.x.floor() as usize, local.y.floor() as usize);
        (cx < self.width && cy < self.height).then(|| cy * self.width + cx)
    }
}

impl ValidityOracle for ValidityGrid {
    fn is_valid(&self, point: Point) -> bool {
        self.cell_index(point).is_some_and(|index| self.cells[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_parse_into_cells() {
        let grid = ValidityGrid::from_rows(["..#", "..."]).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert!(grid.is_valid(Point::new(0.5, 0.5)));
        assert!(!grid.is_valid(Point::new(2.5, 0.5)));
        assert!(grid.is_valid(Point::new(2.5, 1.5)));
    }

    #[test]
    fn out_of_bounds_is_invalid() {
        let grid = ValidityGrid::from_rows(["..", ".."]).unwrap();
        assert!(!grid.is_valid(Point::new(-0.1, 0.5)));
        assert!(!grid.is_valid(Point::new(0.5, 2.0)));
        assert!(!grid.is_valid(Point::new(f64::NAN, 0.5)));
    }

    #[test]
    fn cell_size_scales_lookup() {
        let grid = ValidityGrid::from_rows([".#"])
            .unwrap()
            .with_cell_size(10.0)
            .unwrap();
        assert!(grid.is_valid(Point::new(9.9, 5.0)));
        assert!(!grid.is_valid(Point::new(10.1, 5.0)));
        assert_eq!(grid.extent(), (20.0, 10.0));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = ValidityGrid::from_rows(["...", ".."]);
        assert!(matches!(
            result,
            Err(EnvironmentError::RaggedGrid {
                row: 1,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let rows: [&str; 0] = [];
        assert!(matches!(
            ValidityGrid::from_rows(rows),
            Err(EnvironmentError::EmptyGrid)
        ));
        assert!(matches!(
            ValidityGrid::new(2, 2, vec![true; 3]),
            Err(EnvironmentError::GridSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |p: Point| p.x >= 0.0;
        assert!(oracle.is_valid(Point::new(1.0, -5.0)));
        assert!(!oracle.is_valid(Point::new(-1.0, 0.0)));
    }
}
