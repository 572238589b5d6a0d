use serde::Serialize;

use crate::core::{grid::Grid, shape::Shape};

/// Grid coordinate of a shape's bounding-box top-left corner.
///
/// Rows grow downward, columns rightward. Coordinates are signed: during
/// spawn-collision evaluation a piece may sit with part of its bounding box
/// above the visible grid, so `row` can be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PiecePosition {
    pub row: i32,
    pub col: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the position shifted by `(dx, dy)` in grid space.
    #[must_use]
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::new(self.row + dy, self.col + dx)
    }
}

/// The currently falling piece: a shape plus its anchor position.
///
/// Movement and rotation return candidate `ActivePiece` values; the session
/// checks them with [`ActivePiece::fits`] before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    shape: Shape,
    position: PiecePosition,
}

impl ActivePiece {
    /// Places `shape` at the spawn anchor: row 0, horizontally centered
    /// using integer division.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn spawn(shape: Shape, grid_width: i32) -> Self {
        let col = grid_width / 2 - shape.cols() as i32 / 2;
        Self {
            shape,
            position: PiecePosition::new(0, col),
        }
    }

    #[must_use]
    pub const fn new(shape: Shape, position: PiecePosition) -> Self {
        Self { shape, position }
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the piece shifted by `(dx, dy)` in grid space.
    #[must_use]
    pub const fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            shape: self.shape,
            position: self.position.shifted(dx, dy),
        }
    }

    /// Returns the piece with its shape rotated 90 degrees clockwise at the
    /// unchanged position.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            position: self.position,
        }
    }

    /// Placement validity, the predicate behind every mutation.
    ///
    /// A filled cell is invalid when its column leaves `[0, width)` or its
    /// row reaches `height`, and when it overlaps an occupied grid cell.
    /// Occupancy is only checked for rows >= 0: filled cells above the top
    /// edge are tolerated, without bound, as long as their columns are in
    /// range. That asymmetry lets a spawning piece hang partly off the top
    /// of the grid and must not be tightened.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn fits(&self, grid: &Grid) -> bool {
        for (y, x) in self.shape.filled_cells() {
            let row = self.position.row + y as i32;
            let col = self.position.col + x as i32;
            if col < 0 || col >= grid.width() || row >= grid.height() {
                return false;
            }
            if row >= 0 && grid.is_occupied(row, col) {
                return false;
            }
        }
        true
    }

    /// Returns the grid coordinates of the piece's filled cells.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn cell_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(y, x)| (self.position.row + y as i32, self.position.col + x as i32))
    }
}
