use crate::{
    ConfigError,
    core::{piece::PiecePosition, shape::Shape},
};

/// Grid width of the reference configuration (120px screen / 10px blocks).
pub const STANDARD_WIDTH: i32 = 12;
/// Grid height of the reference configuration (200px screen / 10px blocks).
pub const STANDARD_HEIGHT: i32 = 20;

/// The grid of locked cells.
///
/// Dimensions never change after construction. Each cell is either empty or
/// occupied; which piece filled it is not tracked. The grid performs no
/// bounds policy of its own - placement legality, including the tolerance
/// for cells above the top edge, lives in
/// [`ActivePiece::fits`](crate::core::piece::ActivePiece::fits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an empty grid. Non-positive dimensions are rejected.
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::InvalidGridSize { width, height });
        }
        #[expect(clippy::cast_sign_loss)]
        let cells = vec![false; (width * height) as usize];
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Creates an empty grid with the reference dimensions (12x20).
    #[expect(clippy::cast_sign_loss)]
    #[must_use]
    pub fn standard() -> Self {
        Self {
            width: STANDARD_WIDTH,
            height: STANDARD_HEIGHT,
            cells: vec![false; (STANDARD_WIDTH * STANDARD_HEIGHT) as usize],
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Flat index of an in-range cell. Callers guarantee the bounds.
    #[expect(clippy::cast_sign_loss)]
    fn index(&self, row: i32, col: i32) -> usize {
        debug_assert!((0..self.height).contains(&row));
        debug_assert!((0..self.width).contains(&col));
        (row * self.width + col) as usize
    }

    /// Whether the cell at `(row, col)` holds a locked block.
    ///
    /// `row` and `col` must be within `[0, height)` x `[0, width)`;
    /// out-of-range coordinates are the caller's concern.
    #[must_use]
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.cells[self.index(row, col)]
    }

    /// Marks every filled cell of `shape`, offset from `position`, occupied.
    ///
    /// The placement must already be known valid; no re-validation happens
    /// here. Cells that sit above the top edge (negative row) are discarded
    /// rather than stored.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn lock_cells(&mut self, shape: &Shape, position: PiecePosition) {
        for (y, x) in shape.filled_cells() {
            let row = position.row + y as i32;
            let col = position.col + x as i32;
            if row < 0 {
                continue;
            }
            let index = self.index(row, col);
            self.cells[index] = true;
        }
    }

    /// Removes every full row, shifts the surviving rows down, and inserts
    /// that many empty rows at the top. Returns the number of rows removed.
    ///
    /// The total row count is invariant; when no row is full the grid is
    /// left untouched and 0 is returned.
    #[expect(clippy::cast_sign_loss)]
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut cleared = 0;

        for row in (0..height).rev() {
            let start = row * width;
            if self.cells[start..start + width].iter().all(|&cell| cell) {
                cleared += 1;
                continue;
            }
            if cleared > 0 {
                self.cells.copy_within(start..start + width, start + cleared * width);
            }
        }

        self.cells[..cleared * width].fill(false);
        cleared
    }

    /// Returns an iterator over the rows, top to bottom, for the render side.
    #[expect(clippy::cast_sign_loss)]
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Creates a `Grid` from ASCII art for testing.
    /// '#' represents an occupied cell, '.' represents an empty cell.
    /// All rows must have the same width.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<Vec<bool>> = art
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| *c == '#' || *c == '.')
                    .map(|c| c == '#')
                    .collect()
            })
            .collect();
        assert!(!lines.is_empty(), "ASCII art must contain at least one row");

        let width = lines[0].len();
        for (row, line) in lines.iter().enumerate() {
            assert_eq!(
                line.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {row}",
                line.len(),
            );
        }

        Self {
            width: width as i32,
            height: lines.len() as i32,
            cells: lines.into_iter().flatten().collect(),
        }
    }
}
