use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use crate::ConfigError;

/// Enum representing the tetromino variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// L-piece.
    L = 5,
    /// J-piece.
    J = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        match rng.random_range(0..=6) {
            0 => ShapeKind::I,
            1 => ShapeKind::O,
            2 => ShapeKind::T,
            3 => ShapeKind::S,
            4 => ShapeKind::Z,
            5 => ShapeKind::L,
            _ => ShapeKind::J,
        }
    }
}

impl ShapeKind {
    /// Number of shape variants (7).
    pub const LEN: usize = 7;

    /// All shape variants in their canonical order.
    pub const ALL: [ShapeKind; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
    ];

    /// Returns the single character representation of this shape kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
        }
    }

    /// Parses a shape kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_char('I'), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'O' => Some(ShapeKind::O),
            'T' => Some(ShapeKind::T),
            'S' => Some(ShapeKind::S),
            'Z' => Some(ShapeKind::Z),
            'L' => Some(ShapeKind::L),
            'J' => Some(ShapeKind::J),
            _ => None,
        }
    }
}

/// Rectangular boolean matrix of one piece shape.
///
/// Cells live in a fixed 4x4 backing array with explicit row and column
/// counts, so every shape is rectangular and bounded. Shapes are immutable -
/// [`Shape::rotated`] returns a new `Shape` and leaves the original (and the
/// canonical catalog matrices) untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    cells: [[bool; Self::MAX_SIZE]; Self::MAX_SIZE],
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Side length of the backing array. No shape is wider or taller.
    pub const MAX_SIZE: usize = 4;

    /// Returns the canonical (unrotated) matrix of a shape kind.
    #[must_use]
    pub const fn canonical(kind: ShapeKind) -> Self {
        CANONICAL_SHAPES[kind as usize]
    }

    /// Builds a shape from a rectangular boolean matrix.
    ///
    /// Rejects matrices that are empty, larger than the 4x4 bounding box,
    /// ragged, or contain no filled cell.
    pub fn from_rows(rows: &[&[bool]]) -> Result<Self, ConfigError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(ConfigError::EmptyShape);
        }
        let cols = rows[0].len();
        if rows.len() > Self::MAX_SIZE || cols > Self::MAX_SIZE {
            return Err(ConfigError::OversizedShape);
        }

        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut any_filled = false;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ConfigError::RaggedShape);
            }
            for (c, &cell) in row.iter().enumerate() {
                cells[r][c] = cell;
                any_filled |= cell;
            }
        }
        if !any_filled {
            return Err(ConfigError::EmptyShape);
        }

        Ok(Self {
            cells,
            rows: rows.len(),
            cols,
        })
    }

    /// Number of rows in the bounding box.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the bounding box.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at `(row, col)` of the bounding box is filled.
    #[must_use]
    pub const fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    /// Returns an iterator of `(row, col)` offsets of the filled cells.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).filter_map(move |c| self.cells[r][c].then_some((r, c)))
        })
    }

    /// Returns the shape rotated 90 degrees clockwise.
    ///
    /// Row order is reversed and the matrix transposed:
    /// `rotated[c][rows - 1 - r] = cells[r][c]`. The bounding box dimensions
    /// swap accordingly.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[c][self.rows - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            cells,
            rows: self.cols,
            cols: self.rows,
        }
    }
}

const CANONICAL_SHAPES: [Shape; ShapeKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];

    const fn shape(rows: usize, cols: usize, cells: [[bool; 4]; 4]) -> Shape {
        Shape { cells, rows, cols }
    }

    [
        // I-piece
        shape(1, 4, [[C, C, C, C], EEEE, EEEE, EEEE]),
        // O-piece
        shape(2, 2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // T-piece
        shape(2, 3, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // S-piece
        shape(2, 3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // Z-piece
        shape(2, 3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // L-piece
        shape(2, 3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // J-piece
        shape(2, 3, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(shape: &Shape) -> Vec<Vec<bool>> {
        (0..shape.rows())
            .map(|r| (0..shape.cols()).map(|c| shape.is_filled(r, c)).collect())
            .collect()
    }

    #[test]
    fn test_canonical_matrices() {
        let i = Shape::canonical(ShapeKind::I);
        assert_eq!(matrix(&i), vec![vec![true, true, true, true]]);

        let o = Shape::canonical(ShapeKind::O);
        assert_eq!(matrix(&o), vec![vec![true, true], vec![true, true]]);

        let t = Shape::canonical(ShapeKind::T);
        assert_eq!(
            matrix(&t),
            vec![vec![false, true, false], vec![true, true, true]]
        );

        let s = Shape::canonical(ShapeKind::S);
        assert_eq!(
            matrix(&s),
            vec![vec![true, true, false], vec![false, true, true]]
        );

        let z = Shape::canonical(ShapeKind::Z);
        assert_eq!(
            matrix(&z),
            vec![vec![false, true, true], vec![true, true, false]]
        );

        let l = Shape::canonical(ShapeKind::L);
        assert_eq!(
            matrix(&l),
            vec![vec![true, false, false], vec![true, true, true]]
        );

        let j = Shape::canonical(ShapeKind::J);
        assert_eq!(
            matrix(&j),
            vec![vec![false, false, true], vec![true, true, true]]
        );
    }

    #[test]
    fn test_every_canonical_shape_has_filled_cells() {
        for kind in ShapeKind::ALL {
            let shape = Shape::canonical(kind);
            assert!(
                shape.filled_cells().count() > 0,
                "{} shape has no filled cells",
                kind.as_char()
            );
        }
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let i = Shape::canonical(ShapeKind::I);
        let rotated = i.rotated();
        assert_eq!((rotated.rows(), rotated.cols()), (4, 1));
        assert_eq!(
            matrix(&rotated),
            vec![vec![true], vec![true], vec![true], vec![true]]
        );
    }

    #[test]
    fn test_rotation_of_t_shape() {
        // T rotated clockwise points left:
        //   . T .        T .
        //   T T T   ->   T T
        //                T .
        let t = Shape::canonical(ShapeKind::T);
        let rotated = t.rotated();
        assert_eq!(
            matrix(&rotated),
            vec![
                vec![true, false],
                vec![true, true],
                vec![true, false],
            ]
        );
    }

    #[test]
    fn test_double_rotation_is_180_degrees() {
        // Two 90-degree rotations flip the matrix both ways.
        for kind in ShapeKind::ALL {
            let shape = Shape::canonical(kind);
            let twice = shape.rotated().rotated();

            assert_eq!((twice.rows(), twice.cols()), (shape.rows(), shape.cols()));
            for (r, c) in shape.filled_cells() {
                assert!(
                    twice.is_filled(shape.rows() - 1 - r, shape.cols() - 1 - c),
                    "{} cell ({r}, {c}) not mirrored after 180 degrees",
                    kind.as_char()
                );
            }
            assert_eq!(
                shape.filled_cells().count(),
                twice.filled_cells().count()
            );
        }
    }

    #[test]
    fn test_four_rotations_return_to_canonical() {
        for kind in ShapeKind::ALL {
            let shape = Shape::canonical(kind);
            let full_turn = shape.rotated().rotated().rotated().rotated();
            assert_eq!(shape, full_turn);
        }
    }

    #[test]
    fn test_rotation_leaves_original_untouched() {
        let t = Shape::canonical(ShapeKind::T);
        let before = matrix(&t);
        let _ = t.rotated();
        assert_eq!(matrix(&t), before);
        assert_eq!(t, Shape::canonical(ShapeKind::T));
    }

    #[test]
    fn test_from_rows_accepts_rectangular_matrix() {
        let shape = Shape::from_rows(&[&[true, false], &[true, true]]).unwrap();
        assert_eq!((shape.rows(), shape.cols()), (2, 2));
        assert_eq!(shape.filled_cells().count(), 3);
    }

    #[test]
    fn test_from_rows_rejects_invalid_matrices() {
        assert!(matches!(
            Shape::from_rows(&[]),
            Err(ConfigError::EmptyShape)
        ));
        assert!(matches!(
            Shape::from_rows(&[&[false, false]]),
            Err(ConfigError::EmptyShape)
        ));
        assert!(matches!(
            Shape::from_rows(&[&[true], &[true, true]]),
            Err(ConfigError::RaggedShape)
        ));
        assert!(matches!(
            Shape::from_rows(&[&[true, true, true, true, true]]),
            Err(ConfigError::OversizedShape)
        ));
    }

    #[test]
    fn test_shape_kind_char_conversion() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(ShapeKind::from_char('X'), None);
        assert_eq!(ShapeKind::from_char('i'), None);
    }

    #[test]
    fn test_uniform_sampling_covers_all_kinds() {
        use rand::SeedableRng as _;
        use rand_pcg::Pcg32;

        let mut rng = Pcg32::from_seed([7; 16]);
        let mut seen = [false; ShapeKind::LEN];
        for _ in 0..200 {
            let kind: ShapeKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "not all kinds drawn: {seen:?}");
    }
}
