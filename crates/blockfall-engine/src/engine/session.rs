use serde::Serialize;

use crate::{
    core::{
        grid::Grid,
        piece::{ActivePiece, PiecePosition},
    },
    engine::{catalog::ShapeCatalog, stats::SessionStats},
};

/// Automatic descent cadence: one gravity step every this many ticks.
pub const GRAVITY_PERIOD: u64 = 30;

/// Lifecycle of a session. `GameOver` is terminal - only building a new
/// session leaves it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Pressed-this-tick input signals, at most one action per direction.
///
/// The quit signal never reaches the session; it belongs to the process
/// lifecycle outside the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub rotate: bool,
}

/// Read-only view of a session for the render boundary and external
/// observers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Occupancy of the locked grid, rows top to bottom.
    pub grid: Vec<Vec<bool>>,
    /// The active piece's shape matrix.
    pub piece: Vec<Vec<bool>>,
    /// Anchor of the active piece's bounding box.
    pub piece_position: PiecePosition,
    pub score: usize,
    pub game_over: bool,
}

/// The game state machine.
///
/// Owns the grid, the active piece, the shape catalog, and the score; it is
/// the sole mutator of all of them. An external driver calls
/// [`Self::advance_tick`] at a fixed rate and reads the state back between
/// ticks - there is no I/O and nothing blocks.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    catalog: ShapeCatalog,
    active: ActivePiece,
    stats: SessionStats,
    state: SessionState,
    ticks: u64,
}

impl GameSession {
    /// Creates a session over the given grid and catalog and spawns the
    /// first piece. A spawn that does not fit ends the session on the spot.
    #[must_use]
    pub fn new(grid: Grid, mut catalog: ShapeCatalog) -> Self {
        let active = ActivePiece::spawn(catalog.pick_random(), grid.width());
        let state = if active.fits(&grid) {
            SessionState::Playing
        } else {
            SessionState::GameOver
        };
        Self {
            grid,
            catalog,
            active,
            stats: SessionStats::new(),
            state,
            ticks: 0,
        }
    }

    /// Creates a session with the reference 12x20 grid and the seven
    /// canonical shapes.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Grid::standard(), ShapeCatalog::standard())
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs one tick of the state machine.
    ///
    /// Gravity pulls the piece one row down every [`GRAVITY_PERIOD`] ticks
    /// (the counter starts at zero, so the very first tick applies
    /// gravity); afterwards the pressed input signals are processed in
    /// left, right, down, rotate order. Once the session is over the tick
    /// is a no-op.
    pub fn advance_tick(&mut self, input: TickInput) {
        if self.state.is_game_over() {
            return;
        }
        let tick = self.ticks;
        self.ticks += 1;

        if tick % GRAVITY_PERIOD == 0 {
            self.move_piece(0, 1);
        }
        if input.left {
            self.move_piece(-1, 0);
        }
        if input.right {
            self.move_piece(1, 0);
        }
        if input.down {
            self.move_piece(0, 1);
        }
        if input.rotate {
            self.rotate_piece();
        }
    }

    /// Attempts to shift the active piece by `(dx, dy)` in grid space.
    ///
    /// A candidate that fits is committed. A blocked horizontal step leaves
    /// the piece where it is; a blocked downward step is the lock trigger:
    /// the piece is committed to the grid, full rows clear and score, and
    /// the next piece spawns.
    pub fn move_piece(&mut self, dx: i32, dy: i32) {
        if self.state.is_game_over() {
            return;
        }
        let candidate = self.active.shifted(dx, dy);
        if candidate.fits(&self.grid) {
            self.active = candidate;
        } else if dy == 1 {
            self.lock_active();
        }
    }

    /// Rotates the active piece 90 degrees clockwise when the rotated
    /// matrix fits at the unchanged position. A blocked rotation is
    /// discarded silently - there is no wall kick.
    pub fn rotate_piece(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        let candidate = self.active.rotated();
        if candidate.fits(&self.grid) {
            self.active = candidate;
        }
    }

    /// Lock sequence: commit the piece's cells, clear and score full rows,
    /// spawn the next piece. Atomic with respect to the tick.
    fn lock_active(&mut self) {
        self.grid.lock_cells(self.active.shape(), self.active.position());
        let cleared = self.grid.clear_full_rows();
        self.stats.record_lock(cleared);
        self.spawn_piece();
    }

    /// Spawns the next piece from the catalog. The new piece replaces the
    /// active one even when it does not fit, so the colliding spawn stays
    /// visible; the session just ends.
    fn spawn_piece(&mut self) {
        self.active = ActivePiece::spawn(self.catalog.pick_random(), self.grid.width());
        if !self.active.fits(&self.grid) {
            self.state = SessionState::GameOver;
        }
    }

    /// Captures the read-only view the render side consumes.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let shape = self.active.shape();
        SessionSnapshot {
            grid: self.grid.rows().map(<[bool]>::to_vec).collect(),
            piece: (0..shape.rows())
                .map(|r| (0..shape.cols()).map(|c| shape.is_filled(r, c)).collect())
                .collect(),
            piece_position: self.active.position(),
            score: self.stats.score(),
            game_over: self.state.is_game_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::{Shape, ShapeKind};

    fn seed(hex: &str) -> crate::CatalogSeed {
        hex.parse().unwrap()
    }

    fn single_shape_catalog(kind: ShapeKind) -> ShapeCatalog {
        ShapeCatalog::with_shapes(
            vec![Shape::canonical(kind)],
            seed("000102030405060708090a0b0c0d0e0f"),
        )
        .unwrap()
    }

    fn o_session() -> GameSession {
        GameSession::new(Grid::standard(), single_shape_catalog(ShapeKind::O))
    }

    #[test]
    fn test_first_spawn_is_centered_and_playing() {
        let session = o_session();
        assert!(session.state().is_playing());
        assert_eq!(session.active_piece().position(), PiecePosition::new(0, 5));
        assert_eq!(session.stats().score(), 0);
    }

    #[test]
    fn test_blocked_downward_move_locks_and_respawns() {
        let mut session = o_session();

        // Walk the O down to (18, 5); the next step leaves the grid.
        for _ in 0..18 {
            session.move_piece(0, 1);
        }
        assert_eq!(session.active_piece().position(), PiecePosition::new(18, 5));

        session.move_piece(0, 1);

        for (row, col) in [(18, 5), (18, 6), (19, 5), (19, 6)] {
            assert!(session.grid().is_occupied(row, col));
        }
        assert_eq!(session.stats().locked_pieces(), 1);
        assert_eq!(session.stats().score(), 0);
        // The next piece is already falling.
        assert_eq!(session.active_piece().position(), PiecePosition::new(0, 5));
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_blocked_horizontal_move_is_silently_ignored() {
        let mut session = o_session();

        for _ in 0..10 {
            session.move_piece(-1, 0);
        }

        assert_eq!(session.active_piece().position(), PiecePosition::new(0, 0));
        assert_eq!(session.stats().locked_pieces(), 0);
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_landing_on_locked_cells_locks_above_them() {
        let mut session = o_session();

        // First O settles on the floor, second one stacks on top of it.
        for _ in 0..19 {
            session.move_piece(0, 1);
        }
        for _ in 0..17 {
            session.move_piece(0, 1);
        }

        assert_eq!(session.stats().locked_pieces(), 2);
        for row in 16..20 {
            assert!(session.grid().is_occupied(row, 5));
            assert!(session.grid().is_occupied(row, 6));
        }
    }

    #[test]
    fn test_line_clears_score_100_per_row() {
        // 4-wide grid: two O pieces fill the bottom two rows completely.
        let grid = Grid::new(4, 6).unwrap();
        let mut session = GameSession::new(grid, single_shape_catalog(ShapeKind::O));
        assert_eq!(session.active_piece().position(), PiecePosition::new(0, 1));

        session.move_piece(-1, 0);
        for _ in 0..5 {
            session.move_piece(0, 1);
        }
        assert_eq!(session.stats().locked_pieces(), 1);
        assert_eq!(session.stats().score(), 0);

        session.move_piece(1, 0);
        for _ in 0..5 {
            session.move_piece(0, 1);
        }

        // Both rows cleared at once: 2 * 100 points, grid empty again.
        assert_eq!(session.stats().score(), 400);
        assert_eq!(session.stats().cleared_rows(), 2);
        for row in 0..session.grid().height() {
            for col in 0..session.grid().width() {
                assert!(!session.grid().is_occupied(row, col));
            }
        }
    }

    #[test]
    fn test_gravity_fires_on_the_30_tick_cadence() {
        let mut session = o_session();

        // Tick 0 applies gravity immediately.
        session.advance_tick(TickInput::default());
        assert_eq!(session.active_piece().position(), PiecePosition::new(1, 5));

        // Ticks 1..=29 leave the piece alone.
        for _ in 1..30 {
            session.advance_tick(TickInput::default());
        }
        assert_eq!(session.active_piece().position(), PiecePosition::new(1, 5));

        // Tick 30 pulls it down again.
        session.advance_tick(TickInput::default());
        assert_eq!(session.active_piece().position(), PiecePosition::new(2, 5));
    }

    #[test]
    fn test_down_input_reuses_the_gravity_step() {
        let mut session = o_session();

        let input = TickInput {
            down: true,
            ..TickInput::default()
        };
        // Tick 0: gravity plus the pressed down key, two rows total.
        session.advance_tick(input);
        assert_eq!(session.active_piece().position(), PiecePosition::new(2, 5));

        // Tick 1: only the pressed key.
        session.advance_tick(input);
        assert_eq!(session.active_piece().position(), PiecePosition::new(3, 5));
    }

    #[test]
    fn test_left_and_right_inputs_shift_one_column() {
        let mut session = o_session();
        session.advance_tick(TickInput {
            left: true,
            ..TickInput::default()
        });
        assert_eq!(session.active_piece().position(), PiecePosition::new(1, 4));

        session.advance_tick(TickInput {
            right: true,
            ..TickInput::default()
        });
        assert_eq!(session.active_piece().position(), PiecePosition::new(1, 5));
    }

    #[test]
    fn test_rotation_without_room_is_discarded() {
        let mut session = GameSession::new(Grid::standard(), single_shape_catalog(ShapeKind::I));

        // Ride the horizontal I down to the bottom row; the vertical form
        // would need rows 19..=22 and is rejected.
        for _ in 0..19 {
            session.move_piece(0, 1);
        }
        assert_eq!(session.active_piece().position(), PiecePosition::new(19, 4));

        session.rotate_piece();

        let shape = session.active_piece().shape();
        assert_eq!((shape.rows(), shape.cols()), (1, 4));
        assert_eq!(session.stats().locked_pieces(), 0);
    }

    #[test]
    fn test_rotation_with_room_replaces_the_shape() {
        let mut session = GameSession::new(Grid::standard(), single_shape_catalog(ShapeKind::I));

        session.rotate_piece();

        let shape = session.active_piece().shape();
        assert_eq!((shape.rows(), shape.cols()), (4, 1));
        // Anchor is unchanged by rotation.
        assert_eq!(session.active_piece().position(), PiecePosition::new(0, 4));
    }

    #[test]
    fn test_blocked_spawn_ends_the_session() {
        let grid = Grid::from_ascii(
            r"
            ############
            ############
            ............
            ............
            ............
            ............
            ",
        );
        let session = GameSession::new(grid, single_shape_catalog(ShapeKind::O));

        assert!(session.state().is_game_over());
        // The colliding spawn is still the visible piece.
        assert_eq!(session.active_piece().position(), PiecePosition::new(0, 5));
        assert_eq!(session.stats().score(), 0);
    }

    #[test]
    fn test_ticks_after_game_over_change_nothing() {
        let grid = Grid::from_ascii(
            r"
            ############
            ############
            ............
            ............
            ",
        );
        let mut session = GameSession::new(grid, single_shape_catalog(ShapeKind::O));
        assert!(session.state().is_game_over());

        let before = session.snapshot();
        for _ in 0..100 {
            session.advance_tick(TickInput {
                left: true,
                right: true,
                down: true,
                rotate: true,
            });
            session.move_piece(0, 1);
            session.rotate_piece();
        }
        let after = session.snapshot();

        assert_eq!(before.grid, after.grid);
        assert_eq!(before.piece, after.piece);
        assert_eq!(before.piece_position, after.piece_position);
        assert_eq!(before.score, after.score);
        assert!(after.game_over);
    }

    #[test]
    fn test_stacking_to_the_top_ends_the_session() {
        let mut session = o_session();

        // Drop O pieces straight down until the stack reaches the spawn
        // cell. The column fits ten of them; the eleventh cannot spawn.
        while session.state().is_playing() {
            session.move_piece(0, 1);
            assert!(session.stats().locked_pieces() <= 11);
        }

        assert_eq!(session.stats().locked_pieces(), 10);
        assert!(session.state().is_game_over());
    }

    #[test]
    fn test_snapshot_reflects_the_session() {
        let session = o_session();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.grid.len(), 20);
        assert!(snapshot.grid.iter().all(|row| row.len() == 12));
        assert_eq!(snapshot.piece, vec![vec![true, true], vec![true, true]]);
        assert_eq!(snapshot.piece_position, PiecePosition::new(0, 5));
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.game_over);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let session = o_session();
        let value = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(value["score"], 0);
        assert_eq!(value["game_over"], false);
        assert_eq!(value["piece_position"]["row"], 0);
        assert_eq!(value["piece_position"]["col"], 5);
        assert_eq!(value["grid"].as_array().unwrap().len(), 20);
    }
}
