//! Game orchestration and state management.
//!
//! This module provides the high-level logic that drives the core data
//! structures through a game:
//!
//! - [`ShapeCatalog`] - the fixed shape set and its uniform random draw
//! - [`GameSession`] - the per-tick state machine (spawn, move, rotate,
//!   lock, clear, score, game over)
//! - [`SessionStats`] - score and lock/clear counters
//! - [`CatalogSeed`] - seed for a deterministic shape sequence
//!
//! # Game Flow
//!
//! 1. Build a [`GameSession`]; it spawns the first piece immediately
//! 2. An external driver calls [`GameSession::advance_tick`] at a fixed
//!    rate, passing the pressed-this-tick input signals
//! 3. Gravity pulls the piece down on a fixed cadence; a blocked downward
//!    step locks the piece, clears full rows, scores them, and spawns the
//!    next piece
//! 4. When a freshly spawned piece does not fit, the session is over; every
//!    later tick is a no-op and the final state stays readable forever
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, TickInput};
//!
//! let mut session = GameSession::standard();
//!
//! let input = TickInput {
//!     left: true,
//!     ..TickInput::default()
//! };
//! session.advance_tick(input);
//!
//! assert!(session.state().is_playing());
//! ```

pub use self::{catalog::*, session::*, stats::*};

mod catalog;
mod session;
mod stats;
