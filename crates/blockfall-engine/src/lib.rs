pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Errors raised when a session is built from invalid parameters.
///
/// The simulation itself has no recoverable errors: a blocked move, a
/// discarded rotation, and a failed spawn are game events, not failures.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid dimensions must be positive, got {width}x{height}")]
    InvalidGridSize { width: i32, height: i32 },
    #[display("shape set must contain at least one shape")]
    EmptyShapeSet,
    #[display("shape must contain at least one filled cell")]
    EmptyShape,
    #[display("shape rows must all have the same length")]
    RaggedShape,
    #[display("shape exceeds the 4x4 bounding box")]
    OversizedShape,
}
