use crossterm::event::Event as CrosstermEvent;

/// Events handed to the application by the runtime.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Simulation update timing (fixed tick cadence).
    Tick,
    /// Screen render timing.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
