use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Default simulation cadence, matching the reference driver.
const DEFAULT_TICK_RATE: f64 = 30.0;

/// Minimum delay between renders while the state keeps changing.
const MIN_RENDER_INTERVAL: Duration = Duration::from_millis(15);

/// Event loop state management.
///
/// Produces `Tick` events at a fixed interval, `Render` events when the
/// state changed (at most once per [`MIN_RENDER_INTERVAL`]), and passes
/// crossterm events through.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: Duration::from_secs_f64(1.0 / DEFAULT_TICK_RATE),
            last_tick: past_time,
            last_render: past_time,
            dirty: true, // Initial render is required on startup
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Returns the next event.
    ///
    /// Blocks until the tick or render time is reached or a crossterm
    /// event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now.duration_since(self.last_tick) >= self.tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty && now.duration_since(self.last_render) >= MIN_RENDER_INTERVAL {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if !event::poll(self.compute_timeout(now))? {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Duration {
        let next_tick_at = self.last_tick + self.tick_interval;
        let next_at = if self.dirty {
            next_tick_at.min(self.last_render + MIN_RENDER_INTERVAL)
        } else {
            next_tick_at
        };
        next_at.saturating_duration_since(now)
    }
}
