//! Minimal terminal runtime: a fixed-rate tick clock, dirty-flag renders,
//! and crossterm event passthrough, behind the [`App`] trait.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
