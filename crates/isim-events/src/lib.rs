//! `isim-events` — everything that can interrupt a tick.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`source`]    | `EventSource` trait, `TimedQueue`                        |
//! | [`scheduled`] | `ScheduledUpdates` (forced update-all requests)          |
//! | [`merge`]     | `EventMerge`, `Merged`, `Slot`                           |
//! | [`event`]     | `ScenarioEvent`                                          |
//! | [`loader`]    | `load_events_csv`, `load_events_reader`                  |
//! | [`error`]     | `EventError`, `EventResult<T>`                           |
//!
//! # Merge model (summary)
//!
//! The world sees a single stream of due events.  [`EventMerge`] keeps the
//! scheduled-update queue plus any number of registered sources and, on every
//! call, picks the one whose next event time is strictly the smallest.  Ties
//! go to the earlier-registered source; the scheduled-update queue always
//! counts as registered first.

pub mod error;
pub mod event;
pub mod loader;
pub mod merge;
pub mod scheduled;
pub mod source;

#[cfg(test)]
mod tests;

pub use error::{EventError, EventResult};
pub use event::ScenarioEvent;
pub use loader::{load_events_csv, load_events_reader};
pub use merge::{EventMerge, Merged, Slot};
pub use scheduled::ScheduledUpdates;
pub use source::{EventSource, TimedQueue};
