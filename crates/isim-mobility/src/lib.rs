//! `isim-mobility` — per-agent kinematics and movement records.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`path`]     | `Leg` (one provider trip), `Path` (agent route accumulator)     |
//! | [`provider`] | `PathProvider` trait, `WaypointProvider`, `StationaryProvider`  |
//! | [`record`]   | `MovementRecord` — active window and overrun prediction         |
//! | [`agent`]    | `Agent`, `Destination`, `MoveOutcome`, `NetInterface`           |
//! | [`error`]    | `MobilityError`, `MobilityResult<T>`                            |
//!
//! # Movement model
//!
//! Each tick an agent walks its current leg for `dt × speed` units:
//!
//! 1. A fresh [`MovementRecord`] snapshots the starting location and route.
//! 2. Waypoints the agent can reach within the budget are snapped to in
//!    order; the remainder interpolates toward the next one.
//! 3. When a leg runs out the agent asks its [`PathProvider`] when it may
//!    move again and waits until then.
//! 4. The record's ending location is filled in and its active window of
//!    road segments recomputed, so collision checks can read it.

pub mod agent;
pub mod error;
pub mod path;
pub mod provider;
pub mod record;


pub use agent::{Agent, Destination, MoveOutcome, NetInterface};
pub use error::{MobilityError, MobilityResult};
pub use path::{Leg, Path};
pub use provider::{PathProvider, StationaryProvider, WaypointProvider};
pub use record::MovementRecord;
