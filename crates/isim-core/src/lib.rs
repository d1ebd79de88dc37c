//! `isim-core` — foundational types for the `isim` intersection simulator.
//!
//! This crate is a dependency of every other `isim-*` crate.  It has no
//! `isim-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`ids`]    | `AgentId`                                                   |
//! | [`time`]   | `SimTime`, `SimClock`, `SimConfig`, `UpdateOrder`, `SeedPolicy` |
//! | [`rng`]    | `SimRng` (update-order shuffles)                            |
//! | [`kind`]   | `AgentKind` role tag                                        |
//! | [`error`]  | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use kind::AgentKind;
pub use rng::SimRng;
pub use time::{SeedPolicy, SimClock, SimConfig, SimTime, UpdateOrder};
