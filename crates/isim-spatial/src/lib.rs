//! `isim-spatial` — who is near whom, and who has to brake.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                         |
//! |---------------|------------------------------------------------------------------|
//! | [`proximity`] | `ProximityIndex`, `LinearScan`, `RTreeIndex`, `ProximityBackend` |
//! | [`avoidance`] | `avoid_collisions`, `Brake`, `BrakeCause`                        |
//! | [`zones`]     | `Zones`, `Direction`, `NeighborSet`, `select_neighbors`          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | `NeighborSet` uses `rustc-hash`'s FxHash.                 |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Zones`/`Direction`. |

pub mod avoidance;
pub mod proximity;
pub mod zones;

#[cfg(test)]
mod tests;

pub use avoidance::{avoid_collisions, Brake, BrakeCause};
pub use proximity::{LinearScan, ProximityBackend, ProximityIndex, RTreeIndex};
pub use zones::{select_neighbors, Direction, NeighborSet, Zones};
