//! `isim-geom` — planar geometry for road-bound agents.
//!
//! Roads are modelled as straight [`Segment`]s between [`Coord`]s.  A point
//! is "on" a road when it lies within [`EPSILON`] of the road's infinite line.
//!
//! | Module      | Contents                                  |
//! |-------------|-------------------------------------------|
//! | [`coord`]   | `Coord`                                   |
//! | [`segment`] | `Segment`, `EPSILON`                      |
//! | [`rect`]    | `Rect` (axis-aligned zone)                |

pub mod coord;
pub mod rect;
pub mod segment;

#[cfg(test)]
mod tests;

pub use coord::Coord;
pub use rect::Rect;
pub use segment::{EPSILON, Segment};
