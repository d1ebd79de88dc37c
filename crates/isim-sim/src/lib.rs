//! `isim-sim` — the discrete-event world orchestrator.
//!
//! # Tick loop
//!
//! ```text
//! run_until = now + update_interval
//! ① Drain     — while the next merged event is due by run_until:
//!                 advance clock, apply event, refresh neighbours,
//!                 run an update pass.
//! ② Advance   — refresh neighbours, move every agent for the residual
//!               run_until − now, set clock to run_until.
//! ③ Update    — final update pass.
//! ④ Publish   — observer.on_tick_end(now, agents).
//! ```
//!
//! An *update pass* visits agents in address order or in a fresh shuffle;
//! the hub and the current neighbours get a router tick followed by
//! collision avoidance.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the bulk kinematics step on Rayon's thread pool.  |
//! | `fx-hash`  | FxHash for the neighbour set.                          |
//! | `serde`    | Propagates serde derives to all `isim-*` crates.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use isim_core::{AgentKind, SimConfig};
//! use isim_mobility::WaypointProvider;
//! use isim_sim::{NoopObserver, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(SimConfig::default())
//!     .agent(AgentKind::ManualCar, Box::new(WaypointProvider::single(route, 5.0)))
//!     .build()?;
//! world.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod cancel;
pub mod error;
pub mod observer;
pub mod order;
pub mod router;
pub mod world;


pub use builder::WorldBuilder;
pub use cancel::CancelHandle;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, ObserverList, SimObserver};
pub use router::{NoopRouter, Router, RouterContext, RouterIntent, SignalRouter};
pub use world::World;
