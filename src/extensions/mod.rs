//! Optional host-facing hook modules live here.
//!
//! Keep extensions decoupled: they observe the engine, core paths never
//! depend on them.

pub mod observers;

pub use observers::{TimelineContext, TimelineEvent, TimelineObserver};
