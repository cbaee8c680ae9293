//! gantt-rs: headless layout engine for Gantt/timeline widgets.
//!
//! This crate keeps the layout math of a day-grid project planner out of the
//! UI layer: a pure core (grids, packing, scrolling, visibility) plus a thin
//! caching facade for GTK4/Relm4 hosts. Rendering, animation, and data IO
//! stay in the host application.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig, TimelineInputs};
pub use error::{GanttError, GanttResult};
