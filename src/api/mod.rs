pub mod data_cache;
pub mod engine;
pub mod engine_config;
pub mod inputs;

pub use data_cache::{DataCache, DataCacheStats, input_signature};
pub use engine::{EngineSnapshot, TimelineEngine};
pub use engine_config::TimelineEngineConfig;
pub use inputs::{RawCapacity, RawCompletion, RawElement, RawStage, TimelineInputs};
