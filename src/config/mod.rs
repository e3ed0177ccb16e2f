// src/config/mod.rs

pub mod engine_config;

// Re-export main types for convenience
pub use engine_config::{EngineConfig, LimitsConfig};
