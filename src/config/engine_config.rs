// src/config/engine_config.rs

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::field::embeddings::ABERTH_MAX_ITERATIONS;
use crate::integer_math::pollard_rho::{RHO_MAX_RESTARTS, RHO_MAX_STRIDE};
use crate::integer_math::prime_sieve::TRIAL_DIVISION_BOUND;
use crate::order::integral_basis::ROUND2_MAX_PASSES;

/// Engine configuration: the named caps that bound every potentially
/// long-running loop. The caps are the engine's only timeout mechanism —
/// computation is synchronous and not cancelable mid-flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Algorithm iteration caps
    pub limits: LimitsConfig,
}

/// Iteration caps for the capped algorithms. Conformance tests lower
/// these deliberately to exercise the did-not-converge branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Trial division covers primes below this bound (default: 100,000)
    pub trial_division_bound: u64,

    /// Pollard-rho stride ceiling per attempt (default: 1,000,000)
    pub rho_max_stride: u64,

    /// Pollard-rho restarts; additive constants c ∈ [1, 100) (default: 99)
    pub rho_max_restarts: u32,

    /// Aberth iteration cap for numeric roots (default: 200)
    pub aberth_max_iterations: u32,

    /// Round-2 enlargement passes per prime (default: 20)
    pub round2_max_passes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            log_level: "info".to_string(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            trial_division_bound: TRIAL_DIVISION_BOUND,
            rho_max_stride: RHO_MAX_STRIDE,
            rho_max_restarts: RHO_MAX_RESTARTS,
            aberth_max_iterations: ABERTH_MAX_ITERATIONS,
            round2_max_passes: ROUND2_MAX_PASSES,
        }
    }
}

impl EngineConfig {
    /// Load configuration with precedence: defaults → config file → env vars
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        if Path::new("nfield.toml").exists() {
            builder = builder.add_source(File::with_name("nfield.toml"));
        }

        builder = builder.add_source(
            Environment::with_prefix("NFIELD")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration from an explicit file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(
            Environment::with_prefix("NFIELD")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    fn builder_with_defaults() -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("log_level", "info")?
            .set_default("limits.trial_division_bound", TRIAL_DIVISION_BOUND as i64)?
            .set_default("limits.rho_max_stride", RHO_MAX_STRIDE as i64)?
            .set_default("limits.rho_max_restarts", RHO_MAX_RESTARTS as i64)?
            .set_default("limits.aberth_max_iterations", ABERTH_MAX_ITERATIONS as i64)?
            .set_default("limits.round2_max_passes", ROUND2_MAX_PASSES as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.limits.trial_division_bound, 100_000);
        assert_eq!(config.limits.rho_max_stride, 1_000_000);
        assert_eq!(config.limits.rho_max_restarts, 99);
        assert_eq!(config.limits.aberth_max_iterations, 200);
        assert_eq!(config.limits.round2_max_passes, 20);
    }

    #[test]
    fn test_load_without_file() {
        let config = EngineConfig::load().unwrap_or_else(|_| EngineConfig::default());
        assert_eq!(config.limits.round2_max_passes, 20);
    }
}
