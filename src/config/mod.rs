//! Reporter configuration.
//!
//! Values arrive through CLI flags or their environment variables (see
//! `main.rs`). Orchestrator credentials and region are not configured here;
//! they come from the AWS default provider chain.

use crate::consts::DEFAULT_SUCCESS_THRESHOLD;
use crate::error::ConfigError;

/// Tunables for [`ChunkReporter`](crate::handlers::reporter::ChunkReporter).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReporterConfig {
    success_threshold: f64,
}

impl ReporterConfig {
    /// Draws strictly below `success_threshold` report success.
    pub fn new(success_threshold: f64) -> Result<Self, ConfigError> {
        if !success_threshold.is_finite() || !(0.0..=1.0).contains(&success_threshold) {
            return Err(ConfigError::InvalidThreshold(success_threshold));
        }
        Ok(Self { success_threshold })
    }

    pub fn success_threshold(&self) -> f64 {
        self.success_threshold
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
        }
    }
}
