//! Where the simulated chunk outcome comes from.

use rand::RngExt;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ConfigError;

/// A source of uniformly distributed values in `[0, 1)`.
pub trait ChanceSource: Send + Sync {
    fn draw(&self) -> f64;
}

/// Thread-local RNG. Unseeded, not reproducible, not for crypto.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngChance;

impl ChanceSource for ThreadRngChance {
    fn draw(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Always draws the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedChance(pub f64);

impl FixedChance {
    /// Checked constructor for values from outside the process (CLI flags).
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || !(0.0..1.0).contains(&value) {
            return Err(ConfigError::InvalidChance(value));
        }
        Ok(Self(value))
    }
}

impl ChanceSource for FixedChance {
    fn draw(&self) -> f64 {
        self.0
    }
}

/// Draws a pre-defined sequence in order, starting over when exhausted.
pub struct ScriptedChance {
    values: Vec<f64>,
    index: AtomicUsize,
}

impl ScriptedChance {
    /// An empty script behaves like `FixedChance(0.0)`.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    /// How many values have been drawn so far.
    pub fn draws(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

impl ChanceSource for ScriptedChance {
    fn draw(&self) -> f64 {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        if self.values.is_empty() {
            return 0.0;
        }
        self.values[i % self.values.len()]
    }
}

/// Result of one simulated chunk-processing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Succeeded { chance: f64 },
    Failed { chance: f64 },
}

impl Outcome {
    /// Strictly below the threshold succeeds.
    pub fn decide(chance: f64, threshold: f64) -> Self {
        if chance < threshold {
            Outcome::Succeeded { chance }
        } else {
            Outcome::Failed { chance }
        }
    }

    pub fn chance(&self) -> f64 {
        match self {
            Outcome::Succeeded { chance } | Outcome::Failed { chance } => *chance,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }
}
