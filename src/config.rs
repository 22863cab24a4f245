//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default cap on emitted combination nodes.
pub const DEFAULT_MAX_COMBINATIONS: usize = 24;
/// Default chance that an unlisted category pair emits nothing.
pub const DEFAULT_FALLBACK_SKIP_PROBABILITY: f64 = 0.3;

/// Tunables for one [`Pipeline`](crate::Pipeline).
///
/// Deserializes with defaults for every missing field, so `{}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stage 4 stops emitting once this many nodes exist. 0 disables Stage 4 output.
    pub max_combinations: usize,
    /// Probability in [0, 1] that the random fallback emits nothing.
    pub fallback_skip_probability: f64,
    /// Seed for Stage 4 randomness. `None` uses the thread RNG.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            fallback_skip_probability: DEFAULT_FALLBACK_SKIP_PROBABILITY,
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_combinations(mut self, max: usize) -> Self {
        self.max_combinations = max;
        self
    }

    pub fn with_fallback_skip_probability(mut self, p: f64) -> Self {
        self.fallback_skip_probability = p;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let p = self.fallback_skip_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::Config(format!(
                "fallback_skip_probability must be within [0, 1], got {p}"
            )));
        }
        Ok(())
    }
}
