//! Tunable solver settings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Fitness penalty per word in a guess's largest group (λ).
    pub penalty_weight: f64,
    /// Fitness bonus for a guess that could itself be the answer.
    pub remaining_word_bonus: f64,
    /// Vocabulary words handed to a worker at a time.
    pub chunk_size: usize,
    /// Size of a dedicated ranking pool; `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Precompute feedback for every (guess, answer) pair.
    pub precompute_feedback: bool,
    /// Turn limit for simulated games.
    pub max_turns: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            penalty_weight: 0.1,
            remaining_word_bonus: 2.0,
            chunk_size: 64,
            threads: None,
            precompute_feedback: true,
            max_turns: 13,
        }
    }
}

impl SolverConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = SolverConfig::from_json(r#"{ "penalty_weight": 0.5, "threads": 2 }"#).unwrap();
        assert_eq!(config.penalty_weight, 0.5);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.remaining_word_bonus, 2.0);
        assert_eq!(config.chunk_size, 64);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(SolverConfig::from_json("{ penalty_weight: }").is_err());
    }
}
