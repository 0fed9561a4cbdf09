//! Engine tuning configuration.
//!
//! # Responsibility
//! - Describe how square detection schedules pair evaluation.
//!
//! # Invariants
//! - Defaults are valid; every field may be omitted when deserializing.

use serde::{Deserialize, Serialize};

/// Default point count at which pair evaluation moves onto the worker pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Square engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size of a dedicated worker pool. `None` uses the process-wide rayon pool.
    pub worker_threads: Option<usize>,
    /// Point sets smaller than this are evaluated on the calling thread.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineConfig, DEFAULT_PARALLEL_THRESHOLD};

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"worker_threads": 2}"#).unwrap();
        assert_eq!(config.worker_threads, Some(2));
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }
}
