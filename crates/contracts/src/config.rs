//! Pipeline configuration contracts shared across crates.

use serde::{Deserialize, Serialize};

/// Fusion coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Maximum timestamp distance (ms) from the reference reading for a
    /// reading to count as concurrent
    #[serde(default = "default_sync_window_ms")]
    pub sync_window_ms: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            sync_window_ms: default_sync_window_ms(),
        }
    }
}

fn default_sync_window_ms() -> u64 {
    50
}

/// Detection engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Candidate cap for the fused-outcome entry point
    #[serde(default = "default_max_fused_candidates")]
    pub max_fused_candidates: u64,

    /// Candidate cap for the raw-reading entry point (no fusion benefit)
    #[serde(default = "default_max_raw_candidates")]
    pub max_raw_candidates: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_fused_candidates: default_max_fused_candidates(),
            max_raw_candidates: default_max_raw_candidates(),
        }
    }
}

fn default_max_fused_candidates() -> u64 {
    50
}

fn default_max_raw_candidates() -> u64 {
    10
}
