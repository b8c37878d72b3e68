//! FusionOutcome - fusion stage output
//!
//! One confidence-scored summary per fusion invocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Algorithm name carried by the empty sentinel.
pub const EMPTY_ALGORITHM_NAME: &str = "None";

/// Result of fusing a batch of sensor readings.
///
/// The "no data / failure" case is the designated sentinel from
/// [`FusionOutcome::empty`], distinguishable from a genuine low-confidence
/// result only by `sensor_count == 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionOutcome {
    /// Name of the algorithm that produced this outcome
    pub algorithm: String,

    /// Sum of `data_size()` over all contributing readings
    pub total_data_points: u64,

    /// Fused confidence in [0.0, 1.0]
    pub confidence: f64,

    /// Number of readings handed to the algorithm
    pub sensor_count: usize,

    /// Creation time (milliseconds since the Unix epoch)
    pub timestamp_ms: u64,
}

impl FusionOutcome {
    /// Create an outcome stamped with the current wall-clock time.
    pub fn new(
        algorithm: impl Into<String>,
        total_data_points: u64,
        confidence: f64,
        sensor_count: usize,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            total_data_points,
            confidence,
            sensor_count,
            timestamp_ms: now_ms(),
        }
    }

    /// The sentinel outcome for the no-data case.
    pub fn empty() -> Self {
        Self::new(EMPTY_ALGORITHM_NAME, 0, 0.0, 0)
    }

    /// Whether this is the no-data sentinel.
    pub fn is_empty(&self) -> bool {
        self.sensor_count == 0
    }

    /// A genuine outcome has at least one sensor and a non-negative score.
    pub fn is_valid(&self) -> bool {
        self.sensor_count > 0 && self.confidence >= 0.0
    }
}

impl fmt::Display for FusionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FusionOutcome[algorithm={}, data_points={}, confidence={:.2}, sensors={}]",
            self.algorithm, self.total_data_points, self.confidence, self.sensor_count
        )
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        let empty = FusionOutcome::empty();
        assert_eq!(empty.sensor_count, 0);
        assert_eq!(empty.confidence, 0.0);
        assert_eq!(empty.algorithm, EMPTY_ALGORITHM_NAME);
        assert!(empty.is_empty());
        assert!(!empty.is_valid());
    }

    #[test]
    fn test_low_confidence_is_not_sentinel() {
        let outcome = FusionOutcome::new("KalmanFusion", 1000, 0.0, 2);
        assert!(!outcome.is_empty());
        assert!(outcome.is_valid());
    }
}
