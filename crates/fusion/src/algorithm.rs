//! FusionAlgorithm strategy contract.

use contracts::{FusionOutcome, PerceptionError, SensorReading};

/// Strategy contract for combining sensor readings into one outcome.
///
/// Implementations are pure: they may log but never mutate the input.
/// Production variants return the empty sentinel for empty input; only
/// [`crate::MockFusion`] errors on empty input, for negative testing.
pub trait FusionAlgorithm: Send + Sync + std::fmt::Debug {
    /// Fuse a batch of readings into a confidence-scored outcome.
    fn fuse(&self, readings: &[SensorReading]) -> Result<FusionOutcome, PerceptionError>;

    /// Algorithm name carried into the outcome and logs.
    fn name(&self) -> &'static str;

    /// Whether this algorithm suits the given input shape.
    ///
    /// Used by [`crate::AlgorithmSelector`]; direct injection ignores it.
    fn applicable(&self, _readings: &[SensorReading]) -> bool {
        true
    }

    /// Selection score among applicable algorithms (higher wins).
    fn score(&self, _readings: &[SensorReading]) -> f64 {
        0.0
    }
}

/// Fraction of the input readings that pass their structural validity check.
pub(crate) fn valid_fraction(readings: &[SensorReading]) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    let valid = readings.iter().filter(|r| r.is_valid()).count();
    valid as f64 / readings.len() as f64
}

/// Sum of `data_size()` over all readings, valid or not.
pub(crate) fn total_data_points(readings: &[SensorReading]) -> u64 {
    readings.iter().map(|r| r.data_size()).sum()
}
