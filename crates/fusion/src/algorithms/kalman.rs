//! Kalman-style fusion variant.

use contracts::{FusionOutcome, PerceptionError, SensorReading};
use tracing::info;

use crate::algorithm::{total_data_points, valid_fraction, FusionAlgorithm};

const CONFIDENCE_FACTOR: f64 = 0.95;
const CONFIDENCE_CAP: f64 = 0.95;

/// Kalman-style fusion.
///
/// Best suited when at least two concurrent streams are available
/// (continuous, lower-uncertainty case). Confidence is the valid-reading
/// fraction scaled by 0.95 and capped at 0.95.
#[derive(Debug, Default)]
pub struct KalmanFusion;

impl FusionAlgorithm for KalmanFusion {
    fn fuse(&self, readings: &[SensorReading]) -> Result<FusionOutcome, PerceptionError> {
        if readings.is_empty() {
            return Ok(FusionOutcome::empty());
        }

        info!(sensors = readings.len(), "KalmanFusion: fusing readings");

        let confidence = (valid_fraction(readings) * CONFIDENCE_FACTOR).min(CONFIDENCE_CAP);

        Ok(FusionOutcome::new(
            self.name(),
            total_data_points(readings),
            confidence,
            readings.len(),
        ))
    }

    fn name(&self) -> &'static str {
        "KalmanFusion"
    }

    fn applicable(&self, readings: &[SensorReading]) -> bool {
        readings.len() >= 2
    }

    fn score(&self, _readings: &[SensorReading]) -> f64 {
        CONFIDENCE_CAP
    }
}
