//! Extended Kalman fusion variant.

use contracts::{FusionOutcome, PerceptionError, SensorReading};
use tracing::info;

use crate::algorithm::{total_data_points, valid_fraction, FusionAlgorithm};

const CONFIDENCE_FACTOR: f64 = 0.95;
const CONFIDENCE_CAP: f64 = 0.93;

/// Extended-Kalman fusion: same shape as [`crate::KalmanFusion`] with a
/// 0.93 cap representing the enhanced model.
#[derive(Debug, Default)]
pub struct ExtendedKalmanFusion;

impl FusionAlgorithm for ExtendedKalmanFusion {
    fn fuse(&self, readings: &[SensorReading]) -> Result<FusionOutcome, PerceptionError> {
        if readings.is_empty() {
            return Ok(FusionOutcome::empty());
        }

        info!(sensors = readings.len(), "ExtendedKalmanFusion: fusing readings");

        let confidence = (valid_fraction(readings) * CONFIDENCE_FACTOR).min(CONFIDENCE_CAP);

        Ok(FusionOutcome::new(
            self.name(),
            total_data_points(readings),
            confidence,
            readings.len(),
        ))
    }

    fn name(&self) -> &'static str {
        "ExtendedKalmanFusion"
    }

    fn applicable(&self, readings: &[SensorReading]) -> bool {
        readings.len() >= 2
    }

    fn score(&self, _readings: &[SensorReading]) -> f64 {
        CONFIDENCE_CAP
    }
}
