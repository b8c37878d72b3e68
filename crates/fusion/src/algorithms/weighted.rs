//! Weighted-average fusion variant.

use contracts::{FusionOutcome, PerceptionError, SensorReading};
use tracing::info;

use crate::algorithm::{total_data_points, valid_fraction, FusionAlgorithm};

const CONFIDENCE_FACTOR: f64 = 0.85;
const CONFIDENCE_CAP: f64 = 0.80;

/// Weighted-average fusion, the simplest baseline.
#[derive(Debug, Default)]
pub struct WeightedAverageFusion;

impl FusionAlgorithm for WeightedAverageFusion {
    fn fuse(&self, readings: &[SensorReading]) -> Result<FusionOutcome, PerceptionError> {
        if readings.is_empty() {
            return Ok(FusionOutcome::empty());
        }

        info!(sensors = readings.len(), "WeightedAverageFusion: fusing readings");

        let confidence = (valid_fraction(readings) * CONFIDENCE_FACTOR).min(CONFIDENCE_CAP);

        Ok(FusionOutcome::new(
            self.name(),
            total_data_points(readings),
            confidence,
            readings.len(),
        ))
    }

    fn name(&self) -> &'static str {
        "WeightedAverageFusion"
    }

    fn score(&self, _readings: &[SensorReading]) -> f64 {
        CONFIDENCE_CAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::lidar_reading;

    #[test]
    fn test_confidence_capped_at_080() {
        let readings = vec![
            lidar_reading("LIDAR-01", 1000, 100),
            lidar_reading("LIDAR-02", 1000, 100),
        ];
        let outcome = WeightedAverageFusion.fuse(&readings).unwrap();
        // All valid: 1.0 * 0.85 capped to 0.80
        assert!((outcome.confidence - 0.80).abs() < 1e-9);
        assert_eq!(outcome.sensor_count, 2);
    }

    #[test]
    fn test_empty_input_returns_sentinel() {
        let outcome = WeightedAverageFusion.fuse(&[]).unwrap();
        assert!(outcome.is_empty());
    }
}
