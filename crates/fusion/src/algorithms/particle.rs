//! Particle-style fusion variant.

use contracts::{FusionOutcome, PerceptionError, SensorReading};
use tracing::{debug, info};

use crate::algorithm::{total_data_points, valid_fraction, FusionAlgorithm};

const CONFIDENCE_FACTOR: f64 = 0.90;
const CONFIDENCE_CAP: f64 = 0.92;

/// Particle-style fusion.
///
/// Fallback for single-stream or high-uncertainty input. The internal
/// particle count scales with stream count as a cost/quality knob; it does
/// not change the output contract.
#[derive(Debug, Default)]
pub struct ParticleFusion;

impl ParticleFusion {
    /// Particle budget for the given number of streams.
    fn particle_count(streams: usize) -> u32 {
        match streams {
            0 | 1 => 100,
            2..=3 => 500,
            _ => 1000,
        }
    }
}

impl FusionAlgorithm for ParticleFusion {
    fn fuse(&self, readings: &[SensorReading]) -> Result<FusionOutcome, PerceptionError> {
        if readings.is_empty() {
            return Ok(FusionOutcome::empty());
        }

        let particles = Self::particle_count(readings.len());
        info!(sensors = readings.len(), particles, "ParticleFusion: fusing readings");
        debug!(particles, "particle budget selected");

        let confidence = (valid_fraction(readings) * CONFIDENCE_FACTOR).min(CONFIDENCE_CAP);

        Ok(FusionOutcome::new(
            self.name(),
            total_data_points(readings),
            confidence,
            readings.len(),
        ))
    }

    fn name(&self) -> &'static str {
        "ParticleFusion"
    }

    // Always applicable: this is the fallback for the high-uncertainty case.
    fn score(&self, _readings: &[SensorReading]) -> f64 {
        CONFIDENCE_CAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::lidar_reading;

    #[test]
    fn test_empty_input_returns_sentinel() {
        let outcome = ParticleFusion.fuse(&[]).unwrap();
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_single_stream_confidence() {
        let readings = vec![lidar_reading("LIDAR-01", 1000, 2500)];
        let outcome = ParticleFusion.fuse(&readings).unwrap();
        assert_eq!(outcome.sensor_count, 1);
        assert_eq!(outcome.total_data_points, 2500);
        assert!((outcome.confidence - 0.90).abs() < 1e-9);
    }

    #[test]
    fn test_particle_budget_scales_with_streams() {
        assert_eq!(ParticleFusion::particle_count(1), 100);
        assert_eq!(ParticleFusion::particle_count(3), 500);
        assert_eq!(ParticleFusion::particle_count(4), 1000);
    }

    #[test]
    fn test_always_applicable() {
        assert!(ParticleFusion.applicable(&[]));
        assert!(ParticleFusion.applicable(&[lidar_reading("LIDAR-01", 1000, 10)]));
    }
}
