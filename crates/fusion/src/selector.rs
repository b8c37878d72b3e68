//! Runtime algorithm selection.
//!
//! Extension point over direct injection: every registered algorithm
//! declares applicability and a score for the input shape; the
//! highest-scoring applicable one wins.

use contracts::{PerceptionError, SensorReading};
use tracing::debug;

use crate::algorithm::FusionAlgorithm;
use crate::algorithms::{ExtendedKalmanFusion, KalmanFusion, ParticleFusion, WeightedAverageFusion};

/// Selects a fusion algorithm by declared applicability and score.
pub struct AlgorithmSelector {
    candidates: Vec<Box<dyn FusionAlgorithm>>,
}

impl AlgorithmSelector {
    /// Empty selector; register candidates explicitly.
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Selector loaded with the production variants.
    ///
    /// With 2+ streams the (extended) Kalman variants apply and outscore the
    /// rest; a single stream falls back to the particle variant.
    pub fn with_defaults() -> Self {
        let mut selector = Self::new();
        selector.register(Box::new(KalmanFusion));
        selector.register(Box::new(ExtendedKalmanFusion));
        selector.register(Box::new(ParticleFusion));
        selector.register(Box::new(WeightedAverageFusion));
        selector
    }

    pub fn register(&mut self, algorithm: Box<dyn FusionAlgorithm>) {
        self.candidates.push(algorithm);
    }

    /// Pick the highest-scoring applicable algorithm for the input.
    ///
    /// Ties keep the earliest-registered candidate. Errors if nothing
    /// applies, which is a configuration problem, not a data problem.
    pub fn select(
        &self,
        readings: &[SensorReading],
    ) -> Result<&dyn FusionAlgorithm, PerceptionError> {
        let mut best: Option<(&dyn FusionAlgorithm, f64)> = None;

        for candidate in &self.candidates {
            if !candidate.applicable(readings) {
                continue;
            }
            let score = candidate.score(readings);
            debug!(algorithm = candidate.name(), score, "selector: candidate applicable");
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate.as_ref(), score));
            }
        }

        best.map(|(algorithm, _)| algorithm)
            .ok_or(PerceptionError::NoApplicableAlgorithm {
                sensor_count: readings.len(),
            })
    }
}

impl Default for AlgorithmSelector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::lidar_reading;

    #[test]
    fn test_two_streams_pick_kalman() {
        let selector = AlgorithmSelector::with_defaults();
        let readings = vec![
            lidar_reading("LIDAR-01", 1000, 100),
            lidar_reading("LIDAR-02", 1000, 100),
        ];
        let algorithm = selector.select(&readings).unwrap();
        assert_eq!(algorithm.name(), "KalmanFusion");
    }

    #[test]
    fn test_single_stream_falls_back_to_particle() {
        let selector = AlgorithmSelector::with_defaults();
        let readings = vec![lidar_reading("LIDAR-01", 1000, 100)];
        let algorithm = selector.select(&readings).unwrap();
        assert_eq!(algorithm.name(), "ParticleFusion");
    }

    #[test]
    fn test_empty_selector_is_configuration_error() {
        let selector = AlgorithmSelector::new();
        let readings = vec![lidar_reading("LIDAR-01", 1000, 100)];
        let err = selector.select(&readings).unwrap_err();
        assert!(matches!(
            err,
            PerceptionError::NoApplicableAlgorithm { sensor_count: 1 }
        ));
    }
}
