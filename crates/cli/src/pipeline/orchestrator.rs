//! Perception pipeline orchestrator - coordinates all components.
//!
//! Call sequence per frame: security gate -> fusion coordinator ->
//! detection engine -> report assembly. The orchestrator is the only layer
//! that turns structured errors into human-readable failure reports.

use std::time::Instant;

use anyhow::Result;
use contracts::{CoordinatorConfig, PerceptionError, PerceptionResult, SensorReading};
use detection::DetectionEngine;
use fusion::{
    AlgorithmSelector, ExtendedKalmanFusion, FusionAlgorithm, FusionCoordinator, KalmanFusion,
    ParticleFusion, WeightedAverageFusion,
};
use tracing::{info, warn};

use crate::cli::AlgorithmChoice;

/// The full perception pipeline for one stream of frames.
pub struct PerceptionPipeline {
    coordinator: FusionCoordinator,
    engine: DetectionEngine,
}

impl PerceptionPipeline {
    /// Build a pipeline around an injected fusion algorithm.
    ///
    /// `seed` fixes the detection RNG; `None` seeds from system entropy.
    pub fn new(
        algorithm: Box<dyn FusionAlgorithm>,
        config: CoordinatorConfig,
        seed: Option<u64>,
    ) -> Self {
        let engine = match seed {
            Some(seed) => DetectionEngine::with_seed(seed),
            None => DetectionEngine::new(),
        };
        Self {
            coordinator: FusionCoordinator::with_config(algorithm, config),
            engine,
        }
    }

    /// Name of the injected fusion algorithm.
    pub fn algorithm_name(&self) -> &'static str {
        self.coordinator.algorithm_name()
    }

    /// Process one frame, propagating structured errors.
    ///
    /// Security errors from the input gate pass through unmodified so the
    /// caller can distinguish "attack detected" from processing failures.
    pub fn process_frame(
        &mut self,
        readings: &[SensorReading],
    ) -> Result<PerceptionResult, PerceptionError> {
        let start = Instant::now();

        for reading in readings {
            security::validate_sensor_id(reading.sensor_id())?;
            security::validate_data_size(reading.data_size() as i64)?;
        }

        let outcome = self.coordinator.process(readings)?;
        let objects = self.engine.detect_fused(&outcome);

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            objects = objects.len(),
            confidence = outcome.confidence,
            elapsed_ms,
            "frame processed"
        );

        Ok(PerceptionResult::success(outcome, objects, elapsed_ms))
    }

    /// Process one frame, folding any error into a failed report.
    pub fn process_frame_report(&mut self, readings: &[SensorReading]) -> PerceptionResult {
        let start = Instant::now();
        match self.process_frame(readings) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "frame failed");
                PerceptionResult::failure(e.to_string(), start.elapsed().as_millis() as u64)
            }
        }
    }
}

/// Resolve a CLI algorithm choice into a concrete fusion algorithm.
///
/// `Auto` asks the selector for the highest-scoring applicable variant
/// given the shape of a representative frame.
pub fn resolve_algorithm(
    choice: AlgorithmChoice,
    readings: &[SensorReading],
) -> Result<Box<dyn FusionAlgorithm>, PerceptionError> {
    let algorithm: Box<dyn FusionAlgorithm> = match choice {
        AlgorithmChoice::Kalman => Box::new(KalmanFusion),
        AlgorithmChoice::Particle => Box::new(ParticleFusion),
        AlgorithmChoice::Weighted => Box::new(WeightedAverageFusion),
        AlgorithmChoice::Extended => Box::new(ExtendedKalmanFusion),
        AlgorithmChoice::Auto => {
            let selector = AlgorithmSelector::with_defaults();
            match selector.select(readings)?.name() {
                "KalmanFusion" => Box::new(KalmanFusion),
                "ExtendedKalmanFusion" => Box::new(ExtendedKalmanFusion),
                "ParticleFusion" => Box::new(ParticleFusion),
                _ => Box::new(WeightedAverageFusion),
            }
        }
    };
    info!(algorithm = algorithm.name(), "fusion algorithm resolved");
    Ok(algorithm)
}
