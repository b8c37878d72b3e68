//! Fusion coordinator: time-window synchronization + algorithm dispatch.

use contracts::{CoordinatorConfig, FusionOutcome, PerceptionError, SensorReading};
use security::sanitize_for_log;
use tracing::{error, info, instrument, warn};

use crate::algorithm::FusionAlgorithm;

/// Coordinates multi-sensor fusion through an injected algorithm.
///
/// Responsibilities end at synchronizing the batch to a common time window,
/// delegating to the algorithm, and wrapping algorithm failures; the fusion
/// math itself lives behind [`FusionAlgorithm`].
///
/// Failure policy: an algorithm error is logged once here and re-raised as
/// [`PerceptionError::FusionFailed`], so callers can catch it distinctly
/// from input-validation errors. Empty input is not a failure; it yields
/// the sentinel outcome without invoking the algorithm.
pub struct FusionCoordinator {
    config: CoordinatorConfig,
    algorithm: Box<dyn FusionAlgorithm>,
}

impl FusionCoordinator {
    /// Coordinator with the default 50 ms sync window.
    pub fn new(algorithm: Box<dyn FusionAlgorithm>) -> Self {
        Self::with_config(algorithm, CoordinatorConfig::default())
    }

    pub fn with_config(algorithm: Box<dyn FusionAlgorithm>, config: CoordinatorConfig) -> Self {
        Self { config, algorithm }
    }

    /// Name of the injected algorithm.
    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    /// Synchronize the batch and fuse it.
    ///
    /// Readings are filtered to those within `sync_window_ms` of the first
    /// reading's timestamp before the algorithm runs. An empty batch returns
    /// the sentinel outcome.
    #[instrument(
        name = "fusion_process",
        skip(self, readings),
        fields(readings = readings.len(), algorithm = self.algorithm.name())
    )]
    pub fn process(&self, readings: &[SensorReading]) -> Result<FusionOutcome, PerceptionError> {
        info!(
            sensors = readings.len(),
            algorithm = self.algorithm.name(),
            "starting fusion"
        );

        if readings.is_empty() {
            warn!("no readings provided for fusion");
            metrics::counter!("perception_fusion_total", "status" => "empty").increment(1);
            return Ok(FusionOutcome::empty());
        }

        let synchronized = self.synchronize(readings);
        metrics::histogram!("perception_fusion_sync_ratio")
            .record(synchronized.len() as f64 / readings.len() as f64);

        match self.algorithm.fuse(&synchronized) {
            Ok(outcome) => {
                info!(confidence = outcome.confidence, "fusion completed");
                metrics::counter!("perception_fusion_total", "status" => "ok").increment(1);
                metrics::histogram!("perception_fusion_confidence").record(outcome.confidence);
                Ok(outcome)
            }
            Err(e) => {
                error!(
                    algorithm = self.algorithm.name(),
                    error = %sanitize_for_log(&e.to_string()),
                    "fusion failed"
                );
                metrics::counter!("perception_fusion_total", "status" => "failed").increment(1);
                Err(PerceptionError::FusionFailed {
                    algorithm: self.algorithm.name().to_string(),
                    message: e.to_string(),
                    source: Some(Box::new(e)),
                })
            }
        }
    }

    /// Readings within the sync window of the first reading's timestamp.
    ///
    /// The reference reading always matches itself (diff 0), so the
    /// full-list fallback only covers degenerate edge conditions; it is a
    /// policy decision, not an error.
    fn synchronize(&self, readings: &[SensorReading]) -> Vec<SensorReading> {
        let reference = readings[0].timestamp_ms();
        let window = self.config.sync_window_ms;

        let synced: Vec<SensorReading> = readings
            .iter()
            .filter(|r| r.timestamp_ms().abs_diff(reference) <= window)
            .cloned()
            .collect();

        if synced.is_empty() {
            warn!(reference, window, "sync window matched nothing, using full batch");
            readings.to_vec()
        } else {
            synced
        }
    }
}
