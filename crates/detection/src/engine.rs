//! Detection engine implementation.

use contracts::{
    DetectedObject, DetectionConfig, FusionOutcome, ObjectClass, Position3, SensorReading,
    POSITION_XY_BOUND, POSITION_Z_BOUND,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

/// Detection retention threshold: only candidates strictly above this
/// survive filtering.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Candidate divisor for the fused-outcome entry point.
const FUSED_POINTS_PER_CANDIDATE: u64 = 1000;

/// Candidate divisor for the raw-reading entry point.
const RAW_POINTS_PER_CANDIDATE: u64 = 100_000;

/// Turns fusion outcomes (or single raw readings) into confidence-filtered
/// detected objects.
///
/// Owns a seedable RNG so candidate placement is reproducible under a fixed
/// seed; no other state is kept between calls. Production use seeds from
/// system entropy, tests from [`DetectionEngine::with_seed`].
pub struct DetectionEngine {
    config: DetectionConfig,
    rng: StdRng,
}

impl DetectionEngine {
    /// Engine seeded from system entropy.
    pub fn new() -> Self {
        Self::with_config(DetectionConfig::default())
    }

    pub fn with_config(config: DetectionConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic engine for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: DetectionConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Detect objects in a fused outcome.
    ///
    /// Candidate count is `min(cap, total_data_points / 1000 + 1)`, so more
    /// fused data yields more candidates; candidate confidence additionally
    /// scales with the outcome's fused confidence.
    #[instrument(
        name = "detect_fused",
        skip(self, outcome),
        fields(sensors = outcome.sensor_count, data_points = outcome.total_data_points)
    )]
    pub fn detect_fused(&mut self, outcome: &FusionOutcome) -> Vec<DetectedObject> {
        info!(
            sensors = outcome.sensor_count,
            "starting object detection on fused data"
        );

        let candidates = (outcome.total_data_points / FUSED_POINTS_PER_CANDIDATE + 1)
            .min(self.config.max_fused_candidates);
        let quality = fused_quality(outcome);

        let objects = self.generate_candidates(candidates as usize, quality);
        let filtered = filter_by_confidence(objects);

        info!(objects = filtered.len(), "object detection completed");
        metrics::counter!("perception_detection_total", "entry" => "fused").increment(1);
        metrics::histogram!("perception_detected_objects").record(filtered.len() as f64);

        filtered
    }

    /// Detect objects directly from one raw reading.
    ///
    /// Secondary entry point that skips fusion's signal-combining benefit,
    /// hence the much smaller candidate budget.
    #[instrument(
        name = "detect_raw",
        skip(self, reading),
        fields(sensor_id = %reading.sensor_id(), kind = reading.kind().as_str())
    )]
    pub fn detect_raw(&mut self, reading: &SensorReading) -> Vec<DetectedObject> {
        info!(sensor_id = %reading.sensor_id(), "detecting from raw sensor");

        let candidates = (reading.data_size() / RAW_POINTS_PER_CANDIDATE + 1)
            .min(self.config.max_raw_candidates);
        let quality = if reading.is_valid() { 0.6 } else { 0.0 };

        let objects = self.generate_candidates(candidates as usize, quality);
        let filtered = filter_by_confidence(objects);

        metrics::counter!("perception_detection_total", "entry" => "raw").increment(1);
        metrics::histogram!("perception_detected_objects").record(filtered.len() as f64);

        filtered
    }

    /// Generate provisional object hypotheses.
    ///
    /// Classes are assigned cyclically from a random starting index so one
    /// call never collapses onto a single class. Positions stay inside the
    /// fixed bounds, confidence inside [0.5, 1.0) scaled by `quality`.
    fn generate_candidates(&mut self, count: usize, quality: f64) -> Vec<DetectedObject> {
        let class_offset = self.rng.random_range(0..ObjectClass::ALL.len());

        (0..count)
            .map(|i| {
                let class = ObjectClass::ALL[(class_offset + i) % ObjectClass::ALL.len()];

                let x = (self.rng.random::<f64>() - 0.5) * 2.0 * POSITION_XY_BOUND;
                let y = (self.rng.random::<f64>() - 0.5) * 2.0 * POSITION_XY_BOUND;
                let z = self.rng.random::<f64>() * POSITION_Z_BOUND;

                let spread = 0.25 + 0.75 * quality.clamp(0.0, 1.0);
                let confidence = 0.5 + self.rng.random::<f64>() * 0.5 * spread;

                DetectedObject {
                    object_id: format!("OBJ_{i}"),
                    class,
                    position: Position3::new(x, y, z),
                    confidence,
                }
            })
            .collect()
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Retain only candidates strictly above the threshold.
fn filter_by_confidence(objects: Vec<DetectedObject>) -> Vec<DetectedObject> {
    objects
        .into_iter()
        .filter(|o| o.confidence > CONFIDENCE_THRESHOLD)
        .collect()
}

/// Blend of fused confidence and data volume; drives the candidate
/// confidence spread so higher-quality fusion passes more candidates.
fn fused_quality(outcome: &FusionOutcome) -> f64 {
    let volume = (outcome.total_data_points as f64 / 200_000.0).min(1.0);
    ((outcome.confidence.clamp(0.0, 1.0) + volume) / 2.0).clamp(0.0, 1.0)
}
