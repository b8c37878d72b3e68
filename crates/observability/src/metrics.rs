//! Perception metric recording + in-memory aggregation.
//!
//! Exported metric names are prefixed `perception_`.

use contracts::PerceptionResult;
use metrics::{counter, gauge, histogram};

/// Record metrics for one completed perception frame.
///
/// Call once per [`PerceptionResult`], whether it succeeded or not.
pub fn record_frame(result: &PerceptionResult, frame_id: u64) {
    let status = if result.success { "ok" } else { "failed" };
    counter!("perception_frames_total", "status" => status).increment(1);

    // Frame id gauge for detecting skips
    gauge!("perception_last_frame_id").set(frame_id as f64);

    histogram!("perception_frame_latency_ms").record(result.processing_time_ms as f64);

    if result.success {
        record_fusion_outcome(
            &result.outcome.algorithm,
            result.outcome.confidence,
            result.outcome.sensor_count,
        );
        record_detection_count(result.object_count());
    }
}

/// Record one fusion outcome.
pub fn record_fusion_outcome(algorithm: &str, confidence: f64, sensor_count: usize) {
    histogram!(
        "perception_fusion_outcome_confidence",
        "algorithm" => algorithm.to_string()
    )
    .record(confidence);
    gauge!("perception_fused_sensor_count").set(sensor_count as f64);
}

/// Record the object count of one detection call.
pub fn record_detection_count(objects: usize) {
    histogram!("perception_objects_per_frame").record(objects as f64);
}

/// Record a reading arriving at the pipeline.
pub fn record_reading_received(sensor_id: &str, kind: &str) {
    counter!(
        "perception_readings_received_total",
        "sensor_id" => sensor_id.to_string(),
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record end-to-end frame latency.
pub fn record_frame_latency_ms(latency_ms: f64) {
    histogram!("perception_frame_latency_ms").record(latency_ms);
}

/// In-memory aggregation of frame statistics for the end-of-run summary.
#[derive(Debug, Clone, Default)]
pub struct FrameStatsAggregator {
    /// Total frames observed
    pub total_frames: u64,

    /// Frames that failed
    pub failed_frames: u64,

    /// Total objects across successful frames
    pub total_objects: u64,

    /// Fusion confidence statistics
    pub confidence_stats: RunningStats,

    /// Frame latency statistics (ms)
    pub latency_stats: RunningStats,
}

impl FrameStatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame result into the aggregate.
    pub fn observe(&mut self, result: &PerceptionResult) {
        self.total_frames += 1;
        if result.success {
            self.total_objects += result.object_count() as u64;
            self.confidence_stats.push(result.outcome.confidence);
        } else {
            self.failed_frames += 1;
        }
        self.latency_stats.push(result.processing_time_ms as f64);
    }

    pub fn summary(&self) -> FrameStatsSummary {
        FrameStatsSummary {
            total_frames: self.total_frames,
            failed_frames: self.failed_frames,
            total_objects: self.total_objects,
            confidence: self.confidence_stats.summary(),
            latency_ms: self.latency_stats.summary(),
        }
    }
}

/// Aggregated run summary.
#[derive(Debug, Clone)]
pub struct FrameStatsSummary {
    pub total_frames: u64,
    pub failed_frames: u64,
    pub total_objects: u64,
    pub confidence: StatsSummary,
    pub latency_ms: StatsSummary,
}

/// Streaming min/max/mean without storing samples.
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            count: self.count,
            mean: self.mean(),
            min: if self.count == 0 { 0.0 } else { self.min },
            max: if self.count == 0 { 0.0 } else { self.max },
        }
    }
}

/// Snapshot of a [`RunningStats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}
