//! PerceptionResult - final per-frame report assembled by the orchestrator

use serde::{Deserialize, Serialize};

use crate::{DetectedObject, FusionOutcome};

/// Final report for one perception frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptionResult {
    /// The fusion outcome that drove detection
    pub outcome: FusionOutcome,

    /// Confidence-filtered detected objects, in generation order
    pub objects: Vec<DetectedObject>,

    /// End-to-end processing duration (milliseconds)
    pub processing_time_ms: u64,

    /// Whether the frame completed without error
    pub success: bool,

    /// Human-readable failure description, set by the orchestrator only
    pub error_message: Option<String>,
}

impl PerceptionResult {
    /// Successful frame report.
    pub fn success(
        outcome: FusionOutcome,
        objects: Vec<DetectedObject>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            outcome,
            objects,
            processing_time_ms,
            success: true,
            error_message: None,
        }
    }

    /// Failed frame report carrying the sentinel outcome.
    pub fn failure(message: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            outcome: FusionOutcome::empty(),
            objects: Vec::new(),
            processing_time_ms,
            success: false,
            error_message: Some(message.into()),
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}
