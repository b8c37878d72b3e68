//! # Detection
//!
//! Confidence-filtered object detection over fused sensor data.
//!
//! The detection math is synthetic: candidate counts derive from data
//! volume and placement is pseudo-random. The contract that matters is the
//! strict confidence filter and the fixed position bounds.
//!
//! ## Usage
//!
//! ```ignore
//! use detection::DetectionEngine;
//!
//! let mut engine = DetectionEngine::new();
//! let objects = engine.detect_fused(&outcome);
//! assert!(objects.iter().all(|o| o.confidence > 0.5));
//! ```

mod engine;

pub use engine::{DetectionEngine, CONFIDENCE_THRESHOLD};

// Re-export contracts types
pub use contracts::{DetectedObject, DetectionConfig, FusionOutcome, ObjectClass, Position3};
