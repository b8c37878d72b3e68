//! Layered error definitions
//!
//! Categorized by source: input / security / fusion / detection / dataset.
//! Security variants stay distinct so callers can tell an attack pattern
//! from an ordinary processing failure.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum PerceptionError {
    // ===== Input Errors =====
    /// A reading failed its construction invariants
    #[error("invalid reading at '{field}': {message}")]
    InvalidReading { field: String, message: String },

    /// Bad input handed to a pipeline stage (caller bug, not missing data)
    #[error("invalid input for {stage}: {message}")]
    InvalidInput { stage: String, message: String },

    // ===== Security Errors =====
    /// SQL injection pattern in an externally-sourced string
    #[error("sql injection pattern detected in '{input}'")]
    SqlInjection { input: String },

    /// XSS pattern in an externally-sourced string
    #[error("xss pattern detected in '{input}'")]
    Xss { input: String },

    /// Path traversal pattern in an externally-sourced string
    #[error("path traversal pattern detected in '{input}'")]
    PathTraversal { input: String },

    /// Payload size outside the allowed range
    #[error("payload size {size} outside allowed range (max {max})")]
    PayloadSize { size: i64, max: u64 },

    // ===== Fusion Errors =====
    /// The injected fusion algorithm failed during fuse()
    #[error("fusion algorithm '{algorithm}' failed: {message}")]
    FusionFailed {
        algorithm: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No fusion algorithm declared itself applicable to the input
    #[error("no applicable fusion algorithm for {sensor_count} sensor stream(s)")]
    NoApplicableAlgorithm { sensor_count: usize },

    // ===== Detection Errors =====
    /// Bad input handed to the detection engine
    #[error("invalid detection input: {message}")]
    InvalidDetectionInput { message: String },

    // ===== Dataset Errors =====
    /// Annotation file could not be parsed
    #[error("annotation parse error in '{source_name}': {message}")]
    AnnotationParse {
        source_name: String,
        message: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl PerceptionError {
    /// Create an invalid-reading error
    pub fn invalid_reading(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidReading {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-input error
    pub fn invalid_input(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Create a fusion-failure error without an underlying source
    pub fn fusion_failed(algorithm: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FusionFailed {
            algorithm: algorithm.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an annotation parse error
    pub fn annotation_parse(
        source_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::AnnotationParse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the security gate.
    ///
    /// Security errors must reach the caller unmodified so alerting can
    /// distinguish "attack detected" from "processing failed".
    pub fn is_security(&self) -> bool {
        matches!(
            self,
            Self::SqlInjection { .. }
                | Self::Xss { .. }
                | Self::PathTraversal { .. }
                | Self::PayloadSize { .. }
        )
    }
}
