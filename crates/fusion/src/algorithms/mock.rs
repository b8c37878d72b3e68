//! Mock fusion algorithm for tests.

use contracts::{FusionOutcome, PerceptionError, SensorReading};

use crate::algorithm::FusionAlgorithm;

/// Mock fusion returning a predefined outcome.
///
/// Unlike the production variants, this errors on empty input so negative
/// paths through the coordinator can be exercised. Never registered with
/// the selector by default.
#[derive(Debug)]
pub struct MockFusion {
    predefined: FusionOutcome,
}

impl MockFusion {
    /// Mock with an explicit outcome to return.
    pub fn returning(predefined: FusionOutcome) -> Self {
        Self { predefined }
    }
}

impl Default for MockFusion {
    fn default() -> Self {
        Self::returning(FusionOutcome::new("MockFusion", 100, 0.95, 2))
    }
}

impl FusionAlgorithm for MockFusion {
    fn fuse(&self, readings: &[SensorReading]) -> Result<FusionOutcome, PerceptionError> {
        if readings.is_empty() {
            return Err(PerceptionError::invalid_input(
                "fusion",
                "sensor readings cannot be empty",
            ));
        }
        Ok(self.predefined.clone())
    }

    fn name(&self) -> &'static str {
        "MockFusion"
    }
}
