//! # Fusion
//!
//! Multi-sensor fusion stage: pluggable algorithms behind one trait, a
//! selector that picks the best applicable algorithm, and a coordinator
//! that time-synchronizes readings before delegating.
//!
//! ## Usage
//!
//! ```ignore
//! use fusion::{FusionCoordinator, KalmanFusion};
//!
//! let coordinator = FusionCoordinator::new(Box::new(KalmanFusion));
//! let outcome = coordinator.process(&readings)?;
//! ```

mod algorithm;
mod algorithms;
mod coordinator;
mod selector;

pub use algorithm::FusionAlgorithm;
pub use algorithms::{
    ExtendedKalmanFusion, KalmanFusion, MockFusion, ParticleFusion, WeightedAverageFusion,
};
pub use coordinator::FusionCoordinator;
pub use selector::AlgorithmSelector;

// Re-export contracts types
pub use contracts::{CoordinatorConfig, FusionOutcome, SensorReading};
