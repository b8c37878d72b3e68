//! Fusion algorithm variants.

mod extended;
mod kalman;
mod mock;
mod particle;
mod weighted;

pub use extended::ExtendedKalmanFusion;
pub use kalman::KalmanFusion;
pub use mock::MockFusion;
pub use particle::ParticleFusion;
pub use weighted::WeightedAverageFusion;
