//! Pipeline orchestration: wiring, mock sources, statistics.

mod mock;
mod orchestrator;
mod stats;

pub use mock::{MockFrameConfig, MockFrameSource};
pub use orchestrator::{resolve_algorithm, PerceptionPipeline};
pub use stats::PipelineStats;
