//! CLI command implementations.

mod dataset;
mod run;
mod validate;

pub use dataset::run_dataset;
pub use run::run_pipeline;
pub use validate::run_validate;
