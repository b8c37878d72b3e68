//! # Dataset
//!
//! ONCE-style annotation loading. Parses JSON annotation files into
//! [`SceneAnnotation`] values and materializes [`contracts::SensorReading`]s
//! from the declared point counts.
//!
//! The real ONCE dataset ships raw point clouds as multi-megabyte binary
//! files; this loader generates a statistically representative cloud with
//! the annotated point count instead, using a seeded generator so runs are
//! reproducible.

mod annotation;
mod loader;

pub use annotation::SceneAnnotation;
pub use loader::DatasetLoader;
