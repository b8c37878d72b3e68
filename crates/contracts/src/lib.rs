//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and errors.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Uses a monotonic sensor timestamp (milliseconds, u64) as primary clock
//! - A timestamp of 0 is invalid; readings carry the instant they were captured

mod config;
mod detection;
mod error;
mod outcome;
mod reading;
mod result;
mod sensor_id;

pub use config::*;
pub use detection::*;
pub use error::*;
pub use outcome::*;
pub use reading::*;
pub use result::*;
pub use sensor_id::SensorId;
