//! # Security
//!
//! Input threat screening for externally-sourced values.
//!
//! Runs as a pre-call gate before readings reach the fusion coordinator;
//! the core crates assume these checks have already happened. Errors carry
//! distinct variants per threat class so alerting can separate "attack
//! detected" from ordinary processing failures.

mod validator;

pub use validator::{sanitize_input, sanitize_for_log, validate_data_size, validate_sensor_id};

/// Maximum accepted payload size in bytes (100 MB).
pub const MAX_DATA_SIZE: u64 = 100_000_000;
