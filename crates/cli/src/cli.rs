//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Perception - synthetic autonomous-vehicle perception pipeline
#[derive(Parser, Debug)]
#[command(
    name = "perception",
    author,
    version,
    about = "Synthetic AV perception pipeline: fusion + detection",
    long_about = "Runs the perception pipeline over synthetic or dataset-derived sensor \n\
                  readings: validates input, synchronizes readings to a time window, \n\
                  fuses them with a pluggable algorithm, and detects objects above \n\
                  the confidence threshold."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PERCEPTION_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "PERCEPTION_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline over synthetic sensor streams
    Run(RunArgs),

    /// Load a dataset annotation and process it as one frame
    Dataset(DatasetArgs),

    /// Validate an annotation file without running the pipeline
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Number of synthetic frames to process
    #[arg(long, default_value = "10", env = "PERCEPTION_FRAMES")]
    pub frames: u64,

    /// Interval between synthetic frames (milliseconds)
    #[arg(long, default_value = "100", env = "PERCEPTION_FRAME_INTERVAL_MS")]
    pub interval_ms: u64,

    /// Fusion algorithm to inject ("auto" selects by applicability + score)
    #[arg(long, value_enum, default_value = "auto", env = "PERCEPTION_ALGORITHM")]
    pub algorithm: AlgorithmChoice,

    /// Synchronization window (milliseconds)
    #[arg(long, default_value = "50", env = "PERCEPTION_SYNC_WINDOW_MS")]
    pub sync_window_ms: u64,

    /// Detection RNG seed (omit to seed from system entropy)
    #[arg(long, env = "PERCEPTION_SEED")]
    pub seed: Option<u64>,

    /// LiDAR points per synthetic frame
    #[arg(long, default_value = "5000")]
    pub lidar_points: u32,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "PERCEPTION_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `dataset` command
#[derive(Parser, Debug, Clone)]
pub struct DatasetArgs {
    /// Path to an ONCE-format annotation JSON file
    #[arg(short, long)]
    pub annotation: PathBuf,

    /// Fusion algorithm to inject
    #[arg(long, value_enum, default_value = "auto")]
    pub algorithm: AlgorithmChoice,

    /// Detection RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output the perception result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to an annotation file to validate
    #[arg(short, long)]
    pub annotation: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Fusion algorithm choice
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlgorithmChoice {
    /// Highest-scoring applicable algorithm per batch shape
    #[default]
    Auto,
    /// Kalman-style fusion
    Kalman,
    /// Particle-style fusion
    Particle,
    /// Weighted-average fusion
    Weighted,
    /// Extended Kalman fusion
    Extended,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
