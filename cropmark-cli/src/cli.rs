// cropmark-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use cropmark_core::config::{
    DEFAULT_CONCURRENCY, DEFAULT_DETECT_LIMIT, DEFAULT_DETECT_ROUND, DEFAULT_MAX_WINDOW_SECS,
    DEFAULT_SAMPLE_PARTS,
};
use cropmark_core::ReducerPolicy;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Cropmark: letterbox detection and MKV crop tagging",
    long_about = "Samples ffmpeg cropdetect output across a video's timeline, \
                  aggregates the detections into one crop rectangle, and writes \
                  it as Matroska pixel-crop metadata via mkvpropedit."
)]
pub struct Cli {
    /// Input .mkv file, or directory to scan recursively
    #[arg(required = true, value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// Print the mkvpropedit command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Re-process files that already carry crop metadata
    #[arg(long)]
    pub overwrite: bool,

    /// Disable IQR outlier filtering before aggregation
    #[arg(long)]
    pub no_filter: bool,

    /// Cropdetect black threshold (filter 'limit' parameter)
    #[arg(long, value_name = "THRESHOLD", default_value_t = DEFAULT_DETECT_LIMIT)]
    pub limit: u32,

    /// Cropdetect dimension rounding (filter 'round' parameter)
    #[arg(long, value_name = "ROUND", default_value_t = DEFAULT_DETECT_ROUND)]
    pub round: u32,

    /// Number of time windows sampled on long files
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_SAMPLE_PARTS)]
    pub parts: usize,

    /// Maximum sampled duration per window, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_MAX_WINDOW_SECS)]
    pub max_window: f64,

    /// Maximum number of files processed concurrently
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Aggregation policy for the sampled crops
    #[arg(long, value_enum, default_value_t = Policy::Safest)]
    pub policy: Policy,

    /// Exit 0 even when individual files failed with expected errors
    /// (batch-level failures such as an invalid path still exit non-zero)
    #[arg(long)]
    pub ignore_file_errors: bool,

    /// Optional SQLite guard store recording per-file status across runs
    #[arg(long, value_name = "PATH", env = "CROPMARK_GUARD_DB")]
    pub guard_db: Option<PathBuf>,

    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI-facing names for the reducer policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Largest surviving picture area seen anywhere wins
    Safest,
    /// Most frequently detected crop wins
    MostSeen,
}

impl From<Policy> for ReducerPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Safest => ReducerPolicy::SafestCrop,
            Policy::MostSeen => ReducerPolicy::MostSeenCrop,
        }
    }
}
