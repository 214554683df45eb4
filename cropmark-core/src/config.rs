//! Configuration structures and default constants for cropmark-core.
//!
//! Instances of [`CoreConfig`] are created by consumers of the library (like
//! cropmark-cli) and passed to [`crate::process_videos`] to control sampling
//! and metadata writing behavior.

use std::path::PathBuf;

use crate::analysis::ReducerPolicy;

/// Default number of time windows a long file is partitioned into.
pub const DEFAULT_SAMPLE_PARTS: usize = 6;

/// Default cap on the sampled duration of a single window, in seconds.
pub const DEFAULT_MAX_WINDOW_SECS: f64 = 60.0;

/// Default cropdetect black threshold (`limit` filter parameter).
pub const DEFAULT_DETECT_LIMIT: u32 = 24;

/// Default cropdetect rounding (`round` filter parameter).
pub const DEFAULT_DETECT_ROUND: u32 = 2;

/// Default ceiling on concurrently processed files.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Main configuration structure for the cropmark-core library.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----
    /// Input file or directory to process.
    pub input_path: PathBuf,

    /// Optional path to the persistent guard store database.
    pub guard_db: Option<PathBuf>,

    // ---- Sampling Settings ----
    /// Number of time windows to sample on long files.
    pub sample_parts: usize,

    /// Maximum sampled duration per window, in seconds.
    pub max_window_secs: f64,

    /// Cropdetect black threshold (`limit`).
    pub detect_limit: u32,

    /// Cropdetect dimension rounding (`round`).
    pub detect_round: u32,

    // ---- Aggregation Settings ----
    /// Whether to drop IQR outliers before reducing samples.
    pub enable_filter: bool,

    /// Policy used to reduce an axis sample pool to one value.
    pub reducer: ReducerPolicy,

    // ---- Processing Options ----
    /// Maximum number of files processed concurrently.
    pub concurrency: usize,

    /// Re-process files that already carry crop metadata.
    pub overwrite: bool,

    /// Render the mkvpropedit command instead of running it.
    pub dry_run: bool,
}

impl CoreConfig {
    /// Creates a configuration with library defaults for the given input path.
    pub fn new(input_path: PathBuf) -> Self {
        Self {
            input_path,
            guard_db: None,
            sample_parts: DEFAULT_SAMPLE_PARTS,
            max_window_secs: DEFAULT_MAX_WINDOW_SECS,
            detect_limit: DEFAULT_DETECT_LIMIT,
            detect_round: DEFAULT_DETECT_ROUND,
            enable_filter: true,
            reducer: ReducerPolicy::SafestCrop,
            concurrency: DEFAULT_CONCURRENCY,
            overwrite: false,
            dry_run: false,
        }
    }
}
