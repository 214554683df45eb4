//! Core library for batch letterbox detection and MKV crop tagging.
//!
//! This crate estimates the safe crop rectangle of video files by sampling
//! ffmpeg cropdetect output at several points along the timeline, reducing
//! the noisy per-frame detections to one stable decision per file, and
//! persisting the result as Matroska `pixel-crop-*` metadata via
//! mkvpropedit.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use cropmark_core::{find_processable_files, process_videos, CoreConfig};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(PathBuf::from("/path/to/library"));
//! let files = find_processable_files(&config.input_path).unwrap();
//! let summary = process_videos(&config, &files).unwrap();
//! println!("{} written, {} skipped", summary.processed, summary.skipped);
//! ```

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod guard_store;
pub mod processing;
pub mod report;
pub mod sampling;

// Re-exports for public API
pub use analysis::{Axis, AxisSample, Crop, ReducerPolicy};
pub use config::CoreConfig;
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use external::{MediaTools, SystemTools, VideoInfo};
pub use guard_store::{FileStatus, GuardStore};
pub use processing::{process_videos, process_videos_with, BatchSummary, FileOutcome};
pub use sampling::Window;
