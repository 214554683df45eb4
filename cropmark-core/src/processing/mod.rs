//! Per-file pipeline and batch orchestration.

/// Per-file processing sequence
pub mod pipeline;

/// Batch orchestration over many files
pub mod batch;

pub use batch::{process_videos, process_videos_with, BatchSummary};
pub use pipeline::FileOutcome;
