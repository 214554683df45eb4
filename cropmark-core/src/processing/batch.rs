//! Batch orchestration over many files.
//!
//! Discovery feeds a bounded rayon pool whose thread count is the
//! concurrency ceiling: each running file pipeline occupies one thread, so
//! at most `concurrency` external tool invocations for distinct files are in
//! flight at once. Typed per-file errors are absorbed, reported, and
//! counted; they never abort the rest of the batch.

use std::error::Error as _;
use std::path::PathBuf;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{check_dependencies, MediaTools, SystemTools};
use crate::guard_store::{FileStatus, GuardStore};
use crate::processing::pipeline::{process_file, FileOutcome};

/// Aggregate result of one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files whose crop was written (or rendered under dry-run).
    pub processed: usize,
    /// Files with an all-zero crop, nothing to write.
    pub zero_crop: usize,
    /// Files skipped because they were already handled.
    pub skipped: usize,
    /// Files that failed with a typed per-file error.
    pub failed: usize,
}

impl BatchSummary {
    /// True when every file settled without an error.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn absorb(&mut self, outcome: &CoreResult<FileOutcome>) {
        match outcome {
            Ok(FileOutcome::Processed(_)) => self.processed += 1,
            Ok(FileOutcome::ZeroCrop) => self.zero_crop += 1,
            Ok(FileOutcome::Skipped) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Processes a batch of files with the real external tools.
///
/// Dependencies are checked once up front; a missing tool fails the whole
/// batch before any file is touched.
pub fn process_videos(config: &CoreConfig, files: &[PathBuf]) -> CoreResult<BatchSummary> {
    check_dependencies()?;
    process_videos_with(&SystemTools, config, files)
}

/// Processes a batch of files through the given collaborator seam.
///
/// Each file runs its pipeline on the bounded pool, flushes its buffered
/// report, and records its status in the guard store when one is configured.
pub fn process_videos_with<T: MediaTools>(
    tools: &T,
    config: &CoreConfig,
    files: &[PathBuf],
) -> CoreResult<BatchSummary> {
    let guard = match &config.guard_db {
        Some(db_path) => Some(GuardStore::open(db_path)?),
        None => None,
    };

    let pool = ThreadPoolBuilder::new()
        .num_threads(config.concurrency.max(1))
        .build()
        .map_err(|e| CoreError::Internal(format!("failed to build worker pool: {e}")))?;

    log::info!(
        "processing {} file(s) with concurrency {}",
        files.len(),
        config.concurrency.max(1)
    );

    let outcomes: Vec<CoreResult<FileOutcome>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let (mut report, result) = process_file(path, config, guard.as_ref(), tools);

                if let Err(e) = &result {
                    report.push(format!("  error: {e}"));
                    let mut cause = e.source();
                    while let Some(inner) = cause {
                        report.push(format!("    caused by: {inner}"));
                        cause = inner.source();
                    }
                }

                if let Some(store) = &guard {
                    record_status(store, path, &result);
                }

                report.flush_stdout();
                result
            })
            .collect()
    });

    let mut summary = BatchSummary::default();
    for outcome in &outcomes {
        summary.absorb(outcome);
    }

    // Programmer-level failures are not per-file noise; surface the first one
    // and abort with it after every file has settled.
    if let Some(internal) = outcomes
        .into_iter()
        .filter_map(Result::err)
        .find(|e| !e.is_per_file())
    {
        return Err(internal);
    }

    Ok(summary)
}

fn record_status(store: &GuardStore, path: &std::path::Path, result: &CoreResult<FileOutcome>) {
    let status = match result {
        Ok(FileOutcome::Processed(_)) | Ok(FileOutcome::ZeroCrop) => FileStatus::Processed,
        Ok(FileOutcome::Skipped) => return,
        Err(_) => FileStatus::Errored,
    };
    if let Err(e) = store.set_status(path, status) {
        log::error!("failed to record status for {}: {e}", path.display());
    }
}
