//! Per-file processing sequence.
//!
//! One file moves through: skip check, probe, window sampling, per-axis
//! aggregation, crop calculation, and the metadata write. Every user-facing
//! line lands in the file's own [`FileReport`]; the caller flushes it once
//! the run settles, so concurrent files never interleave their output.
//!
//! All collaborator traffic goes through the [`MediaTools`] seam, which is
//! what lets the tests below drive the full sequence without external tools.

use std::path::Path;

use crate::analysis::{calculate_crop, filter_outliers, reduce_axis, Axis, AxisSample, Crop};
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::MediaTools;
use crate::guard_store::{FileStatus, GuardStore};
use crate::report::FileReport;

/// How a single file's pipeline run ended (short of an error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Crop metadata was written (or rendered, under dry-run).
    Processed(Crop),
    /// Detection found no bars; nothing to write.
    ZeroCrop,
    /// File already carried crop metadata, or the guard store had it.
    Skipped,
}

/// Runs the full pipeline for one file.
///
/// Always returns the report buffer, complete up to the point of failure, so
/// the caller can flush it whether or not the run succeeded.
pub fn process_file<T: MediaTools>(
    input_path: &Path,
    config: &CoreConfig,
    guard: Option<&GuardStore>,
    tools: &T,
) -> (FileReport, CoreResult<FileOutcome>) {
    let mut report = FileReport::new(format!("{}", input_path.display()));
    let result = run_stages(input_path, config, guard, tools, &mut report);
    (report, result)
}

fn run_stages<T: MediaTools>(
    input_path: &Path,
    config: &CoreConfig,
    guard: Option<&GuardStore>,
    tools: &T,
    report: &mut FileReport,
) -> CoreResult<FileOutcome> {
    if !config.overwrite {
        if let Some(store) = guard {
            if store.status(input_path)? == FileStatus::Processed {
                report.push("  skipped: recorded as processed in guard store");
                return Ok(FileOutcome::Skipped);
            }
        }
        if tools.has_existing_crop(input_path)? {
            report.push("  skipped: container already has crop metadata");
            return Ok(FileOutcome::Skipped);
        }
    }

    let info = tools.probe(input_path)?;
    report.push(format!(
        "  probed {}x{}, {:.1}s",
        info.width, info.height, info.duration_secs
    ));

    let samples = tools.sample(input_path, &info, config)?;
    report.push(format!("  collected {} axis samples", samples.len()));

    let x = reduce_pool(&samples, Axis::X, config)?;
    let y = reduce_pool(&samples, Axis::Y, config)?;
    let crop = calculate_crop(&info, &x, &y)?;
    report.push(format!("  crop: {crop}"));

    if crop.is_zero() {
        report.push("  no bars detected, nothing to write");
        return Ok(FileOutcome::ZeroCrop);
    }

    match tools.write_crop(input_path, &crop, config.dry_run)? {
        Some(rendered) => report.push(format!("  dry run, would execute: {rendered}")),
        None => report.push("  wrote crop metadata"),
    }

    Ok(FileOutcome::Processed(crop))
}

/// Extracts one axis from the pooled samples, filters it when enabled, and
/// reduces it to the chosen value.
fn reduce_pool(samples: &[AxisSample], axis: Axis, config: &CoreConfig) -> CoreResult<AxisSample> {
    let pool: Vec<AxisSample> = samples.iter().filter(|s| s.axis == axis).copied().collect();
    if pool.is_empty() {
        return Err(CoreError::MissingSamples(format!(
            "no samples on axis {axis:?}"
        )));
    }

    let pool = if config.enable_filter {
        filter_outliers(&pool)?
    } else {
        pool
    };

    reduce_axis(&pool, config.reducer)
}
