//! Time-window scheduling and per-window cropdetect sampling.
//!
//! A file shorter than the window cap is sampled in one pass. Longer files
//! are partitioned into equal segments and each segment's leading slice is
//! sampled concurrently, which bounds total analysis time regardless of how
//! long the file is. All windows feed one shared sample pool that is reduced
//! globally, never per window.

use std::path::Path;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use rayon::prelude::*;

use crate::analysis::AxisSample;
use crate::config::CoreConfig;
use crate::error::{command_failed_error, command_start_error, CoreError, CoreResult};
use crate::external::VideoInfo;

/// One contiguous time slice of a video scheduled for sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Start position in seconds.
    pub start: f64,
    /// Sampled duration in seconds.
    pub duration: f64,
}

/// Cropdetect filter parameters passed through to ffmpeg.
#[derive(Debug, Clone, Copy)]
pub struct DetectParams {
    /// Black threshold (`limit`).
    pub limit: u32,
    /// Dimension rounding (`round`).
    pub round: u32,
}

/// Partitions a file's duration into sampling windows.
///
/// Short files (or degenerate partitions) collapse to a single whole-file
/// window. Otherwise window *i* starts at `i * floor(duration / parts)` and
/// samples the leading `min(segment, cap)` seconds of its segment.
pub fn plan_windows(duration: f64, parts: usize, cap: f64) -> Vec<Window> {
    let segment = (duration / parts as f64).floor();
    if duration < cap || parts <= 1 || segment < 1.0 {
        return vec![Window {
            start: 0.0,
            duration,
        }];
    }

    (0..parts)
        .map(|i| Window {
            start: i as f64 * segment,
            duration: segment.min(cap),
        })
        .collect()
}

/// Samples every window of a file concurrently and merges the results.
///
/// Window outputs are concatenated in window-start order, not completion
/// order, so the reducer's first-seen tie-break is stable across runs.
pub fn sample_file(
    input_path: &Path,
    info: &VideoInfo,
    config: &CoreConfig,
) -> CoreResult<Vec<AxisSample>> {
    let windows = plan_windows(info.duration_secs, config.sample_parts, config.max_window_secs);
    let params = DetectParams {
        limit: config.detect_limit,
        round: config.detect_round,
    };

    log::debug!(
        "sampling {} across {} window(s)",
        input_path.display(),
        windows.len()
    );

    let per_window: Vec<Vec<AxisSample>> = windows
        .par_iter()
        .map(|window| sample_window(input_path, *window, params))
        .collect::<CoreResult<Vec<_>>>()?;

    let samples: Vec<AxisSample> = per_window.into_iter().flatten().collect();
    if samples.is_empty() {
        return Err(CoreError::MissingSamples(format!(
            "no crop detections in any window of {}",
            input_path.display()
        )));
    }

    Ok(samples)
}

/// Runs ffmpeg cropdetect over one window and parses its detection lines.
///
/// Each matching `crop=w:h:x:y` line yields one X and one Y sample. Lines
/// that do not match are diagnostic noise and are skipped. A run that emits
/// no log output at all is treated as a failed invocation.
pub fn sample_window(
    input_path: &Path,
    window: Window,
    params: DetectParams,
) -> CoreResult<Vec<AxisSample>> {
    log::trace!(
        "sampling window at {:.1}s for {:.1}s (limit={})",
        window.start,
        window.duration,
        params.limit
    );

    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.args(["-ss", &format!("{:.2}", window.start)]);
    cmd.args(["-t", &format!("{:.2}", window.duration)]);
    cmd.input(input_path.to_string_lossy());
    cmd.args([
        "-vf",
        &format!(
            "cropdetect=limit={}:round={}:reset=1",
            params.limit, params.round
        ),
        "-f",
        "null",
        "-",
    ]);

    let mut child = cmd
        .spawn()
        .map_err(|e| command_start_error("ffmpeg", e))?;

    let mut saw_output = false;
    let mut samples = Vec::new();

    let events = child
        .iter()
        .map_err(|e| command_failed_error("ffmpeg", e.to_string()))?;
    for event in events {
        match event {
            FfmpegEvent::Log(_, line) | FfmpegEvent::Error(line) => {
                saw_output = true;
                if let Some((width, height, x, y)) = parse_crop_line(&line) {
                    samples.push(AxisSample::x(width, x));
                    samples.push(AxisSample::y(height, y));
                }
            }
            _ => {}
        }
    }

    let status = child
        .wait()
        .map_err(|e| command_failed_error("ffmpeg", e.to_string()))?;
    if !status.success() {
        return Err(command_failed_error(
            "ffmpeg",
            format!(
                "cropdetect on {} at {:.1}s exited with {}",
                input_path.display(),
                window.start,
                status
            ),
        ));
    }

    if !saw_output {
        return Err(CoreError::MissingSamples(format!(
            "ffmpeg produced no diagnostic output for {} at {:.1}s",
            input_path.display(),
            window.start
        )));
    }

    log::debug!(
        "window at {:.1}s: parsed {} detection lines",
        window.start,
        samples.len() / 2
    );

    Ok(samples)
}

/// Extracts `(width, height, x, y)` from a cropdetect log line.
///
/// Returns `None` for lines without a well-formed `crop=w:h:x:y` field.
fn parse_crop_line(line: &str) -> Option<(u32, u32, u32, u32)> {
    let crop_pos = line.find("crop=")?;
    let crop_part = &line[crop_pos + 5..];
    let end_pos = crop_part
        .find(|c: char| c.is_whitespace())
        .unwrap_or(crop_part.len());

    let fields: Vec<&str> = crop_part[..end_pos].split(':').collect();
    if fields.len() != 4 {
        return None;
    }

    let mut values = [0u32; 4];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.parse().ok()?;
    }
    Some((values[0], values[1], values[2], values[3]))
}
