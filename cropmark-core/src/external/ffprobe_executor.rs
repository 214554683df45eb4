//! FFprobe integration for resolution and duration probing.

use std::path::Path;

use ffprobe::{ffprobe, FfProbeError};

use crate::error::{CoreError, CoreResult};

/// Video metadata needed to schedule sampling and compute the crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    /// Width of the video in pixels.
    pub width: u32,
    /// Height of the video in pixels.
    pub height: u32,
    /// Duration of the video in seconds.
    pub duration_secs: f64,
}

/// Probes width, height, and duration for a given input file.
///
/// Every field is validated explicitly; a missing or non-positive value is a
/// [`CoreError::GarbageReturned`], not a silent default.
pub fn get_video_info(input_path: &Path) -> CoreResult<VideoInfo> {
    log::debug!(
        "Running ffprobe (via crate) for video info on: {}",
        input_path.display()
    );

    let metadata = ffprobe(input_path).map_err(|err| map_ffprobe_error(err, input_path))?;

    let duration_secs = metadata
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| *d > 0.0)
        .ok_or_else(|| garbage(input_path, "missing or invalid format.duration"))?;

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| garbage(input_path, "no video stream"))?;

    let width = video_stream
        .width
        .filter(|w| *w > 0)
        .ok_or_else(|| garbage(input_path, "video stream missing width"))?;
    let height = video_stream
        .height
        .filter(|h| *h > 0)
        .ok_or_else(|| garbage(input_path, "video stream missing height"))?;

    Ok(VideoInfo {
        width: width as u32,
        height: height as u32,
        duration_secs,
    })
}

fn garbage(input_path: &Path, detail: &str) -> CoreError {
    CoreError::GarbageReturned {
        tool: "ffprobe".to_string(),
        detail: format!("{} for {}", detail, input_path.display()),
    }
}

fn map_ffprobe_error(err: FfProbeError, input_path: &Path) -> CoreError {
    log::error!("ffprobe failed on {}: {err:?}", input_path.display());
    CoreError::ExecutionFailed {
        tool: "ffprobe".to_string(),
        reason: format!("probe of {} failed: {err}", input_path.display()),
    }
}
