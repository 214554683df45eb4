//! Interactions with external CLI tools.
//!
//! This module encapsulates every process boundary the core depends on:
//! ffmpeg (cropdetect sampling), ffprobe (resolution/duration), and the
//! mkvtoolnix pair (existing-metadata probe and metadata write). Raw tool
//! output is validated here and never leaks past this layer untyped.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::analysis::{AxisSample, Crop};
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};

/// ffprobe-based resolution and duration probing
pub mod ffprobe_executor;

/// mkvmerge/mkvpropedit invocation for container metadata
pub mod mkvtoolnix;

/// Canned collaborator implementations for tests
#[cfg(test)]
pub mod mocks;

pub use ffprobe_executor::{get_video_info, VideoInfo};
pub use mkvtoolnix::{apply_crop, has_existing_crop};

/// Process-boundary seam for the per-file pipeline.
///
/// The pipeline talks to its collaborators only through this trait, so tests
/// can substitute scripted behavior without spawning any external tool.
pub trait MediaTools: Sync {
    /// Existing-metadata probe (mkvmerge).
    fn has_existing_crop(&self, input_path: &Path) -> CoreResult<bool>;

    /// Resolution/duration probe (ffprobe).
    fn probe(&self, input_path: &Path) -> CoreResult<VideoInfo>;

    /// Window-scheduled cropdetect sampling (ffmpeg).
    fn sample(
        &self,
        input_path: &Path,
        info: &VideoInfo,
        config: &CoreConfig,
    ) -> CoreResult<Vec<AxisSample>>;

    /// Metadata write (mkvpropedit); returns the rendered command under
    /// dry-run.
    fn write_crop(
        &self,
        input_path: &Path,
        crop: &Crop,
        dry_run: bool,
    ) -> CoreResult<Option<String>>;
}

/// Default implementation backed by the real external tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTools;

impl MediaTools for SystemTools {
    fn has_existing_crop(&self, input_path: &Path) -> CoreResult<bool> {
        mkvtoolnix::has_existing_crop(input_path)
    }

    fn probe(&self, input_path: &Path) -> CoreResult<VideoInfo> {
        ffprobe_executor::get_video_info(input_path)
    }

    fn sample(
        &self,
        input_path: &Path,
        info: &VideoInfo,
        config: &CoreConfig,
    ) -> CoreResult<Vec<AxisSample>> {
        crate::sampling::sample_file(input_path, info, config)
    }

    fn write_crop(
        &self,
        input_path: &Path,
        crop: &Crop,
        dry_run: bool,
    ) -> CoreResult<Option<String>> {
        mkvtoolnix::apply_crop(input_path, crop, dry_run)
    }
}

/// External tools the batch depends on; checked before any file is touched.
pub const REQUIRED_TOOLS: [&str; 4] = ["ffmpeg", "ffprobe", "mkvmerge", "mkvpropedit"];

/// Checks that a required external command is available and executable.
///
/// Runs the command with `-version` (supported by all four tools) and only
/// looks at whether it could be started at all.
pub(crate) fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("dependency '{cmd_name}' not found");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("failed to start dependency check for '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Verifies every tool in [`REQUIRED_TOOLS`] is present.
pub fn check_dependencies() -> CoreResult<()> {
    for tool in REQUIRED_TOOLS {
        check_dependency(tool)?;
    }
    Ok(())
}
