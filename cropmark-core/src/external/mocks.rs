//! Scripted collaborator implementations for pipeline and batch tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::analysis::{AxisSample, Crop};
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{MediaTools, VideoInfo};

/// Collaborator stand-in with canned responses and a write log.
pub struct MockTools {
    /// Response of the existing-metadata probe.
    pub existing_crop: bool,
    /// Response of the resolution/duration probe.
    pub info: VideoInfo,
    /// Sample pool returned for every successfully sampled file.
    pub samples: Vec<AxisSample>,
    /// Paths whose sampling step fails with `ExecutionFailed`.
    pub fail_sampling_for: Vec<PathBuf>,
    /// Every metadata write attempted, in call order.
    pub writes: Mutex<Vec<(PathBuf, Crop)>>,
}

impl MockTools {
    pub fn new(info: VideoInfo, samples: Vec<AxisSample>) -> Self {
        Self {
            existing_crop: false,
            info,
            samples,
            fail_sampling_for: Vec::new(),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

impl MediaTools for MockTools {
    fn has_existing_crop(&self, _input_path: &Path) -> CoreResult<bool> {
        Ok(self.existing_crop)
    }

    fn probe(&self, _input_path: &Path) -> CoreResult<VideoInfo> {
        Ok(self.info)
    }

    fn sample(
        &self,
        input_path: &Path,
        _info: &VideoInfo,
        _config: &CoreConfig,
    ) -> CoreResult<Vec<AxisSample>> {
        if self.fail_sampling_for.iter().any(|p| p == input_path) {
            return Err(CoreError::ExecutionFailed {
                tool: "ffmpeg".to_string(),
                reason: format!("scripted failure for {}", input_path.display()),
            });
        }
        Ok(self.samples.clone())
    }

    fn write_crop(
        &self,
        input_path: &Path,
        crop: &Crop,
        dry_run: bool,
    ) -> CoreResult<Option<String>> {
        self.writes
            .lock()
            .unwrap()
            .push((input_path.to_path_buf(), *crop));
        if dry_run {
            Ok(Some(format!("mkvpropedit {}", input_path.display())))
        } else {
            Ok(None)
        }
    }
}
