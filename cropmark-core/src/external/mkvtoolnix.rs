//! mkvtoolnix integration: existing-metadata probing and crop writing.
//!
//! `mkvmerge -J` tells us whether a file already carries cropping metadata;
//! `mkvpropedit` writes the per-side `pixel-crop-*` properties onto the
//! first video track.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::analysis::Crop;
use crate::error::{command_failed_error, command_start_error, CoreError, CoreResult};

#[derive(Debug, Deserialize)]
struct MergeIdentify {
    #[serde(default)]
    tracks: Vec<MergeTrack>,
}

#[derive(Debug, Deserialize)]
struct MergeTrack {
    #[serde(default)]
    properties: MergeTrackProperties,
}

#[derive(Debug, Default, Deserialize)]
struct MergeTrackProperties {
    cropping: Option<String>,
}

/// Returns true when any track of the file already has a `cropping` property.
pub fn has_existing_crop(input_path: &Path) -> CoreResult<bool> {
    log::debug!("Running mkvmerge -J on: {}", input_path.display());

    let output = Command::new("mkvmerge")
        .arg("-J")
        .arg(input_path)
        .output()
        .map_err(|e| command_start_error("mkvmerge", e))?;

    if !output.status.success() {
        return Err(command_failed_error(
            "mkvmerge",
            format!(
                "identify of {} exited with {}: {}",
                input_path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ));
    }

    let identify: MergeIdentify =
        serde_json::from_slice(&output.stdout).map_err(|e| CoreError::GarbageReturned {
            tool: "mkvmerge".to_string(),
            detail: format!("unparseable identify JSON for {}: {e}", input_path.display()),
        })?;

    Ok(identify
        .tracks
        .iter()
        .any(|track| track.properties.cropping.is_some()))
}

/// Builds the mkvpropedit argument list for a non-zero crop.
///
/// Only non-zero sides are included; the edit always targets the first video
/// track (`track:v1`).
fn propedit_args(crop: &Crop) -> Vec<String> {
    let mut args = vec!["--edit".to_string(), "track:v1".to_string()];
    for (property, value) in [
        ("pixel-crop-top", crop.top),
        ("pixel-crop-bottom", crop.bottom),
        ("pixel-crop-left", crop.left),
        ("pixel-crop-right", crop.right),
    ] {
        if value > 0 {
            args.push("--set".to_string());
            args.push(format!("{property}={value}"));
        }
    }
    args
}

/// Writes the crop onto the file's first video track.
///
/// Under dry-run the command is rendered and returned instead of executed.
/// The caller is responsible for skipping all-zero crops before calling this.
pub fn apply_crop(input_path: &Path, crop: &Crop, dry_run: bool) -> CoreResult<Option<String>> {
    let args = propedit_args(crop);

    if dry_run {
        let rendered = format!(
            "mkvpropedit {} {}",
            input_path.display(),
            args.join(" ")
        );
        log::debug!("dry run, would execute: {rendered}");
        return Ok(Some(rendered));
    }

    log::debug!(
        "Running mkvpropedit on {} with {} properties",
        input_path.display(),
        (args.len() - 2) / 2
    );

    let output = Command::new("mkvpropedit")
        .arg(input_path)
        .args(&args)
        .output()
        .map_err(|e| command_start_error("mkvpropedit", e))?;

    if !output.status.success() {
        return Err(command_failed_error(
            "mkvpropedit",
            format!(
                "edit of {} exited with {}: {}",
                input_path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propedit_args_skip_zero_sides() {
        let crop = Crop {
            top: 140,
            bottom: 140,
            left: 0,
            right: 0,
        };
        assert_eq!(
            propedit_args(&crop),
            vec![
                "--edit",
                "track:v1",
                "--set",
                "pixel-crop-top=140",
                "--set",
                "pixel-crop-bottom=140",
            ]
        );
    }

    #[test]
    fn test_propedit_args_all_sides() {
        let crop = Crop {
            top: 2,
            bottom: 4,
            left: 6,
            right: 8,
        };
        let args = propedit_args(&crop);
        assert_eq!(args.len(), 2 + 4 * 2);
        assert!(args.contains(&"pixel-crop-left=6".to_string()));
        assert!(args.contains(&"pixel-crop-right=8".to_string()));
    }

    #[test]
    fn test_dry_run_renders_command() {
        let crop = Crop {
            top: 140,
            bottom: 140,
            left: 0,
            right: 0,
        };
        let rendered = apply_crop(Path::new("/tmp/movie.mkv"), &crop, true)
            .unwrap()
            .unwrap();
        assert_eq!(
            rendered,
            "mkvpropedit /tmp/movie.mkv --edit track:v1 \
             --set pixel-crop-top=140 --set pixel-crop-bottom=140"
        );
    }

    #[test]
    fn test_identify_json_with_cropping() {
        let json = r#"{
            "tracks": [
                {"type": "video", "properties": {"cropping": "0,140,0,140"}},
                {"type": "audio", "properties": {}}
            ]
        }"#;
        let identify: MergeIdentify = serde_json::from_str(json).unwrap();
        assert!(identify
            .tracks
            .iter()
            .any(|t| t.properties.cropping.is_some()));
    }

    #[test]
    fn test_identify_json_without_cropping() {
        let json = r#"{"tracks": [{"type": "video", "properties": {"language": "und"}}]}"#;
        let identify: MergeIdentify = serde_json::from_str(json).unwrap();
        assert!(!identify
            .tracks
            .iter()
            .any(|t| t.properties.cropping.is_some()));
    }
}
