//! File-backed persistence for player progress.

use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use labyrinth_snake_system_progress::Progress;

/// Loads progress from `path`.
///
/// A missing file yields fresh progress. A corrupt file is reported and also
/// replaced by fresh progress, so a bad save never blocks play.
pub(crate) fn load(path: &Path) -> Result<Progress> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no saved progress, starting fresh");
            return Ok(Progress::default());
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read progress at {}", path.display()))
        }
    };

    match Progress::from_json(&contents) {
        Ok(progress) => Ok(progress),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "discarding corrupt progress");
            Ok(Progress::default())
        }
    }
}

/// Writes progress to `path`, creating parent directories when needed.
pub(crate) fn save(path: &Path, progress: &Progress) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let json = progress
        .to_json()
        .context("failed to encode progress")?;
    fs::write(path, json).with_context(|| format!("failed to write progress to {}", path.display()))
}
