use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::ExtractError;

/// Result of matching point-cloud files against their detections files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePairing {
    /// Point-cloud filenames with a matching detections file, sorted.
    pub common: Vec<String>,
    /// Number of point-cloud files with no detections file.
    pub unmatched: usize,
}

/// Matches every point-cloud file to the detections file sharing its stem.
///
/// Files without a partner are logged and excluded; an unreadable directory
/// aborts the run.
pub fn pair_frames(pcd_dir: &Path, dets_dir: &Path) -> Result<FramePairing, ExtractError> {
    let pcd_names = list_files(pcd_dir)?;
    let dets_names = list_files(dets_dir)?;

    let mut common = Vec::new();
    let mut unmatched = 0;
    for name in &pcd_names {
        let expected = Path::new(name).with_extension("json");
        if dets_names.contains(expected.to_string_lossy().as_ref()) {
            common.push(name.clone());
        } else {
            warn!("detections for {} not found", name);
            unmatched += 1;
        }
    }

    // Directory enumeration order is filesystem-dependent; sort so runs and
    // their logs are reproducible.
    common.sort();

    info!(
        "{} matched frames, {} without detections",
        common.len(),
        unmatched
    );
    Ok(FramePairing { common, unmatched })
}

/// Lists the plain files of a directory, skipping hidden entries and
/// subdirectories.
fn list_files(dir: &Path) -> Result<HashSet<String>, ExtractError> {
    let entries = fs::read_dir(dir).map_err(|source| ExtractError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|source| ExtractError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
            continue;
        }

        names.insert(name);
    }
    Ok(names)
}
