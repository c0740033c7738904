use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use cloudcrop_io::{read_detections, read_pcd, write_pcd};

use crate::error::ExtractError;
use crate::objects::extract_objects;
use crate::pairing::{pair_frames, FramePairing};
use crate::report::RunSummary;

/// Drives a full extraction run over a dataset directory pair.
///
/// Construction pairs the input directories; [`extract_all`] then processes
/// one frame at a time, writing one crop file per detection into the output
/// directory.
///
/// [`extract_all`]: ObjectExtractor::extract_all
pub struct ObjectExtractor {
    pcd_dir: PathBuf,
    dets_dir: PathBuf,
    out_dir: PathBuf,
    pairing: FramePairing,
}

impl ObjectExtractor {
    /// Pairs up the input directories and prepares the output directory.
    ///
    /// Fails only on configuration problems: an unreadable input directory
    /// or an output directory that cannot be created.
    pub fn new(
        pcd_dir: impl AsRef<Path>,
        dets_dir: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
    ) -> Result<Self, ExtractError> {
        let pcd_dir = pcd_dir.as_ref().to_path_buf();
        let dets_dir = dets_dir.as_ref().to_path_buf();
        let out_dir = out_dir.as_ref().to_path_buf();

        let pairing = pair_frames(&pcd_dir, &dets_dir)?;
        fs::create_dir_all(&out_dir).map_err(|source| ExtractError::CreateOutputDir {
            path: out_dir.clone(),
            source,
        })?;

        Ok(Self {
            pcd_dir,
            dets_dir,
            out_dir,
            pairing,
        })
    }

    /// Point-cloud filenames that have a matching detections file, sorted.
    pub fn common_files(&self) -> &[String] {
        &self.pairing.common
    }

    /// Number of point-cloud files dropped for lack of a detections file.
    pub fn unmatched_files(&self) -> usize {
        self.pairing.unmatched
    }

    /// Processes every paired frame and writes one file per detection.
    ///
    /// A frame whose cloud or detections cannot be read is skipped; a crop
    /// that cannot be written is dropped. Neither aborts the run.
    pub fn extract_all(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        for pcd_name in &self.pairing.common {
            let cloud = match read_pcd(self.pcd_dir.join(pcd_name)) {
                Ok(cloud) => cloud,
                Err(err) => {
                    warn!("skipping {}: cannot read cloud: {}", pcd_name, err);
                    summary.frames_skipped += 1;
                    continue;
                }
            };

            let dets_name = Path::new(pcd_name).with_extension("json");
            let dets = match read_detections(self.dets_dir.join(&dets_name)) {
                Ok(set) => set,
                Err(err) => {
                    warn!("skipping {}: {}", pcd_name, err);
                    summary.frames_skipped += 1;
                    continue;
                }
            };

            let stem = frame_stem(pcd_name);
            for object in extract_objects(&cloud, &dets.detections) {
                let out_name = format!("{}-{}-{}.pcd", object.label, stem, object.index);
                match write_pcd(self.out_dir.join(&out_name), &object.cloud) {
                    Ok(()) => {
                        info!("extracted {} ({} points)", out_name, object.cloud.len());
                        summary.labels.record(&object.label);
                    }
                    Err(err) => {
                        warn!("cannot write {}: {}", out_name, err);
                        summary.write_failures += 1;
                    }
                }
            }
            summary.frames_processed += 1;
        }

        summary
    }
}

/// Frame identifier used in output names: the filename without extension.
fn frame_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}
