use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration failures that abort a run before any frame is processed.
///
/// Everything else (missing detections files, malformed annotations, failed
/// crop writes) is logged, tallied and skipped, never propagated.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("cannot create output directory {}: {source}", path.display())]
    CreateOutputDir { path: PathBuf, source: io::Error },
}
