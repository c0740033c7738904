#![forbid(unsafe_code)]

pub mod error;
pub mod objects;
pub mod pairing;
pub mod report;
pub mod runner;

pub use error::ExtractError;
pub use objects::{extract_objects, ExtractedObject};
pub use pairing::{pair_frames, FramePairing};
pub use report::{LabelCounts, RunSummary};
pub use runner::ObjectExtractor;
