use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectionsError {
    #[error("cannot open detections file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed detections JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One frame's worth of labeled 3D bounding boxes.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionSet {
    pub detections: Vec<Detection>,
}

/// A labeled oriented bounding box within a frame.
#[derive(Debug, Clone, Deserialize)]
pub struct Detection {
    pub label: String,
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoundingBox {
    /// Pose of the box base; the annotation format stores it under "position".
    #[serde(rename = "position")]
    pub pose: Pose,
    /// Extents along the local x, y and z axes. Expected non-negative; a
    /// degenerate size selects no points.
    pub size: Vec3,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quaternion,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Reads and parses one frame's detections file.
///
/// A record missing any required field fails the whole file.
pub fn read_detections(path: impl AsRef<Path>) -> Result<DetectionSet, DetectionsError> {
    let file = File::open(path)?;
    let set = serde_json::from_reader(BufReader::new(file))?;
    Ok(set)
}
