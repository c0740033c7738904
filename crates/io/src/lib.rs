#![forbid(unsafe_code)]

pub mod detections;
pub mod pcd;

pub use detections::{
    read_detections, BoundingBox, Detection, DetectionSet, DetectionsError, Pose, Quaternion, Vec3,
};
pub use pcd::{read_pcd, write_pcd};
