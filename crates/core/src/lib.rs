#![forbid(unsafe_code)]

pub mod cloud;
pub mod crop;

pub use cloud::PointCloud;
pub use crop::{euler_from_quaternion, CropBox};
