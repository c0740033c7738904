use cloudcrop_core::{euler_from_quaternion, CropBox, PointCloud};
use cloudcrop_filters::crop_box_filter;
use cloudcrop_io::Detection;

/// One cropped detection: the points inside the detection's bounding box.
#[derive(Debug, Clone)]
pub struct ExtractedObject {
    pub label: String,
    /// 1-based position of the detection within its frame.
    pub index: usize,
    pub cloud: PointCloud,
}

/// Crops every detection's bounding box out of `cloud`.
///
/// Detections are independent: each is cropped from the full input cloud, in
/// annotation order, with 1-based indices.
pub fn extract_objects(cloud: &PointCloud, detections: &[Detection]) -> Vec<ExtractedObject> {
    detections
        .iter()
        .enumerate()
        .map(|(i, det)| ExtractedObject {
            label: det.label.clone(),
            index: i + 1,
            cloud: crop_box_filter(cloud, &detection_crop_box(det)),
        })
        .collect()
}

/// Builds the crop region for one detection.
///
/// The detection position is the box base: the local z-range runs from 0 up
/// to the full height, while x and y are centered on the position.
fn detection_crop_box(det: &Detection) -> CropBox {
    let pos = det.bbox.pose.position;
    let q = det.bbox.pose.orientation;
    let size = det.bbox.size;

    CropBox::new(
        [-size.x / 2.0, -size.y / 2.0, 0.0],
        [size.x / 2.0, size.y / 2.0, size.z],
    )
    .with_translation([pos.x, pos.y, pos.z])
    .with_rotation(euler_from_quaternion(q.w, q.x, q.y, q.z))
}
