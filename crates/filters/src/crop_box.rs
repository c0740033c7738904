use cloudcrop_core::{CropBox, PointCloud};

/// Keeps the points of `cloud` that fall inside `crop`, preserving order.
pub fn crop_box_filter(cloud: &PointCloud, crop: &CropBox) -> PointCloud {
    if cloud.is_empty() {
        return PointCloud::new();
    }

    let mut keep = Vec::new();
    for i in 0..cloud.len() {
        if crop.contains(cloud.point(i)) {
            keep.push(i);
        }
    }

    cloud.select(&keep)
}
