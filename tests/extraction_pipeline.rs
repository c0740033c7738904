use std::fs;
use std::path::{Path, PathBuf};

use cloudcrop_core::PointCloud;
use cloudcrop_extract::ObjectExtractor;
use cloudcrop_io::{read_pcd, write_pcd};

struct Dataset {
    _root: tempfile::TempDir,
    pcd_dir: PathBuf,
    dets_dir: PathBuf,
    out_dir: PathBuf,
}

fn dataset() -> Dataset {
    let root = tempfile::tempdir().unwrap();
    let pcd_dir = root.path().join("pcd");
    let dets_dir = root.path().join("dets3d");
    let out_dir = root.path().join("objects");
    fs::create_dir(&pcd_dir).unwrap();
    fs::create_dir(&dets_dir).unwrap();
    Dataset {
        _root: root,
        pcd_dir,
        dets_dir,
        out_dir,
    }
}

fn write_frame(dir: &Path, name: &str, points: &[[f32; 3]]) {
    let cloud = PointCloud::from_xyz(
        points.iter().map(|p| p[0]).collect(),
        points.iter().map(|p| p[1]).collect(),
        points.iter().map(|p| p[2]).collect(),
    );
    write_pcd(dir.join(name), &cloud).unwrap();
}

const CAR_AT_ORIGIN: &str = r#"{
    "detections": [
        {
            "label": "car",
            "bbox": {
                "position": {
                    "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
                    "orientation": { "w": 1.0, "x": 0.0, "y": 0.0, "z": 0.0 }
                },
                "size": { "x": 2.0, "y": 2.0, "z": 2.0 }
            }
        }
    ]
}"#;

#[test]
fn single_car_detection_end_to_end() {
    let ds = dataset();
    write_frame(
        &ds.pcd_dir,
        "frame1.pcd",
        &[
            [0.0, 0.0, 0.0],    // box base corner-on, inclusive
            [0.5, -0.5, 1.0],   // interior
            [1.0, 1.0, 2.0],    // far corner, inclusive
            [0.0, 0.0, -0.5],   // below the base
            [1.5, 0.0, 1.0],    // outside x
            [0.0, 0.0, 2.5],    // above the top
        ],
    );
    fs::write(ds.dets_dir.join("frame1.json"), CAR_AT_ORIGIN).unwrap();

    let extractor = ObjectExtractor::new(&ds.pcd_dir, &ds.dets_dir, &ds.out_dir).unwrap();
    assert_eq!(extractor.common_files(), ["frame1.pcd"]);
    assert_eq!(extractor.unmatched_files(), 0);

    let summary = extractor.extract_all();
    assert_eq!(summary.frames_processed, 1);
    assert_eq!(summary.frames_skipped, 0);
    assert_eq!(summary.labels.get("car"), 1);
    assert_eq!(summary.to_string(), "Number of objects found:\ncar: 1\n");

    let out_file = ds.out_dir.join("car-frame1-1.pcd");
    let cropped = read_pcd(&out_file).unwrap();
    assert_eq!(cropped.len(), 3);
    for [x, y, z] in cropped.iter_points() {
        assert!((-1.0..=1.0).contains(&x));
        assert!((-1.0..=1.0).contains(&y));
        assert!((0.0..=2.0).contains(&z));
    }
}

#[test]
fn frame_without_detections_is_excluded() {
    let ds = dataset();
    write_frame(&ds.pcd_dir, "frame2.pcd", &[[0.0, 0.0, 0.0]]);

    let extractor = ObjectExtractor::new(&ds.pcd_dir, &ds.dets_dir, &ds.out_dir).unwrap();
    assert!(extractor.common_files().is_empty());
    assert_eq!(extractor.unmatched_files(), 1);

    let summary = extractor.extract_all();
    assert_eq!(summary.frames_processed, 0);
    assert!(summary.labels.is_empty());
    assert_eq!(fs::read_dir(&ds.out_dir).unwrap().count(), 0);
}

#[test]
fn output_names_follow_detection_order() {
    let ds = dataset();
    write_frame(&ds.pcd_dir, "frame1.pcd", &[[0.0, 0.0, 0.5], [10.0, 10.0, 0.5]]);
    fs::write(
        ds.dets_dir.join("frame1.json"),
        r#"{
            "detections": [
                {
                    "label": "car",
                    "bbox": {
                        "position": {
                            "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
                            "orientation": { "w": 1.0, "x": 0.0, "y": 0.0, "z": 0.0 }
                        },
                        "size": { "x": 2.0, "y": 2.0, "z": 2.0 }
                    }
                },
                {
                    "label": "truck",
                    "bbox": {
                        "position": {
                            "position": { "x": 10.0, "y": 10.0, "z": 0.0 },
                            "orientation": { "w": 1.0, "x": 0.0, "y": 0.0, "z": 0.0 }
                        },
                        "size": { "x": 4.0, "y": 4.0, "z": 3.0 }
                    }
                }
            ]
        }"#,
    )
    .unwrap();

    let extractor = ObjectExtractor::new(&ds.pcd_dir, &ds.dets_dir, &ds.out_dir).unwrap();
    let summary = extractor.extract_all();

    assert!(ds.out_dir.join("car-frame1-1.pcd").exists());
    assert!(ds.out_dir.join("truck-frame1-2.pcd").exists());
    assert_eq!(summary.labels.get("car"), 1);
    assert_eq!(summary.labels.get("truck"), 1);
    assert_eq!(summary.labels.total(), 2);
}

#[test]
fn malformed_detections_skip_only_their_frame() {
    let ds = dataset();
    write_frame(&ds.pcd_dir, "frame1.pcd", &[[0.0, 0.0, 0.5]]);
    write_frame(&ds.pcd_dir, "frame2.pcd", &[[0.0, 0.0, 0.5]]);
    fs::write(ds.dets_dir.join("frame1.json"), CAR_AT_ORIGIN).unwrap();
    fs::write(ds.dets_dir.join("frame2.json"), r#"{ "detections": [ { "label": "car" } ] }"#)
        .unwrap();

    let extractor = ObjectExtractor::new(&ds.pcd_dir, &ds.dets_dir, &ds.out_dir).unwrap();
    let summary = extractor.extract_all();

    assert_eq!(summary.frames_processed, 1);
    assert_eq!(summary.frames_skipped, 1);
    assert_eq!(summary.labels.get("car"), 1);
    assert!(ds.out_dir.join("car-frame1-1.pcd").exists());
}

#[test]
fn rerun_over_unchanged_inputs_is_idempotent() {
    let ds = dataset();
    write_frame(
        &ds.pcd_dir,
        "frame1.pcd",
        &[[0.2, 0.1, 0.5], [0.9, -0.9, 1.9], [5.0, 5.0, 5.0]],
    );
    fs::write(ds.dets_dir.join("frame1.json"), CAR_AT_ORIGIN).unwrap();

    let first = ObjectExtractor::new(&ds.pcd_dir, &ds.dets_dir, &ds.out_dir)
        .unwrap()
        .extract_all();
    let first_bytes = fs::read(ds.out_dir.join("car-frame1-1.pcd")).unwrap();

    let second = ObjectExtractor::new(&ds.pcd_dir, &ds.dets_dir, &ds.out_dir)
        .unwrap()
        .extract_all();
    let second_bytes = fs::read(ds.out_dir.join("car-frame1-1.pcd")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn missing_input_directory_is_fatal() {
    let ds = dataset();
    assert!(ObjectExtractor::new(ds.pcd_dir.join("nope"), &ds.dets_dir, &ds.out_dir).is_err());
}
