use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cloudcrop_extract::ObjectExtractor;

/// Crops labeled 3D bounding boxes out of a directory of point-cloud frames.
///
/// Every .pcd frame is paired with the .json detections file sharing its
/// stem; each detection's oriented box is cut out of the cloud and written
/// to the output directory as {label}-{frame}-{index}.pcd.
#[derive(Debug, Parser)]
#[command(name = "cloudcrop", version, about)]
struct Args {
    /// Directory of input point-cloud frames (.pcd)
    pcd_dir: PathBuf,

    /// Directory of per-frame detection annotations (.json)
    detections_dir: PathBuf,

    /// Directory the cropped objects are written to
    out_dir: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let extractor = match ObjectExtractor::new(&args.pcd_dir, &args.detections_dir, &args.out_dir) {
        Ok(extractor) => extractor,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let summary = extractor.extract_all();
    print!("{}", summary);

    ExitCode::SUCCESS
}
