use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use startrail_core::calibration::calibrate;
use startrail_core::io::{list_images, FsImageStore, ImageStore};

#[derive(Args)]
pub struct CalibrateArgs {
    /// Directory of dark frames
    pub dir: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = "master_dark.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &CalibrateArgs) -> Result<()> {
    let paths = list_images(&args.dir)
        .with_context(|| format!("Failed to read {}", args.dir.display()))?;
    println!("Averaging {} dark frames...", paths.len());

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Averaging [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let store = FsImageStore;
    let calibration = calibrate(&paths, &store, |n| pb.set_position(n as u64))?;
    pb.finish();

    let Some(calibration) = calibration else {
        bail!("No dark frames found in {}", args.dir.display());
    };

    store.save(calibration.frame(), &args.output)?;
    println!("Saved to {}", args.output.display());
    Ok(())
}
