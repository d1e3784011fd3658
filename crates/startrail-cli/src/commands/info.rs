use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use startrail_core::io::{list_images, FsImageStore, ImageStore};

#[derive(Args)]
pub struct InfoArgs {
    /// Directory of light or dark frames
    pub dir: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let images = list_images(&args.dir)
        .with_context(|| format!("Failed to read {}", args.dir.display()))?;

    println!("Directory:   {}", args.dir.display());
    println!("Frames:      {}", images.len());

    if let Some(first) = images.first() {
        let frame = FsImageStore.load(first)?;
        println!("Dimensions:  {}x{}", frame.width(), frame.height());
        println!("Bit depth:   {}", frame.original_bit_depth);
    }

    for (i, path) in images.iter().enumerate() {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        println!("  {:>5}  {}", i + 1, name);
    }

    Ok(())
}
