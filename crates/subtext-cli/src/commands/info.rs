use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use subtext_core::io::source::{FileImage, ImageSource};
use subtext_core::io::subtitles;

use crate::summary::print_regions;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Subtitle file (defaults to the .json next to the image)
    #[arg(short, long)]
    pub subtitles: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = FileImage::new(&args.file);
    let raster = source
        .decode()
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;

    let sub_path = args
        .subtitles
        .clone()
        .unwrap_or_else(|| source.sidecar_path());
    let regions = subtitles::load_single(&sub_path)?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", raster.width(), raster.height());
    println!("Color:       {:?}", raster.pixels().color());
    if sub_path.exists() {
        println!("Subtitles:   {}", sub_path.display());
    } else {
        println!("Subtitles:   none");
    }

    if !regions.is_empty() {
        print_regions(&regions);
    }

    Ok(())
}
