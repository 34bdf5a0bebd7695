use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use subtext_core::io::catalog::{is_archive_file, ImageCatalog};
use subtext_core::io::source::ImageSource;
use subtext_core::io::subtitles;

#[derive(Args)]
pub struct ListArgs {
    /// Folder containing images, or a .cbz comic archive
    pub dir: PathBuf,

    /// Multi-image subtitle archive to count regions from (defaults to the
    /// book beside a .cbz)
    #[arg(short, long)]
    pub archive: Option<PathBuf>,
}

pub fn run(args: &ListArgs) -> Result<()> {
    let catalog = if is_archive_file(&args.dir) {
        ImageCatalog::from_archive(&args.dir)
    } else {
        ImageCatalog::from_dir(&args.dir)
    }
    .with_context(|| format!("Failed to read {}", args.dir.display()))?;

    let book = match args.archive.clone().or_else(|| catalog.book_path()) {
        Some(path) => Some(subtitles::load_archive(&path)?),
        None => None,
    };

    for (i, image) in catalog.iter().enumerate() {
        let count = match (&book, image.sidecar_path()) {
            (Some(book), _) => book.get(image.name()).map_or(0, |r| r.len()),
            (None, Some(sidecar)) => subtitles::load_single(&sidecar)?.len(),
            (None, None) => 0,
        };
        if count > 0 {
            println!("{:>4}  {}  ({} subtitles)", i + 1, image.name(), count);
        } else {
            println!("{:>4}  {}", i + 1, image.name());
        }
    }
    println!("{} images", catalog.len());

    Ok(())
}
