//! JSON subtitle files.
//!
//! A single-image file is an array of records stored next to the image
//! (`page01.png` -> `page01.json`). A multi-image archive maps image names
//! to such arrays under an `imageSubtitles` key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::geometry::ImageRect;
use crate::model::{SubtitleBook, SubtitleRegion};

/// On-disk form of one region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleRecord {
    pub ocr_text: String,
    pub translated_text: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&SubtitleRegion> for SubtitleRecord {
    fn from(r: &SubtitleRegion) -> Self {
        Self {
            ocr_text: r.source_text.clone(),
            translated_text: r.translated_text.clone(),
            x: r.bounds.x,
            y: r.bounds.y,
            width: r.bounds.width,
            height: r.bounds.height,
        }
    }
}

impl From<SubtitleRecord> for SubtitleRegion {
    fn from(r: SubtitleRecord) -> Self {
        Self {
            source_text: r.ocr_text,
            translated_text: r.translated_text,
            bounds: ImageRect::new(r.x, r.y, r.width, r.height),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArchiveFile {
    image_subtitles: BTreeMap<String, Vec<SubtitleRecord>>,
}

pub fn to_json(regions: &[SubtitleRegion]) -> Result<String> {
    let records: Vec<SubtitleRecord> = regions.iter().map(SubtitleRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn from_json(json: &str) -> Result<Vec<SubtitleRegion>> {
    let records: Vec<SubtitleRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(SubtitleRegion::from).collect())
}

pub fn archive_to_json(book: &SubtitleBook) -> Result<String> {
    let archive = ArchiveFile {
        image_subtitles: book
            .pages()
            .iter()
            .map(|(name, regions)| (name.clone(), regions.iter().map(SubtitleRecord::from).collect()))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&archive)?)
}

pub fn archive_from_json(json: &str) -> Result<SubtitleBook> {
    let archive: ArchiveFile = serde_json::from_str(json)?;
    let pages = archive
        .image_subtitles
        .into_iter()
        .map(|(name, records)| (name, records.into_iter().map(SubtitleRegion::from).collect()))
        .collect();
    Ok(SubtitleBook::from_map(pages))
}

pub fn save_single(path: &Path, regions: &[SubtitleRegion]) -> Result<()> {
    std::fs::write(path, to_json(regions)?)?;
    info!("Saved {} subtitles to {}", regions.len(), path.display());
    Ok(())
}

/// Load a single-image file. A missing file is an empty list.
pub fn load_single(path: &Path) -> Result<Vec<SubtitleRegion>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let regions = from_json(&std::fs::read_to_string(path)?)?;
    info!("Loaded {} subtitles from {}", regions.len(), path.display());
    Ok(regions)
}

pub fn save_archive(path: &Path, book: &SubtitleBook) -> Result<()> {
    std::fs::write(path, archive_to_json(book)?)?;
    info!(
        "Saved {} subtitles for {} images to {}",
        book.total_regions(),
        book.len(),
        path.display()
    );
    Ok(())
}

/// Load a multi-image archive. A missing file is an empty book.
pub fn load_archive(path: &Path) -> Result<SubtitleBook> {
    if !path.exists() {
        return Ok(SubtitleBook::new());
    }
    archive_from_json(&std::fs::read_to_string(path)?)
}

/// `dir/name.ext` -> `dir/name.json`.
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("json")
}
