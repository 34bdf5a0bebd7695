use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::consts::IMAGE_EXTENSIONS;
use crate::error::{Result, SubtextError};
use crate::io::source::{FileImage, ImageSource, ZipEntryImage};
use crate::io::subtitles;

/// Split into alternating runs of ASCII digits and non-digits.
fn split_runs(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_digit: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if prev_digit.is_some_and(|p| p != digit) {
            parts.push(&s[start..i]);
            start = i;
        }
        prev_digit = Some(digit);
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

/// Compare names so that embedded numbers sort by value: `page2` before `page10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let parts_a = split_runs(a);
    let parts_b = split_runs(b);

    for (pa, pb) in parts_a.iter().zip(parts_b.iter()) {
        let ord = match (pa.parse::<i64>(), pb.parse::<i64>()) {
            (Ok(na), Ok(nb)) => na.cmp(&nb),
            _ => pa.cmp(pb),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    parts_a.len().cmp(&parts_b.len())
}

pub fn is_archive_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("cbz"))
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// A page of a catalog: a file on disk or an entry of a comic archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogImage {
    File(FileImage),
    Archived(ZipEntryImage),
}

impl CatalogImage {
    pub fn as_file(&self) -> Option<&FileImage> {
        match self {
            Self::File(f) => Some(f),
            Self::Archived(_) => None,
        }
    }

    /// Single-image subtitle file beside a disk image. Archive pages share
    /// the archive's book instead.
    pub fn sidecar_path(&self) -> Option<PathBuf> {
        self.as_file().map(FileImage::sidecar_path)
    }
}

impl ImageSource for CatalogImage {
    fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Archived(z) => z.name(),
        }
    }

    fn open_stream(&self) -> Result<Box<dyn Read + '_>> {
        match self {
            Self::File(f) => f.open_stream(),
            Self::Archived(z) => z.open_stream(),
        }
    }
}

/// Naming scheme for batch renames: `prefix` + zero-padded sequence number,
/// keeping each file's extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRename {
    pub prefix: String,
    pub start: u32,
    pub width: usize,
}

impl Default for BatchRename {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            start: 1,
            width: 3,
        }
    }
}

impl BatchRename {
    pub fn file_name(&self, number: u32, extension: &str) -> String {
        let stem = format!("{}{:0width$}", self.prefix, number, width = self.width);
        if extension.is_empty() {
            stem
        } else {
            format!("{stem}.{extension}")
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Renamed {
    pub from: String,
    pub to: String,
}

/// Outcome of a multi-file operation. Failures do not stop the others.
#[derive(Debug, Default)]
pub struct FileOpReport {
    pub renamed: Vec<Renamed>,
    pub deleted: Vec<String>,
    pub failures: Vec<(String, SubtextError)>,
}

/// Ordered list of images the user can page through: files picked from
/// disk, or the pages of one `.cbz` archive.
#[derive(Clone, Debug, Default)]
pub struct ImageCatalog {
    images: Vec<CatalogImage>,
    archive: Option<PathBuf>,
}

impl ImageCatalog {
    /// Keep the image files among `paths`, naturally sorted by file name.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut catalog = Self {
            images: paths
                .into_iter()
                .map(Into::<PathBuf>::into)
                .filter(|p| is_image_file(p))
                .map(|p| CatalogImage::File(FileImage::new(p)))
                .collect(),
            archive: None,
        };
        catalog.sort();
        catalog
    }

    /// All image files directly inside `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        let catalog = Self::from_paths(paths);
        info!("Found {} images in {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    /// Image entries of a zip-based comic archive, at any depth.
    pub fn from_archive(path: &Path) -> Result<Self> {
        let archive = zip::ZipArchive::new(BufReader::new(File::open(path)?))?;
        let mut catalog = Self {
            images: archive
                .file_names()
                .filter(|n| !n.ends_with('/') && is_image_file(Path::new(n)))
                .map(|n| CatalogImage::Archived(ZipEntryImage::new(path, n)))
                .collect(),
            archive: Some(path.to_path_buf()),
        };
        catalog.sort();
        info!("Found {} images in {}", catalog.len(), path.display());
        Ok(catalog)
    }

    fn sort(&mut self) {
        self.images.sort_by(|a, b| natural_cmp(a.name(), b.name()));
    }

    /// The `.cbz` file this catalog reads from, if any.
    pub fn archive(&self) -> Option<&Path> {
        self.archive.as_deref()
    }

    /// Multi-image subtitle book kept beside an archive: `comic.cbz` -> `comic.json`.
    pub fn book_path(&self) -> Option<PathBuf> {
        self.archive.as_deref().map(subtitles::sidecar_path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogImage> {
        self.images.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.images.iter().position(|img| img.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogImage> {
        self.images.iter()
    }

    fn disk_file(&self, index: usize) -> Result<&FileImage> {
        match self.images.get(index) {
            Some(CatalogImage::File(f)) => Ok(f),
            Some(img) => Err(SubtextError::ArchiveEntry(img.name().to_string())),
            None => Err(SubtextError::ImageIndexOutOfRange {
                index,
                total: self.images.len(),
            }),
        }
    }

    /// Rename one image file in place. Its subtitle sidecar, if present,
    /// follows it. The catalog is re-sorted afterwards.
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<Renamed> {
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name.contains(['/', '\\']) {
            return Err(SubtextError::InvalidFileName(new_name.to_string()));
        }
        let renamed = self.rename_file(index, new_name)?;
        self.sort();
        Ok(renamed)
    }

    /// Rename the images at `indices`, in that order, to
    /// `prefix + zero-padded number + original extension`.
    pub fn batch_rename(&mut self, indices: &[usize], scheme: &BatchRename) -> Result<FileOpReport> {
        if scheme.prefix.trim().is_empty() || scheme.prefix.contains(['/', '\\']) {
            return Err(SubtextError::InvalidFileName(scheme.prefix.clone()));
        }

        let mut report = FileOpReport::default();
        for (number, &index) in (scheme.start..).zip(indices) {
            let new_name = self.disk_file(index).map(|f| {
                let extension = f
                    .path()
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default();
                scheme.file_name(number, &extension)
            });
            let result = match new_name {
                Ok(name) => self.rename_file(index, &name),
                Err(e) => Err(e),
            };
            match result {
                Ok(renamed) => report.renamed.push(renamed),
                Err(e) => report.failures.push((self.label(index), e)),
            }
        }
        self.sort();
        Ok(report)
    }

    /// Delete the image files at `indices` from disk and from the catalog.
    /// Subtitle sidecars are left alone.
    pub fn delete(&mut self, indices: &[usize]) -> FileOpReport {
        let mut report = FileOpReport::default();
        let mut doomed = Vec::new();
        for &index in indices {
            match self
                .disk_file(index)
                .and_then(|f| std::fs::remove_file(f.path()).map_err(SubtextError::from))
            {
                Ok(()) => {
                    info!("Deleted {}", self.label(index));
                    report.deleted.push(self.label(index));
                    doomed.push(index);
                }
                Err(e) => {
                    warn!("Failed to delete {}: {e}", self.label(index));
                    report.failures.push((self.label(index), e));
                }
            }
        }
        let mut index = 0;
        self.images.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });
        report
    }

    fn label(&self, index: usize) -> String {
        self.images
            .get(index)
            .map_or_else(|| format!("#{index}"), |img| img.name().to_string())
    }

    fn rename_file(&mut self, index: usize, new_name: &str) -> Result<Renamed> {
        let file = self.disk_file(index)?;
        let from = file.name().to_string();
        if from == new_name {
            return Ok(Renamed {
                from,
                to: new_name.to_string(),
            });
        }
        let old_path = file.path().to_path_buf();
        let new_path = old_path.with_file_name(new_name);
        if new_path.exists() {
            return Err(SubtextError::AlreadyExists(new_name.to_string()));
        }
        std::fs::rename(&old_path, &new_path)?;

        let old_sidecar = subtitles::sidecar_path(&old_path);
        let new_sidecar = subtitles::sidecar_path(&new_path);
        if old_sidecar.exists() && !new_sidecar.exists() {
            if let Err(e) = std::fs::rename(&old_sidecar, &new_sidecar) {
                warn!("Failed to move {}: {e}", old_sidecar.display());
            }
        }

        info!("Renamed {} to {}", from, new_name);
        self.images[index] = CatalogImage::File(FileImage::new(new_path));
        Ok(Renamed {
            from,
            to: new_name.to_string(),
        })
    }
}
