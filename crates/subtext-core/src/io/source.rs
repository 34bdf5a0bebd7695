use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::error::{Result, SubtextError};
use crate::geometry::ImageRect;

/// Anything that can hand out the encoded bytes of one image.
pub trait ImageSource {
    /// Display name, also the key for multi-image subtitle archives.
    fn name(&self) -> &str;

    fn open_stream(&self) -> Result<Box<dyn Read + '_>>;

    /// Read the whole stream and decode it.
    fn decode(&self) -> Result<RasterImage> {
        let mut bytes = Vec::new();
        self.open_stream()?.read_to_end(&mut bytes)?;
        RasterImage::from_bytes(self.name(), &bytes)
    }
}

/// An image file on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileImage {
    path: PathBuf,
    name: String,
}

impl FileImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The single-image subtitle file that lives next to the image.
    pub fn sidecar_path(&self) -> PathBuf {
        crate::io::subtitles::sidecar_path(&self.path)
    }
}

impl ImageSource for FileImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_stream(&self) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }
}

/// One image stored inside a zip-based comic archive (`.cbz`).
///
/// The archive is reopened for every read, so the value stays cheap to clone
/// and safe to send to the worker thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZipEntryImage {
    archive: PathBuf,
    entry: String,
    name: String,
}

impl ZipEntryImage {
    /// `entry` is the full path inside the archive; the display name is its
    /// last component.
    pub fn new(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        let entry = entry.into();
        let name = entry.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            archive: archive.into(),
            entry,
            name,
        }
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }
}

impl ImageSource for ZipEntryImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_stream(&self) -> Result<Box<dyn Read + '_>> {
        let mut archive = zip::ZipArchive::new(BufReader::new(File::open(&self.archive)?))?;
        let mut file = archive.by_name(&self.entry)?;
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        debug!("Read {} ({} bytes) from {}", self.entry, bytes.len(), self.archive.display());
        Ok(Box::new(Cursor::new(bytes)))
    }
}

/// Encoded image bytes already in memory, e.g. received from another thread.
#[derive(Clone, Debug)]
pub struct MemoryImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImageSource for MemoryImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_stream(&self) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.bytes.as_slice())))
    }
}

/// A decoded raster. Immutable once built.
#[derive(Clone, Debug)]
pub struct RasterImage {
    name: String,
    pixels: DynamicImage,
}

impl RasterImage {
    pub fn new(name: impl Into<String>, pixels: DynamicImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(SubtextError::InvalidDimensions { width, height });
        }
        Ok(Self {
            name: name.into(),
            pixels,
        })
    }

    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let pixels = image::load_from_memory(bytes)?;
        debug!("Decoded {}: {}x{}", name, pixels.width(), pixels.height());
        Self::new(name, pixels)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `[0, 0, width, height]` in image space.
    pub fn bounds(&self) -> ImageRect {
        ImageRect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Copy out the part of the raster under `rect`, clamped to the image.
    /// `None` if nothing of `rect` lies on the image.
    pub fn crop(&self, rect: &ImageRect) -> Option<DynamicImage> {
        let r = rect.intersection(&self.bounds());
        if r.is_empty() {
            return None;
        }
        Some(
            self.pixels
                .crop_imm(r.x as u32, r.y as u32, r.width as u32, r.height as u32),
        )
    }
}
