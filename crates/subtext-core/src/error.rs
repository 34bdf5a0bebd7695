use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubtextError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Subtitle file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialization failed: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Image index {index} out of range (total: {total})")]
    ImageIndexOutOfRange { index: usize, total: usize },

    #[error("{0} is inside an archive")]
    ArchiveEntry(String),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("No image loaded")]
    NoImage,

    #[error("Selection is empty")]
    EmptySelection,

    #[error("Service error: {0}")]
    Service(String),

    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SubtextError>;
