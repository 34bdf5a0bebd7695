pub mod config;
pub mod fit;
pub mod info;
pub mod list;
#[cfg(feature = "remote")]
pub mod ocr;
#[cfg(feature = "remote")]
pub mod translate_file;
