//! Interfaces to the long-latency collaborators: OCR and machine translation.
//!
//! Both are blocking calls meant to run off the UI thread. Their HTTP
//! clients are only built with the `remote` feature; the response parsers
//! are always available.

pub mod libretranslate;
pub mod tesseract;

use image::DynamicImage;

use crate::error::Result;

pub trait OcrEngine {
    /// Recognise the text in `image`. `language` is an engine-specific code.
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String>;
}

pub trait Translator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}
