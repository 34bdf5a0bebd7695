use std::path::PathBuf;
use std::time::Duration;

use image::DynamicImage;
use subtext_core::config::{OcrConfig, TranslationConfig, ViewerConfig};
use subtext_core::io::catalog::{CatalogImage, ImageCatalog};
use subtext_core::io::source::RasterImage;
use subtext_core::model::{SubtitleBook, SubtitleRegion};
use subtext_core::requests::{RecognizedText, RequestTicket};

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image and read its sidecar subtitle file.
    Open { image: CatalogImage },

    /// OCR the cropped pixels of a ticket, then optionally translate the result.
    Recognize {
        ticket: RequestTicket,
        pixels: DynamicImage,
        ocr: OcrConfig,
        translation: Option<TranslationConfig>,
    },

    /// Translate text already attached to a region.
    Translate {
        ticket: RequestTicket,
        text: String,
        translation: TranslationConfig,
    },

    /// Translate a plain subtitle file next to itself.
    TranslateFile {
        path: PathBuf,
        translation: TranslationConfig,
    },
}

/// Results sent from the worker and file dialog threads back to UI thread.
pub enum WorkerResult {
    /// Images chosen in a file dialog, in natural order. `book` holds the
    /// subtitles saved beside an opened archive and is empty otherwise.
    CatalogPicked {
        catalog: ImageCatalog,
        book: SubtitleBook,
    },
    BookImported {
        path: PathBuf,
        book: SubtitleBook,
    },
    ConfigImported {
        config: ViewerConfig,
    },

    Opened {
        image: CatalogImage,
        raster: RasterImage,
        sidecar: Vec<SubtitleRegion>,
        elapsed: Duration,
    },
    OpenFailed {
        image: CatalogImage,
        sidecar: Vec<SubtitleRegion>,
        message: String,
    },

    /// A ticket finished. Missing fields mean that service failed or was not asked.
    Recognized {
        ticket: RequestTicket,
        text: RecognizedText,
        elapsed: Duration,
    },

    /// Progress of a file translation.
    Progress {
        items_done: usize,
        items_total: usize,
    },

    FileTranslated {
        output_path: PathBuf,
        elapsed: Duration,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
