use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use subtext_core::config::ViewerConfig;
use subtext_core::document::Document;
use subtext_core::geometry::ImageRect;
use subtext_core::io::source::FileImage;
use subtext_core::io::subtitles;
use subtext_core::requests::{ApplyOutcome, RecognizedText};
use subtext_core::services::libretranslate::LibreTranslate;
use subtext_core::services::tesseract::TesseractServer;
use subtext_core::services::{OcrEngine, Translator};
use tracing::warn;

#[derive(Args)]
pub struct OcrArgs {
    /// Input image file
    pub file: PathBuf,

    /// Left edge of the region, in image pixels
    #[arg(long)]
    pub x: i32,

    /// Top edge of the region, in image pixels
    #[arg(long)]
    pub y: i32,

    /// Region width in image pixels
    #[arg(long)]
    pub width: i32,

    /// Region height in image pixels
    #[arg(long)]
    pub height: i32,

    /// OCR language code (overrides config)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Also translate the recognised text
    #[arg(short, long)]
    pub translate: bool,

    /// Append the result to the image's subtitle file
    #[arg(long)]
    pub save: bool,
}

pub fn run(args: &OcrArgs, config: &ViewerConfig) -> Result<()> {
    let source = FileImage::new(&args.file);
    let sidecar = source.sidecar_path();

    let mut doc = Document::new(config);
    doc.load_image(&source)
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;
    doc.adopt_regions(subtitles::load_single(&sidecar)?);
    doc.set_selection(Some(ImageRect::new(args.x, args.y, args.width, args.height)));

    let ticket = doc.request_ticket()?;
    let crop = doc
        .crop_for_ticket(&ticket)
        .context("Region lies outside the image")?;
    println!("Region:      {}", ticket.bounds);

    let language = args.language.as_deref().unwrap_or(&config.ocr.language);
    let ocr = TesseractServer::new(&config.ocr.endpoint)?;
    let text = ocr
        .recognize(&crop, language)
        .with_context(|| format!("OCR request to {} failed", config.ocr.endpoint))?;
    println!("OCR:         {}", text);

    let translated = if args.translate {
        let translator = LibreTranslate::new(&config.translation.endpoint)?;
        match translator.translate(&text, &config.translation.source, &config.translation.target) {
            Ok(t) => {
                println!("Translation: {}", t);
                Some(t)
            }
            Err(e) => {
                warn!("Translation failed: {}", e);
                None
            }
        }
    } else {
        None
    };

    let outcome = doc.apply_completed_request(
        &ticket,
        RecognizedText {
            source: Some(text),
            translated,
        },
    );

    if args.save {
        if let ApplyOutcome::Discarded = outcome {
            println!("Nothing to save");
        } else {
            subtitles::save_single(&sidecar, &doc.regions().to_vec())?;
            println!("Saved {} subtitles to {}", doc.regions().len(), sidecar.display());
        }
    }

    Ok(())
}
