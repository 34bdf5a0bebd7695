use std::sync::mpsc;
use std::time::Instant;

use image::DynamicImage;
use subtext_core::config::{OcrConfig, TranslationConfig};
use subtext_core::requests::{RecognizedText, RequestTicket};
use subtext_core::services::libretranslate::LibreTranslate;
use subtext_core::services::tesseract::TesseractServer;
use subtext_core::services::{OcrEngine, Translator};
use tracing::warn;

use crate::messages::WorkerResult;

use super::{send, send_log};

fn recognize(pixels: &DynamicImage, ocr: &OcrConfig) -> subtext_core::error::Result<String> {
    TesseractServer::new(&ocr.endpoint)?.recognize(pixels, &ocr.language)
}

fn translate(text: &str, translation: &TranslationConfig) -> subtext_core::error::Result<String> {
    LibreTranslate::new(&translation.endpoint)?.translate(
        text,
        &translation.source,
        &translation.target,
    )
}

/// Run one translation, logging instead of failing: a missing translation
/// is a normal outcome for the document.
fn try_translate(
    text: &str,
    translation: &TranslationConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Option<String> {
    match translate(text, translation) {
        Ok(t) if !t.trim().is_empty() => Some(t),
        Ok(_) => None,
        Err(e) => {
            warn!("Translation failed: {e}");
            send_log(tx, ctx, format!("Translation failed: {e}"));
            None
        }
    }
}

pub(super) fn handle_recognize(
    ticket: RequestTicket,
    pixels: &DynamicImage,
    ocr: &OcrConfig,
    translation: Option<&TranslationConfig>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let source = match recognize(pixels, ocr) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => {
            send_log(tx, ctx, format!("{}: no text recognized", ticket.id));
            None
        }
        Err(e) => {
            warn!("OCR failed: {e}");
            send_log(tx, ctx, format!("OCR failed: {e}"));
            None
        }
    };

    let translated = match (&source, translation) {
        (Some(text), Some(cfg)) => try_translate(text, cfg, tx, ctx),
        _ => None,
    };

    send(
        tx,
        ctx,
        WorkerResult::Recognized {
            ticket,
            text: RecognizedText { source, translated },
            elapsed: start.elapsed(),
        },
    );
}

pub(super) fn handle_translate(
    ticket: RequestTicket,
    text: &str,
    translation: &TranslationConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let translated = try_translate(text, translation, tx, ctx);
    send(
        tx,
        ctx,
        WorkerResult::Recognized {
            ticket,
            text: RecognizedText {
                source: None,
                translated,
            },
            elapsed: start.elapsed(),
        },
    );
}
