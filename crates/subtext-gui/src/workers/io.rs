use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use subtext_core::config::TranslationConfig;
use subtext_core::io::catalog::CatalogImage;
use subtext_core::io::source::ImageSource;
use subtext_core::io::srt::{count_text_blocks, translate_content, translated_file_name};
use subtext_core::io::subtitles;
use subtext_core::model::SubtitleRegion;
use subtext_core::services::libretranslate::LibreTranslate;

use crate::messages::WorkerResult;

use super::{send, send_error, send_log};

/// Subtitles stored next to a disk image. A broken file is reported and
/// treated as empty. Archive pages have none; their book arrives with the catalog.
fn read_sidecar(
    image: &CatalogImage,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Vec<SubtitleRegion> {
    let Some(path) = image.sidecar_path() else {
        return Vec::new();
    };
    match subtitles::load_single(&path) {
        Ok(regions) => regions,
        Err(e) => {
            send_log(tx, ctx, format!("Ignoring {}: {e}", path.display()));
            Vec::new()
        }
    }
}

pub(super) fn handle_open(image: CatalogImage, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let start = Instant::now();
    let sidecar = read_sidecar(&image, tx, ctx);

    match image.decode() {
        Ok(raster) => send(
            tx,
            ctx,
            WorkerResult::Opened {
                image,
                raster,
                sidecar,
                elapsed: start.elapsed(),
            },
        ),
        Err(e) => {
            let message = format!("Failed to decode {}: {e}", image.name());
            send(
                tx,
                ctx,
                WorkerResult::OpenFailed {
                    image,
                    sidecar,
                    message,
                },
            );
        }
    }
}

pub(super) fn handle_translate_file(
    path: &Path,
    translation: &TranslationConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    if translation.source == translation.target {
        send_error(tx, ctx, "Source and target languages cannot be the same");
        return;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to read {}: {e}", path.display()));
            return;
        }
    };
    let translator = match LibreTranslate::new(&translation.endpoint) {
        Ok(t) => t,
        Err(e) => {
            send_error(tx, ctx, format!("Translation service unavailable: {e}"));
            return;
        }
    };

    let total = count_text_blocks(&content);
    send_log(tx, ctx, format!("Translating {total} blocks of {}", path.display()));

    let translated = translate_content(
        &content,
        &translator,
        &translation.source,
        &translation.target,
        |done, total| {
            send(
                tx,
                ctx,
                WorkerResult::Progress {
                    items_done: done,
                    items_total: total,
                },
            );
        },
    );
    if translated.trim().is_empty() {
        send_error(tx, ctx, "Translation resulted in empty content");
        return;
    }

    let output_path = path.with_file_name(translated_file_name(path, &translation.target));
    match std::fs::write(&output_path, translated) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::FileTranslated {
                output_path,
                elapsed: start.elapsed(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to write {}: {e}", output_path.display())),
    }
}
