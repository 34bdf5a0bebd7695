use std::path::Path;
use std::sync::mpsc;

use subtext_core::config::ViewerConfig;
use subtext_core::document::Document;
use subtext_core::geometry::DisplayMode;
use subtext_core::error::SubtextError;
use subtext_core::io::catalog::{BatchRename, ImageCatalog};
use subtext_core::io::source::{ImageSource, RasterImage};
use subtext_core::io::subtitles;
use subtext_core::model::{SubtitleBook, SubtitleDisplayMode};
use subtext_core::requests::ApplyOutcome;
use tracing::{info, warn};

use crate::convert::raster_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{SessionState, UIState, ViewportState};
use crate::workers;

pub struct SubtextApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub document: Document,
    pub config: ViewerConfig,
    pub session: SessionState,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub show_about: bool,
}

impl SubtextApp {
    pub fn new(ctx: &egui::Context) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone())?;
        let config = ViewerConfig::default();

        Ok(Self {
            cmd_tx,
            result_tx,
            result_rx,
            document: Document::new(&config),
            config,
            session: SessionState::default(),
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            show_about: false,
        })
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::CatalogPicked { catalog, book } => {
                    self.open_catalog(catalog, book);
                }
                WorkerResult::BookImported { path, book } => {
                    self.ui_state.add_log(format!(
                        "Imported {} subtitles for {} images from {}",
                        book.total_regions(),
                        book.len(),
                        path.display()
                    ));
                    let owner = self.session.owner().map(str::to_owned);
                    self.session.import_book(book);
                    if let Some(name) = owner {
                        let regions = self.session.book.take(&name);
                        if !regions.is_empty() {
                            self.document.adopt_regions(regions);
                        }
                    }
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                    self.ui_state.add_log("Config imported".into());
                }
                WorkerResult::Opened {
                    image,
                    raster,
                    sidecar,
                    elapsed,
                } => {
                    if self.session.current_image() != Some(&image) {
                        continue;
                    }
                    let regions = self.session.claim(image.name(), sidecar);
                    self.document.adopt_regions(regions);
                    self.show_raster(ctx, raster);
                    self.ui_state.add_log(format!(
                        "Opened {} ({} subtitles) in {}",
                        image.name(),
                        self.document.regions().len(),
                        format_duration(elapsed)
                    ));
                }
                WorkerResult::OpenFailed {
                    image,
                    sidecar,
                    message,
                } => {
                    if self.session.current_image() != Some(&image) {
                        continue;
                    }
                    let regions = self.session.claim(image.name(), sidecar);
                    self.document.adopt_regions(regions);
                    self.document.clear_image();
                    self.viewport.texture = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Recognized {
                    ticket,
                    text,
                    elapsed,
                } => {
                    self.ui_state.pending_requests = self.ui_state.pending_requests.saturating_sub(1);
                    match self.document.apply_completed_request(&ticket, text) {
                        ApplyOutcome::Created(id) => self.ui_state.add_log(format!(
                            "{}: new subtitle {id} ({})",
                            ticket.id,
                            format_duration(elapsed)
                        )),
                        ApplyOutcome::Updated(id) => self.ui_state.add_log(format!(
                            "{}: updated subtitle {id} ({})",
                            ticket.id,
                            format_duration(elapsed)
                        )),
                        ApplyOutcome::Discarded => {
                            self.ui_state.add_log(format!("{}: nothing to apply", ticket.id))
                        }
                    }
                }
                WorkerResult::Progress {
                    items_done,
                    items_total,
                } => {
                    if self.ui_state.running_task.is_none() {
                        self.ui_state.running_task = Some("Translating file".into());
                    }
                    self.ui_state.progress_items_done = Some(items_done);
                    self.ui_state.progress_items_total = Some(items_total);
                }
                WorkerResult::FileTranslated {
                    output_path,
                    elapsed,
                } => {
                    self.ui_state.finish_task();
                    self.ui_state.add_log(format!(
                        "Translated file saved to {} in {}",
                        output_path.display(),
                        format_duration(elapsed)
                    ));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.finish_task();
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn show_raster(&mut self, ctx: &egui::Context, raster: RasterImage) {
        let image = raster_to_color_image(&raster);
        self.document.set_raster(raster);
        let texture = ctx.load_texture("viewport", image, egui::TextureOptions::LINEAR);
        self.viewport.texture = Some(texture);
        self.viewport.texture_generation = self.document.generation();
        self.viewport.pan = egui::Vec2::ZERO;
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    pub fn open_catalog(&mut self, catalog: ImageCatalog, book: SubtitleBook) {
        if catalog.is_empty() {
            self.ui_state.add_log("No images found".into());
            return;
        }
        self.park_current();
        info!("Opening {} images", catalog.len());
        if !book.is_empty() {
            self.ui_state.add_log(format!(
                "Loaded {} subtitles for {} pages",
                book.total_regions(),
                book.len()
            ));
        }
        self.session = SessionState::new(catalog);
        self.session.import_book(book);
        self.ui_state.file_selection.clear();
        self.ui_state.file_dialog = None;
        self.open_image(0);
    }

    pub fn open_image(&mut self, index: usize) {
        let Some(image) = self.session.catalog.get(index).cloned() else {
            return;
        };
        if self.session.current == Some(index) {
            return;
        }
        self.park_current();
        self.session.current = Some(index);
        self.ui_state.editor = None;
        self.send_command(WorkerCommand::Open { image });
    }

    pub fn step_image(&mut self, delta: isize) {
        let Some(current) = self.session.current else {
            return;
        };
        let next = current.saturating_add_signed(delta);
        if next < self.session.catalog.len() {
            self.open_image(next);
        }
    }

    /// Hand the shown image's regions back to the session and blank the viewport.
    fn park_current(&mut self) {
        self.session.park(self.document.take_regions());
        self.document.clear_image();
        self.viewport.texture = None;
        self.viewport.layouts.clear();
    }

    // ------------------------------------------------------------------
    // File list operations
    // ------------------------------------------------------------------

    pub fn rename_image(&mut self, index: usize, new_name: &str) {
        let current = self.begin_file_op();
        match self.session.catalog.rename(index, new_name) {
            Ok(renamed) => {
                self.session.renamed(&renamed.from, &renamed.to);
                self.ui_state
                    .add_log(format!("Renamed {} to {}", renamed.from, renamed.to));
                let current = current.map(|c| if c == renamed.from { renamed.to } else { c });
                self.end_file_op(current, index);
            }
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: rename failed: {e}"));
                self.end_file_op(current, index);
            }
        }
    }

    pub fn batch_rename(&mut self, indices: &[usize], scheme: &BatchRename) {
        let mut current = self.begin_file_op();
        match self.session.catalog.batch_rename(indices, scheme) {
            Ok(report) => {
                for renamed in &report.renamed {
                    self.session.renamed(&renamed.from, &renamed.to);
                    if current.as_deref() == Some(renamed.from.as_str()) {
                        current = Some(renamed.to.clone());
                    }
                }
                self.ui_state
                    .add_log(format!("Renamed {} files", report.renamed.len()));
                self.log_failures(&report.failures);
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: batch rename failed: {e}")),
        }
        self.end_file_op(current, 0);
    }

    pub fn delete_images(&mut self, indices: &[usize]) {
        let current = self.begin_file_op();
        let first = indices.iter().copied().min().unwrap_or(0);
        let report = self.session.catalog.delete(indices);
        for name in &report.deleted {
            self.session.forget(name);
        }
        self.ui_state
            .add_log(format!("Deleted {} files", report.deleted.len()));
        self.log_failures(&report.failures);
        self.end_file_op(current, first);
    }

    /// Park the shown image so files can move under it. Returns its name.
    fn begin_file_op(&mut self) -> Option<String> {
        let current = self.session.current_name().map(str::to_owned);
        self.park_current();
        self.session.current = None;
        self.ui_state.file_selection.clear();
        self.ui_state.editor = None;
        current
    }

    /// Reopen the image that was shown, found by name; if it is gone, the
    /// one now at `fallback`.
    fn end_file_op(&mut self, current: Option<String>, fallback: usize) {
        let Some(name) = current else {
            return;
        };
        let catalog = &self.session.catalog;
        let index = catalog
            .position(&name)
            .or_else(|| (!catalog.is_empty()).then(|| fallback.min(catalog.len() - 1)));
        match index {
            Some(i) => self.open_image(i),
            None => self.ui_state.add_log("No images left".into()),
        }
    }

    fn log_failures(&mut self, failures: &[(String, SubtextError)]) {
        for (name, e) in failures {
            warn!("{name}: {e}");
            self.ui_state.add_log(format!("ERROR: {name}: {e}"));
        }
    }

    // ------------------------------------------------------------------
    // Subtitles
    // ------------------------------------------------------------------

    /// Write the subtitles of the current source: the whole book beside an
    /// archive, or the shown image's regions beside that image.
    pub fn save_subtitles(&mut self) {
        if let Some(path) = self.session.catalog.book_path() {
            let book = self.session.snapshot(self.document.regions().to_vec());
            self.write_subtitles(&path, |p| subtitles::save_archive(p, &book));
            return;
        }
        if !self.session.owns_current() {
            self.ui_state.add_log("No image open".into());
            return;
        }
        let Some(path) = self.session.current_image().and_then(|i| i.sidecar_path()) else {
            return;
        };
        let regions = self.document.regions().to_vec();
        self.write_subtitles(&path, |p| subtitles::save_single(p, &regions));
    }

    fn write_subtitles(
        &mut self,
        path: &Path,
        save: impl FnOnce(&Path) -> subtext_core::error::Result<()>,
    ) {
        match save(path) {
            Ok(()) => self
                .ui_state
                .add_log(format!("Saved subtitles to {}", path.display())),
            Err(e) => {
                warn!("Failed to save {}: {e}", path.display());
                self.ui_state.add_log(format!("ERROR: {e}"));
            }
        }
    }

    pub fn delete_selected_region(&mut self) {
        if let Some(region) = self.document.delete_selected_region() {
            self.ui_state.editor = None;
            self.ui_state
                .add_log(format!("Deleted subtitle at {}", region.bounds));
        }
    }

    pub fn delete_all_regions(&mut self) {
        let count = self.document.regions().len();
        self.document.clear_regions();
        self.ui_state.editor = None;
        self.ui_state.add_log(format!("Deleted {count} subtitles"));
    }

    // ------------------------------------------------------------------
    // OCR / translation
    // ------------------------------------------------------------------

    pub fn request_ocr(&mut self) {
        let ticket = match self.document.request_ticket() {
            Ok(t) => t,
            Err(e) => {
                self.ui_state.add_log(format!("OCR: {e}"));
                return;
            }
        };
        let Some(pixels) = self.document.crop_for_ticket(&ticket) else {
            self.ui_state.add_log("OCR: selection is outside the image".into());
            return;
        };
        let translation = self
            .ui_state
            .translate_after_ocr
            .then(|| self.config.translation.clone());

        self.ui_state.pending_requests += 1;
        self.ui_state
            .add_log(format!("{}: OCR of {}", ticket.id, ticket.bounds));
        self.send_command(WorkerCommand::Recognize {
            ticket,
            pixels,
            ocr: self.config.ocr.clone(),
            translation,
        });
    }

    /// Translate the selected region's OCR text again.
    pub fn request_translation(&mut self) {
        let text = self
            .document
            .selected_region()
            .and_then(|id| self.document.regions().get(id))
            .map(|r| r.source_text.clone())
            .filter(|t| !t.trim().is_empty());
        let Some(text) = text else {
            self.ui_state
                .add_log("Translate: select a subtitle with OCR text".into());
            return;
        };
        let ticket = match self.document.request_ticket() {
            Ok(t) => t,
            Err(e) => {
                self.ui_state.add_log(format!("Translate: {e}"));
                return;
            }
        };

        self.ui_state.pending_requests += 1;
        self.send_command(WorkerCommand::Translate {
            ticket,
            text,
            translation: self.config.translation.clone(),
        });
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.config.display.mode = mode;
        self.document.set_display_mode(mode);
        self.viewport.pan = egui::Vec2::ZERO;
    }

    pub fn set_subtitle_display_mode(&mut self, mode: SubtitleDisplayMode) {
        self.config.display.subtitles = mode;
        self.document.set_subtitle_display_mode(mode);
    }

    pub fn apply_config(&mut self, config: ViewerConfig) {
        self.document.apply_config(&config);
        self.viewport.layouts.clear();
        self.config = config;
        self.viewport.pan = egui::Vec2::ZERO;
    }
}

impl eframe::App for SubtextApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::toolbar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::file_list::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::editor::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Subtext")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Subtext");
                        ui.label("Image Subtitle Overlay Editor");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}min")
    }
}
