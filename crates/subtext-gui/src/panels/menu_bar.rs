use subtext_core::config::ViewerConfig;
use subtext_core::consts::{IMAGE_EXTENSIONS, OCR_LANGUAGES};
use subtext_core::geometry::DisplayMode;
use subtext_core::io::catalog::ImageCatalog;
use subtext_core::io::subtitles;
use subtext_core::model::{SubtitleBook, SubtitleDisplayMode};

use crate::app::SubtextApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::workers;

pub fn show(ctx: &egui::Context, app: &mut SubtextApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Images...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_images(ctx, app);
                }

                if ui.button("Open Folder...").clicked() {
                    ui.close();
                    open_folder(ctx, app);
                }

                if ui.button("Open CBZ...").clicked() {
                    ui.close();
                    open_archive(ctx, app);
                }

                ui.separator();

                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                let save_label = if app.session.catalog.archive().is_some() {
                    "Save CBZ Subtitles"
                } else {
                    "Save Subtitles"
                };
                if ui.add(egui::Button::new(save_label).shortcut_text(ctx.format_shortcut(&save_shortcut))).clicked() {
                    ui.close();
                    app.save_subtitles();
                }

                if ui.button("Import Subtitle Book...").clicked() {
                    ui.close();
                    import_book(ctx, app);
                }

                if ui.button("Export Subtitle Book...").clicked() {
                    ui.close();
                    export_book(ctx, app);
                }

                ui.separator();

                if ui.button("Translate Subtitle File...").clicked() {
                    ui.close();
                    translate_file(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                ui.menu_button("OCR Language", |ui| {
                    for (label, code) in OCR_LANGUAGES {
                        let selected = app.config.ocr.language == *code;
                        if ui.radio(selected, *label).clicked() {
                            app.config.ocr.language = code.to_string();
                            ui.close();
                        }
                    }
                });

                ui.menu_button("Subtitles", |ui| {
                    for &mode in SubtitleDisplayMode::ALL {
                        let selected = app.document.subtitle_display_mode() == mode;
                        if ui.radio(selected, mode.to_string()).clicked() {
                            app.set_subtitle_display_mode(mode);
                            ui.close();
                        }
                    }
                });

                ui.separator();

                let has_selected = app.document.selected_region().is_some();
                if ui.add_enabled(has_selected, egui::Button::new("Delete Subtitle").shortcut_text("Del")).clicked() {
                    ui.close();
                    app.delete_selected_region();
                }

                if ui.add_enabled(!app.document.regions().is_empty(), egui::Button::new("Delete All Subtitles")).clicked() {
                    ui.close();
                    app.delete_all_regions();
                }

                ui.separator();

                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.apply_config(ViewerConfig::default());
                    app.ui_state.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("View", |ui| {
                for &mode in DisplayMode::ALL {
                    let selected = app.document.display_mode() == mode;
                    if ui.radio(selected, mode.to_string()).clicked() {
                        app.set_display_mode(mode);
                        ui.close();
                    }
                }

                ui.separator();

                if ui.add(egui::Button::new("Previous Image").shortcut_text("PgUp")).clicked() {
                    ui.close();
                    app.step_image(-1);
                }
                if ui.add(egui::Button::new("Next Image").shortcut_text("PgDn")).clicked() {
                    ui.close();
                    app.step_image(1);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_images(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            app.save_subtitles();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Plain keys only when no text field has focus
        if ctx.memory(|m| m.focused().is_none()) {
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::PageUp)) {
                app.step_image(-1);
            }
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::PageDown)) {
                app.step_image(1);
            }
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)) {
                app.delete_selected_region();
            }
        }
    });
}

fn open_images(ctx: &egui::Context, app: &mut SubtextApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_files()
        {
            let catalog = ImageCatalog::from_paths(paths);
            let book = SubtitleBook::new();
            workers::send(&result_tx, &ctx, WorkerResult::CatalogPicked { catalog, book });
        }
    });
}

fn open_folder(ctx: &egui::Context, app: &mut SubtextApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };
        let result = match ImageCatalog::from_dir(&dir) {
            Ok(catalog) => WorkerResult::CatalogPicked {
                catalog,
                book: SubtitleBook::new(),
            },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to read {}: {e}", dir.display()),
            },
        };
        workers::send(&result_tx, &ctx, result);
    });
}

/// Pages of a comic archive, with the subtitle book saved beside it.
fn open_archive(ctx: &egui::Context, app: &mut SubtextApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CBZ Files", &["cbz"])
            .pick_file()
        else {
            return;
        };
        let result = ImageCatalog::from_archive(&path).and_then(|catalog| {
            let book = match catalog.book_path() {
                Some(book_path) => subtitles::load_archive(&book_path)?,
                None => SubtitleBook::new(),
            };
            Ok(WorkerResult::CatalogPicked { catalog, book })
        });
        let result = result.unwrap_or_else(|e| WorkerResult::Error {
            message: format!("Error opening CBZ file {}: {e}", path.display()),
        });
        workers::send(&result_tx, &ctx, result);
    });
}

fn import_book(ctx: &egui::Context, app: &mut SubtextApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Subtitle book", &["json"])
            .pick_file()
        else {
            return;
        };
        let result = match subtitles::load_archive(&path) {
            Ok(book) => WorkerResult::BookImported { path, book },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        workers::send(&result_tx, &ctx, result);
    });
}

fn export_book(ctx: &egui::Context, app: &mut SubtextApp) {
    let book = app.session.snapshot(app.document.regions().to_vec());
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Subtitle book", &["json"])
            .set_file_name("subtitles.json")
            .save_file()
        {
            let message = match subtitles::save_archive(&path, &book) {
                Ok(()) => format!(
                    "Exported {} subtitles for {} images to {}",
                    book.total_regions(),
                    book.len(),
                    path.display()
                ),
                Err(e) => format!("ERROR: failed to export {}: {e}", path.display()),
            };
            workers::send_log(&result_tx, &ctx, message);
        }
    });
}

fn translate_file(app: &mut SubtextApp) {
    let cmd_tx = app.cmd_tx.clone();
    let translation = app.config.translation.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Subtitles", &["srt", "txt"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::TranslateFile { path, translation });
        }
    });
}

fn import_config(ctx: &egui::Context, app: &mut SubtextApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match ViewerConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        workers::send(&result_tx, &ctx, result);
    });
}

fn export_config(ctx: &egui::Context, app: &mut SubtextApp) {
    let config = app.config.clone();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("subtext.toml")
            .save_file()
        {
            match config.save(&path) {
                Ok(()) => workers::send_log(&result_tx, &ctx, format!("Config saved to {}", path.display())),
                Err(e) => workers::send_error(
                    &result_tx,
                    &ctx,
                    format!("Failed to export config to {}: {e}", path.display()),
                ),
            }
        }
    });
}
