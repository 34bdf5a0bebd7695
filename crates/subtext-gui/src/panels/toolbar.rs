use subtext_core::consts::{OCR_LANGUAGES, TRANSLATION_LANGUAGES};
use subtext_core::geometry::DisplayMode;
use subtext_core::model::SubtitleDisplayMode;

use crate::app::SubtextApp;
use crate::panels::helpers::{enum_combo, language_combo};

pub fn show(ctx: &egui::Context, app: &mut SubtextApp) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            for &mode in DisplayMode::ALL {
                let selected = app.document.display_mode() == mode;
                if ui.selectable_label(selected, mode.to_string()).clicked() && !selected {
                    app.set_display_mode(mode);
                }
            }

            ui.separator();

            let mut subtitles = app.document.subtitle_display_mode();
            if enum_combo(ui, "subtitle_mode", &mut subtitles, SubtitleDisplayMode::ALL) {
                app.set_subtitle_display_mode(subtitles);
            }

            ui.separator();

            ui.label("OCR");
            language_combo(ui, "ocr_language", &mut app.config.ocr.language, OCR_LANGUAGES);
            let can_ocr = app.document.has_image() && app.document.selection().is_some();
            if ui
                .add_enabled(can_ocr, egui::Button::new("OCR Selection"))
                .on_hover_text("Recognize the text under the selection")
                .clicked()
            {
                app.request_ocr();
            }
            ui.checkbox(&mut app.ui_state.translate_after_ocr, "Translate");

            ui.separator();

            language_combo(ui, "source_language", &mut app.config.translation.source, TRANSLATION_LANGUAGES);
            ui.label("→");
            language_combo(ui, "target_language", &mut app.config.translation.target, TRANSLATION_LANGUAGES);
            let can_translate = app.document.selected_region().is_some();
            if ui
                .add_enabled(can_translate, egui::Button::new("Translate"))
                .on_hover_text("Translate the selected subtitle's OCR text")
                .clicked()
            {
                app.request_translation();
            }

            if app.ui_state.pending_requests > 0 {
                ui.separator();
                ui.spinner();
                ui.label(format!("{} pending", app.ui_state.pending_requests));
            }
        });
        ui.add_space(2.0);
    });
}
