use crate::app::SubtextApp;

enum EditorAction {
    Save,
    Translate,
    Cancel,
}

/// Editor for the OCR and translated text of a double-clicked subtitle.
pub fn show(ctx: &egui::Context, app: &mut SubtextApp) {
    let Some(editor) = app.ui_state.editor.as_mut() else {
        return;
    };

    let mut open = true;
    let mut action = None;

    egui::Window::new(format!("Edit Subtitle {}", editor.region))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.label("Recognized text");
            ui.add(
                egui::TextEdit::multiline(&mut editor.source)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
            ui.label("Translation");
            ui.add(
                egui::TextEdit::multiline(&mut editor.translated)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    action = Some(EditorAction::Save);
                }
                let can_translate = !editor.source.trim().is_empty();
                if ui
                    .add_enabled(can_translate, egui::Button::new("Save and Translate"))
                    .on_hover_text("Translate the recognized text again")
                    .clicked()
                {
                    action = Some(EditorAction::Translate);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(EditorAction::Cancel);
                }
            });
        });

    if !open {
        action = Some(EditorAction::Cancel);
    }
    let Some(action) = action else {
        return;
    };
    let Some(editor) = app.ui_state.editor.take() else {
        return;
    };
    if matches!(action, EditorAction::Cancel) {
        return;
    }

    let region = editor.region;
    if !app
        .document
        .set_region_texts(region, Some(editor.source), Some(editor.translated))
    {
        app.ui_state
            .add_log(format!("Subtitle {region} no longer exists"));
        return;
    }
    app.ui_state.add_log(format!("Edited subtitle {region}"));

    if matches!(action, EditorAction::Translate) {
        // The selection may have moved on while the editor was open.
        if app.document.select_region(region) {
            app.request_translation();
        } else {
            app.ui_state
                .add_log("Translate: finish the current drag first".into());
        }
    }
}
