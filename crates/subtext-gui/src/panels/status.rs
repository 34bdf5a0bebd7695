use subtext_core::io::source::ImageSource;

use crate::app::SubtextApp;

pub fn show(ctx: &egui::Context, app: &mut SubtextApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Progress bar
        if let Some(ref task) = app.ui_state.running_task {
            let fraction = match (
                app.ui_state.progress_items_done,
                app.ui_state.progress_items_total,
            ) {
                (Some(done), Some(total)) if total > 0 => done as f32 / total as f32,
                _ => 0.0, // indeterminate
            };

            let detail = match (
                app.ui_state.progress_items_done,
                app.ui_state.progress_items_total,
            ) {
                (Some(done), Some(total)) => format!("{task} ({done}/{total})"),
                _ => format!("{task}..."),
            };

            ui.add(egui::ProgressBar::new(fraction).text(detail).animate(true));
        }

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if let Some(image) = app.document.image() {
                ui.label(format!("{} ({}x{})", image.name(), image.width(), image.height()));
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", app.document.scale().scale * 100.0));
                ui.separator();
            }
            ui.label(format!("Subtitles: {}", app.document.regions().len()));
            if let Some(selection) = app.document.selection() {
                ui.separator();
                ui.label(format!("Selection: {selection}"));
            }
            ui.separator();
            ui.label(app.document.display_mode().to_string());
        });

        ui.add_space(2.0);
    });
}
