use subtext_core::io::catalog::BatchRename;
use subtext_core::io::source::ImageSource;

use crate::app::SubtextApp;
use crate::state::FileDialog;

const FILE_LIST_WIDTH: f32 = 200.0;

pub fn show(ctx: &egui::Context, app: &mut SubtextApp) {
    if app.session.catalog.is_empty() {
        return;
    }

    egui::SidePanel::left("file_list")
        .default_width(FILE_LIST_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            ui.strong(format!("Images ({})", app.session.catalog.len()));
            ui.separator();

            let on_disk = app.session.catalog.archive().is_none();
            let names: Vec<String> = app
                .session
                .catalog
                .iter()
                .map(|img| img.name().to_string())
                .collect();
            let mut clicked = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (i, name) in names.iter().enumerate() {
                    let selected = app.session.current == Some(i) || app.ui_state.file_selection.contains(&i);
                    let resp = ui.selectable_label(selected, name);
                    if resp.clicked() {
                        clicked = Some((i, ui.input(|inp| inp.modifiers.command)));
                    }
                    if on_disk {
                        if resp.secondary_clicked() && !app.ui_state.file_selection.contains(&i) {
                            app.ui_state.file_selection.clear();
                            app.ui_state.file_selection.insert(i);
                        }
                        resp.context_menu(|ui| context_menu(ui, app, i));
                    }
                }
            });

            match clicked {
                // Ctrl/Cmd-click picks files for rename / delete without opening them.
                Some((i, true)) => {
                    if !app.ui_state.file_selection.remove(&i) {
                        app.ui_state.file_selection.insert(i);
                    }
                }
                Some((i, false)) => {
                    app.ui_state.file_selection.clear();
                    app.open_image(i);
                }
                None => {}
            }
        });

    show_dialog(ctx, app);
}

/// Indices the context menu acts on: the picked files, or the row clicked.
fn targets(app: &SubtextApp, row: usize) -> Vec<usize> {
    if app.ui_state.file_selection.is_empty() {
        vec![row]
    } else {
        app.ui_state.file_selection.iter().copied().collect()
    }
}

fn context_menu(ui: &mut egui::Ui, app: &mut SubtextApp, row: usize) {
    let indices = targets(app, row);

    if indices.len() == 1 && ui.button("Rename...").clicked() {
        ui.close();
        let index = indices[0];
        let name = app
            .session
            .catalog
            .get(index)
            .map(|img| img.name().to_string())
            .unwrap_or_default();
        app.ui_state.file_dialog = Some(FileDialog::Rename { index, name });
    }

    if ui.button("Batch Rename...").clicked() {
        ui.close();
        app.ui_state.file_dialog = Some(FileDialog::BatchRename {
            indices: indices.clone(),
            scheme: BatchRename::default(),
        });
    }

    ui.separator();

    if ui.button("Delete...").clicked() {
        ui.close();
        app.ui_state.file_dialog = Some(FileDialog::ConfirmDelete { indices });
    }
}

enum DialogAction {
    Apply,
    Cancel,
}

fn dialog_buttons(ui: &mut egui::Ui, ok_label: &str, ok_enabled: bool) -> Option<DialogAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        if ui.add_enabled(ok_enabled, egui::Button::new(ok_label)).clicked() {
            action = Some(DialogAction::Apply);
        }
        if ui.button("Cancel").clicked() {
            action = Some(DialogAction::Cancel);
        }
    });
    action
}

fn show_dialog(ctx: &egui::Context, app: &mut SubtextApp) {
    let Some(dialog) = app.ui_state.file_dialog.as_mut() else {
        return;
    };

    let title = match dialog {
        FileDialog::Rename { .. } => "Rename File",
        FileDialog::BatchRename { .. } => "Rename Files",
        FileDialog::ConfirmDelete { .. } => "Confirm Delete",
    };

    let mut action = None;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| match dialog {
            FileDialog::Rename { name, .. } => {
                ui.label("New name:");
                let resp = ui.text_edit_singleline(name);
                let valid = !name.trim().is_empty();
                if valid && resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action = Some(DialogAction::Apply);
                }
                action = dialog_buttons(ui, "Rename", valid).or(action.take());
            }
            FileDialog::BatchRename { indices, scheme } => {
                egui::Grid::new("batch_rename").num_columns(2).show(ui, |ui| {
                    ui.label("Prefix:");
                    ui.text_edit_singleline(&mut scheme.prefix);
                    ui.end_row();

                    ui.label("Start Number:");
                    ui.add(egui::DragValue::new(&mut scheme.start).range(1..=9999));
                    ui.end_row();

                    ui.label("Sequence Width:");
                    ui.add(egui::DragValue::new(&mut scheme.width).range(1..=10));
                    ui.end_row();
                });
                ui.weak(format!("{} files, first: {}", indices.len(), scheme.file_name(scheme.start, "png")));
                let valid = !scheme.prefix.trim().is_empty();
                if !valid {
                    ui.colored_label(egui::Color32::LIGHT_RED, "Prefix cannot be empty.");
                }
                action = dialog_buttons(ui, "Rename", valid);
            }
            FileDialog::ConfirmDelete { indices } => {
                ui.label(format!(
                    "Are you sure you want to delete {} selected file(s)?",
                    indices.len()
                ));
                action = dialog_buttons(ui, "Delete", true);
            }
        });

    let Some(action) = action else {
        return;
    };
    let Some(dialog) = app.ui_state.file_dialog.take() else {
        return;
    };
    if matches!(action, DialogAction::Cancel) {
        return;
    }

    match dialog {
        FileDialog::Rename { index, name } => app.rename_image(index, &name),
        FileDialog::BatchRename { indices, scheme } => app.batch_rename(&indices, &scheme),
        FileDialog::ConfirmDelete { indices } => app.delete_images(&indices),
    }
}
