/// Show a ComboBox for enum selection. Returns `true` if the value changed.
pub(crate) fn enum_combo<T: PartialEq + Copy + ToString>(
    ui: &mut egui::Ui,
    id: &str,
    current: &mut T,
    options: &[T],
) -> bool {
    let resp = egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .show_ui(ui, |ui| {
            let mut changed = false;
            for &choice in options {
                if ui
                    .selectable_value(current, choice, choice.to_string())
                    .changed()
                {
                    changed = true;
                }
            }
            changed
        });
    resp.inner.unwrap_or(false)
}

/// Show a ComboBox over a `(display name, code)` table, editing `code` in place.
pub(crate) fn language_combo(
    ui: &mut egui::Ui,
    id: &str,
    code: &mut String,
    languages: &[(&str, &str)],
) -> bool {
    let selected = languages
        .iter()
        .find(|(_, c)| *c == code.as_str())
        .map_or(code.as_str(), |(name, _)| *name)
        .to_string();
    let resp = egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            let mut changed = false;
            for (name, c) in languages {
                let is_current = code.as_str() == *c;
                if ui.selectable_label(is_current, *name).clicked() && !is_current {
                    *code = c.to_string();
                    changed = true;
                }
            }
            changed
        });
    resp.inner.unwrap_or(false)
}
