use subtext_core::interaction::{DragState, ReleaseOutcome};
use subtext_core::render::{Caption, Scene, SelectionDecoration};

use crate::app::SubtextApp;
use crate::convert::{cursor_icon, to_display_point, to_screen_rect};
use crate::metrics::PainterMetrics;
use crate::state::RegionEditor;

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 196, 0);
const CAPTION_BACKGROUND: egui::Color32 = egui::Color32::WHITE;
const CAPTION_TEXT: egui::Color32 = egui::Color32::BLACK;

pub fn show(ctx: &egui::Context, app: &mut SubtextApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        app.document
            .set_viewport(rect.width().round() as i32, rect.height().round() as i32);

        if !app.document.has_image() {
            show_placeholder(ui, app);
            return;
        }

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        handle_scroll(ui, &response, app, rect);

        // Screen position of display-space (0, 0)
        let origin = rect.min + app.viewport.pan;

        handle_pointer(ctx, ui, &response, app, origin);
        update_cursor(ctx, &response, app, origin);

        let painter = ui.painter_at(rect);
        let metrics = PainterMetrics::new(&painter, app.config.layout.line_spacing);
        let scene = app.document.render_cached(&metrics, &mut app.viewport.layouts);
        paint_scene(&painter, &scene, app, origin);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Wheel scrolling over an image larger than the panel, clamped so the
/// image never leaves an edge uncovered.
fn handle_scroll(ui: &egui::Ui, response: &egui::Response, app: &mut SubtextApp, rect: egui::Rect) {
    if response.hovered() {
        app.viewport.pan += ui.input(|i| i.smooth_scroll_delta);
    }

    let scale = app.document.scale();
    let overflow_x = (scale.scaled_width as f32 - rect.width()).max(0.0) / 2.0;
    let overflow_y = (scale.scaled_height as f32 - rect.height()).max(0.0) / 2.0;
    app.viewport.pan.x = app.viewport.pan.x.clamp(-overflow_x, overflow_x);
    app.viewport.pan.y = app.viewport.pan.y.clamp(-overflow_y, overflow_y);
}

fn handle_pointer(
    ctx: &egui::Context,
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut SubtextApp,
    origin: egui::Pos2,
) {
    if response.drag_started_by(egui::PointerButton::Primary) {
        // The drag is only recognised once the pointer has moved; press where it went down.
        if let Some(press) = ui.input(|i| i.pointer.press_origin()) {
            app.document.pointer_pressed(to_display_point(press, origin));
        }
    }

    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            app.document.pointer_dragged(to_display_point(pos, origin));
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        let outcome = app.document.pointer_released();
        log_release(app, outcome);
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let p = to_display_point(pos, origin);
            if app.document.pointer_pressed(p) {
                app.document.pointer_released();
            }
        }
    }

    if response.double_clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            open_editor(app, to_display_point(pos, origin));
        }
    }

    if !app.document.drag_state().is_idle() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.document.cancel_drag();
    }
}

fn log_release(app: &mut SubtextApp, outcome: ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::Committed(id) => {
            if let Some(region) = app.document.regions().get(id) {
                let msg = format!("Subtitle {id} now at {}", region.bounds);
                app.ui_state.add_log(msg);
            }
        }
        ReleaseOutcome::Ignored | ReleaseOutcome::SelectionOnly | ReleaseOutcome::Restored(_) => {}
    }
}

fn open_editor(app: &mut SubtextApp, p: subtext_core::geometry::DisplayPoint) {
    let Some(id) = app.document.region_at(p) else {
        return;
    };
    if let Some(region) = app.document.regions().get(id) {
        app.ui_state.editor = Some(RegionEditor {
            region: id,
            source: region.source_text.clone(),
            translated: region.translated_text.clone(),
        });
    }
}

fn update_cursor(ctx: &egui::Context, response: &egui::Response, app: &SubtextApp, origin: egui::Pos2) {
    let hint = match app.document.drag_state() {
        DragState::ResizingSelection { edge } => edge.cursor(),
        DragState::MovingSelection { .. } => {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            return;
        }
        DragState::DrawingNewSelection { .. } => {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            return;
        }
        DragState::Idle => match response.hover_pos() {
            Some(pos) => app.document.hover(to_display_point(pos, origin)),
            None => return,
        },
    };
    ctx.set_cursor_icon(cursor_icon(hint));
}

fn paint_scene(painter: &egui::Painter, scene: &Scene, app: &SubtextApp, origin: egui::Pos2) {
    if let (Some(quad), Some(texture)) = (&scene.image, &app.viewport.texture) {
        if quad.generation == app.viewport.texture_generation {
            painter.image(
                texture.id(),
                to_screen_rect(&quad.rect, origin),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }

    for caption in &scene.captions {
        paint_caption(painter, caption, origin);
    }

    if let Some(selection) = &scene.selection {
        paint_selection(painter, selection, origin);
    }
}

fn paint_caption(painter: &egui::Painter, caption: &Caption, origin: egui::Pos2) {
    let background = to_screen_rect(&caption.background, origin);
    painter.rect_filled(background, 0.0, CAPTION_BACKGROUND);

    let clipped = painter.with_clip_rect(background.intersect(painter.clip_rect()));
    let font = egui::FontId::proportional(caption.layout.font_size);
    for line in &caption.layout.lines {
        clipped.text(
            background.min + egui::vec2(line.x, line.y),
            egui::Align2::LEFT_TOP,
            &line.text,
            font.clone(),
            CAPTION_TEXT,
        );
    }
}

fn paint_selection(painter: &egui::Painter, selection: &SelectionDecoration, origin: egui::Pos2) {
    let stroke = egui::Stroke::new(1.5, SELECTION_COLOR);
    painter.rect_stroke(
        to_screen_rect(&selection.border, origin),
        0.0,
        stroke,
        egui::StrokeKind::Outside,
    );
    for handle in &selection.handles {
        let r = to_screen_rect(handle, origin);
        painter.rect_filled(r, 0.0, SELECTION_COLOR);
        painter.rect_stroke(r, 0.0, egui::Stroke::new(1.0, egui::Color32::BLACK), egui::StrokeKind::Inside);
    }
}

fn show_placeholder(ui: &mut egui::Ui, app: &SubtextApp) {
    let text = if app.session.catalog.is_empty() {
        "Open images or a folder to begin"
    } else {
        "No image to show"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
