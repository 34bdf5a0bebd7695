mod common;

use approx::assert_relative_eq;

use common::{document_with_image, dp, drag, png_source};
use subtext_core::config::ViewerConfig;
use subtext_core::document::Document;
use subtext_core::error::SubtextError;
use subtext_core::geometry::{DisplayMode, ImageRect};
use subtext_core::interaction::{CursorHint, ReleaseOutcome};
use subtext_core::io::source::MemoryImage;
use subtext_core::layout::EstimatedMetrics;
use subtext_core::model::{SubtitleDisplayMode, SubtitleRegion};
use subtext_core::requests::{ApplyOutcome, RecognizedText};

fn translated(text: &str) -> RecognizedText {
    RecognizedText {
        source: Some("πηγή".into()),
        translated: Some(text.into()),
    }
}

// ---------------------------------------------------------------------------
// Image lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_load_image_from_source() {
    let mut doc = Document::default();
    doc.set_viewport(500, 500);
    doc.load_image(&png_source("page.png", 1000, 500)).unwrap();
    assert!(doc.has_image());
    assert_relative_eq!(doc.scale().scale, 0.5);
    assert_eq!((doc.scale().origin_x, doc.scale().origin_y), (0, 125));
}

#[test]
fn test_decode_failure_leaves_no_image_and_inert_regions() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let id = doc.add_region(SubtitleRegion::new("", "x", ImageRect::new(10, 10, 50, 50)));

    let broken = MemoryImage {
        name: "broken.png".into(),
        bytes: b"definitely not a png".to_vec(),
    };
    assert!(doc.load_image(&broken).is_err());
    assert!(!doc.has_image());
    assert!(doc.regions().get(id).is_some());

    assert!(!doc.pointer_pressed(dp(10.0, 130.0)));
    assert!(!doc.pointer_dragged(dp(50.0, 200.0)));
    assert_eq!(doc.hover(dp(10.0, 130.0)), CursorHint::Default);
    assert!(doc.render(&EstimatedMetrics::default()).is_empty());
}

#[test]
fn test_switching_images_clears_selection() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);
    assert!(doc.selection().is_some());
    doc.load_image(&png_source("next.png", 200, 200)).unwrap();
    assert_eq!(doc.selection(), None);
}

#[test]
fn test_display_mode_change_recomputes_scale() {
    let mut doc = document_with_image(800, 600, 400, 600);
    doc.set_display_mode(DisplayMode::ActualSize);
    assert_relative_eq!(doc.scale().scale, 1.0);
    doc.set_display_mode(DisplayMode::FitToWidth);
    assert_relative_eq!(doc.scale().scale, 0.5);
    doc.set_viewport(800, 600);
    assert_relative_eq!(doc.scale().scale, 1.0);
}

#[test]
fn test_apply_config_updates_modes() {
    let mut doc = document_with_image(800, 600, 400, 600);
    let mut config = ViewerConfig::default();
    config.display.mode = DisplayMode::ActualSize;
    config.display.subtitles = SubtitleDisplayMode::Source;
    config.layout.max_font_size = 40.0;
    doc.apply_config(&config);
    assert_eq!(doc.display_mode(), DisplayMode::ActualSize);
    assert_relative_eq!(doc.scale().scale, 1.0);
    assert_eq!(doc.subtitle_display_mode(), SubtitleDisplayMode::Source);
    assert_relative_eq!(doc.fit_params().max_font_size, 40.0);
}

// ---------------------------------------------------------------------------
// Pointer scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_draw_selection_through_viewport() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    assert!(doc.pointer_pressed(dp(100.0, 150.0)));
    assert!(doc.pointer_dragged(dp(300.0, 350.0)));
    assert_eq!(doc.pointer_released(), ReleaseOutcome::SelectionOnly);
    assert_eq!(doc.selection(), Some(ImageRect::new(200, 50, 400, 400)));
}

#[test]
fn test_press_outside_rendered_image_is_ignored() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);
    // Letterbox area above the image.
    assert!(!doc.pointer_pressed(dp(200.0, 50.0)));
    assert_eq!(doc.selection(), Some(ImageRect::new(200, 50, 400, 400)));
}

#[test]
fn test_drag_beyond_viewport_is_clamped() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    drag(&mut doc, dp(400.0, 300.0), &[dp(900.0, 900.0)]);
    assert_eq!(doc.selection(), Some(ImageRect::new(800, 350, 200, 150)));
}

#[test]
fn test_move_region_commits_on_release() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let id = doc.add_region(SubtitleRegion::new("", "hi", ImageRect::new(100, 100, 200, 100)));
    // Region centre (200, 150) -> display (100, 200).
    assert!(doc.pointer_pressed(dp(100.0, 200.0)));
    doc.pointer_dragged(dp(150.0, 225.0));
    assert_eq!(doc.regions().get(id).unwrap().bounds, ImageRect::new(100, 100, 200, 100));
    assert_eq!(doc.pointer_released(), ReleaseOutcome::Committed(id));
    assert_eq!(doc.regions().get(id).unwrap().bounds, ImageRect::new(200, 150, 200, 100));
}

#[test]
fn test_cancel_drag_leaves_region_unchanged() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let id = doc.add_region(SubtitleRegion::new("", "hi", ImageRect::new(100, 100, 200, 100)));
    doc.pointer_pressed(dp(100.0, 200.0));
    doc.pointer_dragged(dp(250.0, 300.0));
    assert!(doc.cancel_drag());
    assert_eq!(doc.pointer_released(), ReleaseOutcome::Ignored);
    assert_eq!(doc.regions().get(id).unwrap().bounds, ImageRect::new(100, 100, 200, 100));
}

#[test]
fn test_hover_reports_handle_cursor() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);
    // Bottom-right corner of (200,50,400,400) is image (600,450) = display (300,350).
    assert_eq!(doc.hover(dp(300.0, 350.0)), CursorHint::ResizeSouthEast);
    assert_eq!(doc.hover(dp(200.0, 250.0)), CursorHint::Default);
}

#[test]
fn test_selected_image_crops_selection() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    assert!(doc.selected_image().is_none());
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);
    let crop = doc.selected_image().unwrap();
    assert_eq!((crop.width(), crop.height()), (400, 400));
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn test_ticket_requires_image_and_selection() {
    let mut doc = Document::default();
    assert!(matches!(doc.request_ticket(), Err(SubtextError::NoImage)));
    let mut doc = document_with_image(1000, 500, 500, 500);
    assert!(matches!(doc.request_ticket(), Err(SubtextError::EmptySelection)));
}

#[test]
fn test_completed_request_creates_region_at_snapshot() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);
    let ticket = doc.request_ticket().unwrap();
    assert!(doc.crop_for_ticket(&ticket).is_some());

    // The user draws somewhere else while the call is in flight.
    drag(&mut doc, dp(10.0, 130.0), &[dp(50.0, 160.0)]);

    let outcome = doc.apply_completed_request(&ticket, translated("Hello"));
    let ApplyOutcome::Created(id) = outcome else {
        panic!("expected a new region, got {outcome:?}");
    };
    let region = doc.regions().get(id).unwrap();
    assert_eq!(region.bounds, ImageRect::new(200, 50, 400, 400));
    assert_eq!(region.translated_text, "Hello");
    assert_eq!(region.source_text, "πηγή");
}

#[test]
fn test_created_region_takes_over_unchanged_selection() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);
    let ticket = doc.request_ticket().unwrap();

    let ApplyOutcome::Created(id) = doc.apply_completed_request(&ticket, translated("Hi")) else {
        panic!("expected a new region");
    };
    assert_eq!(doc.selected_region(), Some(id));

    // Widening the selection through its right edge now reshapes the region.
    drag(&mut doc, dp(300.0, 250.0), &[dp(350.0, 250.0)]);
    assert_eq!(doc.regions().get(id).unwrap().bounds, ImageRect::new(200, 50, 500, 400));
}

#[test]
fn test_created_region_leaves_newer_selection_alone() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);
    let ticket = doc.request_ticket().unwrap();
    drag(&mut doc, dp(10.0, 130.0), &[dp(50.0, 160.0)]);
    let drawn = doc.selection();

    assert!(matches!(
        doc.apply_completed_request(&ticket, translated("Hi")),
        ApplyOutcome::Created(_)
    ));
    assert_eq!(doc.selected_region(), None);
    assert_eq!(doc.selection(), drawn);
}

#[test]
fn test_completed_request_updates_original_region() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let a = doc.add_region(SubtitleRegion::new("", "", ImageRect::new(100, 100, 100, 100)));
    let b = doc.add_region(SubtitleRegion::new("", "", ImageRect::new(600, 100, 100, 100)));

    // Click region a, request, then click region b before completion.
    drag(&mut doc, dp(75.0, 200.0), &[]);
    let ticket = doc.request_ticket().unwrap();
    assert_eq!(ticket.region, Some(a));
    drag(&mut doc, dp(325.0, 200.0), &[]);
    assert_eq!(doc.selected_region(), Some(b));

    assert_eq!(
        doc.apply_completed_request(&ticket, translated("for a")),
        ApplyOutcome::Updated(a)
    );
    assert_eq!(doc.regions().get(a).unwrap().translated_text, "for a");
    assert_eq!(doc.regions().get(b).unwrap().translated_text, "");
}

#[test]
fn test_request_for_deleted_region_recreates_it() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let a = doc.add_region(SubtitleRegion::new("", "", ImageRect::new(100, 100, 100, 100)));
    drag(&mut doc, dp(75.0, 200.0), &[]);
    let ticket = doc.request_ticket().unwrap();
    assert!(doc.delete_region(a).is_some());

    let outcome = doc.apply_completed_request(&ticket, translated("late"));
    assert!(matches!(outcome, ApplyOutcome::Created(id) if id != a));
    assert_eq!(doc.regions().len(), 1);
}

#[test]
fn test_stale_or_empty_results_are_discarded() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);
    let ticket = doc.request_ticket().unwrap();

    assert_eq!(
        doc.apply_completed_request(&ticket, RecognizedText::default()),
        ApplyOutcome::Discarded
    );

    doc.load_image(&png_source("other.png", 1000, 500)).unwrap();
    assert!(doc.crop_for_ticket(&ticket).is_none());
    assert_eq!(
        doc.apply_completed_request(&ticket, translated("too late")),
        ApplyOutcome::Discarded
    );
    assert!(doc.regions().is_empty());
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_render_scene_contents() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    doc.add_region(SubtitleRegion::new("src", "A very long sentence that will not fit", ImageRect::new(10, 10, 100, 40)));
    doc.add_region(SubtitleRegion::new("only source", "", ImageRect::new(300, 300, 100, 40)));
    drag(&mut doc, dp(100.0, 150.0), &[dp(300.0, 350.0)]);

    let scene = doc.render(&EstimatedMetrics::default());
    let image = scene.image.as_ref().unwrap();
    assert_relative_eq!(image.rect.y, 125.0);
    assert_relative_eq!(image.rect.width, 500.0);

    // Default mode is Translation: the region without a translation is skipped.
    assert_eq!(scene.captions.len(), 1);
    let caption = &scene.captions[0];
    assert_relative_eq!(caption.background.x, 5.0);
    assert_relative_eq!(caption.background.y, 130.0);
    assert_relative_eq!(caption.background.width, 50.0);
    assert!(caption.layout.height() <= caption.background.height + 1e-3);

    let selection = scene.selection.as_ref().unwrap();
    assert_relative_eq!(selection.border.x, 100.0);
    assert_relative_eq!(selection.border.bottom(), 350.0);
    assert_relative_eq!(selection.handles[3].x + selection.handles[3].width / 2.0, 300.0);
}

#[test]
fn test_render_respects_subtitle_display_mode() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    doc.add_region(SubtitleRegion::new("src", "dst", ImageRect::new(10, 10, 100, 40)));
    doc.add_region(SubtitleRegion::new("only source", "", ImageRect::new(300, 300, 100, 40)));
    let metrics = EstimatedMetrics::default();

    doc.set_subtitle_display_mode(SubtitleDisplayMode::None);
    assert!(doc.render(&metrics).captions.is_empty());
    doc.set_subtitle_display_mode(SubtitleDisplayMode::Source);
    assert_eq!(doc.render(&metrics).captions.len(), 2);

    // Rendering never touches the model.
    assert_eq!(doc.regions().len(), 2);
}

// ---------------------------------------------------------------------------
// Region management
// ---------------------------------------------------------------------------

#[test]
fn test_take_and_adopt_regions() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    doc.add_region(SubtitleRegion::new("a", "b", ImageRect::new(1, 2, 3, 4)));
    let taken = doc.take_regions();
    assert_eq!(taken.len(), 1);
    assert!(doc.regions().is_empty());

    doc.adopt_regions(taken.clone());
    assert_eq!(doc.regions().to_vec(), taken);
}

#[test]
fn test_delete_selected_region() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    doc.add_region(SubtitleRegion::new("", "x", ImageRect::new(100, 100, 100, 100)));
    assert!(doc.delete_selected_region().is_none());
    drag(&mut doc, dp(75.0, 200.0), &[]);
    assert!(doc.delete_selected_region().is_some());
    assert!(doc.regions().is_empty());
    assert_eq!(doc.selection(), None);
}

#[test]
fn test_set_region_texts_edits_either_field() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let id = doc.add_region(SubtitleRegion::new("s", "t", ImageRect::new(1, 1, 10, 10)));

    assert!(doc.set_region_texts(id, Some("fixed ocr".into()), None));
    assert!(doc.set_region_texts(id, None, Some("edited".into())));
    let region = doc.regions().get(id).unwrap();
    assert_eq!(region.source_text, "fixed ocr");
    assert_eq!(region.translated_text, "edited");

    doc.delete_region(id);
    assert!(!doc.set_region_texts(id, Some("gone".into()), None));
}

#[test]
fn test_select_region_shows_its_bounds() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let a = doc.add_region(SubtitleRegion::new("", "a", ImageRect::new(100, 100, 100, 100)));
    let b = doc.add_region(SubtitleRegion::new("", "b", ImageRect::new(600, 100, 100, 100)));
    drag(&mut doc, dp(75.0, 200.0), &[]);
    assert_eq!(doc.selected_region(), Some(a));

    assert!(doc.select_region(b));
    assert_eq!(doc.selected_region(), Some(b));
    assert_eq!(doc.selection(), Some(ImageRect::new(600, 100, 100, 100)));

    // A ticket issued now targets b.
    assert_eq!(doc.request_ticket().unwrap().region, Some(b));

    doc.delete_region(b);
    assert!(!doc.select_region(b));
}

#[test]
fn test_add_region_from_selection() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let err = doc.add_region_from_selection("", "hi").unwrap_err();
    assert!(matches!(err, SubtextError::EmptySelection), "got {err:?}");

    drag(&mut doc, dp(50.0, 150.0), &[dp(100.0, 200.0)]);
    let id = doc.add_region_from_selection("", "hi").unwrap();
    assert_eq!(doc.regions().get(id).unwrap().bounds, ImageRect::new(100, 50, 100, 100));
    assert_eq!(doc.selected_region(), Some(id));
}

#[test]
fn test_region_at_display_point() {
    let mut doc = document_with_image(1000, 500, 500, 500);
    let id = doc.add_region(SubtitleRegion::new("s", "t", ImageRect::new(100, 100, 100, 100)));
    assert_eq!(doc.region_at(dp(75.0, 200.0)), Some(id));
    assert_eq!(doc.region_at(dp(400.0, 200.0)), None);
}
