use subtext_core::geometry::{ImagePoint, ImageRect};
use subtext_core::interaction::{
    hit_test, CursorHint, DragState, Edge, HitZone, ReleaseOutcome, SelectionMachine,
};
use subtext_core::model::{SubtitleList, SubtitleRegion};

const BOUNDS: ImageRect = ImageRect {
    x: 0,
    y: 0,
    width: 1000,
    height: 500,
};

fn pt(x: i32, y: i32) -> ImagePoint {
    ImagePoint::new(x, y)
}

fn machine_with_selection(rect: ImageRect) -> SelectionMachine {
    let mut m = SelectionMachine::default();
    m.set_selection(Some(rect));
    m
}

// ---------------------------------------------------------------------------
// Edge::resize
// ---------------------------------------------------------------------------

#[test]
fn test_resize_corners_pin_opposite_corner() {
    let r = ImageRect::new(100, 100, 200, 100);
    assert_eq!(Edge::TopLeft.resize(r, pt(50, 80)), ImageRect::new(50, 80, 250, 120));
    assert_eq!(Edge::TopRight.resize(r, pt(350, 80)), ImageRect::new(100, 80, 250, 120));
    assert_eq!(Edge::BottomLeft.resize(r, pt(50, 250)), ImageRect::new(50, 100, 250, 150));
    assert_eq!(Edge::BottomRight.resize(r, pt(350, 250)), ImageRect::new(100, 100, 250, 150));
}

#[test]
fn test_resize_sides_move_one_edge() {
    let r = ImageRect::new(100, 100, 200, 100);
    assert_eq!(Edge::Top.resize(r, pt(999, 90)), ImageRect::new(100, 90, 200, 110));
    assert_eq!(Edge::Right.resize(r, pt(320, 999)), ImageRect::new(100, 100, 220, 100));
    assert_eq!(Edge::Bottom.resize(r, pt(999, 260)), ImageRect::new(100, 100, 200, 160));
    assert_eq!(Edge::Left.resize(r, pt(80, 999)), ImageRect::new(80, 100, 220, 100));
}

#[test]
fn test_resize_past_opposite_edge_normalizes_and_mirrors() {
    let r = ImageRect::new(100, 100, 200, 100);
    // Right edge dragged left of the left edge.
    let (rect, edge) = Edge::Right.resize_normalized(r, pt(60, 150));
    assert_eq!(rect, ImageRect::new(60, 100, 40, 100));
    assert_eq!(edge, Edge::Left);

    let (rect, edge) = Edge::BottomRight.resize_normalized(r, pt(90, 70));
    assert_eq!(rect, ImageRect::new(90, 70, 10, 30));
    assert_eq!(edge, Edge::TopLeft);
}

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

#[test]
fn test_hit_test_priority() {
    let r = ImageRect::new(100, 100, 200, 100);
    assert_eq!(hit_test(&r, pt(100, 100), 8, 5), HitZone::Resize(Edge::TopLeft));
    assert_eq!(hit_test(&r, pt(302, 198), 8, 5), HitZone::Resize(Edge::BottomRight));
    assert_eq!(hit_test(&r, pt(200, 102), 8, 5), HitZone::Resize(Edge::Top));
    assert_eq!(hit_test(&r, pt(200, 197), 8, 5), HitZone::Resize(Edge::Bottom));
    assert_eq!(hit_test(&r, pt(97, 150), 8, 5), HitZone::Resize(Edge::Left));
    assert_eq!(hit_test(&r, pt(304, 150), 8, 5), HitZone::Resize(Edge::Right));
    assert_eq!(hit_test(&r, pt(200, 150), 8, 5), HitZone::Inside);
    assert_eq!(hit_test(&r, pt(400, 150), 8, 5), HitZone::Outside);
}

#[test]
fn test_side_band_excludes_corner_region() {
    let r = ImageRect::new(100, 100, 200, 100);
    // Just past the handle box along the top edge but within half a handle of
    // the corner: neither a handle nor a side.
    assert_eq!(hit_test(&r, pt(104, 96), 8, 5), HitZone::Outside);
    assert_eq!(hit_test(&r, pt(105, 97), 8, 5), HitZone::Resize(Edge::Top));
}

#[test]
fn test_hover_cursors() {
    let m = machine_with_selection(ImageRect::new(100, 100, 200, 100));
    assert_eq!(m.hover(pt(100, 100)), CursorHint::ResizeNorthWest);
    assert_eq!(m.hover(pt(300, 100)), CursorHint::ResizeNorthEast);
    assert_eq!(m.hover(pt(100, 200)), CursorHint::ResizeSouthWest);
    assert_eq!(m.hover(pt(300, 200)), CursorHint::ResizeSouthEast);
    assert_eq!(m.hover(pt(200, 100)), CursorHint::ResizeNorth);
    assert_eq!(m.hover(pt(300, 150)), CursorHint::ResizeEast);
    assert_eq!(m.hover(pt(200, 200)), CursorHint::ResizeSouth);
    assert_eq!(m.hover(pt(100, 150)), CursorHint::ResizeWest);
    assert_eq!(m.hover(pt(200, 150)), CursorHint::Default);
    assert_eq!(SelectionMachine::default().hover(pt(200, 150)), CursorHint::Default);
}

// ---------------------------------------------------------------------------
// Drawing, moving, resizing a plain selection
// ---------------------------------------------------------------------------

#[test]
fn test_draw_new_selection() {
    let mut m = SelectionMachine::default();
    let mut regions = SubtitleList::new();
    assert!(matches!(m.press(pt(200, 50), &regions), DragState::DrawingNewSelection { .. }));
    assert!(m.drag(pt(600, 450), &BOUNDS));
    assert_eq!(m.selection(), Some(ImageRect::new(200, 50, 400, 400)));
    assert_eq!(m.release(&mut regions), ReleaseOutcome::SelectionOnly);
    assert_eq!(m.selection(), Some(ImageRect::new(200, 50, 400, 400)));
    assert!(m.drag_state().is_idle());
}

#[test]
fn test_draw_is_clamped_to_image() {
    let mut m = SelectionMachine::default();
    let mut regions = SubtitleList::new();
    m.press(pt(900, 400), &regions);
    m.drag(pt(1200, 700), &BOUNDS);
    assert_eq!(m.selection(), Some(ImageRect::new(900, 400, 100, 100)));
    m.release(&mut regions);
}

#[test]
fn test_click_without_drag_clears_selection() {
    let mut m = machine_with_selection(ImageRect::new(100, 100, 50, 50));
    let mut regions = SubtitleList::new();
    m.press(pt(600, 300), &regions);
    assert_eq!(m.selection(), None);
    m.release(&mut regions);
    assert_eq!(m.selection(), None);
}

#[test]
fn test_move_selection_translates_by_delta() {
    let mut m = machine_with_selection(ImageRect::new(100, 100, 50, 50));
    let regions = SubtitleList::new();
    assert!(matches!(m.press(pt(120, 120), &regions), DragState::MovingSelection { .. }));
    m.drag(pt(130, 125), &BOUNDS);
    m.drag(pt(140, 135), &BOUNDS);
    assert_eq!(m.selection(), Some(ImageRect::new(120, 115, 50, 50)));
}

#[test]
fn test_move_partially_outside_is_intersected() {
    let mut m = machine_with_selection(ImageRect::new(950, 100, 40, 40));
    let regions = SubtitleList::new();
    m.press(pt(960, 110), &regions);
    m.drag(pt(990, 110), &BOUNDS);
    assert_eq!(m.selection(), Some(ImageRect::new(980, 100, 20, 40)));
}

#[test]
fn test_move_entirely_outside_collapses() {
    let mut m = machine_with_selection(ImageRect::new(950, 100, 40, 40));
    let regions = SubtitleList::new();
    m.press(pt(960, 110), &regions);
    m.drag(pt(1500, 110), &BOUNDS);
    let sel = m.selection().unwrap();
    assert!(sel.is_empty());
}

#[test]
fn test_resize_keeps_dragging_after_flip() {
    let mut m = machine_with_selection(ImageRect::new(100, 100, 200, 100));
    let regions = SubtitleList::new();
    assert_eq!(
        m.press(pt(300, 150), &regions),
        DragState::ResizingSelection { edge: Edge::Right }
    );
    m.drag(pt(60, 150), &BOUNDS);
    assert_eq!(m.selection(), Some(ImageRect::new(60, 100, 40, 100)));
    // The left edge (at 100) stays pinned as the pointer keeps moving.
    m.drag(pt(40, 150), &BOUNDS);
    assert_eq!(m.selection(), Some(ImageRect::new(40, 100, 60, 100)));
    m.drag(pt(150, 150), &BOUNDS);
    assert_eq!(m.selection(), Some(ImageRect::new(100, 100, 50, 100)));
}

#[test]
fn test_selection_never_negative_or_out_of_bounds() {
    let mut m = machine_with_selection(ImageRect::new(10, 10, 30, 30));
    let regions = SubtitleList::new();
    m.press(pt(10, 10), &regions);
    for p in [pt(-50, -50), pt(2000, 900), pt(25, 600), pt(-10, 20), pt(500, -3)] {
        m.drag(p, &BOUNDS);
        let s = m.selection().unwrap();
        assert!(s.width >= 0 && s.height >= 0, "{s:?}");
        assert!(s.x >= 0 && s.y >= 0 && s.right() <= 1000 && s.bottom() <= 500, "{s:?}");
    }
}

// ---------------------------------------------------------------------------
// Region checkout and commit
// ---------------------------------------------------------------------------

#[test]
fn test_press_on_region_checks_it_out() {
    let mut regions = SubtitleList::new();
    let id = regions.push(SubtitleRegion::new("src", "dst", ImageRect::new(100, 100, 100, 50)));
    let mut m = SelectionMachine::default();

    assert!(matches!(m.press(pt(150, 120), &regions), DragState::MovingSelection { .. }));
    assert_eq!(m.active_region(), Some(id));
    assert_eq!(m.selection(), Some(ImageRect::new(100, 100, 100, 50)));

    m.drag(pt(160, 130), &BOUNDS);
    // The model is untouched until release.
    assert_eq!(regions.get(id).unwrap().bounds, ImageRect::new(100, 100, 100, 50));

    assert_eq!(m.release(&mut regions), ReleaseOutcome::Committed(id));
    assert_eq!(regions.get(id).unwrap().bounds, ImageRect::new(110, 110, 100, 50));
    assert_eq!(m.active_region(), None);
    assert_eq!(m.selected_region(), Some(id));
}

#[test]
fn test_region_hit_takes_priority_over_selection_handles() {
    let mut regions = SubtitleList::new();
    let id = regions.push(SubtitleRegion::new("", "x", ImageRect::new(300, 300, 50, 50)));
    // A plain selection whose corner handle overlaps the region.
    let mut m = machine_with_selection(ImageRect::new(200, 200, 102, 102));
    m.press(pt(301, 301), &regions);
    assert_eq!(m.active_region(), Some(id));
    assert_eq!(m.selection(), Some(ImageRect::new(300, 300, 50, 50)));
}

#[test]
fn test_zero_delta_release_still_commits() {
    let mut regions = SubtitleList::new();
    let id = regions.push(SubtitleRegion::new("", "x", ImageRect::new(10, 10, 100, 40)));
    let mut m = SelectionMachine::default();
    m.press(pt(50, 30), &regions);
    assert_eq!(m.release(&mut regions), ReleaseOutcome::Committed(id));
    assert_eq!(regions.get(id).unwrap().bounds, ImageRect::new(10, 10, 100, 40));
}

#[test]
fn test_collapsed_region_is_restored_on_release() {
    let mut regions = SubtitleList::new();
    let id = regions.push(SubtitleRegion::new("", "x", ImageRect::new(950, 100, 40, 40)));
    let mut m = SelectionMachine::default();
    m.press(pt(960, 110), &regions);
    m.drag(pt(1600, 110), &BOUNDS);
    assert_eq!(m.release(&mut regions), ReleaseOutcome::Restored(id));
    assert_eq!(regions.get(id).unwrap().bounds, ImageRect::new(950, 100, 40, 40));
    assert_eq!(m.selection(), Some(ImageRect::new(950, 100, 40, 40)));
}

#[test]
fn test_selected_region_handle_outside_bounds_reedits_region() {
    let mut regions = SubtitleList::new();
    let id = regions.push(SubtitleRegion::new("", "x", ImageRect::new(100, 100, 100, 50)));
    let mut m = SelectionMachine::default();
    m.press(pt(150, 120), &regions);
    m.release(&mut regions);

    // Top-left handle, just outside the region itself.
    assert_eq!(
        m.press(pt(97, 97), &regions),
        DragState::ResizingSelection { edge: Edge::TopLeft }
    );
    assert_eq!(m.active_region(), Some(id));
    m.drag(pt(80, 90), &BOUNDS);
    assert_eq!(m.release(&mut regions), ReleaseOutcome::Committed(id));
    assert_eq!(regions.get(id).unwrap().bounds, ImageRect::new(80, 90, 120, 60));
}

#[test]
fn test_overlapping_regions_hit_topmost() {
    let mut regions = SubtitleList::new();
    regions.push(SubtitleRegion::new("", "below", ImageRect::new(0, 0, 100, 100)));
    let top = regions.push(SubtitleRegion::new("", "above", ImageRect::new(50, 50, 100, 100)));
    let mut m = SelectionMachine::default();
    m.press(pt(75, 75), &regions);
    assert_eq!(m.active_region(), Some(top));
}

#[test]
fn test_cancel_restores_press_state() {
    let mut regions = SubtitleList::new();
    let id = regions.push(SubtitleRegion::new("", "x", ImageRect::new(100, 100, 100, 50)));
    let mut m = SelectionMachine::default();
    m.press(pt(150, 120), &regions);
    m.drag(pt(400, 300), &BOUNDS);
    assert!(m.cancel());
    assert!(m.drag_state().is_idle());
    assert_eq!(m.active_region(), None);
    // Nothing to release any more.
    assert_eq!(m.release(&mut regions), ReleaseOutcome::Ignored);
    assert_eq!(regions.get(id).unwrap().bounds, ImageRect::new(100, 100, 100, 50));
    assert_eq!(m.selection(), None);
}

#[test]
fn test_cancel_restores_previous_plain_selection() {
    let mut m = machine_with_selection(ImageRect::new(10, 10, 20, 20));
    let regions = SubtitleList::new();
    m.press(pt(500, 300), &regions);
    m.drag(pt(600, 400), &BOUNDS);
    assert!(m.cancel());
    assert_eq!(m.selection(), Some(ImageRect::new(10, 10, 20, 20)));
    assert!(!m.cancel());
}

#[test]
fn test_forget_region_drops_selection() {
    let mut regions = SubtitleList::new();
    let id = regions.push(SubtitleRegion::new("", "x", ImageRect::new(100, 100, 100, 50)));
    let mut m = SelectionMachine::default();
    m.press(pt(150, 120), &regions);
    m.release(&mut regions);
    regions.remove(id);
    m.forget_region(id);
    assert_eq!(m.selected_region(), None);
    assert_eq!(m.selection(), None);
}
