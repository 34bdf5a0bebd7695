//! Mouse-driven selection state machine: draw, move and eight-way resize.
//!
//! All coordinates here are image space. The machine owns the single
//! transient selection rectangle. A region that is pressed is checked out
//! into the selection, edited through it, and written back only on release.

use tracing::debug;

use crate::config::InteractionConfig;
use crate::geometry::{ImagePoint, ImageRect};
use crate::model::{RegionId, SubtitleList};

/// A resize handle: four corners and four sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const CORNERS: [Edge; 4] = [Edge::TopLeft, Edge::TopRight, Edge::BottomLeft, Edge::BottomRight];

    pub fn is_corner(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight)
    }

    /// Corner position on `rect` for corner variants.
    pub fn corner_point(self, rect: &ImageRect) -> Option<ImagePoint> {
        match self {
            Self::TopLeft => Some(ImagePoint::new(rect.x, rect.y)),
            Self::TopRight => Some(ImagePoint::new(rect.right(), rect.y)),
            Self::BottomLeft => Some(ImagePoint::new(rect.x, rect.bottom())),
            Self::BottomRight => Some(ImagePoint::new(rect.right(), rect.bottom())),
            _ => None,
        }
    }

    /// Move the edges this handle controls to `p`, leaving the opposite
    /// edges in place. The result may have negative extents.
    pub fn resize(self, rect: ImageRect, p: ImagePoint) -> ImageRect {
        let mut r = rect;
        let drag_left = |r: &mut ImageRect| {
            r.width += r.x - p.x;
            r.x = p.x;
        };
        let drag_top = |r: &mut ImageRect| {
            r.height += r.y - p.y;
            r.y = p.y;
        };
        match self {
            Self::TopLeft => {
                drag_left(&mut r);
                drag_top(&mut r);
            }
            Self::TopRight => {
                r.width = p.x - r.x;
                drag_top(&mut r);
            }
            Self::BottomLeft => {
                drag_left(&mut r);
                r.height = p.y - r.y;
            }
            Self::BottomRight => {
                r.width = p.x - r.x;
                r.height = p.y - r.y;
            }
            Self::Top => drag_top(&mut r),
            Self::Right => r.width = p.x - r.x,
            Self::Bottom => r.height = p.y - r.y,
            Self::Left => drag_left(&mut r),
        }
        r
    }

    /// The same handle after the rectangle flips horizontally and/or vertically.
    pub fn mirrored(self, flip_x: bool, flip_y: bool) -> Edge {
        let mut e = self;
        if flip_x {
            e = match e {
                Self::TopLeft => Self::TopRight,
                Self::TopRight => Self::TopLeft,
                Self::BottomLeft => Self::BottomRight,
                Self::BottomRight => Self::BottomLeft,
                Self::Left => Self::Right,
                Self::Right => Self::Left,
                other => other,
            };
        }
        if flip_y {
            e = match e {
                Self::TopLeft => Self::BottomLeft,
                Self::BottomLeft => Self::TopLeft,
                Self::TopRight => Self::BottomRight,
                Self::BottomRight => Self::TopRight,
                Self::Top => Self::Bottom,
                Self::Bottom => Self::Top,
                other => other,
            };
        }
        e
    }

    /// Resize and renormalize. When the drag crosses the opposite edge the
    /// returned handle is the mirrored one, so the pinned corner stays pinned
    /// on subsequent drag steps.
    pub fn resize_normalized(self, rect: ImageRect, p: ImagePoint) -> (ImageRect, Edge) {
        let raw = self.resize(rect, p);
        let edge = self.mirrored(raw.width < 0, raw.height < 0);
        (raw.normalized(), edge)
    }

    pub fn cursor(self) -> CursorHint {
        match self {
            Self::TopLeft => CursorHint::ResizeNorthWest,
            Self::TopRight => CursorHint::ResizeNorthEast,
            Self::BottomLeft => CursorHint::ResizeSouthWest,
            Self::BottomRight => CursorHint::ResizeSouthEast,
            Self::Top => CursorHint::ResizeNorth,
            Self::Right => CursorHint::ResizeEast,
            Self::Bottom => CursorHint::ResizeSouth,
            Self::Left => CursorHint::ResizeWest,
        }
    }
}

/// Classification of a point against a selection rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitZone {
    Resize(Edge),
    Inside,
    Outside,
}

/// Corner handles beat sides, sides beat the interior.
pub fn hit_test(rect: &ImageRect, p: ImagePoint, handle_size: i32, edge_tolerance: i32) -> HitZone {
    let half = handle_size / 2;

    for edge in Edge::CORNERS {
        if let Some(c) = edge.corner_point(rect) {
            let handle = ImageRect::new(c.x - half, c.y - half, handle_size, handle_size);
            if handle.contains(p) {
                return HitZone::Resize(edge);
            }
        }
    }

    if p.x > rect.x + half && p.x < rect.right() - half {
        if (p.y - rect.y).abs() < edge_tolerance {
            return HitZone::Resize(Edge::Top);
        }
        if (p.y - rect.bottom()).abs() < edge_tolerance {
            return HitZone::Resize(Edge::Bottom);
        }
    }
    if p.y > rect.y + half && p.y < rect.bottom() - half {
        if (p.x - rect.x).abs() < edge_tolerance {
            return HitZone::Resize(Edge::Left);
        }
        if (p.x - rect.right()).abs() < edge_tolerance {
            return HitZone::Resize(Edge::Right);
        }
    }

    if rect.contains(p) {
        HitZone::Inside
    } else {
        HitZone::Outside
    }
}

/// Advisory pointer shape for the hosting UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    ResizeNorthWest,
    ResizeNorthEast,
    ResizeSouthWest,
    ResizeSouthEast,
    ResizeNorth,
    ResizeEast,
    ResizeSouth,
    ResizeWest,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DrawingNewSelection { anchor: ImagePoint },
    MovingSelection { last: ImagePoint },
    ResizingSelection { edge: Edge },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// What was on screen when the current drag began.
#[derive(Clone, Copy, Debug)]
struct PressSnapshot {
    selection: Option<ImageRect>,
    selected_region: Option<RegionId>,
}

/// What a release did to the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No drag was in progress.
    Ignored,
    /// The selection changed but no region was attached to it.
    SelectionOnly,
    /// The checked-out region received the selection's bounds.
    Committed(RegionId),
    /// The checked-out region was left unchanged because the selection collapsed.
    Restored(RegionId),
}

#[derive(Clone, Debug)]
pub struct SelectionMachine {
    selection: Option<ImageRect>,
    drag: DragState,
    active_region: Option<RegionId>,
    selected_region: Option<RegionId>,
    snapshot: Option<PressSnapshot>,
    handle_size: i32,
    edge_tolerance: i32,
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new(&InteractionConfig::default())
    }
}

impl SelectionMachine {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            selection: None,
            drag: DragState::Idle,
            active_region: None,
            selected_region: None,
            snapshot: None,
            handle_size: config.handle_size,
            edge_tolerance: config.edge_tolerance,
        }
    }

    /// Change hit tolerances. Takes effect from the next press.
    pub fn configure(&mut self, config: &InteractionConfig) {
        self.handle_size = config.handle_size;
        self.edge_tolerance = config.edge_tolerance;
    }

    pub fn selection(&self) -> Option<ImageRect> {
        self.selection
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Region currently checked out into the selection by a drag.
    pub fn active_region(&self) -> Option<RegionId> {
        self.active_region
    }

    /// Region last clicked. Persists after release until another press.
    pub fn selected_region(&self) -> Option<RegionId> {
        self.selected_region
    }

    pub fn hit_test(&self, p: ImagePoint) -> HitZone {
        match &self.selection {
            Some(rect) => hit_test(rect, p, self.handle_size, self.edge_tolerance),
            None => HitZone::Outside,
        }
    }

    pub fn press(&mut self, p: ImagePoint, regions: &SubtitleList) -> DragState {
        self.snapshot = Some(PressSnapshot {
            selection: self.selection,
            selected_region: self.selected_region,
        });

        if let Some(id) = regions.hit(p) {
            if let Some(region) = regions.get(id) {
                self.selection = Some(region.bounds);
                self.active_region = Some(id);
                self.selected_region = Some(id);
                debug!("Checked out region {} at {}", id, region.bounds);
            }
        }

        self.drag = match self.hit_test(p) {
            HitZone::Resize(edge) => DragState::ResizingSelection { edge },
            HitZone::Inside => DragState::MovingSelection { last: p },
            HitZone::Outside => {
                self.selection = None;
                self.selected_region = None;
                self.active_region = None;
                DragState::DrawingNewSelection { anchor: p }
            }
        };

        // Grabbing the selection of a previously clicked region edits that region again.
        if self.active_region.is_none() && !matches!(self.drag, DragState::DrawingNewSelection { .. }) {
            self.active_region = self.selected_region.filter(|id| regions.contains(*id));
        }

        self.drag
    }

    /// Apply one drag step. Returns true if the selection changed.
    pub fn drag(&mut self, p: ImagePoint, image_bounds: &ImageRect) -> bool {
        let before = self.selection;
        match self.drag {
            DragState::Idle => return false,
            DragState::DrawingNewSelection { anchor } => {
                self.selection = Some(ImageRect::from_corners(anchor, p).intersection(image_bounds));
            }
            DragState::MovingSelection { last } => {
                if let Some(rect) = self.selection {
                    let moved = rect.translated(p.x - last.x, p.y - last.y);
                    self.selection = Some(moved.intersection(image_bounds));
                }
                self.drag = DragState::MovingSelection { last: p };
            }
            DragState::ResizingSelection { edge } => {
                if let Some(rect) = self.selection {
                    let (resized, edge) = edge.resize_normalized(rect, p);
                    self.selection = Some(resized.intersection(image_bounds));
                    self.drag = DragState::ResizingSelection { edge };
                }
            }
        }
        self.selection != before
    }

    /// Finish the drag, committing the selection to the checked-out region.
    pub fn release(&mut self, regions: &mut SubtitleList) -> ReleaseOutcome {
        if self.drag.is_idle() {
            return ReleaseOutcome::Ignored;
        }
        let drawing = matches!(self.drag, DragState::DrawingNewSelection { .. });
        self.drag = DragState::Idle;
        self.snapshot = None;

        let collapsed = self.selection.map_or(true, |r| r.is_empty());

        let Some(id) = self.active_region.take() else {
            if drawing && collapsed {
                self.selection = None;
            }
            return ReleaseOutcome::SelectionOnly;
        };

        match self.selection {
            Some(rect) if !rect.is_empty() => {
                if regions.reshape(id, rect) {
                    debug!("Committed region {} to {}", id, rect);
                    ReleaseOutcome::Committed(id)
                } else {
                    self.selected_region = None;
                    ReleaseOutcome::SelectionOnly
                }
            }
            _ => {
                self.selection = regions.get(id).map(|r| r.bounds);
                debug!("Selection collapsed, region {} left unchanged", id);
                ReleaseOutcome::Restored(id)
            }
        }
    }

    /// Abort the drag in progress, restoring what was shown at press time.
    /// The checked-out region is never written.
    pub fn cancel(&mut self) -> bool {
        if self.drag.is_idle() {
            return false;
        }
        if let Some(snapshot) = self.snapshot.take() {
            self.selection = snapshot.selection;
            self.selected_region = snapshot.selected_region;
        }
        self.active_region = None;
        self.drag = DragState::Idle;
        true
    }

    pub fn hover(&self, p: ImagePoint) -> CursorHint {
        if let DragState::ResizingSelection { edge } = self.drag {
            return edge.cursor();
        }
        match self.hit_test(p) {
            HitZone::Resize(edge) => edge.cursor(),
            HitZone::Inside | HitZone::Outside => CursorHint::Default,
        }
    }

    /// Replace the selection outside of any drag.
    pub fn set_selection(&mut self, rect: Option<ImageRect>) {
        self.selection = rect;
        self.selected_region = None;
    }

    /// Select a region programmatically, showing its bounds as the selection.
    pub fn select_region(&mut self, id: RegionId, regions: &SubtitleList) -> bool {
        match regions.get(id) {
            Some(region) if self.drag.is_idle() => {
                self.selection = Some(region.bounds);
                self.selected_region = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Drop every reference to a region that no longer exists.
    pub fn forget_region(&mut self, id: RegionId) {
        if self.active_region == Some(id) {
            self.active_region = None;
            self.drag = DragState::Idle;
            self.snapshot = None;
        }
        if self.selected_region == Some(id) {
            self.selected_region = None;
            self.selection = None;
        }
    }

    pub fn reset(&mut self) {
        self.selection = None;
        self.drag = DragState::Idle;
        self.active_region = None;
        self.selected_region = None;
        self.snapshot = None;
    }
}
