//! Mapping between viewport display space and native image space.
//!
//! The transform is always recomputed from the current image size, viewport
//! size and [`DisplayMode`]; it is never adjusted incrementally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in image space (pixels of the unscaled raster).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImagePoint {
    pub x: i32,
    pub y: i32,
}

impl ImagePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in image space.
///
/// Containment is half-open: `x <= px < x + width`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ImageRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box spanned by two opposite corners.
    pub fn from_corners(a: ImagePoint, b: ImagePoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, p: ImagePoint) -> bool {
        !self.is_empty() && p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Flip negative extents so the rectangle has non-negative width and height.
    pub fn normalized(&self) -> Self {
        let mut r = *self;
        if r.width < 0 {
            r.x += r.width;
            r.width = -r.width;
        }
        if r.height < 0 {
            r.y += r.height;
            r.height = -r.height;
        }
        r
    }

    /// Overlap with `other`. Disjoint rectangles collapse to a zero-area
    /// rectangle positioned on the nearest edge of `other`.
    pub fn intersection(&self, other: &ImageRect) -> Self {
        let x1 = self.x.max(other.x).min(other.right());
        let y1 = self.y.max(other.y).min(other.bottom());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        Self {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0),
            height: (y2 - y1).max(0),
        }
    }
}

impl fmt::Display for ImageRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// A point in viewport (display) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayPoint {
    pub x: f32,
    pub y: f32,
}

impl DisplayPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in viewport (display) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, p: DisplayPoint) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// How the image is scaled into the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    FitToView,
    FitToWidth,
    ActualSize,
}

impl DisplayMode {
    pub const ALL: &[Self] = &[Self::FitToView, Self::FitToWidth, Self::ActualSize];
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FitToView => write!(f, "Fit to View"),
            Self::FitToWidth => write!(f, "Fit to Width"),
            Self::ActualSize => write!(f, "Actual Size"),
        }
    }
}

/// Derived scale and centering of the image inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    /// Display pixels per image pixel. Always > 0.
    pub scale: f32,
    /// Viewport offset of the image's top-left corner. Negative when the
    /// scaled image is larger than the viewport.
    pub origin_x: i32,
    pub origin_y: i32,
    pub scaled_width: i32,
    pub scaled_height: i32,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self::identity()
    }
}

impl ScaleState {
    /// Transform used when no image is loaded: display space equals image space.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            origin_x: 0,
            origin_y: 0,
            scaled_width: 0,
            scaled_height: 0,
        }
    }

    pub fn compute(
        image_width: u32,
        image_height: u32,
        viewport_width: i32,
        viewport_height: i32,
        mode: DisplayMode,
    ) -> Self {
        if image_width == 0 || image_height == 0 {
            return Self::identity();
        }
        let iw = image_width as f32;
        let ih = image_height as f32;

        let scale = match mode {
            DisplayMode::ActualSize => 1.0,
            DisplayMode::FitToWidth => {
                if viewport_width > 0 {
                    viewport_width as f32 / iw
                } else {
                    1.0
                }
            }
            DisplayMode::FitToView => {
                if viewport_width > 0 && viewport_height > 0 {
                    (viewport_width as f32 / iw).min(viewport_height as f32 / ih)
                } else {
                    1.0
                }
            }
        };

        let scaled_width = (iw * scale).round() as i32;
        let scaled_height = (ih * scale).round() as i32;

        Self {
            scale,
            origin_x: (viewport_width.max(0) - scaled_width) / 2,
            origin_y: (viewport_height.max(0) - scaled_height) / 2,
            scaled_width,
            scaled_height,
        }
    }

    /// Display point to image point, truncating toward zero.
    pub fn to_image_space(&self, p: DisplayPoint) -> ImagePoint {
        if self.scale <= 0.0 {
            return ImagePoint::new(p.x as i32, p.y as i32);
        }
        ImagePoint::new(
            ((p.x - self.origin_x as f32) / self.scale) as i32,
            ((p.y - self.origin_y as f32) / self.scale) as i32,
        )
    }

    pub fn to_display_space(&self, p: ImagePoint) -> DisplayPoint {
        DisplayPoint::new(
            p.x as f32 * self.scale + self.origin_x as f32,
            p.y as f32 * self.scale + self.origin_y as f32,
        )
    }

    pub fn rect_to_display(&self, r: &ImageRect) -> DisplayRect {
        let top_left = self.to_display_space(ImagePoint::new(r.x, r.y));
        DisplayRect::new(
            top_left.x,
            top_left.y,
            r.width as f32 * self.scale,
            r.height as f32 * self.scale,
        )
    }

    /// Where the scaled image lands in the viewport.
    pub fn image_display_rect(&self) -> DisplayRect {
        DisplayRect::new(
            self.origin_x as f32,
            self.origin_y as f32,
            self.scaled_width as f32,
            self.scaled_height as f32,
        )
    }

    /// Whether the display point lies over the rendered image.
    pub fn contains_display(&self, p: DisplayPoint) -> bool {
        self.image_display_rect().contains(p)
    }
}
