use subtext_core::geometry::{DisplayPoint, DisplayRect};
use subtext_core::interaction::CursorHint;
use subtext_core::io::source::RasterImage;

/// Convert a decoded raster to an egui ColorImage (RGBA, unpremultiplied).
pub fn raster_to_color_image(raster: &RasterImage) -> egui::ColorImage {
    let rgba = raster.pixels().to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}

/// Display-space rect to a screen rect, given where display (0, 0) is on screen.
pub fn to_screen_rect(r: &DisplayRect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(r.x, r.y),
        egui::vec2(r.width, r.height),
    )
}

pub fn to_display_point(pos: egui::Pos2, origin: egui::Pos2) -> DisplayPoint {
    let d = pos - origin;
    DisplayPoint::new(d.x, d.y)
}

pub fn cursor_icon(hint: CursorHint) -> egui::CursorIcon {
    match hint {
        CursorHint::Default => egui::CursorIcon::Default,
        CursorHint::ResizeNorthWest => egui::CursorIcon::ResizeNorthWest,
        CursorHint::ResizeNorthEast => egui::CursorIcon::ResizeNorthEast,
        CursorHint::ResizeSouthWest => egui::CursorIcon::ResizeSouthWest,
        CursorHint::ResizeSouthEast => egui::CursorIcon::ResizeSouthEast,
        CursorHint::ResizeNorth => egui::CursorIcon::ResizeNorth,
        CursorHint::ResizeEast => egui::CursorIcon::ResizeEast,
        CursorHint::ResizeSouth => egui::CursorIcon::ResizeSouth,
        CursorHint::ResizeWest => egui::CursorIcon::ResizeWest,
    }
}
