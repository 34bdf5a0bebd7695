#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use subtext_core::document::Document;
use subtext_core::geometry::DisplayPoint;
use subtext_core::io::source::{MemoryImage, RasterImage};

/// Solid grey RGB image.
pub fn solid_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([128, 128, 128])))
}

/// PNG-encoded solid image, as an in-memory source.
pub fn png_source(name: &str, width: u32, height: u32) -> MemoryImage {
    let mut bytes = Vec::new();
    solid_image(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    MemoryImage {
        name: name.to_string(),
        bytes,
    }
}

/// A document showing a `width` x `height` image in the given viewport
/// with default settings (fit to view).
pub fn document_with_image(width: u32, height: u32, viewport_w: i32, viewport_h: i32) -> Document {
    let mut doc = Document::default();
    doc.set_viewport(viewport_w, viewport_h);
    doc.set_raster(RasterImage::new("page.png", solid_image(width, height)).unwrap());
    doc
}

pub fn dp(x: f32, y: f32) -> DisplayPoint {
    DisplayPoint::new(x, y)
}

/// Press, drag through `path`, release.
pub fn drag(doc: &mut Document, from: DisplayPoint, path: &[DisplayPoint]) {
    assert!(doc.pointer_pressed(from), "press at {from:?} was ignored");
    for p in path {
        doc.pointer_dragged(*p);
    }
    doc.pointer_released();
}
