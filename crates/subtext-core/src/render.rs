//! Projection of a [`Document`] into display-space draw commands.
//!
//! Paint order is the image, then captions in list order, then the selection
//! decoration on top. Building a scene never mutates the document.

use crate::consts::HANDLE_PAINT_SIZE;
use crate::document::Document;
use crate::geometry::DisplayRect;
use crate::interaction::Edge;
use crate::layout::{FitParams, LayoutCache, TextLayout, TextMeasurer};
use crate::model::RegionId;

/// The scaled raster and where it goes.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageQuad {
    pub rect: DisplayRect,
    /// Changes whenever a different image is shown; lets painters cache textures.
    pub generation: u64,
}

/// An opaque box over a region with its fitted text.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    pub region: RegionId,
    pub background: DisplayRect,
    /// Line positions are relative to `background`'s top-left corner.
    pub layout: TextLayout,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionDecoration {
    pub border: DisplayRect,
    /// Corner handles in [`Edge::CORNERS`] order.
    pub handles: [DisplayRect; 4],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub image: Option<ImageQuad>,
    pub captions: Vec<Caption>,
    pub selection: Option<SelectionDecoration>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.captions.is_empty() && self.selection.is_none()
    }
}

pub fn selection_decoration(border: DisplayRect) -> SelectionDecoration {
    let handles = Edge::CORNERS.map(|corner| {
        let (cx, cy) = match corner {
            Edge::TopLeft => (border.x, border.y),
            Edge::TopRight => (border.right(), border.y),
            Edge::BottomLeft => (border.x, border.bottom()),
            _ => (border.right(), border.bottom()),
        };
        DisplayRect::centered(cx, cy, HANDLE_PAINT_SIZE)
    });
    SelectionDecoration { border, handles }
}

pub fn render_scene(doc: &Document, measurer: &dyn TextMeasurer, params: &FitParams) -> Scene {
    render_scene_cached(doc, measurer, params, &mut LayoutCache::new())
}

/// [`render_scene`] that reuses caption layouts from earlier frames.
pub fn render_scene_cached(
    doc: &Document,
    measurer: &dyn TextMeasurer,
    params: &FitParams,
    cache: &mut LayoutCache,
) -> Scene {
    if !doc.has_image() {
        return Scene::default();
    }
    let scale = doc.scale();

    let image = Some(ImageQuad {
        rect: scale.image_display_rect(),
        generation: doc.generation(),
    });

    let mode = doc.subtitle_display_mode();
    let captions = doc
        .regions()
        .iter()
        .filter_map(|(id, region)| {
            let text = mode.select(region)?;
            let background = scale.rect_to_display(&region.bounds);
            let layout = cache.fit(text, background.width, background.height, measurer, params);
            Some(Caption {
                region: id,
                background,
                layout,
            })
        })
        .collect();

    let selection = doc
        .selection()
        .map(|rect| selection_decoration(scale.rect_to_display(&rect)));

    cache.end_frame();

    Scene {
        image,
        captions,
        selection,
    }
}
