//! The current document: one image, its regions, the selection and the
//! viewport transform. The UI layer owns exactly one and drives it from its
//! event loop.

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::error::{Result, SubtextError};
use crate::geometry::{DisplayMode, DisplayPoint, ImageRect, ScaleState};
use crate::interaction::{CursorHint, DragState, ReleaseOutcome, SelectionMachine};
use crate::io::source::{ImageSource, RasterImage};
use crate::layout::{FitParams, LayoutCache, TextMeasurer};
use crate::model::{RegionId, SubtitleDisplayMode, SubtitleList, SubtitleRegion};
use crate::render::{self, Scene};
use crate::requests::{ApplyOutcome, RecognizedText, RequestId, RequestTicket};

pub struct Document {
    image: Option<RasterImage>,
    /// Bumped on every image change so late request results can be recognised.
    generation: u64,
    viewport_width: i32,
    viewport_height: i32,
    display_mode: DisplayMode,
    subtitle_mode: SubtitleDisplayMode,
    scale: ScaleState,
    regions: SubtitleList,
    machine: SelectionMachine,
    fit: FitParams,
    next_request: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl Document {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            image: None,
            generation: 0,
            viewport_width: 0,
            viewport_height: 0,
            display_mode: config.display.mode,
            subtitle_mode: config.display.subtitles,
            scale: ScaleState::identity(),
            regions: SubtitleList::new(),
            machine: SelectionMachine::new(&config.interaction),
            fit: config.layout.fit_params(),
            next_request: 0,
        }
    }

    // ------------------------------------------------------------------
    // Image and viewport
    // ------------------------------------------------------------------

    /// Decode `source` and show it. On failure the document is left with no
    /// image; its regions stay but are inert.
    pub fn load_image(&mut self, source: &dyn ImageSource) -> Result<()> {
        match source.decode() {
            Ok(raster) => {
                self.set_raster(raster);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to decode {}: {}", source.name(), e);
                self.clear_image();
                Err(e)
            }
        }
    }

    /// Show an already decoded image. The region list is left untouched.
    pub fn set_raster(&mut self, raster: RasterImage) {
        info!(
            "Showing {} ({}x{})",
            raster.name(),
            raster.width(),
            raster.height()
        );
        self.image = Some(raster);
        self.generation += 1;
        self.machine.reset();
        self.recompute_scale();
    }

    /// Drop the image and hand back its regions for persistence.
    pub fn unload_image(&mut self) -> Vec<SubtitleRegion> {
        self.clear_image();
        let regions = self.regions.to_vec();
        self.regions.clear();
        regions
    }

    /// Stop showing any image. Regions stay but are inert until an image
    /// is shown again.
    pub fn clear_image(&mut self) {
        if self.image.take().is_some() {
            self.generation += 1;
        }
        self.machine.reset();
        self.recompute_scale();
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        if (width, height) != (self.viewport_width, self.viewport_height) {
            self.viewport_width = width;
            self.viewport_height = height;
            self.recompute_scale();
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        self.recompute_scale();
    }

    pub fn set_subtitle_display_mode(&mut self, mode: SubtitleDisplayMode) {
        self.subtitle_mode = mode;
    }

    pub fn set_fit_params(&mut self, fit: FitParams) {
        self.fit = fit;
    }

    /// Apply display, layout and interaction settings from a new config.
    pub fn apply_config(&mut self, config: &ViewerConfig) {
        self.machine.configure(&config.interaction);
        self.fit = config.layout.fit_params();
        self.subtitle_mode = config.display.subtitles;
        self.set_display_mode(config.display.mode);
    }

    fn recompute_scale(&mut self) {
        self.scale = match &self.image {
            Some(img) => ScaleState::compute(
                img.width(),
                img.height(),
                self.viewport_width,
                self.viewport_height,
                self.display_mode,
            ),
            None => ScaleState::identity(),
        };
        debug!(
            "Scale {:.4}, origin ({}, {})",
            self.scale.scale, self.scale.origin_x, self.scale.origin_y
        );
    }

    pub fn image(&self) -> Option<&RasterImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scale(&self) -> &ScaleState {
        &self.scale
    }

    pub fn viewport(&self) -> (i32, i32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn subtitle_display_mode(&self) -> SubtitleDisplayMode {
        self.subtitle_mode
    }

    pub fn fit_params(&self) -> &FitParams {
        &self.fit
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Returns false when the press was ignored: no image, or the point is
    /// outside the rendered image.
    pub fn pointer_pressed(&mut self, p: DisplayPoint) -> bool {
        if self.image.is_none() || !self.scale.contains_display(p) {
            return false;
        }
        let ip = self.scale.to_image_space(p);
        let state = self.machine.press(ip, &self.regions);
        debug!("Press at ({}, {}): {:?}", ip.x, ip.y, state);
        true
    }

    /// Returns true if the selection changed.
    pub fn pointer_dragged(&mut self, p: DisplayPoint) -> bool {
        let Some(img) = &self.image else {
            return false;
        };
        let bounds = img.bounds();
        let ip = self.scale.to_image_space(p);
        self.machine.drag(ip, &bounds)
    }

    pub fn pointer_released(&mut self) -> ReleaseOutcome {
        self.machine.release(&mut self.regions)
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.machine.cancel()
    }

    pub fn hover(&self, p: DisplayPoint) -> CursorHint {
        if self.image.is_none() {
            return CursorHint::Default;
        }
        self.machine.hover(self.scale.to_image_space(p))
    }

    pub fn drag_state(&self) -> DragState {
        self.machine.drag_state()
    }

    pub fn selection(&self) -> Option<ImageRect> {
        self.machine.selection()
    }

    pub fn set_selection(&mut self, rect: Option<ImageRect>) {
        let clamped = match (&self.image, rect) {
            (Some(img), Some(r)) => Some(r.normalized().intersection(&img.bounds())),
            _ => None,
        };
        self.machine.set_selection(clamped);
    }

    pub fn selected_region(&self) -> Option<RegionId> {
        self.machine.selected_region()
    }

    pub fn select_region(&mut self, id: RegionId) -> bool {
        self.machine.select_region(id, &self.regions)
    }

    /// Topmost region under a display point.
    pub fn region_at(&self, p: DisplayPoint) -> Option<RegionId> {
        self.image.as_ref()?;
        self.regions.hit(self.scale.to_image_space(p))
    }

    /// Pixels under the current selection.
    pub fn selected_image(&self) -> Option<DynamicImage> {
        let img = self.image.as_ref()?;
        img.crop(&self.machine.selection()?)
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render(&self, measurer: &dyn TextMeasurer) -> Scene {
        render::render_scene(self, measurer, &self.fit)
    }

    /// Like [`Document::render`], reusing caption layouts kept in `cache`.
    pub fn render_cached(&self, measurer: &dyn TextMeasurer, cache: &mut LayoutCache) -> Scene {
        render::render_scene_cached(self, measurer, &self.fit, cache)
    }

    // ------------------------------------------------------------------
    // OCR / translation requests
    // ------------------------------------------------------------------

    /// Snapshot the current selection as the target of a new request.
    pub fn request_ticket(&mut self) -> Result<RequestTicket> {
        if self.image.is_none() {
            return Err(SubtextError::NoImage);
        }
        let bounds = self
            .machine
            .selection()
            .filter(|r| !r.is_empty())
            .ok_or(SubtextError::EmptySelection)?;
        let region = self
            .machine
            .selected_region()
            .filter(|id| self.regions.contains(*id));

        self.next_request += 1;
        let ticket = RequestTicket {
            id: RequestId(self.next_request),
            bounds,
            region,
            image_generation: self.generation,
        };
        info!("Issued {} for {}", ticket.id, bounds);
        Ok(ticket)
    }

    /// Pixels the ticket refers to, if its image is still shown.
    pub fn crop_for_ticket(&self, ticket: &RequestTicket) -> Option<DynamicImage> {
        if ticket.image_generation != self.generation {
            return None;
        }
        self.image.as_ref()?.crop(&ticket.bounds)
    }

    /// Fold a late result into the model. The target is the ticket's
    /// snapshot: its region if that still exists, else a new region at the
    /// snapshot bounds.
    pub fn apply_completed_request(
        &mut self,
        ticket: &RequestTicket,
        text: RecognizedText,
    ) -> ApplyOutcome {
        if self.image.is_none() || ticket.image_generation != self.generation {
            debug!("Dropped {}: image changed", ticket.id);
            return ApplyOutcome::Discarded;
        }
        if text.is_empty() {
            debug!("Dropped {}: no text", ticket.id);
            return ApplyOutcome::Discarded;
        }

        if let Some(id) = ticket.region.filter(|id| self.regions.contains(*id)) {
            self.regions.set_texts(id, text.source, text.translated);
            info!("{} updated region {}", ticket.id, id);
            return ApplyOutcome::Updated(id);
        }

        let id = self.regions.push(SubtitleRegion::new(
            text.source.unwrap_or_default(),
            text.translated.unwrap_or_default(),
            ticket.bounds,
        ));
        info!("{} created region {} at {}", ticket.id, id, ticket.bounds);

        // Still looking at the requested rectangle: the new region takes it over.
        if self.machine.selection() == Some(ticket.bounds) && self.machine.selected_region().is_none() {
            self.machine.select_region(id, &self.regions);
        }
        ApplyOutcome::Created(id)
    }

    // ------------------------------------------------------------------
    // Regions
    // ------------------------------------------------------------------

    pub fn regions(&self) -> &SubtitleList {
        &self.regions
    }

    pub fn add_region(&mut self, region: SubtitleRegion) -> RegionId {
        self.regions.push(region)
    }

    /// Turn the current selection into a region and select it.
    pub fn add_region_from_selection(
        &mut self,
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Result<RegionId> {
        if self.image.is_none() {
            return Err(SubtextError::NoImage);
        }
        let bounds = self
            .machine
            .selection()
            .filter(|r| !r.is_empty())
            .ok_or(SubtextError::EmptySelection)?;
        let id = self
            .regions
            .push(SubtitleRegion::new(source_text, translated_text, bounds));
        self.machine.select_region(id, &self.regions);
        info!("Added region {} at {}", id, bounds);
        Ok(id)
    }

    /// Replace either text field of a region. `None` leaves a field as is.
    pub fn set_region_texts(
        &mut self,
        id: RegionId,
        source: Option<String>,
        translated: Option<String>,
    ) -> bool {
        self.regions.set_texts(id, source, translated)
    }

    pub fn delete_region(&mut self, id: RegionId) -> Option<SubtitleRegion> {
        let removed = self.regions.remove(id)?;
        self.machine.forget_region(id);
        info!("Deleted region {}", id);
        Some(removed)
    }

    pub fn delete_selected_region(&mut self) -> Option<SubtitleRegion> {
        let id = self.machine.selected_region()?;
        self.delete_region(id)
    }

    pub fn clear_regions(&mut self) {
        self.regions.clear();
        self.machine.reset();
    }

    /// Hand the whole list to persistence and start empty.
    pub fn take_regions(&mut self) -> Vec<SubtitleRegion> {
        let regions = self.regions.to_vec();
        self.clear_regions();
        regions
    }

    /// Adopt a fully materialized list, replacing the current one.
    pub fn adopt_regions(&mut self, regions: Vec<SubtitleRegion>) {
        debug!("Adopting {} regions", regions.len());
        self.regions.replace(regions);
        self.machine.reset();
    }
}
