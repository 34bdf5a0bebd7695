use std::collections::{BTreeSet, HashSet};

use subtext_core::io::catalog::{BatchRename, CatalogImage, ImageCatalog};
use subtext_core::io::source::ImageSource;
use subtext_core::layout::LayoutCache;
use subtext_core::model::{RegionId, SubtitleBook, SubtitleRegion};

/// Inline editor for both texts of a region.
pub struct RegionEditor {
    pub region: RegionId,
    pub source: String,
    pub translated: String,
}

/// Open file-list dialog, with the indices it acts on.
pub enum FileDialog {
    Rename { index: usize, name: String },
    BatchRename { indices: Vec<usize>, scheme: BatchRename },
    ConfirmDelete { indices: Vec<usize> },
}

/// Transient UI state: log, progress, open dialogs.
pub struct UIState {
    /// Long-running file task, if any (None = idle).
    pub running_task: Option<String>,
    pub progress_items_done: Option<usize>,
    pub progress_items_total: Option<usize>,

    /// OCR / translation requests sent and not yet answered.
    pub pending_requests: usize,

    /// Run translation right after OCR.
    pub translate_after_ocr: bool,

    pub editor: Option<RegionEditor>,
    pub file_dialog: Option<FileDialog>,
    /// Catalog indices picked in the file list for rename / delete.
    pub file_selection: BTreeSet<usize>,
    pub log_messages: Vec<String>,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            running_task: None,
            progress_items_done: None,
            progress_items_total: None,
            pending_requests: 0,
            translate_after_ocr: true,
            editor: None,
            file_dialog: None,
            file_selection: BTreeSet::new(),
            log_messages: Vec::new(),
        }
    }
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn finish_task(&mut self) {
        self.running_task = None;
        self.progress_items_done = None;
        self.progress_items_total = None;
    }
}

/// The images being paged through and the subtitles of the ones not on screen.
#[derive(Default)]
pub struct SessionState {
    pub catalog: ImageCatalog,
    pub current: Option<usize>,
    /// Regions of every visited image except the one the document holds.
    pub book: SubtitleBook,
    /// Images whose regions are owned by `book` rather than their sidecar file.
    visited: HashSet<String>,
    /// Image whose regions the document holds. `None` while one is loading.
    owner: Option<String>,
}

impl SessionState {
    pub fn new(catalog: ImageCatalog) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    pub fn current_image(&self) -> Option<&CatalogImage> {
        self.current.and_then(|i| self.catalog.get(i))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_image().map(|img| img.name())
    }

    /// The document shows the regions of the current image, so they may be saved.
    pub fn owns_current(&self) -> bool {
        self.owner.is_some() && self.owner.as_deref() == self.current_name()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Regions to show for `name`: the session's copy once visited, else the
    /// sidecar's. The document holds them until the next [`SessionState::park`].
    pub fn claim(&mut self, name: &str, sidecar: Vec<SubtitleRegion>) -> Vec<SubtitleRegion> {
        let regions = if self.visited.insert(name.to_string()) {
            sidecar
        } else {
            self.book.take(name)
        };
        self.owner = Some(name.to_string());
        regions
    }

    /// Take back the document's regions when leaving an image. Without a
    /// prior claim the document holds nothing of that image and the call is
    /// a no-op.
    pub fn park(&mut self, regions: Vec<SubtitleRegion>) {
        if let Some(name) = self.owner.take() {
            self.book.insert(name, regions);
        }
    }

    /// Take over an imported archive: its pages win over sidecar files.
    pub fn import_book(&mut self, book: SubtitleBook) {
        for (name, regions) in book.pages() {
            self.visited.insert(name.clone());
            self.book.insert(name.clone(), regions.clone());
        }
    }

    /// The whole session with `current` filed under the image the document holds.
    pub fn snapshot(&self, current: Vec<SubtitleRegion>) -> SubtitleBook {
        let mut book = self.book.clone();
        if let Some(name) = &self.owner {
            book.insert(name.clone(), current);
        }
        book
    }

    /// Follow an image file to its new name.
    pub fn renamed(&mut self, from: &str, to: &str) {
        self.book.rename(from, to);
        if self.visited.remove(from) {
            self.visited.insert(to.to_string());
        }
        if self.owner.as_deref() == Some(from) {
            self.owner = Some(to.to_string());
        }
    }

    /// Drop everything kept for a deleted image.
    pub fn forget(&mut self, name: &str) {
        self.book.take(name);
        self.visited.remove(name);
        if self.owner.as_deref() == Some(name) {
            self.owner = None;
        }
    }
}

/// Viewport display state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Document generation the texture was built from.
    pub texture_generation: u64,
    /// Scroll offset applied when the scaled image overflows the panel.
    pub pan: egui::Vec2,
    /// Caption layouts from previous frames.
    pub layouts: LayoutCache,
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtext_core::geometry::ImageRect;

    fn region(text: &str) -> SubtitleRegion {
        SubtitleRegion::new("", text, ImageRect::new(1, 2, 30, 40))
    }

    fn session() -> SessionState {
        SessionState::new(ImageCatalog::from_paths(["a.png", "b.png"]))
    }

    #[test]
    fn test_leaving_before_load_keeps_sidecar() {
        let mut session = session();

        // Open a, step to b before a has loaded.
        session.current = Some(0);
        session.park(Vec::new());
        session.current = Some(1);
        assert!(session.claim("b.png", Vec::new()).is_empty());
        session.park(Vec::new());

        session.current = Some(0);
        let shown = session.claim("a.png", vec![region("kept")]);
        assert_eq!(shown, vec![region("kept")]);
        assert!(session.owns_current());
    }

    #[test]
    fn test_revisit_uses_parked_regions() {
        let mut session = session();
        session.current = Some(0);
        assert_eq!(session.claim("a.png", vec![region("disk")]).len(), 1);
        session.park(vec![region("edited"), region("new")]);

        session.current = Some(1);
        assert!(!session.owns_current());
        session.claim("b.png", Vec::new());
        session.park(Vec::new());

        session.current = Some(0);
        let shown = session.claim("a.png", vec![region("disk")]);
        assert_eq!(shown, vec![region("edited"), region("new")]);
    }

    #[test]
    fn test_snapshot_only_files_claimed_regions() {
        let mut session = session();
        session.current = Some(0);
        assert!(session.snapshot(Vec::new()).is_empty());

        session.claim("a.png", Vec::new());
        let book = session.snapshot(vec![region("x")]);
        assert_eq!(book.get("a.png").map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_rename_and_forget_follow_files() {
        let mut session = session();
        session.current = Some(0);
        session.claim("a.png", vec![region("x")]);
        session.renamed("a.png", "z.png");
        assert_eq!(session.owner(), Some("z.png"));
        session.park(vec![region("x")]);
        assert!(session.book.get("z.png").is_some());

        // A renamed page comes back from the book, not its sidecar.
        assert_eq!(session.claim("z.png", Vec::new()), vec![region("x")]);
        session.park(vec![region("x")]);

        session.forget("z.png");
        assert!(session.book.is_empty());
        assert_eq!(session.claim("z.png", vec![region("disk")]), vec![region("disk")]);
    }
}
