//! Annotated subtitle regions belonging to the currently displayed image.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{ImagePoint, ImageRect};

/// One annotated rectangle with its recognised and translated text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubtitleRegion {
    pub source_text: String,
    pub translated_text: String,
    pub bounds: ImageRect,
}

impl SubtitleRegion {
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        bounds: ImageRect,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            bounds,
        }
    }
}

/// Stable handle to a region. Survives removal of other regions, unlike an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which text field of each region is painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubtitleDisplayMode {
    None,
    Source,
    #[default]
    Translation,
}

impl SubtitleDisplayMode {
    pub const ALL: &[Self] = &[Self::None, Self::Source, Self::Translation];

    /// The text to paint for `region`, if this mode selects a non-empty field.
    pub fn select<'a>(&self, region: &'a SubtitleRegion) -> Option<&'a str> {
        let text = match self {
            Self::None => return None,
            Self::Source => region.source_text.as_str(),
            Self::Translation => region.translated_text.as_str(),
        };
        (!text.is_empty()).then_some(text)
    }
}

impl fmt::Display for SubtitleDisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "No Subtitles"),
            Self::Source => write!(f, "OCR Subtitles"),
            Self::Translation => write!(f, "Translated Subtitles"),
        }
    }
}

/// Ordered list of regions for one image. Later entries paint on top and
/// win hit tests.
#[derive(Clone, Debug, Default)]
pub struct SubtitleList {
    entries: Vec<(RegionId, SubtitleRegion)>,
    next_id: u64,
}

impl SubtitleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_regions(regions: Vec<SubtitleRegion>) -> Self {
        let mut list = Self::new();
        list.replace(regions);
        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, region: SubtitleRegion) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, region));
        id
    }

    pub fn get(&self, id: RegionId) -> Option<&SubtitleRegion> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, r)| r)
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut SubtitleRegion> {
        self.entries
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, r)| r)
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: RegionId) -> Option<SubtitleRegion> {
        let pos = self.entries.iter().position(|(i, _)| *i == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Topmost region whose bounds contain `p`.
    pub fn hit(&self, p: ImagePoint) -> Option<RegionId> {
        self.entries
            .iter()
            .rev()
            .find(|(_, r)| r.bounds.contains(p))
            .map(|(id, _)| *id)
    }

    /// Overwrite a region's bounds. Returns false if the region is gone.
    pub fn reshape(&mut self, id: RegionId, bounds: ImageRect) -> bool {
        match self.get_mut(id) {
            Some(region) => {
                region.bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn set_texts(&mut self, id: RegionId, source: Option<String>, translated: Option<String>) -> bool {
        let Some(region) = self.get_mut(id) else {
            return false;
        };
        if let Some(source) = source {
            region.source_text = source;
        }
        if let Some(translated) = translated {
            region.translated_text = translated;
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &SubtitleRegion)> {
        self.entries.iter().map(|(id, r)| (*id, r))
    }

    pub fn regions(&self) -> impl Iterator<Item = &SubtitleRegion> {
        self.entries.iter().map(|(_, r)| r)
    }

    /// Snapshot of the regions in list order, for persistence.
    pub fn to_vec(&self) -> Vec<SubtitleRegion> {
        self.regions().cloned().collect()
    }

    /// Adopt `regions` wholesale. All previously issued ids become invalid.
    pub fn replace(&mut self, regions: Vec<SubtitleRegion>) {
        self.entries.clear();
        for region in regions {
            self.push(region);
        }
    }
}

/// Region lists for every image of a multi-image source, keyed by image name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubtitleBook {
    pages: BTreeMap<String, Vec<SubtitleRegion>>,
}

impl SubtitleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(pages: BTreeMap<String, Vec<SubtitleRegion>>) -> Self {
        Self { pages }
    }

    pub fn get(&self, name: &str) -> Option<&[SubtitleRegion]> {
        self.pages.get(name).map(Vec::as_slice)
    }

    /// Store `regions` under `name`. An empty list removes the entry.
    pub fn insert(&mut self, name: impl Into<String>, regions: Vec<SubtitleRegion>) {
        let name = name.into();
        if regions.is_empty() {
            self.pages.remove(&name);
        } else {
            self.pages.insert(name, regions);
        }
    }

    pub fn take(&mut self, name: &str) -> Vec<SubtitleRegion> {
        self.pages.remove(name).unwrap_or_default()
    }

    /// Move a page to a new key, e.g. after its image file was renamed.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) {
        if let Some(regions) = self.pages.remove(from) {
            self.pages.insert(to.into(), regions);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn pages(&self) -> &BTreeMap<String, Vec<SubtitleRegion>> {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of regions across all images.
    pub fn total_regions(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }
}
