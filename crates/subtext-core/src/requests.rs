//! Identity for OCR / translation calls that complete after the user has
//! moved on.
//!
//! A ticket snapshots the target at request time. Completion is resolved
//! against the snapshot, never against whatever is selected at that moment.

use std::fmt;

use crate::geometry::ImageRect;
use crate::model::RegionId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Target of an outstanding request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    pub id: RequestId,
    /// Selection bounds when the request was issued.
    pub bounds: ImageRect,
    /// Region the selection belonged to, if any.
    pub region: Option<RegionId>,
    /// Image the request was issued against.
    pub image_generation: u64,
}

/// Text delivered by a completed request. Either field may be missing when
/// the corresponding service failed or was not asked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecognizedText {
    pub source: Option<String>,
    pub translated: Option<String>,
}

impl RecognizedText {
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.translated.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created(RegionId),
    Updated(RegionId),
    /// Nothing usable arrived, or the image changed since the request.
    Discarded,
}
