use serde::{Deserialize, Serialize};

/// Marker value that opens a new listing page.
pub const PAGE_START: u32 = 0;

/// Resume checkpoint for the listing walk.
///
/// One value is appended per processed listing entry: the position to resume
/// from on the current page, or [`PAGE_START`] once the last entry of a page
/// has been processed. A fresh sequence is `[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitedMarkers(Vec<u32>);

impl VisitedMarkers {
    pub fn new() -> Self {
        Self(vec![PAGE_START])
    }

    /// Rebuild from persisted values. An empty sequence is not a valid checkpoint.
    pub fn from_values(values: Vec<u32>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self(values))
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    /// Position on the current page where processing resumes.
    pub fn last(&self) -> u32 {
        self.0.last().copied().unwrap_or(PAGE_START)
    }

    /// Entries processed across all pages (the leading sentinel is not an entry).
    pub fn processed_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Pages whose last entry has been processed.
    pub fn completed_pages(&self) -> usize {
        self.0
            .iter()
            .filter(|&&v| v == PAGE_START)
            .count()
            .saturating_sub(1)
    }

    /// Record that `position` was processed on a page holding `page_len` entries.
    pub fn advance(&mut self, position: u32, page_len: usize) {
        if position as usize + 1 >= page_len {
            self.0.push(PAGE_START);
        } else {
            self.0.push(position + 1);
        }
    }
}

impl Default for VisitedMarkers {
    fn default() -> Self {
        Self::new()
    }
}

/// What the walker should do with a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDecision {
    /// Every entry on this page was processed by an earlier run.
    SkipPage,
    /// This entry was processed by an earlier run.
    SkipEntry,
    Process,
}

/// Explicit cursor the walker carries from page to page.
#[derive(Debug, Clone)]
pub struct ResumeCursor {
    pub markers: VisitedMarkers,
    pub page_index: usize,
    pub page_url: String,
    /// Entries on all pages before the current one.
    pub page_offset: usize,
}

impl ResumeCursor {
    pub fn new(markers: VisitedMarkers, start_url: impl Into<String>) -> Self {
        Self {
            markers,
            page_index: 0,
            page_url: start_url.into(),
            page_offset: 0,
        }
    }

    pub fn decide(&self, position: u32) -> EntryDecision {
        if self.markers.completed_pages() > self.page_index {
            EntryDecision::SkipPage
        } else if position < self.markers.last() {
            EntryDecision::SkipEntry
        } else {
            EntryDecision::Process
        }
    }

    /// 1-based id of the entry across the whole walk.
    pub fn product_id(&self, position: u32) -> usize {
        self.page_offset + position as usize + 1
    }

    pub fn next_page(&mut self, url: String, page_len: usize) {
        self.page_index += 1;
        self.page_offset += page_len;
        self.page_url = url;
    }
}
