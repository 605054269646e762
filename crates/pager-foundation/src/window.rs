//! The contiguous range of pages kept bound around the current page.
//!
//! The window is recomputed on every page change; diffing the old and new
//! windows tells the controller exactly which pages to retire and which to
//! bind, so each step costs O(window) regardless of page count.

use std::ops::Range;

/// Contiguous half-open range of page indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageWindow {
    range: Range<usize>,
}

impl PageWindow {
    pub const EMPTY: PageWindow = PageWindow { range: 0..0 };

    /// Window of `radius` pages either side of `center`, clamped to
    /// `[0, page_count)`.
    pub fn around(center: usize, radius: usize, page_count: usize) -> Self {
        if page_count == 0 {
            return Self::EMPTY;
        }
        let center = center.min(page_count - 1);
        let start = center.saturating_sub(radius);
        let end = center
            .saturating_add(radius)
            .saturating_add(1)
            .min(page_count);
        Self { range: start..end }
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }

    pub fn iter(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The leading part of this window, cut off before `end`.
    pub(crate) fn truncated(&self, end: usize) -> Self {
        let end = end.clamp(self.range.start, self.range.end);
        Self {
            range: self.range.start..end,
        }
    }

    /// Indices in `self` that are not in `other`, ascending.
    pub fn difference<'a>(&'a self, other: &'a PageWindow) -> impl Iterator<Item = usize> + 'a {
        self.iter().filter(move |index| !other.contains(*index))
    }
}
