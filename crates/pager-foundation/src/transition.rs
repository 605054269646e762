//! Two-phase size change bookkeeping.
//!
//! Phase one runs before the host resizes and records where the user is in
//! page units. Phase two runs once the new size is known and turns that
//! position back into an offset under the new geometry, so the same page
//! stays on screen across rotation.

use crate::geometry::PageGeometry;

/// Scroll position captured before a size change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeTransition {
    /// Fractional page position, `None` if the surface had no width yet.
    page_position: Option<f32>,
    current_index: usize,
}

impl SizeTransition {
    /// Phase one: capture the position at `scroll_offset` under `geometry`.
    pub fn record(geometry: &PageGeometry, scroll_offset: f32, current_index: usize) -> Self {
        let page_position = (geometry.has_extent() && scroll_offset.is_finite())
            .then(|| geometry.page_position(scroll_offset));
        Self {
            page_position,
            current_index,
        }
    }

    pub fn page_position(&self) -> Option<f32> {
        self.page_position
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Phase two: the offset under `geometry` equivalent to the recorded one.
    pub fn restored_offset(&self, geometry: &PageGeometry) -> f32 {
        let position = self
            .page_position
            .unwrap_or(self.current_index as f32)
            .max(0.0);
        position * geometry.stride()
    }
}
