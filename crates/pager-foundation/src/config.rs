//! Configuration for paging surfaces.

use pager_core::{ReuseIdentifier, Size};

/// Neighbours kept bound on each side of the current page.
/// One on each side gives the classic three-page window.
pub const DEFAULT_WINDOW_RADIUS: usize = 1;

/// Configuration for a [`PagingWindowController`](crate::PagingWindowController).
#[derive(Clone, Debug)]
pub struct PagingConfig {
    /// Pages kept bound before and after the current page.
    pub window_radius: usize,

    /// Page-kind identifier used when the data source dequeues with the
    /// pool's default.
    pub reuse_identifier: ReuseIdentifier,

    /// Gap between adjacent pages. The scroll stride is the viewport width
    /// plus this margin.
    pub page_margin: f32,

    /// Page shown by the first reload.
    pub initial_index: usize,

    /// Viewport size before the host reports its first layout.
    pub viewport_size: Size,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            window_radius: DEFAULT_WINDOW_RADIUS,
            reuse_identifier: ReuseIdentifier::default(),
            page_margin: 0.0,
            initial_index: 0,
            viewport_size: Size::ZERO,
        }
    }
}

impl PagingConfig {
    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn with_reuse_identifier(mut self, identifier: impl Into<ReuseIdentifier>) -> Self {
        self.reuse_identifier = identifier.into();
        self
    }

    pub fn with_page_margin(mut self, margin: f32) -> Self {
        self.page_margin = margin;
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    pub fn with_viewport_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// Maximum number of pages bound at once.
    pub fn window_width(&self) -> usize {
        self.window_radius.saturating_mul(2).saturating_add(1)
    }
}
