//! Page slot geometry for a horizontal paging surface.
//!
//! Maps between page indices and content offsets. Every page occupies the
//! full viewport width; adjacent pages are separated by the page margin, so
//! the scroll stride is `viewport width + margin` and page `i` sits at
//! `i * stride + margin / 2`.

use pager_core::{Rect, Size};

/// Slot geometry derived from the viewport size and page margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    viewport: Size,
    page_margin: f32,
}

impl PageGeometry {
    /// Creates geometry for `viewport`, sanitizing unusable sizes to zero.
    pub fn new(viewport: Size, page_margin: f32) -> Self {
        let viewport = if viewport.is_valid() {
            viewport
        } else {
            log::warn!("PagingWindow: ignoring invalid viewport {viewport:?}, using zero size");
            Size::ZERO
        };
        let page_margin = if page_margin.is_finite() && page_margin >= 0.0 {
            page_margin
        } else {
            log::warn!("PagingWindow: ignoring invalid page margin {page_margin}");
            0.0
        };
        Self {
            viewport,
            page_margin,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn page_margin(&self) -> f32 {
        self.page_margin
    }

    /// Distance between the leading edges of adjacent pages.
    #[inline]
    pub fn stride(&self) -> f32 {
        self.viewport.width + self.page_margin
    }

    /// Whether the surface has been laid out with a usable width.
    #[inline]
    pub fn has_extent(&self) -> bool {
        self.stride() > 0.0
    }

    /// Scroll offset that shows page `index`.
    pub fn offset_for_index(&self, index: usize) -> f32 {
        index as f32 * self.stride()
    }

    /// Frame of page `index` in content coordinates.
    pub fn slot_frame(&self, index: usize) -> Rect {
        Rect::new(
            self.offset_for_index(index) + self.page_margin / 2.0,
            0.0,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// Total scrollable width for `page_count` pages.
    pub fn content_extent(&self, page_count: usize) -> f32 {
        page_count as f32 * self.stride()
    }

    /// Fractional page position of `offset`, e.g. `2.5` halfway between
    /// pages 2 and 3. Zero when the surface has no width yet.
    pub fn page_position(&self, offset: f32) -> f32 {
        if !self.has_extent() {
            return 0.0;
        }
        offset / self.stride()
    }

    /// The page considered current at `offset`.
    ///
    /// A page becomes current once more than half of it is on screen. The
    /// result is clamped to `[0, page_count)`; `None` when there is nothing
    /// to show or no width to measure against.
    pub fn index_for_offset(&self, offset: f32, page_count: usize) -> Option<usize> {
        if page_count == 0 || !self.has_extent() || !offset.is_finite() {
            return None;
        }
        let position = (offset / self.stride() + 0.5).floor();
        if position <= 0.0 {
            return Some(0);
        }
        Some((position as usize).min(page_count - 1))
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::new(Size::ZERO, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> PageGeometry {
        PageGeometry::new(Size::new(320.0, 480.0), 0.0)
    }

    #[test]
    fn slot_offsets_are_index_times_extent() {
        let geometry = phone();
        assert_eq!(geometry.slot_frame(0), Rect::new(0.0, 0.0, 320.0, 480.0));
        assert_eq!(geometry.slot_frame(3), Rect::new(960.0, 0.0, 320.0, 480.0));
        assert_eq!(geometry.content_extent(10), 3200.0);
    }

    #[test]
    fn margin_widens_stride_and_centres_page() {
        let geometry = PageGeometry::new(Size::new(320.0, 480.0), 20.0);
        assert_eq!(geometry.stride(), 340.0);
        assert_eq!(geometry.slot_frame(1).x, 350.0);
        assert_eq!(geometry.slot_frame(1).width, 320.0);
        assert_eq!(geometry.content_extent(2), 680.0);
    }

    #[test]
    fn current_page_switches_past_half_way() {
        let geometry = phone();
        assert_eq!(geometry.index_for_offset(0.0, 10), Some(0));
        assert_eq!(geometry.index_for_offset(159.0, 10), Some(0));
        assert_eq!(geometry.index_for_offset(160.0, 10), Some(1));
        assert_eq!(geometry.index_for_offset(1600.0, 10), Some(5));
    }

    #[test]
    fn offsets_outside_content_are_clamped() {
        let geometry = phone();
        assert_eq!(geometry.index_for_offset(-500.0, 10), Some(0));
        assert_eq!(geometry.index_for_offset(1.0e6, 10), Some(9));
    }

    #[test]
    fn no_index_without_pages_or_width() {
        assert_eq!(phone().index_for_offset(100.0, 0), None);
        assert_eq!(PageGeometry::default().index_for_offset(100.0, 10), None);
        assert_eq!(phone().index_for_offset(f32::NAN, 10), None);
    }

    #[test]
    fn page_position_is_fractional() {
        let geometry = phone();
        assert_eq!(geometry.page_position(480.0), 1.5);
        assert_eq!(PageGeometry::default().page_position(480.0), 0.0);
    }

    #[test]
    fn invalid_viewport_falls_back_to_zero() {
        let geometry = PageGeometry::new(Size::new(f32::INFINITY, 10.0), -4.0);
        assert_eq!(geometry.viewport(), Size::ZERO);
        assert_eq!(geometry.page_margin(), 0.0);
        assert!(!geometry.has_extent());
    }
}
