//! A scroll surface that narrates layout effects to the log.

use pager_core::{Rect, ViewId};
use pager_foundation::ScrollSurface;

use super::text_page::TextPageView;

#[derive(Debug, Default)]
pub struct ConsoleSurface {
    attached: Vec<(ViewId, Rect)>,
    content_extent: f32,
    scroll_offset: f32,
    layout_passes: usize,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    /// Number of attach, reposition and detach calls seen.
    pub fn layout_passes(&self) -> usize {
        self.layout_passes
    }
}

impl ScrollSurface<TextPageView> for ConsoleSurface {
    fn attach(&mut self, view: &TextPageView, slot: Rect) {
        log::info!(
            "surface: attach {} '{}' ({}) at x={}",
            view.id(),
            view.title(),
            view.body(),
            slot.x
        );
        self.attached.push((view.id(), slot));
        self.layout_passes += 1;
    }

    fn reposition(&mut self, view: &TextPageView, slot: Rect) {
        log::info!("surface: move {} '{}' to x={}", view.id(), view.title(), slot.x);
        if let Some((_, current)) = self.attached.iter_mut().find(|(id, _)| *id == view.id()) {
            *current = slot;
        }
        self.layout_passes += 1;
    }

    fn detach(&mut self, view: &TextPageView) {
        log::info!("surface: detach {} '{}'", view.id(), view.title());
        self.attached.retain(|(id, _)| *id != view.id());
        self.layout_passes += 1;
    }

    fn set_content_extent(&mut self, extent: f32) {
        log::debug!("surface: content extent {extent}");
        self.content_extent = extent;
    }

    fn set_scroll_offset(&mut self, offset: f32, animated: bool) {
        log::debug!("surface: scroll to {offset} (animated: {animated})");
        self.scroll_offset = offset;
    }
}
