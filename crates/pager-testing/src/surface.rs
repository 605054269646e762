//! Recording scroll surface double.

use pager_core::collections::map::HashMap;
use pager_core::{PageView, Rect, ViewId};
use pager_foundation::{PagingEvent, PagingEventSender, ScrollSurface};

/// A layout effect the controller asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Attach { view: ViewId, slot: Rect },
    Reposition { view: ViewId, slot: Rect },
    Detach { view: ViewId },
    ContentExtent(f32),
    ScrollOffset { offset: f32, animated: bool },
}

/// Scroll surface that records every layout effect and tracks what is
/// attached where.
#[derive(Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    attached: HashMap<ViewId, Rect>,
    content_extent: f32,
    scroll_offset: f32,
    post_on_attach: Option<(PagingEventSender, PagingEvent)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn is_attached(&self, view: ViewId) -> bool {
        self.attached.contains_key(&view)
    }

    pub fn slot_of(&self, view: ViewId) -> Option<Rect> {
        self.attached.get(&view).copied()
    }

    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Posts `event` through `sender` the next time a view is attached,
    /// simulating a host notification racing a window recomputation.
    pub fn post_on_next_attach(&mut self, sender: PagingEventSender, event: PagingEvent) {
        self.post_on_attach = Some((sender, event));
    }
}

impl<V: PageView> ScrollSurface<V> for RecordingSurface {
    fn attach(&mut self, view: &V, slot: Rect) {
        let id = view.view_id();
        if self.attached.insert(id, slot).is_some() {
            log::warn!("RecordingSurface: {id} attached twice");
        }
        self.ops.push(SurfaceOp::Attach { view: id, slot });
        if let Some((sender, event)) = self.post_on_attach.take() {
            sender.post(event);
        }
    }

    fn reposition(&mut self, view: &V, slot: Rect) {
        let id = view.view_id();
        match self.attached.get_mut(&id) {
            Some(current) => *current = slot,
            None => log::warn!("RecordingSurface: reposition of detached {id}"),
        }
        self.ops.push(SurfaceOp::Reposition { view: id, slot });
    }

    fn detach(&mut self, view: &V) {
        let id = view.view_id();
        if self.attached.remove(&id).is_none() {
            log::warn!("RecordingSurface: detach of unattached {id}");
        }
        self.ops.push(SurfaceOp::Detach { view: id });
    }

    fn set_content_extent(&mut self, extent: f32) {
        self.content_extent = extent;
        self.ops.push(SurfaceOp::ContentExtent(extent));
    }

    fn set_scroll_offset(&mut self, offset: f32, animated: bool) {
        self.scroll_offset = offset;
        self.ops.push(SurfaceOp::ScrollOffset { offset, animated });
    }
}
