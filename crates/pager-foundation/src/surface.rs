use pager_core::Rect;

/// Layout effects the controller asks of the host scroll surface.
///
/// The surface is a horizontal scroll container. Slots are expressed in
/// content coordinates, so a slot's `x` is its offset from the start of the
/// content.
pub trait ScrollSurface<V> {
    /// Adds `view` to the content at `slot`.
    fn attach(&mut self, view: &V, slot: Rect);

    /// Moves an attached view to a new slot.
    fn reposition(&mut self, view: &V, slot: Rect) {
        self.attach(view, slot);
    }

    /// Removes `view` from the content.
    fn detach(&mut self, view: &V);

    /// Sets the scrollable content width.
    fn set_content_extent(&mut self, extent: f32);

    /// Scrolls so the content at `offset` sits at the leading edge.
    fn set_scroll_offset(&mut self, offset: f32, animated: bool);
}
