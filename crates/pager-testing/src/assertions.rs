//! Assertion utilities for paging tests
//!
//! These check the structural invariants a paging controller must hold in
//! every reachable state.

use pager_core::PageView;
use pager_foundation::{PageDataSource, PagingWindowController, ScrollSurface};

use crate::page_view::TestPageView;
use crate::surface::RecordingSurface;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert the window is bounded, contiguous, matches the bound views, and
/// shares no view with the pool.
pub fn assert_window_invariants<V, D, S>(controller: &PagingWindowController<V, D, S>)
where
    V: PageView,
    D: PageDataSource<V>,
    S: ScrollSurface<V>,
{
    let visible = controller.visible_indices();
    let width = controller.config().window_width();
    assert!(
        visible.len() <= width,
        "window {:?} wider than {}",
        visible,
        width
    );
    assert!(
        visible.windows(2).all(|pair| pair[1] == pair[0] + 1),
        "window {:?} is not contiguous",
        visible
    );
    assert_eq!(
        visible.to_vec(),
        controller.window().iter().collect::<Vec<_>>(),
        "bound pages differ from the maintained window"
    );
    assert!(
        visible.iter().all(|index| *index < controller.page_count()),
        "window {:?} outside {} pages",
        visible,
        controller.page_count()
    );
    if !visible.is_empty() {
        assert!(
            visible.contains(&controller.current_index()),
            "window {:?} misses current page {}",
            visible,
            controller.current_index()
        );
    }

    let mut ids = Vec::new();
    for (index, view) in controller.visible_views() {
        let id = view.view_id();
        assert_eq!(view.page_index(), Some(index), "{} bound to wrong page", id);
        assert!(!ids.contains(&id), "{} bound to two pages", id);
        assert!(!controller.pool().contains(id), "{} both bound and pooled", id);
        ids.push(id);
    }
}

/// Assert the recording surface shows exactly the bound views, each at its
/// slot.
pub fn assert_surface_in_sync<D>(
    controller: &PagingWindowController<TestPageView, D, RecordingSurface>,
) where
    D: PageDataSource<TestPageView>,
{
    let surface = controller.surface();
    assert_eq!(
        surface.attached_count(),
        controller.visible_indices().len(),
        "surface holds views outside the window"
    );
    for (index, view) in controller.visible_views() {
        assert_eq!(
            surface.slot_of(view.id()),
            Some(controller.geometry().slot_frame(index)),
            "page {} not attached at its slot",
            index
        );
    }
    for view in controller.pool().iter() {
        assert!(
            !surface.is_attached(view.id()),
            "pooled {} still attached",
            view.id()
        );
    }
}
