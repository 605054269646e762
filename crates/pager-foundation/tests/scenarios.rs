//! End-to-end paging scenarios driven through the recording test doubles.

use std::cell::RefCell;
use std::rc::Rc;

use pager_core::PageView;
use pager_foundation::{PageChange, PagingConfig, PagingEvent, PagingPhase};
use pager_testing::prelude::*;

const STRIDE: f32 = 320.0;

fn loaded(page_count: isize, initial_index: usize) -> TestController {
    let mut pager = test_controller_with(
        PagingConfig::default().with_initial_index(initial_index),
        page_count,
    );
    pager.reload();
    pager
}

fn drag_to(pager: &mut TestController, page: usize) {
    pager.scroll_position_changed(page as f32 * STRIDE);
    pager.scroll_ended();
}

fn view_at(pager: &TestController, index: usize) -> TestPageView {
    pager
        .visible_view(index)
        .cloned()
        .unwrap_or_else(|| panic!("page {index} not bound"))
}

fn check(pager: &TestController) {
    assert_window_invariants(pager);
    assert_surface_in_sync(pager);
}

#[test]
fn first_page_window_is_clamped_at_the_start() {
    let pager = loaded(10, 0);

    assert_eq!(pager.current_index(), 0);
    assert_eq!(pager.visible_indices().as_slice(), &[0, 1]);
    assert_eq!(pager.data_source().requested_indices(), vec![0, 1]);
    assert_eq!(pager.surface().content_extent(), 10.0 * STRIDE);
    assert_eq!(view_at(&pager, 1).content().as_deref(), Some("Page 1"));
    check(&pager);
}

#[test]
fn jump_recycles_the_view_that_left_the_window() {
    let mut pager = loaded(10, 1);
    assert_eq!(pager.visible_indices().as_slice(), &[0, 1, 2]);
    let page_two = view_at(&pager, 2);
    pager.data_source_mut().clear_requests();

    pager.set_current_index(5, false);

    assert_eq!(pager.visible_indices().as_slice(), &[4, 5, 6]);
    assert_eq!(page_two.prepare_count(), 1, "cleared when retired");
    assert!(
        pager.data_source().requests().contains(&ViewRequest {
            index: 4,
            view: page_two.id(),
            reused: true,
        }),
        "retired view handed back by dequeue: {:?}",
        pager.data_source().requests()
    );
    assert_eq!(view_at(&pager, 4).id(), page_two.id());
    assert_eq!(page_two.page_index(), Some(4));
    assert_eq!(page_two.content().as_deref(), Some("Page 4"));
    assert_eq!(pager.data_source().created(), 3, "no view constructed for the jump");
    check(&pager);
}

#[test]
fn retired_views_wait_in_the_pool() {
    let mut pager = loaded(10, 1);
    let page_zero = view_at(&pager, 0);

    pager.set_current_index(9, false);

    assert_eq!(pager.visible_indices().as_slice(), &[8, 9]);
    assert_eq!(pager.pool().len(), 1);
    assert!(pager.pool().contains(page_zero.id()));
    assert!(!pager.surface().is_attached(page_zero.id()));
    assert_eq!(page_zero.content(), None);
    check(&pager);
}

#[test]
fn single_page_never_requests_neighbours() {
    let mut pager = loaded(1, 0);
    assert_eq!(pager.visible_indices().as_slice(), &[0]);

    drag_to(&mut pager, 3);
    pager.set_current_index(4, false);
    pager.move_to_next_page(false);
    pager.move_to_previous_page(false);

    assert_eq!(pager.current_index(), 0);
    assert!(!pager.has_next());
    assert!(!pager.has_previous());
    assert_eq!(pager.data_source().requested_indices(), vec![0]);
    check(&pager);
}

#[test]
fn shrinking_reload_clamps_current_page() {
    let mut pager = loaded(10, 0);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    pager.add_page_change_listener(move |change| sink.borrow_mut().push(change));

    pager.set_current_index(8, false);
    assert_eq!(pager.visible_indices().as_slice(), &[7, 8, 9]);

    pager.data_source_mut().set_page_count(3);
    pager.reload();

    assert_eq!(pager.phase(), PagingPhase::Loaded);
    assert_eq!(pager.current_index(), 2);
    assert_eq!(pager.visible_indices().as_slice(), &[1, 2]);
    assert_eq!(pager.surface().content_extent(), 3.0 * STRIDE);
    assert_eq!(pager.scroll_offset(), 2.0 * STRIDE);
    assert_eq!(
        changes.borrow().last(),
        Some(&PageChange {
            previous: Some(8),
            current: 2
        })
    );
    check(&pager);
}

#[test]
fn size_change_during_scroll_lands_after_the_window_update() {
    let mut racing = loaded(10, 0);
    let sender = racing.event_sender();
    racing.surface_mut().take_ops();
    racing.surface_mut().post_on_next_attach(
        sender,
        PagingEvent::SizeChanged { size: LANDSCAPE },
    );

    racing.scroll_position_changed(5.0 * STRIDE);

    let ops = racing.surface().ops();
    let last_attach = ops
        .iter()
        .rposition(|op| matches!(op, SurfaceOp::Attach { .. }))
        .expect("window moved");
    let first_reposition = ops
        .iter()
        .position(|op| matches!(op, SurfaceOp::Reposition { .. }))
        .expect("size change applied");
    assert!(
        last_attach < first_reposition,
        "size change interleaved with binding: {ops:?}"
    );
    let portrait_slots: Vec<f32> = ops
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::Attach { slot, .. } => Some(slot.x),
            _ => None,
        })
        .collect();
    assert_eq!(portrait_slots, vec![4.0 * STRIDE, 5.0 * STRIDE, 6.0 * STRIDE]);

    let mut ordered = loaded(10, 0);
    ordered.size_changed(LANDSCAPE);
    ordered.scroll_position_changed(5.0 * LANDSCAPE.width);

    assert_eq!(racing.visible_indices(), ordered.visible_indices());
    assert_eq!(racing.current_index(), 5);
    assert_eq!(ordered.current_index(), 5);
    assert_eq!(racing.scroll_offset(), ordered.scroll_offset());
    assert_eq!(racing.geometry(), ordered.geometry());
    for (index, view) in racing.visible_views() {
        assert_eq!(
            racing.surface().slot_of(view.id()),
            ordered
                .visible_view(index)
                .and_then(|view| ordered.surface().slot_of(view.id()))
        );
    }
    check(&racing);
    check(&ordered);
}

#[test]
fn reloading_twice_keeps_the_same_pages() {
    let mut pager = loaded(10, 4);
    let before = pager.visible_indices();

    pager.reload();
    pager.reload();

    assert_eq!(pager.visible_indices(), before);
    assert_eq!(pager.data_source().created(), 3, "views recycled by reload");
    check(&pager);
}

#[test]
fn forward_then_back_returns_to_the_same_window() {
    let mut pager = loaded(20, 3);
    let start = pager.visible_indices();

    for page in 4..=9 {
        drag_to(&mut pager, page);
        check(&pager);
    }
    for page in (3..9).rev() {
        drag_to(&mut pager, page);
        check(&pager);
    }

    assert_eq!(pager.current_index(), 3);
    assert_eq!(pager.visible_indices(), start);
}

#[test]
fn scrolling_only_touches_entering_and_leaving_pages() {
    let mut pager = loaded(100_000, 500);
    let stayed = view_at(&pager, 500);
    pager.data_source_mut().clear_requests();
    pager.surface_mut().take_ops();

    drag_to(&mut pager, 501);

    assert_eq!(pager.data_source().requested_indices(), vec![502]);
    let ops = pager.surface_mut().take_ops();
    let attaches = ops
        .iter()
        .filter(|op| matches!(op, SurfaceOp::Attach { .. }))
        .count();
    let detaches = ops
        .iter()
        .filter(|op| matches!(op, SurfaceOp::Detach { .. }))
        .count();
    assert_eq!((attaches, detaches), (1, 1));
    assert_eq!(stayed.bind_count(), 1, "kept page not rebound");
    assert_eq!(pager.stats().total_created, 3);
}

#[test]
fn out_of_range_index_is_clamped() {
    let mut pager = loaded(10, 0);
    pager.set_current_index(42, false);

    assert_eq!(pager.current_index(), 9);
    assert_eq!(pager.visible_indices().as_slice(), &[8, 9]);
    assert_eq!(pager.surface().scroll_offset(), 9.0 * STRIDE);
    check(&pager);
}

#[test]
fn rotation_keeps_the_current_page_in_view() {
    let mut pager = loaded(10, 4);
    let bound: Vec<_> = pager.visible_views().map(|(_, view)| view.id()).collect();
    pager.data_source_mut().clear_requests();

    pager.begin_size_change();
    pager.finish_size_change(LANDSCAPE);

    assert_eq!(pager.current_index(), 4);
    assert_eq!(pager.surface().scroll_offset(), 4.0 * LANDSCAPE.width);
    assert_eq!(pager.surface().content_extent(), 10.0 * LANDSCAPE.width);
    assert!(pager.data_source().requests().is_empty(), "no rebinding");
    assert_eq!(
        pager.visible_views().map(|(_, view)| view.id()).collect::<Vec<_>>(),
        bound
    );
    check(&pager);
}

#[test]
fn rotation_mid_drag_preserves_fractional_position() {
    let mut pager = loaded(10, 2);
    pager.scroll_position_changed(2.25 * STRIDE);

    pager.size_changed(LANDSCAPE);

    assert_approx_eq(
        pager.scroll_offset(),
        2.25 * LANDSCAPE.width,
        0.01,
        "offset scaled to the new stride",
    );
    assert_eq!(pager.current_index(), 2);
}

#[test]
fn rotation_with_page_margin() {
    let mut pager = test_controller_with(
        PagingConfig::default()
            .with_page_margin(20.0)
            .with_initial_index(3),
        10,
    );
    pager.reload();
    assert_eq!(pager.scroll_offset(), 3.0 * 340.0);

    pager.size_changed(LANDSCAPE);

    assert_eq!(pager.scroll_offset(), 3.0 * 500.0);
    let slot = pager.surface().slot_of(view_at(&pager, 3).id());
    assert_eq!(slot.map(|slot| slot.x), Some(3.0 * 500.0 + 10.0));
    check(&pager);
}

#[test]
fn placeholder_content_is_replaced_in_place() {
    let mut pager = loaded(10, 0);
    let ops_before = pager.surface().ops().len();

    let updated = pager.update_visible_view(1, |view| view.set_content("Loaded 1"));

    assert_eq!(updated, Some(()));
    assert_eq!(view_at(&pager, 1).content().as_deref(), Some("Loaded 1"));
    assert_eq!(pager.surface().ops().len(), ops_before);
    assert_eq!(pager.pool().len(), 0);
}

#[test]
fn view_already_bound_is_replaced_by_placeholder() {
    let mut pager = loaded(10, 0);
    pager.data_source_mut().return_last_view_on_next_request();

    pager.scroll_position_changed(STRIDE);

    assert_eq!(pager.visible_indices().as_slice(), &[0, 1, 2]);
    assert_eq!(pager.data_source().placeholders(), 1);
    assert_eq!(view_at(&pager, 2).content().as_deref(), Some("Placeholder 2"));
    assert_eq!(pager.stats().contract_violations, 1);
    check(&pager);
}

#[test]
fn pooled_view_handed_back_without_dequeue_is_reclaimed() {
    let mut pager = loaded(10, 0);
    let page_one = view_at(&pager, 1);
    pager.data_source_mut().return_last_view_on_next_request();

    pager.set_current_index(5, false);

    assert_eq!(view_at(&pager, 4).id(), page_one.id());
    assert!(!pager.pool().contains(page_one.id()));
    assert_eq!(pager.stats().contract_violations, 0);
    check(&pager);
}

#[test]
fn reload_posted_while_binding_supersedes_it() {
    let mut pager = loaded(10, 4);
    let sender = pager.event_sender();
    pager
        .data_source_mut()
        .post_on_request(4, sender, PagingEvent::Reload);
    pager.data_source_mut().clear_requests();

    pager.reload();

    assert_eq!(pager.data_source().requested_indices(), vec![3, 4, 3, 4, 5]);
    assert_eq!(pager.visible_indices().as_slice(), &[3, 4, 5]);
    assert_eq!(pager.phase(), PagingPhase::Loaded);
    assert_eq!(pager.stats().stale_reloads_discarded, 1);
    check(&pager);
}

#[test]
fn reload_posted_while_binding_the_last_page_supersedes_it() {
    let mut pager = loaded(10, 4);
    let sender = pager.event_sender();
    pager
        .data_source_mut()
        .post_on_request(5, sender, PagingEvent::Reload);
    pager.data_source_mut().clear_requests();
    pager.surface_mut().take_ops();

    pager.reload();

    assert_eq!(
        pager.data_source().requested_indices(),
        vec![3, 4, 5, 3, 4, 5]
    );
    assert_eq!(pager.stats().stale_reloads_discarded, 1);
    let offsets: Vec<SurfaceOp> = pager
        .surface_mut()
        .take_ops()
        .into_iter()
        .filter(|op| matches!(op, SurfaceOp::ScrollOffset { .. }))
        .collect();
    assert_eq!(
        offsets,
        vec![SurfaceOp::ScrollOffset {
            offset: 4.0 * STRIDE,
            animated: false
        }]
    );
    assert_eq!(pager.visible_indices().as_slice(), &[3, 4, 5]);
    assert_eq!(pager.phase(), PagingPhase::Loaded);
    check(&pager);
}

#[test]
fn settling_after_a_long_drag_notifies_once() {
    let mut pager = loaded(10, 0);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    pager.add_page_change_listener(move |change: PageChange| sink.borrow_mut().push(change.current));

    for step in 1..=12 {
        pager.scroll_position_changed(step as f32 * 100.0);
    }
    pager.scroll_ended();

    assert_eq!(*changes.borrow(), vec![4]);
}

#[test]
fn disposal_drops_everything_and_ignores_events() {
    let mut pager = loaded(10, 3);
    pager.set_current_index(9, false);
    assert_eq!(pager.pool().len(), 1);

    pager.dispose_for_memory_pressure();

    assert!(pager.is_disposed());
    assert!(pager.visible_indices().is_empty());
    assert!(pager.pool().is_empty());
    assert_eq!(pager.surface().attached_count(), 0);
    assert_eq!(pager.page_count(), 0);

    let ops = pager.surface().ops().len();
    pager.dispose_for_memory_pressure();
    pager.scroll_position_changed(STRIDE);
    pager.size_changed(LANDSCAPE);
    pager.set_current_index(1, false);
    assert_eq!(pager.surface().ops().len(), ops, "disposed engine stays quiet");
    assert_eq!(pager.current_index(), 9);
    check(&pager);
}

#[test]
fn reload_after_disposal_rebuilds_the_window() {
    let mut pager = loaded(10, 3);
    pager.dispose_for_memory_pressure();
    let created = pager.data_source().created();

    pager.reload();

    assert_eq!(pager.phase(), PagingPhase::Loaded);
    assert_eq!(pager.visible_indices().as_slice(), &[2, 3, 4]);
    assert_eq!(pager.data_source().created(), created + 3);
    check(&pager);
}

#[test]
fn empty_data_source_binds_nothing() {
    let mut pager = loaded(0, 0);

    assert!(pager.visible_indices().is_empty());
    assert_eq!(pager.surface().content_extent(), 0.0);

    pager.set_current_index(2, false);
    pager.move_to_next_page(false);
    pager.size_changed(LANDSCAPE);

    assert_eq!(pager.scroll_offset(), 0.0);
    assert!(pager.data_source().requests().is_empty());
    check(&pager);
}

#[test]
fn negative_page_count_is_treated_as_empty() {
    let pager = loaded(-5, 0);

    assert_eq!(pager.page_count(), 0);
    assert!(pager.visible_indices().is_empty());
    assert_eq!(pager.stats().contract_violations, 1);
    check(&pager);
}

#[test]
fn navigation_helpers_step_one_page() {
    let mut pager = loaded(3, 0);

    pager.move_to_next_page(false);
    pager.move_to_next_page(false);
    pager.move_to_next_page(false);
    assert_eq!(pager.current_index(), 2);
    assert!(!pager.has_next());

    pager.move_to_previous_page(true);
    assert_eq!(pager.phase(), PagingPhase::Scrolling);
    assert_eq!(
        pager.surface().ops().last(),
        Some(&SurfaceOp::ScrollOffset {
            offset: STRIDE,
            animated: true
        })
    );
    pager.scroll_ended();
    assert_eq!(pager.phase(), PagingPhase::Settled);
    assert_eq!(pager.current_index(), 1);
}

#[test]
fn wider_window_binds_more_neighbours() {
    let mut pager = test_controller_with(
        PagingConfig::default()
            .with_window_radius(2)
            .with_initial_index(5),
        10,
    );
    pager.reload();

    assert_eq!(pager.visible_indices().as_slice(), &[3, 4, 5, 6, 7]);
    drag_to(&mut pager, 9);
    assert_eq!(pager.visible_indices().as_slice(), &[7, 8, 9]);
    check(&pager);
}
