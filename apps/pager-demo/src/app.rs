//! Scripted paging session over text pages.

mod console_surface;
mod text_page;

use std::cell::RefCell;
use std::rc::Rc;

use pager_core::Size;
use pager_foundation::{PageChange, PagingConfig, PagingStats, PagingWindowController};

pub use console_surface::ConsoleSurface;
pub use text_page::{TextPageSource, TextPageView, TEXT_PAGE};

pub type DemoPager = PagingWindowController<TextPageView, TextPageSource, ConsoleSurface>;

pub const PORTRAIT: Size = Size::new(390.0, 844.0);
pub const LANDSCAPE: Size = Size::new(844.0, 390.0);

/// Gap between pages.
const PAGE_MARGIN: f32 = 16.0;

/// Drag events delivered per swipe.
const SWIPE_STEPS: usize = 4;

/// What a scripted session ended with.
#[derive(Debug)]
pub struct SessionReport {
    pub final_index: usize,
    pub page_count: usize,
    pub page_changes: Vec<PageChange>,
    pub stats: PagingStats,
    pub views_constructed: usize,
}

pub fn build_pager(page_count: usize) -> DemoPager {
    let config = PagingConfig::default()
        .with_reuse_identifier(TEXT_PAGE)
        .with_page_margin(PAGE_MARGIN);
    let source = TextPageSource::new(page_count).with_slow_pages(4);
    PagingWindowController::new(config, source, ConsoleSurface::new())
}

/// Drags one page forward (or back) in a few steps, then lets it settle.
pub fn swipe(pager: &mut DemoPager, forward: bool) {
    let can_move = if forward {
        pager.has_next()
    } else {
        pager.has_previous()
    };
    if !can_move {
        log::info!("swipe ignored at page {}", pager.current_index());
        return;
    }

    let stride = pager.geometry().stride();
    let start = pager.scroll_offset();
    let delta = if forward { stride } else { -stride };
    for step in 1..=SWIPE_STEPS {
        let progress = step as f32 / SWIPE_STEPS as f32;
        pager.scroll_position_changed(start + delta * progress);
    }
    pager.scroll_ended();
}

/// Swaps loading placeholders for their real content, in place.
pub fn deliver_loaded_content(pager: &mut DemoPager) {
    let page_count = pager.page_count();
    let arrived = pager.data_source_mut().take_pending();
    for index in arrived {
        let delivered =
            pager.update_visible_view(index, |view| view.show_page(index, page_count));
        if delivered.is_none() {
            log::debug!("page {index} left the window before its content arrived");
        }
    }
}

/// Runs the demo script: load, swipe, rotate, jump, memory warning, reload.
pub fn run_scripted_session(page_count: usize) -> SessionReport {
    let mut pager = build_pager(page_count);
    let page_changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&page_changes);
    pager.add_page_change_listener(move |change: PageChange| {
        log::info!("did change page: {:?} -> {}", change.previous, change.current);
        sink.borrow_mut().push(change);
    });

    log::info!("== load {page_count} pages");
    pager.size_changed(PORTRAIT);
    pager.reload();
    deliver_loaded_content(&mut pager);

    log::info!("== swipe forward three times");
    for _ in 0..3 {
        swipe(&mut pager, true);
        deliver_loaded_content(&mut pager);
    }

    log::info!("== rotate to landscape");
    pager.begin_size_change();
    pager.finish_size_change(LANDSCAPE);

    log::info!("== jump to the last page");
    pager.set_current_index(page_count.saturating_sub(1), true);
    pager.scroll_ended();
    deliver_loaded_content(&mut pager);

    log::info!("== swipe back, rotate to portrait");
    swipe(&mut pager, false);
    pager.size_changed(PORTRAIT);
    deliver_loaded_content(&mut pager);

    log::info!("== memory warning");
    pager.dispose_for_memory_pressure();

    log::info!("== host recreated its views, reload");
    pager.reload();
    deliver_loaded_content(&mut pager);

    let report = SessionReport {
        final_index: pager.current_index(),
        page_count: pager.page_count(),
        page_changes: page_changes.borrow().clone(),
        stats: pager.stats(),
        views_constructed: pager.data_source().constructed(),
    };
    log::info!(
        "session finished on page {} of {}: {:?}",
        report.final_index,
        report.page_count,
        report.stats
    );
    report
}
