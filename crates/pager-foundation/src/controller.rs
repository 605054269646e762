//! Windowed page recycling controller.
//!
//! [`PagingWindowController`] keeps a small contiguous window of pages bound
//! to live views around the current page. Scrolling recomputes the window
//! and diffs it against the previous one: pages leaving are detached and
//! retired into the [`ReusePool`], pages entering get a view from the
//! [`PageDataSource`] (which normally dequeues one of the retired views), and
//! pages present in both are left alone.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ─reload─▶ Loaded ─scroll─▶ Scrolling ◀─▶ Settled
//!                            ▲                              │
//!                            └──────── Reloading ◀─reload───┘
//! any state ─dispose_for_memory_pressure─▶ Disposed ─reload─▶ Loaded
//! ```
//!
//! All work happens synchronously on the caller's thread. Collaborators that
//! need to feed events back while the controller is calling them post
//! through a [`PagingEventSender`]; posted events run, in order, as soon as
//! the current one has finished.

use std::rc::Rc;

use pager_core::collections::map::HashSet;
use pager_core::{PageView, PagingError, ReusePool, Size, ViewId};
use smallvec::SmallVec;

use crate::config::PagingConfig;
use crate::data_source::PageDataSource;
use crate::events::{EventMailbox, PagingEvent, PagingEventSender};
use crate::geometry::PageGeometry;
use crate::reload::{ReloadGenerations, ReloadTicket};
use crate::stats::PagingStats;
use crate::surface::ScrollSurface;
use crate::transition::SizeTransition;
use crate::window::PageWindow;

/// Where the controller is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagingPhase {
    /// Created, nothing loaded yet.
    Uninitialized,
    /// A reload finished and no scrolling has happened since.
    Loaded,
    /// A drag, deceleration or animated page change is in progress.
    Scrolling,
    /// Scrolling finished on a single page.
    Settled,
    /// Views were retired and the new page count has not been applied yet.
    Reloading,
    /// Torn down after memory pressure.
    Disposed,
}

/// Payload of the "did change page" notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageChange {
    /// The page last reported, `None` for the first report.
    pub previous: Option<usize>,
    pub current: usize,
}

/// Handle returned by [`PagingWindowController::add_page_change_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct BoundPage<V> {
    index: usize,
    view: V,
}

/// Keeps a bounded window of recycled views in sync with the scroll position.
pub struct PagingWindowController<V, D, S> {
    config: PagingConfig,
    data_source: D,
    surface: S,
    pool: ReusePool<V>,
    phase: PagingPhase,
    page_count: usize,
    current_index: usize,
    window: PageWindow,
    /// Bound pages sorted by index; keys always match `window` except for a
    /// page whose placeholder was rejected as well.
    bound: SmallVec<[BoundPage<V>; 3]>,
    geometry: PageGeometry,
    scroll_offset: f32,
    pending_transition: Option<SizeTransition>,
    /// Page an animated jump is heading to. Offsets reported on the way only
    /// update `scroll_offset`.
    animation_target: Option<usize>,
    reloads: ReloadGenerations,
    mailbox: EventMailbox,
    has_loaded: bool,
    last_notified_index: Option<usize>,
    listeners: Vec<(ListenerId, Rc<dyn Fn(PageChange)>)>,
    next_listener_id: u64,
    seen_views: HashSet<ViewId>,
    contract_violations: usize,
    stale_reloads_discarded: usize,
}

impl<V, D, S> PagingWindowController<V, D, S>
where
    V: PageView,
    D: PageDataSource<V>,
    S: ScrollSurface<V>,
{
    /// Creates an uninitialized controller. Nothing is bound until the first
    /// [`reload`](Self::reload).
    pub fn new(config: PagingConfig, data_source: D, surface: S) -> Self {
        let geometry = PageGeometry::new(config.viewport_size, config.page_margin);
        let pool = ReusePool::with_default_identifier(config.reuse_identifier.clone());
        let current_index = config.initial_index;
        Self {
            config,
            data_source,
            surface,
            pool,
            phase: PagingPhase::Uninitialized,
            page_count: 0,
            current_index,
            window: PageWindow::EMPTY,
            bound: SmallVec::new(),
            geometry,
            scroll_offset: 0.0,
            pending_transition: None,
            animation_target: None,
            reloads: ReloadGenerations::default(),
            mailbox: EventMailbox::default(),
            has_loaded: false,
            last_notified_index: None,
            listeners: Vec::new(),
            next_listener_id: 1,
            seen_views: HashSet::default(),
            contract_violations: 0,
            stale_reloads_discarded: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Inbound events
    // ─────────────────────────────────────────────────────────────────────

    /// Retires every bound view, re-queries the page count and rebuilds the
    /// window around the current page (clamped to the new count).
    pub fn reload(&mut self) {
        self.dispatch(PagingEvent::Reload);
    }

    /// The host scroll surface moved to `offset`.
    pub fn scroll_position_changed(&mut self, offset: f32) {
        self.dispatch(PagingEvent::ScrollPositionChanged { offset });
    }

    /// The drag or deceleration ended; fires "did change page" if the
    /// settled page differs from the last one reported.
    pub fn scroll_ended(&mut self) {
        self.dispatch(PagingEvent::ScrollEnded);
    }

    /// Jumps to `index`, clamped to the available pages.
    ///
    /// Non-animated jumps settle immediately. Animated jumps move the window
    /// to `index` right away and settle when the host reports
    /// [`scroll_ended`](Self::scroll_ended); offsets reported while the
    /// animation runs leave the window alone.
    pub fn set_current_index(&mut self, index: usize, animated: bool) {
        self.dispatch(PagingEvent::SetCurrentIndex { index, animated });
    }

    /// Phase one of a size change: remember where the user is.
    pub fn begin_size_change(&mut self) {
        self.dispatch(PagingEvent::BeginSizeChange);
    }

    /// Phase two of a size change: apply the new geometry and restore the
    /// position recorded by [`begin_size_change`](Self::begin_size_change).
    pub fn finish_size_change(&mut self, size: Size) {
        self.dispatch(PagingEvent::SizeChanged { size });
    }

    /// Both phases of a size change in one call.
    pub fn size_changed(&mut self, size: Size) {
        self.mailbox.post(PagingEvent::BeginSizeChange);
        self.dispatch(PagingEvent::SizeChanged { size });
    }

    /// Drops all views and empties the pool. Idempotent.
    pub fn dispose_for_memory_pressure(&mut self) {
        self.dispatch(PagingEvent::DisposeForMemoryPressure);
    }

    /// Runs events posted through [`event_sender`](Self::event_sender) from
    /// outside any controller call.
    pub fn process_pending_events(&mut self) {
        self.drain_events();
    }

    pub fn move_to_next_page(&mut self, animated: bool) {
        if self.has_next() {
            self.set_current_index(self.current_index + 1, animated);
        }
    }

    pub fn move_to_previous_page(&mut self, animated: bool) {
        if self.has_previous() {
            self.set_current_index(self.current_index - 1, animated);
        }
    }

    /// First half of a reload: retires every bound view and returns a ticket
    /// for [`finish_reload`](Self::finish_reload).
    ///
    /// Starting another reload before finishing this one supersedes it.
    pub fn begin_reload(&mut self) -> ReloadTicket {
        let ticket = self.start_reload();
        self.drain_events();
        ticket
    }

    /// Second half of a reload: queries the page count and binds the new
    /// window.
    ///
    /// Fails with [`PagingError::StaleReload`] when a newer reload started in
    /// the meantime or `ticket` was already finished, and with [`PagingError::Disposed`] when the engine was
    /// torn down.
    pub fn finish_reload(&mut self, ticket: ReloadTicket) -> Result<(), PagingError> {
        let result = self.complete_reload(ticket);
        self.drain_events();
        result
    }

    // ─────────────────────────────────────────────────────────────────────
    // Observers
    // ─────────────────────────────────────────────────────────────────────

    /// Registers a callback fired once per settle onto a new page.
    pub fn add_page_change_listener(
        &mut self,
        listener: impl Fn(PageChange) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn remove_page_change_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Handle collaborators use to post events while the controller is busy.
    pub fn event_sender(&self) -> PagingEventSender {
        self.mailbox.sender()
    }

    // ─────────────────────────────────────────────────────────────────────
    // State
    // ─────────────────────────────────────────────────────────────────────

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn phase(&self) -> PagingPhase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == PagingPhase::Disposed
    }

    pub fn has_next(&self) -> bool {
        self.page_count > 0 && self.current_index + 1 < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page_count > 0 && self.current_index > 0
    }

    /// The window the controller is maintaining.
    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    /// Indices that currently have a bound view, ascending.
    pub fn visible_indices(&self) -> SmallVec<[usize; 3]> {
        self.bound.iter().map(|page| page.index).collect()
    }

    /// Bound pages and their views, ascending by index.
    pub fn visible_views(&self) -> impl Iterator<Item = (usize, &V)> {
        self.bound.iter().map(|page| (page.index, &page.view))
    }

    pub fn visible_view(&self, index: usize) -> Option<&V> {
        self.bound
            .iter()
            .find(|page| page.index == index)
            .map(|page| &page.view)
    }

    /// Mutable access to a bound view, e.g. to swap placeholder content for
    /// loaded content without going through retirement.
    pub fn visible_view_mut(&mut self, index: usize) -> Option<&mut V> {
        self.bound
            .iter_mut()
            .find(|page| page.index == index)
            .map(|page| &mut page.view)
    }

    pub fn update_visible_view<R>(&mut self, index: usize, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.visible_view_mut(index).map(f)
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    pub fn pool(&self) -> &ReusePool<V> {
        &self.pool
    }

    pub fn data_source(&self) -> &D {
        &self.data_source
    }

    pub fn data_source_mut(&mut self) -> &mut D {
        &mut self.data_source
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn stats(&self) -> PagingStats {
        PagingStats {
            views_in_use: self.bound.len(),
            views_in_pool: self.pool.len(),
            total_created: self.seen_views.len(),
            reuse_count: self.pool.stats().reused,
            contract_violations: self.contract_violations,
            stale_reloads_discarded: self.stale_reloads_discarded,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event processing
    // ─────────────────────────────────────────────────────────────────────

    fn dispatch(&mut self, event: PagingEvent) {
        self.mailbox.post(event);
        self.drain_events();
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.mailbox.pop() {
            self.handle(event);
        }
    }

    fn handle(&mut self, event: PagingEvent) {
        match event {
            PagingEvent::Reload => {
                let ticket = self.start_reload();
                if let Err(err) = self.complete_reload(ticket) {
                    log::debug!("PagingWindow: reload abandoned: {err}");
                }
            }
            PagingEvent::ScrollPositionChanged { offset } => self.handle_scroll(offset),
            PagingEvent::ScrollEnded => self.handle_scroll_ended(),
            PagingEvent::SetCurrentIndex { index, animated } => {
                self.handle_set_current_index(index, animated)
            }
            PagingEvent::BeginSizeChange => self.handle_begin_size_change(),
            PagingEvent::SizeChanged { size } => self.handle_size_changed(size),
            PagingEvent::DisposeForMemoryPressure => self.handle_dispose(),
        }
    }

    fn start_reload(&mut self) -> ReloadTicket {
        let ticket = self.reloads.begin();
        log::debug!(
            "PagingWindow: reload generation {} started",
            ticket.generation()
        );
        self.retire_all();
        self.window = PageWindow::EMPTY;
        self.animation_target = None;
        self.phase = PagingPhase::Reloading;
        ticket
    }

    fn complete_reload(&mut self, ticket: ReloadTicket) -> Result<(), PagingError> {
        if self.phase == PagingPhase::Disposed {
            return Err(PagingError::Disposed);
        }
        if let Err(err) = self.reloads.claim(ticket) {
            self.stale_reloads_discarded += 1;
            return Err(err);
        }

        let page_count = self.query_page_count();
        let requested = self.current_index;
        let current = requested.min(page_count.saturating_sub(1));
        if current != requested {
            log::debug!(
                "PagingWindow: page {requested} gone after reload, clamped to {current}"
            );
        }
        self.page_count = page_count;
        self.current_index = current;
        self.surface
            .set_content_extent(self.geometry.content_extent(page_count));

        let target = PageWindow::around(current, self.config.window_radius, page_count);
        self.window = target.clone();
        for index in target.iter() {
            if self.mailbox.has_pending_reload() {
                self.window = target.truncated(index);
                return Err(self.abandon_superseded(ticket));
            }
            self.bind_index(index);
        }
        if self.mailbox.has_pending_reload() {
            return Err(self.abandon_superseded(ticket));
        }

        self.scroll_offset = self.geometry.offset_for_index(current);
        self.surface.set_scroll_offset(self.scroll_offset, false);
        self.phase = PagingPhase::Loaded;
        log::debug!(
            "PagingWindow: reload generation {} loaded {page_count} pages, window {:?}",
            ticket.generation(),
            self.window.range()
        );

        if self.has_loaded {
            self.notify_if_changed();
        } else {
            self.has_loaded = true;
            self.last_notified_index = (page_count > 0).then_some(current);
        }
        Ok(())
    }

    /// Gives up on `ticket` once a newer reload is queued. Views already
    /// bound stay until that reload retires them.
    fn abandon_superseded(&mut self, ticket: ReloadTicket) -> PagingError {
        self.stale_reloads_discarded += 1;
        log::debug!(
            "PagingWindow: reload generation {} superseded after binding {:?}",
            ticket.generation(),
            self.window.range()
        );
        PagingError::StaleReload {
            ticket: ticket.generation(),
            current: self.reloads.current() + 1,
        }
    }

    fn handle_scroll(&mut self, offset: f32) {
        if self.phase == PagingPhase::Disposed {
            log::warn!("PagingWindow: scroll to {offset} ignored, engine disposed");
            return;
        }
        if !offset.is_finite() {
            log::warn!("PagingWindow: ignoring non-finite scroll offset {offset}");
            return;
        }

        self.scroll_offset = offset;
        if matches!(
            self.phase,
            PagingPhase::Uninitialized | PagingPhase::Reloading
        ) {
            return;
        }

        self.phase = PagingPhase::Scrolling;
        if self.animation_target.is_some() {
            return;
        }
        self.follow_scroll_offset();
    }

    fn follow_scroll_offset(&mut self) {
        if let Some(index) = self.geometry.index_for_offset(self.scroll_offset, self.page_count) {
            if index != self.current_index {
                self.move_window(index);
            }
        }
    }

    fn handle_scroll_ended(&mut self) {
        let animation_target = self.animation_target.take();
        if self.phase != PagingPhase::Scrolling {
            return;
        }
        if let Some(target) = animation_target {
            let landed = self.geometry.index_for_offset(self.scroll_offset, self.page_count);
            if landed != Some(target) {
                log::debug!(
                    "PagingWindow: animated jump to {target} ended on page {landed:?}"
                );
            }
            self.follow_scroll_offset();
        }
        self.phase = PagingPhase::Settled;
        self.notify_if_changed();
    }

    fn handle_set_current_index(&mut self, index: usize, animated: bool) {
        match self.phase {
            PagingPhase::Disposed => {
                log::warn!("PagingWindow: set_current_index({index}) ignored, engine disposed");
                return;
            }
            PagingPhase::Uninitialized | PagingPhase::Reloading => {
                // Applied, and clamped, by the next reload.
                self.current_index = index;
                return;
            }
            _ => {}
        }

        if self.page_count == 0 {
            log::warn!("PagingWindow: set_current_index({index}) with no pages");
            return;
        }

        let clamped = index.min(self.page_count - 1);
        if clamped != index {
            log::warn!(
                "PagingWindow: index {index} out of range for {} pages, clamped to {clamped}",
                self.page_count
            );
        }
        if clamped != self.current_index {
            self.move_window(clamped);
        }

        self.scroll_offset = self.geometry.offset_for_index(clamped);
        self.surface.set_scroll_offset(self.scroll_offset, animated);
        if animated {
            self.animation_target = Some(clamped);
            self.phase = PagingPhase::Scrolling;
        } else {
            self.animation_target = None;
            self.phase = PagingPhase::Settled;
            self.notify_if_changed();
        }
    }

    fn handle_begin_size_change(&mut self) {
        if self.phase == PagingPhase::Disposed {
            log::debug!("PagingWindow: size change ignored, engine disposed");
            return;
        }
        self.pending_transition = Some(SizeTransition::record(
            &self.geometry,
            self.scroll_offset,
            self.current_index,
        ));
    }

    fn handle_size_changed(&mut self, size: Size) {
        if self.phase == PagingPhase::Disposed {
            log::warn!("PagingWindow: size change to {size:?} ignored, engine disposed");
            self.pending_transition = None;
            return;
        }

        let transition = self.pending_transition.take().unwrap_or_else(|| {
            SizeTransition::record(&self.geometry, self.scroll_offset, self.current_index)
        });
        let geometry = PageGeometry::new(size, self.config.page_margin);
        if geometry == self.geometry {
            return;
        }
        self.geometry = geometry;

        if self.phase == PagingPhase::Uninitialized {
            return;
        }

        for page in &self.bound {
            self.surface
                .reposition(&page.view, geometry.slot_frame(page.index));
        }
        self.surface
            .set_content_extent(geometry.content_extent(self.page_count));
        self.scroll_offset = if self.page_count == 0 {
            0.0
        } else {
            transition.restored_offset(&geometry)
        };
        self.surface.set_scroll_offset(self.scroll_offset, false);
        log::debug!(
            "PagingWindow: resized to {}x{}, page {} restored at offset {}",
            size.width,
            size.height,
            self.current_index,
            self.scroll_offset
        );
    }

    fn handle_dispose(&mut self) {
        if self.phase == PagingPhase::Disposed {
            return;
        }

        for page in std::mem::take(&mut self.bound) {
            self.surface.detach(&page.view);
        }
        let pooled = self.pool.len();
        self.pool.clear();
        self.window = PageWindow::EMPTY;
        self.page_count = 0;
        self.pending_transition = None;
        self.animation_target = None;
        self.reloads.invalidate();
        self.seen_views.clear();
        self.phase = PagingPhase::Disposed;

        let ignored = self.mailbox.discard_pending();
        if ignored > 0 {
            log::warn!("PagingWindow: ignored {ignored} events posted during disposal");
        }
        log::debug!("PagingWindow: disposed, dropped {pooled} pooled views");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Window maintenance
    // ─────────────────────────────────────────────────────────────────────

    fn move_window(&mut self, new_current: usize) {
        let target = PageWindow::around(new_current, self.config.window_radius, self.page_count);
        let old = std::mem::replace(&mut self.window, target.clone());
        let leaving: SmallVec<[usize; 3]> = old.difference(&target).collect();
        let entering: SmallVec<[usize; 3]> = target.difference(&old).collect();

        for index in leaving {
            self.retire_index(index);
        }
        for index in entering {
            self.bind_index(index);
        }

        log::debug!(
            "PagingWindow: page {} -> {new_current}, window {:?}",
            self.current_index,
            target.range()
        );
        self.current_index = new_current;
    }

    fn bind_index(&mut self, index: usize) {
        let candidate = self.data_source.view_for_index(index, &mut self.pool);
        let mut view = match self.validate_view(index, candidate) {
            Ok(view) => view,
            Err(err) => {
                log::error!("PagingWindow: {err}; using a placeholder");
                self.contract_violations += 1;
                let placeholder = self.data_source.placeholder_view(index);
                match self.validate_view(index, placeholder) {
                    Ok(view) => view,
                    Err(err) => {
                        log::error!("PagingWindow: placeholder rejected ({err}), page {index} left empty");
                        self.contract_violations += 1;
                        return;
                    }
                }
            }
        };

        view.set_page_index(index);
        self.seen_views.insert(view.view_id());
        let slot = self.geometry.slot_frame(index);
        log::trace!("PagingWindow: bind page {index} to {} at {}", view.view_id(), slot.x);
        self.surface.attach(&view, slot);

        let position = self.bound.partition_point(|page| page.index < index);
        self.bound.insert(position, BoundPage { index, view });
    }

    /// Rejects views already bound elsewhere and reclaims views handed back
    /// straight out of the pool.
    fn validate_view(&mut self, index: usize, view: V) -> Result<V, PagingError> {
        let id = view.view_id();
        if let Some(page) = self.bound.iter().find(|page| page.view.view_id() == id) {
            return Err(PagingError::ViewAlreadyBound {
                view: id,
                requested: index,
                bound_to: page.index,
            });
        }
        if self.pool.take(id).is_some() {
            log::warn!("PagingWindow: {id} returned for page {index} without being dequeued");
        }
        Ok(view)
    }

    fn retire_index(&mut self, index: usize) {
        let Some(position) = self.bound.iter().position(|page| page.index == index) else {
            return;
        };
        let page = self.bound.remove(position);
        self.retire_view(page);
    }

    fn retire_all(&mut self) {
        for page in std::mem::take(&mut self.bound) {
            self.retire_view(page);
        }
    }

    fn retire_view(&mut self, page: BoundPage<V>) {
        self.surface.detach(&page.view);
        log::trace!(
            "PagingWindow: retire page {} ({})",
            page.index,
            page.view.view_id()
        );
        if let Err(err) = self.pool.retire(page.view) {
            log::error!("PagingWindow: {err}");
            self.contract_violations += 1;
        }
    }

    fn query_page_count(&mut self) -> usize {
        let reported = self.data_source.page_count();
        match usize::try_from(reported) {
            Ok(count) => count,
            Err(_) => {
                let err = PagingError::NegativePageCount { reported };
                log::error!("PagingWindow: {err}, treating as 0");
                self.contract_violations += 1;
                0
            }
        }
    }

    fn notify_if_changed(&mut self) {
        if self.page_count == 0 || self.last_notified_index == Some(self.current_index) {
            return;
        }

        let change = PageChange {
            previous: self.last_notified_index,
            current: self.current_index,
        };
        self.last_notified_index = Some(self.current_index);
        log::debug!("PagingWindow: did change page to {}", change.current);

        let listeners: SmallVec<[Rc<dyn Fn(PageChange)>; 2]> = self
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(change);
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
