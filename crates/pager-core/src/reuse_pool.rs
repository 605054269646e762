//! Pool of retired page views.
//!
//! Views leaving the visible window are parked here, grouped by reuse
//! identifier, until a data source asks for one again. The pool never evicts
//! on its own: at steady state it holds at most one window's worth of views
//! because every retire is paired with a later dequeue.

use smallvec::SmallVec;

use crate::collections::map::{HashMap, HashSet};
use crate::error::PagingError;
use crate::page::{PageView, ReuseIdentifier, ViewId};

/// Counters describing pool traffic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReusePoolStats {
    /// Views handed to [`ReusePool::retire`] and accepted.
    pub retired: usize,
    /// Successful dequeues.
    pub reused: usize,
    /// Dequeues that found nothing and sent the caller off to construct.
    pub misses: usize,
}

/// Retired views keyed by reuse identifier.
pub struct ReusePool<V> {
    available: HashMap<ReuseIdentifier, SmallVec<[V; 4]>>,
    pooled_ids: HashSet<ViewId>,
    default_identifier: ReuseIdentifier,
    stats: ReusePoolStats,
}

impl<V: PageView> Default for ReusePool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PageView> ReusePool<V> {
    pub fn new() -> Self {
        Self::with_default_identifier(ReuseIdentifier::default())
    }

    /// Creates a pool whose [`dequeue_default`](Self::dequeue_default) uses `identifier`.
    pub fn with_default_identifier(identifier: ReuseIdentifier) -> Self {
        Self {
            available: HashMap::default(),
            pooled_ids: HashSet::default(),
            default_identifier: identifier,
            stats: ReusePoolStats::default(),
        }
    }

    /// The page-kind identifier configured for this surface.
    pub fn default_identifier(&self) -> &ReuseIdentifier {
        &self.default_identifier
    }

    /// Clears the view's bound content and parks it under its identifier.
    ///
    /// A view that is already pooled is rejected and the duplicate handle is
    /// dropped; the pooled copy stays available.
    pub fn retire(&mut self, mut view: V) -> Result<(), PagingError> {
        let id = view.view_id();
        if self.pooled_ids.contains(&id) {
            log::error!("ReusePool: {id} retired twice");
            return Err(PagingError::DuplicateRetire { view: id });
        }

        view.prepare_for_reuse();
        let identifier = view.reuse_identifier();
        log::trace!("ReusePool: retire {id} under '{identifier}'");
        self.pooled_ids.insert(id);
        self.available.entry(identifier).or_default().push(view);
        self.stats.retired += 1;
        Ok(())
    }

    /// Removes and returns any pooled view carrying `identifier`.
    pub fn dequeue(&mut self, identifier: &str) -> Option<V> {
        let view = self
            .available
            .get_mut(identifier)
            .and_then(|views| views.pop());

        match view {
            Some(view) => {
                self.pooled_ids.remove(&view.view_id());
                self.stats.reused += 1;
                Some(view)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Dequeues with the pool's default identifier.
    pub fn dequeue_default(&mut self) -> Option<V> {
        let identifier = self.default_identifier.clone();
        self.dequeue(identifier.as_str())
    }

    /// Dequeues a view for `identifier`, constructing one with `make` when the
    /// pool has none.
    pub fn dequeue_or_else(&mut self, identifier: &str, make: impl FnOnce() -> V) -> V {
        self.dequeue(identifier).unwrap_or_else(make)
    }

    /// Pulls a specific view out of the pool.
    ///
    /// Used when a collaborator hands back a pooled view without dequeuing it.
    pub fn take(&mut self, id: ViewId) -> Option<V> {
        if !self.pooled_ids.remove(&id) {
            return None;
        }
        for views in self.available.values_mut() {
            if let Some(position) = views.iter().position(|view| view.view_id() == id) {
                return Some(views.swap_remove(position));
            }
        }
        None
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.pooled_ids.contains(&id)
    }

    /// Total number of pooled views.
    pub fn len(&self) -> usize {
        self.pooled_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pooled_ids.is_empty()
    }

    /// Number of pooled views carrying `identifier`.
    pub fn len_for(&self, identifier: &str) -> usize {
        self.available.get(identifier).map_or(0, |views| views.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.available.values().flat_map(|views| views.iter())
    }

    pub fn stats(&self) -> ReusePoolStats {
        self.stats
    }

    /// Drops every pooled view.
    pub fn clear(&mut self) {
        let dropped = self.pooled_ids.len();
        self.available.clear();
        self.pooled_ids.clear();
        if dropped > 0 {
            log::debug!("ReusePool: cleared {dropped} views");
        }
    }
}
