//! Data source trait for paging surfaces.
//!
//! This module defines the [`PageDataSource`] trait the controller calls to
//! learn how many pages exist and to obtain a view for a page.

use pager_core::{PageView, ReusePool};

/// Supplies page count and page views to a
/// [`PagingWindowController`](crate::PagingWindowController).
///
/// Implementations configure content only. Attaching, detaching and
/// positioning views is the controller's job, and the controller writes the
/// page index after `view_for_index` returns.
pub trait PageDataSource<V: PageView> {
    /// Number of pages. Queried once per reload.
    ///
    /// Negative values violate the contract; the controller treats them as
    /// zero.
    fn page_count(&self) -> isize;

    /// Returns a view configured for `index`.
    ///
    /// Dequeue a compatible view from `pool` when one exists, otherwise
    /// construct a new one. Never return a view that is currently bound to
    /// another visible page.
    fn view_for_index(&mut self, index: usize, pool: &mut ReusePool<V>) -> V;

    /// Constructs a brand new view for `index`.
    ///
    /// Used when `view_for_index` hands back a view the controller has to
    /// reject. The returned view must not be shared with any other page.
    fn placeholder_view(&mut self, index: usize) -> V;
}
