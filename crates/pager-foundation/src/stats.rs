/// Statistics about page view lifecycle.
///
/// Used for testing and debugging recycling behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PagingStats {
    /// Views currently bound to visible-window pages.
    pub views_in_use: usize,

    /// Views parked in the reuse pool.
    pub views_in_pool: usize,

    /// Distinct view instances the controller has seen since the last
    /// teardown.
    pub total_created: usize,

    /// Views handed out again by the pool.
    pub reuse_count: usize,

    /// Data source contract violations that were clamped or rejected.
    pub contract_violations: usize,

    /// Reloads abandoned because a newer one superseded them.
    pub stale_reloads_discarded: usize,
}
