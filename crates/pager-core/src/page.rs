//! The page view capability set.
//!
//! A page view is anything the paging engine can bind to a logical page,
//! hand to the host surface, and later park in a [`ReusePool`](crate::ReusePool).
//! Views are usually cheap handles (see [`Owned`](crate::Owned)) so identity is
//! tracked through [`ViewId`] rather than through the value itself.

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity of a page view instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

impl ViewId {
    /// Allocates a process-unique id. Call once per constructed view.
    pub fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Tag grouping interchangeable views inside a reuse pool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReuseIdentifier(Rc<str>);

impl ReuseIdentifier {
    pub fn new(identifier: impl AsRef<str>) -> Self {
        Self(Rc::from(identifier.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ReuseIdentifier {
    fn default() -> Self {
        Self::new(DEFAULT_REUSE_IDENTIFIER)
    }
}

/// Identifier used for plain pages when nothing else is configured.
pub const DEFAULT_REUSE_IDENTIFIER: &str = "page";

impl Borrow<str> for ReuseIdentifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReuseIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ReuseIdentifier {
    fn from(value: String) -> Self {
        Self(Rc::from(value))
    }
}

impl fmt::Display for ReuseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A view that can display one logical page at a time.
///
/// The reuse identifier must not change over the lifetime of the view. The
/// page index is written by the paging controller every time the view is
/// bound to a page.
pub trait PageView {
    fn view_id(&self) -> ViewId;

    fn reuse_identifier(&self) -> ReuseIdentifier;

    /// The page this view was last bound to, `None` before the first bind.
    fn page_index(&self) -> Option<usize>;

    fn set_page_index(&mut self, index: usize);

    /// Clears content bound to the previous page before the view is pooled.
    fn prepare_for_reuse(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::map::HashMap;

    #[test]
    fn view_ids_are_unique() {
        let a = ViewId::next();
        let b = ViewId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn identifier_lookup_by_str() {
        let mut map: HashMap<ReuseIdentifier, usize> = HashMap::default();
        map.insert(ReuseIdentifier::from("page"), 3);
        assert_eq!(map.get("page"), Some(&3));
        assert_eq!(ReuseIdentifier::default().as_str(), DEFAULT_REUSE_IDENTIFIER);
    }
}
