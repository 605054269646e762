//! View reuse primitives for the Pager paging engine
//!
//! This crate holds the pieces that do not know about scrolling: the
//! [`PageView`] capability set, the [`ReusePool`] retired views wait in,
//! geometry primitives, and the shared error type.

pub mod collections;
mod error;
mod geometry;
mod owned;
mod page;
mod reuse_pool;

pub use error::*;
pub use geometry::*;
pub use owned::*;
pub use page::*;
pub use reuse_pool::*;

pub mod prelude {
    pub use crate::error::PagingError;
    pub use crate::geometry::{Rect, Size};
    pub use crate::owned::Owned;
    pub use crate::page::{PageView, ReuseIdentifier, ViewId};
    pub use crate::reuse_pool::ReusePool;
}
