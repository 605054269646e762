//! Windowed page recycling for horizontally paginated scroll surfaces.
//!
//! Only a small constant number of page views exist at any time, however
//! many pages the data source reports. The pieces:
//!
//! - [`PagingWindowController`] - keeps the window of bound pages in sync
//!   with scrolling, reloads and size changes
//! - [`PageDataSource`] - page count and view factory supplied by the app
//! - [`ScrollSurface`] - layout effects applied by the host scroll view
//! - [`ReusePool`](pager_core::ReusePool) - where views wait between pages
//!
//! # Example
//!
//! ```rust,ignore
//! use pager_foundation::{PagingConfig, PagingWindowController};
//!
//! let mut pager = PagingWindowController::new(PagingConfig::default(), source, surface);
//! pager.size_changed(Size::new(320.0, 480.0));
//! pager.reload();
//! pager.scroll_position_changed(330.0);
//! pager.scroll_ended();
//! assert_eq!(pager.current_index(), 1);
//! ```

mod config;
mod controller;
mod data_source;
mod events;
mod geometry;
mod reload;
mod stats;
mod surface;
mod transition;
mod window;

pub use config::*;
pub use controller::*;
pub use data_source::*;
pub use events::{PagingEvent, PagingEventSender};
pub use geometry::*;
pub use reload::ReloadTicket;
pub use stats::*;
pub use surface::*;
pub use transition::*;
pub use window::*;

pub mod prelude {
    pub use crate::config::PagingConfig;
    pub use crate::controller::{PageChange, PagingPhase, PagingWindowController};
    pub use crate::data_source::PageDataSource;
    pub use crate::events::{PagingEvent, PagingEventSender};
    pub use crate::surface::ScrollSurface;
    pub use pager_core::prelude::*;
}
