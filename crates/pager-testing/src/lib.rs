//! Testing doubles and assertions for the Pager paging engine

pub mod assertions;
mod data_source;
mod page_view;
mod surface;

pub use assertions::{assert_approx_eq, assert_surface_in_sync, assert_window_invariants};
pub use data_source::*;
pub use page_view::*;
pub use surface::*;

use pager_core::Size;
use pager_foundation::{PagingConfig, PagingWindowController};

/// Controller wired to the test doubles.
pub type TestController = PagingWindowController<TestPageView, TestDataSource, RecordingSurface>;

/// Portrait phone viewport used by the scenario tests.
pub const PORTRAIT: Size = Size::new(320.0, 480.0);

/// Landscape counterpart of [`PORTRAIT`].
pub const LANDSCAPE: Size = Size::new(480.0, 320.0);

/// An uninitialized controller over `page_count` pages with a portrait viewport.
pub fn test_controller(page_count: isize) -> TestController {
    test_controller_with(PagingConfig::default(), page_count)
}

/// Like [`test_controller`] with a custom config; a zero viewport is
/// replaced with [`PORTRAIT`].
pub fn test_controller_with(mut config: PagingConfig, page_count: isize) -> TestController {
    if config.viewport_size == Size::ZERO {
        config.viewport_size = PORTRAIT;
    }
    let data_source = TestDataSource::with_identifier(page_count, config.reuse_identifier.clone());
    PagingWindowController::new(config, data_source, RecordingSurface::new())
}

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::{
        test_controller, test_controller_with, RecordingSurface, SurfaceOp, TestController,
        TestDataSource, TestPageView, ViewRequest, LANDSCAPE, PORTRAIT,
    };
}
