use crate::page::ViewId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    /// The data source reported a page count below zero.
    NegativePageCount { reported: isize },
    /// The data source returned a view that is still bound to another page.
    ViewAlreadyBound {
        view: ViewId,
        requested: usize,
        bound_to: usize,
    },
    /// A view was retired while it was already sitting in the pool.
    DuplicateRetire { view: ViewId },
    /// A reload was completed with a ticket older than the latest one.
    StaleReload { ticket: u64, current: u64 },
    /// The engine was torn down.
    Disposed,
}

impl std::fmt::Display for PagingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PagingError::NegativePageCount { reported } => {
                write!(f, "data source reported negative page count {reported}")
            }
            PagingError::ViewAlreadyBound {
                view,
                requested,
                bound_to,
            } => write!(
                f,
                "{view} returned for page {requested} is still bound to page {bound_to}"
            ),
            PagingError::DuplicateRetire { view } => {
                write!(f, "{view} retired while already pooled")
            }
            PagingError::StaleReload { ticket, current } => {
                write!(f, "reload generation {ticket} superseded by {current}")
            }
            PagingError::Disposed => write!(f, "paging engine disposed"),
        }
    }
}

impl std::error::Error for PagingError {}
