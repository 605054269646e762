//! Reload generations.
//!
//! Every reload takes a ticket from a monotonically increasing counter. Work
//! tagged with a ticket older than the latest one belongs to a superseded
//! reload and is dropped. A ticket completes at most once.

use pager_core::PagingError;

/// Handle for one reload, returned by
/// [`begin_reload`](crate::PagingWindowController::begin_reload).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReloadTicket {
    generation: u64,
}

impl ReloadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub(crate) struct ReloadGenerations {
    current: u64,
    /// Last generation whose ticket was claimed for completion.
    claimed: u64,
}

impl ReloadGenerations {
    pub(crate) fn begin(&mut self) -> ReloadTicket {
        self.current += 1;
        ReloadTicket {
            generation: self.current,
        }
    }

    /// Bumps the generation without handing out a ticket, staling every
    /// outstanding one.
    pub(crate) fn invalidate(&mut self) {
        self.current += 1;
    }

    pub(crate) fn current(&self) -> u64 {
        self.current
    }

    /// Accepts `ticket` for completion if it is the latest one and has not
    /// been claimed before.
    pub(crate) fn claim(&mut self, ticket: ReloadTicket) -> Result<(), PagingError> {
        if ticket.generation != self.current || self.claimed == self.current {
            return Err(PagingError::StaleReload {
                ticket: ticket.generation,
                current: self.current,
            });
        }
        self.claimed = self.current;
        Ok(())
    }
}
