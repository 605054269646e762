//! Inbound events and the mailbox that orders them.
//!
//! Collaborators the controller calls into (the host surface, the data
//! source, page-change listeners) cannot re-enter the controller while it is
//! busy. They post through a [`PagingEventSender`] instead, and the
//! controller drains the mailbox in arrival order once the current event has
//! finished. A size change posted mid-scroll therefore lands after the
//! scroll's window recomputation, never in the middle of it.

use std::collections::VecDeque;

use pager_core::{Owned, Size};

/// Events a paging controller accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum PagingEvent {
    Reload,
    ScrollPositionChanged { offset: f32 },
    /// The drag or deceleration finished.
    ScrollEnded,
    SetCurrentIndex { index: usize, animated: bool },
    /// Phase one of a size change.
    BeginSizeChange,
    /// Phase two of a size change; runs phase one first if it was skipped.
    SizeChanged { size: Size },
    DisposeForMemoryPressure,
}

/// Cloneable handle for posting events to a controller.
#[derive(Clone, Debug)]
pub struct PagingEventSender {
    queue: Owned<VecDeque<PagingEvent>>,
}

impl PagingEventSender {
    pub fn post(&self, event: PagingEvent) {
        log::trace!("PagingWindow: queued {event:?}");
        self.queue.update(|queue| queue.push_back(event));
    }

    /// Number of events waiting to be processed.
    pub fn pending(&self) -> usize {
        self.queue.with(|queue| queue.len())
    }
}

#[derive(Debug, Default)]
pub(crate) struct EventMailbox {
    queue: Owned<VecDeque<PagingEvent>>,
}

impl EventMailbox {
    pub(crate) fn sender(&self) -> PagingEventSender {
        PagingEventSender {
            queue: self.queue.clone(),
        }
    }

    pub(crate) fn post(&self, event: PagingEvent) {
        self.queue.update(|queue| queue.push_back(event));
    }

    pub(crate) fn pop(&self) -> Option<PagingEvent> {
        self.queue.update(|queue| queue.pop_front())
    }

    /// Whether a reload is waiting, i.e. the reload in progress is stale.
    pub(crate) fn has_pending_reload(&self) -> bool {
        self.queue
            .with(|queue| queue.iter().any(|event| *event == PagingEvent::Reload))
    }

    /// Drops everything still queued and returns how many events were lost.
    pub(crate) fn discard_pending(&self) -> usize {
        self.queue.update(|queue| {
            let count = queue.len();
            queue.clear();
            count
        })
    }
}
