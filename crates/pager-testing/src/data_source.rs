//! Scriptable data source double.

use pager_core::{PageView, ReuseIdentifier, ReusePool, ViewId};
use pager_foundation::{PageDataSource, PagingEvent, PagingEventSender};

use crate::page_view::TestPageView;

/// One call to [`PageDataSource::view_for_index`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewRequest {
    pub index: usize,
    pub view: ViewId,
    /// Whether the view came out of the pool.
    pub reused: bool,
}

/// Data source handing out [`TestPageView`]s with `"Page {index}"` content.
///
/// Keeps a clone of the last view it handed out so tests can make it break
/// the data source contract on purpose.
pub struct TestDataSource {
    page_count: isize,
    identifier: ReuseIdentifier,
    requests: Vec<ViewRequest>,
    last_handed_out: Option<TestPageView>,
    created: usize,
    placeholders: usize,
    return_last_view_next: bool,
    post_on_request: Option<(usize, PagingEventSender, PagingEvent)>,
}

impl TestDataSource {
    pub fn new(page_count: isize) -> Self {
        Self::with_identifier(page_count, ReuseIdentifier::default())
    }

    pub fn with_identifier(page_count: isize, identifier: impl Into<ReuseIdentifier>) -> Self {
        Self {
            page_count,
            identifier: identifier.into(),
            requests: Vec::new(),
            last_handed_out: None,
            created: 0,
            placeholders: 0,
            return_last_view_next: false,
            post_on_request: None,
        }
    }

    pub fn set_page_count(&mut self, page_count: isize) {
        self.page_count = page_count;
    }

    pub fn requests(&self) -> &[ViewRequest] {
        &self.requests
    }

    /// Indices requested so far, in request order.
    pub fn requested_indices(&self) -> Vec<usize> {
        self.requests.iter().map(|request| request.index).collect()
    }

    pub fn clear_requests(&mut self) {
        self.requests.clear();
    }

    /// Views constructed by `view_for_index`.
    pub fn created(&self) -> usize {
        self.created
    }

    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// Makes the next `view_for_index` hand back the previously returned
    /// view instead of a fresh or pooled one.
    pub fn return_last_view_on_next_request(&mut self) {
        self.return_last_view_next = true;
    }

    /// Posts `event` through `sender` when page `index` is requested.
    pub fn post_on_request(&mut self, index: usize, sender: PagingEventSender, event: PagingEvent) {
        self.post_on_request = Some((index, sender, event));
    }

    fn fire_scheduled_post(&mut self, index: usize) {
        if self
            .post_on_request
            .as_ref()
            .is_some_and(|(target, _, _)| *target == index)
        {
            if let Some((_, sender, event)) = self.post_on_request.take() {
                sender.post(event);
            }
        }
    }
}

impl PageDataSource<TestPageView> for TestDataSource {
    fn page_count(&self) -> isize {
        self.page_count
    }

    fn view_for_index(&mut self, index: usize, pool: &mut ReusePool<TestPageView>) -> TestPageView {
        self.fire_scheduled_post(index);

        if self.return_last_view_next {
            if let Some(view) = self.last_handed_out.clone() {
                self.return_last_view_next = false;
                self.requests.push(ViewRequest {
                    index,
                    view: view.view_id(),
                    reused: false,
                });
                return view;
            }
        }

        let (view, reused) = match pool.dequeue(self.identifier.as_str()) {
            Some(view) => (view, true),
            None => {
                self.created += 1;
                (TestPageView::new(self.identifier.clone()), false)
            }
        };
        view.set_content(format!("Page {index}"));
        self.requests.push(ViewRequest {
            index,
            view: view.view_id(),
            reused,
        });
        self.last_handed_out = Some(view.clone());
        view
    }

    fn placeholder_view(&mut self, index: usize) -> TestPageView {
        self.placeholders += 1;
        let view = TestPageView::new(self.identifier.clone());
        view.set_content(format!("Placeholder {index}"));
        view
    }
}
