//! Page view double.

use pager_core::{Owned, PageView, ReuseIdentifier, ViewId};

/// Mutable state shared by every clone of a [`TestPageView`].
#[derive(Debug, Default)]
pub struct TestPageState {
    pub page_index: Option<usize>,
    pub content: Option<String>,
    pub prepare_count: usize,
    pub bind_count: usize,
}

/// A page view handle. Clones refer to the same view instance.
#[derive(Clone, Debug)]
pub struct TestPageView {
    id: ViewId,
    identifier: ReuseIdentifier,
    state: Owned<TestPageState>,
}

impl TestPageView {
    pub fn new(identifier: impl Into<ReuseIdentifier>) -> Self {
        Self {
            id: ViewId::next(),
            identifier: identifier.into(),
            state: Owned::new(TestPageState::default()),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn content(&self) -> Option<String> {
        self.state.with(|state| state.content.clone())
    }

    pub fn set_content(&self, content: impl Into<String>) {
        let content = content.into();
        self.state.update(|state| state.content = Some(content));
    }

    /// How many times the view was cleared for reuse.
    pub fn prepare_count(&self) -> usize {
        self.state.with(|state| state.prepare_count)
    }

    /// How many times the view was bound to a page.
    pub fn bind_count(&self) -> usize {
        self.state.with(|state| state.bind_count)
    }
}

impl PageView for TestPageView {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn reuse_identifier(&self) -> ReuseIdentifier {
        self.identifier.clone()
    }

    fn page_index(&self) -> Option<usize> {
        self.state.with(|state| state.page_index)
    }

    fn set_page_index(&mut self, index: usize) {
        self.state.update(|state| {
            state.page_index = Some(index);
            state.bind_count += 1;
        });
    }

    fn prepare_for_reuse(&mut self) {
        self.state.update(|state| {
            state.content = None;
            state.prepare_count += 1;
        });
    }
}
