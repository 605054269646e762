//! Text pages and the data source that labels them.

use pager_core::{PageView, ReuseIdentifier, ReusePool, ViewId};
use pager_foundation::PageDataSource;

/// Reuse identifier shared by every text page.
pub const TEXT_PAGE: &str = "text-page";

/// A page showing a title and a line of body text.
#[derive(Debug)]
pub struct TextPageView {
    id: ViewId,
    identifier: ReuseIdentifier,
    page_index: Option<usize>,
    title: String,
    body: String,
    loading: bool,
}

impl TextPageView {
    fn new() -> Self {
        Self {
            id: ViewId::next(),
            identifier: ReuseIdentifier::from(TEXT_PAGE),
            page_index: None,
            title: String::new(),
            body: String::new(),
            loading: false,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fills in the final content for page `index` of `page_count`.
    pub fn show_page(&mut self, index: usize, page_count: usize) {
        self.title = format!("Page {}", index + 1);
        self.body = format!("{} of {page_count}", index + 1);
        self.loading = false;
    }

    fn show_loading(&mut self, index: usize) {
        self.title = format!("Page {}", index + 1);
        self.body = "Loading...".to_string();
        self.loading = true;
    }
}

impl PageView for TextPageView {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn reuse_identifier(&self) -> ReuseIdentifier {
        self.identifier.clone()
    }

    fn page_index(&self) -> Option<usize> {
        self.page_index
    }

    fn set_page_index(&mut self, index: usize) {
        self.page_index = Some(index);
    }

    fn prepare_for_reuse(&mut self) {
        self.title.clear();
        self.body.clear();
        self.loading = false;
    }
}

/// Serves "Page N" text pages. Every `slow_every`-th page starts with a
/// loading placeholder and gets its content later through
/// [`take_pending`](Self::take_pending).
pub struct TextPageSource {
    page_count: usize,
    slow_every: Option<usize>,
    pending: Vec<usize>,
    constructed: usize,
}

impl TextPageSource {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            slow_every: None,
            pending: Vec::new(),
            constructed: 0,
        }
    }

    pub fn with_slow_pages(mut self, every: usize) -> Self {
        self.slow_every = (every > 0).then_some(every);
        self
    }

    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
    }

    /// Views built from scratch so far.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    /// Pages whose content has "arrived" since the last call.
    pub fn take_pending(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.pending)
    }

    fn is_slow(&self, index: usize) -> bool {
        self.slow_every
            .is_some_and(|every| index % every == every - 1)
    }

    fn construct(&mut self) -> TextPageView {
        self.constructed += 1;
        TextPageView::new()
    }
}

impl PageDataSource<TextPageView> for TextPageSource {
    fn page_count(&self) -> isize {
        isize::try_from(self.page_count).unwrap_or(isize::MAX)
    }

    fn view_for_index(&mut self, index: usize, pool: &mut ReusePool<TextPageView>) -> TextPageView {
        let mut view = match pool.dequeue(TEXT_PAGE) {
            Some(view) => view,
            None => self.construct(),
        };
        if self.is_slow(index) {
            view.show_loading(index);
            self.pending.push(index);
        } else {
            view.show_page(index, self.page_count);
        }
        view
    }

    fn placeholder_view(&mut self, index: usize) -> TextPageView {
        let mut view = self.construct();
        view.show_loading(index);
        self.pending.push(index);
        view
    }
}
