//! Recording implementations of the host capability traits.
//!
//! Each fake is a cheap clone sharing its record, so a test can hand one
//! clone to the widget and keep another to assert against.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use loopview_core::{DeliverImage, FetchResult, ImageFetcher, ImageLocator};
use loopview_ui::{PageIndicator, Size, TitleLabel, Viewport};

#[derive(Debug, Default)]
struct ViewportRecord {
    size: Size,
    content_width: f32,
    offsets: Vec<(f32, bool)>,
}

/// Records content width and every offset move (with its animated flag).
#[derive(Clone, Default)]
pub struct FakeViewport {
    record: Rc<RefCell<ViewportRecord>>,
}

impl FakeViewport {
    pub fn with_size(width: f32, height: f32) -> Self {
        let fake = Self::default();
        fake.record.borrow_mut().size = Size::new(width, height);
        fake
    }

    /// Simulates a window resize.
    pub fn resize(&self, width: f32, height: f32) {
        self.record.borrow_mut().size = Size::new(width, height);
    }

    pub fn content_width(&self) -> f32 {
        self.record.borrow().content_width
    }

    /// Every `set_offset` call in order, as `(x, animated)`.
    pub fn offsets(&self) -> Vec<(f32, bool)> {
        self.record.borrow().offsets.clone()
    }

    pub fn last_offset(&self) -> Option<(f32, bool)> {
        self.record.borrow().offsets.last().copied()
    }

    pub fn clear_offsets(&self) {
        self.record.borrow_mut().offsets.clear();
    }
}

impl Viewport for FakeViewport {
    fn size(&self) -> Size {
        self.record.borrow().size
    }

    fn set_content_width(&mut self, width: f32) {
        self.record.borrow_mut().content_width = width;
    }

    fn set_offset(&mut self, x: f32, animated: bool) {
        self.record.borrow_mut().offsets.push((x, animated));
    }
}

#[derive(Debug, Default)]
struct IndicatorRecord {
    page_count: usize,
    current_page: usize,
}

#[derive(Clone, Default)]
pub struct FakePageIndicator {
    record: Rc<RefCell<IndicatorRecord>>,
}

impl FakePageIndicator {
    pub fn page_count(&self) -> usize {
        self.record.borrow().page_count
    }

    pub fn current_page(&self) -> usize {
        self.record.borrow().current_page
    }
}

impl PageIndicator for FakePageIndicator {
    fn set_page_count(&mut self, count: usize) {
        self.record.borrow_mut().page_count = count;
    }

    fn set_current_page(&mut self, page: usize) {
        self.record.borrow_mut().current_page = page;
    }
}

#[derive(Clone, Default)]
pub struct FakeTitleLabel {
    text: Rc<RefCell<Option<String>>>,
}

impl FakeTitleLabel {
    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }
}

impl TitleLabel for FakeTitleLabel {
    fn set_text(&mut self, text: Option<&str>) {
        *self.text.borrow_mut() = text.map(str::to_owned);
    }
}

/// Fetcher that parks every request until the test completes it by hand.
#[derive(Clone, Default)]
pub struct ManualFetcher {
    pending: Rc<RefCell<VecDeque<(ImageLocator, DeliverImage)>>>,
}

impl ManualFetcher {
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn pending_locators(&self) -> Vec<ImageLocator> {
        self.pending
            .borrow()
            .iter()
            .map(|(locator, _)| locator.clone())
            .collect()
    }

    /// Completes the oldest pending request. Returns the locator it was
    /// for, or `None` when nothing is pending.
    pub fn complete_next(&self, result: FetchResult) -> Option<ImageLocator> {
        let (locator, deliver) = self.pending.borrow_mut().pop_front()?;
        deliver(result);
        Some(locator)
    }

    /// Completes every pending request with `result(locator)`.
    pub fn complete_all(&self, result: impl Fn(&ImageLocator) -> FetchResult) {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((locator, deliver)) = next else {
                break;
            };
            deliver(result(&locator));
        }
    }
}

impl ImageFetcher for ManualFetcher {
    fn fetch(&self, locator: &ImageLocator, deliver: DeliverImage) {
        self.pending
            .borrow_mut()
            .push_back((locator.clone(), deliver));
    }
}
