//! The banner carousel composer.

use std::cell::RefCell;
use std::rc::Rc;

use loopview_core::{
    AutoAdvance, BannerItem, FetchResult, ImageEpoch, ImageFetcher, ImageTicket, PagerState,
};
use smallvec::SmallVec;

use crate::defaults;
use crate::geometry::{Rect, Size};
use crate::slide::SlideView;

/// Scrollable container capability supplied by the host toolkit.
///
/// The host reports drag-end by calling [`BannerView::handle_settled`]
/// with the resting offset; the composer only ever writes the offset back.
pub trait Viewport {
    fn size(&self) -> Size;

    /// Total scrollable width, `physical_len * viewport_width`.
    fn set_content_width(&mut self, width: f32);

    /// Moves the horizontal offset. `animated` is false for wraparound
    /// snaps and initial positioning.
    fn set_offset(&mut self, x: f32, animated: bool);
}

/// Page indicator capability (dot row or equivalent).
pub trait PageIndicator {
    fn set_page_count(&mut self, count: usize);
    fn set_current_page(&mut self, page: usize);
}

/// Title text capability.
pub trait TitleLabel {
    fn set_text(&mut self, text: Option<&str>);
}

type ImageInbox = Rc<RefCell<Vec<(ImageTicket, FetchResult)>>>;

/// Auto-rotating banner carousel.
///
/// Owns the item collection, the paging state machine, the auto-advance
/// countdown, and one [`SlideView`] per physical position. All methods are
/// UI-thread affine; the only asynchronous input is image completions,
/// which the fetcher queues into an inbox that [`BannerView::tick`] (or
/// [`BannerView::pump_images`]) drains; the widget is never mutated from
/// inside a fetch callback.
pub struct BannerView<T: BannerItem> {
    items: Vec<T>,
    pager: PagerState,
    countdown: AutoAdvance,
    epoch: ImageEpoch,
    slides: SmallVec<[SlideView; 8]>,
    viewport: Box<dyn Viewport>,
    indicator: Box<dyn PageIndicator>,
    title: Box<dyn TitleLabel>,
    fetcher: Rc<dyn ImageFetcher>,
    inbox: ImageInbox,
    on_select: Option<Box<dyn FnMut(&T)>>,
}

impl<T: BannerItem> BannerView<T> {
    pub fn new(
        viewport: Box<dyn Viewport>,
        indicator: Box<dyn PageIndicator>,
        title: Box<dyn TitleLabel>,
        fetcher: Rc<dyn ImageFetcher>,
    ) -> Self {
        Self {
            items: Vec::new(),
            pager: PagerState::new(),
            countdown: AutoAdvance::new(defaults::AUTO_ADVANCE_TICKS),
            epoch: ImageEpoch::new(),
            slides: SmallVec::new(),
            viewport,
            indicator,
            title,
            fetcher,
            inbox: Rc::new(RefCell::new(Vec::new())),
            on_select: None,
        }
    }

    /// Registers the selection callback invoked on tap.
    pub fn set_on_select(&mut self, on_select: impl FnMut(&T) + 'static) {
        self.on_select = Some(Box::new(on_select));
    }

    /// Replaces the item collection and rebuilds everything derived from
    /// it: slides, frames, indicator, title, offset, countdown, fetches.
    ///
    /// In-flight fetches from the previous collection become stale and
    /// their completions are dropped when they arrive.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.epoch.advance();
        self.items = items;
        self.pager.reset(self.items.len());
        log::debug!("banner reload with {} item(s)", self.items.len());

        self.rebuild_slides();
        self.indicator.set_page_count(self.items.len());
        self.render_current(false);

        self.countdown.stop();
        if !self.items.is_empty() {
            self.countdown.start();
        }
        self.request_images();
    }

    /// The currently displayed item, if any.
    pub fn current_item(&self) -> Option<&T> {
        self.pager.current().map(|index| &self.items[index])
    }

    /// Current logical index, `None` when the collection is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.pager.current()
    }

    pub fn slides(&self) -> &[SlideView] {
        &self.slides
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.countdown.is_running()
    }

    /// Feeds one timer tick. On countdown expiry advances the pager and
    /// moves the viewport (animated, unless the advance wrapped back to
    /// the first item). Also drains any queued image completions.
    pub fn tick(&mut self) {
        if self.countdown.tick() {
            if let Some(transition) = self.pager.advance() {
                let text = self.current_title();
                let width = self.viewport.size().width;
                self.indicator.set_current_page(transition.logical);
                self.title.set_text(text.as_deref());
                self.viewport
                    .set_offset(transition.physical as f32 * width, transition.animated);
            }
        }
        self.pump_images();
    }

    /// Reconciles state after the viewport came to rest at `offset_x`
    /// (after a user drag or an animated scroll).
    ///
    /// The offset move is animated, except when the rest position was a
    /// sentinel slide: that correction snaps to the equivalent real slide
    /// so the loop appears seamless.
    pub fn handle_settled(&mut self, offset_x: f32) {
        let width = self.viewport.size().width;
        if width <= 0.0 {
            log::warn!("settle ignored: viewport has no width");
            return;
        }
        let physical = (offset_x / width).round() as isize;
        if let Some(settle) = self.pager.settle(physical) {
            let text = self.current_title();
            self.indicator.set_current_page(settle.logical);
            self.title.set_text(text.as_deref());
            self.viewport
                .set_offset(settle.physical as f32 * width, !settle.repositioned);
        }
    }

    /// Reports the currently displayed item to the host. No-op when the
    /// collection is empty.
    pub fn handle_tap(&mut self) {
        let Some(index) = self.pager.current() else {
            return;
        };
        if let Some(on_select) = self.on_select.as_mut() {
            on_select(&self.items[index]);
        }
    }

    /// Re-lays-out slide frames and snaps the offset to the current slide.
    /// The host calls this whenever the viewport size changes.
    pub fn layout(&mut self) {
        let size = self.viewport.size();
        for (physical, slide) in self.slides.iter_mut().enumerate() {
            slide.set_frame(Rect::new(
                physical as f32 * size.width,
                0.0,
                size.width,
                size.height,
            ));
        }
        let content_width = self.slides.len() as f32 * size.width;
        self.viewport.set_content_width(content_width);
        if !self.items.is_empty() {
            let offset = self.pager.physical_index() as f32 * size.width;
            self.viewport.set_offset(offset, false);
        }
    }

    /// Applies queued image completions. Stale completions (issued before
    /// the most recent reload or teardown) are dropped without touching
    /// any slide; failed fetches leave the placeholder in place.
    pub fn pump_images(&mut self) {
        let completed: Vec<_> = self.inbox.borrow_mut().drain(..).collect();
        for (ticket, result) in completed {
            if !self.epoch.accepts(&ticket) {
                continue;
            }
            let Some(slide) = self.slides.get_mut(ticket.physical()) else {
                continue;
            };
            match result {
                Ok(bitmap) => slide.show_loaded(bitmap),
                Err(err) => {
                    log::debug!(
                        "image fetch for physical slide {} failed, keeping placeholder: {err}",
                        ticket.physical()
                    );
                }
            }
        }
    }

    /// Stops the countdown and invalidates all in-flight fetches. Called
    /// when the widget leaves the screen.
    pub fn teardown(&mut self) {
        self.countdown.stop();
        self.epoch.advance();
        self.inbox.borrow_mut().clear();
    }

    fn rebuild_slides(&mut self) {
        let size = self.viewport.size();
        if size.width <= 0.0 && !self.items.is_empty() {
            log::warn!("banner laid out with zero-width viewport");
        }
        let sequence = self.pager.sequence();
        self.slides.clear();
        for (physical, logical) in sequence.iter().enumerate() {
            let mut slide = SlideView::new(
                logical,
                Rect::new(physical as f32 * size.width, 0.0, size.width, size.height),
            );
            slide.show_placeholder(self.items[logical].placeholder());
            self.slides.push(slide);
        }
        self.viewport
            .set_content_width(sequence.len() as f32 * size.width);
    }

    fn render_current(&mut self, animated: bool) {
        let page = self.pager.current().unwrap_or(0);
        let text = self.current_title();
        self.indicator.set_current_page(page);
        self.title.set_text(text.as_deref());
        if !self.items.is_empty() {
            let width = self.viewport.size().width;
            let offset = self.pager.physical_index() as f32 * width;
            self.viewport.set_offset(offset, animated);
        }
    }

    fn current_title(&self) -> Option<String> {
        self.current_item()
            .and_then(BannerItem::title)
            .map(str::to_owned)
    }

    fn request_images(&mut self) {
        for (physical, slide) in self.slides.iter().enumerate() {
            let locator = self.items[slide.logical()].locator().clone();
            let ticket = self.epoch.ticket(physical);
            let inbox = Rc::clone(&self.inbox);
            self.fetcher.fetch(
                &locator,
                Box::new(move |result| inbox.borrow_mut().push((ticket, result))),
            );
        }
    }
}
