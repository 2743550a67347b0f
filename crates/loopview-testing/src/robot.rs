//! Robot-style driver wiring a real [`BannerView`] to the fakes.

use std::rc::Rc;

use loopview_core::{BannerItem, ImageBitmap, ImageLocator};
use loopview_ui::{defaults, BannerView};

use crate::fakes::{FakePageIndicator, FakeTitleLabel, FakeViewport, ManualFetcher};

/// Simple item type for tests.
#[derive(Clone, Debug)]
pub struct TestBanner {
    pub title: Option<String>,
    pub locator: ImageLocator,
    pub placeholder: Option<ImageBitmap>,
}

impl TestBanner {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_owned()),
            locator: ImageLocator::new(format!("test://{title}")),
            placeholder: None,
        }
    }

    /// `n` items titled "item-0" … "item-n-1".
    pub fn batch(n: usize) -> Vec<Self> {
        (0..n).map(|i| Self::titled(&format!("item-{i}"))).collect()
    }
}

impl BannerItem for TestBanner {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn locator(&self) -> &ImageLocator {
        &self.locator
    }

    fn placeholder(&self) -> Option<&ImageBitmap> {
        self.placeholder.as_ref()
    }
}

/// Drives a carousel the way a host screen would: reloads, timer ticks,
/// drag settles, taps, resizes.
pub struct CarouselRobot {
    banner: BannerView<TestBanner>,
    viewport: FakeViewport,
    indicator: FakePageIndicator,
    title: FakeTitleLabel,
    fetcher: ManualFetcher,
}

impl CarouselRobot {
    pub fn new(width: f32, height: f32) -> Self {
        let viewport = FakeViewport::with_size(width, height);
        let indicator = FakePageIndicator::default();
        let title = FakeTitleLabel::default();
        let fetcher = ManualFetcher::default();
        let banner = BannerView::new(
            Box::new(viewport.clone()),
            Box::new(indicator.clone()),
            Box::new(title.clone()),
            Rc::new(fetcher.clone()),
        );
        Self {
            banner,
            viewport,
            indicator,
            title,
            fetcher,
        }
    }

    pub fn banner(&self) -> &BannerView<TestBanner> {
        &self.banner
    }

    pub fn banner_mut(&mut self) -> &mut BannerView<TestBanner> {
        &mut self.banner
    }

    pub fn viewport(&self) -> &FakeViewport {
        &self.viewport
    }

    pub fn indicator(&self) -> &FakePageIndicator {
        &self.indicator
    }

    pub fn title(&self) -> &FakeTitleLabel {
        &self.title
    }

    pub fn fetcher(&self) -> &ManualFetcher {
        &self.fetcher
    }

    pub fn set_items(&mut self, items: Vec<TestBanner>) {
        self.banner.set_items(items);
    }

    pub fn tick(&mut self) {
        self.banner.tick();
    }

    /// Ticks through one full auto-advance period.
    pub fn fire_countdown(&mut self) {
        for _ in 0..defaults::AUTO_ADVANCE_TICKS {
            self.banner.tick();
        }
    }

    /// Simulates the viewport coming to rest on physical slide `physical`.
    pub fn drag_to_physical(&mut self, physical: isize) {
        use loopview_ui::Viewport;
        let width = self.viewport.size().width;
        self.banner.handle_settled(physical as f32 * width);
    }

    pub fn tap(&mut self) {
        self.banner.handle_tap();
    }
}
