//! Scripted console host for the banner carousel.
//!
//! Plays the part of the original sample screen: a course gallery is
//! assigned shortly after "launch", the carousel auto-advances, a user
//! drag past the end wraps around, and a tap reports the selected course.
//! The "toolkit" here just logs what a real one would draw.

use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use loopview_core::{BannerItem, FetchError, ImageBitmap, ImageLocator};
use loopview_runtime_std::{IntervalTimer, ThreadFetcher, UiQueue};
use loopview_ui::{BannerView, PageIndicator, Size, TitleLabel, Viewport};

/// Tick period, compressed from the reference one second so the script
/// finishes in a few seconds of wall time.
const TICK: Duration = Duration::from_millis(100);
const FRAME: Duration = Duration::from_millis(20);

#[derive(Clone, Debug)]
struct Course {
    id: u32,
    name: String,
    photo: ImageLocator,
}

impl Course {
    fn new(id: u32, name: &str, photo: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            photo: ImageLocator::new(photo),
        }
    }
}

impl BannerItem for Course {
    fn title(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn locator(&self) -> &ImageLocator {
        &self.photo
    }
}

/// Logs offset moves instead of scrolling pixels.
struct ConsoleViewport {
    size: Size,
}

impl Viewport for ConsoleViewport {
    fn size(&self) -> Size {
        self.size
    }

    fn set_content_width(&mut self, width: f32) {
        log::info!("viewport: content width {width}");
    }

    fn set_offset(&mut self, x: f32, animated: bool) {
        log::info!("viewport: offset {x} (animated: {animated})");
    }
}

struct ConsoleIndicator;

impl PageIndicator for ConsoleIndicator {
    fn set_page_count(&mut self, count: usize) {
        log::info!("indicator: {count} page(s)");
    }

    fn set_current_page(&mut self, page: usize) {
        log::info!("indicator: page {page}");
    }
}

struct ConsoleTitle;

impl TitleLabel for ConsoleTitle {
    fn set_text(&mut self, text: Option<&str>) {
        log::info!("title: {:?}", text.unwrap_or("<none>"));
    }
}

fn fake_load(locator: &ImageLocator) -> Result<ImageBitmap, FetchError> {
    // Stand-in for an HTTP fetch + decode.
    thread::sleep(Duration::from_millis(40));
    if locator.as_str().ends_with("missing.jpg") {
        return Err(FetchError::Unavailable("404".into()));
    }
    Ok(ImageBitmap::new(640, 360, vec![0x7fu8; 64]))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;

    let queue = Rc::new(UiQueue::new());
    let fetcher = Rc::new(ThreadFetcher::new(Rc::clone(&queue), fake_load));

    let mut banner: BannerView<Course> = BannerView::new(
        Box::new(ConsoleViewport {
            size: Size::new(320.0, 180.0),
        }),
        Box::new(ConsoleIndicator),
        Box::new(ConsoleTitle),
        fetcher,
    );
    banner.set_on_select(|course: &Course| {
        log::info!("push course screen for id {}", course.id);
    });

    // Items arrive a moment after launch, as in the original sample.
    let (items_tx, items_rx) = mpsc::channel();
    queue.handle().post_after(Duration::from_millis(200), move || {
        let courses = vec![
            Course::new(0, "Dulcimer Artistry", "https://images.example/courses/0.jpg"),
            Course::new(1, "Performance Technique", "https://images.example/courses/1.jpg"),
            Course::new(2, "Stage Presence", "https://images.example/courses/missing.jpg"),
        ];
        let _ = items_tx.send(courses);
    });

    let timer = IntervalTimer::start(TICK);
    let mut loaded = false;

    for frame in 0..400u32 {
        queue.run_pending();
        if let Ok(courses) = items_rx.try_recv() {
            banner.set_items(courses);
            loaded = true;
        }
        for _ in 0..timer.take_ticks() {
            banner.tick();
        }
        banner.pump_images();

        // Scripted user input once the gallery is up.
        if loaded && frame == 250 {
            log::info!("user drags past the last slide");
            banner.handle_settled(4.0 * 320.0);
        }
        if loaded && frame == 300 {
            log::info!("user taps the current slide");
            banner.handle_tap();
        }

        thread::sleep(FRAME);
    }

    timer.cancel();
    banner.teardown();
    log::info!("gallery closed");
    Ok(())
}
