//! End-to-end composer tests driven through the robot harness.

use std::cell::RefCell;
use std::rc::Rc;

use loopview_core::{FetchError, ImageBitmap};
use loopview_ui::SlideImage;
use loopview_testing::{CarouselRobot, TestBanner};

const WIDTH: f32 = 320.0;
const HEIGHT: f32 = 180.0;

fn robot_with(count: usize) -> CarouselRobot {
    let mut robot = CarouselRobot::new(WIDTH, HEIGHT);
    robot.set_items(TestBanner::batch(count));
    robot
}

fn bitmap() -> ImageBitmap {
    ImageBitmap::new(4, 4, vec![0xabu8; 16])
}

#[test]
fn reload_builds_sentinel_padded_slides() {
    let robot = robot_with(3);

    let slides = robot.banner().slides();
    assert_eq!(slides.len(), 5);
    // [C, A, B, C, A] for items [A, B, C]
    let mapping: Vec<_> = slides.iter().map(|slide| slide.logical()).collect();
    assert_eq!(mapping, vec![2, 0, 1, 2, 0]);
    for (physical, slide) in slides.iter().enumerate() {
        assert_eq!(slide.frame().origin.x, physical as f32 * WIDTH);
        assert_eq!(slide.frame().size.width, WIDTH);
    }

    assert_eq!(robot.viewport().content_width(), 5.0 * WIDTH);
    assert_eq!(robot.indicator().page_count(), 3);
    assert_eq!(robot.indicator().current_page(), 0);
    assert_eq!(robot.title().text().as_deref(), Some("item-0"));
    // Initial position: the first real slide sits at physical 1.
    assert_eq!(robot.viewport().last_offset(), Some((WIDTH, false)));
    // One fetch per physical slide, sentinels included.
    assert_eq!(robot.fetcher().pending_count(), 5);
    assert!(robot.banner().is_auto_advancing());
}

#[test]
fn short_collections_are_not_padded() {
    let robot = robot_with(1);
    assert_eq!(robot.banner().slides().len(), 1);
    assert_eq!(robot.viewport().content_width(), WIDTH);
    assert_eq!(robot.viewport().last_offset(), Some((0.0, false)));
}

#[test]
fn empty_collection_is_inert() {
    let selected = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut robot = CarouselRobot::new(WIDTH, HEIGHT);
    let sink = Rc::clone(&selected);
    robot
        .banner_mut()
        .set_on_select(move |item: &TestBanner| sink.borrow_mut().push(format!("{:?}", item.title)));

    robot.set_items(Vec::new());

    assert!(robot.banner().slides().is_empty());
    assert!(!robot.banner().is_auto_advancing());
    assert_eq!(robot.banner().current_index(), None);
    assert!(robot.title().text().is_none());
    assert!(robot.viewport().offsets().is_empty());
    assert_eq!(robot.fetcher().pending_count(), 0);

    robot.fire_countdown();
    robot.tap();
    assert!(robot.viewport().offsets().is_empty());
    assert!(selected.borrow().is_empty());
}

#[test]
fn single_item_never_animates() {
    let mut robot = robot_with(1);
    assert!(robot.banner().is_auto_advancing());
    robot.viewport().clear_offsets();

    for _ in 0..3 {
        robot.fire_countdown();
    }

    // Nothing to advance to, so the countdown expires without effect.
    assert!(robot.viewport().offsets().is_empty());
    assert_eq!(robot.banner().current_index(), Some(0));
    assert_eq!(robot.indicator().current_page(), 0);
}

#[test]
fn countdown_expiry_advances_one_page() {
    let mut robot = robot_with(3);
    robot.viewport().clear_offsets();

    // Four ticks: still counting down.
    for _ in 0..4 {
        robot.tick();
    }
    assert!(robot.viewport().offsets().is_empty());

    // Fifth tick fires.
    robot.tick();
    assert_eq!(robot.banner().current_index(), Some(1));
    assert_eq!(robot.indicator().current_page(), 1);
    assert_eq!(robot.title().text().as_deref(), Some("item-1"));
    assert_eq!(robot.viewport().last_offset(), Some((2.0 * WIDTH, true)));
}

#[test]
fn auto_advance_wraparound_snaps_without_animation() {
    let mut robot = robot_with(3);
    robot.viewport().clear_offsets();

    robot.fire_countdown();
    robot.fire_countdown();
    assert_eq!(robot.banner().current_index(), Some(2));
    assert_eq!(robot.viewport().last_offset(), Some((3.0 * WIDTH, true)));

    // Third advance wraps to the first item; the move must not animate so
    // the sentinel jump stays invisible.
    robot.fire_countdown();
    assert_eq!(robot.banner().current_index(), Some(0));
    assert_eq!(robot.viewport().last_offset(), Some((WIDTH, false)));
}

#[test]
fn settle_past_high_sentinel_wraps_to_first() {
    let mut robot = robot_with(3);
    robot.viewport().clear_offsets();

    robot.drag_to_physical(4);

    assert_eq!(robot.banner().current_index(), Some(0));
    assert_eq!(robot.indicator().current_page(), 0);
    assert_eq!(robot.title().text().as_deref(), Some("item-0"));
    assert_eq!(robot.viewport().last_offset(), Some((WIDTH, false)));
}

#[test]
fn settle_past_low_sentinel_wraps_to_last() {
    let mut robot = robot_with(3);
    robot.viewport().clear_offsets();

    robot.drag_to_physical(0);

    assert_eq!(robot.banner().current_index(), Some(2));
    assert_eq!(robot.title().text().as_deref(), Some("item-2"));
    assert_eq!(robot.viewport().last_offset(), Some((3.0 * WIDTH, false)));
}

#[test]
fn settle_on_real_slide_keeps_position() {
    let mut robot = robot_with(3);
    robot.viewport().clear_offsets();

    robot.drag_to_physical(2);

    assert_eq!(robot.banner().current_index(), Some(1));
    // Resting on a real slide is not a wraparound correction, so the
    // (no-op) offset move keeps the animated flag.
    assert_eq!(robot.viewport().last_offset(), Some((2.0 * WIDTH, true)));
}

#[test]
fn tap_reports_the_displayed_item() {
    let selected = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut robot = robot_with(3);
    let sink = Rc::clone(&selected);
    robot.banner_mut().set_on_select(move |item: &TestBanner| {
        sink.borrow_mut()
            .push(item.title.clone().unwrap_or_default());
    });

    robot.tap();
    robot.fire_countdown();
    robot.tap();

    assert_eq!(*selected.borrow(), vec!["item-0", "item-1"]);
}

#[test]
fn completed_fetches_fill_slides() {
    let mut robot = robot_with(2);
    robot.fetcher().complete_all(|_| Ok(bitmap()));

    // Completions queue until pumped.
    assert!(robot
        .banner()
        .slides()
        .iter()
        .all(|slide| *slide.image() == SlideImage::Empty));

    robot.banner_mut().pump_images();
    assert!(robot
        .banner()
        .slides()
        .iter()
        .all(|slide| matches!(slide.image(), SlideImage::Loaded(_))));
}

#[test]
fn failed_fetch_keeps_the_placeholder() {
    let placeholder = bitmap();
    let mut items = TestBanner::batch(2);
    for item in &mut items {
        item.placeholder = Some(placeholder.clone());
    }
    let mut robot = CarouselRobot::new(WIDTH, HEIGHT);
    robot.set_items(items);

    robot
        .fetcher()
        .complete_all(|_| Err(FetchError::Unavailable("offline".into())));
    robot.banner_mut().pump_images();

    assert!(robot
        .banner()
        .slides()
        .iter()
        .all(|slide| *slide.image() == SlideImage::Placeholder(placeholder.clone())));
}

#[test]
fn stale_completions_are_dropped_after_reload() {
    let mut robot = robot_with(2);
    assert_eq!(robot.fetcher().pending_count(), 4);

    // Reload while the first collection's fetches are still in flight.
    robot.set_items(TestBanner::batch(3));
    assert_eq!(robot.fetcher().pending_count(), 9);

    // The four oldest pending requests belong to the discarded collection.
    for _ in 0..4 {
        robot.fetcher().complete_next(Ok(bitmap()));
    }
    robot.banner_mut().pump_images();
    assert!(robot
        .banner()
        .slides()
        .iter()
        .all(|slide| *slide.image() == SlideImage::Empty));

    // The current collection's fetches still apply normally.
    robot.fetcher().complete_all(|_| Ok(bitmap()));
    robot.banner_mut().pump_images();
    assert!(robot
        .banner()
        .slides()
        .iter()
        .all(|slide| matches!(slide.image(), SlideImage::Loaded(_))));
}

#[test]
fn teardown_stops_the_countdown_and_invalidates_fetches() {
    let mut robot = robot_with(3);
    robot.viewport().clear_offsets();

    robot.banner_mut().teardown();

    assert!(!robot.banner().is_auto_advancing());
    robot.fire_countdown();
    assert!(robot.viewport().offsets().is_empty());

    robot.fetcher().complete_all(|_| Ok(bitmap()));
    robot.banner_mut().pump_images();
    assert!(robot
        .banner()
        .slides()
        .iter()
        .all(|slide| *slide.image() == SlideImage::Empty));
}

#[test]
fn layout_tracks_viewport_resize() {
    let mut robot = robot_with(2);
    robot.viewport().resize(200.0, 100.0);

    robot.banner_mut().layout();

    let slides = robot.banner().slides();
    assert_eq!(slides.len(), 4);
    for (physical, slide) in slides.iter().enumerate() {
        assert_eq!(slide.frame().origin.x, physical as f32 * 200.0);
        assert_eq!(slide.frame().size, loopview_ui::Size::new(200.0, 100.0));
    }
    assert_eq!(robot.viewport().content_width(), 4.0 * 200.0);
    assert_eq!(robot.viewport().last_offset(), Some((200.0, false)));
}
