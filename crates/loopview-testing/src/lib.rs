//! Test doubles and a robot-style driver for the loopview carousel.
//!
//! The fakes record every call the composer makes against the host
//! capabilities, and [`ManualFetcher`] holds fetch completions until the
//! test releases them, which is how stale-completion behavior is
//! exercised without threads.

pub mod fakes;
pub mod robot;

pub use fakes::{FakePageIndicator, FakeTitleLabel, FakeViewport, ManualFetcher};
pub use robot::{CarouselRobot, TestBanner};
