//! View composer for the loopview banner carousel.
//!
//! [`BannerView`] owns the slide row and drives a set of host-supplied
//! capabilities: a scrollable [`Viewport`], a [`PageIndicator`], and a
//! [`TitleLabel`]. The host forwards drag-end and tap events in; the
//! composer moves the viewport offset, refreshes the indicator and title,
//! and reports the selected item back out.

pub mod banner;
pub mod defaults;
pub mod geometry;
pub mod slide;

pub use banner::{BannerView, PageIndicator, TitleLabel, Viewport};
pub use geometry::{Point, Rect, Size};
pub use slide::{SlideImage, SlideView};
