//! Headless core for the loopview banner carousel.
//!
//! This crate owns the widget's bookkeeping with no UI toolkit attached:
//! the item model, the cyclic paging state machine, the auto-advance
//! countdown, and the image-fetch seam with its stale-completion guard.
//! A host layer (see `loopview-ui`) composes these against real views.

pub mod auto_advance;
pub mod image;
pub mod item;
pub mod pager;
pub mod platform;

pub use auto_advance::AutoAdvance;
pub use image::{DeliverImage, FetchError, FetchResult, ImageEpoch, ImageFetcher, ImageTicket};
pub use item::{BannerItem, ImageBitmap, ImageLocator};
pub use pager::{PagerMode, PagerState, PhysicalSequence, Settle, Transition};
pub use platform::Clock;
