//! Item model for the carousel.
//!
//! Hosts adapt their own domain types by implementing [`BannerItem`]; the
//! widget only ever reads a title, an image locator, and an optional
//! placeholder from each item.

use std::fmt;
use std::sync::Arc;

/// Locator for a banner image, typically an http(s) URI.
///
/// The core does not parse or validate the URI; it is handed verbatim to
/// the host's [`ImageFetcher`](crate::image::ImageFetcher).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageLocator(String);

impl ImageLocator {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded image ready for display.
///
/// Pixel bytes are shared so a bitmap can be handed to a slide without
/// copying; the pixel format is the host's business.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBitmap {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl ImageBitmap {
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// A type that can be displayed as a banner slide.
///
/// Items are immutable once constructed; the widget holds a read-only
/// ordered sequence of them, replaced wholesale on each assignment.
pub trait BannerItem {
    /// Title rendered over the slide, if any.
    fn title(&self) -> Option<&str>;

    /// Where to fetch the slide image from.
    fn locator(&self) -> &ImageLocator;

    /// Image shown until the fetch completes (and left in place forever if
    /// it fails).
    fn placeholder(&self) -> Option<&ImageBitmap> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(ImageLocator);

    impl BannerItem for Plain {
        fn title(&self) -> Option<&str> {
            None
        }

        fn locator(&self) -> &ImageLocator {
            &self.0
        }
    }

    #[test]
    fn placeholder_defaults_to_none() {
        let item = Plain(ImageLocator::new("https://example.test/a.png"));
        assert!(item.placeholder().is_none());
        assert_eq!(item.locator().as_str(), "https://example.test/a.png");
    }

    #[test]
    fn bitmap_shares_pixels() {
        let bitmap = ImageBitmap::new(2, 1, vec![0xff, 0x00]);
        let copy = bitmap.clone();
        assert_eq!(copy.pixels(), bitmap.pixels());
        assert_eq!((copy.width(), copy.height()), (2, 1));
    }
}
