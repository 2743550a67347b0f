//! Slide views owned by the composer.
//!
//! The original pattern of looking subviews up by tag is replaced by the
//! composer holding these as plain owned values; the host renders them by
//! reading frame and image state.

use loopview_core::ImageBitmap;

use crate::geometry::Rect;

/// What a slide currently displays.
#[derive(Clone, Debug, PartialEq)]
pub enum SlideImage {
    /// No placeholder was provided and the fetch has not completed.
    Empty,
    /// The item's placeholder, shown until (unless) the fetch completes.
    Placeholder(ImageBitmap),
    /// The fetched image.
    Loaded(ImageBitmap),
}

/// One slide in the physical row.
#[derive(Clone, Debug)]
pub struct SlideView {
    logical: usize,
    frame: Rect,
    image: SlideImage,
}

impl SlideView {
    pub fn new(logical: usize, frame: Rect) -> Self {
        Self {
            logical,
            frame,
            image: SlideImage::Empty,
        }
    }

    /// Logical item index this slide displays. Sentinel slides share the
    /// logical index of the opposite end's real slide.
    pub fn logical(&self) -> usize {
        self.logical
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn image(&self) -> &SlideImage {
        &self.image
    }

    pub fn show_placeholder(&mut self, placeholder: Option<&ImageBitmap>) {
        self.image = match placeholder {
            Some(bitmap) => SlideImage::Placeholder(bitmap.clone()),
            None => SlideImage::Empty,
        };
    }

    /// Swaps in the fetched image.
    pub fn show_loaded(&mut self, bitmap: ImageBitmap) {
        self.image = SlideImage::Loaded(bitmap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_then_loaded() {
        let mut slide = SlideView::new(0, Rect::new(0.0, 0.0, 320.0, 180.0));
        assert_eq!(*slide.image(), SlideImage::Empty);

        let placeholder = ImageBitmap::new(1, 1, vec![0u8]);
        slide.show_placeholder(Some(&placeholder));
        assert_eq!(*slide.image(), SlideImage::Placeholder(placeholder));

        let loaded = ImageBitmap::new(2, 2, vec![1u8; 4]);
        slide.show_loaded(loaded.clone());
        assert_eq!(*slide.image(), SlideImage::Loaded(loaded));
    }
}
