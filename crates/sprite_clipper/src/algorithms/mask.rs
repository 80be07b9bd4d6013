use image::{GrayImage, RgbaImage};
use crate::traits::PixelMask;

/// Alpha-channel mask over an RGBA sprite sheet
#[derive(Debug, Clone, Copy)]
pub struct AlphaMask<'a> {
    image: &'a RgbaImage,
    /// Pixels with alpha above this value are opaque
    pub threshold: u8,
}

impl<'a> AlphaMask<'a> {
    /// Any non-zero alpha counts as opaque
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image, threshold: 0 }
    }

    pub fn with_threshold(image: &'a RgbaImage, threshold: u8) -> Self {
        Self { image, threshold }
    }
}

impl PixelMask for AlphaMask<'_> {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y)[3] > self.threshold
    }
}

/// Binary masks: any non-zero luma is opaque
impl PixelMask for GrayImage {
    fn dimensions(&self) -> (u32, u32) {
        image::GenericImageView::dimensions(self)
    }

    fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y)[0] > 0
    }
}
