use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::pixel::PixelFormat;

/// A decoded image that owns its pixel buffer.
///
/// Rows are stored contiguously with no padding. Row order is bottom-to-top
/// unless [`crate::LoadFlags::ORIGIN_TOP_LEFT`] was requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub(crate) pixels: Vec<u8>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) format: PixelFormat,
}

impl DecodedImage {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * format.bytes_per_pixel()
        );
        Self {
            pixels,
            width,
            height,
            format,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout of the pixel data.
    ///
    /// After [`Self::release`] there is no pixel data and the value is
    /// stale; check [`Self::is_released`] or [`Self::bytes_per_pixel`],
    /// which drops to 0.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bytes_per_pixel(&self) -> usize {
        if self.is_released() {
            0
        } else {
            self.format.bytes_per_pixel()
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Free the pixel buffer and clear the dimensions.
    ///
    /// Afterwards width, height, [`Self::bytes_per_pixel`], and the pixel
    /// slice are all zero or empty, and [`Self::format`] no longer describes
    /// anything. Safe to call more than once; later calls do nothing.
    pub fn release(&mut self) {
        self.pixels = Vec::new();
        self.width = 0;
        self.height = 0;
    }

    /// Whether [`Self::release`] has been called.
    pub fn is_released(&self) -> bool {
        self.width == 0 && self.height == 0 && self.pixels.is_empty()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut Vec<u8> {
        &mut self.pixels
    }

    /// Replace the buffer and dimensions together, keeping the invariant.
    pub(crate) fn replace(&mut self, pixels: Vec<u8>, width: u32, height: u32, format: PixelFormat) {
        *self = Self::new(pixels, width, height, format);
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`crate::TgaError::UnsupportedVariant`] if the pixel format doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], crate::TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if !self.format.is_memory_compatible(P::format()) {
            return Err(crate::TgaError::UnsupportedVariant(alloc::format!(
                "pixel format mismatch: expected {:?}, got {:?}",
                P::format(),
                self.format
            )));
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(
        &self,
    ) -> Result<imgref::ImgRef<'_, P>, crate::TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}
