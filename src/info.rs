use crate::error::TgaError;
use crate::pixel::PixelFormat;
use crate::stream::ByteSource;
use crate::tga::{ImageType, Origin, TgaHeader};

/// Image metadata read from the header alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub image_type: ImageType,
    pub bits_per_pixel: u8,
    pub has_colormap: bool,
    pub alpha_bits: u8,
    pub origin: Origin,
    /// Format a default decode produces (before any rescale).
    pub native_format: PixelFormat,
}

impl ImageInfo {
    /// Probe a TGA header without decoding pixel data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TgaError> {
        crate::tga::probe(&mut ByteSource::from_buffer(data))
    }

    pub(crate) fn from_header(header: &TgaHeader) -> Self {
        let has_colormap = header.colormap_size() > 0;
        let indexed = has_colormap
            && matches!(
                header.image_type,
                ImageType::ColorMapped | ImageType::ColorMappedRle
            );
        let bpp = if indexed {
            header.colormap_entry_bytes()
        } else {
            header.bytes_per_pixel()
        };
        Self {
            width: u32::from(header.width),
            height: u32::from(header.height),
            image_type: header.image_type,
            bits_per_pixel: header.bits_per_pixel,
            has_colormap,
            alpha_bits: header.alpha_bits,
            origin: header.origin,
            native_format: PixelFormat::from_bytes_per_pixel(bpp, false),
        }
    }
}
