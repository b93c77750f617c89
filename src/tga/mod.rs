//! Truevision TGA (Targa) reader.
//!
//! Supports version 1 images with these restrictions:
//! - pixel depth 8, 24, or 32 bits
//! - colormaps of 24- or 32-bit entries, at most 256 long, 8-bit indices

pub(crate) mod decode;
mod header;

pub use header::{ImageType, Origin, TgaHeader};

use enough::Stop;

use crate::error::TgaError;
use crate::flags::LoadFlags;
use crate::image::DecodedImage;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::stream::ByteSource;

/// Parse the header and decode the pixels that follow it.
pub(crate) fn decode(
    src: &mut ByteSource<'_>,
    flags: LoadFlags,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedImage, TgaError> {
    let header = TgaHeader::parse(src)?.ok_or(TgaError::UnrecognizedFormat)?;
    stop.check()?;
    decode::decode_pixels(src, &header, flags, limits, stop)
}

/// Probe header for ImageInfo without decoding.
pub(crate) fn probe(src: &mut ByteSource<'_>) -> Result<ImageInfo, TgaError> {
    let header = TgaHeader::parse(src)?.ok_or(TgaError::UnrecognizedFormat)?;
    Ok(ImageInfo::from_header(&header))
}
