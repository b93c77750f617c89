//! TGA pixel decoder: colormap, raw or run-length pixel data, origin
//! normalization, channel reorder, and colormap expansion.
//!
//! The pixel buffer is allocated once at its final (expanded) size. Stored
//! pixels are read into the front of it and, for colormapped images,
//! expanded in place from the last pixel backwards.

use alloc::vec::Vec;

use enough::Stop;

use super::header::{ImageType, TgaHeader};
use crate::error::TgaError;
use crate::flags::LoadFlags;
use crate::image::DecodedImage;
use crate::limits::{Limits, alloc_zeroed};
use crate::pixel::PixelFormat;
use crate::stream::ByteSource;

const MAX_COLORMAP_LEN: u16 = 256;
const RLE_REPEAT_BIT: u8 = 0x80;
const RLE_COUNT_MASK: u8 = 0x7f;

/// Decode the pixel data following a parsed header.
pub(crate) fn decode_pixels(
    src: &mut ByteSource<'_>,
    header: &TgaHeader,
    flags: LoadFlags,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedImage, TgaError> {
    let width = u32::from(header.width);
    let height = u32::from(header.height);
    if width == 0 || height == 0 {
        return Err(TgaError::InvalidHeader(alloc::format!(
            "zero image dimension: {width}x{height}"
        )));
    }
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let colormap = read_colormap(src, header)?;
    let indexed = match (&colormap, header.image_type) {
        (Some(_), ImageType::ColorMapped | ImageType::ColorMappedRle) => {
            if header.bits_per_pixel != 8 {
                return Err(TgaError::UnsupportedVariant(alloc::format!(
                    "colormap indices must be 8 bits, got {}",
                    header.bits_per_pixel
                )));
            }
            true
        }
        _ => false,
    };

    let bpp = header.bytes_per_pixel();
    let out_bpp = if indexed {
        header.colormap_entry_bytes()
    } else {
        bpp
    };
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(TgaError::DimensionsTooLarge { width, height })?;
    let raw_size = pixel_count
        .checked_mul(bpp)
        .ok_or(TgaError::DimensionsTooLarge { width, height })?;
    let expanded_size = pixel_count
        .checked_mul(out_bpp)
        .ok_or(TgaError::DimensionsTooLarge { width, height })?;

    stop.check()?;
    let mut pixels = alloc_zeroed(expanded_size.max(raw_size), limits)?;

    if header.image_type.is_rle() {
        read_rle(src, &mut pixels[..raw_size], bpp, stop)?;
    } else {
        let n = src.read_fill(&mut pixels[..raw_size])?;
        if n < raw_size {
            log::debug!("tga: pixel data truncated, {n} of {raw_size} bytes present");
        }
    }

    stop.check()?;
    let flip_y = header.origin.is_top() != flags.contains(LoadFlags::ORIGIN_TOP_LEFT);
    if flip_y {
        flip_vertical(&mut pixels[..raw_size], width as usize, height as usize, bpp);
    }
    if header.origin.is_right() {
        flip_horizontal(&mut pixels[..raw_size], width as usize, bpp);
    }

    match colormap {
        Some(mut cmap) if indexed => {
            swap_red_blue(&mut cmap, out_bpp);
            stop.check()?;
            expand_colormap(&mut pixels, pixel_count, &cmap, out_bpp);
        }
        _ => swap_red_blue(&mut pixels, bpp),
    }
    pixels.truncate(expanded_size);

    let format = PixelFormat::from_bytes_per_pixel(out_bpp, flags.contains(LoadFlags::ALPHA_MAP));
    log::trace!(
        "tga: decoded {width}x{height} {:?} ({:?}, origin {:?})",
        format,
        header.image_type,
        header.origin
    );
    Ok(DecodedImage::new(pixels, width, height, format))
}

/// Read the colormap table if the header declares a non-empty one.
fn read_colormap(
    src: &mut ByteSource<'_>,
    header: &TgaHeader,
) -> Result<Option<Vec<u8>>, TgaError> {
    if header.colormap_size() == 0 {
        return Ok(None);
    }
    if !matches!(header.colormap_entry_bits, 24 | 32) {
        return Err(TgaError::UnsupportedVariant(alloc::format!(
            "colormap entry size {} bits (only 24 and 32 are supported)",
            header.colormap_entry_bits
        )));
    }
    if header.colormap_length == 0 || header.colormap_length > MAX_COLORMAP_LEN {
        return Err(TgaError::UnsupportedVariant(alloc::format!(
            "colormap length {} (must be 1..={MAX_COLORMAP_LEN})",
            header.colormap_length
        )));
    }
    let mut cmap = alloc_zeroed(header.colormap_size(), None)?;
    src.read_fill(&mut cmap)?;
    Ok(Some(cmap))
}

/// Decompress run-length packets into `out` until it is full.
///
/// Each packet is clamped to the space left in `out`. If the stream ends
/// early the rest of `out` keeps its zero fill.
pub(crate) fn read_rle(
    src: &mut ByteSource<'_>,
    out: &mut [u8],
    bpp: usize,
    stop: &dyn Stop,
) -> Result<(), TgaError> {
    let mut pos = 0usize;
    let mut packets = 0u32;
    let mut pixel = [0u8; 4];
    let pixel = &mut pixel[..bpp];

    while pos < out.len() {
        packets = packets.wrapping_add(1);
        if packets % 4096 == 0 {
            stop.check()?;
        }

        let mut control = [0u8; 1];
        if src.read(&mut control)? == 0 {
            log::debug!("tga: RLE stream ended at {pos} of {} bytes", out.len());
            break;
        }
        let count = usize::from(control[0] & RLE_COUNT_MASK) + 1;
        let bytes = (count * bpp).min(out.len() - pos);
        let dst = &mut out[pos..pos + bytes];

        if control[0] & RLE_REPEAT_BIT != 0 {
            src.read_fill(pixel)?;
            for chunk in dst.chunks_mut(bpp) {
                chunk.copy_from_slice(&pixel[..chunk.len()]);
            }
        } else if src.read_fill(dst)? < bytes {
            break;
        }
        pos += bytes;
    }
    Ok(())
}

/// Reverse row order in place.
pub(crate) fn flip_vertical(pixels: &mut [u8], width: usize, height: usize, bpp: usize) {
    let row = width * bpp;
    if row == 0 {
        return;
    }
    let (top, bottom) = pixels[..row * height].split_at_mut((height / 2) * row);
    for (upper, lower) in top.chunks_exact_mut(row).zip(bottom.rchunks_exact_mut(row)) {
        upper.swap_with_slice(lower);
    }
}

/// Reverse pixel order within every row, in place, a whole pixel at a time.
pub(crate) fn flip_horizontal(pixels: &mut [u8], width: usize, bpp: usize) {
    let row = width * bpp;
    if row == 0 {
        return;
    }
    for line in pixels.chunks_exact_mut(row) {
        for x in 0..width / 2 {
            let (left, right) = line.split_at_mut((width - 1 - x) * bpp);
            left[x * bpp..(x + 1) * bpp].swap_with_slice(&mut right[..bpp]);
        }
    }
}

/// BGR(A) to RGB(A): swap the first and third byte of every pixel.
/// Buffers with fewer than 3 channels are left alone.
pub(crate) fn swap_red_blue(pixels: &mut [u8], bpp: usize) {
    if bpp != 3 && bpp != 4 {
        return;
    }
    for px in pixels.chunks_exact_mut(bpp) {
        px.swap(0, 2);
    }
}

/// Replace the first `count` index bytes of `pixels` with colormap entries.
///
/// Runs from the last pixel to the first: entry `m` is written to
/// `m * entry..(m + 1) * entry`, never below index `m`, so no index is
/// overwritten before it is read. Out-of-range indices expand to zero.
pub(crate) fn expand_colormap(pixels: &mut [u8], count: usize, cmap: &[u8], entry: usize) {
    let entries = cmap.len() / entry;
    for m in (0..count).rev() {
        let idx = usize::from(pixels[m]);
        let dst = m * entry;
        if idx < entries {
            let src = &cmap[idx * entry..(idx + 1) * entry];
            pixels[dst..dst + entry].copy_from_slice(src);
        } else {
            pixels[dst..dst + entry].fill(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use enough::Unstoppable;

    #[test]
    fn vertical_flip_odd_height_keeps_middle_row() {
        let mut px = vec![1, 1, 2, 2, 3, 3];
        flip_vertical(&mut px, 1, 3, 2);
        assert_eq!(px, [3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn horizontal_flip_swaps_whole_pixels() {
        // 3 pixels, 3 bytes each, two rows
        let mut px = vec![
            1, 2, 3, 4, 5, 6, 7, 8, 9, //
            10, 11, 12, 13, 14, 15, 16, 17, 18,
        ];
        flip_horizontal(&mut px, 3, 3);
        assert_eq!(
            px,
            [
                7, 8, 9, 4, 5, 6, 1, 2, 3, //
                16, 17, 18, 13, 14, 15, 10, 11, 12
            ]
        );
    }

    #[test]
    fn swap_leaves_alpha_alone() {
        let mut px = vec![1, 2, 3, 4, 5, 6, 7, 8];
        swap_red_blue(&mut px, 4);
        assert_eq!(px, [3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn swap_ignores_single_channel() {
        let mut px = vec![1, 2, 3];
        swap_red_blue(&mut px, 1);
        assert_eq!(px, [1, 2, 3]);
    }

    #[test]
    fn expansion_aliases_safely() {
        let cmap = [10, 11, 12, 20, 21, 22, 30, 31, 32];
        let mut px = vec![0u8; 4 * 3];
        px[..4].copy_from_slice(&[2, 0, 1, 2]);
        expand_colormap(&mut px, 4, &cmap, 3);
        assert_eq!(px, [30, 31, 32, 10, 11, 12, 20, 21, 22, 30, 31, 32]);
    }

    #[test]
    fn expansion_zeroes_out_of_range_index() {
        let cmap = [1, 2, 3];
        let mut px = vec![0u8; 2 * 3];
        px[..2].copy_from_slice(&[0, 7]);
        expand_colormap(&mut px, 2, &cmap, 3);
        assert_eq!(px, [1, 2, 3, 0, 0, 0]);
    }

    #[test]
    fn rle_raw_and_repeat_packets() {
        // raw packet of 2 one-byte pixels, then repeat 3x
        let data = [0x01, 5, 6, 0x82, 9];
        let mut src = ByteSource::from_buffer(&data);
        let mut out = [0u8; 5];
        read_rle(&mut src, &mut out, 1, &Unstoppable).unwrap();
        assert_eq!(out, [5, 6, 9, 9, 9]);
    }

    #[test]
    fn rle_clamps_final_packet() {
        // repeat 128 pixels into a 3-pixel plane
        let data = [0xFF, 7, 8];
        let mut src = ByteSource::from_buffer(&data);
        let mut out = [0u8; 6];
        read_rle(&mut src, &mut out, 2, &Unstoppable).unwrap();
        assert_eq!(out, [7, 8, 7, 8, 7, 8]);
    }

    struct AlwaysStop;

    impl Stop for AlwaysStop {
        fn check(&self) -> Result<(), enough::StopReason> {
            Err(enough::StopReason::Cancelled)
        }
    }

    #[test]
    fn rle_stops_on_packet_4096() {
        let data: Vec<u8> = [0x00, 1].repeat(4096);
        let mut out = vec![0u8; 4096];
        let mut src = ByteSource::from_buffer(&data);
        let err = read_rle(&mut src, &mut out, 1, &AlwaysStop).unwrap_err();
        assert!(matches!(err, TgaError::Cancelled(_)));
        // packets before the check were decoded
        assert!(out[..4095].iter().all(|&v| v == 1));
        assert_eq!(out[4095], 0);

        let mut out = vec![0u8; 4095];
        let mut src = ByteSource::from_buffer(&data);
        read_rle(&mut src, &mut out, 1, &AlwaysStop).unwrap();
    }

    #[test]
    fn rle_truncated_stream_zero_fills() {
        let data = [0x81, 4];
        let mut src = ByteSource::from_buffer(&data);
        let mut out = [0u8; 5];
        read_rle(&mut src, &mut out, 1, &Unstoppable).unwrap();
        assert_eq!(out, [4, 4, 0, 0, 0]);
    }
}
