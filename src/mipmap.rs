//! Software mipmap generation with a 2×2 box filter.

use crate::image::DecodedImage;

/// Number of levels in a full mip chain, including the base level.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let mut levels = 1;
    let (mut w, mut h) = (width.max(1), height.max(1));
    while w > 1 || h > 1 {
        w = (w / 2).max(1);
        h = (h / 2).max(1);
        levels += 1;
    }
    levels
}

/// Replace `image` with its next mip level, in place.
///
/// Returns `false` once the image is 1×1 (the chain is complete). Each
/// output pixel is the rounded mean of its 2×2 source block, or of a 2×1
/// pair when one dimension is already 1. Output pixel `i` never lies past
/// the first source pixel of its block, so the buffer is reused from its
/// start without a copy.
pub fn halve_in_place(image: &mut DecodedImage) -> bool {
    let (width, height) = (image.width as usize, image.height as usize);
    if width <= 1 && height <= 1 {
        return false;
    }
    let half_w = if width > 1 { width / 2 } else { 1 };
    let half_h = if height > 1 { height / 2 } else { 1 };
    let c = image.format.bytes_per_pixel();
    let buf = image.pixels_mut();

    if width == 1 || height == 1 {
        for i in 0..half_w.max(half_h) {
            for k in 0..c {
                let a = u16::from(buf[2 * i * c + k]);
                let b = u16::from(buf[(2 * i + 1) * c + k]);
                buf[i * c + k] = ((a + b + 1) >> 1) as u8;
            }
        }
    } else {
        let row = width * c;
        for y in 0..half_h {
            for x in 0..half_w {
                let s = 2 * y * row + 2 * x * c;
                let d = (y * half_w + x) * c;
                for k in 0..c {
                    let sum = u16::from(buf[s + k])
                        + u16::from(buf[s + c + k])
                        + u16::from(buf[s + row + k])
                        + u16::from(buf[s + row + c + k]);
                    buf[d + k] = ((sum + 2) >> 2) as u8;
                }
            }
        }
    }

    buf.truncate(half_w * half_h * c);
    image.width = half_w as u32;
    image.height = half_h as u32;
    true
}

/// Iterator over every mip level of an image, base level first.
///
/// Each item is an independent copy; the source image is not modified.
pub struct MipChain {
    next: Option<DecodedImage>,
}

impl MipChain {
    pub fn new(image: &DecodedImage) -> Self {
        Self {
            next: Some(image.clone()),
        }
    }
}

impl Iterator for MipChain {
    type Item = DecodedImage;

    fn next(&mut self) -> Option<DecodedImage> {
        let current = self.next.take()?;
        let mut following = current.clone();
        if halve_in_place(&mut following) {
            self.next = Some(following);
        }
        Some(current)
    }
}
