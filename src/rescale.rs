//! Bilinear upsampling to power-of-two dimensions, for contexts that cannot
//! sample non-power-of-two textures.

use crate::error::TgaError;
use crate::image::DecodedImage;
use crate::limits::{Limits, alloc_zeroed};

/// Smallest power of two that is `>= n` (1 for 0), or `None` above `1 << 31`.
pub fn next_power_of_two(n: u32) -> Option<u32> {
    n.max(1).checked_next_power_of_two()
}

/// Resize `image` to the next power of two in each dimension.
///
/// Returns `Ok(false)` without touching the buffer when both dimensions
/// already are powers of two. On error the image is left as it was.
pub fn rescale_to_power_of_two(
    image: &mut DecodedImage,
    limits: Option<&Limits>,
) -> Result<bool, TgaError> {
    let (w1, h1) = (image.width, image.height);
    if w1 == 0 || h1 == 0 {
        return Ok(false);
    }
    let (w2, h2) = match (next_power_of_two(w1), next_power_of_two(h1)) {
        (Some(w2), Some(h2)) => (w2, h2),
        _ => {
            return Err(TgaError::DimensionsTooLarge {
                width: w1,
                height: h1,
            });
        }
    };
    if (w2, h2) == (w1, h1) {
        return Ok(false);
    }

    if let Some(limits) = limits {
        limits.check(w2, h2)?;
    }
    let bpp = image.format.bytes_per_pixel();
    let size = (w2 as usize)
        .checked_mul(h2 as usize)
        .and_then(|n| n.checked_mul(bpp))
        .ok_or(TgaError::DimensionsTooLarge {
            width: w2,
            height: h2,
        })?;
    let mut scaled = alloc_zeroed(size, limits)?;
    upsample(
        image.pixels(),
        &mut scaled,
        w1 as usize,
        h1 as usize,
        w2 as usize,
        bpp,
    );

    log::debug!("rescale: {w1}x{h1} -> {w2}x{h2}");
    let format = image.format;
    image.replace(scaled, w2, h2, format);
    Ok(true)
}

fn step(src: usize, dst: usize) -> f32 {
    if dst <= 1 {
        0.0
    } else {
        (src - 1) as f32 / (dst - 1) as f32
    }
}

/// Bilinear resample of a `w1`×`h1` image into `dst` (`w2` wide, height
/// implied by its length).
///
/// The source position advances by `(src - 1) / (dst - 1)` per output pixel
/// along each axis, so the first and last rows and columns map onto the
/// source edges. Neighbour lookups clamp to the last row and column.
fn upsample(src: &[u8], dst: &mut [u8], w1: usize, h1: usize, w2: usize, bpp: usize) {
    let h2 = dst.len() / (w2 * bpp);
    let xstep = step(w1, w2);
    let ystep = step(h1, h2);
    let src_row = w1 * bpp;

    let mut y = 0usize;
    let mut dy = 0.0f32;
    for out_row in dst.chunks_exact_mut(w2 * bpp) {
        let y0 = y.min(h1 - 1);
        let y1 = (y0 + 1).min(h1 - 1);
        let row0 = &src[y0 * src_row..(y0 + 1) * src_row];
        let row1 = &src[y1 * src_row..(y1 + 1) * src_row];

        let mut x = 0usize;
        let mut dx = 0.0f32;
        for out_px in out_row.chunks_exact_mut(bpp) {
            let x0 = x.min(w1 - 1);
            let x1 = (x0 + 1).min(w1 - 1);
            for (k, out) in out_px.iter_mut().enumerate() {
                let a = f32::from(row0[x0 * bpp + k]);
                let b = f32::from(row0[x1 * bpp + k]);
                let c = f32::from(row1[x0 * bpp + k]);
                let d = f32::from(row1[x1 * bpp + k]);
                let top = a + (b - a) * dx;
                let bottom = c + (d - c) * dx;
                let col = top + (bottom - top) * dy;
                *out = ((col + 0.5) as u32).min(255) as u8;
            }
            dx += xstep;
            if dx >= 1.0 {
                x += 1;
                dx -= 1.0;
            }
        }

        dy += ystep;
        if dy >= 1.0 {
            y += 1;
            dy -= 1.0;
        }
    }
}
