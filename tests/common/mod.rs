//! Hand-built TGA streams for tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use enough::{Stop, StopReason};

pub const DESC_BOTTOM_LEFT: u8 = 0x00;
pub const DESC_BOTTOM_RIGHT: u8 = 0x10;
pub const DESC_TOP_LEFT: u8 = 0x20;
pub const DESC_TOP_RIGHT: u8 = 0x30;

#[derive(Clone, Debug)]
pub struct Tga {
    pub id: Vec<u8>,
    pub colormap_type: u8,
    pub image_type: u8,
    pub colormap_len: u16,
    pub colormap_bits: u8,
    pub width: u16,
    pub height: u16,
    pub bpp: u8,
    pub descriptor: u8,
    pub colormap: Vec<u8>,
    pub data: Vec<u8>,
}

impl Tga {
    /// Uncompressed truecolor (or grayscale for 8 bpp) image.
    pub fn raw(width: u16, height: u16, bpp: u8, data: Vec<u8>) -> Self {
        Self {
            id: Vec::new(),
            colormap_type: 0,
            image_type: if bpp == 8 { 3 } else { 2 },
            colormap_len: 0,
            colormap_bits: 0,
            width,
            height,
            bpp,
            descriptor: DESC_BOTTOM_LEFT,
            colormap: Vec::new(),
            data,
        }
    }

    /// Run-length encoded truecolor (or grayscale) image; `data` holds packets.
    pub fn rle(width: u16, height: u16, bpp: u8, packets: Vec<u8>) -> Self {
        let mut tga = Self::raw(width, height, bpp, packets);
        tga.image_type += 8;
        tga
    }

    /// Colormapped image with 8-bit indices.
    pub fn mapped(width: u16, height: u16, entry_bits: u8, colormap: Vec<u8>, indices: Vec<u8>) -> Self {
        let entry_bytes = usize::from(entry_bits).div_ceil(8);
        Self {
            id: Vec::new(),
            colormap_type: 1,
            image_type: 1,
            colormap_len: (colormap.len() / entry_bytes) as u16,
            colormap_bits: entry_bits,
            width,
            height,
            bpp: 8,
            descriptor: DESC_BOTTOM_LEFT,
            colormap,
            data: indices,
        }
    }

    pub fn descriptor(mut self, descriptor: u8) -> Self {
        self.descriptor = descriptor;
        self
    }

    pub fn header(&self) -> [u8; 18] {
        let mut h = [0u8; 18];
        h[0] = self.id.len() as u8;
        h[1] = self.colormap_type;
        h[2] = self.image_type;
        h[5..7].copy_from_slice(&self.colormap_len.to_le_bytes());
        h[7] = self.colormap_bits;
        h[12..14].copy_from_slice(&self.width.to_le_bytes());
        h[14..16].copy_from_slice(&self.height.to_le_bytes());
        h[16] = self.bpp;
        h[17] = self.descriptor;
        h
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.header().to_vec();
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.colormap);
        out.extend_from_slice(&self.data);
        out
    }
}

/// Reverse the row order of a tightly packed image.
pub fn reverse_rows(pixels: &[u8], row_bytes: usize) -> Vec<u8> {
    pixels
        .chunks_exact(row_bytes)
        .rev()
        .flatten()
        .copied()
        .collect()
}

/// Encode `pixels` as RLE using only raw packets of up to 128 pixels.
pub fn rle_raw_packets(pixels: &[u8], bpp: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for run in pixels.chunks(128 * bpp) {
        out.push((run.len() / bpp - 1) as u8);
        out.extend_from_slice(run);
    }
    out
}

/// Allows `allowed` checks, then reports cancellation. Counts every check.
pub struct StopAfter {
    allowed: AtomicUsize,
    checks: AtomicUsize,
}

impl StopAfter {
    pub fn new(allowed: usize) -> Self {
        Self {
            allowed: AtomicUsize::new(allowed),
            checks: AtomicUsize::new(0),
        }
    }

    pub fn never() -> Self {
        Self::new(usize::MAX)
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::Relaxed)
    }
}

impl Stop for StopAfter {
    fn check(&self) -> Result<(), StopReason> {
        self.checks.fetch_add(1, Ordering::Relaxed);
        self.allowed
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| StopReason::Cancelled)
    }
}
