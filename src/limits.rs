use alloc::vec::Vec;

use crate::error::TgaError;

/// Caps on image size, checked before any pixel buffer is allocated.
///
/// Applied to the stored dimensions at decode and again to the
/// power-of-two dimensions before a rescale. `Default` sets no limits.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum `width * height`.
    pub max_pixels: Option<u64>,
    /// Maximum size of a single pixel buffer, in bytes.
    pub max_memory_bytes: Option<u64>,
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), TgaError> {
    match limit {
        Some(max) if value > max => Err(TgaError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), TgaError> {
        let (w, h) = (u64::from(width), u64::from(height));
        within("width", w, self.max_width)?;
        within("height", h, self.max_height)?;
        within("pixel count", w * h, self.max_pixels)
    }

    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), TgaError> {
        within("allocation of", bytes as u64, self.max_memory_bytes)
    }
}

/// Zeroed buffer of exactly `bytes`. Reports allocator failure as
/// [`TgaError::AllocationFailed`] instead of aborting.
pub(crate) fn alloc_zeroed(bytes: usize, limits: Option<&Limits>) -> Result<Vec<u8>, TgaError> {
    if let Some(limits) = limits {
        limits.check_memory(bytes)?;
    }
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes)
        .map_err(|_| TgaError::AllocationFailed { bytes })?;
    buf.resize(bytes, 0);
    Ok(buf)
}
