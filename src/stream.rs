//! Seekable byte source over a file or a borrowed buffer.
//!
//! Every reader in the crate consumes only this type, so the same decoder
//! serves `decode_from_path` and `decode_from_buffer`.

use crate::error::TgaError;

/// Reference point for [`ByteSource::seek`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whence {
    Start,
    Current,
    End,
}

enum Inner<'a> {
    #[cfg(feature = "std")]
    File(std::fs::File),
    Buffer { data: &'a [u8], pos: usize },
    Closed,
}

/// A readable, seekable stream of bytes.
///
/// Buffer-backed sources borrow the caller's memory and never free it.
/// Positional state is shared mutable state, so a source must not be
/// decoded from more than one place at a time (enforced by `&mut self`).
pub struct ByteSource<'a> {
    inner: Inner<'a>,
}

impl<'a> ByteSource<'a> {
    /// Open a file for binary reading.
    #[cfg(feature = "std")]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<ByteSource<'static>, TgaError> {
        let file = std::fs::File::open(path.as_ref())?;
        Ok(ByteSource {
            inner: Inner::File(file),
        })
    }

    /// Wrap an in-memory buffer. Never fails.
    pub fn from_buffer(data: &'a [u8]) -> Self {
        Self {
            inner: Inner::Buffer { data, pos: 0 },
        }
    }

    /// Read up to `buf.len()` bytes. Returns 0 at end of data (not an error).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, TgaError> {
        match &mut self.inner {
            #[cfg(feature = "std")]
            Inner::File(file) => {
                use std::io::Read;
                loop {
                    match file.read(buf) {
                        Ok(n) => return Ok(n),
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
            Inner::Buffer { data, pos } => {
                let available = data.len() - *pos;
                let n = buf.len().min(available);
                buf[..n].copy_from_slice(&data[*pos..*pos + n]);
                *pos += n;
                Ok(n)
            }
            Inner::Closed => Ok(0),
        }
    }

    /// Fill as much of `buf` as the source allows, stopping early only at
    /// end of data. Returns the number of bytes filled.
    pub fn read_fill(&mut self, buf: &mut [u8]) -> Result<usize, TgaError> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }

    /// Current offset from the start of the source.
    pub fn tell(&mut self) -> Result<u64, TgaError> {
        match &mut self.inner {
            #[cfg(feature = "std")]
            Inner::File(file) => {
                use std::io::Seek;
                Ok(file.stream_position()?)
            }
            Inner::Buffer { pos, .. } => Ok(*pos as u64),
            Inner::Closed => Ok(0),
        }
    }

    /// Reposition the source.
    ///
    /// Buffer-backed sources clamp the target to `[0, len]` and never fail.
    /// File-backed sources report the underlying seek error, and reject a
    /// negative target with [`TgaError::Io`].
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<(), TgaError> {
        match &mut self.inner {
            #[cfg(feature = "std")]
            Inner::File(file) => {
                use std::io::{Seek, SeekFrom};
                let from = match whence {
                    Whence::Start => SeekFrom::Start(u64::try_from(offset).map_err(|_| {
                        std::io::Error::new(
                            std::io::ErrorKind::InvalidInput,
                            "seek to a negative position",
                        )
                    })?),
                    Whence::Current => SeekFrom::Current(offset),
                    Whence::End => SeekFrom::End(offset),
                };
                file.seek(from)?;
                Ok(())
            }
            Inner::Buffer { data, pos } => {
                let base = match whence {
                    Whence::Start => 0i64,
                    Whence::Current => *pos as i64,
                    Whence::End => data.len() as i64,
                };
                let target = base.saturating_add(offset).clamp(0, data.len() as i64);
                *pos = target as usize;
                Ok(())
            }
            Inner::Closed => Ok(()),
        }
    }

    /// Total size, known only for buffer-backed sources.
    pub fn size(&self) -> Option<u64> {
        match &self.inner {
            Inner::Buffer { data, .. } => Some(data.len() as u64),
            _ => None,
        }
    }

    /// Release any owned file handle. Idempotent; later reads return 0.
    pub fn close(&mut self) {
        self.inner = Inner::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.inner, Inner::Closed)
    }
}
