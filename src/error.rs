use alloc::string::String;
use enough::StopReason;

use crate::upload::ContextError;

/// Errors from TGA decoding, rescaling, and texture upload.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TgaError {
    #[error("not a TGA image")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("image has no pixel data")]
    EmptyImage,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("failed to allocate {bytes} bytes")]
    AllocationFailed { bytes: usize },

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("texture upload failed at mip level {level}")]
    UploadFailed {
        level: u32,
        #[source]
        source: ContextError,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`TgaError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not a TGA image, or uses a variant this crate rejects.
    /// Callers may try another decoder or abort the load.
    Format,
    /// Open, read, or seek failed at the OS boundary.
    Io,
    /// A pixel buffer could not be allocated or would exceed [`crate::Limits`].
    Allocation,
    /// The graphics context rejected a texture upload.
    Upload,
    /// The caller's [`enough::Stop`] fired.
    Cancelled,
}

impl TgaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedFormat
            | Self::InvalidHeader(_)
            | Self::UnsupportedVariant(_)
            | Self::EmptyImage => ErrorKind::Format,
            Self::DimensionsTooLarge { .. }
            | Self::LimitExceeded(_)
            | Self::AllocationFailed { .. } => ErrorKind::Allocation,
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
            Self::UploadFailed { .. } => ErrorKind::Upload,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StopReason> for TgaError {
    fn from(r: StopReason) -> Self {
        TgaError::Cancelled(r)
    }
}
