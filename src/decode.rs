use enough::Stop;

use crate::error::TgaError;
use crate::flags::LoadFlags;
use crate::image::DecodedImage;
use crate::limits::Limits;
use crate::rescale::rescale_to_power_of_two;
use crate::stream::ByteSource;

enum Input<'a> {
    Buffer(&'a [u8]),
    #[cfg(feature = "std")]
    Path(&'a std::path::Path),
}

/// Builder for a single decode.
///
/// ```no_run
/// use targatex::{DecodeRequest, Limits, LoadFlags, Unstoppable};
///
/// let data: &[u8] = &[]; // your TGA bytes
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(data)
///     .with_flags(LoadFlags::ORIGIN_TOP_LEFT | LoadFlags::NO_RESCALE)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{} {:?}", image.width(), image.height(), image.format());
/// # Ok::<(), targatex::TgaError>(())
/// ```
pub struct DecodeRequest<'a> {
    input: Input<'a>,
    flags: LoadFlags,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    /// Decode from an in-memory buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            input: Input::Buffer(data),
            flags: LoadFlags::empty(),
            limits: None,
        }
    }

    /// Decode from a file.
    #[cfg(feature = "std")]
    pub fn from_path(path: &'a std::path::Path) -> Self {
        Self {
            input: Input::Path(path),
            flags: LoadFlags::empty(),
            limits: None,
        }
    }

    pub fn with_flags(mut self, flags: LoadFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the decode, then rescale to powers of two unless
    /// [`LoadFlags::NO_RESCALE`] is set.
    pub fn decode(self, stop: impl Stop) -> Result<DecodedImage, TgaError> {
        let mut src = match self.input {
            Input::Buffer(data) => ByteSource::from_buffer(data),
            #[cfg(feature = "std")]
            Input::Path(path) => ByteSource::open(path)?,
        };
        let decoded = crate::tga::decode(&mut src, self.flags, self.limits, &stop);
        src.close();
        let mut image = decoded?;

        if !self.flags.contains(LoadFlags::NO_RESCALE) {
            stop.check()?;
            rescale_to_power_of_two(&mut image, self.limits)?;
        }
        Ok(image)
    }
}

/// Decode a TGA image held in memory.
pub fn decode_from_buffer(
    data: &[u8],
    flags: LoadFlags,
    stop: impl Stop,
) -> Result<DecodedImage, TgaError> {
    DecodeRequest::new(data).with_flags(flags).decode(stop)
}

/// Decode a TGA image file.
#[cfg(feature = "std")]
pub fn decode_from_path(
    path: impl AsRef<std::path::Path>,
    flags: LoadFlags,
    stop: impl Stop,
) -> Result<DecodedImage, TgaError> {
    DecodeRequest::from_path(path.as_ref())
        .with_flags(flags)
        .decode(stop)
}
