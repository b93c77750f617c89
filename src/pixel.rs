/// OpenGL enums used for pixel formats and texture upload.
pub mod gl {
    pub const TEXTURE_2D: u32 = 0x0DE1;
    pub const UNSIGNED_BYTE: u32 = 0x1401;
    pub const ALPHA: u32 = 0x1906;
    pub const RGB: u32 = 0x1907;
    pub const RGBA: u32 = 0x1908;
    pub const LUMINANCE: u32 = 0x1909;
    pub const UNPACK_ALIGNMENT: u32 = 0x0CF5;
    pub const GENERATE_MIPMAP_SGIS: u32 = 0x8191;
    pub const TRUE: i32 = 1;
}

/// Pixel memory layout of a decoded image, always 8 bits per channel.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single channel interpreted as brightness.
    Luminance,
    /// Single channel interpreted as coverage (alpha map).
    Alpha,
    /// 3 channels, R G B.
    Rgb,
    /// 4 channels, R G B A.
    Rgba,
}

impl PixelFormat {
    /// Format for a decoded pixel width. One-byte images are luminance
    /// unless `alpha_map` is set.
    pub(crate) fn from_bytes_per_pixel(bpp: usize, alpha_map: bool) -> Self {
        match bpp {
            3 => Self::Rgb,
            4 => Self::Rgba,
            _ if alpha_map => Self::Alpha,
            _ => Self::Luminance,
        }
    }

    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Luminance | Self::Alpha => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// The matching OpenGL pixel format enum.
    pub fn gl_format(&self) -> u32 {
        match self {
            Self::Luminance => gl::LUMINANCE,
            Self::Alpha => gl::ALPHA,
            Self::Rgb => gl::RGB,
            Self::Rgba => gl::RGBA,
        }
    }

    /// Whether this format has the same memory representation as `other`.
    ///
    /// `Luminance` and `Alpha` share the same single-byte layout.
    pub fn is_memory_compatible(&self, other: PixelFormat) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (*self, other),
            (Self::Luminance, Self::Alpha) | (Self::Alpha, Self::Luminance)
        )
    }
}

/// Typed pixels a [`crate::DecodedImage`] can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn format() -> PixelFormat;
}

/// Single-channel images, luminance or alpha map alike.
#[cfg(feature = "rgb")]
impl DecodePixel for rgb::Gray<u8> {
    fn format() -> PixelFormat {
        PixelFormat::Luminance
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn format() -> PixelFormat {
        PixelFormat::Rgb
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn format() -> PixelFormat {
        PixelFormat::Rgba
    }
}
