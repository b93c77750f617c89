//! TGA file header: 18 bytes, every multi-byte field little-endian.

use crate::error::TgaError;
use crate::stream::{ByteSource, Whence};

pub(crate) const HEADER_LEN: usize = 18;

const ALPHA_MASK: u8 = 0x0f;
const ORIGIN_MASK: u8 = 0x30;
const ORIGIN_SHIFT: u8 = 4;

/// Pixel storage kind declared by the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageType {
    ColorMapped,
    TrueColor,
    Grayscale,
    ColorMappedRle,
    TrueColorRle,
    GrayscaleRle,
}

impl ImageType {
    fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::ColorMapped),
            2 => Some(Self::TrueColor),
            3 => Some(Self::Grayscale),
            9 => Some(Self::ColorMappedRle),
            10 => Some(Self::TrueColorRle),
            11 => Some(Self::GrayscaleRle),
            _ => None,
        }
    }

    /// The on-disk type code.
    pub fn code(self) -> u8 {
        match self {
            Self::ColorMapped => 1,
            Self::TrueColor => 2,
            Self::Grayscale => 3,
            Self::ColorMappedRle => 9,
            Self::TrueColorRle => 10,
            Self::GrayscaleRle => 11,
        }
    }

    pub fn is_rle(self) -> bool {
        matches!(
            self,
            Self::ColorMappedRle | Self::TrueColorRle | Self::GrayscaleRle
        )
    }
}

/// Corner of the image holding the first stored pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Origin {
    fn from_descriptor(descriptor: u8) -> Self {
        match (descriptor & ORIGIN_MASK) >> ORIGIN_SHIFT {
            0 => Self::BottomLeft,
            1 => Self::BottomRight,
            2 => Self::TopLeft,
            _ => Self::TopRight,
        }
    }

    /// First stored row is the top row.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    /// First stored column is the rightmost column.
    pub fn is_right(self) -> bool {
        matches!(self, Self::BottomRight | Self::TopRight)
    }
}

/// Parsed TGA header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub colormap_type: u8,
    pub image_type: ImageType,
    pub colormap_first_index: u16,
    pub colormap_length: u16,
    pub colormap_entry_bits: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub descriptor: u8,
    pub alpha_bits: u8,
    pub origin: Origin,
}

impl TgaHeader {
    /// Interpret an 18-byte header block. `None` if it fails validation.
    pub(crate) fn from_bytes(buf: &[u8; HEADER_LEN]) -> Option<Self> {
        let colormap_type = buf[1];
        let image_type = ImageType::from_u8(buf[2])?;
        let bits_per_pixel = buf[16];
        if colormap_type > 1 || !matches!(bits_per_pixel, 8 | 24 | 32) {
            return None;
        }
        let descriptor = buf[17];
        Some(Self {
            id_length: buf[0],
            colormap_type,
            image_type,
            colormap_first_index: u16::from_le_bytes([buf[3], buf[4]]),
            colormap_length: u16::from_le_bytes([buf[5], buf[6]]),
            colormap_entry_bits: buf[7],
            x_origin: u16::from_le_bytes([buf[8], buf[9]]),
            y_origin: u16::from_le_bytes([buf[10], buf[11]]),
            width: u16::from_le_bytes([buf[12], buf[13]]),
            height: u16::from_le_bytes([buf[14], buf[15]]),
            bits_per_pixel,
            descriptor,
            alpha_bits: descriptor & ALPHA_MASK,
            origin: Origin::from_descriptor(descriptor),
        })
    }

    /// Read and validate a header from `src`.
    ///
    /// Returns `Ok(None)` when the data is not a TGA header; the source is
    /// then back at its pre-call position so another parser can try. On
    /// success the source is positioned past the image ID field.
    pub fn parse(src: &mut ByteSource<'_>) -> Result<Option<Self>, TgaError> {
        let start = src.tell()?;
        let mut buf = [0u8; HEADER_LEN];
        let n = src.read_fill(&mut buf)?;

        let header = if n == HEADER_LEN {
            Self::from_bytes(&buf)
        } else {
            None
        };

        match header {
            Some(header) => {
                src.seek(i64::from(header.id_length), Whence::Current)?;
                Ok(Some(header))
            }
            None => {
                src.seek(start as i64, Whence::Start)?;
                Ok(None)
            }
        }
    }

    /// Bytes per stored pixel (a colormap index for colormapped images).
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel).div_ceil(8)
    }

    /// Bytes per colormap entry.
    pub fn colormap_entry_bytes(&self) -> usize {
        usize::from(self.colormap_entry_bits).div_ceil(8)
    }

    /// Size of the colormap table in the file; zero when absent.
    pub fn colormap_size(&self) -> usize {
        if self.colormap_type == 1 {
            usize::from(self.colormap_length) * self.colormap_entry_bytes()
        } else {
            0
        }
    }
}
