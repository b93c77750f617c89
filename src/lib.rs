//! # targatex
//!
//! Truevision TGA decoder and OpenGL texture-upload pipeline for code
//! written against the old fixed-function image helpers.
//!
//! ## Pipeline
//!
//! 1. [`ByteSource`] reads from a file or a borrowed buffer.
//! 2. The TGA header is validated; anything else is
//!    [`TgaError::UnrecognizedFormat`].
//! 3. Raw or run-length pixel data is decoded, colormaps are expanded,
//!    BGR(A) becomes RGB(A), and rows are put in the requested order.
//! 4. Unless [`LoadFlags::NO_RESCALE`] is set, the image is bilinearly
//!    upsampled to power-of-two dimensions.
//! 5. [`upload_texture`] hands every level to a [`GlContext`], generating
//!    mipmaps in software when the driver cannot.
//!
//! ## Supported Images
//!
//! - Colormapped, truecolor, and grayscale, raw or run-length encoded
//! - 8, 24, or 32 bits per pixel
//! - Colormaps of up to 256 entries of 24 or 32 bits
//! - Any origin corner
//!
//! ## Non-Goals
//!
//! - Other image formats
//! - Encoding
//! - Creating or managing GL contexts and texture objects
//!
//! ## Usage
//!
//! ```no_run
//! use targatex::{ImageInfo, LoadFlags, Unstoppable};
//!
//! let data: &[u8] = &[]; // your TGA bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.image_type);
//!
//! // Decode, top row first, keeping the stored size
//! let mut image = targatex::decode_from_buffer(
//!     data,
//!     LoadFlags::ORIGIN_TOP_LEFT | LoadFlags::NO_RESCALE,
//!     Unstoppable,
//! )?;
//! assert_eq!(
//!     image.pixels().len(),
//!     image.width() as usize * image.height() as usize * image.bytes_per_pixel()
//! );
//! image.release();
//! # Ok::<(), targatex::TgaError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod flags;
mod image;
mod info;
mod limits;
mod pixel;
mod stream;

pub mod mipmap;
pub mod rescale;
pub mod tga;
pub mod upload;

// Re-exports
#[cfg(feature = "std")]
pub use decode::decode_from_path;
pub use decode::{DecodeRequest, decode_from_buffer};
pub use enough::{Stop, Unstoppable};
pub use error::{ErrorKind, TgaError};
pub use flags::LoadFlags;
pub use image::DecodedImage;
pub use info::ImageInfo;
pub use limits::Limits;
pub use mipmap::{MipChain, halve_in_place, mip_level_count};
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::{PixelFormat, gl};
pub use rescale::{next_power_of_two, rescale_to_power_of_two};
pub use stream::{ByteSource, Whence};
#[cfg(feature = "std")]
pub use upload::load_texture_from_path;
pub use upload::{
    ContextError, GlContext, GlVersion, TexImage, load_texture_from_buffer, upload_texture,
};
