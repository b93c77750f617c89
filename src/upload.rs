//! Texture upload against a caller-supplied OpenGL context.
//!
//! The crate never creates, binds, or destroys GL objects. Whatever texture
//! is bound to `GL_TEXTURE_2D` when [`upload_texture`] runs receives the
//! image.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use enough::Stop;

use crate::decode::DecodeRequest;
use crate::error::TgaError;
use crate::flags::LoadFlags;
use crate::image::DecodedImage;
use crate::limits::alloc_zeroed;
use crate::mipmap::halve_in_place;
use crate::pixel::{PixelFormat, gl};

/// Extension that lets the driver build mip levels itself.
pub const EXT_GENERATE_MIPMAP: &str = "GL_SGIS_generate_mipmap";
/// Extension that allows non-power-of-two texture sizes.
pub const EXT_NON_POWER_OF_TWO: &str = "GL_ARB_texture_non_power_of_two";

/// Error reported by a [`GlContext`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ContextError(pub String);

/// OpenGL version of the current context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
}

impl GlVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            revision: 0,
        }
    }

    /// Parse a `GL_VERSION` string such as `"2.1.2 NVIDIA 470.57"`.
    ///
    /// Reads leading `major[.minor[.revision]]` digits and ignores the rest.
    /// Missing components are zero.
    pub fn parse(s: &str) -> Self {
        fn number(s: &str) -> (u32, &str) {
            let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
            let value = s[..end]
                .bytes()
                .fold(0u32, |v, d| v.wrapping_mul(10).wrapping_add(u32::from(d - b'0')));
            (value, &s[end..])
        }

        let (major, rest) = number(s);
        let mut version = Self {
            major,
            ..Self::default()
        };
        if let Some(rest) = rest.strip_prefix('.') {
            let (minor, rest) = number(rest);
            version.minor = minor;
            if let Some(rest) = rest.strip_prefix('.') {
                version.revision = number(rest).0;
            }
        }
        version
    }

    /// OpenGL 1.0, which lacks alpha-only internal
    /// formats and takes a component count as the internal format.
    pub fn is_gl_1_0(&self) -> bool {
        self.major == 1 && self.minor == 0
    }
}

/// The slice of an OpenGL context that texture upload needs.
///
/// Implement this over whatever GL bindings the application uses. All
/// calls target the currently bound context on the calling thread.
pub trait GlContext {
    fn version(&self) -> GlVersion;

    fn extension_supported(&self, name: &str) -> bool;

    /// `glGetIntegerv` for a single value.
    fn get_integer(&self, pname: u32) -> i32;

    /// `glPixelStorei`.
    fn pixel_store(&mut self, pname: u32, value: i32);

    /// `glGetTexParameteriv` for a single value.
    fn get_tex_parameter(&self, target: u32, pname: u32) -> i32;

    /// `glTexParameteri`.
    fn set_tex_parameter(&mut self, target: u32, pname: u32, value: i32);

    /// `glTexImage2D` with `GL_TEXTURE_2D` and `GL_UNSIGNED_BYTE` data.
    fn tex_image_2d(&mut self, image: &TexImage<'_>) -> Result<(), ContextError>;
}

/// Arguments of one `glTexImage2D` call.
#[derive(Clone, Copy, Debug)]
pub struct TexImage<'a> {
    pub target: u32,
    pub level: u32,
    pub internal_format: i32,
    pub width: u32,
    pub height: u32,
    pub format: u32,
    pub data_type: u32,
    pub data: &'a [u8],
}

/// Restores unpack alignment and automatic mipmap state when dropped.
struct UploadState<'c, C: GlContext> {
    ctx: &'c mut C,
    unpack_alignment: i32,
    generate_mipmap: Option<i32>,
}

impl<'c, C: GlContext> UploadState<'c, C> {
    fn enter(ctx: &'c mut C, hardware_mipmaps: bool) -> Self {
        let unpack_alignment = ctx.get_integer(gl::UNPACK_ALIGNMENT);
        ctx.pixel_store(gl::UNPACK_ALIGNMENT, 1);

        let generate_mipmap = if hardware_mipmaps {
            let saved = ctx.get_tex_parameter(gl::TEXTURE_2D, gl::GENERATE_MIPMAP_SGIS);
            ctx.set_tex_parameter(gl::TEXTURE_2D, gl::GENERATE_MIPMAP_SGIS, gl::TRUE);
            Some(saved)
        } else {
            None
        };

        Self {
            ctx,
            unpack_alignment,
            generate_mipmap,
        }
    }
}

impl<C: GlContext> Deref for UploadState<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: GlContext> DerefMut for UploadState<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: GlContext> Drop for UploadState<'_, C> {
    fn drop(&mut self) {
        if let Some(saved) = self.generate_mipmap {
            self.ctx
                .set_tex_parameter(gl::TEXTURE_2D, gl::GENERATE_MIPMAP_SGIS, saved);
        }
        self.ctx
            .pixel_store(gl::UNPACK_ALIGNMENT, self.unpack_alignment);
    }
}

/// Expand an alpha map to white RGBA with the map as alpha.
fn alpha_to_rgba(image: &mut DecodedImage) -> Result<(), TgaError> {
    let count = image.width as usize * image.height as usize;
    let mut rgba: Vec<u8> = alloc_zeroed(count * 4, None)?;
    for (dst, &a) in rgba.chunks_exact_mut(4).zip(image.pixels()) {
        dst.copy_from_slice(&[255, 255, 255, a]);
    }
    let (w, h) = (image.width, image.height);
    image.replace(rgba, w, h, PixelFormat::Rgba);
    Ok(())
}

/// Upload `image` to the texture bound to `GL_TEXTURE_2D`.
///
/// With [`LoadFlags::BUILD_MIPMAPS`] every mip level is uploaded: by the
/// driver when it supports `GL_SGIS_generate_mipmap`, otherwise by halving
/// `image` in place after each level. In the latter case `image` holds the
/// 1×1 level afterwards.
///
/// Unpack alignment and the automatic mipmap flag are restored before
/// returning, on success and on failure. The first rejected level aborts
/// the upload with [`TgaError::UploadFailed`]; levels already uploaded stay.
pub fn upload_texture<C: GlContext>(
    ctx: &mut C,
    image: &mut DecodedImage,
    flags: LoadFlags,
) -> Result<(), TgaError> {
    if image.is_released() {
        return Err(TgaError::EmptyImage);
    }

    let version = ctx.version();
    if version.is_gl_1_0() && image.format == PixelFormat::Alpha {
        log::debug!("upload: expanding alpha map to RGBA for GL 1.0");
        alpha_to_rgba(image)?;
    }

    let build_mipmaps = flags.contains(LoadFlags::BUILD_MIPMAPS);
    let hardware_mipmaps = build_mipmaps && ctx.extension_supported(EXT_GENERATE_MIPMAP);
    let software_mipmaps = build_mipmaps && !hardware_mipmaps;

    let internal_format = if version.is_gl_1_0() {
        image.format.bytes_per_pixel() as i32
    } else {
        image.format.gl_format() as i32
    };
    let format = image.format.gl_format();

    let mut state = UploadState::enter(ctx, hardware_mipmaps);
    let mut level = 0u32;
    loop {
        let tex = TexImage {
            target: gl::TEXTURE_2D,
            level,
            internal_format,
            width: image.width,
            height: image.height,
            format,
            data_type: gl::UNSIGNED_BYTE,
            data: image.pixels(),
        };
        state
            .tex_image_2d(&tex)
            .map_err(|source| TgaError::UploadFailed { level, source })?;

        if !software_mipmaps || !halve_in_place(image) {
            break;
        }
        level += 1;
    }

    log::debug!(
        "upload: {} level(s), {} mipmaps",
        level + 1,
        if hardware_mipmaps {
            "hardware"
        } else if software_mipmaps {
            "software"
        } else {
            "no"
        }
    );
    Ok(())
}

/// Flags adjusted for what `ctx` can sample: without non-power-of-two
/// support the image is always rescaled.
fn texture_flags<C: GlContext>(ctx: &C, flags: LoadFlags) -> LoadFlags {
    if flags.contains(LoadFlags::NO_RESCALE) && !ctx.extension_supported(EXT_NON_POWER_OF_TWO) {
        log::debug!("upload: context lacks {EXT_NON_POWER_OF_TWO}, forcing rescale");
        flags - LoadFlags::NO_RESCALE
    } else {
        flags
    }
}

/// Decode a TGA image held in memory and upload it as the bound texture.
pub fn load_texture_from_buffer<C: GlContext>(
    ctx: &mut C,
    data: &[u8],
    flags: LoadFlags,
    stop: impl Stop,
) -> Result<(), TgaError> {
    let flags = texture_flags(ctx, flags);
    let mut image = DecodeRequest::new(data).with_flags(flags).decode(stop)?;
    upload_texture(ctx, &mut image, flags)
}

/// Decode a TGA image file and upload it as the bound texture.
#[cfg(feature = "std")]
pub fn load_texture_from_path<C: GlContext>(
    ctx: &mut C,
    path: impl AsRef<std::path::Path>,
    flags: LoadFlags,
    stop: impl Stop,
) -> Result<(), TgaError> {
    let flags = texture_flags(ctx, flags);
    let mut image = DecodeRequest::from_path(path.as_ref())
        .with_flags(flags)
        .decode(stop)?;
    upload_texture(ctx, &mut image, flags)
}
