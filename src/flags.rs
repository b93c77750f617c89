bitflags::bitflags! {
    /// Options for decoding and uploading an image.
    ///
    /// Bit values match the legacy image-loading API so flags can be passed
    /// through unchanged from old client code.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LoadFlags: u32 {
        /// Keep the stored dimensions instead of rescaling to powers of two.
        const NO_RESCALE = 0x0000_0001;
        /// Return rows top-to-bottom. The default is bottom-to-top, the
        /// OpenGL texture convention.
        const ORIGIN_TOP_LEFT = 0x0000_0002;
        /// Upload every mipmap level, in hardware when the context allows it.
        const BUILD_MIPMAPS = 0x0000_0004;
        /// Tag single-channel images as alpha maps rather than luminance.
        const ALPHA_MAP = 0x0000_0008;
    }
}
