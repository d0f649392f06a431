/// Opaque black, produced by a set PBM bit.
pub const BLACK: u32 = 0x0000_00FF;
/// Opaque white, produced by a clear PBM bit.
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Largest maxval a PNM/PAM header may declare.
pub const MAX_MAXVAL: u32 = 65535;

/// Samples stored per pixel in the source file.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels {
    /// One sample, replicated into R, G and B.
    Gray,
    /// Gray plus an explicit alpha sample.
    GrayAlpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl Channels {
    /// Map a PAM `DEPTH` value to its channel layout.
    pub fn from_depth(depth: u32) -> Option<Self> {
        match depth {
            1 => Some(Self::Gray),
            2 => Some(Self::GrayAlpha),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Number of samples per pixel.
    pub fn count(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }
}

/// Pack four 8-bit channels into `0xRRGGBBAA`.
#[inline]
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([r, g, b, a])
}

/// Rescale a sample in `[0, maxval]` to `[0, 255]`, rounding down.
///
/// Returns `None` unless `1 <= maxval <= 65535` and `sample <= maxval`.
pub fn scale(sample: u32, maxval: u32) -> Option<u8> {
    if !(1..=MAX_MAXVAL).contains(&maxval) || sample > maxval {
        return None;
    }
    Some(scale_unchecked(sample, maxval))
}

/// [`scale`] for inputs the header and sample readers have already
/// validated.
#[inline]
pub(crate) fn scale_unchecked(sample: u32, maxval: u32) -> u8 {
    debug_assert!(maxval >= 1 && sample <= maxval);
    // 65535 * 255 fits comfortably in u32
    (sample * 255 / maxval) as u8
}
