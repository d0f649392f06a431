use crate::error::PnmError;
use crate::pnm::PnmHeader;

/// Caller-chosen ceilings on what a header may ask for.
///
/// Checked once the header has been validated and before the RGBA buffer is
/// reserved. `None` means unbounded; the default is unbounded everywhere.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Ceiling on `width * height`.
    pub max_pixels: Option<u64>,
    /// Ceiling on the output buffer, 4 bytes per pixel.
    pub max_buffer_bytes: Option<usize>,
}

/// Size of the output buffer a header needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BufferSize {
    pub pixels: usize,
    pub bytes: usize,
}

fn within(what: &'static str, value: u64, limit: Option<u64>) -> Result<(), PnmError> {
    match limit {
        Some(limit) if value > limit => Err(PnmError::LimitExceeded { what, value, limit }),
        _ => Ok(()),
    }
}

impl Limits {
    /// Size the RGBA buffer for `header`, failing if it exceeds a limit or
    /// does not fit in memory at all.
    pub(crate) fn check_header(&self, header: &PnmHeader) -> Result<BufferSize, PnmError> {
        let (width, height) = (header.width, header.height);
        within("width", width.into(), self.max_width.map(u64::from))?;
        within("height", height.into(), self.max_height.map(u64::from))?;

        // Two u32 factors cannot overflow u64.
        let count = u64::from(width) * u64::from(height);
        within("pixel count", count, self.max_pixels)?;

        let too_large = || PnmError::DimensionsTooLarge { width, height };
        let pixels = usize::try_from(count).map_err(|_| too_large())?;
        let bytes = pixels
            .checked_mul(size_of::<u32>())
            .ok_or_else(too_large)?;
        within(
            "buffer bytes",
            bytes as u64,
            self.max_buffer_bytes.map(|b| b as u64),
        )?;

        Ok(BufferSize { pixels, bytes })
    }
}
