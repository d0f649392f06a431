use std::io::Read;

use crate::error::PnmError;
use crate::pixel::Channels;
use crate::pnm::{self, PnmFormat, ReadSource};

/// Image metadata read from the header alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PnmFormat,
    /// Sample ceiling declared by the header (1 for bitmaps).
    pub maxval: u32,
    /// Samples per pixel in the file.
    pub channels: Channels,
}

impl ImageInfo {
    /// Parse the magic number and header without touching pixel data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PnmError> {
        pnm::probe_header(data)
    }

    /// Like [`ImageInfo::from_bytes`], reading only as far as the header ends.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PnmError> {
        pnm::probe_header(ReadSource::new(reader))
    }
}
