//! PNM family: P1-P3 (plain PBM/PGM/PPM), P4-P6 (binary PBM/PGM/PPM), P7 (PAM).

mod cursor;
mod decode;
mod header;
mod sample;
mod scanner;

pub use cursor::{ByteSource, ReadSource};

use cursor::Cursor;
use enough::Stop;
use log::debug;

use crate::decode::DecodeOutput;
use crate::error::PnmError;
use crate::info::ImageInfo;
use crate::limits::{BufferSize, Limits};
use crate::pixel::Channels;

/// Which PNM sub-format a file uses, from its magic number.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P1: ASCII bitmap.
    PlainPbm,
    /// P2: ASCII grayscale.
    PlainPgm,
    /// P3: ASCII RGB.
    PlainPpm,
    /// P4: packed binary bitmap.
    Pbm,
    /// P5: binary grayscale.
    Pgm,
    /// P6: binary RGB.
    Ppm,
    /// P7: PAM, 1 to 4 channels.
    Pam,
}

impl PnmFormat {
    /// Look up the format for the digit following `P`.
    pub fn from_magic_digit(digit: u8) -> Option<Self> {
        match digit {
            b'1' => Some(Self::PlainPbm),
            b'2' => Some(Self::PlainPgm),
            b'3' => Some(Self::PlainPpm),
            b'4' => Some(Self::Pbm),
            b'5' => Some(Self::Pgm),
            b'6' => Some(Self::Ppm),
            b'7' => Some(Self::Pam),
            _ => None,
        }
    }

    /// The two magic bytes, e.g. `*b"P6"`.
    pub fn magic(&self) -> [u8; 2] {
        let digit = match self {
            Self::PlainPbm => b'1',
            Self::PlainPgm => b'2',
            Self::PlainPpm => b'3',
            Self::Pbm => b'4',
            Self::Pgm => b'5',
            Self::Ppm => b'6',
            Self::Pam => b'7',
        };
        [b'P', digit]
    }

    /// Whether samples are stored as ASCII text.
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::PlainPbm | Self::PlainPgm | Self::PlainPpm)
    }
}

/// Parsed PNM header (internal).
#[derive(Clone, Debug)]
pub(crate) struct PnmHeader {
    pub format: PnmFormat,
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    pub channels: Channels,
}

fn read_magic<S: ByteSource>(cursor: &mut Cursor<S>) -> Result<PnmFormat, PnmError> {
    if cursor.next()? != Some(b'P') {
        return Err(PnmError::UnrecognizedFormat);
    }
    cursor
        .next()?
        .and_then(PnmFormat::from_magic_digit)
        .ok_or(PnmError::UnrecognizedFormat)
}

fn read_magic_and_header<S: ByteSource>(
    cursor: &mut Cursor<S>,
) -> Result<PnmHeader, PnmError> {
    let format = read_magic(cursor)?;
    header::read_header(cursor, format)
}

/// Probe header for ImageInfo without decoding pixels.
pub(crate) fn probe_header<S: ByteSource>(source: S) -> Result<ImageInfo, PnmError> {
    let header = read_magic_and_header(&mut Cursor::new(source))?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        format: header.format,
        maxval: header.maxval,
        channels: header.channels,
    })
}

/// Reserve the RGBA buffer once the header is known to be valid.
fn allocate_pixels(size: BufferSize) -> Result<Vec<u32>, PnmError> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(size.pixels)
        .map_err(|_| PnmError::Allocation { bytes: size.bytes })?;
    Ok(pixels)
}

/// Decode a whole PNM/PAM stream (called from DecodeRequest).
pub(crate) fn decode<S: ByteSource>(
    source: S,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, PnmError> {
    let mut cursor = Cursor::new(source);
    let header = read_magic_and_header(&mut cursor)?;

    let unbounded = Limits::default();
    let size = limits.unwrap_or(&unbounded).check_header(&header)?;
    let mut pixels = allocate_pixels(size)?;
    stop.check()?;

    decode::decode_pixels(&mut cursor, &header, &mut pixels, stop)?;
    debug_assert_eq!(pixels.len(), header.width as usize * header.height as usize);
    debug!("decoded {} pixels", pixels.len());

    Ok(DecodeOutput::new(
        pixels,
        header.width,
        header.height,
        header.format,
    ))
}
