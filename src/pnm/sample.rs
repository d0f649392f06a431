//! Sample readers: binary (8/16-bit big-endian), ASCII decimal, and packed
//! single-bit.

use super::cursor::{ByteSource, Cursor};
use crate::error::PnmError;
use crate::pixel::scale_unchecked;

/// Something that yields one normalized 8-bit channel value at a time.
pub(crate) trait SampleReader {
    fn read_sample(&mut self) -> Result<u8, PnmError>;
}

fn check_sample(sample: u32, maxval: u32) -> Result<u8, PnmError> {
    if sample > maxval {
        return Err(PnmError::SampleOutOfRange { sample, maxval });
    }
    Ok(scale_unchecked(sample, maxval))
}

/// Fixed-width binary samples: one byte when `maxval <= 255`, otherwise two
/// bytes, most significant first.
pub(crate) struct BinarySamples<'c, S> {
    cursor: &'c mut Cursor<S>,
    maxval: u32,
}

impl<'c, S: ByteSource> BinarySamples<'c, S> {
    pub(crate) fn new(cursor: &'c mut Cursor<S>, maxval: u32) -> Self {
        Self { cursor, maxval }
    }

    fn byte(&mut self) -> Result<u32, PnmError> {
        self.cursor
            .next()?
            .map(u32::from)
            .ok_or(PnmError::UnexpectedEof("pixel data"))
    }
}

impl<S: ByteSource> SampleReader for BinarySamples<'_, S> {
    #[inline]
    fn read_sample(&mut self) -> Result<u8, PnmError> {
        let mut sample = self.byte()?;
        if self.maxval > 255 {
            sample = (sample << 8) | self.byte()?;
        }
        check_sample(sample, self.maxval)
    }
}

/// Whitespace-separated decimal samples.
pub(crate) struct AsciiSamples<'c, S> {
    cursor: &'c mut Cursor<S>,
    maxval: u32,
}

impl<'c, S: ByteSource> AsciiSamples<'c, S> {
    pub(crate) fn new(cursor: &'c mut Cursor<S>, maxval: u32) -> Self {
        Self { cursor, maxval }
    }
}

impl<S: ByteSource> SampleReader for AsciiSamples<'_, S> {
    fn read_sample(&mut self) -> Result<u8, PnmError> {
        let sample = self.cursor.read_integer()?;
        check_sample(sample, self.maxval)
    }
}

/// Packed bits, most significant first, 8 per byte.
///
/// Yields `Ok(true)` for a set bit. Ends (`None`) once a new byte is needed
/// and the source is exhausted; it cannot be restarted.
pub(crate) struct BitReader<'c, S> {
    cursor: &'c mut Cursor<S>,
    current: u8,
    remaining: u8,
}

impl<'c, S: ByteSource> BitReader<'c, S> {
    pub(crate) fn new(cursor: &'c mut Cursor<S>) -> Self {
        Self {
            cursor,
            current: 0,
            remaining: 0,
        }
    }
}

impl<S: ByteSource> Iterator for BitReader<'_, S> {
    type Item = Result<bool, PnmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            match self.cursor.next() {
                Ok(Some(b)) => {
                    self.current = b;
                    self.remaining = 8;
                }
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
        self.remaining -= 1;
        Some(Ok((self.current >> self.remaining) & 1 == 1))
    }
}
