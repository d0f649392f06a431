//! Raster loops: fill the RGBA buffer from the bytes after the header.

use enough::Stop;

use super::cursor::{ByteSource, Cursor};
use super::sample::{AsciiSamples, BinarySamples, BitReader, SampleReader};
use super::{PnmFormat, PnmHeader};
use crate::error::PnmError;
use crate::pixel::{BLACK, Channels, WHITE, pack_rgba};

/// Decode the pixel section described by `header` into `out`.
///
/// `out` must be empty with room for `width * height` pixels; on success it
/// holds exactly that many, in raster order.
pub(crate) fn decode_pixels<S: ByteSource>(
    cursor: &mut Cursor<S>,
    header: &PnmHeader,
    out: &mut Vec<u32>,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let w = header.width as usize;
    let h = header.height as usize;
    match header.format {
        PnmFormat::PlainPbm => decode_ascii_bitmap(cursor, w, h, out, stop),
        PnmFormat::Pbm => decode_binary_bitmap(cursor, w, h, out, stop),
        PnmFormat::PlainPgm | PnmFormat::PlainPpm => {
            let mut samples = AsciiSamples::new(cursor, header.maxval);
            decode_samples(&mut samples, header.channels, w, h, out, stop)
        }
        PnmFormat::Pgm | PnmFormat::Ppm | PnmFormat::Pam => {
            let mut samples = BinarySamples::new(cursor, header.maxval);
            decode_samples(&mut samples, header.channels, w, h, out, stop)
        }
    }
}

/// Gray, gray+alpha, RGB and RGBA, from either sample encoding.
fn decode_samples<R: SampleReader>(
    samples: &mut R,
    channels: Channels,
    w: usize,
    h: usize,
    out: &mut Vec<u32>,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        for _ in 0..w {
            let pixel = match channels {
                Channels::Gray => {
                    let g = samples.read_sample()?;
                    pack_rgba(g, g, g, 0xFF)
                }
                Channels::GrayAlpha => {
                    let g = samples.read_sample()?;
                    let a = samples.read_sample()?;
                    pack_rgba(g, g, g, a)
                }
                Channels::Rgb => {
                    let r = samples.read_sample()?;
                    let g = samples.read_sample()?;
                    let b = samples.read_sample()?;
                    pack_rgba(r, g, b, 0xFF)
                }
                Channels::Rgba => {
                    let r = samples.read_sample()?;
                    let g = samples.read_sample()?;
                    let b = samples.read_sample()?;
                    let a = samples.read_sample()?;
                    pack_rgba(r, g, b, a)
                }
            };
            out.push(pixel);
        }
    }
    Ok(())
}

/// P4: bits run on continuously across rows.
fn decode_binary_bitmap<S: ByteSource>(
    cursor: &mut Cursor<S>,
    w: usize,
    h: usize,
    out: &mut Vec<u32>,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let mut bits = BitReader::new(cursor);
    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        for _ in 0..w {
            let set = bits.next().ok_or(PnmError::UnexpectedEof("pixel data"))??;
            out.push(if set { BLACK } else { WHITE });
        }
    }
    Ok(())
}

/// P1: one `0`/`1` character per pixel. Whitespace, comments and any other
/// byte between them are skipped.
fn decode_ascii_bitmap<S: ByteSource>(
    cursor: &mut Cursor<S>,
    w: usize,
    h: usize,
    out: &mut Vec<u32>,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        let mut x = 0;
        while x < w {
            match cursor.next()? {
                None => return Err(PnmError::UnexpectedEof("pixel data")),
                Some(b'#') => cursor.skip_comment()?,
                Some(b'0') => {
                    out.push(WHITE);
                    x += 1;
                }
                Some(b'1') => {
                    out.push(BLACK);
                    x += 1;
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}
