//! The three header grammars: classic (`W H MAXVAL`), bitmap (`W H`) and
//! keyed PAM (`KEY VALUE ... ENDHDR`).

use log::{debug, trace};

use super::cursor::{ByteSource, Cursor};
use super::{PnmFormat, PnmHeader};
use crate::error::PnmError;
use crate::pixel::{Channels, MAX_MAXVAL};

/// Read the header that follows the magic number of `format`.
///
/// On return the cursor sits on the first byte of pixel data.
pub(crate) fn read_header<S: ByteSource>(
    cursor: &mut Cursor<S>,
    format: PnmFormat,
) -> Result<PnmHeader, PnmError> {
    let header = match format {
        PnmFormat::PlainPbm | PnmFormat::Pbm => read_bitmap_header(cursor, format)?,
        PnmFormat::PlainPgm | PnmFormat::Pgm => {
            read_classic_header(cursor, format, Channels::Gray)?
        }
        PnmFormat::PlainPpm | PnmFormat::Ppm => {
            read_classic_header(cursor, format, Channels::Rgb)?
        }
        PnmFormat::Pam => read_pam_header(cursor)?,
    };
    debug!(
        "{:?}: {}x{}, maxval {}, {:?}",
        header.format, header.width, header.height, header.maxval, header.channels
    );
    Ok(header)
}

fn read_classic_header<S: ByteSource>(
    cursor: &mut Cursor<S>,
    format: PnmFormat,
    channels: Channels,
) -> Result<PnmHeader, PnmError> {
    let width = check_dimension(cursor.read_integer()?, "width")?;
    let height = check_dimension(cursor.read_integer()?, "height")?;
    let maxval = check_maxval(cursor.read_integer()?)?;
    Ok(PnmHeader {
        format,
        width,
        height,
        maxval,
        channels,
    })
}

fn read_bitmap_header<S: ByteSource>(
    cursor: &mut Cursor<S>,
    format: PnmFormat,
) -> Result<PnmHeader, PnmError> {
    let width = check_dimension(cursor.read_integer()?, "width")?;
    let height = check_dimension(cursor.read_integer()?, "height")?;
    Ok(PnmHeader {
        format,
        width,
        height,
        maxval: 1,
        channels: Channels::Gray,
    })
}

fn read_pam_header<S: ByteSource>(cursor: &mut Cursor<S>) -> Result<PnmHeader, PnmError> {
    // Absent keys stay zero and fail validation below.
    let mut width = 0;
    let mut height = 0;
    let mut depth = 0;
    let mut maxval = 0;

    loop {
        cursor.skip_to_token()?;
        if cursor.peek()?.is_none() {
            return Err(PnmError::InvalidHeader("PAM header is missing ENDHDR".into()));
        }

        if cursor.match_keyword(b"WIDTH")? {
            width = cursor.read_integer()?;
        } else if cursor.match_keyword(b"HEIGHT")? {
            height = cursor.read_integer()?;
        } else if cursor.match_keyword(b"DEPTH")? {
            depth = cursor.read_integer()?;
        } else if cursor.match_keyword(b"MAXVAL")? {
            maxval = cursor.read_integer()?;
        } else if cursor.match_keyword(b"ENDHDR")? {
            break;
        } else {
            // Unknown key (TUPLTYPE among them) and its value token.
            cursor.skip_token()?;
            cursor.skip_to_token()?;
            cursor.skip_token()?;
            trace!("skipped unknown PAM header key");
        }
    }

    let channels = Channels::from_depth(depth).ok_or(PnmError::OutOfRange {
        field: "depth",
        value: u64::from(depth),
        min: 1,
        max: 4,
    })?;
    let maxval = check_maxval(maxval)?;
    let width = check_dimension(width, "width")?;
    let height = check_dimension(height, "height")?;

    Ok(PnmHeader {
        format: PnmFormat::Pam,
        width,
        height,
        maxval,
        channels,
    })
}

fn check_dimension(value: u32, field: &'static str) -> Result<u32, PnmError> {
    if value == 0 {
        return Err(PnmError::ZeroDimension(field));
    }
    Ok(value)
}

fn check_maxval(maxval: u32) -> Result<u32, PnmError> {
    if !(1..=MAX_MAXVAL).contains(&maxval) {
        return Err(PnmError::OutOfRange {
            field: "maxval",
            value: u64::from(maxval),
            min: 1,
            max: MAX_MAXVAL,
        });
    }
    Ok(maxval)
}
