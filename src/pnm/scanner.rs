//! Header tokenizer: whitespace, `#` comments, keywords and decimal integers.

use super::cursor::{ByteSource, Cursor};
use crate::error::PnmError;

/// Whitespace as the C locale defines it, vertical tab included.
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

impl<S: ByteSource> Cursor<S> {
    /// Consume the rest of a comment, up to and including the line feed.
    pub(crate) fn skip_comment(&mut self) -> Result<(), PnmError> {
        while let Some(b) = self.next()? {
            if b == b'\n' {
                break;
            }
        }
        Ok(())
    }

    /// Skip whitespace and comments, leaving the first token byte unread.
    pub(crate) fn skip_to_token(&mut self) -> Result<(), PnmError> {
        while let Some(b) = self.peek()? {
            if b == b'#' {
                self.next()?;
                self.skip_comment()?;
            } else if is_space(b) {
                self.next()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Consume one byte and report whether it ends a token.
    ///
    /// End of stream and whitespace terminate; so does `#`, in which case the
    /// comment is consumed as well.
    pub(crate) fn is_terminator(&mut self) -> Result<bool, PnmError> {
        match self.next()? {
            None => Ok(true),
            Some(b'#') => {
                self.skip_comment()?;
                Ok(true)
            }
            Some(b) => Ok(is_space(b)),
        }
    }

    /// Consume `keyword` if it is the whole of the current token.
    ///
    /// On mismatch nothing is consumed.
    pub(crate) fn match_keyword(&mut self, keyword: &[u8]) -> Result<bool, PnmError> {
        self.speculate(|c| {
            for &expected in keyword {
                if c.next()? != Some(expected) {
                    return Ok(false);
                }
            }
            c.is_terminator()
        })
    }

    /// Discard the current token and its terminator.
    pub(crate) fn skip_token(&mut self) -> Result<(), PnmError> {
        while !self.is_terminator()? {}
        Ok(())
    }

    /// Read a non-negative decimal integer token.
    ///
    /// The terminating byte is consumed, which is how the single whitespace
    /// byte between a header and binary pixel data gets skipped.
    pub(crate) fn read_integer(&mut self) -> Result<u32, PnmError> {
        self.skip_to_token()?;
        if self.peek()?.is_none() {
            return Err(PnmError::UnexpectedEof("integer"));
        }

        let mut value: u32 = 0;
        loop {
            match self.next()? {
                None => break,
                Some(b) if is_space(b) => break,
                Some(b'#') => {
                    self.skip_comment()?;
                    break;
                }
                Some(b @ b'0'..=b'9') => {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u32::from(b - b'0')))
                        .ok_or(PnmError::IntegerOverflow)?;
                }
                Some(b) => return Err(PnmError::MalformedInteger { found: b as char }),
            }
        }
        Ok(value)
    }
}
