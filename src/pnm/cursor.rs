//! Sequential byte sources and the back-trackable cursor the header scanner
//! runs on.

use std::io::{BufRead, BufReader, ErrorKind, Read};

use crate::error::PnmError;

/// A forward-only stream of bytes.
///
/// `Ok(None)` marks end of stream; once returned, every later call returns it
/// too.
pub trait ByteSource {
    fn next_byte(&mut self) -> Result<Option<u8>, PnmError>;
}

impl ByteSource for &[u8] {
    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, PnmError> {
        match self.split_first() {
            Some((&b, rest)) => {
                *self = rest;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }
}

/// Buffered adapter turning any [`Read`] into a [`ByteSource`].
pub struct ReadSource<R> {
    inner: BufReader<R>,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
        }
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>, PnmError> {
        loop {
            match self.inner.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let b = buf[0];
                    self.inner.consume(1);
                    return Ok(Some(b));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PnmError::Io(e)),
            }
        }
    }
}

/// Byte cursor with one-byte lookahead and speculative consumption.
///
/// Bytes read during [`Cursor::speculate`] are journaled; if the speculation
/// fails they are pushed back so the next read sees them again. The
/// underlying source never has to seek.
pub(crate) struct Cursor<S> {
    source: S,
    // LIFO: the next byte to hand out is at the end
    pushback: Vec<u8>,
    journal: Option<Vec<u8>>,
}

impl<S: ByteSource> Cursor<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            pushback: Vec::new(),
            journal: None,
        }
    }

    /// Consume and return the next byte.
    #[inline]
    pub(crate) fn next(&mut self) -> Result<Option<u8>, PnmError> {
        let b = match self.pushback.pop() {
            Some(b) => Some(b),
            None => self.source.next_byte()?,
        };
        if let (Some(journal), Some(b)) = (self.journal.as_mut(), b) {
            journal.push(b);
        }
        Ok(b)
    }

    /// Return the next byte without consuming it.
    pub(crate) fn peek(&mut self) -> Result<Option<u8>, PnmError> {
        if let Some(&b) = self.pushback.last() {
            return Ok(Some(b));
        }
        match self.source.next_byte()? {
            Some(b) => {
                self.pushback.push(b);
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }

    /// Run `f`; if it returns `Ok(false)`, restore every byte it consumed.
    ///
    /// Errors are propagated without restoring; the decode is abandoned
    /// anyway. Speculations do not nest.
    pub(crate) fn speculate<F>(&mut self, f: F) -> Result<bool, PnmError>
    where
        F: FnOnce(&mut Self) -> Result<bool, PnmError>,
    {
        debug_assert!(self.journal.is_none(), "nested speculation");
        self.journal = Some(Vec::new());
        let result = f(self);
        let journal = self.journal.take().unwrap_or_default();
        if let Ok(false) = result {
            self.pushback.extend(journal.into_iter().rev());
        }
        result
    }
}
