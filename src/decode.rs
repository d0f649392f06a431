use std::fs::File;
use std::io::Read;
use std::path::Path;

use enough::Stop;

use crate::diagnostic::{DiagnosticSink, StderrSink};
use crate::error::PnmError;
use crate::limits::Limits;
use crate::pnm::{self, ByteSource, PnmFormat, ReadSource};

/// Decoded image: `width * height` pixels packed as `0xRRGGBBAA`, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    pixels: Vec<u32>,
    pub width: u32,
    pub height: u32,
    /// Sub-format the pixels were decoded from.
    pub format: PnmFormat,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u32>, width: u32, height: u32, format: PnmFormat) -> Self {
        Self {
            pixels,
            width,
            height,
            format,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Pixels flattened to `R, G, B, A` bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_be_bytes()).collect()
    }

    /// Convert to typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn to_rgba8(&self) -> Vec<rgb::RGBA8> {
        self.pixels
            .iter()
            .map(|p| {
                let [r, g, b, a] = p.to_be_bytes();
                rgb::RGBA8::new(r, g, b, a)
            })
            .collect()
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.to_rgba8(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Builder for one decode call.
///
/// ```
/// use zenpam::{DecodeRequest, Limits, SilentSink, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 20), ..Limits::default() };
/// let mut sink = SilentSink;
/// let out = DecodeRequest::new(b"P2 2 1 255 0 255")
///     .with_limits(&limits)
///     .with_sink(&mut sink)
///     .decode(Unstoppable)?;
/// assert_eq!(out.pixels(), &[0x000000FF, 0xFFFFFFFF]);
/// # Ok::<(), zenpam::PnmError>(())
/// ```
pub struct DecodeRequest<'a, S = &'a [u8]> {
    // An open failure is held until `decode` so it reaches the sink.
    source: Result<S, PnmError>,
    limits: Option<&'a Limits>,
    sink: Option<&'a mut dyn DiagnosticSink>,
}

impl<'a> DecodeRequest<'a> {
    /// Decode from an in-memory buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self::from_source(data)
    }
}

impl<'a, R: Read> DecodeRequest<'a, ReadSource<R>> {
    /// Decode from any reader; bytes are pulled through an internal buffer.
    pub fn from_reader(reader: R) -> Self {
        Self::from_source(ReadSource::new(reader))
    }
}

impl<'a> DecodeRequest<'a, ReadSource<File>> {
    /// Decode the file at `path`. Failing to open it is reported like any
    /// other decode failure. The file is closed when the request is done.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            source: File::open(path.as_ref())
                .map(ReadSource::new)
                .map_err(PnmError::Io),
            limits: None,
            sink: None,
        }
    }
}

impl<'a, S: ByteSource> DecodeRequest<'a, S> {
    /// Decode from a custom byte source.
    pub fn from_source(source: S) -> Self {
        Self {
            source: Ok(source),
            limits: None,
            sink: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Report failures here instead of standard error.
    pub fn with_sink(mut self, sink: &'a mut dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run the decode. Any failure is reported to the sink once, then returned.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, PnmError> {
        let limits = self.limits;
        let result = self
            .source
            .and_then(|source| pnm::decode(source, limits, &stop));
        if let Err(err) = &result {
            match self.sink {
                Some(sink) => sink.report(err),
                None => StderrSink.report(err),
            }
        }
        result
    }
}
