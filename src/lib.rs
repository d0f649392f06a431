//! # zenpam
//!
//! PBM/PGM/PPM and PAM decoder that produces 32-bit RGBA pixels.
//!
//! Every sample depth is normalized to 8 bits per channel and every pixel is
//! packed as `0xRRGGBBAA` (red in the most significant byte), so callers get
//! one pixel format no matter which sub-format the file used.
//!
//! ## Supported Formats
//!
//! - **P1** / **P4** (PBM): bitmap, ASCII or packed bits. Set bits are
//!   black, clear bits white.
//! - **P2** / **P5** (PGM): grayscale, ASCII or binary, maxval up to 65535.
//! - **P3** / **P6** (PPM): RGB, ASCII or binary, maxval up to 65535.
//! - **P7** (PAM): 1 to 4 channels (gray, gray+alpha, RGB, RGBA). `TUPLTYPE`
//!   and other unknown keys are skipped.
//!
//! ## Non-Goals
//!
//! - Encoding
//! - Preserving the original bit depth
//! - PFM and other non-integer variants
//! - Color management
//!
//! ## Usage
//!
//! ```
//! use zenpam::{DecodeRequest, ImageInfo, Unstoppable};
//!
//! let data: &[u8] = b"P1\n2 2\n0 1\n1 0\n";
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! assert_eq!((info.width, info.height), (2, 2));
//!
//! let decoded = zenpam::decode(data, Unstoppable)?;
//! assert_eq!(
//!     decoded.pixels(),
//!     &[0xFFFFFFFF, 0x000000FF, 0x000000FF, 0xFFFFFFFF]
//! );
//!
//! // Failures go to standard error unless a sink is supplied
//! let mut sink = zenpam::CollectingSink::default();
//! let result = DecodeRequest::new(b"P5 2 2 255\n\x00")
//!     .with_sink(&mut sink)
//!     .decode(Unstoppable);
//! assert!(result.is_err());
//! assert_eq!(sink.diagnostics.len(), 1);
//! # Ok::<(), zenpam::PnmError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod diagnostic;
mod error;
mod info;
mod limits;
mod pixel;

pub mod pnm;

use std::io::Read;
use std::path::Path;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use diagnostic::{
    CollectingSink, Diagnostic, DiagnosticSink, LogSink, SilentSink, StderrSink,
};
pub use enough::{Stop, Unstoppable};
pub use error::{ErrorKind, PnmError};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{BLACK, Channels, MAX_MAXVAL, WHITE, pack_rgba, scale};
pub use pnm::PnmFormat;

/// Decode a PNM/PAM image held in memory.
///
/// Failures are also printed to standard error; use [`DecodeRequest`] to
/// redirect or silence them.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, PnmError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a PNM/PAM image from any reader.
pub fn decode_reader<R: Read>(reader: R, stop: impl Stop) -> Result<DecodeOutput, PnmError> {
    DecodeRequest::from_reader(reader).decode(stop)
}

/// Open and decode the file at `path`. The file is closed before returning.
///
/// Use [`DecodeRequest::from_file`] to choose where failures are reported.
pub fn decode_file(path: impl AsRef<Path>, stop: impl Stop) -> Result<DecodeOutput, PnmError> {
    DecodeRequest::from_file(path).decode(stop)
}
