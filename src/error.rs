use enough::StopReason;

/// Errors from PNM/PAM decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid magic number, expected P1-P7")]
    UnrecognizedFormat,

    #[error("invalid character {found:?} in integer")]
    MalformedInteger { found: char },

    #[error("integer does not fit in 32 bits")]
    IntegerOverflow,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("{field} must be between {min}-{max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u32,
        max: u32,
    },

    #[error("{0} must be at least 1")]
    ZeroDimension(&'static str),

    #[error("pixel value {sample} greater than maxval {maxval}")]
    SampleOutOfRange { sample: u32, maxval: u32 },

    #[error("unexpected end of file while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("{what} {value} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    #[error("cannot allocate {bytes} bytes for pixel buffer")]
    Allocation { bytes: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`PnmError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The source could not be opened or a read failed.
    Io,
    /// Bad magic number, malformed token, or a header that never terminates.
    Format,
    /// A header field or pixel sample outside its legal range.
    Range,
    /// The stream ended while more data was required.
    Truncated,
    /// The pixel buffer could not be obtained.
    Allocation,
    /// A caller-supplied [`crate::Limits`] bound was exceeded.
    Limit,
    /// The stop token fired.
    Cancelled,
}

impl PnmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::UnrecognizedFormat | Self::MalformedInteger { .. } | Self::InvalidHeader(_) => {
                ErrorKind::Format
            }
            Self::IntegerOverflow
            | Self::OutOfRange { .. }
            | Self::ZeroDimension(_)
            | Self::SampleOutOfRange { .. } => ErrorKind::Range,
            Self::UnexpectedEof(_) => ErrorKind::Truncated,
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::DimensionsTooLarge { .. } | Self::LimitExceeded { .. } => ErrorKind::Limit,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}
