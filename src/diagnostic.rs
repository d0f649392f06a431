//! Where decode failures are reported.
//!
//! The decode entry points hand the final error to a [`DiagnosticSink`]
//! exactly once before returning it. The default sink prints one line to
//! standard error.

use crate::error::{ErrorKind, PnmError};

/// Receives each failed decode's error.
pub trait DiagnosticSink {
    fn report(&mut self, error: &PnmError);
}

/// Prints `error reading PNM file: <message>` to standard error.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, error: &PnmError) {
        eprintln!("error reading PNM file: {error}");
    }
}

/// Forwards to `log::error!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, error: &PnmError) {
        log::error!("error reading PNM file ({:?}): {error}", error.kind());
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn report(&mut self, _error: &PnmError) {}
}

/// A structured copy of a reported error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
}

/// Keeps every report, for inspection after the fact.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, error: &PnmError) {
        self.diagnostics.push(Diagnostic {
            kind: error.kind(),
            message: error.to_string(),
        });
    }
}

impl<F: FnMut(&PnmError)> DiagnosticSink for F {
    fn report(&mut self, error: &PnmError) {
        self(error)
    }
}
