use core::ops::Range;

use thiserror::Error;

use crate::env::Size;

/// The kind of error raised while processing input.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("not utf-8")]
    NotUtf8,
    #[error("expected line")]
    ExpectedLine,
}

/// Error raised through string processing.
#[derive(Debug, Error)]
#[error("{kind} (at {}..{})", .span.start, .span.end)]
pub struct IStrError {
    pub(crate) span: Range<Size>,
    pub(crate) kind: ErrorKind,
}

impl IStrError {
    /// Construct a new input error.
    #[inline]
    pub fn new(span: Range<Size>, kind: ErrorKind) -> Self {
        Self { span, kind }
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// An error raised by a solver while processing a span of input, see
/// [IStr::error][crate::input::IStr::error].
///
/// Displays as the wrapped error together with its causes.
#[derive(Debug, Error)]
#[error("{error:#}")]
pub struct SpanError {
    pub(crate) span: Range<Size>,
    error: anyhow::Error,
}

impl SpanError {
    #[inline]
    pub(crate) fn new(span: Range<Size>, error: anyhow::Error) -> Self {
        Self { span, error }
    }
}
