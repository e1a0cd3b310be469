use core::fmt;
use core::ops::Range;

use crate::env::Size;
use crate::input::{IStr, IStrError, SpanError};

/// Used in macros to associate context with an error.
///
/// The location is taken from the first [IStrError] or [SpanError] in the
/// chain of the error. Without one, only the path is reported.
#[doc(hidden)]
pub fn error_context<E>(path: &str, data: IStr, error: E) -> anyhow::Error
where
    anyhow::Error: From<E>,
{
    let error = error.into();
    let pos = find_range(&error).map(|span| crate::env::pos_from(data.as_data(), span));

    let cli_error = ErrorContext {
        path: path.to_owned(),
        pos,
    };

    error.context(cli_error)
}

/// A line and column combination.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    start: usize,
    end: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0, 0);

    pub(crate) const fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line + 1;
        let start = self.start + 1;

        if self.end > start {
            write!(f, "{line}:{start}-{end}", end = self.end)
        } else {
            write!(f, "{line}:{start}")
        }
    }
}

/// Need to be able to unwrap an error fully in case it's threaded through
/// multiple layers of processing.
fn find_range(error: &anyhow::Error) -> Option<Range<Size>> {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<IStrError>() {
            return Some(e.span.clone());
        }

        if let Some(e) = cause.downcast_ref::<SpanError>() {
            return Some(e.span.clone());
        }
    }

    None
}

/// Location of an error in the input.
#[derive(Debug)]
struct ErrorContext {
    path: String,
    pos: Option<LineCol>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pos {
            Some(pos) => write!(f, "{path}:{pos}", path = self.path),
            None => write!(f, "{path}", path = self.path),
        }
    }
}
