//! Environment specific helpers, like reading input from disk.

use core::fmt;
use core::ops::Range;
use std::fs::File;
use std::io::Read;

use anyhow::{anyhow, Context};

use crate::cli::error::LineCol;
use crate::input::{IStr, NL};

/// An absolute offset into the input being processed.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(usize);

impl Size {
    /// Default zero value.
    pub const ZERO: Self = Self(0);

    #[inline]
    pub(crate) fn usize_range(range: Range<Size>) -> Range<usize> {
        range.start.0..range.end.0
    }

    #[inline]
    pub(crate) fn new(n: usize) -> Self {
        Self(n)
    }

    #[inline]
    pub(crate) fn checked_add(self, b: Size) -> Option<Self> {
        Some(Self(self.0.checked_add(b.0)?))
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.0 = self.0.saturating_add(n);
    }

    #[inline]
    pub(crate) fn saturating_add(self, n: Size) -> Self {
        Self(self.0.saturating_add(n.0))
    }
}

impl fmt::Display for Size {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Translate a byte span into a line and column pair.
pub(crate) fn pos_from(data: &[u8], span: Range<Size>) -> LineCol {
    let span = Size::usize_range(span);

    let Some(before) = data.get(..span.start) else {
        return LineCol::EMPTY;
    };

    let line = memchr::memchr_iter(NL, before).count();
    let line_start = memchr::memrchr(NL, before).map_or(0, |n| n + 1);
    let start = span.start - line_start;

    let len = data
        .get(span)
        .map(|d| memchr::memchr(NL, d).unwrap_or(d.len()))
        .unwrap_or_default();

    LineCol::new(line, start, start.saturating_add(len))
}

/// Read the input at the given path.
///
/// The read buffer is leaked since it's much easier to deal with than
/// lifetimes and the memory will be freed once the process exits *anyway*.
#[inline]
pub fn input(path: &str) -> anyhow::Result<IStr> {
    return inner(path).with_context(|| anyhow!("{path}"));

    #[inline]
    fn inner(path: &str) -> anyhow::Result<IStr> {
        let mut file = File::open(path)?;
        let mut buf = Vec::with_capacity(4096);
        file.read_to_end(&mut buf)?;
        Ok(IStr::new(Vec::leak(buf), Size::ZERO))
    }
}

/// Prepare an input processor.
///
/// The literal names a file in the `inputs` directory of the calling crate.
/// An optional override path takes precedence when it is `Some`.
#[macro_export]
macro_rules! input {
    ($path:literal) => {
        $crate::input!($path, None::<&str>)
    };

    ($path:literal, $override:expr) => {{
        let path: &str = match $override {
            Some(path) => path,
            None => concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/", $path),
        };

        ($crate::env::input(path)?, path)
    }};
}
