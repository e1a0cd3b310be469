//! Input parser.

mod error;
mod iter;


use core::mem;
use core::ops;
use std::str::from_utf8;

use bstr::BStr;

pub use self::error::{ErrorKind, IStrError, SpanError};
pub use self::iter::Lines;

pub(self) type Result<T> = std::result::Result<T, IStrError>;
use crate::env::Size;

pub(crate) const NL: u8 = b'\n';

/// Helper to parse input.
#[derive(Debug, Clone, Copy)]
pub struct IStr {
    /// The data being parsed.
    data: &'static [u8],
    /// Absolute index of the start of `data`.
    index: Size,
}

impl IStr {
    /// Construct a new input processor.
    #[inline]
    pub fn new(data: &'static [u8], index: Size) -> Self {
        Self { data, index }
    }

    /// Access index of input string.
    #[inline]
    pub fn index(&self) -> Size {
        self.index
    }

    /// The absolute span covered by the remaining input.
    #[inline]
    pub fn span(&self) -> ops::Range<Size> {
        self.index..self.index.saturating_add(Size::new(self.data.len()))
    }

    /// Test if input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the length of the current input.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Get input being processed.
    #[inline]
    pub fn as_data(&self) -> &'static [u8] {
        self.data
    }

    /// Get remaining binary string of the input.
    #[inline]
    pub fn as_bstr(&self) -> &'static BStr {
        BStr::new(self.data)
    }

    /// Get the remaining input as a string.
    #[inline]
    pub fn as_str(&self) -> Result<&'static str> {
        from_utf8(self.data).map_err(|_| IStrError::new(self.span(), ErrorKind::NotUtf8))
    }

    /// Associate an error with the span of this input, so that it can be
    /// reported with a line and column.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::input::IStr;
    /// use lib::env::Size;
    ///
    /// let mut input = IStr::new(b"1\nfoo\n", Size::ZERO);
    /// let _ = input.line::<IStr>()?;
    /// let line = input.line::<IStr>()?;
    ///
    /// let error = line.error(anyhow::anyhow!("not a number"));
    /// assert_eq!(error.to_string(), "not a number");
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    #[inline]
    pub fn error<E>(&self, error: E) -> SpanError
    where
        anyhow::Error: From<E>,
    {
        SpanError::new(self.span(), anyhow::Error::from(error))
    }

    /// Construct an iterator over the remaining lines of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::input::IStr;
    /// use lib::env::Size;
    ///
    /// let mut input = IStr::new(b"one\ntwo\n\nthree", Size::ZERO);
    /// let lines = input.lines::<&str>().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(lines, ["one", "two", "", "three"]);
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    #[inline]
    pub fn lines<T>(&mut self) -> Lines<'_, T> {
        Lines::new(self)
    }

    /// Parse the next line as `T`, errors with `Err(IStrError)` if there are
    /// no more lines or the line is not a valid value of type `T`.
    #[inline]
    pub fn line<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        let index = self.index;

        let Some(line) = self.try_line()? else {
            return Err(IStrError::new(index..self.index, ErrorKind::ExpectedLine));
        };

        Ok(line)
    }

    /// Parse the next line as `T`, errors with `Err(IStrError)` if the line
    /// is not a valid value of type `T`, returns `Ok(None)` if there are no
    /// more lines to process.
    #[inline]
    pub fn try_line<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        let Some(line) = self.split_once(NL) else {
            return Ok(None);
        };

        T::from_line(line).map(Some)
    }

    /// Split once at the given byte or until the end of string. The returned
    /// input keeps the absolute index of where it starts.
    fn split_once(&mut self, b: u8) -> Option<IStr> {
        if self.data.is_empty() {
            return None;
        }

        let index = self.index;

        let Some(at) = memchr::memchr(b, self.data) else {
            self.index.advance(self.data.len());
            let data = mem::take(&mut self.data);
            return Some(IStr::new(data, index));
        };

        let data = self.data.get(..at)?;
        self.advance(at.checked_add(1)?);
        Some(IStr::new(data, index))
    }

    /// Skip the given number of bytes.
    #[inline]
    fn advance(&mut self, n: usize) {
        let n = n.min(self.data.len());
        self.data = self.data.get(n..).unwrap_or_default();
        self.index = self.index.saturating_add(Size::new(n));
    }
}

/// A value that a single line of input can be converted into.
pub trait FromInput: Sized {
    /// Convert a line, excluding its newline.
    fn from_line(line: IStr) -> Result<Self>;
}

impl FromInput for IStr {
    #[inline]
    fn from_line(line: IStr) -> Result<Self> {
        Ok(line)
    }
}

impl FromInput for &'static [u8] {
    #[inline]
    fn from_line(line: IStr) -> Result<Self> {
        Ok(line.as_data())
    }
}

impl FromInput for &'static str {
    #[inline]
    fn from_line(line: IStr) -> Result<Self> {
        line.as_str()
    }
}

impl FromInput for &'static BStr {
    #[inline]
    fn from_line(line: IStr) -> Result<Self> {
        Ok(line.as_bstr())
    }
}
