use std::marker::PhantomData;

use crate::input::{FromInput, IStr, IStrError};

/// Iterator over lines of an [IStr], see [IStr::lines].
pub struct Lines<'a, T> {
    input: &'a mut IStr,
    _marker: PhantomData<T>,
}

impl<'a, T> Lines<'a, T> {
    pub(crate) fn new(input: &'a mut IStr) -> Self {
        Self {
            input,
            _marker: PhantomData,
        }
    }
}

impl<T> Iterator for Lines<'_, T>
where
    T: FromInput,
{
    type Item = Result<T, IStrError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.input.try_line().transpose()
    }
}
