/// Helper trait to compare answers against expected values.
///
/// Lets an answer like `(u32, u64)` be compared against an untyped literal
/// such as `(142, 281)` without annotating the literal.
pub trait OutputEq<O = Self>
where
    O: ?Sized,
{
    fn output_eq(&self, other: &O) -> bool;
}

impl<A, B, C, D> OutputEq<(C, D)> for (A, B)
where
    A: OutputEq<C>,
    B: OutputEq<D>,
{
    #[inline]
    fn output_eq(&self, other: &(C, D)) -> bool {
        self.0.output_eq(&other.0) && self.1.output_eq(&other.1)
    }
}

impl<A, B> OutputEq<Option<B>> for Option<A>
where
    A: OutputEq<B>,
{
    #[inline]
    fn output_eq(&self, other: &Option<B>) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.output_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! partial_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OutputEq<$ty> for $ty {
                #[inline]
                fn output_eq(&self, other: &Self) -> bool {
                    other == self
                }
            }
        )*
    };
}

partial_eq!(usize, u32, u64, i32, i64, bool);

#[cfg(test)]
mod tests {
    use super::OutputEq;

    #[test]
    fn test_untyped_literals() {
        assert!((142u32, 281u64).output_eq(&(142, 281)));
        assert!(!(142u32, 281u64).output_eq(&(142, 280)));
        assert!(4361usize.output_eq(&4361));
        assert!(Some(8u32).output_eq(&Some(8u32)));
        assert!(!Some(8u32).output_eq(&None::<u32>));
    }
}
