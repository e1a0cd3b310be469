pub mod cli;
pub mod env;
pub mod grid;
pub mod input;
mod macros;

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::grid::{Grid, GridExt};
    pub use crate::input::IStr;
    pub use anyhow::{anyhow, bail, ensure, Context, Result};
    pub type ArrayVec<T, const N: usize = 16> = arrayvec::ArrayVec<T, N>;
    pub use bstr::{BStr, ByteSlice};
}
