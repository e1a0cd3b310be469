/// Declare the `main` function of a day.
///
/// The solver is a function taking an [IStr][crate::input::IStr] over the
/// whole input and returning both answers. The `input` literal names a file
/// in the `inputs` directory of the calling crate, which can be overridden
/// with `--input <path>`. If `expect` is specified, the answers are checked
/// against it.
///
/// ```no_run
/// use lib::prelude::*;
///
/// fn solve(mut input: IStr) -> Result<(u32, u32)> {
///     let mut sum = 0;
///
///     while let Some(line) = input.try_line::<IStr>()? {
///         sum += line.as_str()?.parse::<u32>().map_err(|e| line.error(e))?;
///     }
///
///     Ok((sum, sum * 2))
/// }
///
/// lib::entry!(solve, input = "d00.txt", expect = (6u32, 12u32));
/// ```
#[macro_export]
macro_rules! entry {
    ($solve:path, input = $path:literal $(, expect = $expect:expr)? $(,)?) => {
        fn main() -> $crate::prelude::Result<()> {
            let opts = $crate::cli::Opts::parse()?;
            let (input, path) = $crate::input!($path, opts.input());
            let expected = $crate::__expected!($($expect)?);

            match opts.mode {
                $crate::cli::Mode::Default => {
                    let value = match $solve(input) {
                        Ok(value) => value,
                        Err(error) => return Err($crate::cli::error_context(path, input, error)),
                    };

                    $crate::cli::answer(&opts, value, expected)?;
                }
                $crate::cli::Mode::Bench => {
                    let mut b = $crate::cli::Bencher::new();
                    b.iter(&opts, expected, || $solve(input))?;
                }
            }

            Ok(())
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __expected {
    () => {
        None
    };

    ($expect:expr) => {
        Some($expect)
    };
}
