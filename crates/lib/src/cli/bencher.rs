use core::fmt;
use core::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{bail, Error, Result};

use crate::cli::{Kind, Opts, Output, OutputEq, Percentiles, Report};

/// Default warmup period in milliseconds.
const DEFAULT_WARMUP: u64 = 100;

/// Default time limit in milliseconds.
const DEFAULT_TIME_LIMIT: u64 = 400;

/// Percentiles recorded for each report.
const PERCENTILES: [u32; 5] = [2500, 5000, 9500, 9900, 9999];

#[derive(Default)]
pub struct Bencher {}

impl Bencher {
    /// Construct a new bencher.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bench the given fn.
    #[inline]
    pub fn iter<T, O, C, E>(&mut self, opts: &Opts, expected: Option<C>, iter: T) -> Result<()>
    where
        T: FnMut() -> Result<O, E>,
        O: fmt::Debug + OutputEq<C>,
        C: fmt::Debug,
        Error: From<E>,
    {
        let stdout = std::io::stdout();
        let mut o = Output::new(stdout.lock(), opts.output_kind());

        if let Err(e) = self.inner_iter(&mut o, opts, expected.as_ref(), iter) {
            o.message(Kind::Error, &e)?;
            return Err(e);
        }

        Ok(())
    }

    fn inner_iter<T, O, C, E>(
        &mut self,
        o: &mut Output<impl Write>,
        opts: &Opts,
        expected: Option<&C>,
        mut iter: T,
    ) -> Result<()>
    where
        T: FnMut() -> Result<O, E>,
        O: fmt::Debug + OutputEq<C>,
        C: fmt::Debug,
        Error: From<E>,
    {
        let warmup = Duration::from_millis(opts.warmup.unwrap_or(DEFAULT_WARMUP));
        let time_limit = Duration::from_millis(opts.time_limit.unwrap_or(DEFAULT_TIME_LIMIT));

        if !warmup.is_zero() {
            o.message(Kind::Info, format_args!("warming up ({warmup:?})..."))?;
            let start = Instant::now();

            while start.elapsed() < warmup {
                sample(&mut iter, expected)?;
            }
        }

        let mut samples = Vec::new();

        if let Some(count) = opts.count {
            let count = count.max(1);
            o.message(Kind::Info, format_args!("running benches {count} time(s)..."))?;

            for _ in 0..count {
                samples.push(sample(&mut iter, expected)?);
            }
        } else {
            o.message(Kind::Info, format_args!("running benches ({time_limit:?})..."))?;
            let start = Instant::now();

            loop {
                samples.push(sample(&mut iter, expected)?);

                if start.elapsed() >= time_limit {
                    break;
                }
            }
        }

        samples.sort();

        let mut percentiles = Percentiles::new();

        for p in PERCENTILES {
            percentiles.insert(p, &samples);
        }

        let report = Report::new(&samples, &percentiles);
        o.report(&report)?;
        Ok(())
    }
}

/// Run the function once, checking its output and returning how long it took.
fn sample<T, O, C, E>(iter: &mut T, expected: Option<&C>) -> Result<Duration>
where
    T: FnMut() -> Result<O, E>,
    O: fmt::Debug + OutputEq<C>,
    C: fmt::Debug,
    Error: From<E>,
{
    let before = Instant::now();
    let value = iter()?;
    let elapsed = before.elapsed();

    if let Some(expect) = expected {
        if !value.output_eq(expect) {
            bail!("{value:?} (value) != {expect:?} (expected)");
        }
    }

    black_box(value);
    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::Bencher;
    use crate::cli::{Opts, Output, OutputKind, Report};

    fn opts(count: &str) -> Opts {
        Opts::parse_from(["--bench", "--warmup", "0", "--count", count].map(String::from))
            .unwrap()
    }

    #[test]
    fn test_fixed_count() {
        let opts = opts("3");
        let mut out = Vec::new();
        let mut o = Output::new(&mut out, OutputKind::Json);
        let mut runs = 0;

        Bencher::new()
            .inner_iter(&mut o, &opts, Some(&(142u32, 281u32)), || -> Result<_> {
                runs += 1;
                Ok((142u32, 281u32))
            })
            .unwrap();

        assert_eq!(runs, 3);

        let out = String::from_utf8(out).unwrap();
        let line: serde_json::Value = serde_json::from_str(out.lines().last().unwrap()).unwrap();
        assert_eq!(line["type"], "report");

        let report: Report = serde_json::from_value(line["data"].clone()).unwrap();
        assert_eq!(report.count, 3);
        assert!(report.min <= report.max);
    }

    #[test]
    fn test_count_runs_at_least_once() {
        let opts = opts("0");
        let mut out = Vec::new();
        let mut o = Output::new(&mut out, OutputKind::Normal);
        let mut runs = 0;

        Bencher::new()
            .inner_iter(&mut o, &opts, None::<&u32>, || -> Result<_> {
                runs += 1;
                Ok(7u32)
            })
            .unwrap();

        assert_eq!(runs, 1);
        let out = String::from_utf8(out).unwrap();
        assert!(out.lines().last().unwrap().starts_with("count: 1,"));
    }

    #[test]
    fn test_mismatch_fails() {
        let opts = opts("3");
        let mut out = Vec::new();
        let mut o = Output::new(&mut out, OutputKind::Json);
        let mut runs = 0;

        let error = Bencher::new()
            .inner_iter(&mut o, &opts, Some(&(8u32, 0u32)), || -> Result<_> {
                runs += 1;
                Ok((8u32, 2286u32))
            })
            .unwrap_err();

        assert_eq!(runs, 1);
        assert_eq!(error.to_string(), "(8, 2286) (value) != (8, 0) (expected)");

        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("\"report\""));
    }
}
