//! CLI helpers.

mod bencher;
pub(crate) mod error;
mod output;
mod output_eq;
mod percentiles;
mod stdout_logger;

use core::fmt;
use core::ops::AddAssign;
use core::time::Duration;
use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

pub use self::bencher::Bencher;
pub use self::error::{error_context, LineCol};
pub(crate) use self::output::{Kind, Output, OutputKind};
pub use self::output_eq::OutputEq;
pub(crate) use self::percentiles::Percentiles;

static STDOUT_LOGGER: stdout_logger::StdoutLogger = stdout_logger::StdoutLogger;

/// Run mode.
#[derive(Default)]
pub enum Mode {
    /// Default run mode.
    #[default]
    Default,
    /// Run as benchmark.
    Bench,
}

/// Input options.
#[derive(Default)]
pub struct Opts {
    /// Run as a benchmark.
    pub mode: Mode,
    /// Run in verbose mode.
    verbose: bool,
    /// Output JSON report.
    json: bool,
    /// Warmup period.
    warmup: Option<u64>,
    /// Bench period.
    time_limit: Option<u64>,
    /// Number of times to run benches.
    count: Option<usize>,
    /// Read input from this path instead of the default.
    input: Option<String>,
}

impl Opts {
    /// Parse CLI options.
    pub fn parse() -> Result<Self> {
        let args = std::env::args_os()
            .skip(1)
            .map(|arg| arg.into_string().map_err(|_| anyhow!("non-utf8 argument")))
            .collect::<Result<Vec<_>>>()?;

        let opts = Self::parse_from(args)?;

        if !opts.json {
            let level = if opts.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            };

            log::set_max_level(level);
            log::set_logger(&STDOUT_LOGGER)
                .map_err(|error| anyhow!("failed to set log: {error}"))?;
        }

        Ok(opts)
    }

    /// Parse options from the given arguments.
    fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = Self::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--bench" => {
                    if !matches!(opts.mode, Mode::Default) {
                        bail!("duplicate `--bench` arguments");
                    }

                    opts.mode = Mode::Bench;
                }
                "--verbose" => {
                    opts.verbose = true;
                }
                "--warmup" => {
                    let warmup = it.next().context("missing argument to `--warmup`")?;
                    opts.warmup = Some(warmup.parse().context("bad argument to `--warmup`")?);
                }
                "--time-limit" => {
                    let time_limit = it.next().context("missing argument to `--time-limit`")?;
                    opts.time_limit = Some(
                        time_limit
                            .parse()
                            .context("bad argument to `--time-limit`")?,
                    );
                }
                "--count" => {
                    let count = it.next().context("missing argument to `--count`")?;
                    opts.count = Some(count.parse().context("bad argument to `--count`")?);
                }
                "--input" => {
                    opts.input = Some(it.next().context("missing argument to `--input`")?);
                }
                "--json" => {
                    opts.json = true;
                }
                "--" => {
                    break;
                }
                other => {
                    bail!("unsupported argument: {other}");
                }
            }
        }

        Ok(opts)
    }

    /// Input path override, if any.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn output_kind(&self) -> OutputKind {
        if self.json {
            OutputKind::Json
        } else {
            OutputKind::Normal
        }
    }
}

/// Report the answer of a single run, checking it against the expected value
/// if one is provided.
pub fn answer<O, C>(opts: &Opts, value: O, expected: Option<C>) -> Result<()>
where
    O: fmt::Debug + OutputEq<C>,
    C: fmt::Debug,
{
    let stdout = std::io::stdout();
    let mut o = Output::new(stdout.lock(), opts.output_kind());
    write_answer(&mut o, value, expected)
}

fn write_answer<O, C>(o: &mut Output<impl Write>, value: O, expected: Option<C>) -> Result<()>
where
    O: fmt::Debug + OutputEq<C>,
    C: fmt::Debug,
{
    o.message(Kind::Answer, format_args!("{value:?}"))?;

    if let Some(expected) = &expected {
        if !value.output_eq(expected) {
            let error = anyhow!("{value:?} (value) != {expected:?} (expected)");
            o.message(Kind::Error, &error)?;
            return Err(error);
        }
    }

    Ok(())
}

#[derive(Default, Debug, Deserialize, Serialize)]
pub struct Report {
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl Report {
    fn new(samples: &[Duration], percentiles: &Percentiles) -> Self {
        let count = samples.len();
        let sum = samples.iter().copied().sum::<Duration>();

        let avg = if count == 0 {
            Duration::default()
        } else {
            Duration::from_nanos(
                u64::try_from(sum.as_nanos() / (count as u128)).unwrap_or_default(),
            )
        };

        Self {
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
            p50: percentiles.get(5000),
            p95: percentiles.get(9500),
            p99: percentiles.get(9900),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            count,
            min,
            max,
            avg,
            p50,
            p95,
            p99,
        } = self;

        write!(f, "count: {count}, min: {min:?}, max: {max:?}, avg: {avg:?}, 50th: {p50:?}, 95th: {p95:?}, 99th: {p99:?}")
    }
}

impl AddAssign<&Report> for Report {
    fn add_assign(&mut self, rhs: &Report) {
        self.count += rhs.count;
        self.min += rhs.min;
        self.max += rhs.max;
        self.avg += rhs.avg;
        self.p50 += rhs.p50;
        self.p95 += rhs.p95;
        self.p99 += rhs.p99;
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::{write_answer, Mode, Opts, Output, OutputKind, Percentiles, Report};

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_opts() {
        let opts = Opts::parse_from(args(&[
            "--bench",
            "--count",
            "10",
            "--input",
            "inputs/examples/d01-1.txt",
            "--",
            "--ignored",
        ]))
        .unwrap();

        assert!(matches!(opts.mode, Mode::Bench));
        assert_eq!(opts.count, Some(10));
        assert_eq!(opts.input(), Some("inputs/examples/d01-1.txt"));
        assert!(!opts.json);
    }

    #[test]
    fn test_parse_opts_errors() {
        assert!(Opts::parse_from(args(&["--bench", "--bench"])).is_err());
        assert!(Opts::parse_from(args(&["--count"])).is_err());
        assert!(Opts::parse_from(args(&["--count", "many"])).is_err());
        assert!(Opts::parse_from(args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_answer_normal() {
        let mut out = Vec::new();
        let mut o = Output::new(&mut out, OutputKind::Normal);
        write_answer(&mut o, (142u32, 281u32), Some((142u32, 281u32))).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "answer: (142, 281)\n");
    }

    #[test]
    fn test_answer_mismatch() {
        let mut out = Vec::new();
        let mut o = Output::new(&mut out, OutputKind::Json);
        let result = write_answer(&mut o, (8u32, 2286u32), Some((8u32, 0u32)));
        assert!(result.is_err());

        let out = String::from_utf8(out).unwrap();
        let mut lines = out.lines();

        let answer: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(answer["type"], "message");
        assert_eq!(answer["data"]["kind"], "answer");
        assert_eq!(answer["data"]["output"], "(8, 2286)");

        let error: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(error["data"]["kind"], "error");
        assert_eq!(error["data"]["output"], "(8, 2286) (value) != (8, 0) (expected)");
    }

    #[test]
    fn test_report_summary() {
        let samples = (1..=100).map(Duration::from_millis).collect::<Vec<_>>();
        let mut percentiles = Percentiles::new();
        percentiles.insert(5000, &samples);
        percentiles.insert(9500, &samples);
        percentiles.insert(9900, &samples);

        let report = Report::new(&samples, &percentiles);
        assert_eq!(report.count, 100);
        assert_eq!(report.min, Duration::from_millis(1));
        assert_eq!(report.max, Duration::from_millis(100));
        assert_eq!(report.avg, Duration::from_micros(50500));
        assert_eq!(report.p50, Duration::from_millis(51));
        assert_eq!(report.p95, Duration::from_millis(96));
        assert_eq!(report.p99, Duration::from_millis(100));

        let mut total = Report::default();
        total += &report;
        total += &report;
        assert_eq!(total.count, 200);
    }
}
