//! Builds and runs every day of a year, collecting answers and benchmark
//! reports.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use lib::cli::Report;
use serde::{de::IntoDeserializer, Deserialize};

/// Package built when none is specified.
const DEFAULT_PACKAGE: &str = "y2023";

#[derive(Debug, Deserialize)]
struct Target {
    name: String,
    kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    target: Target,
    executable: Option<PathBuf>,
}

struct Executable {
    name: String,
    path: PathBuf,
}

#[derive(Default)]
struct Opts {
    quiet: bool,
    verbose: bool,
    package: Option<String>,
    args: Vec<OsString>,
}

impl Opts {
    /// Parse CLI options.
    pub fn parse() -> Result<Self> {
        let mut opts = Self::default();
        let mut it = std::env::args_os().skip(1);

        while let Some(arg) = it.next() {
            let Some(arg) = arg.to_str() else {
                bail!("non-utf8 argument");
            };

            match arg {
                "-q" | "--quiet" => {
                    opts.quiet = true;
                }
                "-V" | "--verbose" => {
                    opts.verbose = true;
                }
                "-p" | "--package" => {
                    let package = it.next().context("missing argument to `--package`")?;
                    let package = package
                        .into_string()
                        .ok()
                        .context("non-utf8 argument to `--package`")?;
                    opts.package = Some(package);
                }
                "--" => {
                    break;
                }
                other => {
                    bail!("unsupported argument: {other}");
                }
            }
        }

        opts.args.extend(it);
        Ok(opts)
    }

    /// Test if options are verbose.
    fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse()?;
    let package = opts.package.as_deref().unwrap_or(DEFAULT_PACKAGE);

    let mut executables = build(package)?;
    executables.sort_by(|a, b| a.name.cmp(&b.name));

    let mut total = Report::default();
    let mut failed = 0usize;

    for e in executables {
        let mut cmd = Command::new(&e.path);
        cmd.stdout(Stdio::piped());
        cmd.args(&opts.args[..]);
        cmd.arg("--json");

        let mut child = cmd.spawn()?;
        let output = child.stdout.take().context("missing stdout")?;
        let output = serde_json::Deserializer::from_reader(output).into_iter();

        for value in output {
            let value: serde_json::Value = value?;

            match value.get("type").and_then(|d| d.as_str()) {
                Some("report") => {
                    let report = Data::<Report>::deserialize(value.into_deserializer())?.data;

                    if !opts.quiet {
                        println!("{name}: {report}", name = e.name);
                    }

                    total += &report;
                }
                Some("message") => {
                    let message = Data::<Message>::deserialize(value.into_deserializer())?.data;

                    if opts.is_verbose() || message.is_important() {
                        println!(
                            "{name}: {kind}: {output}",
                            name = e.name,
                            kind = message.kind,
                            output = message.output
                        );
                    }
                }
                _ => {}
            }
        }

        let status = child.wait()?;

        if !status.success() {
            failed += 1;
        }

        if opts.is_verbose() {
            println!("{name}: {status}", name = e.name);
        }
    }

    if total.count > 0 {
        println!("total: {total}");
    }

    if failed > 0 {
        bail!("{failed} day(s) failed");
    }

    Ok(())
}

/// Build all binaries in the given package, returning their executables.
fn build(package: &str) -> Result<Vec<Executable>> {
    let mut cmd = Command::new("cargo");
    cmd.stdout(Stdio::piped());
    cmd.arg("build");
    cmd.arg("--release");
    cmd.args(["-p", package]);
    cmd.args(["--message-format", "json"]);

    let mut child = cmd.spawn()?;

    let output = child.stdout.take().context("missing stdout")?;
    let output = serde_json::Deserializer::from_reader(output).into_iter();

    let mut executables = Vec::new();

    for value in output {
        let value: serde_json::Value = value?;

        if !matches!(
            value.get("reason").and_then(|d| d.as_str()),
            Some("compiler-artifact")
        ) {
            continue;
        }

        let artifact = Artifact::deserialize(value.into_deserializer())?;

        let [kind] = &artifact.target.kind[..] else {
            continue;
        };

        if kind != "bin" {
            continue;
        }

        let path = artifact.executable.context("missing executable")?;

        executables.push(Executable {
            name: artifact.target.name,
            path,
        });
    }

    let status = child.wait()?;

    if !status.success() {
        bail!("building `{package}` failed: {status}");
    }

    Ok(executables)
}

#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Deserialize)]
struct Message {
    kind: String,
    output: String,
}

impl Message {
    fn is_important(&self) -> bool {
        matches!(self.kind.as_str(), "error" | "answer")
    }
}
