//! Line protocol shared by the day binaries and the `aoc` runner.
//!
//! In JSON mode every line is `{"type": "message", "data": {"kind", "output"}}`
//! or `{"type": "report", "data": <Report>}`.

use core::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::cli::Report;

pub(crate) enum OutputKind {
    Json,
    Normal,
}

/// Kind of a message line.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Kind {
    Info,
    Error,
    Answer,
}

impl Kind {
    fn as_str(self) -> &'static str {
        match self {
            Kind::Info => "info",
            Kind::Error => "error",
            Kind::Answer => "answer",
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
enum Line<'a> {
    Message { kind: Kind, output: String },
    Report(&'a Report),
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Message { kind, output } => write!(f, "{}: {output}", kind.as_str()),
            Line::Report(report) => report.fmt(f),
        }
    }
}

pub(crate) struct Output<O> {
    out: O,
    kind: OutputKind,
}

impl<O> Output<O>
where
    O: Write,
{
    pub(crate) fn new(out: O, kind: OutputKind) -> Self {
        Self { out, kind }
    }

    pub(crate) fn message(&mut self, kind: Kind, m: impl fmt::Display) -> io::Result<()> {
        self.line(&Line::Message {
            kind,
            output: m.to_string(),
        })
    }

    pub(crate) fn report(&mut self, report: &Report) -> io::Result<()> {
        self.line(&Line::Report(report))
    }

    fn line(&mut self, line: &Line<'_>) -> io::Result<()> {
        match self.kind {
            OutputKind::Json => {
                serde_json::to_writer(&mut self.out, line)?;
                writeln!(self.out)
            }
            OutputKind::Normal => writeln!(self.out, "{line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::{Kind, Output, OutputKind};
    use crate::cli::Report;

    fn report() -> Report {
        Report {
            count: 2,
            min: Duration::from_micros(10),
            max: Duration::from_micros(30),
            avg: Duration::from_micros(20),
            ..Report::default()
        }
    }

    #[test]
    fn test_normal_lines() {
        let mut out = Vec::new();
        let mut o = Output::new(&mut out, OutputKind::Normal);
        o.message(Kind::Info, "warming up").unwrap();
        o.message(Kind::Answer, format_args!("{:?}", (1, 2))).unwrap();
        o.report(&report()).unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "info: warming up");
        assert_eq!(lines[1], "answer: (1, 2)");
        assert!(lines[2].starts_with("count: 2, min: 10µs, max: 30µs, avg: 20µs"));
    }

    #[test]
    fn test_json_lines() {
        let mut out = Vec::new();
        let mut o = Output::new(&mut out, OutputKind::Json);
        o.message(Kind::Error, "bad input").unwrap();
        o.report(&report()).unwrap();

        let out = String::from_utf8(out).unwrap();
        let mut lines = out.lines();

        let message: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(
            message,
            serde_json::json!({
                "type": "message",
                "data": { "kind": "error", "output": "bad input" },
            })
        );

        let line: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(line["type"], "report");

        let report: Report = serde_json::from_value(line["data"].clone()).unwrap();
        assert_eq!(report.count, 2);
        assert_eq!(report.max, Duration::from_micros(30));
        assert!(lines.next().is_none());
    }
}
