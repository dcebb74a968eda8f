//! Report sinks

use std::io::Write;

use serde::Serialize;

use crate::manifest::DependencyGroup;
use crate::report::Annotation;

/// Consumes a finished, ordered sequence of report records
pub trait ReportSink {
    fn write(&mut self, annotations: &[Annotation]) -> std::io::Result<()>;
}

#[derive(Serialize)]
struct Meta<'a> {
    meta: &'a [Annotation],
}

#[derive(Serialize)]
struct Failure<'a> {
    error: &'a str,
}

/// Writes `{"meta": [...]}` on a single line, the analyser runner protocol
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes `{"error": "..."}` in place of a report
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        self.write_line(&Failure { error: message })
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn write(&mut self, annotations: &[Annotation]) -> std::io::Result<()> {
        self.write_line(&Meta { meta: annotations })
    }
}

/// Plain-text report for a terminal, grouped by category
pub struct HumanSink<W: Write> {
    writer: W,
}

impl<W: Write> HumanSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for HumanSink<W> {
    fn write(&mut self, annotations: &[Annotation]) -> std::io::Result<()> {
        if annotations.is_empty() {
            writeln!(self.writer, "All dependencies are up to date.")?;
            return self.writer.flush();
        }

        for group in DependencyGroup::ALL {
            let in_group: Vec<&Annotation> = annotations
                .iter()
                .filter(|a| a.category == group)
                .collect();
            if in_group.is_empty() {
                continue;
            }

            writeln!(self.writer, "{} ({} outdated)", group, in_group.len())?;
            for annotation in in_group {
                let line = annotation.location.start_line;
                let Some(update) = &annotation.update else {
                    writeln!(self.writer, "  {}  line {}", annotation.message, line)?;
                    continue;
                };
                let required = if update.required.is_empty() {
                    "*"
                } else {
                    update.required.as_str()
                };
                writeln!(
                    self.writer,
                    "  {}  {} → {} ({})  line {}",
                    update.name,
                    required,
                    update.stable.as_deref().unwrap_or("None"),
                    update.latest.as_deref().unwrap_or("None"),
                    line
                )?;
            }
        }

        self.writer.flush()
    }
}
