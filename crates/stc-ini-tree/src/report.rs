//! Rendering diagnostics against their source with ariadne.

use std::io;
use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use stc_ini_parse::{Diagnostic, DiagnosticList};

/// Get ariadne config, respecting NO_COLOR env var.
fn ariadne_config() -> Config {
    let config = Config::default().with_index_type(IndexType::Byte);
    if std::env::var_os("NO_COLOR").is_some() {
        config.with_color(false)
    } else {
        config
    }
}

/// Pretty reports for parse diagnostics.
pub trait RenderReport {
    /// Render the report to a string.
    ///
    /// Falls back to the plain `file:line:col: message` form if the report
    /// cannot be written.
    fn render(&self, filename: &str, source: &str) -> String;

    /// Write the report to a writer.
    fn write_report<W: io::Write>(&self, filename: &str, source: &str, writer: W) -> io::Result<()>;
}

impl RenderReport for Diagnostic {
    fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        match self.write_report(filename, source, &mut output) {
            Ok(()) => String::from_utf8_lossy(&output).into_owned(),
            Err(_) => self.to_string(),
        }
    }

    fn write_report<W: io::Write>(&self, filename: &str, source: &str, writer: W) -> io::Result<()> {
        let range = blame_range(self.offset, source);
        Report::build(ReportKind::Error, (filename, range.clone()))
            .with_config(ariadne_config())
            .with_message(&self.message)
            .with_label(
                Label::new((filename, range))
                    .with_message("here")
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), writer)
    }
}

impl RenderReport for DiagnosticList {
    fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        match self.write_report(filename, source, &mut output) {
            Ok(()) => String::from_utf8_lossy(&output).into_owned(),
            Err(_) => self.to_string(),
        }
    }

    fn write_report<W: io::Write>(
        &self,
        filename: &str,
        source: &str,
        mut writer: W,
    ) -> io::Result<()> {
        for diagnostic in self {
            diagnostic.write_report(filename, source, &mut writer)?;
        }
        Ok(())
    }
}

/// The character at `offset`, or an empty span at end of input.
///
/// An offset inside a multi-byte character blames the whole character.
fn blame_range(offset: usize, source: &str) -> Range<usize> {
    let mut start = offset.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let width = source[start..].chars().next().map_or(0, char::len_utf8);
    start..start + width
}
