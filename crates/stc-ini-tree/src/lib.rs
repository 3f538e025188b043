#![doc = include_str!("../README.md")]

use std::path::Path;

mod builder;
mod report;
mod value;
mod writer;

pub use builder::TreeBuilder;
pub use report::RenderReport;
pub use stc_ini_parse::{Diagnostic, DiagnosticList, ParseFileError, Section};
pub use value::{Document, Entry, SectionBlock};

/// Parse INI contents into a document.
///
/// `filename` is only used in diagnostics.
pub fn parse(filename: &str, contents: &[u8]) -> Result<Document, DiagnosticList> {
    let mut builder = TreeBuilder::new();
    stc_ini_parse::parse_contents(&mut builder, filename, contents)?;
    Ok(builder.finish())
}

/// Read and parse an INI file into a document.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, ParseFileError> {
    let mut builder = TreeBuilder::new();
    stc_ini_parse::parse_file(&mut builder, path)?;
    Ok(builder.finish())
}

#[cfg(test)]
mod tests;
