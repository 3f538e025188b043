//! The consumer side of a parse.

use crate::{Section, SinkError};

/// Receives the sections and entries of a document as they are parsed.
///
/// Only [`value`](IniSink::value) is required. Sinks that need per-section
/// setup (looking up a record, opening a scope) can also override
/// [`section`](IniSink::section), which runs once per header before any
/// entry of that section; the setup can then be reused for every entry, and
/// `value` is free to ignore its `section` argument.
///
/// Any `FnMut(Option<&Section>, &str, &str) -> Result<(), SinkError>` is a
/// sink.
pub trait IniSink {
    /// Handle one `key = value` entry.
    ///
    /// `section` is `None` for entries before the first header.
    /// Return [`SinkError::BadKey`] to point the diagnostic at the key
    /// instead of the value.
    fn value(&mut self, section: Option<&Section>, key: &str, value: &str)
    -> Result<(), SinkError>;

    /// Handle a section header. Does nothing by default.
    fn section(&mut self, section: &Section) -> Result<(), SinkError> {
        let _ = section;
        Ok(())
    }
}

impl<F> IniSink for F
where
    F: FnMut(Option<&Section>, &str, &str) -> Result<(), SinkError>,
{
    fn value(&mut self, section: Option<&Section>, key: &str, value: &str) -> Result<(), SinkError> {
        self(section, key, value)
    }
}
