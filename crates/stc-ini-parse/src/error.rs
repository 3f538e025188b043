//! Diagnostics and sink errors.

use std::fmt;

use crate::Position;

/// A single positioned parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Diagnostic {
    /// Name of the source, if one was given.
    pub file: Option<String>,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number, with tabs expanded.
    pub column: usize,
    /// Byte offset into the source.
    pub offset: usize,
    /// What went wrong.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic at `pos`.
    pub fn new(file: Option<&str>, pos: Position, message: impl Into<String>) -> Self {
        Self {
            file: file.map(str::to_owned),
            line: pos.display_line(),
            column: pos.display_column(),
            offset: pos.offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}: {}", file, self.line, self.column, self.message),
            None => write!(f, "{}:{}: {}", self.line, self.column, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Every diagnostic produced by one parse, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosticList(Vec<Diagnostic>);

impl DiagnosticList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no diagnostics were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the diagnostics in encounter order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// The diagnostics as a slice.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for DiagnosticList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticList {}

impl IntoIterator for DiagnosticList {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Diagnostic>> for DiagnosticList {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self(diagnostics)
    }
}

/// Error returned by an [`IniSink`](crate::IniSink) callback.
///
/// The variant decides where the resulting diagnostic points: `BadKey`
/// blames the key token, everything else blames the start of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The key is unknown or not allowed here.
    BadKey(String),
    /// The value could not be accepted.
    BadValue(String),
    /// Any other failure.
    Other(String),
}

impl SinkError {
    /// Blame the key.
    pub fn bad_key(msg: impl Into<String>) -> Self {
        SinkError::BadKey(msg.into())
    }

    /// Blame the value.
    pub fn bad_value(msg: impl Into<String>) -> Self {
        SinkError::BadValue(msg.into())
    }

    /// The error message, without any marker.
    pub fn message(&self) -> &str {
        match self {
            SinkError::BadKey(msg) | SinkError::BadValue(msg) | SinkError::Other(msg) => msg,
        }
    }

    /// Whether this error blames the key rather than the value.
    pub fn blames_key(&self) -> bool {
        matches!(self, SinkError::BadKey(_))
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SinkError {}

impl From<String> for SinkError {
    fn from(msg: String) -> Self {
        SinkError::Other(msg)
    }
}

impl From<&str> for SinkError {
    fn from(msg: &str) -> Self {
        SinkError::Other(msg.to_owned())
    }
}

/// Error from [`parse_file`](crate::parse_file).
#[derive(Debug)]
pub enum ParseFileError {
    /// The file could not be opened or read. Nothing was parsed.
    Io(std::io::Error),
    /// The file was read but had problems.
    Parse(DiagnosticList),
}

impl ParseFileError {
    /// The diagnostics, if this is a parse failure.
    pub fn diagnostics(&self) -> Option<&DiagnosticList> {
        match self {
            ParseFileError::Parse(list) => Some(list),
            ParseFileError::Io(_) => None,
        }
    }
}

impl fmt::Display for ParseFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFileError::Io(e) => write!(f, "{e}"),
            ParseFileError::Parse(list) => write!(f, "{list}"),
        }
    }
}

impl std::error::Error for ParseFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseFileError::Io(e) => Some(e),
            ParseFileError::Parse(list) => Some(list),
        }
    }
}

impl From<std::io::Error> for ParseFileError {
    fn from(e: std::io::Error) -> Self {
        ParseFileError::Io(e)
    }
}

impl From<DiagnosticList> for ParseFileError {
    fn from(list: DiagnosticList) -> Self {
        ParseFileError::Parse(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn at(line: usize, column: usize) -> Position {
        Position {
            line,
            column,
            offset: 0,
        }
    }

    #[test]
    fn test_diagnostic_display_with_file() {
        let d = Diagnostic::new(Some("stc.conf"), at(2, 4), "expected ']'");
        assert_eq!(d.to_string(), "stc.conf:3:5: expected ']'");
    }

    #[test]
    fn test_diagnostic_display_without_file() {
        let d = Diagnostic::new(None, at(0, 0), "Expected section or key");
        assert_eq!(d.to_string(), "1:1: Expected section or key");
    }

    #[test]
    fn test_list_display_joins_lines() {
        let list = DiagnosticList::from(vec![
            Diagnostic::new(None, at(0, 0), "first"),
            Diagnostic::new(None, at(3, 1), "second"),
        ]);
        assert_eq!(list.to_string(), "1:1: first\n4:2: second");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(DiagnosticList::new().into_result(), Ok(()));
        let list = DiagnosticList::from(vec![Diagnostic::new(None, at(0, 0), "x")]);
        assert!(list.into_result().is_err());
    }

    #[test]
    fn test_sink_error_message() {
        assert_eq!(SinkError::bad_key("unknown key").message(), "unknown key");
        assert_eq!(SinkError::from("boom").to_string(), "boom");
        assert!(SinkError::bad_key("k").blames_key());
        assert!(!SinkError::bad_value("v").blames_key());
    }
}
