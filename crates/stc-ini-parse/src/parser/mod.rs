//! Statement driver for INI documents.

use std::path::Path;

use stc_ini_cursor::{Cursor, Position};
use tracing::{debug, trace};

use crate::grammar::{self, SyntaxError};
use crate::{Diagnostic, DiagnosticList, IniSink, ParseFileError, Section};

/// Line-oriented INI parser with statement-level error recovery.
///
/// Each line is one statement: a blank or comment line, a section header,
/// or a `key = value` entry. A statement that fails is recorded as a
/// [`Diagnostic`] and the rest of its line is discarded; parsing then
/// continues with the next line.
#[derive(Clone)]
pub struct Parser<'src> {
    cursor: Cursor<'src>,
    /// Source name for diagnostics.
    file: Option<&'src str>,
    /// Most recently opened section.
    section: Option<Section>,
}

impl<'src> Parser<'src> {
    /// Create a parser over `input`.
    pub fn new(input: &'src [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            file: None,
            section: None,
        }
    }

    /// Name the source in diagnostics. An empty name means no name.
    pub fn with_file(mut self, file: &'src str) -> Self {
        self.file = (!file.is_empty()).then_some(file);
        self
    }

    /// Parse the whole input, feeding `sink`.
    ///
    /// Returns every diagnostic encountered, or `Ok(())` if there were none.
    pub fn parse<S: IniSink + ?Sized>(mut self, sink: &mut S) -> Result<(), DiagnosticList> {
        let mut diagnostics = DiagnosticList::new();
        while !self.cursor.is_eof() {
            if let Err(err) = self.statement(sink) {
                let diagnostic = Diagnostic::new(self.file, err.pos, err.message);
                debug!(%diagnostic, "Recorded diagnostic");
                diagnostics.push(diagnostic);
                self.cursor.skip_to(b'\n');
            }
        }
        diagnostics.into_result()
    }

    /// Parse one statement.
    fn statement<S: IniSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SyntaxError> {
        self.cursor.skip_ws();
        let start = self.cursor.position();

        if let Some(section) = grammar::section_header(&mut self.cursor)? {
            trace!(%section, "Section header at {}", start);
            let result = sink.section(&section);
            self.section = Some(section);
            return result.map_err(|e| SyntaxError::new(start, e.message()));
        }

        match self.cursor.peek() {
            Some(b) if grammar::is_alpha(b) => self.key_value(start, sink),
            None | Some(b'#' | b';' | b'\n') => {
                self.cursor.skip_line();
                Ok(())
            }
            Some(_) => Err(SyntaxError::new(start, "Expected section or key")),
        }
    }

    /// Parse `key = value`, or a bare `key`, and hand it to the sink.
    fn key_value<S: IniSink + ?Sized>(
        &mut self,
        key_pos: Position,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        let key = grammar::key(&mut self.cursor);
        self.cursor.skip_ws();

        let (value_pos, value) = if self.cursor.eat(b"=") {
            self.cursor.skip_ws();
            let value_pos = self.cursor.position();
            (value_pos, grammar::value(&mut self.cursor, value_pos)?)
        } else {
            match self.cursor.peek() {
                None | Some(b'\n' | b'#' | b';') => (self.cursor.position(), String::new()),
                Some(_) => {
                    return Err(SyntaxError::new(
                        self.cursor.position(),
                        format!("Expected '=' after {key}"),
                    ));
                }
            }
        };

        trace!(key = %key, value = ?value, "Entry at {}", key_pos);
        sink.value(self.section.as_ref(), &key, &value).map_err(|e| {
            let pos = if e.blames_key() { key_pos } else { value_pos };
            SyntaxError::new(pos, e.message())
        })
    }
}

/// Parse the contents of an INI file.
///
/// `filename` is only used in diagnostics; pass `""` for none.
pub fn parse_contents<S: IniSink + ?Sized>(
    sink: &mut S,
    filename: &str,
    contents: &[u8],
) -> Result<(), DiagnosticList> {
    Parser::new(contents).with_file(filename).parse(sink)
}

/// Read and parse an INI file.
///
/// Failing to open or read the file is returned as [`ParseFileError::Io`]
/// before anything is parsed.
pub fn parse_file<S: IniSink + ?Sized>(
    sink: &mut S,
    path: impl AsRef<Path>,
) -> Result<(), ParseFileError> {
    let path = path.as_ref();
    let contents = std::fs::read(path)?;
    debug!(?path, len = contents.len(), "Read INI file");
    let filename = path.display().to_string();
    parse_contents(sink, &filename, &contents)?;
    Ok(())
}
