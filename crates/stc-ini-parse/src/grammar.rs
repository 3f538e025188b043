//! Grammar rules: section headers, keys and values.
//!
//! Each rule works directly on a [`Cursor`] and reports failures as a
//! [`SyntaxError`] carrying the exact position to blame. Turning those into
//! diagnostics and recovering is left to the statement driver.

use stc_ini_cursor::{Cursor, Position};
use tracing::trace;

use crate::Section;

/// A failure inside a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub pos: Position,
    pub message: String,
}

impl SyntaxError {
    pub fn new(pos: Position, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, SyntaxError>;

#[inline]
pub(crate) fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

#[inline]
pub(crate) fn is_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Lex a (possibly empty) run of key characters.
pub(crate) fn key(cursor: &mut Cursor<'_>) -> String {
    cursor.take_while(is_key_char).iter().map(|&b| b as char).collect()
}

/// Parse `[name]` or `[name "subsection"]`.
///
/// Returns `Ok(None)` without consuming anything if the input does not
/// start with `[`.
pub(crate) fn section_header(cursor: &mut Cursor<'_>) -> Result<Option<Section>> {
    if !cursor.eat(b"[") {
        return Ok(None);
    }

    let name = key(cursor);
    if name.is_empty() {
        return Err(SyntaxError::new(
            cursor.position(),
            "expected section name after '['",
        ));
    }
    if cursor.eat(b"]") {
        return Ok(Some(Section::new(name)));
    }

    if !cursor.skip_ws() {
        return Err(SyntaxError::new(
            cursor.position(),
            "expected ']' or space followed by quoted-subsection",
        ));
    }
    let sub_pos = cursor.position();
    let Some(raw) = subsection(cursor) else {
        return Err(SyntaxError::new(
            sub_pos,
            "expected quoted subsection after space",
        ));
    };
    let subsection = String::from_utf8(raw)
        .map_err(|_| SyntaxError::new(sub_pos, "subsection is not valid UTF-8"))?;
    if !cursor.eat(b"]") {
        return Err(SyntaxError::new(cursor.position(), "expected ']'"));
    }

    Ok(Some(Section::with_subsection(name, subsection)))
}

/// Decode a `"..."` subsection, consuming it only on success.
///
/// Only `\\` and `\"` are valid escapes. Any other escape, a NUL, a newline
/// or a missing closing quote yields `None`.
fn subsection(cursor: &mut Cursor<'_>) -> Option<Vec<u8>> {
    let input = cursor.remaining();
    if input.first() != Some(&b'"') {
        return None;
    }

    let mut out = Vec::new();
    let mut i = 1;
    loop {
        match input.get(i).copied()? {
            b'"' => break,
            b'\0' | b'\n' => return None,
            b'\\' => {
                match input.get(i + 1).copied()? {
                    c @ (b'\\' | b'"') => out.push(c),
                    _ => return None,
                }
                i += 2;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    cursor.skip(i + 1);
    Some(out)
}

/// Lex and decode a value.
///
/// Stops at the newline (or comment) that ends the value without consuming
/// the newline. Unquoted spaces and tabs at the end of the value are
/// dropped. `start` is where the value began and is blamed if the decoded
/// bytes are not UTF-8.
pub(crate) fn value(cursor: &mut Cursor<'_>, start: Position) -> Result<String> {
    let input = cursor.remaining();
    let mut out = Vec::new();
    let mut escape = false;
    let mut inquote = false;
    // Length of `out` without trailing unquoted whitespace.
    let mut keep = 0;
    let mut i = 0;

    let end = loop {
        let c = input.get(i).copied();
        if escape {
            escape = false;
            match c {
                Some(q @ (b'"' | b'\\')) => out.push(q),
                Some(b'n') => out.push(b'\n'),
                Some(b't') => out.push(b'\t'),
                Some(b'b') => out.push(0x08),
                // Line continuation.
                Some(b'\n') => {}
                Some(other) => {
                    cursor.skip(i - 1);
                    return Err(SyntaxError::new(
                        cursor.position(),
                        format!("invalid escape sequence \\{}", escaped(other)),
                    ));
                }
                None => {
                    cursor.skip(i - 1);
                    return Err(SyntaxError::new(
                        cursor.position(),
                        "incomplete escape sequence at EOF",
                    ));
                }
            }
            keep = out.len();
        } else {
            match c {
                Some(b'\\') => escape = true,
                Some(b'"') => {
                    inquote = !inquote;
                    keep = out.len();
                }
                None | Some(b'\n') => {
                    if inquote {
                        cursor.skip(i);
                        return Err(SyntaxError::new(cursor.position(), "missing close quotes"));
                    }
                    break i;
                }
                Some(b'#' | b';') if !inquote => break i,
                Some(b) => {
                    out.push(b);
                    if inquote || (b != b' ' && b != b'\t') {
                        keep = out.len();
                    }
                }
            }
        }
        i += 1;
    };

    out.truncate(keep);
    cursor.skip(end);
    cursor.skip_to(b'\n');
    trace!("Value ends at {}", cursor.position());
    String::from_utf8(out).map_err(|_| SyntaxError::new(start, "value is not valid UTF-8"))
}

fn escaped(b: u8) -> String {
    if b.is_ascii_graphic() {
        (b as char).to_string()
    } else {
        format!("x{b:02x}")
    }
}
