//! Writing documents back out as INI text.
//!
//! The output parses back to an equal [`Document`]: values are escaped and,
//! where needed, quoted; subsections only escape `\` and `"`, the two
//! escapes a header accepts.

use std::fmt::{self, Write};

use stc_ini_parse::Section;

use crate::value::{Document, Entry};

impl Document {
    /// Render the document as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.globals {
            write_entry(f, entry)?;
        }
        for (i, block) in self.sections.iter().enumerate() {
            if i != 0 || !self.globals.is_empty() {
                f.write_char('\n')?;
            }
            write_header(f, &block.header)?;
            for entry in &block.entries {
                write_entry(f, entry)?;
            }
        }
        Ok(())
    }
}

fn write_header(out: &mut impl Write, header: &Section) -> fmt::Result {
    write!(out, "[{}", header.name)?;
    if let Some(sub) = &header.subsection {
        out.write_str(" \"")?;
        for c in sub.chars() {
            if c == '"' || c == '\\' {
                out.write_char('\\')?;
            }
            out.write_char(c)?;
        }
        out.write_char('"')?;
    }
    out.write_str("]\n")
}

fn write_entry(out: &mut impl Write, entry: &Entry) -> fmt::Result {
    if entry.value.is_empty() {
        return writeln!(out, "{}", entry.key);
    }
    write!(out, "{} = ", entry.key)?;
    write_value(out, &entry.value)?;
    out.write_char('\n')
}

/// Write a value so that it decodes back to `value`.
pub(crate) fn write_value(out: &mut impl Write, value: &str) -> fmt::Result {
    let quote = needs_quotes(value);
    if quote {
        out.write_char('"')?;
    }
    for c in value.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            '\u{8}' => out.write_str("\\b")?,
            c => out.write_char(c)?,
        }
    }
    if quote {
        out.write_char('"')?;
    }
    Ok(())
}

fn needs_quotes(value: &str) -> bool {
    let edge = |c: Option<char>| matches!(c, Some(' '));
    edge(value.chars().next())
        || edge(value.chars().last())
        || value.contains(['#', ';'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use facet_testhelpers::test;

    fn value_text(value: &str) -> String {
        let mut out = String::new();
        write_value(&mut out, value).unwrap();
        out
    }

    #[test]
    fn test_plain_value_unquoted() {
        assert_eq!(value_text("https://example.org"), "https://example.org");
    }

    #[test]
    fn test_value_escapes() {
        assert_eq!(value_text("a\"b\\c\nd\te"), r#"a\"b\\c\nd\te"#);
    }

    #[test]
    fn test_value_quoting() {
        assert_eq!(value_text(" padded "), r#"" padded ""#);
        assert_eq!(value_text("a # b"), r#""a # b""#);
        assert_eq!(value_text("a;b"), r#""a;b""#);
    }

    #[test]
    fn test_document_layout() {
        let doc = parse("", b"top=1\n[a]\nk=v\nflag\n[net \"x\\\"y\"]\nz = \" q \"\n").unwrap();
        assert_eq!(
            doc.to_ini_string(),
            "top = 1\n\n[a]\nk = v\nflag\n\n[net \"x\\\"y\"]\nz = \" q \"\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Document::new().to_ini_string(), "");
    }
}
