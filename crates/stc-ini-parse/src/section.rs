//! Section headers.

use std::fmt::{self, Write};

/// A `[name]` or `[name "subsection"]` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Section {
    /// Section name. Never empty; made of letters, digits and `-`.
    pub name: String,
    /// Decoded subsection, if the header had a quoted one.
    pub subsection: Option<String>,
}

impl Section {
    /// Create a section without a subsection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subsection: None,
        }
    }

    /// Create a section with a subsection.
    pub fn with_subsection(name: impl Into<String>, subsection: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subsection: Some(subsection.into()),
        }
    }

    /// Whether this header names `name` (ASCII case-insensitive) and exactly
    /// `subsection`.
    pub fn is(&self, name: &str, subsection: Option<&str>) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.subsection.as_deref() == subsection
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subsection {
            Some(sub) => {
                write!(f, "[{} ", self.name)?;
                write_quoted(f, sub)?;
                f.write_char(']')
            }
            None => write!(f, "[{}]", self.name),
        }
    }
}

/// Write `s` as a double-quoted string with backslash escapes.
pub(crate) fn write_quoted(out: &mut impl Write, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            '\r' => out.write_str("\\r")?,
            '\u{8}' => out.write_str("\\b")?,
            c if c.is_control() => write!(out, "\\x{:02x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
