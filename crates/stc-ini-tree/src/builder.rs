//! Tree builder fed by parser callbacks.

use stc_ini_parse::{IniSink, Section, SinkError};
use tracing::trace;

use crate::value::{Document, Entry};

/// Sink that collects a parse into a [`Document`].
///
/// A header that repeats an earlier one (same name ignoring ASCII case,
/// same subsection) appends to the earlier block.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    doc: Document,
    /// Index of the current block in `doc.sections`.
    current: Option<usize>,
}

impl TreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish building and return the document.
    pub fn finish(self) -> Document {
        self.doc
    }
}

impl IniSink for TreeBuilder {
    fn section(&mut self, section: &Section) -> Result<(), SinkError> {
        self.current = Some(self.doc.section_index_or_insert(section));
        trace!(%section, index = ?self.current, "Opened block");
        Ok(())
    }

    fn value(&mut self, _: Option<&Section>, key: &str, value: &str) -> Result<(), SinkError> {
        let entry = Entry::new(key, value);
        match self.current {
            Some(index) => self.doc.sections[index].entries.push(entry),
            None => self.doc.globals.push(entry),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;
    use stc_ini_parse::parse_contents;

    fn build(source: &str) -> Document {
        let mut builder = TreeBuilder::new();
        parse_contents(&mut builder, "", source.as_bytes()).unwrap();
        builder.finish()
    }

    #[test]
    fn test_globals_then_sections() {
        let doc = build("top = 1\n[a]\nk = 2\n");
        assert_eq!(doc.globals, vec![Entry::new("top", "1")]);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].header, Section::new("a"));
        assert_eq!(doc.sections[0].entries, vec![Entry::new("k", "2")]);
    }

    #[test]
    fn test_repeated_header_merges() {
        let doc = build("[a]\nx = 1\n[b]\ny = 2\n[A]\nz = 3\n");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].header.name, "a");
        assert_eq!(
            doc.sections[0].entries,
            vec![Entry::new("x", "1"), Entry::new("z", "3")]
        );
    }

    #[test]
    fn test_subsections_are_distinct_blocks() {
        let doc = build("[net \"main\"]\nk = 1\n[net \"test\"]\nk = 2\n[net]\nk = 3\n");
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.get("net", Some("main"), "k"), Some("1"));
        assert_eq!(doc.get("net", Some("test"), "k"), Some("2"));
        assert_eq!(doc.get("net", None, "k"), Some("3"));
    }

    #[test]
    fn test_empty_section_is_kept() {
        let doc = build("[empty]\n");
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].is_empty());
    }
}
