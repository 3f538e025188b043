//! Document value types.

use stc_ini_parse::Section;

/// A single `key = value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Entry {
    /// The key, as written.
    pub key: String,
    /// The decoded value.
    pub value: String,
}

impl Entry {
    /// Create an entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// All entries under one distinct section header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct SectionBlock {
    /// The header, as first written.
    pub header: Section,
    /// Entries in document order.
    pub entries: Vec<Entry>,
}

impl SectionBlock {
    /// Create an empty block.
    pub fn new(header: Section) -> Self {
        Self {
            header,
            entries: Vec::new(),
        }
    }

    /// Get the last value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).last()
    }

    /// Get every value for `key`, in document order.
    pub fn get_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        find_all(&self.entries, key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed INI document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Document {
    /// Entries that appear before the first section header.
    pub globals: Vec<Entry>,
    /// Section blocks in first-seen order.
    pub sections: Vec<SectionBlock>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the document has no entries and no sections.
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.sections.is_empty()
    }

    /// Find the block for `[name]` or `[name "subsection"]`.
    pub fn section(&self, name: &str, subsection: Option<&str>) -> Option<&SectionBlock> {
        self.sections
            .iter()
            .find(|block| block.header.is(name, subsection))
    }

    /// Mutable access to a block, creating it if missing.
    pub fn section_mut(&mut self, header: &Section) -> &mut SectionBlock {
        let index = self.section_index_or_insert(header);
        &mut self.sections[index]
    }

    /// Every block whose name is `name`, whatever its subsection.
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SectionBlock> + 'a {
        self.sections
            .iter()
            .filter(move |block| block.header.name.eq_ignore_ascii_case(name))
    }

    /// Get the last value of `key` in the given section.
    pub fn get(&self, name: &str, subsection: Option<&str>, key: &str) -> Option<&str> {
        self.section(name, subsection)?.get(key)
    }

    /// Get every value of `key` in the given section.
    pub fn get_all(&self, name: &str, subsection: Option<&str>, key: &str) -> Vec<&str> {
        self.section(name, subsection)
            .map(|block| block.get_all(key).collect())
            .unwrap_or_default()
    }

    /// Get the last value of a key that appears before any header.
    pub fn get_global(&self, key: &str) -> Option<&str> {
        find_all(&self.globals, key).last()
    }

    /// Look up a dotted path.
    ///
    /// `key` is a global key, `name.key` is a key in `[name]`, and
    /// `name.sub.key` is a key in `[name "sub"]`. The subsection may itself
    /// contain dots.
    pub fn get_path(&self, path: &str) -> Option<&str> {
        let Some((head, key)) = path.rsplit_once('.') else {
            return self.get_global(path);
        };
        match head.split_once('.') {
            Some((name, sub)) => self.get(name, Some(sub), key),
            None => self.get(head, None, key),
        }
    }

    /// Index of the block for `header`, appending an empty one if missing.
    pub(crate) fn section_index_or_insert(&mut self, header: &Section) -> usize {
        let found = self
            .sections
            .iter()
            .position(|block| block.header.is(&header.name, header.subsection.as_deref()));
        found.unwrap_or_else(|| {
            self.sections.push(SectionBlock::new(header.clone()));
            self.sections.len() - 1
        })
    }
}

fn find_all<'a>(entries: &'a [Entry], key: &str) -> impl Iterator<Item = &'a str> {
    entries
        .iter()
        .filter(move |entry| entry.key.eq_ignore_ascii_case(key))
        .map(|entry| entry.value.as_str())
}
