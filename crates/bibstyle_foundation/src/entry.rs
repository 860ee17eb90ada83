//! The bibliography input model.
//!
//! Entries come from the surrounding bibliography application. The VM only
//! reads them; it never creates or removes entries.

use std::collections::HashMap;

/// One bibliographic record as supplied by the caller.
///
/// Field names are case-insensitive and stored lowercased, as in a `.bib`
/// file where `Title` and `title` are the same field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// The kind of publication, e.g. `article` or `book`.
    pub entry_type: String,
    /// The citation key, e.g. `knuth84`.
    pub citation_key: String,
    /// Field values keyed by lowercase field name. Values exclude their outer delimiters.
    pub fields: HashMap<String, String>,
}

impl Entry {
    /// Creates an entry with no fields.
    #[must_use]
    pub fn new(entry_type: impl Into<String>, citation_key: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            citation_key: citation_key.into(),
            fields: HashMap::new(),
        }
    }

    /// Builder method to add a field.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Sets a field, replacing any previous value.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_lowercase(), value.into());
    }

    /// Returns the value of a field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Returns the entry type in lowercase, the form styles dispatch on.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.entry_type.to_lowercase()
    }
}

/// An ordered list of entries plus the document preamble.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bibliography {
    /// Concatenated `@preamble` text, if any.
    pub preamble: Option<String>,
    /// Entries in citation order.
    pub entries: Vec<Entry>,
}

impl Bibliography {
    /// Creates an empty bibliography.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the preamble.
    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    /// Builder method to append an entry.
    #[must_use]
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Entry> for Bibliography {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            preamble: None,
            entries: iter.into_iter().collect(),
        }
    }
}
