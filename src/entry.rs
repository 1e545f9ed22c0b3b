//! Registered application identity

use crate::constants::desktop::EXTENSION;

/// A registered application, identified by the stem of its desktop entry
/// file name. Maps 1:1 to `<name>.desktop` in the applications directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
}

impl Entry {
    /// Create an entry from a user-supplied name. A trailing `.desktop`
    /// extension and surrounding whitespace are stripped, so both
    /// `firefox` and `firefox.desktop` refer to the same entry.
    pub fn new(name: impl AsRef<str>) -> Self {
        let trimmed = name.as_ref().trim();
        let name = trimmed.strip_suffix(EXTENSION).unwrap_or(trimmed);
        Self { name: name.to_string() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
