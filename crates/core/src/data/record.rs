use serde::{Deserialize, Serialize};

/// One input row: a person and the name of their parent.
///
/// `parent_name` is `None` when the row carries no parent at all. A parent
/// name that matches no record is kept as-is here and resolved to the root
/// later by the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub parent_name: Option<String>,
}

impl Record {
    pub fn new(name: impl Into<String>, parent_name: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.and_then(parse_parent),
        }
    }

    /// Build records from `(name, parent_name)` pairs.
    ///
    /// An empty parent is treated as "no parent".
    ///
    /// # Examples
    /// ```
    /// use tarombo_core::data::Record;
    ///
    /// let records = Record::from_pairs(&[("A", ""), ("B", "A")]);
    /// assert_eq!(records[0].parent_name, None);
    /// assert_eq!(records[1].parent_name.as_deref(), Some("A"));
    /// ```
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Vec<Self> {
        pairs
            .iter()
            .map(|&(name, parent)| Self::new(name.trim(), Some(parent)))
            .collect()
    }
}

/// Parse a parent cell, returning `None` for a blank one.
///
/// Missing-value markers such as `NA` are kept as text here: someone in the
/// tree may really be called that. The tree builder decides, once all names
/// are known; see [`is_missing_marker`].
pub(crate) fn parse_parent(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether a parent name is a spreadsheet missing-value marker (`NA`, `NaN`,
/// `None`, any case) rather than a person.
///
/// Only consulted for parent names that match no record, so a person who is
/// actually named `NA` can still be a parent.
pub(crate) fn is_missing_marker(s: &str) -> bool {
    ["na", "nan", "none"]
        .iter()
        .any(|marker| s.trim().eq_ignore_ascii_case(marker))
}
