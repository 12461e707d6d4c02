//! Course record: identifier, title and prerequisite identifiers

use std::fmt;

use itertools::Itertools;

/// One course as read from the catalog source.
///
/// Prerequisites are identifiers, not references: they may name courses
/// that are absent from the catalog (see [`crate::domain::Catalog::validate`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    /// Course number, e.g. `CS200`
    pub identifier: String,
    /// Human readable title, may be empty
    pub title: String,
    /// Prerequisite course numbers in source order
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        prerequisites: Vec<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            prerequisites,
        }
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Prerequisites joined for display: `"CS100, CS105"` or `"None"`.
    pub fn prerequisite_line(&self) -> String {
        if self.has_prerequisites() {
            self.prerequisites.iter().join(", ")
        } else {
            "None".to_string()
        }
    }
}

/// Listing line: `<identifier>, <title>`
impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.identifier, self.title)
    }
}
