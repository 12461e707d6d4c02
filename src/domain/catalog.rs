//! Course catalog: a BST for ordered listing plus a hash index for lookup.
//!
//! Both views address the same arena nodes. [`Catalog::insert`] is the only
//! mutation path and updates tree and index together.

use std::collections::HashMap;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::course::Course;
use crate::domain::error::DomainError;
use crate::domain::parser::{parse_line, FieldTrim};
use crate::domain::tree::{CourseTree, InOrderIterator};

/// What happens when an identifier is inserted a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Add another tree node and point the index at the newest course.
    /// Listing then shows both, lookup only the latest.
    #[default]
    Overwrite,
    /// Refuse the course; neither view changes.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    pub trim: FieldTrim,
    pub duplicates: DuplicatePolicy,
}

/// A prerequisite identifier that names no course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPrerequisite {
    pub course: String,
    pub prerequisite: String,
}

/// Outcome of a bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Courses added to the catalog
    pub inserted: usize,
    /// Lines that produced no course
    pub skipped: usize,
    /// Duplicates refused under [`DuplicatePolicy::Reject`]
    pub rejected: Vec<DomainError>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    tree: CourseTree,
    index: HashMap<String, Index>,
    options: CatalogOptions,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CatalogOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> CatalogOptions {
        self.options
    }

    /// Add one course to both views.
    #[instrument(level = "debug", skip(self, course), fields(id = %course.identifier))]
    pub fn insert(&mut self, course: Course) -> Result<(), DomainError> {
        if self.options.duplicates == DuplicatePolicy::Reject
            && self.index.contains_key(&course.identifier)
        {
            return Err(DomainError::DuplicateCourse(course.identifier));
        }

        let key = course.identifier.clone();
        let node_idx = self.tree.insert(course);
        if let Some(stale) = self.index.insert(key, node_idx) {
            debug!(?stale, "index entry replaced, tree keeps the earlier node");
        }
        Ok(())
    }

    /// Parse and insert every line. Additive: earlier content is kept.
    pub fn load<I, S>(&mut self, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();
        for line in lines {
            let Some(course) = parse_line(line.as_ref(), self.options.trim) else {
                report.skipped += 1;
                continue;
            };
            match self.insert(course) {
                Ok(()) => report.inserted += 1,
                Err(e) => {
                    debug!("{}", e);
                    report.rejected.push(e);
                }
            }
        }
        debug!(
            inserted = report.inserted,
            skipped = report.skipped,
            rejected = report.rejected.len(),
            "load finished"
        );
        report
    }

    /// Every tree node in ascending identifier order.
    pub fn list(&self) -> CourseIter<'_> {
        CourseIter {
            inner: self.tree.iter(),
        }
    }

    /// Exact-match lookup through the index; the tree is not searched.
    pub fn find(&self, identifier: &str) -> Option<&Course> {
        self.index
            .get(identifier)
            .and_then(|&idx| self.tree.get_node(idx))
            .map(|node| &node.course)
    }

    /// Report every prerequisite that names no known course.
    ///
    /// Visits the courses reachable through the index, in ascending order,
    /// so superseded duplicates are not checked and repeated calls agree.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> Vec<MissingPrerequisite> {
        let mut missing = Vec::new();
        for (idx, node) in self.tree.iter() {
            let course = &node.course;
            if self.index.get(&course.identifier) != Some(&idx) {
                continue;
            }
            for prerequisite in &course.prerequisites {
                if !self.index.contains_key(prerequisite) {
                    debug!(
                        "course {} references missing prerequisite {}",
                        course.identifier, prerequisite
                    );
                    missing.push(MissingPrerequisite {
                        course: course.identifier.clone(),
                        prerequisite: prerequisite.clone(),
                    });
                }
            }
        }
        missing
    }

    /// Number of tree nodes, duplicates included.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of distinct identifiers.
    pub fn distinct_len(&self) -> usize {
        self.index.len()
    }

    /// Read access to the ordering tree.
    pub fn tree(&self) -> &CourseTree {
        &self.tree
    }
}

/// Courses in listing order.
pub struct CourseIter<'a> {
    inner: InOrderIterator<'a>,
}

impl<'a> Iterator for CourseIter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, node)| &node.course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_of(lines: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.load(lines.iter().copied());
        catalog
    }

    #[test]
    fn given_duplicate_when_overwriting_then_tree_keeps_both_and_index_latest() {
        let catalog = catalog_of(&["CS100,First", "CS100,Second"]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.distinct_len(), 1);
        assert_eq!(catalog.find("CS100").unwrap().title, "Second");
        let titles: Vec<_> = catalog.list().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn given_duplicate_when_rejecting_then_neither_view_changes() {
        let mut catalog = Catalog::with_options(CatalogOptions {
            duplicates: DuplicatePolicy::Reject,
            ..CatalogOptions::default()
        });
        let report = catalog.load(["CS100,First", "CS100,Second"]);

        assert_eq!(report.inserted, 1);
        assert_eq!(report.rejected.len(), 1);
        assert!(matches!(
            &report.rejected[0],
            DomainError::DuplicateCourse(id) if id == "CS100"
        ));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("CS100").unwrap().title, "First");
    }

    #[test]
    fn given_stale_duplicate_with_dangling_prerequisite_when_validating_then_ignored() {
        let catalog = catalog_of(&["CS200,Old,CS999", "CS200,New"]);
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn given_lookup_then_is_exact_match() {
        let catalog = catalog_of(&["CS100,Intro"]);
        assert!(catalog.find("CS100").is_some());
        assert!(catalog.find("cs100").is_none());
        assert!(catalog.find(" CS100").is_none());
        assert!(catalog.find("CS10").is_none());
    }
}
