//! Course advising service
//!
//! Materializes a course source into lines and feeds it to the catalog.
//! Everything after the load (listing, lookup, validation) is answered by
//! the in-memory [`Catalog`].

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Catalog, CatalogOptions, Course, CourseIter, LoadReport, MissingPrerequisite};
use crate::infrastructure::traits::FileSystem;

/// Service owning one catalog per session.
pub struct AdvisingService {
    fs: Arc<dyn FileSystem>,
    catalog: Catalog,
}

impl AdvisingService {
    /// Create a service with an empty catalog.
    pub fn new(fs: Arc<dyn FileSystem>, options: CatalogOptions) -> Self {
        Self {
            fs,
            catalog: Catalog::with_options(options),
        }
    }

    /// Load courses from a source file into the catalog.
    ///
    /// Loads are additive; calling this twice with the same file inserts
    /// every course twice.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, source: &Path) -> ApplicationResult<LoadReport> {
        if !self.fs.exists(source) || !self.fs.is_file(source) {
            return Err(ApplicationError::SourceNotFound(source.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(source)
            .with_path_context("read course source", source)?;

        let report = self.catalog.load(content.lines());
        debug!(
            "load: {} inserted, {} skipped from {}",
            report.inserted,
            report.skipped,
            source.display()
        );
        Ok(report)
    }

    /// All courses in ascending identifier order.
    pub fn list(&self) -> CourseIter<'_> {
        self.catalog.list()
    }

    /// Look up a single course. The identifier is matched exactly.
    pub fn course(&self, identifier: &str) -> ApplicationResult<&Course> {
        self.catalog
            .find(identifier)
            .ok_or_else(|| ApplicationError::CourseNotFound(identifier.to_string()))
    }

    /// Dangling prerequisite references.
    pub fn validate(&self) -> Vec<MissingPrerequisite> {
        self.catalog.validate()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
