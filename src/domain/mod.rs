//! Domain layer: course records, parsing and the catalog structures
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod course;
pub mod error;
pub mod parser;
pub mod tree;

pub use catalog::{
    Catalog, CatalogOptions, CourseIter, DuplicatePolicy, LoadReport, MissingPrerequisite,
};
pub use course::Course;
pub use error::DomainError;
pub use parser::{parse_line, FieldTrim};
pub use tree::{CourseTree, InOrderIterator, TreeNode};
