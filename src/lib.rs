//! Course catalog advisor.
//!
//! Courses are read from a comma delimited source into a [`domain::Catalog`],
//! which keeps a binary search tree for ordered listing and a hash index for
//! exact-match lookup over the same records.
//!
//! The catalog is single-threaded and load-once, query-many. Embedding it in
//! a multi-threaded program needs external synchronization, e.g. build it
//! first and share it read-only behind an `Arc`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
