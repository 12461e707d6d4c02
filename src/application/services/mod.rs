//! Application services

pub mod advising;

pub use advising::AdvisingService;
