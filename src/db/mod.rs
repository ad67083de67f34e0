//! Persistence module split across logical submodules.

mod connection;
mod courses;
mod enrollments;

use thiserror::Error;

pub use connection::ensure_schema;
pub use courses::{create_course, delete_course, fetch_courses, search_courses, SearchField};
pub use enrollments::{enroll, find_enrollment, unenroll};

#[cfg(test)]
pub(crate) use connection::create_tables;

/// Error classes the views react to individually. Everything else coming out
/// of the store stays a plain anyhow chain and is surfaced verbatim as a
/// storage error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The administrator tried to add a course whose code is already taken.
    #[error("Course code {0} already exists.")]
    DuplicateCode(String),
    /// A student may hold at most one enrollment at a time.
    #[error("{0} is already enrolled in a course.")]
    AlreadyEnrolled(String),
    /// Unenrolling without an active enrollment. Informational, not a
    /// failure; the UI styles it accordingly.
    #[error("{0} is not enrolled in any course.")]
    NotEnrolled(String),
}
