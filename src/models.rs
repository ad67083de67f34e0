//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A catalog entry managed by the administrator. Courses are created and
/// deleted whole; no field is ever updated in place.
pub struct Course {
    /// Primary key. Administrators pick the code themselves, so uniqueness is
    /// enforced by the store rather than a generated id.
    pub code: String,
    /// Display name shown in tables and the student's course selector.
    pub name: String,
    /// Owning faculty, free text.
    pub faculty: String,
    /// Fees are stored and displayed as opaque text. The original data kept
    /// them as strings and nothing downstream does arithmetic on them.
    pub fees: String,
}

impl fmt::Display for Course {
    /// Write the course name to any formatter so the type plays nicely with
    /// Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Link between one student and one course. The store caps this at one row
/// per student name; `course_code` references `Course::code` declaratively
/// only, so deleting a course can leave an orphaned enrollment behind.
pub struct Enrollment {
    pub student_name: String,
    pub course_code: String,
}
