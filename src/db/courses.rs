use anyhow::{Context, Result};
use rusqlite::{params, Connection, Error as SqlError, ErrorCode};

use super::StoreError;
use crate::models::Course;

/// Column the admin search runs against. The variants map one-to-one onto
/// the four course columns; anything else a caller hands to `from_label`
/// falls back to the course name, mirroring how the search dropdown behaves.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchField {
    Code,
    Name,
    Faculty,
    Fees,
}

impl SearchField {
    /// All fields in the order the search selector cycles through them.
    pub const ALL: [SearchField; 4] = [
        SearchField::Code,
        SearchField::Name,
        SearchField::Faculty,
        SearchField::Fees,
    ];

    /// Label shown in the search selector.
    pub fn label(self) -> &'static str {
        match self {
            SearchField::Code => "Course Code",
            SearchField::Name => "Course Name",
            SearchField::Faculty => "Faculty",
            SearchField::Fees => "Fees",
        }
    }

    /// Map a selector label back to a field, defaulting to the course name
    /// for anything unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Course Code" => SearchField::Code,
            "Course Name" => SearchField::Name,
            "Faculty" => SearchField::Faculty,
            "Fees" => SearchField::Fees,
            _ => SearchField::Name,
        }
    }

    /// Column name interpolated into the search query. Restricting this to a
    /// fixed set keeps the interpolation safe; the pattern itself is always
    /// bound as a parameter.
    fn column(self) -> &'static str {
        match self {
            SearchField::Code => "code",
            SearchField::Name => "name",
            SearchField::Faculty => "faculty",
            SearchField::Fees => "fees",
        }
    }
}

/// Retrieve every course in storage order. Both the admin table and the
/// student view (table plus course selector) are fed from this one query.
pub fn fetch_courses(conn: &Connection) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare("SELECT code, name, faculty, fees FROM courses")
        .context("failed to prepare course query")?;

    let courses = stmt
        .query_map([], |row| {
            Ok(Course {
                code: row.get(0)?,
                name: row.get(1)?,
                faculty: row.get(2)?,
                fees: row.get(3)?,
            })
        })
        .context("failed to load courses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect courses")?;

    Ok(courses)
}

/// Insert a new course, returning the hydrated struct so the caller can push
/// it straight into the in-memory list.
pub fn create_course(
    conn: &Connection,
    code: &str,
    name: &str,
    faculty: &str,
    fees: &str,
) -> Result<Course> {
    conn.execute(
        "INSERT INTO courses (code, name, faculty, fees) VALUES (?1, ?2, ?3, ?4)",
        params![code, name, faculty, fees],
    )
    .map_err(|err| map_duplicate_code(err, code))
    .context("failed to insert course")?;

    Ok(Course {
        code: code.to_string(),
        name: name.to_string(),
        faculty: faculty.to_string(),
        fees: fees.to_string(),
    })
}

/// Remove the course with the given code. Zero affected rows is not an
/// error: the admin view only ever passes codes taken from the currently
/// displayed table, so a vanished row just means there is nothing to do.
pub fn delete_course(conn: &Connection, code: &str) -> Result<()> {
    conn.execute("DELETE FROM courses WHERE code = ?1", params![code])
        .context("failed to delete course")?;
    Ok(())
}

/// Substring search on a single column. Matching semantics are SQLite
/// `LIKE`, so ASCII letters compare case-insensitively.
pub fn search_courses(conn: &Connection, field: SearchField, pattern: &str) -> Result<Vec<Course>> {
    let sql = format!(
        "SELECT code, name, faculty, fees FROM courses WHERE {} LIKE ?1",
        field.column()
    );
    let mut stmt = conn
        .prepare(&sql)
        .context("failed to prepare course search")?;

    let wildcard = format!("%{pattern}%");
    let courses = stmt
        .query_map([wildcard], |row| {
            Ok(Course {
                code: row.get(0)?,
                name: row.get(1)?,
                faculty: row.get(2)?,
                fees: row.get(3)?,
            })
        })
        .context("failed to run course search")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect search results")?;

    Ok(courses)
}

/// Coerce SQLite constraint errors on the primary key into the typed
/// duplicate-code error the admin view reports.
fn map_duplicate_code(err: SqlError, code: &str) -> anyhow::Error {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        StoreError::DuplicateCode(code.to_string()).into()
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_tables, enroll, find_enrollment};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("failed to open in-memory database");
        create_tables(&conn).expect("failed to create schema");
        conn
    }

    fn seed(conn: &Connection) {
        create_course(conn, "CS101", "Intro to CS", "Engineering", "500")
            .expect("failed to seed CS101");
        create_course(conn, "MA201", "Advanced Math", "Science", "450")
            .expect("failed to seed MA201");
        create_course(conn, "HI110", "World History", "Arts", "300")
            .expect("failed to seed HI110");
    }

    #[test]
    fn create_tables_is_idempotent() {
        let conn = test_conn();
        create_tables(&conn).expect("second schema pass should be a no-op");
        assert!(fetch_courses(&conn).expect("listing should work").is_empty());
    }

    #[test]
    fn foreign_key_enforcement_stays_off() {
        // The bundled SQLite defaults this pragma to ON; course deletion
        // relies on it being OFF so enrollments never block the delete.
        let conn = test_conn();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("pragma query should work");
        assert_eq!(enabled, 0);
    }

    #[test]
    fn added_course_round_trips_through_listing() {
        let conn = test_conn();
        create_course(&conn, "CS101", "Intro to CS", "Engineering", "500")
            .expect("insert should succeed");

        let courses = fetch_courses(&conn).expect("listing should work");
        assert_eq!(
            courses,
            vec![Course {
                code: "CS101".into(),
                name: "Intro to CS".into(),
                faculty: "Engineering".into(),
                fees: "500".into(),
            }]
        );
    }

    #[test]
    fn duplicate_code_fails_and_leaves_existing_row_untouched() {
        let conn = test_conn();
        create_course(&conn, "CS101", "Intro to CS", "Engineering", "500")
            .expect("first insert should succeed");
        let before = fetch_courses(&conn).expect("listing should work");

        let err = create_course(&conn, "CS101", "Other", "X", "100")
            .expect_err("second insert must fail");
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::DuplicateCode("CS101".into()))
        );

        let after = fetch_courses(&conn).expect("listing should work");
        assert_eq!(before, after);
    }

    #[test]
    fn delete_removes_exactly_one_row() {
        let conn = test_conn();
        seed(&conn);

        delete_course(&conn, "MA201").expect("delete should succeed");

        let codes: Vec<String> = fetch_courses(&conn)
            .expect("listing should work")
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, vec!["CS101".to_string(), "HI110".to_string()]);
    }

    #[test]
    fn delete_with_unknown_code_is_a_no_op() {
        let conn = test_conn();
        seed(&conn);
        delete_course(&conn, "ZZ999").expect("deleting a missing code is not an error");
        assert_eq!(fetch_courses(&conn).expect("listing should work").len(), 3);
    }

    #[test]
    fn deleting_a_course_leaves_its_enrollments_in_place() {
        let conn = test_conn();
        seed(&conn);
        enroll(&conn, "Alice", "CS101").expect("enroll should succeed");

        delete_course(&conn, "CS101").expect("delete should succeed");

        let enrollment = find_enrollment(&conn, "Alice")
            .expect("lookup should work")
            .expect("enrollment must survive the course deletion");
        assert_eq!(enrollment.course_code, "CS101");
    }

    #[test]
    fn search_matches_substrings_on_the_chosen_field() {
        let conn = test_conn();
        seed(&conn);
        create_course(&conn, "MA101", "Basic Math", "Science", "350")
            .expect("failed to seed MA101");

        let hits = search_courses(&conn, SearchField::Name, "Math").expect("search should work");
        let names: Vec<String> = hits.into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["Advanced Math".to_string(), "Basic Math".to_string()]
        );

        let by_faculty =
            search_courses(&conn, SearchField::Faculty, "Eng").expect("search should work");
        assert_eq!(by_faculty.len(), 1);
        assert_eq!(by_faculty[0].code, "CS101");

        let by_fees = search_courses(&conn, SearchField::Fees, "45").expect("search should work");
        assert_eq!(by_fees.len(), 1);
        assert_eq!(by_fees[0].code, "MA201");
    }

    #[test]
    fn search_with_empty_pattern_returns_everything() {
        let conn = test_conn();
        seed(&conn);
        let hits = search_courses(&conn, SearchField::Code, "").expect("search should work");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn unknown_field_labels_fall_back_to_name() {
        assert_eq!(SearchField::from_label("Course Code"), SearchField::Code);
        assert_eq!(SearchField::from_label("Fees"), SearchField::Fees);
        assert_eq!(SearchField::from_label("Lecturer"), SearchField::Name);
        assert_eq!(SearchField::from_label(""), SearchField::Name);
    }
}
