use anyhow::{Context, Result};
use rusqlite::{params, Connection, Error as SqlError, ErrorCode, OptionalExtension};

use super::StoreError;
use crate::models::Enrollment;

/// Look up the active enrollment for a student, if any. The schema caps
/// students at one row, so a plain single-row query is enough.
pub fn find_enrollment(conn: &Connection, student_name: &str) -> Result<Option<Enrollment>> {
    conn.query_row(
        "SELECT student_name, course_code FROM enrollments WHERE student_name = ?1",
        params![student_name],
        |row| {
            Ok(Enrollment {
                student_name: row.get(0)?,
                course_code: row.get(1)?,
            })
        },
    )
    .optional()
    .context("failed to look up enrollment")
}

/// Enroll a student into a course. The pre-check keeps the observable error
/// identical to the historical behavior (rejected before any write); the
/// UNIQUE constraint on `student_name` backstops the same rule at the
/// storage layer and maps to the same error.
pub fn enroll(conn: &Connection, student_name: &str, course_code: &str) -> Result<Enrollment> {
    if find_enrollment(conn, student_name)?.is_some() {
        return Err(StoreError::AlreadyEnrolled(student_name.to_string()).into());
    }

    conn.execute(
        "INSERT INTO enrollments (student_name, course_code) VALUES (?1, ?2)",
        params![student_name, course_code],
    )
    .map_err(|err| map_already_enrolled(err, student_name))
    .context("failed to insert enrollment")?;

    Ok(Enrollment {
        student_name: student_name.to_string(),
        course_code: course_code.to_string(),
    })
}

/// Drop a student's enrollment. Zero deleted rows means the student was not
/// enrolled in the first place; the typed error lets the UI report that
/// informationally instead of as a failure.
pub fn unenroll(conn: &Connection, student_name: &str) -> Result<()> {
    let deleted = conn
        .execute(
            "DELETE FROM enrollments WHERE student_name = ?1",
            params![student_name],
        )
        .context("failed to delete enrollment")?;

    if deleted == 0 {
        Err(StoreError::NotEnrolled(student_name.to_string()).into())
    } else {
        Ok(())
    }
}

/// Coerce a UNIQUE violation on `student_name` into the same error the
/// pre-check produces.
fn map_already_enrolled(err: SqlError, student_name: &str) -> anyhow::Error {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        StoreError::AlreadyEnrolled(student_name.to_string()).into()
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_course, create_tables};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("failed to open in-memory database");
        create_tables(&conn).expect("failed to create schema");
        create_course(&conn, "CS101", "Intro to CS", "Engineering", "500")
            .expect("failed to seed CS101");
        create_course(&conn, "CS102", "Data Structures", "Engineering", "550")
            .expect("failed to seed CS102");
        conn
    }

    fn enrollment_rows(conn: &Connection) -> Vec<Enrollment> {
        let mut stmt = conn
            .prepare("SELECT student_name, course_code FROM enrollments")
            .expect("failed to prepare enrollment listing");
        stmt.query_map([], |row| {
            Ok(Enrollment {
                student_name: row.get(0)?,
                course_code: row.get(1)?,
            })
        })
        .expect("failed to list enrollments")
        .collect::<Result<Vec<_>, _>>()
        .expect("failed to collect enrollments")
    }

    #[test]
    fn enroll_then_find_round_trips() {
        let conn = test_conn();
        enroll(&conn, "Alice", "CS101").expect("enroll should succeed");

        let found = find_enrollment(&conn, "Alice")
            .expect("lookup should work")
            .expect("enrollment should exist");
        assert_eq!(found.student_name, "Alice");
        assert_eq!(found.course_code, "CS101");

        assert!(find_enrollment(&conn, "Bob")
            .expect("lookup should work")
            .is_none());
    }

    #[test]
    fn second_enrollment_is_rejected_until_unenrolled() {
        let conn = test_conn();
        enroll(&conn, "Alice", "CS101").expect("first enroll should succeed");

        let err = enroll(&conn, "Alice", "CS102").expect_err("second enroll must fail");
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::AlreadyEnrolled("Alice".into()))
        );
        assert_eq!(enrollment_rows(&conn).len(), 1);

        unenroll(&conn, "Alice").expect("unenroll should succeed");
        enroll(&conn, "Alice", "CS102").expect("re-enroll after unenroll should succeed");

        let rows = enrollment_rows(&conn);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].course_code, "CS102");
    }

    #[test]
    fn different_students_enroll_independently() {
        let conn = test_conn();
        enroll(&conn, "Alice", "CS101").expect("enroll should succeed");
        enroll(&conn, "Bob", "CS101").expect("enroll should succeed");
        assert_eq!(enrollment_rows(&conn).len(), 2);
    }

    #[test]
    fn unenroll_without_enrollment_reports_not_enrolled_and_changes_nothing() {
        let conn = test_conn();
        enroll(&conn, "Alice", "CS101").expect("enroll should succeed");

        let err = unenroll(&conn, "Bob").expect_err("unknown student must be reported");
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::NotEnrolled("Bob".into()))
        );
        assert_eq!(enrollment_rows(&conn), vec![Enrollment {
            student_name: "Alice".into(),
            course_code: "CS101".into(),
        }]);
    }

    #[test]
    fn unique_constraint_backstops_the_application_check() {
        let conn = test_conn();
        enroll(&conn, "Alice", "CS101").expect("enroll should succeed");

        // Bypass the pre-check and hit the schema constraint directly.
        let err = conn
            .execute(
                "INSERT INTO enrollments (student_name, course_code) VALUES ('Alice', 'CS102')",
                [],
            )
            .expect_err("raw duplicate insert must violate UNIQUE");
        assert!(matches!(
            err.sqlite_error_code(),
            Some(ErrorCode::ConstraintViolation)
        ));
    }
}
