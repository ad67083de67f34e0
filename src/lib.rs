//! Core library surface for the course manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the test suites can reuse the same pieces.

pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer, typically used by
/// `main.rs` to initialize the embedded SQLite store.
pub use db::{ensure_schema, fetch_courses, SearchField, StoreError};

/// The two domain types that other layers manipulate.
pub use models::{Course, Enrollment};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
