//! Binary entry point that glues the SQLite-backed course catalog to the TUI:
//! bring up the database, then drive the Ratatui event loop until the user
//! quits from the login screen.

use course_manager::{ensure_schema, run_app, App};

/// Initialize persistence and launch the event loop. Returning a `Result`
/// bubbles up fatal initialization problems (for example an unwritable home
/// directory) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let conn = ensure_schema()?;
    let mut app = App::new(conn);
    run_app(&mut app)
}
