//! Ratatui front-end split across focused submodules: `app` holds the state
//! machine and rendering, `screens` the per-portal state, `forms` the modal
//! input handling, and `terminal` the raw-mode event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
