//! Application state ownership.
//!
//! # Responsibility
//! - Own every domain collection, the active view, search strings and the
//!   AI modal in one explicit value.
//! - Expose the only mutations the dashboard supports as reducer actions.
//!
//! # Invariants
//! - Notes, cases and events are fixed after seeding.
//! - Invalid actions (blank task title, unknown task id) are silent no-ops.

pub mod app_state;

pub use app_state::{ActionOutcome, AppAction, AppState, SearchState};
