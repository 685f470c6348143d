//! Domain model for the dashboard core.
//!
//! # Responsibility
//! - Define the records the dashboard projects: notes, cases, events, tasks.
//! - Define the closed subject set and the view selector built on it.
//! - Define the single AI modal surface and its transitions.
//!
//! # Invariants
//! - Note, case and event ids are numeric and assigned monotonically by the
//!   seeding collaborator, so a higher id means a more recent record.
//! - Task ids are generated UUIDs and never reused.
//!
//! # See also
//! - `crate::store` for the owner of these collections.

pub mod case;
pub mod event;
pub mod modal;
pub mod note;
pub mod subject;
pub mod task;
