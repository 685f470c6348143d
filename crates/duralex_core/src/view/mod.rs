//! Read-only projections of `AppState`.
//!
//! # Responsibility
//! - Derive dashboard, subject and task views on demand.
//! - Keep every projection a pure function of state and `today`.
//!
//! # Invariants
//! - Projections borrow from state and never mutate it.
//! - Identical inputs produce identical outputs.
//!
//! # See also
//! - `crate::view::filter` for the shared primitives.

pub mod dashboard;
pub mod filter;
pub mod subject;

use crate::model::subject::ViewSelector;
use crate::model::task::Task;
use crate::store::AppState;
use chrono::NaiveDate;

pub use dashboard::{dashboard_view, DashboardView};
pub use subject::{subject_view, SubjectView};

/// Projection for whichever view is currently selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewProjection<'a> {
    Dashboard(DashboardView<'a>),
    Subject(SubjectView<'a>),
}

/// Projects the active view.
pub fn project(state: &AppState, today: NaiveDate) -> ViewProjection<'_> {
    match state.current_view() {
        ViewSelector::Dashboard => ViewProjection::Dashboard(dashboard_view(state, today)),
        ViewSelector::Subject(subject) => {
            ViewProjection::Subject(subject_view(state, subject, today))
        }
    }
}

/// Task list with its pending count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksView<'a> {
    /// Creation order.
    pub tasks: &'a [Task],
    pub pending: usize,
}

pub fn tasks_view(state: &AppState) -> TasksView<'_> {
    let tasks = state.tasks();
    TasksView {
        tasks,
        pending: tasks.iter().filter(|task| !task.is_completed).count(),
    }
}
