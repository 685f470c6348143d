//! Aggregate dashboard projection.

use crate::model::case::Case;
use crate::model::event::Event;
use crate::model::note::Note;
use crate::model::subject::ViewSelector;
use crate::store::AppState;
use crate::view::filter::{
    most_recent, scope_cases, scope_events, scope_notes, search_cases, search_notes,
    upcoming_events, upcoming_exam_count, DASHBOARD_EVENT_LIMIT, RECENT_ITEM_LIMIT,
};
use chrono::NaiveDate;

pub const NOTES_NO_MATCH_TEXT: &str = "No matching notes found.";
pub const CASES_NO_MATCH_TEXT: &str = "No matching cases found.";
const DASHBOARD_NOTES_EMPTY_TEXT: &str = "No notes yet. Start writing!";
const DASHBOARD_CASES_EMPTY_TEXT: &str = "No cases added yet.";
const DASHBOARD_EVENTS_EMPTY_TEXT: &str = "No upcoming events. Enjoy the peace!";

/// Everything the aggregate dashboard renders, borrowed from `AppState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView<'a> {
    /// Notes left after the note search.
    pub total_notes: usize,
    /// Cases left after the case search.
    pub total_cases: usize,
    pub upcoming_exam_count: usize,
    /// Ascending by date, at most [`DASHBOARD_EVENT_LIMIT`].
    pub upcoming_events: Vec<&'a Event>,
    /// Highest ids first, at most [`RECENT_ITEM_LIMIT`].
    pub recent_notes: Vec<&'a Note>,
    /// Highest ids first, at most [`RECENT_ITEM_LIMIT`].
    pub recent_cases: Vec<&'a Case>,
    pub notes_empty_text: &'static str,
    pub cases_empty_text: &'static str,
    pub events_empty_text: &'static str,
}

/// Projects the aggregate view regardless of the active selector.
pub fn dashboard_view(state: &AppState, today: NaiveDate) -> DashboardView<'_> {
    let selector = ViewSelector::Dashboard;
    let search = state.search();
    let notes = search_notes(scope_notes(state.notes(), selector), &search.note_query);
    let cases = search_cases(scope_cases(state.cases(), selector), &search.case_query);
    let events = scope_events(state.events(), selector);

    let mut upcoming = upcoming_events(events.iter().copied(), today);
    upcoming.truncate(DASHBOARD_EVENT_LIMIT);

    DashboardView {
        total_notes: notes.len(),
        total_cases: cases.len(),
        upcoming_exam_count: upcoming_exam_count(events.iter().copied(), today),
        upcoming_events: upcoming,
        recent_notes: most_recent(&notes, |note| note.id, RECENT_ITEM_LIMIT),
        recent_cases: most_recent(&cases, |case| case.id, RECENT_ITEM_LIMIT),
        notes_empty_text: if search.note_query.is_empty() {
            DASHBOARD_NOTES_EMPTY_TEXT
        } else {
            NOTES_NO_MATCH_TEXT
        },
        cases_empty_text: if search.case_query.is_empty() {
            DASHBOARD_CASES_EMPTY_TEXT
        } else {
            CASES_NO_MATCH_TEXT
        },
        events_empty_text: DASHBOARD_EVENTS_EMPTY_TEXT,
    }
}
