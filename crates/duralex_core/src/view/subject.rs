//! Subject-scoped projection.

use crate::model::case::Case;
use crate::model::event::Event;
use crate::model::note::Note;
use crate::model::subject::{Subject, ViewSelector};
use crate::store::AppState;
use crate::view::dashboard::{CASES_NO_MATCH_TEXT, NOTES_NO_MATCH_TEXT};
use crate::view::filter::{
    scope_cases, scope_events, scope_notes, search_cases, search_notes, upcoming_events,
    SUBJECT_EVENT_LIMIT,
};
use chrono::NaiveDate;

/// Everything one subject page renders, borrowed from `AppState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectView<'a> {
    pub subject: Subject,
    /// Search-filtered, in store order, not truncated.
    pub notes: Vec<&'a Note>,
    /// Search-filtered, in store order, not truncated.
    pub cases: Vec<&'a Case>,
    /// Ascending by date, at most [`SUBJECT_EVENT_LIMIT`].
    pub upcoming_events: Vec<&'a Event>,
    pub notes_empty_text: String,
    pub cases_empty_text: String,
    pub events_empty_text: String,
}

/// Projects the page for `subject`, independent of the active selector.
pub fn subject_view(state: &AppState, subject: Subject, today: NaiveDate) -> SubjectView<'_> {
    let selector = ViewSelector::Subject(subject);
    let search = state.search();

    let mut upcoming = upcoming_events(scope_events(state.events(), selector), today);
    upcoming.truncate(SUBJECT_EVENT_LIMIT);

    SubjectView {
        subject,
        notes: search_notes(scope_notes(state.notes(), selector), &search.note_query),
        cases: search_cases(scope_cases(state.cases(), selector), &search.case_query),
        upcoming_events: upcoming,
        notes_empty_text: if search.note_query.is_empty() {
            format!("No notes found for {subject}.")
        } else {
            NOTES_NO_MATCH_TEXT.to_string()
        },
        cases_empty_text: if search.case_query.is_empty() {
            format!("No cases found for {subject}.")
        } else {
            CASES_NO_MATCH_TEXT.to_string()
        },
        events_empty_text: format!("No upcoming events for {subject}."),
    }
}
